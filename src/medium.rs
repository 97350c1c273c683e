use crate::fields::Phase;

/// Rock and fluid transport properties, uniform over the domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Medium {
    pub porosity: f64,       // φ, void fraction
    pub permeability: f64,   // K (m²)
    pub viscosity: [f64; 2], // μ per phase, indexed by Phase::index (Pa·s)
}

impl Medium {
    /// Both phases share one viscosity.
    pub fn new(porosity: f64, permeability: f64, viscosity: f64) -> Self {
        Self {
            porosity,
            permeability,
            viscosity: [viscosity, viscosity],
        }
    }

    pub fn with_viscosity(mut self, phase: Phase, viscosity: f64) -> Self {
        self.viscosity[phase.index()] = viscosity;
        self
    }

    pub fn viscosity(&self, phase: Phase) -> f64 {
        self.viscosity[phase.index()]
    }

    /// Saturation argument handed to the relative mobility of `phase`, given
    /// the gas saturation `s`. The liquid receives `s - 1`; the mobility
    /// squares it, so this equals `1 - s` there.
    pub fn mobility_argument(phase: Phase, s: f64) -> f64 {
        match phase {
            Phase::Gas => s,
            Phase::Liquid => s - 1.0,
        }
    }

    pub fn relative_mobility(saturation: f64) -> f64 {
        saturation * saturation
    }

    /// Darcy coefficient (K / μ)·f(s) of `phase` at gas saturation `s`.
    pub fn mobility(&self, phase: Phase, s: f64) -> f64 {
        self.permeability / self.viscosity(phase)
            * Self::relative_mobility(Self::mobility_argument(phase, s))
    }
}
