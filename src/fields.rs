use ndarray::Array2;

use crate::eos::EquationOfState;

/// The two fluid phases sharing the pore space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Gas,
    Liquid,
}

impl Phase {
    pub const ALL: [Phase; 2] = [Phase::Gas, Phase::Liquid];

    pub fn index(self) -> usize {
        match self {
            Phase::Gas => 0,
            Phase::Liquid => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Phase::Gas => "gas",
            Phase::Liquid => "liquid",
        }
    }
}

/// Simulation state: per-phase velocities and densities plus the shared
/// pressure and gas saturation. Every grid has shape (nx, ny).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSet {
    pub u: [Array2<f64>; 2],
    pub v: [Array2<f64>; 2],
    pub rho: [Array2<f64>; 2],
    pub p: Array2<f64>,
    pub s: Array2<f64>,
}

impl FieldSet {
    pub fn zeros(nx: usize, ny: usize) -> Self {
        let zero = || Array2::<f64>::zeros((nx, ny));
        FieldSet {
            u: [zero(), zero()],
            v: [zero(), zero()],
            rho: [zero(), zero()],
            p: zero(),
            s: zero(),
        }
    }

    /// Uniform pressure and saturation at rest, with phase densities taken
    /// from the equation of state so the cells start in equilibrium.
    pub fn uniform(
        nx: usize,
        ny: usize,
        pressure: f64,
        saturation: f64,
        eos: &EquationOfState,
    ) -> Self {
        let (gas, liquid) = eos.phase_mass_densities(pressure, saturation);
        let mut fields = Self::zeros(nx, ny);
        fields.rho[Phase::Gas.index()].fill(gas);
        fields.rho[Phase::Liquid.index()].fill(liquid);
        fields.p.fill(pressure);
        fields.s.fill(saturation);
        fields
    }

    pub fn dim(&self) -> (usize, usize) {
        self.p.dim()
    }

    /// True when every grid has the same shape as `p`.
    pub fn is_consistent(&self) -> bool {
        let dim = self.p.dim();
        self.s.dim() == dim
            && self
                .u
                .iter()
                .chain(self.v.iter())
                .chain(self.rho.iter())
                .all(|grid| grid.dim() == dim)
    }

    pub fn density(&self, phase: Phase) -> &Array2<f64> {
        &self.rho[phase.index()]
    }

    pub fn velocity(&self, phase: Phase) -> (&Array2<f64>, &Array2<f64>) {
        (&self.u[phase.index()], &self.v[phase.index()])
    }

    /// Total phase mass over interior cells, Σ ρ·ΔxΔy.
    pub fn phase_mass(&self, phase: Phase, cell_area: f64) -> f64 {
        let (nx, ny) = self.dim();
        let rho = self.density(phase);
        let mut total = 0.0;
        for i in 1..nx.saturating_sub(1) {
            for j in 1..ny.saturating_sub(1) {
                total += rho[[i, j]];
            }
        }
        total * cell_area
    }

    pub fn pressure_range(&self) -> (f64, f64) {
        min_max(&self.p)
    }

    pub fn saturation_range(&self) -> (f64, f64) {
        min_max(&self.s)
    }

    /// First NaN or infinite value in pressure or saturation, as
    /// `(field, i, j)`.
    pub fn first_non_finite(&self) -> Option<(&'static str, usize, usize)> {
        for (name, grid) in [("pressure", &self.p), ("saturation", &self.s)] {
            if let Some(((i, j), _)) = grid.indexed_iter().find(|(_, value)| !value.is_finite()) {
                return Some((name, i, j));
            }
        }
        None
    }

    pub fn velocity_magnitude(&self, phase: Phase) -> Array2<f64> {
        let (u, v) = self.velocity(phase);
        let mut mag = Array2::<f64>::zeros(self.dim());
        ndarray::Zip::from(&mut mag)
            .and(u)
            .and(v)
            .for_each(|m, &u, &v| *m = (u * u + v * v).sqrt());
        mag
    }
}

fn min_max(grid: &Array2<f64>) -> (f64, f64) {
    grid.iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)))
}
