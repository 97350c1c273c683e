//! Pressure/saturation equilibrium between an ideal gas and a weakly
//! compressible liquid sharing one cell.
//!
//! Given the phase mass densities accumulated in a cell, the equilibrium
//! pressure `P` is the root of
//!
//! ```text
//! s(P)  = ρ̂₁ / ρ₁(P)                 ρ₁(P) = M·P / (R·T)
//! ρ₂(P) = ρ̂₂ / (1 − s(P))
//! R(P)  = (ρ₂ − ρ₀) / ρ₂ − β·log₁₀((B + P) / (B + P_atm))
//! ```
//!
//! `R` is monotone decreasing in `P`, so bisection over a fixed bracket finds
//! the single root. The gas saturation `s` falls out of the same solve.

use serde::{Deserialize, Serialize};

/// Physical constants of the two-phase equation of state (SI units).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EosConstants {
    pub molar_mass: f64,               // Gas molar mass (kg/mol)
    pub gas_constant: f64,             // Universal gas constant (J/(mol·K))
    pub temperature: f64,              // Isothermal temperature (K)
    pub liquid_reference_density: f64, // ρ₀ at atmospheric pressure (kg/m³)
    pub compressibility: f64,          // Tait coefficient β
    pub tait_pressure: f64,            // Tait reference pressure B (Pa)
    pub atmospheric_pressure: f64,     // P_atm (Pa)
}

impl Default for EosConstants {
    fn default() -> Self {
        Self {
            molar_mass: 0.029,
            gas_constant: 8.314,
            temperature: 293.15,
            liquid_reference_density: 1000.0,
            compressibility: 0.315,
            tait_pressure: 3.0e8,
            atmospheric_pressure: 101_325.0,
        }
    }
}

/// Bisection settings: bracket, iteration cap and relative stopping width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bisection {
    pub left: f64,
    pub right: f64,
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for Bisection {
    fn default() -> Self {
        Self {
            left: 1e4,
            right: 1e7,
            max_iterations: 50,
            tolerance: 1e-6,
        }
    }
}

/// Result of a bisection search.
///
/// `value` is always the last midpoint evaluated. `converged` is false when
/// the bracket never changed sign or the iteration cap ran out first; the
/// value is still returned so callers can decide what to do with it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootEstimate {
    pub value: f64,
    pub iterations: usize,
    pub converged: bool,
}

impl Bisection {
    pub fn find_root<F>(&self, f: F) -> RootEstimate
    where
        F: Fn(f64) -> f64,
    {
        let mut left = self.left;
        let mut right = self.right;
        let mut f_left = f(left);
        let f_right = f(right);
        let bracketed =
            f_left.is_finite() && f_right.is_finite() && f_left.signum() != f_right.signum();

        let mut mid = 0.5 * (left + right);
        for iteration in 1..=self.max_iterations {
            mid = 0.5 * (left + right);
            let f_mid = f(mid);
            if f_mid == 0.0 {
                return RootEstimate {
                    value: mid,
                    iterations: iteration,
                    converged: true,
                };
            }

            if f_left.signum() == f_mid.signum() {
                left = mid;
                f_left = f_mid;
            } else {
                right = mid;
            }

            if bracketed && (right - left) / mid.abs() < self.tolerance {
                return RootEstimate {
                    value: mid,
                    iterations: iteration,
                    converged: true,
                };
            }
        }

        RootEstimate {
            value: mid,
            iterations: self.max_iterations,
            converged: false,
        }
    }
}

/// Equilibrium state of one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equilibrium {
    pub pressure: f64,
    pub saturation: f64, // Gas volume fraction
    pub converged: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EquationOfState {
    pub constants: EosConstants,
    pub solver: Bisection,
}

impl EquationOfState {
    pub fn new(constants: EosConstants) -> Self {
        Self {
            constants,
            solver: Bisection::default(),
        }
    }

    pub fn with_solver(mut self, solver: Bisection) -> Self {
        self.solver = solver;
        self
    }

    /// Ideal gas density ρ₁ = M·P / (R·T).
    pub fn gas_density(&self, pressure: f64) -> f64 {
        let c = &self.constants;
        c.molar_mass / (c.gas_constant * c.temperature) * pressure
    }

    /// Tait liquid density ρ₂ = ρ₀ / (1 − β·log₁₀((B + P) / (B + P_atm))).
    pub fn liquid_density(&self, pressure: f64) -> f64 {
        let c = &self.constants;
        c.liquid_reference_density / (1.0 - c.compressibility * self.tait_term(pressure))
    }

    fn tait_term(&self, pressure: f64) -> f64 {
        let c = &self.constants;
        ((c.tait_pressure + pressure) / (c.tait_pressure + c.atmospheric_pressure)).log10()
    }

    /// Inverse relation: phase mass densities `(ρ̂₁, ρ̂₂)` of a cell at
    /// pressure `P` with gas saturation `s`.
    pub fn phase_mass_densities(&self, pressure: f64, saturation: f64) -> (f64, f64) {
        (
            self.gas_density(pressure) * saturation,
            self.liquid_density(pressure) * (1.0 - saturation),
        )
    }

    pub fn saturation(&self, pressure: f64, gas_mass_density: f64) -> f64 {
        gas_mass_density / self.gas_density(pressure)
    }

    /// Equilibrium residual at trial pressure `P`; zero at the solution.
    pub fn residual(&self, pressure: f64, gas_mass_density: f64, liquid_mass_density: f64) -> f64 {
        let c = &self.constants;
        let s = self.saturation(pressure, gas_mass_density);
        let rho_liquid = liquid_mass_density / (1.0 - s);
        (rho_liquid - c.liquid_reference_density) / rho_liquid
            - c.compressibility * self.tait_term(pressure)
    }

    /// Solve for `(P, s)` from the phase mass densities of one cell.
    pub fn solve(&self, gas_mass_density: f64, liquid_mass_density: f64) -> Equilibrium {
        let root = self
            .solver
            .find_root(|p| self.residual(p, gas_mass_density, liquid_mass_density));
        Equilibrium {
            pressure: root.value,
            saturation: self.saturation(root.value, gas_mass_density),
            converged: root.converged,
        }
    }

    /// Same as [`solve`](Self::solve) for phase masses held in a cell of
    /// the given volume.
    pub fn solve_cell(&self, gas_mass: f64, liquid_mass: f64, volume: f64) -> Equilibrium {
        self.solve(gas_mass / volume, liquid_mass / volume)
    }
}
