use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::boundary::BoundaryConditions;
use crate::eos::{Bisection, EosConstants, EquationOfState};
use crate::fields::{FieldSet, Phase};
use crate::grid::Grid;
use crate::medium::Medium;

/// Grid configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    pub nx: usize,
    pub ny: usize,
    pub dx: f64,
    pub dy: f64,
}

impl GridConfig {
    fn validate(&self) -> Result<()> {
        if self.nx < 3 || self.ny < 3 {
            return Err(anyhow!(
                "Grid must be at least 3x3 cells (nx={}, ny={})",
                self.nx,
                self.ny
            ));
        }
        if self.dx <= 0.0 || self.dy <= 0.0 {
            return Err(anyhow!(
                "Grid spacing must be positive (dx={}, dy={})",
                self.dx,
                self.dy
            ));
        }
        Ok(())
    }
}

/// Porous medium and fluid transport properties
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediumConfig {
    pub porosity: f64,
    pub permeability: f64, // m²
    pub viscosity: f64,    // Pa·s, shared by both phases unless overridden
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liquid_viscosity: Option<f64>,
}

impl MediumConfig {
    fn validate(&self) -> Result<()> {
        if self.porosity <= 0.0 || self.porosity > 1.0 {
            return Err(anyhow!("porosity must be in (0, 1], got {}", self.porosity));
        }
        if self.permeability <= 0.0 {
            return Err(anyhow!("permeability must be positive, got {}", self.permeability));
        }
        let liquid = self.liquid_viscosity.unwrap_or(self.viscosity);
        if self.viscosity <= 0.0 || liquid <= 0.0 {
            return Err(anyhow!(
                "Viscosities must be positive (gas={}, liquid={})",
                self.viscosity,
                liquid
            ));
        }
        Ok(())
    }
}

/// Pressures held on the inlet and outlet edges
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundaryConfig {
    pub inlet_pressure: f64,
    pub outlet_pressure: f64,
}

impl BoundaryConfig {
    fn validate(&self) -> Result<()> {
        if self.inlet_pressure <= 0.0 || self.outlet_pressure <= 0.0 {
            return Err(anyhow!(
                "Boundary pressures must be positive (inlet={}, outlet={})",
                self.inlet_pressure,
                self.outlet_pressure
            ));
        }
        Ok(())
    }
}

/// Time stepping and initial state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub dt: f64,
    pub nsteps: usize,
    #[serde(default = "default_initial_saturation")]
    pub initial_saturation: f64,
    #[serde(default = "default_report_period")]
    pub report_period: usize,
}

fn default_initial_saturation() -> f64 {
    0.75
}

fn default_report_period() -> usize {
    10
}

impl RunConfig {
    fn validate(&self) -> Result<()> {
        if self.dt <= 0.0 {
            return Err(anyhow!("dt must be positive, got {}", self.dt));
        }
        if !(0.0..=1.0).contains(&self.initial_saturation) {
            return Err(anyhow!(
                "initial_saturation must be in [0, 1], got {}",
                self.initial_saturation
            ));
        }
        if self.report_period == 0 {
            return Err(anyhow!("report_period must be at least 1"));
        }
        Ok(())
    }
}

fn validate_solver(solver: &Bisection) -> Result<()> {
    if solver.left <= 0.0 || solver.right <= solver.left {
        return Err(anyhow!(
            "Solver bracket must satisfy 0 < left < right (left={}, right={})",
            solver.left,
            solver.right
        ));
    }
    if solver.max_iterations == 0 {
        return Err(anyhow!("Solver max_iterations must be at least 1"));
    }
    if solver.tolerance <= 0.0 {
        return Err(anyhow!("Solver tolerance must be positive, got {}", solver.tolerance));
    }
    Ok(())
}

fn validate_eos(eos: &EosConstants) -> Result<()> {
    let positive = [
        ("molar_mass", eos.molar_mass),
        ("gas_constant", eos.gas_constant),
        ("temperature", eos.temperature),
        ("liquid_reference_density", eos.liquid_reference_density),
        ("tait_pressure", eos.tait_pressure),
        ("atmospheric_pressure", eos.atmospheric_pressure),
    ];
    for (name, value) in positive {
        if value <= 0.0 {
            return Err(anyhow!("eos.{} must be positive, got {}", name, value));
        }
    }
    Ok(())
}

/// Complete simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub grid: GridConfig,
    pub medium: MediumConfig,
    pub boundary: BoundaryConfig,
    pub run: RunConfig,
    #[serde(default)]
    pub solver: Bisection,
    #[serde(default)]
    pub eos: EosConstants,
}

impl SimulationConfig {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file '{}': {}", path.display(), e))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig =
            toml::from_str(content).map_err(|e| anyhow!("Failed to parse TOML config: {}", e))?;

        // Validate before returning
        config.validate()?;

        Ok(config)
    }

    /// 40x40 cells of 5 cm, gas injected at 10 bar into a medium at 1 bar.
    pub fn reference() -> Self {
        SimulationConfig {
            grid: GridConfig {
                nx: 40,
                ny: 40,
                dx: 0.05,
                dy: 0.05,
            },
            medium: MediumConfig {
                porosity: 0.7,
                permeability: 1e-12,
                viscosity: 18e-6,
                liquid_viscosity: None,
            },
            boundary: BoundaryConfig {
                inlet_pressure: 1e6,
                outlet_pressure: 1e5,
            },
            run: RunConfig {
                dt: 0.001,
                nsteps: 100,
                initial_saturation: default_initial_saturation(),
                report_period: default_report_period(),
            },
            solver: Bisection::default(),
            eos: EosConstants::default(),
        }
    }

    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;
        self.medium.validate()?;
        self.boundary.validate()?;
        self.run.validate()?;
        validate_solver(&self.solver)?;
        validate_eos(&self.eos)?;

        for (name, p) in [
            ("inlet_pressure", self.boundary.inlet_pressure),
            ("outlet_pressure", self.boundary.outlet_pressure),
        ] {
            if p < self.solver.left || p > self.solver.right {
                log::warn!(
                    "{} {} lies outside the solver bracket [{}, {}]",
                    name,
                    p,
                    self.solver.left,
                    self.solver.right
                );
            }
        }

        Ok(())
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid.nx, self.grid.ny, self.grid.dx, self.grid.dy)
    }

    pub fn medium(&self) -> Medium {
        let medium = Medium::new(self.medium.porosity, self.medium.permeability, self.medium.viscosity);
        match self.medium.liquid_viscosity {
            Some(mu) => medium.with_viscosity(Phase::Liquid, mu),
            None => medium,
        }
    }

    pub fn boundary_conditions(&self) -> BoundaryConditions {
        BoundaryConditions::new(self.boundary.inlet_pressure, self.boundary.outlet_pressure)
    }

    pub fn equation_of_state(&self) -> EquationOfState {
        EquationOfState::new(self.eos).with_solver(self.solver)
    }

    /// Medium at rest at the outlet pressure with uniform saturation.
    pub fn initial_fields(&self) -> FieldSet {
        FieldSet::uniform(
            self.grid.nx,
            self.grid.ny,
            self.boundary.outlet_pressure,
            self.run.initial_saturation,
            &self.equation_of_state(),
        )
    }

    /// Multi-line configuration summary
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let grid = self.grid();
        let medium = self.medium();
        let _ = writeln!(out, "=== Simulation Configuration ===");
        let _ = writeln!(
            out,
            "Grid: {}x{} ({:.3} x {:.3} m)",
            grid.nx,
            grid.ny,
            grid.width(),
            grid.height()
        );
        let _ = writeln!(
            out,
            "Medium: φ={}, K={} m², μ_gas={} Pa·s, μ_liquid={} Pa·s",
            medium.porosity,
            medium.permeability,
            medium.viscosity(Phase::Gas),
            medium.viscosity(Phase::Liquid)
        );
        let _ = writeln!(
            out,
            "Boundary: Pin={} Pa (x ≤ {}), Pout={} Pa",
            self.boundary.inlet_pressure,
            grid.midpoint(),
            self.boundary.outlet_pressure
        );
        let _ = writeln!(
            out,
            "Run: dt={} s, nsteps={}, total_time={} s, s0={}",
            self.run.dt,
            self.run.nsteps,
            self.run.dt * self.run.nsteps as f64,
            self.run.initial_saturation
        );
        let _ = writeln!(
            out,
            "Solver: bracket [{}, {}] Pa, max_iterations={}, tolerance={}",
            self.solver.left, self.solver.right, self.solver.max_iterations, self.solver.tolerance
        );
        let _ = write!(out, "================================");
        out
    }
}
