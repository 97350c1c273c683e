//! Two-phase (gas + liquid) flow through a porous medium on a 2-D grid.
//!
//! Each step advances the phase densities with the continuity equation,
//! solves the pressure/saturation equilibrium in every cell, recomputes the
//! Darcy velocities from the new pressure and re-imposes the ghost-cell
//! boundary conditions. [`TimeStepper`] owns the double-buffered state.
//!
//! ```no_run
//! use porous_flow::{SimulationConfig, TimeStepper};
//!
//! let config = SimulationConfig::reference();
//! let mut stepper = TimeStepper::new(&config)?;
//! let summary = stepper.run()?;
//! println!("P range: {:?}", summary.pressure_range);
//! # Ok::<(), porous_flow::SimulationError>(())
//! ```

pub mod boundary;
pub mod config;
pub mod continuity;
pub mod darcy;
pub mod eos;
pub mod error;
pub mod fields;
pub mod grid;
pub mod medium;
pub mod stencil;
pub mod stepper;

pub use boundary::BoundaryConditions;
pub use config::SimulationConfig;
pub use eos::{Bisection, EosConstants, Equilibrium, EquationOfState, RootEstimate};
pub use error::{SimulationError, SimulationResult};
pub use fields::{FieldSet, Phase};
pub use grid::Grid;
pub use medium::Medium;
pub use stencil::Stencil;
pub use stepper::{RunSummary, StepReport, TimeStepper};
