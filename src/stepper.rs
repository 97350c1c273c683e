use log::{debug, info, warn};

use crate::boundary::BoundaryConditions;
use crate::config::SimulationConfig;
use crate::continuity::{self, ContinuityParams};
use crate::darcy;
use crate::eos::EquationOfState;
use crate::error::{SimulationError, SimulationResult};
use crate::fields::{FieldSet, Phase};
use crate::grid::Grid;
use crate::medium::Medium;

/// Outcome of a single step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    pub step: usize,
    pub unconverged_cells: usize, // Cells whose equilibrium bisection hit the cap
}

/// Outcome of a multi-step run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub steps: usize,
    pub unconverged_cells: usize,
    pub pressure_range: (f64, f64),
    pub saturation_range: (f64, f64),
    pub gas_mass: f64,
    pub liquid_mass: f64,
}

/// Double-buffered time integrator.
///
/// Each step reads `buffers[current]` and writes `buffers[1 - current]`,
/// then flips `current`. Grids are never copied between steps.
pub struct TimeStepper {
    grid: Grid,
    medium: Medium,
    boundary: BoundaryConditions,
    eos: EquationOfState,
    dt: f64,
    nsteps: usize,
    report_period: usize,
    buffers: [FieldSet; 2],
    current: usize,
    step_count: usize,
}

impl TimeStepper {
    /// Stepper starting from the configured uniform initial state.
    pub fn new(config: &SimulationConfig) -> SimulationResult<Self> {
        Self::with_initial_fields(config, config.initial_fields())
    }

    pub fn with_initial_fields(config: &SimulationConfig, initial: FieldSet) -> SimulationResult<Self> {
        let grid = config.grid();
        if grid.nx < 3 || grid.ny < 3 {
            return Err(SimulationError::GridTooSmall {
                nx: grid.nx,
                ny: grid.ny,
            });
        }
        if initial.dim() != grid.dim() || !initial.is_consistent() {
            let found = [&initial.s]
                .into_iter()
                .chain(initial.u.iter())
                .chain(initial.v.iter())
                .chain(initial.rho.iter())
                .map(|g| g.dim())
                .find(|&d| d != grid.dim())
                .unwrap_or_else(|| initial.dim());
            return Err(SimulationError::ShapeMismatch {
                expected: grid.dim(),
                found,
            });
        }

        Ok(Self {
            grid,
            medium: config.medium(),
            boundary: config.boundary_conditions(),
            eos: config.equation_of_state(),
            dt: config.run.dt,
            nsteps: config.run.nsteps,
            report_period: config.run.report_period.max(1),
            buffers: [initial.clone(), initial],
            current: 0,
            step_count: 0,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The authoritative state: whatever the last step wrote.
    pub fn current(&self) -> &FieldSet {
        &self.buffers[self.current]
    }

    pub fn into_current(self) -> FieldSet {
        let [a, b] = self.buffers;
        if self.current == 0 {
            a
        } else {
            b
        }
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn current_time(&self) -> f64 {
        self.step_count as f64 * self.dt
    }

    pub fn is_finished(&self) -> bool {
        self.step_count >= self.nsteps
    }

    /// Index of the buffer holding the current state.
    pub fn current_buffer(&self) -> usize {
        self.current
    }

    /// Advance one step: continuity, equilibrium, pressure boundary, Darcy,
    /// velocity boundary, swap.
    pub fn step(&mut self) -> SimulationResult<StepReport> {
        let (current, next) = split_buffers(&mut self.buffers, self.current);
        let (nx, ny) = self.grid.dim();

        // 1. Mass balance per phase, interior cells
        let params = ContinuityParams {
            porosity: self.medium.porosity,
            dx: self.grid.dx,
            dy: self.grid.dy,
            dt: self.dt,
        };
        for phase in Phase::ALL {
            let k = phase.index();
            continuity::advance_density(
                current.rho[k].view(),
                current.u[k].view(),
                current.v[k].view(),
                next.rho[k].view_mut(),
                &params,
            );
        }

        // 2. Equilibrium over every cell, edges included. Edge densities are
        //    never advanced, so edge cells keep solving their initial state.
        let mut unconverged_cells = 0;
        for i in 0..nx {
            for j in 0..ny {
                let eq = self.eos.solve(
                    next.rho[Phase::Gas.index()][[i, j]],
                    next.rho[Phase::Liquid.index()][[i, j]],
                );
                next.p[[i, j]] = eq.pressure;
                next.s[[i, j]] = eq.saturation;
                if !eq.converged {
                    unconverged_cells += 1;
                }
            }
        }

        // 3. Pressure ghost cells
        self.boundary.enforce_pressure(&self.grid, &mut next.p);

        // 4. Darcy velocities per phase, interior cells
        for phase in Phase::ALL {
            let k = phase.index();
            darcy::compute_velocity(
                phase,
                &self.medium,
                &self.grid,
                next.p.view(),
                next.s.view(),
                next.u[k].view_mut(),
                next.v[k].view_mut(),
            );
        }

        // 5. Velocity ghost cells
        for phase in Phase::ALL {
            let k = phase.index();
            self.boundary
                .enforce_velocity(&self.grid, next.u[k].view_mut(), next.v[k].view_mut());
        }

        // 6. Swap
        self.current = 1 - self.current;
        self.step_count += 1;

        if unconverged_cells > 0 {
            warn!(
                "step {}: equilibrium solve did not converge in {} cell(s)",
                self.step_count, unconverged_cells
            );
        }
        if let Some((field, i, j)) = self.current().first_non_finite() {
            return Err(SimulationError::NonFinite {
                step: self.step_count,
                field,
                i,
                j,
            });
        }
        debug!("step {} done (t={:.4}s)", self.step_count, self.current_time());

        Ok(StepReport {
            step: self.step_count,
            unconverged_cells,
        })
    }

    /// Advance `nsteps` steps. Zero steps leaves the state untouched.
    pub fn advance(&mut self, nsteps: usize) -> SimulationResult<RunSummary> {
        let mut unconverged_cells = 0;
        for _ in 0..nsteps {
            let report = self.step()?;
            unconverged_cells += report.unconverged_cells;

            if report.step % self.report_period == 0 {
                info!("{}", self.progress());
            }
        }
        Ok(self.summary(nsteps, unconverged_cells))
    }

    /// Run until the configured number of steps has been taken.
    pub fn run(&mut self) -> SimulationResult<RunSummary> {
        info!("Starting simulation...");
        info!("Grid: {}x{}", self.grid.nx, self.grid.ny);
        info!("Time step: {:.6} s", self.dt);
        info!("Number of steps: {}", self.nsteps);

        let remaining = self.nsteps.saturating_sub(self.step_count);
        let summary = self.advance(remaining)?;

        info!("Simulation complete!");
        Ok(summary)
    }

    /// One-line progress report: step, time, pressure range and phase masses.
    pub fn progress(&self) -> String {
        let fields = self.current();
        let area = self.grid.cell_area();
        let (p_min, p_max) = fields.pressure_range();
        format!(
            "Step {}/{} (t={:.4}s): P in [{:.1}, {:.1}] Pa, mass gas={:.6} liquid={:.3} kg/m",
            self.step_count,
            self.nsteps,
            self.current_time(),
            p_min,
            p_max,
            fields.phase_mass(Phase::Gas, area),
            fields.phase_mass(Phase::Liquid, area)
        )
    }

    fn summary(&self, steps: usize, unconverged_cells: usize) -> RunSummary {
        let fields = self.current();
        let area = self.grid.cell_area();
        RunSummary {
            steps,
            unconverged_cells,
            pressure_range: fields.pressure_range(),
            saturation_range: fields.saturation_range(),
            gas_mass: fields.phase_mass(Phase::Gas, area),
            liquid_mass: fields.phase_mass(Phase::Liquid, area),
        }
    }
}

/// Borrow `(current, next)` out of the buffer pair.
fn split_buffers(buffers: &mut [FieldSet; 2], current: usize) -> (&FieldSet, &mut FieldSet) {
    let (a, b) = buffers.split_at_mut(1);
    if current == 0 {
        (&a[0], &mut b[0])
    } else {
        (&b[0], &mut a[0])
    }
}
