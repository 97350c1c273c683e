use ndarray::{ArrayView2, ArrayViewMut2};

use crate::fields::Phase;
use crate::grid::Grid;
use crate::medium::Medium;
use crate::stencil::Stencil;

/// Darcy velocity of `phase` from the pressure gradient:
///
/// ```text
/// u = -(K/μ) f(s) ∂P/∂x,   v = -(K/μ) f(s) ∂P/∂y
/// ```
///
/// Central differences, interior cells only.
pub fn compute_velocity(
    phase: Phase,
    medium: &Medium,
    grid: &Grid,
    pressure: ArrayView2<'_, f64>,
    saturation: ArrayView2<'_, f64>,
    mut u: ArrayViewMut2<'_, f64>,
    mut v: ArrayViewMut2<'_, f64>,
) {
    let (nx, ny) = pressure.dim();
    let (dx, dy) = (grid.dx, grid.dy);

    for i in 1..nx - 1 {
        for j in 1..ny - 1 {
            let p = Stencil::at(pressure, i, j);
            let mobility = medium.mobility(phase, saturation[[i, j]]);
            u[[i, j]] = -mobility * p.ddx(dx);
            v[[i, j]] = -mobility * p.ddy(dy);
        }
    }
}
