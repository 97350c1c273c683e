use ndarray::{ArrayView2, ArrayViewMut2};

use crate::stencil::Stencil;

/// Constants of the discretised mass balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuityParams {
    pub porosity: f64,
    pub dx: f64,
    pub dy: f64,
    pub dt: f64,
}

/// Advance one phase density by a time step of
///
/// ```text
/// φ ∂ρ/∂t + ∂(ρu)/∂x + ∂(ρv)/∂y = 0
/// ```
///
/// with the flux divergence expanded by the product rule and every
/// derivative taken as a central difference of the previous step. The scheme
/// is explicit and not upwinded, so stability is up to the choice of dt, dx
/// and dy. Only interior cells of `rho_next` are written.
pub fn advance_density(
    rho: ArrayView2<'_, f64>,
    u: ArrayView2<'_, f64>,
    v: ArrayView2<'_, f64>,
    mut rho_next: ArrayViewMut2<'_, f64>,
    params: &ContinuityParams,
) {
    let (nx, ny) = rho.dim();
    let ContinuityParams { porosity, dx, dy, dt } = *params;

    for i in 1..nx - 1 {
        for j in 1..ny - 1 {
            let r = Stencil::at(rho, i, j);
            let su = Stencil::at(u, i, j);
            let sv = Stencil::at(v, i, j);

            // div(ρ v) = u ∂ρ/∂x + ρ ∂u/∂x + v ∂ρ/∂y + ρ ∂v/∂y
            let divergence = su.center * r.ddx(dx)
                + r.center * su.ddx(dx)
                + sv.center * r.ddy(dy)
                + r.center * sv.ddy(dy);

            rho_next[[i, j]] = r.center - dt / porosity * divergence;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn params() -> ContinuityParams {
        ContinuityParams {
            porosity: 0.7,
            dx: 0.05,
            dy: 0.05,
            dt: 0.001,
        }
    }

    #[test]
    fn zero_velocity_is_a_fixed_point() {
        let rho = Array2::from_shape_fn((6, 5), |(i, j)| 1.0 + 0.1 * i as f64 + 0.3 * j as f64);
        let zero = Array2::<f64>::zeros((6, 5));
        let mut next = rho.clone();
        advance_density(rho.view(), zero.view(), zero.view(), next.view_mut(), &params());
        assert_eq!(next, rho);
    }

    #[test]
    fn uniform_flow_of_uniform_density_is_steady() {
        let rho = Array2::from_elem((5, 5), 2.5);
        let u = Array2::from_elem((5, 5), 0.3);
        let v = Array2::from_elem((5, 5), -0.7);
        let mut next = Array2::<f64>::zeros((5, 5));
        advance_density(rho.view(), u.view(), v.view(), next.view_mut(), &params());
        for i in 1..4 {
            for j in 1..4 {
                assert!((next[[i, j]] - 2.5).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn converging_flow_accumulates_mass() {
        // v = -y: flow converges toward y = 0, div v = -1
        let p = params();
        let rho = Array2::from_elem((5, 5), 1.0);
        let u = Array2::<f64>::zeros((5, 5));
        let v = Array2::from_shape_fn((5, 5), |(_, j)| -(j as f64) * p.dy);
        let mut next = Array2::<f64>::zeros((5, 5));
        advance_density(rho.view(), u.view(), v.view(), next.view_mut(), &p);
        let expected = 1.0 + p.dt / p.porosity;
        assert!((next[[2, 2]] - expected).abs() < 1e-12);
    }

    #[test]
    fn edges_are_left_untouched() {
        let rho = Array2::from_elem((4, 4), 1.0);
        let u = Array2::from_shape_fn((4, 4), |(i, _)| i as f64);
        let v = Array2::<f64>::zeros((4, 4));
        let mut next = Array2::from_elem((4, 4), -9.0);
        advance_density(rho.view(), u.view(), v.view(), next.view_mut(), &params());
        for k in 0..4 {
            assert_eq!(next[[0, k]], -9.0);
            assert_eq!(next[[3, k]], -9.0);
            assert_eq!(next[[k, 0]], -9.0);
            assert_eq!(next[[k, 3]], -9.0);
        }
        assert_ne!(next[[1, 1]], -9.0);
    }
}
