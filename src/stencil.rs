use ndarray::ArrayView2;

/// Five-point neighbourhood of cell (i, j). x grows east (i + 1),
/// y grows north (j + 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stencil {
    pub center: f64,
    pub north: f64,
    pub south: f64,
    pub west: f64,
    pub east: f64,
}

impl Stencil {
    /// Caller guarantees `1 <= i < nx - 1` and `1 <= j < ny - 1`.
    #[inline]
    pub fn at(grid: ArrayView2<'_, f64>, i: usize, j: usize) -> Self {
        Stencil {
            center: grid[[i, j]],
            north: grid[[i, j + 1]],
            south: grid[[i, j - 1]],
            west: grid[[i - 1, j]],
            east: grid[[i + 1, j]],
        }
    }

    /// Central difference ∂/∂x.
    #[inline]
    pub fn ddx(&self, dx: f64) -> f64 {
        (self.east - self.west) / (2.0 * dx)
    }

    /// Central difference ∂/∂y.
    #[inline]
    pub fn ddy(&self, dy: f64) -> f64 {
        (self.north - self.south) / (2.0 * dy)
    }
}
