use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub nx: usize, // Number of cells in x direction
    pub ny: usize, // Number of cells in y direction
    pub dx: f64,   // Cell spacing in x (meters)
    pub dy: f64,   // Cell spacing in y (meters)
}

impl Grid {
    pub fn new(nx: usize, ny: usize, dx: f64, dy: f64) -> Self {
        Grid { nx, ny, dx, dy }
    }

    pub fn dim(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    /// Distance between the first and last cell centres in x (meters).
    pub fn width(&self) -> f64 {
        self.nx.saturating_sub(1) as f64 * self.dx
    }

    /// Distance between the first and last cell centres in y (meters).
    pub fn height(&self) -> f64 {
        self.ny.saturating_sub(1) as f64 * self.dy
    }

    pub fn cell_area(&self) -> f64 {
        self.dx * self.dy
    }

    /// Column index where the y=0 edge switches from inlet to wall.
    pub fn midpoint(&self) -> usize {
        self.nx / 2
    }

    /// Columns `[0, midpoint]` of the y=0 edge, held at the inlet pressure.
    pub fn inlet_columns(&self) -> Range<usize> {
        0..self.midpoint() + 1
    }

    /// Columns `(midpoint, nx)` of the y=0 edge, a no-flow wall.
    pub fn wall_columns(&self) -> Range<usize> {
        self.midpoint() + 1..self.nx
    }

    /// Cells `[1, nx-1) x [1, ny-1)`, the ones with a full 5-point stencil.
    pub fn interior(&self) -> impl Iterator<Item = (usize, usize)> {
        let ny = self.ny;
        (1..self.nx - 1).flat_map(move |i| (1..ny - 1).map(move |j| (i, j)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn extent_spans_cell_centres() {
        let grid = Grid::new(40, 20, 0.05, 0.1);
        assert!((grid.width() - 39.0 * 0.05).abs() < 1e-12);
        assert!((grid.height() - 19.0 * 0.1).abs() < 1e-12);
        assert!((grid.cell_area() - 0.005).abs() < 1e-15);
        assert_eq!(Grid::new(0, 0, 1.0, 1.0).width(), 0.0);
    }

    #[test]
    fn interior_skips_edges() {
        let grid = Grid::new(4, 5, 1.0, 1.0);
        let cells: Vec<_> = grid.interior().collect();
        assert_eq!(cells.len(), 2 * 3);
        assert!(cells.iter().all(|&(i, j)| i >= 1 && i <= 2 && j >= 1 && j <= 3));
    }

    #[test]
    fn midpoint_split_of_forty_columns() {
        let grid = Grid::new(40, 40, 0.05, 0.05);
        assert_eq!(grid.midpoint(), 20);
        assert_eq!(grid.inlet_columns(), 0..21);
        assert_eq!(grid.wall_columns(), 21..40);
    }

    proptest! {
        #[test]
        fn inlet_and_wall_partition_the_edge(half in 2usize..200) {
            let nx = 2 * half;
            let grid = Grid::new(nx, 3, 1.0, 1.0);
            let inlet = grid.inlet_columns();
            let wall = grid.wall_columns();

            prop_assert_eq!(inlet.start, 0);
            prop_assert_eq!(inlet.end, wall.start);
            prop_assert_eq!(wall.end, nx);
            prop_assert!(inlet.contains(&(nx / 2)));
            prop_assert!(!wall.contains(&(nx / 2)));
            prop_assert_eq!(inlet.len() + wall.len(), nx);
        }
    }
}
