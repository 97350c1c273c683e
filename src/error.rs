use thiserror::Error;

pub type SimulationResult<T> = Result<T, SimulationError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// The 5-point stencil needs at least one interior cell.
    #[error("grid must be at least 3x3 cells, got {nx}x{ny}")]
    GridTooSmall { nx: usize, ny: usize },

    #[error("initial fields have shape {found:?}, grid is {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("non-finite {field} at cell ({i}, {j}) after step {step}")]
    NonFinite {
        step: usize,
        field: &'static str,
        i: usize,
        j: usize,
    },
}
