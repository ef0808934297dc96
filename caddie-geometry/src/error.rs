use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// Fewer than three vertices, the shape does not enclose anything.
    DegenerateGeometry { vertices: usize },
    /// Signed area is exactly zero (collinear or cancelling vertices).
    ZeroArea,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateGeometry { vertices } => {
                write!(f, "degenerate polygon: expected at least 3 vertices, got {vertices}")
            }
            Self::ZeroArea => write!(f, "polygon has zero signed area"),
        }
    }
}

impl std::error::Error for GeometryError {}
