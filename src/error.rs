use thiserror::Error;

/// Reasons a [`QuadtreeConfig`](crate::QuadtreeConfig) cannot describe a usable tree.
#[derive(Debug, Error, PartialEq)]
pub enum QuadtreeError {
    #[error("Domain origin is not finite: ({x}, {y})")]
    NonFiniteOrigin { x: f64, y: f64 },

    #[error("Domain extent must be positive and finite: {width} x {height}")]
    InvalidExtent { width: f64, height: f64 },

    #[error("Minimum quadrant ratio must be in (0, 1]: {0}")]
    InvalidQuadrantRatio(f64),

    #[error("Maximum quadrant capacity must be at least 1")]
    ZeroCapacity,
}
