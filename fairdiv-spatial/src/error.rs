//! Error type shared by both spatial indices.

#[derive(Debug, thiserror::Error)]
pub enum SpatialError {
    #[error("point set is empty")]
    EmptyPointSet,

    #[error("weights length {got} does not match indexed point count {expected}")]
    WeightsLenMismatch { got: usize, expected: usize },

    #[error("query point dimension {got} does not match indexed dimension {expected}")]
    DimensionMismatch { got: usize, expected: usize },
}
