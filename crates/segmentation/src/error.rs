//! Errors raised while predicting a segment.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SegmentationError {
    /// An RFM value was negative or not a finite number
    #[error("Invalid value for {field}: {value}")]
    InvalidInput { field: &'static str, value: String },

    /// The feature vector does not match what a stage was fitted on
    #[error("{stage} expects {expected} features but got {found}")]
    DimensionMismatch {
        stage: &'static str,
        expected: usize,
        found: usize,
    },

    /// The cluster model has no centers to assign to
    #[error("Cluster model has no centers")]
    EmptyModel,
}
