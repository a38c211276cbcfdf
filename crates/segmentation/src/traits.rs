//! Core traits for the segmentation pipeline.
//!
//! A prediction is a transform followed by an assignment. Keeping the two
//! stages behind traits lets either side be swapped for a test double.

use crate::error::SegmentationError;

/// Maps a raw feature vector into the space the cluster model was trained in.
pub trait FeatureTransform: Send + Sync {
    /// Returns the name of this transform (for logging/debugging)
    fn name(&self) -> &str;

    /// Transform one feature vector
    ///
    /// # Returns
    /// * `Ok(Vec<f64>)` - The transformed features, same length as the input
    /// * `Err` - If the vector length does not match the fitted dimension
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, SegmentationError>;
}

/// Assigns a transformed feature vector to a cluster id.
pub trait ClusterAssign: Send + Sync {
    /// Returns the name of this model (for logging/debugging)
    fn name(&self) -> &str;

    /// Cluster id for one feature vector
    fn assign(&self, features: &[f64]) -> Result<usize, SegmentationError>;
}
