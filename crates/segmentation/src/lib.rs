//! Customer segmentation from recency/frequency/monetary (RFM) values.
//!
//! This crate provides:
//! - `FeatureTransform` and `ClusterAssign` traits, the two stages of a prediction
//! - Implementations of both for the loaded `StandardScaler` and `KMeansModel`
//! - `SegmentPredictor` and the `predict_segment` convenience entry point
//!
//! ## Architecture
//! A prediction runs in three steps:
//! 1. Build the feature vector `[recency, frequency, monetary, placeholder id]`
//! 2. Scale it with the fitted scaler
//! 3. Assign the nearest cluster center and map the id to a `Segment`
//!
//! ## Example Usage
//! ```ignore
//! use segmentation::{predict_segment, RfmInput};
//!
//! let input = RfmInput::new(325.0, 1, 765322.0)?;
//! let prediction = predict_segment(&context, &input)?;
//! println!("Cluster {}: {}", prediction.cluster_id, prediction.segment);
//! ```

pub mod error;
pub mod kmeans;
pub mod scaler;
pub mod segment;
pub mod traits;

// Re-export main types
pub use error::SegmentationError;
pub use segment::{
    PLACEHOLDER_CUSTOMER_ID, RfmInput, Segment, SegmentPrediction, SegmentPredictor,
    predict_segment,
};
pub use traits::{ClusterAssign, FeatureTransform};
