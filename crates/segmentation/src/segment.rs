//! Segment prediction: RFM input -> cluster id -> human label.

use crate::error::SegmentationError;
use crate::traits::{ClusterAssign, FeatureTransform};
use data_loader::ArtifactContext;
use std::fmt;
use tracing::{debug, instrument};

/// Stand-in for the customer-id column the scaler and model were trained with.
///
/// The training frame kept `CustomerID` as a fourth feature. It carries no
/// meaning for an ad-hoc query, so every prediction uses this fixed value; it
/// must stay in sync with the artifacts or every prediction shifts.
pub const PLACEHOLDER_CUSTOMER_ID: f64 = 99999.0;

/// Behavioural segment for a cluster id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    LoyalCustomer,
    OccasionalCustomer,
    LostCustomer,
    BigSpender,
    Unknown,
}

impl Segment {
    pub fn from_cluster_id(cluster_id: usize) -> Self {
        match cluster_id {
            0 => Segment::LoyalCustomer,
            1 => Segment::OccasionalCustomer,
            2 => Segment::LostCustomer,
            3 => Segment::BigSpender,
            _ => Segment::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Segment::LoyalCustomer => "Loyal Customer",
            Segment::OccasionalCustomer => "Occasional Customer",
            Segment::LostCustomer => "Lost Customer",
            Segment::BigSpender => "Big Spender",
            Segment::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Recency / frequency / monetary values for one query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RfmInput {
    /// Days since last purchase
    pub recency: f64,
    /// Number of purchases
    pub frequency: u32,
    /// Total spend
    pub monetary: f64,
}

impl RfmInput {
    pub fn new(recency: f64, frequency: u32, monetary: f64) -> Result<Self, SegmentationError> {
        check_non_negative("recency", recency)?;
        check_non_negative("monetary", monetary)?;
        Ok(Self {
            recency,
            frequency,
            monetary,
        })
    }

    /// Feature vector in training column order
    pub fn to_features(&self) -> [f64; 4] {
        [
            self.recency,
            self.frequency as f64,
            self.monetary,
            PLACEHOLDER_CUSTOMER_ID,
        ]
    }
}

impl Default for RfmInput {
    fn default() -> Self {
        Self {
            recency: 325.0,
            frequency: 1,
            monetary: 765322.0,
        }
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), SegmentationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SegmentationError::InvalidInput {
            field,
            value: value.to_string(),
        })
    }
}

/// Result of a segment prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentPrediction {
    pub cluster_id: usize,
    pub segment: Segment,
}

/// Runs the transform and the cluster assignment for RFM inputs.
pub struct SegmentPredictor<'a> {
    transform: &'a dyn FeatureTransform,
    model: &'a dyn ClusterAssign,
}

impl<'a> SegmentPredictor<'a> {
    pub fn new(transform: &'a dyn FeatureTransform, model: &'a dyn ClusterAssign) -> Self {
        Self { transform, model }
    }

    /// Predictor over the context's scaler and cluster model
    pub fn from_context(context: &'a ArtifactContext) -> Self {
        Self::new(context.scaler(), context.cluster_model())
    }

    #[instrument(skip(self), fields(transform = self.transform.name(), model = self.model.name()))]
    pub fn predict(&self, input: &RfmInput) -> Result<SegmentPrediction, SegmentationError> {
        let scaled = self.transform.transform(&input.to_features())?;
        let cluster_id = self.model.assign(&scaled)?;
        let segment = Segment::from_cluster_id(cluster_id);
        debug!("Assigned cluster {} ({})", cluster_id, segment);
        Ok(SegmentPrediction {
            cluster_id,
            segment,
        })
    }
}

/// Predict the segment for one RFM input against the loaded artifacts
pub fn predict_segment(
    context: &ArtifactContext,
    input: &RfmInput,
) -> Result<SegmentPrediction, SegmentationError> {
    SegmentPredictor::from_context(context).predict(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Passes features through untouched
    struct Identity;

    impl FeatureTransform for Identity {
        fn name(&self) -> &str {
            "Identity"
        }

        fn transform(&self, features: &[f64]) -> Result<Vec<f64>, SegmentationError> {
            Ok(features.to_vec())
        }
    }

    /// Always answers with the same cluster id
    struct Fixed(usize);

    impl ClusterAssign for Fixed {
        fn name(&self) -> &str {
            "Fixed"
        }

        fn assign(&self, _features: &[f64]) -> Result<usize, SegmentationError> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(Segment::from_cluster_id(0).label(), "Loyal Customer");
        assert_eq!(Segment::from_cluster_id(1).label(), "Occasional Customer");
        assert_eq!(Segment::from_cluster_id(2).label(), "Lost Customer");
        assert_eq!(Segment::from_cluster_id(3).label(), "Big Spender");
        assert_eq!(Segment::from_cluster_id(4), Segment::Unknown);
        assert_eq!(Segment::BigSpender.to_string(), "Big Spender");
    }

    #[test]
    fn test_out_of_range_cluster_is_unknown() {
        let predictor = SegmentPredictor::new(&Identity, &Fixed(7));
        let prediction = predictor.predict(&RfmInput::default()).unwrap();
        assert_eq!(prediction.cluster_id, 7);
        assert_eq!(prediction.segment, Segment::Unknown);
    }

    #[test]
    fn test_feature_vector_carries_placeholder() {
        let input = RfmInput::new(10.0, 3, 250.5).unwrap();
        assert_eq!(input.to_features(), [10.0, 3.0, 250.5, PLACEHOLDER_CUSTOMER_ID]);
    }

    #[test]
    fn test_negative_inputs_rejected() {
        assert!(matches!(
            RfmInput::new(-1.0, 1, 10.0),
            Err(SegmentationError::InvalidInput { field: "recency", .. })
        ));
        assert!(matches!(
            RfmInput::new(1.0, 1, f64::NAN),
            Err(SegmentationError::InvalidInput { field: "monetary", .. })
        ));
    }

    #[test]
    fn test_default_input() {
        let input = RfmInput::default();
        assert_eq!(input.recency, 325.0);
        assert_eq!(input.frequency, 1);
        assert_eq!(input.monetary, 765322.0);
    }
}
