//! `FeatureTransform` for the fitted standard scaler.
//!
//! Computes `(x - mean) / scale` per feature. A zero scale entry leaves the
//! centered value unscaled, which is how a constant training feature is fitted.

use crate::error::SegmentationError;
use crate::traits::FeatureTransform;
use data_loader::StandardScaler;

impl FeatureTransform for StandardScaler {
    fn name(&self) -> &str {
        "StandardScaler"
    }

    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, SegmentationError> {
        if let Some(expected) = self.n_features() {
            if expected != features.len() {
                return Err(SegmentationError::DimensionMismatch {
                    stage: "StandardScaler",
                    expected,
                    found: features.len(),
                });
            }
        }

        let transformed = features
            .iter()
            .enumerate()
            .map(|(i, &x)| {
                let centered = match self.mean() {
                    Some(mean) => x - mean[i],
                    None => x,
                };
                match self.scale() {
                    Some(scale) if scale[i] != 0.0 => centered / scale[i],
                    _ => centered,
                }
            })
            .collect();

        Ok(transformed)
    }
}
