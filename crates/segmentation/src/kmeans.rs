//! `ClusterAssign` for the trained k-means model.
//!
//! ## Algorithm
//! For each cluster center compute the squared Euclidean distance to the
//! input and return the index of the closest one. Ties go to the lowest index.

use crate::error::SegmentationError;
use crate::traits::ClusterAssign;
use data_loader::KMeansModel;

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

impl ClusterAssign for KMeansModel {
    fn name(&self) -> &str {
        "KMeans"
    }

    fn assign(&self, features: &[f64]) -> Result<usize, SegmentationError> {
        if self.n_clusters() == 0 {
            return Err(SegmentationError::EmptyModel);
        }
        if self.n_features() != features.len() {
            return Err(SegmentationError::DimensionMismatch {
                stage: "KMeans",
                expected: self.n_features(),
                found: features.len(),
            });
        }

        self.cluster_centers()
            .iter()
            .map(|center| squared_distance(center, features))
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(cluster_id, _)| cluster_id)
            .ok_or(SegmentationError::EmptyModel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_model() -> KMeansModel {
        KMeansModel::new(vec![
            vec![0.0, 0.0],
            vec![10.0, 0.0],
            vec![0.0, 10.0],
            vec![10.0, 10.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_nearest_center() {
        let model = create_test_model();
        assert_eq!(model.assign(&[1.0, 1.0]).unwrap(), 0);
        assert_eq!(model.assign(&[9.0, -3.0]).unwrap(), 1);
        assert_eq!(model.assign(&[-2.0, 8.0]).unwrap(), 2);
        assert_eq!(model.assign(&[50.0, 50.0]).unwrap(), 3);
    }

    #[test]
    fn test_tie_goes_to_lowest_index() {
        let model = create_test_model();
        // Equidistant from all four centers
        assert_eq!(model.assign(&[5.0, 5.0]).unwrap(), 0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let model = create_test_model();
        assert!(matches!(
            model.assign(&[1.0, 2.0, 3.0]),
            Err(SegmentationError::DimensionMismatch { expected: 2, found: 3, .. })
        ));
    }
}
