//! Integration tests for segment prediction against a full `ArtifactContext`.

use data_loader::{
    ArtifactContext, ItemSimilarity, KMeansModel, StandardScaler, UserItemMatrix, UserSimilarity,
};
use segmentation::{RfmInput, Segment, predict_segment};

/// Scaler and centers shaped like a real RFM fit: recency in days, frequency
/// in orders, monetary in currency units, plus the customer-id column.
fn create_test_context() -> ArtifactContext {
    let scaler = StandardScaler::new(
        Some(vec![92.0, 4.3, 2000.0, 15300.0]),
        Some(vec![100.0, 7.7, 8900.0, 1700.0]),
    )
    .unwrap();

    let model = KMeansModel::new(vec![
        vec![-0.5, 0.5, 0.0, 0.0],  // loyal: recent, frequent
        vec![0.0, -0.3, -0.2, 0.0], // occasional
        vec![1.5, -0.4, -0.2, 0.0], // lost: long since last purchase
        vec![-0.8, 8.0, 30.0, 0.0], // big spender
    ])
    .unwrap();

    ArtifactContext::new(
        model,
        scaler,
        UserItemMatrix::from_rows(vec![], vec![], vec![]).unwrap(),
        UserSimilarity::from_rows(vec![], vec![], vec![]).unwrap(),
        ItemSimilarity::from_rows(vec![], vec![], vec![]).unwrap(),
    )
}

#[test]
fn test_default_scenario_is_deterministic() {
    let context = create_test_context();
    let input = RfmInput::new(325.0, 1, 765322.0).unwrap();

    let first = predict_segment(&context, &input).unwrap();
    let second = predict_segment(&context, &input).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.cluster_id, 3);
    assert_eq!(first.segment, Segment::BigSpender);
}

#[test]
fn test_valid_inputs_map_to_known_segments() {
    let context = create_test_context();

    for recency in [0.0, 1.0, 30.0, 180.0, 400.0] {
        for frequency in [0u32, 1, 5, 50, 500] {
            for monetary in [0.0, 10.0, 1500.0, 50_000.0, 1_000_000.0] {
                let input = RfmInput::new(recency, frequency, monetary).unwrap();
                let prediction = predict_segment(&context, &input).unwrap();
                assert!(prediction.cluster_id < 4);
                assert_ne!(prediction.segment, Segment::Unknown);
            }
        }
    }
}

#[test]
fn test_model_feature_mismatch_propagates() {
    let context = ArtifactContext::new(
        KMeansModel::new(vec![vec![0.0, 0.0, 0.0]]).unwrap(),
        StandardScaler::new(None, None).unwrap(),
        UserItemMatrix::from_rows(vec![], vec![], vec![]).unwrap(),
        UserSimilarity::from_rows(vec![], vec![], vec![]).unwrap(),
        ItemSimilarity::from_rows(vec![], vec![], vec![]).unwrap(),
    );

    let err = predict_segment(&context, &RfmInput::default()).unwrap_err();
    assert_eq!(err.to_string(), "KMeans expects 3 features but got 4");
}
