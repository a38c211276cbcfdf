//! Small context shared by the unit tests.
//!
//! Customers 1-4, products A-D:
//!
//! | customer | A | B | C | D |
//! |----------|---|---|---|---|
//! | 1        | 2 | 0 | 1 | 0 |
//! | 2        | 4 | 3 | 0 | 0 |
//! | 3        | 0 | 5 | 2 | 0 |
//! | 4        | 1 | 0 | 0 | 0 |

use data_loader::{
    ArtifactContext, ItemSimilarity, KMeansModel, StandardScaler, UserItemMatrix, UserSimilarity,
};

fn products() -> Vec<String> {
    ["A", "B", "C", "D"].iter().map(|p| p.to_string()).collect()
}

pub(crate) fn create_test_context() -> ArtifactContext {
    let user_item = UserItemMatrix::from_rows(
        vec![1, 2, 3, 4],
        products(),
        vec![
            vec![2.0, 0.0, 1.0, 0.0],
            vec![4.0, 3.0, 0.0, 0.0],
            vec![0.0, 5.0, 2.0, 0.0],
            vec![1.0, 0.0, 0.0, 0.0],
        ],
    )
    .unwrap();

    let user_similarity = UserSimilarity::from_rows(
        vec![1, 2, 3, 4],
        vec![1, 2, 3, 4],
        vec![
            vec![1.0, 0.5, 0.2, 0.0],
            vec![0.5, 1.0, 0.8, 0.1],
            vec![0.2, 0.8, 1.0, 0.0],
            vec![0.0, 0.1, 0.0, 1.0],
        ],
    )
    .unwrap();

    let item_similarity = ItemSimilarity::from_rows(
        products(),
        products(),
        vec![
            vec![1.0, 0.6, 0.3, 0.0],
            vec![0.6, 1.0, 0.4, 0.0],
            vec![0.3, 0.4, 1.0, 0.9],
            vec![0.0, 0.0, 0.9, 1.0],
        ],
    )
    .unwrap();

    ArtifactContext::new(
        KMeansModel::new(vec![vec![0.0; 4]]).unwrap(),
        StandardScaler::new(None, None).unwrap(),
        user_item,
        user_similarity,
        item_similarity,
    )
}
