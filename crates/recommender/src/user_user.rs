//! User-based collaborative filtering score.
//!
//! ## Algorithm
//! 1. The product must be a column of the user-item matrix
//! 2. Take the customer's column of the user similarity table
//! 3. Keep the other customers who bought the product (quantity > 0)
//! 4. Similarity-weighted average of their quantities

use crate::weighted::weighted_average;
use data_loader::{ArtifactContext, CustomerId};
use tracing::{debug, instrument, warn};

/// Predicted quantity of `product` for `customer_id` from similar customers.
///
/// Returns `None` when the product or customer is unknown, when no other
/// customer bought the product, or when the relevant similarities sum to zero.
#[instrument(skip(context))]
pub fn predict_user_user(
    context: &ArtifactContext,
    customer_id: CustomerId,
    product: &str,
) -> Option<f64> {
    let user_item = context.user_item();
    let Some(product_col) = user_item.column_position(product) else {
        warn!("Product not found in user-item matrix");
        return None;
    };

    let similarity = context.user_similarity();
    let Some(customer_col) = similarity.column_position(&customer_id) else {
        warn!("Customer not found in user similarity table");
        return None;
    };

    let neighbours = user_item
        .row_labels()
        .iter()
        .enumerate()
        .filter(|&(_, &other)| other != customer_id)
        .filter_map(|(row, &other)| {
            let rating = user_item.value_at(row, product_col);
            if rating <= 0.0 {
                return None;
            }
            // A customer absent from the similarity table carries no weight
            let sim = similarity
                .row_position(&other)
                .map(|r| similarity.value_at(r, customer_col))
                .unwrap_or(f64::NAN);
            Some((sim, rating))
        });

    let score = weighted_average(neighbours);
    debug!("User-based score: {:?}", score);
    score
}
