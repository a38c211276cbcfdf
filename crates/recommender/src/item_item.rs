//! Item-based collaborative filtering score.
//!
//! ## Algorithm
//! 1. The product must be a column of the user-item matrix
//! 2. Take the customer's row of the user-item matrix
//! 3. Keep the other products the customer bought (quantity > 0)
//! 4. Weight each by its similarity to the target product and average

use crate::weighted::weighted_average;
use data_loader::{ArtifactContext, CustomerId};
use tracing::{debug, instrument, warn};

/// Predicted quantity of `product` for `customer_id` from similar products.
///
/// Returns `None` when the product or customer is unknown, when the customer
/// bought nothing besides `product`, or when the relevant similarities sum to
/// zero.
#[instrument(skip(context))]
pub fn predict_item_item(
    context: &ArtifactContext,
    customer_id: CustomerId,
    product: &str,
) -> Option<f64> {
    let user_item = context.user_item();
    if !user_item.has_column(product) {
        warn!("Product not found in user-item matrix");
        return None;
    }

    let Some(purchases) = user_item.row(&customer_id) else {
        warn!("Customer not found in user-item matrix");
        return None;
    };

    let similarity = context.item_similarity();
    let Some(product_col) = similarity.column_position(product) else {
        warn!("Product not found in item similarity table");
        return None;
    };

    let bought = user_item
        .column_labels()
        .iter()
        .zip(purchases)
        .filter(|&(other, &quantity)| quantity > 0.0 && other != product)
        .map(|(other, &quantity)| {
            let sim = similarity
                .row_position(other.as_str())
                .map(|r| similarity.value_at(r, product_col))
                .unwrap_or(f64::NAN);
            (sim, quantity)
        });

    let score = weighted_average(bought);
    debug!("Item-based score: {:?}", score);
    score
}
