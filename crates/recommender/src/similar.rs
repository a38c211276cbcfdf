//! Top-N similar products for the Product Recommendation page.

use crate::types::{SimilarProduct, SimilarProducts};
use data_loader::ItemSimilarity;
use std::cmp::Ordering;
use tracing::{debug, instrument, warn};

/// Descending by score, NaN scores last
fn by_score_desc(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// The `top_n` products most similar to `product`.
///
/// The product's own entry is dropped; the rest are sorted by similarity,
/// highest first, keeping table order among equal scores. The result holds
/// `min(top_n, products - 1)` entries.
#[instrument(skip(item_similarity))]
pub fn top_similar_products(
    item_similarity: &ItemSimilarity,
    product: &str,
    top_n: usize,
) -> SimilarProducts {
    let Some(column) = item_similarity.column(product) else {
        warn!("Product not found in item similarity table");
        return SimilarProducts::NotFound;
    };

    let mut ranked: Vec<SimilarProduct> = column
        .filter(|(other, _)| other.as_str() != product)
        .map(|(other, score)| SimilarProduct {
            product: other.clone(),
            score,
        })
        .collect();

    // Stable sort keeps table order for ties
    ranked.sort_by(|a, b| by_score_desc(a.score, b.score));
    ranked.truncate(top_n);

    debug!("Ranked {} similar products", ranked.len());
    SimilarProducts::Ranked(ranked)
}
