//! Result types for the similar-products listing.

use data_loader::ProductName;

/// One entry of a similar-products listing
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarProduct {
    pub product: ProductName,
    pub score: f64,
}

/// Outcome of a similar-products lookup
#[derive(Debug, Clone, PartialEq)]
pub enum SimilarProducts {
    /// The product has no column in the item similarity table
    NotFound,
    /// Most similar first, never including the queried product
    Ranked(Vec<SimilarProduct>),
}

impl SimilarProducts {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SimilarProducts::NotFound)
    }

    /// The ranked entries, empty when not found
    pub fn items(&self) -> &[SimilarProduct] {
        match self {
            SimilarProducts::NotFound => &[],
            SimilarProducts::Ranked(items) => items,
        }
    }
}
