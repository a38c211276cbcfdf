//! # Recommender Crate
//!
//! Memory-based collaborative filtering over the precomputed similarity tables.
//!
//! ## Components
//!
//! ### User-based scoring
//! "Customers similar to you bought this": a similarity-weighted average of the
//! quantities other customers bought of the product.
//!
//! ### Item-based scoring
//! "You bought things similar to this": a similarity-weighted average of the
//! quantities the customer bought of other products.
//!
//! ### Similar products
//! The top-N most similar products to a given product, as listed on the
//! Product Recommendation page.
//!
//! ## Example Usage
//!
//! ```ignore
//! use recommender::{predict_item_item, predict_user_user, top_similar_products};
//!
//! let user_based = predict_user_user(&context, 12346, "WHITE HANGING HEART T-LIGHT HOLDER");
//! let item_based = predict_item_item(&context, 12346, "WHITE HANGING HEART T-LIGHT HOLDER");
//! let similar = top_similar_products(context.item_similarity(), "REGENCY CAKESTAND 3 TIER", 5);
//! ```
//!
//! Every function returns "no result" rather than an error when a customer or
//! product is missing from one of the tables.

// Public modules
pub mod item_item;
pub mod similar;
pub mod types;
pub mod user_user;
mod weighted;

// Re-export commonly used types
pub use item_item::predict_item_item;
pub use similar::top_similar_products;
pub use types::{SimilarProduct, SimilarProducts};
pub use user_user::predict_user_user;

#[cfg(test)]
pub(crate) mod test_fixtures;
