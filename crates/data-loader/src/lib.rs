//! # Data Loader Crate
//!
//! This crate fetches and deserializes the five artifacts behind the
//! Shopper Spectrum dashboard.
//!
//! ## Main Components
//!
//! - **types**: Artifact types (KMeansModel, StandardScaler, LabeledTable aliases)
//! - **parser**: JSON parsing and validation for each artifact kind
//! - **config**: The artifact manifest (identifiers, filenames, URL template)
//! - **loader**: Fetch-if-missing loader with a per-process cache
//! - **context**: `ArtifactContext`, the read-only bundle all queries use
//! - **error**: `LoadError`
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{ArtifactContext, ArtifactLoader, ArtifactManifest};
//! use std::sync::Arc;
//!
//! let manifest = ArtifactManifest::default();
//! let loader = Arc::new(ArtifactLoader::from_manifest("artifacts", &manifest)?);
//! let context = ArtifactContext::load(loader, &manifest).await?;
//!
//! println!("{} products", context.products().len());
//! ```

// Public modules
pub mod config;
pub mod context;
pub mod error;
pub mod loader;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use config::{ArtifactManifest, ArtifactSet, ArtifactSpec, DEFAULT_URL_TEMPLATE};
pub use context::{ArtifactContext, ContextSummary};
pub use error::{LoadError, Result};
pub use loader::{Artifact, ArtifactLoader};
pub use types::{
    // Type aliases
    CustomerId,
    ProductName,
    ItemSimilarity,
    UserItemMatrix,
    UserSimilarity,
    // Core types
    KMeansModel,
    LabeledTable,
    StandardScaler,
};
