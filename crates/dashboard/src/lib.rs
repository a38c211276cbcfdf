//! Presentation layer for the Shopper Spectrum dashboard.
//!
//! Three pages are selected from a sidebar: Home, Customer Segmentation and
//! Product Recommendation. Each interaction is evaluated from scratch against
//! the shared `ArtifactContext`; nothing carries over between pages.
//!
//! - **pages**: the `Page` enum and the per-page forms
//! - **blocks**: display elements a page produces
//! - **router**: `Dashboard`, which turns an `Interaction` into blocks
//! - **render**: terminal rendering of blocks
//! - **session**: the interactive prompt loop used by the `dashboard` binary

pub mod blocks;
pub mod pages;
pub mod render;
pub mod router;
pub mod session;

pub use blocks::Block;
pub use pages::{MAX_TOP_N, MIN_TOP_N, Page, RecommendationForm, SegmentationForm};
pub use router::{Dashboard, Interaction};
pub use session::Session;
