//! `ArtifactContext` - the read-only bundle every query runs against.
//!
//! Built once at startup and shared by reference (`Arc`) with the segment
//! predictor, the recommendation scorer and the dashboard pages.

use crate::config::ArtifactManifest;
use crate::error::{LoadError, Result};
use crate::loader::ArtifactLoader;
use crate::types::*;
use std::sync::Arc;
use tracing::info;

/// All five artifacts, loaded and validated
#[derive(Debug, Clone)]
pub struct ArtifactContext {
    cluster_model: Arc<KMeansModel>,
    scaler: Arc<StandardScaler>,
    user_item: Arc<UserItemMatrix>,
    user_similarity: Arc<UserSimilarity>,
    item_similarity: Arc<ItemSimilarity>,
}

/// Sizes of the loaded artifacts, for logging and the Home page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextSummary {
    pub clusters: usize,
    pub customers: usize,
    pub products: usize,
}

impl ArtifactContext {
    /// Assemble a context from already-built artifacts
    pub fn new(
        cluster_model: KMeansModel,
        scaler: StandardScaler,
        user_item: UserItemMatrix,
        user_similarity: UserSimilarity,
        item_similarity: ItemSimilarity,
    ) -> Self {
        Self {
            cluster_model: Arc::new(cluster_model),
            scaler: Arc::new(scaler),
            user_item: Arc::new(user_item),
            user_similarity: Arc::new(user_similarity),
            item_similarity: Arc::new(item_similarity),
        }
    }

    /// Fetch and deserialize all five artifacts.
    ///
    /// Steps:
    /// 1. Fetch each artifact in manifest order; the first failure aborts
    /// 2. Parse all five on the blocking pool, the three tables in parallel
    ///
    /// Nothing is retried and no partially loaded context is ever returned.
    pub async fn load(loader: Arc<ArtifactLoader>, manifest: &ArtifactManifest) -> Result<Self> {
        info!("Loading artifacts into {}", loader.dir().display());

        for spec in manifest.artifacts.iter() {
            loader.fetch(spec).await?;
        }

        let artifacts = manifest.artifacts.clone();
        let context = tokio::task::spawn_blocking(move || -> Result<Self> {
            // Rayon's `join` runs two closures in parallel; nested for the tables
            let ((cluster_model, scaler), (user_item, (user_similarity, item_similarity))) =
                rayon::join(
                    || {
                        (
                            loader.read::<KMeansModel>(&artifacts.cluster_model),
                            loader.read::<StandardScaler>(&artifacts.scaler),
                        )
                    },
                    || {
                        rayon::join(
                            || loader.read::<UserItemMatrix>(&artifacts.user_item_matrix),
                            || {
                                rayon::join(
                                    || loader.read::<UserSimilarity>(&artifacts.user_similarity),
                                    || loader.read::<ItemSimilarity>(&artifacts.item_similarity),
                                )
                            },
                        )
                    },
                );

            Ok(Self {
                cluster_model: cluster_model?,
                scaler: scaler?,
                user_item: user_item?,
                user_similarity: user_similarity?,
                item_similarity: item_similarity?,
            })
        })
        .await
        .map_err(|e| LoadError::TaskFailed(e.to_string()))??;

        let summary = context.summary();
        info!(
            "Artifacts ready: {} clusters, {} customers, {} products",
            summary.clusters, summary.customers, summary.products
        );
        Ok(context)
    }

    pub fn cluster_model(&self) -> &KMeansModel {
        &self.cluster_model
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn user_item(&self) -> &UserItemMatrix {
        &self.user_item
    }

    pub fn user_similarity(&self) -> &UserSimilarity {
        &self.user_similarity
    }

    pub fn item_similarity(&self) -> &ItemSimilarity {
        &self.item_similarity
    }

    /// Products offered for selection: the user-item matrix columns
    pub fn products(&self) -> &[ProductName] {
        self.user_item.column_labels()
    }

    pub fn summary(&self) -> ContextSummary {
        ContextSummary {
            clusters: self.cluster_model.n_clusters(),
            customers: self.user_item.n_rows(),
            products: self.user_item.n_columns(),
        }
    }
}
