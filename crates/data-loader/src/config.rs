//! Artifact manifest: where each artifact lives locally and remotely.
//!
//! The manifest is optional. Without one the built-in defaults are used; a TOML
//! file can override any subset of them:
//!
//! ```toml
//! url_template = "https://drive.google.com/uc?export=download&id={id}"
//!
//! [artifacts.scaler]
//! id = "1edsz2jUstqY-vGW5hAgO_n5uQOzXGExY"
//! filename = "scaler.json"
//! ```

use crate::error::{LoadError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default download URL; `{id}` is replaced with the artifact identifier
pub const DEFAULT_URL_TEMPLATE: &str = "https://drive.google.com/uc?export=download&id={id}";

/// One artifact: remote identifier plus local filename
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSpec {
    pub id: String,
    pub filename: String,
}

impl ArtifactSpec {
    pub fn new(id: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            filename: filename.into(),
        }
    }
}

/// The five artifacts the dashboard needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactSet {
    pub cluster_model: ArtifactSpec,
    pub scaler: ArtifactSpec,
    pub user_item_matrix: ArtifactSpec,
    pub user_similarity: ArtifactSpec,
    pub item_similarity: ArtifactSpec,
}

/// The storage identifiers of the published dashboard artifacts.
///
/// Those objects must be re-exported as JSON (see the `parser` module for the
/// layouts) before the defaults load; otherwise point a manifest at JSON copies.
impl Default for ArtifactSet {
    fn default() -> Self {
        Self {
            cluster_model: ArtifactSpec::new(
                "16xyOUF8GPwl8R2NU-0JSKHFxiOKJ_BbZ",
                "kmeans_model.json",
            ),
            scaler: ArtifactSpec::new("1edsz2jUstqY-vGW5hAgO_n5uQOzXGExY", "scaler.json"),
            user_item_matrix: ArtifactSpec::new(
                "14LL-3Pw1AHLJgvB4YNaZaUOCuW3R83Fz",
                "user_item_matrix.json",
            ),
            user_similarity: ArtifactSpec::new(
                "1azW9ip00mg01na-VLyf7de0dYvehtow7",
                "user_sim_df.json",
            ),
            item_similarity: ArtifactSpec::new(
                "1Ksx1ve8fC9xVRfhasF_4Dg9EySohx0BL",
                "item_sim_df.json",
            ),
        }
    }
}

impl ArtifactSet {
    /// All specs in load order
    pub fn iter(&self) -> impl Iterator<Item = &ArtifactSpec> {
        [
            &self.cluster_model,
            &self.scaler,
            &self.user_item_matrix,
            &self.user_similarity,
            &self.item_similarity,
        ]
        .into_iter()
    }
}

/// Top-level manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactManifest {
    pub url_template: String,
    pub artifacts: ArtifactSet,
}

impl Default for ArtifactManifest {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            artifacts: ArtifactSet::default(),
        }
    }
}

impl ArtifactManifest {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let manifest: ArtifactManifest =
            toml::from_str(content).map_err(|e| LoadError::Config(e.to_string()))?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LoadError::Config(format!("cannot read manifest {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load from `path` if given, otherwise fall back to the defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Filenames must be unique plain names; they double as cache keys
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for spec in self.artifacts.iter() {
            if spec.filename.is_empty()
                || spec.filename.contains('/')
                || spec.filename.contains('\\')
            {
                return Err(LoadError::Config(format!(
                    "artifact filename '{}' must be a plain file name",
                    spec.filename
                )));
            }
            if !seen.insert(spec.filename.as_str()) {
                return Err(LoadError::Config(format!(
                    "artifact filename '{}' is used twice",
                    spec.filename
                )));
            }
        }
        Ok(())
    }
}
