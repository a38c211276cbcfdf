//! Fetch-if-missing artifact loader with a per-process cache.
//!
//! `fetch` makes sure the file exists in the artifact directory, downloading it
//! from the blob store when it does not. `read` deserializes a local file once
//! and hands out the same `Arc` on every later call for that filename.

use crate::config::{ArtifactManifest, ArtifactSpec};
use crate::error::{LoadError, Result};
use blob_client::BlobStoreClient;
use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, instrument, warn};

/// Something that can be deserialized from an artifact file.
pub trait Artifact: Sized + Send + Sync + 'static {
    /// Human readable kind, used in error messages
    const KIND: &'static str;

    /// Parse the raw file content; `filename` is only used for error context
    fn parse(bytes: &[u8], filename: &str) -> Result<Self>;
}

type CachedArtifact = Arc<dyn Any + Send + Sync>;

/// Loads artifacts from a local directory, downloading missing ones.
pub struct ArtifactLoader {
    dir: PathBuf,
    client: BlobStoreClient,
    /// Write-once per filename; entries are never evicted
    cache: Mutex<HashMap<String, CachedArtifact>>,
    /// Filenames downloaded by this loader; removed again if they fail to parse
    downloaded: Mutex<HashSet<String>>,
}

impl ArtifactLoader {
    pub fn new(dir: impl Into<PathBuf>, client: BlobStoreClient) -> Self {
        Self {
            dir: dir.into(),
            client,
            cache: Mutex::new(HashMap::new()),
            downloaded: Mutex::new(HashSet::new()),
        }
    }

    /// Build a loader whose blob client uses the manifest's URL template
    pub fn from_manifest(dir: impl Into<PathBuf>, manifest: &ArtifactManifest) -> Result<Self> {
        let client = BlobStoreClient::new(manifest.url_template.clone())
            .map_err(|e| LoadError::Config(e.to_string()))?;
        Ok(Self::new(dir, client))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Local path an artifact is stored at
    pub fn path_for(&self, spec: &ArtifactSpec) -> PathBuf {
        self.dir.join(&spec.filename)
    }

    /// Whether `filename` has already been deserialized in this process
    pub fn is_cached(&self, filename: &str) -> bool {
        self.lock_cache().contains_key(filename)
    }

    /// Make sure the artifact exists locally, downloading it if absent.
    ///
    /// An existing file is trusted as-is; it is never re-downloaded.
    #[instrument(skip(self, spec), fields(filename = %spec.filename))]
    pub async fn fetch(&self, spec: &ArtifactSpec) -> Result<PathBuf> {
        let path = self.path_for(spec);
        if path.exists() {
            debug!("{} already present", path.display());
            return Ok(path);
        }

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| LoadError::Read {
                filename: spec.filename.clone(),
                source: e,
            })?;

        let bytes = self
            .client
            .download(&spec.id, &path)
            .await
            .map_err(|e| LoadError::Download {
                filename: spec.filename.clone(),
                source: e,
            })?;
        info!("Downloaded {} ({} bytes)", spec.filename, bytes);
        self.lock_downloaded().insert(spec.filename.clone());
        Ok(path)
    }

    /// Deserialize a local artifact, or return the cached copy.
    ///
    /// A file this loader downloaded is deleted when it fails to parse, so the
    /// next `fetch` downloads it again instead of trusting bad content.
    pub fn read<T: Artifact>(&self, spec: &ArtifactSpec) -> Result<Arc<T>> {
        if let Some(cached) = self.lock_cache().get(&spec.filename).cloned() {
            debug!("{} served from cache", spec.filename);
            return downcast(cached, &spec.filename);
        }

        let path = self.path_for(spec);
        let bytes = std::fs::read(&path).map_err(|e| LoadError::Read {
            filename: spec.filename.clone(),
            source: e,
        })?;
        // Parse without holding the lock so independent artifacts can load in parallel
        let parsed: CachedArtifact = match T::parse(&bytes, &spec.filename) {
            Ok(artifact) => Arc::new(artifact),
            Err(e) => {
                self.discard_download(&spec.filename, &path);
                return Err(e);
            }
        };
        info!("Loaded {} from {}", T::KIND, path.display());

        let stored = self
            .lock_cache()
            .entry(spec.filename.clone())
            .or_insert(parsed)
            .clone();
        downcast(stored, &spec.filename)
    }

    /// `fetch` then `read`
    pub async fn load<T: Artifact>(&self, spec: &ArtifactSpec) -> Result<Arc<T>> {
        self.fetch(spec).await?;
        self.read(spec)
    }

    fn discard_download(&self, filename: &str, path: &Path) {
        if !self.lock_downloaded().remove(filename) {
            return;
        }
        match std::fs::remove_file(path) {
            Ok(()) => warn!("Removed unparseable download {}", path.display()),
            Err(e) => warn!("Could not remove {}: {}", path.display(), e),
        }
    }

    fn lock_downloaded(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        self.downloaded.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, HashMap<String, CachedArtifact>> {
        // The cache only ever grows, so a poisoned map is still consistent
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn downcast<T: Artifact>(cached: CachedArtifact, filename: &str) -> Result<Arc<T>> {
    cached
        .downcast::<T>()
        .map_err(|_| LoadError::CacheTypeMismatch {
            filename: filename.to_string(),
            expected: T::KIND,
        })
}
