//! Client for the remote blob store that hosts the dashboard artifacts.
//!
//! This crate provides a thin wrapper around `reqwest` that:
//! - Builds the download URL for an artifact identifier from a URL template
//! - Streams the object into a local file
//! - Maps transport and HTTP failures into `BlobClientError`
//!
//! There is deliberately no retry and no timeout: a failed download is reported
//! once and the caller decides what to do with it.

use std::path::{Path, PathBuf};

use reqwest::{Client, Url};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info};

/// Placeholder substituted with the artifact identifier in a URL template.
pub const ID_PLACEHOLDER: &str = "{id}";

/// Errors that can occur when talking to the blob store
#[derive(Error, Debug)]
pub enum BlobClientError {
    #[error("Invalid URL template '{template}': {reason}")]
    InvalidUrl { template: String, reason: String },

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Blob store returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Client for the artifact blob store.
///
/// Cloning is cheap; the underlying `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct BlobStoreClient {
    client: Client,
    url_template: String,
}

impl BlobStoreClient {
    /// Create a client for a URL template such as
    /// `https://drive.google.com/uc?export=download&id={id}`.
    ///
    /// The template must contain `{id}` and render to an absolute URL.
    pub fn new(url_template: impl Into<String>) -> Result<Self, BlobClientError> {
        let url_template = url_template.into();
        if !url_template.contains(ID_PLACEHOLDER) {
            return Err(BlobClientError::InvalidUrl {
                template: url_template,
                reason: format!("missing {} placeholder", ID_PLACEHOLDER),
            });
        }
        // Validate the template once with a dummy identifier
        Url::parse(&url_template.replace(ID_PLACEHOLDER, "probe")).map_err(|e| {
            BlobClientError::InvalidUrl {
                template: url_template.clone(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            client: Client::new(),
            url_template,
        })
    }

    /// Render the download URL for an identifier.
    pub fn url_for(&self, identifier: &str) -> String {
        self.url_template.replace(ID_PLACEHOLDER, identifier)
    }

    /// The template this client was built with.
    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    /// Download the object keyed by `identifier` into `dest`.
    ///
    /// The body is written to `<dest>.part` and renamed into place once the
    /// transfer completes, so `dest` only ever holds a complete object.
    ///
    /// # Returns
    /// Number of bytes written
    pub async fn download(&self, identifier: &str, dest: &Path) -> Result<u64, BlobClientError> {
        let url = self.url_for(identifier);
        info!("Downloading {} to {}", url, dest.display());

        let mut response = self.client.get(&url).send().await.map_err(|e| {
            error!("Request to {} failed: {}", url, e);
            BlobClientError::Transport {
                url: url.clone(),
                source: e,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("Blob store returned {} for {}", status, url);
            return Err(BlobClientError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let part_path = part_path_for(dest);
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| BlobClientError::Io { path, source }
        };

        let mut file = tokio::fs::File::create(&part_path)
            .await
            .map_err(io_err(&part_path))?;

        let mut written: u64 = 0;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| BlobClientError::Transport {
                url: url.clone(),
                source: e,
            })?
        {
            file.write_all(&chunk).await.map_err(io_err(&part_path))?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(io_err(&part_path))?;
        drop(file);

        tokio::fs::rename(&part_path, dest)
            .await
            .map_err(io_err(dest))?;

        debug!("Wrote {} bytes to {}", written, dest.display());
        Ok(written)
    }
}

fn part_path_for(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}
