//! Error types for the data-loader crate.

use blob_client::BlobClientError;
use thiserror::Error;

/// Errors that can occur while fetching or deserializing an artifact
///
/// Every variant names the artifact file involved so the message can be shown
/// to the user verbatim.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The artifact was missing locally and the blob store download failed
    #[error("Download failed for '{filename}': {source}")]
    Download {
        filename: String,
        #[source]
        source: BlobClientError,
    },

    /// The local file exists but could not be read
    #[error("Error reading artifact file '{filename}': {source}")]
    Read {
        filename: String,
        #[source]
        source: std::io::Error,
    },

    /// The file content is not a valid artifact of the expected kind
    #[error("Error loading artifact file '{filename}': {reason}")]
    Deserialize { filename: String, reason: String },

    /// The artifact manifest or loader configuration is invalid
    #[error("Invalid artifact configuration: {0}")]
    Config(String),

    /// A filename was cached as one artifact kind and requested as another
    #[error("Artifact '{filename}' is already loaded as a different type (expected {expected})")]
    CacheTypeMismatch {
        filename: String,
        expected: &'static str,
    },

    /// The blocking parse task was cancelled or panicked
    #[error("Artifact parsing task failed: {0}")]
    TaskFailed(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_message_names_file() {
        let err = LoadError::Deserialize {
            filename: "scaler.json".to_string(),
            reason: "expected value at line 1 column 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Error loading artifact file 'scaler.json': expected value at line 1 column 1"
        );
    }

    #[test]
    fn test_download_message_includes_source() {
        let err = LoadError::Download {
            filename: "item_sim_df.json".to_string(),
            source: BlobClientError::Status {
                url: "https://example.com/x".to_string(),
                status: 500,
            },
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Download failed for 'item_sim_df.json'"));
        assert!(msg.contains("HTTP 500"));
    }
}
