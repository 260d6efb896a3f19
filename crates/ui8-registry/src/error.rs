//! Error types for the registry build and the registry source client.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions of `build_registry`. Any of these aborts before the
/// output directory is touched.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("registry manifest not found: {0}")]
    ManifestNotFound(PathBuf),

    #[error("registry manifest {path} is not valid JSON: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("registry manifest failed validation:\n  {}", errors.join("\n  "))]
    ManifestInvalid { errors: Vec<String> },

    #[error("component {item}: file not found: {}", path.display())]
    MissingFile { item: String, path: PathBuf },

    #[error("component {item} failed validation:\n  {}", errors.join("\n  "))]
    ItemInvalid { item: String, errors: Vec<String> },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Schema(#[from] ui8_schema::SchemaError),
}

/// Errors that can occur when fetching published items for `ui8kit add`.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Registry returned a non-success status code.
    #[error("registry error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the registry.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The registry returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    #[error("not published in the registry: {0}")]
    NotFound(String),

    #[error("invalid registry document {location}: {message}")]
    Parse { location: String, message: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SourceError {
    /// Whether retrying the same request could succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::Api { status, .. } => *status >= 500,
            Self::RateLimited { .. } => true,
            Self::NotFound(_) | Self::Parse { .. } | Self::Io { .. } => false,
        }
    }

    /// Human-readable hints for the CLI to print after a failure.
    #[must_use]
    pub fn suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::Http(_) => vec![
                "check your network connection",
                "verify registry.url in ui8kit.config.json",
                "re-run with --retry to retry transient failures",
            ],
            Self::Api { status, .. } if *status >= 500 => vec![
                "the registry server is having trouble; re-run with --retry",
            ],
            Self::Api { .. } => vec!["verify registry.url in ui8kit.config.json"],
            Self::RateLimited { .. } => vec!["wait a moment, then re-run with --retry"],
            Self::NotFound(_) => vec!["run `ui8kit add --all --dry-run` to list available components"],
            Self::Parse { .. } => vec!["rebuild the registry with `ui8kit build`"],
            Self::Io { .. } => vec!["run `ui8kit build` to produce the local registry output"],
        }
    }
}
