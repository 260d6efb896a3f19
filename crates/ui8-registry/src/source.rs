//! Where `ui8kit add` reads published items from.
//!
//! A registry is either served over HTTP (`registry.url` set) or read from a
//! local build output directory. Both expose the same layout:
//! `index.json` plus `<folder>/<name>.json` per item.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use ui8_config::RegistryConfig;
use ui8_core::{IndexEntry, PublishedItem, RegistryIndex};

use crate::build::INDEX_FILE;
use crate::error::SourceError;
use crate::http::read_body;

/// Attempts made by [`with_retry`] after the first failure.
pub const RETRY_ATTEMPTS: u32 = 3;

const BASE_BACKOFF: Duration = Duration::from_millis(500);

/// Upper bound on a server-requested `Retry-After` wait.
const MAX_RATE_LIMIT_WAIT: Duration = Duration::from_secs(10);

/// A published registry to install from.
#[derive(Debug, Clone)]
pub enum RegistrySource {
    Remote { base_url: String, http: reqwest::Client },
    Local { root: PathBuf },
}

impl RegistrySource {
    /// HTTP source rooted at `base_url` (trailing slashes ignored).
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the HTTP client cannot be built.
    pub fn remote(base_url: &str) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("ui8kit/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self::Remote {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    #[must_use]
    pub fn local(root: impl Into<PathBuf>) -> Self {
        Self::Local { root: root.into() }
    }

    /// Remote when `registry.url` is set, otherwise the local build output.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::remote`] failures.
    pub fn from_config(config: &RegistryConfig, local_output: &Path) -> Result<Self, SourceError> {
        if config.is_remote() {
            Self::remote(config.url.trim())
        } else {
            Ok(Self::local(local_output))
        }
    }

    /// URL or directory, for messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Remote { base_url, .. } => base_url.clone(),
            Self::Local { root } => root.display().to_string(),
        }
    }

    /// Fetch and parse `index.json`.
    ///
    /// # Errors
    ///
    /// Transport, status, I/O and parse failures.
    pub async fn fetch_index(&self) -> Result<RegistryIndex, SourceError> {
        self.fetch_json(INDEX_FILE).await
    }

    /// Fetch the published document of an indexed component.
    ///
    /// # Errors
    ///
    /// Transport, status, I/O and parse failures.
    pub async fn fetch_item(&self, entry: &IndexEntry) -> Result<PublishedItem, SourceError> {
        let rel = format!(
            "{}/{}.json",
            entry.kind.folder(),
            urlencoding::encode(&entry.name)
        );
        self.fetch_json(&rel).await
    }

    async fn fetch_json<T: DeserializeOwned>(&self, rel: &str) -> Result<T, SourceError> {
        match self {
            Self::Remote { base_url, http } => {
                let url = format!("{base_url}/{rel}");
                debug!(%url, "fetching");
                let body = read_body(http.get(&url).send().await?, &url).await?;
                parse_document(&body, &url)
            }
            Self::Local { root } => {
                let path = root.join(rel);
                debug!(path = %path.display(), "reading");
                let body = tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|source| SourceError::Io { path: path.clone(), source })?;
                parse_document(&body, &path.display().to_string())
            }
        }
    }
}

fn parse_document<T: DeserializeOwned>(body: &str, location: &str) -> Result<T, SourceError> {
    serde_json::from_str(body).map_err(|e| SourceError::Parse {
        location: location.to_string(),
        message: e.to_string(),
    })
}

/// Run `op`, retrying transient failures up to `attempts` more times with
/// exponential backoff. `attempts = 0` runs once.
///
/// # Errors
///
/// The last error, or the first non-transient one.
pub async fn with_retry<T, F, Fut>(attempts: u32, mut op: F) -> Result<T, SourceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SourceError>>,
{
    let mut tried = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if tried < attempts && e.is_transient() => {
                let wait = match &e {
                    SourceError::RateLimited { retry_after_secs } => {
                        Duration::from_secs(*retry_after_secs).min(MAX_RATE_LIMIT_WAIT)
                    }
                    _ => BASE_BACKOFF * 2u32.pow(tried),
                };
                tried += 1;
                warn!(error = %e, attempt = tried, wait_ms = wait.as_millis(), "retrying");
                tokio::time::sleep(wait).await;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicU32, Ordering};
    use ui8_core::ComponentKind;

    fn write(root: &Path, rel: &str, body: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, body).unwrap();
    }

    fn registry_config(url: &str) -> RegistryConfig {
        RegistryConfig {
            url: url.into(),
            ..RegistryConfig::default()
        }
    }

    #[test]
    fn empty_url_means_local() {
        let source = RegistrySource::from_config(&registry_config("  "), Path::new("/out")).unwrap();
        assert!(matches!(source, RegistrySource::Local { .. }));
        let source =
            RegistrySource::from_config(&registry_config("https://reg.example/r/"), Path::new("/out"))
                .unwrap();
        assert_eq!(source.describe(), "https://reg.example/r");
    }

    #[tokio::test]
    async fn local_source_reads_index_and_items() {
        let tmp = tempfile::tempdir().unwrap();
        write(
            tmp.path(),
            "index.json",
            r#"{
              "$schema": "https://ui8kit.com/schema/registry.json",
              "version": "1.0.0",
              "lastUpdated": "2026-01-01T00:00:00Z",
              "categories": ["ui"],
              "components": [{ "name": "Button", "type": "registry:ui", "title": "Button" }]
            }"#,
        );
        write(
            tmp.path(),
            "ui/Button.json",
            r#"{
              "$schema": "https://ui8kit.com/schema/registry-item.json",
              "name": "Button",
              "type": "registry:ui",
              "dependencies": ["react"],
              "devDependencies": [],
              "files": [{ "path": "src/ui/Button.tsx", "content": "export {}", "target": "ui" }]
            }"#,
        );

        let source = RegistrySource::local(tmp.path());
        let index = source.fetch_index().await.unwrap();
        let entry = index.find("Button").unwrap();
        assert_eq!(entry.kind, ComponentKind::Ui);

        let item = source.fetch_item(entry).await.unwrap();
        assert_eq!(item.dependencies, vec!["react"]);
        assert_eq!(item.files[0].content, "export {}");
    }

    #[tokio::test]
    async fn missing_local_output_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = RegistrySource::local(tmp.path().join("r"))
            .fetch_index()
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[tokio::test]
    async fn retries_transient_failures_then_succeeds() {
        let calls = AtomicU32::new(0);
        let result = with_retry(RETRY_ATTEMPTS, || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(SourceError::Api {
                        status: 502,
                        message: String::new(),
                    })
                } else {
                    Ok(n)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn permanent_failures_are_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_retry(RETRY_ATTEMPTS, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(SourceError::NotFound("x".into())) }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn zero_attempts_runs_once() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_retry(0, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Err(SourceError::RateLimited {
                    retry_after_secs: 1,
                })
            }
        })
        .await;
        assert!(matches!(result, Err(SourceError::RateLimited { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
