//! Status handling for documents fetched from a remote registry.

use crate::error::SourceError;

/// Wait used when a 429 carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 5;

/// Body of a successful response.
///
/// 404 means the document is not published, 429 is a rate limit, and any
/// other non-2xx status is an API error carrying the response text.
pub async fn read_body(resp: reqwest::Response, url: &str) -> Result<String, SourceError> {
    let status = resp.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(SourceError::NotFound(url.to_string()));
    }
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(SourceError::RateLimited {
            retry_after_secs: retry_after_secs(&resp),
        });
    }
    if !status.is_success() {
        return Err(SourceError::Api {
            status: status.as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp.text().await?)
}

fn retry_after_secs(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, retry_after: Option<&str>, body: &str) -> reqwest::Response {
        let mut builder = ::http::Response::builder().status(status);
        if let Some(value) = retry_after {
            builder = builder.header("Retry-After", value);
        }
        reqwest::Response::from(builder.body(body.to_string()).unwrap())
    }

    #[tokio::test]
    async fn success_returns_body() {
        let body = read_body(response(200, None, "{}"), "u").await.unwrap();
        assert_eq!(body, "{}");
    }

    #[tokio::test]
    async fn missing_document_is_not_found() {
        let err = read_body(response(404, None, ""), "https://r/ui/X.json")
            .await
            .unwrap_err();
        assert!(matches!(&err, SourceError::NotFound(url) if url == "https://r/ui/X.json"));
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn rate_limit_reads_retry_after() {
        let err = read_body(response(429, Some("7"), ""), "u").await.unwrap_err();
        assert!(matches!(err, SourceError::RateLimited { retry_after_secs: 7 }));

        let err = read_body(response(429, Some("later"), ""), "u").await.unwrap_err();
        assert!(matches!(
            err,
            SourceError::RateLimited { retry_after_secs: DEFAULT_RETRY_AFTER_SECS }
        ));
    }

    #[tokio::test]
    async fn server_errors_keep_their_text_and_are_transient() {
        let err = read_body(response(503, None, "maintenance"), "u").await.unwrap_err();
        assert!(matches!(&err, SourceError::Api { status: 503, message } if message == "maintenance"));
        assert!(err.is_transient());
    }
}
