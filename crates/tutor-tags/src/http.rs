//! Status handling shared by the tagger and Scryfall requests.
//!
//! A 429 becomes [`TagError::RateLimited`] and any other non-2xx status
//! becomes [`TagError::Api`] carrying the response body. Card lookups go
//! through [`lookup`], where a 404 means "no such card" rather than a failure.

use reqwest::{Response, StatusCode};

use crate::error::TagError;

/// Back-off used when a 429 carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Pass a 2xx response through, mapping every other status to an error.
pub async fn ensure_success(resp: Response) -> Result<Response, TagError> {
    match resp.status() {
        status if status.is_success() => Ok(resp),
        StatusCode::TOO_MANY_REQUESTS => Err(TagError::RateLimited {
            retry_after_secs: retry_after_secs(&resp),
        }),
        status => Err(TagError::Api {
            status: status.as_u16(),
            message: resp.text().await.unwrap_or_default(),
        }),
    }
}

/// Like [`ensure_success`], but a 404 resolves to `Ok(None)`.
pub async fn lookup(resp: Response) -> Result<Option<Response>, TagError> {
    if resp.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    ensure_success(resp).await.map(Some)
}

/// Seconds from a numeric `Retry-After` header.
fn retry_after_secs(resp: &Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &'static str) -> Response {
        Response::from(::http::Response::builder().status(status).body(body).unwrap())
    }

    fn throttled(retry_after: &str) -> Response {
        Response::from(
            ::http::Response::builder()
                .status(429)
                .header("Retry-After", retry_after)
                .body("")
                .unwrap(),
        )
    }

    #[test]
    fn retry_after_reads_seconds() {
        assert_eq!(retry_after_secs(&throttled("45")), 45);
        assert_eq!(retry_after_secs(&throttled(" 7 ")), 7);
    }

    #[test]
    fn retry_after_defaults_when_missing_or_not_numeric() {
        assert_eq!(retry_after_secs(&response(429, "")), DEFAULT_RETRY_AFTER_SECS);
        assert_eq!(
            retry_after_secs(&throttled("Wed, 21 Oct 2015 07:28:00 GMT")),
            DEFAULT_RETRY_AFTER_SECS
        );
    }

    #[tokio::test]
    async fn throttling_is_rate_limited() {
        let err = ensure_success(throttled("5")).await.unwrap_err();
        assert!(matches!(err, TagError::RateLimited { retry_after_secs: 5 }));
    }

    #[tokio::test]
    async fn server_error_keeps_body() {
        let err = ensure_success(response(503, "upstream down")).await.unwrap_err();
        assert_eq!(err.to_string(), "API error (503): upstream down");
    }

    #[tokio::test]
    async fn missing_card_is_none_for_lookups_only() {
        assert!(lookup(response(404, "")).await.unwrap().is_none());
        assert!(lookup(response(200, "{}")).await.unwrap().is_some());

        let err = ensure_success(response(404, "no route")).await.unwrap_err();
        assert!(matches!(err, TagError::Api { status: 404, .. }));
    }

    #[tokio::test]
    async fn lookup_still_reports_throttling() {
        let err = lookup(throttled("3")).await.unwrap_err();
        assert!(matches!(err, TagError::RateLimited { retry_after_secs: 3 }));
    }
}
