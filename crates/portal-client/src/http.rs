//! Response status handling and body decoding.

use serde::de::DeserializeOwned;

use crate::error::ClientError;

const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Pass successful responses through; map 429 to
/// [`ClientError::RateLimited`] and other failures to [`ClientError::Api`]
/// carrying the response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(ClientError::RateLimited {
            retry_after_secs: retry_after(&resp),
        });
    }
    if !status.is_success() {
        return Err(ClientError::Api {
            status: status.as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// `Retry-After` in seconds; 60 when absent or not a number.
fn retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

/// Decode a JSON body, naming the expected payload in the error.
pub fn parse_json<T: DeserializeOwned>(body: &str, what: &str) -> Result<T, ClientError> {
    serde_json::from_str(body).map_err(|e| ClientError::Parse(format!("{what}: {e}")))
}

pub async fn read_json<T: DeserializeOwned>(
    resp: reqwest::Response,
    what: &str,
) -> Result<T, ClientError> {
    let body = check_response(resp).await?.text().await?;
    parse_json(&body, what)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, retry_after: Option<&str>, body: &'static str) -> reqwest::Response {
        let mut builder = ::http::Response::builder().status(status);
        if let Some(value) = retry_after {
            builder = builder.header("Retry-After", value);
        }
        reqwest::Response::from(builder.body(body).unwrap())
    }

    #[test]
    fn retry_after_header_and_fallback() {
        assert_eq!(retry_after(&response(429, Some("120"), "")), 120);
        assert_eq!(retry_after(&response(429, None, "")), 60);
        assert_eq!(retry_after(&response(429, Some("soon"), "")), 60);
    }

    #[tokio::test]
    async fn too_many_requests_is_rate_limited() {
        let err = check_response(response(429, Some("30"), "")).await.unwrap_err();
        assert!(matches!(err, ClientError::RateLimited { retry_after_secs: 30 }));
    }

    #[tokio::test]
    async fn server_error_keeps_body() {
        let err = check_response(response(503, None, "maintenance")).await.unwrap_err();
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn success_passes_through() {
        assert!(check_response(response(200, None, "{}")).await.is_ok());
    }

    #[tokio::test]
    async fn read_json_reports_shape_errors() {
        let err = read_json::<portal_core::Hierarchy>(response(200, None, r#"{"nodes": 3}"#), "hierarchy")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Parse(ref m) if m.starts_with("hierarchy: ")));
    }
}
