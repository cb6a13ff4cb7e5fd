use reqwest::Response;
use tracing::error;

use crate::error::{CatLensError, Result, TransportErrorKind};

/// Convert a reqwest error to a transport error, keeping timeouts distinct.
pub fn handle_http_error(e: reqwest::Error, provider_name: &str) -> CatLensError {
    error!(error = %e, "HTTP request to {} failed", provider_name);
    let kind = if e.is_timeout() {
        TransportErrorKind::Timeout
    } else {
        TransportErrorKind::Connection(e.to_string())
    };
    CatLensError::transport(provider_name, kind)
}

/// Check HTTP response status and extract the error body if unsuccessful.
pub async fn check_response_status(response: Response, provider_name: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response
        .text()
        .await
        .unwrap_or_else(|e| format!("<unreadable error body: {e}>"));
    error!(
        status = %status,
        error = %error_text,
        "{} API returned error response", provider_name
    );
    Err(CatLensError::transport(
        provider_name,
        TransportErrorKind::from_status(status.as_u16(), error_text),
    ))
}
