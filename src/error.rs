//! Endpoint Errors
//!
//! Failures of a single server round-trip. Widgets turn these into
//! alerts or banners; nothing is retried.

use thiserror::Error;

/// Bodies of non-JSON responses are cut to this many characters
pub const PREVIEW_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Transport failure (fetch rejected), raw JS error text
    #[error("{0}")]
    Network(String),
    /// Non-2xx status on an endpoint that does not answer with JSON errors
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },
    /// Server answered with something other than JSON
    #[error("Non-JSON response ({status}): {url}\n{preview}")]
    NonJson { status: u16, url: String, preview: String },
    /// `{"success": false, "error": ...}`
    #[error("{0}")]
    Rejected(String),
    /// JSON that does not match the expected shape
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn non_json(status: u16, url: &str, body: &str) -> Self {
        ApiError::NonJson {
            status,
            url: url.to_string(),
            preview: body.chars().take(PREVIEW_CHARS).collect(),
        }
    }

    /// Message for a blocking alert. Server rejections get `rejected_prefix`,
    /// everything else is reported as a failed request.
    pub fn alert_text(&self, rejected_prefix: &str) -> String {
        match self {
            ApiError::Rejected(msg) => format!("{}: {}", rejected_prefix, msg),
            other => format!("Request failed: {}", other),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_json_preview_is_truncated() {
        let body = "x".repeat(500);
        let err = ApiError::non_json(500, "/admin-ui/users/4/reset-password/", &body);
        match &err {
            ApiError::NonJson { preview, .. } => assert_eq!(preview.chars().count(), PREVIEW_CHARS),
            _ => panic!("expected NonJson"),
        }
        let text = err.to_string();
        assert!(text.starts_with("Non-JSON response (500): /admin-ui/users/4/reset-password/\n"));
    }

    #[test]
    fn test_non_json_preview_counts_chars_not_bytes() {
        let body = "é".repeat(300);
        let ApiError::NonJson { preview, .. } = ApiError::non_json(200, "/x", &body) else {
            panic!("expected NonJson");
        };
        assert_eq!(preview.chars().count(), 200);
    }

    #[test]
    fn test_alert_text() {
        let rejected = ApiError::Rejected("User not found".into());
        assert_eq!(rejected.alert_text("Error"), "Error: User not found");

        let network = ApiError::Network("TypeError: Failed to fetch".into());
        assert_eq!(network.alert_text("Error"), "Request failed: TypeError: Failed to fetch");
    }
}
