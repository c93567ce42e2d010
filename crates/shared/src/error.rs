use serde::{Deserialize, Serialize};

/// Error body the backend sends alongside non-2xx responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ApiError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
        }
    }

    /// Pulls `detail` out of a raw response body. Blank or non-string details count as absent.
    pub fn detail_from_body(body: &[u8]) -> Option<String> {
        let value: serde_json::Value = serde_json::from_slice(body).ok()?;
        let detail = value.get("detail")?.as_str()?.trim();
        if detail.is_empty() {
            None
        } else {
            Some(detail.to_string())
        }
    }
}
