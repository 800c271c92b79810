//! Error envelope shared by every API group.
//!
//! Servers answer failed requests with a document like:
//!
//! ```json
//! { "kind": "Error", "id": "404", "href": "/api/clusters_mgmt/v1/errors/404",
//!   "code": "CLUSTERS-MGMT-404", "reason": "Cluster 'abc' not found" }
//! ```
//!
//! For errors generated by the dispatch layer the `id` is the HTTP status code.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::wire::Wire;

/// Identifier of the error sent when the error itself can't be produced.
pub const PANIC_ID: &str = "1000";

const PANIC_REASON: &str =
    "An unexpected error happened, please check the log of the service for details";

/// Error returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiError {
    id: Option<String>,
    href: Option<String>,
    code: Option<String>,
    reason: Option<String>,
}

impl ApiError {
    pub const KIND: &'static str = "Error";

    pub fn builder() -> ApiErrorBuilder {
        ApiErrorBuilder::default()
    }

    pub fn kind(&self) -> &'static str {
        Self::KIND
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// HTTP status encoded in the identifier, if the identifier is numeric.
    pub fn status(&self) -> Option<u16> {
        self.id.as_deref().and_then(|id| id.parse().ok())
    }

    /// The error sent when nothing better can be said about a failure.
    pub fn panic() -> Self {
        Self::builder().id(PANIC_ID).reason(PANIC_REASON).build()
    }

    pub fn not_found(path: &str) -> Self {
        Self::builder()
            .id("404")
            .reason(format!("Can't find resource for path '{path}'"))
            .build()
    }

    pub fn method_not_allowed(method: &str, path: &str) -> Self {
        Self::builder()
            .id("405")
            .reason(format!("Method '{method}' isn't supported for path '{path}'"))
            .build()
    }

    pub fn internal_server_error(method: &str, path: &str) -> Self {
        Self::builder()
            .id("500")
            .reason(format!(
                "Can't process '{method}' request for path '{path}' due to an internal server error"
            ))
            .build()
    }
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let text = self
            .reason
            .as_deref()
            .or(self.code.as_deref())
            .or(self.id.as_deref())
            .unwrap_or("unknown error");
        f.write_str(text)
    }
}

impl std::error::Error for ApiError {}

/// Builder of [`ApiError`] values.
#[derive(Debug, Clone, Default)]
pub struct ApiErrorBuilder {
    id: Option<String>,
    href: Option<String>,
    code: Option<String>,
    reason: Option<String>,
}

impl ApiErrorBuilder {
    pub fn id(mut self, value: impl Into<String>) -> Self {
        self.id = Some(value.into());
        self
    }

    pub fn href(mut self, value: impl Into<String>) -> Self {
        self.href = Some(value.into());
        self
    }

    pub fn code(mut self, value: impl Into<String>) -> Self {
        self.code = Some(value.into());
        self
    }

    pub fn reason(mut self, value: impl Into<String>) -> Self {
        self.reason = Some(value.into());
        self
    }

    pub fn build(self) -> ApiError {
        ApiError {
            id: self.id,
            href: self.href,
            code: self.code,
            reason: self.reason,
        }
    }
}

#[doc(hidden)]
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Wire for ApiError {
    type Data = ApiErrorData;

    fn wrap(&self) -> Self::Data {
        ApiErrorData {
            kind: Some(Self::KIND.to_string()),
            id: self.id.clone(),
            href: self.href.clone(),
            code: self.code.clone(),
            reason: self.reason.clone(),
        }
    }

    fn unwrap(data: Self::Data) -> Result<Self> {
        if let Some(kind) = data.kind.as_deref() {
            if kind != Self::KIND {
                return Err(Error::unexpected_kind(Self::KIND, kind));
            }
        }
        Ok(Self {
            id: data.id,
            href: data.href,
            code: data.code,
            reason: data.reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{marshal, unmarshal};

    #[test]
    fn display_prefers_reason_then_code_then_id() {
        let full = ApiError::builder().id("404").code("CLUSTERS-MGMT-404").reason("gone").build();
        assert_eq!(full.to_string(), "gone");

        let coded = ApiError::builder().id("404").code("CLUSTERS-MGMT-404").build();
        assert_eq!(coded.to_string(), "CLUSTERS-MGMT-404");

        let bare = ApiError::builder().id("404").build();
        assert_eq!(bare.to_string(), "404");

        assert_eq!(ApiError::default().to_string(), "unknown error");
    }

    #[test]
    fn status_is_parsed_from_numeric_id() {
        assert_eq!(ApiError::not_found("/x").status(), Some(404));
        assert_eq!(ApiError::panic().status(), Some(1000));
        assert_eq!(ApiError::builder().id("abc").build().status(), None);
    }

    #[test]
    fn marshals_with_error_kind() {
        let err = ApiError::method_not_allowed("PUT", "/api/clusters_mgmt/v1/clusters");
        let json: serde_json::Value = serde_json::from_str(&marshal(&err).unwrap()).unwrap();
        assert_eq!(json["kind"], "Error");
        assert_eq!(json["id"], "405");
        assert_eq!(
            json["reason"],
            "Method 'PUT' isn't supported for path '/api/clusters_mgmt/v1/clusters'"
        );
        assert!(json.get("href").is_none());
    }

    #[test]
    fn unmarshal_rejects_other_kinds() {
        let err = unmarshal::<ApiError>(r#"{"kind":"Cluster","id":"1"}"#).unwrap_err();
        match err {
            Error::UnexpectedKind { expected, found } => {
                assert_eq!(expected, "Error");
                assert_eq!(found, "Cluster");
            }
            other => panic!("expected kind error, got {other:?}"),
        }
    }

    #[test]
    fn unmarshal_accepts_missing_kind() {
        let err: ApiError = unmarshal(r#"{"id":"400","reason":"bad"}"#).unwrap();
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.reason(), Some("bad"));
    }
}
