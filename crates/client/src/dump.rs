//! Debug dumps of the HTTP traffic.
//!
//! Dumps are emitted with `tracing::debug!` and only built when that level is
//! enabled. Secrets never reach the log: the `Authorization` header is left out
//! and sensitive JSON attributes and form fields are replaced by `***`.

use reqwest::header::{AUTHORIZATION, HeaderMap};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::Level;
use url::Url;

const REDACTED: &str = "***";

/// Top level attributes whose values are never dumped.
const REDACTED_FIELDS: [&str; 8] = [
    "access_token",
    "admin",
    "id_token",
    "refresh_token",
    "password",
    "client_secret",
    "kubeconfig",
    "ssh",
];

pub(crate) fn request(method: &Method, url: &Url, headers: &HeaderMap, body: &[u8]) {
    if tracing::enabled!(Level::DEBUG) {
        tracing::debug!(
            method = %method,
            url = %url,
            headers = %headers_text(headers),
            body = %body_text(body),
            "sending request"
        );
    }
}

pub(crate) fn response(status: StatusCode, headers: &HeaderMap, body: &[u8]) {
    if tracing::enabled!(Level::DEBUG) {
        tracing::debug!(
            status = status.as_u16(),
            headers = %headers_text(headers),
            body = %body_text(body),
            "received response"
        );
    }
}

/// Dumps the form of a token request.
pub(crate) fn form(url: &Url, fields: &[(&str, String)]) {
    if tracing::enabled!(Level::DEBUG) {
        tracing::debug!(url = %url, form = %form_text(fields), "requesting token");
    }
}

fn headers_text(headers: &HeaderMap) -> String {
    let mut lines: Vec<String> = headers
        .iter()
        .filter(|(name, _)| *name != AUTHORIZATION)
        .map(|(name, value)| format!("{}: {}", name, value.to_str().unwrap_or("<binary>")))
        .collect();
    lines.sort();
    lines.join(", ")
}

fn body_text(body: &[u8]) -> String {
    if body.is_empty() {
        return String::new();
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(mut fields)) => {
            for name in REDACTED_FIELDS {
                if let Some(value) = fields.get_mut(name) {
                    *value = Value::String(REDACTED.to_string());
                }
            }
            Value::Object(fields).to_string()
        }
        Ok(other) => other.to_string(),
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    }
}

fn form_text(fields: &[(&str, String)]) -> String {
    fields
        .iter()
        .map(|(name, value)| {
            let value = if REDACTED_FIELDS.contains(name) {
                REDACTED
            } else {
                value.as_str()
            };
            format!("{name}={value}")
        })
        .collect::<Vec<_>>()
        .join("&")
}
