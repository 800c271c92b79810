//! Sending requests to the API.

use ocm_core::ApiError;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Method, StatusCode};
use tokio::time::Instant;

use crate::connection::Connection;
use crate::dump;
use crate::error::{Error, Result};

const JSON: &str = "application/json";

/// Longest piece of an unexpected body quoted in errors.
const SUMMARY_LEN: usize = 200;

/// One request to the API, before the connection adds the URL and headers.
#[derive(Debug, Clone)]
pub(crate) struct Exchange {
    method: Method,
    path: String,
    metric: Option<String>,
    query: Vec<(&'static str, String)>,
    body: Option<String>,
}

impl Exchange {
    pub(crate) fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            metric: None,
            query: Vec::new(),
            body: None,
        }
    }

    /// Path reported in metrics, with the identifiers of objects replaced.
    pub(crate) fn metric(mut self, metric: impl Into<String>) -> Self {
        self.metric = Some(metric.into());
        self
    }

    pub(crate) fn query(mut self, query: Vec<(&'static str, String)>) -> Self {
        self.query = query;
        self
    }

    pub(crate) fn body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }
}

/// Successful answer of the API.
#[derive(Debug)]
pub(crate) struct Reply {
    pub(crate) status: StatusCode,
    pub(crate) body: Vec<u8>,
}

impl Connection {
    pub(crate) async fn send(&self, exchange: Exchange) -> Result<Reply> {
        self.check_open()?;
        let Exchange {
            method,
            path,
            metric,
            query,
            body,
        } = exchange;
        check(&method, &path, body.is_some())?;

        let mut url = self
            .api_url()
            .join(&path)
            .map_err(|err| Error::request(format!("can't resolve path '{path}': {err}")))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(name, value)| (*name, value.as_str())));
        }

        let token = self.token_source().access_token().await?;
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(self.agent())
                .map_err(|err| Error::config(format!("invalid agent: {err}")))?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|err| Error::token(format!("token isn't a valid header: {err}")))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static(JSON));
        if body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
        }

        let body = body.unwrap_or_default();
        dump::request(&method, &url, &headers, body.as_bytes());
        let mut builder = self.http().request(method.clone(), url).headers(headers);
        if !body.is_empty() {
            builder = builder.body(body);
        }
        let started = Instant::now();
        let sent = builder.send().await;
        if let Some(metrics) = self.metrics() {
            let code = sent.as_ref().map_or(0, |response| response.status().as_u16());
            let metric = metric.as_deref().unwrap_or("/-");
            metrics.api_request(method.as_str(), metric, code, started.elapsed());
        }
        let response = sent?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();
        dump::response(status, &headers, &body);

        if !body.is_empty() {
            let content_type = headers
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default();
            if !is_json(content_type) {
                return Err(Error::ContentType {
                    status: status.as_u16(),
                    content_type: content_type.to_string(),
                    summary: summary(&body),
                });
            }
        }

        if status.is_client_error() || status.is_server_error() {
            return Err(Error::Api {
                status: status.as_u16(),
                error: api_error(status, &body),
            });
        }
        Ok(Reply { status, body })
    }
}

/// Checks the rules every request must follow before it is sent.
pub(crate) fn check(method: &Method, path: &str, has_body: bool) -> Result<()> {
    if path.is_empty() {
        return Err(Error::request("path is mandatory"));
    }
    if path.contains("://") {
        return Err(Error::request(format!(
            "path '{path}' contains a scheme, it should be relative to the API URL"
        )));
    }
    if path.starts_with("//") {
        return Err(Error::request(format!(
            "path '{path}' contains a host name, it should be relative to the API URL"
        )));
    }
    if !path.starts_with('/') {
        return Err(Error::request(format!("path '{path}' must be absolute")));
    }
    match *method {
        Method::GET | Method::DELETE if has_body => Err(Error::request(format!(
            "request body isn't allowed for the '{method}' method"
        ))),
        Method::GET | Method::DELETE | Method::POST | Method::PATCH => Ok(()),
        _ => Err(Error::request(format!("method '{method}' isn't allowed"))),
    }
}

/// True for `application/json`, with or without parameters.
pub(crate) fn is_json(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|media| media.trim().eq_ignore_ascii_case(JSON))
}

/// Start of a body, for error messages.
pub(crate) fn summary(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let mut summary: String = text.chars().take(SUMMARY_LEN).collect();
    if text.chars().count() > SUMMARY_LEN {
        summary.push_str("...");
    }
    summary
}

fn api_error(status: StatusCode, body: &[u8]) -> ApiError {
    ocm_core::unmarshal::<ApiError>(body).unwrap_or_else(|err| {
        tracing::debug!(status = status.as_u16(), error = %err, "can't decode error response");
        ApiError::builder()
            .id(status.as_u16().to_string())
            .reason(format!("request failed with status {status}"))
            .build()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_must_be_absolute_and_relative_to_the_api() {
        assert!(check(&Method::GET, "/api/clusters_mgmt/v1/clusters", false).is_ok());
        for path in ["", "api/clusters_mgmt/v1", "https://api.openshift.com/api", "//host/api"] {
            let err = check(&Method::GET, path, false).unwrap_err();
            assert!(matches!(err, Error::Request(_)), "{path}: {err}");
        }
    }

    #[test]
    fn get_and_delete_carry_no_body() {
        assert!(check(&Method::GET, "/api", true).is_err());
        assert!(check(&Method::DELETE, "/api", true).is_err());
        assert!(check(&Method::POST, "/api", true).is_ok());
        assert!(check(&Method::PATCH, "/api", true).is_ok());
        assert!(check(&Method::DELETE, "/api", false).is_ok());
    }

    #[test]
    fn only_api_methods_are_allowed() {
        let err = check(&Method::PUT, "/api", true).unwrap_err();
        assert_eq!(err.to_string(), "invalid request: method 'PUT' isn't allowed");
        assert!(check(&Method::HEAD, "/api", false).is_err());
    }

    #[test]
    fn json_content_types() {
        assert!(is_json("application/json"));
        assert!(is_json("Application/JSON; charset=utf-8"));
        assert!(!is_json("text/html"));
        assert!(!is_json(""));
    }

    #[test]
    fn summaries_are_truncated() {
        assert_eq!(summary(b"short"), "short");
        let long = "x".repeat(300);
        let summarized = summary(long.as_bytes());
        assert_eq!(summarized.len(), SUMMARY_LEN + 3);
        assert!(summarized.ends_with("..."));
    }

    #[test]
    fn undecodable_errors_keep_the_status() {
        let error = api_error(StatusCode::BAD_GATEWAY, b"");
        assert_eq!(error.status(), Some(502));
        let error = api_error(
            StatusCode::NOT_FOUND,
            br#"{"kind":"Error","id":"404","reason":"Cluster 'abc' not found"}"#,
        );
        assert_eq!(error.reason(), Some("Cluster 'abc' not found"));
    }
}
