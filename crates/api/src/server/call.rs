use axum::body::Bytes;
use axum::http::Method;
use percent_encoding::percent_decode_str;

/// An HTTP request as seen by the dispatch layer: method, path, decoded query
/// and the fully read body.
#[derive(Debug, Clone)]
pub struct Call {
    method: Method,
    path: String,
    segments: Vec<String>,
    query: Vec<(String, String)>,
    body: Bytes,
}

impl Call {
    pub fn new(method: Method, path: impl Into<String>, query: Option<&str>, body: Bytes) -> Self {
        let query = query
            .map(|raw| url::form_urlencoded::parse(raw.as_bytes()).into_owned().collect())
            .unwrap_or_default();
        let path = path.into();
        let segments = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| percent_decode_str(segment).decode_utf8_lossy().into_owned())
            .collect();
        Self {
            method,
            path,
            segments,
            query,
            body,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Non-empty segments of the path, each one percent-decoded after
    /// splitting, so an encoded `/` stays inside its segment.
    pub fn segments(&self) -> Vec<&str> {
        self.segments.iter().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_decoded() {
        let call = Call::new(
            Method::GET,
            "/api/clusters_mgmt/v1/clusters",
            Some("search=name+like+%27my%25%27&size=10"),
            Bytes::new(),
        );
        assert_eq!(
            call.query(),
            &[
                ("search".to_string(), "name like 'my%'".to_string()),
                ("size".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn empty_segments_are_skipped() {
        let call = Call::new(Method::GET, "/api//clusters_mgmt/v1/", None, Bytes::new());
        assert_eq!(call.segments(), vec!["api", "clusters_mgmt", "v1"]);
    }

    #[test]
    fn segments_are_percent_decoded() {
        let call = Call::new(
            Method::GET,
            "/api/clusters_mgmt/v1/clusters/my%20cluster/addons/a%2Fb",
            None,
            Bytes::new(),
        );
        assert_eq!(
            call.segments(),
            vec!["api", "clusters_mgmt", "v1", "clusters", "my cluster", "addons", "a/b"]
        );
        assert_eq!(call.path(), "/api/clusters_mgmt/v1/clusters/my%20cluster/addons/a%2Fb");
    }
}
