//! Connection to the API: where it lives and how to authenticate.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use prometheus::Registry;
use url::Url;

use crate::accounts_mgmt::AccountsMgmtClient;
use crate::authorizations::AuthorizationsClient;
use crate::clusters_mgmt::ClustersMgmtClient;
use crate::error::{Error, Result};
use crate::metrics::Metrics;
use crate::resource::Resource;
use crate::service_logs::ServiceLogsClient;
use crate::token::{Token, TokenSource};

pub const DEFAULT_URL: &str = "https://api.openshift.com";
pub const DEFAULT_TOKEN_URL: &str =
    "https://sso.redhat.com/auth/realms/redhat-external/protocol/openid-connect/token";
pub const DEFAULT_CLIENT_ID: &str = "cloud-services";
pub const DEFAULT_SCOPES: [&str; 1] = ["openid"];
pub const DEFAULT_AGENT: &str = concat!("OCM-Rust/", env!("CARGO_PKG_VERSION"));

pub const URL_ENV: &str = "OCM_URL";
pub const TOKEN_URL_ENV: &str = "OCM_TOKEN_URL";
pub const CLIENT_ID_ENV: &str = "OCM_CLIENT_ID";
pub const CLIENT_SECRET_ENV: &str = "OCM_CLIENT_SECRET";
pub const TOKEN_ENV: &str = "OCM_TOKEN";

/// Settings of a [`Connection`].
///
/// At least one way to authenticate is required: an access or refresh token,
/// a user name and password, or a client secret.
#[derive(Clone, Default)]
pub struct ConnectionBuilder {
    url: Option<String>,
    token_url: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    user: Option<(String, String)>,
    tokens: Vec<String>,
    scopes: Option<Vec<String>>,
    agent: Option<String>,
    insecure: bool,
    subsystem: Option<String>,
    registry: Option<Registry>,
}

impl ConnectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder with the settings found in the `OCM_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut builder = Self::new();
        if let Some(url) = var(URL_ENV) {
            builder = builder.url(url);
        }
        if let Some(token_url) = var(TOKEN_URL_ENV) {
            builder = builder.token_url(token_url);
        }
        builder.client_id = var(CLIENT_ID_ENV);
        builder.client_secret = var(CLIENT_SECRET_ENV);
        if let Some(token) = var(TOKEN_ENV) {
            builder = builder.tokens([token]);
        }
        builder
    }

    /// Base URL of the API, `https://api.openshift.com` by default.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = Some(url.into());
        self
    }

    /// OAuth client used for the token requests.
    pub fn client(mut self, id: impl Into<String>, secret: impl Into<String>) -> Self {
        self.client_id = Some(id.into());
        self.client_secret = Some(secret.into()).filter(|secret: &String| !secret.is_empty());
        self
    }

    pub fn user(mut self, name: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = Some((name.into(), password.into()));
        self
    }

    /// Access or refresh tokens to start with; the `typ` claim tells them apart.
    pub fn tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokens.extend(tokens.into_iter().map(Into::into));
        self
    }

    pub fn scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = Some(scopes.into_iter().map(Into::into).collect());
        self
    }

    /// Value of the `User-Agent` header.
    pub fn agent(mut self, agent: impl Into<String>) -> Self {
        self.agent = Some(agent.into());
        self
    }

    /// Skips verification of the TLS certificates of the servers.
    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    /// Registers Prometheus metrics of the token and API requests under the
    /// given subsystem, for example `api_outbound`. Empty means no metrics.
    pub fn metrics(mut self, subsystem: impl Into<String>) -> Self {
        self.subsystem = Some(subsystem.into()).filter(|subsystem: &String| !subsystem.is_empty());
        self
    }

    /// Registry of the metrics, the default registry of the process if not set.
    pub fn metrics_registry(mut self, registry: Registry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn build(self) -> Result<Connection> {
        let url = parse_url("API", self.url.as_deref().unwrap_or(DEFAULT_URL))?;
        let token_url = parse_url("token", self.token_url.as_deref().unwrap_or(DEFAULT_TOKEN_URL))?;

        if let Some((name, password)) = &self.user {
            if name.is_empty() {
                return Err(Error::config("user name is mandatory"));
            }
            if password.is_empty() {
                return Err(Error::config(format!("password of user '{name}' is mandatory")));
            }
        }
        if self.tokens.is_empty() && self.user.is_none() && self.client_secret.is_none() {
            return Err(Error::config(
                "access token, refresh token, user name and password or client secret is necessary",
            ));
        }
        let tokens = self
            .tokens
            .iter()
            .map(|text| {
                Token::parse(text).map_err(|err| Error::config(format!("can't parse token: {err}")))
            })
            .collect::<Result<Vec<_>>>()?;

        let metrics = self
            .subsystem
            .as_deref()
            .map(|subsystem| Metrics::register(subsystem, self.registry.as_ref()))
            .transpose()
            .map_err(|err| Error::config(format!("can't register metrics: {err}")))?;

        if self.insecure {
            tracing::warn!(url = %url, "TLS certificate verification is disabled");
        }
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(self.insecure)
            .build()?;

        let scopes = self
            .scopes
            .unwrap_or_else(|| DEFAULT_SCOPES.iter().map(|scope| scope.to_string()).collect());
        let source = TokenSource::new(
            http.clone(),
            token_url,
            self.client_id.unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string()),
            self.client_secret,
            self.user,
            scopes,
            metrics.clone(),
            tokens,
        );

        tracing::debug!(url = %url, "connection created");
        Ok(Connection {
            inner: Arc::new(Inner {
                http,
                url,
                agent: self.agent.unwrap_or_else(|| DEFAULT_AGENT.to_string()),
                tokens: source,
                metrics,
                closed: AtomicBool::new(false),
            }),
        })
    }
}

fn parse_url(what: &str, text: &str) -> Result<Url> {
    let url = Url::parse(text).map_err(|err| Error::config(format!("invalid {what} URL '{text}': {err}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(Error::config(format!(
            "invalid {what} URL '{text}': scheme '{scheme}' isn't supported"
        ))),
    }
}

/// Connection to the API; cheap to clone and safe to share between tasks.
#[derive(Clone)]
pub struct Connection {
    inner: Arc<Inner>,
}

struct Inner {
    http: reqwest::Client,
    url: Url,
    agent: String,
    tokens: TokenSource,
    metrics: Option<Metrics>,
    closed: AtomicBool,
}

impl Connection {
    pub fn builder() -> ConnectionBuilder {
        ConnectionBuilder::new()
    }

    pub fn api_url(&self) -> &Url {
        &self.inner.url
    }

    pub fn agent(&self) -> &str {
        &self.inner.agent
    }

    /// Returns a valid access token and the refresh token, renewing them if needed.
    pub async fn tokens(&self) -> Result<(String, Option<String>)> {
        self.check_open()?;
        self.inner.tokens.tokens().await
    }

    /// Closes the connection and every clone of it. Requests sent afterwards,
    /// and a second close, fail with [`Error::Closed`].
    pub fn close(&self) -> Result<()> {
        if self.inner.closed.swap(true, Ordering::SeqCst) {
            return Err(Error::Closed);
        }
        tracing::debug!(url = %self.inner.url, "connection closed");
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }

    pub fn clusters_mgmt(&self) -> ClustersMgmtClient {
        ClustersMgmtClient::new(Resource::new(self.clone(), "/api/clusters_mgmt/v1"))
    }

    pub fn accounts_mgmt(&self) -> AccountsMgmtClient {
        AccountsMgmtClient::new(Resource::new(self.clone(), "/api/accounts_mgmt/v1"))
    }

    pub fn authorizations(&self) -> AuthorizationsClient {
        AuthorizationsClient::new(Resource::new(self.clone(), "/api/authorizations/v1"))
    }

    pub fn service_logs(&self) -> ServiceLogsClient {
        ServiceLogsClient::new(Resource::new(self.clone(), "/api/service_logs/v1"))
    }

    pub(crate) fn check_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(Error::Closed);
        }
        Ok(())
    }

    pub(crate) fn metrics(&self) -> Option<&Metrics> {
        self.inner.metrics.as_ref()
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    pub(crate) fn token_source(&self) -> &TokenSource {
        &self.inner.tokens
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("url", &self.inner.url.as_str())
            .field("agent", &self.inner.agent)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::json;

    fn access_token() -> String {
        let claims = json!({ "typ": "Bearer", "exp": chrono::Utc::now().timestamp() + 3600 });
        jsonwebtoken::encode(&Header::default(), &claims, &EncodingKey::from_secret(b"test")).unwrap()
    }

    #[test]
    fn defaults() {
        let connection = Connection::builder().tokens([access_token()]).build().unwrap();
        assert_eq!(connection.api_url().as_str(), "https://api.openshift.com/");
        assert!(connection.agent().starts_with("OCM-Rust/"));
    }

    #[test]
    fn authentication_is_required() {
        let err = Connection::builder().build().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(Connection::builder().client("id", "").build().is_err());
        assert!(Connection::builder().client("id", "secret").build().is_ok());
        assert!(Connection::builder().user("myuser", "mypassword").build().is_ok());
        assert!(Connection::builder().user("", "mypassword").build().is_err());
        let err = Connection::builder().user("myuser", "").build().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration: password of user 'myuser' is mandatory"
        );
    }

    #[test]
    fn tokens_need_a_known_type() {
        let untyped = jsonwebtoken::encode(
            &Header::default(),
            &json!({ "exp": 0 }),
            &EncodingKey::from_secret(b"test"),
        )
        .unwrap();
        let err = Connection::builder().tokens([untyped]).build().unwrap_err();
        assert!(err.to_string().contains("doesn't contain the 'typ' claim"));
    }

    #[tokio::test]
    async fn closed_connections_refuse_to_work() {
        let connection = Connection::builder().tokens([access_token()]).build().unwrap();
        let clone = connection.clone();
        assert!(connection.tokens().await.is_ok());

        connection.close().unwrap();
        assert!(clone.is_closed());
        assert!(matches!(clone.tokens().await, Err(Error::Closed)));
        let err = clone.clusters_mgmt().clusters().list().send().await.unwrap_err();
        assert_eq!(err.to_string(), "connection is closed");
        assert!(matches!(connection.close(), Err(Error::Closed)));
    }

    #[test]
    fn metrics_are_registered_once_per_registry() {
        let registry = Registry::new();
        let builder = Connection::builder()
            .tokens([access_token()])
            .metrics("api_outbound")
            .metrics_registry(registry.clone());
        assert!(builder.clone().build().is_ok());
        let err = builder.build().unwrap_err();
        assert!(err.to_string().contains("can't register metrics"));
        assert!(Connection::builder().tokens([access_token()]).metrics("").build().is_ok());
    }

    #[test]
    fn urls_are_validated() {
        let err = Connection::builder()
            .url("not a url")
            .tokens([access_token()])
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("invalid API URL 'not a url'"));

        let err = Connection::builder()
            .token_url("ftp://sso.example.com/token")
            .client("id", "secret")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("scheme 'ftp' isn't supported"));
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        let err = Connection::builder().tokens(["opaque"]).build().unwrap_err();
        assert!(err.to_string().contains("can't parse token"));
    }

    #[test]
    fn environment_settings() {
        let token = access_token();
        let vars: HashMap<&str, String> = HashMap::from([
            (URL_ENV, "http://localhost:8000".to_string()),
            (TOKEN_URL_ENV, "http://localhost:8001/token".to_string()),
            (CLIENT_ID_ENV, "my-client".to_string()),
            (CLIENT_SECRET_ENV, " ".to_string()),
            (TOKEN_ENV, token.clone()),
        ]);
        let builder = ConnectionBuilder::from_vars(|name| vars.get(name).cloned());
        assert_eq!(builder.url.as_deref(), Some("http://localhost:8000"));
        assert_eq!(builder.client_id.as_deref(), Some("my-client"));
        assert_eq!(builder.client_secret, None);
        assert_eq!(builder.tokens, vec![token]);

        let connection = builder.build().unwrap();
        assert_eq!(connection.api_url().as_str(), "http://localhost:8000/");
    }

    #[test]
    fn debug_output_hides_credentials() {
        let token = access_token();
        let connection = Connection::builder().tokens([token.clone()]).build().unwrap();
        let debug = format!("{connection:?}");
        assert!(debug.contains("api.openshift.com"));
        assert!(!debug.contains(&token));
    }
}
