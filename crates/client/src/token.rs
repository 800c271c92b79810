//! Access tokens: parsing, selection and renewal.
//!
//! Tokens are JSON web tokens. Their expiry is read from the `exp` claim
//! without verifying the signature; a token without `exp`, or with `exp` set
//! to zero like offline tokens, never expires.

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;
use url::Url;

use crate::dump;
use crate::error::{Error, Result};
use crate::metrics::Metrics;
use crate::send::{is_json, summary};

/// Tokens with less time left than this are renewed before use.
fn min_left() -> Duration {
    Duration::minutes(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Error)]
pub(crate) enum TokenError {
    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("token doesn't contain the 'typ' claim")]
    MissingType,

    #[error("type '{0}' of token is unknown")]
    UnknownType(String),
}

#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default)]
    typ: Option<String>,
    #[serde(default)]
    exp: Option<i64>,
}

#[derive(Debug, Clone)]
pub(crate) struct Token {
    text: String,
    kind: TokenKind,
    expires_at: Option<DateTime<Utc>>,
}

impl Token {
    /// Parses a token given by the user; the `typ` claim decides whether it is
    /// an access token (`Bearer`) or a refresh token (`Refresh`, `Offline`).
    pub(crate) fn parse(text: &str) -> core::result::Result<Self, TokenError> {
        let claims = decode(text)?;
        let kind = match claims.typ.as_deref() {
            None => return Err(TokenError::MissingType),
            Some(typ) if typ.eq_ignore_ascii_case("bearer") => TokenKind::Access,
            Some(typ) if typ.eq_ignore_ascii_case("refresh") || typ.eq_ignore_ascii_case("offline") => {
                TokenKind::Refresh
            }
            Some(typ) => return Err(TokenError::UnknownType(typ.to_string())),
        };
        Ok(Self::new(text, kind, &claims))
    }

    /// Parses a token received from the token service, whose role is given by
    /// the field of the response that carried it.
    fn received(text: &str, kind: TokenKind) -> core::result::Result<Self, TokenError> {
        let claims = decode(text)?;
        Ok(Self::new(text, kind, &claims))
    }

    fn new(text: &str, kind: TokenKind, claims: &Claims) -> Self {
        let expires_at = claims
            .exp
            .filter(|exp| *exp != 0)
            .and_then(|exp| Utc.timestamp_opt(exp, 0).single());
        Self {
            text: text.to_string(),
            kind,
            expires_at,
        }
    }

    /// True if the token doesn't expire or still has `at_least` left.
    fn lasts(&self, now: DateTime<Utc>, at_least: Duration) -> bool {
        self.expires_at.is_none_or(|expires_at| expires_at - now >= at_least)
    }

    fn alive(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_none_or(|expires_at| expires_at > now)
    }
}

fn decode(text: &str) -> core::result::Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::RS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();
    Ok(jsonwebtoken::decode::<Claims>(text, &DecodingKey::from_secret(&[]), &validation)?.claims)
}

#[derive(Debug, Default)]
struct Tokens {
    access: Option<Token>,
    refresh: Option<Token>,
}

#[derive(Debug, Deserialize)]
struct TokenReply {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

/// Where the connection gets its access tokens from.
pub(crate) struct TokenSource {
    http: reqwest::Client,
    url: Url,
    client_id: String,
    client_secret: Option<String>,
    user: Option<(String, String)>,
    scopes: Vec<String>,
    metrics: Option<Metrics>,
    tokens: Mutex<Tokens>,
}

impl TokenSource {
    pub(crate) fn new(
        http: reqwest::Client,
        url: Url,
        client_id: String,
        client_secret: Option<String>,
        user: Option<(String, String)>,
        scopes: Vec<String>,
        metrics: Option<Metrics>,
        initial: Vec<Token>,
    ) -> Self {
        let mut tokens = Tokens::default();
        for token in initial {
            match token.kind {
                TokenKind::Access => tokens.access = Some(token),
                TokenKind::Refresh => tokens.refresh = Some(token),
            }
        }
        Self {
            http,
            url,
            client_id,
            client_secret,
            user,
            scopes,
            metrics,
            tokens: Mutex::new(tokens),
        }
    }

    /// Returns a usable access token, requesting a new one if needed.
    pub(crate) async fn access_token(&self) -> Result<String> {
        let mut tokens = self.tokens.lock().await;
        self.select(&mut tokens).await
    }

    /// Returns a usable access token and the current refresh token.
    pub(crate) async fn tokens(&self) -> Result<(String, Option<String>)> {
        let mut tokens = self.tokens.lock().await;
        let access = self.select(&mut tokens).await?;
        let refresh = tokens.refresh.as_ref().map(|token| token.text.clone());
        Ok((access, refresh))
    }

    async fn select(&self, tokens: &mut Tokens) -> Result<String> {
        let now = Utc::now();

        if let Some(access) = tokens.access.as_ref().filter(|t| t.lasts(now, min_left())) {
            return Ok(access.text.clone());
        }

        if let Some(refresh) = tokens.refresh.clone().filter(|t| t.lasts(now, min_left())) {
            return self.refresh(tokens, &refresh).await;
        }

        if self.password().is_some() || self.client_secret.is_some() {
            return self.grant(tokens).await;
        }

        if let Some(refresh) = tokens.refresh.clone().filter(|t| t.alive(now)) {
            tracing::warn!("refresh token expires in less than a minute, will use it anyway");
            return self.refresh(tokens, &refresh).await;
        }

        if let Some(access) = tokens.access.as_ref().filter(|t| t.alive(now)) {
            tracing::warn!("access token expires in less than a minute, will use it anyway");
            return Ok(access.text.clone());
        }

        Err(Error::token(
            "access and refresh tokens are unavailable or expired, and there are no password \
             or client secret to request new ones",
        ))
    }

    /// User name and password, when both are set.
    fn password(&self) -> Option<(&str, &str)> {
        self.user
            .as_ref()
            .filter(|(name, password)| !name.is_empty() && !password.is_empty())
            .map(|(name, password)| (name.as_str(), password.as_str()))
    }

    async fn refresh(&self, tokens: &mut Tokens, refresh: &Token) -> Result<String> {
        let mut form = vec![
            ("grant_type", "refresh_token".to_string()),
            ("client_id", self.client_id.clone()),
        ];
        if let Some(secret) = &self.client_secret {
            form.push(("client_secret", secret.clone()));
        }
        form.push(("refresh_token", refresh.text.clone()));
        self.request(tokens, form).await
    }

    async fn grant(&self, tokens: &mut Tokens) -> Result<String> {
        let scope = self.scopes.join(" ");
        let form = match (self.password(), &self.client_secret) {
            (Some((name, password)), _) => vec![
                ("grant_type", "password".to_string()),
                ("client_id", self.client_id.clone()),
                ("username", name.to_string()),
                ("password", password.to_string()),
                ("scope", scope),
            ],
            (None, Some(secret)) => vec![
                ("grant_type", "client_credentials".to_string()),
                ("client_id", self.client_id.clone()),
                ("client_secret", secret.clone()),
                ("scope", scope),
            ],
            (None, None) => {
                return Err(Error::token("either password or client secret must be provided"));
            }
        };
        self.request(tokens, form).await
    }

    async fn request(&self, tokens: &mut Tokens, form: Vec<(&'static str, String)>) -> Result<String> {
        dump::form(&self.url, &form);
        let started = Instant::now();
        let sent = self
            .http
            .post(self.url.clone())
            .header(ACCEPT, "application/json")
            .form(&form)
            .send()
            .await;
        if let Some(metrics) = &self.metrics {
            let code = sent.as_ref().map_or(0, |response| response.status().as_u16());
            metrics.token_request(code, started.elapsed());
        }
        let response = sent?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        dump::response(status, &headers, &body);

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

        let reply: TokenReply = serde_json::from_slice(&body)
            .map_err(|err| Error::token(format!("can't parse token response: {err}")))?;
        if let Some(error) = reply.error {
            return Err(match reply.error_description {
                Some(description) => Error::token(format!("{error}: {description}")),
                None => Error::token(error),
            });
        }
        if status != StatusCode::OK {
            return Err(Error::token(format!("token response status code is {status}")));
        }
        if let Some(token_type) = reply.token_type.as_deref() {
            if !token_type.eq_ignore_ascii_case("bearer") {
                return Err(Error::token(format!(
                    "expected 'bearer' token type but got '{token_type}'"
                )));
            }
        }

        let access = reply
            .access_token
            .ok_or_else(|| Error::token("no access token was received"))?;
        let access = Token::received(&access, TokenKind::Access)
            .map_err(|err| Error::token(format!("can't parse access token: {err}")))?;
        if let Some(refresh) = reply.refresh_token {
            let refresh = Token::received(&refresh, TokenKind::Refresh)
                .map_err(|err| Error::token(format!("can't parse refresh token: {err}")))?;
            tokens.refresh = Some(refresh);
        }
        tracing::debug!(url = %self.url, "got new access token");
        let text = access.text.clone();
        tokens.access = Some(access);
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::json;

    fn jwt(claims: serde_json::Value) -> String {
        jsonwebtoken::encode(&Header::default(), &claims, &EncodingKey::from_secret(b"test")).unwrap()
    }

    fn bearer(expires_at: DateTime<Utc>) -> Token {
        Token::parse(&jwt(json!({ "typ": "Bearer", "exp": expires_at.timestamp() }))).unwrap()
    }

    fn source(user: Option<(String, String)>, initial: Vec<Token>) -> TokenSource {
        TokenSource::new(
            reqwest::Client::new(),
            Url::parse("http://127.0.0.1:1/token").unwrap(),
            "cloud-services".to_string(),
            None,
            user,
            vec!["openid".to_string()],
            None,
            initial,
        )
    }

    #[test]
    fn typ_claim_selects_the_kind() {
        let access = Token::parse(&jwt(json!({ "typ": "Bearer" }))).unwrap();
        assert_eq!(access.kind, TokenKind::Access);
        let refresh = Token::parse(&jwt(json!({ "typ": "Refresh" }))).unwrap();
        assert_eq!(refresh.kind, TokenKind::Refresh);
        let offline = Token::parse(&jwt(json!({ "typ": "offline" }))).unwrap();
        assert_eq!(offline.kind, TokenKind::Refresh);
    }

    #[test]
    fn tokens_without_a_known_type_are_rejected() {
        let err = Token::parse(&jwt(json!({ "exp": 0 }))).unwrap_err();
        assert!(matches!(err, TokenError::MissingType));
        assert_eq!(err.to_string(), "token doesn't contain the 'typ' claim");

        let err = Token::parse(&jwt(json!({ "typ": "ID" }))).unwrap_err();
        assert!(matches!(err, TokenError::UnknownType(ref typ) if typ == "ID"));
    }

    #[test]
    fn received_tokens_take_the_kind_of_their_field() {
        let text = jwt(json!({ "exp": (Utc::now() + Duration::hours(1)).timestamp() }));
        let token = Token::received(&text, TokenKind::Refresh).unwrap();
        assert_eq!(token.kind, TokenKind::Refresh);
    }

    #[test]
    fn expiry_comes_from_exp_claim() {
        let now = Utc::now();
        let token = bearer(now + Duration::seconds(30));
        assert!(token.alive(now));
        assert!(!token.lasts(now, min_left()));

        assert!(bearer(now + Duration::hours(1)).lasts(now, min_left()));
        assert!(!bearer(now - Duration::hours(1)).alive(now));
    }

    #[test]
    fn tokens_without_exp_never_expire() {
        let token = Token::parse(&jwt(json!({ "typ": "Bearer" }))).unwrap();
        assert!(token.lasts(Utc::now() + Duration::days(3650), min_left()));
    }

    #[test]
    fn offline_tokens_with_zero_exp_never_expire() {
        let offline = Token::parse(&jwt(json!({ "typ": "Offline", "exp": 0 }))).unwrap();
        assert_eq!(offline.kind, TokenKind::Refresh);
        assert_eq!(offline.expires_at, None);
        let later = Utc::now() + Duration::days(3650);
        assert!(offline.alive(later));
        assert!(offline.lasts(later, min_left()));
    }

    #[test]
    fn opaque_tokens_are_rejected() {
        assert!(matches!(Token::parse("not-a-jwt"), Err(TokenError::Jwt(_))));
    }

    #[tokio::test]
    async fn expired_tokens_without_credentials_are_an_error() {
        let source = source(None, vec![bearer(Utc::now() - Duration::hours(1))]);
        let err = source.access_token().await.unwrap_err();
        assert!(err.to_string().contains("access and refresh tokens are unavailable or expired"));
    }

    #[tokio::test]
    async fn empty_passwords_are_not_credentials() {
        let user = Some(("myuser".to_string(), String::new()));
        let source = source(user, vec![bearer(Utc::now() - Duration::hours(1))]);
        assert_eq!(source.password(), None);
        let err = source.access_token().await.unwrap_err();
        assert!(err.to_string().contains("there are no password or client secret"));
    }

    #[tokio::test]
    async fn short_lived_access_token_is_used_as_last_resort() {
        let token = bearer(Utc::now() + Duration::seconds(30));
        let text = token.text.clone();
        let source = source(None, vec![token]);
        assert_eq!(source.access_token().await.unwrap(), text);
    }
}
