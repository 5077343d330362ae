//! Double-submit anti-forgery tokens.
//!
//! Form pages set a random token in a cookie and repeat it in a hidden form
//! field. A POST is accepted only when both are present and equal; a
//! cross-site form can make the browser send the cookie but cannot read it
//! to fill in the field.

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::Response;
use tracing::debug;
use uuid::Uuid;

use super::error::HttpError;

/// Cookie carrying the token.
pub const COOKIE_NAME: &str = "registrar_antiforgery";

/// Hidden form field carrying the token.
pub const FIELD_NAME: &str = "__RequestVerificationToken";

/// A verified or freshly issued token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AntiforgeryToken(String);

impl AntiforgeryToken {
    /// Issue a new random token.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Parse a token, accepting only the format [`generate`](Self::generate)
    /// produces.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::try_parse(raw.trim())
            .ok()
            .map(|uuid| Self(uuid.simple().to_string()))
    }

    /// Token from the request cookie, if present and well formed.
    ///
    /// Reads `name=value` pairs separated by `;` across every `Cookie`
    /// header. A value wrapped in double quotes is unquoted first.
    #[must_use]
    pub fn from_cookie(headers: &HeaderMap) -> Option<Self> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == COOKIE_NAME)
            .and_then(|(_, value)| Self::parse(unquote(value.trim())))
    }

    /// Token for a form page: the request's own token if it has one,
    /// otherwise a new one.
    #[must_use]
    pub fn for_request(headers: &HeaderMap) -> Self {
        Self::from_cookie(headers).unwrap_or_else(Self::generate)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Set-Cookie` value carrying this token.
    #[must_use]
    pub fn cookie(&self) -> String {
        format!("{COOKIE_NAME}={}; Path=/; HttpOnly; SameSite=Strict", self.0)
    }

    /// Attach the cookie to a response.
    #[must_use]
    pub fn attach(&self, mut response: Response) -> Response {
        if let Ok(value) = HeaderValue::from_str(&self.cookie()) {
            response.headers_mut().append(SET_COOKIE, value);
        }
        response
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(value)
}

/// Check a submitted token against the request cookie.
///
/// # Errors
/// Returns [`HttpError::Antiforgery`] when either side is missing or they
/// differ.
pub fn verify(headers: &HeaderMap, submitted: Option<&str>) -> Result<AntiforgeryToken, HttpError> {
    let cookie = AntiforgeryToken::from_cookie(headers);
    let field = submitted.and_then(AntiforgeryToken::parse);

    match (cookie, field) {
        (Some(cookie), Some(field)) if cookie == field => Ok(cookie),
        (cookie, field) => {
            debug!(
                has_cookie = cookie.is_some(),
                has_field = field.is_some(),
                "Anti-forgery check failed"
            );
            Err(HttpError::Antiforgery)
        }
    }
}
