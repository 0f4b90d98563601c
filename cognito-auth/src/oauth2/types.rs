//! Core OAuth2 types
//!
//! Tokens, user attributes and the redirect returned when starting a login.

use chrono::{DateTime, TimeDelta, Utc};
use oauth2::basic::{
    BasicErrorResponse, BasicRevocationErrorResponse, BasicTokenIntrospectionResponse,
    BasicTokenType,
};
use oauth2::{
    Client, EndpointNotSet, EndpointSet, ExtraTokenFields, StandardRevocableToken,
    StandardTokenResponse, TokenResponse,
};
use serde::{Deserialize, Deserializer, Serialize};

/// Extra fields Cognito returns from the token endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CognitoTokenFields {
    /// OpenID Connect ID token (present when the `openid` scope was granted)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
}

impl ExtraTokenFields for CognitoTokenFields {}

/// Token endpoint response including Cognito's ID token
pub type CognitoTokenResponse = StandardTokenResponse<CognitoTokenFields, BasicTokenType>;

/// OAuth2 client with the hosted UI login and token endpoints set
///
/// Device authorization, introspection and revocation are not used.
pub type ConfiguredClient = Client<
    BasicErrorResponse,
    CognitoTokenResponse,
    BasicTokenIntrospectionResponse,
    StandardRevocableToken,
    BasicRevocationErrorResponse,
    EndpointSet,    // HasAuthUrl
    EndpointNotSet, // HasDeviceAuthUrl
    EndpointNotSet, // HasIntrospectionUrl
    EndpointNotSet, // HasRevocationUrl
    EndpointSet,    // HasTokenUrl
>;

/// Login redirect and the CSRF state embedded in it
///
/// The caller keeps `state` (cookie, session, ...) and compares it with the
/// `state` query parameter Cognito sends back to the callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationRedirect {
    /// Fully encoded hosted UI login URL
    pub url: String,
    /// CSRF state token
    pub state: String,
}

impl AuthorizationRedirect {
    /// Constant-time-ish comparison of the returned state against ours
    #[must_use]
    pub fn state_matches(&self, returned: &str) -> bool {
        self.state.len() == returned.len()
            && self
                .state
                .bytes()
                .zip(returned.bytes())
                .fold(0u8, |acc, (a, b)| acc | (a ^ b))
                == 0
    }
}

/// Tokens issued by Cognito
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthToken {
    /// Access token
    pub access_token: String,
    /// Refresh token (if provided)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// ID token (if the `openid` scope was granted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
    /// Token type (usually "Bearer")
    pub token_type: String,
    /// When the access token expires
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// OAuth2 scopes granted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<String>>,
}

impl OAuthToken {
    /// Build from a token endpoint response
    ///
    /// `previous_refresh_token` is kept when the response carries none, which
    /// is how Cognito answers a `refresh_token` grant.
    #[must_use]
    pub fn from_response(
        response: &CognitoTokenResponse,
        previous_refresh_token: Option<&str>,
    ) -> Self {
        Self {
            access_token: response.access_token().secret().clone(),
            refresh_token: response
                .refresh_token()
                .map(|t| t.secret().clone())
                .or_else(|| previous_refresh_token.map(str::to_string)),
            id_token: response.extra_fields().id_token.clone(),
            token_type: response.token_type().as_ref().to_string(),
            expires_at: response
                .expires_in()
                .and_then(|duration| TimeDelta::from_std(duration).ok())
                .map(|delta| Utc::now() + delta),
            scopes: response
                .scopes()
                .map(|scopes| scopes.iter().map(|s| s.to_string()).collect()),
        }
    }

    /// Check if the access token has expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|expires| Utc::now() > expires)
    }
}

/// User attributes from the `/oauth2/userInfo` endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CognitoUserInfo {
    /// Cognito subject (stable user ID within the pool)
    pub sub: String,
    /// Email address
    pub email: String,
    /// Whether the email is verified (Cognito sends `"true"` or `true`)
    #[serde(default, deserialize_with = "deserialize_flexible_bool")]
    pub email_verified: bool,
    /// Full name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Pool username
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Given name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    /// Family name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    /// Profile picture URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl CognitoUserInfo {
    /// Name to show for the user
    ///
    /// `name`, then "given family", then the pool username.
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        let non_empty = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        non_empty(&self.name)
            .or_else(|| {
                let parts: Vec<String> = [non_empty(&self.given_name), non_empty(&self.family_name)]
                    .into_iter()
                    .flatten()
                    .collect();
                (!parts.is_empty()).then(|| parts.join(" "))
            })
            .or_else(|| non_empty(&self.username))
    }
}

fn deserialize_flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    Ok(match Option::<BoolOrString>::deserialize(deserializer)? {
        Some(BoolOrString::Bool(value)) => value,
        Some(BoolOrString::String(value)) => value.eq_ignore_ascii_case("true"),
        None => false,
    })
}

/// OAuth error body (`error`, `error_description`) sent by Cognito
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProviderErrorBody {
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl ProviderErrorBody {
    /// Best human readable message: description, else the error code
    pub fn message(self) -> Option<String> {
        self.error_description
            .filter(|d| !d.is_empty())
            .or(self.error)
    }
}
