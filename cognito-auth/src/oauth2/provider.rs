//! Cognito hosted UI provider
//!
//! Wraps the four hosted UI endpoints: `/login`, `/logout`, `/oauth2/token`
//! and `/oauth2/userInfo`.

use http::header::ACCEPT;
use oauth2::basic::BasicErrorResponse;
use oauth2::{
    AuthType, AuthUrl, AuthorizationCode, Client, ClientId, ClientSecret, CsrfToken,
    RedirectUrl, RefreshToken, RequestTokenError, Scope, TokenUrl,
};
use reqwest::Url;

use crate::config::{CognitoSettings, HttpSettings};
use crate::error::{AuthError, AuthResult};
use crate::oauth2::http::build_http_client;
use crate::oauth2::types::{
    AuthorizationRedirect, CognitoUserInfo, ConfiguredClient, OAuthToken, ProviderErrorBody,
};

/// Hosted UI sign-in page
pub const LOGIN_PATH: &str = "/login";
/// Hosted UI sign-out endpoint
pub const LOGOUT_PATH: &str = "/logout";
/// Token endpoint
pub const TOKEN_PATH: &str = "/oauth2/token";
/// UserInfo endpoint
pub const USERINFO_PATH: &str = "/oauth2/userInfo";

/// Amazon Cognito OAuth2 provider
///
/// Stateless: every call is a single round-trip to the hosted domain.
pub struct CognitoProvider {
    client: ConfiguredClient,
    http_client: reqwest::Client,
    scopes: Vec<String>,
    logout_url: Url,
    userinfo_url: Url,
}

impl CognitoProvider {
    /// Create a provider for the configured hosted domain
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Configuration`] if the domain or a redirect URL
    /// does not form a valid URL
    pub fn new(settings: &CognitoSettings, http: &HttpSettings) -> AuthResult<Self> {
        let http_client = build_http_client(http)?;
        Self::with_http_client(settings, http_client)
    }

    /// Create a provider reusing an existing HTTP client
    ///
    /// The client should not follow redirects.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Configuration`] if any configured URL is invalid
    pub fn with_http_client(
        settings: &CognitoSettings,
        http_client: reqwest::Client,
    ) -> AuthResult<Self> {
        let base_url = settings.base_url();

        let mut client = Client::new(ClientId::new(settings.client_id.clone()));
        if let Some(secret) = &settings.client_secret {
            client = client.set_client_secret(ClientSecret::new(secret.clone()));
        }

        let client: ConfiguredClient = client
            .set_auth_type(AuthType::BasicAuth)
            .set_auth_uri(
                AuthUrl::new(format!("{base_url}{LOGIN_PATH}"))
                    .map_err(|e| AuthError::Configuration(format!("Invalid login URL: {e}")))?,
            )
            .set_token_uri(
                TokenUrl::new(format!("{base_url}{TOKEN_PATH}"))
                    .map_err(|e| AuthError::Configuration(format!("Invalid token URL: {e}")))?,
            )
            .set_redirect_uri(
                RedirectUrl::new(settings.redirect_uri.clone())
                    .map_err(|e| AuthError::Configuration(format!("Invalid redirect URI: {e}")))?,
            );

        let logout_url = Url::parse_with_params(
            &format!("{base_url}{LOGOUT_PATH}"),
            [
                ("client_id", settings.client_id.as_str()),
                ("logout_uri", settings.logout_uri()),
            ],
        )
        .map_err(|e| AuthError::Configuration(format!("Invalid logout URL: {e}")))?;

        let userinfo_url = Url::parse(&format!("{base_url}{USERINFO_PATH}"))
            .map_err(|e| AuthError::Configuration(format!("Invalid userInfo URL: {e}")))?;

        Ok(Self {
            client,
            http_client,
            scopes: settings.scopes.clone(),
            logout_url,
            userinfo_url,
        })
    }

    /// Hosted UI login URL with a fresh random state
    #[must_use]
    pub fn login_url(&self) -> AuthorizationRedirect {
        self.authorization_redirect(CsrfToken::new_random())
    }

    /// Hosted UI login URL carrying a caller-chosen state
    #[must_use]
    pub fn login_url_with_state(&self, state: impl Into<String>) -> AuthorizationRedirect {
        self.authorization_redirect(CsrfToken::new(state.into()))
    }

    fn authorization_redirect(&self, state: CsrfToken) -> AuthorizationRedirect {
        let (url, csrf_state) = self
            .client
            .authorize_url(|| state)
            .add_scopes(self.scopes.iter().cloned().map(Scope::new))
            .url();

        AuthorizationRedirect {
            url: url.to_string(),
            state: csrf_state.secret().clone(),
        }
    }

    /// Hosted UI logout URL
    #[must_use]
    pub fn logout_url(&self) -> String {
        self.logout_url.to_string()
    }

    /// Exchange an authorization code for tokens
    ///
    /// Sends `grant_type=authorization_code` form-encoded with the client
    /// credentials as HTTP Basic auth.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Authentication`] with the provider's description
    /// when Cognito rejects the code, or a transport/parse error otherwise
    pub async fn exchange_code(&self, code: &str) -> AuthResult<OAuthToken> {
        tracing::debug!(endpoint = %self.token_url(), "Exchanging authorization code");

        let response = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(&self.http_client)
            .await
            .map_err(token_error)?;

        Ok(OAuthToken::from_response(&response, None))
    }

    /// Obtain fresh tokens with a refresh token
    ///
    /// The original refresh token is kept when Cognito does not rotate it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Authentication`] when the refresh token is
    /// rejected, or a transport/parse error otherwise
    pub async fn refresh(&self, refresh_token: &str) -> AuthResult<OAuthToken> {
        tracing::debug!(endpoint = %self.token_url(), "Refreshing tokens");

        let refresh = RefreshToken::new(refresh_token.to_string());
        let response = self
            .client
            .exchange_refresh_token(&refresh)
            .request_async(&self.http_client)
            .await
            .map_err(token_error)?;

        Ok(OAuthToken::from_response(&response, Some(refresh_token)))
    }

    /// Fetch the user's attributes with a bearer access token
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Authentication`] if Cognito refuses the token,
    /// [`AuthError::InvalidResponse`] if the body lacks required claims
    pub async fn fetch_user_info(&self, access_token: &str) -> AuthResult<CognitoUserInfo> {
        tracing::debug!(endpoint = %self.userinfo_url, "Fetching user info");

        let response = self
            .http_client
            .get(self.userinfo_url.clone())
            .bearer_auth(access_token)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let description = serde_json::from_str::<ProviderErrorBody>(&body)
                .ok()
                .and_then(ProviderErrorBody::message)
                .unwrap_or_else(|| format!("HTTP {status}"));

            tracing::warn!(status = %status, description = %description, "Cognito rejected userInfo request");
            return Err(AuthError::Authentication(description));
        }

        response
            .json::<CognitoUserInfo>()
            .await
            .map_err(|e| AuthError::InvalidResponse(format!("Failed to parse user info: {e}")))
    }

    /// Token endpoint URL
    #[must_use]
    pub fn token_url(&self) -> &str {
        self.client.token_uri().as_str()
    }

    /// UserInfo endpoint URL
    #[must_use]
    pub fn userinfo_url(&self) -> &str {
        self.userinfo_url.as_str()
    }
}

/// Map an `oauth2` token request failure onto [`AuthError`]
fn token_error<RE>(err: RequestTokenError<RE, BasicErrorResponse>) -> AuthError
where
    RE: std::error::Error + 'static,
{
    match err {
        RequestTokenError::ServerResponse(response) => {
            let code = response.error().to_string();
            let description = response
                .error_description()
                .filter(|d| !d.is_empty())
                .cloned()
                .unwrap_or_else(|| code.clone());

            tracing::warn!(error = %code, description = %description, "Cognito rejected token request");
            AuthError::Authentication(description)
        }
        RequestTokenError::Request(e) => AuthError::Http(e.to_string()),
        RequestTokenError::Parse(e, _) => {
            AuthError::InvalidResponse(format!("Failed to parse token response: {e}"))
        }
        RequestTokenError::Other(message) => AuthError::InvalidResponse(message),
    }
}
