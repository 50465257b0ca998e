use reqwest::Method;
use roster_types::{CredentialRecord, Credentials, User};
use tracing::{info, warn};

use crate::error::{ClientError, ClientResult};
use crate::token_store::TokenStore;
use crate::transport::HttpClient;

#[derive(Clone)]
pub struct AuthService {
    http: HttpClient,
    tokens: TokenStore,
    login_url: String,
}

impl AuthService {
    pub fn new(http: HttpClient, tokens: TokenStore, api_base: &str) -> Self {
        Self {
            http,
            tokens,
            login_url: format!("{}/login", api_base.trim_end_matches('/')),
        }
    }

    /// Logs in and persists the returned `{user, token}` record.
    ///
    /// Every failure collapses into [`ClientError::Authentication`]; the
    /// original cause is only logged.
    pub async fn login(&self, credentials: &Credentials) -> ClientResult<User> {
        let record = match self.request_login(credentials).await {
            Ok(record) => record,
            Err(e) => {
                warn!("login for {} failed: {e}", credentials.email);
                return Err(ClientError::Authentication);
            }
        };

        if record.token.is_empty() {
            warn!("login for {} returned an empty token", credentials.email);
            return Err(ClientError::Authentication);
        }

        if let Err(e) = self.tokens.save(&record) {
            warn!("failed to persist credentials for {}: {e}", credentials.email);
            return Err(ClientError::Authentication);
        }

        info!("logged in as {}", credentials.email);
        Ok(record.user)
    }

    /// Forgets the stored session. No network call is made.
    pub fn logout(&self) -> ClientResult<()> {
        self.tokens.clear()?;
        info!("logged out");
        Ok(())
    }

    pub fn current_user(&self) -> Option<User> {
        self.tokens.user()
    }

    pub fn token(&self) -> Option<String> {
        self.tokens.token()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    async fn request_login(&self, credentials: &Credentials) -> ClientResult<CredentialRecord> {
        self.http
            .send_json(Method::POST, &self.login_url, Some(credentials))
            .await
    }
}
