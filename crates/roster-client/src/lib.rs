#![allow(non_snake_case)]

pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod storage;
pub mod store;
pub mod token_store;
pub mod transport;
pub mod users;

pub use auth::AuthService;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use transport::HttpClient;
pub use middleware::bearer::{BearerAuth, BearerAuthLayer, ExclusionSet};
pub use storage::{CredentialStorage, FileStorage, MemoryStorage, StorageError};
pub use store::UserStore;
pub use token_store::TokenStore;
pub use users::UserService;

use std::sync::Arc;

/// Everything a front end needs, wired once at start-up.
///
/// The bearer-auth stage is composed into the single shared [`HttpClient`],
/// so the auth and user services both send through it.
#[derive(Clone)]
pub struct RosterClient {
    http: HttpClient,
    auth: AuthService,
    users: UserService,
    store: Arc<UserStore>,
}

impl RosterClient {
    pub fn new(config: &ClientConfig, storage: Arc<dyn CredentialStorage>) -> ClientResult<Self> {
        for base in [&config.api_base, &config.users_base] {
            reqwest::Url::parse(base)
                .map_err(|e| ClientError::Config(format!("invalid base URL {base:?}: {e}")))?;
        }

        let tokens = TokenStore::new(storage);
        let exclusions = ExclusionSet::new(config.excluded_paths.iter().cloned());
        let httpClient = HttpClient::new(tokens.clone(), exclusions)?;

        let auth = AuthService::new(httpClient.clone(), tokens, &config.api_base);
        let users = UserService::new(httpClient.clone(), &config.users_base);
        let store = Arc::new(UserStore::new(users.clone()));

        Ok(Self {
            http: httpClient,
            auth,
            users,
            store,
        })
    }

    /// Builds a client whose credentials live under `config.credential_dir`.
    pub fn with_file_storage(config: &ClientConfig) -> ClientResult<Self> {
        let storage = FileStorage::new(&config.credential_dir);
        Self::new(config, Arc::new(storage))
    }

    /// The shared pipeline, for requests outside the user collection.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    pub fn users(&self) -> &UserService {
        &self.users
    }

    pub fn store(&self) -> &UserStore {
        &self.store
    }
}
