//! REST calls against the user collection.

use reqwest::Method;
use roster_types::{User, UserId};

use crate::error::ClientResult;
use crate::transport::HttpClient;

#[derive(Clone)]
pub struct UserService {
    http: HttpClient,
    base: String,
}

impl UserService {
    pub fn new(http: HttpClient, users_base: &str) -> Self {
        Self {
            http,
            base: users_base.trim_end_matches('/').to_string(),
        }
    }

    /// All users, in whatever order the server returns them.
    pub async fn list(&self) -> ClientResult<Vec<User>> {
        self.http
            .send_json::<(), _>(Method::GET, &self.base, None)
            .await
    }

    pub async fn get(&self, id: UserId) -> ClientResult<User> {
        self.http
            .send_json::<(), _>(Method::GET, &self.item_url(id), None)
            .await
    }

    /// The server assigns the id of the returned user.
    pub async fn create(&self, user: &User) -> ClientResult<User> {
        self.http
            .send_json(Method::POST, &self.base, Some(user))
            .await
    }

    pub async fn update(&self, id: UserId, user: &User) -> ClientResult<User> {
        self.http
            .send_json(Method::PUT, &self.item_url(id), Some(user))
            .await
    }

    pub async fn delete(&self, id: UserId) -> ClientResult<()> {
        self.http
            .send_empty::<()>(Method::DELETE, &self.item_url(id), None)
            .await
    }

    fn item_url(&self, id: UserId) -> String {
        format!("{}/{id}", self.base)
    }
}
