//! The shared HTTP pipeline every service sends through.

use reqwest::{Client, Method, Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tower::{ServiceBuilder, ServiceExt};
use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};
use crate::middleware::bearer::{BearerAuth, BearerAuthLayer, ExclusionSet};
use crate::token_store::TokenStore;

#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    service: BearerAuth<Client>,
}

impl HttpClient {
    pub fn new(tokens: TokenStore, exclusions: ExclusionSet) -> ClientResult<Self> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, tokens, exclusions))
    }

    pub fn with_client(client: Client, tokens: TokenStore, exclusions: ExclusionSet) -> Self {
        let service = ServiceBuilder::new()
            .layer(BearerAuthLayer::new(tokens, exclusions))
            .service(client.clone());
        Self { client, service }
    }

    /// Sends `request` through the auth stage. Non-2xx responses are returned
    /// as-is.
    pub async fn send(&self, request: Request) -> ClientResult<Response> {
        debug!("{} {}", request.method(), request.url());
        self.service.clone().oneshot(request).await
    }

    /// Sends an optional JSON body and decodes a JSON response.
    pub async fn send_json<B, T>(&self, method: Method, url: &str, body: Option<&B>) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.execute(method, url, body).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Like [`send_json`](Self::send_json) but discards the response body.
    pub async fn send_empty<B>(&self, method: Method, url: &str, body: Option<&B>) -> ClientResult<()>
    where
        B: Serialize + ?Sized,
    {
        self.execute(method, url, body).await?;
        Ok(())
    }

    async fn execute<B>(&self, method: Method, url: &str, body: Option<&B>) -> ClientResult<Response>
    where
        B: Serialize + ?Sized,
    {
        let mut builder = self.client.request(method, url);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let request = builder.build()?;

        let response = self.send(request).await?;
        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!("failed to read {status} response body: {e}");
                    String::new()
                }
            };
            return Err(ClientError::Status { status, body });
        }
        Ok(response)
    }
}
