//! Outgoing-request middleware that attaches `Authorization: Bearer <token>`.

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use http::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Request, Response};
use tower::{Layer, Service};
use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::token_store::TokenStore;

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

pub const DEFAULT_EXCLUDED_PATHS: &[&str] = &["/login", "/public"];

/// Request paths that never get a bearer token.
///
/// Membership is exact string equality on the URL path: `/public` is
/// excluded, `/public/docs` is not.
#[derive(Clone, Debug)]
pub struct ExclusionSet {
    paths: Arc<HashSet<String>>,
}

impl ExclusionSet {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            paths: Arc::new(paths.into_iter().map(Into::into).collect()),
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_PATHS.iter().copied())
    }
}

#[derive(Clone)]
pub struct BearerAuthLayer {
    tokens: TokenStore,
    exclusions: ExclusionSet,
}

impl BearerAuthLayer {
    pub fn new(tokens: TokenStore, exclusions: ExclusionSet) -> Self {
        Self { tokens, exclusions }
    }
}

impl<S> Layer<S> for BearerAuthLayer {
    type Service = BearerAuth<S>;

    fn layer(&self, inner: S) -> Self::Service {
        BearerAuth {
            inner,
            tokens: self.tokens.clone(),
            exclusions: self.exclusions.clone(),
        }
    }
}

#[derive(Clone)]
pub struct BearerAuth<S> {
    inner: S,
    tokens: TokenStore,
    exclusions: ExclusionSet,
}

impl<S> BearerAuth<S> {
    /// Applies the header rule to `request` in place.
    ///
    /// A missing credential record is not an error; the server decides
    /// whether the call needed one.
    pub fn authorize(&self, request: &mut Request) -> ClientResult<()> {
        let path = request.url().path().to_string();
        if self.exclusions.contains(&path) {
            debug!("{path} is excluded from bearer auth");
            return Ok(());
        }

        let Some(token) = self.tokens.token() else {
            debug!("no stored token, sending {path} unauthenticated");
            return Ok(());
        };

        let mut headerValue = HeaderValue::from_str(&format!("Bearer {token}"))?;
        headerValue.set_sensitive(true);
        request.headers_mut().insert(AUTHORIZATION, headerValue);
        debug!("attached bearer token to {path}");
        Ok(())
    }
}

impl<S> Service<Request> for BearerAuth<S>
where
    S: Service<Request, Response = Response>,
    S::Error: Into<ClientError>,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = ClientError;
    type Future = BoxFuture<Result<Response, ClientError>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(Into::into)
    }

    fn call(&mut self, mut request: Request) -> Self::Future {
        if let Err(e) = self.authorize(&mut request) {
            return Box::pin(async move { Err(e) });
        }

        let future = self.inner.call(request);
        Box::pin(async move { future.await.map_err(Into::into) })
    }
}
