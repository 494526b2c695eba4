//! Origin check middleware
//!
//! Browsers attach an `Origin` header to cross-site `POST` requests. A request
//! whose origin is neither the server's own origin (derived from the `Host`
//! header) nor one of the configured allowed origins is rejected with 403.
//! Requests without an `Origin` header pass through.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use axum::{
    extract::Request,
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};
use tower::{Layer, Service};
use tracing::warn;

use crate::error::ApiError;

/// Layer that rejects requests from foreign origins
#[derive(Clone, Debug, Default)]
pub struct OriginCheckLayer {
    allowed_origins: Arc<[String]>,
}

impl OriginCheckLayer {
    /// Create a layer accepting same-origin requests plus `allowed_origins`
    pub fn new(allowed_origins: Vec<String>) -> Self {
        let allowed_origins = allowed_origins
            .into_iter()
            .map(|o| o.trim_end_matches('/').to_string())
            .collect();
        Self { allowed_origins }
    }

    /// Whether the request's origin is acceptable
    fn is_allowed(&self, headers: &HeaderMap) -> bool {
        let Some(origin) = headers.get(header::ORIGIN) else {
            return true;
        };
        let Ok(origin) = origin.to_str() else {
            return false;
        };

        if self.allowed_origins.iter().any(|o| o == origin) {
            return true;
        }

        let authority = origin
            .strip_prefix("https://")
            .or_else(|| origin.strip_prefix("http://"));
        let host = headers.get(header::HOST).and_then(|h| h.to_str().ok());

        matches!((authority, host), (Some(a), Some(h)) if a.eq_ignore_ascii_case(h))
    }
}

impl<S> Layer<S> for OriginCheckLayer {
    type Service = OriginCheck<S>;

    fn layer(&self, inner: S) -> Self::Service {
        OriginCheck {
            inner,
            layer: self.clone(),
        }
    }
}

/// Middleware service that enforces the origin check
#[derive(Clone, Debug)]
pub struct OriginCheck<S> {
    inner: S,
    layer: OriginCheckLayer,
}

impl<S> Service<Request> for OriginCheck<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        if !self.layer.is_allowed(req.headers()) {
            warn!(origin = ?req.headers().get(header::ORIGIN), "Blocked request from invalid origin");
            return Box::pin(async { Ok(ApiError::Forbidden.into_response()) });
        }

        let mut inner = self.inner.clone();
        Box::pin(async move { inner.call(req).await })
    }
}
