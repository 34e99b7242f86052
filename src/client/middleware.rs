// File: ./src/client/middleware.rs
//! Tower middleware for the API client: User-Agent and bearer token headers.
use crate::session::SessionStore;
use http::{HeaderValue, Request};
use std::sync::Arc;
use std::task::{Context, Poll};
use tower_layer::Layer;
use tower_service::Service;

#[derive(Clone, Debug)]
pub struct UserAgentLayer {
    pub user_agent: String,
}

impl UserAgentLayer {
    pub fn new(user_agent: String) -> Self {
        Self { user_agent }
    }
}

impl<S> Layer<S> for UserAgentLayer {
    type Service = UserAgentService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        UserAgentService {
            inner,
            user_agent: self.user_agent.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct UserAgentService<S> {
    inner: S,
    user_agent: String,
}

impl<S, ReqBody> Service<Request<ReqBody>> for UserAgentService<S>
where
    S: Service<Request<ReqBody>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        if let Ok(val) = HeaderValue::from_str(&self.user_agent) {
            req.headers_mut().insert(http::header::USER_AGENT, val);
        }
        self.inner.call(req)
    }
}

/// Adds `Authorization: Bearer <token>` when the session holds a token.
///
/// The store is read on every request so a login or logout takes effect
/// without rebuilding the client.
#[derive(Clone, Debug)]
pub struct BearerAuthLayer {
    session: Arc<dyn SessionStore>,
}

impl BearerAuthLayer {
    pub fn new(session: Arc<dyn SessionStore>) -> Self {
        Self { session }
    }
}

impl<S> Layer<S> for BearerAuthLayer {
    type Service = BearerAuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        BearerAuthService {
            inner,
            session: self.session.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct BearerAuthService<S> {
    inner: S,
    session: Arc<dyn SessionStore>,
}

impl<S, ReqBody> Service<Request<ReqBody>> for BearerAuthService<S>
where
    S: Service<Request<ReqBody>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        match self.session.load() {
            Ok(Some(token)) if !token.is_empty() => {
                if let Ok(val) = HeaderValue::from_str(&format!("Bearer {}", token)) {
                    req.headers_mut().insert(http::header::AUTHORIZATION, val);
                }
            }
            Ok(_) => {}
            Err(e) => log::warn!("Could not read session token: {}", e),
        }
        self.inner.call(req)
    }
}
