// File: ./src/client/middleware.rs
//! Tower middleware that stamps feed requests with our identity.
//!
//! Some channel exports (notably Airbnb) answer anonymous default agents with
//! an HTML error page, so every request carries an explicit `User-Agent` and
//! asks for `text/calendar`.
use http::Request;
use http::header::{ACCEPT, HeaderValue, USER_AGENT};
use std::task::{Context, Poll};
use tower_layer::Layer;
use tower_service::Service;

const CALENDAR_ACCEPT: &str = "text/calendar, text/plain;q=0.9, */*;q=0.1";

#[derive(Clone, Debug)]
pub struct FeedHeadersLayer {
    user_agent: Option<HeaderValue>,
}

impl FeedHeadersLayer {
    /// An agent string that is not a valid header value is left out.
    pub fn new(agent: &str) -> Self {
        let user_agent = HeaderValue::from_str(agent).ok();
        if user_agent.is_none() {
            log::warn!("Ignoring invalid user agent {:?}", agent);
        }
        Self { user_agent }
    }
}

impl<S> Layer<S> for FeedHeadersLayer {
    type Service = FeedHeadersService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        FeedHeadersService {
            inner,
            user_agent: self.user_agent.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct FeedHeadersService<S> {
    inner: S,
    user_agent: Option<HeaderValue>,
}

impl<S, ReqBody> Service<Request<ReqBody>> for FeedHeadersService<S>
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
        let headers = req.headers_mut();
        if let Some(agent) = &self.user_agent {
            headers.insert(USER_AGENT, agent.clone());
        }
        if !headers.contains_key(ACCEPT) {
            headers.insert(ACCEPT, HeaderValue::from_static(CALENDAR_ACCEPT));
        }
        self.inner.call(req)
    }
}
