// File: ./src/client/redirect.rs
//! Follows `3xx` + `Location` responses up to a fixed number of hops.
//!
//! Feed URLs handed out by booking channels often bounce through a CDN or a
//! short link before reaching the document.
use http::{Request, Response, Uri};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower_layer::Layer;
use tower_service::Service;

#[derive(Clone, Debug)]
pub struct FollowRedirectLayer {
    max_redirects: usize,
}

impl FollowRedirectLayer {
    pub fn new(max_redirects: usize) -> Self {
        Self { max_redirects }
    }
}

impl<S> Layer<S> for FollowRedirectLayer {
    type Service = FollowRedirectService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        FollowRedirectService {
            inner,
            max_redirects: self.max_redirects,
        }
    }
}

#[derive(Clone, Debug)]
pub struct FollowRedirectService<S> {
    inner: S,
    max_redirects: usize,
}

/// Resolves a `Location` header against the URI that produced it.
///
/// Absolute locations win outright. Origin-relative ones (`/path`) keep the
/// base scheme and authority. Path-relative ones replace the last segment of
/// the base path.
pub fn resolve_location(base: &Uri, location: &str) -> Option<Uri> {
    if let Ok(parsed) = location.parse::<Uri>()
        && parsed.scheme().is_some()
        && parsed.authority().is_some()
    {
        return Some(parsed);
    }

    let path_and_query = if location.starts_with('/') {
        location.to_string()
    } else {
        let base_path = base.path();
        let dir = base_path.rfind('/').map_or("/", |i| &base_path[..=i]);
        format!("{}{}", dir, location)
    };

    let mut builder = Uri::builder().path_and_query(path_and_query);
    if let Some(scheme) = base.scheme() {
        builder = builder.scheme(scheme.clone());
    }
    if let Some(authority) = base.authority() {
        builder = builder.authority(authority.clone());
    }
    builder.build().ok()
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for FollowRedirectService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: std::error::Error + Send + Sync + 'static,
    ReqBody: Clone + Send + 'static,
    ResBody: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        // The clone in `self` was driven to readiness; take it and leave a fresh one.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let max_redirects = self.max_redirects;

        Box::pin(async move {
            let mut template = req.clone();
            let mut response = inner.call(req).await?;

            for _ in 0..max_redirects {
                if !response.status().is_redirection() {
                    break;
                }
                let Some(next_uri) = response
                    .headers()
                    .get(http::header::LOCATION)
                    .and_then(|loc| loc.to_str().ok())
                    .and_then(|loc| resolve_location(template.uri(), loc))
                else {
                    break;
                };

                log::debug!("Following redirect {} -> {}", template.uri(), next_uri);
                *template.uri_mut() = next_uri;
                let next_req = template.clone();
                futures::future::poll_fn(|cx| inner.poll_ready(cx)).await?;
                response = inner.call(next_req).await?;
            }

            Ok(response)
        })
    }
}
