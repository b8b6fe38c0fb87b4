// File: src/client/core.rs
use crate::client::middleware::{FeedHeadersLayer, FeedHeadersService};
use crate::client::redirect::{FollowRedirectLayer, FollowRedirectService};
use crate::config::Config;
use crate::timeline::FeedFetcher;

use anyhow::{Context, Result, anyhow, bail};
use http::{Request, Uri};
use http_body_util::BodyExt;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use std::time::Duration;
use tower::{ServiceBuilder, ServiceExt};

type HttpsClient = Client<hyper_rustls::HttpsConnector<HttpConnector>, String>;
type FeedService = FollowRedirectService<FeedHeadersService<HttpsClient>>;

#[derive(Clone, Debug)]
pub struct FetchOptions {
    pub proxy_url: Option<String>,
    pub user_agent: String,
    pub timeout: Duration,
    pub max_redirects: usize,
}

impl FetchOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            proxy_url: config.proxy_url.clone().filter(|p| !p.trim().is_empty()),
            user_agent: config.user_agent.clone(),
            timeout: Duration::from_secs(config.timeout_secs.max(1)),
            max_redirects: config.max_redirects,
        }
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Downloads calendar feeds over HTTP(S).
#[derive(Clone, Debug)]
pub struct FeedClient {
    service: FeedService,
    proxy_url: Option<String>,
    timeout: Duration,
}

impl FeedClient {
    pub fn new(options: &FetchOptions) -> Result<Self> {
        let mut root_store = rustls::RootCertStore::empty();
        let result = rustls_native_certs::load_native_certs();
        for err in &result.errors {
            log::debug!("Skipping unreadable system certificate: {}", err);
        }
        root_store.add_parsable_certificates(result.certs);
        if root_store.is_empty() {
            // Plain http feeds and proxies keep working.
            log::warn!("No valid system certificates found; https feeds will fail.");
        }

        let tls_config = rustls::ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        let https_connector = HttpsConnectorBuilder::new()
            .with_tls_config(tls_config)
            .https_or_http()
            .enable_http1()
            .build();

        let http_client: HttpsClient = Client::builder(TokioExecutor::new()).build(https_connector);

        let service = ServiceBuilder::new()
            .layer(FollowRedirectLayer::new(options.max_redirects))
            .layer(FeedHeadersLayer::new(&options.user_agent))
            .service(http_client);

        Ok(Self {
            service,
            proxy_url: options.proxy_url.clone(),
            timeout: options.timeout,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&FetchOptions::from_config(config))
    }

    /// The URI actually requested for `locator`, after `webcal://` rewriting
    /// and proxy wrapping.
    pub fn request_uri(&self, locator: &str) -> Result<Uri> {
        let locator = locator.trim();
        let direct = match locator.strip_prefix("webcal://") {
            Some(rest) => format!("https://{}", rest),
            None => locator.to_string(),
        };

        let target = match &self.proxy_url {
            Some(proxy) => {
                let sep = if proxy.contains('?') { '&' } else { '?' };
                format!("{}{}url={}", proxy, sep, urlencoding::encode(&direct))
            }
            None => direct,
        };

        let uri: Uri = target
            .parse()
            .with_context(|| format!("Invalid feed URL '{}'", target))?;
        if uri.scheme().is_none() || uri.authority().is_none() {
            bail!("Feed URL '{}' is not absolute", target);
        }
        Ok(uri)
    }

    async fn send(&self, uri: Uri) -> Result<String> {
        let request = Request::get(uri.clone()).body(String::new())?;
        let response = self
            .service
            .clone()
            .oneshot(request)
            .await
            .with_context(|| format!("Request to {} failed", uri))?;

        let status = response.status();
        if !status.is_success() {
            bail!("Failed to fetch feed: {}", status);
        }

        let bytes = response
            .into_body()
            .collect()
            .await
            .context("Failed to read feed body")?
            .to_bytes();
        log::debug!("Fetched {} byte(s) from {}", bytes.len(), uri);
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Fetches the document behind `locator`. Non-2xx statuses, transport
    /// errors and timeouts are all errors.
    pub async fn fetch_text(&self, locator: &str) -> Result<String> {
        let uri = self.request_uri(locator)?;
        tokio::time::timeout(self.timeout, self.send(uri))
            .await
            .map_err(|_| anyhow!("Timed out after {:?} fetching {}", self.timeout, locator))?
    }
}

impl FeedFetcher for FeedClient {
    async fn fetch(&self, locator: &str) -> Result<String> {
        self.fetch_text(locator).await
    }
}
