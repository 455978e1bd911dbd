//! API client with a shared cookie jar.

use std::sync::Arc;

use moksha_security::{csrf_token_from_cookie_header, PayloadCipher, SecurityError, CSRF_HEADER};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Request, Response, Url};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::options::RequestOptions;

pub const DEFAULT_BASE_URL: &str = "https://api.mokshaix.in";

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http: Client,
    jar: Arc<Jar>,
    cipher: Option<PayloadCipher>,
}

impl ApiClient {
    /// `cipher` may be `None`; requests with a body then fail with `MissingSecret`.
    pub fn new(base_url: &str, cipher: Option<PayloadCipher>) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| ClientError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        let jar = Arc::new(Jar::default());
        let http = Client::builder().cookie_provider(jar.clone()).build()?;

        Ok(Self { base_url, http, jar, cipher })
    }

    /// Client for the public API, reading the payload secret from the environment.
    pub fn from_env() -> Result<Self> {
        let cipher = match PayloadCipher::from_env() {
            Ok(cipher) => Some(cipher),
            Err(SecurityError::MissingSecret) => None,
            Err(e) => return Err(e.into()),
        };
        Self::new(DEFAULT_BASE_URL, cipher)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Cookies received from the API, sent back on every request.
    pub fn cookie_jar(&self) -> &Arc<Jar> {
        &self.jar
    }

    pub fn csrf_token(&self) -> Option<String> {
        let cookies = self.jar.cookies(&self.base_url)?;
        csrf_token_from_cookie_header(cookies.to_str().ok()?)
    }

    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let url = format!(
            "{}/api/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/'),
        );
        Url::parse(&url).map_err(|e| ClientError::InvalidUrl { url, reason: e.to_string() })
    }

    pub fn create_request(&self, path: &str, options: RequestOptions) -> Result<Request> {
        let RequestOptions { method, headers: extra, body } = options;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));

        if !method.is_get() {
            if let Some(token) = self.csrf_token() {
                let value = HeaderValue::from_str(&token)
                    .map_err(|_| ClientError::InvalidHeader(CSRF_HEADER))?;
                headers.insert(CSRF_HEADER, value);
            }
        }

        // Caller headers first so the builder's own headers override them.
        let mut merged = extra;
        for (name, value) in headers.iter() {
            merged.insert(name.clone(), value.clone());
        }

        let mut builder = self
            .http
            .request(method.into(), self.endpoint(path)?)
            .headers(merged);

        // A JSON null is treated as no body at all.
        if let Some(body) = body.filter(|body| !body.is_null()) {
            let cipher = self.cipher.as_ref().ok_or_else(|| {
                tracing::error!("Refusing to build request for {path}: payload secret is not defined");
                SecurityError::MissingSecret
            })?;
            builder = builder.body(cipher.encrypt_json(&body)?);
        }

        let request = builder.build()?;
        debug!(method = %request.method(), url = %request.url(), "Built API request");
        Ok(request)
    }

    pub async fn send(&self, request: Request) -> Result<Response> {
        Ok(self.http.execute(request).await?)
    }

    /// Build and send in one step.
    pub async fn fetch(&self, path: &str, options: RequestOptions) -> Result<Response> {
        let request = self.create_request(path, options)?;
        self.send(request).await
    }
}
