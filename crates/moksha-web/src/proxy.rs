//! Reverse proxy for `/api` traffic.
//!
//! The request path and query are forwarded unchanged. The outbound `Host`
//! is the upstream's own authority, hop-by-hop headers are dropped in both
//! directions and upstream redirects are handed back to the browser.

use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::{header, HeaderMap, HeaderName, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use reqwest::{redirect, Client, Url};
use thiserror::Error;
use tracing::{debug, error};

const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Upper bound on a buffered request body.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Upstream {target} unreachable: {source}")]
    Unreachable {
        target: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Upstream request to {target} failed: {source}")]
    Upstream {
        target: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Cannot build upstream URL for {0}")]
    InvalidUrl(String),

    #[error("Failed to read request body: {0}")]
    RequestBody(#[source] axum::Error),
}

impl ProxyError {
    fn from_reqwest(target: &Url, source: reqwest::Error) -> Self {
        let target = target.to_string();
        if source.is_connect() || source.is_timeout() {
            ProxyError::Unreachable { target, source }
        } else {
            ProxyError::Upstream { target, source }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Unreachable { .. } => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::RequestBody(_) => StatusCode::BAD_REQUEST,
            ProxyError::Upstream { .. } | ProxyError::InvalidUrl(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        error!("Proxy error: {self}");
        (self.status(), format!("Error occurred while trying to proxy: {self}")).into_response()
    }
}

#[derive(Debug, Clone)]
pub struct ApiProxy {
    origin: Url,
    client: Client,
}

impl ApiProxy {
    pub fn new(origin: Url, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .timeout(timeout)
            .build()?;
        Ok(Self { origin, client })
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Origin path followed by the full incoming path and query.
    pub fn upstream_url(&self, uri: &Uri) -> Result<Url, ProxyError> {
        let path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
        let joined = format!("{}{}", self.origin.as_str().trim_end_matches('/'), path_and_query);
        Url::parse(&joined).map_err(|_| ProxyError::InvalidUrl(path_and_query.to_string()))
    }

    /// Forward `request` and stream the upstream response back.
    ///
    /// The request body is buffered before sending; the response body is streamed.
    ///
    /// `uri` is the URI as the client sent it, before any prefix stripping.
    pub async fn forward(&self, uri: &Uri, request: Request) -> Result<Response, ProxyError> {
        let target = self.upstream_url(uri)?;
        let (parts, body) = request.into_parts();

        let mut headers = parts.headers;
        strip_hop_by_hop(&mut headers);
        // reqwest fills Host from the target URL.
        headers.remove(header::HOST);

        debug!(method = %parts.method, %target, "Proxying request");

        let body = to_bytes(body, MAX_BODY_BYTES).await.map_err(ProxyError::RequestBody)?;
        let mut outbound = self.client.request(parts.method, target.clone()).headers(headers);
        if !body.is_empty() {
            outbound = outbound.body(body);
        }

        let upstream = outbound
            .send()
            .await
            .map_err(|e| ProxyError::from_reqwest(&target, e))?;

        let status = upstream.status();
        let mut response_headers = upstream.headers().clone();
        strip_hop_by_hop(&mut response_headers);

        let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
        *response.status_mut() = status;
        *response.headers_mut() = response_headers;
        Ok(response)
    }
}

/// Remove connection-scoped headers, including any named in `Connection`.
fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let listed: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .filter_map(|name| HeaderName::from_bytes(name.trim().as_bytes()).ok())
        .collect();

    for name in &listed {
        headers.remove(name);
    }
    for name in HOP_BY_HOP {
        headers.remove(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn proxy(origin: &str) -> ApiProxy {
        ApiProxy::new(Url::parse(origin).unwrap(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_upstream_url_keeps_path_and_query() {
        let uri: Uri = "/api/contests?event=malhar&page=2".parse().unwrap();
        let url = proxy("http://127.0.0.1:8000").upstream_url(&uri).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/contests?event=malhar&page=2");
    }

    #[test]
    fn test_upstream_url_with_origin_path() {
        let uri: Uri = "/api/teams".parse().unwrap();
        let url = proxy("https://backend.example/v2/").upstream_url(&uri).unwrap();
        assert_eq!(url.as_str(), "https://backend.example/v2/api/teams");
    }

    #[test]
    fn test_strip_hop_by_hop_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive, x-session-hint"));
        headers.insert("keep-alive", HeaderValue::from_static("timeout=5"));
        headers.insert("x-session-hint", HeaderValue::from_static("1"));
        headers.insert(header::TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
        headers.insert(header::COOKIE, HeaderValue::from_static("csrftoken=abc"));
        headers.insert("x-csrftoken", HeaderValue::from_static("abc"));

        strip_hop_by_hop(&mut headers);

        assert!(headers.get(header::CONNECTION).is_none());
        assert!(headers.get("keep-alive").is_none());
        assert!(headers.get("x-session-hint").is_none());
        assert!(headers.get(header::TRANSFER_ENCODING).is_none());
        assert_eq!(headers[header::COOKIE], "csrftoken=abc");
        assert_eq!(headers["x-csrftoken"], "abc");
    }

    #[test]
    fn test_invalid_url_is_internal_error() {
        let err = ProxyError::InvalidUrl("/api".to_string());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
