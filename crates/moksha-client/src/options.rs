//! Per-request options.

use reqwest::header::HeaderMap;
use reqwest::Method;
use serde::Serialize;

/// Methods the API accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestMethod {
    #[default]
    Get,
    Post,
    Patch,
    Delete,
    Put,
}

impl RequestMethod {
    pub fn is_get(self) -> bool {
        self == RequestMethod::Get
    }
}

impl From<RequestMethod> for Method {
    fn from(method: RequestMethod) -> Self {
        match method {
            RequestMethod::Get    => Method::GET,
            RequestMethod::Post   => Method::POST,
            RequestMethod::Patch  => Method::PATCH,
            RequestMethod::Delete => Method::DELETE,
            RequestMethod::Put    => Method::PUT,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: RequestMethod,
    /// Extra headers. The builder's own headers win on conflict.
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn new(method: RequestMethod) -> Self {
        Self { method, ..Default::default() }
    }

    /// Attach a JSON body.
    pub fn with_body<T: Serialize>(mut self, body: &T) -> serde_json::Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }
}
