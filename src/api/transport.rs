//! HTTP transport seam.
//!
//! The client builds [`ApiRequest`]s and hands them to a [`Transport`]; the
//! default implementation sends them with `reqwest`.

use crate::config::ClientConfig;
use crate::error::Result;
use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Body of an outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    /// Raw text, used for server console input.
    Text(String),
}

impl RequestBody {
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Json(_) => "application/json",
            Self::Text(_) => "text/plain; charset=utf-8",
        }
    }
}

/// A fully resolved request.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    /// Bearer token; `None` for unauthenticated calls such as login.
    pub bearer: Option<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

/// Sends requests and returns the raw response text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<String>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport honoring the TLS verification flag and optional timeout.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .danger_accept_invalid_certs(!config.verify_ssl)
            .user_agent(concat!("crafty-client/", env!("CARGO_PKG_VERSION")));

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http: builder.build()?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<String> {
        let content_type = request
            .body
            .as_ref()
            .map_or("application/json", RequestBody::content_type);
        let mut builder = self
            .http
            .request(request.method, request.url)
            .header(CONTENT_TYPE, HeaderValue::from_static(content_type));

        if let Some(token) = &request.bearer {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        builder = match request.body {
            Some(RequestBody::Json(body)) => builder.json(&body),
            Some(RequestBody::Text(text)) => builder.body(text),
            None => builder,
        };

        Ok(builder.send().await?.text().await?)
    }
}
