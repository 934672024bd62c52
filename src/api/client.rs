//! Crafty Controller API client.

use super::envelope::Envelope;
use super::routes;
use super::transport::{ApiRequest, HttpTransport, RequestBody, Transport};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::types::Password;
use reqwest::Method;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, trace};
use url::Url;

/// Client for the Crafty Controller v2 API.
///
/// The client holds immutable connection settings. Logging in does not
/// change it: [`login`](Self::login) returns a token and
/// [`with_token`](Self::with_token) builds the authenticated client.
pub struct CraftyClient<T = HttpTransport> {
    base_url: Url,
    token: Option<String>,
    transport: Arc<T>,
}

impl CraftyClient<HttpTransport> {
    /// Create a client from connection settings.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config)?;
        Self::with_transport(&config.url, config.token.clone(), transport)
    }
}

impl<T: Transport> CraftyClient<T> {
    /// Create a client that sends requests through `transport`.
    pub fn with_transport(base_url: &str, token: Option<String>, transport: T) -> Result<Self> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            token,
            transport: Arc::new(transport),
        })
    }

    /// A client for the same panel that authenticates with `token`.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            base_url: self.base_url.clone(),
            token: Some(token.into()),
            transport: Arc::clone(&self.transport),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Send an authenticated request and unwrap the response envelope.
    ///
    /// Recognized panel error codes become [`Error::Panel`]; unknown codes
    /// are returned on the envelope for the caller to inspect.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<RequestBody>,
    ) -> Result<Envelope> {
        self.send(method, path, query, body, self.token.clone())
            .await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<RequestBody>,
        bearer: Option<String>,
    ) -> Result<Envelope> {
        let url = self.base_url.join(path)?;
        debug!(%method, %url, "Sending panel request");

        let request = ApiRequest {
            method,
            url,
            bearer,
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body,
        };

        let text = self.transport.send(request).await?;
        if path == routes::LOGIN_URL {
            trace!(bytes = text.len(), "Login response body withheld");
        } else {
            trace!(response = %text, "Panel response");
        }

        Envelope::parse(&text)?.check()
    }

    /// GET `path` and return its `data`.
    pub(crate) async fn get_data(&self, path: &str) -> Result<Value> {
        Ok(self.request(Method::GET, path, &[], None).await?.into_data())
    }

    pub(crate) fn json(body: Value) -> Option<RequestBody> {
        Some(RequestBody::Json(body))
    }

    /// Log in and return the issued token.
    ///
    /// The login request carries no bearer token. The client itself is left
    /// unchanged; pass the token to [`with_token`](Self::with_token).
    pub async fn login(&self, username: &str, password: &Password) -> Result<String> {
        let password = password.resolve().await?;
        let body = json!({
            "username": username,
            "password": password,
        });

        let response = self
            .send(Method::POST, routes::LOGIN_URL, &[], Self::json(body), None)
            .await?;

        let data = response
            .data
            .ok_or_else(|| Error::unexpected_response("login response carried no data"))?;

        data.get("token")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| Error::unexpected_response("login response carried no token"))
    }

    /// Invalidate every token of the logged-in user.
    ///
    /// Consumes the client so the invalidated token cannot be sent again.
    pub async fn logout(self) -> Result<Envelope> {
        let response = self
            .request(Method::POST, routes::INVALIDATE_TOKENS_URL, &[], None)
            .await?;

        if response.is_ok() {
            info!("Successfully logged out user");
            Ok(response)
        } else {
            Err(Error::unexpected_response(format!(
                "logout returned status {:?}",
                response.status
            )))
        }
    }
}

impl<T> Clone for CraftyClient<T> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            token: self.token.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T> std::fmt::Debug for CraftyClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CraftyClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}
