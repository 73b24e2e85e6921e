//! The intercepted request pipeline.
//!
//! Every backend call goes through [`Gateway::send`], which:
//!
//! 1. reads the session credential and, when present, attaches
//!    `Authorization: Bearer <token>` to that request only;
//! 2. sends it under the configured deadline (and an optional caller
//!    [`CancellationToken`]);
//! 3. classifies the outcome: a decoded payload on 2xx, otherwise exactly
//!    one [`ApiError`];
//! 4. on 401, clears the credential it sent and emits
//!    [`SessionEvent::Expired`] before handing the error back.
//!
//! No retries happen here. A failed attempt is surfaced immediately.

mod normalize;

use crate::config::GatewayConfig;
use crate::session::SessionStore;
use crate::signal::{SessionEvent, SessionSignals};
use eventhub_types::{ApiError, ConfigError};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// A single backend call, described before it is sent.
#[derive(Debug, Clone)]
pub struct ApiCall {
    method: Method,
    path: String,
    body: Option<Result<Value, String>>,
    cancel: Option<CancellationToken>,
}

impl ApiCall {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), body: None, cancel: None }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attaches a JSON body. Serialization errors surface from `send` as
    /// [`ApiError::RequestSetupFailed`].
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        self.body = Some(serde_json::to_value(body).map_err(|e| e.to_string()));
        self
    }

    /// Abandons the call with [`ApiError::NoResponse`] once `token` fires.
    pub fn cancel_on(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub const fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Shared HTTP pipeline. Cheap to share behind an `Arc`.
pub struct Gateway {
    http: Client,
    api_url: String,
    session: Arc<dyn SessionStore>,
    signals: SessionSignals,
}

impl Gateway {
    pub fn new(
        config: &GatewayConfig,
        session: Arc<dyn SessionStore>,
        signals: SessionSignals,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let http = Client::builder()
            .timeout(config.timeout())
            .default_headers(config.header_map()?)
            .build()
            .map_err(|e| ConfigError::HttpClient { message: e.to_string() })?;

        Ok(Self { http, api_url: config.api_url(), session, signals })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    /// Sends `call` and decodes a 2xx body into `T`.
    pub async fn send<T: DeserializeOwned>(&self, call: ApiCall) -> Result<T, ApiError> {
        let ApiCall { method, path, body, cancel } = call;

        let token = self.session.get();
        let mut builder = self.http.request(method.clone(), self.url_for(&path));
        if let Some(token) = &token {
            builder = builder.bearer_auth(token);
        }
        match body {
            Some(Ok(json)) => builder = builder.json(&json),
            Some(Err(message)) => {
                tracing::error!(%method, %path, "request body could not be serialized: {}", message);
                return Err(ApiError::setup(message));
            },
            None => {},
        }
        let request = builder.build().map_err(|e| {
            tracing::error!(%method, %path, "request could not be built: {}", e);
            ApiError::setup(e.to_string())
        })?;

        tracing::debug!(%method, %path, authenticated = token.is_some(), "outbound request");

        let outcome = match cancel {
            Some(cancel) => tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    tracing::debug!(%method, %path, "request cancelled by caller");
                    return Err(ApiError::NoResponse { message: "Request cancelled".to_string() });
                }
                res = self.http.execute(request) => res,
            },
            None => self.http.execute(request).await,
        };

        let response = outcome.map_err(|e| {
            tracing::error!(%method, %path, "no response: {}", e);
            normalize::transport_error(&e)
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            tracing::error!(%method, %path, %status, "response body lost: {}", e);
            normalize::transport_error(&e)
        })?;

        if status.is_success() {
            return normalize::decode_success(status, &bytes);
        }

        let err = normalize::rejection(status, &bytes);
        tracing::warn!(%method, %path, %status, "request rejected: {}", err.message());
        if status == StatusCode::UNAUTHORIZED {
            self.teardown(token.as_deref(), status);
        }
        Err(err)
    }

    /// Clears the credential the rejected request carried. A newer
    /// credential stored after the request left is kept.
    fn teardown(&self, sent_with: Option<&str>, status: StatusCode) {
        if self.session.clear_if(sent_with) {
            tracing::warn!("Credential rejected, session cleared");
            self.signals.emit(SessionEvent::Expired { status: status.as_u16() });
        } else {
            tracing::info!("Ignoring 401 for a superseded credential");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStore;

    fn gateway(base_url: &str) -> Gateway {
        let config = GatewayConfig::default().with_base_url(base_url);
        Gateway::new(&config, Arc::new(MemorySessionStore::new()), SessionSignals::new()).unwrap()
    }

    #[test]
    fn test_url_joining() {
        let gw = gateway("http://localhost:5000/");
        assert_eq!(gw.api_url(), "http://localhost:5000/api");
        assert_eq!(gw.url_for("/events/3"), "http://localhost:5000/api/events/3");
        assert_eq!(gw.url_for("users/profile"), "http://localhost:5000/api/users/profile");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GatewayConfig::default().with_timeout_ms(0);
        let result =
            Gateway::new(&config, Arc::new(MemorySessionStore::new()), SessionSignals::new());
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[tokio::test]
    async fn test_unserializable_body_is_setup_failure() {
        use std::collections::HashMap;

        // JSON object keys must be strings.
        let mut body = HashMap::new();
        body.insert(vec![1u8], "x");

        let err = gateway("http://127.0.0.1:9")
            .send::<Value>(ApiCall::post("events").json(&body))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::RequestSetupFailed { .. }));
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn test_pre_cancelled_call_never_sends() {
        let token = CancellationToken::new();
        token.cancel();

        let err = gateway("http://127.0.0.1:9")
            .send::<Value>(ApiCall::get("events").cancel_on(token))
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::NoResponse { message: "Request cancelled".to_string() });
    }
}
