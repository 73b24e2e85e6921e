use crate::config::GatewayConfig;
use crate::gateway::{ApiCall, Gateway};
use crate::session::{MemorySessionStore, SessionStore};
use crate::signal::{SessionEvent, SessionSignals};
use dashmap::DashMap;
use eventhub_types::{ConfigError, ResourceId, Result, User};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::broadcast;

/// High-level client for the EventHub backend.
///
/// Cloning is cheap; clones share the gateway, the session store, the
/// signal channel and the user directory.
#[derive(Clone)]
pub struct EventHubClient {
    inner: Arc<Inner>,
}

struct Inner {
    gateway: Gateway,
    session: Arc<dyn SessionStore>,
    signals: SessionSignals,
    users: DashMap<ResourceId, User>,
}

impl EventHubClient {
    pub fn new(
        config: &GatewayConfig,
        session: Arc<dyn SessionStore>,
    ) -> std::result::Result<Self, ConfigError> {
        let signals = SessionSignals::new();
        let gateway = Gateway::new(config, Arc::clone(&session), signals.clone())?;
        tracing::debug!("EventHub client targeting {}", gateway.api_url());
        Ok(Self { inner: Arc::new(Inner { gateway, session, signals, users: DashMap::new() }) })
    }

    /// Client with a process-local session.
    pub fn in_memory(config: &GatewayConfig) -> std::result::Result<Self, ConfigError> {
        Self::new(config, Arc::new(MemorySessionStore::new()))
    }

    /// Session lifecycle events: expiry (401), login, logout.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.signals.subscribe()
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.inner.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.session.get().is_some()
    }

    /// Raw pipeline access for calls not covered by the typed operations.
    pub fn gateway(&self) -> &Gateway {
        &self.inner.gateway
    }

    /// A user already present in the directory cache.
    pub fn cached_user(&self, id: &ResourceId) -> Option<User> {
        self.inner.users.get(id).map(|entry| entry.value().clone())
    }

    pub(crate) async fn call<T: DeserializeOwned>(&self, call: ApiCall) -> Result<T> {
        self.inner.gateway.send(call).await
    }

    pub(crate) fn signals(&self) -> &SessionSignals {
        &self.inner.signals
    }

    pub(crate) fn remember_user(&self, id: ResourceId, user: User) {
        self.inner.users.insert(id, user);
    }

    pub(crate) fn forget_users(&self) {
        self.inner.users.clear();
    }
}
