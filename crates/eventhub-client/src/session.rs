//! Session credential storage.
//!
//! The gateway reads the bearer token through [`SessionStore`] before every
//! request and clears it on a 401. Hosts choose the backing store:
//! [`MemorySessionStore`] for tests and embedding, [`FileSessionStore`] for
//! a credential that survives process restarts.

use eventhub_types::ConfigError;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Abstract credential store injected into the gateway.
///
/// `get` must be cheap and must not block on I/O: it runs on every request.
pub trait SessionStore: Send + Sync {
    /// Current bearer token, if authenticated.
    fn get(&self) -> Option<String>;

    /// Replace (or with `None`, delete) the bearer token.
    fn set(&self, token: Option<String>);

    /// Delete the token only if it still equals `expected`.
    ///
    /// Returns `true` when the stored token matched (and is now cleared).
    /// Stores shared across threads should override this to make the
    /// compare and the clear a single step.
    fn clear_if(&self, expected: Option<&str>) -> bool {
        if self.get().as_deref() == expected {
            self.set(None);
            true
        } else {
            false
        }
    }

    /// Cached profile JSON. Managed by callers, never read by the gateway.
    fn cached_user(&self) -> Option<Value> {
        None
    }

    fn set_cached_user(&self, _user: Option<Value>) {}
}

/// Persisted shape of a session: the `token` and `user` keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Value>,
}

/// In-process store. Nothing outlives the value.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    state: Mutex<SessionState>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self { state: Mutex::new(SessionState { token: Some(token.into()), user: None }) }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Option<String> {
        self.state.lock().token.clone()
    }

    fn set(&self, token: Option<String>) {
        self.state.lock().token = token;
    }

    fn clear_if(&self, expected: Option<&str>) -> bool {
        let mut state = self.state.lock();
        if state.token.as_deref() == expected {
            state.token = None;
            true
        } else {
            false
        }
    }

    fn cached_user(&self) -> Option<Value> {
        self.state.lock().user.clone()
    }

    fn set_cached_user(&self, user: Option<Value>) {
        self.state.lock().user = user;
    }
}

/// JSON-file backed store.
///
/// The file is read once at [`open`](Self::open); afterwards the in-memory
/// copy is authoritative and every mutation is written through atomically
/// (temp file + rename). Write failures are logged, not surfaced: a session
/// that cannot be persisted still works for the lifetime of the process.
///
/// Writes use blocking `std::fs` calls inside `set`/`set_cached_user`, so a
/// login or logout briefly blocks the calling task. The file is tiny and
/// only written on those transitions.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    state: Mutex<SessionState>,
}

impl FileSessionStore {
    /// `<data_dir>/eventhub/session.json`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::data_dir()
            .map(|dir| dir.join("eventhub").join("session.json"))
            .ok_or_else(|| ConfigError::DataDirUnavailable {
                message: "no platform data directory".to_string(),
            })
    }

    /// Loads the session at `path`. A missing file is an empty session; an
    /// unreadable or corrupt one is logged and treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("Discarding corrupt session file {}: {}", path.display(), e);
                SessionState::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => SessionState::default(),
            Err(e) => {
                tracing::warn!("Failed to read session file {}: {}", path.display(), e);
                SessionState::default()
            },
        };
        Self { path, state: Mutex::new(state) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, state: &SessionState) {
        if let Err(e) = write_atomic(&self.path, state) {
            tracing::error!("Failed to persist session to {}: {}", self.path.display(), e);
        }
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Option<String> {
        self.state.lock().token.clone()
    }

    fn set(&self, token: Option<String>) {
        let mut state = self.state.lock();
        state.token = token;
        self.persist(&state);
    }

    fn clear_if(&self, expected: Option<&str>) -> bool {
        let mut state = self.state.lock();
        if state.token.as_deref() != expected {
            return false;
        }
        state.token = None;
        self.persist(&state);
        true
    }

    fn cached_user(&self) -> Option<Value> {
        self.state.lock().user.clone()
    }

    fn set_cached_user(&self, user: Option<Value>) {
        let mut state = self.state.lock();
        state.user = user;
        self.persist(&state);
    }
}

fn write_atomic(path: &Path, state: &SessionState) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    let temp_path = path.with_extension("json.tmp");
    std::fs::write(&temp_path, json)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&temp_path, path)
}
