#![doc = include_str!("../README.md")]

mod api;
mod client;
pub mod config;
pub mod gateway;
pub mod session;
pub mod signal;

pub use api::{BookingsOverview, EventsOverview};
pub use client::EventHubClient;
pub use config::GatewayConfig;
pub use gateway::{ApiCall, Gateway};
pub use session::{FileSessionStore, MemorySessionStore, SessionState, SessionStore};
pub use signal::{SessionEvent, SessionSignals};

pub use eventhub_types::{ApiError, ConfigError};
pub use tokio_util::sync::CancellationToken;
