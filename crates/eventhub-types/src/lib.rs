//! # EventHub Types
//!
//! Resource models, request payloads, and error definitions shared by the
//! EventHub gateway client and its hosts.
//!
//! - **`error`** - Normalized API error and configuration errors
//! - **`models`** - Server-owned resources (User, Event, Booking) and payloads
//!
//! ## Architecture Role
//!
//! `eventhub-types` sits at the bottom of the dependency graph:
//!
//! ```text
//!          eventhub-types (this crate)
//!                  │
//!                  ▼
//!          eventhub-client
//!                  │
//!                  ▼
//!            eventhub-cli
//! ```
//!
//! Resources are decoded leniently: the backend owns them, so nothing here
//! validates or rejects a field the server chose to send.

pub mod error;
pub mod models;

pub use error::{ApiError, ConfigError, Result};

pub use models::{
    Booking, BookingFilter, BookingStatus, EventDraft, EventRecord, LoginRequest, LoginResponse,
    NewBooking, RegisterRequest, ResourceId, StatusUpdate, User, UserEnvelope,
};
