//! Resource models for the EventHub backend.
//!
//! These mirror what the REST API sends and accepts. Field names follow the
//! backend's camelCase JSON.

mod booking;
mod event;
mod id;
mod user;

pub use booking::{Booking, BookingFilter, BookingStatus, NewBooking, StatusUpdate};
pub use event::{parse_event_date, EventDraft, EventRecord};
pub use id::ResourceId;
pub use user::{LoginRequest, LoginResponse, RegisterRequest, User, UserEnvelope};
