//! Typed backend operations, one module per resource.
//!
//! Each operation issues exactly one HTTP call through the gateway (the
//! composite overviews are the documented exceptions) and returns the
//! gateway's error unchanged.

mod bookings;
mod events;
mod users;

pub use bookings::BookingsOverview;
pub use events::EventsOverview;
