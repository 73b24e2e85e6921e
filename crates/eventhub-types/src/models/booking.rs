//! Booking model, status, and the admin-view filter.

use super::{EventRecord, ResourceId, User};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a booking.
///
/// Unknown strings from the server are kept verbatim in [`BookingStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    Other(String),
}

impl BookingStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
            Self::Other(s) => s,
        }
    }
}

impl FromStr for BookingStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "confirmed" => Self::Confirmed,
            "cancelled" => Self::Cancelled,
            "completed" => Self::Completed,
            _ => Self::Other(s.to_string()),
        })
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BookingStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BookingStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or_default())
    }
}

/// A booking as listed by `GET bookings`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(alias = "_id")]
    pub id: ResourceId,
    pub event_id: ResourceId,
    pub user_id: ResourceId,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Server-side join of the booked event
    #[serde(rename = "Event", default, skip_serializing_if = "Option::is_none")]
    pub event: Option<EventRecord>,
}

/// Body of `POST bookings`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub event_id: ResourceId,
}

/// Body of `PATCH bookings/:id/status`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate {
    pub status: BookingStatus,
}

/// Search and status filter applied to the bookings admin listing.
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    /// Case-insensitive needle matched against owner name, owner email and event title
    pub search: String,
    /// Exact status match; `None` means all
    pub status: Option<BookingStatus>,
}

impl BookingFilter {
    pub fn matches(&self, booking: &Booking, owner: Option<&User>) -> bool {
        if let Some(status) = &self.status {
            if &booking.status != status {
                return false;
            }
        }

        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        let name = owner.map(User::full_name).unwrap_or_default();
        let email = owner.map(|u| u.email.as_str()).unwrap_or_default();
        let title = booking.event.as_ref().map(|e| e.title.as_str()).unwrap_or_default();

        [name.as_str(), email, title].iter().any(|field| field.to_lowercase().contains(&needle))
    }
}
