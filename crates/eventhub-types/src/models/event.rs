//! Event model and creation payload.

use super::ResourceId;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// An event as listed by `GET events`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(alias = "_id")]
    pub id: ResourceId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Date as sent by the server; see [`EventRecord::starts_at`]
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub location: String,
    /// Owner of the event, when the backend exposes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<ResourceId>,
}

impl EventRecord {
    /// Best-effort parse of [`date`](Self::date).
    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        parse_event_date(&self.date)
    }
}

/// Body of `POST events` and `PUT events/:id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub date: String,
    pub location: String,
}

/// Accepts RFC 3339 timestamps, `datetime-local` form values
/// (`YYYY-MM-DDTHH:MM`) and bare dates.
pub fn parse_event_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().and_then(|d| d.and_hms_opt(0, 0, 0))
}
