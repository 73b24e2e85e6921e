//! Event listing and management.

use crate::client::EventHubClient;
use crate::gateway::ApiCall;
use eventhub_types::{EventDraft, EventRecord, ResourceId, Result, User};
use serde_json::Value;
use std::collections::HashSet;

/// Everything the events listing needs, fetched in one joint round.
#[derive(Debug, Clone)]
pub struct EventsOverview {
    pub user: User,
    pub events: Vec<EventRecord>,
    /// Event ids from the bookings visible to the current user
    pub booked_event_ids: HashSet<ResourceId>,
}

impl EventsOverview {
    pub fn is_booked(&self, event: &EventRecord) -> bool {
        self.booked_event_ids.contains(&event.id)
    }
}

impl EventHubClient {
    /// `GET events`
    pub async fn list_events(&self) -> Result<Vec<EventRecord>> {
        self.call(ApiCall::get("events")).await
    }

    /// `POST events`. Returns the server's payload as-is.
    pub async fn create_event(&self, draft: &EventDraft) -> Result<Value> {
        self.call(ApiCall::post("events").json(draft)).await
    }

    /// `PUT events/:id`
    pub async fn update_event(&self, id: &ResourceId, draft: &EventDraft) -> Result<Value> {
        self.call(ApiCall::put(format!("events/{}", id)).json(draft)).await
    }

    /// `DELETE events/:id`
    pub async fn delete_event(&self, id: &ResourceId) -> Result<()> {
        let _: Value = self.call(ApiCall::delete(format!("events/{}", id))).await?;
        Ok(())
    }

    /// Profile, events and bookings fetched concurrently. All three settle
    /// before the first failure (if any) is returned.
    pub async fn events_overview(&self) -> Result<EventsOverview> {
        let (user, events, bookings) =
            futures::join!(self.profile(), self.list_events(), self.list_bookings());
        let (user, events, bookings) = (user?, events?, bookings?);

        let booked_event_ids = bookings.into_iter().map(|b| b.event_id).collect();

        Ok(EventsOverview { user, events, booked_event_ids })
    }
}
