//! Bookings: the user's own and the admin listing.

use crate::client::EventHubClient;
use crate::gateway::ApiCall;
use eventhub_types::{
    Booking, BookingFilter, BookingStatus, NewBooking, ResourceId, Result, StatusUpdate, User,
};
use serde_json::Value;
use std::collections::HashMap;

/// Bookings joined with their owners.
#[derive(Debug, Clone, Default)]
pub struct BookingsOverview {
    pub bookings: Vec<Booking>,
    pub owners: HashMap<ResourceId, User>,
}

impl BookingsOverview {
    pub fn owner(&self, booking: &Booking) -> Option<&User> {
        self.owners.get(&booking.user_id)
    }

    /// Bookings passing `filter`, paired with their owner.
    pub fn filtered<'a>(
        &'a self,
        filter: &'a BookingFilter,
    ) -> impl Iterator<Item = (&'a Booking, Option<&'a User>)> + 'a {
        self.bookings
            .iter()
            .map(move |b| (b, self.owner(b)))
            .filter(move |(b, owner)| filter.matches(b, *owner))
    }

    /// Count per status, in first-seen order.
    pub fn status_counts(&self) -> Vec<(BookingStatus, usize)> {
        let mut counts: Vec<(BookingStatus, usize)> = Vec::new();
        for booking in &self.bookings {
            match counts.iter_mut().find(|(status, _)| *status == booking.status) {
                Some((_, n)) => *n += 1,
                None => counts.push((booking.status.clone(), 1)),
            }
        }
        counts
    }
}

impl EventHubClient {
    /// `GET bookings`
    pub async fn list_bookings(&self) -> Result<Vec<Booking>> {
        self.call(ApiCall::get("bookings")).await
    }

    /// `POST bookings` with `{ "eventId": ... }`
    pub async fn create_booking(&self, event_id: &ResourceId) -> Result<Value> {
        let body = NewBooking { event_id: event_id.clone() };
        self.call(ApiCall::post("bookings").json(&body)).await
    }

    /// `PATCH bookings/:id/status`
    pub async fn update_booking_status(
        &self,
        id: &ResourceId,
        status: BookingStatus,
    ) -> Result<Value> {
        let body = StatusUpdate { status };
        self.call(ApiCall::patch(format!("bookings/{}/status", id)).json(&body)).await
    }

    /// `DELETE bookings/:id`
    pub async fn delete_booking(&self, id: &ResourceId) -> Result<()> {
        let _: Value = self.call(ApiCall::delete(format!("bookings/{}", id))).await?;
        Ok(())
    }

    /// Lists bookings, then resolves every distinct owner concurrently.
    pub async fn bookings_overview(&self) -> Result<BookingsOverview> {
        let bookings = self.list_bookings().await?;
        let owners = self
            .users_by_id(bookings.iter().map(|b| b.user_id.clone()))
            .await?
            .into_iter()
            .collect();
        Ok(BookingsOverview { bookings, owners })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn overview() -> BookingsOverview {
        let bookings: Vec<Booking> = serde_json::from_value(serde_json::json!([
            { "id": 1, "eventId": 10, "userId": 7, "status": "pending",
              "Event": { "id": 10, "title": "RustConf" } },
            { "id": 2, "eventId": 11, "userId": 8, "status": "confirmed",
              "Event": { "id": 11, "title": "GopherCon" } },
            { "id": 3, "eventId": 10, "userId": 8, "status": "pending" }
        ]))
        .unwrap();
        let owners = [
            serde_json::json!({ "id": 7, "firstName": "Grace", "lastName": "Hopper" }),
            serde_json::json!({ "id": 8, "firstName": "Alan", "lastName": "Kay" }),
        ]
        .into_iter()
        .map(|v| serde_json::from_value::<User>(v).unwrap())
        .map(|u| (u.id.clone().unwrap(), u))
        .collect();
        BookingsOverview { bookings, owners }
    }

    #[test]
    fn test_filtered_joins_owner() {
        let overview = overview();
        let filter = BookingFilter { search: "kay".to_string(), status: None };
        let ids: Vec<_> = overview.filtered(&filter).map(|(b, _)| b.id.clone()).collect();
        assert_eq!(ids, vec![ResourceId::Number(2), ResourceId::Number(3)]);

        let pending = BookingFilter { search: String::new(), status: Some(BookingStatus::Pending) };
        assert_eq!(overview.filtered(&pending).count(), 2);
    }

    #[test]
    fn test_status_counts() {
        assert_eq!(
            overview().status_counts(),
            vec![(BookingStatus::Pending, 2), (BookingStatus::Confirmed, 1)]
        );
    }
}
