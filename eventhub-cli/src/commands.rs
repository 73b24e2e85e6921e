use anyhow::{Context, Result};
use colored::Colorize;

use eventhub_client::EventHubClient;
use eventhub_types::{
    BookingFilter, EventDraft, EventRecord, LoginRequest, RegisterRequest, ResourceId, User,
};

use crate::cli::{BookingCommands, EventCommands, UserCommands};
use crate::output;

pub async fn register(
    client: &EventHubClient,
    request: RegisterRequest,
    json: bool,
) -> Result<()> {
    let payload = client.register(&request).await.context("registration failed")?;
    if json {
        return output::print_json(&payload);
    }
    println!("{} {}", "Registered".green(), request.email);
    println!("Run `eventhub login --email {}` to sign in.", request.email);
    Ok(())
}

pub async fn login(client: &EventHubClient, request: LoginRequest, json: bool) -> Result<()> {
    let response = client.login(&request).await.context("login failed")?;
    if json {
        return output::print_json(&response);
    }
    if response.token.is_none() {
        anyhow::bail!("server accepted the login but issued no token");
    }
    let name = response.profile().map_or_else(|| request.email.clone(), |u| u.full_name());
    println!("{} {}", "Signed in as".green(), name);
    Ok(())
}

pub fn logout(client: &EventHubClient) {
    client.logout();
    println!("{}", "Signed out.".green());
}

pub async fn profile(client: &EventHubClient, json: bool) -> Result<()> {
    let user = client.profile().await.context("could not load profile")?;
    // Refresh the cached profile the way a successful login does.
    client.session().set_cached_user(serde_json::to_value(&user).ok());
    if json {
        return output::print_json(&user);
    }
    output::print_user(&user);
    Ok(())
}

pub fn status(client: &EventHubClient, session_file: &std::path::Path, json: bool) -> Result<()> {
    let cached = client.session().cached_user();
    let cached_name = cached
        .as_ref()
        .and_then(|v| serde_json::from_value::<User>(v.clone()).ok())
        .map(|u| u.full_name());

    if json {
        return output::print_json(&serde_json::json!({
            "api_url": client.gateway().api_url(),
            "session_file": session_file,
            "authenticated": client.is_authenticated(),
            "user": cached,
        }));
    }

    println!("{} {}", "API:    ".bold(), client.gateway().api_url());
    println!("{} {}", "Session:".bold(), session_file.display());
    if client.is_authenticated() {
        let who = cached_name.unwrap_or_else(|| "unknown user".to_string());
        println!("{} {}", "Status: ".bold(), format!("signed in ({})", who).green());
    } else {
        println!("{} {}", "Status: ".bold(), "signed out".yellow());
    }
    Ok(())
}

pub async fn handle_event_command(
    client: &EventHubClient,
    cmd: EventCommands,
    json: bool,
) -> Result<()> {
    match cmd {
        EventCommands::List { mine: false } => {
            let events = client.list_events().await.context("could not load events")?;
            if json {
                return output::print_json(&events);
            }
            output::print_events(&events, None);
        },
        EventCommands::List { mine: true } => {
            let overview = client.events_overview().await.context("could not load events")?;
            if json {
                return output::print_json(&serde_json::json!({
                    "events": overview.events,
                    "booked_event_ids": overview.booked_event_ids,
                }));
            }
            println!("Events for {}", overview.user.full_name().bold());
            output::print_events(&overview.events, Some(&|e: &EventRecord| overview.is_booked(e)));
        },
        EventCommands::Create { title, description, date, location } => {
            let draft = EventDraft { title, description, date, location };
            let payload = client.create_event(&draft).await.context("could not create event")?;
            if json {
                return output::print_json(&payload);
            }
            println!("{} {}", "Event created:".green(), draft.title);
        },
        EventCommands::Update { id, title, description, date, location } => {
            let mut draft = if [&title, &description, &date, &location].iter().all(|f| f.is_some())
            {
                EventDraft::default()
            } else {
                current_draft(client, &id).await?
            };
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(description) = description {
                draft.description = description;
            }
            if let Some(date) = date {
                draft.date = date;
            }
            if let Some(location) = location {
                draft.location = location;
            }
            let payload =
                client.update_event(&id, &draft).await.context("could not update event")?;
            if json {
                return output::print_json(&payload);
            }
            println!("{} {}", "Event updated:".green(), id);
        },
        EventCommands::Delete { id } => {
            client.delete_event(&id).await.context("could not delete event")?;
            println!("{} {}", "Event deleted:".green(), id);
        },
    }
    Ok(())
}

/// Existing values of event `id`, used to fill fields omitted from an update.
async fn current_draft(client: &EventHubClient, id: &ResourceId) -> Result<EventDraft> {
    let events = client.list_events().await.context("could not load events")?;
    let event = events
        .into_iter()
        .find(|e| &e.id == id)
        .with_context(|| format!("event {} not found", id))?;
    Ok(EventDraft {
        title: event.title,
        description: event.description,
        date: event.date,
        location: event.location,
    })
}

pub async fn handle_booking_command(
    client: &EventHubClient,
    cmd: BookingCommands,
    json: bool,
) -> Result<()> {
    match cmd {
        BookingCommands::List => {
            let bookings = client.list_bookings().await.context("could not load bookings")?;
            if json {
                return output::print_json(&bookings);
            }
            output::print_bookings(&bookings);
        },
        BookingCommands::Book { event_id } => {
            let payload =
                client.create_booking(&event_id).await.context("could not book event")?;
            if json {
                return output::print_json(&payload);
            }
            println!("{} {}", "Booked event".green(), event_id);
        },
        BookingCommands::Status { id, status } => {
            let payload = client
                .update_booking_status(&id, status.clone())
                .await
                .context("could not update booking")?;
            if json {
                return output::print_json(&payload);
            }
            println!("{} {} -> {}", "Booking".green(), id, status);
        },
        BookingCommands::Delete { id } => {
            client.delete_booking(&id).await.context("could not delete booking")?;
            println!("{} {}", "Booking deleted:".green(), id);
        },
        BookingCommands::Overview { search, status } => {
            let overview = client.bookings_overview().await.context("could not load bookings")?;
            let filter = BookingFilter { search, status };
            let rows: Vec<_> = overview.filtered(&filter).collect();
            if json {
                let bookings: Vec<_> = rows
                    .iter()
                    .map(|(b, owner)| serde_json::json!({ "booking": b, "owner": owner }))
                    .collect();
                return output::print_json(&bookings);
            }
            output::print_overview(&overview, &rows);
        },
    }
    Ok(())
}

pub async fn handle_user_command(
    client: &EventHubClient,
    cmd: UserCommands,
    json: bool,
) -> Result<()> {
    match cmd {
        UserCommands::Show { id } => {
            let user = client.user(&id).await.with_context(|| format!("could not load user {}", id))?;
            if json {
                return output::print_json(&user);
            }
            output::print_user(&user);
        },
    }
    Ok(())
}
