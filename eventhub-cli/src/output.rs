//! Table rendering for command output.

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use eventhub_client::BookingsOverview;
use eventhub_types::{Booking, BookingStatus, EventRecord, User};

pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn format_date(raw: &str) -> String {
    eventhub_types::models::parse_event_date(raw)
        .map(|dt| dt.format("%b %e, %Y %H:%M").to_string())
        .unwrap_or_else(|| if raw.is_empty() { "-".to_string() } else { raw.to_string() })
}

fn status_cell(status: &BookingStatus) -> Cell {
    let color = match status {
        BookingStatus::Confirmed => Color::Green,
        BookingStatus::Pending => Color::Yellow,
        BookingStatus::Cancelled => Color::Red,
        BookingStatus::Completed => Color::Blue,
        BookingStatus::Other(_) => Color::Grey,
    };
    Cell::new(status.as_str()).fg(color)
}

pub fn print_user(user: &User) {
    println!("{} {}", "Name: ".bold(), user.full_name());
    println!("{} {}", "Email:".bold(), user.email);
    if let Some(id) = &user.id {
        println!("{} {}", "Id:   ".bold(), id);
    }
    if let Some(role) = &user.role {
        println!("{} {}", "Role: ".bold(), role);
    }
}

/// `booked` marks events the current user holds a booking for.
pub fn print_events(events: &[EventRecord], booked: Option<&dyn Fn(&EventRecord) -> bool>) {
    if events.is_empty() {
        println!("{}", "No events found.".yellow());
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    let mut header = vec!["Id", "Title", "Date", "Location"];
    if booked.is_some() {
        header.push("Booked");
    }
    table.set_header(header);

    for event in events {
        let mut row = vec![
            Cell::new(&event.id),
            Cell::new(&event.title),
            Cell::new(format_date(&event.date)),
            Cell::new(&event.location),
        ];
        if let Some(is_booked) = booked {
            row.push(if is_booked(event) {
                Cell::new("yes").fg(Color::Green)
            } else {
                Cell::new("-")
            });
        }
        table.add_row(row);
    }

    println!("{table}");
    println!("\n{} events total", events.len());
}

pub fn print_bookings(bookings: &[Booking]) {
    if bookings.is_empty() {
        println!("{}", "No bookings found.".yellow());
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Id", "Event", "Date", "Status", "Booked at"]);

    for booking in bookings {
        let (title, date) = booking
            .event
            .as_ref()
            .map(|e| (e.title.clone(), format_date(&e.date)))
            .unwrap_or_else(|| (format!("#{}", booking.event_id), "-".to_string()));
        table.add_row(vec![
            Cell::new(&booking.id),
            Cell::new(title),
            Cell::new(date),
            status_cell(&booking.status),
            Cell::new(format_date(booking.created_at.as_deref().unwrap_or_default())),
        ]);
    }

    println!("{table}");
}

pub fn print_overview(overview: &BookingsOverview, rows: &[(&Booking, Option<&User>)]) {
    let summary = overview
        .status_counts()
        .iter()
        .map(|(status, n)| format!("{} {}", n, status))
        .collect::<Vec<_>>()
        .join(", ");

    if rows.is_empty() {
        println!("{}", "No bookings match.".yellow());
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Id", "Owner", "Email", "Event", "Status"]);
        for &(booking, owner) in rows {
            let title = booking.event.as_ref().map_or("-", |e| e.title.as_str());
            table.add_row(vec![
                Cell::new(&booking.id),
                Cell::new(owner.map(User::full_name).unwrap_or_else(|| "-".to_string())),
                Cell::new(owner.map_or("-", |u| u.email.as_str())),
                Cell::new(title),
                status_cell(&booking.status),
            ]);
        }
        println!("{table}");
    }

    println!(
        "\n{} of {} bookings shown ({})",
        rows.len(),
        overview.bookings.len(),
        if summary.is_empty() { "none".to_string() } else { summary }
    );
}
