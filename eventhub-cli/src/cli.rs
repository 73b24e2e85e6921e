use clap::{Parser, Subcommand};
use eventhub_types::{BookingStatus, ResourceId};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "eventhub",
    about = "EventHub - browse events and manage bookings from the terminal",
    version = env!("CARGO_PKG_VERSION"),
    author,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Backend origin (overrides API_BASE_URL)")]
    pub base_url: Option<String>,

    #[arg(long, global = true, help = "Request deadline in ms (overrides API_TIMEOUT)")]
    pub timeout_ms: Option<u64>,

    #[arg(long, global = true, env = "EVENTHUB_SESSION_FILE", help = "Session file path")]
    pub session_file: Option<PathBuf>,

    #[arg(short, long, global = true, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    #[arg(long, global = true, help = "Output as JSON")]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create a new account")]
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "EVENTHUB_PASSWORD", hide_env_values = true)]
        password: String,
    },

    #[command(about = "Sign in and store the session credential")]
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "EVENTHUB_PASSWORD", hide_env_values = true)]
        password: String,
    },

    #[command(about = "Forget the stored credential (local only)")]
    Logout,

    #[command(about = "Show the signed-in user's profile")]
    Profile,

    #[command(about = "Show session and backend settings")]
    Status,

    #[command(subcommand, about = "Browse and manage events")]
    Events(EventCommands),

    #[command(subcommand, about = "Book events and administer bookings")]
    Bookings(BookingCommands),

    #[command(subcommand, about = "Look up users")]
    Users(UserCommands),
}

#[derive(Subcommand)]
pub enum EventCommands {
    #[command(about = "List upcoming events")]
    List {
        #[arg(long, help = "Mark events you have already booked (requires login)")]
        mine: bool,
    },

    #[command(about = "Create an event")]
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, help = "e.g. 2025-09-01T18:30")]
        date: String,
        #[arg(long)]
        location: String,
    },

    #[command(about = "Update an event; omitted fields keep their current value")]
    Update {
        id: ResourceId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },

    #[command(about = "Delete an event")]
    Delete { id: ResourceId },
}

#[derive(Subcommand)]
pub enum BookingCommands {
    #[command(about = "List bookings visible to you")]
    List,

    #[command(about = "Book a seat at an event")]
    Book {
        #[arg(help = "Event id")]
        event_id: ResourceId,
    },

    #[command(about = "Change a booking's status")]
    Status {
        id: ResourceId,
        #[arg(help = "pending, confirmed, cancelled or completed")]
        status: BookingStatus,
    },

    #[command(about = "Delete (unregister) a booking")]
    Delete { id: ResourceId },

    #[command(about = "Bookings with their owners, filtered")]
    Overview {
        #[arg(short, long, default_value = "", help = "Match owner name, email or event title")]
        search: String,
        #[arg(long, help = "Only bookings with this status")]
        status: Option<BookingStatus>,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Show a user by id")]
    Show { id: ResourceId },
}
