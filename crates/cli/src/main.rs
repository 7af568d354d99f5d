//! Lunchly CLI - Database migrations and front-of-house tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! lunchly migrate
//!
//! # Load demo customers and reservations
//! lunchly seed
//!
//! # Look up customers
//! lunchly customers list
//! lunchly customers search dia
//! lunchly customers top --limit 5
//! lunchly customers show 3
//!
//! # Book a table
//! lunchly reservations add 3 --start-at 2026-10-16T19:30:00Z --guests 4 --notes "window"
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Insert demo data
//! - `customers` - List, search, rank, show, add, and edit customers
//! - `reservations` - List, show, add, and edit reservations

#![cfg_attr(not(test), forbid(unsafe_code))]

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use lunchly::models::Customer;
use lunchly::{CustomerId, ReservationId};

mod commands;

use commands::Output;

#[derive(Parser)]
#[command(name = "lunchly")]
#[command(author, version, about = "Lunchly restaurant reservation tools")]
struct Cli {
    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Insert demo customers and reservations
    Seed,
    /// Manage customers
    Customers {
        #[command(subcommand)]
        action: CustomerAction,
    },
    /// Manage reservations
    Reservations {
        #[command(subcommand)]
        action: ReservationAction,
    },
}

#[derive(Subcommand)]
enum CustomerAction {
    /// List all customers by last name
    List,
    /// Search customers by first or last name
    Search {
        /// Case-insensitive name fragment
        #[arg(default_value = "")]
        term: String,
    },
    /// Show customers with the most reservations
    Top {
        /// Maximum number of customers to show
        #[arg(short, long, default_value_t = lunchly::db::DEFAULT_TOP_LIMIT)]
        limit: i64,
    },
    /// Show one customer with their reservations
    Show {
        /// Customer ID
        id: CustomerId,
    },
    /// Add a new customer
    Add {
        /// Given name
        #[arg(short, long)]
        first_name: String,

        /// Family name
        #[arg(short, long)]
        last_name: String,

        /// Contact phone number
        #[arg(short, long)]
        phone: Option<String>,

        /// Free-text notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Edit an existing customer
    Update {
        /// Customer ID
        id: CustomerId,

        /// New given name
        #[arg(short, long)]
        first_name: Option<String>,

        /// New family name
        #[arg(short, long)]
        last_name: Option<String>,

        /// New phone number (pass an empty string to clear)
        #[arg(short, long)]
        phone: Option<String>,

        /// New notes (pass an empty string to clear)
        #[arg(short, long)]
        notes: Option<String>,
    },
}

#[derive(Subcommand)]
enum ReservationAction {
    /// List a customer's reservations
    List {
        /// Customer ID
        customer_id: CustomerId,
    },
    /// Show one reservation
    Show {
        /// Reservation ID
        id: ReservationId,
    },
    /// Book a table for a customer
    Add {
        /// Customer ID
        customer_id: CustomerId,

        /// Arrival time (RFC 3339, e.g. 2026-10-16T19:30:00Z)
        #[arg(short, long)]
        start_at: DateTime<Utc>,

        /// Party size (at least 1)
        #[arg(short, long)]
        guests: i32,

        /// Free-text notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Change time, party size, or notes of a reservation
    Update {
        /// Reservation ID
        id: ReservationId,

        /// New arrival time (RFC 3339)
        #[arg(short, long)]
        start_at: Option<DateTime<Utc>>,

        /// New party size (at least 1)
        #[arg(short, long)]
        guests: Option<i32>,

        /// New notes (pass an empty string to clear)
        #[arg(short, long)]
        notes: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "lunchly=info,lunchly_cli=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let output = if cli.json { Output::Json } else { Output::Text };

    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::run().await?,
        Commands::Customers { action } => {
            let pool = commands::connect().await?;
            match action {
                CustomerAction::List => commands::customers::list(&pool, output).await?,
                CustomerAction::Search { term } => {
                    commands::customers::search(&pool, &term, output).await?;
                }
                CustomerAction::Top { limit } => {
                    commands::customers::top(&pool, limit, output).await?;
                }
                CustomerAction::Show { id } => commands::customers::show(&pool, id, output).await?,
                CustomerAction::Add {
                    first_name,
                    last_name,
                    phone,
                    notes,
                } => {
                    let customer = Customer::new(first_name, last_name, phone, notes);
                    commands::customers::add(&pool, customer, output).await?;
                }
                CustomerAction::Update {
                    id,
                    first_name,
                    last_name,
                    phone,
                    notes,
                } => {
                    let changes = commands::customers::CustomerChanges {
                        first_name,
                        last_name,
                        phone,
                        notes,
                    };
                    commands::customers::update(&pool, id, changes, output).await?;
                }
            }
        }
        Commands::Reservations { action } => {
            let pool = commands::connect().await?;
            match action {
                ReservationAction::List { customer_id } => {
                    commands::reservations::list(&pool, customer_id, output).await?;
                }
                ReservationAction::Show { id } => {
                    commands::reservations::show(&pool, id, output).await?;
                }
                ReservationAction::Add {
                    customer_id,
                    start_at,
                    guests,
                    notes,
                } => {
                    commands::reservations::add(&pool, customer_id, start_at, guests, notes, output)
                        .await?;
                }
                ReservationAction::Update {
                    id,
                    start_at,
                    guests,
                    notes,
                } => {
                    let changes = commands::reservations::ReservationChanges {
                        start_at,
                        guests,
                        notes,
                    };
                    commands::reservations::update(&pool, id, changes, output).await?;
                }
            }
        }
    }
    Ok(())
}
