//! `stay` CLI — check availability and edit bookings in a property catalog.
//!
//! ## Usage
//!
//! ```sh
//! # Nights between two dates
//! stay nights 12-18-2023 12-23-2023
//!
//! # Would a stay at property 1 collide with an existing booking?
//! stay check -c hosts.json -p 1 12-20-2023 12-25-2023
//!
//! # Same check while editing booking 2 (its own dates are ignored)
//! stay check -c hosts.json -p 1 12-20-2023 12-25-2023 --exclude 2
//!
//! # Days the date picker must disable, and what is still free
//! stay blocked -c hosts.json -p 1 12-01-2023 12-31-2023 --today 12-01-2023
//! stay free -c hosts.json -p 1 12-01-2023 12-31-2023 --nights 3
//!
//! # Book, move, or cancel; the updated catalog goes to stdout or -o
//! stay book -c hosts.json -p 1 12-24-2023 12-27-2023 -o hosts.json
//! stay reschedule -c hosts.json -p 1 3 12-25-2023 12-28-2023
//! stay cancel -c hosts.json -p 1 3
//! ```
//!
//! Saved catalogs carry each booking's id in `bookingIds`, so the id `stay book`
//! prints keeps working against the file it wrote. Listings without ids get
//! them in catalog order on load; `stay list` shows them.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Read};
use std::process;
use stay_engine::range::CANONICAL_FORMAT;
use stay_engine::{
    export_catalog, load_catalog, normalize, parse_date, AvailabilityStore, BookingId, Clock,
    DateRange, PropertyId, StayError,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stay", version, about = "Property booking availability CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Pin "today" instead of reading the clock (any accepted date layout)
    #[arg(long, global = true)]
    today: Option<String>,

    /// IANA timezone in which "today" is evaluated (default: host local time)
    #[arg(long, global = true, conflicts_with = "today")]
    timezone: Option<String>,

    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// The catalog file and the property within it.
#[derive(Args)]
struct Target {
    /// Catalog JSON file (reads from stdin if omitted)
    #[arg(short, long)]
    catalog: Option<String>,
    /// Property (host) id
    #[arg(short, long)]
    property: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the number of nights between two dates
    Nights { start: String, end: String },
    /// Check a stay against existing bookings (exit status 1 on conflict)
    Check {
        #[command(flatten)]
        target: Target,
        start: String,
        end: String,
        /// Booking being edited; its current dates are ignored
        #[arg(long)]
        exclude: Option<u64>,
    },
    /// List the disabled days in a window
    Blocked {
        #[command(flatten)]
        target: Target,
        from: String,
        to: String,
    },
    /// List free spans in a window
    Free {
        #[command(flatten)]
        target: Target,
        from: String,
        to: String,
        /// Print only the earliest stay of this many nights
        #[arg(long)]
        nights: Option<u32>,
    },
    /// Price a stay at a property
    Quote {
        #[command(flatten)]
        target: Target,
        start: String,
        end: String,
    },
    /// List every property and its bookings with their ids
    List {
        /// Catalog JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        catalog: Option<String>,
    },
    /// Add a booking and write the updated catalog
    Book {
        #[command(flatten)]
        target: Target,
        start: String,
        end: String,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Move a booking to new dates and write the updated catalog
    Reschedule {
        #[command(flatten)]
        target: Target,
        booking: u64,
        start: String,
        end: String,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Remove a booking and write the updated catalog
    Cancel {
        #[command(flatten)]
        target: Target,
        booking: u64,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let clock = build_clock(cli.today.as_deref(), cli.timezone.as_deref())?;
    debug!(?clock, today = %clock.today(), "reference clock");

    match cli.command {
        Commands::Nights { start, end } => {
            let range = parse_range(&start, &end)?;
            println!("{}", range.nights());
        }
        Commands::Check {
            target,
            start,
            end,
            exclude,
        } => {
            let store = open_catalog(target.catalog.as_deref(), clock)?;
            let range = parse_range(&start, &end)?;
            let conflicts = store
                .conflicts(PropertyId(target.property), &range, exclude.map(BookingId))
                .context("Failed to check availability")?;

            if conflicts.is_empty() {
                println!("available");
            } else {
                info!(count = conflicts.len(), %range, "stay conflicts with existing bookings");
                for conflict in &conflicts {
                    println!(
                        "conflict: booking {} {} ({} shared days)",
                        conflict.booking, conflict.range, conflict.shared_days
                    );
                }
                process::exit(1);
            }
        }
        Commands::Blocked { target, from, to } => {
            let store = open_catalog(target.catalog.as_deref(), clock)?;
            let window = parse_range(&from, &to)?;
            let blocked = predicate(&store, target.property)?;
            for day in blocked.blocked_days(&window) {
                println!("{}", day.format(CANONICAL_FORMAT));
            }
        }
        Commands::Free {
            target,
            from,
            to,
            nights,
        } => {
            let store = open_catalog(target.catalog.as_deref(), clock)?;
            let window = parse_range(&from, &to)?;
            let blocked = predicate(&store, target.property)?;
            match nights {
                Some(n) => {
                    let stay = blocked.first_available(&window, n).with_context(|| {
                        format!("No stay of {} nights fits in {}", n, window)
                    })?;
                    println!("{}", stay);
                }
                None => {
                    for run in blocked.free_ranges(&window) {
                        println!("{} ({} nights)", run, run.nights());
                    }
                }
            }
        }
        Commands::Quote { target, start, end } => {
            let store = open_catalog(target.catalog.as_deref(), clock)?;
            let range = parse_range(&start, &end)?;
            let quote = store
                .quote(PropertyId(target.property), &range)
                .context("Failed to price stay")?;
            println!("nights:      {}", quote.nights);
            println!("daily price: {}", quote.daily_price);
            println!("total:       {}", quote.total_price);
        }
        Commands::List { catalog } => {
            let store = open_catalog(catalog.as_deref(), clock)?;
            for property in store.properties() {
                println!(
                    "{} {} ({}/night)",
                    property.id, property.name, property.daily_price
                );
                for (id, range) in property.bookings() {
                    println!("  #{} {} ({} nights)", id, range, range.nights());
                }
            }
        }
        Commands::Book {
            target,
            start,
            end,
            output,
        } => {
            let mut store = open_catalog(target.catalog.as_deref(), clock)?;
            let range = parse_range(&start, &end)?;
            let id = store
                .add(PropertyId(target.property), range)
                .context("Failed to add booking")?;
            info!(booking = %id, property = target.property, %range, "booked");
            eprintln!("Booked {} as booking {}", range, id);
            save_catalog(&store, output.as_deref())?;
        }
        Commands::Reschedule {
            target,
            booking,
            start,
            end,
            output,
        } => {
            let mut store = open_catalog(target.catalog.as_deref(), clock)?;
            let range = parse_range(&start, &end)?;
            store
                .update(PropertyId(target.property), BookingId(booking), range)
                .context("Failed to reschedule booking")?;
            info!(booking, property = target.property, %range, "rescheduled");
            save_catalog(&store, output.as_deref())?;
        }
        Commands::Cancel {
            target,
            booking,
            output,
        } => {
            let mut store = open_catalog(target.catalog.as_deref(), clock)?;
            let freed = store
                .remove(PropertyId(target.property), BookingId(booking))
                .context("Failed to cancel booking")?;
            info!(booking, property = target.property, range = %freed, "cancelled");
            save_catalog(&store, output.as_deref())?;
        }
    }

    Ok(())
}

/// Install a stderr fmt subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// `--today` pins the date; otherwise `--timezone` or host local time.
fn build_clock(today: Option<&str>, timezone: Option<&str>) -> Result<Clock> {
    if let Some(raw) = today {
        let date = parse_date(raw).with_context(|| format!("Invalid --today: {}", raw))?;
        return Ok(Clock::Fixed(date));
    }
    match timezone {
        Some(name) => Clock::zoned(name).context("Invalid --timezone"),
        None => Ok(Clock::Local),
    }
}

fn parse_range(start: &str, end: &str) -> Result<DateRange> {
    normalize(start, end).with_context(|| format!("Invalid dates: {} {}", start, end))
}

fn predicate(store: &AvailabilityStore, property: u64) -> Result<stay_engine::BlockedDates> {
    store
        .disabled_date_predicate(PropertyId(property))
        .ok_or(StayError::PropertyNotFound(PropertyId(property)))
        .context("No availability for property")
}

fn open_catalog(path: Option<&str>, clock: Clock) -> Result<AvailabilityStore> {
    let json = read_input(path)?;
    let store = load_catalog(&json, clock)
        .with_context(|| format!("Failed to load catalog: {}", path.unwrap_or("<stdin>")))?;
    debug!(
        properties = store.properties().count(),
        "catalog loaded"
    );
    Ok(store)
}

fn save_catalog(store: &AvailabilityStore, path: Option<&str>) -> Result<()> {
    let json = export_catalog(store).context("Failed to serialize catalog")?;
    write_output(path, &json)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
