//! CLI frontend for the Tianming cultivation RPG engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tianming",
    about = "Tianming — a narrative cultivation RPG engine",
    version,
    propagate_version = true
)]
struct Cli {
    /// Path of the JSON game store
    #[arg(short, long, default_value = "tianming.json", global = true)]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the game store and seed the starter catalog
    Init,

    /// Create a character profile
    Create {
        /// Unique display name
        username: String,

        /// Narrative locale: ko, en, zh
        #[arg(short, long, default_value = "ko")]
        locale: String,
    },

    /// Show a character profile
    Profile {
        /// The character's username
        username: String,
    },

    /// Run a timed training session against one stat
    Train {
        /// The character's username
        username: String,

        /// Stat to train (e.g. clarity, qiGeneration)
        stat: String,

        /// Session length in minutes
        #[arg(short, long, default_value = "30")]
        minutes: u32,

        /// Base experience per minute
        #[arg(short, long, default_value = "2.0")]
        rate: f64,
    },

    /// Deposit a raw experience amount into one stat
    Gain {
        /// The character's username
        username: String,

        /// Stat to credit
        stat: String,

        /// Experience amount
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },

    /// List the event archetype catalog
    Catalog,

    /// Install event archetypes from a JSON file
    Seed {
        /// File holding a JSON array of archetype definitions
        file: PathBuf,
    },

    /// Offer an event from the catalog
    Event {
        /// The character's username
        username: String,

        /// Archetype id (see `catalog`)
        event: String,

        /// Override the profile's locale for this event
        #[arg(short, long)]
        locale: Option<String>,
    },

    /// Resolve an option of an offered event
    Resolve {
        /// The character's username
        username: String,

        /// Session id printed by `event`
        session: String,

        /// Option id to take
        option: String,
    },

    /// Show recent resolutions, newest first
    History {
        /// The character's username
        username: String,

        /// Maximum records to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show the character's fate, or draw one
    Fate {
        /// The character's username
        username: String,

        /// Draw a fresh fate instead of showing the stored one
        #[arg(short, long)]
        draw: bool,

        /// Override the profile's locale for the drawn fate
        #[arg(short, long)]
        locale: Option<String>,
    },

    /// Show everything a client loads: profile, fate, recent events
    Load {
        /// The character's username
        username: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = cli.store;

    let result = match cli.command {
        Commands::Init => commands::init::run(&store).await,
        Commands::Create { username, locale } => {
            commands::create::run(&store, &username, &locale).await
        }
        Commands::Profile { username } => commands::profile::run(&store, &username).await,
        Commands::Train { username, stat, minutes, rate } => {
            commands::train::run(&store, &username, &stat, minutes, rate).await
        }
        Commands::Gain { username, stat, amount } => {
            commands::gain::run(&store, &username, &stat, amount).await
        }
        Commands::Catalog => commands::catalog::run(&store).await,
        Commands::Seed { file } => commands::seed::run(&store, &file).await,
        Commands::Event { username, event, locale } => {
            commands::event::run(&store, &username, &event, locale.as_deref()).await
        }
        Commands::Resolve { username, session, option } => {
            commands::resolve::run(&store, &username, &session, &option).await
        }
        Commands::History { username, limit } => {
            commands::history::run(&store, &username, limit).await
        }
        Commands::Fate { username, draw, locale } => {
            if draw {
                commands::fate::draw(&store, &username, locale.as_deref()).await
            } else {
                commands::fate::show(&store, &username).await
            }
        }
        Commands::Load { username } => commands::load::run(&store, &username).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
