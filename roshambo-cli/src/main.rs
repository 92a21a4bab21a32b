mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "roshambo")]
#[command(about = "Commit-reveal rock/paper/scissors between two players")]
#[command(version)]
struct Cli {
    /// Data directory for game state
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a fresh game, replacing any existing state file
    New {
        /// Name registered as the game's administrator
        #[arg(long, default_value = "owner")]
        owner: String,
    },
    /// Register a player identity
    Register {
        /// Player name
        name: String,
    },
    /// Commit to a choice (the choice and secret stay local until reveal)
    Commit {
        /// Player name
        player: String,
        /// rock, paper or scissors
        choice: String,
        /// Secret phrase; random when omitted
        #[arg(long)]
        secret: Option<String>,
    },
    /// Reveal a previously committed choice
    Reveal {
        /// Player name
        player: String,
    },
    /// Settle the round and show the winner
    Result {
        /// Player name triggering settlement
        player: String,
    },
    /// Force-reset the round (administrator only)
    Reset {
        /// Caller name
        caller: String,
    },
    /// Show round stage and slots
    Status,
    /// Show the emitted event log
    Events,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "roshambo={},roshambo_engine={}",
            log_level, log_level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Get data directory
    let data_dir = cli.data_dir.unwrap_or_else(|| {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("roshambo")
    });

    // Execute command
    let result = match cli.command {
        Commands::New { owner } => commands::new_game(&data_dir, &owner),
        Commands::Register { name } => commands::register_player(&data_dir, &name),
        Commands::Commit {
            player,
            choice,
            secret,
        } => commands::commit(&data_dir, &player, &choice, secret.as_deref()),
        Commands::Reveal { player } => commands::reveal(&data_dir, &player),
        Commands::Result { player } => commands::settle(&data_dir, &player),
        Commands::Reset { caller } => commands::reset(&data_dir, &caller),
        Commands::Status => commands::show_status(&data_dir),
        Commands::Events => commands::show_events(&data_dir),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
