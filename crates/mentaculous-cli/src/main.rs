//! Mentaculous CLI - enriched MLB box scores and a personal home-run ledger.
//!
//! Browse the schedule, open a box score with season and career home-run
//! numbers, and log the homers you care about.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use mentaculous_core::{Direction, PlayerId};
use mentaculous_ops::{Config, OpsContext};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

mod commands;

use commands::{backup, boxscore, config as config_cmd, games, ledger, player, serve};

/// Mentaculous CLI - box scores and a home-run ledger.
///
/// Run `mtc` or `mtc games` to list today's games.
#[derive(Parser, Debug)]
#[command(
    name = "mtc",
    author,
    version,
    about = "Mentaculous: enriched MLB box scores and a home-run ledger",
    long_about = None
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List the games scheduled on a date (default command).
    Games {
        /// Date as YYYY-MM-DD (defaults to today).
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Show an enriched box score.
    Box {
        /// Game identifier (gamePk).
        game_pk: u64,

        /// Which side to show: away, home or both.
        #[arg(short, long, default_value = "both")]
        team: String,

        /// Game date as YYYY-MM-DD (looked up from the game when omitted).
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Show a player's bio and hitting history.
    Player {
        /// MLB player id.
        player_id: PlayerId,
    },

    /// Work with the home-run ledger.
    #[command(subcommand)]
    Log(LogCommands),

    /// Push the ledger to the configured backup table.
    Backup {
        /// User id recorded with the snapshot.
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Run the REST API server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Manage CLI configuration.
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Ledger subcommands.
#[derive(Subcommand, Debug)]
enum LogCommands {
    /// Show a page of the ledger.
    Show {
        /// Page number, starting at 1.
        #[arg(short, long, default_value = "1")]
        page: usize,
    },

    /// Log a player's home runs from a game.
    Add {
        /// Game identifier (gamePk).
        game_pk: u64,

        /// MLB player id.
        player_id: PlayerId,

        /// Only the home run with this season number.
        #[arg(long = "hr")]
        season_hr_number: Option<u32>,

        /// Game date as YYYY-MM-DD (looked up from the game when omitted).
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Delete a logged home run.
    Remove {
        /// MLB player id.
        player_id: PlayerId,

        /// Home-run id, as shown by `mtc log entry`.
        hr_id: String,

        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },

    /// Move a player up or down in the display order.
    Move {
        /// MLB player id.
        player_id: PlayerId,

        /// up or down.
        direction: Direction,
    },

    /// Show every logged home run of a player.
    Entry {
        /// MLB player id.
        player_id: PlayerId,
    },
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration.
    Show,

    /// Set a configuration value.
    Set {
        /// Configuration key.
        key: String,
        /// Configuration value.
        value: String,
    },

    /// Get a configuration value.
    Get {
        /// Configuration key.
        key: String,
    },

    /// Reset configuration to defaults.
    Reset,

    /// Show path to config file.
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Setup tracing based on verbosity
    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN // Default to less noise
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = Config::load()?;
    let json = cli.json;

    // Default to today's games if no command given
    let command = cli.command.unwrap_or(Commands::Games { date: None });

    match command {
        Commands::Config(config_cmd_inner) => {
            match config_cmd_inner {
                ConfigCommands::Show => {
                    config_cmd::show(&config)?;
                }
                ConfigCommands::Set { key, value } => {
                    config_cmd::set(&key, &value)?;
                }
                ConfigCommands::Get { key } => {
                    config_cmd::get(&config, &key)?;
                }
                ConfigCommands::Reset => {
                    config_cmd::reset()?;
                }
                ConfigCommands::Path => {
                    if let Some(path) = Config::config_file_path() {
                        println!("{}", path.display());
                    } else {
                        println!("(no config file path available)");
                    }
                }
            }
        }

        Commands::Serve { port } => {
            let ctx = OpsContext::new(config)?;
            serve::execute(ctx, port).await?;
        }

        command => {
            let ctx = OpsContext::new(config)?;
            run(&ctx, command, json).await?;
        }
    }

    Ok(())
}

/// Commands that only need an operations context.
async fn run(ctx: &OpsContext, command: Commands, json: bool) -> Result<()> {
    match command {
        Commands::Games { date } => games::execute(ctx, date, json).await,

        Commands::Box {
            game_pk,
            team,
            date,
        } => {
            let sides = boxscore::parse_sides(&team)?;
            boxscore::execute(ctx, game_pk, date, &sides, json).await
        }

        Commands::Player { player_id } => player::execute(ctx, player_id, json).await,

        Commands::Log(log_cmd) => match log_cmd {
            LogCommands::Show { page } => ledger::show(ctx, page, json).await,
            LogCommands::Add {
                game_pk,
                player_id,
                season_hr_number,
                date,
            } => ledger::add(ctx, game_pk, player_id, season_hr_number, date, json).await,
            LogCommands::Remove {
                player_id,
                hr_id,
                yes,
            } => ledger::remove(ctx, player_id, &hr_id, yes, json).await,
            LogCommands::Move {
                player_id,
                direction,
            } => ledger::move_entry(ctx, player_id, direction, json).await,
            LogCommands::Entry { player_id } => ledger::entry(ctx, player_id, json).await,
        },

        Commands::Backup { user } => backup::execute(ctx, user, json).await,

        Commands::Serve { .. } | Commands::Config(_) => Ok(()),
    }
}
