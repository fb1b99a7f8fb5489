use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "mindspark")]
#[command(about = "MindSpark - quizzes, puzzles and daily challenges with offline progress")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.mindspark/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the progress database (overrides the config)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show profile, streak, statistics and achievements
    Status,

    /// Show today's daily challenges
    Challenges,

    /// Claim the reward of a completed challenge
    Claim {
        /// Challenge id or a unique prefix of it
        id: String,
    },

    /// Play a sample quiz (omit the number to list them)
    Quiz { number: Option<usize> },

    /// Play a puzzle from your collection (omit the number to list them)
    Puzzle { number: Option<usize> },

    /// Show recent quiz results
    History {
        /// Number of results to show
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Erase all progress and start over
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Write a default ~/.mindspark/config.toml
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let ctx = cli::CliContext::new(cli.config, cli.data_dir);

    match cli.command {
        Some(Commands::Status) | None => {
            cli::status::status_command(&ctx)?;
        }
        Some(Commands::Challenges) => {
            cli::challenges::challenges_command(&ctx)?;
        }
        Some(Commands::Claim { id }) => {
            cli::challenges::claim_command(&ctx, &id)?;
        }
        Some(Commands::Quiz { number }) => {
            cli::quiz::quiz_command(&ctx, number).await?;
        }
        Some(Commands::Puzzle { number }) => {
            cli::puzzle::puzzle_command(&ctx, number).await?;
        }
        Some(Commands::History { limit }) => {
            cli::history::history_command(&ctx, limit)?;
        }
        Some(Commands::Reset { yes }) => {
            cli::reset::reset_command(&ctx, yes)?;
        }
        Some(Commands::Init { force }) => {
            cli::init::init_command(ctx.config_path(), force)?;
        }
    }

    Ok(())
}
