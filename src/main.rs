use std::collections::HashSet;
use std::fs;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use squad_stats::achievements::{unlock_after_match, MatchStats, MemoryUnlockStore};
use squad_stats::analyze;

#[derive(Parser)]
#[command(name = "squad-stats")]
#[command(about = "Battle Royale squad statistics engine")]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate parsed spreadsheet rows into an analytics report
    Analyze {
        /// Path to a JSON array of match-summary rows
        #[arg(long)]
        matches: String,

        /// Path to a JSON array of player-performance rows
        #[arg(long)]
        players: Option<String>,

        /// Print compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Evaluate achievement unlocks for one player's match
    Achievements {
        /// Path to a JSON object with the player's match statistics
        #[arg(long)]
        stats: String,

        /// Player identifier for the unlock rows
        #[arg(long)]
        player_id: String,

        /// Path to a JSON array of already-unlocked titles
        #[arg(long)]
        unlocked: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Analyze {
            matches,
            players,
            compact,
        } => {
            let match_rows = load_rows(&matches)?;
            let player_rows = match players {
                Some(path) => load_rows(&path)?,
                None => Vec::new(),
            };

            let analysis = analyze(&match_rows, &player_rows);

            for rejection in analysis
                .match_rejections
                .iter()
                .chain(&analysis.player_rejections)
            {
                tracing::warn!(index = rejection.index, "dropped row: {}", rejection.error);
            }

            let json = if compact {
                serde_json::to_string(&analysis.report)?
            } else {
                serde_json::to_string_pretty(&analysis.report)?
            };
            println!("{}", json);

            let dropped = analysis.match_rejections.len() + analysis.player_rejections.len();
            if dropped > 0 {
                eprintln!("({} row(s) dropped during validation)", dropped);
            }
        }
        Commands::Achievements {
            stats,
            player_id,
            unlocked,
        } => {
            let raw =
                fs::read_to_string(&stats).with_context(|| format!("failed to read {}", stats))?;
            let stats: MatchStats =
                serde_json::from_str(&raw).context("failed to parse match statistics")?;

            let already: HashSet<String> = match unlocked {
                Some(path) => {
                    let raw = fs::read_to_string(&path)
                        .with_context(|| format!("failed to read {}", path))?;
                    serde_json::from_str(&raw).context("failed to parse unlocked titles")?
                }
                None => HashSet::new(),
            };

            let mut store = MemoryUnlockStore::new();
            let outcome = unlock_after_match(&mut store, &player_id, &stats, &already);

            println!("{}", serde_json::to_string_pretty(&outcome.unlocked)?);
            if outcome.unlocked.is_empty() {
                eprintln!("No new achievements.");
            } else {
                eprintln!("{} new achievement(s) unlocked.", outcome.unlocked.len());
            }
        }
    }

    Ok(())
}

/// Load a JSON array of raw row objects.
fn load_rows(path: &str) -> Result<Vec<Value>> {
    let raw = fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?;
    let rows: Vec<Value> =
        serde_json::from_str(&raw).with_context(|| format!("{} is not a JSON array", path))?;
    Ok(rows)
}
