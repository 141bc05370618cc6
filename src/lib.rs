//! # Squad Stats
//!
//! A statistics aggregation engine for Battle Royale squad match tracking.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (rows, metrics, rankings)
//! - **ingest**: Header normalization and best-effort row validation
//! - **calculate**: Aggregation and derived metrics computation
//! - **achievements**: Achievement rules and unlock evaluation
//!
//! The engine is pure and synchronous: spreadsheet decoding, persistence
//! and rendering belong to the caller, which hands in already-parsed row
//! objects and receives a complete analytics report per call.

pub mod achievements;
pub mod calculate;
pub mod ingest;
pub mod models;

pub use models::*;

use serde_json::Value;

use ingest::RowRejection;

/// A full analysis run: the report plus the rows each validator dropped.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub report: AnalyticsReport,
    pub match_rejections: Vec<RowRejection>,
    pub player_rejections: Vec<RowRejection>,
}

/// Validate raw rows and aggregate them into one report.
///
/// The single entry point for callers holding freshly parsed spreadsheet
/// rows. Malformed rows are dropped, not fatal; they come back in the
/// rejection lists so the caller can surface how much of the import was
/// lost.
pub fn analyze(raw_match_rows: &[Value], raw_player_rows: &[Value]) -> Analysis {
    let matches = ingest::parse_match_rows(raw_match_rows);
    let players = ingest::parse_player_rows(raw_player_rows);

    Analysis {
        report: calculate::aggregate(&matches.rows, &players.rows),
        match_rejections: matches.rejected,
        player_rejections: players.rejected,
    }
}
