//! Validated spreadsheet rows.

use serde::{Deserialize, Serialize};

/// Outcome of a call-break (a deviation from the squad's agreed call).
///
/// The results sheet records "GANHOU" (won) or "PERDEU" (lost); a "-"
/// placeholder marks an attempt whose outcome was never filled in. An
/// undecided attempt still counts toward the attempt total but toward
/// neither wins nor losses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallOutcome {
    Won,
    Lost,
    #[default]
    Undecided,
}

impl CallOutcome {
    /// Parse a sheet cell into an outcome. Anything other than the two
    /// decided literals is `Undecided`.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("GANHOU") {
            CallOutcome::Won
        } else if value.eq_ignore_ascii_case("PERDEU") {
            CallOutcome::Lost
        } else {
            CallOutcome::Undecided
        }
    }
}

/// One team's result for one round, as imported from the results sheet.
///
/// `total_points` should equal `kills + placement_points` in correctly
/// authored data, but the engine consumes whatever total the sheet
/// supplies and never enforces the identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchRow {
    /// Match date, kept in whatever format the sheet used
    pub date: Option<String>,

    /// Championship name
    pub championship: Option<String>,

    /// Round number within the championship
    pub round: Option<u32>,

    /// Map name (grouping key for per-map metrics)
    pub map: String,

    /// Team name
    pub team: Option<String>,

    /// Final placement, 1 = Booyah
    pub placement: Option<u32>,

    /// Team kill count for the round
    pub kills: u32,

    /// Points awarded for placement
    pub placement_points: u32,

    /// Total points (kills + placement points, as authored)
    pub total_points: u32,

    /// Whether the team finished first
    pub booyah: bool,

    /// Whether the team broke the agreed call this round
    pub call_break: bool,

    /// How the call-break turned out
    pub call_outcome: CallOutcome,
}

impl MatchRow {
    /// Round used for chronological ordering; rows without a round sort
    /// first.
    pub fn sort_round(&self) -> u32 {
        self.round.unwrap_or(0)
    }
}

/// One player's performance in one match, as imported from the player
/// sheet. Every counter defaults to 0 when the sheet leaves it blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerRow {
    pub date: Option<String>,
    pub team: Option<String>,

    /// Game mode (e.g. "Squad")
    pub mode: Option<String>,
    pub map: Option<String>,

    /// Final placement of the player's team
    pub placement: Option<u32>,

    /// Player name — the one mandatory field
    pub player: String,

    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,

    /// Matches played (quedas)
    pub falls: u32,

    /// Damage dealt
    pub damage: u32,

    /// Enemies knocked down
    pub knockdowns: u32,

    /// Teammates revived
    pub revives: u32,
}
