//! Derived statistics models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MatchRow, PlayerRow};

/// A single label/value pair in a ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    /// Map name
    pub label: String,
    pub value: f64,
}

impl RankingEntry {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Map rankings derived from the per-map metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rankings {
    /// Descending by total kills
    pub by_kills: Vec<RankingEntry>,

    /// Descending by total points
    pub by_points: Vec<RankingEntry>,

    /// Descending by booyah count
    pub by_booyahs: Vec<RankingEntry>,

    /// Ascending: consistency is a variance measure, so lower ranks first
    pub by_consistency: Vec<RankingEntry>,
}

/// Aggregated performance on a single map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapMetric {
    /// Map name
    pub map: String,

    /// Drops (rounds played) on this map
    pub drops: u32,

    pub total_kills: u32,

    /// Kills per drop, 2 decimal places
    pub avg_kills: f64,

    pub total_points: u32,

    pub total_booyahs: u32,

    /// Booyahs per drop as a percentage, 1 decimal place
    pub booyah_pct: f64,

    /// Call-breaks attempted on this map
    pub call_attempts: u32,

    /// Call-breaks that ended in a win
    pub calls_won: u32,

    /// Wins over attempts as a percentage, 1 decimal place; 0 with no
    /// attempts
    pub call_success_pct: f64,

    /// Population standard deviation of total points. Lower is steadier.
    pub consistency: f64,

    /// Mean placement across drops, 1 decimal place
    pub avg_placement: f64,
}

/// Dataset-wide metrics across every drop in the filtered set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralMetrics {
    pub total_drops: u32,
    pub total_kills: u32,
    pub avg_kills: f64,
    pub total_points: u32,
    pub avg_points: f64,
    pub total_booyahs: u32,
    pub booyah_pct: f64,

    /// Call-breaks attempted (decided or not)
    pub call_breaks: u32,
    pub calls_won: u32,
    pub calls_lost: u32,
    pub call_success_pct: f64,

    /// Population standard deviation of total points over every drop
    pub consistency: f64,
    pub avg_placement: f64,

    pub rankings: Rankings,
}

/// Best single performer for one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPerformer {
    pub player: String,
    pub value: u32,
    pub team: Option<String>,
}

/// Aggregates over the player sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerMetrics {
    pub total_kills: u32,
    pub total_damage: u32,

    /// Total kills over total deaths, 2 decimal places. Falls back to
    /// total kills when the squad recorded no deaths.
    pub kd_ratio: f64,

    /// Highest kill count; `None` when no player scored any
    pub mvp: Option<TopPerformer>,

    /// Highest damage dealt
    pub top_damage: Option<TopPerformer>,

    /// Most assists
    pub top_assists: Option<TopPerformer>,
}

/// Full analytics result for one snapshot of the dataset.
///
/// Recomputed from scratch on every call; nothing here is incremental
/// or persisted by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsReport {
    /// When this report was computed
    pub computed_at: DateTime<Utc>,

    pub general: GeneralMetrics,

    /// Per-map breakdown, in first-seen order
    pub by_map: Vec<MapMetric>,

    /// The validated match rows, sorted ascending by round
    pub match_rows: Vec<MatchRow>,

    /// The validated player rows, in source order
    pub player_rows: Vec<PlayerRow>,

    pub player_metrics: PlayerMetrics,
}

impl AnalyticsReport {
    /// Get the metrics for a map by name.
    pub fn map_metric(&self, map: &str) -> Option<&MapMetric> {
        self.by_map.iter().find(|m| m.map.eq_ignore_ascii_case(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> AnalyticsReport {
        AnalyticsReport {
            computed_at: Utc::now(),
            general: GeneralMetrics {
                total_drops: 2,
                total_kills: 11,
                ..Default::default()
            },
            by_map: vec![
                MapMetric {
                    map: "Bermuda".to_string(),
                    drops: 1,
                    total_kills: 5,
                    ..Default::default()
                },
                MapMetric {
                    map: "Purgatorio".to_string(),
                    drops: 1,
                    total_kills: 6,
                    ..Default::default()
                },
            ],
            match_rows: vec![],
            player_rows: vec![],
            player_metrics: PlayerMetrics::default(),
        }
    }

    #[test]
    fn test_map_metric_lookup() {
        let report = sample_report();
        assert!(report.map_metric("Bermuda").is_some());
        assert!(report.map_metric("bermuda").is_some()); // Case insensitive
        assert!(report.map_metric("Kalahari").is_none());
    }

    #[test]
    fn test_report_serialization() {
        let report = sample_report();

        let json = serde_json::to_string(&report).unwrap();
        let parsed: AnalyticsReport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.general.total_kills, 11);
        assert_eq!(parsed.by_map.len(), 2);
    }

    #[test]
    fn test_ranking_entry_new() {
        let entry = RankingEntry::new("Bermuda", 42.0);
        assert_eq!(entry.label, "Bermuda");
        assert_eq!(entry.value, 42.0);
    }
}
