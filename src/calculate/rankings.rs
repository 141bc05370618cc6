//! Map rankings from the per-map metrics.

use crate::models::{MapMetric, RankingEntry, Rankings};

/// Build the four map rankings.
///
/// Kills, points and booyahs rank descending; consistency ranks
/// ascending, since it is a variance measure and lower means steadier.
/// All sorts are stable, so maps that tie keep their first-seen order,
/// and the input list is never reordered.
pub fn build_rankings(by_map: &[MapMetric]) -> Rankings {
    Rankings {
        by_kills: ranked(by_map, |m| f64::from(m.total_kills), Direction::Descending),
        by_points: ranked(by_map, |m| f64::from(m.total_points), Direction::Descending),
        by_booyahs: ranked(by_map, |m| f64::from(m.total_booyahs), Direction::Descending),
        by_consistency: ranked(by_map, |m| m.consistency, Direction::Ascending),
    }
}

enum Direction {
    Ascending,
    Descending,
}

fn ranked(
    by_map: &[MapMetric],
    value: impl Fn(&MapMetric) -> f64,
    direction: Direction,
) -> Vec<RankingEntry> {
    let mut entries: Vec<RankingEntry> = by_map
        .iter()
        .map(|metric| RankingEntry::new(metric.map.clone(), value(metric)))
        .collect();

    match direction {
        Direction::Ascending => entries.sort_by(|a, b| a.value.total_cmp(&b.value)),
        Direction::Descending => entries.sort_by(|a, b| b.value.total_cmp(&a.value)),
    }

    entries
}
