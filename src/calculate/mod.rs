//! Statistics aggregation engine.
//!
//! Computes derived metrics from validated match and player rows:
//! - Kill/point totals and per-drop averages
//! - Booyah and call-break success rates
//! - Consistency (population standard deviation of total points)
//! - Per-map breakdowns, map rankings and player top performers
//!
//! Everything here is pure: one call folds a complete snapshot of the
//! dataset into one report, with no incremental state between calls.

mod rankings;

pub use rankings::build_rankings;

use std::collections::HashMap;

use chrono::Utc;

use crate::models::{
    AnalyticsReport, CallOutcome, GeneralMetrics, MapMetric, MatchRow, PlayerMetrics, PlayerRow,
    TopPerformer,
};

/// Fold validated rows into a full analytics report.
pub fn aggregate(match_rows: &[MatchRow], player_rows: &[PlayerRow]) -> AnalyticsReport {
    let mut general = GeneralMetrics::default();
    let mut placement_sum = 0u64;
    let mut all_points: Vec<f64> = Vec::with_capacity(match_rows.len());

    // Map buckets keep first-seen order so downstream stable sorts are
    // deterministic.
    let mut buckets: Vec<MapBucket> = Vec::new();
    let mut bucket_index: HashMap<String, usize> = HashMap::new();

    for row in match_rows {
        general.total_drops += 1;
        general.total_kills += row.kills;
        general.total_points += row.total_points;
        if row.booyah {
            general.total_booyahs += 1;
        }
        if row.call_break {
            general.call_breaks += 1;
            match row.call_outcome {
                CallOutcome::Won => general.calls_won += 1,
                CallOutcome::Lost => general.calls_lost += 1,
                CallOutcome::Undecided => {}
            }
        }
        placement_sum += u64::from(row.placement.unwrap_or(0));
        all_points.push(f64::from(row.total_points));

        let index = *bucket_index.entry(row.map.clone()).or_insert_with(|| {
            buckets.push(MapBucket::new(row.map.clone()));
            buckets.len() - 1
        });
        buckets[index].add(row);
    }

    let by_map: Vec<MapMetric> = buckets.into_iter().map(MapBucket::finish).collect();

    // Denominators substitute 1 when the dataset is empty so every rate
    // stays a finite 0 instead of NaN.
    let drops = f64::from(general.total_drops.max(1));
    general.avg_kills = round_to(f64::from(general.total_kills) / drops, 2);
    general.avg_points = round_to(f64::from(general.total_points) / drops, 2);
    general.booyah_pct = round_to(f64::from(general.total_booyahs) / drops * 100.0, 1);
    general.call_success_pct = if general.call_breaks > 0 {
        round_to(
            f64::from(general.calls_won) / f64::from(general.call_breaks) * 100.0,
            1,
        )
    } else {
        0.0
    };
    general.avg_placement = round_to(placement_sum as f64 / drops, 1);
    general.consistency = round_to(population_std_dev(&all_points), 2);
    general.rankings = build_rankings(&by_map);

    let mut sorted_rows = match_rows.to_vec();
    sorted_rows.sort_by_key(MatchRow::sort_round);

    AnalyticsReport {
        computed_at: Utc::now(),
        general,
        by_map,
        match_rows: sorted_rows,
        player_rows: player_rows.to_vec(),
        player_metrics: aggregate_players(player_rows),
    }
}

/// Aggregate the player sheet: totals, K/D and top-performer records.
pub fn aggregate_players(players: &[PlayerRow]) -> PlayerMetrics {
    let mut metrics = PlayerMetrics::default();
    let mut total_deaths = 0u32;

    for row in players {
        metrics.total_kills += row.kills;
        metrics.total_damage += row.damage;
        total_deaths += row.deaths;

        track_max(&mut metrics.mvp, row, row.kills);
        track_max(&mut metrics.top_damage, row, row.damage);
        track_max(&mut metrics.top_assists, row, row.assists);
    }

    // A flawless squad divides by zero; surface raw kills instead.
    metrics.kd_ratio = if total_deaths > 0 {
        round_to(f64::from(metrics.total_kills) / f64::from(total_deaths), 2)
    } else {
        f64::from(metrics.total_kills)
    };

    metrics
}

/// Strictly-greater update: ties keep the first-seen holder, and an
/// all-zero column leaves the slot empty.
fn track_max(slot: &mut Option<TopPerformer>, row: &PlayerRow, value: u32) {
    let current = slot.as_ref().map_or(0, |top| top.value);
    if value > current {
        *slot = Some(TopPerformer {
            player: row.player.clone(),
            value,
            team: row.team.clone(),
        });
    }
}

/// Population standard deviation (divide by N, not N-1). Empty input
/// yields 0.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Running per-map totals, finalized into a [`MapMetric`].
struct MapBucket {
    map: String,
    drops: u32,
    kills: u32,
    points: u32,
    booyahs: u32,
    call_attempts: u32,
    calls_won: u32,
    placement_sum: u64,
    point_values: Vec<f64>,
}

impl MapBucket {
    fn new(map: String) -> Self {
        Self {
            map,
            drops: 0,
            kills: 0,
            points: 0,
            booyahs: 0,
            call_attempts: 0,
            calls_won: 0,
            placement_sum: 0,
            point_values: Vec::new(),
        }
    }

    fn add(&mut self, row: &MatchRow) {
        self.drops += 1;
        self.kills += row.kills;
        self.points += row.total_points;
        if row.booyah {
            self.booyahs += 1;
        }
        if row.call_break {
            self.call_attempts += 1;
            if row.call_outcome == CallOutcome::Won {
                self.calls_won += 1;
            }
        }
        self.placement_sum += u64::from(row.placement.unwrap_or(0));
        self.point_values.push(f64::from(row.total_points));
    }

    fn finish(self) -> MapMetric {
        let drops = f64::from(self.drops.max(1));
        MapMetric {
            map: self.map,
            drops: self.drops,
            total_kills: self.kills,
            avg_kills: round_to(f64::from(self.kills) / drops, 2),
            total_points: self.points,
            total_booyahs: self.booyahs,
            booyah_pct: round_to(f64::from(self.booyahs) / drops * 100.0, 1),
            call_attempts: self.call_attempts,
            calls_won: self.calls_won,
            call_success_pct: if self.call_attempts > 0 {
                round_to(
                    f64::from(self.calls_won) / f64::from(self.call_attempts) * 100.0,
                    1,
                )
            } else {
                0.0
            },
            consistency: round_to(population_std_dev(&self.point_values), 2),
            avg_placement: round_to(self.placement_sum as f64 / drops, 1),
        }
    }
}
