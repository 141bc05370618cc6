//! Achievement rules and unlock evaluation.
//!
//! A fixed rule table is matched against one player's statistics for one
//! match. Deciding which achievements newly qualify is a pure function;
//! writing the unlock rows goes through the [`UnlockStore`] port, so a
//! failed write never erases the computed decision.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// One player's statistics for a single match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    pub kills: u32,
    pub damage: u32,
    pub assists: u32,
    pub knockdowns: u32,
    pub revives: u32,
    pub deaths: u32,

    /// Final placement, 1 = Booyah
    pub placement: u32,
}

/// A single achievement rule: a title (the unique key), display fields,
/// and the predicate that decides whether a match qualifies.
#[derive(Debug, Clone, Copy)]
pub struct AchievementRule {
    pub title: &'static str,
    pub description: &'static str,

    /// Icon identifier for the presentation layer
    pub icon: &'static str,

    pub predicate: fn(&MatchStats) -> bool,
}

/// The fixed rule table, evaluated in order.
pub static RULES: [AchievementRule; 7] = [
    AchievementRule {
        title: "MVP of the Match",
        description: "Scored 15 or more kills in a single match.",
        icon: "Sword",
        predicate: |s| s.kills >= 15,
    },
    AchievementRule {
        title: "Massive Damage",
        description: "Dealt 2000 or more damage in a single match.",
        icon: "Zap",
        predicate: |s| s.damage >= 2000,
    },
    AchievementRule {
        title: "Booyah Master",
        description: "Took 1st place (Booyah) in the match.",
        icon: "Trophy",
        predicate: |s| s.placement == 1,
    },
    AchievementRule {
        title: "Squad's Angel",
        description: "Revived 3 or more teammates in the same match.",
        icon: "HeartPulse",
        predicate: |s| s.revives >= 3,
    },
    AchievementRule {
        title: "Destroyer",
        description: "Knocked down 10 or more enemies in a single match.",
        icon: "Flame",
        predicate: |s| s.knockdowns >= 10,
    },
    AchievementRule {
        title: "Ghost",
        description: "Finished the match without dying and placed in the top 3.",
        icon: "Shield",
        predicate: |s| s.deaths == 0 && s.placement <= 3,
    },
    AchievementRule {
        title: "Support Master",
        description: "Provided 8 or more assists in the same game.",
        icon: "Users",
        predicate: |s| s.assists >= 8,
    },
];

/// Decide which achievements newly qualify.
///
/// Returns the rules whose predicate holds for `stats` and whose title
/// is not already in `already_unlocked`, in rule-table order. Pure: the
/// caller owns reading the unlocked set and persisting the result.
pub fn evaluate_unlocks(
    stats: &MatchStats,
    already_unlocked: &HashSet<String>,
) -> Vec<&'static AchievementRule> {
    RULES
        .iter()
        .filter(|rule| !already_unlocked.contains(rule.title) && (rule.predicate)(stats))
        .collect()
}

/// An unlock row as handed to the store: one achievement earned by one
/// player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockedAchievement {
    pub player_id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
}

/// Errors from the unlock store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("failed to record unlocks: {0}")]
    Write(String),
}

/// Persistence port for unlock rows. The engine only ever appends;
/// reading a player's existing titles stays with the caller.
pub trait UnlockStore {
    fn record_unlocks(&mut self, unlocks: &[UnlockedAchievement]) -> Result<(), StoreError>;
}

/// In-process store, used by tests and the CLI.
#[derive(Debug, Clone, Default)]
pub struct MemoryUnlockStore {
    unlocks: Vec<UnlockedAchievement>,
}

impl MemoryUnlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unlocks(&self) -> &[UnlockedAchievement] {
        &self.unlocks
    }

    /// Titles already held by a player.
    pub fn unlocked_titles(&self, player_id: &str) -> HashSet<String> {
        self.unlocks
            .iter()
            .filter(|u| u.player_id == player_id)
            .map(|u| u.title.clone())
            .collect()
    }
}

impl UnlockStore for MemoryUnlockStore {
    fn record_unlocks(&mut self, unlocks: &[UnlockedAchievement]) -> Result<(), StoreError> {
        self.unlocks.extend_from_slice(unlocks);
        Ok(())
    }
}

/// Result of an unlock pass: the decision, plus the store failure if the
/// write did not land. The decision is kept either way so the caller can
/// retry the write without re-deriving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlockOutcome {
    pub unlocked: Vec<UnlockedAchievement>,
    pub store_error: Option<StoreError>,
}

impl UnlockOutcome {
    /// Titles that newly qualified.
    pub fn titles(&self) -> Vec<&str> {
        self.unlocked.iter().map(|u| u.title.as_str()).collect()
    }
}

/// Evaluate one match and persist the new unlocks.
pub fn unlock_after_match(
    store: &mut dyn UnlockStore,
    player_id: &str,
    stats: &MatchStats,
    already_unlocked: &HashSet<String>,
) -> UnlockOutcome {
    let unlocked: Vec<UnlockedAchievement> = evaluate_unlocks(stats, already_unlocked)
        .into_iter()
        .map(|rule| UnlockedAchievement {
            player_id: player_id.to_string(),
            title: rule.title.to_string(),
            description: rule.description.to_string(),
            icon: rule.icon.to_string(),
        })
        .collect();

    let store_error = if unlocked.is_empty() {
        None
    } else {
        store.record_unlocks(&unlocked).err()
    };

    if let Some(ref err) = store_error {
        error!(player_id, %err, "unlocks computed but not persisted");
    }

    UnlockOutcome {
        unlocked,
        store_error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct FailingStore;

    impl UnlockStore for FailingStore {
        fn record_unlocks(&mut self, _unlocks: &[UnlockedAchievement]) -> Result<(), StoreError> {
            Err(StoreError::Write("connection reset".to_string()))
        }
    }

    fn titles(rules: &[&AchievementRule]) -> Vec<&'static str> {
        rules.iter().map(|r| r.title).collect()
    }

    #[test]
    fn test_rule_titles_are_unique() {
        let unique: HashSet<&str> = RULES.iter().map(|r| r.title).collect();
        assert_eq!(unique.len(), RULES.len());
    }

    #[test]
    fn test_high_kill_match_unlocks_mvp_only() {
        // 16 kills qualifies for MVP; placement 2 misses Booyah Master
        // and a death rules out Ghost.
        let stats = MatchStats {
            kills: 16,
            damage: 500,
            placement: 2,
            deaths: 1,
            ..Default::default()
        };

        let unlocked = evaluate_unlocks(&stats, &HashSet::new());
        assert_eq!(titles(&unlocked), vec!["MVP of the Match"]);
    }

    #[test]
    fn test_big_match_unlocks_several_in_table_order() {
        let stats = MatchStats {
            kills: 15,
            damage: 2400,
            assists: 8,
            knockdowns: 11,
            revives: 3,
            deaths: 0,
            placement: 1,
        };

        let unlocked = evaluate_unlocks(&stats, &HashSet::new());
        assert_eq!(
            titles(&unlocked),
            vec![
                "MVP of the Match",
                "Massive Damage",
                "Booyah Master",
                "Squad's Angel",
                "Destroyer",
                "Ghost",
                "Support Master",
            ]
        );
    }

    #[test]
    fn test_already_unlocked_titles_are_skipped() {
        let stats = MatchStats {
            kills: 20,
            placement: 1,
            deaths: 1,
            ..Default::default()
        };
        let already: HashSet<String> = ["MVP of the Match".to_string()].into();

        let unlocked = evaluate_unlocks(&stats, &already);
        assert_eq!(titles(&unlocked), vec!["Booyah Master"]);
    }

    #[test]
    fn test_quiet_match_unlocks_nothing() {
        let stats = MatchStats {
            kills: 2,
            damage: 300,
            deaths: 1,
            placement: 12,
            ..Default::default()
        };

        assert!(evaluate_unlocks(&stats, &HashSet::new()).is_empty());
    }

    #[test]
    fn test_ghost_requires_both_conditions() {
        let no_deaths_low_placement = MatchStats {
            deaths: 0,
            placement: 4,
            ..Default::default()
        };
        assert!(evaluate_unlocks(&no_deaths_low_placement, &HashSet::new())
            .iter()
            .all(|r| r.title != "Ghost"));

        let top3_with_death = MatchStats {
            deaths: 1,
            placement: 3,
            ..Default::default()
        };
        assert!(evaluate_unlocks(&top3_with_death, &HashSet::new())
            .iter()
            .all(|r| r.title != "Ghost"));
    }

    #[test]
    fn test_unlock_after_match_persists_rows() {
        let mut store = MemoryUnlockStore::new();
        let stats = MatchStats {
            kills: 15,
            ..Default::default()
        };

        let outcome = unlock_after_match(&mut store, "player-1", &stats, &HashSet::new());

        assert_eq!(outcome.titles(), vec!["MVP of the Match"]);
        assert_eq!(outcome.store_error, None);
        assert_eq!(store.unlocks().len(), 1);
        assert_eq!(store.unlocks()[0].player_id, "player-1");
        assert_eq!(store.unlocks()[0].icon, "Sword");
    }

    #[test]
    fn test_second_evaluation_is_idempotent() {
        let mut store = MemoryUnlockStore::new();
        let stats = MatchStats {
            kills: 15,
            placement: 1,
            deaths: 1,
            ..Default::default()
        };

        let first = unlock_after_match(&mut store, "player-1", &stats, &HashSet::new());
        assert_eq!(first.unlocked.len(), 2);

        // Same stats against the updated unlocked set: nothing new.
        let already = store.unlocked_titles("player-1");
        let second = unlock_after_match(&mut store, "player-1", &stats, &already);
        assert!(second.unlocked.is_empty());
        assert_eq!(store.unlocks().len(), 2);
    }

    #[test]
    fn test_store_failure_preserves_decision() {
        let mut store = FailingStore;
        let stats = MatchStats {
            damage: 2500,
            deaths: 1,
            placement: 9,
            ..Default::default()
        };

        let outcome = unlock_after_match(&mut store, "player-1", &stats, &HashSet::new());

        assert_eq!(outcome.titles(), vec!["Massive Damage"]);
        assert_eq!(
            outcome.store_error,
            Some(StoreError::Write("connection reset".to_string()))
        );
    }

    #[test]
    fn test_no_unlocks_skips_the_store() {
        // A failing store is never touched when nothing qualifies.
        let mut store = FailingStore;
        let stats = MatchStats {
            deaths: 2,
            placement: 20,
            ..Default::default()
        };

        let outcome = unlock_after_match(&mut store, "player-1", &stats, &HashSet::new());
        assert!(outcome.unlocked.is_empty());
        assert_eq!(outcome.store_error, None);
    }

    #[test]
    fn test_unlocked_titles_filters_by_player() {
        let mut store = MemoryUnlockStore::new();
        let stats = MatchStats {
            kills: 16,
            ..Default::default()
        };

        unlock_after_match(&mut store, "player-1", &stats, &HashSet::new());
        unlock_after_match(&mut store, "player-2", &stats, &HashSet::new());

        assert_eq!(store.unlocked_titles("player-1").len(), 1);
        assert!(store.unlocked_titles("player-3").is_empty());
    }
}
