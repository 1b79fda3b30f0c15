//! The Oregon top ten.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::policy::ScorePolicy;
use crate::score::ScoreRating;

pub const HIGH_SCORE_SLOTS: usize = 10;

const DEFAULT_ENTRIES: [(&str, u32); HIGH_SCORE_SLOTS] = [
    ("Stephen Meek", 7_650),
    ("Celinda Hines", 5_694),
    ("Andrew Sublette", 4_138),
    ("David Hastings", 2_945),
    ("Ezra Meeker", 2_052),
    ("William Vaughn", 1_401),
    ("Mary Bartlett", 937),
    ("William Wiggins", 615),
    ("Charles Hopper", 396),
    ("Elijah White", 250),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub name: String,
    pub points: u32,
    pub rating: ScoreRating,
    #[serde(default)]
    pub recorded_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreTable {
    entries: Vec<HighScore>,
}

impl Default for HighScoreTable {
    fn default() -> Self {
        Self::historical(&ScorePolicy::default())
    }
}

impl HighScoreTable {
    /// The stock table of historical trail names.
    #[must_use]
    pub fn historical(policy: &ScorePolicy) -> Self {
        let entries = DEFAULT_ENTRIES
            .iter()
            .map(|(name, points)| HighScore {
                name: (*name).to_string(),
                points: *points,
                rating: ScoreRating::for_points(*points, policy),
                recorded_on: None,
            })
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[HighScore] {
        &self.entries
    }

    /// True if `points` would earn a place on the table.
    #[must_use]
    pub fn qualifies(&self, points: u32) -> bool {
        self.entries.len() < HIGH_SCORE_SLOTS
            || self
                .entries
                .last()
                .is_some_and(|lowest| points > lowest.points)
    }

    /// Insert a score, returning its zero-based rank if it made the table.
    pub fn insert(&mut self, entry: HighScore) -> Option<usize> {
        if !self.qualifies(entry.points) {
            return None;
        }
        let rank = self
            .entries
            .iter()
            .position(|existing| entry.points > existing.points)
            .unwrap_or(self.entries.len());
        log::debug!("high score {} for {} at rank {rank}", entry.points, entry.name);
        self.entries.insert(rank, entry);
        self.entries.truncate(HIGH_SCORE_SLOTS);
        Some(rank)
    }

    pub fn reset(&mut self, policy: &ScorePolicy) {
        *self = Self::historical(policy);
    }

    /// Restore ordering and size after loading a hand-edited file.
    pub fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.points.cmp(&a.points));
        self.entries.truncate(HIGH_SCORE_SLOTS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, points: u32) -> HighScore {
        HighScore {
            name: name.to_string(),
            points,
            rating: ScoreRating::for_points(points, &ScorePolicy::default()),
            recorded_on: NaiveDate::from_ymd_opt(1848, 9, 1),
        }
    }

    #[test]
    fn default_table_is_sorted_top_ten() {
        let table = HighScoreTable::default();
        assert_eq!(table.entries().len(), HIGH_SCORE_SLOTS);
        assert!(
            table
                .entries()
                .windows(2)
                .all(|pair| pair[0].points >= pair[1].points)
        );
        assert_eq!(table.entries()[0].rating, ScoreRating::TrailGuide);
        assert_eq!(table.entries()[9].rating, ScoreRating::Greenhorn);
    }

    #[test]
    fn insert_keeps_ten_sorted_entries() {
        let mut table = HighScoreTable::default();
        assert!(!table.qualifies(250));
        assert_eq!(table.insert(entry("Low", 100)), None);
        assert_eq!(table.insert(entry("Ezra", 5_000)), Some(2));
        assert_eq!(table.entries().len(), HIGH_SCORE_SLOTS);
        assert_eq!(table.entries()[2].name, "Ezra");
        assert!(table.entries().iter().all(|e| e.name != "Elijah White"));
    }

    #[test]
    fn ties_rank_below_existing_scores() {
        let mut table = HighScoreTable::default();
        assert_eq!(table.insert(entry("Tie", 7_650)), Some(1));
    }

    #[test]
    fn reset_restores_historical_names() {
        let mut table = HighScoreTable::default();
        table.insert(entry("Ezra", 9_000));
        table.reset(&ScorePolicy::default());
        assert_eq!(table, HighScoreTable::default());
    }

    #[test]
    fn normalize_sorts_loaded_tables() {
        let mut table: HighScoreTable = serde_json::from_str(
            r#"{ "entries": [
                { "name": "A", "points": 10, "rating": "greenhorn" },
                { "name": "B", "points": 5000, "rating": "trail_guide" }
            ] }"#,
        )
        .expect("table json");
        table.normalize();
        assert_eq!(table.entries()[0].name, "B");
        assert!(table.qualifies(1));
    }
}
