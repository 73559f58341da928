//! High score leaderboard
//!
//! Persisted as JSON in the working directory, tracks the top 10 runs.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Leaderboard file name in the working directory
pub const SCORES_FILE: &str = "leaf_crawler_scores.json";

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final score of the run
    pub score: u64,
    /// Seconds survived
    pub survived_secs: u64,
    /// Behavior profile the run was played with
    pub profile: String,
    /// Unix timestamp (ms) when achieved
    pub timestamp: u64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if it doesn't
    /// qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new run to the leaderboard (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    pub fn add_score(
        &mut self,
        score: u64,
        survived_secs: u64,
        profile: &str,
        timestamp: u64,
    ) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            survived_secs,
            profile: profile.to_string(),
            timestamp,
        };

        // Insertion point, sorted descending by score
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load from the default location
    pub fn load() -> Self {
        Self::load_from(Path::new(SCORES_FILE))
    }

    /// Save to the default location
    pub fn save(&self) {
        self.save_to(Path::new(SCORES_FILE));
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<HighScores>(&json) {
                Ok(scores) => {
                    log::info!("loaded {} high scores", scores.entries.len());
                    scores
                }
                Err(err) => {
                    log::warn!("unreadable leaderboard ({err}), starting fresh");
                    Self::new()
                }
            },
            Err(_) => {
                log::info!("no leaderboard file, starting fresh");
                Self::new()
            }
        }
    }

    pub fn save_to(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = std::fs::write(path, json) {
                    log::warn!("failed to save leaderboard: {err}");
                } else {
                    log::info!("leaderboard saved ({} entries)", self.entries.len());
                }
            }
            Err(err) => log::warn!("failed to encode leaderboard: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_scores_never_qualify() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert!(scores.qualifies(1));
    }

    #[test]
    fn ranks_are_descending_by_score() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(10, 5, "GARDEN", 0), Some(1));
        assert_eq!(scores.add_score(30, 15, "GARDEN", 1), Some(1));
        assert_eq!(scores.add_score(20, 10, "SPRINT", 2), Some(2));
        let listed: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(listed, vec![30, 20, 10]);
        assert_eq!(scores.top_score(), Some(30));
    }

    #[test]
    fn leaderboard_truncates_to_capacity() {
        let mut scores = HighScores::new();
        for i in 1..=(MAX_HIGH_SCORES as u64 + 5) {
            scores.add_score(i, i, "GARDEN", i);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        // Lowest retained score is the 10th best
        assert_eq!(scores.entries.last().unwrap().score, 6);
        assert!(!scores.qualifies(5));
        assert_eq!(scores.potential_rank(100), Some(1));
    }

    #[test]
    fn ties_rank_below_the_existing_entry() {
        let mut scores = HighScores::new();
        scores.add_score(10, 5, "GARDEN", 0);
        assert_eq!(scores.add_score(10, 6, "RELAY", 1), Some(2));
    }

    #[test]
    fn leaderboard_round_trips_through_a_file() {
        let path = std::env::temp_dir().join("leaf_crawler_scores_test.json");
        let mut scores = HighScores::new();
        scores.add_score(12, 6, "GARDEN", 99);
        scores.save_to(&path);

        let loaded = HighScores::load_from(&path);
        assert_eq!(loaded.entries.len(), 1);
        assert_eq!(loaded.entries[0].score, 12);
        assert_eq!(loaded.entries[0].profile, "GARDEN");
        let _ = std::fs::remove_file(&path);
    }
}
