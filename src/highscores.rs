//! Per-session run board
//!
//! Keeps the top 10 finished runs of this session in memory. Nothing is
//! persisted; a page reload starts a fresh board.

use serde::{Deserialize, Serialize};

use crate::sim::{GameOverCause, GameState};

/// Maximum number of runs to keep
pub const MAX_SESSION_RUNS: usize = 10;

/// A single finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub seed: u64,
    pub score: u64,
    /// Pixels scrolled
    pub distance: f32,
    /// Playing ticks survived
    pub ticks: u64,
    pub cause: Option<GameOverCause>,
}

impl RunRecord {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            seed: state.seed,
            score: state.score,
            distance: state.distance,
            ticks: state.time_ticks,
            cause: state.last_cause,
        }
    }
}

/// Session leaderboard, sorted by score then distance (descending)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionScores {
    pub entries: Vec<RunRecord>,
    /// Runs finished this session, including ones that fell off the board
    pub runs_played: u32,
}

impl SessionScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished run
    /// Returns the rank achieved (1-indexed) or None if it didn't make the board
    pub fn record(&mut self, run: RunRecord) -> Option<usize> {
        self.runs_played += 1;

        let beats = |e: &RunRecord| {
            run.score > e.score || (run.score == e.score && run.distance > e.distance)
        };
        let pos = self.entries.iter().position(beats);
        let rank = match pos {
            Some(i) => i,
            None if self.entries.len() < MAX_SESSION_RUNS => self.entries.len(),
            None => return None,
        };

        log::info!(
            "Run #{} ranked {} (score {}, {:.0} px)",
            self.runs_played,
            rank + 1,
            run.score,
            run.distance
        );
        self.entries.insert(rank, run);
        self.entries.truncate(MAX_SESSION_RUNS);
        Some(rank + 1)
    }

    pub fn best(&self) -> Option<&RunRecord> {
        self.entries.first()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(score: u64, distance: f32) -> RunRecord {
        RunRecord {
            seed: 0,
            score,
            distance,
            ticks: 0,
            cause: Some(GameOverCause::Fell),
        }
    }

    #[test]
    fn test_sorted_by_score_then_distance() {
        let mut scores = SessionScores::new();
        assert_eq!(scores.record(run(3, 100.0)), Some(1));
        assert_eq!(scores.record(run(5, 50.0)), Some(1));
        assert_eq!(scores.record(run(3, 200.0)), Some(2));
        assert_eq!(scores.record(run(0, 10.0)), Some(4));

        let order: Vec<(u64, f32)> = scores.entries.iter().map(|e| (e.score, e.distance)).collect();
        assert_eq!(order, vec![(5, 50.0), (3, 200.0), (3, 100.0), (0, 10.0)]);
        assert_eq!(scores.best().map(|r| r.score), Some(5));
    }

    #[test]
    fn test_board_keeps_top_ten() {
        let mut scores = SessionScores::new();
        for s in 1..=12 {
            scores.record(run(s, 0.0));
        }
        assert_eq!(scores.entries.len(), MAX_SESSION_RUNS);
        assert_eq!(scores.runs_played, 12);
        assert_eq!(scores.entries.last().map(|r| r.score), Some(3));

        // Worse than everything on a full board
        assert_eq!(scores.record(run(1, 0.0)), None);
    }

    #[test]
    fn test_record_from_state() {
        let mut state = GameState::new(77);
        state.start();
        state.score = 4;
        state.finish(GameOverCause::Fell);
        let record = RunRecord::from_state(&state);
        assert_eq!(record.seed, 77);
        assert_eq!(record.score, 4);
        assert_eq!(record.cause, Some(GameOverCause::Fell));
    }
}
