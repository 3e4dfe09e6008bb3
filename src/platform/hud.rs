//! HUD text

use crate::sim::Snapshot;

/// Element ids and the text each one shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudText {
    pub score: String,
    /// In-game corner label
    pub best: String,
    /// Score on the game-over screen
    pub final_score: String,
    /// Best score on the game-over screen, separate from the in-game label
    pub final_best: String,
}

impl HudText {
    pub fn new(score: u32, best: u32) -> Self {
        Self {
            score: score.to_string(),
            best: format!("Best: {}", best),
            final_score: score.to_string(),
            final_best: best.to_string(),
        }
    }

    pub fn from_snapshot(snap: &Snapshot<'_>) -> Self {
        Self::new(snap.score, snap.best_score)
    }
}
