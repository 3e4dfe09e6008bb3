//! Session phase transitions
//!
//! Menu -> Running -> GameOver -> Running ... Scoring and the best score are
//! updated here from the events a tick produced.

use super::state::{GameEvent, GamePhase, GameState, palette};
use crate::consts::SCORE_POP_TICKS;

/// Side effects the caller has to carry out after resolving a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolution {
    /// New best score to persist (only set on the game-over transition)
    pub new_best: Option<u32>,
    /// The run ended this tick
    pub game_over: bool,
}

/// Begin a new run from the menu or game-over screen
///
/// Returns `false` (and changes nothing) while a run is already in progress.
pub fn start_game(state: &mut GameState) -> bool {
    if state.phase == GamePhase::Running {
        return false;
    }
    state.score = 0;
    state.time_ticks = 0;
    state.score_pop_ticks = 0;
    state.pipes.clear();
    state.particles.clear();
    let surface = state.surface;
    state.bird.reset(&surface);
    state.phase = GamePhase::Running;
    true
}

/// Apply a tick's events in order
pub fn resolve(state: &mut GameState, events: &[GameEvent]) -> Resolution {
    let mut resolution = Resolution::default();

    for event in events {
        // Nothing counts once the bird has crashed
        if state.phase != GamePhase::Running {
            break;
        }
        let origin = state.bird.pos;
        match event {
            GameEvent::ImpulseApplied => {
                let count = state.tuning.flap_burst;
                state.spawn_burst(origin, count, palette::FLAP);
            }
            GameEvent::ObstacleCleared { .. } => {
                state.score += 1;
                state.score_pop_ticks = SCORE_POP_TICKS;
                let count = state.tuning.score_burst;
                state.spawn_burst(origin, count, palette::SCORE);
            }
            GameEvent::Collided(_) => {
                state.phase = GamePhase::GameOver;
                resolution.game_over = true;
                if state.score > state.best_score {
                    state.best_score = state.score;
                    resolution.new_best = Some(state.score);
                }
                let count = state.tuning.crash_burst;
                state.spawn_burst(origin, count, palette::CRASH);
            }
        }
    }

    resolution
}
