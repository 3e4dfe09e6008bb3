//! Game session
//!
//! Owns the simulation state, the best score store, the queued flap and the
//! fixed-step clock. Frontends feed it actions and elapsed time, then draw
//! `snapshot()` and play sounds for the returned events.

use crate::persistence::ScoreStore;
use crate::platform::{Action, FixedStep};
use crate::sim::{
    GameEvent, GamePhase, GameState, Impact, Snapshot, TickInput, animate_ambient, resolve,
    start_game, tick,
};
use crate::tuning::{ConfigError, Surface, Tuning};

/// One player's game, from the title screen onwards
pub struct Session<S: ScoreStore> {
    state: GameState,
    store: S,
    clock: FixedStep,
    /// One-shot inputs for the next tick
    input: TickInput,
}

impl<S: ScoreStore> Session<S> {
    /// Create a session on the menu, reading the best score from `store`
    ///
    /// Fails if the bird cannot fit between the ceiling and the ground.
    pub fn new(surface: Surface, tuning: Tuning, seed: u64, store: S) -> Result<Self, ConfigError> {
        tuning.check_surface(&surface)?;
        let mut state = GameState::new(seed, surface, tuning);
        state.best_score = match store.load() {
            Ok(best) => best.unwrap_or(0),
            Err(e) => {
                log::warn!("Could not read best score, starting from 0: {}", e);
                0
            }
        };
        log::info!("Session ready (seed {}, best {})", seed, state.best_score);

        Ok(Self {
            state,
            store,
            clock: FixedStep::default(),
            input: TickInput::default(),
        })
    }

    /// React to a translated input
    pub fn handle(&mut self, action: Action) {
        match action {
            Action::Start => self.start(),
            Action::Flap => self.request_impulse(),
            Action::ActionKey => {
                if self.state.phase == GamePhase::GameOver {
                    self.start();
                }
                self.request_impulse();
            }
            // Sound is the frontend's business
            Action::ToggleMute => {}
        }
    }

    /// Start a new run (ignored while one is in progress)
    pub fn start(&mut self) {
        if start_game(&mut self.state) {
            self.input = TickInput::default();
            self.clock.reset();
            log::info!("Run started");
        }
    }

    /// Queue a flap for the next tick; dropped unless running
    pub fn request_impulse(&mut self) {
        if self.state.phase == GamePhase::Running {
            self.input.impulse = true;
        }
    }

    /// Run exactly one fixed tick
    pub fn step(&mut self) -> Vec<GameEvent> {
        if self.state.phase != GamePhase::Running {
            animate_ambient(&mut self.state);
            return Vec::new();
        }

        let input = std::mem::take(&mut self.input);
        let events = tick(&mut self.state, &input);
        let resolution = resolve(&mut self.state, &events);

        if resolution.game_over {
            let cause = events.iter().find_map(|e| match e {
                GameEvent::Collided(impact) => Some(*impact),
                _ => None,
            });
            log::info!(
                "Game over: score {} ({})",
                self.state.score,
                match cause {
                    Some(Impact::Pipe { id }) => format!("hit pipe {}", id),
                    _ => "hit the ground".to_string(),
                }
            );
        }
        if let Some(best) = resolution.new_best {
            log::info!("New best score: {}", best);
            if let Err(e) = self.store.save(best) {
                log::warn!("Could not save best score: {}", e);
            }
        }

        events
    }

    /// Feed elapsed wall-clock seconds and run the ticks they add up to
    pub fn advance(&mut self, dt: f32) -> Vec<GameEvent> {
        let steps = self.clock.advance(dt);
        let mut events = Vec::new();
        for _ in 0..steps {
            events.extend(self.step());
        }
        events
    }

    /// Surface changed size; a surface the bird does not fit in is refused
    pub fn resize(&mut self, surface: Surface) -> Result<(), ConfigError> {
        self.state.tuning.check_surface(&surface)?;
        self.state.resize(surface);
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        self.state.snapshot()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn best_score(&self) -> u32 {
        self.state.best_score
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
