//! Fixed timestep simulation tick
//!
//! Advances the entities by one step and reports what happened as events.
//! Phase changes and scoring are left to [`super::machine`].

use super::state::{GameEvent, GamePhase, GameState, Impact};
use crate::consts::MOUNTAIN_SPAN;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap requested since the previous tick
    pub impulse: bool,
}

/// Set the bird's velocity to the flap impulse
///
/// Only has an effect while running; returns the event to report.
pub fn apply_impulse(state: &mut GameState) -> Option<GameEvent> {
    if state.phase != GamePhase::Running {
        return None;
    }
    state.bird.velocity = state.tuning.impulse;
    Some(GameEvent::ImpulseApplied)
}

/// Advance the game state by one fixed timestep
///
/// Does nothing outside [`GamePhase::Running`].
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Running {
        return events;
    }

    if input.impulse {
        events.extend(apply_impulse(state));
    }

    // Spawn cadence keys off the counter before this tick's increment
    let frame = state.time_ticks;
    let tuning = &state.tuning;

    // Integrate bird
    let bird = &mut state.bird;
    bird.velocity += tuning.gravity;
    bird.pos.y += bird.velocity;
    bird.rotation =
        (bird.velocity * tuning.rotation_factor).clamp(-tuning.max_rotation, tuning.max_rotation);

    // Ground ends the tick
    let ground_y = state.surface.ground_y();
    if bird.bottom() > ground_y {
        bird.pos.y = ground_y - bird.height / 2.0;
        events.push(GameEvent::Collided(Impact::Ground));
        return events;
    }

    // Ceiling is a soft boundary
    if bird.top() < 0.0 {
        bird.pos.y = bird.height / 2.0;
        bird.velocity = 0.0;
    }

    // Scroll pipes and score the ones the bird has passed
    let bird_x = bird.pos.x;
    let speed = tuning.pipe_speed;
    for pipe in &mut state.pipes {
        pipe.x -= speed;
        if !pipe.scored && pipe.trailing_edge() < bird_x {
            pipe.scored = true;
            events.push(GameEvent::ObstacleCleared { pipe_id: pipe.id });
        }
    }
    state.pipes.retain(|p| p.trailing_edge() > 0.0);

    if frame.is_multiple_of(state.tuning.pipe_spawn_interval) {
        state.spawn_pipe();
    }

    advance_decorations(state);

    // Unrotated box against both segments of every pipe
    let bird_box = state.bird.bounds();
    let surface_height = state.surface.height;
    let hit = state
        .pipes
        .iter()
        .find(|p| {
            bird_box.overlaps(&p.top_bounds()) || bird_box.overlaps(&p.bottom_bounds(surface_height))
        })
        .map(|p| p.id);
    if let Some(id) = hit {
        events.push(GameEvent::Collided(Impact::Pipe { id }));
    }

    age_particles(state);
    state.score_pop_ticks = state.score_pop_ticks.saturating_sub(1);
    state.time_ticks += 1;

    events
}

/// Keep the background alive on the menu and game-over screens
///
/// Only decorations, particles and the score pop move; gameplay state is untouched.
pub fn animate_ambient(state: &mut GameState) {
    if state.phase == GamePhase::Running {
        return;
    }
    advance_decorations(state);
    age_particles(state);
    state.score_pop_ticks = state.score_pop_ticks.saturating_sub(1);
}

/// Scroll clouds and mountains, wrapping them back to the right edge
fn advance_decorations(state: &mut GameState) {
    let width = state.surface.width;
    for cloud in &mut state.clouds {
        cloud.x -= cloud.speed;
        if cloud.x + cloud.width < 0.0 {
            cloud.x = width;
        }
    }
    for mountain in &mut state.mountains {
        mountain.x -= mountain.speed;
        if mountain.x + MOUNTAIN_SPAN < 0.0 {
            mountain.x = width;
        }
    }
}

/// Move particles along their velocity and drop expired ones
fn age_particles(state: &mut GameState) {
    for particle in &mut state.particles {
        particle.pos += particle.vel;
        particle.life = particle.life.saturating_sub(1);
    }
    state.particles.retain(|p| p.life > 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::Pipe;
    use crate::tuning::{Surface, Tuning};
    use glam::Vec2;

    fn running(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Surface::new(800.0, 600.0).unwrap(), Tuning::default());
        state.phase = GamePhase::Running;
        state
    }

    fn pipe_at(state: &mut GameState, x: f32, y: f32) -> u32 {
        let id = state.next_entity_id();
        state.pipes.push(Pipe {
            id,
            x,
            y,
            width: PIPE_WIDTH,
            segment_height: PIPE_SEGMENT_HEIGHT,
            gap: PIPE_GAP,
            scored: false,
        });
        id
    }

    #[test]
    fn test_one_tick_of_gravity() {
        let mut state = running(1);
        assert_eq!(state.bird.pos.y, 300.0);

        let events = tick(&mut state, &TickInput::default());
        assert!(events.is_empty());
        assert!((state.bird.velocity - 0.5).abs() < 1e-6);
        assert!((state.bird.pos.y - 300.5).abs() < 1e-6);
        assert!((state.bird.rotation - 0.025).abs() < 1e-6);
    }

    #[test]
    fn test_rotation_is_clamped() {
        let mut state = running(1);
        state.bird.velocity = 30.0;
        state.bird.pos.y = 100.0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.bird.rotation, MAX_ROTATION);

        state.bird.velocity = -40.0;
        state.bird.pos.y = 400.0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.bird.rotation, -MAX_ROTATION);
    }

    #[test]
    fn test_impulse_then_gravity() {
        let mut state = running(1);
        let events = tick(&mut state, &TickInput { impulse: true });
        assert_eq!(events, vec![GameEvent::ImpulseApplied]);
        assert!((state.bird.velocity - (IMPULSE + GRAVITY)).abs() < 1e-6);
        assert!(state.bird.pos.y < 300.0);
    }

    #[test]
    fn test_impulse_ignored_outside_running() {
        let mut state = running(1);
        state.phase = GamePhase::Menu;
        assert_eq!(apply_impulse(&mut state), None);
        assert_eq!(state.bird.velocity, 0.0);

        let events = tick(&mut state, &TickInput { impulse: true });
        assert!(events.is_empty());
        assert_eq!(state.bird.velocity, 0.0);
        assert_eq!(state.bird.pos.y, 300.0);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_ceiling_clamp_zeroes_velocity() {
        let mut state = running(1);
        state.bird.pos.y = 16.0;
        state.bird.velocity = -9.0;
        let events = tick(&mut state, &TickInput::default());
        assert!(events.is_empty());
        assert_eq!(state.bird.pos.y, BIRD_HEIGHT / 2.0);
        assert_eq!(state.bird.velocity, 0.0);
    }

    #[test]
    fn test_ground_collision_ends_tick() {
        let mut state = running(1);
        state.bird.pos.y = 490.0;
        state.bird.velocity = 5.0;
        let events = tick(&mut state, &TickInput::default());
        assert_eq!(events, vec![GameEvent::Collided(Impact::Ground)]);
        assert_eq!(state.bird.bottom(), 500.0);
        // Nothing after the clamp ran: no pipe spawned, counter untouched
        assert!(state.pipes.is_empty());
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_first_tick_spawns_pipe() {
        let mut state = running(1);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.pipes.len(), 1);
        assert_eq!(state.pipes[0].x, 800.0);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_spawn_cadence() {
        let mut state = running(1);
        // Keep the bird hovering mid-screen so it survives
        for _ in 0..(PIPE_SPAWN_INTERVAL * 2 + 1) {
            state.bird.pos.y = 300.0;
            state.bird.velocity = 0.0;
            state.pipes.iter_mut().for_each(|p| p.y = -180.0);
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.pipes.len(), 3);
    }

    #[test]
    fn test_pipe_scored_exactly_once() {
        let mut state = running(1);
        state.time_ticks = 1; // skip the spawn on this tick
        // Trailing edge at 10 + 70 = 80, one step from passing the bird at x=80
        let id = pipe_at(&mut state, 10.0, -300.0);
        state.pipes[0].gap = 2000.0; // nothing to hit

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(events, vec![GameEvent::ObstacleCleared { pipe_id: id }]);
        assert!(state.pipes[0].scored);

        let events = tick(&mut state, &TickInput::default());
        assert!(events.is_empty());
    }

    #[test]
    fn test_pipe_not_scored_at_exact_edge() {
        let mut state = running(1);
        state.time_ticks = 1;
        pipe_at(&mut state, 13.0, -300.0);
        state.pipes[0].gap = 2000.0;
        // After moving: trailing edge 80 == bird x, not strictly behind
        let events = tick(&mut state, &TickInput::default());
        assert!(events.is_empty());
        assert!(!state.pipes[0].scored);
    }

    #[test]
    fn test_pipe_expires_after_crossing_screen() {
        let mut state = running(1);
        state.tuning.pipe_spawn_interval = 10_000;
        state.time_ticks = 1;
        state.spawn_pipe();
        let id = state.pipes[0].id;
        state.pipes[0].gap = 2000.0;

        let ticks = ((800.0 + PIPE_WIDTH) / PIPE_SPEED).ceil() as u32;
        for i in 0..ticks {
            if i + 1 < ticks {
                assert!(state.pipes.iter().any(|p| p.id == id));
            }
            state.bird.pos.y = 300.0;
            state.bird.velocity = 0.0;
            tick(&mut state, &TickInput::default());
        }
        assert!(state.pipes.iter().all(|p| p.id != id));
    }

    #[test]
    fn test_top_segment_collision() {
        let mut state = running(1);
        state.time_ticks = 1;
        // Top segment spans y in [-100, 300) and covers the bird horizontally
        let id = pipe_at(&mut state, 63.0, -100.0);
        let events = tick(&mut state, &TickInput::default());
        assert_eq!(events, vec![GameEvent::Collided(Impact::Pipe { id })]);
    }

    #[test]
    fn test_top_segment_blocks_above_its_start() {
        let mut state = running(1);
        state.time_ticks = 1;
        // Segment starts below the ceiling; the bird is pinned above it
        let id = pipe_at(&mut state, 63.0, 50.0);
        state.bird.pos.y = BIRD_HEIGHT / 2.0;
        state.bird.velocity = -9.0;
        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.bird.top(), 0.0);
        assert_eq!(events, vec![GameEvent::Collided(Impact::Pipe { id })]);
    }

    #[test]
    fn test_bottom_segment_collision() {
        let mut state = running(1);
        state.time_ticks = 1;
        // Gap from 50 to 210, bird box 285..315 sits in the lower segment
        let id = pipe_at(&mut state, 63.0, -350.0);
        let events = tick(&mut state, &TickInput::default());
        assert_eq!(events, vec![GameEvent::Collided(Impact::Pipe { id })]);
    }

    #[test]
    fn test_bird_in_gap_survives() {
        let mut state = running(1);
        state.time_ticks = 1;
        // Gap from 220 to 380 around the bird at 300
        pipe_at(&mut state, 63.0, -180.0);
        let events = tick(&mut state, &TickInput::default());
        assert!(events.is_empty());
    }

    #[test]
    fn test_one_collision_event_per_tick() {
        let mut state = running(1);
        state.time_ticks = 1;
        pipe_at(&mut state, 63.0, -100.0);
        pipe_at(&mut state, 70.0, -100.0);
        let events = tick(&mut state, &TickInput::default());
        let hits = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Collided(_)))
            .count();
        assert_eq!(hits, 1);
    }

    #[test]
    fn test_decorations_wrap() {
        let mut state = running(1);
        state.clouds[0].x = -state.clouds[0].width;
        state.mountains[0].x = -MOUNTAIN_SPAN;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.clouds[0].x, 800.0);
        assert_eq!(state.mountains[0].x, 800.0);
    }

    #[test]
    fn test_particles_age_and_expire() {
        let mut state = running(1);
        state.spawn_burst(Vec2::new(100.0, 100.0), 4, [1.0; 4]);
        let start: Vec<Vec2> = state.particles.iter().map(|p| p.pos + p.vel).collect();

        tick(&mut state, &TickInput::default());
        assert_eq!(state.particles.len(), 4);
        assert!(state.particles.iter().all(|p| p.life == PARTICLE_LIFE - 1));
        for (p, expected) in state.particles.iter().zip(&start) {
            assert_eq!(p.pos, *expected);
        }

        for _ in 1..PARTICLE_LIFE {
            animate_ambient_for_test(&mut state);
        }
        assert!(state.particles.is_empty());
    }

    fn animate_ambient_for_test(state: &mut GameState) {
        state.phase = GamePhase::GameOver;
        animate_ambient(state);
    }

    #[test]
    fn test_ambient_leaves_gameplay_alone() {
        let mut state = running(1);
        state.phase = GamePhase::GameOver;
        state.bird.pos.y = 200.0;
        pipe_at(&mut state, 400.0, -150.0);
        let cloud_x = state.clouds[0].x;

        animate_ambient(&mut state);
        assert_eq!(state.bird.pos.y, 200.0);
        assert_eq!(state.pipes[0].x, 400.0);
        assert_eq!(state.time_ticks, 0);
        assert_ne!(state.clouds[0].x, cloud_x);
    }

    #[test]
    fn test_determinism() {
        let mut a = running(99);
        let mut b = running(99);
        for i in 0..500 {
            let input = TickInput { impulse: i % 25 == 0 };
            let ea = tick(&mut a, &input);
            let eb = tick(&mut b, &input);
            assert_eq!(ea, eb);
        }
        assert_eq!(a.bird, b.bird);
        assert_eq!(a.pipes, b.pipes);
        assert_eq!(a.time_ticks, b.time_ticks);
    }
}
