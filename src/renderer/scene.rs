//! Frame assembly
//!
//! Turns a read-only [`Snapshot`] into one triangle list, back to front.

use glam::Vec2;
use std::f32::consts::FRAC_PI_4;

use super::shapes::{Frame2, circle, ellipse, gradient_rect, rect, triangle};
use super::vertex::{Vertex, colors};
use crate::consts::MOUNTAIN_SPAN;
use crate::sim::{Bird, Cloud, Mountain, Particle, Pipe, Snapshot};

const CIRCLE_SEGMENTS: u32 = 20;
/// Spacing of the grass tufts along the ground
const GRASS_STEP: usize = 25;
/// Spacing of the stripes down a pipe
const STRIPE_STEP: usize = 30;

/// Build every vertex for the current frame
pub fn build_frame(snap: &Snapshot<'_>) -> Vec<Vertex> {
    let mut v = Vec::with_capacity(4096);
    let frames = snap.time_ticks as f32;

    background(&mut v, snap, frames);
    for pipe in snap.pipes {
        pipe_shapes(&mut v, pipe, snap.surface.height);
    }
    bird_shapes(&mut v, snap.bird, frames);
    let full_life = snap.tuning.particle_life.max(1) as f32;
    for particle in snap.particles {
        particle_shape(&mut v, particle, full_life);
    }

    v
}

fn background(v: &mut Vec<Vertex>, snap: &Snapshot<'_>, frames: f32) {
    let surface = snap.surface;
    let ground_y = surface.ground_y();

    v.extend(gradient_rect(
        0.0,
        0.0,
        surface.width,
        surface.height,
        colors::SKY_TOP,
        colors::SKY_BOTTOM,
    ));

    // Sun
    let sun = Vec2::new(300.0, 80.0);
    v.extend(circle(sun, 40.0, colors::SUN_OUTER, CIRCLE_SEGMENTS * 2));
    v.extend(circle(sun, 30.0, colors::SUN_INNER, CIRCLE_SEGMENTS * 2));

    for cloud in snap.clouds {
        cloud_shapes(v, cloud);
    }
    for mountain in snap.mountains {
        mountain_shapes(v, mountain, ground_y);
    }

    v.extend(gradient_rect(
        0.0,
        ground_y,
        surface.width,
        surface.ground_height,
        colors::GROUND_TOP,
        colors::GROUND_BOTTOM,
    ));

    // Grass sways with the tick counter
    for i in (0..surface.width.max(0.0) as usize).step_by(GRASS_STEP) {
        let x = i as f32;
        let h = ((x + frames) * 0.1).sin() * 3.0 + 8.0;
        v.extend(rect(x, ground_y, 15.0, h, colors::GRASS));
    }
}

fn cloud_shapes(v: &mut Vec<Vertex>, cloud: &Cloud) {
    let w = cloud.width;
    let puffs = [
        (0.0, 0.0, w / 4.0),
        (w / 3.0, -w / 6.0, w / 4.0),
        (w / 2.0, 0.0, w / 4.0),
        (w / 1.5, -w / 6.0, w / 5.0),
    ];
    for (dx, dy, r) in puffs {
        v.extend(circle(
            Vec2::new(cloud.x + dx, cloud.y + dy),
            r,
            colors::CLOUD,
            CIRCLE_SEGMENTS,
        ));
    }
}

fn mountain_shapes(v: &mut Vec<Vertex>, mountain: &Mountain, ground_y: f32) {
    let x = mountain.x;
    let h = mountain.height;
    v.extend(triangle(
        Vec2::new(x, ground_y),
        Vec2::new(x + 100.0, ground_y - h),
        Vec2::new(x + 200.0, ground_y),
        colors::MOUNTAIN,
    ));
    v.extend(triangle(
        Vec2::new(x + 150.0, ground_y),
        Vec2::new(x + 200.0, ground_y - h * 0.8),
        Vec2::new(x + MOUNTAIN_SPAN, ground_y),
        colors::MOUNTAIN_BACK,
    ));
}

fn pipe_shapes(v: &mut Vec<Vertex>, pipe: &Pipe, surface_height: f32) {
    let (x, w) = (pipe.x, pipe.width);

    // Upper segment reaches the top of the surface, with its cap at the gap
    let top_y = pipe.y.min(0.0);
    let top_h = pipe.gap_top() - top_y;
    v.extend(gradient_rect(
        x,
        top_y,
        w,
        top_h,
        colors::PIPE_LIGHT,
        colors::PIPE_DARK,
    ));
    v.extend(rect(x - 5.0, pipe.gap_top() - 25.0, w + 10.0, 25.0, colors::PIPE_CAP));

    // Lower segment down to the bottom of the surface
    let bottom_y = pipe.gap_bottom();
    let bottom_h = surface_height - bottom_y;
    v.extend(gradient_rect(
        x,
        bottom_y,
        w,
        bottom_h,
        colors::PIPE_LIGHT,
        colors::PIPE_DARK,
    ));
    v.extend(rect(x - 5.0, bottom_y, w + 10.0, 25.0, colors::PIPE_CAP));

    for i in (0..top_h.max(0.0) as usize).step_by(STRIPE_STEP) {
        v.extend(rect(x + 10.0, top_y + i as f32, w - 20.0, 10.0, colors::PIPE_STRIPE));
    }
    for i in (0..bottom_h.max(0.0) as usize).step_by(STRIPE_STEP) {
        v.extend(rect(x + 10.0, bottom_y + i as f32, w - 20.0, 10.0, colors::PIPE_STRIPE));
    }
}

fn bird_shapes(v: &mut Vec<Vertex>, bird: &Bird, frames: f32) {
    let frame = Frame2::new(bird.pos, bird.rotation);

    // Body
    v.extend(ellipse(
        frame,
        Vec2::ZERO,
        Vec2::new(bird.width / 2.0, bird.height / 2.0),
        0.0,
        colors::BIRD_CENTER,
        colors::BIRD_EDGE,
        CIRCLE_SEGMENTS,
    ));

    // Wing beats with the tick counter
    let wing_y = (frames * 0.3).sin() * 5.0;
    v.extend(ellipse(
        frame,
        Vec2::new(-8.0, wing_y),
        Vec2::new(12.0, 8.0),
        FRAC_PI_4,
        colors::WING,
        colors::WING,
        CIRCLE_SEGMENTS,
    ));

    // Eye
    v.extend(ellipse(
        frame,
        Vec2::new(12.0, -8.0),
        Vec2::splat(6.0),
        0.0,
        colors::EYE,
        colors::EYE,
        CIRCLE_SEGMENTS,
    ));
    v.extend(ellipse(
        frame,
        Vec2::new(14.0, -8.0),
        Vec2::splat(3.0),
        0.0,
        colors::PUPIL,
        colors::PUPIL,
        CIRCLE_SEGMENTS / 2,
    ));

    // Beak
    v.extend(triangle(
        frame.apply(Vec2::new(20.0, 0.0)),
        frame.apply(Vec2::new(35.0, -5.0)),
        frame.apply(Vec2::new(35.0, 5.0)),
        colors::BEAK,
    ));
}

fn particle_shape(v: &mut Vec<Vertex>, particle: &Particle, full_life: f32) {
    let alpha = (particle.life as f32 / full_life).clamp(0.0, 1.0) * particle.color[3];
    v.extend(circle(
        particle.pos,
        particle.size,
        colors::with_alpha(particle.color, alpha),
        CIRCLE_SEGMENTS / 2,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GamePhase, GameState, TickInput, start_game, tick};
    use crate::tuning::{Surface, Tuning};

    fn state() -> GameState {
        GameState::new(8, Surface::new(800.0, 600.0).unwrap(), Tuning::default())
    }

    #[test]
    fn test_menu_frame_has_background() {
        let state = state();
        let verts = build_frame(&state.snapshot());
        assert!(!verts.is_empty());
        assert_eq!(verts.len() % 3, 0);
        // Sky quad comes first and spans the surface
        assert_eq!(verts[0].position, [0.0, 0.0]);
        assert_eq!(verts[4].position, [800.0, 600.0]);
    }

    #[test]
    fn test_pipes_and_particles_add_geometry() {
        let mut state = state();
        let empty = build_frame(&state.snapshot()).len();

        start_game(&mut state);
        assert_eq!(state.phase, GamePhase::Running);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.pipes.len(), 1);
        let with_pipe = build_frame(&state.snapshot()).len();
        assert!(with_pipe > empty);

        let pos = state.bird.pos;
        state.spawn_burst(pos, 5, [1.0, 0.0, 0.0, 1.0]);
        let with_particles = build_frame(&state.snapshot()).len();
        assert_eq!(with_particles, with_pipe + 5 * (CIRCLE_SEGMENTS / 2) as usize * 3);
    }

    #[test]
    fn test_particles_fade_with_life() {
        let mut v = Vec::new();
        let particle = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: 3.0,
            color: [1.0, 1.0, 1.0, 1.0],
            life: 15,
        };
        particle_shape(&mut v, &particle, 30.0);
        assert!((v[0].color[3] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_frame_is_read_only() {
        let state = state();
        let before = state.bird.clone();
        let _ = build_frame(&state.snapshot());
        assert_eq!(state.bird, before);
    }
}
