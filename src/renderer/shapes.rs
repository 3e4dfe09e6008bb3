//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list in surface pixels.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// Rotation + translation applied to shapes authored around a local origin
#[derive(Debug, Clone, Copy)]
pub struct Frame2 {
    pub origin: Vec2,
    pub rotation: f32,
}

impl Frame2 {
    pub fn new(origin: Vec2, rotation: f32) -> Self {
        Self { origin, rotation }
    }

    /// Local point to surface pixels
    #[inline]
    pub fn apply(&self, local: Vec2) -> Vec2 {
        self.origin + Vec2::from_angle(self.rotation).rotate(local)
    }
}

impl Default for Frame2 {
    fn default() -> Self {
        Self::new(Vec2::ZERO, 0.0)
    }
}

/// Filled axis-aligned rectangle
pub fn rect(x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) -> Vec<Vertex> {
    gradient_rect(x, y, w, h, color, color)
}

/// Rectangle with a vertical gradient from `top` to `bottom`
pub fn gradient_rect(x: f32, y: f32, w: f32, h: f32, top: [f32; 4], bottom: [f32; 4]) -> Vec<Vertex> {
    if w <= 0.0 || h <= 0.0 {
        return Vec::new();
    }
    let (x2, y2) = (x + w, y + h);
    vec![
        Vertex::new(x, y, top),
        Vertex::new(x2, y, top),
        Vertex::new(x, y2, bottom),
        Vertex::new(x2, y, top),
        Vertex::new(x2, y2, bottom),
        Vertex::new(x, y2, bottom),
    ]
}

/// Filled triangle
pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    ellipse(
        Frame2::new(center, 0.0),
        Vec2::ZERO,
        Vec2::splat(radius),
        0.0,
        color,
        color,
        segments,
    )
}

/// Filled ellipse as a triangle fan
///
/// `center` and `tilt` are local to `frame`; `inner` colors the middle of the
/// fan and `outer` the rim, which gives a cheap radial gradient.
pub fn ellipse(
    frame: Frame2,
    center: Vec2,
    radii: Vec2,
    tilt: f32,
    inner: [f32; 4],
    outer: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    let axes = Vec2::from_angle(tilt);
    let rim = |i: u32| {
        let theta = (i as f32 / segments as f32) * TAU;
        let local = center + axes.rotate(Vec2::new(radii.x * theta.cos(), radii.y * theta.sin()));
        frame.apply(local)
    };
    let mid = frame.apply(center);

    for i in 0..segments {
        let p1 = rim(i);
        let p2 = rim(i + 1);

        // Triangle from center to edge
        vertices.push(Vertex::new(mid.x, mid.y, inner));
        vertices.push(Vertex::new(p1.x, p1.y, outer));
        vertices.push(Vertex::new(p2.x, p2.y, outer));
    }

    vertices
}
