//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    /// 0xRRGGBB to RGBA
    pub const fn rgb(hex: u32) -> [f32; 4] {
        [
            ((hex >> 16) & 0xFF) as f32 / 255.0,
            ((hex >> 8) & 0xFF) as f32 / 255.0,
            (hex & 0xFF) as f32 / 255.0,
            1.0,
        ]
    }

    /// Same color with a different alpha
    pub const fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
        [color[0], color[1], color[2], alpha]
    }

    pub const SKY_TOP: [f32; 4] = rgb(0x87CEEB);
    pub const SKY_BOTTOM: [f32; 4] = rgb(0x98D8F0);
    pub const SUN_OUTER: [f32; 4] = rgb(0xFFD700);
    pub const SUN_INNER: [f32; 4] = rgb(0xFFA500);
    pub const CLOUD: [f32; 4] = [1.0, 1.0, 1.0, 0.9];
    pub const MOUNTAIN: [f32; 4] = rgb(0x7E8C7D);
    pub const MOUNTAIN_BACK: [f32; 4] = rgb(0x6A7B6A);
    pub const GROUND_TOP: [f32; 4] = rgb(0x8BC34A);
    pub const GROUND_BOTTOM: [f32; 4] = rgb(0x7CB342);
    pub const GRASS: [f32; 4] = rgb(0x7CB342);
    pub const PIPE_LIGHT: [f32; 4] = rgb(0x4CAF50);
    pub const PIPE_DARK: [f32; 4] = rgb(0x388E3C);
    pub const PIPE_CAP: [f32; 4] = rgb(0x2E7D32);
    pub const PIPE_STRIPE: [f32; 4] = rgb(0x81C784);
    pub const BIRD_CENTER: [f32; 4] = rgb(0xFFEA00);
    pub const BIRD_EDGE: [f32; 4] = rgb(0xFFA000);
    pub const WING: [f32; 4] = rgb(0xFF8A00);
    pub const EYE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PUPIL: [f32; 4] = rgb(0x333333);
    pub const BEAK: [f32; 4] = rgb(0xFF6B6B);
}
