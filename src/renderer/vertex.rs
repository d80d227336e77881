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
}

/// Colors for game elements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Canvas clear color, handed to the page
    pub background: [f32; 4],
    pub floor: [f32; 4],
    pub player: [f32; 4],
    pub monster: [f32; 4],
    pub monster_eye: [f32; 4],
    pub spike: [f32; 4],
    pub block: [f32; 4],
    pub rotator: [f32; 4],
    pub moving_block: [f32; 4],
    pub portal: [f32; 4],
    pub dust: [f32; 4],
    pub burst: [f32; 4],
}

/// Neon on near-black
pub const NEON: Palette = Palette {
    background: [0.02, 0.02, 0.05, 1.0],
    floor: [0.3, 0.3, 0.4, 1.0],
    player: [0.0, 1.0, 1.0, 1.0], // Cyan
    monster: [0.55, 0.1, 0.6, 1.0],
    monster_eye: [1.0, 0.9, 0.2, 1.0],
    spike: [1.0, 0.15, 0.15, 1.0],
    block: [1.0, 0.45, 0.2, 1.0],
    rotator: [0.9, 0.85, 0.3, 1.0],
    moving_block: [0.4, 0.7, 1.0, 1.0],
    portal: [0.6, 0.2, 0.8, 1.0],
    dust: [0.7, 0.7, 0.75, 0.8],
    burst: [1.0, 0.6, 0.2, 1.0],
};

/// Flat white-on-black for the high contrast setting
pub const HIGH_CONTRAST: Palette = Palette {
    background: [0.0, 0.0, 0.0, 1.0],
    floor: [1.0, 1.0, 1.0, 1.0],
    player: [0.0, 1.0, 0.0, 1.0],
    monster: [1.0, 0.0, 1.0, 1.0],
    monster_eye: [0.0, 0.0, 0.0, 1.0],
    spike: [1.0, 0.0, 0.0, 1.0],
    block: [1.0, 0.0, 0.0, 1.0],
    rotator: [1.0, 0.0, 0.0, 1.0],
    moving_block: [1.0, 0.0, 0.0, 1.0],
    portal: [1.0, 1.0, 0.0, 1.0],
    dust: [1.0, 1.0, 1.0, 1.0],
    burst: [1.0, 1.0, 1.0, 1.0],
};
