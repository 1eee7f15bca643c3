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

/// View a vertex list as raw bytes for upload to a GPU buffer
pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

/// Colors for non-gameplay elements
pub mod colors {
    /// Overlay drawn over the ball as the turn runs out
    pub const BALL_TIMER: [f32; 4] = [0.0, 0.0, 0.0, 0.4];
    pub const PAUSE_BUTTON: [f32; 4] = [1.0, 1.0, 1.0, 0.8];
}
