//! Vertex type for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::theme::Color;

/// 2D vertex with position and color
///
/// Scene code fills `position` in canvas pixels; the pipeline rewrites it to
/// NDC just before upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Color,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn at(pos: Vec2, color: Color) -> Self {
        Self::new(pos.x, pos.y, color)
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::from(self.position)
    }

    /// Move by a pixel offset (camera shake)
    pub fn translate(&mut self, offset: Vec2) {
        self.position[0] += offset.x;
        self.position[1] += offset.y;
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
            wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        assert_eq!(Vertex::desc().array_stride, 24);
    }

    #[test]
    fn test_translate() {
        let mut v = Vertex::new(1.0, 2.0, [1.0; 4]);
        v.translate(Vec2::new(-3.0, 0.5));
        assert_eq!(v.pos(), Vec2::new(-2.0, 2.5));
    }
}
