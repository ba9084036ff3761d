use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3], // x, y, z coordinates
    pub tex_coords: [f32; 2], // u, v coordinates
    pub color: [f32; 4],
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32, u: f32, v: f32, color: [f32; 4]) -> Self {
        Vertex {
            position: [x, y, z],
            tex_coords: [u, v],
            color,
        }
    }

    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3, // x3 for position
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2, // x2 for uv
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 5]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4, // x4 for color
                },
            ],
        }
    }
}

/// One slide card is a unit quad in card-local space, centered at the
/// origin and facing +Z; the model matrix places it on the ring.
pub fn card_quad_vertices(width: f32, height: f32, color: [f32; 4]) -> [Vertex; 4] {
    let hw = width / 2.0;
    let hh = height / 2.0;
    [
        Vertex::new(-hw, hh, 0.0, 0.0, 0.0, color),
        Vertex::new(hw, hh, 0.0, 1.0, 0.0, color),
        Vertex::new(-hw, -hh, 0.0, 0.0, 1.0, color),
        Vertex::new(hw, -hh, 0.0, 1.0, 1.0, color),
    ]
}

pub const CARD_QUAD_INDICES: [u16; 6] = [0, 2, 1, 1, 2, 3];
