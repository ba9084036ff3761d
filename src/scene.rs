use std::sync::Arc;

use cgmath::{Matrix4, Rad, Vector3};
use wgpu::util::DeviceExt;
use wgpu::{Adapter, Device, Queue, Surface};

use crate::camera::CameraRig;
use crate::carousel::CarouselState;
use crate::slide::SlideData;
use crate::vertex::{card_quad_vertices, CARD_QUAD_INDICES};

pub const CARD_WIDTH: f32 = 4.5;
pub const CARD_HEIGHT: f32 = 3.0;

/// GPU resources wrapper shared with the embedding shell. The shell owns
/// adapter/device creation; the scene only borrows handles from here.
#[derive(Clone)]
pub struct GpuResources {
    pub surface: Option<Arc<Surface<'static>>>,
    pub device: Arc<Device>,
    pub queue: Arc<Queue>,
}

impl GpuResources {
    pub fn new(_adapter: Adapter, device: Device, queue: Queue) -> Self {
        Self {
            surface: None,
            device: Arc::new(device),
            queue: Arc::new(queue),
        }
    }

    pub fn with_surface(
        _adapter: Adapter,
        device: Device,
        queue: Queue,
        surface: Arc<Surface<'static>>,
    ) -> Self {
        Self {
            surface: Some(surface),
            device: Arc::new(device),
            queue: Arc::new(queue),
        }
    }

    pub fn from_shared(device: Arc<Device>, queue: Arc<Queue>) -> Self {
        Self {
            surface: None,
            device,
            queue,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        use cgmath::SquareMatrix;
        Self {
            view_proj: Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, rig: &CameraRig) {
        self.view_proj = rig.view_projection().into();
    }
}

pub struct CameraBinding {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
    pub uniform: CameraUniform,
}

impl CameraBinding {
    pub fn new(device: &wgpu::Device) -> Self {
        let uniform = CameraUniform::new();

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Carousel Camera Uniform Buffer"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Carousel Camera Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(
                        std::num::NonZeroU64::new(std::mem::size_of::<CameraUniform>() as u64)
                            .expect("uniform size is nonzero"),
                    ),
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Carousel Camera Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            buffer,
            bind_group,
            bind_group_layout,
            uniform,
        }
    }

    pub fn update(&mut self, queue: &wgpu::Queue, rig: &CameraRig) {
        self.uniform.update_view_proj(rig);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform.view_proj]));
    }
}

/// Model matrix placing card `index` on the ring: translate to its polar
/// position, then yaw so the face points outward.
pub fn card_model_matrix(carousel: &CarouselState, index: usize, radius: f32) -> Matrix4<f32> {
    let placement = carousel.card_placement(index, radius);
    let translation = Matrix4::from_translation(Vector3::new(placement.x, 0.0, placement.z));
    let rotation = Matrix4::from_angle_y(Rad(placement.angle));
    translation * rotation
}

/// Ring rotation applied above every card, driven by the interaction state.
pub fn ring_rotation_matrix(carousel: &CarouselState) -> Matrix4<f32> {
    Matrix4::from_angle_y(Rad(carousel.rotation))
}

pub struct CardMesh {
    pub slide_id: String,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
    pub model_buffer: wgpu::Buffer,
    pub model_bind_group: wgpu::BindGroup,
}

impl CardMesh {
    fn new(
        device: &wgpu::Device,
        model_bind_group_layout: &wgpu::BindGroupLayout,
        slide_id: &str,
    ) -> Self {
        let vertices = card_quad_vertices(CARD_WIDTH, CARD_HEIGHT, [1.0, 1.0, 1.0, 1.0]);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Card Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Card Index Buffer"),
            contents: bytemuck::cast_slice(&CARD_QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let model_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Card Model Uniform Buffer"),
            size: std::mem::size_of::<[[f32; 4]; 4]>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let model_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Card Model Bind Group"),
            layout: model_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: model_buffer.as_entire_binding(),
            }],
        });

        Self {
            slide_id: slide_id.to_string(),
            vertex_buffer,
            index_buffer,
            index_count: CARD_QUAD_INDICES.len() as u32,
            model_buffer,
            model_bind_group,
        }
    }

    fn write_model(&self, queue: &wgpu::Queue, matrix: Matrix4<f32>) {
        let raw: [[f32; 4]; 4] = matrix.into();
        queue.write_buffer(&self.model_buffer, 0, bytemuck::cast_slice(&raw));
    }
}

/// GPU-side state for the dashboard's 3D view: one quad per slide plus the
/// camera binding. Built when the view mounts, disposed when the
/// application switches away from it.
pub struct CarouselScene {
    pub cards: Vec<CardMesh>,
    pub camera_binding: CameraBinding,
    pub model_bind_group_layout: wgpu::BindGroupLayout,
    disposed: bool,
}

impl CarouselScene {
    pub fn new(gpu: &GpuResources, slides: &[SlideData]) -> Self {
        let device = gpu.device.as_ref();

        let camera_binding = CameraBinding::new(device);

        let model_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Card Model Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let cards = slides
            .iter()
            .map(|slide| CardMesh::new(device, &model_bind_group_layout, &slide.id))
            .collect();

        Self {
            cards,
            camera_binding,
            model_bind_group_layout,
            disposed: false,
        }
    }

    /// Per-frame upload: ring placement for every card and the camera
    /// view-projection.
    pub fn update(
        &mut self,
        gpu: &GpuResources,
        carousel: &CarouselState,
        rig: &CameraRig,
        radius: f32,
    ) {
        let queue = gpu.queue.as_ref();
        let ring = ring_rotation_matrix(carousel);
        for (i, card) in self.cards.iter().enumerate() {
            card.write_model(queue, ring * card_model_matrix(carousel, i, radius));
        }
        self.camera_binding.update(queue, rig);
    }

    /// Release GPU allocations eagerly rather than waiting for drop. The
    /// platform caps concurrently live contexts, so view switches must not
    /// strand buffers behind a lingering reference.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        for card in &self.cards {
            card.vertex_buffer.destroy();
            card.index_buffer.destroy();
            card.model_buffer.destroy();
        }
        self.camera_binding.buffer.destroy();
        self.cards.clear();
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Drop for CarouselScene {
    fn drop(&mut self) {
        self.dispose();
    }
}
