use crate::shading::{CameraUniform, ColorVertex, InstanceTransform, TexturedVertex};

use super::{bindings, locations};

// ── vertex buffers ────────────────────────────────────────────────────────

impl ColorVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        locations::POSITION => Float32x3,
        locations::COLOR => Float32x3
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ColorVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

impl TexturedVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        locations::POSITION => Float32x3,
        locations::TEX_COORDS => Float32x2
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TexturedVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

impl InstanceTransform {
    /// One `Float32x4` per column, columns 0..3 at consecutive locations.
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        locations::INSTANCE_COLUMNS[0] => Float32x4,
        locations::INSTANCE_COLUMNS[1] => Float32x4,
        locations::INSTANCE_COLUMNS[2] => Float32x4,
        locations::INSTANCE_COLUMNS[3] => Float32x4
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceTransform>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

// ── bind groups ───────────────────────────────────────────────────────────

/// Bind group layouts shared by every textured / camera-aware pipeline.
///
/// Created once per device. Textures and cameras build their bind groups
/// against these so any of them can be bound to any compatible pipeline.
pub struct BindingLayouts {
    pub texture: wgpu::BindGroupLayout,
    pub camera: wgpu::BindGroupLayout,
}

impl BindingLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        let texture = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("lumen texture bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: bindings::TEXTURE,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: bindings::SAMPLER,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let camera = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("lumen camera bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: bindings::CAMERA,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<CameraUniform>() as u64,
                    ),
                },
                count: None,
            }],
        });

        log::debug!("binding layouts created");

        Self { texture, camera }
    }
}
