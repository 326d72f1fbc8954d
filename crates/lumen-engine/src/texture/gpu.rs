use std::path::Path;

use anyhow::Result;
use image::RgbaImage;
use wgpu::util::DeviceExt;

use crate::pipeline::{bindings, BindingLayouts};

use super::sampler::SamplerConfig;
use super::source::load_image;

/// Texture format every uploaded image uses; the shader sees linear values.
pub const TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// An uploaded 2D texture, its sampler, and the group 0 bind group tying them together.
pub struct GpuTexture {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
    bind_group: wgpu::BindGroup,
    size: (u32, u32),
}

impl GpuTexture {
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layouts: &BindingLayouts,
        image: &RgbaImage,
        sampler: &SamplerConfig,
        label: &str,
    ) -> Self {
        let (width, height) = image.dimensions();

        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: TEXTURE_FORMAT,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            image.as_raw(),
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&sampler.descriptor());

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &layouts.texture,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: bindings::TEXTURE,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: bindings::SAMPLER,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        log::debug!("texture '{label}' uploaded ({width}x{height})");

        Self {
            texture,
            view,
            sampler,
            bind_group,
            size: (width, height),
        }
    }

    /// Loads and uploads an image file. Decoding failures are returned, not replaced.
    pub fn from_path(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layouts: &BindingLayouts,
        path: &Path,
        sampler: &SamplerConfig,
    ) -> Result<Self> {
        let image = load_image(path)?;
        let label = path.display().to_string();
        Ok(Self::from_image(device, queue, layouts, &image, sampler, &label))
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }
}
