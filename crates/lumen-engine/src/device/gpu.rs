use anyhow::{Context, Result};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::surface::{self, Recovery};

/// Startup settings for the device and the window surface.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    ///
    /// Shaders output linear color; an sRGB surface encodes it on store.
    pub prefer_srgb: bool,
    pub present_mode: wgpu::PresentMode,
    /// Falls back to the first supported mode when absent or unsupported.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,
    /// None of the bundled pipelines need any.
    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,
    /// A hint; support depends on the backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}

/// One acquired surface texture and the encoder recording into it.
///
/// Hand it back to [`Gpu::present`]; the next frame cannot be acquired while
/// this one holds the surface texture.
pub struct Frame {
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
    texture: wgpu::SurfaceTexture,
}

/// Device, queue and the window surface they present to.
///
/// The surface borrows the window for `'w`; the window runtime keeps both in one
/// self-referencing entry.
pub struct Gpu<'w> {
    surface: wgpu::Surface<'w>,
    /// Kept to re-query surface capabilities when the surface is reconfigured.
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    prefer_srgb: bool,
    /// May be zero while minimized; the surface keeps its last non-zero extent.
    size: PhysicalSize<u32>,
}

impl<'w> Gpu<'w> {
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let info = adapter.get_info();
        log::info!("adapter: {} ({:?}, {:?})", info.name, info.backend, info.device_type);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("lumen device"),
                required_features: init.required_features,
                required_limits: init.required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let caps = surface.get_capabilities(&adapter);
        let format = surface::choose_format(&caps.formats, None, init.prefer_srgb)
            .context("surface reports no supported formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: init.present_mode,
            alpha_mode: surface::choose_alpha_mode(&caps.alpha_modes, init.alpha_mode),
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };

        surface.configure(&device, &config);
        log::debug!("surface configured: {format:?} {}x{}", config.width, config.height);

        Ok(Self {
            surface,
            adapter,
            device,
            queue,
            config,
            prefer_srgb: init.prefer_srgb,
            size,
        })
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Drawable size in physical pixels.
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.size = new_size;
        self.reconfigure();
    }

    /// Acquires the next surface texture with a fresh encoder.
    ///
    /// `Ok(None)` means this frame is skipped: the surface timed out, or was
    /// lost or outdated and has been reconfigured for the next one. Only an
    /// out-of-memory surface is an error.
    pub fn acquire(&mut self) -> Result<Option<Frame>> {
        let texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(err) => {
                return match surface::recovery(&err) {
                    Recovery::Reconfigure => {
                        self.reconfigure();
                        Ok(None)
                    }
                    Recovery::Skip => Ok(None),
                    Recovery::Fatal => Err(anyhow::Error::new(err).context("surface cannot be acquired")),
                };
            }
        };

        let view = texture.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("lumen frame encoder"),
            });

        Ok(Some(Frame { view, encoder, texture }))
    }

    /// Submits the frame's commands and presents its texture.
    pub fn present(&self, frame: Frame) {
        let Frame { view, encoder, texture } = frame;
        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        texture.present();
    }

    /// Applies the current size, re-reading the surface capabilities.
    ///
    /// The format only changes when the current one is no longer supported;
    /// renderers rebuild their pipelines when they see the new format.
    fn reconfigure(&mut self) {
        if self.size.width == 0 || self.size.height == 0 {
            return;
        }

        let caps = self.surface.get_capabilities(&self.adapter);
        if let Some(format) = surface::choose_format(&caps.formats, Some(self.config.format), self.prefer_srgb) {
            if format != self.config.format {
                log::info!("surface format changed: {:?} -> {format:?}", self.config.format);
                self.config.format = format;
            }
        }
        self.config.alpha_mode = surface::choose_alpha_mode(&caps.alpha_modes, Some(self.config.alpha_mode));
        self.config.width = self.size.width;
        self.config.height = self.size.height;

        self.surface.configure(&self.device, &self.config);
    }
}
