use lumen_engine::camera::{Camera, CameraBinding};
use lumen_engine::core::{App, AppControl, FrameCtx};
use lumen_engine::mesh::{self, InstanceBuffer, Mesh};
use lumen_engine::pipeline::PipelineKind;
use lumen_engine::render::{DrawInputs, StageRenderer};
use lumen_engine::texture::{default_texture, GpuTexture};
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use crate::config::StudioConfig;

/// GPU resources, created on the first frame.
struct Scene {
    renderer: StageRenderer,
    texture: GpuTexture,
    camera: CameraBinding,
    triangle: Mesh,
    pentagon: Mesh,
    quad: Mesh,
    instances: InstanceBuffer,
}

impl Scene {
    fn new(device: &wgpu::Device, queue: &wgpu::Queue, config: &StudioConfig, camera: &Camera) -> Self {
        let renderer = StageRenderer::new(device);
        let layouts = renderer.layouts();

        let texture = config
            .texture_path
            .as_deref()
            .and_then(|path| {
                GpuTexture::from_path(device, queue, layouts, path, &config.sampler)
                    .inspect_err(|e| log::warn!("{e:#}; using checkerboard"))
                    .ok()
            })
            .unwrap_or_else(|| {
                GpuTexture::from_image(device, queue, layouts, &default_texture(), &config.sampler, "checkerboard")
            });

        let camera = CameraBinding::new(device, layouts, &camera.uniform());

        let triangle = Mesh::new(device, "triangle", &mesh::COLOR_TRIANGLE, &mesh::COLOR_TRIANGLE_INDICES);
        let pentagon = Mesh::new(device, "pentagon", &mesh::PENTAGON_VERTICES, &mesh::PENTAGON_INDICES);
        let quad = Mesh::new(device, "quad", &mesh::QUAD_VERTICES, &mesh::QUAD_INDICES);

        let mut instances = InstanceBuffer::new();
        instances.write(device, queue, &mesh::instance_grid(config.grid_rows, config.grid_spacing));

        Self {
            renderer,
            texture,
            camera,
            triangle,
            pentagon,
            quad,
            instances,
        }
    }
}

/// Demo app: draws one pipeline kind at a time.
///
/// Space cycles kinds, arrow keys orbit the camera, Escape exits.
pub struct Studio {
    config: StudioConfig,
    kind: PipelineKind,
    camera: Camera,
    title_stale: bool,
    scene: Option<Scene>,
}

impl Studio {
    pub fn new(config: StudioConfig) -> Self {
        Self {
            kind: config.initial_kind,
            camera: config.camera,
            title_stale: true,
            scene: None,
            config,
        }
    }

    fn on_key(&mut self, code: KeyCode) -> AppControl {
        let step = self.config.orbit_step;
        match code {
            KeyCode::Escape => return AppControl::Exit,
            KeyCode::Space => {
                self.kind = self.kind.next();
                self.title_stale = true;
                log::info!("pipeline: {}", self.kind);
            }
            KeyCode::ArrowLeft => self.camera.orbit(-step, 0.0),
            KeyCode::ArrowRight => self.camera.orbit(step, 0.0),
            KeyCode::ArrowUp => self.camera.orbit(0.0, step),
            KeyCode::ArrowDown => self.camera.orbit(0.0, -step),
            _ => {}
        }
        AppControl::Continue
    }
}

impl App for Studio {
    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat,
                        ..
                    },
                ..
            } => {
                // Holding an arrow keeps orbiting; holding Space must not spin through kinds.
                if *repeat && *code == KeyCode::Space {
                    return AppControl::Continue;
                }
                self.on_key(*code)
            }
            _ => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.title_stale {
            ctx.window.set_title(&format!("lumen · {}", self.kind));
            self.title_stale = false;
        }

        let size = ctx.size();
        self.camera.set_aspect(size.width, size.height);

        let scene = self
            .scene
            .get_or_insert_with(|| Scene::new(ctx.device(), ctx.queue(), &self.config, &self.camera));
        scene.camera.update(ctx.queue(), &self.camera.uniform());

        let kind = self.kind;
        let Scene {
            renderer,
            texture,
            camera,
            triangle,
            pentagon,
            quad,
            instances,
        } = scene;
        let mesh = match kind {
            PipelineKind::InterpolatedColor => Some(&*triangle),
            PipelineKind::Textured | PipelineKind::TexturedNoCamera => Some(&*pentagon),
            PipelineKind::InstancedTextured => Some(&*quad),
            PipelineKind::ProceduralTriangle => None,
        };
        let inputs = DrawInputs {
            mesh,
            texture: Some(&*texture),
            camera: Some(&*camera),
            instances: Some(&*instances),
        };

        let result = ctx.render(self.config.clear, |rctx, target| renderer.draw(rctx, target, kind, &inputs));

        match result {
            Ok(control) => control,
            Err(e) => {
                log::error!("draw failed: {e:#}");
                AppControl::Exit
            }
        }
    }
}
