use std::collections::HashMap;

use anyhow::{Context, Result};

use crate::camera::CameraBinding;
use crate::mesh::{InstanceBuffer, Mesh};
use crate::pipeline::{
    bindings, slots, BindingLayouts, PipelineKind, ShaderProgram, FRAGMENT_ENTRY, VERTEX_ENTRY,
};
use crate::texture::GpuTexture;

use super::{RenderCtx, RenderTarget};

/// Resources a single draw binds. Which ones are required depends on the kind.
#[derive(Default, Clone, Copy)]
pub struct DrawInputs<'a> {
    pub mesh: Option<&'a Mesh>,
    pub texture: Option<&'a GpuTexture>,
    /// Ignored by kinds without a camera; they bind the identity camera instead.
    pub camera: Option<&'a CameraBinding>,
    pub instances: Option<&'a InstanceBuffer>,
}

impl DrawInputs<'_> {
    /// Names of the inputs `kind` needs but this draw does not supply.
    pub fn missing(&self, kind: PipelineKind) -> Vec<&'static str> {
        let caps = kind.capabilities();
        let mut missing = Vec::new();

        if kind.program().reads_vertex_buffer() && self.mesh.is_none() {
            missing.push("mesh");
        }
        if caps.has_texture && self.texture.is_none() {
            missing.push("texture");
        }
        if caps.has_camera && self.camera.is_none() {
            missing.push("camera");
        }
        if caps.has_instancing && self.instances.is_none_or(|i| i.is_empty()) {
            missing.push("instances");
        }

        missing
    }
}

/// Draws any [`PipelineKind`] into a render target.
///
/// Pipelines are compiled lazily, one per [`ShaderProgram`], and rebuilt when
/// the surface format changes. Bind group layouts are created up front so
/// textures and cameras can be built against them before the first draw.
pub struct StageRenderer {
    layouts: BindingLayouts,
    identity_camera: CameraBinding,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipelines: HashMap<ShaderProgram, wgpu::RenderPipeline>,
}

impl StageRenderer {
    pub fn new(device: &wgpu::Device) -> Self {
        let layouts = BindingLayouts::new(device);
        let identity_camera = CameraBinding::identity(device, &layouts);

        Self {
            layouts,
            identity_camera,
            pipeline_format: None,
            pipelines: HashMap::new(),
        }
    }

    pub fn layouts(&self) -> &BindingLayouts {
        &self.layouts
    }

    /// Records one render pass drawing `kind` over the existing target contents.
    pub fn draw(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        kind: PipelineKind,
        inputs: &DrawInputs<'_>,
    ) -> Result<()> {
        let missing = inputs.missing(kind);
        anyhow::ensure!(
            missing.is_empty(),
            "{kind} draw is missing: {}",
            missing.join(", ")
        );

        let caps = kind.capabilities();
        let program = kind.program();

        self.ensure_pipeline(ctx, program);
        let pipeline = self
            .pipelines
            .get(&program)
            .with_context(|| format!("no pipeline for {}", program.label()))?;

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(program.label()),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);

        if program.uses_texture_group() {
            if let Some(texture) = inputs.texture {
                rpass.set_bind_group(bindings::TEXTURE_GROUP, texture.bind_group(), &[]);
            }
        }

        if program.uses_camera_group() {
            let camera = match inputs.camera {
                Some(camera) if caps.has_camera => camera,
                _ => &self.identity_camera,
            };
            rpass.set_bind_group(bindings::CAMERA_GROUP, camera.bind_group(), &[]);
        }

        match (program, inputs.mesh, inputs.instances) {
            (ShaderProgram::Procedural, _, _) => rpass.draw(0..3, 0..1),
            (ShaderProgram::InstancedTextured, Some(mesh), Some(instances)) => {
                let slice = instances.slice().context("instance buffer is empty")?;
                rpass.set_vertex_buffer(slots::INSTANCES, slice);
                mesh.draw(&mut rpass, 0..instances.len());
            }
            (_, Some(mesh), _) => mesh.draw(&mut rpass, 0..1),
            _ => anyhow::bail!("{kind} draw has nothing to draw"),
        }

        Ok(())
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>, program: ShaderProgram) {
        if self.pipeline_format != Some(ctx.surface_format) {
            if self.pipeline_format.is_some() {
                log::debug!("surface format changed; dropping cached pipelines");
            }
            self.pipelines.clear();
            self.pipeline_format = Some(ctx.surface_format);
        }

        if self.pipelines.contains_key(&program) {
            return;
        }

        let pipeline = create_pipeline(ctx, &self.layouts, program);
        log::debug!("pipeline '{}' created for {:?}", program.label(), ctx.surface_format);
        self.pipelines.insert(program, pipeline);
    }
}

fn create_pipeline(
    ctx: &RenderCtx<'_>,
    layouts: &BindingLayouts,
    program: ShaderProgram,
) -> wgpu::RenderPipeline {
    let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(program.label()),
        source: wgpu::ShaderSource::Wgsl(program.source().into()),
    });

    // Group indices are positional, so a camera-only program would still need group 0.
    let groups: Vec<&wgpu::BindGroupLayout> =
        if program.uses_texture_group() || program.uses_camera_group() {
            vec![&layouts.texture, &layouts.camera]
        } else {
            Vec::new()
        };

    let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(program.label()),
        bind_group_layouts: &groups,
        immediate_size: 0,
    });

    let buffers = program.vertex_buffers();

    ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(program.label()),
        layout: Some(&pipeline_layout),

        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some(VERTEX_ENTRY),
            compilation_options: Default::default(),
            buffers: &buffers,
        },

        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some(FRAGMENT_ENTRY),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctx.surface_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: Some(wgpu::Face::Back),
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn procedural_needs_nothing() {
        assert!(DrawInputs::default().missing(PipelineKind::ProceduralTriangle).is_empty());
    }

    #[test]
    fn color_needs_only_a_mesh() {
        assert_eq!(DrawInputs::default().missing(PipelineKind::InterpolatedColor), vec!["mesh"]);
    }

    #[test]
    fn no_camera_kind_does_not_ask_for_a_camera() {
        assert_eq!(
            DrawInputs::default().missing(PipelineKind::TexturedNoCamera),
            vec!["mesh", "texture"]
        );
        assert_eq!(
            DrawInputs::default().missing(PipelineKind::Textured),
            vec!["mesh", "texture", "camera"]
        );
    }

    #[test]
    fn instanced_needs_everything() {
        assert_eq!(
            DrawInputs::default().missing(PipelineKind::InstancedTextured),
            vec!["mesh", "texture", "camera", "instances"]
        );
    }

    #[test]
    fn empty_instance_buffer_counts_as_missing() {
        let instances = InstanceBuffer::new();
        let inputs = DrawInputs {
            instances: Some(&instances),
            ..DrawInputs::default()
        };
        assert!(inputs.missing(PipelineKind::InstancedTextured).contains(&"instances"));
    }
}
