//! Look-at perspective camera and its group 1 uniform binding.

use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use crate::pipeline::{bindings, BindingLayouts};
use crate::shading::CameraUniform;

/// Pitch stays this far (radians) from straight up/down so `look_at` never degenerates.
const PITCH_LIMIT: f32 = 1.5;

/// Right-handed look-at camera with a perspective projection in wgpu clip space (depth `0..1`).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Width over height.
    pub aspect: f32,
    /// Vertical field of view, degrees.
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 1.0, 2.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy: 45.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

impl Camera {
    pub fn view_projection(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        let proj = Mat4::perspective_rh(self.fovy.to_radians(), self.aspect, self.znear, self.zfar);
        proj * view
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform::from_mat4(self.view_projection())
    }

    /// Rotates the eye around the target, keeping its distance.
    pub fn orbit(&mut self, yaw: f32, pitch: f32) {
        let offset = self.eye - self.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }

        let current_yaw = offset.x.atan2(offset.z);
        let current_pitch = (offset.y / radius).clamp(-1.0, 1.0).asin();

        let yaw = current_yaw + yaw;
        let pitch = (current_pitch + pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);

        let (sy, cy) = yaw.sin_cos();
        let (sp, cp) = pitch.sin_cos();
        self.eye = self.target + Vec3::new(sy * cp, sp, cy * cp) * radius;
    }

    /// Updates the aspect ratio from a surface size. Zero sizes are ignored.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }
}

/// Uniform buffer holding one [`CameraUniform`] plus its group 1 bind group.
pub struct CameraBinding {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl CameraBinding {
    pub fn new(device: &wgpu::Device, layouts: &BindingLayouts, uniform: &CameraUniform) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lumen camera ubo"),
            contents: bytemuck::bytes_of(uniform),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lumen camera bind group"),
            layout: &layouts.camera,
            entries: &[wgpu::BindGroupEntry {
                binding: bindings::CAMERA,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self { buffer, bind_group }
    }

    /// Binding for kinds drawn without a camera.
    pub fn identity(device: &wgpu::Device, layouts: &BindingLayouts) -> Self {
        Self::new(device, layouts, &CameraUniform::IDENTITY)
    }

    pub fn update(&self, queue: &wgpu::Queue, uniform: &CameraUniform) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(uniform));
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}
