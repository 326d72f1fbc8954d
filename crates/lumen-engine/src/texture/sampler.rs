use glam::{Vec2, Vec4};
use image::RgbaImage;

use crate::shading::TextureSampler;

/// Sampler policy shared by the GPU sampler and the CPU reference sampler.
///
/// One address mode applies to all axes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SamplerConfig {
    pub address_mode: wgpu::AddressMode,
    pub mag_filter: wgpu::FilterMode,
    pub min_filter: wgpu::FilterMode,
    pub mipmap_filter: wgpu::MipmapFilterMode,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            address_mode: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
        }
    }
}

impl SamplerConfig {
    pub fn descriptor(&self) -> wgpu::SamplerDescriptor<'static> {
        wgpu::SamplerDescriptor {
            label: Some("lumen sampler"),
            address_mode_u: self.address_mode,
            address_mode_v: self.address_mode,
            address_mode_w: self.address_mode,
            mag_filter: self.mag_filter,
            min_filter: self.min_filter,
            mipmap_filter: self.mipmap_filter,
            ..Default::default()
        }
    }
}

/// CPU sampler over an sRGB image, following the same policy as the GPU sampler.
///
/// Texels are decoded from sRGB to linear like an `Rgba8UnormSrgb` view.
/// There is no screen-space footprint on the CPU, so the magnification filter
/// is always used. `ClampToBorder` yields transparent black.
#[derive(Debug, Clone)]
pub struct ImageSampler {
    image: RgbaImage,
    config: SamplerConfig,
}

impl ImageSampler {
    pub fn new(image: RgbaImage, config: SamplerConfig) -> Self {
        Self { image, config }
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    fn texel(&self, x: i64, y: i64) -> Vec4 {
        let (w, h) = self.image.dimensions();
        let (Some(x), Some(y)) = (
            address(x, w, self.config.address_mode),
            address(y, h, self.config.address_mode),
        ) else {
            return Vec4::ZERO;
        };

        let [r, g, b, a] = self.image.get_pixel(x, y).0;
        Vec4::new(
            srgb_to_linear(r),
            srgb_to_linear(g),
            srgb_to_linear(b),
            a as f32 / 255.0,
        )
    }
}

impl TextureSampler for ImageSampler {
    fn sample(&self, uv: Vec2) -> Vec4 {
        let (w, h) = self.image.dimensions();
        if w == 0 || h == 0 {
            return Vec4::ZERO;
        }

        let x = uv.x * w as f32;
        let y = uv.y * h as f32;

        match self.config.mag_filter {
            wgpu::FilterMode::Nearest => self.texel(x.floor() as i64, y.floor() as i64),
            wgpu::FilterMode::Linear => {
                // Texel centers sit at half-integers.
                let x = x - 0.5;
                let y = y - 0.5;
                let x0 = x.floor();
                let y0 = y.floor();
                let fx = fraction(x - x0);
                let fy = fraction(y - y0);
                // Casts saturate; the address mode decides what far-away texels resolve to.
                let (x0, y0) = (x0 as i64, y0 as i64);
                let (x1, y1) = (x0.saturating_add(1), y0.saturating_add(1));

                let top = self.texel(x0, y0).lerp(self.texel(x1, y0), fx);
                let bottom = self.texel(x0, y1).lerp(self.texel(x1, y1), fx);
                top.lerp(bottom, fy)
            }
        }
    }
}

/// Infinite coordinates leave `inf - inf`; those snap to the lower texel.
#[inline]
fn fraction(f: f32) -> f32 {
    if f.is_finite() { f } else { 0.0 }
}

fn address(coord: i64, size: u32, mode: wgpu::AddressMode) -> Option<u32> {
    let size = i64::from(size);
    let resolved = match mode {
        wgpu::AddressMode::ClampToEdge => coord.clamp(0, size - 1),
        wgpu::AddressMode::Repeat => coord.rem_euclid(size),
        wgpu::AddressMode::MirrorRepeat => {
            let m = coord.rem_euclid(2 * size);
            if m < size { m } else { 2 * size - 1 - m }
        }
        wgpu::AddressMode::ClampToBorder => {
            if !(0..size).contains(&coord) {
                return None;
            }
            coord
        }
    };
    Some(resolved as u32)
}

fn srgb_to_linear(c: u8) -> f32 {
    let c = c as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;

    // Texels: (0,0) white, (1,0) black, (0,1) black, (1,1) white.
    fn checker_2x2() -> RgbaImage {
        RgbaImage::from_fn(2, 2, |x, y| {
            if (x + y) % 2 == 0 { Rgba([255, 255, 255, 255]) } else { Rgba([0, 0, 0, 255]) }
        })
    }

    fn sampler(mode: wgpu::AddressMode, filter: wgpu::FilterMode) -> ImageSampler {
        ImageSampler::new(
            checker_2x2(),
            SamplerConfig {
                address_mode: mode,
                mag_filter: filter,
                ..SamplerConfig::default()
            },
        )
    }

    const WHITE: Vec4 = Vec4::ONE;
    const BLACK: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);

    fn assert_close(actual: Vec4, expected: Vec4) {
        assert!(actual.abs_diff_eq(expected, 1e-5), "{actual} != {expected}");
    }

    // ── config ────────────────────────────────────────────────────────────

    #[test]
    fn default_policy_clamps_and_magnifies_linearly() {
        let d = SamplerConfig::default().descriptor();
        assert_eq!(d.address_mode_u, wgpu::AddressMode::ClampToEdge);
        assert_eq!(d.address_mode_v, wgpu::AddressMode::ClampToEdge);
        assert_eq!(d.mag_filter, wgpu::FilterMode::Linear);
        assert_eq!(d.min_filter, wgpu::FilterMode::Nearest);
    }

    // ── nearest ───────────────────────────────────────────────────────────

    #[test]
    fn nearest_picks_containing_texel() {
        let s = sampler(wgpu::AddressMode::ClampToEdge, wgpu::FilterMode::Nearest);
        assert_close(s.sample(Vec2::new(0.25, 0.25)), WHITE);
        assert_close(s.sample(Vec2::new(0.75, 0.25)), BLACK);
        assert_close(s.sample(Vec2::new(0.75, 0.75)), WHITE);
    }

    #[test]
    fn clamp_to_edge_holds_border_texel() {
        let s = sampler(wgpu::AddressMode::ClampToEdge, wgpu::FilterMode::Nearest);
        assert_close(s.sample(Vec2::new(-3.0, 0.25)), WHITE);
        assert_close(s.sample(Vec2::new(4.0, 0.25)), BLACK);
    }

    #[test]
    fn repeat_wraps() {
        let s = sampler(wgpu::AddressMode::Repeat, wgpu::FilterMode::Nearest);
        assert_close(s.sample(Vec2::new(1.25, 0.25)), s.sample(Vec2::new(0.25, 0.25)));
        assert_close(s.sample(Vec2::new(-0.25, 0.25)), s.sample(Vec2::new(0.75, 0.25)));
    }

    #[test]
    fn mirror_repeat_reflects() {
        let s = sampler(wgpu::AddressMode::MirrorRepeat, wgpu::FilterMode::Nearest);
        // u = 1.25 → x = 2.5 → mirrored texel 1.
        assert_close(s.sample(Vec2::new(1.25, 0.25)), BLACK);
        assert_close(s.sample(Vec2::new(1.75, 0.25)), WHITE);
    }

    #[test]
    fn clamp_to_border_is_transparent_black() {
        let s = sampler(wgpu::AddressMode::ClampToBorder, wgpu::FilterMode::Nearest);
        assert_eq!(s.sample(Vec2::new(1.5, 0.25)), Vec4::ZERO);
    }

    // ── linear ────────────────────────────────────────────────────────────

    #[test]
    fn linear_at_texel_center_is_exact() {
        let s = sampler(wgpu::AddressMode::ClampToEdge, wgpu::FilterMode::Linear);
        assert_close(s.sample(Vec2::new(0.25, 0.25)), WHITE);
    }

    #[test]
    fn linear_between_texels_averages() {
        let s = sampler(wgpu::AddressMode::ClampToEdge, wgpu::FilterMode::Linear);
        let c = s.sample(Vec2::new(0.5, 0.5));
        assert!(c.abs_diff_eq(Vec4::new(0.5, 0.5, 0.5, 1.0), 1e-5));
    }

    #[test]
    fn far_and_infinite_coordinates_resolve_through_address_mode() {
        let modes = [
            wgpu::AddressMode::ClampToEdge,
            wgpu::AddressMode::Repeat,
            wgpu::AddressMode::MirrorRepeat,
            wgpu::AddressMode::ClampToBorder,
        ];
        let uvs = [
            Vec2::new(1.0e20, 0.25),
            Vec2::new(-1.0e20, 0.25),
            Vec2::new(0.25, 3.0e38),
            Vec2::new(f32::INFINITY, 0.25),
            Vec2::new(0.25, f32::NEG_INFINITY),
            Vec2::new(f32::MAX, f32::MIN),
        ];
        for mode in modes {
            for filter in [wgpu::FilterMode::Nearest, wgpu::FilterMode::Linear] {
                let s = sampler(mode, filter);
                for uv in uvs {
                    let c = s.sample(uv);
                    assert!(!c.is_nan(), "{mode:?}/{filter:?} at {uv}: {c}");
                    if mode == wgpu::AddressMode::ClampToBorder {
                        assert_eq!(c, Vec4::ZERO, "{filter:?} at {uv}");
                    }
                }
            }
        }

        let s = sampler(wgpu::AddressMode::ClampToEdge, wgpu::FilterMode::Linear);
        assert_close(s.sample(Vec2::new(1.0e20, 0.25)), BLACK);
        assert_close(s.sample(Vec2::new(f32::NEG_INFINITY, 0.25)), WHITE);
    }

    // ── decoding ──────────────────────────────────────────────────────────

    #[test]
    fn srgb_endpoints_and_midpoint() {
        assert_eq!(srgb_to_linear(0), 0.0);
        assert!((srgb_to_linear(255) - 1.0).abs() < 1e-6);
        assert!((srgb_to_linear(188) - 0.5).abs() < 0.01);
    }

    #[test]
    fn opaque_image_samples_opaque() {
        let s = sampler(wgpu::AddressMode::Repeat, wgpu::FilterMode::Linear);
        for uv in [Vec2::ZERO, Vec2::new(0.3, 0.9), Vec2::new(-2.2, 7.1)] {
            assert_eq!(s.sample(uv).w, 1.0);
        }
    }
}
