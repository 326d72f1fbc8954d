//! Surface format choice and acquire-failure triage.

/// What the frame loop does after the surface texture cannot be acquired.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Recovery {
    /// Lost or outdated: reconfigure, then try again next frame.
    Reconfigure,
    /// Transient; drop this frame.
    Skip,
    Fatal,
}

/// Classifies an acquire error and logs it.
///
/// Lost and outdated surfaces are routine while resizing and log at debug.
pub(crate) fn recovery(err: &wgpu::SurfaceError) -> Recovery {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            log::debug!("surface {err}; reconfiguring");
            Recovery::Reconfigure
        }
        wgpu::SurfaceError::OutOfMemory => {
            log::error!("surface error: {err}");
            Recovery::Fatal
        }
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => {
            log::warn!("surface error: {err}; skipping frame");
            Recovery::Skip
        }
    }
}

/// Picks the surface format.
///
/// A `current` format that is still supported is kept so existing pipelines
/// stay valid. Otherwise an sRGB format is preferred when asked for, then the
/// surface's first format.
pub(crate) fn choose_format(
    formats: &[wgpu::TextureFormat],
    current: Option<wgpu::TextureFormat>,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    if let Some(current) = current.filter(|f| formats.contains(f)) {
        return Some(current);
    }

    let srgb = prefer_srgb
        .then(|| formats.iter().copied().find(|f| f.is_srgb()))
        .flatten();
    srgb.or_else(|| formats.first().copied())
}

pub(crate) fn choose_alpha_mode(
    modes: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| modes.contains(m))
        .or_else(|| modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

#[cfg(test)]
mod tests {
    use wgpu::TextureFormat::{Bgra8Unorm, Bgra8UnormSrgb, Rgba16Float, Rgba8UnormSrgb};

    use super::*;

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn srgb_preferred_over_first_format() {
        let formats = [Bgra8Unorm, Rgba8UnormSrgb];
        assert_eq!(choose_format(&formats, None, true), Some(Rgba8UnormSrgb));
        assert_eq!(choose_format(&formats, None, false), Some(Bgra8Unorm));
        assert_eq!(choose_format(&[Rgba16Float], None, true), Some(Rgba16Float));
    }

    #[test]
    fn supported_current_format_survives_reconfigure() {
        let formats = [Bgra8UnormSrgb, Bgra8Unorm];
        assert_eq!(choose_format(&formats, Some(Bgra8Unorm), true), Some(Bgra8Unorm));
        assert_eq!(choose_format(&formats, Some(Rgba8UnormSrgb), true), Some(Bgra8UnormSrgb));
    }

    #[test]
    fn no_formats_is_none() {
        assert_eq!(choose_format(&[], Some(Bgra8UnormSrgb), true), None);
    }

    // ── alpha ─────────────────────────────────────────────────────────────

    #[test]
    fn unsupported_alpha_falls_back_to_first() {
        let modes = [wgpu::CompositeAlphaMode::Opaque];
        assert_eq!(
            choose_alpha_mode(&modes, Some(wgpu::CompositeAlphaMode::PreMultiplied)),
            wgpu::CompositeAlphaMode::Opaque
        );
        assert_eq!(choose_alpha_mode(&[], None), wgpu::CompositeAlphaMode::Auto);
    }

    // ── errors ────────────────────────────────────────────────────────────

    #[test]
    fn only_out_of_memory_is_fatal() {
        assert_eq!(recovery(&wgpu::SurfaceError::Lost), Recovery::Reconfigure);
        assert_eq!(recovery(&wgpu::SurfaceError::Outdated), Recovery::Reconfigure);
        assert_eq!(recovery(&wgpu::SurfaceError::Timeout), Recovery::Skip);
        assert_eq!(recovery(&wgpu::SurfaceError::Other), Recovery::Skip);
        assert_eq!(recovery(&wgpu::SurfaceError::OutOfMemory), Recovery::Fatal);
    }
}
