//! Visual strain: text gets dimmer, softer and harder to hold onto.

use serde::Serialize;

use crate::catalog::ExperienceKind;
use crate::core::rng::Rng;
use crate::extensions::lerp;

use super::traits::{RenderFrame, Renderer, RendererEvent};
use super::VisualParams;

/// Speckle count at full intensity.
pub const MAX_NOISE: f32 = 200.0;
/// Intensity below which no speckle is drawn.
pub const NOISE_THRESHOLD: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisualStrainParams {
    pub contrast: f32,
    pub brightness: f32,
    /// Points between passage lines.
    pub line_spacing: f32,
    pub blur_radius: f32,
    pub text_opacity: f32,
    pub vignette: f32,
    pub glare: f32,
    pub noise_count: u32,
}

impl VisualStrainParams {
    pub fn at(intensity: f32) -> Self {
        let i = intensity.clamp(0.0, 1.0);
        let noise_count = if i > NOISE_THRESHOLD {
            (MAX_NOISE * i) as u32
        } else {
            0
        };
        Self {
            contrast: lerp(1.0, 0.7, i),
            brightness: lerp(1.0, 0.75, i),
            line_spacing: lerp(8.0, 6.0, i),
            blur_radius: 1.5 * i,
            text_opacity: 0.8 - 0.5 * i,
            vignette: 0.4 * i,
            glare: 0.15 * i,
            noise_count,
        }
    }
}

/// Stateless: everything follows from intensity.
#[derive(Debug, Default)]
pub struct VisualStrainRenderer;

impl Renderer for VisualStrainRenderer {
    fn kind(&self) -> ExperienceKind {
        ExperienceKind::VisualStrain
    }

    fn advance(&mut self, _dt: f32, _frame: &RenderFrame, _rng: &mut Rng, _events: &mut Vec<RendererEvent>) {}

    fn render(&self, frame: &RenderFrame) -> VisualParams {
        VisualParams::VisualStrain(VisualStrainParams::at(frame.intensity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_at_zero() {
        let p = VisualStrainParams::at(0.0);
        assert_eq!(p.contrast, 1.0);
        assert_eq!(p.brightness, 1.0);
        assert_eq!(p.line_spacing, 8.0);
        assert_eq!(p.blur_radius, 0.0);
        assert!((p.text_opacity - 0.8).abs() < 1e-6);
        assert_eq!(p.noise_count, 0);
    }

    #[test]
    fn full_strain() {
        let p = VisualStrainParams::at(1.0);
        assert!((p.contrast - 0.7).abs() < 1e-6);
        assert!((p.brightness - 0.75).abs() < 1e-6);
        assert!((p.line_spacing - 6.0).abs() < 1e-6);
        assert!((p.blur_radius - 1.5).abs() < 1e-6);
        assert!((p.text_opacity - 0.3).abs() < 1e-6);
        assert!((p.vignette - 0.4).abs() < 1e-6);
        assert!((p.glare - 0.15).abs() < 1e-6);
        assert_eq!(p.noise_count, 200);
    }

    #[test]
    fn noise_starts_above_threshold() {
        assert_eq!(VisualStrainParams::at(0.1).noise_count, 0);
        assert_eq!(VisualStrainParams::at(0.5).noise_count, 100);
    }

    #[test]
    fn strain_grows_with_intensity() {
        let mut last = VisualStrainParams::at(0.0);
        for step in 1..=10 {
            let p = VisualStrainParams::at(step as f32 / 10.0);
            assert!(p.contrast <= last.contrast);
            assert!(p.text_opacity <= last.text_opacity);
            assert!(p.blur_radius >= last.blur_radius);
            assert!(p.noise_count >= last.noise_count);
            last = p;
        }
    }
}
