pub mod cognitive_load;
pub mod color_perception;
pub mod focus_distraction;
pub mod focus_tunnel;
pub mod interaction_precision;
pub mod memory_load;
pub mod reading_stability;
pub mod traits;
pub mod visual_strain;

use glam::Vec2;
use serde::Serialize;

use crate::catalog::ExperienceKind;
use crate::core::rng::Rng;

pub use cognitive_load::{CognitiveLoadParams, CognitiveLoadRenderer};
pub use color_perception::{ColorPerceptionParams, ColorPerceptionRenderer, Hsb};
pub use focus_distraction::{FocusDistractionParams, FocusDistractionRenderer};
pub use focus_tunnel::{FocusTunnelParams, FocusTunnelRenderer};
pub use interaction_precision::{InteractionPrecisionParams, InteractionPrecisionRenderer};
pub use memory_load::{MemoryLoadParams, MemoryLoadRenderer, MemoryStage};
pub use reading_stability::{ReadingStabilityParams, ReadingStabilityRenderer};
pub use traits::{
    intensity, ExperienceAction, Rect, RenderFrame, Renderer, RendererEvent, TaskId,
};
pub use visual_strain::{VisualStrainParams, VisualStrainRenderer};

/// Per-experience output of `Renderer::render`, tagged by kind on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum VisualParams {
    VisualStrain(VisualStrainParams),
    ColorPerception(ColorPerceptionParams),
    FocusTunnel(FocusTunnelParams),
    ReadingStability(ReadingStabilityParams),
    MemoryLoad(MemoryLoadParams),
    FocusDistraction(FocusDistractionParams),
    CognitiveLoad(CognitiveLoadParams),
    InteractionPrecision(InteractionPrecisionParams),
}

impl VisualParams {
    pub fn kind(&self) -> ExperienceKind {
        match self {
            VisualParams::VisualStrain(_) => ExperienceKind::VisualStrain,
            VisualParams::ColorPerception(_) => ExperienceKind::ColorPerception,
            VisualParams::FocusTunnel(_) => ExperienceKind::FocusTunnel,
            VisualParams::ReadingStability(_) => ExperienceKind::ReadingStability,
            VisualParams::MemoryLoad(_) => ExperienceKind::MemoryLoad,
            VisualParams::FocusDistraction(_) => ExperienceKind::FocusDistraction,
            VisualParams::CognitiveLoad(_) => ExperienceKind::CognitiveLoad,
            VisualParams::InteractionPrecision(_) => ExperienceKind::InteractionPrecision,
        }
    }
}

/// Build the renderer for `kind`. Randomized initial state draws from `rng`.
pub fn renderer_for(kind: ExperienceKind, viewport: Vec2, rng: &mut Rng) -> Box<dyn Renderer> {
    match kind {
        ExperienceKind::VisualStrain => Box::new(VisualStrainRenderer),
        ExperienceKind::ColorPerception => Box::new(ColorPerceptionRenderer::new(rng)),
        ExperienceKind::FocusTunnel => Box::new(FocusTunnelRenderer),
        ExperienceKind::ReadingStability => Box::new(ReadingStabilityRenderer::default()),
        ExperienceKind::MemoryLoad => Box::new(MemoryLoadRenderer::new(rng)),
        ExperienceKind::FocusDistraction => Box::new(FocusDistractionRenderer::new(viewport, rng)),
        ExperienceKind::CognitiveLoad => Box::new(CognitiveLoadRenderer::new(rng)),
        ExperienceKind::InteractionPrecision => {
            Box::new(InteractionPrecisionRenderer::new(viewport, rng))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journey::JourneyPhase;

    #[test]
    fn every_kind_gets_its_own_renderer() {
        let viewport = Vec2::new(390.0, 844.0);
        let mut rng = Rng::new(42);
        for kind in ExperienceKind::ALL {
            let renderer = renderer_for(kind, viewport, &mut rng);
            assert_eq!(renderer.kind(), kind);
            for phase in JourneyPhase::ALL {
                let frame = RenderFrame::new(phase, 0.5, viewport);
                assert_eq!(renderer.render(&frame).kind(), kind);
            }
        }
    }

    #[test]
    fn params_serialize_with_kind_tag() {
        let viewport = Vec2::new(390.0, 844.0);
        let mut rng = Rng::new(42);
        let renderer = renderer_for(ExperienceKind::FocusTunnel, viewport, &mut rng);
        let frame = RenderFrame::new(JourneyPhase::EnvironmentalShift, 0.5, viewport);
        let json = serde_json::to_value(renderer.render(&frame)).unwrap();
        assert_eq!(json["kind"], "focus-tunnel");
        assert!(json["diameter"].as_f64().unwrap() > 50.0);
    }

    #[test]
    fn reflection_freezes_every_renderer() {
        let viewport = Vec2::new(390.0, 844.0);
        let reflecting = RenderFrame::new(JourneyPhase::Integration, 0.3, viewport);
        for kind in ExperienceKind::ALL {
            let mut rng = Rng::new(7);
            let mut renderer = renderer_for(kind, viewport, &mut rng);
            let before = renderer.render(&reflecting);
            let mut events = Vec::new();
            for _ in 0..300 {
                renderer.advance(1.0 / 30.0, &reflecting, &mut rng, &mut events);
            }
            assert_eq!(renderer.render(&reflecting), before, "{:?}", kind);
            assert!(events.is_empty());
        }
    }
}
