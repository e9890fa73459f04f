//! Focus tunnel: a circular reveal that closes in on the center of the view.

use glam::Vec2;
use serde::Serialize;

use crate::catalog::ExperienceKind;
use crate::core::rng::Rng;

use super::traits::{RenderFrame, Renderer, RendererEvent};
use super::VisualParams;

pub const MIN_DIAMETER: f32 = 50.0;
/// Distance of the peripheral alerts from the side edges.
pub const ALERT_INSET: f32 = 24.0;

/// Reveal diameter for a viewport's larger dimension at `intensity`.
pub fn reveal_diameter(max_dim: f32, intensity: f32) -> f32 {
    let i = intensity.clamp(0.0, 1.0);
    (max_dim * (1.1 - 0.95 * i)).max(MIN_DIAMETER)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeripheralAlert {
    pub position: Vec2,
    /// Still inside the reveal.
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FocusTunnelParams {
    pub center: Vec2,
    pub diameter: f32,
    pub alerts: [PeripheralAlert; 2],
}

#[derive(Debug, Default)]
pub struct FocusTunnelRenderer;

impl Renderer for FocusTunnelRenderer {
    fn kind(&self) -> ExperienceKind {
        ExperienceKind::FocusTunnel
    }

    fn advance(&mut self, _dt: f32, _frame: &RenderFrame, _rng: &mut Rng, _events: &mut Vec<RendererEvent>) {}

    fn render(&self, frame: &RenderFrame) -> VisualParams {
        let center = frame.viewport * 0.5;
        let diameter = reveal_diameter(frame.viewport.max_element(), frame.intensity);
        let radius = diameter * 0.5;
        let alert = |position: Vec2| PeripheralAlert {
            position,
            visible: position.distance(center) <= radius,
        };
        VisualParams::FocusTunnel(FocusTunnelParams {
            center,
            diameter,
            alerts: [
                alert(Vec2::new(ALERT_INSET, center.y)),
                alert(Vec2::new(frame.viewport.x - ALERT_INSET, center.y)),
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journey::JourneyPhase;

    #[test]
    fn diameter_shrinks_monotonically() {
        let mut last = f32::INFINITY;
        for step in 0..=20 {
            let d = reveal_diameter(844.0, step as f32 / 20.0);
            assert!(d <= last);
            assert!(d >= MIN_DIAMETER);
            last = d;
        }
        assert!((reveal_diameter(844.0, 0.0) - 928.4).abs() < 0.01);
        assert!((reveal_diameter(844.0, 1.0) - 126.6).abs() < 0.01);
    }

    #[test]
    fn small_viewports_floor_at_minimum() {
        assert_eq!(reveal_diameter(40.0, 1.0), MIN_DIAMETER);
    }

    #[test]
    fn alerts_disappear_as_tunnel_closes() {
        let viewport = Vec2::new(390.0, 844.0);
        let r = FocusTunnelRenderer;
        let open = RenderFrame::new(JourneyPhase::Orientation, 0.0, viewport);
        let VisualParams::FocusTunnel(p) = r.render(&open) else {
            panic!("wrong params kind");
        };
        assert!(p.alerts.iter().all(|a| a.visible));
        let closed = RenderFrame::new(JourneyPhase::ImmersiveInteraction, 0.0, viewport);
        let VisualParams::FocusTunnel(p) = r.render(&closed) else {
            panic!("wrong params kind");
        };
        assert!(p.alerts.iter().all(|a| !a.visible));
        assert_eq!(p.center, viewport * 0.5);
    }
}
