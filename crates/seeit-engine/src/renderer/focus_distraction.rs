//! Focus & distraction: shapes wander across a passage while it fades.

use glam::Vec2;
use serde::Serialize;

use crate::catalog::ExperienceKind;
use crate::core::rng::Rng;
use crate::extensions::{ease_vec2, Easing};

use super::traits::{RenderFrame, Renderer, RendererEvent};
use super::VisualParams;

pub const DISTRACTOR_COUNT: usize = 15;
pub const MIN_SIZE: f32 = 30.0;
pub const MAX_SIZE: f32 = 80.0;
pub const MIN_LEG_SECS: f32 = 3.0;
pub const MAX_LEG_SECS: f32 = 10.0;
pub const MAX_OPACITY: f32 = 0.3;

#[derive(Debug, Clone)]
struct Distractor {
    home: Vec2,
    from: Vec2,
    to: Vec2,
    leg_secs: f32,
    elapsed: f32,
    size: f32,
}

impl Distractor {
    fn spawn(viewport: Vec2, rng: &mut Rng) -> Self {
        let home = random_point(viewport, rng);
        Self {
            home,
            from: home,
            to: random_point(viewport, rng),
            leg_secs: rng.range_f32(MIN_LEG_SECS, MAX_LEG_SECS),
            elapsed: 0.0,
            size: rng.range_f32(MIN_SIZE, MAX_SIZE),
        }
    }

    fn position(&self) -> Vec2 {
        ease_vec2(self.from, self.to, self.elapsed / self.leg_secs, Easing::SineInOut)
    }

    fn step(&mut self, dt: f32, viewport: Vec2, rng: &mut Rng) {
        self.elapsed += dt;
        while self.elapsed >= self.leg_secs {
            self.elapsed -= self.leg_secs;
            self.from = self.to;
            self.to = random_point(viewport, rng);
            self.leg_secs = rng.range_f32(MIN_LEG_SECS, MAX_LEG_SECS);
        }
    }
}

fn random_point(viewport: Vec2, rng: &mut Rng) -> Vec2 {
    Vec2::new(rng.range_f32(0.0, viewport.x), rng.range_f32(0.0, viewport.y))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistractorParams {
    pub position: Vec2,
    pub size: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FocusDistractionParams {
    pub passage_opacity: f32,
    pub distractors: Vec<DistractorParams>,
}

#[derive(Debug)]
pub struct FocusDistractionRenderer {
    distractors: Vec<Distractor>,
}

impl FocusDistractionRenderer {
    pub fn new(viewport: Vec2, rng: &mut Rng) -> Self {
        Self {
            distractors: (0..DISTRACTOR_COUNT)
                .map(|_| Distractor::spawn(viewport, rng))
                .collect(),
        }
    }
}

impl Renderer for FocusDistractionRenderer {
    fn kind(&self) -> ExperienceKind {
        ExperienceKind::FocusDistraction
    }

    fn advance(&mut self, dt: f32, frame: &RenderFrame, rng: &mut Rng, _events: &mut Vec<RendererEvent>) {
        if frame.reflecting || !(dt > 0.0) {
            return;
        }
        for distractor in &mut self.distractors {
            distractor.step(dt, frame.viewport, rng);
        }
    }

    fn render(&self, frame: &RenderFrame) -> VisualParams {
        let i = frame.intensity.clamp(0.0, 1.0);
        let distractors = self
            .distractors
            .iter()
            .map(|d| DistractorParams {
                position: d.home + (d.position() - d.home) * i,
                size: d.size,
                opacity: MAX_OPACITY * i,
            })
            .collect();
        VisualParams::FocusDistraction(FocusDistractionParams {
            passage_opacity: 1.0 - 0.7 * i,
            distractors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journey::JourneyPhase;

    const VIEWPORT: Vec2 = Vec2::new(390.0, 844.0);

    fn params(r: &FocusDistractionRenderer, phase: JourneyPhase, progress: f32) -> FocusDistractionParams {
        match r.render(&RenderFrame::new(phase, progress, VIEWPORT)) {
            VisualParams::FocusDistraction(p) => p,
            other => panic!("wrong params kind: {:?}", other),
        }
    }

    #[test]
    fn spawns_fifteen_sized_distractors() {
        let mut rng = Rng::new(4);
        let r = FocusDistractionRenderer::new(VIEWPORT, &mut rng);
        let p = params(&r, JourneyPhase::ImmersiveInteraction, 0.0);
        assert_eq!(p.distractors.len(), DISTRACTOR_COUNT);
        for d in &p.distractors {
            assert!((MIN_SIZE..=MAX_SIZE).contains(&d.size));
            assert!((d.opacity - MAX_OPACITY).abs() < 1e-6);
        }
        assert!((p.passage_opacity - 0.3).abs() < 1e-6);
    }

    #[test]
    fn calm_during_orientation() {
        let mut rng = Rng::new(4);
        let mut r = FocusDistractionRenderer::new(VIEWPORT, &mut rng);
        let live = RenderFrame::new(JourneyPhase::Orientation, 0.5, VIEWPORT);
        let mut events = Vec::new();
        r.advance(2.0, &live, &mut rng, &mut events);
        let p = params(&r, JourneyPhase::Orientation, 0.5);
        assert_eq!(p.passage_opacity, 1.0);
        for (d, state) in p.distractors.iter().zip(r.distractors.iter()) {
            assert_eq!(d.opacity, 0.0);
            assert_eq!(d.position, state.home);
        }
    }

    #[test]
    fn distractors_keep_wandering_inside_viewport() {
        let mut rng = Rng::new(9);
        let mut r = FocusDistractionRenderer::new(VIEWPORT, &mut rng);
        let live = RenderFrame::new(JourneyPhase::ImmersiveInteraction, 0.5, VIEWPORT);
        let mut events = Vec::new();
        let before: Vec<Vec2> = r.distractors.iter().map(|d| d.position()).collect();
        for _ in 0..600 {
            r.advance(1.0 / 30.0, &live, &mut rng, &mut events);
        }
        let after: Vec<Vec2> = r.distractors.iter().map(|d| d.position()).collect();
        assert_ne!(before, after);
        for p in after {
            assert!(p.x >= 0.0 && p.x <= VIEWPORT.x && p.y >= 0.0 && p.y <= VIEWPORT.y);
        }
    }

    #[test]
    fn frozen_while_reflecting() {
        let mut rng = Rng::new(9);
        let mut r = FocusDistractionRenderer::new(VIEWPORT, &mut rng);
        let reflecting = RenderFrame::new(JourneyPhase::Integration, 0.5, VIEWPORT);
        let mut events = Vec::new();
        let before: Vec<Vec2> = r.distractors.iter().map(|d| d.position()).collect();
        r.advance(5.0, &reflecting, &mut rng, &mut events);
        let after: Vec<Vec2> = r.distractors.iter().map(|d| d.position()).collect();
        assert_eq!(before, after);
    }
}
