//! Interaction precision: a small target hops around and the visible one
//! trails behind where it really is.

use glam::Vec2;
use serde::Serialize;

use crate::catalog::ExperienceKind;
use crate::core::rng::Rng;
use crate::core::timer::{Delay, Interval};
use crate::extensions::{ease_vec2, Easing};

use super::traits::{ExperienceAction, RenderFrame, Renderer, RendererEvent};
use super::VisualParams;

pub const RELOCATE_SECS: f32 = 0.8;
pub const LAG_SECS: f32 = 0.7;
pub const FEEDBACK_SECS: f32 = 0.2;
/// Target diameter at scale 1.0.
pub const BASE_DIAMETER: f32 = 60.0;
pub const MIN_SCALE: f32 = 0.6;
pub const MAX_SCALE: f32 = 1.0;
pub const EDGE_MARGIN: f32 = 50.0;
pub const TOP_MARGIN: f32 = 100.0;
pub const BOTTOM_MARGIN: f32 = 200.0;

/// Random target center within the allowed band of the viewport. Bands that
/// collapse on small viewports pin to their lower bound.
pub fn random_target(viewport: Vec2, rng: &mut Rng) -> Vec2 {
    let x_max = (viewport.x - EDGE_MARGIN).max(EDGE_MARGIN);
    let y_max = (viewport.y - BOTTOM_MARGIN).max(TOP_MARGIN);
    Vec2::new(
        rng.range_f32(EDGE_MARGIN, x_max),
        rng.range_f32(TOP_MARGIN, y_max),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PrecisionFeedback {
    pub hit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InteractionPrecisionParams {
    /// Where the target is drawn; lags behind `target`.
    pub displayed: Vec2,
    /// Where taps are actually tested.
    pub target: Vec2,
    pub diameter: f32,
    pub hits: u32,
    pub misses: u32,
    pub feedback: Option<PrecisionFeedback>,
}

#[derive(Debug)]
pub struct InteractionPrecisionRenderer {
    target: Vec2,
    scale: f32,
    /// Displayed position when the current lag began.
    lag_from: Vec2,
    lag_elapsed: f32,
    hits: u32,
    misses: u32,
    relocate: Interval,
    feedback: Option<(PrecisionFeedback, Delay)>,
}

impl InteractionPrecisionRenderer {
    pub fn new(viewport: Vec2, rng: &mut Rng) -> Self {
        let target = random_target(viewport, rng);
        Self {
            target,
            scale: rng.range_f32(MIN_SCALE, MAX_SCALE),
            lag_from: target,
            lag_elapsed: LAG_SECS,
            hits: 0,
            misses: 0,
            relocate: Interval::new(RELOCATE_SECS),
            feedback: None,
        }
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn radius(&self) -> f32 {
        BASE_DIAMETER * self.scale * 0.5
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn misses(&self) -> u32 {
        self.misses
    }

    pub fn displayed(&self) -> Vec2 {
        if self.lag_elapsed >= LAG_SECS {
            return self.target;
        }
        ease_vec2(self.lag_from, self.target, self.lag_elapsed / LAG_SECS, Easing::QuadInOut)
    }

    fn relocate(&mut self, viewport: Vec2, rng: &mut Rng) {
        self.lag_from = self.displayed();
        self.lag_elapsed = 0.0;
        self.target = random_target(viewport, rng);
        self.scale = rng.range_f32(MIN_SCALE, MAX_SCALE);
    }
}

impl Renderer for InteractionPrecisionRenderer {
    fn kind(&self) -> ExperienceKind {
        ExperienceKind::InteractionPrecision
    }

    fn advance(&mut self, dt: f32, frame: &RenderFrame, rng: &mut Rng, _events: &mut Vec<RendererEvent>) {
        if frame.reflecting || !(dt > 0.0) {
            return;
        }
        self.lag_elapsed = (self.lag_elapsed + dt).min(LAG_SECS);
        for _ in 0..self.relocate.tick(dt) {
            self.relocate(frame.viewport, rng);
        }
        if let Some((_, delay)) = self.feedback.as_mut() {
            if delay.tick(dt) {
                self.feedback = None;
            }
        }
    }

    fn tap(&mut self, point: Vec2, frame: &RenderFrame, _rng: &mut Rng) -> Option<RendererEvent> {
        if frame.reflecting {
            return None;
        }
        let hit = point.distance(self.target) <= self.radius();
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        self.feedback = Some((PrecisionFeedback { hit }, Delay::new(FEEDBACK_SECS)));
        Some(RendererEvent::PrecisionTapped {
            hit,
            hits: self.hits,
            misses: self.misses,
        })
    }

    fn action(
        &mut self,
        action: ExperienceAction,
        _frame: &RenderFrame,
        _rng: &mut Rng,
    ) -> Option<RendererEvent> {
        match action {
            ExperienceAction::ResetPrecision => {
                self.hits = 0;
                self.misses = 0;
                Some(RendererEvent::PrecisionReset)
            }
            _ => None,
        }
    }

    fn render(&self, _frame: &RenderFrame) -> VisualParams {
        VisualParams::InteractionPrecision(InteractionPrecisionParams {
            displayed: self.displayed(),
            target: self.target,
            diameter: BASE_DIAMETER * self.scale,
            hits: self.hits,
            misses: self.misses,
            feedback: self.feedback.as_ref().map(|(feedback, _)| *feedback),
        })
    }
}
