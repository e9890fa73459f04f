//! Reading stability: each line of a passage drifts and tilts on its own.

use serde::Serialize;

use crate::catalog::ExperienceKind;
use crate::core::rng::Rng;

use super::traits::{RenderFrame, Renderer, RendererEvent};
use super::VisualParams;

pub const LINE_COUNT: usize = 12;
/// Drift time units per second.
pub const TIME_RATE: f32 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineOffset {
    pub x: f32,
    pub y: f32,
    pub tilt_degrees: f32,
}

impl LineOffset {
    pub fn at(time: f32, line: usize) -> Self {
        let i = line as f32;
        Self {
            x: 15.0 * (time + i).sin() + 10.0 * (0.5 * time).cos(),
            y: 8.0 * (1.5 * time + 0.2 * i).sin(),
            tilt_degrees: 2.0 * (0.8 * time + i).sin(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingStabilityParams {
    pub time: f32,
    pub lines: Vec<LineOffset>,
}

#[derive(Debug, Default)]
pub struct ReadingStabilityRenderer {
    time: f32,
}

impl ReadingStabilityRenderer {
    pub fn time(&self) -> f32 {
        self.time
    }
}

impl Renderer for ReadingStabilityRenderer {
    fn kind(&self) -> ExperienceKind {
        ExperienceKind::ReadingStability
    }

    fn advance(&mut self, dt: f32, frame: &RenderFrame, _rng: &mut Rng, _events: &mut Vec<RendererEvent>) {
        if frame.reflecting || !(dt > 0.0) {
            return;
        }
        self.time += TIME_RATE * dt;
    }

    fn render(&self, _frame: &RenderFrame) -> VisualParams {
        VisualParams::ReadingStability(ReadingStabilityParams {
            time: self.time,
            lines: (0..LINE_COUNT).map(|line| LineOffset::at(self.time, line)).collect(),
        })
    }
}
