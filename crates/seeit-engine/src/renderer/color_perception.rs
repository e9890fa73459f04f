//! Color perception: find the odd cell out in a 3x3 grid while the hue gap
//! narrows level by level and saturation drains with intensity.

use serde::Serialize;

use crate::catalog::ExperienceKind;
use crate::core::rng::Rng;
use crate::core::timer::Delay;

use super::traits::{grid_cells, grid_hit, ExperienceAction, Rect, RenderFrame, Renderer, RendererEvent};
use super::VisualParams;

pub const CELL_COUNT: usize = 9;
pub const BASE_SATURATION: f32 = 0.7;
pub const BASE_BRIGHTNESS: f32 = 0.9;
/// Saturation lost at full intensity.
pub const SATURATION_DROP: f32 = 0.3;
pub const MIN_SATURATION: f32 = 0.2;
pub const FEEDBACK_SECS: f32 = 0.6;

/// Highest reachable level. Up to here every level step still shrinks the
/// hue gap by more than one f32 ulp.
pub const MAX_LEVEL: u32 = 50;

/// Hue distance between the target cell and the rest at `level` (1-based,
/// clamped to `1..=MAX_LEVEL`).
pub fn hue_offset(level: u32) -> f32 {
    let steps = level.clamp(1, MAX_LEVEL) - 1;
    0.005 + 0.145 * 0.75f32.powi(steps as i32)
}

/// Hue, saturation and brightness, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hsb {
    pub hue: f32,
    pub saturation: f32,
    pub brightness: f32,
}

impl Hsb {
    pub fn new(hue: f32, saturation: f32, brightness: f32) -> Self {
        Self {
            hue: hue.rem_euclid(1.0),
            saturation: saturation.clamp(0.0, 1.0),
            brightness: brightness.clamp(0.0, 1.0),
        }
    }

    pub fn to_rgb(self) -> [f32; 3] {
        let h = self.hue.rem_euclid(1.0) * 6.0;
        let c = self.brightness * self.saturation;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = self.brightness - c;
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        [r + m, g + m, b + m]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Round {
    target: usize,
    base_hue: f32,
}

impl Round {
    fn random(rng: &mut Rng) -> Self {
        Self {
            target: rng.next_index(CELL_COUNT),
            base_hue: rng.next_f32(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorFeedback {
    pub cell: usize,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorCell {
    pub rect: Rect,
    pub hsb: Hsb,
    pub rgb: [f32; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorPerceptionParams {
    pub level: u32,
    pub hue_offset: f32,
    pub cells: Vec<ColorCell>,
    pub feedback: Option<ColorFeedback>,
}

#[derive(Debug)]
pub struct ColorPerceptionRenderer {
    level: u32,
    round: Round,
    feedback: Option<(ColorFeedback, Delay)>,
}

impl ColorPerceptionRenderer {
    pub fn new(rng: &mut Rng) -> Self {
        Self {
            level: 1,
            round: Round::random(rng),
            feedback: None,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn target(&self) -> usize {
        self.round.target
    }

    /// Evaluate an answer immediately; the next round starts right away and
    /// the flash only decorates the tapped cell.
    fn answer(&mut self, cell: usize, rng: &mut Rng) -> Option<RendererEvent> {
        if cell >= CELL_COUNT {
            log::debug!("color cell {} out of range", cell);
            return None;
        }
        let correct = cell == self.round.target;
        if correct {
            self.level = (self.level + 1).min(MAX_LEVEL);
        }
        self.round = Round::random(rng);
        let feedback = ColorFeedback { cell, correct };
        self.feedback = Some((feedback, Delay::new(FEEDBACK_SECS)));
        Some(RendererEvent::ColorAnswered {
            cell,
            correct,
            level: self.level,
        })
    }

    fn saturation(intensity: f32) -> f32 {
        (BASE_SATURATION - SATURATION_DROP * intensity.clamp(0.0, 1.0)).max(MIN_SATURATION)
    }
}

impl Renderer for ColorPerceptionRenderer {
    fn kind(&self) -> ExperienceKind {
        ExperienceKind::ColorPerception
    }

    fn advance(&mut self, dt: f32, frame: &RenderFrame, _rng: &mut Rng, _events: &mut Vec<RendererEvent>) {
        if frame.reflecting {
            return;
        }
        if let Some((_, delay)) = self.feedback.as_mut() {
            if delay.tick(dt) {
                self.feedback = None;
            }
        }
    }

    fn tap(&mut self, point: glam::Vec2, frame: &RenderFrame, rng: &mut Rng) -> Option<RendererEvent> {
        if frame.reflecting {
            return None;
        }
        let cell = grid_hit(frame.viewport, point)?;
        self.answer(cell, rng)
    }

    fn action(
        &mut self,
        action: ExperienceAction,
        frame: &RenderFrame,
        rng: &mut Rng,
    ) -> Option<RendererEvent> {
        match action {
            ExperienceAction::TapColorCell(cell) if !frame.reflecting => self.answer(cell, rng),
            _ => None,
        }
    }

    fn render(&self, frame: &RenderFrame) -> VisualParams {
        let offset = hue_offset(self.level);
        let saturation = Self::saturation(frame.intensity);
        let cells = grid_cells(frame.viewport)
            .iter()
            .enumerate()
            .map(|(i, rect)| {
                let hue = if i == self.round.target {
                    self.round.base_hue + offset
                } else {
                    self.round.base_hue
                };
                let hsb = Hsb::new(hue, saturation, BASE_BRIGHTNESS);
                ColorCell {
                    rect: *rect,
                    hsb,
                    rgb: hsb.to_rgb(),
                }
            })
            .collect();
        VisualParams::ColorPerception(ColorPerceptionParams {
            level: self.level,
            hue_offset: offset,
            cells,
            feedback: self.feedback.as_ref().map(|(feedback, _)| *feedback),
        })
    }
}
