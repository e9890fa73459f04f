//! Memory load: memorize a pattern, sit through visual noise, then rebuild it.
//!
//! The observe/noise/recall cycle runs on its own one-second cadence and is
//! independent of the journey phase.

use glam::Vec2;
use serde::Serialize;

use crate::catalog::ExperienceKind;
use crate::core::rng::Rng;
use crate::core::timer::Interval;

use super::traits::{grid_cells, grid_hit, ExperienceAction, Rect, RenderFrame, Renderer, RendererEvent};
use super::VisualParams;

pub const CELL_COUNT: usize = 9;
pub const NOISE_DOTS: usize = 20;
pub const TICK_SECS: f32 = 1.0;
/// Ticks at which noise and then recall begin.
pub const NOISE_AT: u32 = 5;
pub const RECALL_AT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemoryStage {
    Observe,
    Noise,
    Recall,
}

impl MemoryStage {
    fn at(ticks: u32) -> Self {
        if ticks < NOISE_AT {
            MemoryStage::Observe
        } else if ticks < RECALL_AT {
            MemoryStage::Noise
        } else {
            MemoryStage::Recall
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemoryResult {
    pub matching: usize,
    pub perfect: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MemoryCell {
    pub rect: Rect,
    pub lit: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryLoadParams {
    pub stage: MemoryStage,
    pub cells: Vec<MemoryCell>,
    pub noise: Vec<Vec2>,
    pub last_result: Option<MemoryResult>,
}

#[derive(Debug)]
pub struct MemoryLoadRenderer {
    pattern: [bool; CELL_COUNT],
    recalled: [bool; CELL_COUNT],
    ticks: u32,
    timer: Interval,
    noise: Vec<Vec2>,
    last_result: Option<MemoryResult>,
}

impl MemoryLoadRenderer {
    pub fn new(rng: &mut Rng) -> Self {
        Self {
            pattern: random_pattern(rng),
            recalled: [false; CELL_COUNT],
            ticks: 0,
            timer: Interval::new(TICK_SECS),
            noise: Vec::with_capacity(NOISE_DOTS),
            last_result: None,
        }
    }

    pub fn stage(&self) -> MemoryStage {
        MemoryStage::at(self.ticks)
    }

    pub fn pattern(&self) -> &[bool; CELL_COUNT] {
        &self.pattern
    }

    pub fn recalled(&self) -> &[bool; CELL_COUNT] {
        &self.recalled
    }

    fn scatter_noise(&mut self, viewport: Vec2, rng: &mut Rng) {
        self.noise.clear();
        for _ in 0..NOISE_DOTS {
            self.noise
                .push(Vec2::new(rng.range_f32(0.0, viewport.x), rng.range_f32(0.0, viewport.y)));
        }
    }

    fn toggle(&mut self, cell: usize) -> Option<RendererEvent> {
        if self.stage() != MemoryStage::Recall || cell >= CELL_COUNT {
            log::debug!("memory toggle of cell {} ignored during {:?}", cell, self.stage());
            return None;
        }
        self.recalled[cell] = !self.recalled[cell];
        Some(RendererEvent::MemoryToggled {
            cell,
            on: self.recalled[cell],
        })
    }

    /// Score the recalled grid, then start over with a fresh pattern.
    fn check(&mut self, rng: &mut Rng) -> Option<RendererEvent> {
        if self.stage() != MemoryStage::Recall {
            log::debug!("memory check ignored during {:?}", self.stage());
            return None;
        }
        let matching = self
            .pattern
            .iter()
            .zip(self.recalled.iter())
            .filter(|(a, b)| a == b)
            .count();
        let result = MemoryResult {
            matching,
            perfect: matching == CELL_COUNT,
        };
        self.last_result = Some(result);
        self.pattern = random_pattern(rng);
        self.recalled = [false; CELL_COUNT];
        self.ticks = 0;
        self.timer.reset();
        self.noise.clear();
        Some(RendererEvent::MemoryChecked {
            matching,
            perfect: result.perfect,
            cells: CELL_COUNT,
        })
    }
}

fn random_pattern(rng: &mut Rng) -> [bool; CELL_COUNT] {
    let mut pattern = [false; CELL_COUNT];
    for cell in pattern.iter_mut() {
        *cell = rng.next_bool();
    }
    pattern
}

impl Renderer for MemoryLoadRenderer {
    fn kind(&self) -> ExperienceKind {
        ExperienceKind::MemoryLoad
    }

    fn advance(&mut self, dt: f32, frame: &RenderFrame, rng: &mut Rng, _events: &mut Vec<RendererEvent>) {
        if frame.reflecting {
            return;
        }
        for _ in 0..self.timer.tick(dt) {
            if self.stage() == MemoryStage::Recall {
                break;
            }
            self.ticks += 1;
            if self.stage() == MemoryStage::Noise {
                self.scatter_noise(frame.viewport, rng);
            } else {
                self.noise.clear();
            }
        }
    }

    fn tap(&mut self, point: Vec2, frame: &RenderFrame, _rng: &mut Rng) -> Option<RendererEvent> {
        if frame.reflecting {
            return None;
        }
        let cell = grid_hit(frame.viewport, point)?;
        self.toggle(cell)
    }

    fn action(
        &mut self,
        action: ExperienceAction,
        frame: &RenderFrame,
        rng: &mut Rng,
    ) -> Option<RendererEvent> {
        if frame.reflecting {
            return None;
        }
        match action {
            ExperienceAction::ToggleMemoryCell(cell) => self.toggle(cell),
            ExperienceAction::CheckMemory => self.check(rng),
            _ => None,
        }
    }

    fn render(&self, frame: &RenderFrame) -> VisualParams {
        let stage = self.stage();
        let cells = grid_cells(frame.viewport)
            .iter()
            .enumerate()
            .map(|(i, rect)| MemoryCell {
                rect: *rect,
                lit: match stage {
                    MemoryStage::Observe => self.pattern[i],
                    MemoryStage::Noise => false,
                    MemoryStage::Recall => self.recalled[i],
                },
            })
            .collect();
        VisualParams::MemoryLoad(MemoryLoadParams {
            stage,
            cells,
            noise: self.noise.clone(),
            last_result: self.last_result,
        })
    }
}
