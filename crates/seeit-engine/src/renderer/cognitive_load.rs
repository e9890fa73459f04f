//! Cognitive load: task cards pile up faster than anyone can clear them.

use glam::Vec2;
use serde::Serialize;

use crate::catalog::ExperienceKind;
use crate::core::rng::Rng;
use crate::core::timer::Interval;

use super::traits::{ExperienceAction, Rect, RenderFrame, Renderer, RendererEvent, TaskId};
use super::VisualParams;

pub const TASK_SECS: f32 = 2.0;
pub const CARD_SIZE: Vec2 = Vec2::new(250.0, 80.0);
/// Cards scatter up to this far from the viewport center on each axis.
pub const MAX_OFFSET: f32 = 50.0;

pub const TASK_TITLES: [&str; 5] = ["Email", "Slack", "Update", "Alert", "Call"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskColor {
    Blue,
    Orange,
    Red,
    Green,
    Purple,
}

impl TaskColor {
    pub const ALL: [TaskColor; 5] = [
        TaskColor::Blue,
        TaskColor::Orange,
        TaskColor::Red,
        TaskColor::Green,
        TaskColor::Purple,
    ];

    pub fn rgb(self) -> [f32; 3] {
        match self {
            TaskColor::Blue => [0.0, 0.48, 1.0],
            TaskColor::Orange => [1.0, 0.58, 0.0],
            TaskColor::Red => [1.0, 0.23, 0.19],
            TaskColor::Green => [0.2, 0.78, 0.35],
            TaskColor::Purple => [0.69, 0.32, 0.87],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskCard {
    pub id: TaskId,
    pub title: &'static str,
    pub color: TaskColor,
    /// Displacement of the card's center from the viewport center.
    pub offset: Vec2,
}

impl TaskCard {
    pub fn rect(&self, viewport: Vec2) -> Rect {
        Rect::centered(viewport * 0.5 + self.offset, CARD_SIZE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardParams {
    pub id: TaskId,
    pub title: &'static str,
    pub color: TaskColor,
    pub rgb: [f32; 3],
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CognitiveLoadParams {
    pub open: usize,
    /// Bottom to top.
    pub cards: Vec<CardParams>,
}

#[derive(Debug)]
pub struct CognitiveLoadRenderer {
    cards: Vec<TaskCard>,
    next_id: u32,
    timer: Interval,
}

impl CognitiveLoadRenderer {
    /// Starts with one card already on screen.
    pub fn new(rng: &mut Rng) -> Self {
        let mut renderer = Self {
            cards: Vec::new(),
            next_id: 1,
            timer: Interval::new(TASK_SECS),
        };
        renderer.add_card(rng);
        renderer
    }

    pub fn cards(&self) -> &[TaskCard] {
        &self.cards
    }

    fn add_card(&mut self, rng: &mut Rng) -> RendererEvent {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        let title = rng.choose(&TASK_TITLES).copied().unwrap_or(TASK_TITLES[0]);
        let color = rng.choose(&TaskColor::ALL).copied().unwrap_or(TaskColor::Blue);
        let offset = Vec2::new(
            rng.range_f32(-MAX_OFFSET, MAX_OFFSET),
            rng.range_f32(-MAX_OFFSET, MAX_OFFSET),
        );
        self.cards.push(TaskCard {
            id,
            title,
            color,
            offset,
        });
        RendererEvent::TaskAdded {
            id,
            open: self.cards.len(),
        }
    }

    fn dismiss(&mut self, id: TaskId) -> Option<RendererEvent> {
        let Some(index) = self.cards.iter().position(|card| card.id == id) else {
            log::debug!("no open task {:?}", id);
            return None;
        };
        self.cards.remove(index);
        Some(RendererEvent::TaskDismissed {
            id,
            open: self.cards.len(),
        })
    }
}

impl Renderer for CognitiveLoadRenderer {
    fn kind(&self) -> ExperienceKind {
        ExperienceKind::CognitiveLoad
    }

    fn advance(&mut self, dt: f32, frame: &RenderFrame, rng: &mut Rng, events: &mut Vec<RendererEvent>) {
        if frame.reflecting {
            return;
        }
        for _ in 0..self.timer.tick(dt) {
            events.push(self.add_card(rng));
        }
    }

    /// Dismisses the topmost card under the pointer.
    fn tap(&mut self, point: Vec2, frame: &RenderFrame, _rng: &mut Rng) -> Option<RendererEvent> {
        if frame.reflecting {
            return None;
        }
        let id = self
            .cards
            .iter()
            .rev()
            .find(|card| card.rect(frame.viewport).contains(point))?
            .id;
        self.dismiss(id)
    }

    fn action(
        &mut self,
        action: ExperienceAction,
        frame: &RenderFrame,
        _rng: &mut Rng,
    ) -> Option<RendererEvent> {
        match action {
            ExperienceAction::DismissTask(id) if !frame.reflecting => self.dismiss(id),
            _ => None,
        }
    }

    fn render(&self, frame: &RenderFrame) -> VisualParams {
        VisualParams::CognitiveLoad(CognitiveLoadParams {
            open: self.cards.len(),
            cards: self
                .cards
                .iter()
                .map(|card| CardParams {
                    id: card.id,
                    title: card.title,
                    color: card.color,
                    rgb: card.color.rgb(),
                    rect: card.rect(frame.viewport),
                })
                .collect(),
        })
    }
}
