use glam::Vec2;
use serde::Serialize;

use crate::api::config::AppConfig;
use crate::api::types::*;
use crate::catalog::ExperienceKind;
use crate::core::clock::Timestamp;
use crate::core::rng::Rng;
use crate::core::time::FixedTimestep;
use crate::hub::{AppFlow, FlowController, FlowEvent, HubState};
use crate::input::queue::{InputEvent, InputQueue, KEY_ESCAPE};
use crate::journey::{JourneyEventKind, JourneyId, JourneyPhase, JourneyStatus};
use crate::renderer::{
    renderer_for, ExperienceAction, RenderFrame, Renderer, RendererEvent, TaskId, VisualParams,
};

/// The running journey as seen by the host this frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JourneySnapshot {
    pub id: JourneyId,
    pub kind: ExperienceKind,
    pub phase: JourneyPhase,
    pub progress: f32,
    pub intensity: f32,
    pub status: JourneyStatus,
}

/// Everything the host needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub flow: AppFlow,
    pub journey: Option<JourneySnapshot>,
    pub completed: Vec<ExperienceKind>,
    pub completion_ratio: f32,
    pub can_synthesize: bool,
    pub visuals: Option<VisualParams>,
}

impl FrameSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// One app session: the flow controller, the active renderer and the input
/// queue, ticked by the host with clock readings.
pub struct Session {
    config: AppConfig,
    controller: FlowController,
    renderer: Option<Box<dyn Renderer>>,
    input: InputQueue,
    rng: Rng,
    timestep: FixedTimestep,
    viewport: Vec2,
    now: Timestamp,
    last_tick: Option<Timestamp>,
    frame: u64,
    events: Vec<AppEvent>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl Session {
    pub fn new(config: AppConfig) -> Self {
        Self {
            controller: FlowController::new(&config),
            renderer: None,
            input: InputQueue::new(),
            rng: Rng::new(config.seed),
            timestep: FixedTimestep::new(config.fixed_dt),
            viewport: config.viewport,
            now: Timestamp::ZERO,
            last_tick: None,
            frame: 0,
            events: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn controller(&self) -> &FlowController {
        &self.controller
    }

    pub fn renderer(&self) -> Option<&dyn Renderer> {
        self.renderer.as_deref()
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Events produced by the last `tick`.
    pub fn events(&self) -> &[AppEvent] {
        &self.events
    }

    /// Queue input for the next `tick`.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame at clock reading `now`.
    pub fn tick(&mut self, now: Timestamp) {
        let frame_dt = self.last_tick.map_or(0.0, |last| now.since(last)) as f32;
        self.last_tick = Some(now);
        if now > self.now {
            self.now = now;
        }
        self.frame += 1;
        self.events.clear();

        self.controller.update(self.now);
        self.sync_renderer();

        let mut renderer_events = Vec::new();
        for event in self.input.drain() {
            if let Some(ev) = self.handle_input(event) {
                renderer_events.push(ev);
            }
            self.sync_renderer();
        }

        let steps = self.timestep.accumulate(frame_dt);
        if let Some(frame) = self.render_frame() {
            if let Some(renderer) = self.renderer.as_mut() {
                if !frame.reflecting {
                    for _ in 0..steps {
                        renderer.advance(self.timestep.dt(), &frame, &mut self.rng, &mut renderer_events);
                    }
                }
            }
        }

        for event in self.controller.drain_events() {
            self.events.push(flow_app_event(event));
        }
        for event in renderer_events {
            self.events.push(renderer_app_event(event));
        }
    }

    /// Phase, progress and viewport for the renderer, while a journey runs.
    pub fn render_frame(&self) -> Option<RenderFrame> {
        let journey = self.controller.journey()?;
        Some(RenderFrame::new(
            journey.phase(),
            journey.progress(self.now),
            self.viewport,
        ))
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        let frame = self.render_frame();
        let journey = self.controller.journey().zip(frame).map(|(j, f)| JourneySnapshot {
            id: j.id(),
            kind: j.kind(),
            phase: j.phase(),
            progress: f.progress,
            intensity: f.intensity,
            status: j.status(),
        });
        let visuals = match (self.renderer.as_ref(), frame) {
            (Some(renderer), Some(frame)) => Some(renderer.render(&frame)),
            _ => None,
        };
        FrameSnapshot {
            frame: self.frame,
            flow: self.controller.flow(),
            journey,
            completed: self.controller.completed().iter().copied().collect(),
            completion_ratio: self.controller.completion_ratio(),
            can_synthesize: self.controller.can_synthesize(),
            visuals,
        }
    }

    /// The renderer lives from immersion until the hub is idle again.
    fn sync_renderer(&mut self) {
        match self.controller.hub_state() {
            Some(HubState::Immersed(kind)) | Some(HubState::Integrating(kind)) => {
                let current = self.renderer.as_ref().map(|r| r.kind());
                if current == Some(kind) {
                    return;
                }
                if matches!(self.controller.hub_state(), Some(HubState::Immersed(_))) {
                    log::debug!("renderer created for {}", kind.slug());
                    self.renderer = Some(renderer_for(kind, self.viewport, &mut self.rng));
                    self.timestep.reset();
                } else {
                    self.renderer = None;
                }
            }
            _ => {
                if let Some(renderer) = self.renderer.take() {
                    log::debug!("renderer dropped for {}", renderer.kind().slug());
                }
            }
        }
    }

    fn handle_input(&mut self, event: InputEvent) -> Option<RendererEvent> {
        match event {
            InputEvent::PointerDown { x, y } => {
                let frame = self.render_frame()?;
                let immersed = matches!(self.controller.hub_state(), Some(HubState::Immersed(_)));
                if !immersed || frame.reflecting {
                    return None;
                }
                let renderer = self.renderer.as_mut()?;
                renderer.tap(Vec2::new(x, y), &frame, &mut self.rng)
            }
            InputEvent::PointerUp { .. } | InputEvent::PointerMove { .. } => None,
            InputEvent::KeyDown { key_code } => {
                if key_code == KEY_ESCAPE {
                    self.controller.back();
                }
                None
            }
            InputEvent::Custom { kind, a, b, .. } => self.handle_action(kind, a, b),
        }
    }

    fn handle_action(&mut self, kind: u32, a: f32, b: f32) -> Option<RendererEvent> {
        let now = self.now;
        match kind {
            ACTION_ADVANCE_ONBOARDING => {
                self.controller.advance_onboarding();
            }
            ACTION_TAP_EXPERIENCE => {
                if let Some(k) = kind_arg(a) {
                    self.controller.tap_experience(k, now);
                }
            }
            ACTION_FOCUS => {
                if let Some(k) = kind_arg(a) {
                    self.controller.focus(k, now);
                }
            }
            ACTION_IMMERSE => {
                if let Some(k) = kind_arg(a) {
                    self.controller.immerse(k);
                }
            }
            ACTION_INTEGRATE => {
                if let Some(k) = kind_arg(a) {
                    self.controller.integrate(k);
                }
            }
            ACTION_BACK => {
                self.controller.back();
            }
            ACTION_SYNTHESIZE => {
                self.controller.synthesize();
            }
            ACTION_RESTART => {
                self.controller.restart();
            }
            ACTION_RESIZE => {
                if a.is_finite() && b.is_finite() && a > 0.0 && b > 0.0 {
                    self.viewport = Vec2::new(a, b);
                } else {
                    log::warn!("ignoring viewport resize to {}x{}", a, b);
                }
            }
            ACTION_MEMORY_CHECK => return self.renderer_action(ExperienceAction::CheckMemory),
            ACTION_MEMORY_TOGGLE => {
                let cell = index_arg(a)?;
                return self.renderer_action(ExperienceAction::ToggleMemoryCell(cell));
            }
            ACTION_PRECISION_RESET => return self.renderer_action(ExperienceAction::ResetPrecision),
            ACTION_DISMISS_TASK => {
                let id = index_arg(a)?;
                return self.renderer_action(ExperienceAction::DismissTask(TaskId(id as u32)));
            }
            ACTION_COLOR_CELL => {
                let cell = index_arg(a)?;
                return self.renderer_action(ExperienceAction::TapColorCell(cell));
            }
            other => log::debug!("unknown action {}", other),
        }
        None
    }

    /// Named renderer commands reach the renderer only while immersed.
    fn renderer_action(&mut self, action: ExperienceAction) -> Option<RendererEvent> {
        if !matches!(self.controller.hub_state(), Some(HubState::Immersed(_))) {
            log::debug!("{:?} ignored outside immersion", action);
            return None;
        }
        let frame = self.render_frame()?;
        let renderer = self.renderer.as_mut()?;
        renderer.action(action, &frame, &mut self.rng)
    }
}

fn index_arg(a: f32) -> Option<usize> {
    if a.is_finite() && a >= 0.0 {
        Some(a as usize)
    } else {
        None
    }
}

fn kind_arg(a: f32) -> Option<ExperienceKind> {
    let kind = index_arg(a).and_then(ExperienceKind::from_index);
    if kind.is_none() {
        log::debug!("no experience with index {}", a);
    }
    kind
}

fn kind_code(kind: Option<ExperienceKind>) -> f32 {
    kind.map_or(-1.0, |k| k.index() as f32)
}

fn flag(value: bool) -> f32 {
    if value {
        1.0
    } else {
        0.0
    }
}

fn flow_app_event(event: FlowEvent) -> AppEvent {
    match event {
        FlowEvent::FlowChanged(flow) => {
            AppEvent::new(EVENT_FLOW_CHANGED, flow.code() as f32, flow.page() as f32, 0.0)
        }
        FlowEvent::HubChanged(state) => {
            AppEvent::new(EVENT_HUB_CHANGED, state.code() as f32, kind_code(state.kind()), 0.0)
        }
        FlowEvent::Journey(journey) => match journey.event {
            JourneyEventKind::PhaseEntered(phase) => AppEvent::new(
                EVENT_PHASE_ENTERED,
                journey.kind.index() as f32,
                phase.index() as f32,
                0.0,
            ),
            JourneyEventKind::Completed => {
                AppEvent::new(EVENT_JOURNEY_COMPLETED, journey.kind.index() as f32, 0.0, 0.0)
            }
        },
        FlowEvent::JourneyCancelled { kind, phase } => AppEvent::new(
            EVENT_JOURNEY_CANCELLED,
            kind.index() as f32,
            phase.index() as f32,
            0.0,
        ),
        FlowEvent::ExperienceCompleted { kind, completed } => AppEvent::new(
            EVENT_EXPERIENCE_COMPLETED,
            kind.index() as f32,
            completed as f32,
            0.0,
        ),
    }
}

fn renderer_app_event(event: RendererEvent) -> AppEvent {
    match event {
        RendererEvent::ColorAnswered { cell, correct, level } => {
            AppEvent::new(EVENT_COLOR_ANSWER, cell as f32, flag(correct), level as f32)
        }
        RendererEvent::PrecisionTapped { hit, hits, misses } => {
            AppEvent::new(EVENT_PRECISION_TAP, flag(hit), hits as f32, misses as f32)
        }
        RendererEvent::PrecisionReset => AppEvent::new(EVENT_PRECISION_RESET, 0.0, 0.0, 0.0),
        RendererEvent::MemoryToggled { cell, on } => {
            AppEvent::new(EVENT_MEMORY_TOGGLED, cell as f32, flag(on), 0.0)
        }
        RendererEvent::MemoryChecked { matching, perfect, cells } => {
            AppEvent::new(EVENT_MEMORY_CHECKED, matching as f32, flag(perfect), cells as f32)
        }
        RendererEvent::TaskAdded { id, open } => {
            AppEvent::new(EVENT_TASK_ADDED, id.0 as f32, open as f32, 0.0)
        }
        RendererEvent::TaskDismissed { id, open } => {
            AppEvent::new(EVENT_TASK_DISMISSED, id.0 as f32, open as f32, 0.0)
        }
    }
}
