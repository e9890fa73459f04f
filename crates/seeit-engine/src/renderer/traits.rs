//! The contract every experience renderer fulfills.
//!
//! A renderer turns the active journey's phase and progress, plus its own
//! local interaction state, into visual parameters for the host. Taps and
//! named actions only ever touch that local state; the journey timeline is
//! owned by the flow controller.

use glam::Vec2;
use serde::Serialize;

use crate::catalog::ExperienceKind;
use crate::core::rng::Rng;
use crate::journey::JourneyPhase;

use super::VisualParams;

/// Simulation strength for a phase: nothing during orientation, ramping with
/// progress through the environmental shift, full afterwards.
pub fn intensity(phase: JourneyPhase, progress: f32) -> f32 {
    match phase {
        JourneyPhase::Orientation => 0.0,
        JourneyPhase::EnvironmentalShift => {
            if progress.is_nan() {
                0.0
            } else {
                progress.clamp(0.0, 1.0)
            }
        }
        JourneyPhase::ImmersiveInteraction | JourneyPhase::Integration => 1.0,
    }
}

/// Everything a renderer may read about the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderFrame {
    pub phase: JourneyPhase,
    pub progress: f32,
    pub intensity: f32,
    /// Logical viewport size in points.
    pub viewport: Vec2,
    /// True during integration. Time-driven animation is frozen.
    pub reflecting: bool,
}

impl RenderFrame {
    pub fn new(phase: JourneyPhase, progress: f32, viewport: Vec2) -> Self {
        Self {
            phase,
            progress,
            intensity: intensity(phase, progress),
            viewport,
            reflecting: phase == JourneyPhase::Integration,
        }
    }
}

/// Axis-aligned rectangle in viewport points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            origin: center - size * 0.5,
            size,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    /// Edges are inclusive.
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.origin + self.size;
        point.x >= self.origin.x && point.x <= max.x && point.y >= self.origin.y && point.y <= max.y
    }
}

/// Margin around the square 3x3 grids (color and memory).
pub const GRID_MARGIN: f32 = 24.0;
/// Gap between neighbouring grid cells.
pub const GRID_SPACING: f32 = 8.0;

/// Cell rectangles of a square 3x3 grid centered in the viewport, row-major.
pub fn grid_cells(viewport: Vec2) -> [Rect; 9] {
    let side = (viewport.x.min(viewport.y) - 2.0 * GRID_MARGIN).max(0.0);
    let cell = ((side - 2.0 * GRID_SPACING) / 3.0).max(0.0);
    let origin = (viewport - Vec2::splat(side)) * 0.5;
    let mut cells = [Rect::new(Vec2::ZERO, Vec2::ZERO); 9];
    for (i, rect) in cells.iter_mut().enumerate() {
        let col = (i % 3) as f32;
        let row = (i / 3) as f32;
        *rect = Rect::new(
            origin + Vec2::new(col, row) * (cell + GRID_SPACING),
            Vec2::splat(cell),
        );
    }
    cells
}

/// Index of the grid cell under `point`. Gaps between cells hit nothing.
pub fn grid_hit(viewport: Vec2, point: Vec2) -> Option<usize> {
    grid_cells(viewport).iter().position(|cell| cell.contains(point))
}

/// Identifier of one cognitive-load task card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TaskId(pub u32);

/// Named, non-positional commands aimed at the active renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExperienceAction {
    /// Compare the recalled grid with the hidden pattern (memory load).
    CheckMemory,
    /// Flip one recall cell (memory load).
    ToggleMemoryCell(usize),
    /// Remove one task card (cognitive load).
    DismissTask(TaskId),
    /// Zero the hit and miss counters (interaction precision).
    ResetPrecision,
    /// Answer with a grid cell (color perception).
    TapColorCell(usize),
}

/// Something the renderer wants the host to know about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RendererEvent {
    ColorAnswered { cell: usize, correct: bool, level: u32 },
    PrecisionTapped { hit: bool, hits: u32, misses: u32 },
    PrecisionReset,
    MemoryToggled { cell: usize, on: bool },
    MemoryChecked { matching: usize, perfect: bool, cells: usize },
    TaskAdded { id: TaskId, open: usize },
    TaskDismissed { id: TaskId, open: usize },
}

/// One experience's visuals and local interaction state.
pub trait Renderer {
    fn kind(&self) -> ExperienceKind;

    /// Step time-driven animation by `dt` seconds. Implementations return
    /// immediately while `frame.reflecting`.
    fn advance(
        &mut self,
        dt: f32,
        frame: &RenderFrame,
        rng: &mut Rng,
        events: &mut Vec<RendererEvent>,
    );

    /// A pointer-down at `point` (viewport points). Most experiences ignore taps.
    fn tap(&mut self, _point: Vec2, _frame: &RenderFrame, _rng: &mut Rng) -> Option<RendererEvent> {
        None
    }

    /// A named command. Actions aimed at another experience are ignored.
    fn action(
        &mut self,
        _action: ExperienceAction,
        _frame: &RenderFrame,
        _rng: &mut Rng,
    ) -> Option<RendererEvent> {
        None
    }

    /// Visual parameters for this frame. Pure.
    fn render(&self, frame: &RenderFrame) -> VisualParams;
}
