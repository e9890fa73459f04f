use bytemuck::{Pod, Zeroable};

/// An app event communicated from Rust to the host via the frame buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct AppEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl AppEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: u32, a: f32, b: f32, c: f32) -> Self {
        Self {
            kind: kind as f32,
            a,
            b,
            c,
        }
    }

    pub fn kind_code(&self) -> u32 {
        self.kind as u32
    }
}

// ---- Event kinds (Rust → host) ----

/// a = kind index, b = phase index.
pub const EVENT_PHASE_ENTERED: u32 = 1;
/// a = kind index.
pub const EVENT_JOURNEY_COMPLETED: u32 = 2;
/// a = hub code, b = kind index or -1.
pub const EVENT_HUB_CHANGED: u32 = 3;
/// a = kind index, b = completed count.
pub const EVENT_EXPERIENCE_COMPLETED: u32 = 4;
/// a = flow code, b = onboarding page.
pub const EVENT_FLOW_CHANGED: u32 = 5;
/// a = kind index, b = phase index at cancellation.
pub const EVENT_JOURNEY_CANCELLED: u32 = 6;
/// a = cell index, b = 1.0 when correct, c = level after the answer.
pub const EVENT_COLOR_ANSWER: u32 = 7;
/// a = 1.0 on hit, b = hits, c = misses.
pub const EVENT_PRECISION_TAP: u32 = 8;
/// a = hits (always 0), b = misses (always 0).
pub const EVENT_PRECISION_RESET: u32 = 9;
/// a = cell index, b = 1.0 when now on.
pub const EVENT_MEMORY_TOGGLED: u32 = 10;
/// a = matching cells, b = 1.0 on a perfect recall, c = cell count.
pub const EVENT_MEMORY_CHECKED: u32 = 11;
/// a = task id, b = open task count.
pub const EVENT_TASK_ADDED: u32 = 12;
/// a = task id, b = open task count.
pub const EVENT_TASK_DISMISSED: u32 = 13;

// ---- Custom input kinds (host → Rust), carried by `InputEvent::Custom` ----

pub const ACTION_ADVANCE_ONBOARDING: u32 = 1;
/// a = kind index. Hub tap dispatch (focus / immerse / integrate).
pub const ACTION_TAP_EXPERIENCE: u32 = 2;
/// a = kind index.
pub const ACTION_FOCUS: u32 = 3;
/// a = kind index.
pub const ACTION_IMMERSE: u32 = 4;
/// a = kind index.
pub const ACTION_INTEGRATE: u32 = 5;
pub const ACTION_BACK: u32 = 6;
pub const ACTION_SYNTHESIZE: u32 = 7;
pub const ACTION_RESTART: u32 = 8;
pub const ACTION_MEMORY_CHECK: u32 = 9;
/// a = cell index.
pub const ACTION_MEMORY_TOGGLE: u32 = 10;
pub const ACTION_PRECISION_RESET: u32 = 11;
/// a = task id.
pub const ACTION_DISMISS_TASK: u32 = 12;
/// a = cell index.
pub const ACTION_COLOR_CELL: u32 = 13;
/// a = width, b = height.
pub const ACTION_RESIZE: u32 = 14;
