use glam::Vec2;

/// Key code the session treats as the back action.
pub const KEY_ESCAPE: u32 = 27;

/// Input events forwarded by the host between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at viewport coordinates (x, y). Routed to the
    /// active renderer's hit-testing.
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended at viewport coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// A touch/cursor moved to viewport coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A named action from the host UI (buttons, hub nodes, dock).
    /// `kind` is one of the `ACTION_*` codes; `a`, `b`, `c` carry arguments.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

impl InputEvent {
    pub fn tap(point: Vec2) -> Self {
        InputEvent::PointerDown {
            x: point.x,
            y: point.y,
        }
    }

    pub fn action(kind: u32, a: f32) -> Self {
        InputEvent::Custom {
            kind,
            a,
            b: 0.0,
            c: 0.0,
        }
    }

    /// Pointer position, for pointer events.
    pub fn point(&self) -> Option<Vec2> {
        match *self {
            InputEvent::PointerDown { x, y }
            | InputEvent::PointerUp { x, y }
            | InputEvent::PointerMove { x, y } => Some(Vec2::new(x, y)),
            _ => None,
        }
    }
}

/// Events queued by the host and drained once per frame.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
