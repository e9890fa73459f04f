pub mod clock;
pub mod runner;

use std::cell::RefCell;

use seeit_engine::bridge::protocol::PROTOCOL_VERSION;
use seeit_engine::{Catalog, InputEvent};
use wasm_bindgen::prelude::*;

pub use clock::BrowserClock;
pub use runner::{SessionRunner, TickSource};

thread_local! {
    static RUNNER: RefCell<Option<SessionRunner>> = RefCell::new(None);
}

/// Run `f` against the runner. Before `seeit_init` nothing runs and `None`
/// comes back.
fn with_runner<R>(f: impl FnOnce(&mut SessionRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("session not initialized, call seeit_init() first");
                None
            }
        }
    })
}

#[wasm_bindgen]
pub fn seeit_init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(SessionRunner::default());
    });
    log::info!("see-it-like-me: initialized");
}

/// Apply a JSON configuration. Invalid JSON is logged and ignored.
#[wasm_bindgen]
pub fn seeit_load_config(json: &str) -> bool {
    with_runner(|r| r.load_config(json)).unwrap_or(false)
}

/// Advance one frame. `now_ms` is a `performance.now()` reading. A session
/// is driven either by this or by `seeit_tick_now`, whichever ticks first.
#[wasm_bindgen]
pub fn seeit_tick(now_ms: f64) {
    with_runner(|r| r.tick_millis(now_ms));
}

/// Advance one frame using the browser's `performance.now()` clock.
#[wasm_bindgen]
pub fn seeit_tick_now() {
    with_runner(|r| r.tick_with(&BrowserClock));
}

#[wasm_bindgen]
pub fn seeit_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn seeit_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn seeit_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn seeit_key_down(key_code: u32) {
    with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
}

/// A named action; `kind` is one of the engine's `ACTION_*` codes.
#[wasm_bindgen]
pub fn seeit_custom_event(kind: u32, a: f32, b: f32, c: f32) {
    with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_frame_ptr() -> *const f32 {
    with_runner(|r| r.frame_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_event_count() -> u32 {
    with_runner(|r| r.event_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_snapshot_json() -> String {
    with_runner(|r| r.snapshot_json()).unwrap_or_else(|| String::from("{}"))
}

/// Names, icons and narrative copy for every screen. Independent of session
/// state, so it works before `seeit_init`.
#[wasm_bindgen]
pub fn get_catalog_json() -> String {
    match Catalog::new().to_json() {
        Ok(json) => json,
        Err(err) => {
            log::error!("catalog serialization failed: {}", err);
            String::from("{}")
        }
    }
}

#[wasm_bindgen]
pub fn get_protocol_version() -> f32 {
    PROTOCOL_VERSION
}

// ---- Capacity accessors ----

#[wasm_bindgen]
pub fn get_max_events() -> u32 {
    with_runner(|r| r.max_events()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_event_data_offset() -> u32 {
    with_runner(|r| r.event_data_offset()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats()).unwrap_or(0)
}
