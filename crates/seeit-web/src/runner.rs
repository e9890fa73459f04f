use seeit_engine::bridge::protocol::HEADER_EVENT_COUNT;
use seeit_engine::{
    pack_frame, AppConfig, Clock, InputEvent, ProtocolLayout, Session, Timestamp,
};

/// Where tick timestamps come from. A session sticks to the first one it
/// sees, since host readings and clock readings need not share an epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickSource {
    /// Readings passed in by the host.
    Host,
    /// Readings taken from a `Clock`.
    Clock,
}

/// Owns the session and the flat frame buffer the host reads after each tick.
///
/// The exported free functions in `lib.rs` keep one of these in a
/// `thread_local!`, because wasm-bindgen cannot export the engine types
/// directly.
pub struct SessionRunner {
    session: Session,
    layout: ProtocolLayout,
    frame_buffer: Vec<f32>,
    source: Option<TickSource>,
}

impl Default for SessionRunner {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl SessionRunner {
    pub fn new(config: AppConfig) -> Self {
        let layout = ProtocolLayout::from_config(&config);
        let frame_buffer = vec![0.0; layout.buffer_total_floats];
        Self {
            session: Session::new(config),
            layout,
            frame_buffer,
            source: None,
        }
    }

    /// Replace the configuration and start a fresh session. On a parse error
    /// the current session is kept and `false` is returned.
    pub fn load_config(&mut self, json: &str) -> bool {
        match AppConfig::from_json(json) {
            Ok(config) => {
                log::info!("config loaded (seed {})", config.seed);
                *self = Self::new(config);
                true
            }
            Err(err) => {
                log::error!("invalid config, keeping defaults: {}", err);
                false
            }
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.session.push_input(event);
    }

    /// Run one frame and repack the frame buffer.
    pub fn tick(&mut self, now: Timestamp) {
        self.session.tick(now);
        pack_frame(&self.session, &self.layout, &mut self.frame_buffer);
    }

    /// Tick with a `performance.now()` reading from the host.
    pub fn tick_millis(&mut self, now_ms: f64) {
        if self.claim_source(TickSource::Host) {
            self.tick(Timestamp::from_millis(now_ms));
        }
    }

    pub fn tick_with(&mut self, clock: &impl Clock) {
        if self.claim_source(TickSource::Clock) {
            self.tick(clock.now());
        }
    }

    pub fn tick_source(&self) -> Option<TickSource> {
        self.source
    }

    /// The first tick fixes the source; ticks from the other one are dropped.
    fn claim_source(&mut self, source: TickSource) -> bool {
        match self.source {
            None => {
                self.source = Some(source);
                true
            }
            Some(current) if current == source => true,
            Some(current) => {
                log::warn!("{:?} tick ignored, session is driven by {:?} ticks", source, current);
                false
            }
        }
    }

    /// JSON of the current frame snapshot, or an empty object if it cannot
    /// be serialized.
    pub fn snapshot_json(&self) -> String {
        match self.session.snapshot().to_json() {
            Ok(json) => json,
            Err(err) => {
                log::error!("snapshot serialization failed: {}", err);
                String::from("{}")
            }
        }
    }

    // ---- Pointer accessors for frame buffer reads ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame_buffer.as_ptr()
    }

    pub fn frame_buffer(&self) -> &[f32] {
        &self.frame_buffer
    }

    pub fn event_count(&self) -> u32 {
        self.frame_buffer[HEADER_EVENT_COUNT] as u32
    }

    // ---- Capacity accessors (read by the host via wasm_bindgen exports) ----

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn event_data_offset(&self) -> u32 {
        self.layout.event_data_offset as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
