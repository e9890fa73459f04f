/// Frame buffer layout shared with the host.
/// Must stay in sync with the host's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header every frame.
/// The host reads them from the header to compute offsets dynamically.
use bytemuck::{Pod, Zeroable};

use crate::api::config::AppConfig;
use crate::api::types::AppEvent;
use crate::app::Session;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_FLOW: usize = 2;
pub const HEADER_ONBOARDING_PAGE: usize = 3;
pub const HEADER_HUB: usize = 4;
pub const HEADER_KIND: usize = 5;
pub const HEADER_PHASE: usize = 6;
pub const HEADER_PROGRESS: usize = 7;
pub const HEADER_INTENSITY: usize = 8;
pub const HEADER_COMPLETED_MASK: usize = 9;
pub const HEADER_COMPLETED_COUNT: usize = 10;
pub const HEADER_CAN_SYNTHESIZE: usize = 11;
pub const HEADER_EVENT_COUNT: usize = 12;
pub const HEADER_MAX_EVENTS: usize = 13;
pub const HEADER_VIEWPORT_WIDTH: usize = 14;
pub const HEADER_VIEWPORT_HEIGHT: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per app event: kind, a, b, c (wire format, never changes).
pub const EVENT_FLOATS: usize = AppEvent::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum app events per frame.
    pub max_events: usize,
    /// Size of event data section in floats.
    pub event_data_floats: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,
    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_events: usize) -> Self {
        let event_data_floats = max_events * EVENT_FLOATS;
        let event_data_offset = HEADER_FLOATS;
        let buffer_total_floats = event_data_offset + event_data_floats;
        Self {
            max_events,
            event_data_floats,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.max_events)
    }
}

/// The header as one Pod record, field order matching the `HEADER_*` indices.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct FrameHeader {
    pub protocol_version: f32,
    pub frame_counter: f32,
    pub flow: f32,
    pub onboarding_page: f32,
    /// -1 outside the hub.
    pub hub: f32,
    /// -1 when no experience is active.
    pub kind: f32,
    /// -1 when no journey is running.
    pub phase: f32,
    pub progress: f32,
    pub intensity: f32,
    pub completed_mask: f32,
    pub completed_count: f32,
    pub can_synthesize: f32,
    pub event_count: f32,
    pub max_events: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl FrameHeader {
    pub fn capture(session: &Session, layout: &ProtocolLayout) -> Self {
        let controller = session.controller();
        let flow = controller.flow();
        let hub = flow.hub();
        let frame = session.render_frame();
        let journey = controller.journey();
        let viewport = session.viewport();
        Self {
            protocol_version: PROTOCOL_VERSION,
            frame_counter: session.frame_count() as f32,
            flow: flow.code() as f32,
            onboarding_page: flow.page() as f32,
            hub: hub.map_or(-1.0, |h| h.code() as f32),
            kind: hub
                .and_then(|h| h.kind())
                .map_or(-1.0, |k| k.index() as f32),
            phase: journey.map_or(-1.0, |j| j.phase().index() as f32),
            progress: frame.map_or(0.0, |f| f.progress),
            intensity: frame.map_or(0.0, |f| f.intensity),
            completed_mask: controller.completed_mask() as f32,
            completed_count: controller.completed().len() as f32,
            can_synthesize: if controller.can_synthesize() { 1.0 } else { 0.0 },
            event_count: session.events().len().min(layout.max_events) as f32,
            max_events: layout.max_events as f32,
            viewport_width: viewport.x,
            viewport_height: viewport.y,
        }
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(std::slice::from_ref(self))
    }
}

/// Write the session's current frame into `buffer`. Returns the number of
/// events written; events past `max_events` are dropped.
pub fn pack_frame(session: &Session, layout: &ProtocolLayout, buffer: &mut [f32]) -> usize {
    if buffer.len() < layout.buffer_total_floats {
        log::error!(
            "frame buffer holds {} floats, layout needs {}",
            buffer.len(),
            layout.buffer_total_floats
        );
        return 0;
    }
    let header = FrameHeader::capture(session, layout);
    buffer[..HEADER_FLOATS].copy_from_slice(header.as_floats());

    let events = session.events();
    let count = events.len().min(layout.max_events);
    if count < events.len() {
        log::warn!("dropped {} app events past capacity", events.len() - count);
    }
    let floats: &[f32] = bytemuck::cast_slice(&events[..count]);
    let start = layout.event_data_offset;
    buffer[start..start + floats.len()].copy_from_slice(floats);
    count
}
