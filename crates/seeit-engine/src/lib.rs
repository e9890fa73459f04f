pub mod api;
pub mod app;
pub mod bridge;
pub mod catalog;
pub mod core;
pub mod extensions;
pub mod hub;
pub mod input;
pub mod journey;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use api::config::{AppConfig, DurationTable};
pub use api::types::AppEvent;
pub use app::{FrameSnapshot, JourneySnapshot, Session};
pub use bridge::protocol::{pack_frame, FrameHeader, ProtocolLayout};
pub use catalog::{Catalog, ExperienceEntry, ExperienceKind, OnboardingPage, ONBOARDING_PAGES};
pub use crate::core::clock::{Clock, ManualClock, Timestamp};
pub use crate::core::rng::Rng;
pub use crate::core::time::FixedTimestep;
pub use crate::core::timer::{Delay, Interval};
pub use hub::{AppFlow, FlowController, FlowEvent, HubState};
pub use input::queue::{InputEvent, InputQueue};
pub use journey::{
    JourneyEvent, JourneyEventKind, JourneyId, JourneyMachine, JourneyPhase, JourneyStatus,
    PhaseDurations,
};
pub use renderer::{
    renderer_for, ExperienceAction, RenderFrame, Renderer, RendererEvent, TaskId, VisualParams,
};

// Extensions: decoupled helpers
pub use extensions::{ease_vec2, lerp, lerp_vec2, Easing};
