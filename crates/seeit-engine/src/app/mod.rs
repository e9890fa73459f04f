pub mod session;

pub use session::{FrameSnapshot, JourneySnapshot, Session};
