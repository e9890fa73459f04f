pub mod machine;
pub mod phase;
pub mod schedule;

pub use machine::{JourneyEvent, JourneyEventKind, JourneyId, JourneyMachine, JourneyStatus};
pub use phase::JourneyPhase;
pub use schedule::{PhaseDurations, Schedule, ScheduledTransition, Transition};
