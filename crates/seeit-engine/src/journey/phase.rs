use serde::{Deserialize, Serialize};

/// The four stages every journey passes through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JourneyPhase {
    Orientation,
    EnvironmentalShift,
    ImmersiveInteraction,
    Integration,
}

impl JourneyPhase {
    pub const ALL: [JourneyPhase; 4] = [
        JourneyPhase::Orientation,
        JourneyPhase::EnvironmentalShift,
        JourneyPhase::ImmersiveInteraction,
        JourneyPhase::Integration,
    ];

    pub fn index(self) -> usize {
        match self {
            JourneyPhase::Orientation => 0,
            JourneyPhase::EnvironmentalShift => 1,
            JourneyPhase::ImmersiveInteraction => 2,
            JourneyPhase::Integration => 3,
        }
    }

    /// The phase that follows this one, or `None` for integration.
    pub fn next(self) -> Option<JourneyPhase> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn is_terminal(self) -> bool {
        self == JourneyPhase::Integration
    }
}
