use serde::Serialize;

use crate::catalog::{ExperienceKind, ONBOARDING_PAGES};

/// Where the hub stands with its single active experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "state", content = "kind", rename_all = "kebab-case")]
pub enum HubState {
    Idle,
    /// Selected; the journey is running but the user is still reading about it.
    Focused(ExperienceKind),
    /// Inside the simulation.
    Immersed(ExperienceKind),
    /// The journey reached integration and waits for the user to finish it.
    Integrating(ExperienceKind),
}

impl HubState {
    /// Wire code: idle 0, focused 1, immersed 2, integrating 3.
    pub fn code(self) -> u32 {
        match self {
            HubState::Idle => 0,
            HubState::Focused(_) => 1,
            HubState::Immersed(_) => 2,
            HubState::Integrating(_) => 3,
        }
    }

    pub fn kind(self) -> Option<ExperienceKind> {
        match self {
            HubState::Idle => None,
            HubState::Focused(kind) | HubState::Immersed(kind) | HubState::Integrating(kind) => {
                Some(kind)
            }
        }
    }

    pub fn is_idle(self) -> bool {
        self == HubState::Idle
    }
}

/// Top-level screen flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "flow", content = "state", rename_all = "kebab-case")]
pub enum AppFlow {
    Onboarding { page: usize },
    Hub(HubState),
    Synthesis,
}

impl AppFlow {
    pub const ONBOARDING_PAGE_COUNT: usize = ONBOARDING_PAGES.len();

    /// Wire code: onboarding 0, hub 1, synthesis 2.
    pub fn code(self) -> u32 {
        match self {
            AppFlow::Onboarding { .. } => 0,
            AppFlow::Hub(_) => 1,
            AppFlow::Synthesis => 2,
        }
    }

    pub fn hub(self) -> Option<HubState> {
        match self {
            AppFlow::Hub(state) => Some(state),
            _ => None,
        }
    }

    /// Onboarding page, 0 outside onboarding.
    pub fn page(self) -> usize {
        match self {
            AppFlow::Onboarding { page } => page,
            _ => 0,
        }
    }
}

impl Default for AppFlow {
    fn default() -> Self {
        AppFlow::Onboarding { page: 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_and_kinds() {
        let kind = ExperienceKind::FocusTunnel;
        assert_eq!(HubState::Idle.code(), 0);
        assert_eq!(HubState::Integrating(kind).code(), 3);
        assert_eq!(HubState::Immersed(kind).kind(), Some(kind));
        assert_eq!(HubState::Idle.kind(), None);
        assert_eq!(AppFlow::default(), AppFlow::Onboarding { page: 0 });
        assert_eq!(AppFlow::Hub(HubState::Idle).hub(), Some(HubState::Idle));
        assert_eq!(AppFlow::Synthesis.code(), 2);
    }

    #[test]
    fn serializes_with_tags() {
        let json = serde_json::to_value(AppFlow::Hub(HubState::Focused(ExperienceKind::MemoryLoad)))
            .unwrap();
        assert_eq!(json["flow"], "hub");
        assert_eq!(json["state"]["state"], "focused");
        assert_eq!(json["state"]["kind"], "memory-load");
    }
}
