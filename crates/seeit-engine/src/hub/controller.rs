use std::collections::BTreeSet;

use crate::api::config::{AppConfig, DurationTable};
use crate::catalog::ExperienceKind;
use crate::core::clock::Timestamp;
use crate::journey::{JourneyEvent, JourneyEventKind, JourneyId, JourneyMachine, JourneyPhase};

use super::state::{AppFlow, HubState};

/// Something that changed in the flow since the last drain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlowEvent {
    FlowChanged(AppFlow),
    HubChanged(HubState),
    /// Phase entered or journey completed, for the current journey only.
    Journey(JourneyEvent),
    JourneyCancelled { kind: ExperienceKind, phase: JourneyPhase },
    ExperienceCompleted { kind: ExperienceKind, completed: usize },
}

/// Owns the screen flow, the hub sub-state, the completed set and the one
/// running journey. Every mutation goes through a named transition; a
/// transition that does not apply in the current state is ignored and
/// reports `false`.
#[derive(Debug)]
pub struct FlowController {
    flow: AppFlow,
    completed: BTreeSet<ExperienceKind>,
    journey: Option<JourneyMachine>,
    next_journey: u32,
    durations: DurationTable,
    synthesis_threshold: usize,
    events: Vec<FlowEvent>,
}

impl Default for FlowController {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

impl FlowController {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            flow: AppFlow::default(),
            completed: BTreeSet::new(),
            journey: None,
            next_journey: 1,
            durations: config.durations.clone(),
            synthesis_threshold: config.synthesis_threshold,
            events: Vec::new(),
        }
    }

    // -- Queries --

    pub fn flow(&self) -> AppFlow {
        self.flow
    }

    /// Hub sub-state, or `None` outside the hub.
    pub fn hub_state(&self) -> Option<HubState> {
        self.flow.hub()
    }

    pub fn completed(&self) -> &BTreeSet<ExperienceKind> {
        &self.completed
    }

    pub fn is_completed(&self, kind: ExperienceKind) -> bool {
        self.completed.contains(&kind)
    }

    pub fn can_synthesize(&self) -> bool {
        self.completed.len() >= self.synthesis_threshold
    }

    /// Share of all experiences completed, in [0, 1].
    pub fn completion_ratio(&self) -> f32 {
        self.completed.len() as f32 / ExperienceKind::COUNT as f32
    }

    /// Bitmask of completed kinds, one bit per `ExperienceKind::index`.
    pub fn completed_mask(&self) -> u32 {
        self.completed.iter().fold(0, |mask, kind| mask | kind.bit())
    }

    pub fn journey(&self) -> Option<&JourneyMachine> {
        self.journey.as_ref()
    }

    /// Take every event recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<FlowEvent> {
        std::mem::take(&mut self.events)
    }

    // -- Transitions --

    /// Next onboarding page; past the last page, into the hub.
    pub fn advance_onboarding(&mut self) -> bool {
        let AppFlow::Onboarding { page } = self.flow else {
            log::debug!("advance_onboarding ignored in {:?}", self.flow);
            return false;
        };
        if page + 1 < AppFlow::ONBOARDING_PAGE_COUNT {
            self.set_flow(AppFlow::Onboarding { page: page + 1 });
        } else {
            self.set_flow(AppFlow::Hub(HubState::Idle));
        }
        true
    }

    /// Select `kind` from an idle hub and start its journey.
    pub fn focus(&mut self, kind: ExperienceKind, now: Timestamp) -> bool {
        if self.hub_state() != Some(HubState::Idle) {
            log::debug!("focus({}) ignored in {:?}", kind.slug(), self.flow);
            return false;
        }
        let id = JourneyId(self.next_journey);
        self.next_journey += 1;
        let durations = self.durations.durations_for(kind);
        self.journey = Some(JourneyMachine::with_durations(id, kind, durations, now));
        log::info!("journey {:?} started for {}", id, kind.slug());
        self.set_hub(HubState::Focused(kind));
        true
    }

    pub fn immerse(&mut self, kind: ExperienceKind) -> bool {
        if self.hub_state() != Some(HubState::Focused(kind)) {
            log::debug!("immerse({}) ignored in {:?}", kind.slug(), self.flow);
            return false;
        }
        self.set_hub(HubState::Immersed(kind));
        true
    }

    /// A tap on an experience node in the hub: focus, then immerse, then
    /// finish once integrating. Anything else is ignored.
    pub fn tap_experience(&mut self, kind: ExperienceKind, now: Timestamp) -> bool {
        match self.hub_state() {
            Some(HubState::Idle) => self.focus(kind, now),
            Some(HubState::Focused(k)) if k == kind => self.immerse(kind),
            Some(HubState::Integrating(k)) if k == kind => self.integrate(kind),
            _ => {
                log::debug!("tap on {} ignored in {:?}", kind.slug(), self.flow);
                false
            }
        }
    }

    /// Advance the running journey to `now` and react to its events.
    pub fn update(&mut self, now: Timestamp) {
        let events = match self.journey.as_mut() {
            Some(journey) => journey.update(now),
            None => return,
        };
        for event in events {
            self.apply_journey_event(event);
        }
    }

    /// React to one journey event. Events from any journey but the current
    /// one are dropped.
    pub fn apply_journey_event(&mut self, event: JourneyEvent) -> bool {
        let current = self.journey.as_ref().map(|j| j.id());
        if current != Some(event.id) {
            log::debug!("stale journey event {:?} dropped", event);
            return false;
        }
        if let JourneyEventKind::PhaseEntered(JourneyPhase::Integration) = event.event {
            match self.hub_state() {
                Some(HubState::Focused(k)) | Some(HubState::Immersed(k)) if k == event.kind => {
                    self.set_hub(HubState::Integrating(k));
                }
                _ => {}
            }
        }
        self.events.push(FlowEvent::Journey(event));
        true
    }

    /// Finish an integrating experience: it joins the completed set and the
    /// hub returns to idle.
    pub fn integrate(&mut self, kind: ExperienceKind) -> bool {
        if self.hub_state() != Some(HubState::Integrating(kind)) {
            log::debug!("integrate({}) ignored in {:?}", kind.slug(), self.flow);
            return false;
        }
        self.journey = None;
        self.completed.insert(kind);
        log::info!(
            "experience {} completed ({}/{})",
            kind.slug(),
            self.completed.len(),
            ExperienceKind::COUNT
        );
        self.events.push(FlowEvent::ExperienceCompleted {
            kind,
            completed: self.completed.len(),
        });
        self.set_hub(HubState::Idle);
        true
    }

    /// Leave the active experience. While integrating this finishes it;
    /// earlier it abandons the journey without completing anything.
    pub fn back(&mut self) -> bool {
        match self.hub_state() {
            Some(HubState::Integrating(kind)) => self.integrate(kind),
            Some(HubState::Focused(kind)) | Some(HubState::Immersed(kind)) => {
                if let Some(mut journey) = self.journey.take() {
                    journey.cancel();
                    self.events.push(FlowEvent::JourneyCancelled {
                        kind,
                        phase: journey.phase(),
                    });
                }
                self.set_hub(HubState::Idle);
                true
            }
            _ => {
                log::debug!("back ignored in {:?}", self.flow);
                false
            }
        }
    }

    pub fn synthesize(&mut self) -> bool {
        if self.hub_state() != Some(HubState::Idle) || !self.can_synthesize() {
            log::debug!(
                "synthesize ignored in {:?} with {} completed",
                self.flow,
                self.completed.len()
            );
            return false;
        }
        log::info!("synthesis reached with {} experiences", self.completed.len());
        self.set_flow(AppFlow::Synthesis);
        true
    }

    /// From synthesis, clear everything back to the first onboarding page.
    pub fn restart(&mut self) -> bool {
        if self.flow != AppFlow::Synthesis {
            log::debug!("restart ignored in {:?}", self.flow);
            return false;
        }
        self.journey = None;
        self.completed.clear();
        log::info!("restart");
        self.set_flow(AppFlow::default());
        true
    }

    fn set_hub(&mut self, state: HubState) {
        self.flow = AppFlow::Hub(state);
        self.events.push(FlowEvent::HubChanged(state));
    }

    fn set_flow(&mut self, flow: AppFlow) {
        self.flow = flow;
        self.events.push(FlowEvent::FlowChanged(flow));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journey::PhaseDurations;

    fn at(secs: f64) -> Timestamp {
        Timestamp::from_secs(secs)
    }

    /// Controller already in an idle hub, with 1 s phases everywhere.
    fn hub() -> FlowController {
        let config = AppConfig {
            durations: DurationTable::uniform(PhaseDurations::new(1.0, 1.0, 1.0, 1.0)),
            ..AppConfig::default()
        };
        let mut flow = FlowController::new(&config);
        for _ in 0..3 {
            assert!(flow.advance_onboarding());
        }
        flow.drain_events();
        flow
    }

    /// Run `kind` through to a completed experience, starting at `start`.
    fn complete(flow: &mut FlowController, kind: ExperienceKind, start: f64) {
        assert!(flow.tap_experience(kind, at(start)));
        assert!(flow.tap_experience(kind, at(start)));
        flow.update(at(start + 3.5));
        assert_eq!(flow.hub_state(), Some(HubState::Integrating(kind)));
        assert!(flow.tap_experience(kind, at(start + 3.5)));
    }

    #[test]
    fn onboarding_pages_lead_to_hub() {
        let mut flow = FlowController::default();
        assert_eq!(flow.flow(), AppFlow::Onboarding { page: 0 });
        flow.advance_onboarding();
        assert_eq!(flow.flow(), AppFlow::Onboarding { page: 1 });
        flow.advance_onboarding();
        flow.advance_onboarding();
        assert_eq!(flow.flow(), AppFlow::Hub(HubState::Idle));
        assert!(!flow.advance_onboarding());
    }

    #[test]
    fn hub_walkthrough() {
        let kind = ExperienceKind::VisualStrain;
        let mut flow = hub();
        assert!(flow.focus(kind, at(0.0)));
        assert_eq!(flow.hub_state(), Some(HubState::Focused(kind)));
        assert!(flow.immerse(kind));
        assert_eq!(flow.hub_state(), Some(HubState::Immersed(kind)));

        flow.update(at(2.5));
        assert_eq!(flow.hub_state(), Some(HubState::Immersed(kind)));
        flow.update(at(3.0));
        assert_eq!(flow.hub_state(), Some(HubState::Integrating(kind)));

        assert!(flow.integrate(kind));
        assert_eq!(flow.hub_state(), Some(HubState::Idle));
        assert!(flow.journey().is_none());
        assert_eq!(flow.completed().iter().copied().collect::<Vec<_>>(), vec![kind]);
        assert!((flow.completion_ratio() - 0.125).abs() < 1e-6);
    }

    #[test]
    fn journey_expiry_never_completes_an_experience() {
        let kind = ExperienceKind::FocusTunnel;
        let mut flow = hub();
        flow.focus(kind, at(0.0));
        flow.update(at(100.0));
        assert_eq!(flow.hub_state(), Some(HubState::Integrating(kind)));
        assert!(flow.journey().is_some_and(|j| j.is_completed()));
        assert!(flow.completed().is_empty());
    }

    #[test]
    fn focusing_another_kind_while_busy_is_ignored() {
        let mut flow = hub();
        flow.focus(ExperienceKind::MemoryLoad, at(0.0));
        assert!(!flow.focus(ExperienceKind::CognitiveLoad, at(0.1)));
        assert!(!flow.tap_experience(ExperienceKind::CognitiveLoad, at(0.1)));
        assert!(!flow.immerse(ExperienceKind::CognitiveLoad));
        assert_eq!(flow.hub_state(), Some(HubState::Focused(ExperienceKind::MemoryLoad)));
        assert_eq!(flow.journey().map(|j| j.kind()), Some(ExperienceKind::MemoryLoad));
    }

    #[test]
    fn back_cancels_without_completion() {
        let kind = ExperienceKind::ReadingStability;
        let mut flow = hub();
        flow.focus(kind, at(0.0));
        flow.immerse(kind);
        flow.update(at(1.5));
        flow.drain_events();
        assert!(flow.back());
        assert_eq!(flow.hub_state(), Some(HubState::Idle));
        assert!(flow.journey().is_none());
        assert!(flow.completed().is_empty());
        assert_eq!(
            flow.drain_events(),
            vec![
                FlowEvent::JourneyCancelled {
                    kind,
                    phase: JourneyPhase::EnvironmentalShift
                },
                FlowEvent::HubChanged(HubState::Idle),
            ]
        );
    }

    #[test]
    fn back_while_integrating_finishes() {
        let kind = ExperienceKind::ColorPerception;
        let mut flow = hub();
        flow.focus(kind, at(0.0));
        flow.update(at(3.2));
        assert!(flow.back());
        assert!(flow.is_completed(kind));
    }

    #[test]
    fn stale_events_are_dropped() {
        let kind = ExperienceKind::MemoryLoad;
        let mut flow = hub();
        flow.focus(kind, at(0.0));
        let old_id = flow.journey().map(|j| j.id());
        flow.back();
        flow.focus(kind, at(1.0));
        let stale = JourneyEvent {
            id: old_id.unwrap_or(JourneyId(0)),
            kind,
            event: JourneyEventKind::PhaseEntered(JourneyPhase::Integration),
        };
        assert!(!flow.apply_journey_event(stale));
        assert_eq!(flow.hub_state(), Some(HubState::Focused(kind)));
    }

    #[test]
    fn completed_set_is_idempotent() {
        let kind = ExperienceKind::CognitiveLoad;
        let mut flow = hub();
        complete(&mut flow, kind, 0.0);
        complete(&mut flow, kind, 10.0);
        assert_eq!(flow.completed().len(), 1);
        assert_eq!(flow.completed_mask(), kind.bit());
    }

    #[test]
    fn synthesis_needs_three_and_restart_clears() {
        let mut flow = hub();
        complete(&mut flow, ExperienceKind::VisualStrain, 0.0);
        complete(&mut flow, ExperienceKind::FocusTunnel, 10.0);
        assert!(!flow.can_synthesize());
        assert!(!flow.synthesize());
        complete(&mut flow, ExperienceKind::MemoryLoad, 20.0);
        assert!(flow.can_synthesize());

        flow.focus(ExperienceKind::CognitiveLoad, at(30.0));
        assert!(!flow.synthesize());
        flow.back();

        assert!(flow.synthesize());
        assert_eq!(flow.flow(), AppFlow::Synthesis);
        assert!(flow.restart());
        assert_eq!(flow.flow(), AppFlow::Onboarding { page: 0 });
        assert!(flow.completed().is_empty());
        assert!(flow.journey().is_none());
    }

    #[test]
    fn restart_outside_synthesis_keeps_progress() {
        let kind = ExperienceKind::VisualStrain;
        let mut flow = hub();
        complete(&mut flow, kind, 0.0);
        flow.drain_events();

        assert!(!flow.restart());
        assert_eq!(flow.flow(), AppFlow::Hub(HubState::Idle));
        assert!(flow.is_completed(kind));
        assert!(flow.drain_events().is_empty());

        flow.focus(ExperienceKind::MemoryLoad, at(100.0));
        assert!(!flow.restart());
        assert_eq!(flow.hub_state(), Some(HubState::Focused(ExperienceKind::MemoryLoad)));
        assert!(flow.journey().is_some());
        assert_eq!(flow.completed().len(), 1);
    }

    #[test]
    fn journey_events_reach_the_queue() {
        let kind = ExperienceKind::InteractionPrecision;
        let mut flow = hub();
        flow.focus(kind, at(0.0));
        flow.drain_events();
        flow.update(at(1.1));
        let events = flow.drain_events();
        assert_eq!(events.len(), 1);
        match events[0] {
            FlowEvent::Journey(JourneyEvent { kind: k, event, .. }) => {
                assert_eq!(k, kind);
                assert_eq!(event, JourneyEventKind::PhaseEntered(JourneyPhase::EnvironmentalShift));
            }
            other => panic!("Expected journey event, got {:?}", other),
        }
    }
}
