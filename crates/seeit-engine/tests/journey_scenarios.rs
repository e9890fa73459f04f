//! End-to-end scenarios for journeys, the hub and a full session.
//!
//! Pure logic, driven by explicit timestamps. No host, no rendering.

use seeit_engine::api::types::{
    ACTION_ADVANCE_ONBOARDING, ACTION_COLOR_CELL, ACTION_SYNTHESIZE, ACTION_TAP_EXPERIENCE,
    EVENT_COLOR_ANSWER, EVENT_EXPERIENCE_COMPLETED,
};
use seeit_engine::{
    AppConfig, AppEvent, AppFlow, Clock, ExperienceKind, FlowController, HubState, InputEvent,
    JourneyId, JourneyMachine, JourneyPhase, ManualClock, PhaseDurations, Session, Timestamp,
    VisualParams,
};

// ── Helpers ────────────────────────────────────────────────────────────

fn at(secs: f64) -> Timestamp {
    Timestamp::from_secs(secs)
}

fn hub_controller() -> FlowController {
    let mut flow = FlowController::default();
    while flow.hub_state().is_none() {
        assert!(flow.advance_onboarding());
    }
    flow
}

fn tap(session: &mut Session, kind: ExperienceKind) {
    session.push_input(InputEvent::action(ACTION_TAP_EXPERIENCE, kind.index() as f32));
}

// ── Journey ────────────────────────────────────────────────────────────

#[test]
fn memory_load_journey_with_five_second_phases() {
    let mut clock = ManualClock::new();
    let durations = PhaseDurations::new(5.0, 5.0, 5.0, 5.0);
    let mut journey =
        JourneyMachine::with_durations(JourneyId(1), ExperienceKind::MemoryLoad, durations, clock.now());

    clock.set(at(4.9));
    journey.update(clock.now());
    assert_eq!(journey.phase(), JourneyPhase::Orientation);

    clock.set(at(5.1));
    journey.update(clock.now());
    assert_eq!(journey.phase(), JourneyPhase::EnvironmentalShift);
    assert!((journey.progress(clock.now()) - 0.02).abs() < 1e-3);

    clock.set(at(14.9));
    journey.update(clock.now());
    assert_eq!(journey.phase(), JourneyPhase::ImmersiveInteraction);
    let frozen = journey.progress(clock.now());

    clock.set(at(15.0));
    journey.cancel();
    clock.set(at(20.0));
    assert!(journey.update(clock.now()).is_empty());
    assert_eq!(journey.phase(), JourneyPhase::ImmersiveInteraction);
    assert_eq!(journey.progress(clock.now()), frozen);
    assert!(journey.is_cancelled());
}

#[test]
fn backgrounded_journey_catches_up_in_order() {
    let durations = PhaseDurations::new(5.0, 5.0, 5.0, 5.0);
    let mut journey =
        JourneyMachine::with_durations(JourneyId(1), ExperienceKind::FocusTunnel, durations, at(100.0));
    // Nothing observed until long after the end.
    let events = journey.update(at(1000.0));
    assert_eq!(events.len(), 4);
    assert_eq!(journey.visited(), &JourneyPhase::ALL);
    assert!(journey.is_completed());
    assert_eq!(journey.progress(at(1000.0)), 1.0);
}

#[test]
fn progress_resets_and_grows_within_each_phase_for_every_kind() {
    for kind in ExperienceKind::ALL {
        let mut journey = JourneyMachine::start(JourneyId(1), kind, at(0.0));
        let total = journey.durations().total() as f64;
        let mut last_phase = journey.phase();
        let mut last_progress = journey.progress(at(0.0));
        assert_eq!(last_progress, 0.0);
        let mut t = 0.0;
        while t < total {
            t += 0.25;
            journey.update(at(t));
            let progress = journey.progress(at(t));
            assert!((0.0..=1.0).contains(&progress), "{:?} at {}: {}", kind, t, progress);
            if journey.phase() == last_phase {
                assert!(progress >= last_progress, "{:?} regressed at {}", kind, t);
            }
            last_phase = journey.phase();
            last_progress = progress;
        }
        assert_eq!(journey.visited(), &JourneyPhase::ALL);
    }
}

// ── Hub ────────────────────────────────────────────────────────────────

#[test]
fn visual_strain_through_the_hub() {
    let kind = ExperienceKind::VisualStrain;
    let mut flow = hub_controller();
    assert_eq!(flow.hub_state(), Some(HubState::Idle));

    assert!(flow.tap_experience(kind, at(0.0)));
    assert_eq!(flow.hub_state(), Some(HubState::Focused(kind)));
    assert!(flow.tap_experience(kind, at(1.0)));
    assert_eq!(flow.hub_state(), Some(HubState::Immersed(kind)));

    // 5 s orientation + 60 s shift + 15 s immersive; integration dwells 12 s.
    flow.update(at(79.0));
    assert_eq!(flow.hub_state(), Some(HubState::Immersed(kind)));
    flow.update(at(93.0));
    assert_eq!(flow.hub_state(), Some(HubState::Integrating(kind)));

    assert!(flow.integrate(kind));
    assert_eq!(flow.hub_state(), Some(HubState::Idle));
    assert_eq!(flow.completed().iter().copied().collect::<Vec<_>>(), vec![kind]);
}

// ── Session ────────────────────────────────────────────────────────────

#[test]
fn session_from_onboarding_to_synthesis() {
    let config = AppConfig::from_json(
        r#"{ "durations": { "orientation": 1.0, "immersive": 1.0, "integration": 1.0,
             "shift": { "visual-strain": 1.0, "focus-tunnel": 1.0, "color-perception": 1.0 } } }"#,
    )
    .expect("valid config");
    let mut session = Session::new(config);
    for _ in 0..3 {
        session.push_input(InputEvent::action(ACTION_ADVANCE_ONBOARDING, 0.0));
    }
    session.tick(at(0.0));

    let mut t = 0.0;
    let mut completed_events = 0;
    for kind in [
        ExperienceKind::VisualStrain,
        ExperienceKind::FocusTunnel,
        ExperienceKind::ColorPerception,
    ] {
        tap(&mut session, kind);
        tap(&mut session, kind);
        session.tick(at(t));
        assert_eq!(session.controller().hub_state(), Some(HubState::Immersed(kind)));
        assert_eq!(session.snapshot().visuals.map(|v| v.kind()), Some(kind));

        t += 3.5;
        session.tick(at(t));
        assert_eq!(session.controller().hub_state(), Some(HubState::Integrating(kind)));

        tap(&mut session, kind);
        session.tick(at(t));
        completed_events += session
            .events()
            .iter()
            .filter(|e| e.kind_code() == EVENT_EXPERIENCE_COMPLETED)
            .count();
    }
    assert_eq!(completed_events, 3);
    assert!(session.controller().can_synthesize());

    session.push_input(InputEvent::action(ACTION_SYNTHESIZE, 0.0));
    session.tick(at(t + 1.0));
    assert_eq!(session.controller().flow(), AppFlow::Synthesis);
    assert_eq!(session.snapshot().completed.len(), 3);
}

#[test]
fn color_game_answers_through_session_actions() {
    let kind = ExperienceKind::ColorPerception;
    let mut session = Session::default();
    for _ in 0..3 {
        session.push_input(InputEvent::action(ACTION_ADVANCE_ONBOARDING, 0.0));
    }
    tap(&mut session, kind);
    tap(&mut session, kind);
    session.tick(at(0.0));

    let target = match session.snapshot().visuals {
        Some(VisualParams::ColorPerception(params)) => {
            // The odd cell out is the one whose hue differs from the rest.
            let hues: Vec<f32> = params.cells.iter().map(|c| c.hsb.hue).collect();
            (0..hues.len())
                .find(|&i| hues.iter().filter(|&&h| h == hues[i]).count() == 1)
                .expect("one odd cell")
        }
        other => panic!("unexpected visuals {:?}", other),
    };

    session.push_input(InputEvent::action(ACTION_COLOR_CELL, target as f32));
    session.tick(at(0.1));
    assert!(session
        .events()
        .contains(&AppEvent::new(EVENT_COLOR_ANSWER, target as f32, 1.0, 2.0)));
}
