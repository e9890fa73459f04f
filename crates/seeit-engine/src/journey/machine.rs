use serde::Serialize;

use crate::api::config::DurationTable;
use crate::catalog::ExperienceKind;
use crate::core::clock::Timestamp;

use super::phase::JourneyPhase;
use super::schedule::{PhaseDurations, Schedule, Transition};

/// Liveness token for one journey. Events carry it so the owner can drop
/// anything produced by a machine it has already discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct JourneyId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum JourneyStatus {
    Running,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JourneyEventKind {
    PhaseEntered(JourneyPhase),
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JourneyEvent {
    pub id: JourneyId,
    pub kind: ExperienceKind,
    pub event: JourneyEventKind,
}

/// Timed pass through one experience.
///
/// Phase and progress are a pure function of `now - started_at`; `update`
/// only decides when the discrete phase change is *applied* and reported.
#[derive(Debug, Clone)]
pub struct JourneyMachine {
    id: JourneyId,
    kind: ExperienceKind,
    durations: PhaseDurations,
    schedule: Schedule,
    started_at: Timestamp,
    /// Index of the next schedule entry to apply.
    next: usize,
    phase: JourneyPhase,
    status: JourneyStatus,
    /// Latest clock value handed to `update`; progress freezes here on cancel.
    last_seen: Timestamp,
    visited: Vec<JourneyPhase>,
}

impl JourneyMachine {
    /// Start a journey with the canonical duration table.
    pub fn start(id: JourneyId, kind: ExperienceKind, now: Timestamp) -> Self {
        Self::with_durations(id, kind, DurationTable::default().durations_for(kind), now)
    }

    pub fn with_durations(
        id: JourneyId,
        kind: ExperienceKind,
        durations: PhaseDurations,
        now: Timestamp,
    ) -> Self {
        let durations = durations.sanitized();
        log::debug!(
            "journey {:?} ({}) started, shift {:.1}s, total {:.1}s",
            id,
            kind.slug(),
            durations.shift,
            durations.total()
        );
        Self {
            id,
            kind,
            schedule: Schedule::from_durations(&durations),
            durations,
            started_at: now,
            next: 0,
            phase: JourneyPhase::Orientation,
            status: JourneyStatus::Running,
            last_seen: now,
            visited: vec![JourneyPhase::Orientation],
        }
    }

    /// Apply every transition whose offset has been reached, in order.
    ///
    /// A transition that is due late is still applied, just late; several
    /// due at once are each applied and reported. Does nothing once the
    /// machine is completed or cancelled.
    pub fn update(&mut self, now: Timestamp) -> Vec<JourneyEvent> {
        let mut events = Vec::new();
        if self.status != JourneyStatus::Running {
            return events;
        }
        if now > self.last_seen {
            self.last_seen = now;
        }

        let elapsed = self.last_seen.since(self.started_at);
        while let Some(entry) = self.schedule.get(self.next) {
            if elapsed < entry.offset {
                break;
            }
            self.next += 1;
            match entry.transition {
                Transition::Enter(phase) => {
                    self.phase = phase;
                    self.visited.push(phase);
                    events.push(self.event(JourneyEventKind::PhaseEntered(phase)));
                }
                Transition::Complete => {
                    self.status = JourneyStatus::Completed;
                    events.push(self.event(JourneyEventKind::Completed));
                    log::info!("journey {:?} ({}) completed", self.id, self.kind.slug());
                }
            }
        }
        events
    }

    /// Fraction of the current phase completed, in [0, 1].
    ///
    /// Measured from the phase's scheduled start and clamped at 1.0 once
    /// its nominal duration has passed, whether or not the next transition
    /// has been applied yet. After `cancel` the value is frozen.
    pub fn progress(&self, now: Timestamp) -> f32 {
        let now = match self.status {
            JourneyStatus::Running => now,
            JourneyStatus::Completed => return 1.0,
            JourneyStatus::Cancelled => self.last_seen,
        };
        let phase_start = self.started_at.after(self.schedule.phase_start(self.phase));
        phase_fraction(now.since(phase_start), self.durations.for_phase(self.phase))
    }

    /// Invalidate every pending transition. The machine is inert afterwards.
    pub fn cancel(&mut self) {
        if self.status == JourneyStatus::Running {
            self.status = JourneyStatus::Cancelled;
            log::debug!(
                "journey {:?} ({}) cancelled during {:?}",
                self.id,
                self.kind.slug(),
                self.phase
            );
        }
    }

    pub fn id(&self) -> JourneyId {
        self.id
    }

    pub fn kind(&self) -> ExperienceKind {
        self.kind
    }

    pub fn phase(&self) -> JourneyPhase {
        self.phase
    }

    pub fn status(&self) -> JourneyStatus {
        self.status
    }

    pub fn durations(&self) -> &PhaseDurations {
        &self.durations
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    pub fn is_running(&self) -> bool {
        self.status == JourneyStatus::Running
    }

    pub fn is_completed(&self) -> bool {
        self.status == JourneyStatus::Completed
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == JourneyStatus::Cancelled
    }

    /// Phases entered so far, in order, starting with orientation.
    pub fn visited(&self) -> &[JourneyPhase] {
        &self.visited
    }

    fn event(&self, event: JourneyEventKind) -> JourneyEvent {
        JourneyEvent {
            id: self.id,
            kind: self.kind,
            event,
        }
    }
}

/// `elapsed / duration` clamped to [0, 1]; a zero-length phase reads as done.
fn phase_fraction(elapsed: f64, duration: f32) -> f32 {
    if !(duration.is_finite() && duration > 0.0) {
        return 1.0;
    }
    let fraction = (elapsed / duration as f64) as f32;
    if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        1.0
    }
}
