use serde::{Deserialize, Serialize};

use super::phase::JourneyPhase;

/// Nominal duration of each phase, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseDurations {
    pub orientation: f32,
    pub shift: f32,
    pub immersive: f32,
    pub integration: f32,
}

impl PhaseDurations {
    pub const fn new(orientation: f32, shift: f32, immersive: f32, integration: f32) -> Self {
        Self {
            orientation,
            shift,
            immersive,
            integration,
        }
    }

    pub fn for_phase(&self, phase: JourneyPhase) -> f32 {
        match phase {
            JourneyPhase::Orientation => self.orientation,
            JourneyPhase::EnvironmentalShift => self.shift,
            JourneyPhase::ImmersiveInteraction => self.immersive,
            JourneyPhase::Integration => self.integration,
        }
    }

    /// Replace negative or non-finite durations with zero.
    pub fn sanitized(self) -> Self {
        fn clean(secs: f32) -> f32 {
            if secs.is_finite() && secs > 0.0 {
                secs
            } else {
                0.0
            }
        }
        Self {
            orientation: clean(self.orientation),
            shift: clean(self.shift),
            immersive: clean(self.immersive),
            integration: clean(self.integration),
        }
    }

    pub fn total(&self) -> f32 {
        self.orientation + self.shift + self.immersive + self.integration
    }
}

/// What happens when a scheduled offset is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Enter(JourneyPhase),
    Complete,
}

/// One entry of the schedule: apply `transition` once `offset` seconds have
/// elapsed since the journey started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledTransition {
    pub offset: f64,
    pub transition: Transition,
}

/// Flat, ordered list of transitions for one journey.
///
/// Evaluated against the clock on every update instead of chaining delayed
/// callbacks, so there is nothing to race with when a journey is cancelled.
#[derive(Debug, Clone)]
pub struct Schedule {
    entries: [ScheduledTransition; 4],
    phase_starts: [f64; 4],
}

impl Schedule {
    pub fn from_durations(durations: &PhaseDurations) -> Self {
        let d = durations.sanitized();
        let shift_at = d.orientation as f64;
        let immersive_at = shift_at + d.shift as f64;
        let integration_at = immersive_at + d.immersive as f64;
        let complete_at = integration_at + d.integration as f64;

        Self {
            entries: [
                ScheduledTransition {
                    offset: shift_at,
                    transition: Transition::Enter(JourneyPhase::EnvironmentalShift),
                },
                ScheduledTransition {
                    offset: immersive_at,
                    transition: Transition::Enter(JourneyPhase::ImmersiveInteraction),
                },
                ScheduledTransition {
                    offset: integration_at,
                    transition: Transition::Enter(JourneyPhase::Integration),
                },
                ScheduledTransition {
                    offset: complete_at,
                    transition: Transition::Complete,
                },
            ],
            phase_starts: [0.0, shift_at, immersive_at, integration_at],
        }
    }

    pub fn get(&self, index: usize) -> Option<&ScheduledTransition> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Offset at which `phase` is scheduled to begin.
    pub fn phase_start(&self, phase: JourneyPhase) -> f64 {
        self.phase_starts[phase.index()]
    }

    /// Offset at which the journey completes.
    pub fn completion_offset(&self) -> f64 {
        self.entries[3].offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_cumulative() {
        let s = Schedule::from_durations(&PhaseDurations::new(5.0, 20.0, 15.0, 12.0));
        let offsets: Vec<f64> = (0..s.len()).map(|i| s.get(i).unwrap().offset).collect();
        assert_eq!(offsets, vec![5.0, 25.0, 40.0, 52.0]);
        assert_eq!(s.phase_start(JourneyPhase::Orientation), 0.0);
        assert_eq!(s.phase_start(JourneyPhase::Integration), 40.0);
        assert_eq!(s.completion_offset(), 52.0);
    }

    #[test]
    fn transitions_are_in_phase_order() {
        let s = Schedule::from_durations(&PhaseDurations::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(s.get(0).unwrap().transition, Transition::Enter(JourneyPhase::EnvironmentalShift));
        assert_eq!(s.get(1).unwrap().transition, Transition::Enter(JourneyPhase::ImmersiveInteraction));
        assert_eq!(s.get(2).unwrap().transition, Transition::Enter(JourneyPhase::Integration));
        assert_eq!(s.get(3).unwrap().transition, Transition::Complete);
        assert!(s.get(4).is_none());
    }

    #[test]
    fn invalid_durations_become_zero() {
        let d = PhaseDurations::new(-3.0, f32::NAN, f32::INFINITY, 2.0).sanitized();
        assert_eq!(d, PhaseDurations::new(0.0, 0.0, 0.0, 2.0));
        let s = Schedule::from_durations(&PhaseDurations::new(-3.0, f32::NAN, 1.0, 2.0));
        assert_eq!(s.get(0).unwrap().offset, 0.0);
        assert_eq!(s.get(1).unwrap().offset, 0.0);
        assert_eq!(s.completion_offset(), 3.0);
    }
}
