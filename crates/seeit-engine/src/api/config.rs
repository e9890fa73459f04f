use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::catalog::ExperienceKind;
use crate::journey::schedule::PhaseDurations;

/// Canonical orientation dwell shared by every experience.
pub const ORIENTATION_SECS: f32 = 5.0;
/// Canonical immersive-interaction dwell shared by every experience.
pub const IMMERSIVE_SECS: f32 = 15.0;
/// Canonical integration (reflection) dwell shared by every experience.
pub const INTEGRATION_SECS: f32 = 12.0;

/// Environmental-shift length for each kind.
pub fn default_shift_secs(kind: ExperienceKind) -> f32 {
    match kind {
        ExperienceKind::VisualStrain => 60.0,
        ExperienceKind::ColorPerception => 20.0,
        ExperienceKind::FocusTunnel => 30.0,
        ExperienceKind::ReadingStability => 45.0,
        ExperienceKind::MemoryLoad => 40.0,
        ExperienceKind::FocusDistraction => 45.0,
        ExperienceKind::CognitiveLoad => 40.0,
        ExperienceKind::InteractionPrecision => 30.0,
    }
}

/// Phase durations for every kind. Three phases share one value; the shift
/// phase varies per kind. Kinds missing from `shift` use the canonical value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DurationTable {
    pub orientation: f32,
    pub immersive: f32,
    pub integration: f32,
    pub shift: BTreeMap<ExperienceKind, f32>,
}

impl Default for DurationTable {
    fn default() -> Self {
        Self {
            orientation: ORIENTATION_SECS,
            immersive: IMMERSIVE_SECS,
            integration: INTEGRATION_SECS,
            shift: ExperienceKind::ALL
                .iter()
                .map(|&kind| (kind, default_shift_secs(kind)))
                .collect(),
        }
    }
}

impl DurationTable {
    /// The same four durations for every kind. Handy for tests and demos.
    pub fn uniform(durations: PhaseDurations) -> Self {
        Self {
            orientation: durations.orientation,
            immersive: durations.immersive,
            integration: durations.integration,
            shift: ExperienceKind::ALL
                .iter()
                .map(|&kind| (kind, durations.shift))
                .collect(),
        }
    }

    pub fn durations_for(&self, kind: ExperienceKind) -> PhaseDurations {
        let shift = self
            .shift
            .get(&kind)
            .copied()
            .unwrap_or_else(|| default_shift_secs(kind));
        let raw = PhaseDurations::new(self.orientation, shift, self.immersive, self.integration);
        let clean = raw.sanitized();
        if clean != raw {
            log::warn!(
                "invalid phase durations for {} ({:?}), using {:?}",
                kind.slug(),
                raw,
                clean
            );
        }
        clean
    }
}

/// Engine configuration, provided by the host (or defaulted).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Seed for every randomized renderer.
    pub seed: u64,
    /// Logical viewport size in points.
    pub viewport: Vec2,
    /// Fixed animation step in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Completed experiences needed before synthesis unlocks (default: 3).
    pub synthesis_threshold: usize,
    /// Maximum app events packed into the bridge buffer per frame (default: 32).
    pub max_events: usize,
    pub durations: DurationTable,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            viewport: Vec2::new(390.0, 844.0),
            fixed_dt: 1.0 / 60.0,
            synthesis_threshold: 3,
            max_events: 32,
            durations: DurationTable::default(),
        }
    }
}

impl AppConfig {
    /// Parse a configuration from a JSON string. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_matches_canonical_values() {
        let table = DurationTable::default();
        let d = table.durations_for(ExperienceKind::ColorPerception);
        assert_eq!(d, PhaseDurations::new(5.0, 20.0, 15.0, 12.0));
        for kind in ExperienceKind::ALL {
            let shift = table.durations_for(kind).shift;
            assert!((20.0..=60.0).contains(&shift), "{:?} shift {}", kind, shift);
        }
    }

    #[test]
    fn parse_partial_config() {
        let json = r#"{
            "seed": 7,
            "durations": { "orientation": 2.0, "shift": { "memory-load": 5.0 } }
        }"#;
        let config = AppConfig::from_json(json).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.synthesis_threshold, 3);
        let memory = config.durations.durations_for(ExperienceKind::MemoryLoad);
        assert_eq!(memory.orientation, 2.0);
        assert_eq!(memory.shift, 5.0);
        assert_eq!(memory.immersive, IMMERSIVE_SECS);
        // Kinds left out of the override map fall back to their canonical shift.
        let strain = config.durations.durations_for(ExperienceKind::VisualStrain);
        assert_eq!(strain.shift, 60.0);
    }

    #[test]
    fn parse_viewport() {
        let config = AppConfig::from_json(r#"{ "viewport": [800.0, 600.0] }"#).unwrap();
        assert_eq!(config.viewport, Vec2::new(800.0, 600.0));
    }

    #[test]
    fn negative_durations_are_sanitized() {
        let mut table = DurationTable::default();
        table.orientation = -1.0;
        let d = table.durations_for(ExperienceKind::FocusTunnel);
        assert_eq!(d.orientation, 0.0);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let json = r#"{ "durations": { "shift": { "telepathy": 5.0 } } }"#;
        assert!(AppConfig::from_json(json).is_err());
    }
}
