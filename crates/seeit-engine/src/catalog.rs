//! Static catalog of simulated experiences and onboarding copy.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One simulated perceptual, cognitive or motor condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExperienceKind {
    VisualStrain,
    ColorPerception,
    FocusTunnel,
    ReadingStability,
    MemoryLoad,
    FocusDistraction,
    CognitiveLoad,
    InteractionPrecision,
}

impl ExperienceKind {
    /// Every kind, in hub display order.
    pub const ALL: [ExperienceKind; 8] = [
        ExperienceKind::VisualStrain,
        ExperienceKind::ColorPerception,
        ExperienceKind::FocusTunnel,
        ExperienceKind::ReadingStability,
        ExperienceKind::MemoryLoad,
        ExperienceKind::FocusDistraction,
        ExperienceKind::CognitiveLoad,
        ExperienceKind::InteractionPrecision,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Stable wire index (position in `ALL`).
    pub fn index(self) -> usize {
        match self {
            ExperienceKind::VisualStrain => 0,
            ExperienceKind::ColorPerception => 1,
            ExperienceKind::FocusTunnel => 2,
            ExperienceKind::ReadingStability => 3,
            ExperienceKind::MemoryLoad => 4,
            ExperienceKind::FocusDistraction => 5,
            ExperienceKind::CognitiveLoad => 6,
            ExperienceKind::InteractionPrecision => 7,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Bit for this kind in a completed-set mask.
    pub fn bit(self) -> u32 {
        1 << self.index()
    }

    /// Kebab-case identifier, matching the serde representation.
    pub fn slug(self) -> &'static str {
        match self {
            ExperienceKind::VisualStrain => "visual-strain",
            ExperienceKind::ColorPerception => "color-perception",
            ExperienceKind::FocusTunnel => "focus-tunnel",
            ExperienceKind::ReadingStability => "reading-stability",
            ExperienceKind::MemoryLoad => "memory-load",
            ExperienceKind::FocusDistraction => "focus-distraction",
            ExperienceKind::CognitiveLoad => "cognitive-load",
            ExperienceKind::InteractionPrecision => "interaction-precision",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ExperienceKind::VisualStrain => "Visual Strain",
            ExperienceKind::ColorPerception => "Color Perception",
            ExperienceKind::FocusTunnel => "Focus Tunnel",
            ExperienceKind::ReadingStability => "Reading Stability",
            ExperienceKind::MemoryLoad => "Memory Load",
            ExperienceKind::FocusDistraction => "Focus & Distraction",
            ExperienceKind::CognitiveLoad => "Cognitive Load",
            ExperienceKind::InteractionPrecision => "Interaction Precision",
        }
    }

    /// SF Symbols style icon identifier.
    pub fn icon(self) -> &'static str {
        match self {
            ExperienceKind::VisualStrain => "eye",
            ExperienceKind::ColorPerception => "paintpalette",
            ExperienceKind::FocusTunnel => "circle.hexagongrid",
            ExperienceKind::ReadingStability => "text.alignleft",
            ExperienceKind::MemoryLoad => "brain",
            ExperienceKind::FocusDistraction => "sparkles",
            ExperienceKind::CognitiveLoad => "cpu",
            ExperienceKind::InteractionPrecision => "cursorarrow.click",
        }
    }

    pub fn short_label(self) -> &'static str {
        match self {
            ExperienceKind::VisualStrain => "Strain",
            ExperienceKind::ColorPerception => "Colors",
            ExperienceKind::FocusTunnel => "Focus",
            ExperienceKind::ReadingStability => "Reading",
            ExperienceKind::MemoryLoad => "Memory",
            ExperienceKind::FocusDistraction => "Attention",
            ExperienceKind::CognitiveLoad => "Thinking",
            ExperienceKind::InteractionPrecision => "Touch",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ExperienceKind::VisualStrain => "Notice how text appears on screen",
            ExperienceKind::ColorPerception => "Observe how colors interact and convey meaning",
            ExperienceKind::FocusTunnel => "Notice what lies beyond your direct focus",
            ExperienceKind::ReadingStability => "Find your natural reading pace",
            ExperienceKind::MemoryLoad => "Observe and remember patterns",
            ExperienceKind::FocusDistraction => "Identify what deserves your attention",
            ExperienceKind::CognitiveLoad => "Manage multiple cognitive tasks",
            ExperienceKind::InteractionPrecision => "Precise interactions require optimal sizing",
        }
    }

    /// Copy shown during the orientation phase.
    pub fn orientation_text(self) -> &'static str {
        match self {
            ExperienceKind::VisualStrain => {
                "Notice how clarity is often a privilege of high contrast and clean space."
            }
            ExperienceKind::ColorPerception => {
                "Observe how meaning can be lost when color becomes the only messenger."
            }
            ExperienceKind::FocusTunnel => {
                "Feel the narrowing of attention as the periphery fades away."
            }
            ExperienceKind::ReadingStability => {
                "Experience the effort of anchoring focus on shifting lines."
            }
            ExperienceKind::MemoryLoad => {
                "Witness the fragility of patterns under the weight of distraction."
            }
            ExperienceKind::FocusDistraction => {
                "Observe the quiet competition between intent and noise."
            }
            ExperienceKind::CognitiveLoad => {
                "Feel the build of mental density as instructions multiply."
            }
            ExperienceKind::InteractionPrecision => {
                "Notice the subtle drift between intent and interaction."
            }
        }
    }

    /// Copy shown during the integration (reflection) phase.
    pub fn reflection_text(self) -> &'static str {
        match self {
            ExperienceKind::VisualStrain => "When UI density exceeds comfort, focus becomes fatigue.",
            ExperienceKind::ColorPerception => "True accessibility relies on more than just hue.",
            ExperienceKind::FocusTunnel => {
                "Context is easily lost when the viewport of attention narrows."
            }
            ExperienceKind::ReadingStability => "Stability is the foundation of comprehension.",
            ExperienceKind::MemoryLoad => {
                "Retention is a finite resource in a cluttered environment."
            }
            ExperienceKind::FocusDistraction => "Motion commands attention; use it with intention.",
            ExperienceKind::CognitiveLoad => {
                "Simplicity is not a lack of complexity, but a mastery of it."
            }
            ExperienceKind::InteractionPrecision => {
                "Precision is a dialogue between the user and the system."
            }
        }
    }
}

impl fmt::Display for ExperienceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Copy for one onboarding page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OnboardingPage {
    pub icon: &'static str,
    pub title: &'static str,
    pub body: &'static str,
    pub button: &'static str,
}

pub const ONBOARDING_PAGES: [OnboardingPage; 3] = [
    OnboardingPage {
        icon: "eye.circle.fill",
        title: "Perception Shapes Experience",
        body: "How interface design influences what we see, feel, and understand.",
        button: "Continue",
    },
    OnboardingPage {
        icon: "waveform.path.ecg",
        title: "Subtle Changes, Profound Effects",
        body: "These experiences may feel unfamiliar or uncomfortable. There is no right or wrong way to perceive.",
        button: "Next",
    },
    OnboardingPage {
        icon: "sparkles",
        title: "Ready to Begin?",
        body: "Explore how design choices shape human experience.",
        button: "Begin the Journey",
    },
];

/// Closing copy for the synthesis screen.
pub const SYNTHESIS_TITLE: &str = "Integration Complete";
pub const SYNTHESIS_BODY: &str =
    "Design shapes perception. Perception shapes experience. Experience shapes understanding.";
pub const SYNTHESIS_DISCLAIMER: &str =
    "This experience is for awareness only and does not represent medical advice or diagnosis.";

/// Host-facing copy for one experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExperienceEntry {
    pub kind: ExperienceKind,
    pub index: usize,
    pub name: &'static str,
    pub short_label: &'static str,
    pub icon: &'static str,
    pub orientation: &'static str,
    pub reflection: &'static str,
}

impl From<ExperienceKind> for ExperienceEntry {
    fn from(kind: ExperienceKind) -> Self {
        Self {
            kind,
            index: kind.index(),
            name: kind.display_name(),
            short_label: kind.short_label(),
            icon: kind.icon(),
            orientation: kind.orientation_text(),
            reflection: kind.reflection_text(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SynthesisCopy {
    pub title: &'static str,
    pub body: &'static str,
    pub disclaimer: &'static str,
}

/// All static copy, serialized once so the host never hard-codes text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    pub experiences: Vec<ExperienceEntry>,
    pub onboarding: [OnboardingPage; 3],
    pub synthesis: SynthesisCopy,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            experiences: ExperienceKind::ALL.into_iter().map(ExperienceEntry::from).collect(),
            onboarding: ONBOARDING_PAGES,
            synthesis: SynthesisCopy {
                title: SYNTHESIS_TITLE,
                body: SYNTHESIS_BODY,
                disclaimer: SYNTHESIS_DISCLAIMER,
            },
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
