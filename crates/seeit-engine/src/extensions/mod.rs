// extensions/mod.rs
//
// Optional helpers decoupled from the journey and hub core. Renderers opt in.

pub mod easing;

pub use easing::{ease_vec2, lerp, lerp_vec2, Easing};
