//! Smooth scrolling for the demo page
//!
//! Scroll input moves a target offset; the animator eases the visible offset
//! towards it over a few frames. Every intermediate offset is fed to the
//! controller as a raw scroll notification, so the page produces the same
//! bursty signal a browser does.
//!
//! ## L4 Atomic Layer
//! - `easing` - Easing curves over [0, 1]
//! - `timing` - Progress and interpolation against an explicit clock
//! - `config` - Duration helpers over `ScrollConfig` (defined in masthead-core)
//!
//! ## L3 Molecular Layer
//! - `animation` - The animator combining them

// L4 Atomic Layer
pub mod config;
pub mod easing;
pub mod timing;

// L3 Molecular Layer
pub mod animation;

pub use animation::ScrollAnimator;
pub use config::{ScrollConfig, ScrollConfigExt};
pub use easing::{EasingType, EasingTypeExt};
