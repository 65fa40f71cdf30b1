//! Scroll signal processing
//!
//! The raw scroll signal feeds two independent consumers:
//!
//! - `sampler` - coalesces raw notifications into at most one sample per frame
//!   and derives direction and delta from consecutive samples
//! - `idle` - restarts a quiet-period countdown on every notification and
//!   reports when scrolling has stopped
//!
//! Both are driven by the controller; neither reads ambient state.

pub mod idle;
pub mod sampler;

pub use idle::{IdleDetector, ScrollStopped};
pub use sampler::{ScrollDirection, ScrollSample, ScrollSampler};
