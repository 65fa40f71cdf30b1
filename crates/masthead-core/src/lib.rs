pub mod carousel;
pub mod config;
pub mod controller;
pub mod effects;
pub mod error;
pub mod event;
pub mod header;
pub mod hero;
pub mod page;
pub mod progress;
pub mod resize;
pub mod scroll;
pub mod surface;
pub mod timer;
pub mod trace;

pub use config::{AppConfig, EasingType, ScrollConfig};
pub use controller::{Controller, Snapshot};
pub use error::{Error, Result};
pub use event::{PageEvent, Response};
pub use page::{PageLayout, Rect, Region, Viewport};
pub use surface::{Class, RecordingSurface, Style, Surface};
