pub mod app;
pub mod event;
pub mod input;
pub mod page;
pub mod scroll;
pub mod surface;
pub mod theme;
pub mod widgets;

pub use app::{App, Focus, ScreenLayout};
pub use surface::TerminalSurface;
pub use theme::Theme;
