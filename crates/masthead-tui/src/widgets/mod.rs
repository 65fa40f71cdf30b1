mod content;
mod header;
mod progress;
mod secondary_bar;
mod status_bar;

pub use content::ContentWidget;
pub use header::HeaderWidget;
pub use progress::{filled_cells, ProgressWidget};
pub use secondary_bar::{link_slots, links_area, LinkSlot, SecondaryBarWidget, COMPACT_TITLE};
pub use status_bar::StatusBarWidget;
