use serde::{Deserialize, Serialize};

use crate::carousel::NavKey;
use crate::effects::LinkClick;
use crate::hero::IntersectionEntry;

/// Events a host delivers to the controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageEvent {
    /// Raw scroll notification with the new scroll offset
    Scroll { top: f64 },
    /// A rendering frame is about to be painted
    Frame,
    /// Viewport size changed
    Resize { width: f64, height: f64 },
    /// Document content height changed
    DocumentResize { height: f64 },
    /// Intersection observer batch
    Intersection { entries: Vec<IntersectionEntry> },
    /// Key pressed; `in_secondary_bar` when focus is inside the secondary bar
    Key {
        key: NavKey,
        #[serde(default)]
        in_secondary_bar: bool,
    },
    /// Pointer entered a carousel link
    PointerEnter { link: usize },
    /// Carousel link clicked
    Click(LinkClick),
    /// Make a carousel link active without keyboard navigation
    SelectLink { index: usize },
}

/// What the host should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Response {
    /// Work is queued for the next rendering frame; deliver a `Frame`
    pub request_frame: bool,
    /// The event was consumed; suppress its default action
    pub prevent_default: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_event_shapes() {
        let event: PageEvent = serde_json::from_str(r#"{"type":"scroll","top":250}"#).unwrap();
        assert_eq!(event, PageEvent::Scroll { top: 250.0 });

        let event: PageEvent =
            serde_json::from_str(r#"{"type":"key","key":"ArrowLeft","in_secondary_bar":true}"#)
                .unwrap();
        assert_eq!(
            event,
            PageEvent::Key {
                key: NavKey::ArrowLeft,
                in_secondary_bar: true
            }
        );

        let event: PageEvent = serde_json::from_str(r#"{"type":"key","key":"Tab"}"#).unwrap();
        assert_eq!(
            event,
            PageEvent::Key {
                key: NavKey::Other,
                in_secondary_bar: false
            }
        );
    }

    #[test]
    fn test_click_event_flattens_fields() {
        let event: PageEvent = serde_json::from_str(
            r#"{"type":"click","link":2,"x":10,"y":5,"rect":{"left":0,"top":0,"width":40,"height":20}}"#,
        )
        .unwrap();
        match event {
            PageEvent::Click(click) => {
                assert_eq!(click.link, 2);
                assert_eq!(click.rect.width, 40.0);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }
}
