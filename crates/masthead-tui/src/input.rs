use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::app::{App, Focus};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    ScrollPageDown,
    ScrollPageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    ToggleFocus,
    LinkPrev,
    LinkNext,
    LinkOpen,
    /// Any other key while the secondary bar has focus
    BarKey,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    let in_bar = app.focus == Focus::SecondaryBar;

    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Focus
        (KeyCode::Tab, _) | (KeyCode::BackTab, _) => Action::ToggleFocus,
        (KeyCode::Esc, _) if in_bar => Action::ToggleFocus,

        // Carousel links; outside the bar they still reach the page
        (KeyCode::Left, KeyModifiers::NONE) | (KeyCode::Char('h'), KeyModifiers::NONE) => {
            Action::LinkPrev
        }
        (KeyCode::Right, KeyModifiers::NONE) | (KeyCode::Char('l'), KeyModifiers::NONE) => {
            Action::LinkNext
        }
        (KeyCode::Enter, KeyModifiers::NONE) => Action::LinkOpen,

        // Scrolling
        (KeyCode::Char('j'), KeyModifiers::NONE) => Action::ScrollDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) => Action::ScrollUp,
        (KeyCode::Down, KeyModifiers::NONE) => Action::ScrollDown,
        (KeyCode::Up, KeyModifiers::NONE) => Action::ScrollUp,
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::ScrollHalfPageDown,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::ScrollHalfPageUp,
        (KeyCode::Char('f'), KeyModifiers::CONTROL) => Action::ScrollPageDown,
        (KeyCode::Char('b'), KeyModifiers::CONTROL) => Action::ScrollPageUp,
        (KeyCode::PageDown, _) => Action::ScrollPageDown,
        (KeyCode::PageUp, _) => Action::ScrollPageUp,
        (KeyCode::Char(' '), KeyModifiers::NONE) => Action::ScrollPageDown,

        // Jump to top/bottom
        (KeyCode::Char('g'), KeyModifiers::NONE) => {
            // gg requires double press
            if app.pending_key == Some('g') {
                Action::JumpToTop
            } else {
                Action::PendingG
            }
        }
        (KeyCode::Char('G'), _) => Action::JumpToBottom,
        (KeyCode::Home, _) => Action::JumpToTop,
        (KeyCode::End, _) => Action::JumpToBottom,

        _ if in_bar => Action::BarKey,
        _ => Action::None,
    }
}

/// Mouse input after hit testing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    /// Wheel notches; positive is down
    Wheel(i32),
    Move { column: u16, row: u16 },
    Click { column: u16, row: u16 },
    None,
}

pub fn handle_mouse_event(mouse: MouseEvent) -> MouseAction {
    match mouse.kind {
        MouseEventKind::ScrollDown => MouseAction::Wheel(1),
        MouseEventKind::ScrollUp => MouseAction::Wheel(-1),
        MouseEventKind::Moved | MouseEventKind::Drag(_) => MouseAction::Move {
            column: mouse.column,
            row: mouse.row,
        },
        MouseEventKind::Down(MouseButton::Left) => MouseAction::Click {
            column: mouse.column,
            row: mouse.row,
        },
        _ => MouseAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use masthead_core::AppConfig;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn app() -> App {
        App::new(&AppConfig::default(), 100, 40).unwrap()
    }

    #[test]
    fn test_scroll_keys() {
        let app = app();
        assert_eq!(
            handle_key_event(key(KeyCode::Char('j'), KeyModifiers::NONE), &app),
            Action::ScrollDown
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('d'), KeyModifiers::CONTROL), &app),
            Action::ScrollHalfPageDown
        );
    }

    #[test]
    fn test_gg_needs_two_presses() {
        let mut app = app();
        let g = key(KeyCode::Char('g'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(g, &app), Action::PendingG);
        app.pending_key = Some('g');
        assert_eq!(handle_key_event(g, &app), Action::JumpToTop);
    }

    #[test]
    fn test_unmapped_key_reaches_bar_only_when_focused() {
        let mut app = app();
        let x = key(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(x, &app), Action::None);
        app.focus = Focus::SecondaryBar;
        assert_eq!(handle_key_event(x, &app), Action::BarKey);
    }

    #[test]
    fn test_wheel_direction() {
        let mouse = MouseEvent {
            kind: MouseEventKind::ScrollUp,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(handle_mouse_event(mouse), MouseAction::Wheel(-1));
    }
}
