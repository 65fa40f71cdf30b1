use std::io;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use masthead_core::carousel::NavKey;
use masthead_core::AppConfig;
use masthead_tui::{
    app::{App, Focus, ScreenLayout},
    event::{AppEvent, EventHandler},
    input::{handle_key_event, handle_mouse_event, Action, MouseAction},
    scroll::ScrollConfigExt,
    widgets::{ContentWidget, HeaderWidget, ProgressWidget, SecondaryBarWidget, StatusBarWidget},
};

type Backend = CrosstermBackend<io::Stdout>;

pub async fn run(config: &AppConfig) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("masthead"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Restore the terminal even when the loop fails
    let result = run_loop(&mut terminal, config);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_loop(terminal: &mut Terminal<Backend>, config: &AppConfig) -> Result<()> {
    let size = terminal.size()?;
    let mut app = App::new(config, size.width, size.height)?;
    info!(cols = size.width, rows = size.height, "demo page attached");

    let event_handler = EventHandler::with_animation_tick(
        config.ui.tick_rate_ms,
        config.ui.scroll.animation_tick_duration(),
    );

    loop {
        terminal.draw(|frame| {
            let layout = ScreenLayout::new(frame.area(), app.surface().header_hidden());
            ProgressWidget::render(frame, layout.progress, &app);
            HeaderWidget::render(frame, layout.header, &app);
            SecondaryBarWidget::render(frame, layout.bar, &app);
            ContentWidget::render(frame, layout.content, &app);
            StatusBarWidget::render(frame, layout.status, &app);
        })?;

        let timeout = app.poll_timeout(Instant::now(), event_handler.tick_rate());
        if let Some(event) = event_handler.next(timeout)? {
            let now = Instant::now();
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, &app);
                    handle_action(&mut app, action, now);
                }
                AppEvent::Mouse(mouse) => match handle_mouse_event(mouse) {
                    MouseAction::Wheel(notches) => app.mouse_wheel(notches, now),
                    MouseAction::Move { column, row } => app.mouse_move(column, row, now),
                    MouseAction::Click { column, row } => app.click(column, row, now),
                    MouseAction::None => {}
                },
                AppEvent::Resize(cols, rows) => app.resize(cols, rows, now),
                AppEvent::Tick => {}
            }
        }

        // Every pass doubles as an animation frame
        app.on_tick(Instant::now());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_action(app: &mut App, action: Action, now: Instant) {
    if action != Action::PendingG {
        app.clear_pending_key();
    }

    match action {
        Action::Quit => app.should_quit = true,
        Action::ScrollDown => app.scroll_steps(1, now),
        Action::ScrollUp => app.scroll_steps(-1, now),
        Action::ScrollHalfPageDown => app.scroll_pages(0.5, now),
        Action::ScrollHalfPageUp => app.scroll_pages(-0.5, now),
        Action::ScrollPageDown => app.scroll_pages(1.0, now),
        Action::ScrollPageUp => app.scroll_pages(-1.0, now),
        Action::JumpToTop => app.jump_to_top(now),
        Action::JumpToBottom => app.jump_to_bottom(now),
        Action::PendingG => app.pending_key = Some('g'),
        Action::ToggleFocus => app.toggle_focus(),
        Action::LinkPrev => nav(app, NavKey::ArrowLeft, now),
        Action::LinkNext => nav(app, NavKey::ArrowRight, now),
        Action::LinkOpen => nav(app, NavKey::Enter, now),
        Action::BarKey => {
            app.nav_key(NavKey::Other, now);
        }
        Action::None => {}
    }
}

fn nav(app: &mut App, key: NavKey, now: Instant) {
    if !app.nav_key(key, now) && app.focus == Focus::Page {
        app.set_status("Press Tab to move focus into the link bar");
    }
}
