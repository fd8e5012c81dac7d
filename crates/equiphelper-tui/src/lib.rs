//! equiphelper-tui: Terminal UI for the equipHelper client
//!
//! This crate provides the TUI layer for equipHelper, including:
//! - The application state and event handling
//! - Transcript, catalog, input, and status widgets
//! - The terminal event loop joining dispatch tasks back into state

pub mod app;
mod event;
pub mod input;
mod theme;
mod widgets;

pub use app::{App, Focus, PendingAsk, StartupError};
pub use event::{key_to_action, Action, Event, EventHandler};
pub use equiphelper_engine;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyModifiers, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use equiphelper_engine::{Config, SubmissionTicket};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io::{self, stdout};
use std::sync::Arc;
use tokio::task::JoinHandle;

use widgets::{CatalogPanel, InputBar, StatusBar, TranscriptView};

/// Width of the catalog side panel.
const CATALOG_WIDTH: u16 = 40;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// This is the main entry point for the TUI. It sets up the terminal,
/// runs the event loop, and restores the terminal on exit.
pub async fn run_tui(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(config)?;

    // Setup terminal with RAII guard for cleanup
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create event handler (4 Hz tick rate = 250ms)
    let mut events = EventHandler::new(250);

    // Main loop
    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    // Restore cursor before guard drops
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    // Outstanding dispatch tasks, tagged with their submission ticket.
    let mut ask_handles: Vec<(SubmissionTicket, JoinHandle<String>)> = Vec::new();

    loop {
        terminal.draw(|frame| draw(app, frame))?;

        // Check for completed dispatches (non-blocking)
        let mut completed = Vec::new();
        for (i, (_, handle)) in ask_handles.iter().enumerate() {
            if handle.is_finished() {
                completed.push(i);
            }
        }
        for i in completed.into_iter().rev() {
            let (ticket, handle) = ask_handles.remove(i);
            if let Ok(reply) = handle.await {
                app.on_reply(ticket, reply);
            }
        }

        // Handle events
        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    let mut pending = None;
                    let mut handled = false;
                    if app.focus == Focus::Input {
                        (handled, pending) = handle_input_key(app, key);
                    }
                    if !handled {
                        pending = app.apply_action(key_to_action(key));
                    }
                    if let Some(pending) = pending {
                        spawn_ask(app, pending, &mut ask_handles);
                    }
                }
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => app.scroll_up(1),
                    MouseEventKind::ScrollDown => app.scroll_down(1),
                    _ => {}
                },
                Event::Tick => {
                    app.tick();
                }
                Event::Resize(_, _) => {
                    // Terminal will handle resize automatically
                }
            }
        }

        if app.should_quit {
            // Abort any remaining dispatch tasks
            for (_, handle) in ask_handles {
                handle.abort();
            }
            break;
        }
    }

    Ok(())
}

/// Spawn the dispatch for a submission; the reply is joined back into
/// the app by the main loop.
fn spawn_ask(
    app: &App,
    pending: PendingAsk,
    handles: &mut Vec<(SubmissionTicket, JoinHandle<String>)>,
) {
    let dispatcher = Arc::clone(&app.dispatcher);
    let PendingAsk { ticket, question } = pending;
    let handle = tokio::spawn(async move { dispatcher.ask(&question).await });
    handles.push((ticket, handle));
}

/// Handle key input for the question field.
///
/// Returns whether the key was consumed, and the submission to
/// dispatch if Enter submitted one.
fn handle_input_key(app: &mut App, key: KeyEvent) -> (bool, Option<PendingAsk>) {
    // Let the action handler deal with Ctrl+C, Ctrl+E, Ctrl+L.
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return (false, None);
    }

    match key.code {
        // Special keys that should be handled as actions
        KeyCode::Esc | KeyCode::Tab | KeyCode::PageUp | KeyCode::PageDown => (false, None),

        // Enter submits; the field clears immediately either way
        KeyCode::Enter => (true, app.submit_input()),

        // Text input
        KeyCode::Char(c) => {
            app.input.insert(c);
            (true, None)
        }
        KeyCode::Backspace => {
            app.input.backspace();
            (true, None)
        }
        KeyCode::Delete => {
            app.input.delete();
            (true, None)
        }
        KeyCode::Left => {
            app.input.move_left();
            (true, None)
        }
        KeyCode::Right => {
            app.input.move_right();
            (true, None)
        }
        KeyCode::Home => {
            app.input.move_home();
            (true, None)
        }
        KeyCode::End => {
            app.input.move_end();
            (true, None)
        }
        KeyCode::Up => {
            // History recall when the field is empty; otherwise let the
            // action handler scroll the transcript.
            if app.input.is_empty() {
                app.input.history_prev();
                (true, None)
            } else {
                (false, None)
            }
        }
        KeyCode::Down => {
            if app.input.is_empty() {
                app.input.history_next();
                (true, None)
            } else {
                (false, None)
            }
        }

        _ => (false, None),
    }
}

/// Render the full screen.
fn draw(app: &App, frame: &mut Frame<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(CATALOG_WIDTH)])
        .split(rows[0]);

    let transcript = TranscriptView::new(&app.transcript)
        .scroll_from_bottom(app.scroll_from_bottom)
        .tick(app.tick);
    frame.render_widget(transcript, columns[0]);

    let catalog = CatalogPanel::new(app.selected_category, app.selected_question)
        .focused(app.focus == Focus::Catalog);
    frame.render_widget(catalog, columns[1]);

    let input = InputBar::new(&app.input)
        .focused(app.focus == Focus::Input)
        .loading(app.transcript.is_loading(), app.tick);
    frame.render_widget(input, rows[1]);

    let status = StatusBar::new(app.focus, app.notification.as_ref());
    frame.render_widget(status, rows[2]);
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use tempfile::TempDir;

    fn test_app() -> (TempDir, App) {
        let temp = TempDir::new().unwrap();
        let config = Config {
            data_dir: Some(temp.path().to_path_buf()),
            ..Config::default()
        };
        (temp, App::new(&config).unwrap())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_draw_full_screen() {
        let (_temp, app) = test_app();
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(&app, frame)).unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect();
        assert!(content.contains("equipHelper"));
        assert!(content.contains("Equipment"));
        assert!(content.contains("Helmet"));
        assert!(content.contains("Ask equipHelper"));
    }

    #[test]
    fn test_draw_tiny_screen_does_not_panic() {
        let (_temp, app) = test_app();
        let backend = TestBackend::new(10, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(&app, frame)).unwrap();
    }

    #[test]
    fn test_typing_and_enter_produces_pending_ask() {
        let (_temp, mut app) = test_app();
        for ch in "hi".chars() {
            let (handled, pending) = handle_input_key(&mut app, key(KeyCode::Char(ch)));
            assert!(handled);
            assert!(pending.is_none());
        }
        let (handled, pending) = handle_input_key(&mut app, key(KeyCode::Enter));
        assert!(handled);
        let pending = pending.unwrap();
        assert_eq!(pending.question, "hi");
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_enter_on_empty_input_is_quiet() {
        let (_temp, mut app) = test_app();
        let (handled, pending) = handle_input_key(&mut app, key(KeyCode::Enter));
        assert!(handled);
        assert!(pending.is_none());
        assert!(!app.transcript.is_loading());
    }

    #[test]
    fn test_control_keys_fall_through_to_actions() {
        let (_temp, mut app) = test_app();
        let ctrl_e = KeyEvent::new(KeyCode::Char('e'), KeyModifiers::CONTROL);
        let (handled, _) = handle_input_key(&mut app, ctrl_e);
        assert!(!handled);
    }
}
