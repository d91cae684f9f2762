use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Focus, InputMode};
use crate::config;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

/// Main terminal event loop: draws the UI and dispatches key presses.
/// Returns `Ok(())` when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let display = app.display_indices();
        terminal.draw(|f| ui::draw(f, app, &display, &settings.ui))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, app, state) {
                    log::info!("quit requested");
                    return Ok(());
                }
            }
        }
    }
}

/// Apply one key press to `app`. Returns `true` when the loop should stop.
fn handle_key_event(key: KeyEvent, app: &mut App, state: &mut EventLoopState) -> bool {
    match app.input_mode {
        InputMode::Normal => {}
        InputMode::ConfirmDelete => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('s') => app.confirm(true),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.confirm(false),
                _ => {}
            }
            return false;
        }
        InputMode::Filter | InputMode::NewCatalog | InputMode::AddTitle | InputMode::AddYear => {
            state.pending_gg = false;
            match key.code {
                KeyCode::Esc => app.cancel_input(),
                KeyCode::Enter => app.submit_input(),
                KeyCode::Backspace => app.pop_input_char(),
                KeyCode::Down if app.input_mode == InputMode::Filter => app.next(),
                KeyCode::Up if app.input_mode == InputMode::Filter => app.prev(),
                KeyCode::Char(c) if !c.is_control() => app.push_input_char(c),
                _ => {}
            }
            return false;
        }
    }

    // Any key other than `g` cancels a pending `gg`.
    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }
    // The last notice stays up until the next key.
    if key.code != KeyCode::Char('q') {
        app.notice = None;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Tab => app.toggle_focus(),
        KeyCode::Char('j') | KeyCode::Down => match app.focus {
            Focus::Catalogs => app.next_catalog(),
            Focus::Movies => app.next(),
        },
        KeyCode::Char('k') | KeyCode::Up => match app.focus {
            Focus::Catalogs => app.prev_catalog(),
            Focus::Movies => app.prev(),
        },
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                match app.focus {
                    Focus::Catalogs => app.select_catalog(0),
                    Focus::Movies => app.select_first(),
                }
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => match app.focus {
            Focus::Catalogs => app.select_catalog(app.catalogs.len().saturating_sub(1)),
            Focus::Movies => app.select_last(),
        },
        KeyCode::Char('/') => app.enter_filter_mode(),
        KeyCode::Char('a') => app.begin_add_movie(),
        KeyCode::Char('n') => app.begin_new_catalog(),
        KeyCode::Char(' ') => app.toggle_mark(),
        KeyCode::Char('d') => {
            app.delete_marked();
        }
        KeyCode::Char('D') => app.request_delete_catalog(),
        KeyCode::Char('R') => app.refresh_catalogs(),
        KeyCode::Esc => app.clear_filter(),
        _ => {}
    }

    false
}
