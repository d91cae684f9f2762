use std::env;
use std::path::PathBuf;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::journal::Journal;

mod event_loop;
mod logging;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings::Startup { settings, warnings } =
        settings::load_settings(env::args_os().nth(1).map(PathBuf::from));

    std::fs::create_dir_all(&settings.storage.base_dir)?;
    logging::init(&settings);
    for warning in &warnings {
        log::warn!("{warning}");
    }

    let journal = if settings.journal.enabled {
        Journal::new(
            settings.in_base_dir(&settings.journal.actions_file),
            settings.in_base_dir(&settings.journal.timings_file),
        )
    } else {
        Journal::disabled()
    };

    if let (Some(actions), Some(timings)) = (journal.actions_path(), journal.timings_path()) {
        log::debug!("journal: {} / {}", actions.display(), timings.display());
    }

    let mut app = App::new(settings.storage.base_dir.clone(), journal)?;
    app.confirm_delete = settings.ui.confirm_delete;
    log::info!(
        "starting with {} catalog(s) in {}",
        app.catalogs.len(),
        settings.storage.base_dir.display()
    );

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::default();
        event_loop::run(&mut terminal, &settings, &mut app, &mut state)
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
