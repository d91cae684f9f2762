use std::fs::OpenOptions;

use env_logger::{Builder, Env, Target};

use crate::config::Settings;

/// Route `log` output to the configured file; the terminal belongs to the UI.
///
/// `RUST_LOG` wins over `logging.level`. When the file cannot be opened,
/// logging stays off.
pub fn init(settings: &Settings) {
    let path = settings.in_base_dir(&settings.logging.file);
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("reel: cannot open log file {}: {e}", path.display());
            return;
        }
    };

    let env = Env::default().default_filter_or(settings.logging.level.as_str());
    let _ = Builder::from_env(env)
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_secs()
        .try_init();
}
