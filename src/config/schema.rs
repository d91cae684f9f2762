use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/reel/config.toml` or `~/.config/reel/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `REEL__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub journal: JournalSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Resolve `file` against the catalog directory unless it is absolute.
    pub fn in_base_dir(&self, file: &str) -> PathBuf {
        let p = Path::new(file);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.storage.base_dir.join(p)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding one `<name>.txt` file per catalog.
    pub base_dir: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("catalogs"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JournalSettings {
    /// Whether catalog operations are recorded at all.
    pub enabled: bool,
    /// Outcome log, relative to `storage.base_dir` unless absolute.
    pub actions_file: String,
    /// Elapsed-time log, relative to `storage.base_dir` unless absolute.
    pub timings_file: String,
}

impl Default for JournalSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            actions_file: "actions.log".to_string(),
            timings_file: "timings.log".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Ask for `y/n` before deleting a whole catalog.
    pub confirm_delete: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ reel: your movie catalogs ~ ".to_string(),
            confirm_delete: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter when `RUST_LOG` is unset (e.g. "info", "reel=debug").
    pub level: String,
    /// Log file, relative to `storage.base_dir` unless absolute.
    pub file: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: "reel.log".to_string(),
        }
    }
}
