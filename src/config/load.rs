use std::{
    env,
    path::{Path, PathBuf},
};

use ::config::{Config, ConfigError, Environment, File, FileFormat};

use super::schema::Settings;

/// Prefix of the `REEL__<SECTION>__<KEY>` override variables.
const ENV_PREFIX: &str = "REEL";

/// Points at an explicit config file, bypassing the XDG lookup.
const CONFIG_PATH_VAR: &str = "REEL_CONFIG_PATH";

impl Settings {
    /// Load settings from the resolved config file and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(resolve_config_path().as_deref())
    }

    /// Layer struct defaults, then `file` (TOML, may be absent), then
    /// `REEL__*` variables.
    pub fn load_from(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Everything wrong with these settings, empty when they are usable.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.storage.base_dir.as_os_str().is_empty() {
            problems.push("storage.base_dir is empty".to_string());
        }
        for (key, value) in [
            ("journal.actions_file", &self.journal.actions_file),
            ("journal.timings_file", &self.journal.timings_file),
            ("logging.file", &self.logging.file),
        ] {
            if value.trim().is_empty() {
                problems.push(format!("{key} is empty"));
            }
        }
        problems
    }
}

/// `$REEL_CONFIG_PATH` when set, else [`default_config_path`].
pub fn resolve_config_path() -> Option<PathBuf> {
    env::var_os(CONFIG_PATH_VAR)
        .map(PathBuf::from)
        .or_else(default_config_path)
}

/// `$XDG_CONFIG_HOME/reel/config.toml`, falling back to
/// `~/.config/reel/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .map(|dir| dir.join("reel").join("config.toml"))
}
