use std::path::PathBuf;

use crate::config::Settings;

/// Settings reel starts with, and what went wrong getting them.
///
/// The warnings are logged once the logger (whose file depends on these
/// settings) is running.
pub struct Startup {
    pub settings: Settings,
    pub warnings: Vec<String>,
}

/// Load the configuration and apply the catalog directory given on the
/// command line. A broken config never stops the app.
pub fn load_settings(base_dir_arg: Option<PathBuf>) -> Startup {
    resolve(Settings::load(), base_dir_arg)
}

fn resolve(
    loaded: Result<Settings, ::config::ConfigError>,
    base_dir_arg: Option<PathBuf>,
) -> Startup {
    let mut warnings = Vec::new();
    let mut settings = loaded.unwrap_or_else(|e| {
        warnings.push(format!("config not loaded, using defaults: {e}"));
        Settings::default()
    });

    let problems = settings.problems();
    if !problems.is_empty() {
        warnings.push(format!("config ignored ({}), using defaults", problems.join("; ")));
        settings = Settings::default();
    }

    if let Some(dir) = base_dir_arg.filter(|d| !d.as_os_str().is_empty()) {
        settings.storage.base_dir = dir;
    }

    Startup { settings, warnings }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_dir_wins_over_config() {
        let mut s = Settings::default();
        s.storage.base_dir = PathBuf::from("from-config");
        s.ui.confirm_delete = false;

        let startup = resolve(Ok(s), Some(PathBuf::from("/srv/films")));
        assert!(startup.warnings.is_empty());
        assert_eq!(startup.settings.storage.base_dir, PathBuf::from("/srv/films"));
        assert!(!startup.settings.ui.confirm_delete);

        let startup = resolve(Ok(Settings::default()), Some(PathBuf::new()));
        assert_eq!(startup.settings.storage.base_dir, PathBuf::from("catalogs"));
    }

    #[test]
    fn unusable_config_falls_back_with_a_warning() {
        let broken = Err(::config::ConfigError::Message("bad toml".into()));
        let startup = resolve(broken, Some(PathBuf::from("here")));
        assert_eq!(startup.warnings.len(), 1);
        assert!(startup.warnings[0].contains("bad toml"));
        assert_eq!(startup.settings.storage.base_dir, PathBuf::from("here"));

        let mut s = Settings::default();
        s.logging.file.clear();
        s.ui.confirm_delete = false;
        let startup = resolve(Ok(s), None);
        assert_eq!(startup.warnings.len(), 1);
        assert!(startup.warnings[0].contains("logging.file is empty"));
        assert!(startup.settings.ui.confirm_delete);
    }
}
