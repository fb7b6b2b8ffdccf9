//! Filesystem locations for configuration and trace output.
//!
//! Locations follow the XDG base directory layout, falling back to `$HOME`
//! and finally to the system temp directory:
//!
//! | What        | Location                                          |
//! |-------------|---------------------------------------------------|
//! | Data dir    | `$XDG_DATA_HOME/todo-sync` or `~/.local/share/todo-sync` |
//! | Config file | `$XDG_CONFIG_HOME/todo-sync/config.toml` or `~/.config/todo-sync/config.toml` |
//!
//! An explicit `data_dir` in [`Config`] overrides the data directory.

use crate::Config;
use std::path::PathBuf;

const APP_DIR: &str = "todo-sync";

/// Returns the data directory for trace output.
///
/// # Examples
///
/// ```
/// use todo_sync::infrastructure::data_dir;
/// use todo_sync::Config;
///
/// let config = Config {
///     data_dir: Some("/var/lib/todo-sync".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(data_dir(&config).to_str(), Some("/var/lib/todo-sync"));
/// ```
#[must_use]
pub fn data_dir(config: &Config) -> PathBuf {
    data_dir_with(config, |key| std::env::var(key).ok())
}

/// Returns the default config file location, if a home can be determined.
#[must_use]
pub fn config_file() -> Option<PathBuf> {
    config_file_with(|key| std::env::var(key).ok())
}

/// Expands a leading `~` to `home`. Other paths are returned unchanged.
fn expand_tilde_with(path: &str, home: Option<&str>) -> String {
    match (home, path.strip_prefix('~')) {
        (Some(home), Some(rest)) if rest.is_empty() || rest.starts_with('/') => format!("{home}{rest}"),
        _ => path.to_string(),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn data_dir_with(config: &Config, env: impl Fn(&str) -> Option<String>) -> PathBuf {
    let home = non_empty(env("HOME"));

    if let Some(dir) = config.data_dir.as_deref().filter(|d| !d.trim().is_empty()) {
        return PathBuf::from(expand_tilde_with(dir.trim(), home.as_deref()));
    }
    if let Some(xdg) = non_empty(env("XDG_DATA_HOME")) {
        return PathBuf::from(xdg).join(APP_DIR);
    }
    home.map_or_else(
        || std::env::temp_dir().join(APP_DIR),
        |home| PathBuf::from(home).join(".local").join("share").join(APP_DIR),
    )
}

fn config_file_with(env: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    let base = non_empty(env("XDG_CONFIG_HOME"))
        .map(PathBuf::from)
        .or_else(|| non_empty(env("HOME")).map(|home| PathBuf::from(home).join(".config")))?;
    Some(base.join(APP_DIR).join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn expands_only_leading_home_tilde() {
        assert_eq!(expand_tilde_with("~/traces", Some("/home/ana")), "/home/ana/traces");
        assert_eq!(expand_tilde_with("~", Some("/home/ana")), "/home/ana");
        assert_eq!(expand_tilde_with("~other/x", Some("/home/ana")), "~other/x");
        assert_eq!(expand_tilde_with("~/x", None), "~/x");
    }

    #[test]
    fn data_dir_prefers_config_then_xdg_then_home() {
        let mut config = Config::default();
        let vars = env(&[("HOME", "/home/ana"), ("XDG_DATA_HOME", "/xdg/data")]);

        assert_eq!(data_dir_with(&config, &vars), PathBuf::from("/xdg/data/todo-sync"));

        config.data_dir = Some("~/todo".to_string());
        assert_eq!(data_dir_with(&config, &vars), PathBuf::from("/home/ana/todo"));

        config.data_dir = None;
        let home_only = env(&[("HOME", "/home/ana")]);
        assert_eq!(
            data_dir_with(&config, home_only),
            PathBuf::from("/home/ana/.local/share/todo-sync")
        );
    }

    #[test]
    fn config_file_locations() {
        assert_eq!(
            config_file_with(env(&[("XDG_CONFIG_HOME", "/xdg/cfg")])),
            Some(PathBuf::from("/xdg/cfg/todo-sync/config.toml"))
        );
        assert_eq!(
            config_file_with(env(&[("HOME", "/home/ana")])),
            Some(PathBuf::from("/home/ana/.config/todo-sync/config.toml"))
        );
        assert_eq!(config_file_with(env(&[])), None);
    }
}
