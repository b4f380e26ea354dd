use std::path::{Path, PathBuf};

use crossterm::event::KeyCode;
use serde::Deserialize;
use tracing::warn;

use crate::system::counters::MountFilter;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub disks: DisksConfig,
    pub colors: ColorsConfig,
    pub keybinds: KeybindsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub refresh_rate_ms: u64,
    pub top_processes: usize,
    pub show_per_core: bool,
    pub history_length: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            refresh_rate_ms: 1000,
            top_processes: 10,
            show_per_core: true,
            history_length: 60,
        }
    }
}

/// Which mount points get a disk gauge.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DisksConfig {
    pub exact: Vec<String>,
    pub prefixes: Vec<String>,
}

impl Default for DisksConfig {
    fn default() -> Self {
        let standard = MountFilter::standard();
        DisksConfig {
            exact: standard.exact,
            prefixes: standard.prefixes,
        }
    }
}

impl DisksConfig {
    pub fn mount_filter(&self) -> MountFilter {
        MountFilter {
            exact: self.exact.clone(),
            prefixes: self.prefixes.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub theme: String,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        ColorsConfig {
            theme: "dark".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct KeybindsConfig {
    pub quit: String,
    pub help: String,
    pub cycle_theme: String,
    pub toggle_per_core: String,
    pub refresh: String,
}

impl Default for KeybindsConfig {
    fn default() -> Self {
        KeybindsConfig {
            quit: "q".to_string(),
            help: "?".to_string(),
            cycle_theme: "t".to_string(),
            toggle_per_core: "c".to_string(),
            refresh: "r".to_string(),
        }
    }
}

/// Parses a keybind name: a single character or one of the named keys.
pub fn parse_key(s: &str) -> Option<KeyCode> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }
    match s.to_lowercase().as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "space" => Some(KeyCode::Char(' ')),
        "backspace" => Some(KeyCode::Backspace),
        "delete" | "del" => Some(KeyCode::Delete),
        "f1" => Some(KeyCode::F(1)),
        "f5" => Some(KeyCode::F(5)),
        _ => None,
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("xtop").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) => {
            warn!(path = %path.display(), %error, "config unreadable, using defaults");
            return Config::default();
        }
    };
    toml::from_str(&contents).unwrap_or_else(|error| {
        warn!(path = %path.display(), %error, "config invalid, using defaults");
        Config::default()
    })
}
