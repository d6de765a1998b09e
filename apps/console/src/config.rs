use std::fs;

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Seconds the driver-side SOS countdown runs before the alert fires.
    pub countdown_seconds: u32,
    /// JSON file of accident records replacing the built-in seed.
    pub seed_path: Option<String>,
    /// Ring the terminal bell when a store event arrives.
    pub bell_on_events: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            countdown_seconds: 10,
            seed_path: None,
            bell_on_events: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    countdown_seconds: Option<u32>,
    seed_path: Option<String>,
    bell_on_events: Option<bool>,
}

pub fn load_settings() -> Settings {
    load_settings_from("gerayo.toml")
}

fn load_settings_from(path: &str) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        if let Ok(file_cfg) = toml::from_str::<FileSettings>(&raw) {
            if let Some(v) = file_cfg.countdown_seconds {
                settings.countdown_seconds = v;
            }
            if let Some(v) = file_cfg.seed_path {
                settings.seed_path = Some(v);
            }
            if let Some(v) = file_cfg.bell_on_events {
                settings.bell_on_events = v;
            }
        }
    }

    if let Ok(v) = std::env::var("GERAYO__COUNTDOWN_SECONDS") {
        if let Ok(parsed) = v.parse::<u32>() {
            settings.countdown_seconds = parsed;
        }
    }
    if let Ok(v) = std::env::var("GERAYO__SEED_PATH") {
        settings.seed_path = Some(v);
    }
    if let Ok(v) = std::env::var("GERAYO__BELL_ON_EVENTS") {
        if let Ok(parsed) = v.parse::<bool>() {
            settings.bell_on_events = parsed;
        }
    }

    settings
}
