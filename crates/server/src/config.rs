use std::{collections::HashMap, fs, path::Path};

/// Runtime settings. There is deliberately no environment or CLI surface:
/// the dashboard listens on one fixed port, and an optional `dashboard.toml`
/// next to the binary overrides the defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: String,
    pub dataset_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8050".into(),
            dataset_path: "data/faithful.csv".into(),
        }
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new("dashboard.toml"))
}

fn load_settings_from(path: &Path) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("bind_addr") {
                settings.bind_addr = v.clone();
            }
            if let Some(v) = file_cfg.get("dataset_path") {
                settings.dataset_path = v.clone();
            }
        }
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
