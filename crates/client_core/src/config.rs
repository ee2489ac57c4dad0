use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;
use tracing::{debug, warn};

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8080";
pub const SETTINGS_FILE_NAME: &str = "library.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_base_url: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    api_url: Option<String>,
}

/// Resolves settings once: defaults, then the first settings file found,
/// then environment overrides.
pub fn load_settings() -> ClientSettings {
    let mut settings = ClientSettings::default();

    for path in settings_file_candidates() {
        match read_settings_file(&path) {
            Ok(Some(file_cfg)) => {
                debug!(path = %path.display(), "loaded client settings file");
                if let Some(v) = file_cfg.api_url {
                    settings.api_base_url = v;
                }
                break;
            }
            Ok(None) => {}
            Err(error) => {
                warn!(path = %path.display(), error = %format!("{error:#}"), "ignoring settings file");
            }
        }
    }

    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    settings
}

fn settings_file_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(SETTINGS_FILE_NAME)];
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("library-manager").join("client.toml"));
    }
    candidates
}

fn read_settings_file(path: &Path) -> anyhow::Result<Option<SettingsFile>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read '{}'", path.display()))
        }
    };
    let parsed = toml::from_str::<SettingsFile>(&raw)
        .with_context(|| format!("failed to parse '{}'", path.display()))?;
    Ok(Some(parsed))
}

fn apply_env_overrides(
    settings: &mut ClientSettings,
    lookup: impl Fn(&str) -> Option<String>,
) {
    for name in ["LIBRARY_API_URL", "APP__API_URL"] {
        if let Some(v) = lookup(name).filter(|v| !v.trim().is_empty()) {
            settings.api_base_url = v;
        }
    }
}
