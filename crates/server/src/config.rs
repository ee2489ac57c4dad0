use std::{collections::HashMap, fs, path::Path};

use anyhow::Context;
use serde::Deserialize;
use shared::domain::BookRecord;
use tracing::warn;

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub seed_path: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            seed_path: None,
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("server.toml") {
        apply_file_settings(&mut settings, &raw);
    }
    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());

    settings
}

fn apply_file_settings(settings: &mut Settings, raw: &str) {
    match toml::from_str::<HashMap<String, String>>(raw) {
        Ok(file_cfg) => {
            if let Some(v) = file_cfg.get("bind_addr") {
                settings.server_bind = v.clone();
            }
            if let Some(v) = file_cfg.get("seed_path") {
                settings.seed_path = Some(v.clone());
            }
        }
        Err(error) => warn!(%error, "ignoring unparseable server.toml"),
    }
}

fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = lookup("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = lookup("APP__SEED_PATH") {
        settings.seed_path = Some(v);
    }
}

/// Reads the optional startup data set: a JSON array of books.
pub fn load_seed_books(path: &Path) -> anyhow::Result<Vec<BookRecord>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read seed file '{}'", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("seed file '{}' is not a JSON array of books", path.display()))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
