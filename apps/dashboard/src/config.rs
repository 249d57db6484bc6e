use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub project_ids: Vec<String>,
    pub default_project: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".into(),
            project_ids: Vec::new(),
            default_project: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    project_ids: Option<Vec<String>>,
    default_project: Option<String>,
}

/// Defaults, then the config file, then `APP__*` environment variables.
///
/// An explicitly named file must exist; the default `dashboard.toml` is optional.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    match fs::read_to_string(&path) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?,
        Err(err) if required => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()))
        }
        Err(_) => {}
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.api_base_url {
        settings.api_base_url = v;
    }
    if let Some(v) = file_cfg.project_ids {
        settings.project_ids = v;
    }
    if let Some(v) = file_cfg.default_project {
        settings.default_project = Some(v);
    }
    Ok(())
}

fn apply_env_overrides(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = var("APP__PROJECT_IDS") {
        settings.project_ids = split_list(&v);
    }
    if let Some(v) = var("APP__DEFAULT_PROJECT") {
        settings.default_project = Some(v);
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
