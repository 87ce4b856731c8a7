use std::path::Path;

use crate::error::SettingsError;
use crate::settings::Settings;

/// Settings may be nested under this key, as in a host framework's extension block.
pub const EXTENSION_KEY: &str = "jsonapi";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsFormat {
    Json,
    Yaml,
    Auto,
}

impl SettingsFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => SettingsFormat::Json,
            Some("yml" | "yaml") => SettingsFormat::Yaml,
            _ => SettingsFormat::Auto,
        }
    }
}

pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let content = std::fs::read_to_string(path)?;
    parse_settings_str(&content, SettingsFormat::from_path(path))
}

pub fn parse_settings_str(input: &str, format: SettingsFormat) -> Result<Settings, SettingsError> {
    match format {
        SettingsFormat::Json => parse_json(input),
        SettingsFormat::Yaml => parse_yaml(input),
        SettingsFormat::Auto => parse_auto(input),
    }
}

fn parse_auto(input: &str) -> Result<Settings, SettingsError> {
    // JSON always starts with `{` after trimming.
    if input.trim_start().starts_with('{') {
        return match parse_json(input) {
            Ok(s) => Ok(s),
            Err(e) => parse_yaml(input).map_err(|_| e),
        };
    }

    match parse_yaml(input) {
        Ok(s) => Ok(s),
        Err(e) => parse_json(input).map_err(|_| e),
    }
}

fn parse_json(input: &str) -> Result<Settings, SettingsError> {
    let mut v: serde_json::Value = serde_json::from_str(input)?;
    let inner = v.get_mut(EXTENSION_KEY).map(std::mem::take);
    if let Some(inner) = inner {
        v = inner;
    }
    if v.is_null() {
        return Ok(Settings::default());
    }
    Ok(serde_json::from_value(v)?)
}

fn parse_yaml(input: &str) -> Result<Settings, SettingsError> {
    if input.trim().is_empty() {
        return Ok(Settings::default());
    }
    let mut v: serde_yaml::Value = serde_yaml::from_str(input)?;
    let inner = v.get_mut(EXTENSION_KEY).map(std::mem::take);
    if let Some(inner) = inner {
        v = inner;
    }
    if v.is_null() {
        return Ok(Settings::default());
    }
    Ok(serde_yaml::from_value(v)?)
}
