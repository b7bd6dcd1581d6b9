use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct ProfileConfig {
    pub server: Option<String>,
    pub format: Option<String>,
    /// Default projection columns for `fetch`, in `[NAME=]PATH[+PATH...]`
    /// syntax; the built-in clinical defaults apply when unset.
    pub fields: Option<Vec<String>>,
}

pub type ConfigFile = HashMap<String, ProfileConfig>;

fn config_dir() -> Result<PathBuf> {
    let dir = dirs::home_dir()
        .context("Cannot determine home directory")?
        .join(".fhirtab");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

pub fn load_all() -> Result<ConfigFile> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(ConfigFile::new());
    }
    let content = fs::read_to_string(&path)?;
    let cfg: ConfigFile = toml::from_str(&content)?;
    Ok(cfg)
}

pub fn load_profile(profile: &str) -> Result<ProfileConfig> {
    let mut all = load_all()?;
    Ok(all.remove(profile).unwrap_or_default())
}

pub fn save_profile(profile: &str, config: &ProfileConfig) -> Result<()> {
    let mut all = load_all()?;
    all.insert(
        profile.to_string(),
        ProfileConfig {
            server: config.server.clone(),
            format: config.format.clone(),
            fields: config.fields.clone(),
        },
    );
    let content = toml::to_string_pretty(&all)?;
    fs::write(config_path()?, content)?;
    Ok(())
}

pub fn resolve_server(cli_server: &Option<String>, profile: &str) -> Result<String> {
    // 1. --server flag / FHIRTAB_URL env
    if let Some(s) = cli_server {
        return Ok(s.clone());
    }
    // 2. config.toml profile
    let cfg = load_profile(profile)?;
    if let Some(s) = cfg.server {
        return Ok(s);
    }
    anyhow::bail!(
        "No server URL configured. Use --server, set FHIRTAB_URL, or run: fhirtab config set server <url>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_round_trips_through_toml() {
        let mut all = ConfigFile::new();
        all.insert(
            "default".to_string(),
            ProfileConfig {
                server: Some("http://example.org/fhir".to_string()),
                format: Some("table".to_string()),
                fields: Some(vec![
                    "effectiveDateTime".to_string(),
                    "code.text".to_string(),
                ]),
            },
        );

        let text = toml::to_string_pretty(&all).unwrap();
        let parsed: ConfigFile = toml::from_str(&text).unwrap();
        let profile = &parsed["default"];
        assert_eq!(profile.server.as_deref(), Some("http://example.org/fhir"));
        assert_eq!(profile.format.as_deref(), Some("table"));
        assert_eq!(profile.fields.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_missing_keys_default_to_none() {
        let parsed: ConfigFile = toml::from_str("[default]\n").unwrap();
        let profile = &parsed["default"];
        assert!(profile.server.is_none());
        assert!(profile.format.is_none());
        assert!(profile.fields.is_none());
    }
}
