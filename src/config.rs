// src/config.rs
use directories::ProjectDirs;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use toml;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    /// Whether stored passwords start out masked in the UI.
    pub start_hidden: bool,
    pub theme: Option<String>, // Placeholder for future use
}

impl Default for Config {
    fn default() -> Self {
        Config {
            start_hidden: true,
            theme: None,
        }
    }
}

fn get_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "CredmanRS", "CredmanRS").map(|proj_dirs| {
        let config_dir = proj_dirs.config_dir();
        config_dir.join("credman_config.toml")
    })
}

fn save_default_config(config_path: &Path, config: &Config) -> Result<(), String> {
    info!("Attempting to save default config to {:?}", config_path);
    if let Some(parent_dir) = config_path.parent() {
        if !parent_dir.exists() {
            fs::create_dir_all(parent_dir)
                .map_err(|e| format!("Failed to create config directory {:?}: {}", parent_dir, e))?;
            info!("Created config directory: {:?}", parent_dir);
        }
    }

    let toml_string = toml::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialize default config to TOML: {}", e))?;

    let mut file = fs::File::create(config_path)
        .map_err(|e| format!("Failed to create default config file {:?}: {}", config_path, e))?;

    file.write_all(toml_string.as_bytes())
        .map_err(|e| format!("Failed to write default config to {:?}: {}", config_path, e))?;

    info!("Saved default configuration to {:?}", config_path);
    Ok(())
}

pub fn load_config() -> Config {
    if let Some(config_path) = get_config_path() {
        if config_path.exists() {
            info!("Loading configuration from {:?}", config_path);
            match fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(loaded_config) => {
                        info!("Configuration loaded successfully.");
                        return loaded_config;
                    }
                    Err(e) => {
                        warn!(
                            "Failed to parse config file at {:?}: {}. Using default configuration.",
                            config_path, e
                        );
                    }
                },
                Err(e) => {
                    warn!(
                        "Failed to read config file at {:?}: {}. Using default configuration.",
                        config_path, e
                    );
                }
            }
        } else {
            info!(
                "Config file not found at {:?}. Creating and using default configuration.",
                config_path
            );
            let default_config = Config::default();
            if let Err(e) = save_default_config(&config_path, &default_config) {
                warn!("Failed to save default configuration: {}", e);
            }
            return default_config;
        }
    } else {
        warn!("Could not determine config directory. Using default configuration.");
    }
    Config::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.start_hidden);
        assert_eq!(config.theme, None);
    }

    #[test]
    fn test_save_and_load_config() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("test_config.toml");

        let default_config = Config::default();
        save_default_config(&config_path, &default_config).unwrap();
        assert!(config_path.exists());

        let content = fs::read_to_string(&config_path).unwrap();
        let loaded_config: Config = toml::from_str(&content).unwrap();

        assert_eq!(loaded_config.start_hidden, default_config.start_hidden);
        assert_eq!(loaded_config.theme, default_config.theme);
    }

    #[test]
    fn test_save_default_config_creates_missing_directories() {
        let dir = tempdir().unwrap();
        let nested_path = dir.path().join("nested_dir").join("credman_config.toml");

        save_default_config(&nested_path, &Config::default()).unwrap();
        assert!(nested_path.exists());
    }

    #[test]
    fn test_invalid_toml_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("invalid_config.toml");
        fs::write(&config_path, "this is not valid toml content = definitely_broken").unwrap();

        // Simulate the parse-and-fallback branch of load_config.
        let mut loaded_config = Config::default();
        if let Ok(content) = fs::read_to_string(&config_path) {
            if let Ok(cfg) = toml::from_str(&content) {
                loaded_config = cfg;
            }
        }
        assert!(loaded_config.start_hidden);
    }

    #[test]
    fn test_custom_values_round_trip() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom_config.toml");

        fs::write(&config_path, "start_hidden = false\ntheme = \"dark\"\n").unwrap();
        let content = fs::read_to_string(&config_path).unwrap();
        let loaded_config: Config = toml::from_str(&content).unwrap();

        assert!(!loaded_config.start_hidden);
        assert_eq!(loaded_config.theme, Some("dark".to_string()));
    }
}
