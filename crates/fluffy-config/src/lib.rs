mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable that points at an alternative config file.
pub const CONFIG_ENV: &str = "FLUFFY_CONFIG";

/// Returns the config directory, e.g. ~/.config/fluffy-display/
pub fn config_dir() -> Result<PathBuf> {
    let dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
        .join("fluffy-display");
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Returns the config file path: `$FLUFFY_CONFIG` if set, else <config_dir>/config.toml
pub fn config_path() -> Result<PathBuf> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => Ok(PathBuf::from(path)),
        None => Ok(config_dir()?.join("config.toml")),
    }
}

/// Load config from disk, or return default if not found.
pub fn load_config() -> Result<AppConfig> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if path.exists() {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        info!(?path, displays = config.displays.len(), "Loaded config");
        Ok(config)
    } else {
        info!(?path, "No config found, using defaults");
        Ok(AppConfig::default())
    }
}

/// Save config to disk.
pub fn save_config(config: &AppConfig) -> Result<()> {
    save_config_to(&config_path()?, config)
}

pub fn save_config_to(path: &Path, config: &AppConfig) -> Result<()> {
    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(?path, "Saved config");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("fluffy-display-test-missing.toml");
        let _ = std::fs::remove_file(&path);
        let config = load_config_from(&path).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn save_then_load() {
        let path = std::env::temp_dir().join(format!(
            "fluffy-display-test-{}.toml",
            std::process::id()
        ));
        let mut config = AppConfig::default();
        config.host.max_displays = 3;
        config.displays.push(DisplaySpec {
            name: "Portrait".into(),
            width: 1080,
            height: 1920,
            ppi: 110,
            hi_dpi: false,
            rotation: 90,
        });

        save_config_to(&path, &config).unwrap();
        let loaded = load_config_from(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = std::env::temp_dir().join(format!(
            "fluffy-display-test-bad-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "host = 5").unwrap();
        let result = load_config_from(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(result.is_err());
    }
}
