//! Configuration loading and assets root resolution

use crate::{Error, Result};
use std::path::PathBuf;

/// Assets root resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_assets_root(cli_arg: Option<&str>, env_var_name: &str) -> Result<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Ok(PathBuf::from(path));
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        return Ok(PathBuf::from(path));
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = locate_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(root) = config.get("assets_root").and_then(|v| v.as_str()) {
                    return Ok(PathBuf::from(root));
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    Ok(default_assets_root())
}

/// Read an optional string key from the TOML config file, if one exists
pub fn config_file_string(key: &str) -> Option<String> {
    let config_path = locate_config_file().ok()?;
    let toml_content = std::fs::read_to_string(&config_path).ok()?;
    let config = toml::from_str::<toml::Value>(&toml_content).ok()?;
    config.get(key).and_then(|v| v.as_str()).map(String::from)
}

/// Get the configuration file path for the platform
fn locate_config_file() -> Result<PathBuf> {
    if cfg!(target_os = "linux") {
        // Try ~/.config/hush/config.toml first, then /etc/hush/config.toml
        if let Some(path) = dirs::config_dir().map(|d| d.join("hush").join("config.toml")) {
            if path.exists() {
                return Ok(path);
            }
        }
        let system_config = PathBuf::from("/etc/hush/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
        Err(Error::Config("No config file found".to_string()))
    } else {
        let path = dirs::config_dir()
            .map(|d| d.join("hush").join("config.toml"))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;
        if path.exists() {
            Ok(path)
        } else {
            Err(Error::Config(format!("Config file not found: {:?}", path)))
        }
    }
}

/// Get the OS-dependent default assets root
fn default_assets_root() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("hush").join("assets"))
        .unwrap_or_else(|| PathBuf::from("./hush_assets"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_argument_wins() {
        let root = resolve_assets_root(Some("/tmp/hush-test"), "HUSH_TEST_UNSET_VAR").unwrap();
        assert_eq!(root, PathBuf::from("/tmp/hush-test"));
    }

    #[test]
    fn env_var_beats_defaults() {
        std::env::set_var("HUSH_TEST_ASSETS_ROOT", "/tmp/hush-env");
        let root = resolve_assets_root(None, "HUSH_TEST_ASSETS_ROOT").unwrap();
        assert_eq!(root, PathBuf::from("/tmp/hush-env"));
        std::env::remove_var("HUSH_TEST_ASSETS_ROOT");
    }
}
