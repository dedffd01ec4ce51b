//! Configuration loading and database path resolution

use crate::{Error, Result};
use std::path::PathBuf;

/// Environment variable checked for the database path
pub const DATABASE_ENV_VAR: &str = "ONAIR_DATABASE";

/// Database path resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file (`database_path` key)
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_database_path(cli_arg: Option<&str>) -> Result<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Ok(PathBuf::from(path));
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(DATABASE_ENV_VAR) {
        return Ok(PathBuf::from(path));
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = load_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(db_path) = config.get("database_path").and_then(|v| v.as_str()) {
                    return Ok(PathBuf::from(db_path));
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    Ok(default_database_path())
}

/// Get default configuration file path for the platform
fn load_config_file() -> Result<PathBuf> {
    let config_path = if cfg!(target_os = "linux") {
        // Try ~/.config/onair/config.toml first, then /etc/onair/config.toml
        let user_config = dirs::config_dir().map(|d| d.join("onair").join("config.toml"));
        let system_config = PathBuf::from("/etc/onair/config.toml");

        if let Some(path) = user_config {
            if path.exists() {
                return Ok(path);
            }
        }
        if system_config.exists() {
            return Ok(system_config);
        }
        return Err(Error::Config("No config file found".to_string()));
    } else if cfg!(target_os = "macos") || cfg!(target_os = "windows") {
        dirs::config_dir()
            .map(|d| d.join("onair").join("config.toml"))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?
    } else {
        return Err(Error::Config("Unsupported platform".to_string()));
    };

    if config_path.exists() {
        Ok(config_path)
    } else {
        Err(Error::Config(format!("Config file not found: {:?}", config_path)))
    }
}

/// Get OS-dependent default database path
fn default_database_path() -> PathBuf {
    let data_dir = if cfg!(target_os = "linux") || cfg!(target_os = "windows") {
        dirs::data_local_dir().map(|d| d.join("onair"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir().map(|d| d.join("onair"))
    } else {
        None
    };

    data_dir
        .unwrap_or_else(|| PathBuf::from("./onair_data"))
        .join("onair.db")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_cli_arg_takes_precedence() {
        std::env::set_var(DATABASE_ENV_VAR, "/tmp/onair-env.db");

        let path = resolve_database_path(Some("/tmp/onair-cli.db")).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/onair-cli.db"));

        std::env::remove_var(DATABASE_ENV_VAR);
    }

    #[test]
    #[serial]
    fn test_env_var_used_when_no_cli_arg() {
        std::env::set_var(DATABASE_ENV_VAR, "/tmp/onair-env.db");

        let path = resolve_database_path(None).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/onair-env.db"));

        std::env::remove_var(DATABASE_ENV_VAR);
    }

    #[test]
    #[serial]
    fn test_default_path_is_non_empty() {
        std::env::remove_var(DATABASE_ENV_VAR);

        let path = resolve_database_path(None).unwrap();
        assert!(!path.as_os_str().is_empty());
    }
}
