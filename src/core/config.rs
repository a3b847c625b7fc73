//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.shellnav/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::manager::ManagerOptions;
use crate::core::surface::{BarSide, MenuSide};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ShellConfig {
    #[serde(default)]
    pub transitions: TransitionConfig,
    #[serde(default)]
    pub shell: ShellLayoutConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TransitionConfig {
    /// Delay between attaching a surface and starting its animation.
    pub start_delay_ms: Option<u64>,
    /// How long the terminal host takes to play one animation.
    pub animation_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ShellLayoutConfig {
    pub menu_side: Option<MenuSide>,
    pub statusbar_side: Option<BarSide>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LogConfig {
    /// "off", "error", "warn", "info", "debug" or "trace".
    pub level: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_START_DELAY_MS: u64 = 50;
pub const DEFAULT_ANIMATION_MS: u64 = 300;
pub const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Debug;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub start_delay: Duration,
    pub animation: Duration,
    pub menu_side: MenuSide,
    pub statusbar_side: BarSide,
    pub log_level: log::LevelFilter,
}

impl ResolvedConfig {
    pub fn manager_options(&self) -> ManagerOptions {
        ManagerOptions {
            start_delay: self.start_delay,
            menu_side: self.menu_side,
            statusbar_side: self.statusbar_side,
        }
    }
}

/// Values given on the command line. `None` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub start_delay_ms: Option<u64>,
    pub animation_ms: Option<u64>,
    pub log_level: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.shellnav/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".shellnav").join("config.toml"))
}

/// Load config from `~/.shellnav/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ShellConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ShellConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ShellConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(ShellConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<ShellConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ShellConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# shellnav configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [transitions]
# start_delay_ms = 50        # Or SHELLNAV_START_DELAY_MS
# animation_ms = 300         # Or SHELLNAV_ANIMATION_MS

# [shell]
# menu_side = "left"         # "left" or "right"
# statusbar_side = "top"     # "top" or "bottom"

# [log]
# level = "debug"            # Or SHELLNAV_LOG_LEVEL
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ShellConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

fn resolve_with_env(
    config: &ShellConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    let env_ms = |key: &str| {
        env(key).and_then(|v| match v.trim().parse::<u64>() {
            Ok(ms) => Some(ms),
            Err(_) => {
                warn!("Ignoring {key}={v}: not a whole number of milliseconds");
                None
            }
        })
    };

    // Start delay: CLI → env → config → default
    let start_delay_ms = cli
        .start_delay_ms
        .or_else(|| env_ms("SHELLNAV_START_DELAY_MS"))
        .or(config.transitions.start_delay_ms)
        .unwrap_or(DEFAULT_START_DELAY_MS);

    // Animation length: CLI → env → config → default
    let animation_ms = cli
        .animation_ms
        .or_else(|| env_ms("SHELLNAV_ANIMATION_MS"))
        .or(config.transitions.animation_ms)
        .unwrap_or(DEFAULT_ANIMATION_MS);

    // Log level: CLI → env → config → default; unknown names fall back to default
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| env("SHELLNAV_LOG_LEVEL"))
        .or_else(|| config.log.level.clone())
        .map(|name| parse_level(&name))
        .unwrap_or(DEFAULT_LOG_LEVEL);

    ResolvedConfig {
        start_delay: Duration::from_millis(start_delay_ms),
        animation: Duration::from_millis(animation_ms),
        menu_side: config.shell.menu_side.unwrap_or_default(),
        statusbar_side: config.shell.statusbar_side.unwrap_or_default(),
        log_level,
    }
}

fn parse_level(name: &str) -> log::LevelFilter {
    name.trim().parse().unwrap_or_else(|_| {
        warn!("Unknown log level '{name}', using {DEFAULT_LOG_LEVEL}");
        DEFAULT_LOG_LEVEL
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&ShellConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.start_delay, Duration::from_millis(DEFAULT_START_DELAY_MS));
        assert_eq!(resolved.animation, Duration::from_millis(DEFAULT_ANIMATION_MS));
        assert_eq!(resolved.menu_side, MenuSide::Left);
        assert_eq!(resolved.statusbar_side, BarSide::Top);
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_config_values_override_defaults() {
        let config = ShellConfig {
            transitions: TransitionConfig {
                start_delay_ms: Some(16),
                animation_ms: Some(120),
            },
            shell: ShellLayoutConfig {
                menu_side: Some(MenuSide::Right),
                statusbar_side: Some(BarSide::Bottom),
            },
            log: LogConfig {
                level: Some("warn".to_string()),
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.start_delay, Duration::from_millis(16));
        assert_eq!(resolved.animation, Duration::from_millis(120));
        assert_eq!(resolved.menu_side, MenuSide::Right);
        assert_eq!(resolved.statusbar_side, BarSide::Bottom);
        assert_eq!(resolved.log_level, log::LevelFilter::Warn);

        let options = resolved.manager_options();
        assert_eq!(options.start_delay, Duration::from_millis(16));
        assert_eq!(options.menu_side, MenuSide::Right);
    }

    #[test]
    fn test_env_beats_config_and_cli_beats_env() {
        let config = ShellConfig {
            transitions: TransitionConfig {
                start_delay_ms: Some(16),
                animation_ms: None,
            },
            ..Default::default()
        };
        let env = |key: &str| match key {
            "SHELLNAV_START_DELAY_MS" => Some("30".to_string()),
            "SHELLNAV_ANIMATION_MS" => Some("soon".to_string()),
            _ => None,
        };

        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.start_delay, Duration::from_millis(30));
        // Unparseable env values are skipped.
        assert_eq!(resolved.animation, Duration::from_millis(DEFAULT_ANIMATION_MS));

        let cli = CliOverrides {
            start_delay_ms: Some(0),
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &cli, env);
        assert_eq!(resolved.start_delay, Duration::ZERO);
    }

    #[test]
    fn test_unknown_log_level_falls_back() {
        let cli = CliOverrides {
            log_level: Some("chatty".to_string()),
            ..Default::default()
        };
        let resolved = resolve_with_env(&ShellConfig::default(), &cli, no_env);
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[transitions]
start_delay_ms = 40
animation_ms = 250

[shell]
menu_side = "right"
statusbar_side = "bottom"

[log]
level = "info"
"#;
        let config: ShellConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.transitions.start_delay_ms, Some(40));
        assert_eq!(config.transitions.animation_ms, Some(250));
        assert_eq!(config.shell.menu_side, Some(MenuSide::Right));
        assert_eq!(config.shell.statusbar_side, Some(BarSide::Bottom));
        assert_eq!(config.log.level.as_deref(), Some("info"));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing; everything else stays default
        let toml_str = r#"
[shell]
menu_side = "right"
"#;
        let config: ShellConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.shell.menu_side, Some(MenuSide::Right));
        assert!(config.shell.statusbar_side.is_none());
        assert!(config.transitions.start_delay_ms.is_none());
        assert!(config.log.level.is_none());
    }

    #[test]
    fn test_bad_side_is_parse_error() {
        let toml_str = r#"
[shell]
menu_side = "up"
"#;
        assert!(toml::from_str::<ShellConfig>(toml_str).is_err());
    }
}
