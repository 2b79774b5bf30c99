//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.fuelmap/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::fuel::FuelType;
use crate::core::station::Position;
use crate::core::view::ViewMode;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FuelmapConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub location: LocationConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Fuel label ("Unleaded 91", "diesel", "95"...) or "none".
    pub default_fuel: Option<String>,
    pub start_view: Option<ViewMode>,
    pub refresh_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub radius_m: Option<u32>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LocationConfig {
    /// Fixed device position. Leave unset when the position is unknown.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub default_latitude: Option<f64>,
    pub default_longitude: Option<f64>,
    pub timeout_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_API_BASE_URL: &str = "http://172.20.10.3:5002/api/v1/gas-stations";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_RADIUS_M: u32 = 5000;
pub const DEFAULT_LOCATION_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_LATITUDE: f64 = -43.525225162129644;
pub const DEFAULT_LONGITUDE: f64 = 172.6429555627193;
pub const DEFAULT_FUEL: FuelType = FuelType::Unleaded91;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub api_base_url: String,
    pub api_timeout_secs: u64,
    pub radius_m: u32,
    /// Used whenever the device position can't be obtained.
    pub default_position: Position,
    pub device_position: Option<Position>,
    pub location_timeout_secs: u64,
    pub fuel: Option<FuelType>,
    pub start_view: ViewMode,
    pub refresh_secs: Option<u64>,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub api_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub fuel: Option<FuelType>,
    pub ranked: bool,
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

/// Returns `~/.fuelmap`.
pub fn fuelmap_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".fuelmap"))
}

/// Returns the path to `~/.fuelmap/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    fuelmap_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.fuelmap/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `FuelmapConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<FuelmapConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(FuelmapConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(FuelmapConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<FuelmapConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: FuelmapConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# fuelmap configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_fuel = "Unleaded 91"       # "Unleaded 91", "Unleaded 95", "Unleaded 98", "Diesel" or "none"
# start_view = "spatial"             # "spatial" (map) or "ranked" (price list)
# refresh_secs = 60                  # Periodic refetch; omit to refresh only on demand

# [api]
# base_url = "http://172.20.10.3:5002/api/v1/gas-stations"   # Or set FUELMAP_API_URL
# timeout_secs = 15
# radius_m = 5000

# [location]
# latitude = -43.5321                # Device position; or FUELMAP_POSITION="lat,lng"
# longitude = 172.6362
# default_latitude = -43.525225162129644
# default_longitude = 172.6429555627193
# timeout_secs = 5
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &FuelmapConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// [`resolve`] with the environment supplied by `env`.
pub fn resolve_with_env<F>(config: &FuelmapConfig, cli: &CliOverrides, env: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    // Endpoint: CLI → env → config → default
    let api_base_url = cli
        .api_url
        .clone()
        .or_else(|| env("FUELMAP_API_URL"))
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    // Device position: CLI → env → config → none
    let device_position = pair(cli.latitude, cli.longitude, "command line")
        .or_else(|| {
            env("FUELMAP_POSITION").and_then(|raw| parse_position(&raw))
        })
        .or_else(|| {
            pair(
                config.location.latitude,
                config.location.longitude,
                "config location",
            )
        });

    let default_position = pair(
        config.location.default_latitude,
        config.location.default_longitude,
        "config default location",
    )
    .unwrap_or(Position {
        latitude: DEFAULT_LATITUDE,
        longitude: DEFAULT_LONGITUDE,
    });

    // Fuel: CLI → config → default
    let fuel = match cli.fuel {
        Some(fuel) => Some(fuel),
        None => resolve_fuel(config.general.default_fuel.as_deref()),
    };

    let start_view = if cli.ranked {
        ViewMode::Ranked
    } else {
        config.general.start_view.unwrap_or_default()
    };

    ResolvedConfig {
        api_base_url,
        api_timeout_secs: config.api.timeout_secs.unwrap_or(DEFAULT_API_TIMEOUT_SECS),
        radius_m: config.api.radius_m.unwrap_or(DEFAULT_RADIUS_M),
        default_position,
        device_position,
        location_timeout_secs: config
            .location
            .timeout_secs
            .unwrap_or(DEFAULT_LOCATION_TIMEOUT_SECS),
        fuel,
        start_view,
        refresh_secs: config.general.refresh_secs.filter(|secs| *secs > 0),
    }
}

/// Parses "lat,lng". Returns `None` (with a warning) for anything else.
pub fn parse_position(raw: &str) -> Option<Position> {
    let parsed = raw.split_once(',').and_then(|(lat, lng)| {
        let lat = lat.trim().parse::<f64>().ok()?;
        let lng = lng.trim().parse::<f64>().ok()?;
        Position::new(lat, lng)
    });
    if parsed.is_none() {
        warn!("Ignoring unparseable position {:?}", raw);
    }
    parsed
}

fn pair(latitude: Option<f64>, longitude: Option<f64>, origin: &str) -> Option<Position> {
    match (latitude, longitude) {
        (Some(lat), Some(lng)) => {
            let position = Position::new(lat, lng);
            if position.is_none() {
                warn!("Ignoring non-finite position from {}", origin);
            }
            position
        }
        (None, None) => None,
        _ => {
            warn!("Ignoring {}: latitude and longitude must both be set", origin);
            None
        }
    }
}

/// "none" clears the selection; unknown labels fall back to the default fuel.
fn resolve_fuel(raw: Option<&str>) -> Option<FuelType> {
    match raw {
        None => Some(DEFAULT_FUEL),
        Some(value) if value.trim().eq_ignore_ascii_case("none") => None,
        Some(value) => match value.parse::<FuelType>() {
            Ok(fuel) => Some(fuel),
            Err(e) => {
                warn!("{}, using {}", e, DEFAULT_FUEL);
                Some(DEFAULT_FUEL)
            }
        },
    }
}
