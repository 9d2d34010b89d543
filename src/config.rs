// src/config.rs
use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::Coordinates;

#[derive(Debug)]
pub enum ConfigError {
    Invalid { var: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid { var, value } => {
                write!(f, "Invalid value for {var}: {value:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Everything the browser needs from the outside world.
/// None of it is part of the core state machine.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    /// Base URL of the listings/places REST API, without trailing slash.
    pub backend_url: String,
    pub map_api_key: String,
    pub map_style_id: String,
    pub default_center: Coordinates,
    pub default_zoom: u8,
    pub listings_limit: u32,
    pub http_timeout: Duration,
    /// Directory holding files served as-is, such as `htmx.min.js`.
    pub static_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            max_workers: 8,
            backend_url: "http://localhost:5001".to_string(),
            map_api_key: String::new(),
            map_style_id: String::new(),
            default_center: Coordinates {
                lat: 30.2672,
                lng: -97.7431,
            },
            default_zoom: 12,
            listings_limit: 100,
            http_timeout: Duration::from_secs(30),
            static_dir: PathBuf::from("static"),
        }
    }
}

impl AppConfig {
    /// Read configuration from the environment, falling back to defaults
    /// for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let backend_url = lookup("BACKEND_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.backend_url);

        Ok(Self {
            bind_addr: parse_var(&lookup, "BIND_ADDR", defaults.bind_addr)?,
            max_workers: parse_var(&lookup, "MAX_WORKERS", defaults.max_workers)?,
            backend_url,
            map_api_key: lookup("GOOGLE_MAPS_API_KEY").unwrap_or_default(),
            map_style_id: lookup("GOOGLE_MAPS_MAP_ID").unwrap_or_default(),
            default_center: Coordinates {
                lat: parse_var(&lookup, "DEFAULT_LAT", defaults.default_center.lat)?,
                lng: parse_var(&lookup, "DEFAULT_LNG", defaults.default_center.lng)?,
            },
            default_zoom: parse_var(&lookup, "DEFAULT_ZOOM", defaults.default_zoom)?,
            listings_limit: parse_var(&lookup, "LISTINGS_LIMIT", defaults.listings_limit)?,
            http_timeout: Duration::from_secs(parse_var(
                &lookup,
                "HTTP_TIMEOUT_SECS",
                defaults.http_timeout.as_secs(),
            )?),
            static_dir: lookup("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
        })
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
    }
}
