use std::collections::HashMap;
use std::env::var;
use std::path::Path;
use std::time::Duration;

use depthchart_store::LeagueCatalog;
use dotenvy::dotenv;
use serde::Deserialize;
use thiserror::Error;

/// Application configuration with environment variable overrides
#[derive(Debug, Clone)]
pub struct Config {
    /// Request body size limit in bytes
    /// Env: REQUEST_BODY_LIMIT (default: 65536 = 64KB)
    pub request_body_limit: usize,

    /// Request timeout in seconds
    /// Env: REQUEST_TIMEOUT_SECS (default: 30)
    pub request_timeout: Duration,

    /// Server port
    /// Env: PORT (default: 3000)
    pub port: u16,

    /// League catalog file
    /// Env: CATALOG_PATH (default: "catalog.json")
    /// Falls back to the built-in NFL catalog when the file does not exist
    pub catalog_path: String,

    /// Root of the depth chart files loaded at startup (<dir>/<league>/<file>.json)
    /// Env: DATA_DIR (default: "data")
    pub data_dir: String,

    /// Rate limit for add/remove endpoints (requests per second)
    /// Env: RATE_LIMIT_WRITE_PER_SEC (default: 20)
    pub rate_limit_write_per_sec: u64,

    /// Burst size for add/remove endpoints
    /// Env: RATE_LIMIT_WRITE_BURST (default: 40)
    pub rate_limit_write_burst: u32,

    /// Rate limit for chart and backup queries (requests per second)
    /// Env: RATE_LIMIT_READ_PER_SEC (default: 50)
    pub rate_limit_read_per_sec: u64,

    /// Burst size for chart and backup queries
    /// Env: RATE_LIMIT_READ_BURST (default: 100)
    pub rate_limit_read_burst: u32,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let _ = dotenv(); //for local runs mostly
        let defaults = Self::default();
        Self {
            request_body_limit: env_or_default("REQUEST_BODY_LIMIT", defaults.request_body_limit),
            request_timeout: Duration::from_secs(env_or_default(
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )),
            port: env_or_default("PORT", defaults.port),
            catalog_path: env_or_default_string("CATALOG_PATH", &defaults.catalog_path),
            data_dir: env_or_default_string("DATA_DIR", &defaults.data_dir),
            rate_limit_write_per_sec: env_or_default(
                "RATE_LIMIT_WRITE_PER_SEC",
                defaults.rate_limit_write_per_sec,
            ),
            rate_limit_write_burst: env_or_default(
                "RATE_LIMIT_WRITE_BURST",
                defaults.rate_limit_write_burst,
            ),
            rate_limit_read_per_sec: env_or_default(
                "RATE_LIMIT_READ_PER_SEC",
                defaults.rate_limit_read_per_sec,
            ),
            rate_limit_read_burst: env_or_default(
                "RATE_LIMIT_READ_BURST",
                defaults.rate_limit_read_burst,
            ),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            request_body_limit: 64 * 1024,
            request_timeout: Duration::from_secs(30),
            port: 3000,
            catalog_path: "catalog.json".to_string(),
            data_dir: "data".to_string(),
            rate_limit_write_per_sec: 20,
            rate_limit_write_burst: 40,
            rate_limit_read_per_sec: 50,
            rate_limit_read_burst: 100,
        }
    }
}

/// Parse environment variable or return default value
fn env_or_default<T: std::str::FromStr>(key: &str, default: T) -> T {
    var(key)
        .ok()
        .and_then(|val| val.parse().ok())
        .unwrap_or(default)
}

/// Parse environment variable string or return default value
fn env_or_default_string(key: &str, default: &str) -> String {
    var(key).unwrap_or_else(|_| default.to_string())
}

#[derive(Debug, Error)]
pub enum CatalogConfigError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog file defines no leagues")]
    Empty,
}

/// On-disk catalog layout:
/// `{"leagues": {"NFL": {"teams": [...], "positions": [...]}}}`
#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    pub leagues: HashMap<String, LeagueConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LeagueConfig {
    #[serde(default)]
    pub teams: Vec<String>,
    #[serde(default)]
    pub positions: Vec<String>,
}

impl CatalogConfig {
    pub fn from_json(json: &str) -> Result<Self, CatalogConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn into_catalog(self) -> Result<LeagueCatalog, CatalogConfigError> {
        let catalog = self
            .leagues
            .into_iter()
            .fold(LeagueCatalog::new(), |catalog, (name, league)| {
                catalog.with_league(&name, league.teams, league.positions)
            });
        if catalog.league_count() == 0 {
            return Err(CatalogConfigError::Empty);
        }
        Ok(catalog)
    }
}

/// Load the league catalog from `path`, or the built-in one if the file is missing.
pub async fn load_catalog(path: impl AsRef<Path>) -> Result<LeagueCatalog, CatalogConfigError> {
    let path = path.as_ref();
    match tokio::fs::read_to_string(path).await {
        Ok(json) => {
            let catalog = CatalogConfig::from_json(&json)?.into_catalog()?;
            tracing::info!(
                path = %path.display(),
                leagues = catalog.league_count(),
                "loaded league catalog"
            );
            Ok(catalog)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "catalog file not found, using built-in NFL catalog");
            Ok(default_catalog())
        }
        Err(e) => Err(e.into()),
    }
}

pub const NFL_TEAMS: [&str; 32] = [
    "ARI", "ATL", "BAL", "BUF", "CAR", "CHI", "CIN", "CLE", "DAL", "DEN", "DET", "GB", "HOU",
    "IND", "JAX", "KC", "LAC", "LAR", "LV", "MIA", "MIN", "NE", "NO", "NYG", "NYJ", "PHI", "PIT",
    "SEA", "SF", "TB", "TEN", "WAS",
];

pub const NFL_POSITIONS: [&str; 25] = [
    "QB", "RB", "FB", "WR", "LWR", "RWR", "SWR", "TE", "LT", "LG", "C", "RG", "RT", "DE", "DT",
    "NT", "LB", "MLB", "OLB", "CB", "S", "FS", "SS", "K", "P",
];

/// Catalog used when no catalog file is configured.
pub fn default_catalog() -> LeagueCatalog {
    LeagueCatalog::new().with_league("NFL", NFL_TEAMS, NFL_POSITIONS)
}
