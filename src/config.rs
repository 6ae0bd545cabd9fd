//! Configuration loader for the `crop-advisor` service.
//!
//! All runtime settings and their defaults live here, read from environment
//! variables (the caller loads any `.env` file first). Logging variables
//! are read by `init_tracing` in `main.rs` instead.

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

/// Parse an optional environment variable into `$ty`, falling back to a default.
macro_rules! parse_env_or {
    ($var_name:expr, $ty:ty, $default:expr) => {
        parse_env_opt!($var_name, $ty).unwrap_or($default)
    };
}

/// Parse an optional environment variable into `Option<$ty>`.
macro_rules! parse_env_opt {
    ($var_name:expr, $ty:ty) => {
        env::var($var_name)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.trim().parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
    };
}

/// Strongly typed application configuration.
///
/// Immutable after loading; every component sees the same snapshot.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Interface the HTTP server binds to.
    pub bind_addr: String,

    /// TCP port for the HTTP server.
    pub port: u16,

    /// Classifier artifact to load at startup. `None` means rule fallback only.
    pub model_path: Option<PathBuf>,

    /// Seed for the yield variance generator. `None` draws from the
    /// thread-local generator.
    pub yield_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: 8000,
            model_path: None,
            yield_seed: None,
        }
    }
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `BIND_ADDR` – listen interface (default: `0.0.0.0`)
/// - `PORT` – listen port (default: 8000)
/// - `MODEL_PATH` – JSON classifier artifact (default: none, rule fallback)
/// - `YIELD_SEED` – fixed seed for yield variance (default: unseeded)
///
/// Returns an error if a numeric variable does not parse.
pub fn load_from_env() -> Result<Config> {
    // ---
    let defaults = Config::default();

    let bind_addr = env::var("BIND_ADDR")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(defaults.bind_addr);
    let port = parse_env_or!("PORT", u16, defaults.port);
    let model_path = env::var_os("MODEL_PATH")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);
    let yield_seed = parse_env_opt!("YIELD_SEED", u64);

    Ok(Config {
        bind_addr,
        port,
        model_path,
        yield_seed,
    })
}

impl Config {
    /// `host:port` string for the listener.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Log the loaded configuration.
    pub fn log_config(&self) {
        // ---
        let model = self
            .model_path
            .as_ref()
            .map_or_else(|| "<none, rule fallback>".to_string(), |p| p.display().to_string());
        let seed = self
            .yield_seed
            .map_or_else(|| "<unseeded>".to_string(), |s| s.to_string());

        tracing::info!("Configuration loaded:");
        tracing::info!("  BIND_ADDR  : {}", self.bind_addr);
        tracing::info!("  PORT       : {}", self.port);
        tracing::info!("  MODEL_PATH : {}", model);
        tracing::info!("  YIELD_SEED : {}", seed);
    }
}
