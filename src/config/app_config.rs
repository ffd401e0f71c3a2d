//! Application configuration: search-range defaults, market-context
//! defaults, server address, and the model artifact path.
//!
//! Every struct implements `Default` with values matching the original
//! simulator settings, so behavior is unchanged when no config file is
//! present.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{info, warn};

/// Root configuration for a pricing-advisor deployment.
///
/// Load with `AppConfig::load()` which searches:
/// 1. `$PRICEWISE_CONFIG` env var
/// 2. `./pricewise.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Grid-search defaults
    #[serde(default)]
    pub optimizer: OptimizerConfig,

    /// Demand model artifact location
    #[serde(default)]
    pub model: ModelConfig,

    /// Market-context defaults for one-shot simulations
    #[serde(default)]
    pub market: MarketDefaults,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            optimizer: OptimizerConfig::default(),
            model: ModelConfig::default(),
            market: MarketDefaults::default(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the dashboard API
    #[serde(default = "default_server_addr")]
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_server_addr(),
        }
    }
}

fn default_server_addr() -> String {
    "0.0.0.0:8080".to_string()
}

/// Default price search range, overridable per request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Lowest candidate base price ($)
    #[serde(default = "default_price_min")]
    pub price_min: f64,
    /// Highest candidate base price ($)
    #[serde(default = "default_price_max")]
    pub price_max: f64,
    /// Grid spacing ($)
    #[serde(default = "default_step")]
    pub step: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            price_min: default_price_min(),
            price_max: default_price_max(),
            step: default_step(),
        }
    }
}

fn default_price_min() -> f64 {
    10.0
}
fn default_price_max() -> f64 {
    500.0
}
fn default_step() -> f64 {
    5.0
}

/// Demand model artifact settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Path to the exported linear-regression JSON artifact.
    /// When unset, the built-in demo model is used.
    #[serde(default)]
    pub artifact_path: Option<PathBuf>,
}

/// Market-context defaults mirroring the original simulator's input state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MarketDefaults {
    /// Competitor price preset ($)
    #[serde(default = "default_competitor_price")]
    pub competitor_price: f64,
    /// Inventory preset (units)
    #[serde(default = "default_inventory")]
    pub inventory: u32,
}

impl Default for MarketDefaults {
    fn default() -> Self {
        Self {
            competitor_price: default_competitor_price(),
            inventory: default_inventory(),
        }
    }
}

fn default_competitor_price() -> f64 {
    250.0
}
fn default_inventory() -> u32 {
    100
}

impl AppConfig {
    /// Load configuration using the standard search order:
    /// 1. `$PRICEWISE_CONFIG` environment variable
    /// 2. `./pricewise.toml` in the current working directory
    /// 3. Built-in defaults (original simulator settings)
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("PRICEWISE_CONFIG") {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded config from PRICEWISE_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from PRICEWISE_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "PRICEWISE_CONFIG points to non-existent file, falling back");
            }
        }

        let local = PathBuf::from("pricewise.toml");
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded config from ./pricewise.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./pricewise.toml, using defaults");
                }
            }
        }

        info!("No pricewise.toml found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config: Self =
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validate the loaded values for internal consistency.
    ///
    /// Rules:
    /// - Search bounds must be finite with `price_min < price_max`
    /// - Step must be positive and finite
    /// - Market presets must be usable by the model (positive competitor price)
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();
        let o = &self.optimizer;

        if !o.price_min.is_finite() || !o.price_max.is_finite() || !o.step.is_finite() {
            errors.push(format!(
                "optimizer: bounds must be finite (got price_min={}, price_max={}, step={})",
                o.price_min, o.price_max, o.step
            ));
        } else {
            if o.price_min >= o.price_max {
                errors.push(format!(
                    "optimizer: price_min ({}) must be below price_max ({})",
                    o.price_min, o.price_max
                ));
            }
            if o.step <= 0.0 {
                errors.push(format!("optimizer: step ({}) must be positive", o.step));
            }
        }

        if !self.market.competitor_price.is_finite() || self.market.competitor_price <= 0.0 {
            errors.push(format!(
                "market: competitor_price ({}) must be a positive number",
                self.market.competitor_price
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Active Config
// ============================================================================

/// Configuration installed for the lifetime of the process.
static ACTIVE_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Built-in defaults handed out when nothing was installed (tests, tools).
static DEFAULT_CONFIG: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// Install this configuration as the process-wide active config and
    /// announce the search setup it pins down. The first install wins;
    /// later calls keep the active config and log what was rejected.
    pub fn install(self) -> &'static Self {
        let optimizer = self.optimizer;
        let artifact = self.model.artifact_path.clone();
        match ACTIVE_CONFIG.set(self) {
            Ok(()) => info!(
                price_min = optimizer.price_min,
                price_max = optimizer.price_max,
                step = optimizer.step,
                artifact = %artifact
                    .as_deref()
                    .map_or_else(|| "builtin".to_string(), |p| p.display().to_string()),
                "Configuration installed"
            ),
            Err(_) => warn!("Configuration already installed; keeping the active one"),
        }
        Self::active()
    }

    /// The active configuration, falling back to built-in defaults when
    /// nothing was installed.
    pub fn active() -> &'static Self {
        ACTIVE_CONFIG
            .get()
            .unwrap_or_else(|| DEFAULT_CONFIG.get_or_init(Self::default))
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_original_simulator() {
        let config = AppConfig::default();
        assert_eq!(config.optimizer.price_min, 10.0);
        assert_eq!(config.optimizer.price_max, 500.0);
        assert_eq!(config.optimizer.step, 5.0);
        assert_eq!(config.market.competitor_price, 250.0);
        assert_eq!(config.market.inventory, 100);
        assert!(config.model.artifact_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
[optimizer]
step = 2.5

[server]
addr = "127.0.0.1:9090"
"#,
        )
        .unwrap();
        assert_eq!(config.optimizer.step, 2.5);
        assert_eq!(config.optimizer.price_min, 10.0);
        assert_eq!(config.server.addr, "127.0.0.1:9090");
    }

    #[test]
    fn inverted_range_fails_validation() {
        let mut config = AppConfig::default();
        config.optimizer.price_min = 600.0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("price_min"));
    }

    #[test]
    fn zero_step_fails_validation() {
        let mut config = AppConfig::default();
        config.optimizer.step = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pricewise.toml");
        let config = AppConfig::default();
        std::fs::write(&path, config.to_toml().unwrap()).unwrap();

        let loaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.optimizer.price_max, config.optimizer.price_max);
        assert_eq!(loaded.server.addr, config.server.addr);
    }

    #[test]
    fn active_falls_back_to_builtin_defaults() {
        // Nothing installs a config in this test binary, so the fallback
        // path must hand out the stock search setup.
        let active = AppConfig::active();
        assert_eq!(active.optimizer.price_min, 10.0);
        assert_eq!(active.optimizer.price_max, 500.0);
        assert_eq!(active.optimizer.step, 5.0);
    }

    #[test]
    fn invalid_file_surfaces_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pricewise.toml");
        std::fs::write(&path, "optimizer = \"not a table\"").unwrap();
        let err = AppConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(..)));
    }
}
