//! Application configuration.
//!
//! TOML-backed settings for the search range, market presets, server
//! address, and model artifact, plus the process-wide active config
//! (`AppConfig::install()` / `AppConfig::active()`). Loading order and
//! validation rules live with [`AppConfig`].

mod app_config;

pub use app_config::*;
