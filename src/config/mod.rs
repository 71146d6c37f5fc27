// src/config/mod.rs

//! Configuration loading and validation for testwatch.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Locate and load the config file (`loader.rs`).
//! - Validate criteria patterns and run settings (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_config, load_from_path, load_or_default};
pub use model::{ConfigFile, LogSection, RawConfigFile, RunSection, WatchSection};
pub use validate::validate_config;
