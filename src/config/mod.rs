//! Configuration module for cafa-holdout.
//!
//! This module provides:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named evidence presets
//! - YAML config file loading and discovery
//!
//! # Configuration File
//!
//! Place a `.cafa-holdout.yaml` file in your working directory or
//! `~/.config/cafa-holdout/`:
//!
//! ```yaml
//! snapshots:
//!   base_path: /data/goa
//!   start: 214
//!   end: 225
//! evidence:
//!   preset: experimental
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    EvidencePreset, DEFAULT_END, DEFAULT_EVALUATOR_OUT_ROOT, DEFAULT_GROUND_TRUTH_DIR,
    DEFAULT_GT_ALL_DIR, DEFAULT_KNOWN_DIR, DEFAULT_START, DEFAULT_TOI_FILE,
};
pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, EvaluatorConfig, EvidenceConfig, OutputsConfig,
    SnapshotsConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.cafa-holdout.yaml` config files.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
