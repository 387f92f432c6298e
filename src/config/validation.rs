//! Configuration validation for cafa-holdout.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{
    AppConfig, BehaviorConfig, EvaluatorConfig, EvidenceConfig, OutputsConfig, SnapshotsConfig,
};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.snapshots.validate());
        errors.extend(self.outputs.validate());
        errors.extend(self.evidence.validate());
        errors.extend(self.behavior.validate());
        errors.extend(self.evaluator.validate());
        errors
    }
}

impl Validatable for SnapshotsConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.end < self.start {
            errors.push(ConfigError::new(
                "snapshots.end",
                format!(
                    "end ({}) must be greater than or equal to start ({})",
                    self.end, self.start
                ),
            ));
        }
        if self.end == u32::MAX {
            errors.push(ConfigError::new(
                "snapshots.end",
                "end must leave room for snapshot end+1",
            ));
        }
        if self.base_path.as_os_str().is_empty() {
            errors.push(ConfigError::new("snapshots.base_path", "must not be empty"));
        }
        errors
    }
}

impl Validatable for OutputsConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        for (field, dir) in [
            ("outputs.known_dir", &self.known_dir),
            ("outputs.gt_all_dir", &self.gt_all_dir),
            ("outputs.ground_truth_dir", &self.ground_truth_dir),
        ] {
            if dir.as_os_str().is_empty() {
                errors.push(ConfigError::new(field, "must not be empty"));
            }
        }
        errors
    }
}

impl Validatable for EvidenceConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.codes.as_ref().is_some_and(|codes| codes.is_empty()) {
            errors.push(ConfigError::new(
                "evidence.codes",
                "at least one evidence code is required",
            ));
        }
        errors
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        Vec::new()
    }
}

impl Validatable for EvaluatorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.entry.trim().is_empty() {
            errors.push(ConfigError::new(
                "evaluator.entry",
                "must be 'module' or a script path",
            ));
        }
        if self.python.trim().is_empty() {
            errors.push(ConfigError::new("evaluator.python", "must not be empty"));
        }
        if self.threads == 0 {
            errors.push(ConfigError::new("evaluator.threads", "must be at least 1"));
        }
        if !(self.th_step > 0.0 && self.th_step <= 1.0) {
            errors.push(ConfigError::new(
                "evaluator.th_step",
                format!("must be in (0, 1], got {}", self.th_step),
            ));
        }
        if self.max_terms == 0 {
            errors.push(ConfigError::new("evaluator.max_terms", "must be at least 1"));
        }
        let valid_props = ["max", "fill"];
        if !valid_props.contains(&self.prop.as_str()) {
            errors.push(ConfigError::new(
                "evaluator.prop",
                format!(
                    "Invalid propagation '{}'. Valid options: {}",
                    self.prop,
                    valid_props.join(", ")
                ),
            ));
        }
        let valid_norms = ["cafa", "pred", "gt"];
        if !valid_norms.contains(&self.norm.as_str()) {
            errors.push(ConfigError::new(
                "evaluator.norm",
                format!(
                    "Invalid normalization '{}'. Valid options: {}",
                    self.norm,
                    valid_norms.join(", ")
                ),
            ));
        }
        errors
    }
}
