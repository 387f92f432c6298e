//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".cafa-holdout.yaml",
    ".cafa-holdout.yml",
    "cafa-holdout.yaml",
    "cafa-holdout.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/cafa-holdout/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    let cwd = std::env::current_dir().ok();
    let search_dirs = [
        cwd.clone(),
        cwd.as_deref().and_then(find_git_root),
        dirs::config_dir().map(|dir| dir.join("cafa-holdout")),
        dirs::home_dir(),
    ];

    search_dirs
        .iter()
        .flatten()
        .find_map(|dir| find_config_in_dir(dir))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up from `start`.
fn find_git_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    /// File not found
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// IO error reading file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// YAML parsing error
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
///
/// An explicit path that cannot be read is an error; a discovered file that
/// fails to parse is logged and ignored.
pub fn load_or_default(
    explicit_path: Option<&Path>,
) -> Result<(AppConfig, Option<PathBuf>), ConfigFileError> {
    if let Some(path) = explicit_path {
        return load_config_file(path).map(|config| (config, Some(path.to_path_buf())));
    }

    Ok(discover_config_file(None).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    ))
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# cafa-holdout configuration
# Place this file at .cafa-holdout.yaml in your working directory or ~/.config/cafa-holdout/

{}",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# cafa-holdout configuration file
# ================================
#
# Place it at:
#   - .cafa-holdout.yaml in the directory you run from
#   - ~/.config/cafa-holdout/cafa-holdout.yaml for a per-user default
#
# Command-line flags take precedence over values in this file.

# Snapshot location and range
snapshots:
  # Directory with goa_uniprot_all_subset.N.tsv files, either directly or
  # under goa_uniprot_all.gaf.N/
  base_path: .
  # Pairs (N, N+1) are built for every N in [start, end]
  start: 214
  end: 225

# Output directories (created when missing)
outputs:
  known_dir: known               # known.N.tsv
  gt_all_dir: gt_all             # gt_all.N+1.tsv
  ground_truth_dir: ground_truth # ground_truth.N_N+1.tsv

# Evidence codes accepted as curated
evidence:
  # curated | experimental | high-throughput
  preset: curated
  # Explicit list; overrides preset when present
  # codes: [EXP, IDA, IPI, IMP, IGI, IEP]

behavior:
  # Build pairs on all cores
  parallel: false
  # Exit with status 2 when any pair fails
  fail_on_pair_error: false

# External CAFA evaluator
evaluator:
  # 'module' runs `python -m cafaeval`; anything else is a script path
  entry: module
  python: python3
  threads: 4
  th_step: 0.01
  max_terms: 500
  prop: fill
  norm: cafa
  no_orphans: true
  out_root: results_submission_delta
"
    .to_string()
}
