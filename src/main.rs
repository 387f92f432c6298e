//! cafa-holdout: temporal holdout builder for CAFA-style benchmarks
//!
//! Builds known / ground-truth sets from consecutive GO annotation snapshots
//! and drives the external evaluator over them.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use cafa_holdout::{
    cli::{self, BuildCommand, BuildOverrides, EvaluateCommand, TermsCommand},
    config::{self, AppConfig, EvidencePreset, DEFAULT_TOI_FILE},
    pipeline::EvaluationInputs,
    reports::ReportFormat,
};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cafa-holdout")]
#[command(version)]
#[command(about = "Temporal holdout builder for CAFA-style protein function benchmarks", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success (pair failures are reported but tolerated)
    1  Fatal error (invalid range, configuration or inputs)
    2  At least one pair failed and --fail-on-pair-error was set

EXAMPLES:
    # Build holdout sets for snapshots 214..=225 under ./goa
    cafa-holdout build --base-path goa --start 214 --end 225

    # Terms of interest from every gt_all file
    cafa-holdout terms --gt-all-dir gt_all

    # Evaluate a submission on the built pairs
    cafa-holdout evaluate --ontology go-basic.obo --start 214 --end 225 --toi terms_of_interest.txt")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Arguments for the `build` subcommand
#[derive(Parser)]
struct BuildArgs {
    /// Directory containing the snapshot files (flat or goa_uniprot_all.gaf.N/ layout)
    #[arg(long)]
    base_path: Option<PathBuf>,

    /// First snapshot index N
    #[arg(long)]
    start: Option<u32>,

    /// Last snapshot index N (the last pair is N → N+1)
    #[arg(long)]
    end: Option<u32>,

    /// Output directory for known.N.tsv
    #[arg(long)]
    out_known_dir: Option<PathBuf>,

    /// Output directory for gt_all.N+1.tsv
    #[arg(long)]
    out_gtall_dir: Option<PathBuf>,

    /// Output directory for ground_truth.N_N+1.tsv
    #[arg(long)]
    out_gtnew_dir: Option<PathBuf>,

    /// Comma-separated evidence codes (overrides the preset)
    #[arg(long, conflicts_with = "evidence_preset")]
    evidence_codes: Option<String>,

    /// Named evidence code set
    #[arg(long, value_enum)]
    evidence_preset: Option<EvidencePreset>,

    /// Process pairs in parallel
    #[arg(long)]
    parallel: bool,

    /// Exit with code 2 if any pair fails
    #[arg(long)]
    fail_on_pair_error: bool,

    /// Summary output format
    #[arg(short, long, default_value = "summary")]
    output: ReportFormat,

    /// Also write the run report as JSON to this file
    #[arg(long)]
    report_file: Option<PathBuf>,
}

/// Arguments for the `terms` subcommand
#[derive(Parser)]
struct TermsArgs {
    /// Directory containing gt_all.N.tsv files
    #[arg(long)]
    gt_all_dir: Option<PathBuf>,

    /// Output file, one term per line
    #[arg(short, long, default_value = DEFAULT_TOI_FILE)]
    output: PathBuf,

    /// Keep the BP/MF/CC root terms
    #[arg(long)]
    keep_roots: bool,
}

/// Arguments for the `evaluate` subcommand
#[derive(Parser)]
struct EvaluateArgs {
    /// Ontology file in OBO format (e.g. go-basic.obo)
    #[arg(long)]
    ontology: PathBuf,

    /// First snapshot index N
    #[arg(long)]
    start: Option<u32>,

    /// Last snapshot index N
    #[arg(long)]
    end: Option<u32>,

    /// Directory with the submission's .tsv prediction files
    #[arg(long, default_value = "submission")]
    submission_dir: PathBuf,

    /// Directory with ground_truth.N_N+1.tsv (defaults to outputs.ground_truth_dir)
    #[arg(long)]
    gtdelta_dir: Option<PathBuf>,

    /// Directory with known.N.tsv (defaults to outputs.known_dir)
    #[arg(long)]
    known_dir: Option<PathBuf>,

    /// Terms-of-interest file
    #[arg(long)]
    toi: Option<PathBuf>,

    /// Information accretion file
    #[arg(long)]
    ia: Option<PathBuf>,

    /// Root directory for per-pair results
    #[arg(long)]
    out_root: Option<PathBuf>,

    /// 'module' to run `python -m cafaeval`, or a path to the evaluator script
    #[arg(long)]
    evaluator_entry: Option<String>,

    /// Python interpreter
    #[arg(long)]
    python: Option<String>,

    /// Evaluator threads
    #[arg(long)]
    threads: Option<u32>,

    /// Evaluator threshold step
    #[arg(long)]
    th_step: Option<f64>,

    /// Summary output format
    #[arg(short, long, default_value = "summary")]
    output: ReportFormat,

    /// Also write the evaluation report as JSON to this file
    #[arg(long)]
    report_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build known / gt_all / ground_truth tables for a snapshot range
    Build(BuildArgs),

    /// Write the terms of interest found in gt_all tables
    Terms(TermsArgs),

    /// Run the CAFA evaluator on built holdout pairs
    Evaluate(EvaluateArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .cafa-holdout.yaml in the current directory
    Init,
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let (config, loaded_from) = config::load_or_default(path)?;
    if let Some(path) = loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Build(args) => {
            let mut config = load_config(cli.config.as_deref())?;
            BuildOverrides {
                base_path: args.base_path,
                start: args.start,
                end: args.end,
                known_dir: args.out_known_dir,
                gt_all_dir: args.out_gtall_dir,
                ground_truth_dir: args.out_gtnew_dir,
                evidence_codes: args.evidence_codes,
                evidence_preset: args.evidence_preset,
                parallel: args.parallel,
                fail_on_pair_error: args.fail_on_pair_error,
            }
            .apply_to(&mut config);

            let exit_code = cli::run_build(BuildCommand {
                config,
                format: args.output,
                report_file: args.report_file,
                no_color: cli.no_color,
                quiet: cli.quiet,
            })?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }

        Commands::Terms(args) => {
            let config = load_config(cli.config.as_deref())?;
            cli::run_terms(TermsCommand {
                gt_all_dir: args.gt_all_dir.unwrap_or(config.outputs.gt_all_dir),
                output: args.output,
                keep_roots: args.keep_roots,
            })?;
            Ok(())
        }

        Commands::Evaluate(args) => {
            let config = load_config(cli.config.as_deref())?;
            let mut settings = config.evaluator;
            if let Some(out_root) = args.out_root {
                settings.out_root = out_root;
            }
            if let Some(entry) = args.evaluator_entry {
                settings.entry = entry;
            }
            if let Some(python) = args.python {
                settings.python = python;
            }
            if let Some(threads) = args.threads {
                settings.threads = threads;
            }
            if let Some(th_step) = args.th_step {
                settings.th_step = th_step;
            }

            let exit_code = cli::run_evaluate(EvaluateCommand {
                inputs: EvaluationInputs {
                    ontology: args.ontology,
                    submission_dir: args.submission_dir,
                    ground_truth_dir: args.gtdelta_dir.unwrap_or(config.outputs.ground_truth_dir),
                    known_dir: args.known_dir.unwrap_or(config.outputs.known_dir),
                    terms_of_interest: args.toi,
                    information_accretion: args.ia,
                },
                settings,
                start: args.start.unwrap_or(config.snapshots.start),
                end: args.end.unwrap_or(config.snapshots.end),
                format: args.output,
                report_file: args.report_file,
                no_color: cli.no_color,
                quiet: cli.quiet,
            })?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "cafa-holdout", &mut io::stdout());
            Ok(())
        }

        Commands::ConfigSchema { output } => {
            let schema = config::generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) = config::load_or_default(cli.config.as_deref())?;
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(())
            }
            ConfigAction::Path => {
                let search_paths: [Option<String>; 3] = [
                    std::env::current_dir()
                        .ok()
                        .map(|p| p.display().to_string()),
                    dirs::config_dir().map(|p| p.join("cafa-holdout").display().to_string()),
                    dirs::home_dir().map(|p| p.display().to_string()),
                ];
                eprintln!("Config file search paths (in order):");
                for path in search_paths.into_iter().flatten() {
                    eprintln!("  {path}");
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in &[
                    ".cafa-holdout.yaml",
                    ".cafa-holdout.yml",
                    "cafa-holdout.yaml",
                    "cafa-holdout.yml",
                ] {
                    eprintln!("  {name}");
                }
                eprintln!();
                match config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(())
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".cafa-holdout.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                std::fs::write(&target, config::generate_full_example_config())
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(())
            }
        },
    }
}
