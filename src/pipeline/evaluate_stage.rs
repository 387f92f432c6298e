//! Running the external CAFA evaluator over built pairs.

use super::range::SnapshotRange;
use super::sink::OutputLayout;
use crate::config::EvaluatorConfig;
use crate::error::{HoldoutError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Python module run when the entry is `module`.
pub const EVALUATOR_MODULE: &str = "cafaeval";

/// How the evaluator is started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluatorEntry {
    /// `python -m <module>`
    Module(String),
    /// `python <script>`
    Script(PathBuf),
}

impl EvaluatorEntry {
    /// `module` selects the installed package; anything else is a script path.
    pub fn parse(entry: &str) -> Self {
        if entry == "module" {
            Self::Module(EVALUATOR_MODULE.to_string())
        } else {
            Self::Script(PathBuf::from(entry))
        }
    }

    fn args(&self) -> Vec<OsString> {
        match self {
            Self::Module(module) => vec![OsString::from("-m"), OsString::from(module)],
            Self::Script(script) => vec![OsString::from(script)],
        }
    }
}

/// Input locations for an evaluation run.
#[derive(Debug, Clone)]
pub struct EvaluationInputs {
    pub ontology: PathBuf,
    pub submission_dir: PathBuf,
    /// Directory holding `ground_truth.N_N+1.tsv`
    pub ground_truth_dir: PathBuf,
    /// Directory holding `known.N.tsv`
    pub known_dir: PathBuf,
    pub terms_of_interest: Option<PathBuf>,
    pub information_accretion: Option<PathBuf>,
}

impl EvaluationInputs {
    /// Check the inputs shared by every pair.
    pub fn validate(&self) -> Result<()> {
        if !self.ontology.is_file() {
            return Err(HoldoutError::validation(format!(
                "ontology file not found: {}",
                self.ontology.display()
            )));
        }
        if !self.submission_dir.is_dir() {
            return Err(HoldoutError::validation(format!(
                "submission directory not found: {}",
                self.submission_dir.display()
            )));
        }
        let entries = std::fs::read_dir(&self.submission_dir)
            .map_err(|e| HoldoutError::io(&self.submission_dir, e))?;
        let has_tsv = entries
            .filter_map(std::result::Result::ok)
            .any(|entry| entry.path().extension().is_some_and(|ext| ext == "tsv"));
        if !has_tsv {
            return Err(HoldoutError::validation(format!(
                "no .tsv prediction files in {}",
                self.submission_dir.display()
            )));
        }
        Ok(())
    }

    fn layout(&self) -> OutputLayout {
        OutputLayout::new(&self.known_dir, PathBuf::new(), &self.ground_truth_dir)
    }
}

// ============================================================================
// Outcomes
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationOutcome {
    pub index: u32,
    pub next: u32,
    #[serde(flatten)]
    pub status: EvaluationStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EvaluationStatus {
    Completed { out_dir: PathBuf },
    Skipped { missing: Vec<PathBuf> },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationReport {
    pub start: u32,
    pub end: u32,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: Vec<EvaluationOutcome>,
}

impl EvaluationReport {
    fn count(&self, pred: impl Fn(&EvaluationStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.status)).count()
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.count(|s| matches!(s, EvaluationStatus::Completed { .. }))
    }

    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.count(|s| matches!(s, EvaluationStatus::Skipped { .. }))
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.count(|s| matches!(s, EvaluationStatus::Failed { .. }))
    }
}

// ============================================================================
// Runner
// ============================================================================

/// Invokes the evaluator once per pair, sequentially.
#[derive(Debug, Clone)]
pub struct EvaluationRunner {
    inputs: EvaluationInputs,
    settings: EvaluatorConfig,
}

impl EvaluationRunner {
    pub fn new(inputs: EvaluationInputs, settings: EvaluatorConfig) -> Self {
        Self { inputs, settings }
    }

    /// Output directory for pair (`index`, `next`).
    #[must_use]
    pub fn out_dir(&self, index: u32, next: u32) -> PathBuf {
        self.settings.out_root.join(format!("{index}_{next}"))
    }

    /// Evaluator arguments for one pair, excluding the interpreter.
    #[must_use]
    pub fn arguments(&self, ground_truth: &Path, known: &Path, out_dir: &Path) -> Vec<OsString> {
        let settings = &self.settings;
        let mut args = EvaluatorEntry::parse(&settings.entry).args();
        args.extend([
            OsString::from(&self.inputs.ontology),
            OsString::from(&self.inputs.submission_dir),
            OsString::from(ground_truth),
            OsString::from("-known"),
            OsString::from(known),
            OsString::from("-out_dir"),
            OsString::from(out_dir),
            OsString::from("-max_terms"),
            OsString::from(settings.max_terms.to_string()),
            OsString::from("-prop"),
            OsString::from(&settings.prop),
            OsString::from("-norm"),
            OsString::from(&settings.norm),
        ]);
        if settings.no_orphans {
            args.push(OsString::from("-no_orphans"));
        }
        args.extend([
            OsString::from("-threads"),
            OsString::from(settings.threads.to_string()),
            OsString::from("-th_step"),
            OsString::from(settings.th_step.to_string()),
        ]);
        if let Some(toi) = &self.inputs.terms_of_interest {
            args.extend([OsString::from("-toi"), OsString::from(toi)]);
        }
        if let Some(ia) = &self.inputs.information_accretion {
            args.extend([OsString::from("-ia"), OsString::from(ia)]);
        }
        args
    }

    /// Validate the inputs, then evaluate every pair of `start..=end`.
    pub fn run(&self, start: u32, end: u32) -> Result<EvaluationReport> {
        let range = SnapshotRange::new(start, end)?;
        self.inputs.validate()?;

        let started_at = Utc::now();
        let outcomes = range
            .indices()
            .map(|index| self.evaluate_pair(index))
            .collect();
        Ok(EvaluationReport {
            start,
            end,
            started_at,
            finished_at: Utc::now(),
            outcomes,
        })
    }

    fn evaluate_pair(&self, index: u32) -> EvaluationOutcome {
        let next = index.saturating_add(1);
        let layout = self.inputs.layout();
        let ground_truth = layout.ground_truth_path(index, next);
        let known = layout.known_path(index);

        let missing: Vec<PathBuf> = [&ground_truth, &known]
            .into_iter()
            .filter(|path| !path.is_file())
            .cloned()
            .collect();
        let status = if missing.is_empty() {
            match self.invoke(index, next, &ground_truth, &known) {
                Ok(out_dir) => EvaluationStatus::Completed { out_dir },
                Err(e) => {
                    tracing::error!("Evaluation {}->{} failed: {}", index, next, e);
                    EvaluationStatus::Failed {
                        message: e.to_string(),
                    }
                }
            }
        } else {
            for path in &missing {
                tracing::warn!("Skipping {}->{}: missing {}", index, next, path.display());
            }
            EvaluationStatus::Skipped { missing }
        };

        EvaluationOutcome {
            index,
            next,
            status,
        }
    }

    fn invoke(&self, index: u32, next: u32, ground_truth: &Path, known: &Path) -> Result<PathBuf> {
        let out_dir = self.out_dir(index, next);
        std::fs::create_dir_all(&out_dir).map_err(|e| HoldoutError::io(&out_dir, e))?;

        let args = self.arguments(ground_truth, known, &out_dir);
        tracing::info!("Evaluating {} -> {} into {}", index, next, out_dir.display());
        tracing::debug!("{} {:?}", self.settings.python, args);

        let status = Command::new(&self.settings.python)
            .args(&args)
            .stdin(Stdio::null())
            .status()
            .map_err(|e| {
                HoldoutError::evaluator(index, format!("failed to start {}: {e}", self.settings.python))
            })?;
        if !status.success() {
            return Err(HoldoutError::evaluator(index, format!("exited with {status}")));
        }
        Ok(out_dir)
    }
}
