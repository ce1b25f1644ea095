#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! The pipeline orchestrator: one `analyze` call sequences the toolchain
//! bridge, diagnostic parser, heuristic detectors, concept classifier, and
//! suggestion engine into a single [`AnalysisResult`].

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    classify::{ConceptClassifier, ConceptModel},
    config::{AnalyzerConfig, OpenAiEnv},
    constants::MAX_CODE_BYTES,
    diagnostics::{self, CategoryHint, Issue, IssueSource},
    heuristics::{self, DetectorFamily},
    language::Language,
    suggest::{SuggestionEngine, SuggestionSource},
    toolchain,
};

/// Conditions under which the pipeline rejects an input outright.
///
/// Everything else (toolchain failures, unreachable services, unparseable
/// text) degrades to a best-effort [`AnalysisResult`] instead.
#[derive(thiserror::Error, Debug)]
pub enum AnalysisError {
    /// The language tag names no supported language.
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
    /// The submission exceeds the fixed size ceiling.
    #[error("Submission is too large: {len} bytes (limit {limit})")]
    InputTooLarge {
        /// Size of the rejected submission.
        len: usize,
        /// The fixed ceiling.
        limit: usize,
    },
}

/// Output of one pipeline run, immutable after construction.
///
/// The core never persists anything; the caller owns storage and can derive
/// a [`SubmissionRecord`] for its sink.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// The concept label assigned to the submission.
    pub concept: String,
    /// Confidence of the concept assignment, in `[0, 1]`.
    pub confidence: f64,
    /// Every detected issue, in detection order across detectors.
    pub issues: Vec<Issue>,
    /// The fix suggestion.
    pub suggestion: String,
    /// Which path produced the suggestion.
    pub suggestion_source: SuggestionSource,
    /// Whether the toolchain was actually invoked.
    pub compiler_ran: bool,
    /// Whether the toolchain run succeeded, when it ran.
    pub compiler_succeeded: Option<bool>,
    /// Wall-clock time the analysis took.
    pub processing_time: Duration,
}

/// Issue tallies by detector family, for the caller-facing summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueCounts {
    /// Issues parsed from toolchain output.
    pub compiler: usize,
    /// Heuristic issues with a syntax hint.
    pub syntax: usize,
    /// Heuristic issues with a compilation hint.
    pub compilation: usize,
    /// Heuristic issues with a logic hint.
    pub logic: usize,
}

/// The caller-facing result shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// The concept label assigned to the submission.
    pub concept: String,
    /// Confidence rounded to two decimals.
    pub confidence: f64,
    /// The fix suggestion.
    pub suggestion: String,
    /// Analysis wall-clock time in milliseconds.
    pub processing_time_ms: u128,
    /// Which path produced the suggestion.
    pub suggestion_source: SuggestionSource,
    /// Issue tallies by family.
    pub issue_counts: IssueCounts,
}

/// Payload for the caller-owned submission sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionRecord {
    /// The submitted code, unmodified.
    pub code: String,
    /// The error text the submitter supplied.
    pub error_text: String,
    /// The assigned concept label.
    pub concept: String,
    /// The produced suggestion.
    pub suggestion: String,
    /// Confidence of the concept assignment.
    pub confidence: f64,
    /// Analysis wall-clock time in milliseconds.
    pub processing_time_ms: u128,
}

impl AnalysisResult {
    /// Issue tallies by family.
    pub fn issue_counts(&self) -> IssueCounts {
        let mut counts = IssueCounts::default();
        for issue in &self.issues {
            match issue.source() {
                IssueSource::Compiler => counts.compiler += 1,
                IssueSource::Heuristic => match issue.category_hint() {
                    CategoryHint::Syntax => counts.syntax += 1,
                    CategoryHint::Compilation => counts.compilation += 1,
                    CategoryHint::Logic => counts.logic += 1,
                    CategoryHint::None => {}
                },
            }
        }
        counts
    }

    /// The caller-facing summary, with confidence rounded to two decimals.
    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary {
            concept: self.concept.clone(),
            confidence: (self.confidence * 100.0).round() / 100.0,
            suggestion: self.suggestion.clone(),
            processing_time_ms: self.processing_time.as_millis(),
            suggestion_source: self.suggestion_source,
            issue_counts: self.issue_counts(),
        }
    }

    /// Builds the audit payload for the caller's submission sink.
    pub fn submission_record(&self, code: &str, error_text: &str) -> SubmissionRecord {
        SubmissionRecord {
            code: code.to_string(),
            error_text: error_text.to_string(),
            concept: self.concept.clone(),
            suggestion: self.suggestion.clone(),
            confidence: self.confidence,
            processing_time_ms: self.processing_time.as_millis(),
        }
    }
}

/// The pipeline orchestrator.
///
/// Holds the injected, read-only collaborators (concept model, generative
/// credentials); every [`Analyzer::analyze`] call is independent and safe
/// to run concurrently.
pub struct Analyzer {
    /// Concept classifier with its optional trained model.
    classifier: ConceptClassifier,
    /// Suggestion engine with its optional generative credentials.
    suggestions: SuggestionEngine,
}

impl Analyzer {
    /// Builds an analyzer from explicitly injected collaborators.
    pub fn with_parts(model: Option<ConceptModel>, openai: Option<OpenAiEnv>) -> Self {
        Self {
            classifier: ConceptClassifier::new(model),
            suggestions: SuggestionEngine::new(openai),
        }
    }

    /// Builds an analyzer from environment-derived configuration.
    ///
    /// A model snapshot that cannot be loaded or trained is not fatal; the
    /// classifier degrades to its keyword rule table.
    pub fn from_config(config: &AnalyzerConfig) -> Self {
        let model = config
            .model_path()
            .and_then(|path| match ConceptModel::load_or_train(path) {
                Ok(model) => Some(model),
                Err(err) => {
                    warn!(%err, "statistical model unavailable, using keyword rules");
                    None
                }
            });

        Self::with_parts(model, config.openai().cloned())
    }

    /// Runs the full diagnostic pipeline over one submission.
    ///
    /// Fails only on oversized input (unsupported languages are rejected
    /// when the tag is parsed into [`Language`]); every other condition
    /// yields a complete best-effort result.
    pub async fn analyze(
        &self,
        code: &str,
        language: Language,
        error_text: &str,
    ) -> Result<AnalysisResult, AnalysisError> {
        let started = Instant::now();

        if code.len() > MAX_CODE_BYTES {
            return Err(AnalysisError::InputTooLarge {
                len: code.len(),
                limit: MAX_CODE_BYTES,
            });
        }

        let (compiler_ran, compiler_succeeded, mut issues) =
            match toolchain::compile(code, language).await {
                Ok(outcome) => {
                    let parsed = diagnostics::parse_outcome(&outcome, language);
                    debug!(
                        succeeded = outcome.succeeded,
                        diagnostics = parsed.len(),
                        "toolchain run finished"
                    );
                    (true, Some(outcome.succeeded), parsed)
                }
                Err(err) => {
                    warn!(%err, "toolchain unavailable, continuing with heuristics only");
                    (false, None, Vec::new())
                }
            };

        for family in DetectorFamily::ALL {
            issues.extend(heuristics::run(family, code, language));
        }

        let (concept, confidence) = self.classifier.classify(code, language);
        let (suggestion, suggestion_source) = self
            .suggestions
            .suggest(code, error_text, &concept, confidence, language)
            .await;

        Ok(AnalysisResult {
            concept,
            confidence,
            issues,
            suggestion,
            suggestion_source,
            compiler_ran,
            compiler_succeeded,
            processing_time: started.elapsed(),
        })
    }
}
