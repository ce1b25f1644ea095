//! # ddx
//!
//! A code diagnostic pipeline for short program submissions: run the code
//! through the real toolchain, parse the diagnostics, scan the source with
//! heuristic detectors, classify the dominant defect, and produce a fix
//! suggestion.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Concept classification: priority chain, topic model, keyword rules
pub mod classify;
/// Environment-derived configuration
pub mod config;
/// A module defining constant values used throughout the pipeline
pub mod constants;
/// Structured issues and per-language diagnostic parsing
pub mod diagnostics;
/// Heuristic detectors over raw submission text
pub mod heuristics;
/// The closed set of supported languages
pub mod language;
/// Parser for toolchain diagnostic lines
pub mod parsers;
/// The pipeline orchestrator and its result shapes
pub mod pipeline;
/// Subprocess spawning and output collection
pub mod process;
/// Generating suggestions, generative or templated
pub mod suggest;
/// Invoking external toolchains over scratch files
pub mod toolchain;
/// Utility functions for locating toolchain binaries
pub mod util;

pub use classify::{ConceptClassifier, ConceptModel};
pub use config::{AnalyzerConfig, OpenAiEnv};
pub use diagnostics::{CategoryHint, Issue, IssueSource, Severity};
pub use language::Language;
pub use pipeline::{
    AnalysisError, AnalysisResult, AnalysisSummary, Analyzer, IssueCounts, SubmissionRecord,
};
pub use suggest::{SuggestionEngine, SuggestionSource};
pub use toolchain::{CompileOutcome, ToolchainError};
