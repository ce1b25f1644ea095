#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::{
    constants::{COMPILER_DIAG_CONFIDENCE, INTERPRETER_DIAG_CONFIDENCE},
    language::Language,
    parsers::parser,
    toolchain::CompileOutcome,
};

/// Severity of a detected problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The toolchain or detector considers this fatal.
    Error,
    /// Advisory only.
    Warning,
}

/// Where an issue came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSource {
    /// Parsed out of toolchain output.
    Compiler,
    /// Produced by a heuristic detector over the raw source.
    Heuristic,
}

/// Coarse category suggestion attached to an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryHint {
    /// Syntax-level defect.
    Syntax,
    /// Compilation-level defect (missing declarations, headers, types).
    Compilation,
    /// Logic-level defect (bounds, overflow).
    Logic,
    /// No category could be suggested.
    None,
}

/// One detected problem, from either the compiler path or a heuristic
/// detector.
///
/// `confidence` reflects detector certainty, never correctness: an issue
/// only says a pattern matched, not that the code is semantically wrong.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct Issue {
    /// 1-based line the issue refers to, when known.
    #[builder(default)]
    line: Option<u32>,
    /// 1-based column the issue refers to, when known.
    #[builder(default)]
    column: Option<u32>,
    /// Severity of the issue.
    severity: Severity,
    /// Verbatim or synthesized description.
    message: String,
    /// Detector certainty in `[0, 1]`.
    confidence: f64,
    /// Origin of the issue.
    source: IssueSource,
    /// Coarse category suggestion.
    category_hint: CategoryHint,
    /// Canned fix text attached by the phrase table or detector.
    #[builder(default)]
    remediation: Option<String>,
}

impl Issue {
    /// 1-based line the issue refers to, when known.
    pub fn line(&self) -> Option<u32> {
        self.line
    }

    /// 1-based column the issue refers to, when known.
    pub fn column(&self) -> Option<u32> {
        self.column
    }

    /// Severity of the issue.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// The diagnostic message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Detector certainty in `[0, 1]`.
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Origin of the issue.
    pub fn source(&self) -> IssueSource {
        self.source
    }

    /// Coarse category suggestion.
    pub fn category_hint(&self) -> CategoryHint {
        self.category_hint
    }

    /// Canned fix text, when the phrase table or detector attached one.
    pub fn remediation(&self) -> Option<&str> {
        self.remediation.as_deref()
    }
}

/// A diagnostic line as parsed straight off toolchain output, before it is
/// enriched into an [`Issue`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDiagnostic {
    /// Path segment of the diagnostic line.
    pub path: String,
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number, absent for toolchains that omit it (javac).
    pub column: Option<u32>,
    /// True for errors, false for warnings.
    pub is_error: bool,
    /// The diagnostic message.
    pub message: String,
}

/// One row of the phrase table: every inner group must have at least one
/// needle present in the lowercased message for the row to match.
type PhraseRule = (
    &'static [&'static [&'static str]],
    CategoryHint,
    &'static str,
);

/// Ordered table of known error phrases; first match wins.
const PHRASE_TABLE: &[PhraseRule] = &[
    (
        &[&["expected ';'", "';' expected", "expected \u{2018};\u{2019}"]],
        CategoryHint::Syntax,
        "Add the missing semicolon at the end of the statement.",
    ),
    (
        &[&[
            "expected '{'",
            "expected '}'",
            "'{' expected",
            "'}' expected",
            "expected \u{2018}{\u{2019}",
            "expected \u{2018}}\u{2019}",
        ]],
        CategoryHint::Syntax,
        "Add the missing block delimiter after the function or control structure.",
    ),
    (
        &[&["#define"], &[";"]],
        CategoryHint::Syntax,
        "Remove the semicolon from the #define directive; preprocessor directives are not statements.",
    ),
    (
        &[&["indentationerror", "taberror", "inconsistent use of tabs"]],
        CategoryHint::Syntax,
        "Fix the indentation; use 4 spaces consistently.",
    ),
    (
        &[&["invalid syntax"]],
        CategoryHint::Syntax,
        "Check for missing colons, parentheses, or quotes.",
    ),
    (
        &[&["no such file or directory"]],
        CategoryHint::Compilation,
        "Include the header that provides this facility.",
    ),
    (
        &[&[
            "was not declared",
            "undeclared",
            "cannot find symbol",
            "undefined reference",
        ]],
        CategoryHint::Compilation,
        "Declare the identifier or include the header that provides it.",
    ),
];

/// Fix text attached when no phrase-table row matches.
const GENERIC_REMEDIATION: &str =
    "Check the syntax near the reported line against the compiler message.";

/// Looks `message` up in the phrase table, returning the category hint and
/// canned remediation of the first matching row, or the generic fallback.
pub fn hint_for(message: &str) -> (CategoryHint, String) {
    let lowered = message.to_lowercase();

    for (groups, hint, remediation) in PHRASE_TABLE {
        let matched = groups
            .iter()
            .all(|needles| needles.iter().any(|needle| lowered.contains(needle)));
        if matched {
            return (*hint, (*remediation).to_string());
        }
    }

    (CategoryHint::None, GENERIC_REMEDIATION.to_string())
}

/// Error classes recognized in interpreter tracebacks.
const INTERPRETER_ERROR_CLASSES: [&str; 3] = ["SyntaxError", "IndentationError", "TabError"];

/// How many preceding traceback lines are searched for a `line <n>` reference.
const LINE_REF_WINDOW: usize = 3;

/// Matches the `line <n>` reference in a traceback location line.
static LINE_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"line (\d+)").expect("line-ref regex compiles"));

/// Parses toolchain output into ordered issues.
///
/// Lossy by design: only lines matching the language's diagnostic grammar
/// become issues, everything else is dropped silently. A successful run
/// yields no issues.
pub fn parse_outcome(outcome: &CompileOutcome, language: Language) -> Vec<Issue> {
    if outcome.succeeded || outcome.stderr.trim().is_empty() {
        return Vec::new();
    }

    if language.interpreted() {
        scan_interpreter_errors(&outcome.stderr)
    } else {
        outcome
            .stderr
            .lines()
            .filter_map(|line| parser::parse_diag(line).ok())
            .map(issue_from_raw)
            .collect()
    }
}

/// Enriches a grammar-parsed diagnostic into an [`Issue`].
fn issue_from_raw(raw: RawDiagnostic) -> Issue {
    let (category_hint, remediation) = hint_for(&raw.message);

    Issue::builder()
        .line(raw.line)
        .column(raw.column)
        .severity(if raw.is_error {
            Severity::Error
        } else {
            Severity::Warning
        })
        .message(raw.message)
        .confidence(COMPILER_DIAG_CONFIDENCE)
        .source(IssueSource::Compiler)
        .category_hint(category_hint)
        .remediation(remediation)
        .build()
}

/// Scans an interpreter traceback for recognized error classes.
///
/// The line number is pulled from a `line <n>` reference within the
/// [`LINE_REF_WINDOW`] preceding lines, defaulting to 1.
pub fn scan_interpreter_errors(stderr: &str) -> Vec<Issue> {
    let lines: Vec<&str> = stderr.lines().collect();
    let mut issues = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        if !INTERPRETER_ERROR_CLASSES
            .iter()
            .any(|class| line.contains(class))
        {
            continue;
        }

        let mut line_number = 1u32;
        for back in &lines[idx.saturating_sub(LINE_REF_WINDOW)..idx] {
            if let Some(captures) = LINE_REF.captures(back)
                && let Ok(parsed) = captures[1].parse()
            {
                line_number = parsed;
                break;
            }
        }

        let message = line.trim().to_string();
        let (category_hint, remediation) = hint_for(&message);

        issues.push(
            Issue::builder()
                .line(line_number)
                .column(1u32)
                .severity(Severity::Error)
                .message(message)
                .confidence(INTERPRETER_DIAG_CONFIDENCE)
                .source(IssueSource::Compiler)
                .category_hint(category_hint)
                .remediation(remediation)
                .build(),
        );
    }

    issues
}
