#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::time::Duration;

/// Wall-clock limit for a single toolchain invocation.
pub const COMPILE_TIMEOUT: Duration = Duration::from_secs(10);

/// Largest submission the pipeline accepts, in bytes. Larger inputs are
/// rejected before any processing.
pub const MAX_CODE_BYTES: usize = 64 * 1024;

/// Prompt truncation length for code embedded in generative requests.
pub const PROMPT_TRUNCATE: usize = 2000;

/// Marker appended to code that was cut at [`PROMPT_TRUNCATE`].
pub const TRUNCATION_MARKER: &str = "\n... (truncated)";

/// Placeholder sent to the generative service when no error text was given.
pub const NO_ERROR_PLACEHOLDER: &str = "No specific error provided";

/// Confidence assigned to diagnostics parsed from compiler output.
pub const COMPILER_DIAG_CONFIDENCE: f64 = 0.95;

/// Confidence assigned to diagnostics scanned out of interpreter tracebacks.
pub const INTERPRETER_DIAG_CONFIDENCE: f64 = 0.9;

/// Confidence for a preprocessor directive ending in a statement terminator.
pub const DIRECTIVE_TERMINATOR_CONFIDENCE: f64 = 0.95;

/// Confidence for an unmatched-bracket finding.
pub const BRACKET_CONFIDENCE: f64 = 0.9;

/// Confidence for a keyword-misspelling finding.
pub const MISSPELLING_CONFIDENCE: f64 = 0.8;

/// Confidence for a block introducer missing its trailing colon.
pub const MISSING_COLON_CONFIDENCE: f64 = 0.8;

/// Confidence for use of a library facility without its header.
pub const MISSING_INCLUDE_CONFIDENCE: f64 = 0.8;

/// Confidence for a type-remapping directive conflicting with `int main`.
pub const DEFINE_MAIN_CONFLICT_CONFIDENCE: f64 = 0.9;

/// Confidence for a loop bound compared with `<=` against a size variable.
pub const OFF_BY_ONE_CONFIDENCE: f64 = 0.75;

/// Confidence for an overflow-prone midpoint-averaging expression.
pub const MIDPOINT_OVERFLOW_CONFIDENCE: f64 = 0.75;

/// Confidence used when the statistical model classifies but cannot supply a
/// per-class probability.
pub const MODEL_DEFAULT_CONFIDENCE: f64 = 0.7;

/// Confidence of the keyword rule table and of the final default label.
pub const RULE_CONFIDENCE: f64 = 0.5;

/// Concept label for syntax-level defects.
pub const SYNTAX_ERROR: &str = "Syntax Error";

/// Concept label for compilation-level defects.
pub const COMPILATION_ERROR: &str = "Compilation Error";

/// Concept label for logic-level defects.
pub const LOGIC_ERROR: &str = "Logic Error";

/// Concept label assigned when nothing more specific matches.
pub const DEFAULT_CONCEPT: &str = "General Programming";

/// Closed set of algorithmic-topic labels the statistical classifier and the
/// keyword rule table select from.
pub const TOPIC_LABELS: [&str; 11] = [
    "Binary Search",
    "Dynamic Programming",
    "Graph Traversal",
    "Sorting",
    "Array Manipulation",
    "String Processing",
    "Tree Algorithms",
    "Greedy Algorithm",
    "Backtracking",
    "Mathematics",
    "General Programming",
];
