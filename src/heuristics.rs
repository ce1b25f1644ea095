#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Heuristic detectors that scan raw submission text for defect patterns.
//!
//! Three independent families (syntax, compilation, logic) run regardless of
//! whether the toolchain was invoked. Matches are best-effort pattern hits
//! with fixed confidence constants, never sound analyses.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    constants::{
        BRACKET_CONFIDENCE, DEFINE_MAIN_CONFLICT_CONFIDENCE, DIRECTIVE_TERMINATOR_CONFIDENCE,
        MIDPOINT_OVERFLOW_CONFIDENCE, MISSING_COLON_CONFIDENCE, MISSING_INCLUDE_CONFIDENCE,
        MISSPELLING_CONFIDENCE, OFF_BY_ONE_CONFIDENCE,
    },
    diagnostics::{CategoryHint, Issue, IssueSource, Severity},
    language::Language,
};

/// One of the three heuristic detector families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorFamily {
    /// Terminator, bracket, and misspelling anomalies.
    Syntax,
    /// Missing dependencies and conflicting declarations.
    Compilation,
    /// Bounds and overflow candidates.
    Logic,
}

impl DetectorFamily {
    /// Every family, in detection (and priority) order.
    pub const ALL: [DetectorFamily; 3] = [
        DetectorFamily::Syntax,
        DetectorFamily::Compilation,
        DetectorFamily::Logic,
    ];
}

/// Runs one detector family over `code`.
pub fn run(family: DetectorFamily, code: &str, language: Language) -> Vec<Issue> {
    match family {
        DetectorFamily::Syntax => detect_syntax(code, language),
        DetectorFamily::Compilation => detect_compilation(code, language),
        DetectorFamily::Logic => detect_logic(code, language),
    }
}

/// A preprocessor directive line ending in a statement terminator.
static DIRECTIVE_TERMINATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*#[ \t]*(?:define|include)\b[^\n]*;[ \t]*$")
        .expect("directive-terminator regex compiles")
});

/// A Python block introducer missing its trailing colon.
static MISSING_COLON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:if|elif|else|for|while|def|class|try|except|finally|with)\b[^:\n]*$")
        .expect("missing-colon regex compiles")
});

/// Known keyword misspellings and their corrections.
const MISSPELLINGS: [(&str, &str); 10] = [
    ("pritnf", "printf"),
    ("pirnt", "print"),
    ("retrun", "return"),
    ("inculde", "include"),
    ("mian", "main"),
    ("whlie", "while"),
    ("improt", "import"),
    ("flase", "false"),
    ("ture", "true"),
    ("vodi", "void"),
];

/// Word-bounded matchers for [`MISSPELLINGS`].
static MISSPELLING_PATTERNS: LazyLock<Vec<(Regex, &'static str, &'static str)>> =
    LazyLock::new(|| {
        MISSPELLINGS
            .iter()
            .map(|(typo, correction)| {
                let pattern = Regex::new(&format!(r"\b{typo}\b"))
                    .expect("misspelling regex compiles");
                (pattern, *typo, *correction)
            })
            .collect()
    });

/// `vector<...>` usage.
static VECTOR_USE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bvector\s*<").expect("vector-use regex compiles"));

/// A `sort(...)` call.
static SORT_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bsort\s*\(").expect("sort-call regex compiles"));

/// The `#define int long long` type remapping.
static DEFINE_INT_REMAP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#\s*define\s+int\s+long\s+long").expect("int-remap regex compiles")
});

/// A loop bound compared with `<=` against a size-like variable.
static LOOP_BOUND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)\b(?:for|while)\b[^\n]*<=\s*(?:\w+\s*\.\s*(?:size|length)\s*\(\s*\)|(?:n|size|len|length|count)\b)",
    )
    .expect("loop-bound regex compiles")
});

/// A midpoint computed as `(a + b) / 2`.
static MIDPOINT_AVERAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\w+)\s*=\s*\(\s*(\w+)\s*\+\s*(\w+)\s*\)\s*/\s*2\b")
        .expect("midpoint regex compiles")
});

/// 1-based line number of a byte offset into `code`.
fn line_of(code: &str, offset: usize) -> u32 {
    code[..offset].bytes().filter(|b| *b == b'\n').count() as u32 + 1
}

/// Builds a heuristic issue with the common fields filled in.
fn heuristic_issue(
    line: Option<u32>,
    message: String,
    confidence: f64,
    category_hint: CategoryHint,
    remediation: String,
) -> Issue {
    Issue::builder()
        .line(line)
        .severity(Severity::Error)
        .message(message)
        .confidence(confidence)
        .source(IssueSource::Heuristic)
        .category_hint(category_hint)
        .remediation(remediation)
        .build()
}

/// Scans for syntax-level anomalies: directive/terminator conflicts, missing
/// block-introducer colons (Python), unmatched brackets, and keyword
/// misspellings.
pub fn detect_syntax(code: &str, language: Language) -> Vec<Issue> {
    let mut issues = Vec::new();

    for found in DIRECTIVE_TERMINATOR.find_iter(code) {
        issues.push(heuristic_issue(
            Some(line_of(code, found.start())),
            "preprocessor directive ends with a statement terminator".to_string(),
            DIRECTIVE_TERMINATOR_CONFIDENCE,
            CategoryHint::Syntax,
            "Remove the trailing semicolon; preprocessor directives are not statements."
                .to_string(),
        ));
    }

    if language == Language::Python {
        for found in MISSING_COLON.find_iter(code) {
            issues.push(heuristic_issue(
                Some(line_of(code, found.start())),
                format!("block introducer `{}` is missing its colon", found.as_str().trim()),
                MISSING_COLON_CONFIDENCE,
                CategoryHint::Syntax,
                "Add ':' at the end of the control-structure line.".to_string(),
            ));
        }
    }

    if let Some(issue) = bracket_mismatch(code) {
        issues.push(issue);
    }

    for (pattern, typo, correction) in MISSPELLING_PATTERNS.iter() {
        if let Some(found) = pattern.find(code) {
            issues.push(heuristic_issue(
                Some(line_of(code, found.start())),
                format!("`{typo}` looks like a misspelling of `{correction}`"),
                MISSPELLING_CONFIDENCE,
                CategoryHint::Syntax,
                format!("Replace `{typo}` with `{correction}`."),
            ));
        }
    }

    issues
}

/// Stack scan over `(){}[]`; reports the first unmatched closer or the
/// earliest leftover opener as a single issue.
fn bracket_mismatch(code: &str) -> Option<Issue> {
    let mut stack: Vec<(char, usize)> = Vec::new();

    for (offset, ch) in code.char_indices() {
        match ch {
            '(' | '[' | '{' => stack.push((ch, offset)),
            ')' | ']' | '}' => {
                let expected = match ch {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                match stack.pop() {
                    Some((open, _)) if open == expected => {}
                    _ => {
                        return Some(heuristic_issue(
                            Some(line_of(code, offset)),
                            format!("unmatched closing `{ch}`"),
                            BRACKET_CONFIDENCE,
                            CategoryHint::Syntax,
                            "Balance the brackets; count opening and closing brackets carefully."
                                .to_string(),
                        ));
                    }
                }
            }
            _ => {}
        }
    }

    stack.first().map(|(open, offset)| {
        heuristic_issue(
            Some(line_of(code, *offset)),
            format!("unclosed `{open}`"),
            BRACKET_CONFIDENCE,
            CategoryHint::Syntax,
            "Close the bracket before the end of the snippet.".to_string(),
        )
    })
}

/// Scans for compilation-level anomalies: library facilities used without
/// their headers, and the `int` remapping conflicting with `int main()`.
///
/// Only meaningful for the C family; other languages yield nothing.
pub fn detect_compilation(code: &str, language: Language) -> Vec<Issue> {
    if !matches!(language, Language::Cpp | Language::C) {
        return Vec::new();
    }

    let mut issues = Vec::new();
    let has_aggregate = code.contains("bits/stdc++.h");

    if let Some(found) = VECTOR_USE.find(code)
        && !code.contains("#include <vector>")
        && !has_aggregate
    {
        issues.push(heuristic_issue(
            Some(line_of(code, found.start())),
            "vector used without including <vector>".to_string(),
            MISSING_INCLUDE_CONFIDENCE,
            CategoryHint::Compilation,
            "Add `#include <vector>` (or `#include <bits/stdc++.h>`).".to_string(),
        ));
    }

    if let Some(found) = SORT_CALL.find(code)
        && !code.contains("#include <algorithm>")
        && !has_aggregate
    {
        issues.push(heuristic_issue(
            Some(line_of(code, found.start())),
            "sort() used without including <algorithm>".to_string(),
            MISSING_INCLUDE_CONFIDENCE,
            CategoryHint::Compilation,
            "Add `#include <algorithm>` (or `#include <bits/stdc++.h>`).".to_string(),
        ));
    }

    if let Some(found) = DEFINE_INT_REMAP.find(code)
        && code.contains("int main(")
    {
        issues.push(heuristic_issue(
            Some(line_of(code, found.start())),
            "`#define int long long` conflicts with the `int main()` signature".to_string(),
            DEFINE_MAIN_CONFLICT_CONFIDENCE,
            CategoryHint::Compilation,
            "Use `signed main()` instead of `int main()` when redefining int.".to_string(),
        ));
    }

    issues
}

/// Scans for logic-level anomalies: `<=` loop bounds against size-like
/// variables, and overflow-prone midpoint averaging.
pub fn detect_logic(code: &str, _language: Language) -> Vec<Issue> {
    let mut issues = Vec::new();

    for found in LOOP_BOUND.find_iter(code) {
        issues.push(heuristic_issue(
            Some(line_of(code, found.start())),
            "loop bound compares with `<=` against a container size".to_string(),
            OFF_BY_ONE_CONFIDENCE,
            CategoryHint::Logic,
            "Use `<` when iterating 0-indexed containers to avoid reading one past the end."
                .to_string(),
        ));
    }

    for captures in MIDPOINT_AVERAGE.captures_iter(code) {
        let (lhs, a, b) = (&captures[1], &captures[2], &captures[3]);
        let offset = captures.get(0).map(|m| m.start()).unwrap_or(0);
        issues.push(heuristic_issue(
            Some(line_of(code, offset)),
            format!("`{lhs} = ({a} + {b}) / 2` can overflow for large operands"),
            MIDPOINT_OVERFLOW_CONFIDENCE,
            CategoryHint::Logic,
            format!("Use `{lhs} = {a} + ({b} - {a}) / 2` instead."),
        ));
    }

    issues
}
