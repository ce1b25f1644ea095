use ddx::{AnalysisError, Analyzer, CategoryHint, Language, SuggestionSource};

/// Analyzer with no model and no generative service: fully deterministic.
fn offline_analyzer() -> Analyzer {
    Analyzer::with_parts(None, None)
}

#[tokio::test]
async fn directive_terminator_resolves_to_syntax_error() {
    let code = "#define int long long;\nint main() { return 0; }";
    let result = offline_analyzer()
        .analyze(code, Language::Cpp, "")
        .await
        .expect("analysis should succeed");

    assert_eq!(result.concept, "Syntax Error");
    assert!(
        result
            .issues
            .iter()
            .any(|issue| issue.category_hint() == CategoryHint::Syntax
                && issue.message().contains("directive"))
    );
    assert!(result.suggestion.to_lowercase().contains("semicolon"));
    assert_eq!(result.suggestion_source, SuggestionSource::Template);
}

#[tokio::test]
async fn missing_header_resolves_to_compilation_error() {
    let code = "int main() {\n    int a[3] = {3, 1, 2};\n    sort(a, a + 3);\n    return 0;\n}";
    let result = offline_analyzer()
        .analyze(code, Language::Cpp, "")
        .await
        .expect("analysis should succeed");

    assert_eq!(result.concept, "Compilation Error");
    assert!(
        result
            .issues
            .iter()
            .any(|issue| issue.message().contains("algorithm"))
    );
}

#[tokio::test]
async fn unremarkable_code_gets_the_default_concept() {
    let code = "a = 1\nb = 2\nprint(a + b)";
    let result = offline_analyzer()
        .analyze(code, Language::Python, "")
        .await
        .expect("analysis should succeed");

    assert_eq!(result.concept, "General Programming");
    assert_eq!(result.confidence, 0.5);
    assert_eq!(result.suggestion_source, SuggestionSource::Template);
}

#[tokio::test]
async fn oversized_input_is_rejected_before_processing() {
    let code = "x".repeat(64 * 1024 + 1);
    let err = offline_analyzer()
        .analyze(&code, Language::Python, "")
        .await
        .expect_err("oversized input should be rejected");

    assert!(matches!(err, AnalysisError::InputTooLarge { .. }));
}

#[test]
fn unknown_language_tag_is_rejected_at_parse_time() {
    let err = "ruby".parse::<Language>().expect_err("tag should be rejected");

    match err {
        AnalysisError::UnsupportedLanguage(tag) => assert_eq!(tag, "ruby"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn analysis_is_idempotent_for_identical_input() {
    let code = "int main() {\n    sort(a, a + 3);\n    return 0;\n}";
    let analyzer = offline_analyzer();

    let first = analyzer
        .analyze(code, Language::Cpp, "")
        .await
        .expect("first analysis");
    let second = analyzer
        .analyze(code, Language::Cpp, "")
        .await
        .expect("second analysis");

    assert_eq!(first.concept, second.concept);
    assert_eq!(first.suggestion_source, second.suggestion_source);
    assert_eq!(first.suggestion, second.suggestion);
}

#[tokio::test]
async fn summary_rounds_confidence_and_counts_families() {
    let code = "#define int long long;\nint main() { return 0; }";
    let result = offline_analyzer()
        .analyze(code, Language::Cpp, "")
        .await
        .expect("analysis should succeed");

    let summary = result.summary();
    assert_eq!(
        summary.confidence,
        (summary.confidence * 100.0).round() / 100.0
    );
    assert!(summary.issue_counts.syntax >= 1);

    let compiler_sourced = result
        .issues
        .iter()
        .filter(|issue| issue.source() == ddx::IssueSource::Compiler)
        .count();
    assert_eq!(summary.issue_counts.compiler, compiler_sourced);
}

#[tokio::test]
async fn submission_record_keeps_the_full_code() {
    let code = format!("int main() {{ return 0; }}\n// {}", "x".repeat(2500));
    let result = offline_analyzer()
        .analyze(&code, Language::Cpp, "tle on test 9")
        .await
        .expect("analysis should succeed");

    let record = result.submission_record(&code, "tle on test 9");
    assert_eq!(record.code, code);
    assert_eq!(record.error_text, "tle on test 9");
    assert_eq!(record.concept, result.concept);
}
