use ddx::{
    Language, SuggestionEngine, SuggestionSource,
    constants::TRUNCATION_MARKER,
    suggest::truncate_for_prompt,
};

fn offline_engine() -> SuggestionEngine {
    SuggestionEngine::new(None)
}

#[tokio::test]
async fn unconfigured_service_reports_template_source() {
    let (text, source) = offline_engine()
        .suggest("int main() {}", "", "General Programming", 0.5, Language::Cpp)
        .await;

    assert_eq!(source, SuggestionSource::Template);
    assert!(!text.is_empty());
}

#[tokio::test]
async fn syntax_template_carries_code_derived_fix() {
    let code = "#define int long long;\nint main() { return 0; }";
    let (text, source) = offline_engine()
        .suggest(code, "", "Syntax Error", 0.95, Language::Cpp)
        .await;

    assert_eq!(source, SuggestionSource::Template);
    assert!(text.contains("directive"));
    assert!(text.to_lowercase().contains("semicolon"));
    assert!(text.contains("💡"));
}

#[tokio::test]
async fn compilation_template_names_missing_header() {
    let code = "int main() { sort(a, a + n); }";
    let (text, _) = offline_engine()
        .suggest(code, "", "Compilation Error", 0.8, Language::Cpp)
        .await;

    assert!(text.contains("<algorithm>"));
    assert!(text.contains("General compilation fixes"));
}

#[tokio::test]
async fn error_text_is_prefixed_as_analysis_line() {
    let (text, _) = offline_engine()
        .suggest("x = 1", "wrong answer on test 3", "Logic Error", 0.75, Language::Python)
        .await;

    assert!(text.starts_with("**Error analysis:** wrong answer on test 3"));
}

#[tokio::test]
async fn topic_concept_uses_static_checklist() {
    let (text, _) = offline_engine()
        .suggest("bsearch(a, x)", "", "Binary Search", 0.7, Language::C)
        .await;

    assert!(text.contains("left + (right - left) / 2"));
    assert!(text.contains("sorted before binary search"));
}

#[tokio::test]
async fn unknown_concept_gets_general_checklist() {
    let (text, _) = offline_engine()
        .suggest("x = 1", "", "Quantum Sorting", 0.5, Language::Python)
        .await;

    assert!(text.contains("General debugging"));
}

#[test]
fn long_code_is_truncated_with_marker() {
    let code = "a".repeat(2500);
    let prompt_code = truncate_for_prompt(&code);

    assert!(prompt_code.ends_with(TRUNCATION_MARKER));
    assert_eq!(prompt_code.len(), 2000 + TRUNCATION_MARKER.len());
}

#[test]
fn short_code_is_not_truncated() {
    let code = "int main() { return 0; }";
    assert_eq!(truncate_for_prompt(code), code);
}
