use ddx::{ConceptClassifier, ConceptModel, Language, classify::normalize_code};
use uuid::Uuid;

fn with_model() -> ConceptClassifier {
    ConceptClassifier::new(Some(ConceptModel::train_default()))
}

fn without_model() -> ConceptClassifier {
    ConceptClassifier::new(None)
}

#[test]
fn syntax_match_outranks_topic_model() {
    let code = "#define int long long;\nint main() { return 0; }";
    let (concept, confidence) = with_model().classify(code, Language::Cpp);

    assert_eq!(concept, "Syntax Error");
    assert!(confidence >= 0.9);
}

#[test]
fn syntax_match_outranks_topic_model_without_model_too() {
    let code = "#define int long long;\nint main() { return 0; }";
    let (concept, _) = without_model().classify(code, Language::Cpp);

    assert_eq!(concept, "Syntax Error");
}

#[test]
fn compilation_match_outranks_logic_match() {
    let code = "int main() {\n    int mid = (left + right) / 2;\n    sort(a, a + n);\n    return 0;\n}";
    let (concept, confidence) = with_model().classify(code, Language::Cpp);

    assert_eq!(concept, "Compilation Error");
    assert!(confidence > 0.0);
}

#[test]
fn logic_match_wins_when_earlier_stages_are_empty() {
    let code = "int i;\nfor (i = 0; i <= n; i = i + 1) total = total + i;";
    let (concept, confidence) = without_model().classify(code, Language::Cpp);

    assert_eq!(concept, "Logic Error");
    assert_eq!(confidence, 0.75);
}

#[test]
fn model_predicts_topic_when_no_detector_fires() {
    let code = "def binary_search(arr, target):\n    left, right = 0, len(arr)-1\n    while left <= right:\n        mid = (left + right) // 2";
    let (concept, confidence) = with_model().classify(code, Language::Python);

    assert_eq!(concept, "Binary Search");
    assert!(confidence > 0.0 && confidence <= 1.0);
    assert!(ddx::constants::TOPIC_LABELS.contains(&concept.as_str()));
}

#[test]
fn keyword_rules_classify_without_a_model() {
    let (concept, confidence) = without_model().classify("dfs(graph, visited);", Language::Cpp);

    assert_eq!(concept, "Graph Traversal");
    assert_eq!(confidence, 0.5);
}

#[test]
fn default_label_when_nothing_matches() {
    let (concept, confidence) = without_model().classify("a = b + c;", Language::Cpp);

    assert_eq!(concept, "General Programming");
    assert_eq!(confidence, 0.5);
}

#[test]
fn normalization_strips_comments_and_strings() {
    let normalized = normalize_code("int x = 5; // trailing comment\nputs(\"hello world\");");

    assert!(!normalized.contains("trailing"));
    assert!(!normalized.contains("hello"));
    assert!(normalized.contains("string"));
    assert_eq!(normalized, normalized.to_lowercase());
}

#[test]
fn model_snapshot_round_trips() {
    let path = std::env::temp_dir().join(format!("ddx-model-{}.json", Uuid::new_v4()));

    let trained = ConceptModel::train_default();
    trained.save(&path).expect("save model snapshot");
    let loaded = ConceptModel::load(&path).expect("load model snapshot");

    let normalized = normalize_code("arr.sort()\nfor i in range(len(arr)):\n    print(arr[i])");
    let before = trained.predict(&normalized).expect("trained model predicts");
    let after = loaded.predict(&normalized).expect("loaded model predicts");
    assert_eq!(before.0, after.0);

    let _ = std::fs::remove_file(&path);
}
