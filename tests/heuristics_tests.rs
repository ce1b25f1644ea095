use ddx::{
    CategoryHint, Language,
    heuristics::{detect_compilation, detect_logic, detect_syntax},
};

#[test]
fn bracket_scan_reports_first_unmatched_closer() {
    let issues = detect_syntax("(a, [b)]", Language::Cpp);
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message().contains("unmatched closing"));
    assert_eq!(issues[0].category_hint(), CategoryHint::Syntax);
}

#[test]
fn bracket_scan_accepts_balanced_brackets() {
    assert!(detect_syntax("(a, [b])", Language::Cpp).is_empty());
}

#[test]
fn bracket_scan_reports_leftover_opener() {
    let issues = detect_syntax("(a", Language::Cpp);
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message().contains("unclosed"));
}

#[test]
fn detects_directive_ending_in_terminator() {
    let issues = detect_syntax("#define int long long;\nint x;", Language::Cpp);
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message().contains("directive"));
    assert_eq!(issues[0].line(), Some(1));
    assert!(issues[0].remediation().expect("fix text").contains("semicolon"));
}

#[test]
fn detects_missing_colon_in_python_blocks() {
    let code = "for i in range(10)\n    print(i)";
    let issues = detect_syntax(code, Language::Python);
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message().contains("colon"));
}

#[test]
fn colon_scan_ignores_well_formed_blocks() {
    let code = "for i in range(10):\n    print(i)";
    assert!(detect_syntax(code, Language::Python).is_empty());
}

#[test]
fn colon_scan_is_python_specific() {
    let code = "for (int i = 0; i < 10; i++) {}";
    assert!(detect_syntax(code, Language::Cpp).is_empty());
}

#[test]
fn detects_keyword_misspellings() {
    let issues = detect_syntax("int mian() { retrun 0; }", Language::Cpp);
    assert_eq!(issues.len(), 2);
    assert!(issues.iter().any(|i| i.message().contains("mian")));
    assert!(issues.iter().any(|i| i.message().contains("retrun")));
}

#[test]
fn detects_sort_without_algorithm_header() {
    let code = "int main() {\n    int a[3] = {3, 1, 2};\n    sort(a, a + 3);\n    return 0;\n}";
    let issues = detect_compilation(code, Language::Cpp);
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message().contains("algorithm"));
    assert_eq!(issues[0].category_hint(), CategoryHint::Compilation);
}

#[test]
fn detects_vector_without_header() {
    let code = "int main() {\n    vector<int> v;\n    return 0;\n}";
    let issues = detect_compilation(code, Language::Cpp);
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message().contains("vector"));
}

#[test]
fn aggregate_header_satisfies_dependencies() {
    let code = "#include <bits/stdc++.h>\nint main() {\n    vector<int> v;\n    sort(v.begin(), v.end());\n}";
    assert!(detect_compilation(code, Language::Cpp).is_empty());
}

#[test]
fn detects_int_remap_conflicting_with_main() {
    let code = "#define int long long\nint main() { return 0; }";
    let issues = detect_compilation(code, Language::Cpp);
    assert_eq!(issues.len(), 1);
    assert!(issues[0].remediation().expect("fix text").contains("signed main"));
}

#[test]
fn int_remap_without_main_is_not_flagged() {
    let code = "#define int long long\nsigned main() { return 0; }";
    assert!(detect_compilation(code, Language::Cpp).is_empty());
}

#[test]
fn compilation_scan_is_c_family_specific() {
    assert!(detect_compilation("sort(xs)", Language::Python).is_empty());
}

#[test]
fn detects_loop_bound_off_by_one() {
    let code = "for (int i = 0; i <= n; i++) total += a[i];";
    let issues = detect_logic(code, Language::Cpp);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].category_hint(), CategoryHint::Logic);
    assert!(issues[0].remediation().expect("fix text").contains("`<`"));
}

#[test]
fn strict_loop_bound_is_not_flagged() {
    let code = "for (int i = 0; i < n; i++) total += a[i];";
    assert!(detect_logic(code, Language::Cpp).is_empty());
}

#[test]
fn detects_overflow_prone_midpoint() {
    let code = "while (left <= right) {\n    mid = (left + right) / 2;\n}";
    let issues = detect_logic(code, Language::Cpp);
    assert_eq!(issues.len(), 1);
    assert!(
        issues[0]
            .remediation()
            .expect("fix text")
            .contains("left + (right - left) / 2")
    );
}

#[test]
fn offset_difference_midpoint_is_not_flagged() {
    let code = "mid = left + (right - left) / 2;";
    assert!(detect_logic(code, Language::Cpp).is_empty());
}
