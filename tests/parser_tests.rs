use ddx::{
    CategoryHint, IssueSource, Language,
    diagnostics::{self, hint_for, scan_interpreter_errors},
    parsers::parser,
    toolchain::CompileOutcome,
};

#[test]
fn parses_gcc_diagnostic_line() {
    let diag = parser::parse_diag("/tmp/scratch/snippet.cpp:3:5: error: expected ';' before 'return'")
        .expect("line should parse");

    assert!(diag.path.ends_with("snippet.cpp"));
    assert_eq!(diag.line, 3);
    assert_eq!(diag.column, Some(5));
    assert!(diag.is_error);
    assert_eq!(diag.message, "expected ';' before 'return'");
}

#[test]
fn parses_javac_line_without_column() {
    let diag = parser::parse_diag("/tmp/scratch/Main.java:4: error: ';' expected")
        .expect("line should parse");

    assert_eq!(diag.line, 4);
    assert_eq!(diag.column, None);
    assert!(diag.is_error);
    assert_eq!(diag.message, "';' expected");
}

#[test]
fn parses_warning_severity() {
    let diag = parser::parse_diag("snippet.c:7:10: warning: unused variable 'x'")
        .expect("line should parse");

    assert!(!diag.is_error);
    assert_eq!(diag.column, Some(10));
}

#[test]
fn parses_fatal_error_as_error() {
    let diag = parser::parse_diag("snippet.cpp:1:10: fatal error: vector: No such file or directory")
        .expect("line should parse");

    assert!(diag.is_error);
    assert_eq!(diag.message, "vector: No such file or directory");
}

#[test]
fn drops_lines_outside_the_grammar() {
    assert!(parser::parse_diag("In function 'int main()':").is_err());
    assert!(parser::parse_diag("1 error generated.").is_err());
    assert!(parser::parse_diag("").is_err());
}

#[test]
fn hint_table_matches_missing_terminator() {
    let (hint, remediation) = hint_for("expected ';' before 'return'");
    assert_eq!(hint, CategoryHint::Syntax);
    assert!(remediation.contains("semicolon"));
}

#[test]
fn hint_table_matches_undeclared_identifier() {
    let (hint, _) = hint_for("'foo' was not declared in this scope");
    assert_eq!(hint, CategoryHint::Compilation);
}

#[test]
fn hint_table_falls_back_to_generic() {
    let (hint, remediation) = hint_for("some very unusual message");
    assert_eq!(hint, CategoryHint::None);
    assert!(!remediation.is_empty());
}

#[test]
fn scans_interpreter_traceback_with_back_window() {
    let stderr = "  File \"/tmp/snippet.py\", line 3\n    for i in range(10)\n                      ^\nSyntaxError: invalid syntax\n";

    let issues = scan_interpreter_errors(stderr);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].line(), Some(3));
    assert_eq!(issues[0].source(), IssueSource::Compiler);
    assert!(issues[0].message().contains("SyntaxError"));
}

#[test]
fn interpreter_line_defaults_to_one_without_reference() {
    let issues = scan_interpreter_errors("IndentationError: unexpected indent\n");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].line(), Some(1));
}

#[test]
fn successful_outcome_yields_no_issues() {
    let outcome = CompileOutcome {
        succeeded: true,
        stdout: String::new(),
        stderr: "noise that would otherwise parse: snippet.cpp:1:1: error: x".to_string(),
    };

    assert!(diagnostics::parse_outcome(&outcome, Language::Cpp).is_empty());
}

#[test]
fn failed_outcome_parses_only_grammar_lines() {
    let outcome = CompileOutcome {
        succeeded: false,
        stdout: String::new(),
        stderr: "snippet.cpp: In function 'int main()':\n\
                 snippet.cpp:2:5: error: expected ';' before 'return'\n\
                 snippet.cpp:3:1: warning: control reaches end of non-void function\n\
                 compilation terminated.\n"
            .to_string(),
    };

    let issues = diagnostics::parse_outcome(&outcome, Language::Cpp);
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].line(), Some(2));
    assert_eq!(issues[0].category_hint(), CategoryHint::Syntax);
    assert_eq!(issues[1].line(), Some(3));
}
