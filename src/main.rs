#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # ddx
//!
//! Command-line front end for the diagnostic pipeline: point it at a
//! submission file, name the language, and it prints the analysis summary
//! as JSON. Generative suggestions are used when `OPENAI_API_KEY` is set;
//! otherwise everything degrades to deterministic templates.

use std::io::Write as _;

use anyhow::{Context, Result};
use bpaf::*;
use ddx::{Analyzer, AnalyzerConfig, Language, diagnostics, toolchain};
use dotenvy::dotenv;
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Run the full pipeline: file path, language tag, optional error file
    Analyze(String, String, Option<String>),
    /// Toolchain-only check: file path, language tag
    Check(String, String),
    /// List supported language tags
    Languages,
}

/// Parse the command line arguments and return a `Cmd` enum
fn options() -> Cmd {
    /// parses the submission file path
    fn f() -> impl Parser<String> {
        positional("FILE").help("Path to the submission source file")
    }

    /// parses the language tag
    fn l() -> impl Parser<String> {
        short('l')
            .long("language")
            .help("Language tag (cpp, c, python, java)")
            .argument("LANG")
    }

    /// parses the optional path to the submitter's error text
    fn e() -> impl Parser<Option<String>> {
        short('e')
            .long("error")
            .help("Path to a file holding the error text the submitter saw")
            .argument("PATH")
            .optional()
    }

    let analyze = construct!(Cmd::Analyze(f(), l(), e()))
        .to_options()
        .command("analyze")
        .help("Run the full diagnostic pipeline over a file");

    let check = construct!(Cmd::Check(f(), l()))
        .to_options()
        .command("check")
        .help("Invoke the toolchain only and print parsed diagnostics");

    let languages = pure(Cmd::Languages)
        .to_options()
        .command("languages")
        .help("List supported language tags");

    let cmd = construct!([analyze, check, languages]);

    cmd.to_options()
        .descr("Diagnoses defects in short program submissions")
        .run()
}

/// Appends the submission record to the JSONL sink named by
/// `DDX_SUBMISSION_LOG`, when configured.
fn log_submission(result: &ddx::AnalysisResult, code: &str, error_text: &str) -> Result<()> {
    let Ok(path) = std::env::var("DDX_SUBMISSION_LOG") else {
        return Ok(());
    };
    if path.trim().is_empty() {
        return Ok(());
    }

    let record = result.submission_record(code, error_text);
    let line = serde_json::to_string(&record).context("Could not serialize submission record")?;

    let mut sink = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Could not open submission log {path}"))?;
    writeln!(sink, "{line}").with_context(|| format!("Could not write to submission log {path}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false);
    let filter_layer = LevelFilter::from_level(Level::INFO);
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    match options() {
        Cmd::Analyze(file, lang, error_file) => {
            let language: Language = lang.parse()?;
            let code = std::fs::read_to_string(&file)
                .with_context(|| format!("Could not read {file}"))?;
            let error_text = match error_file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Could not read {path}"))?,
                None => String::new(),
            };

            let analyzer = Analyzer::from_config(&AnalyzerConfig::from_env());
            let result = analyzer.analyze(&code, language, &error_text).await?;

            println!("{}", serde_json::to_string_pretty(&result.summary())?);
            log_submission(&result, &code, &error_text)?;
        }
        Cmd::Check(file, lang) => {
            let language: Language = lang.parse()?;
            let code = std::fs::read_to_string(&file)
                .with_context(|| format!("Could not read {file}"))?;

            let outcome = toolchain::compile(&code, language).await?;
            let issues = diagnostics::parse_outcome(&outcome, language);

            println!("{}", serde_json::to_string_pretty(&issues)?);
            if !outcome.succeeded {
                eprintln!("{}", outcome.stderr);
            }
        }
        Cmd::Languages => {
            for language in Language::ALL {
                println!("{language}");
            }
        }
    };

    Ok(())
}
