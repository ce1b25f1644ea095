#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Suggestion generation: a generative external service when configured,
//! deterministic templated advice otherwise.

use async_openai::{
    Client as OpenAIClient,
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest,
    },
};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    config::OpenAiEnv,
    constants::{
        COMPILATION_ERROR, LOGIC_ERROR, NO_ERROR_PLACEHOLDER, PROMPT_TRUNCATE, SYNTAX_ERROR,
        TRUNCATION_MARKER,
    },
    heuristics::{self, DetectorFamily},
    language::Language,
};

/// Where a suggestion came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionSource {
    /// Produced by the generative external service.
    Generative,
    /// Produced by the deterministic template fallback.
    Template,
}

/// Failure modes of the generative service. All of them are recovered
/// locally; none propagate to the pipeline's caller.
#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    /// No credentials are configured.
    #[error("generative service is not configured")]
    NotConfigured,
    /// The request could not be built or the service could not be reached.
    #[error("generative request failed")]
    Request(#[from] OpenAIError),
    /// The service answered without usable content.
    #[error("generative service returned no content")]
    EmptyResponse,
}

/// System message sent with every generative request.
const SYSTEM_MESSAGE: &str = "You are an expert competitive programming mentor and debugging \
                              assistant. Analyze code issues with precision and provide \
                              specific, actionable fixes. Focus on the most critical issue \
                              first, especially syntax and compilation errors.";

/// Truncates code for inclusion in a generative prompt, appending the
/// truncation marker when anything was cut.
pub fn truncate_for_prompt(code: &str) -> String {
    if code.chars().count() <= PROMPT_TRUNCATE {
        return code.to_string();
    }

    let mut cut: String = code.chars().take(PROMPT_TRUNCATE).collect();
    cut.push_str(TRUNCATION_MARKER);
    cut
}

/// Static per-topic checklists for algorithmic-topic concepts.
const TOPIC_CHECKLISTS: &[(&str, &str)] = &[
    (
        "Binary Search",
        "**Binary Search checklist:**\n\
         • Check the loop condition (left <= right vs left < right)\n\
         • Use `mid = left + (right - left) / 2` to prevent overflow\n\
         • Ensure the array is sorted before searching\n\
         • Handle edge cases: empty array, single element\n\
         • Verify the search condition logic",
    ),
    (
        "Dynamic Programming",
        "**DP debugging checklist:**\n\
         • Verify base cases are correct\n\
         • Check state transitions and the recurrence relation\n\
         • Ensure you are not accessing out-of-bounds indices\n\
         • Consider bottom-up vs top-down\n\
         • Check whether you need a 1D or 2D table",
    ),
    (
        "Graph Traversal",
        "**Graph traversal checklist:**\n\
         • Mark nodes visited when they are discovered, not when processed\n\
         • Build the adjacency list for both directions when the graph is undirected\n\
         • Handle disconnected components with an outer loop\n\
         • Watch recursion depth on deep graphs; prefer an explicit stack",
    ),
    (
        "Sorting",
        "**Sorting checklist:**\n\
         • Confirm the comparator is strict-weak (no `<=` comparators)\n\
         • Sort before any step that assumes order\n\
         • Check whether stability matters for equal keys\n\
         • Mind integer overflow inside custom comparators",
    ),
    (
        "Array Manipulation",
        "**Array checklist:**\n\
         • Verify every index stays within `[0, n)`\n\
         • Check off-by-one at both ends of ranges\n\
         • Initialize arrays before reading from them\n\
         • Watch for aliasing when reading and writing the same array",
    ),
    (
        "String Processing",
        "**String checklist:**\n\
         • Mind character vs byte indexing\n\
         • Strip or normalize whitespace before comparing\n\
         • Check empty-string edge cases\n\
         • Verify the expected case sensitivity",
    ),
    (
        "Tree Algorithms",
        "**Tree checklist:**\n\
         • Handle the empty tree and the single-node tree\n\
         • Null-check children before recursing\n\
         • Verify the traversal order matches the requirement\n\
         • Distinguish height vs depth conventions",
    ),
    (
        "Greedy Algorithm",
        "**Greedy checklist:**\n\
         • Prove (or at least test) the greedy choice against small counterexamples\n\
         • Check the sort key driving the greedy order\n\
         • Handle ties deterministically\n\
         • Compare against brute force on tiny inputs",
    ),
    (
        "Backtracking",
        "**Backtracking checklist:**\n\
         • Undo every state change when unwinding\n\
         • Verify the base case terminates every branch\n\
         • Prune impossible branches early\n\
         • Copy, not alias, any solution you record",
    ),
    (
        "Mathematics",
        "**Math checklist:**\n\
         • Watch for integer overflow; use 64-bit accumulators\n\
         • Mind integer vs floating division\n\
         • Apply the modulus after every multiplication when required\n\
         • Check negative-number behavior of `%`",
    ),
];

/// Fallback checklist when no concept-specific advice exists.
const GENERAL_CHECKLIST: &str = "**General debugging:**\n\
                                 • Add debug prints to trace execution\n\
                                 • Test with simple inputs first\n\
                                 • Check variable types and values\n\
                                 • Verify the logic step by step\n\
                                 • Consider edge cases";

/// One-line tip appended to every templated suggestion.
fn tip_for(concept: &str) -> &'static str {
    match concept {
        SYNTAX_ERROR => "💡 Always check for missing semicolons, brackets, and typos in keywords!",
        COMPILATION_ERROR => "💡 Make sure all required headers are included and types match!",
        LOGIC_ERROR => "💡 Test with small inputs and trace through your algorithm step by step!",
        "Binary Search" => "💡 Always verify your array is sorted before binary search!",
        "Dynamic Programming" => "💡 Draw out small examples to verify your DP logic!",
        _ => "💡 Break down complex problems into smaller parts!",
    }
}

/// Produces natural-language fix suggestions for classified submissions.
pub struct SuggestionEngine {
    /// Generative-service credentials, when configured.
    openai: Option<OpenAiEnv>,
}

impl SuggestionEngine {
    /// Creates an engine around optional generative credentials.
    pub fn new(openai: Option<OpenAiEnv>) -> Self {
        Self { openai }
    }

    /// Produces a suggestion for the submission, preferring the generative
    /// service and degrading to templates on any failure.
    pub async fn suggest(
        &self,
        code: &str,
        error_text: &str,
        concept: &str,
        confidence: f64,
        language: Language,
    ) -> (String, SuggestionSource) {
        match self
            .generative(code, error_text, concept, confidence, language)
            .await
        {
            Ok(text) => (text, SuggestionSource::Generative),
            Err(ServiceError::NotConfigured) => {
                debug!("no generative service configured, using templates");
                (
                    self.template(code, error_text, concept, language),
                    SuggestionSource::Template,
                )
            }
            Err(err) => {
                warn!(%err, "generative service unavailable, falling back to templates");
                (
                    self.template(code, error_text, concept, language),
                    SuggestionSource::Template,
                )
            }
        }
    }

    /// One request to the generative service; no retries.
    async fn generative(
        &self,
        code: &str,
        error_text: &str,
        concept: &str,
        confidence: f64,
        language: Language,
    ) -> Result<String, ServiceError> {
        let env = self.openai.as_ref().ok_or(ServiceError::NotConfigured)?;

        let mut openai_config = OpenAIConfig::new().with_api_key(env.api_key());
        if let Some(base) = env.api_base() {
            openai_config = openai_config.with_api_base(base);
        }
        let client = OpenAIClient::with_config(openai_config);

        let error_text = error_text.trim();
        let error_field = if error_text.is_empty() {
            NO_ERROR_PLACEHOLDER
        } else {
            error_text
        };

        let user_message = format!(
            "Code ({language}):\n```\n{code}\n```\n\nError/Issue: {error}\nDetected issue \
             type: {concept}\nConfidence: {confidence}%\n\nPlease provide:\n1. **Root Cause**: \
             what exactly is wrong\n2. **Fix**: the specific code correction needed\n3. \
             **Explanation**: why this error occurs\n4. **Prevention**: how to avoid this in \
             future\n\nBe concise and focus on the primary issue.",
            language = language,
            code = truncate_for_prompt(code),
            error = error_field,
            concept = concept,
            confidence = (confidence * 100.0).round() as i64,
        );

        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(SYSTEM_MESSAGE)
                .build()?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_message)
                .build()?
                .into(),
        ];

        let response = client
            .chat()
            .create(CreateChatCompletionRequest {
                model: env.model().to_string(),
                messages,
                temperature: env.temperature(),
                top_p: env.top_p(),
                n: Some(1),
                stream: Some(false),
                ..Default::default()
            })
            .await?;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(ServiceError::EmptyResponse)
    }

    /// Deterministic templated advice for the given concept.
    fn template(&self, code: &str, error_text: &str, concept: &str, language: Language) -> String {
        let body = match concept {
            SYNTAX_ERROR => self.syntax_checklist(code, language),
            COMPILATION_ERROR => self.compilation_checklist(code, language),
            LOGIC_ERROR => self.logic_checklist(code, language),
            topic => TOPIC_CHECKLISTS
                .iter()
                .find(|(label, _)| *label == topic)
                .map(|(_, checklist)| (*checklist).to_string())
                .unwrap_or_else(|| GENERAL_CHECKLIST.to_string()),
        };

        let error_text = error_text.trim();
        let body = if error_text.is_empty() {
            body
        } else {
            format!("**Error analysis:** {error_text}\n\n{body}")
        };

        format!("{body}\n\n{tip}", tip = tip_for(concept))
    }

    /// Code-derived bullets for one detector family.
    fn detector_bullets(
        &self,
        family: DetectorFamily,
        code: &str,
        language: Language,
    ) -> Vec<String> {
        heuristics::run(family, code, language)
            .into_iter()
            .map(|issue| match issue.remediation() {
                Some(fix) => format!("❌ {}\n✅ Fix: {}", issue.message(), fix),
                None => format!("❌ {}", issue.message()),
            })
            .collect()
    }

    /// Concrete-or-generic advice for syntax errors.
    fn syntax_checklist(&self, code: &str, language: Language) -> String {
        let bullets = self.detector_bullets(DetectorFamily::Syntax, code, language);
        if bullets.is_empty() {
            return "**Common syntax issues to check:**\n\
                    • Missing semicolons at the end of statements\n\
                    • Unmatched brackets: (), [], {}\n\
                    • Typos in keywords (return, include, etc.)\n\
                    • Missing colons after if/for/while in Python"
                .to_string();
        }
        bullets.iter().join("\n")
    }

    /// Concrete advice for compilation errors, always followed by the
    /// general fixes.
    fn compilation_checklist(&self, code: &str, language: Language) -> String {
        let mut bullets = vec!["**Compilation error analysis:**".to_string()];
        bullets.extend(self.detector_bullets(DetectorFamily::Compilation, code, language));
        bullets.push(
            "**General compilation fixes:**\n\
             • Check all variable declarations\n\
             • Ensure function signatures match their calls\n\
             • Verify all required headers are included\n\
             • Check for type mismatches"
                .to_string(),
        );
        bullets.iter().join("\n")
    }

    /// Concrete advice for logic errors, always followed by the general
    /// pitfalls.
    fn logic_checklist(&self, code: &str, language: Language) -> String {
        let mut bullets = vec!["**Logic error analysis:**".to_string()];
        bullets.extend(self.detector_bullets(DetectorFamily::Logic, code, language));
        bullets.push(
            "**Common logic issues:**\n\
             • Off-by-one errors in loops\n\
             • Integer overflow in calculations\n\
             • Wrong loop conditions\n\
             • Incorrect array indexing"
                .to_string(),
        );
        bullets.iter().join("\n")
    }
}
