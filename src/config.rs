#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::path::{Path, PathBuf};

/// Default model identifier for chat completions.
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Default location of the concept-model snapshot.
const DEFAULT_MODEL_PATH: &str = "models/concept_classifier.json";

/// Reads an environment variable, treating unset and blank as absent.
fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// OpenAI credentials and optional tuning parameters sourced from the
/// environment.
///
/// Absent credentials are not an error; they simply disable the generative
/// suggestion path.
#[derive(Clone)]
pub struct OpenAiEnv {
    /// Base URL for an OpenAI-compatible API endpoint, when overridden.
    api_base: Option<String>,
    /// API key used to authenticate requests.
    api_key: String,
    /// Model identifier for chat completions.
    model: String,
    /// Optional temperature override.
    temperature: Option<f32>,
    /// Optional top-p override.
    top_p: Option<f32>,
}

impl OpenAiEnv {
    /// Construct an `OpenAiEnv` from environment variables; returns `None`
    /// when no API key is configured.
    pub fn from_env() -> Option<Self> {
        let api_key = env_nonempty("OPENAI_API_KEY")?;
        let api_base = env_nonempty("OPENAI_ENDPOINT");
        let model = env_nonempty("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.into());

        let temperature = std::env::var("OPENAI_TEMPERATURE")
            .ok()
            .and_then(|s| s.parse::<f32>().ok());
        let top_p = std::env::var("OPENAI_TOP_P")
            .ok()
            .and_then(|s| s.parse::<f32>().ok());

        Some(Self {
            api_base,
            api_key,
            model,
            temperature,
            top_p,
        })
    }

    /// Returns the API base URL override, if any.
    pub fn api_base(&self) -> Option<&str> {
        self.api_base.as_deref()
    }

    /// Returns the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the configured temperature, if any.
    pub fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    /// Returns the configured top_p, if any.
    pub fn top_p(&self) -> Option<f32> {
        self.top_p
    }
}

/// Everything the analyzer needs from its environment.
#[derive(Clone, Default)]
pub struct AnalyzerConfig {
    /// Generative-service credentials, when configured.
    openai: Option<OpenAiEnv>,
    /// Where the concept-model snapshot lives; `None` disables the model.
    model_path: Option<PathBuf>,
}

impl AnalyzerConfig {
    /// Builds a config from the environment.
    ///
    /// `DDX_MODEL_PATH` overrides the snapshot location; setting it to an
    /// empty string disables the statistical model entirely.
    pub fn from_env() -> Self {
        let model_path = match std::env::var("DDX_MODEL_PATH") {
            Ok(value) if value.trim().is_empty() => None,
            Ok(value) => Some(PathBuf::from(value.trim())),
            Err(_) => Some(PathBuf::from(DEFAULT_MODEL_PATH)),
        };

        Self {
            openai: OpenAiEnv::from_env(),
            model_path,
        }
    }

    /// Returns the generative-service credentials, if configured.
    pub fn openai(&self) -> Option<&OpenAiEnv> {
        self.openai.as_ref()
    }

    /// Returns the model snapshot path, if the model is enabled.
    pub fn model_path(&self) -> Option<&Path> {
        self.model_path.as_deref()
    }
}
