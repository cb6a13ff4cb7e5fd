use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, info, instrument, trace, warn};

use crate::backend::{ImageAnalyzer, ImageInput, check_response_status, handle_http_error};
use crate::error::{CatLensError, Result, TransportErrorKind};
use crate::request::RequestTemplate;

const PROVIDER: &str = "Gemini";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_VAR: &str = "GEMINI_API_KEY";
const MODEL_VAR: &str = "CATLENS_MODEL";
const BASE_URL_VAR: &str = "CATLENS_BASE_URL";
// whole seconds, must be positive
const TIMEOUT_VAR: &str = "CATLENS_TIMEOUT_SECS";

/// Gemini models that accept image input
///
/// Any other model id can be used through `Custom` or `FromStr`:
///
/// ```rust
/// use catlens::GeminiModel;
/// use std::str::FromStr;
///
/// let model = GeminiModel::from_str("gemini-custom").unwrap();
/// assert_eq!(model, GeminiModel::Custom("gemini-custom".to_string()));
/// assert_eq!(GeminiModel::from_string("gemini-2.5-flash"), GeminiModel::Gemini25Flash);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Model {
    /// Gemini 2.5 Pro
    Gemini25Pro,
    /// Gemini 2.5 Flash
    Gemini25Flash,
    /// Gemini 2.5 Flash Lite
    Gemini25FlashLite,
    /// Gemini 2.0 Flash
    Gemini20Flash,
    /// Gemini 2.0 Flash Experimental, the model the analysis prompt was tuned on
    #[default]
    Gemini20FlashExp,
    /// Gemini 2.0 Flash Lite
    Gemini20FlashLite,
    /// Custom model name (for new models or Gemini-compatible endpoints)
    Custom(String),
}

impl Model {
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gemini25Pro => "gemini-2.5-pro",
            Model::Gemini25Flash => "gemini-2.5-flash",
            Model::Gemini25FlashLite => "gemini-2.5-flash-lite",
            Model::Gemini20Flash => "gemini-2.0-flash",
            Model::Gemini20FlashExp => "gemini-2.0-flash-exp",
            Model::Gemini20FlashLite => "gemini-2.0-flash-lite",
            Model::Custom(name) => name,
        }
    }

    /// Create a model from a string. This always succeeds: unknown names
    /// become `Custom(name)`.
    pub fn from_string(name: impl Into<String>) -> Self {
        let name = name.into();
        match name.as_str() {
            "gemini-2.5-pro" => Model::Gemini25Pro,
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-flash-lite" => Model::Gemini25FlashLite,
            "gemini-2.0-flash" => Model::Gemini20Flash,
            "gemini-2.0-flash-exp" => Model::Gemini20FlashExp,
            "gemini-2.0-flash-lite" => Model::Gemini20FlashLite,
            _ => Model::Custom(name),
        }
    }
}

impl FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Model::from_string(s))
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for the Gemini provider
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: Model,
    /// Custom base URL for Gemini-compatible APIs.
    /// Defaults to "https://generativelanguage.googleapis.com/v1beta" if not set
    pub base_url: Option<String>,
    /// Deadline for the whole HTTP round trip; `None` means no client-side limit
    pub timeout: Option<Duration>,
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GeminiConfig {
    /// Configuration with the given key and every other setting at its default.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(CatLensError::Configuration(format!(
                "API key cannot be empty. Use GeminiConfig::from_env() to read it from {API_KEY_VAR}."
            )));
        }
        Ok(Self {
            api_key,
            model: Model::default(),
            base_url: None,
            timeout: None,
        })
    }

    /// Read the configuration from the process environment.
    ///
    /// | Variable | Meaning |
    /// |---|---|
    /// | `GEMINI_API_KEY` | API key (required) |
    /// | `CATLENS_MODEL` | model id, default `gemini-2.0-flash-exp` |
    /// | `CATLENS_BASE_URL` | API base URL |
    /// | `CATLENS_TIMEOUT_SECS` | request deadline in whole seconds |
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `GEMINI_API_KEY` is unset or empty,
    /// or if `CATLENS_TIMEOUT_SECS` is not a positive integer.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary key lookup.
    ///
    /// ```
    /// use catlens::GeminiConfig;
    ///
    /// let config = GeminiConfig::from_lookup(|key| match key {
    ///     "GEMINI_API_KEY" => Some("secret".to_string()),
    ///     "CATLENS_MODEL" => Some("gemini-2.5-flash".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.model.as_str(), "gemini-2.5-flash");
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_empty(API_KEY_VAR).ok_or_else(|| {
            CatLensError::Configuration(format!("{API_KEY_VAR} environment variable is not set"))
        })?;
        let mut config = Self::new(api_key)?;

        if let Some(model) = non_empty(MODEL_VAR) {
            config.model = Model::from_string(model.trim());
        }
        if let Some(base_url) = non_empty(BASE_URL_VAR) {
            config.base_url = Some(base_url.trim().trim_end_matches('/').to_string());
        }
        if let Some(raw) = non_empty(TIMEOUT_VAR) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|&s| s > 0)
                .ok_or_else(|| {
                    CatLensError::Configuration(format!(
                        "{TIMEOUT_VAR} must be a positive number of seconds, got `{raw}`"
                    ))
                })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

/// Gemini implementation of [`ImageAnalyzer`]
pub struct GeminiProvider {
    config: GeminiConfig,
    client: reqwest::Client,
}

// Gemini API request and response structures
#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    system_instruction: Instruction<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Instruction<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text { text: &'a str },
    InlineData { inline_data: InlineData<'a> },
}

#[derive(Debug, Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig<'a> {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
    response_mime_type: &'a str,
    response_schema: &'a Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default, rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default, rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

impl GeminiProvider {
    /// Create a provider from a configuration.
    #[instrument(name = "gemini_provider_new", skip(config), fields(model = %config.model))]
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = build_http_client(config.timeout)?;

        info!(
            model = %config.model,
            timeout = ?config.timeout,
            "Created Gemini provider"
        );

        Ok(Self { config, client })
    }

    /// Create a provider from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `GEMINI_API_KEY` is not set.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use catlens::GeminiProvider;
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let provider = GeminiProvider::from_env()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_env() -> Result<Self> {
        Self::new(GeminiConfig::from_env()?)
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Set the model to use
    #[tracing::instrument(skip(self))]
    pub fn model(mut self, model: Model) -> Self {
        tracing::debug!(
            previous_model = ?self.config.model,
            new_model = ?model,
            "Setting Gemini model"
        );
        self.config.model = model;
        self
    }

    /// Set a custom base URL for Gemini-compatible APIs.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL, e.g. "http://localhost:1234/v1beta"
    #[tracing::instrument(skip(self, base_url))]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        tracing::debug!(
            previous_base_url = ?self.config.base_url,
            new_base_url = %base_url,
            "Setting custom base URL"
        );
        self.config.base_url = Some(base_url.trim_end_matches('/').to_string());
        self
    }

    /// Set a deadline for each HTTP round trip.
    #[tracing::instrument(skip(self))]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        tracing::debug!(
            previous_timeout = ?self.config.timeout,
            new_timeout = ?timeout,
            "Setting timeout"
        );
        self.config.timeout = Some(timeout);

        self.client = build_http_client(Some(timeout)).unwrap_or_else(|e| {
            warn!(
                error = %e,
                "Failed to build reqwest client with timeout, using default"
            );
            reqwest::Client::new()
        });

        self
    }

    fn endpoint(&self) -> String {
        let base_url = self.config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        format!("{}/models/{}:generateContent", base_url, self.config.model)
    }
}

fn build_http_client(timeout: Option<Duration>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| CatLensError::Configuration(format!("cannot build HTTP client: {e}")))
}

fn build_request<'a>(
    template: &'a RequestTemplate,
    image: &'a ImageInput,
) -> GenerateContentRequest<'a> {
    let params = &template.generation;
    GenerateContentRequest {
        system_instruction: Instruction {
            parts: vec![Part::Text {
                text: &template.system_instruction,
            }],
        },
        contents: vec![Content {
            role: "user",
            parts: vec![
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: &image.mime_type,
                        data: STANDARD.encode(&image.data),
                    },
                },
                Part::Text {
                    text: template.user_instruction,
                },
            ],
        }],
        generation_config: GenerationConfig {
            temperature: params.temperature,
            top_p: params.top_p,
            top_k: params.top_k,
            max_output_tokens: params.max_output_tokens,
            response_mime_type: params.response_mime_type,
            response_schema: template.schema.to_json(),
        },
    }
}

/// Pull the answer text out of a response envelope.
fn extract_text(completion: GenerateContentResponse) -> Result<String> {
    let Some(candidate) = completion.candidates.into_iter().next() else {
        if let Some(reason) = completion.prompt_feedback.and_then(|f| f.block_reason) {
            error!(reason = %reason, "Gemini blocked the request");
            return Err(CatLensError::transport(
                PROVIDER,
                TransportErrorKind::Blocked { reason },
            ));
        }
        error!("Gemini API returned empty candidates array");
        return Err(CatLensError::transport(
            PROVIDER,
            TransportErrorKind::EmptyResponse,
        ));
    };

    trace!(finish_reason = ?candidate.finish_reason, "Completion finish reason");

    let text = candidate
        .content
        .into_iter()
        .flat_map(|content| content.parts)
        .find_map(|part| part.text);

    match text {
        Some(text) => {
            debug!(content_len = text.len(), "Extracted text content from response");
            Ok(text)
        }
        None => {
            error!(finish_reason = ?candidate.finish_reason, "No text content in Gemini response");
            Err(CatLensError::transport(
                PROVIDER,
                TransportErrorKind::EmptyResponse,
            ))
        }
    }
}

#[async_trait]
impl ImageAnalyzer for GeminiProvider {
    fn provider_name(&self) -> &str {
        PROVIDER
    }

    #[instrument(
        name = "gemini_analyze",
        skip(self, template, image),
        fields(
            model = %self.config.model,
            mime_type = %image.mime_type,
            image_len = image.data.len()
        )
    )]
    async fn analyze(&self, template: &RequestTemplate, image: &ImageInput) -> Result<String> {
        let request = build_request(template, image);
        let url = self.endpoint();
        debug!(
            url = %url,
            model = %self.config.model,
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| handle_http_error(e, PROVIDER))?;

        let response = check_response_status(response, PROVIDER).await?;

        debug!("Successfully received response from Gemini API");
        let body = response
            .text()
            .await
            .map_err(|e| handle_http_error(e, PROVIDER))?;
        let completion: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, "Failed to parse JSON response from Gemini API");
            CatLensError::transport(
                PROVIDER,
                TransportErrorKind::InvalidEnvelope {
                    details: e.to_string(),
                },
            )
        })?;

        extract_text(completion)
    }
}
