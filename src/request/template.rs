use std::sync::{Arc, LazyLock};

use tracing::debug;

use super::prompt::{USER_INSTRUCTION, system_instruction};
use crate::model::AnalysisResult;
use crate::schema::{Schema, SchemaType};

/// Fixed sampling configuration sent with every request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParameters {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
    pub response_mime_type: &'static str,
}

impl GenerationParameters {
    pub const DEFAULT: GenerationParameters = GenerationParameters {
        temperature: 1.0,
        top_p: 0.95,
        top_k: 40,
        max_output_tokens: 8192,
        response_mime_type: "application/json",
    };
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Everything sent with a request except the image itself.
///
/// Built once per process and shared read-only between calls; see
/// [`RequestTemplate::shared`].
#[derive(Debug, Clone, PartialEq)]
pub struct RequestTemplate {
    pub system_instruction: String,
    pub user_instruction: &'static str,
    pub schema: Schema,
    pub generation: GenerationParameters,
}

static SHARED: LazyLock<Arc<RequestTemplate>> =
    LazyLock::new(|| Arc::new(AnalysisRequestBuilder::new().build()));

impl RequestTemplate {
    /// The process-wide template, built on first use.
    pub fn shared() -> Arc<RequestTemplate> {
        Arc::clone(&SHARED)
    }
}

/// Assembles the [`RequestTemplate`] from the vocabulary, the instruction
/// text, the analysis schema and the fixed generation parameters.
///
/// ```
/// use catlens::AnalysisRequestBuilder;
///
/// let template = AnalysisRequestBuilder::new().build();
/// assert_eq!(template.generation.response_mime_type, "application/json");
/// assert_eq!(template, AnalysisRequestBuilder::new().build());
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalysisRequestBuilder;

impl AnalysisRequestBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self) -> RequestTemplate {
        let template = RequestTemplate {
            system_instruction: system_instruction(),
            user_instruction: USER_INSTRUCTION,
            schema: AnalysisResult::schema(),
            generation: GenerationParameters::DEFAULT,
        };
        debug!(
            instruction_len = template.system_instruction.len(),
            "Built analysis request template"
        );
        template
    }
}
