use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, trace};

use crate::error::{CatLensError, Result};
use crate::request::ImageTag;
use crate::schema::{Schema, SchemaBuilder, SchemaType};

/// Structured analysis of one image.
///
/// `is_cat` is always present. The remaining fields describe the largest cat
/// in frame and may be absent, in particular when `is_cat` is `false`; use
/// [`AnalysisResult::detection`] rather than reading them directly.
///
/// Sequences keep the provider's order and duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub is_cat: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_codes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed_type: Option<String>,
    /// Estimated age in months
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

impl SchemaType for AnalysisResult {
    fn schema() -> Schema {
        let string_list = json!({ "type": "array", "items": { "type": "string" } });
        SchemaBuilder::object()
            .property("is_cat", json!({ "type": "boolean" }), true)
            .property("image_tags", string_list.clone(), false)
            .property("color_codes", string_list, false)
            .property("breed_type", json!({ "type": "string" }), false)
            .property("age", json!({ "type": "integer" }), false)
            .build()
    }

    fn schema_name() -> Option<String> {
        Some("AnalysisResult".to_string())
    }
}

/// What the image shows, with the cat fields only reachable when there is a
/// cat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection<'a> {
    NoCat,
    Cat(CatProfile<'a>),
}

/// Description of the largest cat in frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatProfile<'a> {
    pub image_tags: &'a [String],
    pub color_codes: &'a [String],
    pub breed_type: Option<&'a str>,
    pub age_months: Option<u32>,
}

impl AnalysisResult {
    /// Decode the provider's raw text into a result.
    ///
    /// The text must be a JSON object (optionally inside a markdown code
    /// fence) that conforms to [`AnalysisResult::schema`]. Types are checked
    /// strictly: `"12"` is not an integer and `"true"` is not a boolean.
    /// Every failure is a [`CatLensError::SchemaViolation`]; nothing is
    /// defaulted.
    pub fn from_response_text(text: &str) -> Result<Self> {
        let json_content = strip_code_fence(text);
        trace!(json = %json_content, "Decoding analysis response");

        let value: Value = serde_json::from_str(json_content).map_err(|e| {
            CatLensError::SchemaViolation(format!("response is not valid JSON: {e}"))
        })?;
        Self::from_json(value)
    }

    /// Validate an already parsed JSON value and convert it.
    pub fn from_json(value: Value) -> Result<Self> {
        if let Err(violations) = Self::schema().validate(&value) {
            debug!(violations = violations.len(), "Analysis response failed schema check");
            return Err(CatLensError::SchemaViolation(violations.join("; ")));
        }

        serde_json::from_value(value).map_err(|e| CatLensError::SchemaViolation(e.to_string()))
    }

    pub fn detection(&self) -> Detection<'_> {
        if !self.is_cat {
            return Detection::NoCat;
        }
        Detection::Cat(CatProfile {
            image_tags: self.image_tags.as_deref().unwrap_or_default(),
            color_codes: self.color_codes.as_deref().unwrap_or_default(),
            breed_type: self.breed_type.as_deref(),
            age_months: self.age,
        })
    }

    /// Tags from the controlled vocabulary, in response order.
    pub fn known_tags(&self) -> Vec<ImageTag> {
        self.tags().filter_map(|t| t.parse().ok()).collect()
    }

    /// Tags the provider returned that are not in the vocabulary.
    pub fn unknown_tags(&self) -> Vec<&str> {
        self.tags()
            .filter(|t| t.parse::<ImageTag>().is_err())
            .collect()
    }

    fn tags(&self) -> impl Iterator<Item = &str> {
        self.image_tags.iter().flatten().map(String::as_str)
    }
}

/// Strip a surrounding ```json ... ``` fence, if present.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();

    if trimmed.starts_with("```") {
        if let Some(start_idx) = trimmed.find('\n') {
            let after_start = &trimmed[start_idx + 1..];
            if let Some(end_idx) = after_start.rfind("```") {
                return after_start[..end_idx].trim();
            }
        }
    }

    trimmed
}
