use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::backend::{ImageAnalyzer, ImageInput};
use crate::error::Result;
use crate::model::AnalysisResult;
use crate::request::RequestTemplate;

/// Runs one end-to-end analysis per image.
///
/// The client owns an [`ImageAnalyzer`] and a shared, immutable
/// [`RequestTemplate`]. It holds no per-call state, so a single client can be
/// shared (e.g. behind an `Arc`) by any number of concurrent callers.
///
/// There is no caching and no retry: every call performs a full round trip
/// and every failure is returned to the caller as-is.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// use catlens::{AnalysisClient, Detection, GeminiProvider};
///
/// // Fails here, before any request, if GEMINI_API_KEY is missing
/// let client = AnalysisClient::new(GeminiProvider::from_env()?);
///
/// let result = client.evaluate("cat.jpg").await?;
/// match result.detection() {
///     Detection::NoCat => println!("no cat detected"),
///     Detection::Cat(cat) => {
///         println!("tags: {}", cat.image_tags.join(", "));
///         println!("breed: {:?}, age: {:?} months", cat.breed_type, cat.age_months);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct AnalysisClient<A> {
    analyzer: A,
    template: Arc<RequestTemplate>,
}

impl<A: ImageAnalyzer> AnalysisClient<A> {
    /// Create a client using the process-wide request template.
    pub fn new(analyzer: A) -> Self {
        Self::with_template(analyzer, RequestTemplate::shared())
    }

    /// Create a client with an explicit request template.
    pub fn with_template(analyzer: A, template: Arc<RequestTemplate>) -> Self {
        Self { analyzer, template }
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    pub fn template(&self) -> &RequestTemplate {
        &self.template
    }

    /// Analyze the image stored at `image_path`.
    ///
    /// The file is read in full before the provider is contacted; an
    /// unreadable or unrecognised file fails with
    /// [`CatLensError::Image`](crate::CatLensError::Image) without any
    /// network traffic.
    ///
    /// # Errors
    ///
    /// - `Image` if the file cannot be used as an image payload
    /// - `Transport` if the provider call fails
    /// - `SchemaViolation` if the answer does not match the analysis schema
    ///
    /// A result with `is_cat == false` is a success, not an error.
    #[instrument(
        name = "catlens_evaluate",
        skip_all,
        fields(
            provider = self.analyzer.provider_name(),
            path = %image_path.as_ref().display()
        )
    )]
    pub async fn evaluate(&self, image_path: impl AsRef<Path>) -> Result<AnalysisResult> {
        let image = ImageInput::from_path(image_path).await?;
        self.evaluate_image(&image).await
    }

    /// Analyze an image already held in memory.
    pub async fn evaluate_image(&self, image: &ImageInput) -> Result<AnalysisResult> {
        debug!(
            mime_type = %image.mime_type,
            bytes = image.data.len(),
            "Requesting analysis"
        );
        let text = self.analyzer.analyze(&self.template, image).await?;
        let result = AnalysisResult::from_response_text(&text)?;

        info!(
            is_cat = result.is_cat,
            tags = result.image_tags.as_ref().map_or(0, Vec::len),
            "Analysis complete"
        );
        Ok(result)
    }
}
