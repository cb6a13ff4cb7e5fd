use async_trait::async_trait;

use crate::backend::ImageInput;
use crate::error::Result;
use crate::request::RequestTemplate;

/// ImageAnalyzer is the seam between the analysis client and a hosted
/// multimodal provider.
///
/// An implementation performs exactly one round trip per call: it sends the
/// image together with the template's instruction text, schema and
/// generation parameters, and returns the provider's raw answer text. It does
/// not decode that text; [`AnalysisClient`](crate::AnalysisClient) does.
///
/// Implementations must not keep per-call mutable state, so one analyzer can
/// serve concurrent calls without locking.
///
/// # Examples
///
/// A canned analyzer, as used in tests:
///
/// ```
/// use async_trait::async_trait;
/// use catlens::{ImageAnalyzer, ImageInput, RequestTemplate, Result};
///
/// struct Canned(&'static str);
///
/// #[async_trait]
/// impl ImageAnalyzer for Canned {
///     fn provider_name(&self) -> &str {
///         "canned"
///     }
///
///     async fn analyze(&self, _template: &RequestTemplate, _image: &ImageInput) -> Result<String> {
///         Ok(self.0.to_string())
///     }
/// }
/// ```
#[async_trait]
pub trait ImageAnalyzer: Send + Sync {
    /// Name used in logs and transport errors.
    fn provider_name(&self) -> &str;

    /// Send one image with the fixed request bundle and return the raw text
    /// answer.
    async fn analyze(&self, template: &RequestTemplate, image: &ImageInput) -> Result<String>;
}

#[async_trait]
impl<T: ImageAnalyzer + ?Sized> ImageAnalyzer for std::sync::Arc<T> {
    fn provider_name(&self) -> &str {
        (**self).provider_name()
    }

    async fn analyze(&self, template: &RequestTemplate, image: &ImageInput) -> Result<String> {
        (**self).analyze(template, image).await
    }
}
