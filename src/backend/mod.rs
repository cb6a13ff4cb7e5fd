mod analyzer;
#[cfg(feature = "gemini")]
pub mod gemini;
mod media;
#[cfg(feature = "gemini")]
mod utils;

pub use analyzer::ImageAnalyzer;
#[cfg(feature = "gemini")]
pub use gemini::{GeminiConfig, GeminiProvider, Model as GeminiModel};
pub use media::ImageInput;
#[cfg(feature = "gemini")]
pub(crate) use utils::{check_response_status, handle_http_error};
