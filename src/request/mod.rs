//! The fixed part of every analysis request.
pub mod prompt;
mod template;
pub mod vocabulary;

pub use template::{AnalysisRequestBuilder, GenerationParameters, RequestTemplate};
pub use vocabulary::{ImageTag, TagCategory, TagGroup, UnknownTag};
