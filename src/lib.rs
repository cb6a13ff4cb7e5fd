//! catlens: structured cat photo analysis over a hosted multimodal model
//!
//! # Overview
//!
//! catlens sends a photo, a fixed instruction text and a fixed output schema
//! to a hosted multimodal model and decodes the answer into a strongly-typed,
//! schema-checked [`AnalysisResult`]: whether the photo contains a cat, pose
//! and composition tags, coat color codes, breed, and estimated age in months.
//!
//! Key pieces:
//! - [`AnalysisRequestBuilder`] / [`RequestTemplate`]: the immutable request
//!   bundle (instruction text, schema, generation parameters), built once
//! - [`ImageAnalyzer`]: the provider seam; [`GeminiProvider`] is the hosted
//!   implementation, tests substitute their own
//! - [`AnalysisClient::evaluate`]: one image in, one result or error out
//! - [`CatLensError`]: configuration, transport, schema and image failures
//!
//! When several cats are in frame, every field except `is_cat` describes the
//! largest one. That rule is part of the instruction text; the client cannot
//! verify it.
//!
//! # Quick Start
//!
//! ```no_run
//! use catlens::{AnalysisClient, Detection, GeminiProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AnalysisClient::new(GeminiProvider::from_env()?);
//!
//!     let result = client.evaluate("cat.jpg").await?;
//!     match result.detection() {
//!         Detection::NoCat => println!("No cat here"),
//!         Detection::Cat(cat) => println!("Breed: {:?}", cat.breed_type),
//!     }
//!
//!     Ok(())
//! }
//! ```
mod backend;
mod client;
mod error;
#[cfg(feature = "logging")]
pub mod logging;
pub mod model;
pub mod request;
pub mod schema;

// Re-exports for convenience
pub use backend::{ImageAnalyzer, ImageInput};
pub use client::AnalysisClient;
pub use error::{CatLensError, Result, TransportErrorKind};
pub use model::{AnalysisResult, CatProfile, ColorCode, Detection};
pub use request::{AnalysisRequestBuilder, GenerationParameters, ImageTag, RequestTemplate};
pub use schema::{Schema, SchemaBuilder, SchemaType};

#[cfg(feature = "gemini")]
pub use backend::{GeminiConfig, GeminiModel, GeminiProvider};
