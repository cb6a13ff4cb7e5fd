mod color;
mod result;

pub use color::{ColorCode, InvalidColorCode};
pub use result::{AnalysisResult, CatProfile, Detection};
