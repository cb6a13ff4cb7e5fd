#![allow(dead_code)]

use async_trait::async_trait;
use catlens::{ImageAnalyzer, ImageInput, RequestTemplate, Result};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Smallest byte sequence recognised as a JPEG.
pub const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];
/// PNG signature plus the start of an IHDR chunk.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

pub fn write_image(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).expect("Failed to write image fixture");
    path
}

/// Replies with the same text to every call and counts calls.
pub struct CannedAnalyzer {
    reply: String,
    calls: AtomicUsize,
}

impl CannedAnalyzer {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageAnalyzer for CannedAnalyzer {
    fn provider_name(&self) -> &str {
        "canned"
    }

    async fn analyze(&self, _template: &RequestTemplate, _image: &ImageInput) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

/// Replies based on the image content, after a delay that depends on it, so
/// concurrent calls finish out of order.
pub struct ContentAwareAnalyzer;

#[async_trait]
impl ImageAnalyzer for ContentAwareAnalyzer {
    fn provider_name(&self) -> &str {
        "content-aware"
    }

    async fn analyze(&self, _template: &RequestTemplate, image: &ImageInput) -> Result<String> {
        if image.mime_type == "image/png" {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(r##"{"is_cat": true, "image_tags": ["LIE"], "color_codes": ["#FFFFFF"], "breed_type": "랙돌", "age": 30}"##.to_string())
        } else {
            Ok(r#"{"is_cat": false}"#.to_string())
        }
    }
}
