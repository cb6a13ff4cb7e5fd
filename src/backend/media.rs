use std::path::Path;

use tracing::{debug, instrument};

use crate::error::{CatLensError, Result};

/// Raw image bytes plus their MIME type, ready to be attached to a request.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageInput {
    pub data: Vec<u8>,
    pub mime_type: String,
}

impl std::fmt::Debug for ImageInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageInput")
            .field("mime_type", &self.mime_type)
            .field("len", &self.data.len())
            .finish()
    }
}

impl ImageInput {
    /// Wrap bytes already in memory.
    pub fn from_bytes(data: impl Into<Vec<u8>>, mime_type: impl Into<String>) -> Result<Self> {
        let data = data.into();
        let mime_type = mime_type.into();
        if data.is_empty() {
            return Err(CatLensError::Image("image data cannot be empty".to_string()));
        }
        if mime_type.is_empty() {
            return Err(CatLensError::Image("image mime_type cannot be empty".to_string()));
        }
        Ok(Self { data, mime_type })
    }

    /// Read an image file.
    ///
    /// The whole file is read in one call and the handle is closed before
    /// this returns, on success and on error. The MIME type comes from the
    /// file's magic bytes, or from its extension when those are not
    /// recognised.
    #[instrument(name = "image_from_path", skip_all, fields(path = %path.as_ref().display()))]
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| CatLensError::Image(format!("cannot read {}: {e}", path.display())))?;

        if data.is_empty() {
            return Err(CatLensError::Image(format!("{} is empty", path.display())));
        }

        let mime_type = sniff_mime_type(&data)
            .or_else(|| mime_type_from_extension(path))
            .ok_or_else(|| {
                CatLensError::Image(format!("{} is not a supported image format", path.display()))
            })?;

        debug!(bytes = data.len(), mime_type, "Loaded image");
        Ok(Self {
            data,
            mime_type: mime_type.to_string(),
        })
    }
}

/// Identify common raster formats from their leading bytes.
pub(crate) fn sniff_mime_type(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if data.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("image/png")
    } else if data.len() >= 12 && &data[..4] == b"RIFF" && &data[8..12] == b"WEBP" {
        Some("image/webp")
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if data.len() >= 12 && &data[4..8] == b"ftyp" {
        match &data[8..12] {
            b"heic" | b"heix" => Some("image/heic"),
            b"mif1" | b"msf1" | b"heif" => Some("image/heif"),
            _ => None,
        }
    } else {
        None
    }
}

fn mime_type_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "heic" => Some("image/heic"),
        "heif" => Some("image/heif"),
        _ => None,
    }
}
