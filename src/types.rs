//! Core records: the draft being authored and the posts in the gallery.

use crate::error::{Result, StudioError};
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix the generation endpoint's payload is wrapped in.
pub const JPEG_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// Image formats recognised when exporting a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// JPEG format. The generation endpoint always returns this.
    #[default]
    Jpeg,
    /// PNG format.
    Png,
    /// WebP format.
    WebP,
}

impl ImageFormat {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::WebP => "webp",
        }
    }

    /// Detects image format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 12 {
            return None;
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(Self::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        // WebP: RIFF....WEBP
        if data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Some(Self::WebP);
        }

        None
    }
}

/// A generated image held as a data URI. Empty until something is generated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageData(String);

impl ImageData {
    /// Wraps a bare base64 payload (as returned by the generation endpoint).
    pub fn from_base64(payload: &str) -> Self {
        Self(format!("{JPEG_DATA_URI_PREFIX}{payload}"))
    }

    /// Wraps an existing string as-is.
    pub fn from_raw(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns true when no image has been generated.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the data URI.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decodes the embedded image bytes.
    pub fn decode(&self) -> Result<Vec<u8>> {
        decode_base64_lenient(&self.0)
    }
}

/// Decodes a base64 string that may be imperfectly formatted.
///
/// Accepts a data URI prefix, embedded whitespace and missing padding.
pub fn decode_base64_lenient(input: &str) -> Result<Vec<u8>> {
    let b64 = match input.find(";base64,") {
        Some(pos) => &input[pos + 8..],
        None => input,
    };

    let cleaned: String = b64.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if cleaned.is_empty() {
        return Err(StudioError::Decode("empty image payload".into()));
    }

    if let Ok(data) = base64::engine::general_purpose::STANDARD.decode(&cleaned) {
        return Ok(data);
    }

    base64::engine::general_purpose::STANDARD_NO_PAD
        .decode(&cleaned)
        .map_err(|e| StudioError::Decode(e.to_string()))
}

/// Editable fields of a [`Draft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    /// The author name.
    Name,
    /// The prompt text.
    Prompt,
}

impl std::str::FromStr for DraftField {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "name" => Ok(Self::Name),
            "prompt" => Ok(Self::Prompt),
            other => Err(StudioError::InvalidRecord(format!("unknown draft field: {other}"))),
        }
    }
}

/// The in-progress prompt/image/author tuple, not yet persisted.
///
/// Serializes to the persistence endpoint's `{ name, prompt, photo }` shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Draft {
    /// Author name shown on the published card.
    #[serde(rename = "name")]
    pub author_name: String,
    /// The text prompt.
    pub prompt: String,
    /// Generated image, empty until generation succeeds.
    #[serde(rename = "photo")]
    pub image: ImageData,
}

impl Draft {
    /// Creates an empty draft signed by `author_name`.
    pub fn new(author_name: impl Into<String>) -> Self {
        Self {
            author_name: author_name.into(),
            prompt: String::new(),
            image: ImageData::default(),
        }
    }

    /// Sets one field. No validation.
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        match field {
            DraftField::Name => self.author_name = value.into(),
            DraftField::Prompt => self.prompt = value.into(),
        }
    }

    /// A prompt is present, so generation may run.
    pub fn can_generate(&self) -> bool {
        !self.prompt.is_empty()
    }

    /// Both prompt and image are present, so the draft may be published.
    pub fn can_submit(&self) -> bool {
        !self.prompt.is_empty() && !self.image.is_empty()
    }
}

/// A persisted record from the shared gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Author name.
    #[serde(rename = "name")]
    pub author_name: String,
    /// The prompt the image was generated from.
    pub prompt: String,
    /// Image payload: a URL or a data URI.
    #[serde(rename = "photo")]
    pub image_payload: String,
}

impl Post {
    /// Checks required fields. Missing keys already fail deserialization;
    /// this rejects present-but-empty ones.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(StudioError::InvalidRecord("post has an empty _id".into()));
        }
        if self.prompt.trim().is_empty() {
            return Err(StudioError::InvalidRecord(format!(
                "post {} has an empty prompt",
                self.id
            )));
        }
        if self.image_payload.trim().is_empty() {
            return Err(StudioError::InvalidRecord(format!(
                "post {} has an empty photo",
                self.id
            )));
        }
        Ok(())
    }

    /// Case-insensitive substring match on author name or prompt.
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.author_name.to_lowercase().contains(needle)
            || self.prompt.to_lowercase().contains(needle)
    }

    /// Returns true when the payload is an inline data URI rather than a URL.
    pub fn is_inline(&self) -> bool {
        self.image_payload.starts_with("data:")
    }

    /// File name used when saving this post's image.
    pub fn download_file_name(&self, format: ImageFormat) -> String {
        format!("download-{}.{}", self.id, format.extension())
    }
}

/// Writes image bytes to `dir`, naming the file after the post and the
/// detected format. Returns the written path.
pub fn save_image_bytes(
    dir: impl AsRef<Path>,
    post: &Post,
    data: &[u8],
) -> Result<std::path::PathBuf> {
    let format = ImageFormat::from_magic_bytes(data).unwrap_or_default();
    let path = dir.as_ref().join(post.download_file_name(format));
    std::fs::write(&path, data)?;
    Ok(path)
}
