use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{FxError, FxResult};
use crate::foundation::math::fingerprint_bytes;

/// A font face loaded from font file bytes, at a fixed pixel size.
///
/// The bytes are shared, so resizing a font is cheap. Identity for caching purposes is the content
/// fingerprint of the bytes.
#[derive(Clone)]
pub struct Font {
    data: Arc<Vec<u8>>,
    fingerprint: u64,
    size_px: f32,
}

impl Font {
    /// Wrap font file bytes (TTF/OTF) at `size_px`.
    pub fn from_bytes(data: impl Into<Arc<Vec<u8>>>, size_px: f32) -> FxResult<Self> {
        let data = data.into();
        if data.is_empty() {
            return Err(FxError::validation("font bytes must be non-empty"));
        }
        validate_size(size_px)?;
        let fingerprint = fingerprint_bytes(&data);
        Ok(Self {
            data,
            fingerprint,
            size_px,
        })
    }

    /// Read a font file from disk.
    pub fn from_path(path: impl AsRef<Path>, size_px: f32) -> FxResult<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Self::from_bytes(bytes, size_px)
    }

    /// Same face at a different size.
    pub fn with_size(&self, size_px: f32) -> FxResult<Self> {
        validate_size(size_px)?;
        Ok(Self {
            size_px,
            ..self.clone()
        })
    }

    /// Pixel size.
    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    /// Raw font file bytes.
    pub fn data(&self) -> &Arc<Vec<u8>> {
        &self.data
    }

    /// Content fingerprint of the font bytes.
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }
}

fn validate_size(size_px: f32) -> FxResult<()> {
    if !size_px.is_finite() || size_px <= 0.0 {
        return Err(FxError::validation("font size_px must be finite and > 0"));
    }
    Ok(())
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("fingerprint", &format_args!("{:016x}", self.fingerprint))
            .field("bytes", &self.data.len())
            .field("size_px", &self.size_px)
            .finish()
    }
}

impl PartialEq for Font {
    fn eq(&self, other: &Self) -> bool {
        self.fingerprint == other.fingerprint && self.size_px == other.size_px
    }
}
