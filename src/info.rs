//! Detection result types.

use crate::ImageFormat;

/// Width and height of an image, in pixels.
///
/// Both components are widened to `i64` so arithmetic on header fields
/// (24-bit packed values, 0-means-256 bytes, negative BMP heights) never
/// overflows. `(-1, -1)` is the unset sentinel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    pub width: i64,
    pub height: i64,
}

impl ImageSize {
    pub fn new(width: i64, height: i64) -> Self {
        Self { width, height }
    }
}

impl Default for ImageSize {
    fn default() -> Self {
        Self {
            width: -1,
            height: -1,
        }
    }
}

/// Per-entry sizes of a multi-image container, in on-disk directory order.
pub type EntrySizes = Vec<ImageSize>;

/// A successful detection: format tag, string tables, and dimensions.
///
/// Errors are carried by `Result<ImageInfo, DetectError>` rather than an
/// in-band error field, so an `ImageInfo` is always fully populated.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct ImageInfo {
    /// Detected format.
    pub format: ImageFormat,
    /// Short extension, e.g. `"jpg"`.
    pub ext: &'static str,
    /// Canonical extension, e.g. `"jpeg"`.
    pub full_ext: &'static str,
    /// MIME type string.
    pub mimetype: &'static str,
    /// Primary image size. For multi-image containers this is the first
    /// directory entry (ICO/CUR) or the largest icon (ICNS).
    pub size: ImageSize,
    /// Sub-image sizes for multi-image containers (ICO, CUR, ICNS), in
    /// on-disk order. Empty for single-image formats, meaning "same as
    /// [`size`](Self::size)".
    pub entry_sizes: EntrySizes,
}

impl ImageInfo {
    pub(crate) fn new(format: ImageFormat, size: ImageSize, entry_sizes: EntrySizes) -> Self {
        Self {
            format,
            ext: format.ext(),
            full_ext: format.full_ext(),
            mimetype: format.mimetype(),
            size,
            entry_sizes,
        }
    }
}
