//! Image format tags and their string tables.

/// Supported image formats.
///
/// Declaration order is load-bearing: each variant's discriminant is its
/// position in the detection registry (see `detect::REGISTRY`), which is
/// asserted at compile time. TGA stays last — its signature is weak and its
/// probe must run after every other format has had a chance.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ImageFormat {
    Avif,
    Bmp,
    Cur,
    Dds,
    Gif,
    Hdr,
    Heic,
    Icns,
    Ico,
    J2k,
    Jp2,
    Jph,
    Jpx,
    Jpeg,
    Ktx,
    Pam,
    Pbm,
    Pfm,
    Pgm,
    Png,
    Ppm,
    Psd,
    Qoi,
    Tiff,
    Webp,
    Tga,
}

impl ImageFormat {
    /// Every format, in registry order.
    pub const ALL: [ImageFormat; 26] = [
        ImageFormat::Avif,
        ImageFormat::Bmp,
        ImageFormat::Cur,
        ImageFormat::Dds,
        ImageFormat::Gif,
        ImageFormat::Hdr,
        ImageFormat::Heic,
        ImageFormat::Icns,
        ImageFormat::Ico,
        ImageFormat::J2k,
        ImageFormat::Jp2,
        ImageFormat::Jph,
        ImageFormat::Jpx,
        ImageFormat::Jpeg,
        ImageFormat::Ktx,
        ImageFormat::Pam,
        ImageFormat::Pbm,
        ImageFormat::Pfm,
        ImageFormat::Pgm,
        ImageFormat::Png,
        ImageFormat::Ppm,
        ImageFormat::Psd,
        ImageFormat::Qoi,
        ImageFormat::Tiff,
        ImageFormat::Webp,
        ImageFormat::Tga,
    ];

    /// Short file extension (e.g. `"jpg"`).
    pub fn ext(self) -> &'static str {
        match self {
            ImageFormat::Avif => "avif",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Cur => "cur",
            ImageFormat::Dds => "dds",
            ImageFormat::Gif => "gif",
            ImageFormat::Hdr => "hdr",
            ImageFormat::Heic => "heic",
            ImageFormat::Icns => "icns",
            ImageFormat::Ico => "ico",
            ImageFormat::J2k => "j2k",
            ImageFormat::Jp2 => "jp2",
            ImageFormat::Jph => "jph",
            ImageFormat::Jpx => "jpx",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Ktx => "ktx",
            ImageFormat::Pam => "pam",
            ImageFormat::Pbm => "pbm",
            ImageFormat::Pfm => "pfm",
            ImageFormat::Pgm => "pgm",
            ImageFormat::Png => "png",
            ImageFormat::Ppm => "ppm",
            ImageFormat::Psd => "psd",
            ImageFormat::Qoi => "qoi",
            ImageFormat::Tiff => "tiff",
            ImageFormat::Webp => "webp",
            ImageFormat::Tga => "tga",
        }
    }

    /// Canonical (full) extension. Differs from [`ext`](Self::ext) only
    /// where convention does (`"jpg"` vs `"jpeg"`).
    pub fn full_ext(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpeg",
            other => other.ext(),
        }
    }

    /// MIME type string.
    pub fn mimetype(self) -> &'static str {
        match self {
            ImageFormat::Avif => "image/avif",
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::Cur => "image/cur",
            ImageFormat::Dds => "image/dds",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Hdr => "image/vnd.radiance",
            ImageFormat::Heic => "image/heic",
            ImageFormat::Icns => "image/icns",
            ImageFormat::Ico => "image/ico",
            ImageFormat::J2k => "image/j2k",
            ImageFormat::Jp2 => "image/jp2",
            ImageFormat::Jph => "image/jph",
            ImageFormat::Jpx => "image/jpx",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Ktx => "image/ktx",
            ImageFormat::Pam => "image/x-portable-arbitrarymap",
            ImageFormat::Pbm => "image/x-portable-bitmap",
            ImageFormat::Pfm => "image/x-pfm",
            ImageFormat::Pgm => "image/x-portable-graymap",
            ImageFormat::Png => "image/png",
            ImageFormat::Ppm => "image/x-portable-pixmap",
            ImageFormat::Psd => "image/psd",
            ImageFormat::Qoi => "image/qoi",
            ImageFormat::Tiff => "image/tiff",
            ImageFormat::Webp => "image/webp",
            ImageFormat::Tga => "image/tga",
        }
    }

    /// Detect format from file extension (case-insensitive).
    ///
    /// Extension lookup is a hint source only — it never overrides what the
    /// byte-level probes find.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "avif" | "avifs" => Some(ImageFormat::Avif),
            "bmp" | "dib" => Some(ImageFormat::Bmp),
            "cur" => Some(ImageFormat::Cur),
            "dds" => Some(ImageFormat::Dds),
            "gif" => Some(ImageFormat::Gif),
            "hdr" | "pic" => Some(ImageFormat::Hdr),
            "heic" | "heif" => Some(ImageFormat::Heic),
            "icns" => Some(ImageFormat::Icns),
            "ico" => Some(ImageFormat::Ico),
            "j2k" | "j2c" => Some(ImageFormat::J2k),
            "jp2" => Some(ImageFormat::Jp2),
            "jph" => Some(ImageFormat::Jph),
            "jpx" | "jpf" => Some(ImageFormat::Jpx),
            "jpg" | "jpeg" | "jpe" | "jfif" => Some(ImageFormat::Jpeg),
            "ktx" => Some(ImageFormat::Ktx),
            "pam" => Some(ImageFormat::Pam),
            "pbm" => Some(ImageFormat::Pbm),
            "pfm" => Some(ImageFormat::Pfm),
            "pgm" => Some(ImageFormat::Pgm),
            "png" => Some(ImageFormat::Png),
            "ppm" | "pnm" => Some(ImageFormat::Ppm),
            "psd" => Some(ImageFormat::Psd),
            "qoi" => Some(ImageFormat::Qoi),
            "tif" | "tiff" => Some(ImageFormat::Tiff),
            "webp" => Some(ImageFormat::Webp),
            "tga" | "icb" | "vda" | "vst" => Some(ImageFormat::Tga),
            _ => None,
        }
    }
}
