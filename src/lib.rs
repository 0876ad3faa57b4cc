//! # pixprobe
//!
//! Image dimensions and container format from header bytes alone — no pixel
//! decoding, no codec dependencies, and at most a few hundred bytes read
//! from the source.
//!
//! Detection walks an ordered registry of per-format probes. Each probe is
//! a hand-rolled parser for that format's header/box/chunk grammar,
//! hardened against truncated and hostile input: a signature match with
//! inconsistent internal structure is a clean rejection, never a panic.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pixprobe::{detect_path, Detection, ImageFormat};
//!
//! let info = detect_path("photo.jpg")?;
//! println!("{}x{} ({})", info.size.width, info.size.height, info.mimetype);
//!
//! // With a format hint and a restriction:
//! let info = Detection::new()
//!     .with_likely(&[ImageFormat::Png, ImageFormat::Jpeg])
//!     .with_must_be_one_of_likely(true)
//!     .detect_path("upload.bin")?;
//! # Ok::<(), pixprobe::DetectError>(())
//! ```
//!
//! Multi-image containers (ICO, CUR, ICNS) additionally report every
//! sub-image in [`ImageInfo::entry_sizes`].

#![forbid(unsafe_code)]

mod buffer;
mod detect;
mod error;
mod format;
mod info;
mod probes;
mod read_interface;
mod reader;

pub use buffer::Buffer;
pub use detect::{detect, detect_bytes, detect_file, detect_path, Detection};
pub use error::DetectError;
pub use format::ImageFormat;
pub use info::{EntrySizes, ImageInfo, ImageSize};
pub use read_interface::{ReadInterface, DEFAULT_CACHE_SIZE};
pub use reader::{Reader, SeekReader};
