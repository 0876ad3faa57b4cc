//! Detection registry and dispatcher.

use std::fs::File;
use std::path::Path;

use crate::error::DetectError;
use crate::info::ImageInfo;
use crate::probes::{self, Parsed, ProbeFn, ProbeId};
use crate::read_interface::ReadInterface;
use crate::reader::{Reader, SeekReader};
use crate::ImageFormat;

/// One registry row: a format tag and the probe that recognizes it.
struct Detector {
    format: ImageFormat,
    probe: ProbeId,
    run: ProbeFn,
}

/// The detection order. Constant for the process; probes before TGA are
/// order-independent, TGA must stay last (weak signature).
const REGISTRY: [Detector; 26] = [
    Detector { format: ImageFormat::Avif, probe: ProbeId::AvifHeic, run: probes::avif_heic::probe },
    Detector { format: ImageFormat::Bmp, probe: ProbeId::Bmp, run: probes::bmp::probe },
    Detector { format: ImageFormat::Cur, probe: ProbeId::CurIco, run: probes::cur_ico::probe },
    Detector { format: ImageFormat::Dds, probe: ProbeId::Dds, run: probes::dds::probe },
    Detector { format: ImageFormat::Gif, probe: ProbeId::Gif, run: probes::gif::probe },
    Detector { format: ImageFormat::Hdr, probe: ProbeId::Hdr, run: probes::hdr::probe },
    Detector { format: ImageFormat::Heic, probe: ProbeId::AvifHeic, run: probes::avif_heic::probe },
    Detector { format: ImageFormat::Icns, probe: ProbeId::Icns, run: probes::icns::probe },
    Detector { format: ImageFormat::Ico, probe: ProbeId::CurIco, run: probes::cur_ico::probe },
    Detector { format: ImageFormat::J2k, probe: ProbeId::J2k, run: probes::j2k::probe },
    Detector { format: ImageFormat::Jp2, probe: ProbeId::Jpeg2000, run: probes::jpeg2000::probe },
    Detector { format: ImageFormat::Jph, probe: ProbeId::Jpeg2000, run: probes::jpeg2000::probe },
    Detector { format: ImageFormat::Jpx, probe: ProbeId::Jpeg2000, run: probes::jpeg2000::probe },
    Detector { format: ImageFormat::Jpeg, probe: ProbeId::Jpeg, run: probes::jpeg::probe },
    Detector { format: ImageFormat::Ktx, probe: ProbeId::Ktx, run: probes::ktx::probe },
    Detector { format: ImageFormat::Pam, probe: ProbeId::Pnm, run: probes::pnm::probe },
    Detector { format: ImageFormat::Pbm, probe: ProbeId::Pnm, run: probes::pnm::probe },
    Detector { format: ImageFormat::Pfm, probe: ProbeId::Pnm, run: probes::pnm::probe },
    Detector { format: ImageFormat::Pgm, probe: ProbeId::Pnm, run: probes::pnm::probe },
    Detector { format: ImageFormat::Png, probe: ProbeId::Png, run: probes::png::probe },
    Detector { format: ImageFormat::Ppm, probe: ProbeId::Pnm, run: probes::pnm::probe },
    Detector { format: ImageFormat::Psd, probe: ProbeId::Psd, run: probes::psd::probe },
    Detector { format: ImageFormat::Qoi, probe: ProbeId::Qoi, run: probes::qoi::probe },
    Detector { format: ImageFormat::Tiff, probe: ProbeId::Tiff, run: probes::tiff::probe },
    Detector { format: ImageFormat::Webp, probe: ProbeId::Webp, run: probes::webp::probe },
    Detector { format: ImageFormat::Tga, probe: ProbeId::Tga, run: probes::tga::probe },
];

// Hint lookup indexes the registry by discriminant, so the declaration
// orders must agree.
const _: () = {
    let mut i = 0;
    while i < REGISTRY.len() {
        assert!(REGISTRY[i].format as usize == i);
        i += 1;
    }
};

fn into_info(parsed: Parsed) -> ImageInfo {
    ImageInfo::new(parsed.format, parsed.size, parsed.entry_sizes)
}

/// Detection options: an optional "try this first" hint, an ordered list of
/// likely formats, and a strict flag restricting the result to those
/// candidates.
#[derive(Clone, Debug, Default)]
pub struct Detection {
    most_likely: Option<ImageFormat>,
    likely: Vec<ImageFormat>,
    must_be_one_of_likely: bool,
}

impl Detection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run this format's probe before everything else.
    pub fn with_most_likely(mut self, format: ImageFormat) -> Self {
        self.most_likely = Some(format);
        self
    }

    /// Run these formats' probes (in order) before the full registry.
    pub fn with_likely(mut self, formats: &[ImageFormat]) -> Self {
        self.likely = formats.to_vec();
        self
    }

    /// Restrict matches to the hinted formats. With no hints set, every
    /// detection then comes back [`DetectError::UnrecognizedFormat`] —
    /// deliberate, not an oversight.
    pub fn with_must_be_one_of_likely(mut self, strict: bool) -> Self {
        self.must_be_one_of_likely = strict;
        self
    }

    /// Detect against any [`Reader`].
    pub fn detect(&self, reader: &mut dyn Reader) -> Result<ImageInfo, DetectError> {
        let mut ri = ReadInterface::new(reader)?;
        self.run_detectors(&mut ri, &mut None)
    }

    /// Detect against an in-memory buffer.
    pub fn detect_bytes(&self, data: &[u8]) -> Result<ImageInfo, DetectError> {
        let mut reader: &[u8] = data;
        self.detect(&mut reader)
    }

    /// Detect against an open file. The handle's position afterward is
    /// unspecified.
    pub fn detect_file(&self, file: &mut File) -> Result<ImageInfo, DetectError> {
        let mut reader = SeekReader::new(file);
        self.detect(&mut reader)
    }

    /// Open `path` and detect. The file is closed before returning.
    pub fn detect_path(&self, path: impl AsRef<Path>) -> Result<ImageInfo, DetectError> {
        let mut file = File::open(path)?;
        self.detect_file(&mut file)
    }

    #[cfg(test)]
    fn detect_traced(
        &self,
        reader: &mut dyn Reader,
        trace: &mut Vec<ProbeId>,
    ) -> Result<ImageInfo, DetectError> {
        let mut ri = ReadInterface::new(reader)?;
        let mut trace = Some(trace);
        self.run_detectors(&mut ri, &mut trace)
    }

    /// One pass over the registry: hint first, then the likely list, then —
    /// unless constrained — everything untried, first structural match
    /// wins. Shared probes are never invoked twice.
    fn run_detectors(
        &self,
        ri: &mut ReadInterface<'_>,
        trace: &mut Option<&mut Vec<ProbeId>>,
    ) -> Result<ImageInfo, DetectError> {
        let length = ri.length();
        let mut tried = [false; ProbeId::COUNT];

        if let Some(format) = self.most_likely {
            let detector = &REGISTRY[format as usize];
            if let Some(trace) = trace.as_deref_mut() {
                trace.push(detector.probe);
            }
            if let Some(parsed) = (detector.run)(ri, length)? {
                if !self.must_be_one_of_likely || parsed.format == format {
                    return Ok(into_info(parsed));
                }
            }
            tried[detector.probe.index()] = true;
        }

        for &format in &self.likely {
            let detector = &REGISTRY[format as usize];
            if tried[detector.probe.index()] {
                continue;
            }
            if let Some(trace) = trace.as_deref_mut() {
                trace.push(detector.probe);
            }
            if let Some(parsed) = (detector.run)(ri, length)? {
                if !self.must_be_one_of_likely || parsed.format == format {
                    return Ok(into_info(parsed));
                }
            }
            tried[detector.probe.index()] = true;
        }

        if self.must_be_one_of_likely {
            return Err(DetectError::UnrecognizedFormat);
        }

        for detector in &REGISTRY {
            if tried[detector.probe.index()] {
                continue;
            }
            if let Some(trace) = trace.as_deref_mut() {
                trace.push(detector.probe);
            }
            if let Some(parsed) = (detector.run)(ri, length)? {
                return Ok(into_info(parsed));
            }
            tried[detector.probe.index()] = true;
        }

        Err(DetectError::UnrecognizedFormat)
    }
}

/// Detect with default options against any [`Reader`].
pub fn detect(reader: &mut dyn Reader) -> Result<ImageInfo, DetectError> {
    Detection::new().detect(reader)
}

/// Detect with default options against an in-memory buffer.
pub fn detect_bytes(data: &[u8]) -> Result<ImageInfo, DetectError> {
    Detection::new().detect_bytes(data)
}

/// Detect with default options against an open file.
pub fn detect_file(file: &mut File) -> Result<ImageInfo, DetectError> {
    Detection::new().detect_file(file)
}

/// Detect with default options against a path.
pub fn detect_path(path: impl AsRef<Path>) -> Result<ImageInfo, DetectError> {
    Detection::new().detect_path(path)
}
