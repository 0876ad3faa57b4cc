//! pixprobe — print image format and dimensions without decoding.

use std::collections::HashSet;
use std::path::PathBuf;

use clap::Parser;
use pixprobe::{Detection, ImageFormat, ImageSize};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "pixprobe", version, about = "Image format and dimensions from header bytes")]
struct Args {
    /// Input files or glob patterns.
    #[arg(required = true)]
    files: Vec<String>,

    /// Output as JSON, one object per file.
    #[arg(long)]
    json: bool,

    /// Expected format (by extension, e.g. "png"); its probe runs first.
    #[arg(short, long, value_parser = parse_format)]
    expect: Option<ImageFormat>,

    /// With --expect: fail unless the file really is that format.
    #[arg(long, requires = "expect")]
    strict: bool,
}

fn parse_format(value: &str) -> Result<ImageFormat, String> {
    ImageFormat::from_extension(value)
        .ok_or_else(|| format!("unknown format: {value}"))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let files = expand_inputs(&args.files)?;
    if files.is_empty() {
        anyhow::bail!("no input files found");
    }

    let mut detection = Detection::new();
    if let Some(format) = args.expect {
        detection = detection
            .with_most_likely(format)
            .with_likely(&[format])
            .with_must_be_one_of_likely(args.strict);
    }

    let multi = files.len() > 1;
    let mut failed = false;
    for (i, path) in files.iter().enumerate() {
        if multi && !args.json {
            if i > 0 {
                println!();
            }
            println!("{}:", path.display());
        }

        match detection.detect_path(path) {
            Ok(info) => {
                let display = InfoDisplay::new(path, &info);
                if args.json {
                    println!("{}", serde_json::to_string_pretty(&display)?);
                } else {
                    display.print();
                }
            }
            Err(e) => {
                eprintln!("{}: {e}", path.display());
                failed = true;
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

/// Expand glob patterns and plain paths into a deduplicated file list.
fn expand_inputs(patterns: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for pattern in patterns {
        if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
            for entry in glob::glob(pattern)? {
                let path = entry?;
                if path.is_file() {
                    if let Ok(canonical) = path.canonicalize() {
                        if seen.insert(canonical) {
                            files.push(path);
                        }
                    }
                }
            }
        } else {
            let path = PathBuf::from(pattern);
            if !path.is_file() {
                anyhow::bail!("not a file: {}", path.display());
            }
            if let Ok(canonical) = path.canonicalize() {
                if seen.insert(canonical) {
                    files.push(path);
                }
            }
        }
    }

    Ok(files)
}

#[derive(Serialize)]
struct InfoDisplay {
    path: String,
    format: String,
    ext: &'static str,
    full_ext: &'static str,
    mimetype: &'static str,
    width: i64,
    height: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    entries: Vec<EntryDisplay>,
}

#[derive(Serialize)]
struct EntryDisplay {
    width: i64,
    height: i64,
}

impl InfoDisplay {
    fn new(path: &std::path::Path, info: &pixprobe::ImageInfo) -> Self {
        Self {
            path: path.display().to_string(),
            format: format!("{:?}", info.format),
            ext: info.ext,
            full_ext: info.full_ext,
            mimetype: info.mimetype,
            width: info.size.width,
            height: info.size.height,
            entries: info.entry_sizes.iter().map(EntryDisplay::new).collect(),
        }
    }

    fn print(&self) {
        println!("  Format:     {} ({})", self.format, self.mimetype);
        println!("  Dimensions: {}x{}", self.width, self.height);
        if self.ext == self.full_ext {
            println!("  Extension:  {}", self.ext);
        } else {
            println!("  Extension:  {} ({})", self.ext, self.full_ext);
        }
        if !self.entries.is_empty() {
            println!("  Entries:");
            for entry in &self.entries {
                println!("    - {}x{}", entry.width, entry.height);
            }
        }
    }
}

impl EntryDisplay {
    fn new(size: &ImageSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
        }
    }
}
