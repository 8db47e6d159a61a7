use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use tracing::{debug, info, warn};

use crate::error::{Result, TraceError};
use crate::mask::{build_mask, rgba_from_raw};
use crate::run_encoder::encode;
use crate::svg_writer::serialize;

/// Default input when no path is given
pub const DEFAULT_INPUT: &str = "favicon.png";
/// Default output when no path is given
pub const DEFAULT_OUTPUT: &str = "favicon.svg";

/// A traced document and the facts needed to summarise it
#[derive(Debug, Clone)]
pub struct Trace {
    pub document: String,
    pub rectangles: usize,
    pub width: u32,
    pub height: u32,
}

/// What a completed run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceSummary {
    pub rectangles: usize,
    pub width: u32,
    pub height: u32,
    pub output: PathBuf,
}

impl fmt::Display for TraceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created SVG with {} rectangles", self.rectangles)?;
        writeln!(f, "Original size: {}x{}", self.width, self.height)?;
        write!(f, "Saved to: {}", self.output.display())
    }
}

/// Decode an image file into RGBA8 samples
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path).map_err(|source| TraceError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), width = img.width(), height = img.height(), "loaded image");
    Ok(img.to_rgba8())
}

/// Mask, encode and serialize an already-decoded image
pub fn trace_image(image: &RgbaImage) -> Result<Trace> {
    let (width, height) = image.dimensions();
    let mask = build_mask(image);
    let rects = encode(&mask);
    let document = serialize(&rects, i64::from(width), i64::from(height))?;

    Ok(Trace {
        document,
        rectangles: rects.len(),
        width,
        height,
    })
}

/// Trace a raw row-major RGBA8 buffer decoded elsewhere
///
/// A buffer that doesn't hold exactly `width * height` pixels is a `MalformedImage`.
pub fn trace_pixels(width: u32, height: u32, buf: Vec<u8>) -> Result<Trace> {
    let image = rgba_from_raw(width, height, buf)?;
    trace_image(&image)
}

/// Write `document` to `path` so that either the whole text lands or nothing does.
///
/// The text goes to a sibling temporary file first and is renamed into place.
pub fn write_document(path: &Path, document: &str) -> Result<()> {
    let output_error = |source: std::io::Error| TraceError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let file_name = path.file_name().ok_or_else(|| {
        output_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "output path has no file name",
        ))
    })?;
    let mut tmp_name = std::ffi::OsString::from(".");
    tmp_name.push(file_name);
    tmp_name.push(format!(".{}.tmp", std::process::id()));
    let tmp_path = path.with_file_name(tmp_name);

    let result = fs::write(&tmp_path, document).and_then(|_| fs::rename(&tmp_path, path));
    if let Err(source) = result {
        if tmp_path.exists() {
            if let Err(e) = fs::remove_file(&tmp_path) {
                warn!(path = %tmp_path.display(), error = %e, "failed to remove temporary file");
            }
        }
        return Err(output_error(source));
    }

    info!(path = %path.display(), bytes = document.len(), "wrote document");
    Ok(())
}

/// Trace the bright, opaque pixels of `input` into an SVG at `output`
pub fn trace_to_svg(input: &Path, output: &Path) -> Result<TraceSummary> {
    let image = load_image(input)?;
    let trace = trace_image(&image)?;
    write_document(output, &trace.document)?;

    Ok(TraceSummary {
        rectangles: trace.rectangles,
        width: trace.width,
        height: trace.height,
        output: output.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_trace_image_counts_runs() {
        let mut img = RgbaImage::from_pixel(3, 2, Rgba([255, 255, 255, 255]));
        img.put_pixel(1, 0, Rgba([255, 255, 255, 0]));

        let trace = trace_image(&img).unwrap();

        // Row 0 splits in two, row 1 is one run
        assert_eq!(trace.rectangles, 3);
        assert_eq!((trace.width, trace.height), (3, 2));
        assert!(trace.document.contains(r#"<rect x="0" y="1" width="3" height="1"/>"#));
    }

    #[test]
    fn test_trace_empty_image() {
        let trace = trace_image(&RgbaImage::new(0, 0)).unwrap();
        assert_eq!(trace.rectangles, 0);
        assert!(trace.document.contains(r#"viewBox="0 0 0 0""#));
    }

    #[test]
    fn test_trace_pixels_on_off_on() {
        let buf = [[255u8, 255, 255, 255], [0, 0, 0, 255], [200, 200, 200, 200]].concat();

        let trace = trace_pixels(3, 1, buf).unwrap();

        assert_eq!(trace.rectangles, 2);
        assert!(trace.document.contains(concat!(
            r#"<rect x="0" y="0" width="1" height="1"/>"#,
            r#"<rect x="2" y="0" width="1" height="1"/>"#
        )));
    }

    #[test]
    fn test_trace_pixels_rejects_short_buffer() {
        // Second row is missing a pixel
        let err = trace_pixels(2, 2, vec![255; 12]).unwrap_err();
        assert!(matches!(err, TraceError::MalformedImage(_)));

        let trace = trace_pixels(0, 0, Vec::new()).unwrap();
        assert_eq!(trace.rectangles, 0);
    }

    #[test]
    fn test_summary_lines() {
        let summary = TraceSummary {
            rectangles: 42,
            width: 32,
            height: 16,
            output: PathBuf::from("favicon.svg"),
        };

        assert_eq!(
            summary.to_string(),
            "Created SVG with 42 rectangles\nOriginal size: 32x16\nSaved to: favicon.svg"
        );
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join(format!("missing_{}.png", std::process::id()));
        let err = load_image(&path).unwrap_err();
        assert!(matches!(err, TraceError::ImageLoad { .. }));
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = std::env::temp_dir().join(format!("no_such_dir_{}", std::process::id()));
        let path = dir.join("out.svg");

        let err = write_document(&path, "<svg/>").unwrap_err();

        assert!(matches!(err, TraceError::OutputWrite { .. }));
        assert!(!path.exists());
    }
}
