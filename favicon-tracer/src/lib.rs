//! Trace the bright, opaque pixels of a raster image into an SVG made of
//! one-pixel-tall rectangles, one per horizontal run.

pub mod error;
pub mod mask;
pub mod run_encoder;
pub mod svg_writer;
pub mod tracer;

pub use error::{Result, TraceError};
pub use mask::{build_mask, Mask};
pub use run_encoder::{encode, Rectangle};
pub use svg_writer::serialize;
pub use tracer::{trace_image, trace_pixels, trace_to_svg, Trace, TraceSummary};
