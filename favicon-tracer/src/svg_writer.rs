use crate::error::{Result, TraceError};
use crate::run_encoder::Rectangle;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Fill applied to every traced rectangle.
pub const FILL: &str = "white";

/// Render rectangles into an SVG document with a `width` x `height` canvas.
///
/// Rectangles are written in the given order inside a single filled group.
pub fn serialize(rects: &[Rectangle], width: i64, height: i64) -> Result<String> {
    let invalid = || TraceError::InvalidDimensions { width, height };
    let w = u32::try_from(width).map_err(|_| invalid())?;
    let h = u32::try_from(height).map_err(|_| invalid())?;

    let body: String = rects.iter().map(ToString::to_string).collect();

    Ok(format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="{ns}" viewBox="0 0 {w} {h}" width="{w}" height="{h}">
  <g fill="{fill}">
    {body}
  </g>
</svg>"#,
        ns = SVG_NAMESPACE,
        fill = FILL,
    ))
}
