use std::fmt;

use tracing::debug;

use crate::mask::Mask;

/// One-pixel-tall rectangle covering a maximal run of on pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rectangle {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rectangle {
    /// Run of `width` pixels in row `y` starting at column `x`.
    pub fn run(x: u32, y: u32, width: u32) -> Self {
        Self {
            x,
            y,
            width,
            height: 1,
        }
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"<rect x="{}" y="{}" width="{}" height="{}"/>"#,
            self.x, self.y, self.width, self.height
        )
    }
}

/// Encode a mask as horizontal runs, top-to-bottom and left-to-right.
pub fn encode(mask: &Mask) -> Vec<Rectangle> {
    let mut rects = Vec::new();
    for (y, row) in mask.rows().enumerate() {
        encode_row(y as u32, row, &mut rects);
    }
    debug!(count = rects.len(), "encoded runs");
    rects
}

/// Append one rectangle per maximal run of `true` cells in `row`.
pub fn encode_row(y: u32, row: &[bool], out: &mut Vec<Rectangle>) {
    let mut run_start: Option<usize> = None;

    for (x, &on) in row.iter().enumerate() {
        match (on, run_start) {
            (true, None) => run_start = Some(x),
            (false, Some(start)) => {
                out.push(Rectangle::run(start as u32, y, (x - start) as u32));
                run_start = None;
            }
            _ => {}
        }
    }

    if let Some(start) = run_start {
        out.push(Rectangle::run(start as u32, y, (row.len() - start) as u32));
    }
}
