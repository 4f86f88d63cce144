//! Nine-patch PNG composition.
//!
//! A `.9.png` is the content image surrounded by a 1px border. Opaque black
//! border pixels mark the stretchable columns (top) and rows (left), and the
//! content padding columns (bottom) and rows (right). All other border
//! pixels, including the corners, stay fully transparent.

use std::ops::Range;
use std::path::Path;

use image::{ImageFormat, ImageResult, Rgba, RgbaImage};

use ninepatch_core::{PatchMarks, Span};

/// Colour of a nine-patch guide pixel.
pub const MARK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Pixel range covered by `span` at `scale`, rounded outward and clamped to
/// `0..extent`.
fn pixel_range(span: Option<Span>, scale: f64, extent: u32) -> Range<u32> {
    let Some(span) = span else {
        return 0..0;
    };
    let start = (span.start * scale).floor().max(0.0);
    let end = (span.end * scale).ceil().min(extent as f64);
    if end <= start {
        0..0
    } else {
        start as u32..end as u32
    }
}

/// Surround a rendered content image with nine-patch guides.
///
/// `marks` are in 1x slice coordinates; `scale` is the factor the content
/// was rendered at.
pub fn compose_nine_patch(content: &RgbaImage, marks: &PatchMarks, scale: f64) -> RgbaImage {
    let (w, h) = content.dimensions();
    let mut out = RgbaImage::new(w + 2, h + 2);
    image::imageops::replace(&mut out, content, 1, 1);

    for x in pixel_range(marks.horizontal_stretch, scale, w) {
        out.put_pixel(x + 1, 0, MARK);
    }
    for y in pixel_range(marks.vertical_stretch, scale, h) {
        out.put_pixel(0, y + 1, MARK);
    }
    for x in pixel_range(marks.horizontal_padding, scale, w) {
        out.put_pixel(x + 1, h + 1, MARK);
    }
    for y in pixel_range(marks.vertical_padding, scale, h) {
        out.put_pixel(w + 1, y + 1, MARK);
    }
    out
}

/// Encode `image` as PNG at `path`, creating parent directories.
pub fn write_png(image: &RgbaImage, path: &Path) -> ImageResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    image.save_with_format(path, ImageFormat::Png)
}
