//! Density export of nine-patch assets.
//!
//! The export region of an asset is its box inset by the 1px patch border.
//! That region is rendered once per density, wrapped with guides read from
//! the asset's current patch lines, and written as
//! `drawable-<density>/<name>.9.png` under the output directory.

use std::path::PathBuf;

use image::imageops::FilterType;
use image::RgbaImage;
use serde::Serialize;
use thiserror::Error;

use ninepatch_core::commands::{CONTENT_GROUP, PATCH_GROUP};
use ninepatch_core::ninepatch::export_slice;
use ninepatch_core::{
    to_android_resource_name, Density, Document, LayerNode, PatchLine, PatchMarks, PatchSide, Point,
    Rect,
};

use crate::png::{compose_nine_patch, write_png};
use crate::project::ExportSettings;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Select exactly one nine-patch resource ({0} selected)")]
    SelectionCount(usize),

    #[error("Layer '{0}' is not an Android nine-patch resource")]
    NotNinePatch(String),

    #[error("Nine-patch asset has no '{0}' group")]
    MissingPart(&'static str),

    #[error("Export region is empty ({width} x {height})")]
    EmptyRegion { width: f64, height: f64 },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Produces pixels for a document region.
pub trait ContentRenderer {
    /// Render `region` (document coordinates) into an image of exactly
    /// `size` pixels.
    fn render(&mut self, region: &Rect, size: (u32, u32)) -> Result<RgbaImage, ExportError>;
}

/// Renders from a pre-rendered 1x bitmap of the document.
pub struct BitmapRenderer {
    source: RgbaImage,
    /// Document position of the bitmap's top-left pixel.
    origin: Point,
    filter: FilterType,
}

impl BitmapRenderer {
    pub fn new(source: RgbaImage, origin: Point, filter: FilterType) -> Self {
        Self {
            source,
            origin,
            filter,
        }
    }

    /// Copy `region` out of the source at 1x. Pixels outside the source are
    /// transparent.
    fn crop(&self, region: &Rect) -> RgbaImage {
        let width = region.width.ceil().max(0.0) as u32;
        let height = region.height.ceil().max(0.0) as u32;
        let mut crop = RgbaImage::new(width, height);
        let dx = (self.origin.x - region.x).round() as i64;
        let dy = (self.origin.y - region.y).round() as i64;
        image::imageops::replace(&mut crop, &self.source, dx, dy);
        crop
    }
}

impl ContentRenderer for BitmapRenderer {
    fn render(
        &mut self,
        region: &Rect,
        (width, height): (u32, u32),
    ) -> Result<RgbaImage, ExportError> {
        if width == 0 || height == 0 {
            return Err(ExportError::EmptyRegion {
                width: region.width,
                height: region.height,
            });
        }
        let crop = self.crop(region);
        if crop.dimensions() == (width, height) {
            return Ok(crop);
        }
        Ok(image::imageops::resize(&crop, width, height, self.filter))
    }
}

/// One written density variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportedImage {
    pub density: Density,
    /// Content size in pixels, without the guide border.
    pub width: u32,
    pub height: u32,
    pub path: PathBuf,
}

/// Guides of an asset's patch group relative to the export slice.
fn patch_marks(patch: &LayerNode, slice: &Rect) -> PatchMarks {
    let lines: Vec<PatchLine> = patch
        .children
        .iter()
        .filter_map(|line| {
            PatchSide::from_name(&line.name).map(|side| PatchLine {
                side,
                rect: line.rect(),
            })
        })
        .collect();
    PatchMarks::from_lines(slice, &lines)
}

/// Export the single selected nine-patch asset at every configured density.
pub fn export_nine_patch(
    doc: &Document,
    renderer: &mut dyn ContentRenderer,
    settings: &ExportSettings,
) -> Result<Vec<ExportedImage>, ExportError> {
    let selected = doc.selected_layers();
    let [asset] = selected.as_slice() else {
        return Err(ExportError::SelectionCount(selected.len()));
    };
    if !asset.is_nine_patch() {
        return Err(ExportError::NotNinePatch(asset.name.clone()));
    }
    let patch = asset
        .find_child(PATCH_GROUP)
        .ok_or(ExportError::MissingPart(PATCH_GROUP))?;
    asset
        .find_child(CONTENT_GROUP)
        .ok_or(ExportError::MissingPart(CONTENT_GROUP))?;

    let name = to_android_resource_name(&asset.name);
    let slice = export_slice(&asset.rect());
    if slice.width <= 0.0 || slice.height <= 0.0 {
        return Err(ExportError::EmptyRegion {
            width: slice.width,
            height: slice.height,
        });
    }
    let marks = patch_marks(patch, &slice);
    log::debug!("Exporting '{}' slice {:?} with marks {:?}", name, slice, marks);

    let mut exported = Vec::with_capacity(settings.densities.len());
    for &density in &settings.densities {
        let (width, height) = density.scaled_size(slice.width, slice.height);
        let content = renderer.render(&slice, (width, height))?;
        let image = compose_nine_patch(&content, &marks, density.scale());
        let path = settings.out_dir.join(density.resource_path(&name));
        write_png(&image, &path)?;
        log::info!("Wrote {} ({}x{})", path.display(), width, height);
        exported.push(ExportedImage {
            density,
            width,
            height,
            path,
        });
    }
    Ok(exported)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use ninepatch_core::commands::CreateNinePatchCommand;
    use ninepatch_core::LayerBlur;

    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    /// A document whose selection is a freshly created nine-patch around a
    /// 32x32 frame at the origin.
    fn nine_patch_doc() -> Document {
        let mut doc = Document::new("export");
        let id = doc.add_layer(
            LayerNode::shape("Chip", 2.0, 2.0, 28.0, 28.0).with_effect(LayerBlur::new(2.0)),
        );
        doc.select(vec![id]);
        doc.execute_command(Box::new(CreateNinePatchCommand::new()))
            .unwrap();
        doc
    }

    fn renderer() -> BitmapRenderer {
        BitmapRenderer::new(
            RgbaImage::from_pixel(32, 32, BLUE),
            Point::new(0.0, 0.0),
            FilterType::Nearest,
        )
    }

    fn settings(out_dir: PathBuf) -> ExportSettings {
        ExportSettings {
            out_dir,
            ..ExportSettings::default()
        }
    }

    #[test]
    fn test_exports_every_density() {
        let dir = tempfile::tempdir().unwrap();
        let doc = nine_patch_doc();
        let exported =
            export_nine_patch(&doc, &mut renderer(), &settings(dir.path().to_path_buf())).unwrap();

        let sizes: Vec<(u32, u32)> = exported.iter().map(|e| (e.width, e.height)).collect();
        assert_eq!(sizes, [(32, 32), (48, 48), (64, 64), (96, 96), (128, 128)]);

        let hdpi = &exported[1];
        assert_eq!(hdpi.path, dir.path().join("drawable-hdpi/chip.9.png"));
        let img = image::open(&hdpi.path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (50, 50));
        assert_eq!(*img.get_pixel(25, 25), BLUE);
        assert_eq!(*img.get_pixel(25, 0), crate::png::MARK);
        assert_eq!(*img.get_pixel(0, 0), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_edited_patch_lines_drive_marks() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = nine_patch_doc();
        let asset_id = doc.selection[0];
        let top_id = doc
            .find_layer(asset_id)
            .and_then(|a| a.find_child("top"))
            .map(|top| top.id)
            .unwrap();
        let top = doc.find_layer_mut(top_id).unwrap();
        top.x = 8.0;
        top.width = 16.0;

        let mut s = settings(dir.path().to_path_buf());
        s.densities = vec![Density::Xhdpi];
        let exported = export_nine_patch(&doc, &mut renderer(), &s).unwrap();
        let img = image::open(&exported[0].path).unwrap().to_rgba8();
        let marked: Vec<u32> = (1..65).filter(|&x| img.get_pixel(x, 0)[3] == 255).collect();
        assert_eq!(marked.first(), Some(&17));
        assert_eq!(marked.last(), Some(&48));
        assert_eq!(marked.len(), 32);
    }

    #[test]
    fn test_requires_single_nine_patch_selection() {
        let dir = tempfile::tempdir().unwrap();
        let s = settings(dir.path().to_path_buf());

        let mut doc = Document::new("plain");
        let err = export_nine_patch(&doc, &mut renderer(), &s).unwrap_err();
        assert!(matches!(err, ExportError::SelectionCount(0)));

        let id = doc.add_layer(LayerNode::shape("plain", 0.0, 0.0, 4.0, 4.0));
        doc.select(vec![id]);
        let err = export_nine_patch(&doc, &mut renderer(), &s).unwrap_err();
        assert!(matches!(err, ExportError::NotNinePatch(ref n) if n == "plain"));
    }

    #[test]
    fn test_missing_patch_group() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = Document::new("broken");
        let asset = LayerNode::group(
            "asset",
            vec![LayerNode::group(
                CONTENT_GROUP,
                vec![LayerNode::shape("a", 0.0, 0.0, 4.0, 4.0)],
            )],
        )
        .with_plugin_data("resourceType", "nine-patch");
        let id = doc.add_layer(asset);
        doc.select(vec![id]);
        let err = export_nine_patch(&doc, &mut renderer(), &settings(dir.path().to_path_buf()))
            .unwrap_err();
        assert!(matches!(err, ExportError::MissingPart("patch")));
    }

    #[test]
    fn test_bitmap_renderer_pads_outside_source() {
        let mut r = BitmapRenderer::new(
            RgbaImage::from_pixel(4, 4, BLUE),
            Point::new(2.0, 2.0),
            FilterType::Nearest,
        );
        let img = r.render(&Rect::new(0.0, 0.0, 4.0, 4.0), (4, 4)).unwrap();
        assert_eq!(img.get_pixel(0, 0)[3], 0);
        assert_eq!(*img.get_pixel(3, 3), BLUE);
        assert!(matches!(
            r.render(&Rect::new(0.0, 0.0, 4.0, 4.0), (0, 4)),
            Err(ExportError::EmptyRegion { .. })
        ));
    }
}
