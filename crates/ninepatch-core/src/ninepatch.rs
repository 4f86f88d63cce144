use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{Bounds, Point, Rect};
use crate::influence::InfluenceFrame;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NinePatchError {
    #[error("No layers to build a nine-patch from")]
    EmptySelection,
}

/// One side of the 1px nine-patch border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchSide {
    Left,
    Top,
    Right,
    Bottom,
}

impl PatchSide {
    pub const ALL: [PatchSide; 4] = [
        PatchSide::Left,
        PatchSide::Top,
        PatchSide::Right,
        PatchSide::Bottom,
    ];

    /// Layer name used for the line on this side.
    pub fn name(&self) -> &'static str {
        match self {
            PatchSide::Left => "left",
            PatchSide::Top => "top",
            PatchSide::Right => "right",
            PatchSide::Bottom => "bottom",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|side| side.name() == name)
    }
}

/// A 1px patch line on one side of the content.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatchLine {
    pub side: PatchSide,
    pub rect: Rect,
}

/// Geometry of a freshly built nine-patch around an influence frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NinePatchLayout {
    /// The influence frame of the content.
    pub content: Rect,
    /// Lines in `left, top, right, bottom` order.
    pub lines: [PatchLine; 4],
    /// Top-left corner of the patch group.
    pub patch_origin: Point,
    /// The whole asset: content plus the 1px border.
    pub asset: Rect,
}

impl NinePatchLayout {
    pub fn from_frame(frame: &InfluenceFrame) -> Result<Self, NinePatchError> {
        let bounds = frame.bounds().ok_or(NinePatchError::EmptySelection)?;
        Ok(Self::from_bounds(&bounds))
    }

    fn from_bounds(b: &Bounds) -> Self {
        let width = b.width();
        let height = b.height();
        let lines = [
            PatchLine {
                side: PatchSide::Left,
                rect: Rect::new(b.left - 1.0, b.top, 1.0, height),
            },
            PatchLine {
                side: PatchSide::Top,
                rect: Rect::new(b.left, b.top - 1.0, width, 1.0),
            },
            PatchLine {
                side: PatchSide::Right,
                rect: Rect::new(b.right, b.top, 1.0, height),
            },
            PatchLine {
                side: PatchSide::Bottom,
                rect: Rect::new(b.left, b.bottom, width, 1.0),
            },
        ];
        Self {
            content: b.to_rect(),
            lines,
            patch_origin: Point::new(b.left - 1.0, b.top - 1.0),
            asset: b.expand(1.0).to_rect(),
        }
    }

    pub fn line(&self, side: PatchSide) -> &PatchLine {
        &self.lines[side as usize]
    }

    /// The region exported as the image body: the asset minus its border.
    pub fn export_slice(&self) -> Rect {
        export_slice(&self.asset)
    }
}

/// Export region of an asset group: inset by the 1px border on every side.
pub fn export_slice(asset: &Rect) -> Rect {
    asset.inset(1.0)
}

/// A half-open range `[start, end)` along one axis of the content image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub start: f64,
    pub end: f64,
}

impl Span {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

/// Stretch and padding ranges of a nine-patch, relative to its export slice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PatchMarks {
    /// From the top line: columns that may stretch.
    pub horizontal_stretch: Option<Span>,
    /// From the left line: rows that may stretch.
    pub vertical_stretch: Option<Span>,
    /// From the bottom line: columns available to content.
    pub horizontal_padding: Option<Span>,
    /// From the right line: rows available to content.
    pub vertical_padding: Option<Span>,
}

impl PatchMarks {
    pub fn from_lines(slice: &Rect, lines: &[PatchLine]) -> Self {
        let mut marks = Self::default();
        for line in lines {
            let r = &line.rect;
            let horizontal = Span::new(r.x - slice.x, r.right() - slice.x);
            let vertical = Span::new(r.y - slice.y, r.bottom() - slice.y);
            match line.side {
                PatchSide::Top => marks.horizontal_stretch = Some(horizontal),
                PatchSide::Bottom => marks.horizontal_padding = Some(horizontal),
                PatchSide::Left => marks.vertical_stretch = Some(vertical),
                PatchSide::Right => marks.vertical_padding = Some(vertical),
            }
        }
        marks
    }
}
