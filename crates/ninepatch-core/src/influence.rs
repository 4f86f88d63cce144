//! Influence frame calculation.
//!
//! The influence frame of a set of layers is the smallest whole-pixel
//! rectangle that encloses every pixel those layers can paint, including
//! drop shadow and blur spill. Rounding is always outward.

use serde::{Deserialize, Serialize};

use crate::geometry::Bounds;
use crate::layer::LayerNode;

/// Running outward-rounded frame `[top, right, bottom, left]`.
///
/// Starts at [`InfluenceFrame::EMPTY`] and widens with every included bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InfluenceFrame {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl InfluenceFrame {
    /// Nothing included yet.
    pub const EMPTY: Self = Self {
        top: f64::INFINITY,
        right: f64::NEG_INFINITY,
        bottom: f64::NEG_INFINITY,
        left: f64::INFINITY,
    };

    /// Widen the frame to cover `bounds`, snapping outward to whole pixels.
    pub fn include(self, bounds: &Bounds) -> Self {
        Self {
            top: self.top.min(bounds.top).floor(),
            right: self.right.max(bounds.right).ceil(),
            bottom: self.bottom.max(bounds.bottom).ceil(),
            left: self.left.min(bounds.left).floor(),
        }
    }

    /// Combine two independently computed frames.
    pub fn merge(self, other: &InfluenceFrame) -> Self {
        Self {
            top: self.top.min(other.top).floor(),
            right: self.right.max(other.right).ceil(),
            bottom: self.bottom.max(other.bottom).ceil(),
            left: self.left.min(other.left).floor(),
        }
    }

    /// True until at least one bound has been included.
    pub fn is_empty(&self) -> bool {
        self.top > self.bottom || self.left > self.right
    }

    pub fn bounds(&self) -> Option<Bounds> {
        if self.is_empty() {
            None
        } else {
            Some(Bounds::new(self.top, self.right, self.bottom, self.left))
        }
    }
}

impl Default for InfluenceFrame {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// The area a single layer can paint: its rotated box widened by each of
/// its effects in order. Children are not considered.
pub fn node_bounds(node: &LayerNode) -> Bounds {
    node.effects
        .iter()
        .fold(node.box_bounds(), |bounds, effect| effect.expand(bounds))
}

/// Pre-order walk over layer subtrees that skips the insides of opaque
/// composites.
pub struct Contributions<'a> {
    stack: Vec<&'a LayerNode>,
}

impl<'a> Iterator for Contributions<'a> {
    type Item = (&'a LayerNode, Bounds);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if node.descends() {
            self.stack.extend(node.children.iter().rev());
        }
        Some((node, node_bounds(node)))
    }
}

/// Every visited layer with its own painted bounds, roots first and
/// children in document order.
pub fn contributions(roots: &[LayerNode]) -> Contributions<'_> {
    Contributions {
        stack: roots.iter().rev().collect(),
    }
}

/// Compute the shared influence frame of `roots` and all their visible
/// descendants.
///
/// An empty `roots` slice yields [`InfluenceFrame::EMPTY`]. Inputs are not
/// validated: non-finite geometry produces a meaningless frame.
pub fn compute_influence_frame(roots: &[LayerNode]) -> InfluenceFrame {
    let frame = contributions(roots).fold(InfluenceFrame::EMPTY, |frame, (node, bounds)| {
        log::trace!("layer '{}' paints {:?}", node.name, bounds);
        frame.include(&bounds)
    });
    log::debug!(
        "influence frame of {} root layer(s): {:?}",
        roots.len(),
        frame
    );
    frame
}
