//! # Nine-Patch Core
//!
//! Value-typed layer trees, the influence-frame calculation (rotated layer
//! bounds widened by drop shadows and blurs, snapped outward to whole
//! pixels), nine-patch layout construction, Android density buckets and
//! resource naming, and an undoable document model.
//!
//! The influence frame is the heart of the toolkit: everything else either
//! prepares the layer snapshot it reads or consumes the rectangle it returns.

pub mod geometry;
pub mod effect;
pub mod layer;
pub mod influence;
pub mod ninepatch;
pub mod density;
pub mod resource_name;
pub mod document;
pub mod commands;

pub use document::Document;
pub use effect::{DropShadow, Effect, LayerBlur};
pub use layer::{LayerId, LayerKind, LayerNode};
pub use geometry::{Bounds, Point, Rect};
pub use influence::{compute_influence_frame, node_bounds, InfluenceFrame};
pub use ninepatch::{NinePatchError, NinePatchLayout, PatchLine, PatchMarks, PatchSide, Span};
pub use density::Density;
pub use resource_name::to_android_resource_name;
