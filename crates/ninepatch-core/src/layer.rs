use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::effect::Effect;
use crate::geometry::{rotated_bounds, Bounds, Rect};

/// Unique layer identifier.
pub type LayerId = Uuid;

/// Plugin-data key marking the generated resource type of a layer.
pub const RESOURCE_TYPE_KEY: &str = "resourceType";
/// Value of [`RESOURCE_TYPE_KEY`] on a generated nine-patch asset group.
pub const NINE_PATCH_RESOURCE: &str = "nine-patch";

/// The kind of a layer in the document tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    /// A leaf shape (rectangle, vector, text, ...).
    Shape,
    /// A transparent grouping of layers.
    Group,
    /// A container frame.
    Frame,
    /// A component instance, treated as a black box.
    Instance,
}

/// A read-only snapshot of a layer and its subtree.
///
/// Children of a container share the container's coordinate space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerNode {
    pub id: LayerId,
    pub name: String,
    pub kind: LayerKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees about the layer's top-left corner.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub effects: Vec<Effect>,
    #[serde(default)]
    pub children: Vec<LayerNode>,
    #[serde(default)]
    pub plugin_data: BTreeMap<String, String>,
}

impl LayerNode {
    pub fn new(kind: LayerKind, name: &str, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            kind,
            x,
            y,
            width,
            height,
            rotation: 0.0,
            effects: Vec::new(),
            children: Vec::new(),
            plugin_data: BTreeMap::new(),
        }
    }

    pub fn shape(name: &str, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(LayerKind::Shape, name, x, y, width, height)
    }

    /// A group sized to the rotated boxes of its children.
    pub fn group(name: &str, children: Vec<LayerNode>) -> Self {
        let mut group = Self::new(LayerKind::Group, name, 0.0, 0.0, 0.0, 0.0);
        group.children = children;
        group.fit_to_children();
        group
    }

    pub fn instance(
        name: &str,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        children: Vec<LayerNode>,
    ) -> Self {
        let mut node = Self::new(LayerKind::Instance, name, x, y, width, height);
        node.children = children;
        node
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_effect(mut self, effect: impl Into<Effect>) -> Self {
        self.effects.push(effect.into());
        self
    }

    pub fn with_plugin_data(mut self, key: &str, value: &str) -> Self {
        self.plugin_data.insert(key.to_string(), value.to_string());
        self
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Bounds of the rotated layer box, ignoring effects.
    pub fn box_bounds(&self) -> Bounds {
        rotated_bounds(self.x, self.y, self.width, self.height, self.rotation)
    }

    pub fn is_container(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_opaque_composite(&self) -> bool {
        self.kind == LayerKind::Instance
    }

    /// Whether traversals should visit this layer's children.
    pub fn descends(&self) -> bool {
        self.is_container() && !self.is_opaque_composite()
    }

    pub fn plugin_data(&self, key: &str) -> Option<&str> {
        self.plugin_data.get(key).map(String::as_str)
    }

    pub fn is_nine_patch(&self) -> bool {
        self.plugin_data(RESOURCE_TYPE_KEY) == Some(NINE_PATCH_RESOURCE)
    }

    /// Find the first descendant named `name`, depth-first. Instances are not entered.
    pub fn find_child(&self, name: &str) -> Option<&LayerNode> {
        if !self.descends() {
            return None;
        }
        for child in &self.children {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.find_child(name) {
                return Some(found);
            }
        }
        None
    }

    /// Whether `id` names a layer anywhere below this one, instances included.
    pub fn contains_descendant(&self, id: LayerId) -> bool {
        self.children
            .iter()
            .any(|child| child.id == id || child.contains_descendant(id))
    }

    /// Resize a group to the union of its children's boxes.
    pub fn fit_to_children(&mut self) {
        let union = self
            .children
            .iter()
            .map(LayerNode::box_bounds)
            .reduce(|a, b| a.union(&b));
        if let Some(bounds) = union {
            self.x = bounds.left;
            self.y = bounds.top;
            self.width = bounds.width();
            self.height = bounds.height();
        }
    }
}
