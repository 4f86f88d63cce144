use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::commands::{Command, CommandError, CommandHistory};
use crate::layer::{LayerId, LayerNode};

/// The layer document the toolkit operates on: a tree of layers plus the
/// current selection.
#[derive(Debug, Serialize, Deserialize)]
pub struct Document {
    /// Document identifier.
    pub id: Uuid,
    pub name: String,
    /// Top-level layers in paint order (first is bottom-most).
    pub layers: Vec<LayerNode>,
    /// Selected layer ids, in selection order.
    #[serde(default)]
    pub selection: Vec<LayerId>,
    /// Command history for undo/redo.
    #[serde(skip)]
    history: CommandHistory,
}

impl Document {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            layers: Vec::new(),
            selection: Vec::new(),
            history: CommandHistory::new(),
        }
    }

    // ── Layer tree ───────────────────────────────────────────────────

    pub fn add_layer(&mut self, layer: LayerNode) -> LayerId {
        let id = layer.id;
        self.layers.push(layer);
        id
    }

    /// Find a layer anywhere in the tree, including inside instances.
    pub fn find_layer(&self, id: LayerId) -> Option<&LayerNode> {
        find_in(&self.layers, id)
    }

    pub fn find_layer_mut(&mut self, id: LayerId) -> Option<&mut LayerNode> {
        find_in_mut(&mut self.layers, id)
    }

    /// Parent id (`None` at top level) and index of a layer.
    pub fn locate(&self, id: LayerId) -> Option<(Option<LayerId>, usize)> {
        locate_in(&self.layers, None, id)
    }

    /// Detach a layer (and its subtree) from wherever it sits.
    pub fn take_layer(&mut self, id: LayerId) -> Option<LayerNode> {
        take_from(&mut self.layers, id)
    }

    /// Put `layer` in the slot currently held by `id`, returning the old layer.
    pub fn replace_layer(&mut self, id: LayerId, layer: LayerNode) -> Option<LayerNode> {
        self.find_layer_mut(id)
            .map(|slot| std::mem::replace(slot, layer))
    }

    pub fn layer_count(&self) -> usize {
        fn count(layers: &[LayerNode]) -> usize {
            layers.iter().map(|l| 1 + count(&l.children)).sum()
        }
        count(&self.layers)
    }

    // ── Selection ────────────────────────────────────────────────────

    pub fn select(&mut self, ids: Vec<LayerId>) {
        self.selection = ids;
    }

    /// The selected layers in selection order. Stale ids are skipped.
    pub fn selected_layers(&self) -> Vec<&LayerNode> {
        self.selection
            .iter()
            .filter_map(|id| self.find_layer(*id))
            .collect()
    }

    /// Owned copies of the selected subtrees, detached from the document.
    pub fn selection_snapshot(&self) -> Vec<LayerNode> {
        self.selected_layers().into_iter().cloned().collect()
    }

    // ── Undo / Redo ──────────────────────────────────────────────────

    pub fn execute_command(&mut self, command: Box<dyn Command>) -> Result<(), CommandError> {
        let mut history = std::mem::take(&mut self.history);
        let result = history.execute(command, self);
        self.history = history;
        result
    }

    pub fn undo(&mut self) -> bool {
        let mut history = std::mem::take(&mut self.history);
        let undone = history.undo(self);
        self.history = history;
        undone
    }

    pub fn redo(&mut self) -> bool {
        let mut history = std::mem::take(&mut self.history);
        let redone = history.redo(self);
        self.history = history;
        redone
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ── Serialization ────────────────────────────────────────────────

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn find_in(layers: &[LayerNode], id: LayerId) -> Option<&LayerNode> {
    layers.iter().find_map(|l| {
        if l.id == id {
            Some(l)
        } else {
            find_in(&l.children, id)
        }
    })
}

fn find_in_mut(layers: &mut [LayerNode], id: LayerId) -> Option<&mut LayerNode> {
    layers.iter_mut().find_map(|l| {
        if l.id == id {
            Some(l)
        } else {
            find_in_mut(&mut l.children, id)
        }
    })
}

fn locate_in(
    layers: &[LayerNode],
    parent: Option<LayerId>,
    id: LayerId,
) -> Option<(Option<LayerId>, usize)> {
    if let Some(index) = layers.iter().position(|l| l.id == id) {
        return Some((parent, index));
    }
    layers
        .iter()
        .find_map(|l| locate_in(&l.children, Some(l.id), id))
}

fn take_from(layers: &mut Vec<LayerNode>, id: LayerId) -> Option<LayerNode> {
    if let Some(index) = layers.iter().position(|l| l.id == id) {
        return Some(layers.remove(index));
    }
    layers
        .iter_mut()
        .find_map(|l| take_from(&mut l.children, id))
}
