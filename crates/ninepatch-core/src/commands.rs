use thiserror::Error;

use crate::document::Document;
use crate::influence::compute_influence_frame;
use crate::layer::{LayerId, LayerNode, NINE_PATCH_RESOURCE, RESOURCE_TYPE_KEY};
use crate::ninepatch::{NinePatchError, NinePatchLayout};
use crate::resource_name::to_android_resource_name;

/// Name of the group holding the selected layers inside an asset.
pub const CONTENT_GROUP: &str = "content";
/// Name of the group holding the four patch lines inside an asset.
pub const PATCH_GROUP: &str = "patch";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("Nothing is selected")]
    EmptySelection,

    #[error("Selected layer '{0}' is already a nine-patch resource")]
    AlreadyNinePatch(String),

    #[error("Layer {0} not found in document")]
    LayerNotFound(LayerId),

    #[error(transparent)]
    NinePatch(#[from] NinePatchError),
}

/// A reversible command for the undo/redo system.
pub trait Command: std::fmt::Debug + Send {
    /// Apply the command to the document. A failed command leaves the
    /// document unchanged.
    fn execute(&mut self, doc: &mut Document) -> Result<(), CommandError>;
    /// Reverse the command (undo changes).
    fn undo(&mut self, doc: &mut Document);
    /// Human-readable description for the undo/redo history.
    fn description(&self) -> &str;
}

// ══════════════════════════════════════════════════════════════════════
// Concrete Commands
// ══════════════════════════════════════════════════════════════════════

/// Wrap the selection into a nine-patch asset.
///
/// The selected layers are grouped as `content` where the last selected
/// layer sat, a `patch` group of four 1px lines is drawn around their
/// influence frame, and both are grouped into an asset named after the last
/// selected layer and tagged as a nine-patch resource. The asset becomes the
/// new selection.
///
/// A selected layer inside another selected layer moves with its ancestor
/// and is not grouped on its own, whatever the selection order.
#[derive(Debug, Default)]
pub struct CreateNinePatchCommand {
    /// Layer tree and selection before execution (set on execute).
    previous: Option<(Vec<LayerNode>, Vec<LayerId>)>,
}

impl CreateNinePatchCommand {
    pub fn new() -> Self {
        Self::default()
    }
}

fn patch_group(layout: &NinePatchLayout) -> LayerNode {
    let lines = layout
        .lines
        .iter()
        .map(|line| {
            let r = &line.rect;
            LayerNode::shape(line.side.name(), r.x, r.y, r.width, r.height)
        })
        .collect();
    LayerNode::group(PATCH_GROUP, lines)
}

impl Command for CreateNinePatchCommand {
    fn execute(&mut self, doc: &mut Document) -> Result<(), CommandError> {
        let snapshot = doc.selection_snapshot();
        let selected: Vec<LayerNode> = snapshot
            .iter()
            .filter(|layer| !snapshot.iter().any(|other| other.contains_descendant(layer.id)))
            .cloned()
            .collect();
        let Some(last) = selected.last() else {
            return Err(CommandError::EmptySelection);
        };
        if let Some(tagged) = selected.iter().find(|l| l.is_nine_patch()) {
            return Err(CommandError::AlreadyNinePatch(tagged.name.clone()));
        }

        let frame = compute_influence_frame(&selected);
        let layout = NinePatchLayout::from_frame(&frame)?;
        let last_id = last.id;
        let asset_name = to_android_resource_name(&last.name);

        let previous = (doc.layers.clone(), doc.selection.clone());
        for layer in &selected[..selected.len() - 1] {
            doc.take_layer(layer.id);
        }

        let content = LayerNode::group(CONTENT_GROUP, selected);
        let asset = LayerNode::group(&asset_name, vec![content, patch_group(&layout)])
            .with_plugin_data(RESOURCE_TYPE_KEY, NINE_PATCH_RESOURCE);
        let asset_id = asset.id;

        if doc.replace_layer(last_id, asset).is_none() {
            doc.layers = previous.0;
            doc.selection = previous.1;
            return Err(CommandError::LayerNotFound(last_id));
        }
        doc.select(vec![asset_id]);

        log::info!(
            "Created nine-patch '{}' with content frame {:?}",
            asset_name,
            layout.content
        );
        self.previous = Some(previous);
        Ok(())
    }

    fn undo(&mut self, doc: &mut Document) {
        if let Some((layers, selection)) = self.previous.take() {
            doc.layers = layers;
            doc.selection = selection;
        }
    }

    fn description(&self) -> &str {
        "Create nine-patch"
    }
}

/// Manages the undo/redo history stack.
#[derive(Debug, Default)]
pub struct CommandHistory {
    undo_stack: Vec<Box<dyn Command>>,
    redo_stack: Vec<Box<dyn Command>>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Run a command and record it. Failed commands are not recorded.
    pub fn execute(
        &mut self,
        mut command: Box<dyn Command>,
        doc: &mut Document,
    ) -> Result<(), CommandError> {
        command.execute(doc)?;
        self.undo_stack.push(command);
        // Executing a new command clears the redo stack.
        self.redo_stack.clear();
        Ok(())
    }

    pub fn undo(&mut self, doc: &mut Document) -> bool {
        if let Some(mut command) = self.undo_stack.pop() {
            command.undo(doc);
            self.redo_stack.push(command);
            true
        } else {
            false
        }
    }

    pub fn redo(&mut self, doc: &mut Document) -> bool {
        if let Some(mut command) = self.redo_stack.pop() {
            if let Err(e) = command.execute(doc) {
                log::warn!("Redo of '{}' failed: {}", command.description(), e);
                return false;
            }
            self.undo_stack.push(command);
            true
        } else {
            false
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().map(|c| c.description())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(|c| c.description())
    }
}
