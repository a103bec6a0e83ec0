//! Z-ordered scene graph.
//!
//! The node vector is the only place paint order exists: index 0 is painted
//! first. Nodes are kept grouped into contiguous layer bands ordered by
//! [`Layer::rank`], which lets every insertion point be found with a binary
//! search.

use crate::collision::{Collider, all_intersecting};
use crate::history::BoardJson;
use crate::layer::Layer;
use crate::shapes::{Shape, ShapeKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for live scene nodes.
pub type NodeId = Uuid;

/// Lifecycle stage of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Committed, persisted and tracked by undo/redo.
    Permanent,
    /// Live preview, replaced every frame, never persisted.
    InProgress,
    /// UI chrome (marquee, colliders), never persisted or undo-tracked.
    Temporary,
}

/// One drawn shape instance.
#[derive(Debug, Clone)]
pub struct SceneNode {
    id: NodeId,
    layer: Layer,
    pub status: Status,
    pub shape: Shape,
    selected: bool,
}

impl SceneNode {
    pub fn new(layer: Layer, status: Status, shape: Shape) -> Self {
        Self {
            id: Uuid::new_v4(),
            layer,
            status,
            shape,
            selected: false,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Layers are fixed at creation so the band ordering can't be broken.
    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}

/// Ordered sequence of scene nodes.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in paint order (bottom to top).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &SceneNode> {
        self.nodes.iter()
    }

    /// Index where a node of `layer` would be inserted.
    ///
    /// `on_top` places it above every node of the layer, otherwise below.
    /// An absent layer resolves to the boundary between the nearest lower
    /// and higher layers present.
    pub fn insertion_index(&self, layer: Layer, on_top: bool) -> usize {
        let rank = layer.rank();
        if on_top {
            self.nodes.partition_point(|n| n.layer.rank() <= rank)
        } else {
            self.nodes.partition_point(|n| n.layer.rank() < rank)
        }
    }

    /// Insert a node at the top or bottom of its layer band.
    pub fn insert(&mut self, node: SceneNode, on_top: bool) -> usize {
        let index = self.insertion_index(node.layer, on_top);
        self.nodes.insert(index, node);
        index
    }

    /// Insert a node at a caller-supplied index.
    ///
    /// The index is clamped into the node's layer band, so the layer
    /// ordering holds whatever the caller asks for. Returns the index used.
    pub fn insert_at(&mut self, node: SceneNode, index: usize) -> usize {
        let low = self.insertion_index(node.layer, false);
        let high = self.insertion_index(node.layer, true);
        let index = index.clamp(low, high);
        self.nodes.insert(index, node);
        index
    }

    pub fn remove_at(&mut self, index: usize) -> Option<SceneNode> {
        (index < self.nodes.len()).then(|| self.nodes.remove(index))
    }

    pub fn remove(&mut self, id: NodeId) -> Option<SceneNode> {
        let index = self.index_of(id)?;
        self.remove_at(index)
    }

    pub fn get(&self, index: usize) -> Option<&SceneNode> {
        self.nodes.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut SceneNode> {
        self.nodes.get_mut(index)
    }

    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Count nodes, optionally filtered by status and/or layer.
    pub fn count(&self, status: Option<Status>, layer: Option<Layer>) -> usize {
        self.nodes
            .iter()
            .filter(|n| status.is_none_or(|s| n.status == s))
            .filter(|n| layer.is_none_or(|l| n.layer == l))
            .count()
    }

    /// Inclusive index span occupied by `layer`, if any node lives there.
    pub fn range_for_layer(&self, layer: Layer) -> Option<(usize, usize)> {
        let low = self.insertion_index(layer, false);
        let high = self.insertion_index(layer, true);
        (high > low).then(|| (low, high - 1))
    }

    /// Drop every node, or every node of one layer.
    pub fn clear(&mut self, layer: Option<Layer>) -> Vec<SceneNode> {
        match layer {
            None => std::mem::take(&mut self.nodes),
            Some(layer) => match self.range_for_layer(layer) {
                Some((low, high)) => self.nodes.drain(low..=high).collect(),
                None => Vec::new(),
            },
        }
    }

    /// Ids of nodes passing `filter` whose collider intersects `target`,
    /// bottom to top.
    pub fn hits<F>(&self, target: &Collider, filter: F) -> Vec<NodeId>
    where
        F: Fn(&SceneNode) -> bool,
    {
        all_intersecting(
            target,
            self.nodes
                .iter()
                .filter(|n| filter(n))
                .map(|n| (n.id, n.shape.collider())),
        )
    }

    /// Topmost node passing `filter` that intersects `target`.
    pub fn topmost_at<F>(&self, target: &Collider, filter: F) -> Option<NodeId>
    where
        F: Fn(&SceneNode) -> bool,
    {
        self.nodes
            .iter()
            .rev()
            .filter(|n| filter(n))
            .find(|n| crate::collision::intersects(target, &n.shape.collider()))
            .map(|n| n.id)
    }

    /// Serialize every permanent node in paint order.
    pub fn to_board_json(&self) -> BoardJson {
        BoardJson {
            components: self
                .nodes
                .iter()
                .filter(|n| n.status == Status::Permanent)
                .map(|n| n.shape.to_svg_json())
                .collect(),
        }
    }

    /// Replace every permanent node with the contents of `board`.
    ///
    /// Temporary and in-progress nodes are left alone. Entries that fail to
    /// deserialize are skipped. Returns the number of nodes restored.
    pub fn restore(&mut self, board: &BoardJson) -> usize {
        self.nodes.retain(|n| n.status != Status::Permanent);
        let mut restored = 0;
        for component in &board.components {
            match Shape::from_svg_json(component) {
                Ok(shape) => {
                    self.insert(SceneNode::new(Layer::Stack, Status::Permanent, shape), true);
                    restored += 1;
                }
                Err(e) => {
                    log::warn!("Skipping {:?} component during board load: {}", component.kind, e);
                }
            }
        }
        restored
    }
}
