//! Board: node lifecycle on top of the scene graph and undo history.
//!
//! Every mutation of the scene goes through [`Board`]. Permanent nodes
//! created without an explicit commit mark the board dirty; the pending
//! snapshot is taken the next time any mutating operation starts, so one
//! user action produces at most one undo entry.

use crate::history::{BoardJson, DEFAULT_MAX_HISTORY, UndoRedoStack, UndoRedoStacks};
use crate::layer::Layer;
use crate::scene::{NodeId, SceneGraph, SceneNode, Status};
use crate::shapes::{Shape, SvgJson};

/// Receiver of scene changes, typically a renderer.
///
/// Nodes can only be created while a target is attached.
pub trait RenderTarget {
    fn node_inserted(&mut self, _index: usize, _node: &SceneNode) {}
    fn node_updated(&mut self, _index: usize, _node: &SceneNode) {}
    fn node_removed(&mut self, _index: usize, _node: &SceneNode) {}
    fn board_reloaded(&mut self, _scene: &SceneGraph) {}
}

/// Target that ignores every notification. Used by tests and servers.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessTarget;

impl RenderTarget for HeadlessTarget {}

/// Where a duplicate is placed relative to its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Directly above the source node.
    NextTo,
    /// On top of the source node's layer.
    OnTop,
}

/// Notifications queued for UI consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvent {
    /// The board is about to be replaced by undo/redo.
    WillChange,
    /// History changed (commit, undo, redo or load).
    Changed { can_undo: bool, can_redo: bool },
}

/// Synchronous observer of undo/redo swaps.
///
/// `will_change` runs before the scene is rebuilt, so an active gesture can
/// tear down its previews while its node ids are still valid.
pub trait HistoryObserver {
    fn will_change(&mut self, board: &mut Board);

    fn changed(&mut self, _board: &mut Board) {}
}

impl HistoryObserver for () {
    fn will_change(&mut self, _board: &mut Board) {}
}

/// Owner of the scene graph and its undo history.
pub struct Board {
    scene: SceneGraph,
    history: UndoRedoStack,
    target: Option<Box<dyn RenderTarget>>,
    needs_snapshot: bool,
    events: Vec<BoardEvent>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Board")
            .field("nodes", &self.scene.len())
            .field("undo_len", &self.history.undo_len())
            .field("redo_len", &self.history.redo_len())
            .field("attached", &self.target.is_some())
            .field("needs_snapshot", &self.needs_snapshot)
            .finish()
    }
}

impl Board {
    pub fn new(max_history: usize) -> Self {
        Self {
            scene: SceneGraph::new(),
            history: UndoRedoStack::new(max_history),
            target: None,
            needs_snapshot: false,
            events: Vec::new(),
        }
    }

    /// Create a board with a [`HeadlessTarget`] already attached.
    pub fn headless() -> Self {
        let mut board = Self::default();
        board.attach(Box::new(HeadlessTarget));
        board
    }

    // ---- Render target ----

    pub fn attach(&mut self, target: Box<dyn RenderTarget>) {
        self.target = Some(target);
        if let Some(target) = self.target.as_mut() {
            target.board_reloaded(&self.scene);
        }
    }

    pub fn detach(&mut self) -> Option<Box<dyn RenderTarget>> {
        self.target.take()
    }

    pub fn is_attached(&self) -> bool {
        self.target.is_some()
    }

    // ---- Queries ----

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.scene.node(id)
    }

    pub fn len(&self) -> usize {
        self.scene.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scene.is_empty()
    }

    /// Ids of selected nodes in paint order.
    pub fn selected_ids(&self) -> Vec<NodeId> {
        self.scene
            .iter()
            .filter(|n| n.is_selected())
            .map(|n| n.id())
            .collect()
    }

    /// Serialized permanent nodes.
    pub fn to_board_json(&self) -> BoardJson {
        self.scene.to_board_json()
    }

    /// Whether a lazy snapshot is waiting to be taken.
    pub fn has_pending_snapshot(&self) -> bool {
        self.needs_snapshot
    }

    // ---- Lifecycle ----

    /// Create a node at the top or bottom of `layer`.
    ///
    /// Returns `None` when no render target is attached.
    pub fn create(
        &mut self,
        layer: Layer,
        shape: Shape,
        status: Status,
        on_top: bool,
    ) -> Option<NodeId> {
        self.flush_pending();
        if self.target.is_none() {
            log::debug!("Ignoring create: no render target attached");
            return None;
        }
        let node = SceneNode::new(layer, status, shape);
        let index = self.scene.insert(node, on_top);
        Some(self.after_insert(index))
    }

    /// Create a node near `index`, clamped into its layer band.
    pub fn create_at(
        &mut self,
        layer: Layer,
        shape: Shape,
        status: Status,
        index: usize,
    ) -> Option<NodeId> {
        self.flush_pending();
        if self.target.is_none() {
            return None;
        }
        let node = SceneNode::new(layer, status, shape);
        let index = self.scene.insert_at(node, index);
        Some(self.after_insert(index))
    }

    /// Clone `source` through its serialized form.
    pub fn duplicate(
        &mut self,
        source: NodeId,
        placement: Placement,
        status: Status,
    ) -> Option<NodeId> {
        self.flush_pending();
        if self.target.is_none() {
            return None;
        }
        let index = self.scene.index_of(source)?;
        let original = self.scene.get(index)?;
        let layer = original.layer();
        let shape = match Shape::from_svg_json(&original.shape.to_svg_json()) {
            Ok(shape) => shape,
            Err(e) => {
                log::warn!("Cannot duplicate node {}: {}", source, e);
                return None;
            }
        };
        let node = SceneNode::new(layer, status, shape);
        let index = match placement {
            Placement::NextTo => self.scene.insert_at(node, index + 1),
            Placement::OnTop => self.scene.insert(node, true),
        };
        Some(self.after_insert(index))
    }

    /// Create permanent nodes from serialized shapes in one undo step.
    pub fn create_many(&mut self, components: &[SvgJson]) -> Vec<NodeId> {
        self.create_many_with(components, |_| {})
    }

    /// Like [`Board::create_many`], applying `post_process` to every shape
    /// before it is inserted.
    ///
    /// Malformed entries are skipped. Exactly one commit follows when at
    /// least one node was created.
    pub fn create_many_with<F>(
        &mut self,
        components: &[SvgJson],
        mut post_process: F,
    ) -> Vec<NodeId>
    where
        F: FnMut(&mut Shape),
    {
        self.flush_pending();
        if self.target.is_none() || components.is_empty() {
            return Vec::new();
        }
        let mut created = Vec::with_capacity(components.len());
        for component in components {
            let mut shape = match Shape::from_svg_json(component) {
                Ok(shape) => shape,
                Err(e) => {
                    log::warn!("Skipping {:?} component: {}", component.kind, e);
                    continue;
                }
            };
            post_process(&mut shape);
            let node = SceneNode::new(Layer::Stack, Status::Permanent, shape);
            let index = self.scene.insert(node, true);
            created.push(self.after_insert(index));
        }
        // Inserts above marked the board dirty; one commit covers them all.
        if !created.is_empty() {
            self.commit();
        }
        created
    }

    /// Mutate a node's shape in place. Returns false if the node is gone.
    pub fn update_shape<F>(&mut self, id: NodeId, f: F) -> bool
    where
        F: FnOnce(&mut Shape),
    {
        self.flush_pending();
        let Some(index) = self.scene.index_of(id) else {
            return false;
        };
        let Some(node) = self.scene.get_mut(index) else {
            return false;
        };
        f(&mut node.shape);
        if let (Some(target), Some(node)) = (self.target.as_mut(), self.scene.get(index)) {
            target.node_updated(index, node);
        }
        true
    }

    pub(crate) fn set_selected(&mut self, id: NodeId, selected: bool) -> bool {
        match self.scene.node_mut(id) {
            Some(node) => {
                node.set_selected(selected);
                true
            }
            None => false,
        }
    }

    /// Remove the in-progress preview sitting at either boundary of `layer`.
    pub fn remove_in_progress_preview(&mut self, layer: Layer) -> bool {
        self.flush_pending();
        let Some((low, high)) = self.scene.range_for_layer(layer) else {
            return false;
        };
        let mut removed = false;
        // Top first so `low` stays valid.
        for index in [high, low] {
            let is_preview = self
                .scene
                .get(index)
                .is_some_and(|n| n.status == Status::InProgress && n.layer() == layer);
            if is_preview && self.remove_index(index).is_some() {
                removed = true;
            }
            if low == high {
                break;
            }
        }
        removed
    }

    /// Remove a node by id. Callers commit when the removal is undoable.
    pub fn remove(&mut self, id: NodeId) -> bool {
        self.flush_pending();
        match self.scene.index_of(id) {
            Some(index) => self.remove_index(index).is_some(),
            None => false,
        }
    }

    pub fn remove_at(&mut self, index: usize) -> Option<SceneNode> {
        self.flush_pending();
        self.remove_index(index)
    }

    /// Drop every node, or every node of one layer.
    pub fn reset_layer(&mut self, layer: Option<Layer>) {
        self.flush_pending();
        let removed = self.scene.clear(layer);
        if !removed.is_empty() {
            log::debug!("Reset {:?}: removed {} nodes", layer, removed.len());
        }
        if let Some(target) = self.target.as_mut() {
            target.board_reloaded(&self.scene);
        }
    }

    fn after_insert(&mut self, index: usize) -> NodeId {
        let Some(node) = self.scene.get(index) else {
            return NodeId::nil();
        };
        if node.status == Status::Permanent {
            self.needs_snapshot = true;
        }
        if let Some(target) = self.target.as_mut() {
            target.node_inserted(index, node);
        }
        node.id()
    }

    fn remove_index(&mut self, index: usize) -> Option<SceneNode> {
        let node = self.scene.remove_at(index)?;
        if let Some(target) = self.target.as_mut() {
            target.node_removed(index, &node);
        }
        Some(node)
    }

    // ---- History ----

    /// Record the current permanent nodes as one undo step.
    pub fn commit(&mut self) {
        self.needs_snapshot = false;
        self.history.commit(&self.scene);
        self.push_changed();
    }

    fn flush_pending(&mut self) {
        if self.needs_snapshot {
            self.commit();
        }
    }

    pub fn can_undo(&self) -> bool {
        self.needs_snapshot || self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        !self.needs_snapshot && self.history.can_redo()
    }

    pub fn undo(&mut self) -> bool {
        self.undo_with(&mut ())
    }

    pub fn redo(&mut self) -> bool {
        self.redo_with(&mut ())
    }

    /// Undo, notifying `observer` before and after the board is replaced.
    pub fn undo_with(&mut self, observer: &mut dyn HistoryObserver) -> bool {
        self.flush_pending();
        if !self.history.can_undo() {
            return false;
        }
        self.swap_with(observer, UndoRedoStack::can_undo, |history, scene| {
            history.undo(scene)
        })
    }

    /// Redo, notifying `observer` before and after the board is replaced.
    pub fn redo_with(&mut self, observer: &mut dyn HistoryObserver) -> bool {
        self.flush_pending();
        if !self.history.can_redo() {
            return false;
        }
        self.swap_with(observer, UndoRedoStack::can_redo, |history, scene| {
            history.redo(scene)
        })
    }

    fn swap_with<F>(
        &mut self,
        observer: &mut dyn HistoryObserver,
        available: fn(&UndoRedoStack) -> bool,
        swap: F,
    ) -> bool
    where
        F: FnOnce(&mut UndoRedoStack, &mut SceneGraph) -> bool,
    {
        observer.will_change(self);
        // Cancelling a gesture may commit and so drop the step being swapped to.
        self.flush_pending();
        if !available(&self.history) {
            log::debug!("History swap skipped: stack emptied by cancelled gesture");
            return false;
        }
        self.events.push(BoardEvent::WillChange);

        let swapped = swap(&mut self.history, &mut self.scene);
        if let Some(target) = self.target.as_mut() {
            target.board_reloaded(&self.scene);
        }
        log::debug!(
            "History swap (undo {}, redo {})",
            self.history.undo_len(),
            self.history.redo_len()
        );

        observer.changed(self);
        self.push_changed();
        swapped
    }

    /// Both stacks, including a pending lazy snapshot.
    pub fn stacks(&self) -> UndoRedoStacks {
        let mut stacks = self.history.stacks();
        if self.needs_snapshot {
            stacks.undo_stack.push(self.scene.to_board_json());
            stacks.redo_stack.clear();
        }
        stacks
    }

    /// Replace the history wholesale and rebuild the board from it.
    pub fn load(&mut self, stacks: UndoRedoStacks) {
        self.needs_snapshot = false;
        self.history.load(stacks, &mut self.scene);
        if let Some(target) = self.target.as_mut() {
            target.board_reloaded(&self.scene);
        }
        self.push_changed();
    }

    pub fn undo_len(&self) -> usize {
        self.history.undo_len()
    }

    pub fn redo_len(&self) -> usize {
        self.history.redo_len()
    }

    // ---- Events ----

    fn push_changed(&mut self) {
        let event = BoardEvent::Changed {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        };
        self.events.push(event);
    }

    /// Drain queued events.
    pub fn poll_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Ellipse, Rectangle};
    use kurbo::Point;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn rect(x: f64) -> Shape {
        Shape::Rectangle(Rectangle::new(Point::new(x, 0.0), 10.0, 10.0))
    }

    #[derive(Default)]
    struct Recorder {
        log: Rc<RefCell<Vec<String>>>,
    }

    impl RenderTarget for Recorder {
        fn node_inserted(&mut self, index: usize, _node: &SceneNode) {
            self.log.borrow_mut().push(format!("insert {}", index));
        }
        fn node_removed(&mut self, index: usize, _node: &SceneNode) {
            self.log.borrow_mut().push(format!("remove {}", index));
        }
        fn board_reloaded(&mut self, scene: &SceneGraph) {
            self.log.borrow_mut().push(format!("reload {}", scene.len()));
        }
    }

    #[test]
    fn test_create_requires_target() {
        let mut board = Board::default();
        assert!(board.create(Layer::Stack, rect(0.0), Status::Permanent, true).is_none());
        assert!(board.is_empty());

        board.attach(Box::new(HeadlessTarget));
        assert!(board.create(Layer::Stack, rect(0.0), Status::Permanent, true).is_some());
    }

    #[test]
    fn test_lazy_snapshot_is_taken_once() {
        let mut board = Board::headless();
        board.create(Layer::Stack, rect(0.0), Status::Permanent, true);
        assert!(board.has_pending_snapshot());
        assert_eq!(board.undo_len(), 1);
        assert!(board.can_undo());

        // Preview churn drains the flag exactly once
        board.create(Layer::Visual, rect(5.0), Status::InProgress, true);
        board.remove_in_progress_preview(Layer::Visual);
        board.create(Layer::Visual, rect(6.0), Status::InProgress, true);
        assert_eq!(board.undo_len(), 2);
        assert!(!board.has_pending_snapshot());
    }

    #[test]
    fn test_create_many_commits_once() {
        let mut board = Board::headless();
        let components = vec![
            rect(0.0).to_svg_json(),
            rect(20.0).to_svg_json(),
            rect(40.0).to_svg_json(),
        ];
        let ids = board.create_many(&components);
        assert_eq!(ids.len(), 3);
        assert_eq!(board.undo_len(), 2);
        assert!(!board.has_pending_snapshot());
    }

    #[test]
    fn test_create_many_empty_does_not_commit() {
        let mut board = Board::headless();
        assert!(board.create_many(&[]).is_empty());
        assert_eq!(board.undo_len(), 1);
        assert!(!board.can_undo());
    }

    #[test]
    fn test_create_many_applies_post_process() {
        let mut board = Board::headless();
        let ids = board.create_many_with(&[rect(0.0).to_svg_json()], |shape| {
            shape.translate(kurbo::Vec2::new(10.0, 10.0));
        });
        let node = board.node(ids[0]).unwrap();
        assert!((node.shape.bounds().x0 - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_is_independent_copy() {
        let mut board = Board::headless();
        let a = board.create(Layer::Stack, rect(0.0), Status::Permanent, true).unwrap();
        let b = board.create(Layer::Stack, rect(50.0), Status::Permanent, true).unwrap();
        let copy = board.duplicate(a, Placement::NextTo, Status::Permanent).unwrap();

        assert_ne!(copy, a);
        assert_eq!(board.scene().index_of(copy), Some(1));
        assert_eq!(board.scene().index_of(b), Some(2));

        board.update_shape(copy, |s| s.translate(kurbo::Vec2::new(100.0, 0.0)));
        let original = board.node(a).unwrap();
        assert!((original.shape.bounds().x0).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_on_top() {
        let mut board = Board::headless();
        let a = board.create(Layer::Stack, rect(0.0), Status::Permanent, true).unwrap();
        board.create(Layer::Stack, rect(50.0), Status::Permanent, true);
        board.create(Layer::Selection, rect(0.0), Status::Temporary, true);
        let copy = board.duplicate(a, Placement::OnTop, Status::Permanent).unwrap();
        assert_eq!(board.scene().index_of(copy), Some(2));
    }

    #[test]
    fn test_remove_in_progress_preview_only_removes_previews() {
        let mut board = Board::headless();
        board.create(Layer::Visual, rect(0.0), Status::Temporary, true);
        assert!(!board.remove_in_progress_preview(Layer::Visual));

        board.create(Layer::Visual, rect(0.0), Status::InProgress, true);
        assert!(board.remove_in_progress_preview(Layer::Visual));
        assert_eq!(board.scene().count(Some(Status::InProgress), None), 0);
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_remove_in_progress_both_boundaries() {
        let mut board = Board::headless();
        board.create(Layer::Visual, rect(1.0), Status::Temporary, true);
        board.create(Layer::Visual, rect(0.0), Status::InProgress, true);
        board.create(Layer::Visual, rect(2.0), Status::InProgress, false);
        assert!(board.remove_in_progress_preview(Layer::Visual));
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_undo_at_sentinel_is_noop() {
        let mut board = Board::headless();
        board.create(Layer::Selection, rect(0.0), Status::Temporary, true);
        board.poll_events();

        assert!(!board.undo());
        assert_eq!(board.undo_len(), 1);
        assert_eq!(board.redo_len(), 0);
        assert_eq!(board.len(), 1);
        assert!(board.poll_events().is_empty());
    }

    #[test]
    fn test_undo_reverts_lazy_create() {
        let mut board = Board::headless();
        board.create(Layer::Stack, rect(0.0), Status::Permanent, true);
        assert!(board.undo());
        assert!(board.is_empty());
        assert!(board.can_redo());
        assert!(board.redo());
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_undo_events_order() {
        let mut board = Board::headless();
        board.create(Layer::Stack, rect(0.0), Status::Permanent, true);
        board.commit();
        board.poll_events();

        board.undo();
        assert_eq!(
            board.poll_events(),
            vec![
                BoardEvent::WillChange,
                BoardEvent::Changed {
                    can_undo: false,
                    can_redo: true
                }
            ]
        );
    }

    struct PreviewCanceller {
        preview: Option<NodeId>,
        calls: Vec<&'static str>,
    }

    impl HistoryObserver for PreviewCanceller {
        fn will_change(&mut self, board: &mut Board) {
            self.calls.push("will_change");
            if let Some(id) = self.preview.take() {
                assert!(board.remove(id));
            }
        }

        fn changed(&mut self, _board: &mut Board) {
            self.calls.push("changed");
        }
    }

    #[test]
    fn test_observer_cancels_preview_before_swap() {
        let mut board = Board::headless();
        board.create(Layer::Stack, rect(0.0), Status::Permanent, true);
        board.commit();
        let preview = board.create(Layer::Visual, rect(5.0), Status::InProgress, true);

        let mut observer = PreviewCanceller {
            preview,
            calls: Vec::new(),
        };
        assert!(board.undo_with(&mut observer));
        assert_eq!(observer.calls, vec!["will_change", "changed"]);
        assert!(board.is_empty());
    }

    struct CommitOnCancel;

    impl HistoryObserver for CommitOnCancel {
        fn will_change(&mut self, board: &mut Board) {
            board.create(Layer::Stack, rect(50.0), Status::Permanent, true);
        }
    }

    #[test]
    fn test_swap_skipped_when_observer_empties_redo() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut board = Board::default();
        board.attach(Box::new(Recorder { log: log.clone() }));
        board.create(Layer::Stack, rect(0.0), Status::Permanent, true);
        board.commit();
        assert!(board.undo());
        board.poll_events();
        log.borrow_mut().clear();

        assert!(!board.redo_with(&mut CommitOnCancel));
        assert!(!board.poll_events().contains(&BoardEvent::WillChange));
        assert!(!log.borrow().iter().any(|entry| entry.starts_with("reload")));
        assert_eq!(board.len(), 1);
        assert!(!board.can_redo());
        assert!(!board.has_pending_snapshot());
    }

    #[test]
    fn test_create_at_clamps_into_layer_band() {
        let mut board = Board::headless();
        board.create(Layer::Grid, rect(0.0), Status::Temporary, true);
        board.create(Layer::Stack, rect(1.0), Status::Permanent, true);
        board.create(Layer::Visual, rect(2.0), Status::Temporary, true);
        board.commit();
        assert!(!board.has_pending_snapshot());

        // Index 0 sits in the grid band, so the node lands at the bottom of the stack band.
        let low = board
            .create_at(Layer::Stack, rect(3.0), Status::Permanent, 0)
            .unwrap();
        assert_eq!(board.scene().index_of(low), Some(1));
        assert!(board.has_pending_snapshot());

        let high = board
            .create_at(Layer::Stack, rect(4.0), Status::Permanent, 99)
            .unwrap();
        assert_eq!(board.scene().index_of(high), Some(3));
        assert_eq!(board.scene().range_for_layer(Layer::Stack), Some((1, 3)));
    }

    #[test]
    fn test_create_at_temporary_leaves_history_alone() {
        let mut board = Board::headless();
        let id = board
            .create_at(Layer::Selection, rect(0.0), Status::Temporary, 0)
            .unwrap();
        assert_eq!(board.scene().index_of(id), Some(0));
        assert!(!board.has_pending_snapshot());
    }

    #[test]
    fn test_create_at_requires_target() {
        let mut board = Board::default();
        assert!(board
            .create_at(Layer::Stack, rect(0.0), Status::Permanent, 0)
            .is_none());
        assert!(board.is_empty());
    }

    #[test]
    fn test_render_target_notifications() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut board = Board::default();
        board.attach(Box::new(Recorder { log: log.clone() }));
        let id = board.create(Layer::Stack, rect(0.0), Status::Permanent, true).unwrap();
        board.remove(id);
        board.undo();

        assert_eq!(
            *log.borrow(),
            vec!["reload 0", "insert 0", "remove 0", "reload 0"]
        );
    }

    #[test]
    fn test_stacks_include_pending_snapshot() {
        let mut board = Board::headless();
        board.create(
            Layer::Stack,
            Shape::Ellipse(Ellipse::circle(Point::new(5.0, 5.0), 3.0)),
            Status::Permanent,
            true,
        );
        let stacks = board.stacks();
        assert_eq!(stacks.undo_stack.len(), 2);

        let mut other = Board::headless();
        other.load(stacks);
        assert_eq!(other.len(), 1);
        assert!(other.can_undo());
    }

    #[test]
    fn test_reset_layer() {
        let mut board = Board::headless();
        board.create(Layer::Stack, rect(0.0), Status::Permanent, true);
        board.create(Layer::Grid, rect(0.0), Status::Temporary, true);
        board.reset_layer(Some(Layer::Grid));
        assert_eq!(board.len(), 1);
        board.reset_layer(None);
        assert!(board.is_empty());
    }
}
