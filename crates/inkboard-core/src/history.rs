//! Snapshot-based undo/redo.

use crate::scene::SceneGraph;
use crate::shapes::SvgJson;
use serde::{Deserialize, Serialize};

/// Default number of undo snapshots to keep.
pub const DEFAULT_MAX_HISTORY: usize = 50;

/// Every permanent node of a board, serialized in paint order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardJson {
    pub components: Vec<SvgJson>,
}

impl BoardJson {
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// Serialized form of the undo and redo stacks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UndoRedoStacks {
    pub undo_stack: Vec<BoardJson>,
    pub redo_stack: Vec<BoardJson>,
}

/// Two stacks of board snapshots.
///
/// The undo stack always holds at least one entry: the board as it looked
/// before the first recorded change. Its top is the board currently shown.
#[derive(Debug, Clone)]
pub struct UndoRedoStack {
    undo_stack: Vec<BoardJson>,
    redo_stack: Vec<BoardJson>,
    max_history: usize,
}

impl Default for UndoRedoStack {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

impl UndoRedoStack {
    /// Create a history holding only the empty-board sentinel.
    pub fn new(max_history: usize) -> Self {
        Self {
            undo_stack: vec![BoardJson::default()],
            redo_stack: Vec::new(),
            max_history: max_history.max(1),
        }
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// The snapshot the board currently matches.
    pub fn current(&self) -> &BoardJson {
        // Never empty, see `new` and `load`.
        &self.undo_stack[self.undo_stack.len() - 1]
    }

    /// Record the permanent nodes of `scene` as a new snapshot.
    pub fn commit(&mut self, scene: &SceneGraph) {
        self.undo_stack.push(scene.to_board_json());
        self.redo_stack.clear();

        // Drop the oldest snapshots beyond the limit
        let excess = self.undo_stack.len().saturating_sub(self.max_history);
        if excess > 0 {
            self.undo_stack.drain(..excess);
        }
        log::debug!("Committed snapshot ({} undo entries)", self.undo_stack.len());
    }

    /// Step back one snapshot and rebuild `scene` from it.
    ///
    /// Returns false without touching anything when only the sentinel is left.
    pub fn undo(&mut self, scene: &mut SceneGraph) -> bool {
        if !self.can_undo() {
            return false;
        }
        let Some(top) = self.undo_stack.pop() else {
            return false;
        };
        self.redo_stack.push(top);
        scene.restore(self.current());
        true
    }

    /// Re-apply the most recently undone snapshot.
    pub fn redo(&mut self, scene: &mut SceneGraph) -> bool {
        let Some(snapshot) = self.redo_stack.pop() else {
            return false;
        };
        scene.restore(&snapshot);
        self.undo_stack.push(snapshot);
        true
    }

    /// Copy of both stacks for persistence.
    pub fn stacks(&self) -> UndoRedoStacks {
        UndoRedoStacks {
            undo_stack: self.undo_stack.clone(),
            redo_stack: self.redo_stack.clone(),
        }
    }

    /// Replace both stacks and rebuild `scene` from the new top.
    pub fn load(&mut self, stacks: UndoRedoStacks, scene: &mut SceneGraph) {
        self.undo_stack = stacks.undo_stack;
        self.redo_stack = stacks.redo_stack;
        if self.undo_stack.is_empty() {
            self.undo_stack.push(BoardJson::default());
        }
        scene.restore(self.current());
    }
}
