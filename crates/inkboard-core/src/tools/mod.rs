//! Tool system for the whiteboard.
//!
//! Each tool is a gesture handler. Handlers get their collaborators through
//! a [`ToolContext`] passed into every call, and the [`ToolRegistry`] owns
//! exactly one handler per [`ToolKind`].

mod eraser;
mod pencil;
mod shape_tool;
mod stamp;

pub use eraser::EraserTool;
pub use pencil::PencilTool;
pub use shape_tool::{DragShape, ShapeTool};
pub use stamp::StampTool;

use crate::board::{Board, HistoryObserver};
use crate::config::{EditorConfig, ToolOptions};
use crate::input::{Instant, Key, MouseButton, PointerInput};
use crate::selection::SelectionController;
use kurbo::Vec2;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Rectangle,
    Ellipse,
    Pencil,
    Stamp,
    Eraser,
}

impl ToolKind {
    pub const ALL: [ToolKind; 6] = [
        ToolKind::Select,
        ToolKind::Rectangle,
        ToolKind::Ellipse,
        ToolKind::Pencil,
        ToolKind::Stamp,
        ToolKind::Eraser,
    ];
}

/// Collaborators handed to a tool for the duration of one event.
pub struct ToolContext<'a> {
    pub board: &'a mut Board,
    /// Current tool options, read-only to tools.
    pub options: &'a ToolOptions,
}

/// A gesture handler.
///
/// Event methods return true when the board may need repainting.
pub trait Tool {
    fn kind(&self) -> ToolKind;

    fn on_pointer_down(
        &mut self,
        ctx: &mut ToolContext<'_>,
        input: PointerInput,
        button: MouseButton,
    ) -> bool;

    fn on_pointer_move(&mut self, ctx: &mut ToolContext<'_>, input: PointerInput) -> bool;

    fn on_pointer_up(
        &mut self,
        ctx: &mut ToolContext<'_>,
        input: PointerInput,
        button: MouseButton,
    ) -> bool;

    fn on_key_down(&mut self, _ctx: &mut ToolContext<'_>, _key: Key, _now: Instant) -> bool {
        false
    }

    fn on_key_up(&mut self, _ctx: &mut ToolContext<'_>, _key: Key, _now: Instant) -> bool {
        false
    }

    fn on_wheel(&mut self, _ctx: &mut ToolContext<'_>, _input: PointerInput, _delta: Vec2) -> bool {
        false
    }

    /// Advance timers.
    fn on_tick(&mut self, _ctx: &mut ToolContext<'_>, _now: Instant) -> bool {
        false
    }

    /// Earliest instant `on_tick` has work to do.
    fn next_deadline(&self) -> Option<Instant> {
        None
    }

    /// Abort the current gesture, removing any preview it owns.
    fn cancel(&mut self, board: &mut Board);

    fn as_selection_mut(&mut self) -> Option<&mut SelectionController> {
        None
    }
}

/// Adapter cancelling a tool's gesture when the board is about to be swapped.
pub struct CancelOnSwap<'a>(pub &'a mut dyn Tool);

impl HistoryObserver for CancelOnSwap<'_> {
    fn will_change(&mut self, board: &mut Board) {
        self.0.cancel(board);
    }
}

/// One handler per tool kind, built once.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
    active: ToolKind,
}

impl ToolRegistry {
    pub fn new(config: &EditorConfig) -> Self {
        let tools: Vec<Box<dyn Tool>> = vec![
            Box::new(SelectionController::new(config.selection.clone())),
            Box::new(ShapeTool::new(DragShape::Rectangle)),
            Box::new(ShapeTool::new(DragShape::Ellipse)),
            Box::new(PencilTool::new()),
            Box::new(StampTool::new()),
            Box::new(EraserTool::new()),
        ];
        Self {
            tools,
            active: ToolKind::Select,
        }
    }

    pub fn active_kind(&self) -> ToolKind {
        self.active
    }

    pub fn get(&self, kind: ToolKind) -> Option<&dyn Tool> {
        self.tools.iter().find(|t| t.kind() == kind).map(|t| t.as_ref())
    }

    pub fn get_mut(&mut self, kind: ToolKind) -> Option<&mut (dyn Tool + 'static)> {
        self.tools.iter_mut().find(|t| t.kind() == kind).map(|t| t.as_mut())
    }

    pub fn active_mut(&mut self) -> Option<&mut (dyn Tool + 'static)> {
        self.get_mut(self.active)
    }

    /// Switch tools, cancelling the outgoing tool's gesture.
    pub fn set_active(&mut self, kind: ToolKind, board: &mut Board) {
        if kind == self.active {
            return;
        }
        if let Some(tool) = self.active_mut() {
            tool.cancel(board);
        }
        log::debug!("Tool changed: {:?} -> {:?}", self.active, kind);
        self.active = kind;
    }

    pub fn selection_mut(&mut self) -> Option<&mut SelectionController> {
        self.get_mut(ToolKind::Select).and_then(|t| t.as_selection_mut())
    }
}
