//! Freehand pencil.

use super::{Tool, ToolContext, ToolKind};
use crate::board::Board;
use crate::input::{MouseButton, PointerInput};
use crate::layer::Layer;
use crate::scene::{NodeId, Status};
use crate::shapes::{Freehand, Shape};

/// Records a freehand stroke while the left button is held.
#[derive(Debug, Default)]
pub struct PencilTool {
    stroke: Option<Freehand>,
    preview: Option<NodeId>,
}

impl PencilTool {
    pub fn new() -> Self {
        Self::default()
    }

    fn clear_preview(&mut self, board: &mut Board) {
        if self.preview.take().is_some() {
            board.remove_in_progress_preview(Layer::Visual);
        }
    }
}

impl Tool for PencilTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Pencil
    }

    fn on_pointer_down(
        &mut self,
        ctx: &mut ToolContext<'_>,
        input: PointerInput,
        button: MouseButton,
    ) -> bool {
        if button != MouseButton::Left || self.stroke.is_some() {
            return false;
        }
        let mut stroke = Freehand::from_points(vec![input.position]);
        stroke.style = ctx.options.style();
        self.stroke = Some(stroke);
        false
    }

    fn on_pointer_move(&mut self, ctx: &mut ToolContext<'_>, input: PointerInput) -> bool {
        let Some(stroke) = self.stroke.as_mut() else {
            return false;
        };
        if stroke.points.last() == Some(&input.position) {
            return false;
        }
        stroke.add_point(input.position);
        let shape = Shape::Freehand(stroke.clone());
        ctx.board.remove_in_progress_preview(Layer::Visual);
        self.preview = ctx.board.create(Layer::Visual, shape, Status::InProgress, true);
        true
    }

    fn on_pointer_up(
        &mut self,
        ctx: &mut ToolContext<'_>,
        input: PointerInput,
        button: MouseButton,
    ) -> bool {
        if button != MouseButton::Left {
            return false;
        }
        let Some(mut stroke) = self.stroke.take() else {
            return false;
        };
        self.clear_preview(ctx.board);

        if stroke.points.last() != Some(&input.position) {
            stroke.add_point(input.position);
        }
        if stroke.len() < 2 {
            return true;
        }
        stroke.simplify(ctx.options.pencil_tolerance);
        ctx.board
            .create(Layer::Stack, Shape::Freehand(stroke), Status::Permanent, true)
            .is_some()
    }

    fn cancel(&mut self, board: &mut Board) {
        self.clear_preview(board);
        self.stroke = None;
    }
}
