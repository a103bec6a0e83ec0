//! Eraser: removes every permanent node its circle touches.

use super::{Tool, ToolContext, ToolKind};
use crate::board::Board;
use crate::collision::Collider;
use crate::input::{MouseButton, PointerInput};
use crate::layer::Layer;
use crate::scene::{NodeId, Status};
use crate::shapes::{Ellipse, Shape};
use kurbo::Point;

/// Erases while the left button is held, committing once on release.
#[derive(Debug, Default)]
pub struct EraserTool {
    pressed: bool,
    erased: usize,
    /// Temporary circle showing the eraser footprint.
    collider: Option<NodeId>,
}

impl EraserTool {
    pub fn new() -> Self {
        Self::default()
    }

    fn erase_at(&mut self, board: &mut Board, position: Point, radius: f64) -> bool {
        let probe = Collider::circle(position, radius);
        let hits = board
            .scene()
            .hits(&probe, |n| n.status == Status::Permanent);
        for id in &hits {
            if board.remove(*id) {
                self.erased += 1;
            }
        }
        !hits.is_empty()
    }

    fn show_collider(&mut self, board: &mut Board, position: Point, radius: f64) {
        let shape = Shape::Ellipse(Ellipse::circle(position, radius));
        let moved = self
            .collider
            .is_some_and(|id| board.update_shape(id, |s| *s = shape.clone()));
        if !moved {
            self.collider = board.create(Layer::Selection, shape, Status::Temporary, true);
        }
    }

    /// Drop the footprint and commit whatever was erased.
    fn finish(&mut self, board: &mut Board) -> bool {
        if let Some(id) = self.collider.take() {
            board.remove(id);
        }
        self.pressed = false;
        let erased = std::mem::take(&mut self.erased);
        if erased > 0 {
            board.commit();
            log::debug!("Erased {} nodes", erased);
        }
        erased > 0
    }
}

impl Tool for EraserTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Eraser
    }

    fn on_pointer_down(
        &mut self,
        ctx: &mut ToolContext<'_>,
        input: PointerInput,
        button: MouseButton,
    ) -> bool {
        if button != MouseButton::Left || self.pressed {
            return false;
        }
        self.pressed = true;
        let radius = ctx.options.eraser_radius;
        self.show_collider(ctx.board, input.position, radius);
        self.erase_at(ctx.board, input.position, radius);
        true
    }

    fn on_pointer_move(&mut self, ctx: &mut ToolContext<'_>, input: PointerInput) -> bool {
        if !self.pressed {
            return false;
        }
        let radius = ctx.options.eraser_radius;
        self.show_collider(ctx.board, input.position, radius);
        self.erase_at(ctx.board, input.position, radius);
        true
    }

    fn on_pointer_up(
        &mut self,
        ctx: &mut ToolContext<'_>,
        _input: PointerInput,
        button: MouseButton,
    ) -> bool {
        if button != MouseButton::Left || !self.pressed {
            return false;
        }
        self.finish(ctx.board);
        true
    }

    /// Erasures already applied are committed so a following undo reverts
    /// exactly this stroke.
    fn cancel(&mut self, board: &mut Board) {
        self.finish(board);
    }
}
