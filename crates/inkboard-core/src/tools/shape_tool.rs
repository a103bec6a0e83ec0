//! Drag-to-draw rectangles and ellipses.

use super::{Tool, ToolContext, ToolKind};
use crate::board::Board;
use crate::config::ToolOptions;
use crate::input::{MouseButton, PointerInput};
use crate::layer::Layer;
use crate::scene::{NodeId, Status};
use crate::shapes::{Ellipse, Rectangle, Shape};
use kurbo::{Point, Rect};

/// Drags smaller than this on both axes are treated as clicks.
const MIN_SHAPE_EXTENT: f64 = 1.0;

/// Which shape a [`ShapeTool`] draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragShape {
    Rectangle,
    Ellipse,
}

/// Draws a box-defined shape between press and release points.
///
/// While dragging, an in-progress preview lives on the visual layer and is
/// replaced on every move. Release creates the permanent shape.
#[derive(Debug)]
pub struct ShapeTool {
    shape: DragShape,
    start: Option<Point>,
    preview: Option<NodeId>,
}

impl ShapeTool {
    pub fn new(shape: DragShape) -> Self {
        Self {
            shape,
            start: None,
            preview: None,
        }
    }

    /// Box spanned by the drag. Shift constrains it to a square.
    fn drag_rect(start: Point, end: Point, square: bool) -> Rect {
        if !square {
            return Rect::from_points(start, end);
        }
        let side = (end.x - start.x).abs().max((end.y - start.y).abs());
        let corner = Point::new(
            start.x + side * (end.x - start.x).signum(),
            start.y + side * (end.y - start.y).signum(),
        );
        Rect::from_points(start, corner)
    }

    fn build(&self, rect: Rect, options: &ToolOptions) -> Shape {
        match self.shape {
            DragShape::Rectangle => {
                let mut r = Rectangle::new(rect.origin(), rect.width(), rect.height());
                r.style = options.style();
                Shape::Rectangle(r)
            }
            DragShape::Ellipse => {
                let mut e = Ellipse::from_rect(rect);
                e.style = options.style();
                Shape::Ellipse(e)
            }
        }
    }

    fn clear_preview(&mut self, board: &mut Board) {
        if self.preview.take().is_some() {
            board.remove_in_progress_preview(Layer::Visual);
        }
    }
}

impl Tool for ShapeTool {
    fn kind(&self) -> ToolKind {
        match self.shape {
            DragShape::Rectangle => ToolKind::Rectangle,
            DragShape::Ellipse => ToolKind::Ellipse,
        }
    }

    fn on_pointer_down(
        &mut self,
        _ctx: &mut ToolContext<'_>,
        input: PointerInput,
        button: MouseButton,
    ) -> bool {
        if button != MouseButton::Left || self.start.is_some() {
            return false;
        }
        self.start = Some(input.position);
        false
    }

    fn on_pointer_move(&mut self, ctx: &mut ToolContext<'_>, input: PointerInput) -> bool {
        let Some(start) = self.start else {
            return false;
        };
        let rect = Self::drag_rect(start, input.position, input.modifiers.shift);
        let shape = self.build(rect, ctx.options);
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
        let Some(start) = self.start.take() else {
            return false;
        };
        self.clear_preview(ctx.board);

        let rect = Self::drag_rect(start, input.position, input.modifiers.shift);
        if rect.width() < MIN_SHAPE_EXTENT && rect.height() < MIN_SHAPE_EXTENT {
            return true;
        }
        let shape = self.build(rect, ctx.options);
        ctx.board
            .create(Layer::Stack, shape, Status::Permanent, true)
            .is_some()
    }

    fn cancel(&mut self, board: &mut Board) {
        self.clear_preview(board);
        self.start = None;
    }
}
