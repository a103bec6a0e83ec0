//! Stamp placement.

use super::{Tool, ToolContext, ToolKind};
use crate::board::Board;
use crate::input::{MouseButton, PointerInput};
use crate::layer::Layer;
use crate::scene::Status;
use crate::shapes::{Shape, Stamp};

/// Places the configured glyph wherever the left button is clicked.
#[derive(Debug, Default)]
pub struct StampTool;

impl StampTool {
    pub fn new() -> Self {
        Self
    }
}

impl Tool for StampTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Stamp
    }

    fn on_pointer_down(
        &mut self,
        ctx: &mut ToolContext<'_>,
        input: PointerInput,
        button: MouseButton,
    ) -> bool {
        if button != MouseButton::Left {
            return false;
        }
        let options = ctx.options;
        let mut stamp = Stamp::new(input.position, options.stamp_size, options.stamp_glyph.clone());
        stamp.rotation = options.stamp_angle.to_radians();
        stamp.style = options.style();
        ctx.board
            .create(Layer::Stack, Shape::Stamp(stamp), Status::Permanent, true)
            .is_some()
    }

    fn on_pointer_move(&mut self, _ctx: &mut ToolContext<'_>, _input: PointerInput) -> bool {
        false
    }

    fn on_pointer_up(
        &mut self,
        _ctx: &mut ToolContext<'_>,
        _input: PointerInput,
        _button: MouseButton,
    ) -> bool {
        false
    }

    fn cancel(&mut self, _board: &mut Board) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToolOptions;
    use kurbo::Point;

    #[test]
    fn test_click_places_stamp_with_options() {
        let mut board = Board::headless();
        let options = ToolOptions {
            stamp_glyph: "heart".to_string(),
            stamp_size: 20.0,
            stamp_angle: 90.0,
            ..Default::default()
        };
        let mut tool = StampTool::new();
        let mut ctx = ToolContext {
            board: &mut board,
            options: &options,
        };
        assert!(tool.on_pointer_down(
            &mut ctx,
            PointerInput::new(Point::new(5.0, 5.0)),
            MouseButton::Left,
        ));
        assert!(!tool.on_pointer_down(
            &mut ctx,
            PointerInput::new(Point::new(5.0, 5.0)),
            MouseButton::Right,
        ));

        assert_eq!(board.len(), 1);
        match &board.scene().get(0).unwrap().shape {
            Shape::Stamp(s) => {
                assert_eq!(s.glyph, "heart");
                assert!((s.size - 20.0).abs() < 1e-9);
                assert!((s.rotation - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
            }
            other => panic!("expected stamp, got {:?}", other.kind()),
        }
    }
}
