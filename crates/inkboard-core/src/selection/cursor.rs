//! Click-versus-drag resolution for the pointer buttons.

use crate::input::MouseButton;
use kurbo::{Point, Vec2};

/// How the pointer relates to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorPhase {
    /// No button owns the anchor.
    Idle,
    /// A button is down and the pointer is still within the threshold.
    Anchored,
    /// The pointer left the threshold box around the anchor.
    Dragging,
}

/// Anchor bookkeeping shared by both pointer buttons.
///
/// Only one button may own the anchor at a time, and only that button's
/// release clears it.
#[derive(Debug, Clone)]
pub struct CursorState {
    anchor: Option<(MouseButton, Point)>,
    position: Point,
    threshold: f64,
}

impl CursorState {
    pub fn new(threshold: f64) -> Self {
        Self {
            anchor: None,
            position: Point::ZERO,
            threshold: threshold.max(0.0),
        }
    }

    /// Whether a press would be allowed to set the anchor.
    pub fn has_anchor_permission(&self) -> bool {
        self.anchor.is_none()
    }

    /// Set the anchor for `button`. Returns false if another button owns it.
    pub fn press(&mut self, button: MouseButton, position: Point) -> bool {
        self.position = position;
        if !self.has_anchor_permission() {
            return false;
        }
        self.anchor = Some((button, position));
        true
    }

    /// Release the anchor if `button` owns it.
    pub fn release(&mut self, button: MouseButton) -> bool {
        match self.anchor {
            Some((owner, _)) if owner == button => {
                self.anchor = None;
                true
            }
            _ => false,
        }
    }

    pub fn move_to(&mut self, position: Point) -> CursorPhase {
        self.position = position;
        self.phase()
    }

    pub fn phase(&self) -> CursorPhase {
        match self.anchor {
            None => CursorPhase::Idle,
            Some(_) => {
                let d = self.displacement();
                if d.x.abs() >= self.threshold || d.y.abs() >= self.threshold {
                    CursorPhase::Dragging
                } else {
                    CursorPhase::Anchored
                }
            }
        }
    }

    pub fn owner(&self) -> Option<MouseButton> {
        self.anchor.map(|(button, _)| button)
    }

    pub fn anchor(&self) -> Option<Point> {
        self.anchor.map(|(_, point)| point)
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Offset from the anchor, zero when there is none.
    pub fn displacement(&self) -> Vec2 {
        self.anchor
            .map(|(_, anchor)| self.position - anchor)
            .unwrap_or(Vec2::ZERO)
    }

    pub fn reset(&mut self) {
        self.anchor = None;
    }
}
