//! Selection gestures: marquee, inversion, translate, resize and rotate.

mod cursor;
mod handles;
mod keyboard;

pub use cursor::{CursorPhase, CursorState};
pub use handles::{ControlPoint, Corner, Edge, resize_transform};
pub use keyboard::{KeyboardArrowTranslator, RepeatTimer};

use crate::board::{Board, HistoryObserver};
use crate::collision::Collider;
use crate::config::SelectionConfig;
use crate::history::BoardJson;
use crate::input::{Instant, Key, MouseButton, PointerInput};
use crate::layer::Layer;
use crate::scene::{NodeId, SceneNode, Status};
use crate::shapes::{Rectangle, SerializableColor, Shape, ShapeStyle};
use crate::tools::{Tool, ToolContext, ToolKind};
use kurbo::{Point, Rect, Vec2};

/// Top-level selection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// Nothing is selected.
    #[default]
    Nothing,
    /// A marquee is being dragged out with the left button.
    Creation,
    /// A non-empty selection exists.
    Manipulation,
}

/// What is currently being done to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManipulationAction {
    #[default]
    None,
    TranslateByPointer,
    TranslateByKeyboard,
    ResizeByControlPoint(ControlPoint),
    /// Right-button marquee toggling membership.
    Inverse,
}

impl ManipulationAction {
    /// Translate or resize driven by the held pointer.
    pub fn is_pointer_drag(self) -> bool {
        matches!(self, Self::TranslateByPointer | Self::ResizeByControlPoint(_))
    }
}

/// Selection tool state machine.
#[derive(Debug)]
pub struct SelectionController {
    config: SelectionConfig,
    state: SelectionState,
    action: ManipulationAction,
    selection: Vec<NodeId>,
    highlighted: Vec<NodeId>,
    cursor: CursorState,
    keyboard: KeyboardArrowTranslator,
    marquee: Option<NodeId>,
    /// Shapes as they were when the current manipulation started.
    originals: Vec<(NodeId, Shape)>,
    resize_from: Option<Rect>,
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new(SelectionConfig::default())
    }
}

impl SelectionController {
    pub fn new(config: SelectionConfig) -> Self {
        Self {
            cursor: CursorState::new(config.drag_threshold),
            keyboard: KeyboardArrowTranslator::from_config(&config),
            config,
            state: SelectionState::Nothing,
            action: ManipulationAction::None,
            selection: Vec::new(),
            highlighted: Vec::new(),
            marquee: None,
            originals: Vec::new(),
            resize_from: None,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn action(&self) -> ManipulationAction {
        self.action
    }

    pub fn selection(&self) -> &[NodeId] {
        &self.selection
    }

    /// Nodes under the live marquee or the hovering pointer.
    pub fn highlighted(&self) -> &[NodeId] {
        &self.highlighted
    }

    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    /// Union of the bounds of every selected node.
    pub fn selection_bounds(&self, board: &Board) -> Option<Rect> {
        self.selection
            .iter()
            .filter_map(|id| board.node(*id))
            .map(|n| n.shape.bounds())
            .reduce(|a, b| a.union(b))
    }

    // ---- Programmatic selection ----

    /// Replace the selection with the permanent nodes among `ids`.
    pub fn select_nodes(&mut self, board: &mut Board, ids: &[NodeId]) {
        let ids: Vec<NodeId> = ids
            .iter()
            .copied()
            .filter(|id| board.node(*id).is_some_and(is_selectable))
            .collect();
        self.set_selection(board, ids);
    }

    pub fn select_all(&mut self, board: &mut Board) {
        let ids: Vec<NodeId> = board
            .scene()
            .iter()
            .filter(|n| is_selectable(n))
            .map(|n| n.id())
            .collect();
        self.set_selection(board, ids);
    }

    pub fn clear_selection(&mut self, board: &mut Board) {
        self.set_selection(board, Vec::new());
    }

    fn set_selection(&mut self, board: &mut Board, ids: Vec<NodeId>) {
        for id in &self.selection {
            board.set_selected(*id, false);
        }
        for id in &ids {
            board.set_selected(*id, true);
        }
        self.selection = ids;
        self.state = if self.selection.is_empty() {
            SelectionState::Nothing
        } else {
            SelectionState::Manipulation
        };
    }

    fn toggle(&mut self, board: &mut Board, ids: &[NodeId]) {
        let mut next = self.selection.clone();
        for id in ids {
            match next.iter().position(|s| s == id) {
                Some(pos) => {
                    next.remove(pos);
                }
                None => next.push(*id),
            }
        }
        self.set_selection(board, next);
    }

    // ---- Clipboard-style operations ----

    /// Serialize the selection in paint order.
    pub fn copy_selection(&self, board: &Board) -> BoardJson {
        BoardJson {
            components: board
                .scene()
                .iter()
                .filter(|n| self.selection.contains(&n.id()))
                .map(|n| n.shape.to_svg_json())
                .collect(),
        }
    }

    /// Remove every selected node in one undo step.
    pub fn delete_selection(&mut self, board: &mut Board) -> bool {
        if !self.is_idle() {
            return false;
        }
        let ids = std::mem::take(&mut self.selection);
        let removed = ids.iter().filter(|id| board.remove(**id)).count();
        self.state = SelectionState::Nothing;
        self.highlighted.clear();
        if removed > 0 {
            board.commit();
            log::debug!("Deleted {} selected nodes", removed);
        }
        removed > 0
    }

    pub fn cut_selection(&mut self, board: &mut Board) -> Option<BoardJson> {
        let copied = self.copy_selection(board);
        self.delete_selection(board).then_some(copied)
    }

    /// Insert `clipboard` shifted by `offset` and select the new nodes.
    pub fn paste(&mut self, board: &mut Board, clipboard: &BoardJson, offset: Vec2) -> Vec<NodeId> {
        if !self.is_idle() {
            return Vec::new();
        }
        let ids = board.create_many_with(&clipboard.components, |shape| shape.translate(offset));
        if !ids.is_empty() {
            self.select_nodes(board, &ids);
        }
        ids
    }

    /// Clone the selection next to itself and select the clones.
    pub fn duplicate_selection(&mut self, board: &mut Board) -> Vec<NodeId> {
        let copied = self.copy_selection(board);
        let offset = self.config.duplicate_offset();
        self.paste(board, &copied, offset)
    }

    // ---- Gesture entry points ----

    pub fn on_pointer_down(
        &mut self,
        board: &mut Board,
        input: PointerInput,
        button: MouseButton,
    ) -> bool {
        match button {
            MouseButton::Left | MouseButton::Right => {}
            MouseButton::Middle => return false,
        }
        // A keyboard manipulation has to terminate before another starts.
        if self.keyboard.is_active() || self.action != ManipulationAction::None {
            return false;
        }
        if self.state == SelectionState::Creation {
            return false;
        }
        if !self.cursor.press(button, input.position) {
            return false;
        }

        match button {
            MouseButton::Right => {
                self.action = ManipulationAction::Inverse;
            }
            _ => self.begin_left_press(board, input),
        }
        true
    }

    fn begin_left_press(&mut self, board: &mut Board, input: PointerInput) {
        let position = input.position;

        if self.state == SelectionState::Manipulation {
            if let Some(bounds) = self.selection_bounds(board) {
                let radius = self.config.control_point_radius;
                if let Some(cp) = ControlPoint::hit_test(bounds, position, radius) {
                    self.begin_manipulation(board, ManipulationAction::ResizeByControlPoint(cp));
                    self.resize_from = Some(bounds);
                    return;
                }
            }
        }

        if let Some(hit) = self.hit_test(board, position) {
            if input.modifiers.shift {
                self.toggle(board, &[hit]);
                if self.selection.contains(&hit) {
                    self.begin_manipulation(board, ManipulationAction::TranslateByPointer);
                }
                return;
            }
            if !self.selection.contains(&hit) {
                self.select_nodes(board, &[hit]);
            }
            self.begin_manipulation(board, ManipulationAction::TranslateByPointer);
            return;
        }

        let inside_selection = self
            .selection_bounds(board)
            .is_some_and(|bounds| bounds.contains(position));
        if inside_selection {
            self.begin_manipulation(board, ManipulationAction::TranslateByPointer);
            return;
        }

        self.clear_selection(board);
        self.state = SelectionState::Creation;
    }

    pub fn on_pointer_move(&mut self, board: &mut Board, input: PointerInput) -> bool {
        let phase = self.cursor.move_to(input.position);
        match (self.state, self.action) {
            (SelectionState::Creation, _) | (_, ManipulationAction::Inverse) => {
                match phase {
                    CursorPhase::Dragging => self.update_marquee(board),
                    _ => self.remove_marquee(board),
                }
                true
            }
            (_, action) if action.is_pointer_drag() => {
                self.apply_drag(board, phase, self.cursor.displacement())
            }
            _ => {
                let hover = self.hit_test(board, input.position);
                let changed = self.highlighted.first().copied() != hover;
                self.highlighted = hover.into_iter().collect();
                changed
            }
        }
    }

    pub fn on_pointer_up(
        &mut self,
        board: &mut Board,
        input: PointerInput,
        button: MouseButton,
    ) -> bool {
        self.cursor.move_to(input.position);
        let phase = self.cursor.phase();
        let displacement = self.cursor.displacement();
        let marquee = self.marquee_rect();
        if !self.cursor.release(button) {
            return false;
        }

        match (self.state, self.action) {
            (_, ManipulationAction::Inverse) => {
                self.remove_marquee(board);
                let targets = match (phase, marquee) {
                    (CursorPhase::Dragging, Some(rect)) => self.marquee_hits(board, rect),
                    _ => self.hit_test(board, input.position).into_iter().collect(),
                };
                self.action = ManipulationAction::None;
                self.toggle(board, &targets);
            }
            (SelectionState::Creation, _) => {
                self.remove_marquee(board);
                let hits = match (phase, marquee) {
                    (CursorPhase::Dragging, Some(rect)) => self.marquee_hits(board, rect),
                    _ => Vec::new(),
                };
                self.set_selection(board, hits);
            }
            (_, action) if action.is_pointer_drag() => {
                // Hosts may coalesce moves, so the release point is the final one.
                self.apply_drag(board, phase, displacement);
                self.finish_manipulation(board);
            }
            _ => {}
        }
        self.highlighted.clear();
        true
    }

    pub fn on_key_down(&mut self, board: &mut Board, key: Key, now: Instant) -> bool {
        let Some(arrow) = key.arrow() else {
            return false;
        };
        if self.state != SelectionState::Manipulation {
            return false;
        }
        match self.action {
            ManipulationAction::None if !self.keyboard.is_active() => {
                self.begin_manipulation(board, ManipulationAction::TranslateByKeyboard);
            }
            ManipulationAction::TranslateByKeyboard => {}
            _ => return false,
        }
        match self.keyboard.key_down(arrow, now) {
            Some(step) => {
                self.translate_in_place(board, step);
                true
            }
            None => false,
        }
    }

    pub fn on_key_up(&mut self, board: &mut Board, key: Key) -> bool {
        let Some(arrow) = key.arrow() else {
            return false;
        };
        if !self.keyboard.key_up(arrow) {
            return false;
        }
        if self.action == ManipulationAction::TranslateByKeyboard
            && self.keyboard.try_to_terminate()
        {
            self.finish_manipulation(board);
        }
        true
    }

    pub fn on_tick(&mut self, board: &mut Board, now: Instant) -> bool {
        if self.action != ManipulationAction::TranslateByKeyboard {
            return false;
        }
        match self.keyboard.tick(now) {
            Some(delta) => {
                self.translate_in_place(board, delta);
                true
            }
            None => false,
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.keyboard.next_deadline()
    }

    /// Rotate the selection one wheel step.
    ///
    /// Shift rotates each node around its own center, Alt uses the fine step.
    pub fn on_wheel(&mut self, board: &mut Board, input: PointerInput, delta: Vec2) -> bool {
        if self.state != SelectionState::Manipulation || !self.is_idle() {
            return false;
        }
        let direction = if delta.y != 0.0 { delta.y } else { delta.x };
        if direction == 0.0 {
            return false;
        }
        let degrees = if input.modifiers.alt {
            self.config.fine_rotate_step_degrees
        } else {
            self.config.rotate_step_degrees
        };
        let angle = degrees.to_radians() * direction.signum();
        let Some(bounds) = self.selection_bounds(board) else {
            return false;
        };
        let pivot = bounds.center();
        let individually = input.modifiers.shift;

        self.begin_manipulation(board, ManipulationAction::None);
        for id in self.selection.clone() {
            board.update_shape(id, |shape| {
                let center = if individually { shape.center() } else { pivot };
                shape.rotate_about(center, angle);
            });
        }
        self.finish_manipulation(board)
    }

    /// Abort the current gesture and drop the selection.
    ///
    /// Called before the board is swapped by undo/redo, so every node id the
    /// controller holds is about to become stale.
    pub fn cancel(&mut self, board: &mut Board) {
        // Uncommitted geometry goes back to where the gesture found it.
        self.apply_to_originals(board, |_| {});
        self.remove_marquee(board);
        self.keyboard.cancel();
        self.cursor.reset();
        self.originals.clear();
        self.resize_from = None;
        self.action = ManipulationAction::None;
        self.highlighted.clear();
        self.clear_selection(board);
        log::debug!("Selection gesture cancelled");
    }

    // ---- Internals ----

    fn is_idle(&self) -> bool {
        self.action == ManipulationAction::None && !self.keyboard.is_active()
    }

    fn hit_test(&self, board: &Board, position: Point) -> Option<NodeId> {
        let probe = Collider::circle(position, self.config.hit_tolerance);
        board.scene().topmost_at(&probe, is_selectable)
    }

    fn marquee_rect(&self) -> Option<Rect> {
        self.cursor
            .anchor()
            .map(|anchor| Rect::from_points(anchor, self.cursor.position()))
    }

    fn marquee_hits(&self, board: &Board, rect: Rect) -> Vec<NodeId> {
        board.scene().hits(&Collider::rect(rect), is_selectable)
    }

    fn update_marquee(&mut self, board: &mut Board) {
        let Some(rect) = self.marquee_rect() else {
            return;
        };
        self.highlighted = self.marquee_hits(board, rect);
        let shape = marquee_shape(rect);
        let updated = self
            .marquee
            .is_some_and(|id| board.update_shape(id, |s| *s = shape.clone()));
        if !updated {
            self.marquee = board.create(Layer::Selection, shape, Status::Temporary, true);
        }
    }

    fn remove_marquee(&mut self, board: &mut Board) {
        if let Some(id) = self.marquee.take() {
            board.remove(id);
        }
        self.highlighted.clear();
    }

    /// Re-apply the pointer translation or resize from the original shapes.
    fn apply_drag(&self, board: &mut Board, phase: CursorPhase, displacement: Vec2) -> bool {
        let dragging = phase == CursorPhase::Dragging;
        match self.action {
            ManipulationAction::TranslateByPointer => {
                let delta = if dragging { displacement } else { Vec2::ZERO };
                self.apply_to_originals(board, |shape| shape.translate(delta));
                true
            }
            ManipulationAction::ResizeByControlPoint(cp) => {
                let Some(from) = self.resize_from else {
                    return false;
                };
                let to = if dragging {
                    cp.resize(from, displacement)
                } else {
                    from
                };
                let transform = resize_transform(from, to);
                self.apply_to_originals(board, |shape| shape.transform(transform));
                true
            }
            _ => false,
        }
    }

    fn begin_manipulation(&mut self, board: &Board, action: ManipulationAction) {
        self.action = action;
        self.originals = self
            .selection
            .iter()
            .filter_map(|id| board.node(*id).map(|n| (*id, n.shape.clone())))
            .collect();
    }

    /// End the current manipulation, committing only on a net change.
    fn finish_manipulation(&mut self, board: &mut Board) -> bool {
        let changed = self
            .originals
            .iter()
            .any(|(id, original)| board.node(*id).is_some_and(|n| n.shape != *original));
        self.originals.clear();
        self.resize_from = None;
        self.action = ManipulationAction::None;
        if changed {
            board.commit();
        }
        changed
    }

    fn apply_to_originals<F>(&self, board: &mut Board, f: F)
    where
        F: Fn(&mut Shape),
    {
        for (id, original) in &self.originals {
            board.update_shape(*id, |shape| {
                *shape = original.clone();
                f(shape);
            });
        }
    }

    fn translate_in_place(&self, board: &mut Board, delta: Vec2) {
        for id in &self.selection {
            board.update_shape(*id, |shape| shape.translate(delta));
        }
    }
}

fn is_selectable(node: &SceneNode) -> bool {
    node.status == Status::Permanent
}

fn marquee_shape(rect: Rect) -> Shape {
    let mut marquee =
        Rectangle::from_corners(Point::new(rect.x0, rect.y0), Point::new(rect.x1, rect.y1));
    marquee.style = ShapeStyle {
        stroke_color: SerializableColor::new(0x4a, 0x90, 0xd9, 0xff),
        stroke_width: 1.0,
        fill_color: Some(SerializableColor::new(0x4a, 0x90, 0xd9, 0x33)),
        opacity: 1.0,
    };
    Shape::Rectangle(marquee)
}

impl HistoryObserver for SelectionController {
    fn will_change(&mut self, board: &mut Board) {
        self.cancel(board);
    }
}

impl Tool for SelectionController {
    fn kind(&self) -> ToolKind {
        ToolKind::Select
    }

    fn on_pointer_down(
        &mut self,
        ctx: &mut ToolContext<'_>,
        input: PointerInput,
        button: MouseButton,
    ) -> bool {
        SelectionController::on_pointer_down(self, ctx.board, input, button)
    }

    fn on_pointer_move(&mut self, ctx: &mut ToolContext<'_>, input: PointerInput) -> bool {
        SelectionController::on_pointer_move(self, ctx.board, input)
    }

    fn on_pointer_up(
        &mut self,
        ctx: &mut ToolContext<'_>,
        input: PointerInput,
        button: MouseButton,
    ) -> bool {
        SelectionController::on_pointer_up(self, ctx.board, input, button)
    }

    fn on_key_down(&mut self, ctx: &mut ToolContext<'_>, key: Key, now: Instant) -> bool {
        SelectionController::on_key_down(self, ctx.board, key, now)
    }

    fn on_key_up(&mut self, ctx: &mut ToolContext<'_>, key: Key, _now: Instant) -> bool {
        SelectionController::on_key_up(self, ctx.board, key)
    }

    fn on_wheel(&mut self, ctx: &mut ToolContext<'_>, input: PointerInput, delta: Vec2) -> bool {
        SelectionController::on_wheel(self, ctx.board, input, delta)
    }

    fn on_tick(&mut self, ctx: &mut ToolContext<'_>, now: Instant) -> bool {
        SelectionController::on_tick(self, ctx.board, now)
    }

    fn next_deadline(&self) -> Option<Instant> {
        SelectionController::next_deadline(self)
    }

    fn cancel(&mut self, board: &mut Board) {
        SelectionController::cancel(self, board);
    }

    fn as_selection_mut(&mut self) -> Option<&mut SelectionController> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{ArrowKey, Modifiers};
    use std::time::Duration;

    const EPS: f64 = 1e-9;

    fn board_with_rect(x0: f64, y0: f64, x1: f64, y1: f64) -> (Board, NodeId) {
        let mut board = Board::headless();
        let id = board
            .create(
                Layer::Stack,
                Shape::Rectangle(Rectangle::from_corners(Point::new(x0, y0), Point::new(x1, y1))),
                Status::Permanent,
                true,
            )
            .unwrap();
        board.commit();
        (board, id)
    }

    fn at(x: f64, y: f64) -> PointerInput {
        PointerInput::new(Point::new(x, y))
    }

    fn marquee_select(sel: &mut SelectionController, board: &mut Board, from: Point, to: Point) {
        sel.on_pointer_down(board, PointerInput::new(from), MouseButton::Left);
        sel.on_pointer_move(board, PointerInput::new(to));
        sel.on_pointer_up(board, PointerInput::new(to), MouseButton::Left);
    }

    fn center(board: &Board, id: NodeId) -> Point {
        board.node(id).unwrap().shape.bounds().center()
    }

    #[test]
    fn test_marquee_selects_enclosed_rect() {
        let (mut board, id) = board_with_rect(0.0, 0.0, 20.0, 20.0);
        let mut sel = SelectionController::default();

        marquee_select(&mut sel, &mut board, Point::new(-5.0, -5.0), Point::new(25.0, 25.0));

        assert_eq!(sel.selection(), &[id]);
        assert_eq!(sel.state(), SelectionState::Manipulation);
        assert!(board.node(id).unwrap().is_selected());
        // The marquee chrome is gone
        assert_eq!(board.scene().count(Some(Status::Temporary), None), 0);
    }

    #[test]
    fn test_marquee_is_temporary_selection_layer_node() {
        let (mut board, _) = board_with_rect(0.0, 0.0, 20.0, 20.0);
        let mut sel = SelectionController::default();
        sel.on_pointer_down(&mut board, at(-5.0, -5.0), MouseButton::Left);
        sel.on_pointer_move(&mut board, at(10.0, 10.0));

        assert_eq!(sel.state(), SelectionState::Creation);
        assert_eq!(board.scene().count(Some(Status::Temporary), Some(Layer::Selection)), 1);
        assert_eq!(sel.highlighted().len(), 1);

        // Dragging back inside the threshold drops the marquee
        sel.on_pointer_move(&mut board, at(-4.0, -4.0));
        assert_eq!(board.scene().count(Some(Status::Temporary), None), 0);
        sel.on_pointer_up(&mut board, at(-4.0, -4.0), MouseButton::Left);
        assert_eq!(sel.state(), SelectionState::Nothing);
    }

    #[test]
    fn test_keyboard_translation_with_repeat() {
        let (mut board, id) = board_with_rect(0.0, 0.0, 20.0, 20.0);
        let mut sel = SelectionController::default();
        marquee_select(&mut sel, &mut board, Point::new(-5.0, -5.0), Point::new(25.0, 25.0));
        let before = center(&board, id);
        let undo_len = board.undo_len();

        let t0 = Instant::now();
        sel.on_key_down(&mut board, Key::Arrow(ArrowKey::Left), t0);
        sel.on_key_down(&mut board, Key::Arrow(ArrowKey::Down), t0);
        assert_eq!(sel.action(), ManipulationAction::TranslateByKeyboard);
        sel.on_tick(&mut board, t0 + Duration::from_millis(700));

        let after = center(&board, id);
        assert!((after.x - (before.x - 9.0)).abs() < EPS);
        assert!((after.y - (before.y + 9.0)).abs() < EPS);

        sel.on_key_up(&mut board, Key::Arrow(ArrowKey::Left));
        assert_eq!(board.undo_len(), undo_len);
        sel.on_key_up(&mut board, Key::Arrow(ArrowKey::Down));
        assert_eq!(sel.action(), ManipulationAction::None);
        assert_eq!(board.undo_len(), undo_len + 1);
    }

    #[test]
    fn test_pointer_blocked_during_keyboard_manipulation() {
        let (mut board, _) = board_with_rect(0.0, 0.0, 20.0, 20.0);
        let mut sel = SelectionController::default();
        sel.select_all(&mut board);
        sel.on_key_down(&mut board, Key::Arrow(ArrowKey::Right), Instant::now());
        assert!(!sel.on_pointer_down(&mut board, at(10.0, 10.0), MouseButton::Left));
    }

    #[test]
    fn test_drag_translates_and_commits_once() {
        let (mut board, id) = board_with_rect(0.0, 0.0, 20.0, 20.0);
        let mut sel = SelectionController::default();
        let undo_len = board.undo_len();

        sel.on_pointer_down(&mut board, at(10.0, 10.0), MouseButton::Left);
        assert_eq!(sel.selection(), &[id]);
        assert_eq!(sel.action(), ManipulationAction::TranslateByPointer);
        sel.on_pointer_move(&mut board, at(20.0, 15.0));
        sel.on_pointer_move(&mut board, at(40.0, 30.0));
        sel.on_pointer_up(&mut board, at(40.0, 30.0), MouseButton::Left);

        let c = center(&board, id);
        assert!((c.x - 40.0).abs() < EPS && (c.y - 30.0).abs() < EPS);
        assert_eq!(board.undo_len(), undo_len + 1);
    }

    #[test]
    fn test_release_point_ends_the_drag() {
        let (mut board, id) = board_with_rect(0.0, 0.0, 20.0, 20.0);
        let mut sel = SelectionController::default();
        let undo_len = board.undo_len();

        sel.on_pointer_down(&mut board, at(10.0, 10.0), MouseButton::Left);
        sel.on_pointer_move(&mut board, at(30.0, 10.0));
        sel.on_pointer_up(&mut board, at(60.0, 10.0), MouseButton::Left);

        let c = center(&board, id);
        assert!((c.x - 60.0).abs() < EPS && (c.y - 10.0).abs() < EPS);
        assert_eq!(board.undo_len(), undo_len + 1);
    }

    #[test]
    fn test_release_point_ends_the_resize() {
        let (mut board, id) = board_with_rect(0.0, 0.0, 20.0, 20.0);
        let mut sel = SelectionController::default();
        sel.select_all(&mut board);

        sel.on_pointer_down(&mut board, at(20.0, 20.0), MouseButton::Left);
        sel.on_pointer_move(&mut board, at(25.0, 25.0));
        sel.on_pointer_up(&mut board, at(40.0, 30.0), MouseButton::Left);

        let bounds = board.node(id).unwrap().shape.bounds();
        assert!((bounds.width() - 40.0).abs() < EPS);
        assert!((bounds.height() - 30.0).abs() < EPS);
    }

    #[test]
    fn test_drag_back_to_origin_does_not_commit() {
        let (mut board, id) = board_with_rect(0.0, 0.0, 20.0, 20.0);
        let mut sel = SelectionController::default();
        let undo_len = board.undo_len();

        sel.on_pointer_down(&mut board, at(10.0, 10.0), MouseButton::Left);
        sel.on_pointer_move(&mut board, at(60.0, 10.0));
        sel.on_pointer_move(&mut board, at(11.0, 11.0));
        sel.on_pointer_up(&mut board, at(11.0, 11.0), MouseButton::Left);

        let c = center(&board, id);
        assert!((c.x - 10.0).abs() < EPS && (c.y - 10.0).abs() < EPS);
        assert_eq!(board.undo_len(), undo_len);
    }

    #[test]
    fn test_click_on_empty_space_clears_selection() {
        let (mut board, _) = board_with_rect(0.0, 0.0, 20.0, 20.0);
        let mut sel = SelectionController::default();
        sel.select_all(&mut board);

        sel.on_pointer_down(&mut board, at(100.0, 100.0), MouseButton::Left);
        sel.on_pointer_up(&mut board, at(100.0, 100.0), MouseButton::Left);
        assert!(sel.selection().is_empty());
        assert_eq!(sel.state(), SelectionState::Nothing);
        assert!(board.selected_ids().is_empty());
    }

    #[test]
    fn test_resize_by_control_point() {
        let (mut board, id) = board_with_rect(0.0, 0.0, 20.0, 20.0);
        let mut sel = SelectionController::default();
        sel.select_all(&mut board);

        sel.on_pointer_down(&mut board, at(20.0, 20.0), MouseButton::Left);
        assert_eq!(
            sel.action(),
            ManipulationAction::ResizeByControlPoint(ControlPoint::Corner(Corner::BottomRight))
        );
        sel.on_pointer_move(&mut board, at(40.0, 30.0));
        sel.on_pointer_up(&mut board, at(40.0, 30.0), MouseButton::Left);

        let bounds = board.node(id).unwrap().shape.bounds();
        assert!((bounds.width() - 40.0).abs() < EPS);
        assert!((bounds.height() - 30.0).abs() < EPS);
        assert!(bounds.x0.abs() < EPS && bounds.y0.abs() < EPS);
    }

    #[test]
    fn test_inverse_marquee_toggles() {
        let mut board = Board::headless();
        let a = board
            .create(
                Layer::Stack,
                Shape::Rectangle(Rectangle::new(Point::new(0.0, 0.0), 10.0, 10.0)),
                Status::Permanent,
                true,
            )
            .unwrap();
        let b = board
            .create(
                Layer::Stack,
                Shape::Rectangle(Rectangle::new(Point::new(50.0, 0.0), 10.0, 10.0)),
                Status::Permanent,
                true,
            )
            .unwrap();
        let mut sel = SelectionController::default();
        sel.select_nodes(&mut board, &[a]);

        sel.on_pointer_down(&mut board, at(-5.0, -5.0), MouseButton::Right);
        assert_eq!(sel.action(), ManipulationAction::Inverse);
        sel.on_pointer_move(&mut board, at(70.0, 20.0));
        sel.on_pointer_up(&mut board, at(70.0, 20.0), MouseButton::Right);

        assert_eq!(sel.selection(), &[b]);
        assert_eq!(sel.state(), SelectionState::Manipulation);
        assert_eq!(sel.action(), ManipulationAction::None);
    }

    #[test]
    fn test_right_click_toggles_from_nothing() {
        let (mut board, id) = board_with_rect(0.0, 0.0, 20.0, 20.0);
        let mut sel = SelectionController::default();
        sel.on_pointer_down(&mut board, at(10.0, 10.0), MouseButton::Right);
        sel.on_pointer_up(&mut board, at(10.0, 10.0), MouseButton::Right);
        assert_eq!(sel.selection(), &[id]);
    }

    #[test]
    fn test_right_button_ignored_while_left_anchored() {
        let (mut board, _) = board_with_rect(0.0, 0.0, 20.0, 20.0);
        let mut sel = SelectionController::default();
        sel.on_pointer_down(&mut board, at(100.0, 100.0), MouseButton::Left);
        assert!(!sel.on_pointer_down(&mut board, at(100.0, 100.0), MouseButton::Right));
        assert!(!sel.on_pointer_up(&mut board, at(100.0, 100.0), MouseButton::Right));
        assert_eq!(sel.state(), SelectionState::Creation);
    }

    #[test]
    fn test_wheel_rotates_and_commits() {
        let (mut board, id) = board_with_rect(0.0, 0.0, 20.0, 10.0);
        let mut sel = SelectionController::default();
        sel.select_all(&mut board);
        let undo_len = board.undo_len();

        assert!(sel.on_wheel(&mut board, at(0.0, 0.0), Vec2::new(0.0, 1.0)));
        let rotation = board.node(id).unwrap().shape.rotation();
        assert!((rotation - 15f64.to_radians()).abs() < EPS);
        assert_eq!(board.undo_len(), undo_len + 1);

        let fine = PointerInput::with_modifiers(
            Point::ZERO,
            Modifiers {
                alt: true,
                ..Default::default()
            },
        );
        sel.on_wheel(&mut board, fine, Vec2::new(0.0, -1.0));
        let rotation = board.node(id).unwrap().shape.rotation();
        assert!((rotation - 14f64.to_radians()).abs() < EPS);
    }

    #[test]
    fn test_wheel_rotates_group_around_common_center() {
        let mut board = Board::headless();
        let a = board
            .create(
                Layer::Stack,
                Shape::Rectangle(Rectangle::new(Point::new(0.0, 0.0), 10.0, 10.0)),
                Status::Permanent,
                true,
            )
            .unwrap();
        board
            .create(
                Layer::Stack,
                Shape::Rectangle(Rectangle::new(Point::new(30.0, 0.0), 10.0, 10.0)),
                Status::Permanent,
                true,
            )
            .unwrap();
        let mut sel = SelectionController::default();
        sel.select_all(&mut board);
        let before = center(&board, a);

        sel.on_wheel(&mut board, at(0.0, 0.0), Vec2::new(0.0, 1.0));
        let after = board.node(a).unwrap().shape.center();
        assert!(before.distance(after) > 1.0);

        // Shift keeps each node on its own center
        let own = PointerInput::with_modifiers(
            Point::ZERO,
            Modifiers {
                shift: true,
                ..Default::default()
            },
        );
        sel.on_wheel(&mut board, own, Vec2::new(0.0, 1.0));
        assert!(board.node(a).unwrap().shape.center().distance(after) < EPS);
    }

    #[test]
    fn test_cancel_during_drag_removes_marquee() {
        let (mut board, _) = board_with_rect(0.0, 0.0, 20.0, 20.0);
        let mut sel = SelectionController::default();
        sel.on_pointer_down(&mut board, at(-5.0, -5.0), MouseButton::Left);
        sel.on_pointer_move(&mut board, at(30.0, 30.0));
        assert_eq!(board.scene().count(Some(Status::Temporary), None), 1);

        assert!(board.undo_with(&mut sel));
        assert_eq!(board.scene().count(Some(Status::Temporary), None), 0);
        assert_eq!(sel.state(), SelectionState::Nothing);
        // The release of the cancelled press is ignored
        assert!(!sel.on_pointer_up(&mut board, at(30.0, 30.0), MouseButton::Left));
    }

    #[test]
    fn test_cancel_restores_uncommitted_drag() {
        let (mut board, id) = board_with_rect(0.0, 0.0, 20.0, 20.0);
        let mut sel = SelectionController::default();
        sel.on_pointer_down(&mut board, at(10.0, 10.0), MouseButton::Left);
        sel.on_pointer_move(&mut board, at(50.0, 50.0));
        let undo_len = board.undo_len();

        sel.cancel(&mut board);
        let c = center(&board, id);
        assert!((c.x - 10.0).abs() < EPS && (c.y - 10.0).abs() < EPS);
        assert_eq!(board.undo_len(), undo_len);
        assert_eq!(sel.action(), ManipulationAction::None);
    }

    #[test]
    fn test_delete_and_duplicate() {
        let (mut board, id) = board_with_rect(0.0, 0.0, 20.0, 20.0);
        let mut sel = SelectionController::default();
        sel.select_all(&mut board);
        let undo_len = board.undo_len();

        let clones = sel.duplicate_selection(&mut board);
        assert_eq!(clones.len(), 1);
        assert_eq!(sel.selection(), clones.as_slice());
        assert_eq!(board.undo_len(), undo_len + 1);
        let c = center(&board, clones[0]);
        assert!((c.x - 20.0).abs() < EPS && (c.y - 20.0).abs() < EPS);

        assert!(sel.delete_selection(&mut board));
        assert_eq!(board.len(), 1);
        assert!(board.node(id).is_some());
        assert_eq!(board.undo_len(), undo_len + 2);
        assert_eq!(sel.state(), SelectionState::Nothing);
    }

    #[test]
    fn test_cut_and_paste() {
        let (mut board, _) = board_with_rect(0.0, 0.0, 20.0, 20.0);
        let mut sel = SelectionController::default();
        sel.select_all(&mut board);

        let clipboard = sel.cut_selection(&mut board).unwrap();
        assert!(board.is_empty());
        let pasted = sel.paste(&mut board, &clipboard, Vec2::ZERO);
        assert_eq!(pasted.len(), 1);
        assert_eq!(sel.selection(), pasted.as_slice());
    }

    #[test]
    fn test_select_nodes_ignores_chrome_and_unknown() {
        let (mut board, id) = board_with_rect(0.0, 0.0, 20.0, 20.0);
        let chrome = board
            .create(
                Layer::Selection,
                marquee_shape(Rect::new(0.0, 0.0, 1.0, 1.0)),
                Status::Temporary,
                true,
            )
            .unwrap();
        let mut sel = SelectionController::default();
        sel.select_nodes(&mut board, &[chrome, NodeId::nil(), id]);
        assert_eq!(sel.selection(), &[id]);
    }
}
