//! Top-level editor: routes host input to the active tool and runs
//! keyboard shortcuts against the board.

use crate::board::{Board, BoardEvent, HeadlessTarget, RenderTarget};
use crate::config::EditorConfig;
use crate::history::BoardJson;
use crate::input::{InputEvent, Instant, Key, Modifiers, MouseButton, PointerInput};
use crate::scene::NodeId;
use crate::shortcuts::{EditorCommand, ShortcutRegistry};
use crate::storage::{SavedBoard, Storage, StorageResult};
use crate::tools::{CancelOnSwap, ToolContext, ToolKind, ToolRegistry};
use kurbo::Vec2;

/// Owns a board together with everything that edits it.
pub struct Editor {
    board: Board,
    tools: ToolRegistry,
    config: EditorConfig,
    shortcuts: ShortcutRegistry,
    clipboard: Option<BoardJson>,
    /// Display name written alongside the history when saving.
    pub name: String,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("board", &self.board)
            .field("tool", &self.tools.active_kind())
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Editor {
    /// Create an editor drawing into a headless board until a renderer is
    /// attached.
    pub fn new(config: EditorConfig) -> Self {
        let mut board = Board::new(config.max_history);
        board.attach(Box::new(HeadlessTarget));
        Self {
            board,
            tools: ToolRegistry::new(&config),
            config,
            shortcuts: ShortcutRegistry::default(),
            clipboard: None,
            name: "Untitled".to_string(),
        }
    }

    /// Connect a renderer to the board, replacing the current one.
    pub fn attach(&mut self, target: Box<dyn RenderTarget>) {
        self.board.attach(target);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Mutable access to the current tool options.
    pub fn options_mut(&mut self) -> &mut crate::config::ToolOptions {
        &mut self.config.tools
    }

    pub fn shortcuts(&self) -> &ShortcutRegistry {
        &self.shortcuts
    }

    pub fn clipboard(&self) -> Option<&BoardJson> {
        self.clipboard.as_ref()
    }

    pub fn current_tool(&self) -> ToolKind {
        self.tools.active_kind()
    }

    /// Switch tools, cancelling whatever gesture the current one had going.
    pub fn set_tool(&mut self, kind: ToolKind) {
        self.tools.set_active(kind, &mut self.board);
    }

    pub fn selected_nodes(&self) -> Vec<NodeId> {
        self.board.selected_ids()
    }

    /// Select the permanent nodes among `ids`, switching to the select tool.
    pub fn select_nodes(&mut self, ids: &[NodeId]) {
        self.set_tool(ToolKind::Select);
        if let Some(selection) = self.tools.selection_mut() {
            selection.select_nodes(&mut self.board, ids);
        }
    }

    /// Drain board notifications since the last call.
    pub fn poll_events(&mut self) -> Vec<BoardEvent> {
        self.board.poll_events()
    }

    // ---- Input routing ----

    /// Dispatch one host event. Returns true when a repaint may be needed.
    pub fn handle(&mut self, event: InputEvent, now: Instant) -> bool {
        match event {
            InputEvent::PointerDown { input, button } => self.on_pointer_down(input, button),
            InputEvent::PointerMove { input } => self.on_pointer_move(input),
            InputEvent::PointerUp { input, button } => self.on_pointer_up(input, button),
            InputEvent::KeyDown { key, modifiers } => self.on_key_down(key, modifiers, now),
            InputEvent::KeyUp { key, .. } => self.on_key_up(key, now),
            InputEvent::Wheel { input, delta } => self.on_wheel(input, delta),
        }
    }

    pub fn on_pointer_down(&mut self, input: PointerInput, button: MouseButton) -> bool {
        let Some(tool) = self.tools.active_mut() else {
            return false;
        };
        let mut ctx = ToolContext {
            board: &mut self.board,
            options: &self.config.tools,
        };
        tool.on_pointer_down(&mut ctx, input, button)
    }

    pub fn on_pointer_move(&mut self, input: PointerInput) -> bool {
        let Some(tool) = self.tools.active_mut() else {
            return false;
        };
        let mut ctx = ToolContext {
            board: &mut self.board,
            options: &self.config.tools,
        };
        tool.on_pointer_move(&mut ctx, input)
    }

    pub fn on_pointer_up(&mut self, input: PointerInput, button: MouseButton) -> bool {
        let Some(tool) = self.tools.active_mut() else {
            return false;
        };
        let mut ctx = ToolContext {
            board: &mut self.board,
            options: &self.config.tools,
        };
        tool.on_pointer_up(&mut ctx, input, button)
    }

    /// Shortcuts win over the tool's own key handling.
    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers, now: Instant) -> bool {
        if let Some(command) = self.shortcuts.lookup(key, modifiers) {
            return self.execute(command);
        }
        let Some(tool) = self.tools.active_mut() else {
            return false;
        };
        let mut ctx = ToolContext {
            board: &mut self.board,
            options: &self.config.tools,
        };
        tool.on_key_down(&mut ctx, key, now)
    }

    pub fn on_key_up(&mut self, key: Key, now: Instant) -> bool {
        let Some(tool) = self.tools.active_mut() else {
            return false;
        };
        let mut ctx = ToolContext {
            board: &mut self.board,
            options: &self.config.tools,
        };
        tool.on_key_up(&mut ctx, key, now)
    }

    pub fn on_wheel(&mut self, input: PointerInput, delta: Vec2) -> bool {
        let Some(tool) = self.tools.active_mut() else {
            return false;
        };
        let mut ctx = ToolContext {
            board: &mut self.board,
            options: &self.config.tools,
        };
        tool.on_wheel(&mut ctx, input, delta)
    }

    /// Advance keyboard repeat timers. The host calls this at or after
    /// [`Editor::next_deadline`].
    pub fn on_tick(&mut self, now: Instant) -> bool {
        let Some(tool) = self.tools.active_mut() else {
            return false;
        };
        let mut ctx = ToolContext {
            board: &mut self.board,
            options: &self.config.tools,
        };
        tool.on_tick(&mut ctx, now)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.tools
            .get(self.tools.active_kind())
            .and_then(|tool| tool.next_deadline())
    }

    // ---- Commands ----

    pub fn execute(&mut self, command: EditorCommand) -> bool {
        log::debug!("Executing {:?}", command);
        match command {
            EditorCommand::Undo => self.undo(),
            EditorCommand::Redo => self.redo(),
            EditorCommand::SelectAll => {
                self.set_tool(ToolKind::Select);
                match self.tools.selection_mut() {
                    Some(selection) => {
                        selection.select_all(&mut self.board);
                        true
                    }
                    None => false,
                }
            }
            EditorCommand::Copy => self.copy(),
            EditorCommand::Cut => self.cut(),
            EditorCommand::Paste => !self.paste().is_empty(),
            EditorCommand::Duplicate => match self.tools.selection_mut() {
                Some(selection) => !selection.duplicate_selection(&mut self.board).is_empty(),
                None => false,
            },
            EditorCommand::Delete => match self.tools.selection_mut() {
                Some(selection) => selection.delete_selection(&mut self.board),
                None => false,
            },
            EditorCommand::Cancel => self.cancel(),
        }
    }

    /// Undo one step, cancelling the active gesture first.
    pub fn undo(&mut self) -> bool {
        match self.tools.active_mut() {
            Some(tool) => self.board.undo_with(&mut CancelOnSwap(tool)),
            None => self.board.undo(),
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.tools.active_mut() {
            Some(tool) => self.board.redo_with(&mut CancelOnSwap(tool)),
            None => self.board.redo(),
        }
    }

    /// Abort the current gesture. With the select tool this also drops the
    /// selection.
    pub fn cancel(&mut self) -> bool {
        match self.tools.active_mut() {
            Some(tool) => {
                tool.cancel(&mut self.board);
                true
            }
            None => false,
        }
    }

    /// Copy the selection into the clipboard buffer.
    pub fn copy(&mut self) -> bool {
        let Some(selection) = self.tools.selection_mut() else {
            return false;
        };
        let copied = selection.copy_selection(&self.board);
        if copied.is_empty() {
            return false;
        }
        self.clipboard = Some(copied);
        true
    }

    pub fn cut(&mut self) -> bool {
        let Some(selection) = self.tools.selection_mut() else {
            return false;
        };
        match selection.cut_selection(&mut self.board) {
            Some(copied) => {
                self.clipboard = Some(copied);
                true
            }
            None => false,
        }
    }

    /// Paste the clipboard buffer offset from the original and select it.
    pub fn paste(&mut self) -> Vec<NodeId> {
        let Some(clipboard) = self.clipboard.clone() else {
            return Vec::new();
        };
        self.set_tool(ToolKind::Select);
        let offset = self.config.selection.duplicate_offset();
        match self.tools.selection_mut() {
            Some(selection) => selection.paste(&mut self.board, &clipboard, offset),
            None => Vec::new(),
        }
    }

    /// Clipboard buffer as JSON, for hosts that bridge to a system clipboard.
    pub fn clipboard_json(&self) -> Option<String> {
        self.clipboard
            .as_ref()
            .and_then(|clipboard| serde_json::to_string(clipboard).ok())
    }

    /// Replace the clipboard buffer from JSON. Returns false if it does not parse.
    pub fn set_clipboard_json(&mut self, json: &str) -> bool {
        match serde_json::from_str::<BoardJson>(json) {
            Ok(clipboard) => {
                self.clipboard = Some(clipboard);
                true
            }
            Err(e) => {
                log::warn!("Ignoring clipboard payload: {}", e);
                false
            }
        }
    }

    // ---- Persistence ----

    /// Write the board's name and full history under `id`.
    pub async fn save_to(&self, storage: &dyn Storage, id: &str) -> StorageResult<()> {
        let saved = SavedBoard::new(self.name.clone(), self.board.stacks());
        storage.save(id, &saved).await
    }

    /// Replace the board with the one stored under `id`.
    pub async fn open_from(&mut self, storage: &dyn Storage, id: &str) -> StorageResult<()> {
        let saved = storage.load(id).await?;
        self.cancel();
        self.board.load(saved.stacks);
        self.name = saved.name;
        log::info!("Opened board {} ({} nodes)", id, self.board.len());
        Ok(())
    }
}
