//! Inkboard Core Library
//!
//! Platform-agnostic core of the Inkboard drawing surface: a layered scene
//! graph, snapshot undo/redo, SAT collision, the selection controller and
//! the drawing tools that feed it.

pub mod board;
pub mod collision;
pub mod config;
pub mod editor;
pub mod history;
pub mod input;
pub mod layer;
pub mod scene;
pub mod selection;
pub mod shapes;
pub mod shortcuts;
pub mod storage;
pub mod tools;

pub use board::{Board, BoardEvent, HeadlessTarget, HistoryObserver, Placement, RenderTarget};
pub use collision::{Collider, intersects};
pub use config::{ConfigError, EditorConfig, SelectionConfig, ToolOptions};
pub use editor::Editor;
pub use history::{BoardJson, UndoRedoStack, UndoRedoStacks};
pub use input::{InputEvent, Key, Modifiers, MouseButton, PointerInput};
pub use layer::{Layer, LayerOrdering};
pub use scene::{NodeId, SceneGraph, SceneNode, Status};
pub use selection::{ManipulationAction, SelectionController, SelectionState};
pub use shapes::{Shape, ShapeKind, SvgJson};
pub use shortcuts::{EditorCommand, ShortcutRegistry};
pub use storage::{MemoryStorage, SavedBoard, Storage, StorageError};
pub use tools::{Tool, ToolKind, ToolRegistry};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
