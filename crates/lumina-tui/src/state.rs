//! Application state composition.
//!
//! This module defines the top-level state hierarchy for the TUI:
//! - `AppState` - combined state (`TuiState` + overlay)
//! - `TuiState` - non-overlay UI state (keypad, history, assistant)
//!
//! ## State Hierarchy
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── keypad: Keypad           (expression/display state machine)
//! │   ├── mode: Mode               (basic or scientific keypad)
//! │   ├── history: HistoryStore    (bounded past calculations)
//! │   ├── assistant: AssistantState (transcript, input, pending request)
//! │   └── focus: Focus             (which panel receives typed keys)
//! └── overlay: Option<Overlay>     (modal overlays for narrow terminals)
//! ```
//!
//! State is split between `TuiState` and `Option<Overlay>` so overlay
//! handling can borrow both without conflicts.

use lumina_core::assistant::{AssistantMessage, GREETING};
use lumina_core::config::Config;
use lumina_core::history::HistoryStore;
use lumina_core::keypad::{Keypad, Mode};

/// Combined application state for the TUI.
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            tui: TuiState::new(config),
            overlay: None,
        }
    }
}

/// Which panel receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Keypad,
    Assistant,
}

impl Focus {
    pub fn toggled(self) -> Focus {
        match self {
            Focus::Keypad => Focus::Assistant,
            Focus::Assistant => Focus::Keypad,
        }
    }
}

/// Modal overlays shown on top of the calculator in narrow terminals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    History,
    Assistant,
}

/// Assistant panel state: transcript, draft input, in-flight request.
pub struct AssistantState {
    /// Transcript messages, oldest first.
    pub messages: Vec<AssistantMessage>,
    /// Draft question being typed.
    pub input: String,
    /// Sequence number of the in-flight request, if any.
    ///
    /// At most one request is in flight; replies carrying a different
    /// number are stale and get discarded.
    pub pending: Option<u64>,
    /// Next sequence number to assign.
    pub next_request: u64,
}

impl AssistantState {
    pub fn new() -> Self {
        Self {
            messages: vec![AssistantMessage::assistant(GREETING)],
            input: String::new(),
            pending: None,
            next_request: 1,
        }
    }

    pub fn is_thinking(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for AssistantState {
    fn default() -> Self {
        Self::new()
    }
}

/// Non-overlay UI state.
pub struct TuiState {
    /// Set to true to exit the event loop.
    pub should_quit: bool,
    /// Expression/display input state machine.
    pub keypad: Keypad,
    /// Active keypad mode.
    pub mode: Mode,
    /// Bounded calculation history, newest first.
    pub history: HistoryStore,
    /// Assistant transcript and request state.
    pub assistant: AssistantState,
    /// Which panel receives typed keys.
    pub focus: Focus,
    /// Spinner animation frame counter.
    pub spinner_frame: u8,
    /// Application configuration.
    pub config: Config,
}

impl TuiState {
    pub fn new(config: Config) -> Self {
        Self {
            should_quit: false,
            keypad: Keypad::new(),
            mode: Mode::Basic,
            history: HistoryStore::new(),
            assistant: AssistantState::new(),
            focus: Focus::Keypad,
            spinner_frame: 0,
            config,
        }
    }
}
