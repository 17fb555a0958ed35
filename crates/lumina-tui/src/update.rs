//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! This is the single source of truth for how events modify state.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use lumina_core::assistant::{APOLOGY, AssistantMessage};
use lumina_core::keypad::{BinOp, Key, Mode, SciOp};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::{AppState, Focus, Overlay, TuiState};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            // Advance spinner animation
            app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::AssistantReply { request, result } => {
            handle_assistant_reply(&mut app.tui, request, result);
            vec![]
        }
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        // Resize is handled implicitly: render reads the frame size each draw.
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    // Global shortcuts take priority over panel input.
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return vec![UiEffect::Quit],
            KeyCode::Char('h') => {
                toggle_overlay(app, Overlay::History);
                return vec![];
            }
            KeyCode::Char('a') => {
                toggle_overlay(app, Overlay::Assistant);
                return vec![];
            }
            KeyCode::Char('l') => {
                app.tui.history.clear();
                return vec![];
            }
            _ => return vec![],
        }
    }

    match key.code {
        KeyCode::Esc => {
            if app.overlay.is_some() {
                app.overlay = None;
            } else if app.tui.focus == Focus::Assistant {
                app.tui.focus = Focus::Keypad;
            } else {
                app.tui.keypad.clear();
            }
            vec![]
        }
        KeyCode::Tab => {
            app.tui.focus = app.tui.focus.toggled();
            vec![]
        }
        KeyCode::F(2) => {
            app.tui.mode = app.tui.mode.toggled();
            vec![]
        }
        _ => {
            // The assistant overlay routes typed keys to the assistant even
            // when the keypad has focus.
            let assistant_active = app.tui.focus == Focus::Assistant
                || app.overlay == Some(Overlay::Assistant);
            if assistant_active {
                handle_assistant_key(&mut app.tui, key)
            } else {
                handle_keypad_key(&mut app.tui, key);
                vec![]
            }
        }
    }
}

fn toggle_overlay(app: &mut AppState, overlay: Overlay) {
    if app.overlay == Some(overlay) {
        app.overlay = None;
    } else {
        app.overlay = Some(overlay);
    }
}

fn handle_keypad_key(state: &mut TuiState, key: KeyEvent) {
    let pressed = match key.code {
        KeyCode::Char(c @ '0'..='9') => Some(Key::Digit(c as u8 - b'0')),
        KeyCode::Char('.') => Some(Key::Decimal),
        KeyCode::Char(c) if BinOp::from_char(c).is_some() => {
            BinOp::from_char(c).map(Key::Op)
        }
        KeyCode::Char('=') | KeyCode::Enter => Some(Key::Equals),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Delete => Some(Key::Clear),
        KeyCode::Char('c' | 'C') if state.mode == Mode::Basic => Some(Key::Clear),
        KeyCode::Char(c) if state.mode == Mode::Scientific => {
            if let Some(op) = sci_op_for(c) {
                let computed = state.keypad.scientific(op);
                state.history.record(&computed.expression, &computed.result);
            }
            None
        }
        _ => None,
    };

    if let Some(pressed) = pressed
        && let Some(computed) = state.keypad.press(pressed)
    {
        state.history.record(&computed.expression, &computed.result);
    }
}

/// Maps a letter to a scientific operation (scientific mode only).
fn sci_op_for(c: char) -> Option<SciOp> {
    match c {
        's' => Some(SciOp::Sin),
        'c' => Some(SciOp::Cos),
        't' => Some(SciOp::Tan),
        'r' => Some(SciOp::Sqrt),
        'l' => Some(SciOp::Log),
        'e' => Some(SciOp::Exp),
        'q' => Some(SciOp::Pow2),
        _ => None,
    }
}

fn handle_assistant_key(state: &mut TuiState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Enter => submit_question(state),
        KeyCode::Backspace => {
            state.assistant.input.pop();
            vec![]
        }
        KeyCode::Char(c) => {
            state.assistant.input.push(c);
            vec![]
        }
        _ => vec![],
    }
}

/// Sends the drafted question, enforcing single-flight.
///
/// A blank draft or an in-flight request makes this a no-op.
fn submit_question(state: &mut TuiState) -> Vec<UiEffect> {
    let question = state.assistant.input.trim().to_string();
    if question.is_empty() || state.assistant.is_thinking() {
        return vec![];
    }

    let request = state.assistant.next_request;
    state.assistant.next_request += 1;
    state.assistant.pending = Some(request);
    state.assistant.input.clear();
    state
        .assistant
        .messages
        .push(AssistantMessage::user(question.clone()));

    vec![UiEffect::AskAssistant { request, question }]
}

fn handle_assistant_reply(state: &mut TuiState, request: u64, result: Result<String, String>) {
    // Stale replies (from a request that is no longer pending) are dropped.
    if state.assistant.pending != Some(request) {
        return;
    }
    state.assistant.pending = None;

    let content = match result {
        Ok(answer) => answer,
        Err(_) => APOLOGY.to_string(),
    };
    state.assistant.messages.push(AssistantMessage::assistant(content));
}
