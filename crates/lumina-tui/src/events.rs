//! UI event types.
//!
//! Events are inputs to the reducer: terminal input, tick cadence, and
//! async results delivered through the runtime inbox.

use crossterm::event::Event;

/// Events processed by the reducer.
#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick for animations and render cadence.
    Tick,

    /// Raw terminal event (keys, resize).
    Terminal(Event),

    /// Assistant answer (or failure) for a previously issued request.
    ///
    /// `request` is the sequence number assigned when the question was sent.
    /// Replies whose number no longer matches the pending one are discarded.
    AssistantReply {
        request: u64,
        result: Result<String, String>,
    },
}
