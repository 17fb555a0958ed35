//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).
//!
//! This keeps the reducer pure: it only mutates state and returns effects,
//! never performs I/O or spawns tasks directly.

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Ask the assistant a word problem.
    ///
    /// The runtime spawns the API call and delivers the outcome back as
    /// `UiEvent::AssistantReply` with the same `request` number.
    AskAssistant { request: u64, question: String },
}
