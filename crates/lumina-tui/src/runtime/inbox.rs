//! Inbox channel types.
//!
//! Async handlers send `UiEvent`s to the inbox; the runtime drains it
//! each frame.

use tokio::sync::mpsc;

use crate::events::UiEvent;

pub type UiEventSender = mpsc::UnboundedSender<UiEvent>;
pub type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;
