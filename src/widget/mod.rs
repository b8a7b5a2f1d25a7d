// src/widget/mod.rs
//! The support chat widget: transcript, turn handling and reply dispatch.
//!
//! A [`SupportWidget`] runs as an actor that owns its surface. Everything
//! else talks to it through a cloneable [`WidgetHandle`].

pub mod actor;
pub mod classifier;
pub mod message;
pub mod quick_action;
pub mod replies;
pub mod scheduler;
pub mod session;
pub mod settings;
pub mod state;

pub use actor::SupportWidget;
pub use quick_action::QuickAction;

use tokio::sync::{mpsc, watch};
use tracing::warn;

use crate::error::{Result, WidgetError};
use settings::SettingToggle;
use state::TurnId;

/// Everything the widget actor can be asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetIntent {
    /// Read the input handle and send its content.
    Submit,
    /// Fill the input with a canned text and send it.
    QuickAction(QuickAction),
    InputChanged,
    ToggleTheme,
    Toggle(SettingToggle),
    ReplyDue { turn: TurnId },
    TypingElapsed { turn: TurnId },
    Shutdown,
}

/// Observable summary, published after every intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WidgetStatus {
    pub awaiting_response: bool,
    pub queued: usize,
    pub messages: usize,
}

/// Cloneable sender side of a running widget.
///
/// Only user-facing requests are exposed. Timer intents are posted by the
/// widget itself, so a caller cannot end a turn early:
///
/// ```compile_fail
/// use support_desk_widget::widget::{WidgetHandle, WidgetIntent};
///
/// fn end_turn_early(handle: &WidgetHandle) {
///     let _ = handle.send(WidgetIntent::ReplyDue { turn: 1 });
/// }
/// ```
#[derive(Debug, Clone)]
pub struct WidgetHandle {
    intent_tx: mpsc::UnboundedSender<WidgetIntent>,
    status_rx: watch::Receiver<WidgetStatus>,
}

impl WidgetHandle {
    pub(crate) fn new(
        intent_tx: mpsc::UnboundedSender<WidgetIntent>,
        status_rx: watch::Receiver<WidgetStatus>,
    ) -> Self {
        Self { intent_tx, status_rx }
    }

    pub(crate) fn send(&self, intent: WidgetIntent) -> Result<()> {
        self.intent_tx.send(intent).map_err(|_| WidgetError::ChannelClosed)
    }

    fn send_or_warn(&self, intent: WidgetIntent) {
        if let Err(e) = self.send(intent.clone()) {
            warn!("dropped {:?}: {}", intent, e);
        }
    }

    pub fn submit(&self) {
        self.send_or_warn(WidgetIntent::Submit);
    }

    pub fn quick_action(&self, action: QuickAction) {
        self.send_or_warn(WidgetIntent::QuickAction(action));
    }

    pub fn input_changed(&self) {
        self.send_or_warn(WidgetIntent::InputChanged);
    }

    pub fn toggle_theme(&self) {
        self.send_or_warn(WidgetIntent::ToggleTheme);
    }

    pub fn toggle(&self, toggle: SettingToggle) {
        self.send_or_warn(WidgetIntent::Toggle(toggle));
    }

    pub fn shutdown(&self) {
        self.send_or_warn(WidgetIntent::Shutdown);
    }

    pub fn status(&self) -> WidgetStatus {
        *self.status_rx.borrow()
    }

    /// Wait for the next status change. Errors once the widget has stopped.
    pub async fn changed(&mut self) -> Result<WidgetStatus> {
        self.status_rx.changed().await.map_err(|_| WidgetError::ChannelClosed)?;
        Ok(*self.status_rx.borrow_and_update())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_reports_a_stopped_widget() {
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        let (_status_tx, status_rx) = watch::channel(WidgetStatus::default());
        let handle = WidgetHandle::new(intent_tx, status_rx);

        assert!(handle.send(WidgetIntent::Submit).is_ok());
        drop(intent_rx);
        assert!(matches!(handle.send(WidgetIntent::Submit), Err(WidgetError::ChannelClosed)));
        // fire-and-forget helpers only log
        handle.submit();
    }
}
