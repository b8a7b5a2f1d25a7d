// src/widget/actor.rs
use chrono::Local;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::scheduler::TurnScheduler;
use super::session::{Session, UserIdentity};
use super::state::{TurnIntent, TurnState, TurnStateMachine, WidgetEvent};
use super::{WidgetHandle, WidgetIntent, WidgetStatus};
use crate::config::WidgetConfig;
use crate::error::{Result, WidgetError};
use crate::render::render_message;
use crate::surface::{missing_handle, NoticeKind, Surface};
use crate::util::string::StringUtils;

pub struct SupportWidget<S: Surface> {
    state: TurnState,
    surface: S,
    scheduler: TurnScheduler,
    intent_rx: mpsc::UnboundedReceiver<WidgetIntent>,
    status_tx: watch::Sender<WidgetStatus>,
    reply_delay: Duration,
    typing_delay: Duration,
}

impl<S: Surface> SupportWidget<S> {
    /// Bind a widget to `surface`. Fails if any of the five handles is missing.
    pub fn new(mut surface: S, config: &WidgetConfig) -> Result<(Self, WidgetHandle)> {
        if let Some(role) = missing_handle(&surface) {
            warn!("surface is missing handle {}", role);
            return Err(WidgetError::MissingHandle(role));
        }

        let session = Session::new(UserIdentity::from(&config.user));
        info!("support session opened, ticket {}", session.ticket_id());

        surface.apply_theme(config.settings.theme);
        surface.show_welcome(&session.welcome_banner());

        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        let (status_tx, status_rx) = watch::channel(WidgetStatus::default());

        let widget = Self {
            state: TurnState::new(session, config.settings.clone(), config.overlap),
            surface,
            scheduler: TurnScheduler::new(&intent_tx),
            intent_rx,
            status_tx,
            reply_delay: config.reply_delay(),
            typing_delay: config.typing_delay(),
        };

        Ok((widget, WidgetHandle::new(intent_tx, status_rx)))
    }

    pub fn session(&self) -> &Session {
        &self.state.session
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Run the actor event loop until shutdown or until every handle is dropped.
    pub async fn run(mut self) {
        while let Some(intent) = self.intent_rx.recv().await {
            if intent == WidgetIntent::Shutdown {
                break;
            }
            self.process_intent(intent);
        }
        self.scheduler.cancel();
        debug!("widget stopped");
    }

    fn process_intent(&mut self, intent: WidgetIntent) {
        debug!("intent: {:?}", intent);

        let turn_intent = match intent {
            WidgetIntent::Submit => TurnIntent::UserMessage {
                text: self.surface.input_value(),
                at: Local::now(),
            },
            WidgetIntent::QuickAction(action) => {
                self.surface.set_input_value(action.text());
                TurnIntent::UserMessage { text: action.text().to_string(), at: Local::now() }
            }
            WidgetIntent::InputChanged => {
                self.surface.fit_input();
                return;
            }
            WidgetIntent::ToggleTheme => TurnIntent::ToggleTheme,
            WidgetIntent::Toggle(toggle) => TurnIntent::Toggle(toggle),
            WidgetIntent::ReplyDue { turn } => TurnIntent::ReplyDue { turn },
            WidgetIntent::TypingElapsed { turn } => TurnIntent::TypingDone { turn, at: Local::now() },
            WidgetIntent::Shutdown => return,
        };

        let from_timer = matches!(turn_intent, TurnIntent::ReplyDue { .. } | TurnIntent::TypingDone { .. });

        // Pure state transition
        let (new_state, events) = TurnStateMachine::transition(self.state.clone(), turn_intent);
        if from_timer && events.is_empty() {
            warn!("ignoring timer for a turn that is no longer current");
        }

        // Update internal state
        self.state = new_state;

        for event in events {
            self.handle_side_effects(event);
        }

        self.publish_status();
    }

    fn handle_side_effects(&mut self, event: WidgetEvent) {
        if let Ok(json) = serde_json::to_string(&event) {
            debug!("event: {}", json);
        }

        match event {
            WidgetEvent::WelcomeRemoved => self.surface.remove_welcome(),
            WidgetEvent::MessageAppended(message) => {
                self.surface.append_message(&render_message(&message));
                if self.state.settings.auto_scroll {
                    self.surface.scroll_to_bottom();
                }
                if !message.is_own() && self.state.settings.sound {
                    self.surface.chime();
                }
            }
            WidgetEvent::InputCleared => {
                self.surface.set_input_value("");
                self.surface.fit_input();
            }
            WidgetEvent::TurnStarted { turn } => {
                info!("turn {} started", turn);
                self.scheduler.schedule(self.reply_delay, WidgetIntent::ReplyDue { turn });
            }
            WidgetEvent::TurnQueued { turn, ahead } => {
                info!("turn {} queued behind {}", turn, ahead);
                let text = format!(
                    "Message received. Our team will answer it after {} ahead of it.",
                    StringUtils::maybe_pluralize_count(ahead, ("request", "requests"))
                );
                self.surface.notify(&text, NoticeKind::Info);
            }
            WidgetEvent::TurnCancelled { turn } => {
                info!("turn {} cancelled by a newer message", turn);
                self.scheduler.cancel();
                self.surface.notify("Previous request replaced by your new message.", NoticeKind::Warning);
            }
            WidgetEvent::TypingStarted { turn, agent } => {
                if self.state.settings.typing_indicators {
                    self.surface.show_typing(&agent);
                }
                self.scheduler.schedule(self.typing_delay, WidgetIntent::TypingElapsed { turn });
            }
            WidgetEvent::TypingStopped => self.surface.hide_typing(),
            WidgetEvent::TurnFinished { turn } => info!("turn {} answered", turn),
            WidgetEvent::ThemeChanged(theme) => {
                self.surface.apply_theme(theme);
                self.surface.notify(&format!("Switched to {} theme", theme), NoticeKind::Success);
            }
            WidgetEvent::SettingChanged { toggle, enabled } => {
                let state = if enabled { "enabled" } else { "disabled" };
                self.surface.notify(&format!("{} {}", toggle.label(), state), NoticeKind::Info);
            }
        }
    }

    fn publish_status(&self) {
        let status = WidgetStatus {
            awaiting_response: self.state.is_awaiting_response(),
            queued: self.state.queue.len(),
            messages: self.state.transcript.len(),
        };
        self.status_tx.send_if_modified(|current| {
            if *current == status {
                false
            } else {
                *current = status;
                true
            }
        });
    }
}
