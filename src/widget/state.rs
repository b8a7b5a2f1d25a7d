// src/widget/state.rs
use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::VecDeque;

use super::classifier::{classify, Response};
use super::message::{Message, MessageId, Transcript};
use super::session::Session;
use super::settings::{SettingToggle, Settings, Theme};
use crate::config::OverlapPolicy;

pub type TurnId = u64;

/// One user submission waiting for its reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    pub id: TurnId,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TurnPhase {
    Idle,
    /// Reply delay running.
    Pending(Turn),
    /// Typing indicator up, typing delay running.
    Typing { turn: Turn, response: Response },
}

#[derive(Debug, Clone)]
pub struct TurnState {
    pub session: Session,
    pub settings: Settings,
    pub policy: OverlapPolicy,
    pub transcript: Transcript,
    pub phase: TurnPhase,
    pub queue: VecDeque<Turn>,
    pub welcome_visible: bool,
    next_message_id: u64,
    next_turn_id: TurnId,
}

impl TurnState {
    pub fn new(session: Session, settings: Settings, policy: OverlapPolicy) -> Self {
        Self {
            session,
            settings,
            policy,
            transcript: Transcript::new(),
            phase: TurnPhase::Idle,
            queue: VecDeque::new(),
            welcome_visible: true,
            next_message_id: 1,
            next_turn_id: 1,
        }
    }

    pub fn is_awaiting_response(&self) -> bool {
        !matches!(self.phase, TurnPhase::Idle)
    }

    pub fn current_turn(&self) -> Option<&Turn> {
        match &self.phase {
            TurnPhase::Idle => None,
            TurnPhase::Pending(turn) | TurnPhase::Typing { turn, .. } => Some(turn),
        }
    }

    fn take_message_id(&mut self) -> MessageId {
        let id = MessageId(self.next_message_id);
        self.next_message_id += 1;
        id
    }

    fn take_turn_id(&mut self) -> TurnId {
        let id = self.next_turn_id;
        self.next_turn_id += 1;
        id
    }
}

// ----------------------------------------------------------------------------
// INTENT - Messages that express what should happen to the conversation
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnIntent {
    UserMessage { text: String, at: DateTime<Local> },
    ReplyDue { turn: TurnId },
    TypingDone { turn: TurnId, at: DateTime<Local> },
    ToggleTheme,
    Toggle(SettingToggle),
}

// ----------------------------------------------------------------------------
// EVENTS - Things that happened (past tense)
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum WidgetEvent {
    WelcomeRemoved,
    MessageAppended(Message),
    InputCleared,
    TurnStarted { turn: TurnId },
    TurnQueued { turn: TurnId, ahead: usize },
    TurnCancelled { turn: TurnId },
    TypingStarted { turn: TurnId, agent: String },
    TypingStopped,
    TurnFinished { turn: TurnId },
    ThemeChanged(Theme),
    SettingChanged { toggle: SettingToggle, enabled: bool },
}

// ----------------------------------------------------------------------------
// STATE MACHINE - Pure function: (State, Intent) -> (State, Vec<Event>)
// ----------------------------------------------------------------------------

pub struct TurnStateMachine;

impl TurnStateMachine {
    pub fn transition(state: TurnState, intent: TurnIntent) -> (TurnState, Vec<WidgetEvent>) {
        use TurnIntent::*;

        match intent {
            UserMessage { text, at } => Self::handle_user_message(state, text, at),
            ReplyDue { turn } => Self::handle_reply_due(state, turn),
            TypingDone { turn, at } => Self::handle_typing_done(state, turn, at),
            ToggleTheme => Self::handle_toggle_theme(state),
            Toggle(toggle) => Self::handle_toggle(state, toggle),
        }
    }

    fn append(state: &mut TurnState, message: Message, events: &mut Vec<WidgetEvent>) {
        if state.welcome_visible {
            state.welcome_visible = false;
            events.push(WidgetEvent::WelcomeRemoved);
        }
        state.transcript.push(message.clone());
        events.push(WidgetEvent::MessageAppended(message));
    }

    fn handle_user_message(
        mut state: TurnState,
        text: String,
        at: DateTime<Local>,
    ) -> (TurnState, Vec<WidgetEvent>) {
        let text = text.trim();
        if text.is_empty() {
            return (state, vec![]);
        }

        let mut events = Vec::new();
        let id = state.take_message_id();
        let author = state.session.user().name.clone();
        Self::append(&mut state, Message::new_user(id, text.to_string(), author, at), &mut events);
        events.push(WidgetEvent::InputCleared);

        let turn = Turn { id: state.take_turn_id(), text: text.to_string() };

        if !state.is_awaiting_response() {
            events.push(WidgetEvent::TurnStarted { turn: turn.id });
            state.phase = TurnPhase::Pending(turn);
            return (state, events);
        }

        match state.policy {
            OverlapPolicy::Queue => {
                // the in-flight turn counts as ahead
                let ahead = state.queue.len() + 1;
                events.push(WidgetEvent::TurnQueued { turn: turn.id, ahead });
                state.queue.push_back(turn);
            }
            OverlapPolicy::Replace => {
                if matches!(state.phase, TurnPhase::Typing { .. }) {
                    events.push(WidgetEvent::TypingStopped);
                }
                if let Some(old) = state.current_turn() {
                    events.push(WidgetEvent::TurnCancelled { turn: old.id });
                }
                events.push(WidgetEvent::TurnStarted { turn: turn.id });
                state.phase = TurnPhase::Pending(turn);
            }
        }

        (state, events)
    }

    fn handle_reply_due(mut state: TurnState, turn_id: TurnId) -> (TurnState, Vec<WidgetEvent>) {
        let due = match &state.phase {
            TurnPhase::Pending(turn) if turn.id == turn_id => Some(turn.clone()),
            _ => None,
        };
        let Some(turn) = due else {
            return (state, vec![]);
        };

        let response = classify(&turn.text, &state.session.user().name);
        let events = vec![WidgetEvent::TypingStarted {
            turn: turn.id,
            agent: response.agent_name.clone(),
        }];
        state.phase = TurnPhase::Typing { turn, response };

        (state, events)
    }

    fn handle_typing_done(
        mut state: TurnState,
        turn_id: TurnId,
        at: DateTime<Local>,
    ) -> (TurnState, Vec<WidgetEvent>) {
        let (turn, response) = match std::mem::replace(&mut state.phase, TurnPhase::Idle) {
            TurnPhase::Typing { turn, response } if turn.id == turn_id => (turn, response),
            other => {
                state.phase = other;
                return (state, vec![]);
            }
        };

        let mut events = vec![WidgetEvent::TypingStopped];
        let id = state.take_message_id();
        let reply = Message::new_agent(id, response.reply, response.agent_name, response.department, at);
        Self::append(&mut state, reply, &mut events);
        events.push(WidgetEvent::TurnFinished { turn: turn.id });

        if let Some(next) = state.queue.pop_front() {
            events.push(WidgetEvent::TurnStarted { turn: next.id });
            state.phase = TurnPhase::Pending(next);
        }

        (state, events)
    }

    fn handle_toggle_theme(mut state: TurnState) -> (TurnState, Vec<WidgetEvent>) {
        state.settings.theme = state.settings.theme.toggled();
        let theme = state.settings.theme;
        (state, vec![WidgetEvent::ThemeChanged(theme)])
    }

    fn handle_toggle(mut state: TurnState, toggle: SettingToggle) -> (TurnState, Vec<WidgetEvent>) {
        let enabled = state.settings.toggle(toggle);
        (state, vec![WidgetEvent::SettingChanged { toggle, enabled }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::classifier::{Category, Department};
    use crate::widget::message::Author;
    use crate::widget::session::UserIdentity;

    fn fresh(policy: OverlapPolicy) -> TurnState {
        let user = UserIdentity { name: "Jordan Lee".into(), handle: "@jlee".into() };
        TurnState::new(Session::new(user), Settings::default(), policy)
    }

    fn say(state: TurnState, text: &str) -> (TurnState, Vec<WidgetEvent>) {
        TurnStateMachine::transition(
            state,
            TurnIntent::UserMessage { text: text.to_string(), at: Local::now() },
        )
    }

    fn reply_due(state: TurnState, turn: TurnId) -> (TurnState, Vec<WidgetEvent>) {
        TurnStateMachine::transition(state, TurnIntent::ReplyDue { turn })
    }

    fn typing_done(state: TurnState, turn: TurnId) -> (TurnState, Vec<WidgetEvent>) {
        TurnStateMachine::transition(state, TurnIntent::TypingDone { turn, at: Local::now() })
    }

    fn started(events: &[WidgetEvent]) -> Vec<TurnId> {
        events
            .iter()
            .filter_map(|e| match e {
                WidgetEvent::TurnStarted { turn } => Some(*turn),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_blank_input_is_a_no_op() {
        for text in ["", "   ", "\n\t "] {
            let (state, events) = say(fresh(OverlapPolicy::Queue), text);
            assert!(events.is_empty());
            assert!(state.transcript.is_empty());
            assert!(!state.is_awaiting_response());
            assert!(state.welcome_visible);
        }
    }

    #[test]
    fn test_submission_appends_one_trimmed_message_and_starts_one_turn() {
        let (state, events) = say(fresh(OverlapPolicy::Queue), "  where is my order?  ");

        assert_eq!(state.transcript.len(), 1);
        let message = state.transcript.last().unwrap();
        assert_eq!(message.content(), "where is my order?");
        assert_eq!(message.author(), Author::User);
        assert_eq!(message.author_name(), "Jordan Lee");

        assert_eq!(
            events,
            vec![
                WidgetEvent::WelcomeRemoved,
                WidgetEvent::MessageAppended(message.clone()),
                WidgetEvent::InputCleared,
                WidgetEvent::TurnStarted { turn: 1 },
            ]
        );
        assert!(state.is_awaiting_response());
    }

    #[test]
    fn test_full_turn_runs_idle_typing_idle() {
        let (state, _) = say(fresh(OverlapPolicy::Queue), "I need to track my shipment");

        let (state, events) = reply_due(state, 1);
        assert_eq!(
            events,
            vec![WidgetEvent::TypingStarted { turn: 1, agent: "Sarah Chen".into() }]
        );
        match &state.phase {
            TurnPhase::Typing { response, .. } => assert_eq!(response.category, Category::Orders),
            other => panic!("unexpected phase {:?}", other),
        }

        let (state, events) = typing_done(state, 1);
        assert_eq!(events.first(), Some(&WidgetEvent::TypingStopped));
        assert_eq!(events.last(), Some(&WidgetEvent::TurnFinished { turn: 1 }));
        assert!(!events.contains(&WidgetEvent::WelcomeRemoved));

        let reply = state.transcript.last().unwrap();
        assert_eq!(reply.author(), Author::Agent);
        assert_eq!(reply.author_name(), "Sarah Chen");
        assert_eq!(reply.department(), Some(Department::Orders));
        assert!(reply.id() > MessageId(1));
        assert_eq!(state.phase, TurnPhase::Idle);
    }

    #[test]
    fn test_stale_timers_are_ignored() {
        let (state, _) = say(fresh(OverlapPolicy::Queue), "hello");

        let (state, events) = reply_due(state, 99);
        assert!(events.is_empty());
        assert!(matches!(state.phase, TurnPhase::Pending(_)));

        let (state, events) = typing_done(state, 1);
        assert!(events.is_empty());
        assert!(matches!(state.phase, TurnPhase::Pending(_)));
        assert_eq!(state.transcript.len(), 1);
    }

    #[test]
    fn test_queue_policy_answers_in_submission_order() {
        let (state, _) = say(fresh(OverlapPolicy::Queue), "refund please");
        let (state, events) = say(state, "thanks");
        assert!(events.contains(&WidgetEvent::TurnQueued { turn: 2, ahead: 1 }));
        assert!(started(&events).is_empty());

        let (state, _) = reply_due(state, 1);
        let (state, events) = typing_done(state, 1);
        assert_eq!(started(&events), vec![2]);

        let (state, _) = reply_due(state, 2);
        let (state, _) = typing_done(state, 2);

        let agents: Vec<_> = state
            .transcript
            .iter()
            .filter(|m| !m.is_own())
            .map(|m| m.author_name().to_string())
            .collect();
        assert_eq!(agents, vec!["Marcus Johnson", "Support Team"]);
        assert_eq!(state.transcript.len(), 4);
        assert!(!state.is_awaiting_response());
    }

    #[test]
    fn test_replace_policy_cancels_the_pending_turn() {
        let (state, _) = say(fresh(OverlapPolicy::Replace), "billing issue");
        let (state, _) = reply_due(state, 1);
        let (state, events) = say(state, "never mind, thanks");

        assert!(events.contains(&WidgetEvent::TypingStopped));
        assert!(events.contains(&WidgetEvent::TurnCancelled { turn: 1 }));
        assert_eq!(started(&events), vec![2]);
        assert!(state.queue.is_empty());

        // the cancelled turn's timer may still fire
        let (state, events) = typing_done(state, 1);
        assert!(events.is_empty());

        let (state, _) = reply_due(state, 2);
        let (state, _) = typing_done(state, 2);
        let replies: Vec<_> = state.transcript.iter().filter(|m| !m.is_own()).collect();
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].author_name(), "Support Team");
    }

    #[test]
    fn test_settings_never_touch_the_turn() {
        let (state, _) = say(fresh(OverlapPolicy::Queue), "hi");
        let (state, events) = TurnStateMachine::transition(state, TurnIntent::ToggleTheme);
        assert_eq!(events, vec![WidgetEvent::ThemeChanged(Theme::Dark)]);

        let (state, events) =
            TurnStateMachine::transition(state, TurnIntent::Toggle(SettingToggle::TypingIndicators));
        assert_eq!(
            events,
            vec![WidgetEvent::SettingChanged { toggle: SettingToggle::TypingIndicators, enabled: false }]
        );
        assert!(matches!(state.phase, TurnPhase::Pending(_)));
    }
}
