// src/surface/mod.rs
//! The host UI the widget draws into.
//!
//! A surface exposes five handles: the text input, the submit form, the
//! message list, a notification area and the theme toggle. The widget checks
//! for all of them once, at construction.

pub mod page;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::render::MessageView;
use crate::widget::session::WelcomeBanner;
use crate::widget::settings::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleRole {
    Input,
    Form,
    MessageList,
    Notifications,
    ThemeToggle,
}

impl HandleRole {
    pub const ALL: [HandleRole; 5] = [
        HandleRole::Input,
        HandleRole::Form,
        HandleRole::MessageList,
        HandleRole::Notifications,
        HandleRole::ThemeToggle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HandleRole::Input => "message-input",
            HandleRole::Form => "chat-form",
            HandleRole::MessageList => "messages-container",
            HandleRole::Notifications => "notification-area",
            HandleRole::ThemeToggle => "theme-toggle",
        }
    }
}

impl fmt::Display for HandleRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
}

pub trait Surface: Send + 'static {
    fn has_handle(&self, role: HandleRole) -> bool;

    fn input_value(&self) -> String;
    fn set_input_value(&mut self, value: &str);
    /// Resize the input area to its current content.
    fn fit_input(&mut self);

    fn show_welcome(&mut self, banner: &WelcomeBanner);
    fn remove_welcome(&mut self);

    fn append_message(&mut self, view: &MessageView);
    fn scroll_to_bottom(&mut self);

    /// Show the typing indicator for `agent`, replacing any existing one.
    fn show_typing(&mut self, agent: &str);
    fn hide_typing(&mut self);

    fn notify(&mut self, text: &str, kind: NoticeKind);
    fn apply_theme(&mut self, theme: Theme);

    fn chime(&mut self) {}
}

/// First handle role the surface does not provide, if any.
pub fn missing_handle<S: Surface + ?Sized>(surface: &S) -> Option<HandleRole> {
    HandleRole::ALL.into_iter().find(|role| !surface.has_handle(*role))
}
