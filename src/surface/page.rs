// src/surface/page.rs
//! In-memory page that stores rendered HTML fragments, standing in for a DOM.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use super::{HandleRole, Notice, NoticeKind, Surface};
use crate::render::MessageView;
use crate::util::string::StringUtils;
use crate::widget::session::WelcomeBanner;
use crate::widget::settings::Theme;

pub const MAX_INPUT_ROWS: usize = 5;

#[derive(Debug, Default)]
struct PageState {
    handles: HashSet<HandleRole>,
    input: String,
    input_rows: usize,
    welcome: Option<WelcomeBanner>,
    messages: Vec<MessageView>,
    typing: Option<String>,
    notices: Vec<Notice>,
    theme: Theme,
    scrolls: usize,
    chimes: usize,
}

/// Cheap to clone; every clone refers to the same page.
#[derive(Debug, Clone)]
pub struct HtmlPage {
    state: Arc<Mutex<PageState>>,
}

impl HtmlPage {
    /// A page providing every handle the widget needs.
    pub fn complete() -> Self {
        Self::with_handles(&HandleRole::ALL)
    }

    pub fn with_handles(handles: &[HandleRole]) -> Self {
        let state = PageState {
            handles: handles.iter().copied().collect(),
            input_rows: 1,
            ..PageState::default()
        };
        Self { state: Arc::new(Mutex::new(state)) }
    }

    fn state(&self) -> MutexGuard<'_, PageState> {
        // a panic while holding the lock leaves plain data behind, keep using it
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Replace the input text, as a user typing into the field would.
    pub fn type_text(&self, text: &str) {
        self.state().input = text.to_string();
    }

    pub fn input(&self) -> String {
        self.state().input.clone()
    }

    pub fn input_rows(&self) -> usize {
        self.state().input_rows
    }

    pub fn messages(&self) -> Vec<MessageView> {
        self.state().messages.clone()
    }

    pub fn message_count(&self) -> usize {
        self.state().messages.len()
    }

    pub fn messages_html(&self) -> Vec<String> {
        self.state().messages.iter().map(MessageView::to_html).collect()
    }

    pub fn typing_agent(&self) -> Option<String> {
        self.state().typing.clone()
    }

    pub fn welcome(&self) -> Option<WelcomeBanner> {
        self.state().welcome.clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.state().notices.clone()
    }

    pub fn theme(&self) -> Theme {
        self.state().theme
    }

    pub fn scroll_count(&self) -> usize {
        self.state().scrolls
    }

    pub fn chime_count(&self) -> usize {
        self.state().chimes
    }

    /// The whole page as a standalone HTML document.
    pub fn to_document(&self) -> String {
        let state = self.state();
        let mut html = String::from(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Customer Support</title>
    <style>
        body { font-family: sans-serif; margin: 20px; line-height: 1.5; }
        body.light { background: #ffffff; color: #111827; }
        body.dark { background: #1e1e1e; color: #f3f4f6; }
        .message { display: flex; gap: 8px; margin: 12px 0; }
        .message.own { flex-direction: row-reverse; }
        .avatar { width: 32px; height: 32px; border-radius: 50%; background: #e5e7eb; text-align: center; }
        .department-badge { color: #ffffff; border-radius: 8px; padding: 0 6px; margin: 0 6px; font-size: 0.8em; }
        .time { color: #9ca3af; font-size: 0.8em; }
        .typing-indicator { font-style: italic; color: #6b7280; }
    </style>
</head>
"#,
        );

        html.push_str(&format!(r#"<body class="{}">"#, state.theme));
        html.push_str(r#"<div id="messages-container">"#);

        if let Some(banner) = &state.welcome {
            html.push_str(&format!(
                r#"<div class="welcome-message"><h2>{}</h2><p>{}</p><p>Ticket #{}</p></div>"#,
                StringUtils::escape_html(&banner.title),
                StringUtils::escape_html(&banner.subtitle),
                StringUtils::escape_html(&banner.ticket_id),
            ));
        }

        for message in &state.messages {
            html.push_str(&message.to_html());
        }

        if let Some(agent) = &state.typing {
            html.push_str(&format!(
                r#"<div class="typing-indicator">{} is typing...</div>"#,
                StringUtils::escape_html(agent)
            ));
        }

        html.push_str("</div></body></html>");
        html
    }
}

impl Surface for HtmlPage {
    fn has_handle(&self, role: HandleRole) -> bool {
        self.state().handles.contains(&role)
    }

    fn input_value(&self) -> String {
        self.state().input.clone()
    }

    fn set_input_value(&mut self, value: &str) {
        self.state().input = value.to_string();
    }

    fn fit_input(&mut self) {
        let mut state = self.state();
        let lines = state.input.lines().count().max(1);
        state.input_rows = lines.min(MAX_INPUT_ROWS);
    }

    fn show_welcome(&mut self, banner: &WelcomeBanner) {
        self.state().welcome = Some(banner.clone());
    }

    fn remove_welcome(&mut self) {
        self.state().welcome = None;
    }

    fn append_message(&mut self, view: &MessageView) {
        self.state().messages.push(view.clone());
    }

    fn scroll_to_bottom(&mut self) {
        self.state().scrolls += 1;
    }

    fn show_typing(&mut self, agent: &str) {
        self.state().typing = Some(agent.to_string());
    }

    fn hide_typing(&mut self) {
        self.state().typing = None;
    }

    fn notify(&mut self, text: &str, kind: NoticeKind) {
        self.state().notices.push(Notice { text: text.to_string(), kind });
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.state().theme = theme;
    }

    fn chime(&mut self) {
        self.state().chimes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render_message;
    use crate::widget::message::{Message, MessageId};
    use chrono::Local;

    #[test]
    fn test_clones_share_the_page() {
        let page = HtmlPage::complete();
        let mut host = page.clone();
        host.set_input_value("hello");
        assert_eq!(page.input(), "hello");
    }

    #[test]
    fn test_input_rows_follow_content() {
        let mut page = HtmlPage::complete();
        page.type_text("one\ntwo\nthree");
        page.fit_input();
        assert_eq!(page.input_rows(), 3);

        page.type_text(&"x\n".repeat(20));
        page.fit_input();
        assert_eq!(page.input_rows(), MAX_INPUT_ROWS);

        page.type_text("");
        page.fit_input();
        assert_eq!(page.input_rows(), 1);
    }

    #[test]
    fn test_document_escapes_messages_and_banner() {
        let mut page = HtmlPage::complete();
        page.show_welcome(&WelcomeBanner {
            title: "Welcome, <b>Eve</b>!".into(),
            subtitle: "hi".into(),
            ticket_id: "TKT-ABC123".into(),
        });
        let message = Message::new_user(MessageId(1), "<img src=x onerror=alert(1)>".into(), "Eve".into(), Local::now());
        page.append_message(&render_message(&message));
        page.apply_theme(Theme::Dark);

        let doc = page.to_document();
        assert!(doc.contains(r#"<body class="dark">"#));
        assert!(doc.contains("Welcome, &lt;b&gt;Eve&lt;/b&gt;!"));
        assert!(doc.contains("TKT-ABC123"));
        assert!(!doc.contains("<img"));
    }
}
