// src/render/mod.rs
//! Turns transcript messages into display fragments.
//!
//! Message text is always escaped before any formatting is applied, so user
//! input ends up in the page as data and never as markup.

pub mod presentation;

use serde::Serialize;

use crate::util::string::StringUtils;
use crate::widget::classifier::Department;
use crate::widget::message::{Message, MessageId};
use presentation::{department_color, department_icon};

/// Avatar shown next to the user's own messages.
pub const SELF_AVATAR: &str = "👤";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub department: Department,
    pub icon: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageView {
    pub id: MessageId,
    pub own: bool,
    pub avatar: String,
    pub author: String,
    pub badge: Option<Badge>,
    pub time: String,
    /// Raw content, for hosts that draw text themselves.
    pub text: String,
    /// Escaped and formatted content, safe to insert as HTML.
    pub body_html: String,
}

pub fn render_message(message: &Message) -> MessageView {
    let own = message.is_own();
    let avatar = if own {
        SELF_AVATAR.to_string()
    } else {
        StringUtils::initials(message.author_name())
    };

    let badge = message.department().map(|department| Badge {
        department,
        icon: department_icon(Some(department)),
        color: department_color(Some(department)),
    });

    let escaped = StringUtils::escape_html(message.content());
    // Only agent templates carry formatting markers.
    let formatted = if own { escaped } else { apply_bold(&escaped) };

    MessageView {
        id: message.id(),
        own,
        avatar,
        author: message.author_name().to_string(),
        badge,
        time: message.timestamp().format("%H:%M").to_string(),
        text: message.content().to_string(),
        body_html: formatted.replace('\n', "<br>"),
    }
}

fn apply_bold(escaped: &str) -> String {
    let parts: Vec<&str> = escaped.split("**").collect();
    let last = parts.len() - 1;
    let mut out = String::with_capacity(escaped.len() + parts.len() * 8);

    for (i, part) in parts.iter().enumerate() {
        if i % 2 == 0 {
            out.push_str(part);
        } else if i == last {
            // unmatched marker
            out.push_str("**");
            out.push_str(part);
        } else {
            out.push_str("<strong>");
            out.push_str(part);
            out.push_str("</strong>");
        }
    }
    out
}

impl MessageView {
    pub fn dom_id(&self) -> String {
        self.id.to_string()
    }

    pub fn to_html(&self) -> String {
        let side = if self.own { "own" } else { "agent" };
        let author = StringUtils::escape_html(&self.author);
        let avatar = StringUtils::escape_html(&self.avatar);

        let badge = match &self.badge {
            Some(badge) => format!(
                r#" <span class="department-badge" style="background:{}">{} {}</span>"#,
                badge.color, badge.icon, badge.department
            ),
            None => String::new(),
        };

        format!(
            r#"<div class="message {side}" id="{id}"><div class="avatar">{avatar}</div><div class="bubble"><div class="meta"><span class="author">{author}</span>{badge}<span class="time">{time}</span></div><div class="content">{body}</div></div></div>"#,
            side = side,
            id = self.dom_id(),
            avatar = avatar,
            author = author,
            badge = badge,
            time = self.time,
            body = self.body_html,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn at_nine_oh_five() -> chrono::DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 12, 9, 5, 0).unwrap()
    }

    fn unescape(html: &str) -> String {
        html.replace("<br>", "\n")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&")
    }

    #[test]
    fn test_user_markup_is_escaped() {
        let content = "<script>alert('x')</script> & \"more\"";
        let message = Message::new_user(MessageId(1), content.into(), "Guest".into(), at_nine_oh_five());
        let view = render_message(&message);

        assert!(!view.body_html.contains("<script"));
        assert!(!view.to_html().contains("<script"));
        assert!(view.body_html.contains("&lt;script&gt;"));
        assert_eq!(unescape(&view.body_html), content);
    }

    #[test]
    fn test_user_text_round_trips_with_newlines() {
        let content = "line one\n<b>not bold</b> **not bold either**";
        let message = Message::new_user(MessageId(1), content.into(), "Guest".into(), at_nine_oh_five());
        let view = render_message(&message);

        assert!(!view.body_html.contains("<strong>"));
        assert_eq!(unescape(&view.body_html), content);
    }

    #[test]
    fn test_own_message_layout() {
        let message = Message::new_user(MessageId(3), "hi".into(), "Jordan Lee".into(), at_nine_oh_five());
        let view = render_message(&message);

        assert_eq!(view.avatar, SELF_AVATAR);
        assert_eq!(view.time, "09:05");
        assert!(view.badge.is_none());
        assert!(view.to_html().contains(r#"class="message own" id="msg-3""#));
    }

    #[test]
    fn test_agent_message_has_badge_and_bold() {
        let message = Message::new_agent(
            MessageId(2),
            "**Order #1** <now>\nshipped".into(),
            "Sarah Chen".into(),
            Some(Department::Orders),
            at_nine_oh_five(),
        );
        let view = render_message(&message);

        assert_eq!(view.avatar, "SC");
        let badge = view.badge.as_ref().unwrap();
        assert_eq!(badge.color, "#3b82f6");
        assert_eq!(badge.icon, "📦");
        assert_eq!(view.body_html, "<strong>Order #1</strong> &lt;now&gt;<br>shipped");
        assert!(view.to_html().contains("department-badge"));
    }

    #[test]
    fn test_agent_without_department_has_no_badge() {
        let message = Message::new_agent(MessageId(2), "hello".into(), "Support Team".into(), None, at_nine_oh_five());
        let view = render_message(&message);
        assert!(view.badge.is_none());
        assert!(!view.to_html().contains("department-badge"));
    }

    #[test]
    fn test_unbalanced_bold_marker_is_left_alone() {
        assert_eq!(apply_bold("a **b** c **d"), "a <strong>b</strong> c **d");
        assert_eq!(apply_bold("plain"), "plain");
    }
}
