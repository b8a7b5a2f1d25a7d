use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Clear, Paragraph, Widget},
};

use crate::render::MessageView;
use crate::ui::style::{badge_color, dim_unless_focused, notice_color, palette, Palette};
use crate::ui::terminal_surface::TerminalView;
use crate::widget::quick_action::QuickAction;
use crate::widget::session::WelcomeBanner;
use crate::widget::WidgetStatus;

const HELP: &str = "Enter send • Shift+Enter newline • Ctrl+T theme • Ctrl+Y typing • Ctrl+S sound • Ctrl+A auto-scroll • PgUp/PgDn scroll • Esc quit";

/// Fixed details shown in the title bar.
#[derive(Debug, Clone)]
pub struct ChatHeader {
    pub ticket_id: String,
    pub user_name: String,
    pub user_handle: String,
}

pub fn render_chat(
    view: &mut TerminalView,
    header: &ChatHeader,
    status: WidgetStatus,
    area: Rect,
    buf: &mut Buffer,
) {
    let colors = palette(view.theme);
    Block::default()
        .style(Style::default().bg(colors.background).fg(colors.text))
        .render(area, buf);

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                   // Title
            Constraint::Min(1),                      // Transcript
            Constraint::Length(1),                   // Typing
            Constraint::Length(view.input_rows + 2), // Input box
            Constraint::Length(1),                   // Quick actions
            Constraint::Length(1),                   // Help
        ])
        .split(area);

    render_title(header, status, &colors, main_layout[0], buf);
    render_transcript(view, &colors, main_layout[1], buf);

    if let Some(agent) = &view.typing {
        Paragraph::new(Line::from(vec![
            Span::styled(format!(" {} ", view.spinner()), Style::default().fg(colors.agent)),
            Span::styled(format!("{} is typing...", agent), Style::default().fg(colors.muted).italic()),
        ]))
        .render(main_layout[2], buf);
    }

    let input_style = dim_unless_focused(!status.awaiting_response, Style::default().fg(colors.text));
    Paragraph::new(Text::from(view.input.as_str()))
        .block(
            Block::bordered()
                .title("Type your message")
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(colors.border)),
        )
        .style(input_style)
        .render(main_layout[3], buf);

    let mut actions = Vec::new();
    for (i, action) in QuickAction::ALL.iter().enumerate() {
        actions.push(Span::styled(format!(" F{} ", i + 1), Style::default().fg(colors.background).bg(colors.muted)));
        actions.push(Span::styled(format!(" {}  ", action.label()), Style::default().fg(colors.text)));
    }
    Paragraph::new(Line::from(actions)).render(main_layout[4], buf);

    Paragraph::new(HELP)
        .fg(colors.muted)
        .alignment(Alignment::Center)
        .render(main_layout[5], buf);

    if let Some((notice, _)) = &view.notice {
        let width = (notice.text.chars().count() as u16 + 4).min(area.width);
        let popup = Rect::new(area.x + area.width.saturating_sub(width), area.y + 3, width, 3);
        Clear.render(popup, buf);
        Paragraph::new(notice.text.as_str())
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(notice_color(notice.kind))),
            )
            .style(Style::default().bg(colors.background).fg(colors.text))
            .render(popup, buf);
    }
}

fn render_title(header: &ChatHeader, status: WidgetStatus, colors: &Palette, area: Rect, buf: &mut Buffer) {
    let state = if status.awaiting_response {
        let mut text = "◌ Agent responding".to_string();
        if status.queued > 0 {
            text.push_str(&format!(" ({} queued)", status.queued));
        }
        Span::styled(text, Style::default().fg(Color::Yellow))
    } else {
        Span::styled("● Online", Style::default().fg(colors.agent))
    };

    Paragraph::new(Line::from(vec![
        Span::styled(format!("Ticket #{}", header.ticket_id), Style::default().bold()),
        Span::raw("  •  "),
        Span::raw(format!("{} ({})", header.user_name, header.user_handle)),
        Span::raw("  •  "),
        state,
    ]))
    .block(
        Block::bordered()
            .title("💬 Customer Support")
            .title_alignment(Alignment::Center)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(colors.border)),
    )
    .alignment(Alignment::Center)
    .render(area, buf);
}

fn render_transcript(view: &mut TerminalView, colors: &Palette, area: Rect, buf: &mut Buffer) {
    let block = Block::bordered()
        .title("Conversation")
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors.border));
    let inner = block.inner(area);
    block.render(area, buf);

    let width = inner.width.max(1) as usize;
    let mut lines = Vec::new();
    if let Some(banner) = &view.welcome {
        lines.extend(welcome_lines(banner, colors));
    }
    for message in &view.messages {
        lines.extend(message_lines(message, colors, width));
    }

    let total = lines.len().min(u16::MAX as usize) as u16;
    let top = view.resolve_top(total, inner.height);

    Paragraph::new(Text::from(lines))
        .scroll((top, 0))
        .render(inner, buf);
}

fn welcome_lines(banner: &WelcomeBanner, colors: &Palette) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(banner.title.clone(), Style::default().fg(colors.own).bold())).centered(),
        Line::from(Span::styled(banner.subtitle.clone(), Style::default().fg(colors.muted))).centered(),
        Line::from(Span::styled(format!("Ticket #{}", banner.ticket_id), Style::default().fg(colors.muted))).centered(),
        Line::from(""),
    ]
}

/// Header line plus the wrapped body of one message.
pub fn message_lines(message: &MessageView, colors: &Palette, width: usize) -> Vec<Line<'static>> {
    let accent = if message.own { colors.own } else { colors.agent };

    let mut meta = vec![
        Span::styled(format!("{} ", message.avatar), Style::default().fg(accent)),
        Span::styled(message.author.clone(), Style::default().fg(accent).add_modifier(Modifier::BOLD)),
    ];
    if let Some(badge) = &message.badge {
        meta.push(Span::raw(" "));
        meta.push(Span::styled(
            format!(" {} {} ", badge.icon, badge.department),
            Style::default().fg(Color::White).bg(badge_color(badge.color)),
        ));
    }
    meta.push(Span::styled(format!("  {}", message.time), Style::default().fg(colors.muted)));

    let mut lines = vec![Line::from(meta)];
    let base = Style::default().fg(colors.text);
    let indent = 3;
    for raw in message.text.split('\n') {
        let segments = if message.own {
            vec![(raw.to_string(), false)]
        } else {
            bold_segments(raw)
        };
        for wrapped in wrap_segments(&segments, width.saturating_sub(indent).max(1)) {
            let mut spans = vec![Span::raw(" ".repeat(indent))];
            spans.extend(wrapped.into_iter().map(|(text, bold)| {
                if bold {
                    Span::styled(text, base.add_modifier(Modifier::BOLD))
                } else {
                    Span::styled(text, base)
                }
            }));
            lines.push(Line::from(spans));
        }
    }
    lines.push(Line::from(""));
    lines
}

/// Split a line on `**` markers. An unmatched trailing marker stays literal.
pub fn bold_segments(line: &str) -> Vec<(String, bool)> {
    let parts: Vec<&str> = line.split("**").collect();
    let last = parts.len() - 1;
    let mut segments = Vec::with_capacity(parts.len());

    for (i, part) in parts.iter().enumerate() {
        if i % 2 == 0 {
            segments.push((part.to_string(), false));
        } else if i == last {
            segments.push((format!("**{}", part), false));
        } else {
            segments.push((part.to_string(), true));
        }
    }
    segments.retain(|(text, _)| !text.is_empty());
    segments
}

/// Hard-wrap styled segments to `width` characters per row.
pub fn wrap_segments(segments: &[(String, bool)], width: usize) -> Vec<Vec<(String, bool)>> {
    let mut rows = vec![Vec::new()];
    let mut used = 0;

    for (text, bold) in segments {
        let mut chunk = String::new();
        for ch in text.chars() {
            if used == width {
                if !chunk.is_empty() {
                    if let Some(row) = rows.last_mut() {
                        row.push((std::mem::take(&mut chunk), *bold));
                    }
                }
                rows.push(Vec::new());
                used = 0;
            }
            chunk.push(ch);
            used += 1;
        }
        if !chunk.is_empty() {
            if let Some(row) = rows.last_mut() {
                row.push((chunk, *bold));
            }
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_segments() {
        assert_eq!(
            bold_segments("see **Order status** here"),
            vec![
                ("see ".to_string(), false),
                ("Order status".to_string(), true),
                (" here".to_string(), false),
            ]
        );
        assert_eq!(bold_segments("a ** b"), vec![("a ".to_string(), false), ("** b".to_string(), false)]);
    }

    #[test]
    fn test_wrap_segments_keeps_style_across_rows() {
        let rows = wrap_segments(&[("abcd".to_string(), false), ("efg".to_string(), true)], 3);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec![("d".to_string(), false), ("ef".to_string(), true)]);
        assert_eq!(rows[2], vec![("g".to_string(), true)]);
    }

    #[test]
    fn test_empty_line_still_takes_a_row() {
        assert_eq!(wrap_segments(&bold_segments(""), 10).len(), 1);
    }
}
