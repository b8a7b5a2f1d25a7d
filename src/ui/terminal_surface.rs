// src/ui/terminal_surface.rs
//! Terminal host for the widget. The widget actor writes into a shared
//! [`TerminalView`]; the draw loop reads it on every frame.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::render::MessageView;
use crate::surface::{HandleRole, Notice, NoticeKind, Surface};
use crate::widget::session::WelcomeBanner;
use crate::widget::settings::Theme;

pub const MAX_INPUT_ROWS: u16 = 5;
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPos {
    /// Follow the newest message.
    Bottom,
    /// First visible line.
    Top(u16),
}

#[derive(Debug)]
pub struct TerminalView {
    pub input: String,
    pub input_rows: u16,
    pub welcome: Option<WelcomeBanner>,
    pub messages: Vec<MessageView>,
    pub typing: Option<String>,
    pub notice: Option<(Notice, Instant)>,
    pub theme: Theme,
    pub scroll: ScrollPos,
    /// Largest valid top line, refreshed on every draw.
    pub max_top: u16,
    pub spinner_frame: usize,
    pub bell: bool,
    pub dirty: bool,
}

impl Default for TerminalView {
    fn default() -> Self {
        Self {
            input: String::new(),
            input_rows: 1,
            welcome: None,
            messages: Vec::new(),
            typing: None,
            notice: None,
            theme: Theme::Light,
            scroll: ScrollPos::Bottom,
            max_top: 0,
            spinner_frame: 0,
            bell: false,
            dirty: true,
        }
    }
}

impl TerminalView {
    pub fn push_char(&mut self, ch: char) {
        self.input.push(ch);
        self.dirty = true;
    }

    pub fn backspace(&mut self) {
        self.input.pop();
        self.dirty = true;
    }

    pub fn scroll_up(&mut self) {
        let top = match self.scroll {
            ScrollPos::Bottom => self.max_top,
            ScrollPos::Top(top) => top,
        };
        self.scroll = ScrollPos::Top(top.saturating_sub(1));
        self.dirty = true;
    }

    pub fn scroll_down(&mut self) {
        if let ScrollPos::Top(top) = self.scroll {
            self.scroll = if top + 1 >= self.max_top {
                ScrollPos::Bottom
            } else {
                ScrollPos::Top(top + 1)
            };
            self.dirty = true;
        }
    }

    /// First line to draw given the transcript height and the visible rows.
    pub fn resolve_top(&mut self, total_lines: u16, visible: u16) -> u16 {
        self.max_top = total_lines.saturating_sub(visible);
        match self.scroll {
            ScrollPos::Bottom => self.max_top,
            ScrollPos::Top(top) => top.min(self.max_top),
        }
    }

    /// Advance time-based state. Returns true when a redraw is needed.
    pub fn tick(&mut self, notice_ttl: Duration) -> bool {
        if let Some((_, shown_at)) = &self.notice {
            if shown_at.elapsed() >= notice_ttl {
                self.notice = None;
                self.dirty = true;
            }
        }
        if self.typing.is_some() {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
            self.dirty = true;
        }
        std::mem::take(&mut self.dirty)
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
    }
}

pub type SharedView = Arc<Mutex<TerminalView>>;

pub fn lock_view(view: &SharedView) -> MutexGuard<'_, TerminalView> {
    view.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Clone)]
pub struct TerminalSurface {
    view: SharedView,
}

impl TerminalSurface {
    pub fn new() -> (Self, SharedView) {
        let view: SharedView = Arc::new(Mutex::new(TerminalView::default()));
        (Self { view: view.clone() }, view)
    }

    fn view(&self) -> MutexGuard<'_, TerminalView> {
        lock_view(&self.view)
    }
}

impl Surface for TerminalSurface {
    fn has_handle(&self, _role: HandleRole) -> bool {
        // the terminal layout always draws all five areas
        true
    }

    fn input_value(&self) -> String {
        self.view().input.clone()
    }

    fn set_input_value(&mut self, value: &str) {
        let mut view = self.view();
        view.input = value.to_string();
        view.dirty = true;
    }

    fn fit_input(&mut self) {
        let mut view = self.view();
        let lines = view.input.split('\n').count().max(1) as u16;
        view.input_rows = lines.min(MAX_INPUT_ROWS);
        view.dirty = true;
    }

    fn show_welcome(&mut self, banner: &WelcomeBanner) {
        let mut view = self.view();
        view.welcome = Some(banner.clone());
        view.dirty = true;
    }

    fn remove_welcome(&mut self) {
        let mut view = self.view();
        view.welcome = None;
        view.dirty = true;
    }

    fn append_message(&mut self, message: &MessageView) {
        let mut view = self.view();
        // hold position unless the widget asks to scroll
        if view.scroll == ScrollPos::Bottom {
            view.scroll = ScrollPos::Top(view.max_top);
        }
        view.messages.push(message.clone());
        view.dirty = true;
    }

    fn scroll_to_bottom(&mut self) {
        let mut view = self.view();
        view.scroll = ScrollPos::Bottom;
        view.dirty = true;
    }

    fn show_typing(&mut self, agent: &str) {
        let mut view = self.view();
        view.typing = Some(agent.to_string());
        view.spinner_frame = 0;
        view.dirty = true;
    }

    fn hide_typing(&mut self) {
        let mut view = self.view();
        view.typing = None;
        view.dirty = true;
    }

    fn notify(&mut self, text: &str, kind: NoticeKind) {
        let mut view = self.view();
        view.notice = Some((Notice { text: text.to_string(), kind }, Instant::now()));
        view.dirty = true;
    }

    fn apply_theme(&mut self, theme: Theme) {
        let mut view = self.view();
        view.theme = theme;
        view.dirty = true;
    }

    fn chime(&mut self) {
        self.view().bell = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_pins_and_releases_bottom() {
        let mut view = TerminalView::default();
        assert_eq!(view.resolve_top(30, 10), 20);

        view.scroll_up();
        assert_eq!(view.scroll, ScrollPos::Top(19));
        assert_eq!(view.resolve_top(30, 10), 19);

        view.scroll_down();
        assert_eq!(view.scroll, ScrollPos::Bottom);

        view.scroll = ScrollPos::Top(50);
        assert_eq!(view.resolve_top(30, 10), 20);
    }

    #[test]
    fn test_append_without_scroll_holds_position() {
        let (mut surface, view) = TerminalSurface::new();
        lock_view(&view).resolve_top(30, 10);

        let message = crate::render::render_message(&crate::widget::message::Message::new_user(
            crate::widget::message::MessageId(1),
            "hi".into(),
            "Guest".into(),
            chrono::Local::now(),
        ));
        surface.append_message(&message);
        assert_eq!(lock_view(&view).scroll, ScrollPos::Top(20));

        surface.append_message(&message);
        surface.scroll_to_bottom();
        assert_eq!(lock_view(&view).scroll, ScrollPos::Bottom);
    }

    #[test]
    fn test_tick_expires_notice_and_spins() {
        let (mut surface, view) = TerminalSurface::new();
        surface.notify("Switched to dark theme", NoticeKind::Success);
        surface.show_typing("Sarah Chen");

        let mut view = lock_view(&view);
        assert!(view.tick(Duration::ZERO));
        assert!(view.notice.is_none());
        assert_eq!(view.spinner_frame, 1);

        view.typing = None;
        assert!(!view.tick(Duration::ZERO));
    }

    #[test]
    fn test_input_rows_are_capped() {
        let (mut surface, view) = TerminalSurface::new();
        surface.set_input_value(&"line\n".repeat(9));
        surface.fit_input();
        assert_eq!(lock_view(&view).input_rows, MAX_INPUT_ROWS);
    }
}
