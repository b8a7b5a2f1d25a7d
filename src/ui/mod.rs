pub mod chat;
pub mod style;
pub mod terminal_surface;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::Widget,
};
use crate::app::App;
use crate::ui::chat::render_chat;
use crate::ui::terminal_surface::lock_view;

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let status = self.widget.status();
        let mut view = lock_view(&self.view);
        render_chat(&mut view, &self.header, status, area, buf);
    }
}
