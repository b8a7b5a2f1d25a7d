use crate::config::WidgetConfig;
use crate::event::{AppEvent, Event, EventHandler};
use crate::ui::chat::ChatHeader;
use crate::ui::terminal_surface::{lock_view, SharedView, TerminalSurface};
use crate::widget::settings::SettingToggle;
use crate::widget::{QuickAction, SupportWidget, WidgetHandle};
use color_eyre::Result;
use ratatui::{
    DefaultTerminal,
    crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use std::io::Write;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    pub running: bool,
    /// Shared state drawn every frame and written by the widget.
    pub view: SharedView,
    /// Title bar details.
    pub header: ChatHeader,
    /// Handle to the running widget actor.
    pub widget: WidgetHandle,
    /// How long a notice stays on screen.
    pub notice_ttl: Duration,
    /// Event handler.
    pub events: EventHandler,

    widget_task: Option<JoinHandle<()>>,
}

impl App {
    /// Constructs a new instance of [`App`] and starts the widget.
    pub fn new(config: &WidgetConfig) -> Result<Self> {
        let (surface, view) = TerminalSurface::new();
        let (widget, handle) = SupportWidget::new(surface, config)?;

        let session = widget.session();
        let header = ChatHeader {
            ticket_id: session.ticket_id().to_string(),
            user_name: session.user().name.clone(),
            user_handle: session.user().handle.clone(),
        };
        let widget_task = widget.spawn();

        Ok(Self {
            running: true,
            view,
            header,
            widget: handle,
            notice_ttl: config.notice_duration(),
            events: EventHandler::new(),
            widget_task: Some(widget_task),
        })
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let mut needs_redraw = true;
        let mut status_rx = self.widget.clone();

        while self.running {
            if needs_redraw {
                terminal.draw(|frame| frame.render_widget(&mut self, frame.area()))?;
                self.ring_bell()?;
                needs_redraw = false;
            }

            tokio::select! {
                event = self.events.next() => {
                    match event? {
                        Event::Tick => needs_redraw = self.tick(),
                        Event::Crossterm(event) => {
                            if let crossterm::event::Event::Key(key_event) = event {
                                self.handle_key_events(key_event)?;
                            }
                            needs_redraw = true;
                        }
                        Event::App(app_event) => {
                            self.handle_app_event(app_event);
                            needs_redraw = true;
                        }
                    }
                }
                status = status_rx.changed() => {
                    if status.is_err() {
                        info!("widget stopped, leaving");
                        break;
                    }
                    needs_redraw = true;
                }
            }
        }

        if let Some(task) = self.widget_task.take() {
            let _ = task.await;
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    pub fn handle_key_events(&mut self, key_event: KeyEvent) -> Result<()> {
        if key_event.kind != KeyEventKind::Press {
            return Ok(());
        }

        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
        match key_event.code {
            KeyCode::Esc => self.events.send(AppEvent::Quit),
            KeyCode::Char('c' | 'C') if ctrl => self.events.send(AppEvent::Quit),
            KeyCode::Char('t' | 'T') if ctrl => self.events.send(AppEvent::ToggleTheme),
            KeyCode::Char('y' | 'Y') if ctrl => {
                self.events.send(AppEvent::Toggle(SettingToggle::TypingIndicators))
            }
            KeyCode::Char('s' | 'S') if ctrl => self.events.send(AppEvent::Toggle(SettingToggle::Sound)),
            KeyCode::Char('a' | 'A') if ctrl => {
                self.events.send(AppEvent::Toggle(SettingToggle::AutoScroll))
            }
            KeyCode::Enter
                if key_event.modifiers.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) =>
            {
                self.events.send(AppEvent::InsertNewline)
            }
            KeyCode::Enter => self.events.send(AppEvent::Submit),
            KeyCode::Backspace => self.events.send(AppEvent::Backspace),
            KeyCode::F(n) => {
                if let Some(action) = QuickAction::from_index(n.saturating_sub(1) as usize) {
                    self.events.send(AppEvent::QuickAction(action));
                }
            }
            KeyCode::PageUp | KeyCode::Up => self.events.send(AppEvent::ScrollUp),
            KeyCode::PageDown | KeyCode::Down => self.events.send(AppEvent::ScrollDown),
            KeyCode::Char(ch) if !ctrl => self.events.send(AppEvent::Input(ch)),
            _ => {}
        }
        Ok(())
    }

    pub fn handle_app_event(&mut self, app_event: AppEvent) {
        debug!("app event: {:?}", app_event);
        match app_event {
            AppEvent::Quit => self.quit(),
            AppEvent::Input(ch) => {
                lock_view(&self.view).push_char(ch);
                self.widget.input_changed();
            }
            AppEvent::InsertNewline => {
                lock_view(&self.view).push_char('\n');
                self.widget.input_changed();
            }
            AppEvent::Backspace => {
                lock_view(&self.view).backspace();
                self.widget.input_changed();
            }
            AppEvent::Submit => self.widget.submit(),
            AppEvent::QuickAction(action) => self.widget.quick_action(action),
            AppEvent::ToggleTheme => self.widget.toggle_theme(),
            AppEvent::Toggle(toggle) => self.widget.toggle(toggle),
            AppEvent::ScrollUp => lock_view(&self.view).scroll_up(),
            AppEvent::ScrollDown => lock_view(&self.view).scroll_down(),
        }
    }

    /// Handles the tick event of the terminal. Returns true when a redraw is due.
    pub fn tick(&self) -> bool {
        lock_view(&self.view).tick(self.notice_ttl)
    }

    /// Stop the widget and leave the main loop.
    pub fn quit(&mut self) {
        self.widget.shutdown();
        self.running = false;
    }

    fn ring_bell(&self) -> Result<()> {
        let ring = std::mem::take(&mut lock_view(&self.view).bell);
        if ring {
            let mut stdout = std::io::stdout();
            stdout.write_all(b"\x07")?;
            stdout.flush()?;
        }
        Ok(())
    }
}
