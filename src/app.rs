use std::sync::Arc;

use color_eyre::Result;
use ratatui::{
    crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    DefaultTerminal,
};

use crate::config::{AudioConfig, ShowConfig};
use crate::event::{AppEvent, Event, EventHandler};
use crate::show::{Selection, Show};
use crate::soundtrack::Soundtrack;
use crate::stage::{tag, SceneId, Stage};
use crate::ui::{cells_to_px, CellMeasure};
use crate::util::audio::{MemoryChannel, RodioChannel};
use crate::{log_info, log_warn};

/// Application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    pub running: bool,
    pub show: Show,
    /// Highlighted quiz answer
    pub selected: usize,
    /// Animation frames drawn so far
    pub frame: u64,
    /// Skier position; stands still while the skier is paused
    pub skier_progress: u64,
    /// Event handler.
    pub events: EventHandler,
}

impl App {
    /// Constructs a new instance of [`App`].
    pub fn new(config: ShowConfig) -> Self {
        Self::with_events(config, EventHandler::new())
    }

    pub fn with_events(config: ShowConfig, events: EventHandler) -> Self {
        let soundtrack = open_soundtrack(&config.audio);
        let stage = Stage::from_config(&config).with_measure(Arc::new(CellMeasure));

        Self {
            running: true,
            show: Show::new(stage, config, soundtrack),
            selected: 0,
            frame: 0,
            skier_progress: 0,
            events,
        }
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let size = terminal.size()?;
        self.show.on_resize(cells_to_px(size.width));

        while self.running {
            terminal.draw(|frame| frame.render_widget(&self, frame.area()))?;

            match self.events.next().await? {
                Event::Tick => self.tick(),
                Event::Crossterm(event) => match event {
                    CrosstermEvent::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                        self.handle_key_events(key_event)?
                    }
                    CrosstermEvent::Resize(width, _) => self.events.send(AppEvent::Resize(width)),
                    CrosstermEvent::FocusLost => self.events.send(AppEvent::Visibility { hidden: true }),
                    CrosstermEvent::FocusGained => self.events.send(AppEvent::Visibility { hidden: false }),
                    _ => {}
                },
                Event::App(app_event) => self.handle_app_event(app_event),
            }
        }

        self.show.cancel();
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    pub fn handle_key_events(&mut self, key_event: KeyEvent) -> Result<()> {
        if let Some(app_event) = key_to_event(key_event) {
            self.events.send(app_event);
        }
        Ok(())
    }

    pub fn handle_app_event(&mut self, app_event: AppEvent) {
        match app_event {
            AppEvent::Increment => self.move_selection(1),
            AppEvent::Decrement => self.move_selection(-1),
            AppEvent::Select => self.answer(self.selected),
            AppEvent::Choose(index) => {
                if index < self.show.stage().choices().len() {
                    self.selected = index;
                    self.answer(index);
                }
            }
            AppEvent::Resize(width) => self.show.on_resize(cells_to_px(width)),
            AppEvent::Visibility { hidden } => self.show.on_visibility(hidden),
            AppEvent::Quit => self.quit(),
        }
    }

    /// Handles the tick event of the terminal.
    pub fn tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);

        let paused = self
            .show
            .stage()
            .element(SceneId::Skier)
            .map_or(true, |skier| skier.has_tag(tag::PAUSED));
        if !paused {
            self.skier_progress = self.skier_progress.wrapping_add(1);
        }
    }

    /// Set running to false to quit the application.
    pub fn quit(&mut self) {
        self.running = false;
    }

    fn move_selection(&mut self, delta: isize) {
        let count = self.show.stage().choices().len();
        if count == 0 || self.show.is_triggered() {
            return;
        }
        self.selected = (self.selected as isize + delta).rem_euclid(count as isize) as usize;
    }

    fn answer(&mut self, index: usize) {
        match self.show.select_choice(index) {
            Selection::Correct => log_info!("answer {} accepted", index),
            Selection::Wrong => log_info!("answer {} was wrong", index),
            Selection::Ignored => {}
        }
    }
}

/// Map a key press to the app event it stands for
pub fn key_to_event(key_event: KeyEvent) -> Option<AppEvent> {
    match key_event.code {
        KeyCode::Esc | KeyCode::Char('q') => Some(AppEvent::Quit),
        KeyCode::Char('c' | 'C') if key_event.modifiers == KeyModifiers::CONTROL => Some(AppEvent::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(AppEvent::Decrement),
        KeyCode::Down | KeyCode::Char('j') => Some(AppEvent::Increment),
        KeyCode::Enter | KeyCode::Char(' ') => Some(AppEvent::Select),
        KeyCode::Char(digit @ '1'..='9') => Some(AppEvent::Choose(digit as usize - '1' as usize)),
        _ => None,
    }
}

/// Open the configured track, or fall back to a channel that plays nothing
fn open_soundtrack(audio: &AudioConfig) -> Soundtrack {
    let channel = match audio.path.as_deref() {
        Some(path) => match RodioChannel::open(path) {
            Ok(channel) => {
                log_info!("music loaded from {}", channel.path());
                return Soundtrack::new(Arc::new(channel));
            }
            Err(e) => {
                log_warn!("music disabled, could not open {}: {}", path, e);
                MemoryChannel::new()
            }
        },
        None => MemoryChannel::new(),
    };
    Soundtrack::new(Arc::new(channel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::show::ShowPhase;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(key_to_event(press(KeyCode::Char('q'))), Some(AppEvent::Quit));
        assert_eq!(key_to_event(press(KeyCode::Esc)), Some(AppEvent::Quit));
        assert_eq!(
            key_to_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(AppEvent::Quit)
        );
        assert_eq!(key_to_event(press(KeyCode::Char('c'))), None);
        assert_eq!(key_to_event(press(KeyCode::Char('j'))), Some(AppEvent::Increment));
        assert_eq!(key_to_event(press(KeyCode::Up)), Some(AppEvent::Decrement));
        assert_eq!(key_to_event(press(KeyCode::Char(' '))), Some(AppEvent::Select));
        assert_eq!(key_to_event(press(KeyCode::Char('1'))), Some(AppEvent::Choose(0)));
        assert_eq!(key_to_event(press(KeyCode::Char('9'))), Some(AppEvent::Choose(8)));
        assert_eq!(key_to_event(press(KeyCode::Char('0'))), None);
    }

    #[tokio::test]
    async fn test_selection_wraps_and_answers() {
        let mut config = ShowConfig::default();
        config.audio.path = None;
        let mut app = App::with_events(config, EventHandler::without_terminal());

        app.handle_app_event(AppEvent::Decrement);
        assert_eq!(app.selected, 3);
        app.handle_app_event(AppEvent::Increment);
        assert_eq!(app.selected, 0);

        app.handle_app_event(AppEvent::Select);
        let first = &app.show.stage().choice(0).unwrap().element;
        assert!(first.has_tag(tag::WRONG));

        app.handle_app_event(AppEvent::Choose(1));
        assert_eq!(app.selected, 1);
        assert_eq!(app.show.phase(), ShowPhase::Blackout);

        // Selection is frozen once the reveal starts
        app.handle_app_event(AppEvent::Increment);
        assert_eq!(app.selected, 1);
        app.show.cancel();
    }

    #[tokio::test]
    async fn test_skier_stands_still_while_hidden() {
        let mut config = ShowConfig::default();
        config.audio.path = None;
        let mut app = App::with_events(config, EventHandler::without_terminal());

        app.tick();
        assert_eq!(app.skier_progress, 1);
        app.handle_app_event(AppEvent::Visibility { hidden: true });
        app.tick();
        assert_eq!(app.skier_progress, 1);
        assert_eq!(app.frame, 2);
    }
}
