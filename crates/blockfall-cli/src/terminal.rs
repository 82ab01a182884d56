use std::{io, time::Duration};

use blockfall_engine::{
    GameEvent, GameSession, InputEvent, InputKey, InputSource, Presenter, QUIT_KEY,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;

use crate::ui::widgets::SessionDisplay;

/// Reads pending key presses from the terminal without blocking.
#[derive(Debug, Default)]
pub struct CrosstermInput;

impl CrosstermInput {
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for CrosstermInput {
    fn poll_input(&mut self) -> io::Result<Option<InputEvent>> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
                && let Some(input) = map_key(key)
            {
                return Ok(Some(input));
            }
        }
        Ok(None)
    }
}

fn map_key(key: KeyEvent) -> Option<InputEvent> {
    let input = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => InputEvent::Quit,
        KeyCode::Esc | KeyCode::Char(QUIT_KEY) => InputEvent::Quit,
        KeyCode::Left => InputEvent::Key(InputKey::Left),
        KeyCode::Right => InputEvent::Key(InputKey::Right),
        KeyCode::Down => InputEvent::Key(InputKey::Down),
        KeyCode::Char(c) => InputEvent::Key(InputKey::Char(c)),
        _ => return None,
    };
    Some(input)
}

/// Redraws the whole session after every change.
pub struct TuiPresenter<'a> {
    terminal: &'a mut DefaultTerminal,
    message: Option<&'static str>,
}

impl<'a> TuiPresenter<'a> {
    pub fn new(terminal: &'a mut DefaultTerminal) -> Self {
        Self {
            terminal,
            message: None,
        }
    }

    fn update_message(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::LinesCleared(lines) => {
                    self.message = Some(match lines {
                        1 => "SINGLE",
                        2 => "DOUBLE",
                        3 => "TRIPLE",
                        _ => "TETRIS",
                    });
                }
                GameEvent::LevelUp(_) => self.message = Some("LEVEL UP"),
                GameEvent::PieceSpawned { .. } | GameEvent::ScoreChanged(_) => {}
                GameEvent::GameOver => self.message = None,
            }
        }
    }
}

impl Presenter for TuiPresenter<'_> {
    fn present(&mut self, session: &GameSession, events: &[GameEvent]) -> io::Result<()> {
        // A landing without a clear retires the previous message.
        if events.iter().any(GameEvent::is_piece_spawned) {
            self.message = None;
        }
        self.update_message(events);

        let display = SessionDisplay::new(session).message(self.message);
        self.terminal
            .draw(|frame| frame.render_widget(&display, frame.area()))?;
        Ok(())
    }
}
