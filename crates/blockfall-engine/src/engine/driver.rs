use std::{io, thread, time::Duration};

use log::debug;

use super::{GameEvent, GameSession, InputKey};

/// Input as delivered by a frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(InputKey),
    Quit,
}

/// Non-blocking source of player input.
pub trait InputSource {
    /// Returns the next pending input, or `None` if there is none right now.
    fn poll_input(&mut self) -> io::Result<Option<InputEvent>>;
}

/// Draws the session after every change.
pub trait Presenter {
    /// `events` are the events drained from the session since the previous
    /// call.
    fn present(&mut self, session: &GameSession, events: &[GameEvent]) -> io::Result<()>;
}

/// Sleeps that pace the driver loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverTiming {
    /// Sleep after a poll that returned no input. One gravity tick.
    pub poll_interval: Duration,
    /// Sleep after handling a key and after a gravity step.
    pub input_cooldown: Duration,
    /// How long the final frame stays up once the game is over.
    pub game_over_delay: Duration,
}

impl Default for DriverTiming {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(1),
            input_cooldown: Duration::from_millis(20),
            game_over_delay: Duration::from_millis(1500),
        }
    }
}

impl DriverTiming {
    /// No sleeping at all.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            poll_interval: Duration::ZERO,
            input_cooldown: Duration::ZERO,
            game_over_delay: Duration::ZERO,
        }
    }
}

/// Why [`run_session`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum DriverExit {
    GameOver,
    Quit,
}

/// Runs `session` until the player quits or the game ends.
///
/// Each iteration polls once. A key is handled and followed by the input
/// cooldown. No input costs one gravity tick and one poll interval; when
/// gravity fires it is also followed by the input cooldown. The presenter
/// sees the initial state and every step that produced an outcome.
pub fn run_session<I, P>(
    session: &mut GameSession,
    input: &mut I,
    presenter: &mut P,
    timing: &DriverTiming,
) -> io::Result<DriverExit>
where
    I: InputSource + ?Sized,
    P: Presenter + ?Sized,
{
    let events = session.take_events();
    presenter.present(session, &events)?;

    loop {
        if session.session_state().is_game_over() {
            thread::sleep(timing.game_over_delay);
            return Ok(DriverExit::GameOver);
        }

        let changed = match input.poll_input()? {
            Some(InputEvent::Quit) => {
                debug!("quit requested");
                return Ok(DriverExit::Quit);
            }
            Some(InputEvent::Key(key)) => {
                let changed = !matches!(session.handle_key(key), Ok(None));
                thread::sleep(timing.input_cooldown);
                changed
            }
            None => {
                thread::sleep(timing.poll_interval);
                let changed = !matches!(session.tick(), Ok(None));
                if changed {
                    thread::sleep(timing.input_cooldown);
                }
                changed
            }
        };

        if changed {
            let events = session.take_events();
            presenter.present(session, &events)?;
        }
    }
}
