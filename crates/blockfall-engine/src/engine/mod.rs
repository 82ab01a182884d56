//! Game rules and session state built on the core data structures.
//!
//! - [`GameSession`] - One game: active piece, field, sequencer, progression
//! - [`GameField`] - Settled blocks plus their skyline, placement and line clears
//! - [`Progression`] - Level, fall speed, score and statistics
//! - [`Sequencer`] - Piece kind stream with a one-piece preview
//! - [`PieceSeed`] - Seed for deterministic piece sequences
//! - [`classify`] - Collision classification of a tentative move
//! - [`run_session`] - Timing loop connecting a session to input and presentation
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`] from a validated [`GameConfig`]
//! 2. Feed it player keys ([`GameSession::handle_key`]) and idle ticks
//!    ([`GameSession::tick`]); every request is moved, classified and then
//!    kept, reverted or landed
//! 3. A landing places the piece, clears full rows, updates the level and
//!    score and spawns the next piece
//! 4. A landing on the top playable row ends the game
//!
//! [`run_session`] does all of this against an [`InputSource`] and a [`Presenter`].
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{GameConfig, GameEvent, GameSession, InputKey};
//!
//! let mut session = GameSession::new(GameConfig::default())?;
//! session.handle_key(InputKey::Left)?;
//! session.handle_key(InputKey::Char('s'))?;
//!
//! for event in session.take_events() {
//!     if let GameEvent::PieceSpawned { kind, next } = event {
//!         println!("{kind:?} spawned, {next:?} up next");
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{
    collision::*, config::*, driver::*, event::*, game_field::*, game_session::*, progression::*,
    sequencer::*,
};

mod collision;
mod config;
mod driver;
mod event;
mod game_field;
mod game_session;
mod progression;
mod sequencer;
