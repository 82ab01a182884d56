use std::mem;

use log::{debug, trace};

use crate::{
    ConfigError, GameOverError,
    core::piece::{Motion, Piece, PieceKind},
};

use super::{
    GameConfig, GameEvent, InputKey, PieceSeed, Progression, Sequencer, collision::Collision,
    game_field::GameField,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    GameOver,
}

/// Who asked for a motion. Only player-issued downward moves score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum MoveOrigin {
    Player,
    Gravity,
}

/// Result of one motion request against the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum MoveOutcome {
    /// The piece now occupies its new position.
    Moved,
    /// The piece was put back where it was.
    Rejected(Collision),
    /// The piece settled and the next one spawned.
    Landed { lines_cleared: usize },
    /// The piece settled on the top playable row and the game ended.
    ToppedOut,
}

/// One game from the first spawn to game over.
///
/// Owns the field, the active piece, the sequencer and the progression.
/// Every command goes through [`Self::apply`]: move, classify, then keep,
/// revert or land.
///
/// # Example
///
/// ```
/// use blockfall_engine::{GameConfig, GameSession, Motion, MoveOrigin, MoveOutcome};
///
/// let mut session = GameSession::new(GameConfig::default())?;
/// let before = *session.active_piece();
/// let outcome = session.apply(Motion::Down, MoveOrigin::Player)?;
/// assert_eq!(outcome, MoveOutcome::Moved);
/// assert_eq!(session.active_piece().cells()[0].row, before.cells()[0].row + 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    field: GameField,
    sequencer: Sequencer,
    active_piece: Piece,
    progression: Progression,
    session_state: SessionState,
    gravity_countdown: u32,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Starts a game with a randomly seeded sequencer.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_sequencer(config, Sequencer::new())
    }

    /// Starts a game whose piece sequence is fully determined by `seed`.
    pub fn with_seed(config: GameConfig, seed: PieceSeed) -> Result<Self, ConfigError> {
        Self::with_sequencer(config, Sequencer::with_seed(seed))
    }

    fn with_sequencer(config: GameConfig, mut sequencer: Sequencer) -> Result<Self, ConfigError> {
        config.validate()?;
        let progression = Progression::new(config.start_level);
        let active_piece = Piece::spawn(sequencer.pop_next());
        let mut session = Self {
            gravity_countdown: progression.fall_interval_ms(),
            config,
            field: GameField::new(),
            sequencer,
            active_piece,
            progression,
            session_state: SessionState::Playing,
            events: Vec::new(),
        };
        session.announce_spawn();
        Ok(session)
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn field(&self) -> &GameField {
        &self.field
    }

    /// Mutable access to the settled blocks, for setting up positions.
    pub fn field_mut(&mut self) -> &mut GameField {
        &mut self.field
    }

    #[must_use]
    pub fn active_piece(&self) -> &Piece {
        &self.active_piece
    }

    /// Replaces the active piece without any collision check.
    pub fn set_active_piece(&mut self, piece: Piece) {
        self.active_piece = piece;
    }

    /// Kind that spawns after the active piece lands.
    #[must_use]
    pub fn next_kind(&self) -> PieceKind {
        self.sequencer.peek_next()
    }

    #[must_use]
    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn progression_mut(&mut self) -> &mut Progression {
        &mut self.progression
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    /// Idle ticks left before gravity moves the piece down.
    #[must_use]
    pub fn gravity_countdown(&self) -> u32 {
        self.gravity_countdown
    }

    /// Drains the events queued since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }

    fn ensure_playing(&self) -> Result<(), GameOverError> {
        if self.session_state.is_game_over() {
            return Err(GameOverError);
        }
        Ok(())
    }

    /// Applies the motion bound to `key`. Unbound keys do nothing.
    pub fn handle_key(&mut self, key: InputKey) -> Result<Option<MoveOutcome>, GameOverError> {
        self.ensure_playing()?;
        match self.config.command_for(key) {
            Some(motion) => self.apply(motion, MoveOrigin::Player).map(Some),
            None => Ok(None),
        }
    }

    /// Counts down one idle tick and applies gravity when the countdown
    /// reaches zero, after which it restarts from the current fall interval.
    pub fn tick(&mut self) -> Result<Option<MoveOutcome>, GameOverError> {
        self.ensure_playing()?;
        self.gravity_countdown = self.gravity_countdown.saturating_sub(1);
        if self.gravity_countdown > 0 {
            return Ok(None);
        }
        let outcome = self.apply(Motion::Down, MoveOrigin::Gravity)?;
        self.gravity_countdown = self.progression.fall_interval_ms();
        Ok(Some(outcome))
    }

    /// Moves the active piece and resolves the collision.
    ///
    /// A free position is kept. A downward move that hits a surface, a block
    /// or the floor lands the piece at its previous position. Anything else
    /// reverts the piece.
    pub fn apply(
        &mut self,
        motion: Motion,
        origin: MoveOrigin,
    ) -> Result<MoveOutcome, GameOverError> {
        self.ensure_playing()?;
        if motion.is_down() && origin.is_player() {
            self.progression.award_soft_drop();
        }

        let prior = self.active_piece;
        self.active_piece.apply(motion);
        let collision = self.field.classify(&self.active_piece, motion, prior.cells());
        if collision.is_none() {
            return Ok(MoveOutcome::Moved);
        }

        self.active_piece = prior;
        if collision.lands(motion) {
            return Ok(self.land());
        }
        trace!("{motion:?} rejected by {collision:?}");
        Ok(MoveOutcome::Rejected(collision))
    }

    fn land(&mut self) -> MoveOutcome {
        let piece = self.active_piece;
        debug!(
            "locked {:?} at {:?}",
            piece.kind(),
            piece.cells().map(|c| c.position())
        );

        if self.field.place(&piece).is_err() {
            self.session_state = SessionState::GameOver;
            self.events.push(GameEvent::GameOver);
            debug!("game over with score {}", self.progression.score());
            return MoveOutcome::ToppedOut;
        }

        let lines_cleared = self.field.reshape();
        self.progression.award_line_clear(lines_cleared);
        if lines_cleared > 0 {
            self.events.push(GameEvent::LinesCleared(lines_cleared));
        }
        if self.progression.update_destroyed_lines(lines_cleared) {
            let level = self.progression.level();
            debug!("level up to {level}");
            self.events.push(GameEvent::LevelUp(level));
        }

        let previous_score = self.progression.score();
        let score = self.progression.update_score();
        if score != previous_score {
            self.events.push(GameEvent::ScoreChanged(score));
        }
        self.progression.update_statistics(piece.kind());

        self.active_piece = Piece::spawn(self.sequencer.pop_next());
        self.announce_spawn();
        MoveOutcome::Landed { lines_cleared }
    }

    fn announce_spawn(&mut self) {
        let kind = self.active_piece.kind();
        let next = self.sequencer.peek_next();
        debug!("spawned {kind:?}, next {next:?}");
        self.events.push(GameEvent::PieceSpawned { kind, next });
    }
}
