use crate::core::piece::PieceKind;

/// Something the frontend may want to react to, queued by the session and
/// drained with [`GameSession::take_events`](super::GameSession::take_events).
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameEvent {
    /// A new active piece appeared; `next` is the updated preview.
    PieceSpawned { kind: PieceKind, next: PieceKind },
    LinesCleared(usize),
    LevelUp(u32),
    ScoreChanged(u64),
    GameOver,
}
