pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("piece locked in the top playable row")]
pub struct TopOutError;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("game is over")]
pub struct GameOverError;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("left and right rotation keys are both bound to {_0:?}")]
    IdenticalRotationKeys(#[error(not(source))] char),
    #[display("rotation key {_0:?} is not a printable character")]
    UnprintableRotationKey(#[error(not(source))] char),
    #[display("rotation key {_0:?} is reserved for quitting")]
    ReservedRotationKey(#[error(not(source))] char),
}
