use std::{collections::VecDeque, fmt::Write as _, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::piece::PieceKind;

/// Produces the stream of piece kinds with a one-piece lookahead.
///
/// Kinds are drawn in pairs `(current, next)`. `current` is redrawn until it
/// differs from both `next` and the `next` of the previous pair, so the same
/// kind never spawns twice in a row. This is not a bag: kinds can repeat two
/// spawns apart, and only the long-run frequency is uniform.
///
/// The queue holds two or three kinds. A fresh pair is pushed whenever a pop
/// leaves exactly one kind behind, so [`Self::peek_next`] always has a
/// preview.
///
/// # Example
///
/// ```
/// use blockfall_engine::Sequencer;
///
/// let mut sequencer = Sequencer::new();
/// let preview = sequencer.peek_next();
/// let first = sequencer.pop_next();
/// assert_eq!(first, preview);
/// assert_ne!(sequencer.peek_next(), first);
/// ```
#[derive(Debug, Clone)]
pub struct Sequencer {
    rng: Pcg32,
    queue: VecDeque<PieceKind>,
    previous: Option<PieceKind>,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

/// Seed for deterministic piece sequences.
///
/// A 128-bit (16-byte) seed for the sequencer's generator. The same seed
/// always yields the same sequence of kinds, which makes games reproducible.
/// Serialized and parsed as a 32-digit hexadecimal string.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceSeed, Sequencer};
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
/// let mut a = Sequencer::with_seed(seed);
/// let mut b = Sequencer::with_seed(seed);
/// assert_eq!(a.pop_next(), b.pop_next());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

/// Error returned when a [`PieceSeed`] cannot be parsed from text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed {input:?}: expected 32 hexadecimal digits")]
pub struct ParseSeedError {
    input: String,
}

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        let num = u128::from_be_bytes(self.0);
        let mut hex_str = String::with_capacity(2 * self.0.len());
        // Writing to a String cannot fail.
        let _ = write!(&mut hex_str, "{num:032x}");
        hex_str
    }
}

impl FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

impl Sequencer {
    /// Creates a sequencer with a random seed.
    ///
    /// For reproducible sequences, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        let mut this = Self {
            rng: Pcg32::from_seed(seed.0),
            queue: VecDeque::with_capacity(3),
            previous: None,
        };
        this.push_pair();
        this
    }

    fn push_pair(&mut self) {
        let next: PieceKind = self.rng.random();
        let mut current: PieceKind = self.rng.random();
        while Some(current) == self.previous || current == next {
            current = self.rng.random();
        }
        self.previous = Some(next);
        self.queue.extend([current, next]);
    }

    /// Takes the kind to spawn now.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty (the refill rule keeps it non-empty).
    pub fn pop_next(&mut self) -> PieceKind {
        let kind = self
            .queue
            .pop_front()
            .expect("Piece queue should never be empty");
        if self.queue.len() == 1 {
            self.push_pair();
        }
        kind
    }

    /// Returns the kind the next [`Self::pop_next`] will yield.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty (the refill rule keeps it non-empty).
    #[must_use]
    pub fn peek_next(&self) -> PieceKind {
        *self
            .queue
            .front()
            .expect("Piece queue should never be empty")
    }
}
