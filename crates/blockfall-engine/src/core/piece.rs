use rand::{Rng, distr::StandardUniform, prelude::Distribution};

use super::{SPAWN_COL, SPAWN_ROW, cell::Cell};

/// A falling piece: four cells, the index of its pivot cell, its current
/// angle and its kind.
///
/// Movement and rotation mutate the piece in place and never validate the
/// result. Callers keep a copy of the previous state and restore it when
/// the collision check rejects the move.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Piece, PieceAngle, PieceKind, RotationDirection};
///
/// let mut piece = Piece::spawn(PieceKind::T);
/// let before = piece;
/// piece.move_down();
/// piece.rotate(RotationDirection::Right);
/// assert_eq!(piece.angle(), PieceAngle::Deg90);
///
/// // Undo by restoring the copy.
/// piece = before;
/// assert_eq!(piece, Piece::spawn(PieceKind::T));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    cells: [Cell; Piece::SIZE],
    pivot: usize,
    angle: PieceAngle,
    kind: PieceKind,
}

impl Piece {
    /// Number of cells in every piece.
    pub const SIZE: usize = 4;

    /// Creates a piece of `kind` at its spawn position with angle 0.
    #[must_use]
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = kind.shape();
        Self::with_anchor(kind, SPAWN_ROW, SPAWN_COL + shape.anchor_col_offset)
    }

    /// Creates a piece of `kind` in its spawn orientation with the shape's
    /// top-left anchor at `(row, col)`.
    #[must_use]
    pub fn with_anchor(kind: PieceKind, row: i32, col: i32) -> Self {
        let shape = kind.shape();
        let cells = shape
            .offsets
            .map(|(d_row, d_col)| Cell::new(row + d_row, col + d_col, kind));
        Self {
            cells,
            pivot: shape.pivot,
            angle: PieceAngle::Deg0,
            kind,
        }
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell; Piece::SIZE] {
        &self.cells
    }

    #[must_use]
    pub fn pivot(&self) -> Cell {
        self.cells[self.pivot]
    }

    #[must_use]
    pub fn angle(&self) -> PieceAngle {
        self.angle
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn size(&self) -> usize {
        Self::SIZE
    }

    /// Shifts every cell by the same amount.
    pub fn translate(&mut self, d_row: i32, d_col: i32) {
        for cell in &mut self.cells {
            *cell = cell.offset(d_row, d_col);
        }
    }

    pub fn move_down(&mut self) {
        self.translate(1, 0);
    }

    pub fn move_up(&mut self) {
        self.translate(-1, 0);
    }

    pub fn move_left(&mut self) {
        self.translate(0, -1);
    }

    pub fn move_right(&mut self) {
        self.translate(0, 1);
    }

    /// Rotates the piece a quarter turn using its kind's rotation strategy.
    pub fn rotate(&mut self, direction: RotationDirection) {
        let rotate = self.kind.rotation_strategy().transform();
        rotate(self, direction);
    }

    /// Applies a single motion without any validation.
    pub fn apply(&mut self, motion: Motion) {
        match motion {
            Motion::Left => self.move_left(),
            Motion::Right => self.move_right(),
            Motion::Down => self.move_down(),
            Motion::RotateLeft => self.rotate(RotationDirection::Left),
            Motion::RotateRight => self.rotate(RotationDirection::Right),
        }
    }
}

/// A single step a player or the fall timer can ask of the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Motion {
    Left,
    Right,
    Down,
    RotateLeft,
    RotateRight,
}

impl Motion {
    #[must_use]
    pub const fn is_rotation(self) -> bool {
        matches!(self, Motion::RotateLeft | Motion::RotateRight)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    Left,
    Right,
}

/// Orientation of a piece, in quarter turns from its spawn orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PieceAngle {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl PieceAngle {
    #[must_use]
    pub const fn degrees(self) -> u16 {
        match self {
            PieceAngle::Deg0 => 0,
            PieceAngle::Deg90 => 90,
            PieceAngle::Deg180 => 180,
            PieceAngle::Deg270 => 270,
        }
    }

    /// Adds 90 degrees for a right turn or 270 for a left turn, modulo 360.
    #[must_use]
    pub const fn rotated(self, direction: RotationDirection) -> Self {
        match (self, direction) {
            (PieceAngle::Deg0, RotationDirection::Right)
            | (PieceAngle::Deg180, RotationDirection::Left) => PieceAngle::Deg90,
            (PieceAngle::Deg90, RotationDirection::Right)
            | (PieceAngle::Deg270, RotationDirection::Left) => PieceAngle::Deg180,
            (PieceAngle::Deg180, RotationDirection::Right)
            | (PieceAngle::Deg0, RotationDirection::Left) => PieceAngle::Deg270,
            (PieceAngle::Deg270, RotationDirection::Right)
            | (PieceAngle::Deg90, RotationDirection::Left) => PieceAngle::Deg0,
        }
    }

    const fn is_horizontal(self) -> bool {
        matches!(self, PieceAngle::Deg0 | PieceAngle::Deg180)
    }
}

/// How a piece kind turns.
///
/// - `Generic`: quarter turn of every cell around the pivot cell.
/// - `Fixed`: rotation is a no-op.
/// - `TwoState`: alternates between a horizontal and a vertical shape using
///   a per-cell delta table, while the angle still walks all four values.
/// - `SkewPair`: alternates between two shapes using a per-cell delta table;
///   the angle toggles between 0 and 90 in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationStrategy {
    Generic,
    Fixed,
    TwoState,
    SkewPair,
}

pub type RotateFn = fn(&mut Piece, RotationDirection);

// Indexed by `RotationStrategy` discriminant.
const ROTATE_FNS: [RotateFn; 4] = [
    rotate_generic,
    rotate_fixed,
    rotate_two_state,
    rotate_skew_pair,
];

impl RotationStrategy {
    #[must_use]
    pub fn transform(self) -> RotateFn {
        ROTATE_FNS[self as usize]
    }
}

fn rotate_generic(piece: &mut Piece, direction: RotationDirection) {
    let pivot = piece.pivot();
    for cell in &mut piece.cells {
        let d_row = cell.row - pivot.row;
        let d_col = cell.col - pivot.col;
        (cell.row, cell.col) = match direction {
            RotationDirection::Right => (pivot.row + d_col, pivot.col - d_row),
            RotationDirection::Left => (pivot.row - d_col, pivot.col + d_row),
        };
    }
    piece.angle = piece.angle.rotated(direction);
}

fn rotate_fixed(_piece: &mut Piece, _direction: RotationDirection) {}

fn rotate_two_state(piece: &mut Piece, direction: RotationDirection) {
    // Horizontal to vertical adds the deltas, vertical to horizontal subtracts them.
    let sign = if piece.angle.is_horizontal() { 1 } else { -1 };
    apply_turn_deltas(piece, sign);
    piece.angle = piece.angle.rotated(direction);
}

fn rotate_skew_pair(piece: &mut Piece, _direction: RotationDirection) {
    let (sign, angle) = match piece.angle {
        PieceAngle::Deg0 => (1, PieceAngle::Deg90),
        _ => (-1, PieceAngle::Deg0),
    };
    apply_turn_deltas(piece, sign);
    piece.angle = angle;
}

fn apply_turn_deltas(piece: &mut Piece, sign: i32) {
    let deltas = piece.kind.shape().turn_deltas;
    for (cell, (d_row, d_col)) in piece.cells.iter_mut().zip(deltas) {
        *cell = cell.offset(sign * d_row, sign * d_col);
    }
}

/// The seven piece kinds.
///
/// The discriminant is the piece id drawn by the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    I = 0,
    J = 1,
    L = 2,
    O = 3,
    S = 4,
    Z = 5,
    T = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece kinds (7).
    pub const LEN: usize = 7;

    /// Every kind, in id order.
    pub const ALL: [PieceKind; PieceKind::LEN] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
    ];

    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(PieceKind::I),
            1 => Some(PieceKind::J),
            2 => Some(PieceKind::L),
            3 => Some(PieceKind::O),
            4 => Some(PieceKind::S),
            5 => Some(PieceKind::Z),
            6 => Some(PieceKind::T),
            _ => None,
        }
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::T => 'T',
        }
    }

    #[must_use]
    pub const fn rotation_strategy(self) -> RotationStrategy {
        match self {
            PieceKind::J | PieceKind::L | PieceKind::T => RotationStrategy::Generic,
            PieceKind::O => RotationStrategy::Fixed,
            PieceKind::I => RotationStrategy::TwoState,
            PieceKind::S | PieceKind::Z => RotationStrategy::SkewPair,
        }
    }

    /// Cells of the spawn orientation relative to the shape's anchor, as
    /// `(row, col)` offsets in piece cell order.
    #[must_use]
    pub fn spawn_offsets(self) -> &'static [(i32, i32); Piece::SIZE] {
        &self.shape().offsets
    }

    fn shape(self) -> &'static Shape {
        &SHAPES[self as usize]
    }
}

/// Spawn geometry and turn table of one piece kind.
struct Shape {
    offsets: [(i32, i32); Piece::SIZE],
    pivot: usize,
    anchor_col_offset: i32,
    /// Per-cell deltas of the horizontal-to-vertical turn. Only used by the
    /// table-driven strategies.
    turn_deltas: [(i32, i32); Piece::SIZE],
}

const NO_DELTAS: [(i32, i32); Piece::SIZE] = [(0, 0); Piece::SIZE];

// Indexed by piece id.
const SHAPES: [Shape; PieceKind::LEN] = [
    // I
    Shape {
        offsets: [(0, 0), (0, 1), (0, 2), (0, 3)],
        pivot: 2,
        anchor_col_offset: -1,
        turn_deltas: [(-2, 2), (-1, 1), (0, 0), (1, -1)],
    },
    // J
    Shape {
        offsets: [(1, 0), (0, 0), (0, 1), (0, 2)],
        pivot: 2,
        anchor_col_offset: 0,
        turn_deltas: NO_DELTAS,
    },
    // L
    Shape {
        offsets: [(0, 0), (0, 1), (0, 2), (1, 2)],
        pivot: 1,
        anchor_col_offset: 0,
        turn_deltas: NO_DELTAS,
    },
    // O
    Shape {
        offsets: [(0, 0), (0, 1), (1, 0), (1, 1)],
        pivot: 0,
        anchor_col_offset: 0,
        turn_deltas: NO_DELTAS,
    },
    // S
    Shape {
        offsets: [(1, 0), (1, 1), (0, 1), (0, 2)],
        pivot: 1,
        anchor_col_offset: 0,
        turn_deltas: [(-2, 1), (-1, 0), (0, 1), (1, 0)],
    },
    // Z
    Shape {
        offsets: [(0, 0), (0, 1), (1, 1), (1, 2)],
        pivot: 2,
        anchor_col_offset: 0,
        turn_deltas: [(-1, 2), (0, 1), (-1, 0), (0, -1)],
    },
    // T
    Shape {
        offsets: [(0, 0), (0, 1), (1, 1), (0, 2)],
        pivot: 1,
        anchor_col_offset: 0,
        turn_deltas: NO_DELTAS,
    },
];
