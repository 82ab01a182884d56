use arrayvec::ArrayVec;

use super::{
    FIRST_PLAYABLE_COL, PLAYABLE_HEIGHT, PLAYABLE_WIDTH, TOP_PLAYABLE_ROW, cell::Cell,
    piece::PieceKind,
};

/// Contents of one playable field square.
///
/// Occupancy and color travel together: a square is either empty or filled
/// by a block of a specific piece kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Block {
    #[default]
    Empty,
    Filled(PieceKind),
}

impl Block {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Block::Empty
    }

    #[must_use]
    pub fn is_filled(self) -> bool {
        !self.is_empty()
    }
}

/// Absolute row numbers, at most one per playable row.
pub type FullRows = ArrayVec<i32, PLAYABLE_HEIGHT>;

/// Settled blocks of the playable area.
///
/// Stored as a flat `PLAYABLE_WIDTH * PLAYABLE_HEIGHT` array addressed by
/// absolute coordinates. Anything outside the playable area reads as empty
/// and ignores writes; the collision classifier decides what walls, roof
/// and floor mean.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Cell, Field, PieceKind};
///
/// let mut field = Field::new();
/// field.set(Cell::new(34, 41, PieceKind::L), true);
/// assert!(field.is_occupied(34, 41));
/// assert!(!field.is_occupied(34, 42));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    blocks: [Block; PLAYABLE_WIDTH * PLAYABLE_HEIGHT],
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}

impl Field {
    pub const WIDTH: usize = PLAYABLE_WIDTH;
    pub const HEIGHT: usize = PLAYABLE_HEIGHT;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            blocks: [Block::Empty; PLAYABLE_WIDTH * PLAYABLE_HEIGHT],
        }
    }

    /// Absolute rows of the playable area, top to bottom.
    pub fn row_range() -> impl DoubleEndedIterator<Item = i32> + Clone {
        (0..PLAYABLE_HEIGHT).map(|y| TOP_PLAYABLE_ROW + index_to_i32(y))
    }

    /// Absolute columns of the playable area, left to right.
    pub fn col_range() -> impl DoubleEndedIterator<Item = i32> + Clone {
        (0..PLAYABLE_WIDTH).map(|x| FIRST_PLAYABLE_COL + index_to_i32(x))
    }

    fn index(row: i32, col: i32) -> Option<usize> {
        let y = usize::try_from(row - TOP_PLAYABLE_ROW).ok()?;
        let x = usize::try_from(col - FIRST_PLAYABLE_COL).ok()?;
        (y < PLAYABLE_HEIGHT && x < PLAYABLE_WIDTH).then_some(y * PLAYABLE_WIDTH + x)
    }

    #[must_use]
    pub fn block_at(&self, row: i32, col: i32) -> Block {
        Self::index(row, col).map_or(Block::Empty, |i| self.blocks[i])
    }

    #[must_use]
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        self.block_at(row, col).is_filled()
    }

    /// Writes a square, replacing whatever was there including its color.
    pub fn set(&mut self, cell: Cell, occupied: bool) {
        if let Some(i) = Self::index(cell.row, cell.col) {
            self.blocks[i] = if occupied {
                Block::Filled(cell.kind)
            } else {
                Block::Empty
            };
        }
    }

    fn row_slice(&self, row: i32) -> Option<&[Block]> {
        let start = Self::index(row, FIRST_PLAYABLE_COL)?;
        Some(&self.blocks[start..start + PLAYABLE_WIDTH])
    }

    fn row_slice_mut(&mut self, row: i32) -> Option<&mut [Block]> {
        let start = Self::index(row, FIRST_PLAYABLE_COL)?;
        Some(&mut self.blocks[start..start + PLAYABLE_WIDTH])
    }

    /// Empties every square of `row`.
    pub fn clear_row(&mut self, row: i32) {
        if let Some(cells) = self.row_slice_mut(row) {
            cells.fill(Block::Empty);
        }
    }

    /// Moves every row at or above `from_row` down by `by` rows, keeping
    /// colors. Rows pushed past the bottom of the playable area are lost and
    /// the rows vacated at the top become empty.
    pub fn shift_rows_down(&mut self, from_row: i32, by: usize) {
        if by == 0 {
            return;
        }
        let by = index_to_i32(by);
        for row in Field::row_range().rev().filter(|&row| row <= from_row + by) {
            let Some(dst) = Self::index(row, FIRST_PLAYABLE_COL) else {
                continue;
            };
            match Self::index(row - by, FIRST_PLAYABLE_COL) {
                Some(src) => self.blocks.copy_within(src..src + PLAYABLE_WIDTH, dst),
                None => self.blocks[dst..dst + PLAYABLE_WIDTH].fill(Block::Empty),
            }
        }
    }

    #[must_use]
    pub fn is_row_full(&self, row: i32) -> bool {
        self.row_slice(row)
            .is_some_and(|cells| cells.iter().all(|b| b.is_filled()))
    }

    /// Absolute rows with every square filled, top to bottom.
    #[must_use]
    pub fn full_rows(&self) -> FullRows {
        Field::row_range()
            .filter(|&row| self.is_row_full(row))
            .collect()
    }

    /// Iterates over the playable rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Block]> {
        self.blocks.chunks_exact(PLAYABLE_WIDTH)
    }

    /// Iterates over every filled square as a cell.
    pub fn filled_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        Field::row_range()
            .flat_map(|row| Field::col_range().map(move |col| (row, col)))
            .filter_map(|(row, col)| match self.block_at(row, col) {
                Block::Filled(kind) => Some(Cell::new(row, col, kind)),
                Block::Empty => None,
            })
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn index_to_i32(i: usize) -> i32 {
    i as i32
}
