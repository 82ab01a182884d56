use log::debug;

use crate::{
    TopOutError,
    core::{
        TOP_PLAYABLE_ROW,
        cell::Cell,
        field::Field,
        piece::{Motion, Piece},
        skyline::Skyline,
    },
};

use super::collision::{self, Collision};

/// Settled blocks together with their skyline.
///
/// Every mutation goes through this type so that the skyline never goes
/// stale between a placement or line clear and the next collision check.
///
/// # Example
///
/// ```
/// use blockfall_engine::{GameField, Piece, PieceKind};
///
/// let mut field = GameField::new();
/// let mut piece = Piece::spawn(PieceKind::O);
/// piece.translate(18, 0);
/// field.place(&piece).unwrap();
/// assert_eq!(field.skyline().surface_row(45), Some(33));
/// assert_eq!(field.reshape(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameField {
    field: Field,
    skyline: Skyline,
}

impl Default for GameField {
    fn default() -> Self {
        Self::new()
    }
}

impl GameField {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            field: Field::new(),
            skyline: Skyline::new(),
        }
    }

    /// Wraps an existing field, deriving its skyline.
    #[must_use]
    pub fn from_field(field: Field) -> Self {
        let skyline = Skyline::compute(&field);
        Self { field, skyline }
    }

    #[must_use]
    pub fn field(&self) -> &Field {
        &self.field
    }

    #[must_use]
    pub fn skyline(&self) -> &Skyline {
        &self.skyline
    }

    /// Fills squares directly, as if blocks had settled there.
    pub fn fill_cells<I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = Cell>,
    {
        for cell in cells {
            self.field.set(cell, true);
        }
        self.recompute_skyline();
    }

    /// Classifies `piece`, already moved by `motion` from `prior`.
    #[must_use]
    pub fn classify(&self, piece: &Piece, motion: Motion, prior: &[Cell; Piece::SIZE]) -> Collision {
        collision::classify(piece, motion, prior, &self.field, &self.skyline)
    }

    /// Writes a landed piece into the field.
    ///
    /// Cells on the top playable row are not written; if there are any, the
    /// stack has reached the top and the game is over.
    pub fn place(&mut self, piece: &Piece) -> Result<(), TopOutError> {
        let mut topped_out = false;
        for cell in piece.cells() {
            if cell.row == TOP_PLAYABLE_ROW {
                topped_out = true;
            } else {
                self.field.set(*cell, true);
            }
        }
        self.recompute_skyline();
        if topped_out {
            return Err(TopOutError);
        }
        Ok(())
    }

    /// Removes every full row and lets the rows above fall into the gap.
    ///
    /// Returns the number of rows removed. A field without full rows is left
    /// untouched.
    pub fn reshape(&mut self) -> usize {
        let full_rows = self.field.full_rows();
        if full_rows.is_empty() {
            return 0;
        }
        // Top-down, so rows still waiting to be cleared keep their index.
        for &row in &full_rows {
            self.field.clear_row(row);
            self.field.shift_rows_down(row - 1, 1);
        }
        self.recompute_skyline();
        debug!("cleared rows {:?}", full_rows.as_slice());
        full_rows.len()
    }

    fn recompute_skyline(&mut self) {
        self.skyline = Skyline::compute(&self.field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FLOOR_ROW, field::Block, piece::PieceKind};

    const BOTTOM: i32 = FLOOR_ROW - 1;

    fn row_cells(row: i32, kind: PieceKind) -> impl Iterator<Item = Cell> {
        Field::col_range().map(move |col| Cell::new(row, col, kind))
    }

    mod place {
        use super::*;

        #[test]
        fn test_place_updates_skyline() {
            let mut field = GameField::new();
            let mut piece = Piece::spawn(PieceKind::I);
            piece.translate(BOTTOM - TOP_PLAYABLE_ROW, 0);

            field.place(&piece).unwrap();

            for cell in piece.cells() {
                assert_eq!(field.field().block_at(cell.row, cell.col), Block::Filled(PieceKind::I));
                assert!(field.skyline().contains(cell));
            }
            assert_eq!(field.skyline(), &Skyline::compute(field.field()));
        }

        #[test]
        fn test_place_on_top_row_tops_out() {
            let mut field = GameField::new();
            // T at spawn: three cells on the top playable row, one below it.
            let piece = Piece::spawn(PieceKind::T);
            assert!(field.place(&piece).is_err());

            let written: Vec<_> = field.field().filled_cells().map(|c| c.position()).collect();
            assert_eq!(written, [(TOP_PLAYABLE_ROW + 1, 46)]);
            assert_eq!(field.skyline().surface_row(46), Some(TOP_PLAYABLE_ROW + 1));
        }

        #[test]
        fn test_fill_cells_recomputes_skyline() {
            let mut field = GameField::new();
            field.fill_cells([Cell::new(30, 48, PieceKind::Z)]);
            assert_eq!(field.skyline().surface_row(48), Some(30));
            assert_eq!(GameField::from_field(field.field().clone()), field);
        }
    }

    mod reshape {
        use super::*;

        #[test]
        fn test_no_full_rows_is_noop() {
            let mut field = GameField::new();
            field.fill_cells(row_cells(BOTTOM, PieceKind::I).skip(1));
            let before = field.clone();
            assert_eq!(field.reshape(), 0);
            assert_eq!(field, before);
        }

        #[test]
        fn test_single_row_shifts_blocks_above() {
            let mut field = GameField::new();
            field.fill_cells(row_cells(BOTTOM, PieceKind::I));
            field.fill_cells([
                Cell::new(BOTTOM - 1, 43, PieceKind::S),
                Cell::new(BOTTOM - 2, 43, PieceKind::T),
            ]);

            assert_eq!(field.reshape(), 1);

            let f = field.field();
            assert_eq!(f.block_at(BOTTOM, 43), Block::Filled(PieceKind::S));
            assert_eq!(f.block_at(BOTTOM - 1, 43), Block::Filled(PieceKind::T));
            assert_eq!(f.filled_cells().count(), 2);
            assert_eq!(field.skyline().surface_row(43), Some(BOTTOM - 1));
            assert_eq!(field.skyline().surface_row(44), Some(FLOOR_ROW));
        }

        #[test]
        fn test_split_rows_drop_by_rows_cleared_below() {
            let mut field = GameField::new();
            // Full rows at BOTTOM and BOTTOM - 2 with a survivor between them.
            field.fill_cells(row_cells(BOTTOM, PieceKind::O));
            field.fill_cells(row_cells(BOTTOM - 2, PieceKind::O));
            field.fill_cells([
                Cell::new(BOTTOM - 1, 41, PieceKind::L),
                Cell::new(BOTTOM - 3, 50, PieceKind::J),
            ]);

            assert_eq!(field.reshape(), 2);

            let f = field.field();
            assert_eq!(f.block_at(BOTTOM, 41), Block::Filled(PieceKind::L));
            assert_eq!(f.block_at(BOTTOM - 1, 50), Block::Filled(PieceKind::J));
            assert_eq!(f.filled_cells().count(), 2);
        }

        #[test]
        fn test_four_rows() {
            let mut field = GameField::new();
            for row in BOTTOM - 3..=BOTTOM {
                field.fill_cells(row_cells(row, PieceKind::I));
            }
            field.fill_cells([Cell::new(BOTTOM - 4, 45, PieceKind::T)]);

            assert_eq!(field.reshape(), 4);
            assert_eq!(field.field().block_at(BOTTOM, 45), Block::Filled(PieceKind::T));
            assert_eq!(field.field().filled_cells().count(), 1);
            assert_eq!(field.reshape(), 0);
        }
    }
}
