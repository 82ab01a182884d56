use super::{FIRST_PLAYABLE_COL, FLOOR_ROW, PLAYABLE_WIDTH, cell::Cell, field::Field};

/// Highest settled block of every column.
///
/// An empty column reports [`FLOOR_ROW`]. The skyline is derived data: it
/// must be recomputed from the [`Field`] after every placement or line
/// clear, before the next collision check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skyline {
    rows: [i32; PLAYABLE_WIDTH],
}

impl Default for Skyline {
    fn default() -> Self {
        Self::new()
    }
}

impl Skyline {
    /// Skyline of an empty field.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rows: [FLOOR_ROW; PLAYABLE_WIDTH],
        }
    }

    /// Scans every column top-down for its first occupied square.
    #[must_use]
    pub fn compute(field: &Field) -> Self {
        let mut rows = [FLOOR_ROW; PLAYABLE_WIDTH];
        for (surface, col) in rows.iter_mut().zip(Field::col_range()) {
            if let Some(row) = Field::row_range().find(|&row| field.is_occupied(row, col)) {
                *surface = row;
            }
        }
        Self { rows }
    }

    /// Surface row of `col`, or `None` outside the playable columns.
    #[must_use]
    pub fn surface_row(&self, col: i32) -> Option<i32> {
        let x = usize::try_from(col - FIRST_PLAYABLE_COL).ok()?;
        self.rows.get(x).copied()
    }

    #[must_use]
    pub fn contains(&self, cell: &Cell) -> bool {
        self.surface_row(cell.col) == Some(cell.row)
    }

    /// Surface cells, left to right.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.rows.iter().copied().zip(Field::col_range())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LEFT_WALL_COL, RIGHT_WALL_COL, piece::PieceKind};

    #[test]
    fn test_empty_field_reports_floor() {
        let skyline = Skyline::compute(&Field::new());
        assert_eq!(skyline, Skyline::new());
        assert!(skyline.iter().all(|(row, _)| row == FLOOR_ROW));
        assert!(skyline.contains(&Cell::new(FLOOR_ROW, 45, PieceKind::I)));
    }

    #[test]
    fn test_highest_block_per_column() {
        let mut field = Field::new();
        field.set(Cell::new(30, 41, PieceKind::T), true);
        field.set(Cell::new(33, 41, PieceKind::T), true);
        field.set(Cell::new(34, 50, PieceKind::O), true);

        let skyline = Skyline::compute(&field);
        assert_eq!(skyline.surface_row(41), Some(30));
        assert_eq!(skyline.surface_row(42), Some(FLOOR_ROW));
        assert_eq!(skyline.surface_row(50), Some(34));
        assert!(skyline.contains(&Cell::new(30, 41, PieceKind::I)));
        assert!(!skyline.contains(&Cell::new(33, 41, PieceKind::I)));
    }

    #[test]
    fn test_walls_are_not_columns() {
        let skyline = Skyline::new();
        assert_eq!(skyline.surface_row(LEFT_WALL_COL), None);
        assert_eq!(skyline.surface_row(RIGHT_WALL_COL), None);
        assert!(!skyline.contains(&Cell::new(FLOOR_ROW, LEFT_WALL_COL, PieceKind::I)));
    }
}
