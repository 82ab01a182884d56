use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

use super::piece::PieceKind;

/// A single square on the field, tagged with the kind of piece it belongs to.
///
/// Identity is the position alone: two cells at the same `(row, col)` are
/// equal, ordered and hashed the same whatever their kind. The kind only
/// decides the color a settled block is drawn with.
#[derive(Debug, Clone, Copy)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
    pub kind: PieceKind,
}

impl Cell {
    #[must_use]
    pub const fn new(row: i32, col: i32, kind: PieceKind) -> Self {
        Self { row, col, kind }
    }

    #[must_use]
    pub const fn position(&self) -> (i32, i32) {
        (self.row, self.col)
    }

    #[must_use]
    pub const fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
            kind: self.kind,
        }
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.position() == other.position()
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.position().hash(state);
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> Ordering {
        self.position().cmp(&other.position())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_identity_ignores_kind() {
        let a = Cell::new(20, 45, PieceKind::T);
        let b = Cell::new(20, 45, PieceKind::I);
        assert_eq!(a, b);

        let set: HashSet<_> = [a].into_iter().collect();
        assert!(set.contains(&b));
    }

    #[test]
    fn test_ordering_is_row_major() {
        let mut cells = [
            Cell::new(16, 41, PieceKind::O),
            Cell::new(15, 50, PieceKind::O),
            Cell::new(15, 42, PieceKind::O),
        ];
        cells.sort();
        let positions: Vec<_> = cells.iter().map(Cell::position).collect();
        assert_eq!(positions, [(15, 42), (15, 50), (16, 41)]);
    }

    #[test]
    fn test_offset_keeps_kind() {
        let cell = Cell::new(15, 45, PieceKind::Z).offset(2, -1);
        assert_eq!(cell.position(), (17, 44));
        assert_eq!(cell.kind, PieceKind::Z);
    }
}
