use std::iter;

use crate::core::{
    CEILING_ROW, FLOOR_ROW, LEFT_WALL_COL, RIGHT_WALL_COL,
    cell::Cell,
    field::Field,
    piece::{Motion, Piece},
    skyline::Skyline,
};

/// What a tentatively moved piece ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Collision {
    /// Free to stay where it is.
    None,
    /// A cell is in or beyond a side wall.
    Wall,
    /// A cell is in or above the roof row.
    Roof,
    /// A cell is in or below the floor row.
    Floor,
    /// A cell overlaps, or a rotation swept through, a settled block.
    Block,
    /// A downward move reached the top of a column.
    Surface,
}

impl Collision {
    /// Whether a piece that produced this result while performing `motion`
    /// settles at its previous position.
    #[must_use]
    pub fn lands(self, motion: Motion) -> bool {
        motion.is_down()
            && matches!(
                self,
                Collision::Surface | Collision::Block | Collision::Floor
            )
    }
}

/// Classifies `piece`, which has already been moved by `motion` from `prior`.
///
/// Rotations are first swept cell by cell from the prior to the new
/// position so that a piece cannot turn through a settled block. Then each
/// cell is checked in order and the first match wins: wall, surface (only
/// for downward motion), roof, block, floor.
#[must_use]
pub fn classify(
    piece: &Piece,
    motion: Motion,
    prior: &[Cell; Piece::SIZE],
    field: &Field,
    skyline: &Skyline,
) -> Collision {
    if motion.is_rotation() && sweeps_through_block(prior, piece.cells(), field) {
        return Collision::Block;
    }

    for cell in piece.cells() {
        if cell.col <= LEFT_WALL_COL || cell.col >= RIGHT_WALL_COL {
            return Collision::Wall;
        }
        // A sideways slide over the surface must not settle the piece.
        if motion.is_down() && skyline.contains(cell) {
            return Collision::Surface;
        }
        if cell.row <= CEILING_ROW {
            return Collision::Roof;
        }
        if field.is_occupied(cell.row, cell.col) {
            return Collision::Block;
        }
        if cell.row >= FLOOR_ROW {
            return Collision::Floor;
        }
    }
    Collision::None
}

fn sweeps_through_block(prior: &[Cell], current: &[Cell], field: &Field) -> bool {
    iter::zip(prior, current).any(|(from, to)| {
        sweep_path(*from, *to).any(|(row, col)| field.is_occupied(row, col))
    })
}

/// Unit steps from `from` to `to`: rows first, then columns. Excludes
/// `from`, includes `to`.
fn sweep_path(from: Cell, to: Cell) -> impl Iterator<Item = (i32, i32)> {
    let row_step = (to.row - from.row).signum();
    let col_step = (to.col - from.col).signum();
    let vertical =
        (1..=(to.row - from.row).abs()).map(move |i| (from.row + i * row_step, from.col));
    let horizontal =
        (1..=(to.col - from.col).abs()).map(move |i| (to.row, from.col + i * col_step));
    vertical.chain(horizontal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{TOP_PLAYABLE_ROW, piece::PieceKind};

    fn moved(piece: &Piece, motion: Motion) -> Piece {
        let mut piece = *piece;
        piece.apply(motion);
        piece
    }

    fn check(piece: &Piece, motion: Motion, field: &Field) -> Collision {
        let next = moved(piece, motion);
        classify(&next, motion, piece.cells(), field, &Skyline::compute(field))
    }

    fn field_with(cells: &[(i32, i32)]) -> Field {
        let mut field = Field::new();
        for &(row, col) in cells {
            field.set(Cell::new(row, col, PieceKind::O), true);
        }
        field
    }

    /// T piece pivoting on (23, 46) with open space all around.
    fn floating_t() -> Piece {
        let mut piece = Piece::spawn(PieceKind::T);
        piece.translate(8, 0);
        piece
    }

    mod bounds {
        use super::*;

        #[test]
        fn test_free_move() {
            let field = Field::new();
            for motion in [Motion::Left, Motion::Right, Motion::Down, Motion::RotateLeft] {
                assert_eq!(check(&floating_t(), motion, &field), Collision::None);
            }
        }

        #[test]
        fn test_walls() {
            let field = Field::new();
            let mut piece = Piece::spawn(PieceKind::O);
            piece.translate(5, -4);
            assert_eq!(piece.cells()[0].col, LEFT_WALL_COL + 1);
            assert_eq!(check(&piece, Motion::Left, &field), Collision::Wall);

            let mut piece = Piece::spawn(PieceKind::I);
            piece.translate(5, 3);
            assert_eq!(piece.cells()[3].col, RIGHT_WALL_COL - 1);
            assert_eq!(check(&piece, Motion::Right, &field), Collision::Wall);
        }

        #[test]
        fn test_roof_on_rotation_at_spawn() {
            let field = Field::new();
            let piece = Piece::spawn(PieceKind::I);
            assert_eq!(check(&piece, Motion::RotateRight, &field), Collision::Roof);
            assert_eq!(piece.cells()[0].row, TOP_PLAYABLE_ROW);
        }

        #[test]
        fn test_floor_on_rotation() {
            let field = Field::new();
            let mut piece = Piece::spawn(PieceKind::I);
            piece.translate(FLOOR_ROW - 1 - TOP_PLAYABLE_ROW, 0);
            assert_eq!(check(&piece, Motion::RotateRight, &field), Collision::Floor);
        }

        #[test]
        fn test_surface_of_empty_column_is_floor_row() {
            let field = Field::new();
            let mut piece = Piece::spawn(PieceKind::I);
            piece.translate(FLOOR_ROW - 1 - TOP_PLAYABLE_ROW, 0);
            assert_eq!(check(&piece, Motion::Down, &field), Collision::Surface);
        }
    }

    mod blocks {
        use super::*;

        #[test]
        fn test_surface_only_on_down() {
            // Column 44 topped at row 24, directly left of the T's first cell.
            let field = field_with(&[(24, 44), (25, 44)]);
            let piece = floating_t();

            assert_eq!(check(&piece, Motion::Left, &field), Collision::None);

            let mut lower = piece;
            lower.translate(0, -1);
            // Cell (23, 44) moving down reaches the top of column 44.
            assert_eq!(check(&lower, Motion::Down, &field), Collision::Surface);
        }

        #[test]
        fn test_sideways_overlap_is_block() {
            let field = field_with(&[(23, 44)]);
            assert_eq!(check(&floating_t(), Motion::Left, &field), Collision::Block);
        }

        #[test]
        fn test_down_into_overhang_is_block() {
            // Overhang: (25, 46) is covered by (20, 46), so it is not on the surface.
            let field = field_with(&[(20, 46), (25, 46)]);
            let piece = floating_t();
            let result = check(&piece, Motion::Down, &field);
            assert_eq!(result, Collision::Block);
            assert!(result.lands(Motion::Down));
        }

        #[test]
        fn test_rotation_sweeps_through_block() {
            // (22, 45) is on the path of the first cell but is not a destination.
            let field = field_with(&[(22, 45)]);
            let piece = floating_t();
            let rotated = moved(&piece, Motion::RotateRight);
            assert!(rotated.cells().iter().all(|c| c.position() != (22, 45)));

            assert_eq!(check(&piece, Motion::RotateRight, &field), Collision::Block);
            // Plain translation does not sweep.
            assert_eq!(check(&piece, Motion::Left, &field), Collision::None);
        }
    }

    mod outcome {
        use super::*;

        #[test]
        fn test_lands_only_when_moving_down() {
            for collision in [Collision::Surface, Collision::Block, Collision::Floor] {
                assert!(collision.lands(Motion::Down));
                assert!(!collision.lands(Motion::Left));
                assert!(!collision.lands(Motion::RotateRight));
            }
            for collision in [Collision::None, Collision::Wall, Collision::Roof] {
                assert!(!collision.lands(Motion::Down));
            }
        }

        #[test]
        fn test_sweep_path_order() {
            let from = Cell::new(23, 45, PieceKind::T);
            let to = Cell::new(21, 47, PieceKind::T);
            let path: Vec<_> = sweep_path(from, to).collect();
            assert_eq!(path, [(22, 45), (21, 45), (21, 46), (21, 47)]);
            assert_eq!(sweep_path(from, from).count(), 0);
        }
    }
}
