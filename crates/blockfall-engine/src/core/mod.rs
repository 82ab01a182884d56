//! Field geometry, piece geometry and the settled-block store.
//!
//! All coordinates are absolute `(row, col)` pairs. The playable area sits
//! inside a one-cell border: the roof above it, the walls left and right, and
//! the floor below. Code outside this module never needs the raw numbers
//! below; it asks [`Field`], [`Skyline`] and [`Piece`] instead.
//!
//! ```text
//!        col 40                  col 51
//!   row 14 +-- roof ----------------+
//!   row 15 |  spawn row             |
//!          |  playable 20 x 10      |
//!   row 34 |                        |
//!   row 35 +-- floor ---------------+
//! ```

pub use self::{cell::*, field::*, piece::*, skyline::*};

pub(crate) mod cell;
pub(crate) mod field;
pub(crate) mod piece;
pub(crate) mod skyline;

/// Roof row. Any cell at or above it is out of bounds.
pub const CEILING_ROW: i32 = 14;
/// Left wall column. Any cell at or left of it is out of bounds.
pub const LEFT_WALL_COL: i32 = 40;
/// Rows from the roof down to the last playable row, inclusive.
pub const FIELD_ROWS: i32 = 21;
/// Columns from the left wall to the last playable column, inclusive.
pub const FIELD_COLS: i32 = 11;

/// First row below the playable area.
pub const FLOOR_ROW: i32 = CEILING_ROW + FIELD_ROWS;
/// First column right of the playable area.
pub const RIGHT_WALL_COL: i32 = LEFT_WALL_COL + FIELD_COLS;
/// Topmost playable row. Pieces spawn here; locking a cell here ends the game.
pub const TOP_PLAYABLE_ROW: i32 = CEILING_ROW + 1;
/// Leftmost playable column.
pub const FIRST_PLAYABLE_COL: i32 = LEFT_WALL_COL + 1;

pub const PLAYABLE_WIDTH: usize = (FIELD_COLS - 1) as usize;
pub const PLAYABLE_HEIGHT: usize = (FLOOR_ROW - TOP_PLAYABLE_ROW) as usize;

pub(crate) const SPAWN_ROW: i32 = TOP_PLAYABLE_ROW;
pub(crate) const SPAWN_COL: i32 = 45;
