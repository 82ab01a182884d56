use std::iter;

use blockfall_engine::{Block, FIRST_PLAYABLE_COL, Field, Piece, TOP_PLAYABLE_ROW};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::BlockDisplay;

type Grid = [[Block; Field::WIDTH]; Field::HEIGHT];

/// The playable area with the active piece drawn over the settled blocks.
#[derive(Debug)]
pub struct FieldDisplay<'a> {
    field: &'a Field,
    active_piece: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> FieldDisplay<'a> {
    pub fn new(field: &'a Field) -> Self {
        Self {
            field,
            active_piece: None,
            block: None,
        }
    }

    pub fn active_piece(self, piece: Piece) -> Self {
        Self {
            active_piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        10 * BlockDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        20 * BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }

    fn grid(&self) -> Grid {
        let mut grid = [[Block::Empty; Field::WIDTH]; Field::HEIGHT];
        for (grid_row, row) in iter::zip(&mut grid, self.field.rows()) {
            grid_row.copy_from_slice(row);
        }
        for cell in self.active_piece.iter().flat_map(Piece::cells) {
            let y = usize::try_from(cell.row - TOP_PLAYABLE_ROW).ok();
            let x = usize::try_from(cell.col - FIRST_PLAYABLE_COL).ok();
            if let Some(square) = y
                .zip(x)
                .and_then(|(y, x)| grid.get_mut(y).and_then(|row| row.get_mut(x)))
            {
                *square = Block::Filled(cell.kind);
            }
        }
        grid
    }
}

impl Widget for FieldDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &FieldDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints =
            (0..Field::WIDTH).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints =
            (0..Field::HEIGHT).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<{ Field::HEIGHT }>(&vertical)
            .into_iter()
            .map(|row| row.layout::<{ Field::WIDTH }>(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, self.grid()) {
            for (grid_cell, block) in iter::zip(grid_row, row) {
                BlockDisplay::from_block(block, true).render(grid_cell, buf);
            }
        }
    }
}
