use blockfall_engine::{Block, PieceKind, Progression};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::{BlockDisplay, style};

/// Landed piece counts, one row per kind.
pub struct PieceStatisticsDisplay<'a> {
    progression: &'a Progression,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceStatisticsDisplay<'a> {
    pub fn new(progression: &'a Progression) -> Self {
        Self {
            progression,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        20 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        // one extra row for the total
        u16::try_from(PieceKind::LEN + 1).unwrap()
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PieceStatisticsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;
        let row_areas = area.layout::<{ PieceKind::LEN + 1 }>(&Layout::vertical(
            [Constraint::Length(1); PieceKind::LEN + 1],
        ));
        let total_area = row_areas[PieceKind::LEN];

        for (kind, row_area) in PieceKind::ALL.into_iter().zip(row_areas) {
            let [block_area, label_area, count_area] = row_area.layout(&Layout::horizontal([
                Constraint::Length(BlockDisplay::width()),
                Constraint::Length(3),
                Constraint::Fill(1),
            ]));
            BlockDisplay::from_block(Block::Filled(kind), false).render(block_area, buf);
            Line::styled(format!(" {}", kind.as_char()), style).render(label_area, buf);
            Line::styled(self.progression.piece_count(kind).to_string(), style)
                .right_aligned()
                .render(count_area, buf);
        }

        let [label_area, count_area] = total_area.layout(&Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Fill(1),
        ]));
        Line::styled("TOTAL:", style)
            .left_aligned()
            .render(label_area, buf);
        Line::styled(self.progression.total_pieces().to_string(), style)
            .right_aligned()
            .render(count_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_counts_per_kind() {
        let mut progression = Progression::new(0);
        progression.update_statistics(PieceKind::O);
        progression.update_statistics(PieceKind::O);
        progression.update_statistics(PieceKind::T);

        let display = PieceStatisticsDisplay::new(&progression);
        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);

        let line = |y: u16| -> String { (0..area.width).map(|x| buf[(x, y)].symbol()).collect() };
        let o_row = PieceKind::ALL
            .iter()
            .position(|&kind| kind == PieceKind::O)
            .unwrap();
        let o_line = line(u16::try_from(o_row).unwrap());
        assert!(o_line.contains('O'));
        assert!(o_line.ends_with('2'));
        assert!(line(7).starts_with("TOTAL:"));
        assert!(line(7).ends_with('3'));
    }
}
