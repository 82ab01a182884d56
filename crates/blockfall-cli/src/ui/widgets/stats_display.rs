use std::iter;

use blockfall_engine::Progression;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::style;

pub struct StatsDisplay<'a> {
    progression: &'a Progression,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatsDisplay<'a> {
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
        u16::try_from(ROWS.len()).unwrap() + super::block_vertical_margin(self.block.as_ref())
    }
}

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(fn(&Progression) -> String),
    LabelValue(&'static str, fn(&Progression) -> String),
}

const ROWS: &[Row] = &[
    Row::FullLabel("SCORE:"),
    Row::FullValue(|p| p.score().to_string()),
    Row::Empty,
    Row::LabelValue("LEVEL:", |p| p.level().to_string()),
    Row::LabelValue("LINES:", |p| p.destroyed_lines().to_string()),
    Row::LabelValue("SPEED:", |p| format!("{}ms", p.fall_interval_ms())),
    Row::Empty,
    Row::LabelValue("SINGLES:", |p| p.line_cleared_counter()[1].to_string()),
    Row::LabelValue("DOUBLES:", |p| p.line_cleared_counter()[2].to_string()),
    Row::LabelValue("TRIPLES:", |p| p.line_cleared_counter()[3].to_string()),
    Row::LabelValue("TETRIS:", |p| p.line_cleared_counter()[4].to_string()),
];

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;

        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas.iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(self.progression), style)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(self.progression), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}
