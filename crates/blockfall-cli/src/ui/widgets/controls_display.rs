use blockfall_engine::{GameConfig, QUIT_KEY};
use ratatui::{
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

type KeyBinding = (Vec<String>, &'static str);

/// Key bindings of a session, one per line.
#[derive(Debug)]
pub struct ControlsDisplay<'a> {
    bindings: Vec<KeyBinding>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> ControlsDisplay<'a> {
    pub fn new(config: &GameConfig) -> Self {
        let arrow = |s: &str| vec![s.to_owned()];
        let bindings = vec![
            (arrow("←"), "left"),
            (arrow("→"), "right"),
            (arrow("↓"), "down"),
            (vec![config.left_rotation_key.to_string()], "rotate left"),
            (vec![config.right_rotation_key.to_string()], "rotate right"),
            (vec![QUIT_KEY.to_string(), "Esc".to_owned()], "quit"),
        ];
        Self {
            bindings,
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
        16 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        u16::try_from(self.bindings.len()).unwrap()
            + super::block_vertical_margin(self.block.as_ref())
    }

    fn lines(&self) -> impl Iterator<Item = Line<'_>> {
        self.bindings.iter().map(|(keys, desc)| {
            let mut spans = vec![];
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::styled("/", KEY_SEPARATOR_STYLE));
                }
                spans.push(Span::styled(key.as_str(), KEY_STYLE));
            }
            spans.push(Span::from(" "));
            spans.push(Span::styled(*desc, DESCRIPTION_STYLE));
            Line::from(spans)
        })
    }
}

const KEY_STYLE: Style = Style::new().fg(Color::Cyan);
const KEY_SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);
const DESCRIPTION_STYLE: Style = Style::new().fg(Color::White);

impl Widget for ControlsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        for (y, line) in (area.top()..area.bottom()).zip(self.lines()) {
            line.render(Rect { y, height: 1, ..area }, buf);
        }
    }
}
