use blockfall_engine::{GameSession, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use super::{
    ControlsDisplay, FieldDisplay, PieceDisplay, PieceStatisticsDisplay, StatsDisplay, color,
    style,
};

/// The whole game screen: statistics, field, next piece and key bindings.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    message: Option<&'static str>,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            message: None,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    /// Short notice shown under the field, such as the last line clear.
    pub fn message(self, message: Option<&'static str>) -> Self {
        Self { message, ..self }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);
        let border_style = match self.session.session_state() {
            SessionState::Playing => color::WHITE,
            SessionState::GameOver => color::RED,
        };
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT)
        };

        let progression = self.session.progression();
        let game_field = {
            let mut block = Block::bordered()
                .border_style(border_style)
                .style(style::DEFAULT);
            if let Some(message) = self.message {
                block = block.title_bottom(Line::styled(message, style::HIGHLIGHT).centered());
            }
            let widget = FieldDisplay::new(self.session.field().field()).block(block);
            match self.session.session_state() {
                SessionState::Playing => widget.active_piece(*self.session.active_piece()),
                SessionState::GameOver => widget,
            }
        };
        let next_panel = PieceDisplay::new()
            .piece(self.session.next_kind())
            .block(panel("NEXT"));
        let stats = StatsDisplay::new(progression).block(panel("STATS"));
        let piece_stats = PieceStatisticsDisplay::new(progression).block(panel("PIECES"));
        let controls = ControlsDisplay::new(self.session.config()).block(panel("KEYS"));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(u16::max(stats.width(), piece_stats.width())),
            Constraint::Length(game_field.width()),
            Constraint::Length(u16::max(next_panel.width(), controls.width())),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area, piece_stats_area] = Layout::vertical([
            Constraint::Length(stats.height()),
            Constraint::Length(piece_stats.height()),
        ])
        .spacing(1)
        .areas(left_column);

        let [field_area] =
            Layout::vertical([Constraint::Length(game_field.height())]).areas(center_column);

        let [next_area, controls_area] = Layout::vertical([
            Constraint::Length(next_panel.height()),
            Constraint::Length(controls.height()),
        ])
        .spacing(1)
        .areas(right_column);
        let next_area = next_area.layout::<1>(
            &Layout::horizontal([Constraint::Length(next_panel.width())]).flex(Flex::Start),
        )[0];

        let field_width = game_field.width();
        stats.render(stats_area, buf);
        piece_stats.render(piece_stats_area, buf);
        game_field.render(field_area, buf);
        next_panel.render(next_area, buf);
        controls.render(controls_area, buf);

        if self.session.session_state().is_game_over() {
            let style = Style::new().fg(color::WHITE).bg(color::RED);
            let block = Block::new().style(style);
            let text = Text::styled("GAME OVER!!", style).centered();
            let area = field_area.centered(Constraint::Length(field_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{Cell, GameConfig, Motion, MoveOrigin, PieceKind, PieceSeed};

    use super::*;

    fn new_session() -> GameSession {
        GameSession::with_seed(GameConfig::default(), PieceSeed::from_bytes([7; 16])).unwrap()
    }

    fn screen_text(session: &GameSession, message: Option<&'static str>) -> String {
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        SessionDisplay::new(session).message(message).render(area, &mut buf);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_playing_screen_has_panels() {
        let session = new_session();
        let text = screen_text(&session, Some("LEVEL UP"));

        for title in ["STATS", "PIECES", "NEXT", "KEYS", "LEVEL UP", "SCORE:"] {
            assert!(text.contains(title), "missing {title}");
        }
        assert!(!text.contains("GAME OVER!!"));
    }

    #[test]
    fn test_game_over_shows_popup() {
        let mut session = new_session();
        let tower = (16..35).map(|row| Cell::new(row, 46, PieceKind::I));
        session.field_mut().fill_cells(tower);
        while session.session_state().is_playing() {
            session.apply(Motion::Down, MoveOrigin::Player).unwrap();
        }

        let text = screen_text(&session, None);

        assert!(text.contains("GAME OVER!!"));
    }
}
