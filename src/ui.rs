use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::session::Outcome;
use crate::theme::Palette;

const HORIZONTAL_MARGIN: u16 = 5;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = self.theme.palette();

        // Paint the themed background first; everything else draws over it.
        Block::default()
            .style(Style::default().bg(palette.bg).fg(palette.fg))
            .render(area, buf);

        if self.session.has_finished() {
            render_results(self, palette, area, buf);
        } else {
            render_typing(self, palette, area, buf);
        }
    }
}

fn render_typing(app: &App, palette: &Palette, area: Rect, buf: &mut Buffer) {
    let session = &app.session;

    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2);
    let prompt_occupied_lines = if session.target.width() <= max_chars_per_line as usize {
        1
    } else {
        ((session.target.width() as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Fill(1),
                Constraint::Length(2),
                Constraint::Length(prompt_occupied_lines),
                Constraint::Fill(1),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(area);

    header(app, palette).render(chunks[0], buf);
    stats_line(app, palette).render(chunks[2], buf);

    let cursor = session.cursor_pos();
    let spans = session
        .outcomes()
        .enumerate()
        .map(|(idx, (expected, outcome))| {
            let mut style = match outcome {
                Outcome::Correct => Style::default()
                    .fg(palette.correct)
                    .add_modifier(Modifier::BOLD),
                Outcome::Incorrect => Style::default()
                    .fg(palette.incorrect)
                    .add_modifier(Modifier::BOLD),
                Outcome::Untyped => Style::default().fg(palette.untyped),
            };
            if idx == cursor {
                style = style.add_modifier(Modifier::UNDERLINED);
            }

            // A mistyped space has no glyph to carry the color; mark it.
            let glyph = match (expected, outcome) {
                (' ', Outcome::Incorrect) => "·".to_owned(),
                (c, _) => c.to_string(),
            };
            Span::styled(glyph, style)
        })
        .collect::<Vec<Span>>();

    Paragraph::new(Line::from(spans))
        .alignment(if prompt_occupied_lines == 1 {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true })
        .render(chunks[3], buf);

    let hints = if session.is_active() {
        "ctrl-t theme · esc quit"
    } else {
        "type to start · ↑/↓ words · tab new test · ctrl-t theme · esc quit"
    };
    Paragraph::new(Span::styled(hints, Style::default().fg(palette.hint)))
        .alignment(Alignment::Center)
        .render(chunks[5], buf);
}

fn render_results(app: &App, palette: &Palette, area: Rect, buf: &mut Buffer) {
    let session = &app.session;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Fill(1),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Fill(1),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(area);

    header(app, palette).render(chunks[0], buf);

    let banner = format!(
        "You completed the {}-word test in {}s, typing at {} wpm with {}% accuracy.",
        session.word_count, session.elapsed_secs, session.wpm, session.accuracy,
    );
    Paragraph::new(Span::styled(banner, Style::default().fg(palette.fg)))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[2], buf);

    Paragraph::new(Span::styled(
        format!(
            "{} wpm   {}% acc   {}s",
            session.wpm, session.accuracy, session.elapsed_secs
        ),
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .render(chunks[3], buf);

    Paragraph::new(Span::styled(
        "(n) new test · ↑/↓ words · ctrl-t theme · esc quit",
        Style::default().fg(palette.hint),
    ))
    .alignment(Alignment::Center)
    .render(chunks[5], buf);
}

fn header<'a>(app: &App, palette: &Palette) -> Paragraph<'a> {
    Paragraph::new(Line::from(vec![
        Span::styled(
            "typemeter",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {} words · {}", app.word_count, app.theme),
            Style::default().fg(palette.hint),
        ),
    ]))
}

fn stats_line<'a>(app: &App, palette: &Palette) -> Paragraph<'a> {
    let session = &app.session;
    Paragraph::new(Span::styled(
        format!(
            "{}s   {} wpm   {}% acc",
            session.elapsed_secs, session.wpm, session.accuracy
        ),
        Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
}
