pub mod guide;
pub mod home;
pub mod interview;

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::models::Question;
use crate::tui::theme::Palette;

/// Question heading, answer body and tag line shared by every answer pane.
pub fn answer_lines<'a>(q: &'a Question, palette: &Palette) -> Vec<Line<'a>> {
    let mut text = vec![
        Line::from(Span::styled(
            q.question.as_str(),
            Style::default()
                .fg(palette.highlight)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    text.extend(
        q.answer
            .lines()
            .map(|line| Line::from(Span::styled(line, Style::default().fg(palette.fg)))),
    );
    text.push(Line::from(""));
    text.push(Line::from(
        q.tags
            .iter()
            .map(|tag| Span::styled(format!("#{} ", tag), Style::default().fg(palette.accent)))
            .collect::<Vec<_>>(),
    ));
    text
}
