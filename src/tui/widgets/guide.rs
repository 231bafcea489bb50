use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::models::{Guide, Question, Subtopic};
use crate::tui::theme::Palette;
use crate::tui::{App, GuideFocus, GuideRow, GuideState};

use super::answer_lines;
use crate::truncate;

pub fn draw(f: &mut Frame, app: &App, palette: &Palette, index: usize, area: Rect) {
    let (Some(guide), Some(state)) = (app.library().guides().get(index), app.guides.get(index))
    else {
        let block = Block::default().borders(Borders::ALL).title(" Guide ");
        let paragraph = Paragraph::new("No guide selected").block(block);
        f.render_widget(paragraph, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[0]);

    draw_outline(f, guide, state, palette, left[0]);
    draw_practice(f, state, palette, left[1]);

    if state.focus == GuideFocus::Questions {
        if let Some(q) = state.revealed_question() {
            draw_answer(f, q, state.content_scroll, palette, chunks[1]);
            return;
        }
    }

    let open = state
        .expanded_topic
        .zip(state.expanded_subtopic)
        .and_then(|(t, s)| guide.topics.get(t)?.subtopics.get(s));
    match open {
        Some(subtopic) => draw_subtopic(f, subtopic, state.content_scroll, palette, chunks[1]),
        None => draw_overview(f, guide, palette, chunks[1]),
    }
}

fn focus_border(focused: bool, palette: &Palette) -> Style {
    if focused {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.border)
    }
}

fn draw_outline(f: &mut Frame, guide: &Guide, state: &GuideState, palette: &Palette, area: Rect) {
    let width = area.width.saturating_sub(8) as usize;

    let items: Vec<ListItem> = state
        .rows(guide)
        .into_iter()
        .filter_map(|row| match row {
            GuideRow::Topic(t) => {
                let topic = guide.topics.get(t)?;
                let marker = if state.expanded_topic == Some(t) {
                    "▾ "
                } else {
                    "▸ "
                };
                Some(ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(palette.accent)),
                    Span::styled(
                        truncate(&topic.title, width),
                        Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
                    ),
                ])))
            }
            GuideRow::Subtopic(t, s) => {
                let subtopic = guide.topics.get(t)?.subtopics.get(s)?;
                let style = if state.expanded_subtopic == Some(s) {
                    Style::default().fg(palette.highlight)
                } else {
                    Style::default().fg(palette.muted)
                };
                Some(ListItem::new(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(truncate(&subtopic.title, width.saturating_sub(2)), style),
                ])))
            }
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_border(state.focus == GuideFocus::Outline, palette))
        .title(format!(" {} ", guide.title))
        .title_style(
            Style::default()
                .fg(palette.highlight)
                .add_modifier(Modifier::BOLD),
        );

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut list_state = ListState::default();
    if state.focus == GuideFocus::Outline {
        list_state.select(Some(state.cursor));
    }
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_practice(f: &mut Frame, state: &GuideState, palette: &Palette, area: Rect) {
    let width = area.width.saturating_sub(8) as usize;

    let items: Vec<ListItem> = state
        .questions
        .items
        .iter()
        .map(|q| {
            let marker = if state.revealed == Some(q.id) {
                "▾ "
            } else {
                "▸ "
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(palette.accent)),
                Span::styled(
                    truncate(&q.question, width),
                    Style::default().fg(palette.difficulty(q.difficulty)),
                ),
            ]))
        })
        .collect();

    let focused = state.focus == GuideFocus::Questions;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_border(focused, palette))
        .title(format!(" Interview Questions ({}) ", state.questions.items.len()))
        .title_style(Style::default().fg(palette.accent));

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut list_state = ListState::default();
    if focused {
        list_state.select(state.questions.selected);
    }
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_answer(f: &mut Frame, q: &Question, scroll: u16, palette: &Palette, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(" Answer ")
        .title_style(Style::default().fg(palette.accent));

    let paragraph = Paragraph::new(answer_lines(q, palette))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(paragraph, area);
}

fn draw_overview(f: &mut Frame, guide: &Guide, palette: &Palette, area: Rect) {
    let mut text = vec![
        Line::from(Span::styled(
            guide.description.as_str(),
            Style::default().fg(palette.fg),
        )),
        Line::from(""),
    ];

    for topic in &guide.topics {
        text.push(Line::from(vec![
            Span::styled("• ", Style::default().fg(palette.accent)),
            Span::styled(topic.title.as_str(), Style::default().fg(palette.fg)),
            Span::styled(
                format!("  ({} lessons)", topic.subtopics.len()),
                Style::default().fg(palette.muted),
            ),
        ]));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(format!(" {} ", guide.subject))
        .title_style(Style::default().fg(palette.accent));

    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn draw_subtopic(f: &mut Frame, subtopic: &Subtopic, scroll: u16, palette: &Palette, area: Rect) {
    let mut text: Vec<Line> = subtopic
        .content
        .lines()
        .map(|line| Line::from(Span::styled(line, Style::default().fg(palette.fg))))
        .collect();

    if !subtopic.example.is_empty() {
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            "Example",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )));
        text.extend(
            subtopic
                .example
                .lines()
                .map(|line| Line::from(Span::styled(line, Style::default().fg(palette.code)))),
        );
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(format!(" {} ", subtopic.title))
        .title_style(
            Style::default()
                .fg(palette.highlight)
                .add_modifier(Modifier::BOLD),
        );

    // Code keeps its indentation, so no trimming on wrap
    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(paragraph, area);
}
