use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::filter::Selection;
use crate::models::Question;
use crate::tui::theme::Palette;
use crate::tui::App;

use super::answer_lines;
use crate::truncate;

pub fn draw(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let filter_height = if app.interview.show_filters { 3 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Search box
            Constraint::Length(filter_height), // Filter panel
            Constraint::Length(1),             // Result count
            Constraint::Min(0),                // Questions + answer
        ])
        .split(area);

    draw_search(f, app, palette, chunks[0]);
    if app.interview.show_filters {
        draw_filters(f, app, palette, chunks[1]);
    }
    draw_count(f, app, palette, chunks[2]);

    if app.interview.results.items.is_empty() {
        draw_empty(f, palette, chunks[3]);
        return;
    }

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[3]);

    draw_questions(f, app, palette, body[0]);
    draw_answer(f, app, palette, body[1]);
}

fn draw_search(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let term = &app.interview.criteria.search_term;
    let line = if app.interview.search_mode {
        Line::from(vec![
            Span::styled(term.as_str(), Style::default().fg(palette.fg)),
            Span::styled("█", Style::default().fg(palette.highlight)),
        ])
    } else if term.is_empty() {
        Line::from(Span::styled(
            "Search questions, answers, or tags... (press /)",
            Style::default().fg(palette.muted),
        ))
    } else {
        Line::from(Span::styled(term.as_str(), Style::default().fg(palette.fg)))
    };

    let border = if app.interview.search_mode {
        palette.highlight
    } else {
        palette.border
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Search ")
        .title_style(Style::default().fg(palette.accent));

    f.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_filters(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let criteria = &app.interview.criteria;
    let key = Style::default().fg(palette.accent);

    let value = |selection: &Selection| {
        let style = match selection {
            Selection::All => Style::default().fg(palette.muted),
            Selection::Only(_) => Style::default()
                .fg(palette.highlight)
                .add_modifier(Modifier::BOLD),
        };
        Span::styled(format!("{:<14}", selection.as_str()), style)
    };

    let line = Line::from(vec![
        Span::styled("[c] ", key),
        Span::raw("Category: "),
        value(&criteria.category),
        Span::styled("[d] ", key),
        Span::raw("Difficulty: "),
        value(&criteria.difficulty),
        Span::styled("[t] ", key),
        Span::raw("Time: "),
        value(&criteria.time_to_answer),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(" Filters ")
        .title_style(Style::default().fg(palette.accent));

    f.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_count(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let text = format!(
        " Showing {} of {} questions",
        app.interview.results.items.len(),
        app.stats.total_questions
    );
    f.render_widget(
        Paragraph::new(Span::styled(text, Style::default().fg(palette.muted))),
        area,
    );
}

fn draw_empty(f: &mut Frame, palette: &Palette, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No questions found",
            Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Try adjusting your search terms or filters",
            Style::default().fg(palette.muted),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border));

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

fn draw_questions(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let width = area.width.saturating_sub(8) as usize;

    let items: Vec<ListItem> = app
        .interview
        .results
        .items
        .iter()
        .map(|q| {
            let marker = if app.interview.expanded == Some(q.id) {
                "▾ "
            } else {
                "▸ "
            };

            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(marker, Style::default().fg(palette.accent)),
                    Span::styled(
                        format!("{} ", q.category.icon()),
                        Style::default().fg(palette.accent),
                    ),
                    Span::styled(truncate(&q.question, width), Style::default().fg(palette.fg)),
                ]),
                metadata_line(q, palette),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(" Questions ")
        .title_style(Style::default().fg(palette.accent));

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    state.select(app.interview.results.selected);
    f.render_stateful_widget(list, area, &mut state);
}

fn metadata_line<'a>(q: &'a Question, palette: &Palette) -> Line<'a> {
    let muted = Style::default().fg(palette.muted);
    Line::from(vec![
        Span::raw("    "),
        Span::styled(
            q.difficulty.as_str(),
            Style::default().fg(palette.difficulty(q.difficulty)),
        ),
        Span::styled(" · ", muted),
        Span::styled(q.category.as_str(), muted),
        Span::styled(" · ", muted),
        Span::styled(q.time_to_answer.as_str(), muted),
        Span::styled(" · ", muted),
        Span::styled(q.frequency.as_str(), muted),
    ])
}

fn draw_answer(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(" Answer ")
        .title_style(Style::default().fg(palette.accent));

    let Some(q) = app.interview.expanded_question() else {
        let paragraph = Paragraph::new(Span::styled(
            "Press Enter to reveal the answer",
            Style::default().fg(palette.muted),
        ))
        .block(block);
        f.render_widget(paragraph, area);
        return;
    };

    let paragraph = Paragraph::new(answer_lines(q, palette))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.interview.answer_scroll, 0));
    f.render_widget(paragraph, area);
}
