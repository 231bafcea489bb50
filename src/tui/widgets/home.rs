use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::tui::theme::Palette;
use crate::tui::App;

const HERO_TITLE: &str = "Frontend Mastery";
const HERO_TAGLINE: &str = "Master modern frontend development with comprehensive tutorials, interactive examples, and interview preparation";

pub fn draw(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Hero
            Constraint::Min(0),    // Subjects + stats
        ])
        .split(area);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    draw_hero(f, palette, chunks[0]);
    draw_subjects(f, app, palette, bottom[0]);
    draw_stats(f, app, palette, bottom[1]);
}

fn draw_hero(f: &mut Frame, palette: &Palette, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            HERO_TITLE,
            Style::default()
                .fg(palette.highlight)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(HERO_TAGLINE, Style::default().fg(palette.fg))),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border));

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn draw_subjects(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let items: Vec<ListItem> = app
        .subjects
        .items
        .iter()
        .map(|subject| {
            let detail = match app.library().guide(subject.slug()) {
                Ok(guide) => format!("{} topics", guide.topics.len()),
                Err(_) => format!("{} questions", app.stats.total_questions),
            };

            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<4}", subject.icon()),
                    Style::default().fg(palette.accent),
                ),
                Span::styled(
                    format!("{:<18}", subject.title()),
                    Style::default().fg(palette.fg),
                ),
                Span::styled(detail, Style::default().fg(palette.muted)),
            ]))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(" Explore Topics ")
        .title_style(Style::default().fg(palette.accent));

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(palette.highlight)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(app.subjects.selected);
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_stats(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let stats = &app.stats;
    let label = Style::default().fg(palette.muted);
    let value = Style::default().fg(palette.fg).add_modifier(Modifier::BOLD);

    let mut text = vec![
        Line::from(vec![
            Span::styled("Guides: ", label),
            Span::styled(stats.guides.to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("Topics: ", label),
            Span::styled(
                format!("{} ({} lessons)", stats.topics, stats.subtopics),
                value,
            ),
        ]),
        Line::from(vec![
            Span::styled("Code examples: ", label),
            Span::styled(stats.code_examples.to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("Interview questions: ", label),
            Span::styled(stats.total_questions.to_string(), value),
        ]),
        Line::from(""),
    ];

    text.extend(stats.by_category.iter().map(|entry| {
        Line::from(vec![
            Span::styled(format!("  {:<12}", entry.label), label),
            Span::styled(entry.count.to_string(), Style::default().fg(palette.accent)),
        ])
    }));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(" Stats ")
        .title_style(Style::default().fg(palette.accent));

    let paragraph = Paragraph::new(text).block(block);
    f.render_widget(paragraph, area);
}
