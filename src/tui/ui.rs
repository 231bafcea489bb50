use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use super::theme::Palette;
use super::widgets::{guide, home, interview};
use super::{App, View};

pub fn draw(f: &mut Frame, app: &App) {
    let palette = Palette::for_theme(app.theme);

    // Background first so the light theme covers the whole terminal
    f.render_widget(
        Block::default().style(Style::default().bg(palette.bg).fg(palette.fg)),
        f.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Help bar
        ])
        .split(f.area());

    draw_tabs(f, app, &palette, chunks[0]);
    draw_content(f, app, &palette, chunks[1]);
    draw_help_bar(f, app, &palette, chunks[2]);
}

fn draw_tabs(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let guides = app.library().guides();
    let mut tab_titles = vec!["Home".to_string()];
    tab_titles.extend(guides.iter().map(|g| g.subject.clone()));
    tab_titles.push("Interview".to_string());

    let selected = match app.view {
        View::Home => 0,
        View::Guide(i) => i + 1,
        View::Interview => guides.len() + 1,
    };

    let tabs = Tabs::new(tab_titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border))
                .title(format!(" Frontend Guide [{}] ", app.theme.as_str())),
        )
        .select(selected)
        .style(Style::default().fg(palette.fg))
        .highlight_style(
            Style::default()
                .fg(palette.highlight)
                .add_modifier(Modifier::BOLD),
        );

    f.render_widget(tabs, area);
}

fn draw_content(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    match app.view {
        View::Home => home::draw(f, app, palette, area),
        View::Guide(i) => guide::draw(f, app, palette, i, area),
        View::Interview => interview::draw(f, app, palette, area),
    }
}

fn draw_help_bar(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let key = Style::default().fg(palette.accent);

    let help_text = if app.interview.search_mode {
        vec![
            Span::styled("/", Style::default().fg(palette.highlight)),
            Span::raw(app.interview.criteria.search_term.as_str()),
            Span::styled("█", Style::default().fg(palette.highlight)),
            Span::raw(" | "),
            Span::styled("<CR>", key),
            Span::raw(" Keep  "),
            Span::styled("<Esc>", key),
            Span::raw(" Clear"),
        ]
    } else {
        let mut spans = vec![Span::styled("h/l", key), Span::raw(" Views  ")];

        match app.view {
            View::Home => {
                spans.extend(vec![
                    Span::styled("j/k", key),
                    Span::raw(" Nav  "),
                    Span::styled("<CR>", key),
                    Span::raw(" Open  "),
                ]);
            }
            View::Guide(_) => {
                spans.extend(vec![
                    Span::styled("j/k", key),
                    Span::raw(" Nav  "),
                    Span::styled("<CR>", key),
                    Span::raw(" Expand  "),
                    Span::styled("i", key),
                    Span::raw(" Questions  "),
                    Span::styled("PgUp/PgDn", key),
                    Span::raw(" Scroll  "),
                    Span::styled("<Esc>", key),
                    Span::raw(" Collapse  "),
                ]);
            }
            View::Interview => {
                spans.extend(vec![
                    Span::styled("j/k", key),
                    Span::raw(" Nav  "),
                    Span::styled("<CR>", key),
                    Span::raw(" Answer  "),
                    Span::styled("/", key),
                    Span::raw(" Search  "),
                    Span::styled("f", key),
                    Span::raw(" Filters  "),
                    Span::styled("c/d/t", key),
                    Span::raw(" Cycle  "),
                ]);
                if !app.interview.criteria.is_unconstrained() {
                    spans.extend(vec![Span::styled("x", key), Span::raw(" Reset  ")]);
                }
            }
        }

        spans.extend(vec![
            Span::styled("T", key),
            Span::raw(" Theme  "),
            Span::styled("q", key),
            Span::raw(" Quit"),
        ]);

        spans
    };

    let help = Paragraph::new(Line::from(help_text))
        .style(Style::default().bg(palette.bar_bg).fg(palette.fg));

    f.render_widget(help, area);
}
