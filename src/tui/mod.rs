mod theme;
mod ui;
mod widgets;

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::content::{Library, Stats};
use crate::filter::{self, FilterCriteria, FilterOptions, Selection};
use crate::models::{Guide, Question, Subject, Theme};

const SCROLL_STEP: u16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Guide(usize),
    Interview,
}

impl View {
    // Tab order: Home, one tab per guide, Interview
    fn index(&self, guides: usize) -> usize {
        match self {
            View::Home => 0,
            View::Guide(i) => i + 1,
            View::Interview => guides + 1,
        }
    }

    fn from_index(index: usize, guides: usize) -> Self {
        match index {
            0 => View::Home,
            i if i <= guides => View::Guide(i - 1),
            _ => View::Interview,
        }
    }

    fn next(&self, guides: usize) -> Self {
        let count = guides + 2;
        View::from_index((self.index(guides) + 1) % count, guides)
    }

    fn prev(&self, guides: usize) -> Self {
        let count = guides + 2;
        View::from_index((self.index(guides) + count - 1) % count, guides)
    }
}

pub struct StatefulList<T> {
    pub items: Vec<T>,
    pub selected: Option<usize>,
}

impl<T> StatefulList<T> {
    fn with_items(items: Vec<T>) -> Self {
        let selected = if items.is_empty() { None } else { Some(0) };
        Self { items, selected }
    }

    fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.selected {
            Some(i) if i + 1 < self.items.len() => i + 1,
            _ => 0,
        };
        self.selected = Some(i);
    }

    fn previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.selected {
            Some(0) | None => self.items.len() - 1,
            Some(i) => i - 1,
        };
        self.selected = Some(i);
    }

    fn first(&mut self) {
        if !self.items.is_empty() {
            self.selected = Some(0);
        }
    }

    fn last(&mut self) {
        if !self.items.is_empty() {
            self.selected = Some(self.items.len() - 1);
        }
    }

    fn selected_item(&self) -> Option<&T> {
        self.selected.and_then(|i| self.items.get(i))
    }
}

/// Search and filter state of the interview page. The results are recomputed
/// from scratch whenever any criterion changes.
pub struct InterviewState {
    pub criteria: FilterCriteria,
    pub results: StatefulList<Question>,
    pub expanded: Option<i64>,
    pub show_filters: bool,
    pub search_mode: bool,
    pub answer_scroll: u16,
}

impl InterviewState {
    fn new(library: &Library, show_filters: bool) -> Self {
        let mut state = Self {
            criteria: FilterCriteria::default(),
            results: StatefulList::with_items(Vec::new()),
            expanded: None,
            show_filters,
            search_mode: false,
            answer_scroll: 0,
        };
        state.refresh(library);
        state
    }

    fn refresh(&mut self, library: &Library) {
        let results = library
            .search(&self.criteria)
            .into_iter()
            .cloned()
            .collect();
        self.results = StatefulList::with_items(results);

        // An answer filtered out of the list is collapsed
        let still_shown = self
            .expanded
            .and_then(|id| library.question(id))
            .is_some_and(|q| filter::matches(q, &self.criteria));
        if !still_shown {
            self.expanded = None;
            self.answer_scroll = 0;
            return;
        }

        // Keep the cursor on the open answer so Enter closes it
        let id = self.expanded;
        if let Some(i) = self.results.items.iter().position(|q| Some(q.id) == id) {
            self.results.selected = Some(i);
        }
    }

    fn toggle_selected(&mut self) {
        if let Some(q) = self.results.selected_item() {
            self.expanded = if self.expanded == Some(q.id) {
                None
            } else {
                Some(q.id)
            };
            self.answer_scroll = 0;
        }
    }

    /// The expanded question, if it is still part of the results.
    pub fn expanded_question(&self) -> Option<&Question> {
        let id = self.expanded?;
        self.results.items.iter().find(|q| q.id == id)
    }
}

/// Advances a dropdown-style selection to the next option, wrapping to the first.
fn cycle(current: &Selection, options: &[String]) -> Selection {
    let position = options.iter().position(|o| o == current.as_str());
    let next = match position {
        Some(i) => (i + 1) % options.len(),
        None => 0,
    };
    options
        .get(next)
        .map(|o| Selection::parse(o))
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideRow {
    Topic(usize),
    Subtopic(usize, usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideFocus {
    Outline,
    Questions,
}

/// Expansion state of one guide page. At most one topic, and one subtopic
/// inside it, is open at a time. The practice questions below the outline
/// reveal one answer at a time.
pub struct GuideState {
    pub expanded_topic: Option<usize>,
    pub expanded_subtopic: Option<usize>,
    pub cursor: usize,
    pub content_scroll: u16,
    pub focus: GuideFocus,
    pub questions: StatefulList<Question>,
    pub revealed: Option<i64>,
}

impl GuideState {
    fn new(questions: Vec<Question>) -> Self {
        Self {
            expanded_topic: None,
            expanded_subtopic: None,
            cursor: 0,
            content_scroll: 0,
            focus: GuideFocus::Outline,
            questions: StatefulList::with_items(questions),
            revealed: None,
        }
    }

    fn switch_focus(&mut self) {
        self.focus = match self.focus {
            GuideFocus::Outline => GuideFocus::Questions,
            GuideFocus::Questions => GuideFocus::Outline,
        };
        self.content_scroll = 0;
    }

    fn toggle_answer(&mut self) {
        if let Some(q) = self.questions.selected_item() {
            self.revealed = if self.revealed == Some(q.id) {
                None
            } else {
                Some(q.id)
            };
            self.content_scroll = 0;
        }
    }

    /// The practice question whose answer is shown, if any.
    pub fn revealed_question(&self) -> Option<&Question> {
        let id = self.revealed?;
        self.questions.items.iter().find(|q| q.id == id)
    }

    pub fn rows(&self, guide: &Guide) -> Vec<GuideRow> {
        let mut rows = Vec::new();
        for (t, topic) in guide.topics.iter().enumerate() {
            rows.push(GuideRow::Topic(t));
            if self.expanded_topic == Some(t) {
                rows.extend((0..topic.subtopics.len()).map(|s| GuideRow::Subtopic(t, s)));
            }
        }
        rows
    }

    fn next(&mut self, guide: &Guide) {
        let len = self.rows(guide).len();
        if len > 0 {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    fn previous(&mut self, guide: &Guide) {
        let len = self.rows(guide).len();
        if len > 0 {
            self.cursor = (self.cursor + len - 1) % len;
        }
    }

    fn last(&mut self, guide: &Guide) {
        self.cursor = self.rows(guide).len().saturating_sub(1);
    }

    fn toggle(&mut self, guide: &Guide) {
        let rows = self.rows(guide);
        let Some(row) = rows.get(self.cursor).copied() else {
            return;
        };
        match row {
            GuideRow::Topic(t) => {
                if self.expanded_topic == Some(t) {
                    self.expanded_topic = None;
                } else {
                    self.expanded_topic = Some(t);
                }
                self.expanded_subtopic = None;
                // Keep the cursor on the topic header after rows shift
                self.cursor = self
                    .rows(guide)
                    .iter()
                    .position(|r| *r == GuideRow::Topic(t))
                    .unwrap_or(0);
            }
            GuideRow::Subtopic(_, s) => {
                self.expanded_subtopic = if self.expanded_subtopic == Some(s) {
                    None
                } else {
                    Some(s)
                };
            }
        }
        self.content_scroll = 0;
    }

    fn collapse(&mut self) {
        self.expanded_topic = None;
        self.expanded_subtopic = None;
        self.cursor = 0;
        self.content_scroll = 0;
        self.focus = GuideFocus::Outline;
        self.revealed = None;
        self.questions.first();
    }
}

/// Questions of the guide's category, in bank order.
fn guide_questions(library: &Library, guide: &Guide) -> Vec<Question> {
    let Some(category) = Subject::ALL
        .iter()
        .find(|s| s.slug() == guide.slug)
        .and_then(|s| s.category())
    else {
        return Vec::new();
    };

    let criteria = FilterCriteria {
        category: Selection::Only(category.as_str().to_string()),
        ..FilterCriteria::default()
    };
    filter::filter(library.questions(), &criteria)
        .into_iter()
        .cloned()
        .collect()
}

pub struct App {
    library: Library,
    pub view: View,
    pub theme: Theme,
    pub subjects: StatefulList<Subject>,
    pub guides: Vec<GuideState>,
    pub interview: InterviewState,
    pub options: FilterOptions,
    pub stats: Stats,
    pub should_quit: bool,
}

impl App {
    pub fn new(library: Library, theme: Theme, show_filters: bool) -> Self {
        let guides = library
            .guides()
            .iter()
            .map(|g| GuideState::new(guide_questions(&library, g)))
            .collect();
        let interview = InterviewState::new(&library, show_filters);
        let options = library.filter_options();
        let stats = library.stats();

        Self {
            library,
            view: View::Home,
            theme,
            subjects: StatefulList::with_items(Subject::ALL.to_vec()),
            guides,
            interview,
            options,
            stats,
            should_quit: false,
        }
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    fn guide_count(&self) -> usize {
        self.library.guides().len()
    }

    fn open_subject(&mut self) {
        let Some(subject) = self.subjects.selected_item().copied() else {
            return;
        };
        if !subject.is_guide() {
            self.view = View::Interview;
            return;
        }
        if let Some(i) = self
            .library
            .guides()
            .iter()
            .position(|g| g.slug == subject.slug())
        {
            self.view = View::Guide(i);
        }
    }

    fn set_criteria(&mut self, update: impl FnOnce(&mut FilterCriteria, &FilterOptions)) {
        update(&mut self.interview.criteria, &self.options);
        self.interview.refresh(&self.library);
    }

    fn handle_search_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.interview.search_mode = false;
                self.set_criteria(|c, _| c.search_term.clear());
            }
            KeyCode::Enter => self.interview.search_mode = false,
            KeyCode::Backspace => {
                self.set_criteria(|c, _| {
                    c.search_term.pop();
                });
            }
            KeyCode::Char(ch) => self.set_criteria(|c, _| c.search_term.push(ch)),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Search input swallows every key until Enter or Esc
        if self.interview.search_mode {
            self.handle_search_key(key);
            return;
        }

        let guides = self.guide_count();
        match key {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }

            KeyCode::Char('T') => self.theme = self.theme.toggle(),

            KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => {
                self.view = self.view.prev(guides)
            }
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => {
                self.view = self.view.next(guides)
            }

            KeyCode::Char('j') | KeyCode::Down => self.move_cursor(Cursor::Down),
            KeyCode::Char('k') | KeyCode::Up => self.move_cursor(Cursor::Up),
            KeyCode::Char('g') => self.move_cursor(Cursor::Top),
            KeyCode::Char('G') => self.move_cursor(Cursor::Bottom),

            KeyCode::PageDown => self.scroll(true),
            KeyCode::PageUp => self.scroll(false),

            KeyCode::Enter | KeyCode::Char(' ') => match self.view {
                View::Home => self.open_subject(),
                View::Guide(i) => {
                    if let (Some(state), Some(guide)) =
                        (self.guides.get_mut(i), self.library.guides().get(i))
                    {
                        match state.focus {
                            GuideFocus::Outline => state.toggle(guide),
                            GuideFocus::Questions => state.toggle_answer(),
                        }
                    }
                }
                View::Interview => self.interview.toggle_selected(),
            },

            KeyCode::Esc => match self.view {
                View::Guide(i) => {
                    if let Some(state) = self.guides.get_mut(i) {
                        state.collapse();
                    }
                }
                View::Interview => self.interview.expanded = None,
                View::Home => {}
            },

            KeyCode::Char('i') => {
                if let View::Guide(i) = self.view {
                    if let Some(state) = self.guides.get_mut(i) {
                        state.switch_focus();
                    }
                }
            }

            KeyCode::Char('/') if self.view == View::Interview => {
                self.interview.search_mode = true;
            }
            KeyCode::Char('f') if self.view == View::Interview => {
                self.interview.show_filters = !self.interview.show_filters;
            }
            KeyCode::Char('c') if self.view == View::Interview => {
                self.set_criteria(|c, o| c.category = cycle(&c.category, &o.categories));
            }
            KeyCode::Char('d') if self.view == View::Interview => {
                self.set_criteria(|c, o| c.difficulty = cycle(&c.difficulty, &o.difficulties));
            }
            KeyCode::Char('t') if self.view == View::Interview => {
                self.set_criteria(|c, o| {
                    c.time_to_answer = cycle(&c.time_to_answer, &o.time_buckets)
                });
            }
            KeyCode::Char('x') if self.view == View::Interview => {
                self.set_criteria(|c, _| *c = FilterCriteria::default());
            }

            _ => {}
        }
    }

    fn move_cursor(&mut self, cursor: Cursor) {
        match self.view {
            View::Home => match cursor {
                Cursor::Down => self.subjects.next(),
                Cursor::Up => self.subjects.previous(),
                Cursor::Top => self.subjects.first(),
                Cursor::Bottom => self.subjects.last(),
            },
            View::Guide(i) => {
                let (Some(state), Some(guide)) =
                    (self.guides.get_mut(i), self.library.guides().get(i))
                else {
                    return;
                };
                match (state.focus, cursor) {
                    (GuideFocus::Outline, Cursor::Down) => state.next(guide),
                    (GuideFocus::Outline, Cursor::Up) => state.previous(guide),
                    (GuideFocus::Outline, Cursor::Top) => state.cursor = 0,
                    (GuideFocus::Outline, Cursor::Bottom) => state.last(guide),
                    (GuideFocus::Questions, Cursor::Down) => state.questions.next(),
                    (GuideFocus::Questions, Cursor::Up) => state.questions.previous(),
                    (GuideFocus::Questions, Cursor::Top) => state.questions.first(),
                    (GuideFocus::Questions, Cursor::Bottom) => state.questions.last(),
                }
            }
            View::Interview => match cursor {
                Cursor::Down => self.interview.results.next(),
                Cursor::Up => self.interview.results.previous(),
                Cursor::Top => self.interview.results.first(),
                Cursor::Bottom => self.interview.results.last(),
            },
        }
    }

    fn scroll(&mut self, down: bool) {
        let offset = match self.view {
            View::Home => return,
            View::Guide(i) => match self.guides.get_mut(i) {
                Some(state) => &mut state.content_scroll,
                None => return,
            },
            View::Interview => &mut self.interview.answer_scroll,
        };
        *offset = if down {
            offset.saturating_add(SCROLL_STEP)
        } else {
            offset.saturating_sub(SCROLL_STEP)
        };
    }
}

#[derive(Debug, Clone, Copy)]
enum Cursor {
    Up,
    Down,
    Top,
    Bottom,
}

pub fn run(
    library: Library,
    theme: Theme,
    show_filters: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(library, theme, show_filters);

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key.code, key.modifiers);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
