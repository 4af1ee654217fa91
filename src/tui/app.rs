//! TUI application - main event loop and terminal management.
//!
//! This module contains the core TUI application logic including:
//! - Terminal setup and restoration
//! - Event loop for keyboard input
//! - List navigation, in-place editing, and filter switching
//!
//! The app owns the task list directly; every mutation goes through the
//! pure list operations and is saved to the store synchronously.

use std::io::{self, stdout};
use std::time::Duration;

use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::commands::items_left;
use crate::models::list;
use crate::models::{Filter, Task};
use crate::storage::{Store, TASKS_SLOT};

/// Input focus within the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    /// Navigating the task list
    Normal,
    /// Typing a new task into the input line
    Insert { draft: String },
    /// Editing the selected task in place
    Edit {
        id: String,
        original: String,
        draft: String,
    },
}

/// TUI application state
pub struct TuiApp<'a> {
    /// Store handle for slot persistence
    store: &'a Store,
    /// The task list
    tasks: Vec<Task>,
    /// Active filter (view-only, never persisted)
    filter: Filter,
    /// Input focus
    mode: Mode,
    /// Selected row within the visible list
    selected: usize,
    /// List widget state
    list_state: ListState,
    /// Whether to quit the application
    should_quit: bool,
}

impl<'a> TuiApp<'a> {
    /// Create a new TUI application, loading the list from the store.
    ///
    /// View state (filter, edit drafts) always starts from defaults.
    pub fn new(store: &'a Store) -> Self {
        let tasks: Vec<Task> = store.load(TASKS_SLOT, Vec::new());
        let mut list_state = ListState::default();
        if !tasks.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            store,
            tasks,
            filter: Filter::default(),
            mode: Mode::Normal,
            selected: 0,
            list_state,
            should_quit: false,
        }
    }

    /// Run the application event loop until quit.
    fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_key(&mut self, key: KeyCode) {
        match self.mode {
            Mode::Normal => self.handle_normal_key(key),
            Mode::Insert { .. } => self.handle_insert_key(key),
            Mode::Edit { .. } => self.handle_edit_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('i') | KeyCode::Char('a') => {
                self.mode = Mode::Insert {
                    draft: String::new(),
                };
            }
            // Navigation
            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_previous(),
            KeyCode::Char('g') | KeyCode::Home => self.select_first(),
            KeyCode::Char('G') | KeyCode::End => self.select_last(),
            // Mutations
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected(),
            KeyCode::Char('e') => self.begin_edit(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('c') => self.clear_completed(),
            // Filter pills
            KeyCode::Char('1') => self.set_filter(Filter::All),
            KeyCode::Char('2') => self.set_filter(Filter::Active),
            KeyCode::Char('3') => self.set_filter(Filter::Completed),
            KeyCode::Tab => self.cycle_filter(),
            _ => {}
        }
    }

    fn handle_insert_key(&mut self, key: KeyCode) {
        let Mode::Insert { draft } = &mut self.mode else {
            return;
        };
        match key {
            KeyCode::Char(c) => draft.push(c),
            KeyCode::Backspace => {
                draft.pop();
            }
            KeyCode::Esc => {
                // Cancel discards the draft.
                self.mode = Mode::Normal;
            }
            KeyCode::Enter => {
                // Blank input adds nothing and keeps the input focused.
                if draft.trim().is_empty() {
                    return;
                }
                let text = std::mem::take(draft);
                self.mode = Mode::Normal;
                let tasks = std::mem::take(&mut self.tasks);
                self.commit(list::add(tasks, &text));
                self.select_first();
            }
            _ => {}
        }
    }

    fn handle_edit_key(&mut self, key: KeyCode) {
        let Mode::Edit {
            id,
            original,
            draft,
        } = &mut self.mode
        else {
            return;
        };
        match key {
            KeyCode::Char(c) => draft.push(c),
            KeyCode::Backspace => {
                draft.pop();
            }
            KeyCode::Esc => {
                // Cancel restores the original text with no list operation.
                self.mode = Mode::Normal;
            }
            KeyCode::Enter => {
                let id = id.clone();
                let original = std::mem::take(original);
                let draft = std::mem::take(draft);
                self.mode = Mode::Normal;

                // Commit only non-empty text that actually changed.
                let trimmed = draft.trim();
                if !trimmed.is_empty() && trimmed != original {
                    let tasks = std::mem::take(&mut self.tasks);
                    self.commit(list::edit(tasks, &id, trimmed));
                }
            }
            _ => {}
        }
    }

    /// Install a mutated list and mirror it to the store.
    fn commit(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.store.save(TASKS_SLOT, &self.tasks);
        self.clamp_selection();
    }

    fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            let tasks = std::mem::take(&mut self.tasks);
            self.commit(list::toggle(tasks, &id));
        }
    }

    fn begin_edit(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let id = task.id.clone();
        let original = task.text.clone();
        self.mode = Mode::Edit {
            id,
            draft: original.clone(),
            original,
        };
    }

    fn delete_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            let tasks = std::mem::take(&mut self.tasks);
            self.commit(list::delete(tasks, &id));
        }
    }

    fn clear_completed(&mut self) {
        let tasks = std::mem::take(&mut self.tasks);
        self.commit(list::clear_completed(tasks));
    }

    fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.clamp_selection();
    }

    fn cycle_filter(&mut self) {
        self.set_filter(match self.filter {
            Filter::All => Filter::Active,
            Filter::Active => Filter::Completed,
            Filter::Completed => Filter::All,
        });
    }

    fn visible_len(&self) -> usize {
        list::visible(&self.tasks, self.filter).len()
    }

    fn selected_task(&self) -> Option<&Task> {
        list::visible(&self.tasks, self.filter)
            .get(self.selected)
            .copied()
    }

    fn selected_id(&self) -> Option<String> {
        self.selected_task().map(|t| t.id.clone())
    }

    /// Keep the selection valid after mutations and filter changes.
    fn clamp_selection(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(len - 1);
            self.list_state.select(Some(self.selected));
        }
    }

    /// Move selection down
    fn select_next(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
        self.list_state.select(Some(self.selected));
    }

    /// Move selection up
    fn select_previous(&mut self) {
        if self.visible_len() == 0 {
            return;
        }
        self.selected = self.selected.saturating_sub(1);
        self.list_state.select(Some(self.selected));
    }

    /// Jump to top
    fn select_first(&mut self) {
        self.selected = 0;
        self.clamp_selection();
    }

    /// Jump to bottom
    fn select_last(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        self.selected = len - 1;
        self.list_state.select(Some(self.selected));
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Filter bar
                Constraint::Length(3), // New-task input
                Constraint::Min(5),    // Task list
                Constraint::Length(3), // Status bar
            ])
            .split(area);

        self.render_filter_bar(frame, chunks[0]);
        self.render_input(frame, chunks[1]);
        self.render_list(frame, chunks[2]);
        self.render_status_bar(frame, chunks[3]);
    }

    /// Render the filter pills with the active filter highlighted
    fn render_filter_bar(&self, frame: &mut Frame, area: Rect) {
        let active_style = Style::default().add_modifier(Modifier::BOLD);
        let inactive_style = Style::default().fg(Color::DarkGray);

        let pills = [
            (Filter::All, "[1] All"),
            (Filter::Active, "[2] Active"),
            (Filter::Completed, "[3] Completed"),
        ];

        let mut spans = vec![Span::raw(" ")];
        for (i, (filter, label)) in pills.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" | "));
            }
            let style = if *filter == self.filter {
                active_style
            } else {
                inactive_style
            };
            spans.push(Span::styled(*label, style));
        }

        let title = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL).title("tiller"));
        frame.render_widget(title, area);
    }

    /// Render the new-task input line
    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let (text, style) = match &self.mode {
            Mode::Insert { draft } => (format!("{draft}▏"), Style::default()),
            _ => (
                "Press i to add a task".to_string(),
                Style::default().fg(Color::DarkGray),
            ),
        };
        let input = Paragraph::new(text)
            .style(style)
            .block(Block::default().borders(Borders::ALL).title("New task"));
        frame.render_widget(input, area);
    }

    /// Render the task list with selection highlight
    fn render_list(&mut self, frame: &mut Frame, area: Rect) {
        let editing = match &self.mode {
            Mode::Edit { id, draft, .. } => Some((id.clone(), draft.clone())),
            _ => None,
        };

        let items: Vec<ListItem> = list::visible(&self.tasks, self.filter)
            .iter()
            .map(|task| {
                let mark = if task.completed { "[x] " } else { "[ ] " };
                match &editing {
                    Some((id, draft)) if *id == task.id => ListItem::new(Line::from(vec![
                        Span::raw(mark),
                        Span::styled(
                            format!("{draft}▏"),
                            Style::default().add_modifier(Modifier::UNDERLINED),
                        ),
                    ])),
                    _ => {
                        let style = if task.completed {
                            Style::default()
                                .fg(Color::DarkGray)
                                .add_modifier(Modifier::CROSSED_OUT)
                        } else {
                            Style::default()
                        };
                        ListItem::new(Line::from(vec![
                            Span::raw(mark),
                            Span::styled(task.text.clone(), style),
                        ]))
                    }
                }
            })
            .collect();

        let title = format!("Tasks ({})", self.filter);
        let list_widget = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        frame.render_stateful_widget(list_widget, area, &mut self.list_state);
    }

    /// Render the status bar with the remaining count and keybindings
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let remaining = items_left(list::remaining_count(&self.tasks));
        let status = Paragraph::new(format!(
            " {remaining}  |  i:add  space:toggle  e:edit  d:delete  c:clear done  1/2/3:filter  q:quit"
        ))
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(status, area);
    }
}

/// Setup the terminal for TUI mode
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    Terminal::new(backend)
}

/// Restore the terminal to normal mode
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Run the TUI application against the given store.
pub fn run_tui(store: &Store) -> io::Result<()> {
    let mut terminal = setup_terminal()?;
    let mut app = TuiApp::new(store);
    let result = app.run(&mut terminal);
    restore_terminal()?;
    result
}
