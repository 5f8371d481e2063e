pub mod badge;
mod render;

use crate::config::BrowseConfig;
use crate::db::Entry;
use crate::error::LoadError;
use crate::filter::{distinct_types, filter_indices, FilterState};
use crate::loader::{LoadStatus, PendingLoad};
use crate::sprite::SpriteCache;
use crate::store::open_store;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::ListState, Terminal};
use std::io;
use std::time::Duration;
use tracing::{debug, info};

pub use render::ui;

/// Rows skipped by PgUp/PgDn
const PAGE_STEP: usize = 10;

/// How long the event loop waits for input before checking the loader again
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct App {
    pub status: LoadStatus,
    pub filter: FilterState,
    /// Filter options, in order of first appearance
    pub types: Vec<String>,
    /// Indices into the loaded list that pass the current filter
    pub visible: Vec<usize>,
    pub state: ListState,
    pub menu_open: bool,
    pub sprites: SpriteCache,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &BrowseConfig) -> Self {
        Self {
            status: LoadStatus::Loading,
            filter: FilterState::default(),
            types: Vec::new(),
            visible: Vec::new(),
            state: ListState::default(),
            menu_open: false,
            sprites: SpriteCache::new(config.sprite_dir.clone()),
            should_quit: false,
        }
    }

    /// Apply the one load outcome; later calls are no-ops
    pub fn finish_load(&mut self, outcome: Result<Vec<Entry>, LoadError>) {
        if !self.status.resolve(outcome) {
            return;
        }

        self.types = distinct_types(self.status.entries());
        self.refresh();
    }

    /// Check the background load once; true when its outcome was applied
    pub fn poll_load(&mut self, pending: &mut PendingLoad) -> bool {
        match pending.poll() {
            Some(outcome) => {
                self.finish_load(outcome);
                true
            }
            None => false,
        }
    }

    /// Recompute the visible list from the current filter state
    /// Called after every mutation of `filter`
    pub fn refresh(&mut self) {
        self.visible = filter_indices(self.status.entries(), &self.filter);
        debug!(
            visible = self.visible.len(),
            search = %self.filter.search_term,
            selected_type = ?self.filter.selected_type,
            "filter applied"
        );

        // Reset selection to first item
        if self.visible.is_empty() {
            self.state.select(None);
        } else {
            self.state.select(Some(0));
        }
    }

    pub fn total_count(&self) -> usize {
        self.status.entries().len()
    }

    pub fn visible_entries(&self) -> Vec<&Entry> {
        let entries = self.status.entries();
        self.visible.iter().map(|&i| &entries[i]).collect()
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.state
            .selected()
            .and_then(|i| self.visible.get(i))
            .map(|&i| &self.status.entries()[i])
    }

    // ========================================================================
    // FILTER MUTATIONS
    // ========================================================================

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn push_search_char(&mut self, c: char) {
        self.filter.search_term.push(c);
        self.refresh();
    }

    pub fn pop_search_char(&mut self) {
        if self.filter.search_term.pop().is_some() {
            self.refresh();
        }
    }

    /// `None` is the "All" option
    pub fn select_type(&mut self, type_name: Option<String>) {
        self.filter.selected_type = type_name;
        self.refresh();
    }

    /// Position of the current selection among [All, types...]
    fn type_option_index(&self) -> usize {
        match &self.filter.selected_type {
            None => 0,
            Some(selected) => self
                .types
                .iter()
                .position(|t| t.eq_ignore_ascii_case(selected))
                .map(|i| i + 1)
                .unwrap_or(0),
        }
    }

    fn select_type_option(&mut self, index: usize) {
        let selected = if index == 0 {
            None
        } else {
            self.types.get(index - 1).cloned()
        };
        self.select_type(selected);
    }

    pub fn next_type(&mut self) {
        let options = self.types.len() + 1;
        let i = (self.type_option_index() + 1) % options;
        self.select_type_option(i);
    }

    pub fn previous_type(&mut self) {
        let options = self.types.len() + 1;
        let i = (self.type_option_index() + options - 1) % options;
        self.select_type_option(i);
    }

    // ========================================================================
    // NAVIGATION
    // ========================================================================

    pub fn next(&mut self) {
        let len = self.visible.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.visible.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) => len - 1,
            Some(i) => i - 1,
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn page_down(&mut self) {
        let len = self.visible.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => (i + PAGE_STEP).min(len - 1),
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn page_up(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        let i = self
            .state
            .selected()
            .map(|i| i.saturating_sub(PAGE_STEP))
            .unwrap_or(0);
        self.state.select(Some(i));
    }

    pub fn first(&mut self) {
        if !self.visible.is_empty() {
            self.state.select(Some(0));
        }
    }

    pub fn last(&mut self) {
        if !self.visible.is_empty() {
            self.state.select(Some(self.visible.len() - 1));
        }
    }

    // ========================================================================
    // INPUT
    // ========================================================================

    /// Route one key press according to the current view and menu state
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // Loading and error views take no input beyond quitting
        if !matches!(self.status, LoadStatus::Ready(_)) {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                self.should_quit = true;
            }
            return;
        }

        match key.code {
            KeyCode::Tab => self.toggle_menu(),
            KeyCode::Down => self.next(),
            KeyCode::Up => self.previous(),
            KeyCode::PageDown => self.page_down(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::Home => self.first(),
            KeyCode::End => self.last(),
            _ if self.menu_open => self.handle_menu_key(key),
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('j') => self.next(),
            KeyCode::Char('k') => self.previous(),
            _ => {}
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.toggle_menu(),
            KeyCode::Backspace => self.pop_search_char(),
            KeyCode::Left => self.previous_type(),
            KeyCode::Right => self.next_type(),
            // Chords like Alt+x or Ctrl+a are not text
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.push_search_char(c)
            }
            _ => {}
        }
    }
}

pub fn run_ui(config: &BrowseConfig) -> Result<()> {
    let mut app = App::new(config);

    // The one query, dispatched before the first frame
    let pending = PendingLoad::spawn(open_store(&config.store));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, &mut app, pending);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    info!("browser closed");
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut pending: PendingLoad,
) -> io::Result<()> {
    loop {
        app.poll_load(&mut pending);

        terminal.draw(|f| ui(f, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if app.should_quit {
            // An unfinished load is dropped here, its result never observed
            return Ok(());
        }
    }
}
