//! Main TUI application state and logic
//!
//! `App` owns the fetched rows, the search text and the categorical filters.
//! Every mutation of those inputs re-derives the filtered set and hands it to
//! the table, which owns the pagination state.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, info, warn};

use super::components::{PolicyTable, PolicyTableConfig, Select, TableAction};
use super::events::AppEvent;
use super::operations::{Debouncer, PolicyLoader};
use super::ui::centered_rect;
use crate::api::PolicySource;
use crate::config::Config;
use crate::filters::{filter_policies, FilterError, FilterKind, TableFilters};
use crate::models::PolicyRow;
use crate::pagination::Paginated;

/// Widgets that can hold keyboard focus, in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Provider,
    InsuranceType,
    Status,
    Search,
    Table,
}

impl Focus {
    const ORDER: [Focus; 5] = [
        Focus::Provider,
        Focus::InsuranceType,
        Focus::Status,
        Focus::Search,
        Focus::Table,
    ];

    fn position(&self) -> usize {
        Self::ORDER.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> Focus {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn previous(&self) -> Focus {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }

    pub fn filter_kind(&self) -> Option<FilterKind> {
        match self {
            Focus::Provider => Some(FilterKind::Provider),
            Focus::InsuranceType => Some(FilterKind::InsuranceType),
            Focus::Status => Some(FilterKind::Status),
            Focus::Search | Focus::Table => None,
        }
    }
}

/// Main TUI application state
pub struct App {
    /// Application configuration
    pub config: Config,
    /// Completed background work
    pub events: UnboundedReceiver<AppEvent>,

    loader: PolicyLoader,
    debouncer: Debouncer,

    // Source-of-truth state
    table_data: Vec<PolicyRow>,
    pub search_filter: String,
    pub table_filters: TableFilters,
    pub is_loading: bool,

    // Widgets
    pub provider_select: Select,
    pub insurance_type_select: Select,
    pub status_select: Select,
    pub table: PolicyTable,

    pub focus: Focus,
    pub should_quit: bool,
    pub show_help_popup: bool,
}

impl App {
    /// Create a new TUI application
    pub fn new(config: Config, source: Arc<dyn PolicySource>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let table = PolicyTable::new(
            PolicyTableConfig::new("Policies")
                .with_rows_per_page(config.ui.rows_per_page)
                .with_search_filter(),
        );

        let mut app = Self {
            events: rx,
            loader: PolicyLoader::new(source, tx),
            debouncer: Debouncer::new(config.debounce_delay()),

            table_data: Vec::new(),
            search_filter: String::new(),
            table_filters: TableFilters::default(),
            is_loading: false,

            provider_select: Select::new(
                FilterKind::Provider.label(),
                config.filters.options_for(FilterKind::Provider),
            ),
            insurance_type_select: Select::new(
                FilterKind::InsuranceType.label(),
                config.filters.options_for(FilterKind::InsuranceType),
            ),
            status_select: Select::new(
                FilterKind::Status.label(),
                config.filters.options_for(FilterKind::Status),
            ),
            table,

            focus: Focus::Search,
            should_quit: false,
            show_help_popup: false,
            config,
        };

        app.set_focus(Focus::Search);
        app
    }

    /// Run the main application loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!("Starting policy view against {}", self.config.api.base_url);

        // Initial fetch is not debounced
        self.get_policies();

        loop {
            self.drain_events();
            if self.is_loading {
                self.table.tick();
            }

            terminal.draw(|f| self.draw(f))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key_event(key);
                }
            }

            if self.should_quit {
                break;
            }

            tokio::task::yield_now().await;
        }

        self.debouncer.cancel();
        info!("Policy view closed");
        Ok(())
    }

    /// All fetched rows, before filtering
    pub fn table_data(&self) -> &[PolicyRow] {
        &self.table_data
    }

    /// Rows that pass the baseline, categorical and search predicates
    pub fn filtered_data(&self) -> &[PolicyRow] {
        self.table.rows()
    }

    /// Set one categorical filter from its option string and re-derive
    pub fn edit_table_filters(&mut self, kind: FilterKind, value: &str) -> Result<(), FilterError> {
        self.table_filters.set(kind, value)?;
        debug!("Filter {:?} set to {}", kind, value);
        self.refilter();
        Ok(())
    }

    /// Update the search text: re-filter now, refetch once typing settles
    pub fn set_search_filter(&mut self, search: String) {
        if search == self.search_filter {
            return;
        }
        self.search_filter = search;
        self.refilter();
        self.get_policies_debounced();
    }

    /// Fetch policies for the current search text right away
    pub fn get_policies(&mut self) {
        self.set_loading(true);
        self.loader.spawn(self.search_filter.clone());
    }

    /// Fetch policies after the debounce delay, replacing any pending fetch
    pub fn get_policies_debounced(&mut self) {
        debug!(
            "Scheduling fetch for '{}' in {:?}",
            self.search_filter,
            self.debouncer.delay()
        );
        let task = self.loader.fetch_task(self.search_filter.clone());
        self.debouncer.schedule(task);
    }

    /// Apply completed background work
    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::FetchStarted { search } => {
                debug!("Fetch started for '{}'", search);
                self.set_loading(true);
            }
            AppEvent::PoliciesLoaded { search, rows } => {
                debug!(
                    "Replacing {} rows with {} rows from search '{}'",
                    self.table_data.len(),
                    rows.len(),
                    search
                );
                self.table_data = rows;
                self.set_loading(false);
                self.refilter();
            }
            AppEvent::PoliciesFailed { search, message } => {
                // Logged by the loader; the view keeps its previous rows
                debug!("Fetch for '{}' failed: {}", search, message);
                self.set_loading(false);
            }
        }
    }

    /// Apply every event that is already waiting
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.handle_app_event(event);
        }
    }

    fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
        self.table.set_loading(loading);
    }

    fn refilter(&mut self) {
        let filtered = filter_policies(&self.table_data, &self.table_filters, &self.search_filter);
        self.table.set_rows(filtered);
    }

    fn select_mut(&mut self, kind: FilterKind) -> &mut Select {
        match kind {
            FilterKind::Provider => &mut self.provider_select,
            FilterKind::InsuranceType => &mut self.insurance_type_select,
            FilterKind::Status => &mut self.status_select,
        }
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.provider_select.set_focus(focus == Focus::Provider);
        self.insurance_type_select.set_focus(focus == Focus::InsuranceType);
        self.status_select.set_focus(focus == Focus::Status);
        self.table.set_search_focus(focus == Focus::Search);
        self.table.set_focus(focus == Focus::Table);
    }

    /// Handle keyboard input events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        // Global shortcuts
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        if key.code == KeyCode::F(1) {
            self.show_help_popup = !self.show_help_popup;
            return;
        }
        if self.show_help_popup {
            if key.code == KeyCode::Esc {
                self.show_help_popup = false;
            }
            return;
        }

        match key.code {
            KeyCode::Tab => return self.set_focus(self.focus.next()),
            KeyCode::BackTab => return self.set_focus(self.focus.previous()),
            KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::PageDown => return self.table.next_page(),
            KeyCode::PageUp => return self.table.previous_page(),
            _ => {}
        }

        match self.focus {
            Focus::Search => {
                if let Some(TableAction::SearchChanged(text)) = self.table.handle_search_key(key) {
                    self.set_search_filter(text);
                }
            }
            Focus::Table => {
                if key.code == KeyCode::Char('q') {
                    self.should_quit = true;
                } else {
                    self.table.handle_key(key);
                }
            }
            focus => {
                if key.code == KeyCode::Char('q') {
                    self.should_quit = true;
                    return;
                }
                let Some(kind) = focus.filter_kind() else {
                    return;
                };
                if let Some(value) = self.select_mut(kind).handle_key(key) {
                    if let Err(e) = self.edit_table_filters(kind, &value) {
                        warn!("Ignoring filter option: {}", e);
                    }
                }
            }
        }
    }

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        let selects = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(34),
                Constraint::Percentage(33),
                Constraint::Percentage(33),
            ])
            .split(chunks[0]);

        self.provider_select.render(f, selects[0]);
        self.insurance_type_select.render(f, selects[1]);
        self.status_select.render(f, selects[2]);

        self.table.render(f, chunks[1]);

        self.draw_status_bar(f, chunks[2]);

        if self.show_help_popup {
            self.draw_help_popup(f, size);
        }
    }

    /// Draw status bar with counts and shortcuts
    fn draw_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = format!(
            "{} shown of {} fetched | Tab: Focus | ↑/↓: Change filter | PgUp/PgDn: Page | F1: Help | Esc: Quit",
            self.filtered_data().len(),
            self.table_data.len(),
        );

        let status_bar = Paragraph::new(status_text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));

        f.render_widget(status_bar, area);
    }

    /// Draw help popup with the key bindings
    fn draw_help_popup(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(70, 60, area);

        f.render_widget(Clear, popup_area);

        let help_popup = Paragraph::new(HELP_TEXT)
            .block(
                Block::default()
                    .title("Help - Shortcuts")
                    .borders(Borders::ALL)
                    .style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().fg(Color::White));

        f.render_widget(help_popup, popup_area);
    }
}

const HELP_TEXT: &str = "Global:\n\
    Tab / Shift+Tab - Move focus\n\
    PgUp / PgDn - Previous / next page\n\
    F1 - Toggle this help\n\
    Esc / Ctrl+C - Quit\n\n\
    Provider, Type, Status:\n\
    ↑/↓ - Change selection (ALL removes the filter)\n\
    q - Quit\n\n\
    Search:\n\
    Type to filter by first name, last name or provider\n\
    The list is refetched once typing pauses\n\n\
    Table:\n\
    ←/→ - Previous / next page\n\
    q - Quit";
