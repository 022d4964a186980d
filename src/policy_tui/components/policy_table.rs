//! Paginated policy table with its search field and pager

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use super::Badge;
use crate::{
    models::PolicyRow,
    pagination::{Paginated, Pagination},
    policy_tui::ui::{truncate_to_width, InputField, Styles},
};

const SPINNER_FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

/// Actions the table reports to its owner
#[derive(Debug, Clone, PartialEq)]
pub enum TableAction {
    /// Search text changed; emitted on every keystroke, not debounced
    SearchChanged(String),
}

/// Configuration for policy table display
#[derive(Debug, Clone)]
pub struct PolicyTableConfig {
    pub title: String,
    pub rows_per_page: usize,
    pub show_search_filter: bool,
    pub max_name_len: usize,
}

impl Default for PolicyTableConfig {
    fn default() -> Self {
        Self {
            title: "Policies".to_string(),
            rows_per_page: 2,
            show_search_filter: false,
            max_name_len: 32,
        }
    }
}

impl PolicyTableConfig {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Default::default()
        }
    }

    pub fn with_rows_per_page(mut self, rows_per_page: usize) -> Self {
        self.rows_per_page = rows_per_page;
        self
    }

    pub fn with_search_filter(mut self) -> Self {
        self.show_search_filter = true;
        self
    }
}

pub struct PolicyTable {
    rows: Vec<PolicyRow>,
    pub pagination: Pagination,
    pub config: PolicyTableConfig,
    pub is_loading: bool,
    pub is_focused: bool,
    pub search_input: InputField,
    spinner_tick: usize,
}

impl PolicyTable {
    pub fn new(config: PolicyTableConfig) -> Self {
        Self {
            rows: Vec::new(),
            pagination: Pagination::new(config.rows_per_page),
            config,
            is_loading: false,
            is_focused: false,
            search_input: InputField::new("Search").with_placeholder("Search..."),
            spinner_tick: 0,
        }
    }

    /// Replace the row set. The page goes back to 0 if the page count changed.
    pub fn set_rows(&mut self, rows: Vec<PolicyRow>) {
        self.rows = rows;
        self.pagination.update(self.rows.len());
    }

    pub fn rows(&self) -> &[PolicyRow] {
        &self.rows
    }

    pub fn page_rows(&self) -> &[PolicyRow] {
        self.pagination.slice(&self.rows)
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.is_focused = focused;
    }

    pub fn set_search_focus(&mut self, focused: bool) {
        self.search_input.set_focus(focused);
    }

    pub fn tick(&mut self) {
        self.spinner_tick = self.spinner_tick.wrapping_add(1);
    }

    /// Edit the search field; reports the new text whenever it changed
    pub fn handle_search_key(&mut self, key: KeyEvent) -> Option<TableAction> {
        if !self.config.show_search_filter {
            return None;
        }

        let changed = match key.code {
            KeyCode::Char(c) if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() => {
                self.search_input.insert_char(c);
                true
            }
            KeyCode::Backspace => self.search_input.delete_char(),
            KeyCode::Delete => self.search_input.delete_char_forward(),
            KeyCode::Left => {
                self.search_input.move_cursor_left();
                false
            }
            KeyCode::Right => {
                self.search_input.move_cursor_right();
                false
            }
            KeyCode::Home => {
                self.search_input.move_cursor_to_start();
                false
            }
            KeyCode::End => {
                self.search_input.move_cursor_to_end();
                false
            }
            _ => false,
        };

        changed.then(|| TableAction::SearchChanged(self.search_input.value.clone()))
    }

    /// Paging keys while the table itself has focus
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('n') => self.next_page(),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('p') => self.previous_page(),
            KeyCode::Home => self.pagination.set_current_page(0),
            _ => {}
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        let mut constraints = Vec::new();
        if self.config.show_search_filter {
            constraints.push(Constraint::Length(3));
        }
        constraints.push(Constraint::Min(3));
        constraints.push(Constraint::Length(1));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let mut idx = 0;
        if self.config.show_search_filter {
            self.search_input.render(f, chunks[idx]);
            idx += 1;
        }
        self.render_table(f, chunks[idx]);
        self.render_pager(f, chunks[idx + 1]);
    }

    fn render_table(&self, f: &mut Frame, area: Rect) {
        let header = Row::new(vec!["#", "Name", "Provider", "Type", "Status"]).style(Styles::title());

        let page_rows = self.page_rows();
        let rows: Vec<Row> = if page_rows.is_empty() {
            vec![Row::new(vec![Cell::from(""), Cell::from("No results...")])]
        } else {
            page_rows
                .iter()
                .enumerate()
                .map(|(i, policy)| {
                    Row::new(vec![
                        Cell::from(self.pagination.row_number(i).to_string()),
                        Cell::from(truncate_to_width(
                            &policy.customer.full_name(),
                            self.config.max_name_len,
                        )),
                        Cell::from(policy.provider.clone()),
                        Cell::from(policy.insurance_type.as_str().to_string()),
                        Cell::from(Badge::span(policy.status)),
                    ])
                })
                .collect()
        };

        let mut title = vec![Span::raw(format!(
            "{} ({})",
            self.config.title,
            self.rows.len()
        ))];
        if self.is_loading {
            let frame = SPINNER_FRAMES[self.spinner_tick % SPINNER_FRAMES.len()];
            title.push(Span::styled(format!(" {}", frame), Styles::info()));
        }

        let border_style = if self.is_focused {
            Styles::active_border()
        } else {
            Styles::inactive_border()
        };

        let widths = [
            Constraint::Length(4),
            Constraint::Min(16),
            Constraint::Length(10),
            Constraint::Length(11),
            Constraint::Length(14),
        ];

        let table = Table::new(rows, widths).header(header).block(
            Block::default()
                .title(Line::from(title))
                .borders(Borders::ALL)
                .border_style(border_style),
        );

        f.render_widget(table, area);
    }

    fn render_pager(&self, f: &mut Frame, area: Rect) {
        let enabled_or_not = |enabled: bool| {
            if enabled {
                Style::default()
            } else {
                Styles::disabled()
            }
        };

        let pager = Line::from(vec![
            Span::styled("◀ Previous", enabled_or_not(self.pagination.can_paginate_backward())),
            Span::raw(self.pagination.indicator()),
            Span::styled("Next ▶", enabled_or_not(self.pagination.can_paginate_forward())),
        ]);

        f.render_widget(Paragraph::new(pager).alignment(Alignment::Center), area);
    }
}

impl Paginated for PolicyTable {
    fn get_current_page(&self) -> usize {
        self.pagination.get_current_page()
    }

    fn set_current_page(&mut self, page: usize) {
        self.pagination.set_current_page(page);
    }

    fn get_total_pages(&self) -> usize {
        self.pagination.get_total_pages()
    }
}
