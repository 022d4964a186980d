//! Labeled dropdown selector

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::policy_tui::ui::Styles;

/// A selector over a fixed list of option strings.
///
/// It only tracks which option is highlighted; the chosen value is handed to
/// the owner verbatim and the owner keeps the filter state.
#[derive(Debug, Clone)]
pub struct Select {
    pub label: String,
    pub options: Vec<String>,
    pub selected: usize,
    pub is_focused: bool,
}

impl Select {
    pub fn new(label: &str, options: Vec<String>) -> Self {
        Self {
            label: label.to_string(),
            options,
            selected: 0,
            is_focused: false,
        }
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.is_focused = focused;
    }

    pub fn value(&self) -> Option<&str> {
        self.options.get(self.selected).map(String::as_str)
    }

    /// Highlight the next option, wrapping. Returns the newly chosen value.
    pub fn select_next(&mut self) -> Option<String> {
        if self.options.len() < 2 {
            return None;
        }
        self.selected = (self.selected + 1) % self.options.len();
        self.value().map(str::to_string)
    }

    /// Highlight the previous option, wrapping. Returns the newly chosen value.
    pub fn select_previous(&mut self) -> Option<String> {
        if self.options.len() < 2 {
            return None;
        }
        self.selected = if self.selected == 0 {
            self.options.len() - 1
        } else {
            self.selected - 1
        };
        self.value().map(str::to_string)
    }

    /// Returns the chosen option when the key changed the selection
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<String> {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Char(' ') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            _ => None,
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let border_style = if self.is_focused {
            Styles::active_border()
        } else {
            Styles::inactive_border()
        };

        let value = self.value().unwrap_or("-");
        let line = if self.is_focused {
            Line::from(vec![
                Span::styled("▲ ", Styles::inactive()),
                Span::styled(value.to_string(), Styles::selected()),
                Span::styled(" ▼", Styles::inactive()),
            ])
        } else {
            Line::from(Span::raw(value.to_string()))
        };

        let block = Block::default()
            .title(self.label.as_str())
            .borders(Borders::ALL)
            .border_style(border_style);

        f.render_widget(Paragraph::new(line).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn options() -> Vec<String> {
        vec!["ALL".to_string(), "ACTIVE".to_string(), "PENDING".to_string()]
    }

    #[test]
    fn test_select_emits_chosen_value() {
        let mut select = Select::new("Status:", options());
        assert_eq!(select.value(), Some("ALL"));

        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(select.handle_key(down), Some("ACTIVE".to_string()));
        assert_eq!(select.handle_key(down), Some("PENDING".to_string()));
        assert_eq!(select.handle_key(down), Some("ALL".to_string()));

        let up = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(select.handle_key(up), Some("PENDING".to_string()));
    }

    #[test]
    fn test_other_keys_do_not_change_selection() {
        let mut select = Select::new("Status:", options());
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(select.handle_key(enter), None);
        assert_eq!(select.selected, 0);
    }

    #[test]
    fn test_single_option_never_changes() {
        let mut select = Select::new("Provider:", vec!["ALL".to_string()]);
        assert_eq!(select.select_next(), None);
        assert_eq!(select.select_previous(), None);
    }
}
