//! Status badge

use ratatui::{style::Style, text::Span};

use crate::{models::PolicyStatus, policy_tui::ui::Styles};

pub struct Badge;

impl Badge {
    pub fn label(status: PolicyStatus) -> &'static str {
        match status {
            PolicyStatus::Active => "Active",
            PolicyStatus::Pending => "Pending",
            PolicyStatus::Cancelled => "Cancelled",
            PolicyStatus::DroppedOut => "Dropped out",
        }
    }

    pub fn style(status: PolicyStatus) -> Style {
        match status {
            PolicyStatus::Active => Styles::success(),
            PolicyStatus::Pending => Styles::warning(),
            PolicyStatus::Cancelled => Styles::error(),
            PolicyStatus::DroppedOut => Styles::disabled(),
        }
    }

    pub fn span(status: PolicyStatus) -> Span<'static> {
        Span::styled(format!("● {}", Self::label(status)), Self::style(status))
    }
}
