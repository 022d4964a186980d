//! Reusable UI components for the policy TUI

pub mod badge;
pub mod policy_table;
pub mod select;

pub use badge::Badge;
pub use policy_table::{PolicyTable, PolicyTableConfig, TableAction};
pub use select::Select;
