//! UI Components
//!
//! Reusable Leptos components.

mod assign_select;
mod bar_chart;
mod confirm_button;
mod drop_zone;
mod entity_detail;
pub mod fields;
pub mod forms;
mod pagination;
mod sidebar;
mod sort_header;
mod status_tabs;
mod toasts;

pub use assign_select::{assignable, AssignSelect};
pub use bar_chart::{Bar, BarChart};
pub use confirm_button::ConfirmButton;
pub use drop_zone::DropZone;
pub use entity_detail::EntityDetail;
pub use pagination::PaginationControls;
pub use sidebar::Sidebar;
pub use sort_header::SortHeader;
pub use status_tabs::{StatusTab, StatusTabs};
pub use toasts::Toasts;
