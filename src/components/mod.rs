//! UI Components
//!
//! Leptos widgets mounted into the server-rendered page.

mod favorite_toggle;
mod log_panel;
mod rank_editor;
mod toast_host;

pub use favorite_toggle::FavoriteToggle;
pub use log_panel::LogPanel;
pub use rank_editor::RankEditor;
pub use toast_host::ToastHost;
