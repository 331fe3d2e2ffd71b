//! Ratatui front-end: a public course grid filtered by tech and category, and
//! an admin panel for adding, editing and deleting listings.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
