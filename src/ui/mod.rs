//! Terminal dashboard for a game in progress.

mod dashboard;
mod render;

pub use dashboard::DashboardState;
pub use render::draw_ui;
