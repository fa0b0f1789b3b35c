// TUI widget modules for each screen zone.

pub mod controls;
pub mod players;
pub mod status_bar;
