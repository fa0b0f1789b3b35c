// Library root: re-exports the front-end modules so integration tests can
// drive the app loop and the view state directly.

pub mod app;
pub mod protocol;
pub mod tui;
