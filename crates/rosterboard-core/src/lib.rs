// Library root: CSV sources, record matching, table building and ordering
// for the roster board. The terminal front end lives in rosterboard-tui.

pub mod config;
pub mod matcher;
pub mod model;
pub mod order;
pub mod session;
pub mod source;
pub mod table;
pub mod teams;
