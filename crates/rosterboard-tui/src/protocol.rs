// Messages passed between the TUI and the app task over mpsc channels.

use rosterboard_core::model::PlayerRecord;
use rosterboard_core::session::{FileSelection, LoadOutcome, TableRequest};

/// Commands sent from the TUI to the app task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Validate a roster/pool pair and build the table for the first team.
    Load(FileSelection),
    /// Rebuild under the request's team filter; rows stay in file order.
    ApplyTeam(TableRequest),
    /// Rebuild, then run the sort pass and the group pass.
    ApplySort(TableRequest),
    Quit,
}

/// Results pushed from the app task to the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiUpdate {
    /// A file pair was validated (and built, when the pool is usable).
    Loaded {
        files: FileSelection,
        outcome: Box<LoadOutcome>,
    },
    /// A fresh table from a rebuild.
    Table(Vec<PlayerRecord>),
    /// Status line text, usually an error message.
    Status(String),
}
