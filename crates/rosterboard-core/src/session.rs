// Presentation-facing entry points.
//
// A front end holds no table state of its own between requests: it sends
// an immutable `TableRequest` and gets a fresh row list back. Validation
// results come as two independent `FileStatus` values, one per file.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::matcher::MatchMode;
use crate::model::PlayerRecord;
use crate::order::{order, TableOrder};
use crate::source::{
    self, FileKind, SourceError, INVALID_POOL_MESSAGE, INVALID_ROSTER_MESSAGE, NO_FILES_MESSAGE,
    ROSTER_FALLBACK_MESSAGE,
};
use crate::table::{build_table, TeamFilter};
use crate::teams::list_teams;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// The roster/pool pair chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSelection {
    pub roster: PathBuf,
    pub pool: PathBuf,
}

/// Result of checking one file's header, with the text to show for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Valid,
    Invalid(&'static str),
}

impl FileStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, FileStatus::Valid)
    }

    /// Status text; empty for a valid file.
    pub fn message(&self) -> &'static str {
        match self {
            FileStatus::Valid => "",
            FileStatus::Invalid(message) => *message,
        }
    }
}

/// Independent validation results for the two files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validation {
    pub pool: FileStatus,
    pub roster: FileStatus,
}

impl Validation {
    /// Check both headers.
    ///
    /// A bad roster next to a good pool is a warning (the table falls back to
    /// pool data); next to a bad pool it is reported as a plain error.
    pub fn check(files: &FileSelection) -> Self {
        let pool_ok = source::validate(&files.pool, FileKind::Pool);
        let roster_ok = source::validate(&files.roster, FileKind::Roster);

        let pool = if pool_ok {
            FileStatus::Valid
        } else {
            FileStatus::Invalid(INVALID_POOL_MESSAGE)
        };
        let roster = match (roster_ok, pool_ok) {
            (true, _) => FileStatus::Valid,
            (false, true) => FileStatus::Invalid(ROSTER_FALLBACK_MESSAGE),
            (false, false) => FileStatus::Invalid(INVALID_ROSTER_MESSAGE),
        };
        Validation { pool, roster }
    }

    /// State reported when the data directory holds no CSV files.
    pub fn no_files() -> Self {
        Validation {
            pool: FileStatus::Invalid(NO_FILES_MESSAGE),
            roster: FileStatus::Invalid(NO_FILES_MESSAGE),
        }
    }

    /// A table can only be built from a valid pool file.
    pub fn can_build(&self) -> bool {
        self.pool.is_valid()
    }

    pub fn roster_valid(&self) -> bool {
        self.roster.is_valid()
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Everything one rebuild needs. Built by the front end per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRequest {
    pub files: FileSelection,
    pub roster_valid: bool,
    pub team_filter: TeamFilter,
    /// `None` keeps file order.
    pub order: Option<TableOrder>,
}

/// What loading a file pair produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    pub validation: Validation,
    /// Team selector options; empty when the pool is invalid.
    pub teams: Vec<String>,
    /// Initial table for the first team option, in file order.
    pub rows: Vec<PlayerRecord>,
}

/// Stateless front door to the core; carries only settings from config.
#[derive(Debug, Clone, Copy, Default)]
pub struct Session {
    mode: MatchMode,
}

impl Session {
    pub fn new(mode: MatchMode) -> Self {
        Session { mode }
    }

    pub fn match_mode(&self) -> MatchMode {
        self.mode
    }

    /// Validate a file pair and, when the pool is usable, list the teams and
    /// build the table for the first team option.
    pub fn load(&self, files: &FileSelection) -> Result<LoadOutcome, SourceError> {
        let validation = Validation::check(files);
        if !validation.can_build() {
            warn!(
                "pool file {} failed validation; no table built",
                files.pool.display()
            );
            return Ok(LoadOutcome {
                validation,
                teams: Vec::new(),
                rows: Vec::new(),
            });
        }
        if !validation.roster_valid() {
            warn!(
                "roster file {} failed validation; showing pool data only",
                files.roster.display()
            );
        }

        let teams = list_teams(&files.roster, validation.roster_valid())?;
        let first = teams
            .first()
            .map(|label| TeamFilter::from_label(label))
            .unwrap_or(TeamFilter::AllPlayers);
        let rows = build_table(
            &files.roster,
            &files.pool,
            validation.roster_valid(),
            &first,
            self.mode,
        )?;
        info!(
            "loaded {} + {}: {} teams, {} rows",
            files.roster.display(),
            files.pool.display(),
            teams.len(),
            rows.len()
        );
        Ok(LoadOutcome {
            validation,
            teams,
            rows,
        })
    }

    /// Rebuild the table from the source files for one request.
    pub fn rebuild(&self, request: &TableRequest) -> Result<Vec<PlayerRecord>, SourceError> {
        source::require_valid(&request.files.pool, FileKind::Pool)?;
        let rows = build_table(
            &request.files.roster,
            &request.files.pool,
            request.roster_valid,
            &request.team_filter,
            self.mode,
        )?;
        Ok(match &request.order {
            Some(spec) => order(rows, spec),
            None => rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_status_messages() {
        assert!(FileStatus::Valid.is_valid());
        assert_eq!(FileStatus::Valid.message(), "");
        let bad = FileStatus::Invalid(INVALID_POOL_MESSAGE);
        assert!(!bad.is_valid());
        assert_eq!(bad.message(), "Invalid Pro CSV File");
    }

    #[test]
    fn no_files_blocks_building() {
        let v = Validation::no_files();
        assert!(!v.can_build());
        assert!(!v.roster_valid());
        assert_eq!(v.pool.message(), "Not enough CSV files in directory");
        assert_eq!(v.roster.message(), "Not enough CSV files in directory");
    }

    #[test]
    fn missing_files_fail_both_checks() {
        let dir = std::env::temp_dir();
        let files = FileSelection {
            roster: dir.join("rosterboard_session_missing_roster.csv"),
            pool: dir.join("rosterboard_session_missing_pool.csv"),
        };
        let v = Validation::check(&files);
        assert_eq!(v.pool, FileStatus::Invalid("Invalid Pro CSV File"));
        assert_eq!(v.roster, FileStatus::Invalid("Invalid League CSV File"));

        let outcome = Session::default().load(&files).unwrap();
        assert!(outcome.teams.is_empty());
        assert!(outcome.rows.is_empty());
    }

    #[test]
    fn rebuild_refuses_invalid_pool() {
        let dir = std::env::temp_dir();
        let request = TableRequest {
            files: FileSelection {
                roster: dir.join("rosterboard_session_rebuild_roster.csv"),
                pool: dir.join("rosterboard_session_rebuild_pool.csv"),
            },
            roster_valid: false,
            team_filter: TeamFilter::AllPlayers,
            order: None,
        };
        assert!(matches!(
            Session::default().rebuild(&request),
            Err(SourceError::InvalidPoolFile { .. })
        ));
    }
}
