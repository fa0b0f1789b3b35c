// CSV source files: header validation and row loading.
//
// Two file kinds are understood: the league roster export and the player
// pool (rankings) export. Both are plain comma-separated text identified by
// an exact header row.

pub mod discovery;

use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// Headers
// ---------------------------------------------------------------------------

/// Exact header row of a league roster file.
pub const ROSTER_HEADER: [&str; 10] = [
    "ID",
    "Last Name",
    "First Name",
    "Team ID",
    "Team Name",
    "Status",
    "Status Details",
    "Position",
    "Eligible Positions",
    "Image",
];

/// Exact header row of a player pool file.
pub const POOL_HEADER: [&str; 9] = [
    "RK",
    "TIERS",
    "PLAYER NAME",
    "TEAM",
    "POS",
    "BYE WEEK",
    "AGE",
    "SOS SEASON",
    "ECR VS. ADP",
];

/// Which of the two source files a path is expected to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Roster,
    Pool,
}

impl FileKind {
    pub fn expected_header(&self) -> &'static [&'static str] {
        match self {
            FileKind::Roster => &ROSTER_HEADER,
            FileKind::Pool => &POOL_HEADER,
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Roster => write!(f, "roster"),
            FileKind::Pool => write!(f, "player pool"),
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("invalid player pool file: {path}")]
    InvalidPoolFile { path: String },

    #[error("invalid league roster file: {path}")]
    InvalidRosterFile { path: String },

    #[error("no CSV files found in {}", .dir.display())]
    NoEligibleFiles { dir: PathBuf },
}

impl SourceError {
    /// Status line text shown to the user for this error.
    pub fn user_message(&self) -> &'static str {
        match self {
            SourceError::InvalidPoolFile { .. } => INVALID_POOL_MESSAGE,
            SourceError::InvalidRosterFile { .. } => ROSTER_FALLBACK_MESSAGE,
            SourceError::NoEligibleFiles { .. } => NO_FILES_MESSAGE,
            SourceError::Io { .. } | SourceError::Csv { .. } => READ_FAILED_MESSAGE,
        }
    }

    fn csv(path: &Path, source: csv::Error) -> Self {
        SourceError::Csv {
            path: path.display().to_string(),
            source,
        }
    }
}

pub const INVALID_POOL_MESSAGE: &str = "Invalid Pro CSV File";
pub const INVALID_ROSTER_MESSAGE: &str = "Invalid League CSV File";
pub const ROSTER_FALLBACK_MESSAGE: &str = "Invalid League CSV File: Continuing with Pro CSV File";
pub const NO_FILES_MESSAGE: &str = "Not enough CSV files in directory";
pub const READ_FAILED_MESSAGE: &str = "Failed to read CSV File";

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// One data row of a league roster file, in column order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RosterEntry {
    pub id: String,
    pub last_name: String,
    pub first_name: String,
    pub team_id: String,
    pub team_name: String,
    pub status: String,
    pub status_details: String,
    pub position: String,
    pub eligible_positions: String,
    pub image: String,
}

impl RosterEntry {
    /// Display name used for pool lookups: `First Last`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One data row of a player pool file, in column order. Values are kept
/// as text; numeric coercion happens when a `PlayerRecord` is built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PoolEntry {
    pub rank: String,
    pub tier: String,
    pub player_name: String,
    pub team: String,
    pub position: String,
    pub bye_week: String,
    pub age: String,
    pub season_strength_of_schedule: String,
    pub ecr_vs_adp: String,
}

// ---------------------------------------------------------------------------
// Header validation
// ---------------------------------------------------------------------------

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).flexible(true);
    builder
}

fn header_matches_reader<R: Read>(rdr: R, kind: FileKind) -> Result<bool, csv::Error> {
    let mut reader = reader_builder().from_reader(rdr);
    let header = reader.headers()?;
    Ok(header.iter().eq(kind.expected_header().iter().copied()))
}

/// Check only the first row of `path` against the header of `kind`.
///
/// Unreadable and empty files are invalid. Never returns an error; failures
/// are logged and reported as `false`.
pub fn validate(path: &Path, kind: FileKind) -> bool {
    let file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(e) => {
            warn!("cannot open {} file {}: {}", kind, path.display(), e);
            return false;
        }
    };
    match header_matches_reader(file, kind) {
        Ok(true) => true,
        Ok(false) => {
            debug!("{} has an unexpected {} header", path.display(), kind);
            false
        }
        Err(e) => {
            warn!("cannot read header of {}: {}", path.display(), e);
            false
        }
    }
}

/// Like [`validate`] but returns the matching `Invalid*File` error.
pub fn require_valid(path: &Path, kind: FileKind) -> Result<(), SourceError> {
    if validate(path, kind) {
        return Ok(());
    }
    let path = path.display().to_string();
    Err(match kind {
        FileKind::Pool => SourceError::InvalidPoolFile { path },
        FileKind::Roster => SourceError::InvalidRosterFile { path },
    })
}

// ---------------------------------------------------------------------------
// Reader-based loaders
// ---------------------------------------------------------------------------

/// Visit data rows (header skipped) in file order until `visit` returns
/// `false`. Rows shorter than the header are skipped with a warning; fields
/// past the header width are ignored.
pub(crate) fn for_each_row<R, T, F>(rdr: R, label: &str, mut visit: F) -> Result<(), csv::Error>
where
    R: Read,
    T: for<'de> Deserialize<'de>,
    F: FnMut(T) -> bool,
{
    let mut reader = reader_builder().from_reader(rdr);
    let width = reader.headers()?.len();
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) if is_row_error(&e) => {
                warn!("skipping malformed row in {}: {}", label, e);
                continue;
            }
            Err(e) => return Err(e),
        };
        if record.len() < width {
            warn!(
                "skipping short row in {}: {} of {} fields",
                label,
                record.len(),
                width
            );
            continue;
        }
        let record: csv::StringRecord = record.iter().take(width).collect();
        match record.deserialize::<T>(None) {
            Ok(row) => {
                if !visit(row) {
                    break;
                }
            }
            Err(e) => warn!("skipping malformed row in {}: {}", label, e),
        }
    }
    Ok(())
}

/// Errors confined to a single record; reading can continue after them.
fn is_row_error(e: &csv::Error) -> bool {
    matches!(e.kind(), csv::ErrorKind::Utf8 { .. })
}

fn load_rows_from_reader<R: Read, T>(rdr: R, label: &str) -> Result<Vec<T>, csv::Error>
where
    T: for<'de> Deserialize<'de>,
{
    let mut rows = Vec::new();
    for_each_row(rdr, label, |row| {
        rows.push(row);
        true
    })?;
    Ok(rows)
}

pub(crate) fn load_roster_from_reader<R: Read>(
    rdr: R,
    label: &str,
) -> Result<Vec<RosterEntry>, csv::Error> {
    load_rows_from_reader(rdr, label)
}

pub(crate) fn load_pool_from_reader<R: Read>(
    rdr: R,
    label: &str,
) -> Result<Vec<PoolEntry>, csv::Error> {
    load_rows_from_reader(rdr, label)
}

// ---------------------------------------------------------------------------
// Public path-based loaders
// ---------------------------------------------------------------------------

pub(crate) fn open(path: &Path) -> Result<std::fs::File, SourceError> {
    std::fs::File::open(path).map_err(|e| SourceError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load every data row of a roster file.
pub fn load_roster(path: &Path) -> Result<Vec<RosterEntry>, SourceError> {
    let file = open(path)?;
    let label = path.display().to_string();
    load_roster_from_reader(file, &label).map_err(|e| SourceError::csv(path, e))
}

/// Load every data row of a player pool file.
pub fn load_pool(path: &Path) -> Result<Vec<PoolEntry>, SourceError> {
    let file = open(path)?;
    let label = path.display().to_string();
    load_pool_from_reader(file, &label).map_err(|e| SourceError::csv(path, e))
}

/// Stream pool rows from `path`, stopping early when `visit` returns `false`.
pub fn scan_pool<F>(path: &Path, visit: F) -> Result<(), SourceError>
where
    F: FnMut(PoolEntry) -> bool,
{
    let file = open(path)?;
    let label = path.display().to_string();
    for_each_row(file, &label, visit).map_err(|e| SourceError::csv(path, e))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
