// Record matcher: look a player name up in the pool and build a table row.
//
// The pool is scanned in file order and the first row whose player name
// equals the query, or contains it, wins. There is no best-match scoring,
// so a short query like "Smith" resolves to whichever Smith appears first.
// `MatchMode::Exact` turns the containment rule off.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::model::{coerce_count, coerce_signed, star_digit, strip_non_alpha, PlayerRecord};
use crate::source::{self, PoolEntry, SourceError};

/// How a query name is compared against pool player names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Equal, or the query is a substring of the pool name.
    #[default]
    Substring,
    /// Equal only.
    Exact,
}

impl PoolEntry {
    /// Whether this row answers a lookup for `name`.
    pub fn matches(&self, name: &str, mode: MatchMode) -> bool {
        match mode {
            MatchMode::Substring => self.player_name == name || self.player_name.contains(name),
            MatchMode::Exact => self.player_name == name,
        }
    }

    /// Table row built from this pool row.
    pub fn to_record(&self) -> PlayerRecord {
        PlayerRecord {
            name: self.player_name.clone(),
            position: strip_non_alpha(&self.position),
            age: coerce_count(&self.age),
            rank: coerce_count(&self.rank),
            bye_week: coerce_count(&self.bye_week),
            star_rating: star_digit(&self.season_strength_of_schedule),
            ecr_vs_adp: coerce_signed(&self.ecr_vs_adp),
            team: self.team.trim().to_string(),
            matched: true,
        }
    }
}

/// Match `name` against rows already loaded from a pool file.
pub fn find_match(
    pool: &[PoolEntry],
    name: &str,
    fallback_position: &str,
    mode: MatchMode,
) -> PlayerRecord {
    match pool.iter().find(|entry| entry.matches(name, mode)) {
        Some(entry) => entry.to_record(),
        None => {
            debug!("no pool match for '{}'", name);
            PlayerRecord::unmatched(name, fallback_position)
        }
    }
}

/// Stream the pool file at `pool_path` and return the first row matching
/// `name`, or the default record when nothing matches.
///
/// Reading stops at the first match. Only I/O and CSV failures are errors;
/// an unmatched name is not.
///
/// This is the one-off lookup. `build_table` does not call it per row: it
/// loads the pool once and matches in memory with [`find_match`], which
/// gives the same first-match result.
pub fn match_player(
    pool_path: &Path,
    name: &str,
    fallback_position: &str,
    mode: MatchMode,
) -> Result<PlayerRecord, SourceError> {
    let mut found = None;
    source::scan_pool(pool_path, |entry| {
        if entry.matches(name, mode) {
            found = Some(entry.to_record());
            return false;
        }
        true
    })?;
    Ok(found.unwrap_or_else(|| {
        debug!("no pool match for '{}' in {}", name, pool_path.display());
        PlayerRecord::unmatched(name, fallback_position)
    }))
}
