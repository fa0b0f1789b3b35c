// Team filter options derived from the roster file.

use std::io::Read;
use std::path::Path;

use crate::source::{self, RosterEntry, SourceError};
use crate::table::{TeamFilter, ALL_PLAYERS};

/// Filter labels for the team selector.
///
/// An invalid roster offers only "All Players". A valid roster offers each
/// distinct team name in first-occurrence order, then "All Rostered
/// Players", "All Unrostered Players" and "All Players".
pub fn list_teams(roster_path: &Path, roster_valid: bool) -> Result<Vec<String>, SourceError> {
    if !roster_valid {
        return Ok(vec![ALL_PLAYERS.to_string()]);
    }
    let file = source::open(roster_path)?;
    list_teams_from_reader(file).map_err(|e| SourceError::Csv {
        path: roster_path.display().to_string(),
        source: e,
    })
}

fn teams_from_entries(entries: &[RosterEntry]) -> Vec<String> {
    let mut teams: Vec<String> = Vec::new();
    for entry in entries {
        if !teams.iter().any(|t| *t == entry.team_name) {
            teams.push(entry.team_name.clone());
        }
    }
    teams.extend(TeamFilter::SYNTHETIC.iter().map(|f| f.label().to_string()));
    teams
}

fn list_teams_from_reader<R: Read>(rdr: R) -> Result<Vec<String>, csv::Error> {
    let entries = source::load_roster_from_reader(rdr, "roster")?;
    Ok(teams_from_entries(&entries))
}
