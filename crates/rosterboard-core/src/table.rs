// Table builder: merge roster rows and pool rows under a team filter.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use tracing::info;

use crate::matcher::{find_match, MatchMode};
use crate::model::PlayerRecord;
use crate::source::{self, SourceError};

pub const ALL_ROSTERED: &str = "All Rostered Players";
pub const ALL_UNROSTERED: &str = "All Unrostered Players";
pub const ALL_PLAYERS: &str = "All Players";

/// Which rows a rebuilt table shows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TeamFilter {
    /// Roster rows whose team name equals this value exactly.
    Team(String),
    AllRostered,
    AllUnrostered,
    AllPlayers,
}

impl TeamFilter {
    /// The three filters appended after real team names, in display order.
    pub const SYNTHETIC: [TeamFilter; 3] = [
        TeamFilter::AllRostered,
        TeamFilter::AllUnrostered,
        TeamFilter::AllPlayers,
    ];

    /// Parse a selector label. Anything that is not a synthetic label is a
    /// team name.
    pub fn from_label(label: &str) -> Self {
        match label {
            ALL_ROSTERED => TeamFilter::AllRostered,
            ALL_UNROSTERED => TeamFilter::AllUnrostered,
            ALL_PLAYERS => TeamFilter::AllPlayers,
            team => TeamFilter::Team(team.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TeamFilter::Team(name) => name,
            TeamFilter::AllRostered => ALL_ROSTERED,
            TeamFilter::AllUnrostered => ALL_UNROSTERED,
            TeamFilter::AllPlayers => ALL_PLAYERS,
        }
    }

    fn admits_roster_team(&self, team_name: &str) -> bool {
        match self {
            TeamFilter::Team(name) => name == team_name,
            _ => true,
        }
    }

    fn includes_unrostered(&self) -> bool {
        matches!(self, TeamFilter::AllUnrostered | TeamFilter::AllPlayers)
    }
}

impl fmt::Display for TeamFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Build the table for one filter selection.
///
/// 1. With a valid roster, every roster row admitted by the filter is
///    matched against the pool (`First Last`, fallback position = eligible
///    positions).
/// 2. For the "all unrostered" and "all players" filters, every pool row
///    whose name is not among the step-1 names is matched and appended.
/// 3. For "all unrostered", the step-1 rows are then dropped.
///
/// Both files are read fresh on every call.
pub fn build_table(
    roster_path: &Path,
    pool_path: &Path,
    roster_valid: bool,
    filter: &TeamFilter,
    mode: MatchMode,
) -> Result<Vec<PlayerRecord>, SourceError> {
    let pool = source::load_pool(pool_path)?;

    let mut rostered = Vec::new();
    if roster_valid {
        for entry in source::load_roster(roster_path)? {
            if filter.admits_roster_team(&entry.team_name) {
                rostered.push(find_match(
                    &pool,
                    &entry.full_name(),
                    &entry.eligible_positions,
                    mode,
                ));
            }
        }
    }

    let mut unrostered = Vec::new();
    if filter.includes_unrostered() {
        let taken: HashSet<&str> = rostered.iter().map(|r| r.name.as_str()).collect();
        for entry in &pool {
            if !taken.contains(entry.player_name.as_str()) {
                unrostered.push(find_match(&pool, &entry.player_name, "", mode));
            }
        }
    }

    let rows = if *filter == TeamFilter::AllUnrostered {
        unrostered
    } else {
        rostered.extend(unrostered);
        rostered
    };

    info!(
        "built table for '{}': {} rows (roster valid: {})",
        filter,
        rows.len(),
        roster_valid
    );
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse_to_filters() {
        assert_eq!(TeamFilter::from_label("All Players"), TeamFilter::AllPlayers);
        assert_eq!(
            TeamFilter::from_label("All Rostered Players"),
            TeamFilter::AllRostered
        );
        assert_eq!(
            TeamFilter::from_label("All Unrostered Players"),
            TeamFilter::AllUnrostered
        );
        assert_eq!(
            TeamFilter::from_label("Gridiron Gang"),
            TeamFilter::Team("Gridiron Gang".into())
        );
    }

    #[test]
    fn label_round_trips() {
        for filter in TeamFilter::SYNTHETIC {
            assert_eq!(TeamFilter::from_label(filter.label()), filter);
        }
        let team = TeamFilter::Team("Blitz Bunch".into());
        assert_eq!(TeamFilter::from_label(team.label()), team);
    }

    #[test]
    fn team_filter_admits_only_its_team() {
        let filter = TeamFilter::Team("Blitz Bunch".into());
        assert!(filter.admits_roster_team("Blitz Bunch"));
        assert!(!filter.admits_roster_team("blitz bunch"));
        assert!(!filter.includes_unrostered());
        assert!(TeamFilter::AllRostered.admits_roster_team("anything"));
        assert!(!TeamFilter::AllRostered.includes_unrostered());
        assert!(TeamFilter::AllPlayers.includes_unrostered());
        assert!(TeamFilter::AllUnrostered.includes_unrostered());
    }
}
