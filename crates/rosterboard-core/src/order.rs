// Sort/group engine.
//
// Two stable passes: the sort pass orders rows by a column, then the group
// pass clusters them by another column. Because the second pass is stable,
// rows inside a group keep the order the sort pass gave them.

use std::cmp::Ordering;
use std::fmt;

use serde::Deserialize;

use crate::model::PlayerRecord;

// ---------------------------------------------------------------------------
// Keys and direction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(alias = "ascending")]
    Ascending,
    #[serde(alias = "descending")]
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }

    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// Columns available to the sort pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    None,
    Name,
    Rank,
    Stars,
    EcrVsAdp,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::None,
        SortKey::Name,
        SortKey::Rank,
        SortKey::Stars,
        SortKey::EcrVsAdp,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::None => "None",
            SortKey::Name => "Name",
            SortKey::Rank => "Rank",
            SortKey::Stars => "Stars",
            SortKey::EcrVsAdp => "ECR vs ADP",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.label() == label)
    }

    fn compare(self, a: &PlayerRecord, b: &PlayerRecord) -> Ordering {
        match self {
            SortKey::None => Ordering::Equal,
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::Rank => a.rank.cmp(&b.rank),
            SortKey::Stars => a.star_rating.cmp(&b.star_rating),
            SortKey::EcrVsAdp => a.ecr_vs_adp.cmp(&b.ecr_vs_adp),
        }
    }
}

/// Columns available to the group pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupKey {
    #[default]
    None,
    Team,
    Position,
    Age,
    ByeWeek,
    Stars,
}

impl GroupKey {
    pub const ALL: [GroupKey; 6] = [
        GroupKey::None,
        GroupKey::Team,
        GroupKey::Position,
        GroupKey::Age,
        GroupKey::ByeWeek,
        GroupKey::Stars,
    ];

    pub fn label(self) -> &'static str {
        match self {
            GroupKey::None => "None",
            GroupKey::Team => "Team",
            GroupKey::Position => "Position",
            GroupKey::Age => "Age",
            GroupKey::ByeWeek => "Bye Week",
            GroupKey::Stars => "Stars",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.label() == label)
    }

    fn compare(self, a: &PlayerRecord, b: &PlayerRecord) -> Ordering {
        match self {
            GroupKey::None => Ordering::Equal,
            GroupKey::Team => a.team.cmp(&b.team),
            GroupKey::Position => a.position.cmp(&b.position),
            GroupKey::Age => a.age.cmp(&b.age),
            GroupKey::ByeWeek => a.bye_week.cmp(&b.bye_week),
            GroupKey::Stars => a.star_rating.cmp(&b.star_rating),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Ordering request
// ---------------------------------------------------------------------------

/// Sort pass and group pass settings for one rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableOrder {
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    pub group_key: GroupKey,
    pub group_direction: SortDirection,
}

/// Apply the sort pass, then the group pass. Both passes are stable in
/// either direction; a `None` key leaves the rows as they are.
pub fn order(mut rows: Vec<PlayerRecord>, spec: &TableOrder) -> Vec<PlayerRecord> {
    if spec.sort_key != SortKey::None {
        rows.sort_by(|a, b| spec.sort_direction.apply(spec.sort_key.compare(a, b)));
    }
    if spec.group_key != GroupKey::None {
        rows.sort_by(|a, b| spec.group_direction.apply(spec.group_key.compare(a, b)));
    }
    rows
}
