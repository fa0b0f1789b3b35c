// Output row type and numeric field coercion.

use tracing::debug;

/// Team abbreviation given to players with no pool match.
pub const UNKNOWN_TEAM: &str = "unknown";

/// Column headers of the rendered table, in `PlayerRecord` field order.
pub const TABLE_COLUMNS: [&str; 8] = [
    "Name", "Position", "Age", "Rank", "Bye", "Stars", "ECR/ADP", "Team",
];

/// One row of the merged player table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRecord {
    pub name: String,
    pub position: String,
    pub age: u32,
    pub rank: u32,
    pub bye_week: u32,
    /// Single digit, 0-9.
    pub star_rating: u8,
    pub ecr_vs_adp: i32,
    pub team: String,
    /// False when the row was filled with defaults because no pool row
    /// matched.
    pub matched: bool,
}

impl PlayerRecord {
    /// Default record for a name that has no pool match.
    ///
    /// Numeric fields are zero and the team is [`UNKNOWN_TEAM`]. A fallback
    /// position of `DEF` is reported as `DST`.
    pub fn unmatched(name: &str, fallback_position: &str) -> Self {
        PlayerRecord {
            name: name.to_string(),
            position: normalize_fallback_position(fallback_position),
            age: 0,
            rank: 0,
            bye_week: 0,
            star_rating: 0,
            ecr_vs_adp: 0,
            team: UNKNOWN_TEAM.to_string(),
            matched: false,
        }
    }

    /// Whether this record came from the default (no match) path.
    pub fn is_unmatched(&self) -> bool {
        !self.matched
    }

    /// Cell texts in [`TABLE_COLUMNS`] order.
    pub fn cells(&self) -> [String; 8] {
        [
            self.name.clone(),
            self.position.clone(),
            self.age.to_string(),
            self.rank.to_string(),
            self.bye_week.to_string(),
            self.star_rating.to_string(),
            self.ecr_vs_adp.to_string(),
            self.team.clone(),
        ]
    }
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

/// `DEF` -> `DST`; anything else passes through trimmed.
pub fn normalize_fallback_position(position: &str) -> String {
    let position = position.trim();
    if position == "DEF" {
        "DST".to_string()
    } else {
        position.to_string()
    }
}

/// Keep only alphabetic characters (`"QB1"` -> `"QB"`).
pub fn strip_non_alpha(field: &str) -> String {
    field.chars().filter(|c| c.is_alphabetic()).collect()
}

/// Parse a signed integer field. Placeholders (`-`, empty) and garbage
/// become 0; decimal values are truncated toward zero.
pub fn coerce_signed(field: &str) -> i32 {
    let field = field.trim();
    if field.is_empty() || field == "-" {
        return 0;
    }
    if let Ok(v) = field.parse::<i32>() {
        return v;
    }
    match field.parse::<f64>() {
        Ok(v) if v.is_finite() => v.trunc().clamp(i32::MIN as f64, i32::MAX as f64) as i32,
        _ => {
            debug!("unparsable numeric field '{}', using 0", field);
            0
        }
    }
}

/// Like [`coerce_signed`] but clamps negatives to 0.
pub fn coerce_count(field: &str) -> u32 {
    coerce_signed(field).max(0) as u32
}

/// Star rating: the first character of the field when it is a digit.
pub fn star_digit(field: &str) -> u8 {
    field
        .trim()
        .chars()
        .next()
        .and_then(|c| c.to_digit(10))
        .map(|d| d as u8)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmatched_record_defaults() {
        let rec = PlayerRecord::unmatched("Nobody Here", "WR");
        assert_eq!(rec.name, "Nobody Here");
        assert_eq!(rec.position, "WR");
        assert_eq!(rec.age, 0);
        assert_eq!(rec.rank, 0);
        assert_eq!(rec.bye_week, 0);
        assert_eq!(rec.star_rating, 0);
        assert_eq!(rec.ecr_vs_adp, 0);
        assert_eq!(rec.team, "unknown");
        assert!(rec.is_unmatched());
    }

    #[test]
    fn def_fallback_becomes_dst() {
        assert_eq!(PlayerRecord::unmatched("Bears", "DEF").position, "DST");
        assert_eq!(normalize_fallback_position("DST"), "DST");
        assert_eq!(normalize_fallback_position(""), "");
    }

    #[test]
    fn strip_non_alpha_keeps_letters() {
        assert_eq!(strip_non_alpha("QB1"), "QB");
        assert_eq!(strip_non_alpha("\"WR12\""), "WR");
        assert_eq!(strip_non_alpha("DST"), "DST");
        assert_eq!(strip_non_alpha("12"), "");
    }

    #[test]
    fn coerce_placeholders_to_zero() {
        assert_eq!(coerce_signed("-"), 0);
        assert_eq!(coerce_signed(""), 0);
        assert_eq!(coerce_signed("  "), 0);
        assert_eq!(coerce_signed("n/a"), 0);
        assert_eq!(coerce_count("-"), 0);
    }

    #[test]
    fn coerce_integers_and_decimals() {
        assert_eq!(coerce_signed("25"), 25);
        assert_eq!(coerce_signed(" 7 "), 7);
        assert_eq!(coerce_signed("-1.0"), -1);
        assert_eq!(coerce_signed("+3"), 3);
        assert_eq!(coerce_signed("2.9"), 2);
        assert_eq!(coerce_signed("NaN"), 0);
    }

    #[test]
    fn counts_never_negative() {
        assert_eq!(coerce_count("-4"), 0);
        assert_eq!(coerce_count("12"), 12);
    }

    #[test]
    fn star_digit_reads_first_character() {
        assert_eq!(star_digit("1.0"), 1);
        assert_eq!(star_digit("4"), 4);
        assert_eq!(star_digit("45"), 4);
        assert_eq!(star_digit(""), 0);
        assert_eq!(star_digit("-"), 0);
    }

    #[test]
    fn cells_follow_column_order() {
        let rec = PlayerRecord {
            name: "John Smith".into(),
            position: "QB".into(),
            age: 25,
            rank: 1,
            bye_week: 5,
            star_rating: 1,
            ecr_vs_adp: -1,
            team: "NE".into(),
            matched: true,
        };
        assert_eq!(
            rec.cells(),
            ["John Smith", "QB", "25", "1", "5", "1", "-1", "NE"].map(String::from)
        );
    }
}
