// Configuration loading and parsing (rosterboard.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::matcher::MatchMode;
use crate::order::{GroupKey, SortDirection, SortKey, TableOrder};

/// File name looked up in `config/` and in the platform config directory.
pub const CONFIG_FILE: &str = "rosterboard.toml";

const BUILT_IN_CONFIG: &str = include_str!("../defaults/rosterboard.toml");

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub data: DataConfig,
    pub match_mode: MatchMode,
    pub view: TableOrder,
    /// Where the settings came from; `None` for the built-in defaults.
    pub source: Option<PathBuf>,
}

impl Config {
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data.dir)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    pub dir: String,
    #[serde(default)]
    pub roster_file: Option<String>,
    #[serde(default)]
    pub pool_file: Option<String>,
}

// ---------------------------------------------------------------------------
// rosterboard.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    data: DataConfig,
    #[serde(default)]
    matching: MatchingSection,
    view: ViewSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct MatchingSection {
    #[serde(default)]
    mode: MatchMode,
}

/// Key labels are kept as text here and checked in `validate`.
#[derive(Debug, Clone, Deserialize)]
struct ViewSection {
    sort_key: String,
    #[serde(default)]
    sort_direction: SortDirection,
    group_key: String,
    #[serde(default)]
    group_direction: SortDirection,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Parse config text; `path` is only used in error reports.
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let file: ConfigFile = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(file, Some(path.to_path_buf()))
}

/// Load `config/rosterboard.toml` under `base_dir`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    parse_config(&text, &path)
}

/// The defaults shipped in `defaults/rosterboard.toml`.
pub fn built_in() -> Result<Config, ConfigError> {
    let mut config = parse_config(BUILT_IN_CONFIG, Path::new("<built-in>"))?;
    config.source = None;
    Ok(config)
}

/// Platform config file location (e.g. `~/.config/rosterboard/rosterboard.toml`).
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "rosterboard")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Load settings relative to the current working directory, then from the
/// platform config directory, falling back to the built-in defaults.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    if cwd.join("config").join(CONFIG_FILE).exists() {
        return load_config_from(&cwd);
    }
    if let Some(path) = user_config_path().filter(|p| p.exists()) {
        let text = read_file(&path)?;
        return parse_config(&text, &path);
    }
    built_in()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(file: ConfigFile, source: Option<PathBuf>) -> Result<Config, ConfigError> {
    if file.data.dir.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.dir".into(),
            message: "must not be empty".into(),
        });
    }

    let preselected: &[(&str, &Option<String>)] = &[
        ("data.roster_file", &file.data.roster_file),
        ("data.pool_file", &file.data.pool_file),
    ];
    for (name, value) in preselected {
        if let Some(value) = value {
            let is_csv = Path::new(value)
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            if !is_csv {
                return Err(ConfigError::ValidationError {
                    field: name.to_string(),
                    message: format!("must name a .csv file, got {value:?}"),
                });
            }
        }
    }

    let sort_key =
        SortKey::from_label(&file.view.sort_key).ok_or_else(|| ConfigError::ValidationError {
            field: "view.sort_key".into(),
            message: format!("unknown sort key {:?}", file.view.sort_key),
        })?;
    let group_key =
        GroupKey::from_label(&file.view.group_key).ok_or_else(|| ConfigError::ValidationError {
            field: "view.group_key".into(),
            message: format!("unknown group key {:?}", file.view.group_key),
        })?;

    Ok(Config {
        data: file.data,
        match_mode: file.matching.mode,
        view: TableOrder {
            sort_key,
            sort_direction: file.view.sort_direction,
            group_key,
            group_direction: file.view.group_direction,
        },
        source,
    })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Write `text` as config/rosterboard.toml under a fresh temp dir.
    fn temp_config(name: &str, text: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("config").join(CONFIG_FILE), text).unwrap();
        tmp
    }

    fn expect_validation_field(err: ConfigError, expected: &str) {
        match &err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, expected),
            other => panic!("expected ValidationError, got: {other}"),
        }
    }

    #[test]
    fn built_in_defaults_load() {
        let config = built_in().expect("built-in config should be valid");
        assert_eq!(config.data.dir, ".");
        assert!(config.data.roster_file.is_none());
        assert!(config.data.pool_file.is_none());
        assert_eq!(config.match_mode, MatchMode::Substring);
        assert_eq!(config.view.sort_key, SortKey::Rank);
        assert_eq!(config.view.sort_direction, SortDirection::Ascending);
        assert_eq!(config.view.group_key, GroupKey::None);
        assert!(config.source.is_none());
    }

    #[test]
    fn load_from_config_dir() {
        let text = r#"
[data]
dir = "csv"
roster_file = "league.csv"
pool_file = "rankings.CSV"

[matching]
mode = "exact"

[view]
sort_key = "ECR vs ADP"
sort_direction = "descending"
group_key = "Bye Week"
group_direction = "ascending"
"#;
        let tmp = temp_config("rosterboard_config_full", text);
        let config = load_config_from(&tmp).expect("should load");
        assert_eq!(config.data_dir(), PathBuf::from("csv"));
        assert_eq!(config.data.roster_file.as_deref(), Some("league.csv"));
        assert_eq!(config.data.pool_file.as_deref(), Some("rankings.CSV"));
        assert_eq!(config.match_mode, MatchMode::Exact);
        assert_eq!(config.view.sort_key, SortKey::EcrVsAdp);
        assert_eq!(config.view.sort_direction, SortDirection::Descending);
        assert_eq!(config.view.group_key, GroupKey::ByeWeek);
        assert!(config.source.unwrap().ends_with(CONFIG_FILE));

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn matching_section_is_optional() {
        let text = BUILT_IN_CONFIG.replace("[matching]", "").replace("mode = \"substring\"", "");
        let config = parse_config(&text, Path::new("test.toml")).expect("should parse");
        assert_eq!(config.match_mode, MatchMode::Substring);
    }

    #[test]
    fn rejects_empty_data_dir() {
        let text = BUILT_IN_CONFIG.replace("dir = \".\"", "dir = \"  \"");
        let err = parse_config(&text, Path::new("test.toml")).unwrap_err();
        expect_validation_field(err, "data.dir");
    }

    #[test]
    fn rejects_non_csv_preselection() {
        let text = BUILT_IN_CONFIG.replace("# pool_file = \"rankings.csv\"", "pool_file = \"rankings.xlsx\"");
        let err = parse_config(&text, Path::new("test.toml")).unwrap_err();
        expect_validation_field(err, "data.pool_file");
    }

    #[test]
    fn rejects_unknown_sort_key() {
        let text = BUILT_IN_CONFIG.replace("sort_key = \"Rank\"", "sort_key = \"Team\"");
        let err = parse_config(&text, Path::new("test.toml")).unwrap_err();
        expect_validation_field(err, "view.sort_key");
    }

    #[test]
    fn rejects_unknown_group_key() {
        let text = BUILT_IN_CONFIG.replace("group_key = \"None\"", "group_key = \"Name\"");
        let err = parse_config(&text, Path::new("test.toml")).unwrap_err();
        expect_validation_field(err, "view.group_key");
    }

    #[test]
    fn parse_error_for_bad_match_mode() {
        let text = BUILT_IN_CONFIG.replace("mode = \"substring\"", "mode = \"fuzzy\"");
        let err = parse_config(&text, Path::new("test.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = temp_config("rosterboard_config_invalid", "this is not valid [[[ toml");
        match load_config_from(&tmp).unwrap_err() {
            ConfigError::ParseError { path, .. } => assert!(path.ends_with(CONFIG_FILE)),
            other => panic!("expected ParseError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_without_config_dir() {
        let tmp = std::env::temp_dir().join("rosterboard_config_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();
        match load_config_from(&tmp).unwrap_err() {
            ConfigError::FileNotFound { path } => assert!(path.ends_with(CONFIG_FILE)),
            other => panic!("expected FileNotFound, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }
}
