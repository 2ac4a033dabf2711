//! Seed files: a JSON array of `{id, title, author, genre}` objects.

use std::fmt;
use std::path::Path;

use crate::types::Item;

/// Parse seed JSON.
pub fn parse_seed(json: &str) -> Result<Vec<Item>, SeedError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a seed file.
pub fn load_seed_file(path: &Path) -> Result<Vec<Item>, SeedError> {
    let contents = std::fs::read_to_string(path)?;
    parse_seed(&contents)
}

/// Error returned when a seed file cannot be loaded.
#[derive(Debug)]
pub enum SeedError {
    /// The file could not be read.
    Io(std::io::Error),
    /// The contents are not a valid item list.
    Json(serde_json::Error),
}

impl fmt::Display for SeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read seed file: {e}"),
            Self::Json(e) => write!(f, "invalid seed file: {e}"),
        }
    }
}

impl std::error::Error for SeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SeedError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItemId;
    use tempfile::tempdir;

    #[test]
    fn test_load_seed_file() {
        let dir = tempdir().expect("create temp dir");
        let path = dir.path().join("seed.json");
        std::fs::write(
            &path,
            r#"[
                {"id": 1, "title": "Naruto", "author": "Kishimoto", "genre": "Action"},
                {"id": 2, "title": "Bleach", "author": "Kubo", "genre": "Action, Drama"}
            ]"#,
        )
        .expect("write seed");

        let items = load_seed_file(&path).expect("load seed");
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].id, ItemId(2));
        assert_eq!(items[1].genre, "Action, Drama");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().expect("create temp dir");
        let err = load_seed_file(&dir.path().join("absent.json")).expect_err("missing");
        assert!(matches!(err, SeedError::Io(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_seed(r#"[{"id": "one"}]"#).expect_err("malformed");
        assert!(matches!(err, SeedError::Json(_)));
        assert!(err.to_string().starts_with("invalid seed file:"));
    }
}
