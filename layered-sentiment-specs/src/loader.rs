//! Fixture file loading.

use crate::{parse_fixture, SentimentFixture, SpecError, SpecResult};
use std::fs;
use std::path::Path;

/// File holding the expected-failures ledger; never loaded as a fixture.
pub const EXPECTED_FAILURES_FILE: &str = "expected-failures.toml";

/// Load a single fixture file.
pub fn load_fixture(path: &Path) -> SpecResult<SentimentFixture> {
    let content = fs::read_to_string(path).map_err(|e| SpecError::Load {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_fixture(&path.display().to_string(), &content)
}

/// Load all fixtures from a directory (glob: **/*.toml), sorted by name.
pub fn load_all_fixtures(dir: &Path) -> SpecResult<Vec<(String, SentimentFixture)>> {
    let mut fixtures = Vec::new();
    load_fixtures_recursive(dir, dir, &mut fixtures)?;
    fixtures.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(fixtures)
}

fn load_fixtures_recursive(
    base: &Path,
    dir: &Path,
    fixtures: &mut Vec<(String, SentimentFixture)>,
) -> SpecResult<()> {
    if !dir.is_dir() {
        return Ok(());
    }

    for entry in fs::read_dir(dir).map_err(|e| SpecError::Load {
        path: dir.display().to_string(),
        message: e.to_string(),
    })? {
        let entry = entry.map_err(|e| SpecError::Load {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;
        let path = entry.path();

        if path.is_dir() {
            load_fixtures_recursive(base, &path, fixtures)?;
        } else if path.extension().map_or(false, |e| e == "toml")
            && path.file_name().map_or(true, |n| n != EXPECTED_FAILURES_FILE)
        {
            let relative = path.strip_prefix(base).unwrap_or(&path);
            let fixture = load_fixture(&path)?;
            fixtures.push((relative.display().to_string(), fixture));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_fixture() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("fixtures")
            .join("window-negation.toml");
        let fixture = load_fixture(&path).unwrap();
        assert!(fixture.title.is_some());
    }

    #[test]
    fn test_load_all_fixtures() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
        let fixtures = load_all_fixtures(&dir).unwrap();
        assert!(fixtures.len() >= 6);
        assert!(fixtures.iter().all(|(name, _)| name != EXPECTED_FAILURES_FILE));
    }

    #[test]
    fn test_nested_and_skipped_files() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();

        let fixture = "text = \"Jó.\"\n[expect]\nlexical = \"positive\"\n";
        fs::File::create(nested.join("b.toml"))
            .unwrap()
            .write_all(fixture.as_bytes())
            .unwrap();
        fs::File::create(dir.path().join("a.toml"))
            .unwrap()
            .write_all(fixture.as_bytes())
            .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::write(dir.path().join(EXPECTED_FAILURES_FILE), "").unwrap();

        let names: Vec<String> = load_all_fixtures(dir.path())
            .unwrap()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        let expected = vec![
            "a.toml".to_string(),
            Path::new("nested").join("b.toml").display().to_string(),
        ];
        assert_eq!(names, expected);
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let err = load_fixture(Path::new("/nonexistent/fixture.toml")).unwrap_err();
        assert!(matches!(err, SpecError::Load { .. }));
    }
}
