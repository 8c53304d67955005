//! Loading expectations from fixture files.

pub mod error;
pub mod fixture;
pub mod parser;

pub use error::ConfigError;
pub use fixture::{Fixture, FixtureAction, FixtureBody};

use crate::types::action::Action;
use crate::types::fingerprint::RequestFingerprint;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Read the fixtures of one file.
pub fn load_fixture_file(path: &Path) -> Result<Vec<Fixture>, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parser::parse_config(&content, path)
}

/// Expectations of every fixture file matching the glob `pattern`.
///
/// Files are read in path order and fixtures in file order. The first invalid
/// fixture aborts loading.
pub fn load_fixtures(pattern: &str) -> Result<Vec<(RequestFingerprint, Action)>, ConfigError> {
    let mut expectations = Vec::new();
    let mut files = 0;

    for entry in glob::glob(pattern)? {
        let path = entry?;
        if !path.is_file() {
            continue;
        }

        let fixtures = load_fixture_file(&path)?;
        debug!(path = %path.display(), count = fixtures.len(), "loaded fixtures");
        for fixture in &fixtures {
            let expectation = fixture
                .to_expectation()
                .map_err(|source| ConfigError::Invalid {
                    path: path.clone(),
                    source,
                })?;
            expectations.push(expectation);
        }
        files += 1;
    }

    if files == 0 {
        warn!(pattern, "no fixture file matches");
    }
    Ok(expectations)
}
