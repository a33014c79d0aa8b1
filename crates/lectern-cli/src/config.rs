//! Path resolution for the CLI.

use anyhow::{anyhow, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Snapshot file name inside the data directory.
const SNAPSHOT_FILENAME: &str = "corpus.json";

/// Returns the snapshot path, preferring an explicit override.
///
/// Without an override the snapshot lives in the platform data directory:
/// - Linux: `~/.local/share/lectern/corpus.json`
/// - macOS: `~/Library/Application Support/lectern/corpus.json`
pub fn snapshot_path(custom: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = custom {
        return Ok(path.to_path_buf());
    }

    ProjectDirs::from("", "", "lectern")
        .map(|dirs| dirs.data_dir().join(SNAPSHOT_FILENAME))
        .ok_or_else(|| anyhow!("could not determine data directory"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_path_wins() {
        let custom = PathBuf::from("/tmp/custom/corpus.json");
        assert_eq!(snapshot_path(Some(&custom)).unwrap(), custom);
    }

    #[test]
    fn test_default_path_ends_with_snapshot_name() {
        let path = snapshot_path(None).unwrap();
        assert!(path.ends_with(SNAPSHOT_FILENAME));
    }
}
