//! Output directory preparation.

use crate::Result;
use std::fs;
use std::path::Path;

/// Makes sure `dir` exists and is empty.
///
/// Every existing entry is removed, so artifacts from a previous run never
/// mix with the new crops.
pub fn prepare_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(entry.path())?;
        } else {
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_creates_missing_dir() {
        let root = tempdir().unwrap();
        let dir = root.path().join("output").join("cells");
        prepare_output_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_clears_previous_artifacts() {
        let root = tempdir().unwrap();
        let dir = root.path().join("cells");
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("cell_r9_c9.png"), b"stale").unwrap();
        fs::write(dir.join("nested").join("x.txt"), b"stale").unwrap();

        prepare_output_dir(&dir).unwrap();

        assert!(dir.is_dir());
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    }
}
