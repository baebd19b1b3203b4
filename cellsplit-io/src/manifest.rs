//! JSON manifests: cell records and merged tables.

use crate::Result;
use cellsplit_core::CellRecord;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Serializes `value` as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

/// Reads a cell manifest previously written with [`write_json_file`].
pub fn read_cell_manifest(path: &Path) -> Result<Vec<CellRecord>> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}
