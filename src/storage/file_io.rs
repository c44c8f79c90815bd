//! JSON persistence for the expenses file
//!
//! Saves are staged in a temp file beside the target and only moved over it
//! once fully written and synced, so the old file survives a failed save.

use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;

use crate::error::{ExpenseError, ExpenseResult};

fn storage_error(action: &str, path: &Path, err: impl Display) -> ExpenseError {
    ExpenseError::Storage(format!("Cannot {} {}: {}", action, path.display(), err))
}

/// Parse a JSON document from `path`
pub fn read_json<T: DeserializeOwned>(path: &Path) -> ExpenseResult<T> {
    let file = File::open(path).map_err(|e| storage_error("open", path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| storage_error("parse", path, e))
}

/// Replace `path` with the pretty-printed JSON of `data`
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, data: &T) -> ExpenseResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| storage_error("create directory", dir, e))?;

    // Staged in the target's directory so the final move is a rename
    let mut staged =
        NamedTempFile::new_in(dir).map_err(|e| storage_error("stage a save in", dir, e))?;

    let mut writer = BufWriter::new(staged.as_file_mut());
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| storage_error("serialize", path, e))?;
    writer.flush().map_err(|e| storage_error("write", path, e))?;
    drop(writer);

    staged
        .as_file()
        .sync_all()
        .map_err(|e| storage_error("sync", path, e))?;
    staged
        .persist(path)
        .map_err(|e| storage_error("replace", path, e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Ledger {
        owner: String,
        entries: Vec<f64>,
    }

    fn ledger() -> Ledger {
        Ledger {
            owner: "home".to_string(),
            entries: vec![12.5, 3.0],
        }
    }

    #[test]
    fn test_read_missing_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");

        let err = read_json::<Ledger>(&path).unwrap_err();
        assert!(err.to_string().contains("Cannot open"));
    }

    #[test]
    fn test_read_invalid_json_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "[1, 2").unwrap();

        let err = read_json::<Vec<u32>>(&path).unwrap_err();
        assert!(err.to_string().contains("Cannot parse"));
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");

        write_json_atomic(&path, &ledger()).unwrap();
        assert_eq!(read_json::<Ledger>(&path).unwrap(), ledger());
    }

    #[test]
    fn test_write_leaves_only_the_target() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");

        write_json_atomic(&path, &ledger()).unwrap();
        write_json_atomic(&path, &[1, 2, 3]).unwrap();

        let names: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec!["ledger.json"]);
        assert_eq!(read_json::<Vec<u32>>(&path).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_failed_replace_keeps_old_target() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let err = write_json_atomic(&path, &ledger()).unwrap_err();
        assert!(err.to_string().contains("Cannot replace"));
        assert!(path.join("keep").exists());
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("2024").join("ledger.json");

        write_json_atomic(&path, &ledger()).unwrap();
        assert!(path.exists());
    }
}
