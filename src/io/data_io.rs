use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::data::DataFile;

/// Environment variable overriding the data file location
pub const DATA_FILE_ENV: &str = "DESKFRIEND_DATA";

/// Error type for data file I/O
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not serialize data: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Resolve the data file path: explicit override, then `DESKFRIEND_DATA`,
/// then the XDG data directory.
pub fn resolve_data_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Ok(path) = std::env::var(DATA_FILE_ENV)
        && !path.is_empty()
    {
        return PathBuf::from(path);
    }
    default_data_path()
}

/// `$XDG_DATA_HOME/deskfriend/data.json`, falling back to `~/.local/share`
pub fn default_data_path() -> PathBuf {
    let data_dir = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local").join("share"));
    data_dir.join("deskfriend").join("data.json")
}

fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

/// Read and parse the data file.
///
/// Returns `Ok(None)` when the file does not exist yet.
pub fn read_data(path: &Path) -> Result<Option<DataFile>, DataError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|e| DataError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let data = serde_json::from_str(&content).map_err(|e| DataError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(Some(data))
}

/// Serialize the document and replace the data file in one step.
pub fn write_data(path: &Path, data: &DataFile) -> Result<(), DataError> {
    let mut content = serde_json::to_string_pretty(data)?;
    content.push('\n');
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| DataError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    atomic_write(path, content.as_bytes()).map_err(|e| DataError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
