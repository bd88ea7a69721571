use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use portfolio_core::prefs::UiPrefs;
use portfolio_logging::{portfolio_info, portfolio_warn};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrefsFileError {
    #[error("failed to serialize preferences: {0}")]
    Serialize(#[from] ron::Error),
    #[error("io error writing {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

/// Reads persisted prefs; anything unreadable falls back to defaults.
pub(crate) fn load_prefs(path: &Path) -> UiPrefs {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return UiPrefs::default(),
        Err(err) => {
            portfolio_warn!("Failed to read preferences from {:?}: {}", path, err);
            return UiPrefs::default();
        }
    };

    match ron::from_str(&content) {
        Ok(prefs) => prefs,
        Err(err) => {
            portfolio_warn!("Failed to parse preferences from {:?}: {}", path, err);
            UiPrefs::default()
        }
    }
}

/// Writes prefs through a temp file in the same directory, then renames.
pub(crate) fn save_prefs(path: &Path, prefs: &UiPrefs) -> Result<(), PrefsFileError> {
    let content = ron::ser::to_string_pretty(prefs, ron::ser::PrettyConfig::new())?;
    let io_err = |source| PrefsFileError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(io_err)?;

    let mut tmp = NamedTempFile::new_in(&dir).map_err(io_err)?;
    tmp.write_all(content.as_bytes()).map_err(io_err)?;
    tmp.flush().map_err(io_err)?;
    tmp.as_file_mut().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|err| io_err(err.error))?;

    portfolio_info!("Saved preferences to {:?}", path);
    Ok(())
}
