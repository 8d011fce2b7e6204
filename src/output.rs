use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Result, SheetError};

/// Make sure `dir` exists and holds no stale `.html` sheets.
/// Returns how many files were removed.
pub fn prepare_dir(dir: &Path) -> Result<usize> {
    fs::create_dir_all(dir).map_err(|e| SheetError::io(dir, e))?;

    let mut removed = 0;
    for entry in fs::read_dir(dir).map_err(|e| SheetError::io(dir, e))? {
        let path = entry.map_err(|e| SheetError::io(dir, e))?.path();
        let is_sheet = path.is_file() && path.extension().is_some_and(|ext| ext == "html");
        if is_sheet {
            fs::remove_file(&path).map_err(|e| SheetError::io(&path, e))?;
            debug!(path = %path.display(), "Removed old sheet");
            removed += 1;
        }
    }
    if removed > 0 {
        info!("Removed {} old sheet(s) from {}", removed, dir.display());
    }
    Ok(removed)
}

pub fn document_path(dir: &Path, chapter: u32) -> PathBuf {
    dir.join(format!("questions_{}.html", chapter))
}

/// Write the rendered sheet, replacing any previous file of the same name.
pub fn write_document(dir: &Path, chapter: u32, html: &str) -> Result<PathBuf> {
    let path = document_path(dir, chapter);
    fs::write(&path, html).map_err(|e| SheetError::io(&path, e))?;
    Ok(path)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("sheets").join("nested");
        assert_eq!(prepare_dir(&dir).unwrap(), 0);
        assert!(dir.is_dir());
    }

    #[test]
    fn clears_only_html_files() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        fs::write(dir.join("questions_3.html"), "old").unwrap();
        fs::write(dir.join("other.html"), "old").unwrap();
        fs::write(dir.join("notes.txt"), "keep").unwrap();
        fs::create_dir(dir.join("keep.html")).unwrap();

        assert_eq!(prepare_dir(dir).unwrap(), 2);
        assert!(!dir.join("questions_3.html").exists());
        assert!(!dir.join("other.html").exists());
        assert!(dir.join("notes.txt").exists());
        assert!(dir.join("keep.html").is_dir());
    }

    #[test]
    fn writes_and_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let first = write_document(tmp.path(), 5, "<p>one</p>").unwrap();
        let second = write_document(tmp.path(), 5, "<p>Δ two</p>").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.file_name().unwrap(), "questions_5.html");
        assert_eq!(fs::read_to_string(&second).unwrap(), "<p>Δ two</p>");
    }
}
