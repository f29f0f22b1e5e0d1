// SPDX-License-Identifier: PMPL-1.0-or-later

//! File helpers for catalogs and project files

use crate::error::{LocalizerError, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|err| LocalizerError::io("reading", path, err))
}

/// Replace `path` with `contents` in one step.
///
/// The data is written to a temporary file next to the target and renamed
/// over it, so a reader never sees a half-written catalog. An existing
/// target keeps its permissions.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(directory)
        .map_err(|err| LocalizerError::io("creating temporary file in", directory, err))?;
    staged
        .write_all(contents.as_bytes())
        .and_then(|_| staged.as_file().sync_all())
        .map_err(|err| LocalizerError::io("writing temporary file for", path, err))?;
    if let Ok(existing) = fs::metadata(path) {
        staged
            .as_file()
            .set_permissions(existing.permissions())
            .map_err(|err| LocalizerError::io("copying permissions of", path, err))?;
    }
    staged
        .persist(path)
        .map_err(|err| LocalizerError::io("replacing", path, err.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_atomic_replaces_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Localizable.xcstrings");
        fs::write(&path, "old").unwrap();

        write_atomic(&path, "new contents").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new contents");
        let leftovers = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1, "temporary file should be renamed away");
    }

    #[cfg(unix)]
    #[test]
    fn write_atomic_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Localizable.xcstrings");
        fs::write(&path, "old").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        write_atomic(&path, "new").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644, "catalog mode should survive the rewrite");
    }

    #[test]
    fn write_atomic_creates_missing_target() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Fresh.xcstrings");

        write_atomic(&path, "{}").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn read_text_reports_path() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.xcstrings");
        let err = read_text(&missing).unwrap_err();
        assert!(err.to_string().contains("missing.xcstrings"));
    }
}
