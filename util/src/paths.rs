use std::{fs, io, path::Path};

/// Ensure the parent directory of a *file path* exists (no-op if none).
///
/// SQLite will not create intermediate directories for its database file.
pub fn ensure_parent_dir<P: AsRef<Path>>(file_path: P) -> io::Result<()> {
    if let Some(parent) = file_path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
