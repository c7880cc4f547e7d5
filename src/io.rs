use std::path::Path;

use crate::error::{Error, Result};

/// Reads the whole listing. Invalid UTF-8 is replaced rather than rejected;
/// disassembler output occasionally carries raw bytes in comments.
pub fn read_listing(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => Error::InputNotFound { path: path.to_path_buf() },
        _ => Error::Read { path: path.to_path_buf(), source },
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Writes the fully rendered output in one call, creating parent
/// directories first.
pub fn write_listing(path: &Path, text: &str) -> Result<()> {
    let write_err = |source: std::io::Error| Error::Write { path: path.to_path_buf(), source };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, text).map_err(write_err)
}
