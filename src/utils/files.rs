use std::env;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::ArchiveError;

/// Reads an archive file as text.
///
/// Invalid UTF-8 is replaced rather than rejected, the way a browser's text reader decodes
/// a file. When `max_bytes` is set the size is checked on the open handle before reading.
///
/// # Errors
///
/// Returns [`ArchiveError::Io`] if the file cannot be opened or read, and
/// [`ArchiveError::TooLarge`] if it exceeds `max_bytes`.
pub fn read_file_as_text(path: &Path, max_bytes: Option<u64>) -> Result<String, ArchiveError> {
    let io_error = |source: std::io::Error| ArchiveError::Io { path: path.to_path_buf(), source };

    let mut file = File::open(path).map_err(io_error)?;
    if let Some(max) = max_bytes {
        validate_file_size(&file, path, max)?;
    }

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(io_error)?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Validates that a file's size is within `max` bytes
///
/// Takes an open file handle so the checked file is the one that gets read.
///
/// # Errors
///
/// Returns [`ArchiveError::Io`] if metadata cannot be read, [`ArchiveError::TooLarge`] if the
/// file exceeds `max`.
pub fn validate_file_size(file: &File, path: &Path, max: u64) -> Result<(), ArchiveError> {
    let size = file
        .metadata()
        .map_err(|source| ArchiveError::Io { path: path.to_path_buf(), source })?
        .len();

    if size > max {
        return Err(ArchiveError::TooLarge { path: path.to_path_buf(), size, max });
    }

    Ok(())
}

/// Formats a path with ~ substitution for the home directory
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, None)
}

/// Internal helper for path formatting with optional home override (for testing)
pub(crate) fn format_path_with_tilde_internal(path: &Path, home_override: Option<&str>) -> String {
    let home_from_env = env::var("HOME").ok();
    let home = home_override.or(home_from_env.as_deref()).filter(|h| !h.is_empty());

    let path_str = path.to_string_lossy();
    if let Some(home) = home
        && let Some(rest) = path_str.strip_prefix(home)
        && (rest.is_empty() || rest.starts_with('/'))
    {
        return format!("~{}", rest);
    }

    path_str.into_owned()
}
