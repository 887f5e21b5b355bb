//! Attachment validation.
//!
//! Everything here is pure: callers pass the filename (and the allow-list) and
//! get a verdict back. Writing the file is the caller's job and only happens
//! after validation has passed.

use crate::config;
use crate::paths::sanitize_filename;
use std::path::Path;
use thiserror::Error;

/// Longest stored attachment path the schema accepts.
pub const MAX_ATTACHMENT_PATH_LEN: usize = 1000;

/// Longest stored file name, in bytes. Filesystems cap a path component at
/// 255; the rest is kept free for the `_N` suffix added to duplicate names.
pub const MAX_FILENAME_BYTES: usize = 240;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AttachmentError {
    #[error("Unsupported file extension: {0}")]
    DisallowedExtension(String),

    #[error("Unsupported file extension: file has no extension")]
    MissingExtension,

    #[error("No file name was supplied")]
    MissingFilename,

    #[error("Attachment path is {0} characters long (maximum is 1000)")]
    PathTooLong(usize),

    #[error("Ensure this filename has at most 240 bytes (it has {0}).")]
    FilenameTooLong(usize),
}

/// Returns the lowercase extension of the final path component, including the
/// leading dot (`"Report.PDF"` → `".pdf"`).
pub fn file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
}

/// Checks `filename` against `allowed` (entries in `.ext` form, any case).
pub fn validate_file_extension_with(
    filename: &str,
    allowed: &[String],
) -> Result<(), AttachmentError> {
    if filename.trim().is_empty() {
        return Err(AttachmentError::MissingFilename);
    }

    let ext = file_extension(filename).ok_or(AttachmentError::MissingExtension)?;

    if allowed.iter().any(|a| a.eq_ignore_ascii_case(&ext)) {
        Ok(())
    } else {
        Err(AttachmentError::DisallowedExtension(ext))
    }
}

/// Checks `filename` against the configured allow-list.
pub fn validate_file_extension(filename: &str) -> Result<(), AttachmentError> {
    validate_file_extension_with(filename, &config::valid_extensions())
}

/// Checks the name the file will be stored under, after client directories
/// are stripped.
pub fn validate_attachment_name(filename: &str) -> Result<(), AttachmentError> {
    let len = sanitize_filename(filename).len();
    if len > MAX_FILENAME_BYTES {
        return Err(AttachmentError::FilenameTooLong(len));
    }
    Ok(())
}

pub fn validate_attachment_path(path: &str) -> Result<(), AttachmentError> {
    let len = path.chars().count();
    if len > MAX_ATTACHMENT_PATH_LEN {
        return Err(AttachmentError::PathTooLong(len));
    }
    Ok(())
}
