use crate::config;
use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
};

/// Ensure the parent directory of a *file path* exists (no-op if none).
pub fn ensure_parent_dir<P: AsRef<Path>>(file_path: P) -> io::Result<()> {
    if let Some(parent) = file_path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Global attachment storage root (absolute), from `config::attachment_storage_root()`.
/// If relative in env, resolve against current_dir().
pub fn storage_root() -> PathBuf {
    let p = PathBuf::from(config::attachment_storage_root());
    if p.is_absolute() {
        p
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(p)
    }
}

/// Strips any directory components a client may have sent with the filename.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename).trim();
    if base.is_empty() || base == "." || base == ".." {
        "attachment".into()
    } else {
        base.to_string()
    }
}

/// Sanitized `filename`, with `_1`, `_2`, ... inserted before the extension
/// until it no longer clashes with a name in `taken`.
pub fn unique_filename(filename: &str, taken: &HashSet<String>) -> String {
    let base = sanitize_filename(filename);
    if !taken.contains(&base) {
        return base;
    }

    let (stem, ext) = match base.rfind('.') {
        Some(i) if i > 0 => base.split_at(i),
        _ => (base.as_str(), ""),
    };

    let mut n = 1;
    loop {
        let candidate = format!("{stem}_{n}{ext}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

// ─── Relative attachment paths (stored in the database) ─────────────

/// helpdesk/attachments/{ticket_id}/{followup_id}/{filename}
pub fn followup_attachment_path(ticket_id: i64, followup_id: i64, filename: &str) -> String {
    format!(
        "helpdesk/attachments/{ticket_id}/{followup_id}/{}",
        sanitize_filename(filename)
    )
}

/// helpdesk/attachments/kb/{kbitem_id}/{filename}
pub fn kbi_attachment_path(kbitem_id: i64, filename: &str) -> String {
    format!(
        "helpdesk/attachments/kb/{kbitem_id}/{}",
        sanitize_filename(filename)
    )
}
