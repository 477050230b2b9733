// src/store.rs
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::VideoRecord;

fn sibling_tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write the full run snapshot as a pretty-printed UTF-8 JSON array,
/// replacing any previous file wholesale. The content goes to a sibling
/// temporary path first and is renamed into place, so a failed write never
/// leaves a truncated file for the renderer to consume.
pub fn write_records(path: &Path, records: &[VideoRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    let tmp = sibling_tmp_path(path);
    if let Err(e) = fs::write(&tmp, json).and_then(|_| fs::rename(&tmp, path)) {
        // Best effort: don't let stray .tmp siblings accumulate.
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    tracing::info!(path = %path.display(), count = records.len(), "wrote video data");
    Ok(())
}

/// Typed read-back of a file written by [`write_records`].
pub fn read_records(path: &Path) -> Result<Vec<VideoRecord>> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
