// src/overlay/write.rs

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::Overlay;

/// Write the overlay groups as pretty-printed JSON with a trailing newline.
///
/// Goes to a `.tmp` sibling first and is renamed over the target, so the
/// renderer never observes a half-written file.
pub fn write_overlays<P: AsRef<Path>>(overlays: &[Overlay], path: P) -> Result<()> {
    let path = path.as_ref();
    let tmp_path = path.with_extension("json.tmp");

    let mut tmp = fs::File::create(&tmp_path)
        .with_context(|| format!("creating {:?}", tmp_path))?;
    serde_json::to_writer_pretty(&mut tmp, overlays)
        .with_context(|| format!("serializing overlays to {:?}", tmp_path))?;
    tmp.write_all(b"\n")?;

    fs::rename(&tmp_path, path)
        .with_context(|| format!("renaming {:?} -> {:?}", tmp_path, path))?;

    info!(groups = overlays.len(), path = %path.display(), "wrote overlays");
    Ok(())
}
