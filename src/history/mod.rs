// src/history/mod.rs

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use glob::glob;
use serde::{Deserialize, Serialize};

/// One recorded event, stored as a tiny JSON file whose name carries the
/// same `<export>_<event>_<ts>` triple as the payload.
#[derive(Debug, Serialize, Deserialize)]
struct HistoryEvent {
    export: String,
    event: String,
    event_time: i64,
}

const PROCESSED: &str = "processed";

/// Record that `export_name` has been processed.
pub fn record_processed<P: AsRef<Path>>(history_dir: P, export_name: &str) -> Result<()> {
    record_event(history_dir.as_ref(), export_name, PROCESSED)
}

/// Names of every export already processed, recovered from the filenames.
pub fn load_processed<P: AsRef<Path>>(history_dir: P) -> Result<HashSet<String>> {
    load_event_names(history_dir.as_ref(), PROCESSED)
}

fn record_event(history_dir: &Path, export_name: &str, event: &str) -> Result<()> {
    fs::create_dir_all(history_dir)
        .with_context(|| format!("creating history directory {:?}", history_dir))?;

    let ts = Utc::now().timestamp_micros();
    let file_name = format!("{}_{}_{}.json", export_name, event, ts);
    let path = history_dir.join(file_name);

    let payload = HistoryEvent {
        export: export_name.to_string(),
        event: event.to_string(),
        event_time: ts,
    };
    let json = serde_json::to_string_pretty(&payload).context("serializing history event")?;
    fs::write(&path, json).with_context(|| format!("writing history file {:?}", path))?;
    Ok(())
}

/// Scan `<export>_<event>_<ts>.json` filenames and collect the export names.
fn load_event_names(history_dir: &Path, event: &str) -> Result<HashSet<String>> {
    let mut set = HashSet::new();
    let pattern = format!("{}/**/*_{}_*.json", history_dir.display(), event);
    let marker = format!("_{}_", event);
    for path in glob(&pattern)?.flatten() {
        if let Some(fname) = path.file_stem().and_then(|s| s.to_str()) {
            // fname = "<export>_<event>_<ts>"
            if let Some(idx) = fname.rfind(&marker) {
                set.insert(fname[..idx].to_string());
            }
        }
    }
    Ok(set)
}
