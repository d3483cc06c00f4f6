// src/process/classify.rs

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::{ClassifiedRecord, RawRecord, Weekday, COL_DAY_AND_TIME};

/// One pattern per weekday: the day's first two letters followed by any run
/// of letters, case-insensitive, anywhere in the schedule text. Tested in
/// calendar order, and a later match overwrites an earlier one, so text
/// listing several days resolves to the latest weekday it mentions.
static DAY_PATTERNS: Lazy<[(Weekday, Regex); 5]> = Lazy::new(|| {
    [
        (Weekday::Monday, pattern(r"(?i)mo[a-z]*")),
        (Weekday::Tuesday, pattern(r"(?i)tu[a-z]*")),
        (Weekday::Wednesday, pattern(r"(?i)we[a-z]*")),
        (Weekday::Thursday, pattern(r"(?i)th[a-z]*")),
        (Weekday::Friday, pattern(r"(?i)fr[a-z]*")),
    ]
});

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("weekday pattern should be valid")
}

/// Derive the weekday for one record.
///
/// Pure: works on its own copy and never touches the input. A record with
/// no schedule text comes back unchanged, with no day assigned.
pub fn classify(record: &RawRecord) -> ClassifiedRecord {
    let mut day = None;
    if let Some(text) = record.non_empty(COL_DAY_AND_TIME) {
        for (weekday, pattern) in DAY_PATTERNS.iter() {
            if pattern.is_match(text) {
                day = Some(*weekday);
            }
        }
    }
    ClassifiedRecord {
        record: record.clone(),
        day,
    }
}

/// Classify a whole export.
///
/// Records without schedule text are dropped here; records whose text
/// matches no pattern are kept with no day assigned and fall out later at
/// the grouping step.
pub fn classify_records(records: &[RawRecord]) -> Vec<ClassifiedRecord> {
    records
        .iter()
        .filter(|r| r.non_empty(COL_DAY_AND_TIME).is_some())
        .map(classify)
        .collect()
}
