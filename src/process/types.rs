// src/process/types.rs

use std::collections::HashMap;
use std::fmt;

/// Logical column names of the directory export. These are expectations,
/// not a schema; any column may be absent or empty on any row.
pub const COL_DAY_AND_TIME: &str = "Day and time";
pub const COL_NAME: &str = "Name";
pub const COL_ADDRESS: &str = "Address";
pub const COL_LOCATION: &str = "Location";

/// One parsed CSV row: column name → raw string value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: HashMap<String, String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    /// Raw value of `column`, if the column exists at all.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Value of `column` unless the column is absent or holds the empty
    /// string. Whitespace-only values count as present.
    pub fn non_empty(&self, column: &str) -> Option<&str> {
        self.get(column).filter(|v| !v.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let fields = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        RawRecord { fields }
    }
}

/// The five weekdays the schedule patterns cover, in calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A `RawRecord` plus the weekday derived from its schedule text, if any
/// pattern matched. Derived once; never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRecord {
    pub record: RawRecord,
    pub day: Option<Weekday>,
}
