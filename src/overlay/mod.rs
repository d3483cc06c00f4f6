// src/overlay/mod.rs

pub mod write;

use serde::Serialize;

use crate::process::group::WeekBuckets;
use crate::process::types::{
    ClassifiedRecord, COL_ADDRESS, COL_DAY_AND_TIME, COL_LOCATION, COL_NAME,
};

/// One map marker: the raw coordinate halves of the location string plus
/// the popup HTML the renderer binds to it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Marker {
    pub lat: String,
    pub lon: String,
    pub popup: String,
}

/// A toggleable overlay group: every marker for one weekday.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Overlay {
    pub day: String,
    pub markers: Vec<Marker>,
}

/// Build the marker for one stop, or `None` when it has no location value.
///
/// The popup starts as the stop name. A distinct address goes on its own
/// line below it; an address that already contains the name replaces it.
/// The original schedule text always forms the last line. The location
/// string is split at commas into its lat/lon halves, uninterpreted.
pub fn marker_for(stop: &ClassifiedRecord) -> Option<Marker> {
    let location = stop.record.non_empty(COL_LOCATION)?;
    let mut halves = location.split(',');
    let lat = halves.next().unwrap_or_default().to_string();
    let lon = halves.next().unwrap_or_default().to_string();

    let mut popup = stop.record.get(COL_NAME).unwrap_or_default().to_string();
    if let Some(address) = stop.record.non_empty(COL_ADDRESS) {
        if address.contains(&popup) {
            popup = address.to_string();
        } else {
            popup = format!("{}<br> {}", popup, address);
        }
    }
    let schedule = stop.record.get(COL_DAY_AND_TIME).unwrap_or_default();
    popup = format!("{} <br> {}", popup, schedule);

    Some(Marker { lat, lon, popup })
}

/// One overlay per present bucket, Monday through Friday.
pub fn build_overlays(buckets: &WeekBuckets) -> Vec<Overlay> {
    buckets
        .present()
        .map(|(day, stops)| Overlay {
            day: day.name().to_string(),
            markers: stops.iter().filter_map(marker_for).collect(),
        })
        .collect()
}
