// src/process/group.rs

use std::collections::HashMap;

use super::types::{ClassifiedRecord, Weekday, COL_LOCATION};

/// The five weekday buckets in calendar order.
///
/// A slot is `None` when no record classified to that day at all, and
/// `Some` (possibly empty) when at least one did; the location filter can
/// empty a bucket without removing it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeekBuckets {
    buckets: [Option<Vec<ClassifiedRecord>>; 5],
}

impl WeekBuckets {
    pub fn get(&self, day: Weekday) -> Option<&[ClassifiedRecord]> {
        self.buckets[day.index()].as_deref()
    }

    /// All five slots, Monday through Friday.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, Option<&[ClassifiedRecord]>)> + '_ {
        Weekday::ALL.into_iter().map(move |day| (day, self.get(day)))
    }

    /// Only the buckets that exist, Monday through Friday.
    pub fn present(&self) -> impl Iterator<Item = (Weekday, &[ClassifiedRecord])> + '_ {
        self.iter().filter_map(|(day, bucket)| bucket.map(|b| (day, b)))
    }
}

/// Group classified records into calendar-ordered weekday buckets.
///
/// Day-less records fall out first, then each group keeps only records
/// carrying a location value, then the groups are projected onto
/// Monday…Friday. Record order inside a bucket follows first appearance in
/// the input.
pub fn organize(records: Vec<ClassifiedRecord>) -> WeekBuckets {
    let mut groups: HashMap<Weekday, Vec<ClassifiedRecord>> = HashMap::new();
    for record in records {
        if let Some(day) = record.day {
            groups.entry(day).or_default().push(record);
        }
    }

    let buckets = Weekday::ALL.map(|day| {
        groups.remove(&day).map(|group| {
            group
                .into_iter()
                .filter(|r| r.record.non_empty(COL_LOCATION).is_some())
                .collect()
        })
    });

    WeekBuckets { buckets }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::types::{RawRecord, COL_NAME};

    fn classified(name: &str, day: Option<Weekday>, location: &str) -> ClassifiedRecord {
        let mut record = RawRecord::new();
        record.insert(COL_NAME, name);
        record.insert(COL_LOCATION, location);
        ClassifiedRecord { record, day }
    }

    #[test]
    fn buckets_come_out_in_calendar_order() {
        // input arrives in reverse-weekday order
        let records = vec![
            classified("E", Some(Weekday::Friday), "5,5"),
            classified("D", Some(Weekday::Thursday), "4,4"),
            classified("C", Some(Weekday::Wednesday), "3,3"),
            classified("B", Some(Weekday::Tuesday), "2,2"),
            classified("A", Some(Weekday::Monday), "1,1"),
        ];
        let buckets = organize(records);
        let days: Vec<Weekday> = buckets.present().map(|(day, _)| day).collect();
        assert_eq!(days, Weekday::ALL.to_vec());
    }

    #[test]
    fn location_less_records_drop_out_of_their_bucket() {
        let records = vec![
            classified("A", Some(Weekday::Tuesday), "1,1"),
            classified("B", Some(Weekday::Tuesday), ""),
        ];
        let buckets = organize(records);
        let tuesday = buckets.get(Weekday::Tuesday).expect("Tuesday bucket present");
        assert_eq!(tuesday.len(), 1);
        assert_eq!(tuesday[0].record.get(COL_NAME), Some("A"));
    }

    #[test]
    fn absent_and_empty_buckets_are_distinct() {
        let records = vec![classified("A", Some(Weekday::Thursday), "")];
        let buckets = organize(records);

        // Thursday grouped but lost its only record to the location filter
        let thursday = buckets.get(Weekday::Thursday).expect("Thursday bucket present");
        assert!(thursday.is_empty());

        // Monday never grouped at all
        assert!(buckets.get(Weekday::Monday).is_none());
    }

    #[test]
    fn day_less_records_are_excluded() {
        let records = vec![classified("A", None, "1,1")];
        let buckets = organize(records);
        assert!(buckets.iter().all(|(_, bucket)| bucket.is_none()));
    }

    #[test]
    fn records_keep_first_seen_order_within_a_bucket() {
        let records = vec![
            classified("A", Some(Weekday::Monday), "1,1"),
            classified("B", Some(Weekday::Friday), "2,2"),
            classified("C", Some(Weekday::Monday), "3,3"),
        ];
        let buckets = organize(records);
        let names: Vec<_> = buckets
            .get(Weekday::Monday)
            .expect("Monday bucket present")
            .iter()
            .map(|r| r.record.get(COL_NAME).unwrap())
            .collect();
        assert_eq!(names, vec!["A", "C"]);
    }
}
