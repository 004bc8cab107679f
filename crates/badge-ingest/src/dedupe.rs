//! Duplicate booking detection.
//!
//! Booking exports sometimes list the same person twice. Duplicates are only
//! reported; the attendee sequence is never altered.

use std::collections::BTreeMap;

use badge_model::AttendeeRecord;

/// A record whose name and organisation repeat an earlier record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateAttendee {
    /// Index of the repeated record in the attendee sequence.
    pub index: usize,
    /// Index of the first record with the same identity.
    pub first_index: usize,
}

fn identity_key(record: &AttendeeRecord) -> Option<String> {
    let first = record.first_name.trim();
    let last = record.last_name.trim();
    if first.is_empty() && last.is_empty() {
        return None;
    }
    let mut composite = String::new();
    for (pos, part) in [first, last, record.organisation.trim()].iter().enumerate() {
        if pos > 0 {
            composite.push('|');
        }
        composite.push_str(&part.to_lowercase());
    }
    Some(composite)
}

/// Find records that repeat an earlier (first name, last name, organisation)
/// triple, compared case-insensitively. Nameless records are skipped.
pub fn find_duplicates(records: &[AttendeeRecord]) -> Vec<DuplicateAttendee> {
    let mut seen: BTreeMap<String, usize> = BTreeMap::new();
    let mut duplicates = Vec::new();
    for (index, record) in records.iter().enumerate() {
        let Some(key) = identity_key(record) else {
            continue;
        };
        match seen.get(&key) {
            Some(&first_index) => duplicates.push(DuplicateAttendee { index, first_index }),
            None => {
                seen.insert(key, index);
            }
        }
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(first: &str, last: &str, organisation: &str) -> AttendeeRecord {
        AttendeeRecord::new(first, last, organisation, "")
    }

    #[test]
    fn no_duplicates() {
        let records = vec![
            record("Ada", "Lovelace", "AE"),
            record("Grace", "Hopper", "Navy"),
        ];
        assert!(find_duplicates(&records).is_empty());
    }

    #[test]
    fn repeated_booking_is_reported_against_first() {
        let records = vec![
            record("Ada", "Lovelace", "AE"),
            record("Grace", "Hopper", "Navy"),
            record("ada", "LOVELACE", "ae"),
            record("Ada", "Lovelace", "AE"),
        ];
        assert_eq!(
            find_duplicates(&records),
            vec![
                DuplicateAttendee {
                    index: 2,
                    first_index: 0
                },
                DuplicateAttendee {
                    index: 3,
                    first_index: 0
                },
            ]
        );
    }

    #[test]
    fn different_organisation_is_not_duplicate() {
        let records = vec![record("Ada", "Lovelace", "AE"), record("Ada", "Lovelace", "RI")];
        assert!(find_duplicates(&records).is_empty());
    }

    #[test]
    fn nameless_records_are_ignored() {
        let records = vec![record("", "", "AE"), record("", "", "AE")];
        assert!(find_duplicates(&records).is_empty());
    }
}
