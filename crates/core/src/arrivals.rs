//! Arrival Aggregation
//!
//! Turns the upstream prediction list into a board of destination -> ordered
//! countdowns, which the dispatcher caches in session state so a follow-up
//! turn can resolve a spoken destination against it.

use crate::directory::StationDirectory;
use crate::transit::TrainRecord;
use indexmap::IndexMap;

/// Destination placeholders the upstream feed uses for non-revenue
/// movements. These never carry riders and never reach the response.
const PLACEHOLDER_DESTINATIONS: [&str; 2] = ["Train", "No Passenger"];

/// Normalized destination name -> countdown values, both in upstream order.
///
/// Insertion order is user-visible (it drives the disambiguation prompt), so
/// this is an `IndexMap` rather than a `HashMap`.
pub type ArrivalBoard = IndexMap<String, Vec<String>>;

/// Groups train predictions by destination.
///
/// Placeholder records are dropped; destination names are abbreviation-
/// expanded and lowercased; countdowns keep their upstream order within each
/// destination. No sorting, no deduplication: the same input always yields
/// the same board.
pub fn aggregate(records: &[TrainRecord], directory: &StationDirectory) -> ArrivalBoard {
    let mut board = ArrivalBoard::new();

    for record in records {
        if PLACEHOLDER_DESTINATIONS.contains(&record.destination_name.as_str()) {
            continue;
        }

        let destination = directory
            .expand_abbreviation(&record.destination_name)
            .to_lowercase();
        board
            .entry(destination)
            .or_default()
            .push(record.min.clone());
    }

    board
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn train(destination: &str, min: &str) -> TrainRecord {
        TrainRecord {
            destination_name: destination.to_string(),
            min: min.to_string(),
        }
    }

    fn directory() -> StationDirectory {
        StationDirectory::new(
            HashMap::new(),
            HashMap::new(),
            HashMap::from([(
                "Vienna/Fairfax-GMU".to_string(),
                "vienna".to_string(),
            )]),
        )
    }

    #[test]
    fn test_groups_by_destination_preserving_order() {
        let records = vec![
            train("Shady Grove", "5"),
            train("Glenmont", "3"),
            train("Shady Grove", "12"),
        ];

        let board = aggregate(&records, &directory());
        let keys: Vec<&str> = board.keys().map(String::as_str).collect();
        assert_eq!(keys, ["shady grove", "glenmont"]);
        assert_eq!(board["shady grove"], ["5", "12"]);
        assert_eq!(board["glenmont"], ["3"]);
    }

    #[test]
    fn test_placeholder_records_never_become_keys() {
        let records = vec![
            train("Shady Grove", "5"),
            train("Train", "0"),
            train("No Passenger", "2"),
            train("Shady Grove", "12"),
        ];

        let board = aggregate(&records, &directory());
        assert_eq!(board.len(), 1);
        assert_eq!(board["shady grove"], ["5", "12"]);
    }

    #[test]
    fn test_abbreviation_expansion_and_lowercasing() {
        let records = vec![train("Vienna/Fairfax-GMU", "8")];

        let board = aggregate(&records, &directory());
        assert_eq!(board.keys().next().unwrap(), "vienna");
    }

    #[test]
    fn test_countdown_values_are_not_deduplicated() {
        let records = vec![train("Glenmont", "BRD"), train("Glenmont", "BRD")];

        let board = aggregate(&records, &directory());
        assert_eq!(board["glenmont"], ["BRD", "BRD"]);
    }

    #[test]
    fn test_grouping_is_stable_across_calls() {
        let records = vec![
            train("Glenmont", "3"),
            train("Shady Grove", "5"),
            train("Glenmont", "9"),
        ];

        let first = aggregate(&records, &directory());
        let second = aggregate(&records, &directory());
        assert_eq!(first, second);
    }

    #[test]
    fn test_only_placeholders_yields_empty_board() {
        let records = vec![train("Train", "0"), train("No Passenger", "1")];
        assert!(aggregate(&records, &directory()).is_empty());
    }
}
