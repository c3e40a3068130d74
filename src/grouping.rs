//! Transaction/information grouping engine.
//!
//! CODA marks no explicit transaction boundaries: continuation parts and
//! information parts reuse the sequence number of the movement they
//! belong to, and two transaction families (collective transactions,
//! operation `"07"`, and totalized-detail transactions, type `'5'`-`'7'`)
//! reuse it across *distinct* logical transactions as well, advancing
//! only the detail ordinal. This module re-derives the boundaries in a
//! single left-to-right pass.

use crate::record::Record;

/// Grouping state folded over the input sequence.
///
/// Sequence numbers are tracked as `i64` so that `-1` is a sentinel no
/// valid (`u32`) ordinal can equal.
struct GroupingState<'a> {
    sequence_number: i64,
    sequence_number_detail: i64,
    groups: Vec<Vec<&'a Record>>,
}

impl<'a> GroupingState<'a> {
    fn new() -> Self {
        GroupingState {
            sequence_number: -1,
            sequence_number_detail: -1,
            groups: Vec::new(),
        }
    }

    /// Appends one record, opening a new group first when a boundary is
    /// detected.
    ///
    /// A new group starts when any of:
    /// 1. no group is open yet,
    /// 2. the top-level sequence number changed,
    /// 3. the record is a collective movement and the detail ordinal changed,
    /// 4. the record is a totalized-detail movement and the detail ordinal changed.
    ///
    /// Only part-1 movement records can satisfy (3) or (4); continuation
    /// and information records ride along in the open group unless (2)
    /// applies.
    fn push(&mut self, record: &'a Record) {
        let sequence_number = record.sequence_number().map_or(-1, i64::from);
        let sequence_number_detail = record.sequence_number_detail().map_or(-1, i64::from);

        let is_collective = record
            .transaction_code()
            .is_some_and(|code| code.is_collective());
        let is_totalized_detail = record
            .transaction_code()
            .is_some_and(|code| code.is_totalized_detail());

        if self.groups.is_empty()
            || sequence_number != self.sequence_number
            || (is_collective && sequence_number_detail != self.sequence_number_detail)
            || (is_totalized_detail && sequence_number_detail != self.sequence_number_detail)
        {
            self.sequence_number = sequence_number;
            self.sequence_number_detail = sequence_number_detail;
            self.groups.push(Vec::new());
        }

        if let Some(group) = self.groups.last_mut() {
            group.push(record);
        }
    }

    fn finish(self) -> Vec<Vec<&'a Record>> {
        self.groups
    }
}

/// Partitions an ordered run of movement and information records into
/// groups, one per logical transaction.
///
/// The grouping is a pure repartition: concatenating the groups in order
/// reproduces the input exactly. It is total over any input; malformed
/// sequencing (e.g. an information record before any movement) still
/// yields a grouping, just not necessarily the source document's true
/// boundaries.
pub fn group_transactions<'a>(records: &[&'a Record]) -> Vec<Vec<&'a Record>> {
    records
        .iter()
        .copied()
        .fold(GroupingState::new(), |mut state, record| {
            state.push(record);
            state
        })
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        info_part_1, info_part_2, info_part_3, transaction_part_1, transaction_part_2,
        transaction_part_3,
    };

    fn group<'a>(records: &'a [Record]) -> Vec<Vec<&'a Record>> {
        let refs: Vec<&Record> = records.iter().collect();
        group_transactions(&refs)
    }

    fn sizes(groups: &[Vec<&Record>]) -> Vec<usize> {
        groups.iter().map(|g| g.len()).collect()
    }

    #[test]
    fn test_empty_input_yields_no_groups() {
        let groups = group(&[]);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_continuation_parts_stay_in_one_group() {
        let records = vec![
            transaction_part_1(1, 0, "0", "01"),
            transaction_part_2(1, 0),
            info_part_1(1, 0),
            info_part_3(1, 0),
        ];

        assert_eq!(sizes(&group(&records)), vec![4]);
    }

    #[test]
    fn test_sequence_number_change_always_splits() {
        // Different sequence numbers split even for collective movements.
        let records = vec![
            transaction_part_1(1, 0, "0", "07"),
            transaction_part_1(2, 0, "0", "07"),
            transaction_part_1(3, 0, "0", "01"),
        ];

        assert_eq!(sizes(&group(&records)), vec![1, 1, 1]);
    }

    #[test]
    fn test_collective_splits_on_detail_ordinal() {
        let records = vec![
            transaction_part_1(5, 0, "0", "07"),
            transaction_part_1(5, 1, "0", "07"),
        ];

        assert_eq!(sizes(&group(&records)), vec![1, 1]);
    }

    #[test]
    fn test_totalized_detail_splits_on_detail_ordinal() {
        for transaction_type in ["5", "6", "7"] {
            let records = vec![
                transaction_part_1(2, 0, transaction_type, "01"),
                transaction_part_2(2, 0),
                transaction_part_1(2, 1, transaction_type, "01"),
            ];

            assert_eq!(
                sizes(&group(&records)),
                vec![2, 1],
                "type {transaction_type}"
            );
        }
    }

    #[test]
    fn test_plain_movement_ignores_detail_ordinal() {
        // Neither collective nor totalized-detail: same sequence number
        // keeps records together even across detail ordinals.
        let records = vec![
            transaction_part_1(4, 0, "0", "01"),
            transaction_part_1(4, 1, "0", "01"),
        ];

        assert_eq!(sizes(&group(&records)), vec![2]);
    }

    #[test]
    fn test_collective_sub_lines_keep_their_continuations() {
        let records = vec![
            transaction_part_1(7, 1, "0", "07"),
            transaction_part_2(7, 1),
            transaction_part_3(7, 1),
            transaction_part_1(7, 2, "0", "07"),
            info_part_1(7, 2),
        ];

        let groups = group(&records);
        assert_eq!(sizes(&groups), vec![3, 2]);
        assert_eq!(groups[1][0].sequence_number_detail(), Some(2));
    }

    #[test]
    fn test_information_never_opens_detail_split() {
        // The information record shares seq+detail with the open group
        // and attaches; the later collective movement with the same pair
        // does not split either because the state already matches.
        let records = vec![
            transaction_part_1(3, 0, "0", "07"),
            info_part_1(3, 0),
            transaction_part_1(3, 0, "0", "07"),
        ];

        assert_eq!(sizes(&group(&records)), vec![3]);
    }

    #[test]
    fn test_information_with_advanced_detail_rides_along() {
        // Information records have no transaction code, so a detail
        // ordinal change alone does not split them off.
        let records = vec![
            transaction_part_1(3, 0, "0", "07"),
            info_part_2(3, 1),
        ];

        assert_eq!(sizes(&group(&records)), vec![2]);
    }

    #[test]
    fn test_information_before_any_movement_opens_a_group() {
        // Malformed sequencing is accepted, not rejected: rule (1) opens
        // a group for the orphan information record.
        let records = vec![
            info_part_1(1, 0),
            transaction_part_1(1, 0, "0", "01"),
            transaction_part_1(2, 0, "0", "01"),
        ];

        let groups = group(&records);
        assert_eq!(sizes(&groups), vec![2, 1]);
        assert_eq!(groups[0][0].kind(), crate::RecordKind::InformationPart1);
    }

    #[test]
    fn test_grouping_is_a_repartition() {
        let records = vec![
            transaction_part_1(1, 0, "0", "01"),
            transaction_part_2(1, 0),
            info_part_1(1, 0),
            transaction_part_1(2, 0, "5", "01"),
            transaction_part_1(2, 1, "5", "01"),
            transaction_part_1(3, 0, "0", "07"),
            transaction_part_1(3, 1, "0", "07"),
            info_part_2(3, 1),
        ];

        let groups = group(&records);
        let flattened: Vec<&Record> = groups.iter().flatten().copied().collect();
        let original: Vec<&Record> = records.iter().collect();
        assert_eq!(flattened, original);

        assert_eq!(sizes(&groups), vec![3, 1, 1, 1, 2]);
        assert!(groups.iter().all(|g| !g.is_empty()));
    }
}
