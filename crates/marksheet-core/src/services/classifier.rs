//! Per-row routing decisions

use crate::config::ResolvedColumns;
use crate::constants::MIN_STUDENT_NUMBER;
use marksheet_types::{Classification, Row, SkipReason};
use std::collections::HashSet;

/// Decide what to do with one spreadsheet row. First match wins:
///
/// 1. Unparsable or too-small student number: `Ignore` when both name
///    cells are also empty (wholly blank row), `SkipInvalid` otherwise.
/// 2. Mailing enabled and no "@" in the email cell: `SkipInvalid`.
///    PDF-only runs never validate email syntax.
/// 3. Student number absent from a configured inclusion filter:
///    `SkipFiltered`.
/// 4. Otherwise: `Process`.
pub fn classify(
    row: &Row,
    columns: &ResolvedColumns,
    ids_filter: Option<&HashSet<String>>,
    mail_enabled: bool,
) -> Classification {
    let number = row.cell(columns.student_number).trim();
    let number_ok = number
        .parse::<i64>()
        .map(|n| n >= MIN_STUDENT_NUMBER)
        .unwrap_or(false);

    if !number_ok {
        let first = row.cell(columns.first_name).trim();
        let last = row.cell(columns.last_name).trim();
        if first.is_empty() && last.is_empty() {
            return Classification::Ignore;
        }
        return Classification::SkipInvalid(SkipReason::StudentNumber);
    }

    if mail_enabled {
        let email = columns.email.map(|i| row.cell(i)).unwrap_or("");
        if !email.contains('@') {
            return Classification::SkipInvalid(SkipReason::Email);
        }
    }

    if let Some(filter) = ids_filter {
        if !filter.contains(number) {
            return Classification::SkipFiltered;
        }
    }

    Classification::Process
}

/// Split a `--ids` argument into the inclusion filter.
///
/// Entries are trimmed so membership testing compares trimmed numbers
/// against trimmed entries; empty entries are dropped.
pub fn parse_ids_filter(list: &str) -> HashSet<String> {
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolvedColumns;

    fn columns() -> ResolvedColumns {
        ResolvedColumns {
            student_number: 2,
            first_name: 0,
            last_name: 1,
            email: Some(3),
            criteria: vec![("Design".to_string(), 4)],
            total: 5,
            feedback: 6,
        }
    }

    #[test]
    fn test_blank_row_is_ignored() {
        // Both names empty and no parsable number: no output at all
        let row = Row::from(vec!["", "", "", "", "", "", ""]);
        assert_eq!(classify(&row, &columns(), None, false), Classification::Ignore);

        // The number cell may hold garbage; the row is still wholly blank
        let row = Row::from(vec!["", "", "summary", "", "", "", ""]);
        assert_eq!(classify(&row, &columns(), None, false), Classification::Ignore);

        // A too-small number alone does not make the row a student row
        let row = Row::from(vec!["", "", "17", "", "", "", ""]);
        assert_eq!(classify(&row, &columns(), None, false), Classification::Ignore);
    }

    #[test]
    fn test_named_row_with_bad_number_is_invalid() {
        let row = Row::from(vec!["Ada", "Lovelace", "not-a-number"]);
        assert_eq!(
            classify(&row, &columns(), None, false),
            Classification::SkipInvalid(SkipReason::StudentNumber)
        );

        let row = Row::from(vec!["Ada", "", "9999"]);
        assert_eq!(
            classify(&row, &columns(), None, false),
            Classification::SkipInvalid(SkipReason::StudentNumber)
        );
    }

    #[test]
    fn test_threshold_boundary() {
        let row = Row::from(vec!["Ada", "Lovelace", "10000", "ada@uni.edu"]);
        assert_eq!(classify(&row, &columns(), None, false), Classification::Process);
    }

    #[test]
    fn test_email_checked_only_when_mailing() {
        let row = Row::from(vec!["Ada", "Lovelace", "12345678", "no-at-sign"]);

        // PDF-only runs never validate email syntax
        assert_eq!(classify(&row, &columns(), None, false), Classification::Process);

        // Mail runs skip the row even though the number already passed
        assert_eq!(
            classify(&row, &columns(), None, true),
            Classification::SkipInvalid(SkipReason::Email)
        );
    }

    #[test]
    fn test_inclusion_filter_membership() {
        let row = Row::from(vec!["Ada", "Lovelace", " 12345678 ", "ada@uni.edu"]);

        let included = parse_ids_filter("12345678, 87654321");
        assert_eq!(
            classify(&row, &columns(), Some(&included), false),
            Classification::Process
        );

        let excluded = parse_ids_filter("87654321");
        assert_eq!(
            classify(&row, &columns(), Some(&excluded), false),
            Classification::SkipFiltered
        );
    }

    #[test]
    fn test_filter_entries_are_trimmed() {
        let filter = parse_ids_filter(" 12345678 ,, 87654321");
        assert!(filter.contains("12345678"));
        assert!(filter.contains("87654321"));
        assert_eq!(filter.len(), 2);
    }

    #[test]
    fn test_invalid_number_wins_over_filter() {
        // Classification order: the number check fires before the filter
        let row = Row::from(vec!["Ada", "Lovelace", "99"]);
        let filter = parse_ids_filter("99");
        assert_eq!(
            classify(&row, &columns(), Some(&filter), false),
            Classification::SkipInvalid(SkipReason::StudentNumber)
        );
    }
}
