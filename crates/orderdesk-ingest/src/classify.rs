//! Row normalization and confirmation routing.
//!
//! Validation fails closed: every dropped row reports the specific field
//! that was missing or malformed instead of being swallowed.

use chrono::NaiveDate;

use orderdesk_core::models::{OrderRecord, RowError};

use crate::parser::RawOrderRow;

/// The export writes dates day-first.
const DATE_FORMAT: &str = "%d.%m.%Y";

/// Policy deciding which order numbers need manual confirmation before they
/// may enter the store. The suffix is a convention of the source system:
/// flagged orders are still awaiting confirmation on the logistics side.
///
/// The policy sees order numbers only after normalization, so quoting
/// artifacts (`1001R"`) never reach it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationPolicy {
    pub trigger_suffix: char,
}

impl Default for ConfirmationPolicy {
    fn default() -> Self {
        Self { trigger_suffix: 'R' }
    }
}

impl ConfirmationPolicy {
    pub fn new(trigger_suffix: char) -> Self {
        Self { trigger_suffix }
    }

    pub fn requires_confirmation(&self, order_number: &str) -> bool {
        order_number.ends_with(self.trigger_suffix)
    }
}

/// Strip the quoting and formula-escape artifacts spreadsheet exports wrap
/// around order numbers: `="12345R"` and all of its partial forms reduce to
/// `12345R`. Applied identically during classification and when matching
/// confirmation selections, so the two sides always agree.
pub fn normalize_order_number(raw: &str) -> String {
    let mut value = raw.trim();
    if let Some(stripped) = value.strip_prefix('=') {
        value = stripped.trim();
    }
    value.trim_matches('"').trim().to_string()
}

/// Classifier output: two mutually exclusive row sets plus the rows that
/// were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub auto: Vec<OrderRecord>,
    pub needs_confirmation: Vec<OrderRecord>,
    pub errors: Vec<RowError>,
}

impl Classification {
    /// Total number of input rows accounted for.
    pub fn rows_processed(&self) -> usize {
        self.auto.len() + self.needs_confirmation.len() + self.errors.len()
    }
}

fn required_field(value: Option<String>, name: &str) -> Result<String, String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(format!("missing required field '{}'", name)),
    }
}

fn parse_date(value: Option<&str>, name: &str) -> Result<Option<NaiveDate>, String> {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(Some)
        .map_err(|_| format!("invalid date '{}' in field '{}' (expected DD.MM.YYYY)", raw, name))
}

/// Validate one raw row into an [`OrderRecord`]. The error names the first
/// offending field.
pub fn validate_row(row: RawOrderRow) -> Result<OrderRecord, String> {
    let order_number = normalize_order_number(&required_field(row.order_number, "order_number")?);
    if order_number.is_empty() {
        return Err("order number is empty after normalization".to_string());
    }

    let client = required_field(row.client, "client")?;
    let customer_name = required_field(row.customer_name, "customer_name")?;
    let city = required_field(row.city, "city")?;
    let created = parse_date(row.created.as_deref(), "created")?;
    let delivery = parse_date(row.delivery.as_deref(), "delivery")?;

    Ok(OrderRecord {
        client,
        order_number,
        customer_name,
        city,
        created,
        delivery,
        note: row.note.map(|n| n.trim().to_string()).unwrap_or_default(),
    })
}

/// Split parsed rows into the auto-commit and needs-confirmation sets.
/// Stateless: the same input always yields the same partition.
pub fn classify_rows(
    rows: Vec<(usize, RawOrderRow)>,
    policy: &ConfirmationPolicy,
) -> Classification {
    let mut classification = Classification::default();

    for (line, raw) in rows {
        match validate_row(raw) {
            Ok(record) => {
                if policy.requires_confirmation(&record.order_number) {
                    classification.needs_confirmation.push(record);
                } else {
                    classification.auto.push(record);
                }
            }
            Err(reason) => {
                tracing::debug!(line, %reason, "Dropping order row");
                classification.errors.push(RowError { line, reason });
            }
        }
    }

    classification
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_row(order_number: &str, created: &str, delivery: &str) -> RawOrderRow {
        RawOrderRow {
            client: Some("Acme".to_string()),
            order_number: Some(order_number.to_string()),
            customer_name: Some("Doe".to_string()),
            city: Some("12000".to_string()),
            created: (!created.is_empty()).then(|| created.to_string()),
            delivery: (!delivery.is_empty()).then(|| delivery.to_string()),
            note: None,
        }
    }

    #[test]
    fn test_normalize_strips_formula_escape_and_quotes() {
        assert_eq!(normalize_order_number("=\"12345R\""), "12345R");
        assert_eq!(normalize_order_number("\"12345R\""), "12345R");
        assert_eq!(normalize_order_number("12345R\""), "12345R");
        assert_eq!(normalize_order_number("  12345R  "), "12345R");
        assert_eq!(normalize_order_number("12345"), "12345");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_order_number("=\"12345R\"");
        let twice = normalize_order_number(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_suffix_routes_to_needs_confirmation() {
        let policy = ConfirmationPolicy::default();
        let rows = vec![
            (2, raw_row("1001R", "01.02.2025", "")),
            (3, raw_row("2002", "15.03.2025", "20.03.2025")),
            (4, raw_row("3003R\"", "01.01.2025", "")),
        ];
        let result = classify_rows(rows, &policy);

        let pending: Vec<&str> = result
            .needs_confirmation
            .iter()
            .map(|r| r.order_number.as_str())
            .collect();
        let auto: Vec<&str> = result.auto.iter().map(|r| r.order_number.as_str()).collect();

        assert_eq!(pending, vec!["1001R", "3003R"]);
        assert_eq!(auto, vec!["2002"]);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_sets_are_mutually_exclusive() {
        let policy = ConfirmationPolicy::default();
        let rows = vec![
            (2, raw_row("1001R", "01.02.2025", "")),
            (3, raw_row("2002", "15.03.2025", "")),
        ];
        let result = classify_rows(rows, &policy);
        for record in &result.needs_confirmation {
            assert!(!result.auto.contains(record));
        }
        assert_eq!(result.rows_processed(), 2);
    }

    #[test]
    fn test_missing_required_field_drops_row() {
        let policy = ConfirmationPolicy::default();
        let mut row = raw_row("1001", "01.02.2025", "");
        row.city = None;
        let result = classify_rows(vec![(2, row)], &policy);

        assert!(result.auto.is_empty());
        assert!(result.needs_confirmation.is_empty());
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].reason.contains("city"));
        assert_eq!(result.rows_processed(), 1);
    }

    #[test]
    fn test_blank_date_is_absent_not_error() {
        let policy = ConfirmationPolicy::default();
        let result = classify_rows(vec![(2, raw_row("1001", "01.02.2025", ""))], &policy);
        assert_eq!(result.auto.len(), 1);
        assert_eq!(result.auto[0].created, NaiveDate::from_ymd_opt(2025, 2, 1));
        assert_eq!(result.auto[0].delivery, None);
    }

    #[test]
    fn test_malformed_date_drops_row() {
        let policy = ConfirmationPolicy::default();
        let result = classify_rows(vec![(5, raw_row("1001", "2025-02-01", ""))], &policy);
        assert!(result.auto.is_empty());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].line, 5);
        assert!(result.errors[0].reason.contains("created"));
    }

    #[test]
    fn test_impossible_calendar_date_drops_row() {
        let policy = ConfirmationPolicy::default();
        let result = classify_rows(vec![(2, raw_row("1001", "31.02.2025", ""))], &policy);
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn test_empty_after_normalization_drops_row() {
        let policy = ConfirmationPolicy::default();
        let result = classify_rows(vec![(2, raw_row("=\"\"", "01.02.2025", ""))], &policy);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].reason.contains("empty after normalization"));
    }

    #[test]
    fn test_classification_is_idempotent() {
        let policy = ConfirmationPolicy::default();
        let rows = vec![
            (2, raw_row("1001R", "01.02.2025", "")),
            (3, raw_row("2002", "15.03.2025", "20.03.2025")),
            (4, raw_row("bad", "not-a-date", "")),
        ];
        let first = classify_rows(rows.clone(), &policy);
        let second = classify_rows(rows, &policy);
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_trigger_suffix() {
        let policy = ConfirmationPolicy::new('X');
        let rows = vec![
            (2, raw_row("1001R", "01.02.2025", "")),
            (3, raw_row("2002X", "01.02.2025", "")),
        ];
        let result = classify_rows(rows, &policy);
        assert_eq!(result.auto.len(), 1);
        assert_eq!(result.auto[0].order_number, "1001R");
        assert_eq!(result.needs_confirmation.len(), 1);
        assert_eq!(result.needs_confirmation[0].order_number, "2002X");
    }
}
