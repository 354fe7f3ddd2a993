//! Delimited row parsing.
//!
//! The export uses `;` as a field separator and a header row. Individual
//! rows that cannot be tokenized are skipped and reported; only a missing
//! or foreign header row aborts the upload (partial-success semantics at
//! row granularity, not batch granularity).

use serde::Deserialize;

use orderdesk_core::models::RowError;

use crate::IngestError;

/// Header spellings under which the order-number column may arrive.
/// Kept in sync with the serde aliases on [`RawOrderRow`]; the parser uses
/// this list to decide whether the header row is recognizable at all.
const ORDER_NUMBER_HEADERS: &[&str] = &[
    "order_number",
    "cislo_zakazky",
    "číslo zakázky",
    "cislo zakazky",
];

/// One raw CSV row, before validation. Headers accept both the source
/// system's Czech column names and their English equivalents; missing
/// columns deserialize to `None` and are reported during validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOrderRow {
    #[serde(alias = "klient")]
    pub client: Option<String>,

    #[serde(
        alias = "cislo_zakazky",
        alias = "číslo zakázky",
        alias = "cislo zakazky"
    )]
    pub order_number: Option<String>,

    #[serde(alias = "zakaznik", alias = "zákazník")]
    pub customer_name: Option<String>,

    #[serde(alias = "mesto", alias = "město")]
    pub city: Option<String>,

    #[serde(alias = "vytvoreno", alias = "vytvořeno")]
    pub created: Option<String>,

    #[serde(alias = "dodani", alias = "dodání")]
    pub delivery: Option<String>,

    #[serde(alias = "poznamka", alias = "poznámka")]
    pub note: Option<String>,
}

/// Parser output: surviving rows tagged with their line number, plus the
/// rows that had to be skipped.
#[derive(Debug, Clone, Default)]
pub struct ParsedRows {
    pub rows: Vec<(usize, RawOrderRow)>,
    pub errors: Vec<RowError>,
}

/// Parse decoded text into raw rows.
///
/// A row is skipped (never aborting the batch) when its field count does
/// not match the header or when it cannot be deserialized; each skip is
/// recorded with its 1-based line number (the header is line 1).
pub fn parse_rows(text: &str, delimiter: u8) -> Result<ParsedRows, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if !header_is_recognized(&headers) {
        return Err(IngestError::UnrecognizedHeader);
    }
    let expected_fields = headers.len();

    let mut parsed = ParsedRows::default();
    for (idx, result) in reader.records().enumerate() {
        let line = idx + 2;
        match result {
            Ok(record) => {
                if record.len() != expected_fields {
                    parsed.errors.push(RowError {
                        line,
                        reason: format!(
                            "expected {} fields, found {}",
                            expected_fields,
                            record.len()
                        ),
                    });
                    continue;
                }
                match record.deserialize::<RawOrderRow>(Some(&headers)) {
                    Ok(row) => parsed.rows.push((line, row)),
                    Err(e) => parsed.errors.push(RowError {
                        line,
                        reason: format!("unreadable row: {}", e),
                    }),
                }
            }
            Err(e) => parsed.errors.push(RowError {
                line,
                reason: format!("unreadable row: {}", e),
            }),
        }
    }

    Ok(parsed)
}

fn header_is_recognized(headers: &csv::StringRecord) -> bool {
    headers.iter().any(|cell| {
        let cell = cell.to_lowercase();
        ORDER_NUMBER_HEADERS.iter().any(|known| *known == cell)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "client;order_number;customer_name;city;created;delivery;note";

    #[test]
    fn test_parses_english_headers() {
        let text = format!("{}\nAcme;1001;Doe;12000;01.02.2025;;weekend delivery\n", HEADER);
        let parsed = parse_rows(&text, b';').unwrap();
        assert_eq!(parsed.rows.len(), 1);
        assert!(parsed.errors.is_empty());

        let (line, row) = &parsed.rows[0];
        assert_eq!(*line, 2);
        assert_eq!(row.client.as_deref(), Some("Acme"));
        assert_eq!(row.order_number.as_deref(), Some("1001"));
        assert_eq!(row.customer_name.as_deref(), Some("Doe"));
        assert_eq!(row.city.as_deref(), Some("12000"));
        assert_eq!(row.created.as_deref(), Some("01.02.2025"));
        assert_eq!(row.delivery, None);
        assert_eq!(row.note.as_deref(), Some("weekend delivery"));
    }

    #[test]
    fn test_parses_czech_headers() {
        let text = "klient;cislo_zakazky;zakaznik;mesto;vytvoreno;dodani;poznamka\n\
                    Acme;2002;Roe;10000;15.03.2025;20.03.2025;\n";
        let parsed = parse_rows(text, b';').unwrap();
        assert_eq!(parsed.rows.len(), 1);
        let row = &parsed.rows[0].1;
        assert_eq!(row.order_number.as_deref(), Some("2002"));
        assert_eq!(row.customer_name.as_deref(), Some("Roe"));
        assert_eq!(row.delivery.as_deref(), Some("20.03.2025"));
    }

    #[test]
    fn test_short_row_is_skipped_with_line_number() {
        let text = format!("{}\nAcme;1001;Doe;12000;01.02.2025;;note\nAcme;9999\n", HEADER);
        let parsed = parse_rows(&text, b';').unwrap();
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].line, 3);
        assert!(parsed.errors[0].reason.contains("expected 7 fields"));
    }

    #[test]
    fn test_missing_header_row_is_an_upload_error() {
        let text = "definitely;not;orders\n1;2;3\n";
        assert!(matches!(
            parse_rows(text, b';'),
            Err(IngestError::UnrecognizedHeader)
        ));
    }

    #[test]
    fn test_values_are_trimmed() {
        let text = format!("{}\n  Acme  ; 1001 ;Doe;12000;;;\n", HEADER);
        let parsed = parse_rows(&text, b';').unwrap();
        assert_eq!(parsed.rows[0].1.client.as_deref(), Some("Acme"));
        assert_eq!(parsed.rows[0].1.order_number.as_deref(), Some("1001"));
    }

    #[test]
    fn test_empty_fields_are_none() {
        let text = format!("{}\nAcme;1001;Doe;12000;;;\n", HEADER);
        let parsed = parse_rows(&text, b';').unwrap();
        let row = &parsed.rows[0].1;
        assert_eq!(row.created, None);
        assert_eq!(row.delivery, None);
        assert_eq!(row.note, None);
    }
}
