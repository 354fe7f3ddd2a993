//! End-to-end pipeline tests: bytes in, classified records out.

use chrono::NaiveDate;
use orderdesk_ingest::{ingest_upload, normalize_order_number, ConfirmationPolicy, IngestError};

const HEADER: &str = "client;order_number;customer_name;city;created;delivery;note";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn flagged_row_is_staged_with_delivery_absent() {
    let csv = format!("{}\nX;1001R;Doe;12000;01.02.2025;;\n", HEADER);
    let result = ingest_upload(csv.as_bytes(), b';', &ConfirmationPolicy::default()).unwrap();

    assert!(result.auto.is_empty());
    assert!(result.errors.is_empty());
    assert_eq!(result.needs_confirmation.len(), 1);

    let record = &result.needs_confirmation[0];
    assert_eq!(record.order_number, "1001R");
    assert_eq!(record.client, "X");
    assert_eq!(record.customer_name, "Doe");
    assert_eq!(record.city, "12000");
    assert_eq!(record.created, Some(date(2025, 2, 1)));
    assert_eq!(record.delivery, None);
}

#[test]
fn unflagged_row_is_auto_eligible_with_both_dates() {
    let csv = format!("{}\nX;2002;Roe;10000;15.03.2025;20.03.2025;\n", HEADER);
    let result = ingest_upload(csv.as_bytes(), b';', &ConfirmationPolicy::default()).unwrap();

    assert!(result.needs_confirmation.is_empty());
    assert_eq!(result.auto.len(), 1);

    let record = &result.auto[0];
    assert_eq!(record.order_number, "2002");
    assert_eq!(record.created, Some(date(2025, 3, 15)));
    assert_eq!(record.delivery, Some(date(2025, 3, 20)));
}

#[test]
fn quoted_order_number_matches_confirmation_selection() {
    // The export wraps order numbers in ="..." so spreadsheets keep them
    // textual; a confirmation form can send the same artifacts back.
    let csv = format!("{}\nX;=\"12345R\";Doe;12000;01.02.2025;;\n", HEADER);
    let result = ingest_upload(csv.as_bytes(), b';', &ConfirmationPolicy::default()).unwrap();

    assert_eq!(result.needs_confirmation.len(), 1);
    let classified = result.needs_confirmation[0].order_number.clone();
    assert_eq!(classified, "12345R");

    // Round trip: the same normalization applied at selection time agrees.
    assert_eq!(normalize_order_number("=\"12345R\""), classified);
    assert_eq!(normalize_order_number(&classified), classified);
}

#[test]
fn mixed_file_partitions_and_accounts_for_every_row() {
    let csv = format!(
        "{}\n\
         X;1001R;Doe;12000;01.02.2025;;\n\
         X;2002;Roe;10000;15.03.2025;20.03.2025;\n\
         X;3003;;10000;15.03.2025;;\n\
         X;4004;Poe;10000;bad-date;;\n\
         X;5005\n",
        HEADER
    );
    let result = ingest_upload(csv.as_bytes(), b';', &ConfirmationPolicy::default()).unwrap();

    assert_eq!(result.needs_confirmation.len(), 1);
    assert_eq!(result.auto.len(), 1);
    assert_eq!(result.errors.len(), 3);
    assert_eq!(result.rows_processed(), 5);

    // Errors come back in file order with their line numbers.
    let lines: Vec<usize> = result.errors.iter().map(|e| e.line).collect();
    assert_eq!(lines, vec![4, 5, 6]);
}

#[test]
fn pipeline_is_idempotent_across_runs() {
    let csv = format!(
        "{}\nX;1001R;Doe;12000;01.02.2025;;\nX;2002;Roe;10000;15.03.2025;;\n",
        HEADER
    );
    let policy = ConfirmationPolicy::default();
    let first = ingest_upload(csv.as_bytes(), b';', &policy).unwrap();
    let second = ingest_upload(csv.as_bytes(), b';', &policy).unwrap();
    assert_eq!(first, second);
}

#[test]
fn windows_1250_export_still_parses() {
    let csv = format!(
        "{}\nStavebniny Novák;1001R;Růžička;Přerov;01.02.2025;;montáž\n",
        HEADER
    );
    let (bytes, _, _) = encoding_rs::WINDOWS_1250.encode(&csv);
    let result = ingest_upload(&bytes, b';', &ConfirmationPolicy::default()).unwrap();

    // Whatever single-byte encoding the detector lands on, the ASCII
    // structure and order number survive intact.
    assert_eq!(result.needs_confirmation.len(), 1);
    let record = &result.needs_confirmation[0];
    assert_eq!(record.order_number, "1001R");
    assert_eq!(record.created, Some(date(2025, 2, 1)));
    assert!(!record.city.is_empty());
}

#[test]
fn empty_upload_is_a_transport_error() {
    assert!(matches!(
        ingest_upload(&[], b';', &ConfirmationPolicy::default()),
        Err(IngestError::EmptyFile)
    ));
}
