//! Orderdesk ingestion pipeline
//!
//! Turns a raw uploaded byte buffer into classified order records:
//! encoding detection, delimited parsing, normalization, and routing of
//! flagged rows to the confirmation queue. The pipeline is pure — nothing
//! in this crate touches the database or the network.
//!
//! Failure handling is two-tiered: problems with the file as a whole
//! ([`IngestError`]) abort the upload, while problems with individual rows
//! become [`RowError`](orderdesk_core::models::RowError)s in the
//! [`Classification`] and processing continues.

pub mod classify;
pub mod encoding;
pub mod parser;

pub use classify::{
    classify_rows, normalize_order_number, Classification, ConfirmationPolicy,
};
pub use encoding::{decode_upload, detect_encoding};
pub use parser::{parse_rows, ParsedRows, RawOrderRow};

/// Errors that abort the whole upload. Row-level problems are reported as
/// `RowError`s instead and never abort.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("uploaded file is empty")]
    EmptyFile,

    #[error("unrecognized header row: no known order columns found (wrong file or mis-detected encoding?)")]
    UnrecognizedHeader,

    #[error("failed to read delimited data: {0}")]
    Csv(#[from] csv::Error),
}

/// Run the full pipeline on an uploaded byte buffer.
pub fn ingest_upload(
    bytes: &[u8],
    delimiter: u8,
    policy: &ConfirmationPolicy,
) -> Result<Classification, IngestError> {
    if bytes.is_empty() {
        return Err(IngestError::EmptyFile);
    }

    let (text, encoding, had_decode_errors) = encoding::decode_upload(bytes);
    tracing::debug!(
        encoding = encoding.name(),
        bytes = bytes.len(),
        had_decode_errors,
        "Decoded uploaded export"
    );

    let parsed = parser::parse_rows(&text, delimiter)?;
    let mut classification = classify::classify_rows(parsed.rows, policy);

    // Merge tokenization failures with validation failures, in file order.
    classification.errors.extend(parsed.errors);
    classification.errors.sort_by_key(|e| e.line);

    Ok(classification)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_rejected() {
        let policy = ConfirmationPolicy::default();
        assert!(matches!(
            ingest_upload(b"", b';', &policy),
            Err(IngestError::EmptyFile)
        ));
    }

    #[test]
    fn test_garbage_file_is_rejected_at_header() {
        let policy = ConfirmationPolicy::default();
        let result = ingest_upload(b"this is not an export\njust prose\n", b';', &policy);
        assert!(matches!(result, Err(IngestError::UnrecognizedHeader)));
    }
}
