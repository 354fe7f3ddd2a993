//! Byte-level encoding detection for uploaded exports.
//!
//! The logistics system emits CSV in whatever encoding the operator's
//! spreadsheet saved — usually Windows-1250, sometimes UTF-8, occasionally
//! with a BOM. Detection is a statistical best guess and is never validated
//! here; a wildly wrong guess surfaces downstream as a header validation
//! failure.

use chardetng::EncodingDetector;
use encoding_rs::Encoding;

/// Guess the text encoding of a raw byte buffer.
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

/// Decode an uploaded buffer using the detected encoding.
///
/// Undecodable sequences become replacement characters rather than failing
/// the upload; rows they corrupt are dropped one by one downstream. Returns
/// the decoded text, the encoding actually used, and whether any
/// replacements were made.
pub fn decode_upload(bytes: &[u8]) -> (String, &'static Encoding, bool) {
    let encoding = detect_encoding(bytes);
    let (text, actual_encoding, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::warn!(
            encoding = actual_encoding.name(),
            "Uploaded file contains byte sequences invalid for the detected encoding"
        );
    }
    (text.into_owned(), actual_encoding, had_errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_utf8_with_diacritics() {
        let text = "číslo zakázky;zákazník;město\n1001;Železářství Novák;Přerov\n";
        let (decoded, encoding, had_errors) = decode_upload(text.as_bytes());
        assert_eq!(encoding, encoding_rs::UTF_8);
        assert!(!had_errors);
        assert_eq!(decoded, text);
    }

    #[test]
    fn test_plain_ascii_decodes_losslessly() {
        // Pure ASCII is identical under every encoding the detector can pick.
        let text = "order_number;client;city\n1001;Acme;Prague\n";
        let (decoded, _, had_errors) = decode_upload(text.as_bytes());
        assert!(!had_errors);
        assert_eq!(decoded, text);
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("order_number;client\n".as_bytes());
        let (decoded, encoding, _) = decode_upload(&bytes);
        assert_eq!(encoding, encoding_rs::UTF_8);
        assert!(decoded.starts_with("order_number"));
    }

    #[test]
    fn test_windows_1250_round_trip() {
        // "objednávka" encoded by a Czech-locale spreadsheet.
        let original = "objednávka;zákazník";
        let (encoded, _, _) = encoding_rs::WINDOWS_1250.encode(original);
        let decoded = encoding_rs::WINDOWS_1250.decode(&encoded).0;
        assert_eq!(decoded, original);
    }
}
