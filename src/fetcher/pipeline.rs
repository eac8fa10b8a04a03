use crate::fetcher::errors::FailureKind;
use crate::fetcher::types::{DecodedDocument, RawDocument, ResolvedEncoding};
use bytes::Bytes;
use encoding_rs::Encoding;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// How much of the body is searched for a `<meta>` charset declaration.
const META_SCAN_LIMIT: usize = 4096;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s;/>]+)"#).unwrap());

static META_HTTP_EQUIV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap()
});

/// Resolves and decodes a raw document in one step.
pub fn decode_document(doc: &RawDocument) -> DecodedDocument {
    let encoding = resolve_encoding(doc.content_type.as_deref(), &doc.body);
    debug!(
        encoding = %encoding,
        content_type = doc.content_type.as_deref().unwrap_or(""),
        bytes = doc.body.len(),
        "resolved document encoding"
    );
    decode(&doc.body, &encoding)
}

/// Header charset first, then a markup declaration, then utf-8.
///
/// Labels are returned as declared (lowercased), whether or not a decoder
/// exists for them.
pub fn resolve_encoding(content_type: Option<&str>, body: &[u8]) -> ResolvedEncoding {
    // 1. Check Content-Type header for charset
    if let Some(label) = content_type
        .and_then(|ct| CHARSET_REGEX.captures(ct))
        .and_then(|captures| captures.get(1))
    {
        return ResolvedEncoding::new(label.as_str());
    }

    // 2. Check for a meta declaration near the top of the document
    let search_bytes = &body[..body.len().min(META_SCAN_LIMIT)];
    let search_str = String::from_utf8_lossy(search_bytes);

    // Covers <meta charset="..."> and, in most markup, the http-equiv form too
    if let Some(label) = META_CHARSET_REGEX
        .captures(&search_str)
        .and_then(|captures| captures.get(1))
    {
        return ResolvedEncoding::new(label.as_str());
    }

    if let Some(label) = META_HTTP_EQUIV_REGEX
        .captures(&search_str)
        .and_then(|captures| captures.get(1))
    {
        return ResolvedEncoding::new(label.as_str());
    }

    // 3. Nothing declared
    ResolvedEncoding::utf8()
}

/// Transcodes `body` to UTF-8. Malformed sequences become U+FFFD; only an
/// unknown label leaves the bytes as they were.
pub fn decode(body: &Bytes, encoding: &ResolvedEncoding) -> DecodedDocument {
    if encoding.is_utf8() {
        return DecodedDocument {
            bytes: body.clone(),
            encoding: encoding.clone(),
            transcoded: false,
        };
    }

    let Some(decoder) = Encoding::for_label(encoding.as_str().as_bytes()) else {
        warn!(
            kind = %FailureKind::Decode,
            encoding = %encoding,
            bytes = body.len(),
            "no decoder for declared charset, using raw bytes"
        );
        return DecodedDocument {
            bytes: body.clone(),
            encoding: encoding.clone(),
            transcoded: false,
        };
    };

    let (decoded, had_errors) = decoder.decode_without_bom_handling(body);
    if had_errors {
        warn!(
            kind = %FailureKind::Decode,
            encoding = %encoding,
            bytes = body.len(),
            "malformed sequences replaced while decoding"
        );
    } else {
        debug!(
            encoding = %encoding,
            decoder = decoder.name(),
            bytes = body.len(),
            "converted body to utf-8"
        );
    }

    DecodedDocument {
        bytes: Bytes::from(decoded.into_owned()),
        encoding: encoding.clone(),
        transcoded: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_charset_from_content_type() {
        let body = b"<html><head><title>Test</title></head></html>";

        let encoding = resolve_encoding(Some("text/html; charset=ISO-8859-1"), body);
        assert_eq!(encoding.as_str(), "iso-8859-1");
    }

    #[test]
    fn test_content_type_charset_strips_trailing_parameters() {
        let encoding = resolve_encoding(Some("text/html; charset= \"UTF-8\"; format=flowed"), b"");
        assert_eq!(encoding.as_str(), "utf-8");
    }

    #[test]
    fn test_header_wins_over_meta_tag() {
        let body = b"<html><head><meta charset=\"windows-1252\"></head></html>";

        let encoding = resolve_encoding(Some("text/html; charset=koi8-r"), body);
        assert_eq!(encoding.as_str(), "koi8-r");
    }

    #[test]
    fn test_detect_charset_from_meta_tag() {
        let body = b"<html><head><meta charset=\"windows-1252\"><title>Test</title></head></html>";

        let encoding = resolve_encoding(None, body);
        assert_eq!(encoding.as_str(), "windows-1252");
    }

    #[test]
    fn test_detect_charset_from_meta_http_equiv() {
        let body = b"<html><head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=Shift_JIS\"><title>Test</title></head></html>";

        let encoding = resolve_encoding(Some("text/html"), body);
        assert_eq!(encoding.as_str(), "shift_jis");
    }

    #[test]
    fn test_defaults_to_utf8() {
        let body = b"<html><head><title>Test</title></head></html>";

        assert_eq!(resolve_encoding(None, body).as_str(), "utf-8");
        assert_eq!(resolve_encoding(Some("text/html"), b"").as_str(), "utf-8");
    }

    #[test]
    fn test_meta_outside_scan_window_is_ignored() {
        let mut body = vec![b' '; META_SCAN_LIMIT];
        body.extend_from_slice(b"<meta charset=\"windows-1252\">");

        assert_eq!(resolve_encoding(None, &body).as_str(), "utf-8");
    }

    #[test]
    fn test_decode_utf8_is_passthrough() {
        let body = Bytes::from("Hello, 世界!");

        let decoded = decode(&body, &ResolvedEncoding::utf8());
        assert!(!decoded.transcoded);
        assert_eq!(decoded.text(), "Hello, 世界!");
    }

    #[test]
    fn test_decode_windows_1252() {
        // "café “quoted”" in windows-1252
        let body = Bytes::from_static(b"caf\xe9 \x93quoted\x94");

        let decoded = decode(&body, &ResolvedEncoding::new("windows-1252"));
        assert!(decoded.transcoded);
        assert_eq!(decoded.text(), "café \u{201C}quoted\u{201D}");
    }

    #[test]
    fn test_decode_unknown_label_keeps_bytes() {
        let body = Bytes::from_static(b"plain bytes");

        let decoded = decode(&body, &ResolvedEncoding::new("x-made-up"));
        assert!(!decoded.transcoded);
        assert_eq!(decoded.encoding.as_str(), "x-made-up");
        assert_eq!(decoded.bytes, body);
    }

    #[test]
    fn test_decode_malformed_input_replaces_bad_sequence() {
        // 0x82 0xA0 is a valid Shift_JIS pair, a lone 0x82 at the end is not
        let body = Bytes::from_static(b"\x82\xa0\x82");

        let decoded = decode(&body, &ResolvedEncoding::new("shift_jis"));
        assert!(decoded.transcoded);
        assert_eq!(decoded.text(), "\u{3042}\u{FFFD}");
    }

    #[test]
    fn test_decode_shift_jis_page_with_bad_trailing_byte() {
        let text = "日本語の記事本文です。".repeat(50);
        let (encoded, _, had_errors) = encoding_rs::SHIFT_JIS.encode(&text);
        assert!(!had_errors);
        let mut bytes = encoded.into_owned();
        bytes.push(0x82);

        let decoded = decode(&Bytes::from(bytes), &ResolvedEncoding::new("shift_jis"));
        assert!(decoded.transcoded);

        let decoded_text = decoded.text();
        assert!(decoded_text.starts_with(&text));
        assert_eq!(decoded_text.matches('\u{FFFD}').count(), 1);
    }
}
