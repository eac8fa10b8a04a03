//! Heuristics for payloads that are not worth extracting or displaying.
//!
//! Both checks are advisory: they never fail, and a false positive only costs
//! a fallback attempt.

use tracing::debug;

const SAMPLE_BYTES: usize = 1000;
const SAMPLE_CHARS: usize = 1000;
const SEQUENCE_WINDOW: usize = 100;
const MAX_NUL_PERCENT: usize = 5;
const MAX_CONTROL_PERCENT: usize = 10;

pub const DEFAULT_GARBLE_THRESHOLD_PERCENT: u32 = 20;

const BINARY_SIGNATURES: &[&[u8]] = &[
    b"%PDF",
    b"PK\x03\x04", // zip, docx, xlsx
    b"GIF8",
    b"\x89PNG",
    b"\xFF\xD8\xFF", // jpeg
];

/// Fragments that only show up when bytes were decoded with the wrong charset.
const MISDECODED_SEQUENCES: &[&str] = &["#õ", "\u{FFFD}", "\u{0}", "‡˜'ž"];

/// True for known binary file signatures, or bodies whose first 1000 bytes
/// are heavy in NUL or control bytes.
pub fn is_binary(data: &[u8]) -> bool {
    if BINARY_SIGNATURES.iter().any(|sig| data.starts_with(sig)) {
        return true;
    }

    let sample = &data[..data.len().min(SAMPLE_BYTES)];
    if sample.is_empty() {
        return false;
    }

    let nul_count = sample.iter().filter(|&&b| b == 0x00).count();
    let control_count = sample
        .iter()
        .filter(|&&b| b < 9 || (b > 13 && b < 32))
        .count();

    nul_count * 100 > MAX_NUL_PERCENT * sample.len()
        || control_count * 100 > MAX_CONTROL_PERCENT * sample.len()
}

/// Judges decoded text by the share of characters a reader could not use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GarbleDetector {
    threshold_percent: u32,
}

impl Default for GarbleDetector {
    fn default() -> Self {
        Self::new(DEFAULT_GARBLE_THRESHOLD_PERCENT)
    }
}

impl GarbleDetector {
    pub fn new(threshold_percent: u32) -> Self {
        Self { threshold_percent }
    }

    pub fn threshold_percent(&self) -> u32 {
        self.threshold_percent
    }

    pub fn is_garbled(&self, content: &str) -> bool {
        if content.is_empty() {
            return false;
        }

        let mut sample_len = 0usize;
        let mut unusual = 0usize;
        for c in content.chars().take(SAMPLE_CHARS) {
            sample_len += 1;
            if is_unusual(c) {
                unusual += 1;
            }
        }

        // Strictly above the threshold; exactly at it is still readable.
        if unusual * 100 > self.threshold_percent as usize * sample_len {
            debug!(
                unusual,
                sample_len,
                threshold_percent = self.threshold_percent,
                "content exceeds unusual character threshold"
            );
            return true;
        }

        let head: String = content.chars().take(SEQUENCE_WINDOW).collect();
        MISDECODED_SEQUENCES.iter().any(|seq| head.contains(seq))
    }
}

/// Garble check with the default threshold.
pub fn is_garbled(content: &str) -> bool {
    GarbleDetector::default().is_garbled(content)
}

fn is_unusual(c: char) -> bool {
    if c == '\u{FFFD}' {
        return true;
    }
    let printable = matches!(c, ' '..='~' | '\n' | '\r' | '\t');
    let combining_mark = matches!(c, '\u{0300}'..='\u{036F}');
    !printable && !combining_mark
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_signatures() {
        let signatures: [&[u8]; 5] = [
            b"%PDF-1.7",
            b"PK\x03\x04rest",
            b"GIF89a",
            b"\x89PNG\r\n\x1a\n",
            b"\xFF\xD8\xFF",
        ];
        for sig in signatures {
            assert!(is_binary(sig), "{sig:?} should be binary");
            let mut followed = sig.to_vec();
            followed.extend_from_slice(&b"<html><body>text</body></html>".repeat(40));
            assert!(is_binary(&followed));
        }
    }

    #[test]
    fn test_html_is_not_binary() {
        let html = b"<!DOCTYPE html>\n<html>\r\n\t<body><p>Hello</p></body></html>";
        assert!(!is_binary(html));
        assert!(!is_binary(b""));
    }

    #[test]
    fn test_nul_ratio() {
        // 6 of 100 bytes are NUL
        let mut data = vec![b'a'; 94];
        data.extend_from_slice(&[0u8; 6]);
        assert!(is_binary(&data));

        // exactly 5%
        let mut data = vec![b'a'; 95];
        data.extend_from_slice(&[0u8; 5]);
        assert!(!is_binary(&data));
    }

    #[test]
    fn test_control_ratio_ignores_formatting_bytes() {
        // tab, newline, vertical tab, form feed and carriage return do not count
        let data = b"\t\n\x0b\x0c\r".repeat(50);
        assert!(!is_binary(&data));

        let mut data = vec![b'a'; 89];
        data.extend_from_slice(&[0x1bu8; 11]);
        assert!(is_binary(&data));
    }

    #[test]
    fn test_only_first_thousand_bytes_sampled() {
        let mut data = vec![b'a'; 1000];
        data.extend_from_slice(&[0u8; 500]);
        assert!(!is_binary(&data));
    }

    #[test]
    fn test_garble_threshold_is_strict() {
        let detector = GarbleDetector::default();

        // 200 of 1000 unusual characters is exactly 20%
        let at_threshold = format!("{}{}", "ж".repeat(200), "a".repeat(800));
        assert!(!detector.is_garbled(&at_threshold));

        let above = format!("{}{}", "ж".repeat(201), "a".repeat(799));
        assert!(detector.is_garbled(&above));
    }

    #[test]
    fn test_garble_sample_is_first_thousand_chars() {
        let text = format!("{}{}", "a".repeat(1000), "ж".repeat(5000));
        assert!(!is_garbled(&text));
    }

    #[test]
    fn test_combining_marks_are_exempt() {
        let text = "e\u{0301}".repeat(300);
        assert!(!is_garbled(&text));
    }

    #[test]
    fn test_replacement_char_near_start() {
        let text = format!("ok \u{FFFD} {}", "plain text ".repeat(100));
        assert!(is_garbled(&text));

        let late = format!("{} \u{FFFD}", "plain text ".repeat(100));
        assert!(!is_garbled(&late));
    }

    #[test]
    fn test_known_misdecoded_sequence() {
        let text = format!("Intro #õ3fa {}", "normal words ".repeat(50));
        assert!(is_garbled(&text));
    }

    #[test]
    fn test_clean_text_is_not_garbled() {
        assert!(!is_garbled(""));
        assert!(!is_garbled("<p>The council met on Tuesday.</p>\n<p>It voted.</p>"));
        assert!(!is_garbled("Café résumé: a naïve but honest look at the menu."));
    }

    #[test]
    fn test_custom_threshold() {
        let text = format!("{}{}", "ж".repeat(10), "a".repeat(90));
        assert!(GarbleDetector::new(5).is_garbled(&text));
        assert!(!GarbleDetector::new(10).is_garbled(&text));
    }
}
