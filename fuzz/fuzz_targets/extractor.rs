#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use url::Url;

use feedtext::extractor::{clean, is_binary, is_garbled, reader};
use feedtext::fetcher::{decode, resolve_encoding};

fuzz_target!(|data: &[u8]| {
    // Decoding, detection and extraction must never panic on arbitrary bodies
    if is_binary(data) {
        return;
    }

    let encoding = resolve_encoding(Some("text/html"), data);
    let decoded = decode(&Bytes::copy_from_slice(data), &encoding);
    let html = decoded.text();

    let base_url = Url::parse("https://example.com/article").unwrap();
    let content = clean(&reader::fallback(&html, &base_url).content);
    let _ = is_garbled(&content);
});
