//! Character encoding detection and transcoding.
//!
//! Web pages declare their charset, when they declare it at all, inside the
//! first few hundred bytes. We look for a `<meta charset>` or a
//! `Content-Type` meta tag there, fall back to UTF-8, and decode lossily so
//! a stray byte never aborts extraction.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// How many leading bytes to scan for a charset declaration.
const DETECT_WINDOW: usize = 1024;

#[allow(clippy::expect_used)]
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s;>]+)"#).expect("META_CHARSET regex")
});

/// Detect the character encoding declared in the given HTML bytes.
///
/// Scans only the first kilobyte; defaults to UTF-8 when no usable
/// declaration is found. The same pattern covers `<meta charset="...">` and
/// the older `http-equiv` form, since both end in a `charset=` token.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    let head = &html[..html.len().min(DETECT_WINDOW)];
    let head = String::from_utf8_lossy(head);

    if let Some(captures) = META_CHARSET.captures(&head) {
        if let Some(label) = captures.get(1) {
            if let Some(encoding) = Encoding::for_label(label.as_str().as_bytes()) {
                return encoding;
            }
        }
    }
    UTF_8
}

/// Decode HTML bytes to a UTF-8 string using the declared encoding.
///
/// Invalid sequences are replaced with U+FFFD rather than reported.
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    let encoding = detect_encoding(html);
    if encoding == UTF_8 {
        return String::from_utf8_lossy(html).into_owned();
    }
    let (decoded, _, _) = encoding.decode(html);
    decoded.into_owned()
}
