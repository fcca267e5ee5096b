//! Repair of text that was decoded as Latin-1 but stored as UTF-8
//!
//! Chat exports commonly escape UTF-8 bytes one per code point, so "ó"
//! arrives as "Ã³". Reinterpreting the code points as bytes recovers the
//! original text.

use std::borrow::Cow;
use tracing::{debug, warn};

/// Re-encode `value` if it looks like byte-per-char mojibake.
///
/// ASCII and text that already holds code points above U+00FF are returned
/// untouched. When the reinterpreted bytes are not valid UTF-8 the original
/// value is kept. The failure is a warning only when the text holds a
/// UTF-8 lead byte followed by a continuation byte; correctly decoded text
/// such as "café" logs at debug.
pub fn repair_text(value: &str) -> Cow<'_, str> {
    if value.is_ascii() {
        return Cow::Borrowed(value);
    }

    let mut bytes = Vec::with_capacity(value.len());
    for ch in value.chars() {
        match u8::try_from(u32::from(ch)) {
            Ok(byte) => bytes.push(byte),
            Err(_) => return Cow::Borrowed(value),
        }
    }

    match String::from_utf8(bytes) {
        Ok(repaired) => Cow::Owned(repaired),
        Err(err) => {
            if has_escaped_sequence(value) {
                warn!(value, error = %err, "could not re-encode text, keeping original");
            } else {
                debug!(value, "text is already decoded, keeping original");
            }
            Cow::Borrowed(value)
        }
    }
}

/// True when a char in the lead range 0xC2..=0xF4 is followed by one in
/// the continuation range 0x80..=0xBF
fn has_escaped_sequence(value: &str) -> bool {
    let chars: Vec<char> = value.chars().collect();
    chars.windows(2).any(|pair| {
        ('\u{c2}'..='\u{f4}').contains(&pair[0]) && ('\u{80}'..='\u{bf}').contains(&pair[1])
    })
}
