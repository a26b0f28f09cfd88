//! UTF-8 rune decoding and encoding.
//!
//! `read_rune` decodes one scalar from the head of a range by counting
//! the leading one-bits of the first byte and validating the continuation
//! bytes. `write_utf8` is the inverse for any valid scalar.

use crate::diag::Log;
use crate::source::Range;

fn leading_ones(byte: u8) -> u32 {
    byte.leading_ones()
}

/// Decode one UTF-8 scalar from the start of `range`. Returns the byte
/// length consumed and the scalar, or `None` after logging a diagnostic
/// for a malformed sequence.
pub fn read_rune(log: &mut Log, range: &Range) -> Option<(u32, u32)> {
    let bytes = range.bytes();
    let first = match bytes.first() {
        Some(&b) => b,
        None => {
            log.error(range.clone(), "invalid UTF-8 sequence");
            return None;
        }
    };

    let len = leading_ones(first);
    if len == 0 {
        return Some((1, first as u32));
    }
    if !(2..=4).contains(&len) || bytes.len() < len as usize {
        log.error(range.clone(), "invalid UTF-8 sequence");
        return None;
    }
    for i in 1..len {
        if bytes[i as usize] & 0xC0 != 0x80 {
            log.error(range.sub(i, 1), "invalid UTF-8 continuation byte");
            return None;
        }
    }

    let rune = match len {
        2 => ((first as u32 & 0x1F) << 6) | (bytes[1] as u32 & 0x3F),
        3 => {
            ((first as u32 & 0x0F) << 12)
                | ((bytes[1] as u32 & 0x3F) << 6)
                | (bytes[2] as u32 & 0x3F)
        }
        _ => {
            ((first as u32 & 0x07) << 18)
                | ((bytes[1] as u32 & 0x3F) << 12)
                | ((bytes[2] as u32 & 0x3F) << 6)
                | (bytes[3] as u32 & 0x3F)
        }
    };
    Some((len, rune))
}

/// Encode a scalar as UTF-8 onto `out`. Returns false for values that
/// are not valid scalars (surrogates, beyond U+10FFFF).
pub fn write_utf8(out: &mut String, rune: u32) -> bool {
    match char::from_u32(rune) {
        Some(c) => {
            out.push(c);
            true
        }
        None => false,
    }
}

/// Like `write_utf8` but reports invalid scalars to the log.
pub fn write_utf8_checked(out: &mut String, log: &mut Log, range: &Range, rune: u32) -> bool {
    if write_utf8(out, rune) {
        true
    } else {
        log.error(range.clone(), format!("invalid UCS character: \\U{rune:08X}"));
        false
    }
}
