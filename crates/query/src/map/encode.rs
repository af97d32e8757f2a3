// crates/query/src/map/encode.rs
//
// Direct-to-bytes JSON writer over the closed `Value` set. No serializer
// machinery is involved; every kind appends its bytes straight into the
// caller's buffer.

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::LowerExp;
use std::io::Write;
use uuid::Uuid;

use super::value::Value;

pub(crate) fn append_value(buf: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Bool(true) => buf.extend_from_slice(b"true"),
        Value::Bool(false) => buf.extend_from_slice(b"false"),
        Value::Int(i) => append_int(buf, *i),
        Value::Float32(f) => append_float(buf, *f, f.is_finite()),
        Value::Float64(f) => append_float(buf, *f, f.is_finite()),
        Value::String(s) => append_str(buf, s),
        Value::Uuid(u) => {
            let mut tmp = Uuid::encode_buffer();
            append_str(buf, u.hyphenated().encode_lower(&mut tmp));
        }
        Value::Time(t) => append_str(buf, &format_time(t)),
        Value::Strings(items) => {
            buf.push(b'[');
            for (i, s) in items.iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                append_str(buf, s);
            }
            buf.push(b']');
        }
        Value::List(items) => {
            buf.push(b'[');
            for (i, v) in items.iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                append_value(buf, v);
            }
            buf.push(b']');
        }
        Value::Map(m) => m.append_json(buf),
    }
}

fn append_int(buf: &mut Vec<u8>, i: i64) {
    // writing into a Vec cannot fail
    let written = write!(buf, "{}", i);
    debug_assert!(written.is_ok());
}

/// Exponential notation with the shortest round-tripping mantissa and a
/// signed, at least two digit exponent: `12.34` → `1.234e+01`.
///
/// Non-finite values have no JSON form and are written as `null`.
fn append_float<F: LowerExp>(buf: &mut Vec<u8>, f: F, finite: bool) {
    if !finite {
        buf.extend_from_slice(b"null");
        return;
    }

    let tmp = format!("{:e}", f);

    let (mantissa, exp) = tmp.split_once('e').unwrap_or((tmp.as_str(), "0"));
    let (sign, digits) = match exp.strip_prefix('-') {
        Some(d) => (b'-', d),
        None => (b'+', exp),
    };

    buf.extend_from_slice(mantissa.as_bytes());
    buf.push(b'e');
    buf.push(sign);
    if digits.len() < 2 {
        buf.push(b'0');
    }
    buf.extend_from_slice(digits.as_bytes());
}

/// RFC 3339 in UTC with whole seconds, e.g. `2024-05-01T12:00:00Z`.
pub(crate) fn format_time(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Append `s` as a quoted JSON string.
pub(crate) fn append_str(buf: &mut Vec<u8>, s: &str) {
    buf.push(b'"');

    let bytes = s.as_bytes();
    let mut start = 0;
    for (i, &b) in bytes.iter().enumerate() {
        let escape: &[u8] = match b {
            b'"' => b"\\\"",
            b'\\' => b"\\\\",
            b'\n' => b"\\n",
            b'\r' => b"\\r",
            b'\t' => b"\\t",
            0x08 => b"\\b",
            0x0c => b"\\f",
            0x00..=0x1f => {
                buf.extend_from_slice(&bytes[start..i]);
                append_unicode_escape(buf, b);
                start = i + 1;
                continue;
            }
            _ => continue,
        };
        buf.extend_from_slice(&bytes[start..i]);
        buf.extend_from_slice(escape);
        start = i + 1;
    }
    buf.extend_from_slice(&bytes[start..]);

    buf.push(b'"');
}

fn append_unicode_escape(buf: &mut Vec<u8>, b: u8) {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    buf.extend_from_slice(b"\\u00");
    buf.push(HEX[(b >> 4) as usize]);
    buf.push(HEX[(b & 0x0f) as usize]);
}
