use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::ProjectError;

/// Computes the SHA-256 checksum of a project value.
///
/// The hash covers the canonical encoding of the value with the top-level
/// `checksum` key removed, so it can be recomputed from a loaded file. The
/// canonical encoding is compact JSON with sorted keys, ASCII-only strings
/// (`\uXXXX` escapes) and floats in shortest round-trip form with a two
/// digit signed exponent (`1e-07`, `1e+16`), which is the form written by
/// the desktop application.
///
/// # Errors
///
/// Returns an error if the value cannot be encoded.
pub fn compute(value: &Value) -> Result<String, ProjectError> {
    let mut value = value.clone();
    if let Value::Object(map) = &mut value {
        map.remove("checksum");
    }
    let bytes = canonical_json(&value)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Checks the stored checksum of a project value, if it has one.
///
/// # Errors
///
/// Returns an error if a stored checksum does not match the content.
pub fn verify(value: &Value) -> Result<(), ProjectError> {
    let Some(stored) = value.get("checksum").and_then(Value::as_str) else {
        return Ok(());
    };
    let computed = compute(value)?;
    if stored == computed {
        Ok(())
    } else {
        Err(ProjectError::ChecksumMismatch {
            stored: stored.to_owned(),
            computed,
        })
    }
}

// `serde_json::Map` is ordered by key, which gives the sorted key order.
fn canonical_json(value: &Value) -> Result<Vec<u8>, ProjectError> {
    let mut bytes = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut bytes, CanonicalFormatter);
    value.serialize(&mut serializer)?;
    Ok(bytes)
}

/// Compact formatter with ASCII-only strings and exponent-style floats.
struct CanonicalFormatter;

impl Formatter for CanonicalFormatter {
    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(float_repr(value)?.as_bytes())
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            if ch.is_ascii() && ch != '\x7f' {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..index])?;
            let mut units = [0_u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = index + ch.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}

/// Formats a finite float with the shortest digits that round-trip.
///
/// Scientific notation is used when the decimal point falls more than four
/// places before the first digit or more than sixteen after it.
fn float_repr(value: f64) -> io::Result<String> {
    if value == 0.0 {
        let zero = if value.is_sign_negative() {
            "-0.0"
        } else {
            "0.0"
        };
        return Ok(zero.to_owned());
    }

    // `{:e}` prints the shortest round-trip digits, e.g. `-1.25e-7`.
    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific
        .split_once('e')
        .ok_or_else(|| io::Error::other(format!("unexpected float form '{scientific}'")))?;
    let exponent: i32 = exponent.parse().map_err(io::Error::other)?;
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let point = exponent + 1;

    if point <= -4 || point > 16 {
        let (lead, rest) = digits.split_at(1);
        let fraction = if rest.is_empty() {
            String::new()
        } else {
            format!(".{rest}")
        };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        return Ok(format!("{sign}{lead}{fraction}e{exp_sign}{:02}", exponent.unsigned_abs()));
    }

    let shift = usize::try_from(point.unsigned_abs()).map_err(io::Error::other)?;
    let text = if point <= 0 {
        format!("0.{}{digits}", "0".repeat(shift))
    } else if shift >= digits.len() {
        format!("{digits}{}.0", "0".repeat(shift - digits.len()))
    } else {
        let (whole, fraction) = digits.split_at(shift);
        format!("{whole}.{fraction}")
    };
    Ok(format!("{sign}{text}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn key_order_does_not_matter() {
        let a: Value = serde_json::from_str(r#"{"b": 1, "a": [1, 2]}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"a": [1, 2], "b": 1}"#).unwrap();
        assert_eq!(compute(&a).unwrap(), compute(&b).unwrap());
    }

    #[test]
    fn checksum_field_is_excluded() {
        let plain = json!({"format": "x"});
        let stamped = json!({"format": "x", "checksum": "anything"});
        assert_eq!(compute(&plain).unwrap(), compute(&stamped).unwrap());
        assert_eq!(compute(&plain).unwrap().len(), 64);
    }

    #[test]
    fn verify_detects_tampering() {
        let mut value = json!({"format": "x", "solutions": []});
        let sum = compute(&value).unwrap();
        value["checksum"] = Value::String(sum);
        verify(&value).unwrap();

        value["format"] = Value::String("y".into());
        assert!(matches!(
            verify(&value),
            Err(ProjectError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn missing_checksum_passes() {
        verify(&json!({"format": "x"})).unwrap();
    }

    #[test]
    fn float_forms() {
        let cases = [
            (1e-7, "1e-07"),
            (1e-5, "1e-05"),
            (0.0001, "0.0001"),
            (0.001, "0.001"),
            (7.85, "7.85"),
            (100.0, "100.0"),
            (123_456.789, "123456.789"),
            (1e15, "1000000000000000.0"),
            (1e16, "1e+16"),
            (1.5e300, "1.5e+300"),
            (2.5e-310, "2.5e-310"),
            (-2.5, "-2.5"),
            (-0.0, "-0.0"),
            (1.0 / 3.0, "0.3333333333333333"),
        ];
        for (value, expected) in cases {
            assert_eq!(float_repr(value).unwrap(), expected, "{value:e}");
        }
    }

    #[test]
    fn canonical_encoding_is_ascii() {
        let value = json!({"name": "Куб\u{7f}", "x": 1e-7, "n": 3, "tab": "a\tb"});
        let text = String::from_utf8(canonical_json(&value).unwrap()).unwrap();
        assert_eq!(text, r#"{"n":3,"name":"\u041a\u0443\u0431\u007f","tab":"a\tb","x":1e-07}"#);
    }

    #[test]
    fn astral_characters_use_surrogate_pairs() {
        let text = String::from_utf8(canonical_json(&json!("𝔸")).unwrap()).unwrap();
        assert_eq!(text, r#""\ud835\udd38""#);
    }

    #[test]
    fn matches_desktop_checksum() {
        // Digest of json.dumps(value, sort_keys=True, separators=(',', ':')).
        let value = json!({
            "format": "TheSolution_JSON",
            "metadata": {"name": "Куб"},
            "solutions": [{
                "type": "SolutionCoordinate",
                "x": 1e-7, "y": 2.5, "z": 100.0,
                "a": 1e16, "b": 0.0001, "c": -0.0
            }],
            "version": "1.0"
        });
        assert_eq!(
            compute(&value).unwrap(),
            "1e9e2fb564ae1a66e491e89e12fe52fc8bf6b6900c4e88c12aed3fea6c5f2b1e"
        );
    }
}
