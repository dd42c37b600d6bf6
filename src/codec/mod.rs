//! Codec helpers backing the console transform commands
//!
//! Thin wrappers over the hashing and encoding crates, plus the `\uXXXX`
//! escape codec which has no single-crate equivalent. Fallible decoders
//! return [`CodecError`] so the caller can report the underlying library
//! error text and keep going.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha1::{Digest, Sha1};
use thiserror::Error;

/// Errors produced by the fallible decoders
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("{0}")]
    Base64(#[from] base64::DecodeError),
    #[error("{0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("invalid escape sequence: {0}")]
    Escape(String),
    #[error("invalid percent-encoding: {0}")]
    Percent(String),
}

/// MD5 digest of the input, as lowercase hex
pub fn md5_hex(input: &str) -> String {
    format!("{:x}", md5::compute(input.as_bytes()))
}

/// SHA-1 digest of the input, as lowercase hex
pub fn sha1_hex(input: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Standard base64 encoding of the input bytes
pub fn base64_encode(input: &str) -> String {
    STANDARD.encode(input.as_bytes())
}

/// Standard base64 decoding; fails on a non-alphabet payload
pub fn base64_decode(input: &str) -> Result<Vec<u8>, CodecError> {
    Ok(STANDARD.decode(input)?)
}

/// Percent-encode the input as a single query component
pub fn url_encode(input: &str) -> String {
    urlencoding::encode(input).into_owned()
}

/// Percent-decode the input
///
/// Fails on a malformed percent-escape (a `%` not followed by two hex
/// digits) or when the decoded bytes are not UTF-8.
pub fn url_decode(input: &str) -> Result<String, CodecError> {
    validate_percent_escapes(input)?;
    Ok(urlencoding::decode(input)?.into_owned())
}

// The decoding crate passes malformed escapes through unchanged, so a
// pre-scan enforces the "report decode errors" contract.
fn validate_percent_escapes(input: &str) -> Result<(), CodecError> {
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if i + 2 >= bytes.len() {
                return Err(CodecError::Percent(format!(
                    "truncated escape \"{}\"",
                    String::from_utf8_lossy(&bytes[i..])
                )));
            }
            if !bytes[i + 1].is_ascii_hexdigit() || !bytes[i + 2].is_ascii_hexdigit() {
                return Err(CodecError::Percent(format!(
                    "malformed escape \"{}\"",
                    String::from_utf8_lossy(&bytes[i..i + 3])
                )));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}

/// Escape every code point of the input as `\uXXXX` units
///
/// Units are UTF-16, so code points above the BMP come out as a surrogate
/// pair of two 4-digit units. Lowercase hex, zero-padded, no separators.
pub fn unicode_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len() * 6);
    for unit in input.encode_utf16() {
        out.push_str(&format!("\\u{unit:04x}"));
    }
    out
}

/// Recover text from backslash-escape sequences
///
/// Mirrors the quoted-string convention: the argument is wrapped in double
/// quotes when it does not already contain one, then unquoted. Supports
/// `\uXXXX` (including surrogate pairs) and the common single-character
/// escapes.
pub fn unicode_decode(input: &str) -> Result<String, CodecError> {
    if input.contains('"') {
        unquote(input)
    } else {
        unquote(&format!("\"{input}\""))
    }
}

fn unquote(quoted: &str) -> Result<String, CodecError> {
    let inner = quoted
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(|| CodecError::Escape("missing enclosing quotes".to_string()))?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    // high surrogate waiting for its low half
    let mut pending: Option<u16> = None;

    while let Some(c) = chars.next() {
        if c != '\\' {
            if pending.is_some() {
                return Err(CodecError::Escape("unpaired surrogate".to_string()));
            }
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('u') => {
                let unit = read_utf16_unit(&mut chars)?;
                match (pending.take(), unit) {
                    (None, 0xd800..=0xdbff) => pending = Some(unit),
                    (None, 0xdc00..=0xdfff) => {
                        return Err(CodecError::Escape(format!("lone low surrogate \\u{unit:04x}")))
                    }
                    (None, _) => match char::from_u32(unit as u32) {
                        Some(decoded) => out.push(decoded),
                        None => {
                            return Err(CodecError::Escape(format!("invalid code point \\u{unit:04x}")))
                        }
                    },
                    (Some(high), 0xdc00..=0xdfff) => {
                        let combined =
                            0x10000 + (((high as u32) - 0xd800) << 10) + ((unit as u32) - 0xdc00);
                        match char::from_u32(combined) {
                            Some(decoded) => out.push(decoded),
                            None => {
                                return Err(CodecError::Escape(format!(
                                    "invalid surrogate pair \\u{high:04x}\\u{unit:04x}"
                                )))
                            }
                        }
                    }
                    (Some(high), _) => {
                        return Err(CodecError::Escape(format!("unpaired surrogate \\u{high:04x}")))
                    }
                }
            }
            Some(simple) => {
                if pending.is_some() {
                    return Err(CodecError::Escape("unpaired surrogate".to_string()));
                }
                match simple {
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    'r' => out.push('\r'),
                    '0' => out.push('\0'),
                    '\\' | '"' | '\'' | '/' => out.push(simple),
                    other => {
                        return Err(CodecError::Escape(format!("unknown escape \\{other}")))
                    }
                }
            }
            None => return Err(CodecError::Escape("trailing backslash".to_string())),
        }
    }

    if let Some(high) = pending {
        return Err(CodecError::Escape(format!("unpaired surrogate \\u{high:04x}")));
    }
    Ok(out)
}

fn read_utf16_unit(chars: &mut std::str::Chars<'_>) -> Result<u16, CodecError> {
    let mut unit = 0u16;
    for _ in 0..4 {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or_else(|| CodecError::Escape("truncated \\u escape".to_string()))?;
        unit = (unit << 4) | digit as u16;
    }
    Ok(unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_md5_hello() {
        assert_eq!(md5_hex("hello"), "5d41402abc4b2a76b9719d911017c592");
    }

    #[test]
    fn test_sha1_hello() {
        assert_eq!(sha1_hex("hello"), "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d");
    }

    #[test]
    fn test_base64_roundtrip() {
        let encoded = base64_encode("hi there");
        assert_eq!(encoded, "aGkgdGhlcmU=");
        assert_eq!(base64_decode(&encoded).unwrap(), b"hi there");
    }

    #[test]
    fn test_base64_decode_rejects_garbage() {
        assert!(base64_decode("not valid base64!!!").is_err());
    }

    #[test]
    fn test_url_roundtrip() {
        let original = "a b&c=d 中文";
        let encoded = url_encode(original);
        assert!(!encoded.contains(' '));
        assert!(!encoded.contains('&'));
        assert_eq!(url_decode(&encoded).unwrap(), original);
    }

    #[test]
    fn test_url_decode_malformed_escape_errors() {
        assert!(url_decode("%zz").is_err());
        assert!(url_decode("abc%2").is_err());
        assert!(url_decode("100%").is_err());
        assert!(url_decode("%e4%b8").is_err()); // truncated UTF-8 sequence
    }

    #[test]
    fn test_unicode_encode_bmp() {
        assert_eq!(unicode_encode("A"), "\\u0041");
        assert_eq!(unicode_encode("中文"), "\\u4e2d\\u6587");
    }

    #[test]
    fn test_unicode_encode_astral_is_surrogate_pair() {
        assert_eq!(unicode_encode("😀"), "\\ud83d\\ude00");
    }

    #[test]
    fn test_unicode_roundtrip() {
        for original in ["hello world", "中文测试", "mixed 混合 😀", "\"quoted\""] {
            let encoded = unicode_encode(original);
            assert_eq!(unicode_decode(&encoded).unwrap(), original);
        }
    }

    #[test]
    fn test_unicode_decode_plain_text_passes_through() {
        assert_eq!(unicode_decode("no escapes here").unwrap(), "no escapes here");
    }

    #[test]
    fn test_unicode_decode_quoted_input() {
        assert_eq!(unicode_decode("\"\\u4e2d\"").unwrap(), "中");
    }

    #[test]
    fn test_unicode_decode_malformed() {
        assert!(unicode_decode("\\u12").is_err());
        assert!(unicode_decode("\\uzzzz").is_err());
        assert!(unicode_decode("\\ud83d").is_err());
        assert!(unicode_decode("\\ude00").is_err());
        assert!(unicode_decode("trailing\\").is_err());
    }
}
