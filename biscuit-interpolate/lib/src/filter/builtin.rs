//! The default filter table.
//!
//! Every entry in [`BUILTIN_FILTERS`] is keyed by a single letter. Case is
//! significant: lower/upper pairs such as `u`/`U` select the Unicode-aware
//! and ASCII-only variants of the same transform.
//!
//! | Spec | Filter |
//! |------|--------|
//! | `a` | ASCII letters only |
//! | `b` / `B` | base64 (standard, padded) / base64 (URL-safe, unpadded) |
//! | `c` / `C` | CRC-32 (BZIP2, little-endian hex) / CRC-32b (zlib), 8 hex digits |
//! | `d` | ASCII digits only |
//! | `e` | POSIX shell argument |
//! | `f` | RFC 3986 percent-encoding, `/` kept |
//! | `h` / `H` | HTML special characters / all named entities |
//! | `j` | JSON string literal |
//! | `l` / `L` | lower-case (Unicode / ASCII) |
//! | `m` | MD5 hex digest |
//! | `p` | PCRE metacharacters escaped |
//! | `r` / `R` | RFC 3986 percent-encoding / form encoding |
//! | `s` / `S` | SHA-1 / SHA-256 hex digest |
//! | `t` | trimmed |
//! | `u` / `U` | upper-case (Unicode / ASCII) |
//! | `w` / `W` | whitespace runs collapsed / whitespace removed |

use std::sync::LazyLock;

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use crc::{CRC_32_BZIP2, CRC_32_ISO_HDLC, Crc};
use md5::Md5;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;
use sha1::Sha1;
use sha2::{Digest, Sha256};

use super::entities::entity_name;

/// A default filter and its documentation.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinFilter {
    pub specifier: char,
    pub description: &'static str,
    pub apply: fn(&str) -> String,
}

/// The default specifier table, in specifier order.
pub const BUILTIN_FILTERS: &[BuiltinFilter] = &[
    builtin('B', "Base64-encode (URL-safe alphabet, no padding)", base64_url),
    builtin('C', "Hash with CRC-32b (zlib), hex", crc32b),
    builtin('H', "HTML-escape using all named entities", html_entities),
    builtin('L', "Lower-case (ASCII only)", lower_ascii),
    builtin('R', "URL-encode (form encoding, space as '+')", url_encode_form),
    builtin('S', "Hash with SHA-256, hex", sha256),
    builtin('U', "Upper-case (ASCII only)", upper_ascii),
    builtin('W', "Remove all whitespace", strip_whitespace),
    builtin('a', "Extract letters", letters),
    builtin('b', "Base64-encode", base64),
    builtin('c', "Hash with CRC-32 (BZIP2), hex", crc32),
    builtin('d', "Extract digits", digits),
    builtin('e', "Escape as a shell argument", shell_arg),
    builtin('f', "URL-encode (RFC 3986), preserving '/'", url_encode_path),
    builtin('h', "HTML-escape special characters", html_special),
    builtin('j', "Encode as a JSON string", json),
    builtin('l', "Lower-case", lower),
    builtin('m', "Hash with MD5, hex", md5),
    builtin('p', "Escape regular-expression metacharacters", regex_quote),
    builtin('r', "URL-encode (RFC 3986)", url_encode),
    builtin('s', "Hash with SHA-1, hex", sha1),
    builtin('t', "Trim leading and trailing whitespace", trim),
    builtin('u', "Upper-case", upper),
    builtin('w', "Collapse whitespace runs to one space", collapse_whitespace),
];

const fn builtin(
    specifier: char,
    description: &'static str,
    apply: fn(&str) -> String,
) -> BuiltinFilter {
    BuiltinFilter {
        specifier,
        description,
        apply,
    }
}

// Unreserved characters per RFC 3986 section 2.3.
const RFC3986: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const RFC3986_PATH: &AsciiSet = &RFC3986.remove(b'/');

const FORM: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_');

const CRC32_BZIP2: Crc<u32> = Crc::<u32>::new(&CRC_32_BZIP2);
const CRC32_ISO_HDLC: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

pub fn letters(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_alphabetic()).collect()
}

pub fn digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn base64(input: &str) -> String {
    STANDARD.encode(input)
}

pub fn base64_url(input: &str) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// CRC-32 over the BZIP2 polynomial, written least-significant byte first.
pub fn crc32(input: &str) -> String {
    format!("{:08x}", CRC32_BZIP2.checksum(input.as_bytes()).swap_bytes())
}

pub fn crc32b(input: &str) -> String {
    format!("{:08x}", CRC32_ISO_HDLC.checksum(input.as_bytes()))
}

/// Wraps the input in single quotes so a POSIX shell reads it as one word.
pub fn shell_arg(input: &str) -> String {
    format!("'{}'", input.replace('\'', r"'\''"))
}

pub fn url_encode_path(input: &str) -> String {
    utf8_percent_encode(input, RFC3986_PATH).to_string()
}

pub fn url_encode(input: &str) -> String {
    utf8_percent_encode(input, RFC3986).to_string()
}

/// Form encoding: spaces become `+`, everything but `A-Za-z0-9-._` is
/// percent-encoded.
pub fn url_encode_form(input: &str) -> String {
    input
        .split(' ')
        .map(|part| utf8_percent_encode(part, FORM).to_string())
        .collect::<Vec<_>>()
        .join("+")
}

/// Escapes `& < > "` and writes `'` as `&#039;`.
pub fn html_special(input: &str) -> String {
    html_escape::encode_double_quoted_attribute(input).replace('\'', "&#039;")
}

/// Escapes the HTML special characters and replaces every character that has
/// an HTML 4.01 named entity with that entity.
pub fn html_entities(input: &str) -> String {
    let escaped = html_special(input);
    let mut output = String::with_capacity(escaped.len());

    for ch in escaped.chars() {
        // '&' is already the start of an entity from the first pass
        match entity_name(ch) {
            Some(name) if ch != '&' => {
                output.push('&');
                output.push_str(name);
                output.push(';');
            }
            _ => output.push(ch),
        }
    }

    output
}

pub fn json(input: &str) -> String {
    serde_json::Value::String(input.to_string()).to_string()
}

pub fn lower(input: &str) -> String {
    input.to_lowercase()
}

pub fn lower_ascii(input: &str) -> String {
    input.to_ascii_lowercase()
}

pub fn upper(input: &str) -> String {
    input.to_uppercase()
}

pub fn upper_ascii(input: &str) -> String {
    input.to_ascii_uppercase()
}

pub fn md5(input: &str) -> String {
    format!("{:x}", Md5::digest(input.as_bytes()))
}

pub fn sha1(input: &str) -> String {
    format!("{:x}", Sha1::digest(input.as_bytes()))
}

pub fn sha256(input: &str) -> String {
    format!("{:x}", Sha256::digest(input.as_bytes()))
}

/// Backslash-escapes the PCRE metacharacters
/// `. \ + * ? [ ^ ] $ ( ) { } = ! < > | : - #` and writes NUL as `\000`.
pub fn regex_quote(input: &str) -> String {
    static META: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"[.\\+*?\[^\]$(){}=!<>|:\-#]").expect("Invalid regex")
    });

    META.replace_all(input, r"\$0").replace('\0', r"\000")
}

pub fn trim(input: &str) -> String {
    input.trim().to_string()
}

/// Replaces each run of whitespace with a single space. Leading and trailing
/// runs are collapsed, not removed.
pub fn collapse_whitespace(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut in_run = false;

    for ch in input.chars() {
        if ch.is_whitespace() {
            if !in_run {
                output.push(' ');
            }
            in_run = true;
        } else {
            output.push(ch);
            in_run = false;
        }
    }

    output
}

pub fn strip_whitespace(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_unique_alphabetic_specifiers() {
        let mut specifiers: Vec<char> = BUILTIN_FILTERS.iter().map(|f| f.specifier).collect();
        assert!(specifiers.iter().all(char::is_ascii_alphabetic));
        let count = specifiers.len();
        specifiers.sort_unstable();
        specifiers.dedup();
        assert_eq!(specifiers.len(), count);
        assert_eq!(count, 24);
    }

    #[test]
    fn test_extraction() {
        assert_eq!(letters("a1-b2 C3_\u{e9}"), "abC");
        assert_eq!(digits("a1-b2 C3_\u{665}"), "123");
    }

    #[test]
    fn test_base64_variants() {
        assert_eq!(base64("dana"), "ZGFuYQ==");
        assert_eq!(base64("?>?"), "Pz4/");
        assert_eq!(base64_url("?>?"), "Pz4_");
        assert_eq!(base64_url("dana"), "ZGFuYQ");
    }

    #[test]
    fn test_crc_variants() {
        assert_eq!(crc32("123456789"), "181989fc");
        assert_eq!(crc32("abc"), "73bb8c64");
        assert_eq!(crc32b("123456789"), "cbf43926");
        assert_eq!(crc32b("abc"), "352441c2");
        assert_eq!(crc32(""), "00000000");
    }

    #[test]
    fn test_digests() {
        assert_eq!(md5(""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(md5("abc"), "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(sha1("abc"), "a9993e364706816aba3e25717850c26c9cd0d89d");
        assert_eq!(
            sha256("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_shell_arg() {
        assert_eq!(shell_arg("plain"), "'plain'");
        assert_eq!(shell_arg("it's"), r"'it'\''s'");
        assert_eq!(shell_arg(""), "''");
    }

    #[test]
    fn test_url_encodings() {
        assert_eq!(url_encode("a b/c~"), "a%20b%2Fc~");
        assert_eq!(url_encode_path("a b/c~"), "a%20b/c~");
        assert_eq!(url_encode_form("a b/c~*"), "a+b%2Fc%7E%2A");
        assert_eq!(url_encode("\u{e9}"), "%C3%A9");
    }

    #[test]
    fn test_html_special() {
        assert_eq!(
            html_special(r#"<a href="x">&"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;"
        );
        assert_eq!(html_special("it's"), "it&#039;s");
        assert_eq!(html_special("caf\u{e9}"), "caf\u{e9}");
    }

    #[test]
    fn test_html_entities() {
        assert_eq!(html_entities("caf\u{e9} & <b>"), "caf&eacute; &amp; &lt;b&gt;");
        assert_eq!(html_entities("5\u{20ac} \u{a9}"), "5&euro; &copy;");
        assert_eq!(html_entities("\"q\""), "&quot;q&quot;");
        assert_eq!(html_entities("'\u{e9}'"), "&#039;&eacute;&#039;");
    }

    #[test]
    fn test_json() {
        assert_eq!(json("dana"), "\"dana\"");
        assert_eq!(json("a\"b\\c\n"), r#""a\"b\\c\n""#);
    }

    #[test]
    fn test_case_variants() {
        assert_eq!(upper("stra\u{df}e"), "STRASSE");
        assert_eq!(upper_ascii("stra\u{df}e"), "STRA\u{df}E");
        assert_eq!(lower("\u{c9}COLE"), "\u{e9}cole");
        assert_eq!(lower_ascii("\u{c9}COLE"), "\u{c9}cole");
    }

    #[test]
    fn test_regex_quote() {
        assert_eq!(regex_quote("a.b*c"), r"a\.b\*c");
        assert_eq!(regex_quote("(x)"), r"\(x\)");
        assert_eq!(regex_quote("a=b<c>:d&e~f"), r"a\=b\<c\>\:d&e~f");
        assert_eq!(regex_quote("#a-b/c"), r"\#a\-b/c");
        assert_eq!(regex_quote("a\0b"), r"a\000b");
    }

    #[test]
    fn test_whitespace() {
        assert_eq!(trim("  a b \n"), "a b");
        assert_eq!(collapse_whitespace("  a \t\n b  "), " a b ");
        assert_eq!(strip_whitespace(" a \t b\n"), "ab");
    }
}
