//! Placeholder tokenizer.
//!
//! Splits a template into literal spans and placeholders. A placeholder has
//! the shape `%{name}` or `%{name|specifiers}` where the name is one or more
//! of `[A-Za-z0-9_.-]` and the specifiers are zero or more of
//! `[A-Za-z0-9-]`. Any `%{` that does not complete that shape is left in the
//! surrounding literal text.
//!
//! Backslashes directly in front of a placeholder are not part of either
//! neighbouring segment; they are counted into
//! [`Placeholder::backslashes`] so the renderer can halve them and decide
//! whether the placeholder is escaped.
//!
//! ## Examples
//!
//! ```
//! use biscuit_interpolate::syntax::{tokenize, Segment};
//!
//! let segments = tokenize(r"Hi \\%{name|u}!");
//! assert_eq!(segments.len(), 3);
//! assert_eq!(segments[0], Segment::Literal("Hi "));
//!
//! let Segment::Placeholder(placeholder) = &segments[1] else { panic!() };
//! assert_eq!(placeholder.backslashes, 2);
//! assert_eq!(placeholder.name, "name");
//! assert_eq!(placeholder.specifiers, "u");
//! assert!(!placeholder.is_escaped());
//! ```

/// The sequence that opens a placeholder.
pub const OPEN: &str = "%{";

/// A piece of a tokenized template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text copied to the output unchanged.
    Literal(&'a str),
    /// A placeholder together with the backslashes that precede it.
    Placeholder(Placeholder<'a>),
}

/// A recognised `%{...}` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// Number of consecutive backslashes immediately before `%{`.
    pub backslashes: usize,
    /// The fixture name between `%{` and `|` or `}`.
    pub name: &'a str,
    /// Filter specifiers after `|`; empty when there are none.
    pub specifiers: &'a str,
    /// The full `%{...}` text, without the leading backslashes.
    pub source: &'a str,
}

impl Placeholder<'_> {
    /// An odd run of backslashes escapes the placeholder.
    pub fn is_escaped(&self) -> bool {
        self.backslashes % 2 == 1
    }
}

/// Splits `template` into literal and placeholder segments, left to right.
///
/// Matching is non-overlapping. When a `%{` fails to form a placeholder the
/// scan resumes one byte later, so in `%{%{0}}` only the inner `%{0}` is a
/// placeholder.
pub fn tokenize(template: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut cursor = 0;

    while let Some(offset) = template[cursor..].find(OPEN) {
        let open = cursor + offset;

        let Some((name, specifiers, len)) = scan_placeholder(&template[open..]) else {
            // '%' is a single byte so `open + 1` stays on a char boundary
            cursor = open + 1;
            continue;
        };

        let backslashes = template[literal_start..open]
            .bytes()
            .rev()
            .take_while(|b| *b == b'\\')
            .count();
        let literal_end = open - backslashes;
        if literal_end > literal_start {
            segments.push(Segment::Literal(&template[literal_start..literal_end]));
        }

        let end = open + len;
        segments.push(Segment::Placeholder(Placeholder {
            backslashes,
            name,
            specifiers,
            source: &template[open..end],
        }));

        literal_start = end;
        cursor = end;
    }

    if literal_start < template.len() {
        segments.push(Segment::Literal(&template[literal_start..]));
    }

    segments
}

/// Returns true for bytes allowed in a fixture name.
pub fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'-')
}

/// Returns true for bytes allowed in a placeholder's specifier list.
pub fn is_specifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-'
}

/// Matches a placeholder at the start of `input`.
///
/// Returns the name, the specifiers and the byte length of the whole token.
fn scan_placeholder(input: &str) -> Option<(&str, &str, usize)> {
    let body = input.strip_prefix(OPEN)?;

    let name_len = body.bytes().take_while(|b| is_name_byte(*b)).count();
    if name_len == 0 {
        return None;
    }
    let (name, rest) = body.split_at(name_len);

    let (specifiers, rest) = match rest.strip_prefix('|') {
        Some(after) => {
            let count = after.bytes().take_while(|b| is_specifier_byte(*b)).count();
            after.split_at(count)
        }
        None => ("", rest),
    };

    if !rest.starts_with('}') {
        return None;
    }

    Some((name, specifiers, input.len() - rest.len() + 1))
}
