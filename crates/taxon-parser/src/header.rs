//! Table header discovery over the raw source text.
//!
//! The parsed TOML tree does not remember the order or spelling of its table
//! headers, so they are recovered by scanning the text for the pattern
//! `[ path ]` (a bracketed run of word characters and dots, with optional
//! surrounding whitespace). Every non-overlapping match is reported in source
//! order.
//!
//! The scan is deliberately loose: it also matches inside values (for
//! example `x = [1]` reports a header `1`). Such paths never resolve to a
//! table and are dropped by the table index.

use std::ops::Range;

use winnow::{
    Parser as _,
    combinator::{alt, delimited, repeat},
    error::{ContextError, ModalResult},
    stream::LocatingSlice,
    token::{any, take_while},
};

use taxon_core::span::Span;

type Input<'a> = LocatingSlice<&'a str>;

/// A table header found in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    path: String,
    span: Span,
}

impl Header {
    /// The dotted path between the brackets, without surrounding whitespace.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Span of the whole header, brackets included.
    pub fn span(&self) -> Span {
        self.span
    }
}

fn is_path_char(c: char) -> bool {
    c == '.' || c == '_' || c.is_alphanumeric()
}

/// Parse one `[ path ]` header at the current position.
fn header(input: &mut Input<'_>) -> ModalResult<Header, ContextError> {
    delimited(
        ('[', take_while(0.., char::is_whitespace)),
        take_while(1.., is_path_char),
        (take_while(0.., char::is_whitespace), ']'),
    )
    .with_span()
    .map(|(path, range): (&str, Range<usize>)| Header {
        path: path.to_string(),
        span: Span::new(range),
    })
    .parse_next(input)
}

/// Scan `source` for table headers in source order.
///
/// # Examples
///
/// ```
/// use taxon_parser::header::scan;
///
/// let headers = scan("[A]\ntag = 1\n[  A.B.C ]\n");
/// let paths: Vec<_> = headers.iter().map(|h| h.path()).collect();
/// assert_eq!(paths, ["A", "A.B.C"]);
/// ```
pub fn scan(source: &str) -> Vec<Header> {
    let mut input = LocatingSlice::new(source);
    repeat(0.., alt((header.map(Some), any.value(None))))
        .fold(Vec::new, |mut headers, found| {
            headers.extend(found);
            headers
        })
        .parse_next(&mut input)
        .unwrap_or_default()
}
