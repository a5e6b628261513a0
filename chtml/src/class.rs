// Copyright 2024 Bryant Luk
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Character classes.
//!
//! Every byte of the input maps to exactly one [`Class`]. The mapping does not
//! depend on the position of the byte or on any parser state.

use core::fmt;

use crate::ParseOptions;

/// The lexical class of a byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Class {
    /// A space, tab, carriage return, or line feed.
    Whitespace,
    /// `<`
    OpenBracket,
    /// `>`
    CloseBracket,
    /// `=`
    Equals,
    /// `'`
    Apostrophe,
    /// `"`
    Quote,
    /// The end of the input.
    Terminator,
    /// Any other byte, including `/`.
    Text,
}

impl Class {
    /// If consecutive bytes of this class are grouped into a single span.
    #[inline]
    #[must_use]
    pub const fn coalesces(self) -> bool {
        matches!(self, Class::Whitespace | Class::Text)
    }

    /// If the class opens and closes a quoted attribute value.
    #[inline]
    #[must_use]
    pub const fn is_delimiter(self) -> bool {
        matches!(self, Class::Apostrophe | Class::Quote)
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Class::Whitespace => "whitespace",
            Class::OpenBracket => "`<`",
            Class::CloseBracket => "`>`",
            Class::Equals => "`=`",
            Class::Apostrophe => "`'`",
            Class::Quote => "`\"`",
            Class::Terminator => "end of input",
            Class::Text => "text",
        };
        f.write_str(s)
    }
}

/// Classifies a single byte.
///
/// A byte never classifies as [`Class::Terminator`]; the end of input is a
/// property of the position, see [`classify_at()`].
///
/// ```
/// use chtml::class::{classify, Class};
///
/// assert_eq!(Class::OpenBracket, classify(b'<'));
/// assert_eq!(Class::Text, classify(b'/'));
/// assert_eq!(Class::Whitespace, classify(b'\t'));
/// ```
#[inline]
#[must_use]
pub const fn classify(byte: u8) -> Class {
    match byte {
        b' ' | b'\t' | b'\r' | b'\n' => Class::Whitespace,
        b'<' => Class::OpenBracket,
        b'>' => Class::CloseBracket,
        b'=' => Class::Equals,
        b'\'' => Class::Apostrophe,
        b'"' => Class::Quote,
        _ => Class::Text,
    }
}

/// Classifies the byte at `pos`.
///
/// Positions at or past the end of `input` are [`Class::Terminator`]. If the
/// options treat the input as NUL terminated, a NUL byte is also a
/// terminator.
#[inline]
#[must_use]
pub const fn classify_at(input: &[u8], pos: usize, opts: ParseOptions) -> Class {
    if pos >= input.len() {
        return Class::Terminator;
    }

    let byte = input[pos];
    if byte == 0 && opts.is_nul_terminated() {
        return Class::Terminator;
    }

    classify(byte)
}
