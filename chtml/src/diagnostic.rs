// Copyright 2024 Bryant Luk
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Diagnostics for malformed input.
//!
//! Parsing never fails. When a construct cannot be scanned, the parser
//! abandons it and continues at the top level. A [`Visitor`][crate::Visitor]
//! may observe each abandonment through
//! [`Visitor::malformed()`][crate::Visitor::malformed()].

use core::fmt;

use crate::{class::Class, event::Span};

/// Why a construct was abandoned.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum DiagnosticKind {
    /// A `<` was not followed by a tag name (e.g. `<>` or `< p>`).
    MissingTagName,
    /// A tag name was a lone `/` (e.g. `</ p>`).
    DetachedClosingSlash,
    /// An attribute name was expected but the given class was found.
    UnexpectedInTag(Class),
    /// An attribute name was followed by something other than whitespace,
    /// `=`, or `>`.
    UnexpectedAfterAttributeName(Class),
    /// An `=` was not followed by a quoted or bare value.
    MissingAttributeValue(Class),
    /// A quoted attribute value contained a `<` or `>`.
    BracketInQuotedValue,
    /// The input ended inside a quoted attribute value.
    UnterminatedQuotedValue,
    /// The input ended inside a tag.
    UnterminatedTag,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::MissingTagName => write!(f, "missing tag name after `<`"),
            DiagnosticKind::DetachedClosingSlash => {
                write!(f, "closing slash is separated from the tag name")
            }
            DiagnosticKind::UnexpectedInTag(class) => {
                write!(f, "expected attribute name or `>` but found {class}")
            }
            DiagnosticKind::UnexpectedAfterAttributeName(class) => {
                write!(f, "unexpected {class} after attribute name")
            }
            DiagnosticKind::MissingAttributeValue(class) => {
                write!(f, "expected attribute value after `=` but found {class}")
            }
            DiagnosticKind::BracketInQuotedValue => {
                write!(f, "bracket inside quoted attribute value")
            }
            DiagnosticKind::UnterminatedQuotedValue => {
                write!(f, "unterminated quoted attribute value")
            }
            DiagnosticKind::UnterminatedTag => write!(f, "unterminated tag"),
        }
    }
}

/// A malformed construct which was abandoned.
///
/// The span starts at the `<` of the abandoned tag and ends where scanning
/// of the tag stopped. The bytes are still reported to the visitor as part of
/// an `Other` event.
///
/// ```
/// use chtml::diagnostic::DiagnosticKind;
///
/// let events = chtml::collect(br#"<a href="x"#);
/// let diagnostic = events.diagnostics()[0];
/// assert_eq!(DiagnosticKind::UnterminatedQuotedValue, diagnostic.kind());
/// assert_eq!(0, diagnostic.span().offset());
/// assert_eq!(10, diagnostic.span().len());
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Diagnostic {
    kind: DiagnosticKind,
    span: Span,
}

impl Diagnostic {
    /// Instantiates a new diagnostic.
    #[inline]
    #[must_use]
    pub const fn new(kind: DiagnosticKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Why the construct was abandoned.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    /// The abandoned bytes.
    #[inline]
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at bytes {}..{}",
            self.kind,
            self.span.offset(),
            self.span.end()
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Diagnostic {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}
