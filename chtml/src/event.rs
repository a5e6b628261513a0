// Copyright 2024 Bryant Luk
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Events are views of byte sub-slices from the input buffer.
//!
//! [`Event`] is the main type. It identifies a sub-slice of the input with a
//! [`Kind`] and carries the parse context at the time it was emitted: the
//! current tag name and, for attributes, the attribute name and value.
//!
//! Events borrow the input. If an event must outlive the input, convert it
//! with [`Event::to_owned_event()`] (requires the `alloc` or `std` feature).

#[cfg(any(feature = "std", feature = "alloc"))]
pub mod owned;

use core::{fmt, ops::Range, str};

/// An offset and length into the input buffer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    offset: usize,
    len: usize,
}

impl Span {
    /// Instantiates a new span.
    #[inline]
    #[must_use]
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// The index of the first byte.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// The number of bytes.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// If the span covers no bytes.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The index after the last byte.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }

    /// The span as a range of indexes.
    #[inline]
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }

    /// The bytes of `input` covered by the span.
    ///
    /// # Panics
    ///
    /// Panics if the span is out of bounds for `input`.
    #[inline]
    #[must_use]
    pub fn slice<'a>(&self, input: &'a [u8]) -> &'a [u8] {
        &input[self.range()]
    }
}

/// The type of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    /// Bytes outside of a tag such as text content and whitespace.
    ///
    /// Bytes of malformed constructs which were abandoned are also reported as
    /// `Other`.
    Other,
    /// A `<` followed by the tag name.
    TagEnter,
    /// The `>` which ends the current tag.
    ///
    /// The span also includes whitespace and a self-closing `/` which
    /// preceded the `>`.
    TagExit,
    /// An attribute name with an optional value.
    ///
    /// The span includes the whitespace before the name, the `=`, and any
    /// quotes around the value.
    Attribute,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Kind::Other => "Other",
            Kind::TagEnter => "TagEnter",
            Kind::TagExit => "TagExit",
            Kind::Attribute => "Attribute",
        };
        f.pad(s)
    }
}

/// The parse context of an event.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Context {
    pub(crate) tag: Option<Span>,
    pub(crate) attribute: Option<Span>,
    pub(crate) value: Option<Span>,
}

/// A structural event.
///
/// The event is an immutable value. All of the returned byte slices borrow
/// the input buffer and are valid for as long as the input is.
///
/// ```
/// use chtml::event::Kind;
///
/// let events = chtml::collect(br#"<a href="/x">go</a>"#);
/// let attr = events.events()[1];
/// assert_eq!(Kind::Attribute, attr.kind());
/// assert_eq!(Some(&b"a"[..]), attr.tag());
/// assert_eq!(Some(&b"href"[..]), attr.attribute_name());
/// assert_eq!(Some(&b"/x"[..]), attr.attribute_value());
/// assert_eq!(br#" href="/x""#, attr.as_bytes());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Event<'a> {
    kind: Kind,
    input: &'a [u8],
    span: Span,
    cx: Context,
}

impl<'a> Event<'a> {
    #[inline]
    #[must_use]
    pub(crate) const fn new(kind: Kind, input: &'a [u8], span: Span, cx: Context) -> Self {
        Self {
            kind,
            input,
            span,
            cx,
        }
    }

    /// The type of event.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> Kind {
        self.kind
    }

    /// The location of the event's bytes in the input.
    #[inline]
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// The index of the event's first byte in the input.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.span.offset
    }

    /// All of the bytes covered by the event.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.span.slice(self.input)
    }

    /// The event's bytes as a str.
    ///
    /// # Errors
    ///
    /// If the bytes are not a UTF-8 string.
    #[inline]
    pub fn to_str(&self) -> Result<&'a str, str::Utf8Error> {
        str::from_utf8(self.as_bytes())
    }

    /// The name of the current tag.
    ///
    /// Closing tags keep their leading `/` (e.g. `/p` for `</p>`). `None` for
    /// [`Kind::Other`] events.
    #[inline]
    #[must_use]
    pub fn tag(&self) -> Option<&'a [u8]> {
        self.cx.tag.map(|span| span.slice(self.input))
    }

    /// The location of the current tag name.
    #[inline]
    #[must_use]
    pub const fn tag_span(&self) -> Option<Span> {
        self.cx.tag
    }

    /// The attribute name for [`Kind::Attribute`] events.
    #[inline]
    #[must_use]
    pub fn attribute_name(&self) -> Option<&'a [u8]> {
        self.cx.attribute.map(|span| span.slice(self.input))
    }

    /// The location of the attribute name.
    #[inline]
    #[must_use]
    pub const fn attribute_name_span(&self) -> Option<Span> {
        self.cx.attribute
    }

    /// The attribute value without surrounding quotes.
    ///
    /// `None` if the attribute has no value (e.g. `disabled` in
    /// `<input disabled>`). An empty quoted value (`a=""`) is `Some` and empty.
    #[inline]
    #[must_use]
    pub fn attribute_value(&self) -> Option<&'a [u8]> {
        self.cx.value.map(|span| span.slice(self.input))
    }

    /// The location of the attribute value.
    #[inline]
    #[must_use]
    pub const fn attribute_value_span(&self) -> Option<Span> {
        self.cx.value
    }

    /// If the current tag name starts with `/`.
    #[inline]
    #[must_use]
    pub fn is_closing_tag(&self) -> bool {
        matches!(self.tag(), Some([b'/', ..]))
    }

    /// If the event is a [`Kind::TagExit`] for a tag which ended with `/>`.
    ///
    /// The `/` must directly precede the `>`. `<br / >` is not self-closing.
    #[inline]
    #[must_use]
    pub fn is_self_closing(&self) -> bool {
        self.kind == Kind::TagExit && self.as_bytes().ends_with(b"/>")
    }
}

struct Escaped<'a>(&'a [u8]);

impl fmt::Debug for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        for b in self.0 {
            for c in core::ascii::escape_default(*b) {
                fmt::Write::write_char(f, char::from(c))?;
            }
        }
        f.write_str("\"")
    }
}

impl fmt::Debug for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Event");
        s.field("kind", &self.kind)
            .field("span", &self.span)
            .field("bytes", &Escaped(self.as_bytes()));
        if let Some(tag) = self.tag() {
            s.field("tag", &Escaped(tag));
        }
        if let Some(name) = self.attribute_name() {
            s.field("attribute_name", &Escaped(name));
            s.field("attribute_value", &self.attribute_value().map(Escaped));
        }
        s.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_bounds() {
        let span = Span::new(2, 3);
        assert_eq!(5, span.end());
        assert_eq!(2..5, span.range());
        assert!(!span.is_empty());
        assert!(Span::new(7, 0).is_empty());
        assert_eq!(b"cde", span.slice(b"abcdefg"));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn span_past_input_panics() {
        let _ = Span::new(2, 3).slice(b"abc");
    }

    #[test]
    fn closing_and_self_closing() {
        let input = b"</p/>";
        let cx = Context {
            tag: Some(Span::new(1, 2)),
            ..Context::default()
        };
        let enter = Event::new(Kind::TagEnter, input, Span::new(0, 3), cx);
        assert!(enter.is_closing_tag());
        assert!(!enter.is_self_closing());

        let exit = Event::new(Kind::TagExit, input, Span::new(3, 2), cx);
        assert!(exit.is_self_closing());

        let input = b"<a / >";
        let exit = Event::new(Kind::TagExit, input, Span::new(2, 4), cx);
        assert!(!exit.is_self_closing());

        let other = Event::new(Kind::Other, input, Span::new(0, 5), Context::default());
        assert!(!other.is_closing_tag());
        assert_eq!(None, other.tag());
    }

    #[test]
    fn debug_escapes_bytes() {
        let input = b"a\"\n";
        let event = Event::new(Kind::Other, input, Span::new(0, 3), Context::default());
        #[cfg(feature = "std")]
        assert_eq!(
            r#"Event { kind: Other, span: Span { offset: 0, len: 3 }, bytes: "a\"\n" }"#,
            std::format!("{event:?}")
        );
        #[cfg(not(feature = "std"))]
        let _ = event;
    }
}
