//! `chtml` is a library to scan permissive [HTML][html]-like markup into a
//! stream of structural events. In effect, the library provides a
//! non-validating tokenizer which never builds a tree.
//!
//! # Usage
//!
//! The library user creates a [`Parser`] from a slice of bytes. The slice of
//! bytes is usually from a buffer managed by the library user. For instance,
//! it could be a buffer of data read from a file, a memory mapped file, or
//! just a [`Vec`] of bytes.
//!
//! Then, the library user calls [`Parser::parse()`] with a [`Visitor`]. The
//! parser scans the input once and calls the visitor for every
//! [`Event`][crate::event::Event]. An event is one of:
//!
//! * [`Kind::TagEnter`][crate::event::Kind::TagEnter] for the `<` and the tag
//!   name
//! * [`Kind::Attribute`][crate::event::Kind::Attribute] for each attribute
//!   with an optional value
//! * [`Kind::TagExit`][crate::event::Kind::TagExit] for the `>` which ends a
//!   tag
//! * [`Kind::Other`][crate::event::Kind::Other] for everything else
//!
//! Every byte of the input belongs to exactly one event, so concatenating the
//! events' bytes in order reproduces the input.
//!
//! # Examples
//!
//! ## Collecting events
//!
//! ```
//! use chtml::event::Kind;
//!
//! let events = chtml::collect_str("<a href=/x>link</a>");
//!
//! let kinds = events.iter().map(|e| e.kind()).collect::<Vec<_>>();
//! assert_eq!(
//!     vec![
//!         Kind::TagEnter,
//!         Kind::Attribute,
//!         Kind::TagExit,
//!         Kind::Other,
//!         Kind::TagEnter,
//!         Kind::TagExit,
//!     ],
//!     kinds
//! );
//!
//! let href = &events.events()[1];
//! assert_eq!(Some(&b"a"[..]), href.tag());
//! assert_eq!(Some(&b"href"[..]), href.attribute_name());
//! assert_eq!(Some(&b"/x"[..]), href.attribute_value());
//! ```
//!
//! ## Using a visitor
//!
//! ```
//! use core::ops::ControlFlow;
//! use chtml::event::{Event, Kind};
//!
//! let mut depth = 0i32;
//! chtml::parse_str("<ul><li>a</li></ul>", &mut |event: Event<'_>| {
//!     if event.kind() == Kind::TagEnter {
//!         if event.is_closing_tag() {
//!             depth -= 1;
//!         } else {
//!             depth += 1;
//!         }
//!     }
//!     ControlFlow::Continue(())
//! });
//! assert_eq!(0, depth);
//! ```
//!
//! # Well-formed vs. Malformed document processing
//!
//! Parsing never fails. When a tag cannot be scanned (for instance a quoted
//! attribute value runs to the end of the input), the parser abandons the
//! tag, reports a [`Diagnostic`][crate::diagnostic::Diagnostic] to
//! [`Visitor::malformed()`], and continues at the top level. The abandoned
//! bytes are reported in the next `Other` event.
//!
//! # Security Considerations
//!
//! The parser does not allocate and uses a fixed amount of stack. Scanning is
//! linear in the length of the input. A visitor may stop the parse at any
//! event by returning [`ControlFlow::Break`][core::ops::ControlFlow::Break].
//!
//! [html]: https://html.spec.whatwg.org/

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod class;
mod cursor;
pub mod diagnostic;
pub mod event;
mod opts;
mod parser;
pub mod visit;

pub use opts::ParseOptions;
pub use parser::{Outcome, Parser};
pub use visit::Visitor;

/// Scans the input with the default options.
///
/// Equivalent to `Parser::from_slice(input).parse(visitor)`.
#[inline]
pub fn parse<'a, V>(input: &'a [u8], visitor: &mut V) -> Outcome
where
    V: Visitor<'a> + ?Sized,
{
    Parser::from_slice(input).parse(visitor)
}

/// Scans the string input with the default options.
#[inline]
pub fn parse_str<'a, V>(input: &'a str, visitor: &mut V) -> Outcome
where
    V: Visitor<'a> + ?Sized,
{
    Parser::from_str(input).parse(visitor)
}

/// Scans the input and stores every event and diagnostic.
#[cfg(any(feature = "std", feature = "alloc"))]
#[must_use]
pub fn collect(input: &[u8]) -> visit::Events<'_> {
    let mut events = visit::Events::new();
    let _ = parse(input, &mut events);
    events
}

/// Scans the string input and stores every event and diagnostic.
#[cfg(any(feature = "std", feature = "alloc"))]
#[must_use]
pub fn collect_str(input: &str) -> visit::Events<'_> {
    collect(input.as_bytes())
}
