// Copyright 2024 Bryant Luk
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Receivers of parse events.

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use core::{fmt, ops::ControlFlow};

use crate::{diagnostic::Diagnostic, event::Event};

/// Receives events in input order.
///
/// Returning [`ControlFlow::Break`] from either method stops the parse and
/// the parser returns [`Outcome::Cancelled`][crate::Outcome::Cancelled].
///
/// Any closure which takes an [`Event`] and returns a `ControlFlow<()>` is a
/// visitor. State which the caller needs during the parse can be captured by
/// the closure or stored in the implementing type.
///
/// ```
/// use core::ops::ControlFlow;
/// use chtml::{event::{Event, Kind}, Visitor};
///
/// #[derive(Default)]
/// struct TagNames<'a>(Vec<&'a [u8]>);
///
/// impl<'a> Visitor<'a> for TagNames<'a> {
///     fn event(&mut self, event: Event<'a>) -> ControlFlow<()> {
///         if event.kind() == Kind::TagEnter && !event.is_closing_tag() {
///             self.0.extend(event.tag());
///         }
///         ControlFlow::Continue(())
///     }
/// }
///
/// let mut names = TagNames::default();
/// chtml::parse(b"<ul><li>a</li><li>b</li></ul>", &mut names);
/// assert_eq!(vec![&b"ul"[..], &b"li"[..], &b"li"[..]], names.0);
/// ```
pub trait Visitor<'a> {
    /// Called for every event.
    fn event(&mut self, event: Event<'a>) -> ControlFlow<()>;

    /// Called when a malformed construct is abandoned.
    ///
    /// The default implementation ignores the diagnostic.
    fn malformed(&mut self, diagnostic: Diagnostic) -> ControlFlow<()> {
        let _ = diagnostic;
        ControlFlow::Continue(())
    }
}

impl<'a, F> Visitor<'a> for F
where
    F: FnMut(Event<'a>) -> ControlFlow<()>,
{
    #[inline]
    fn event(&mut self, event: Event<'a>) -> ControlFlow<()> {
        self(event)
    }
}

/// Creates a visitor from a closure.
///
/// Unlike passing a closure directly, the closure's argument is tied to the
/// input's lifetime, so borrowed bytes from an event may be kept after the
/// parse.
///
/// ```
/// use core::ops::ControlFlow;
/// use chtml::event::Kind;
///
/// let mut attrs = Vec::new();
/// chtml::parse(b"<a href=x rel=y>", &mut chtml::visit::from_fn(|event| {
///     if event.kind() == Kind::Attribute {
///         attrs.extend(event.attribute_name());
///     }
///     ControlFlow::Continue(())
/// }));
/// assert_eq!(vec![&b"href"[..], &b"rel"[..]], attrs);
/// ```
#[inline]
pub fn from_fn<'a, F>(f: F) -> FromFn<F>
where
    F: FnMut(Event<'a>) -> ControlFlow<()>,
{
    FromFn(f)
}

/// The visitor returned by [`from_fn()`].
#[derive(Clone)]
pub struct FromFn<F>(F);

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromFn").finish_non_exhaustive()
    }
}

impl<'a, F> Visitor<'a> for FromFn<F>
where
    F: FnMut(Event<'a>) -> ControlFlow<()>,
{
    #[inline]
    fn event(&mut self, event: Event<'a>) -> ControlFlow<()> {
        (self.0)(event)
    }
}

/// A visitor which stores all events and diagnostics.
///
/// ```
/// use chtml::event::Kind;
///
/// let events = chtml::collect(b"<br/>");
/// let kinds = events.iter().map(|e| e.kind()).collect::<Vec<_>>();
/// assert_eq!(vec![Kind::TagEnter, Kind::TagExit], kinds);
/// assert!(events.diagnostics().is_empty());
/// ```
#[cfg(any(feature = "std", feature = "alloc"))]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Events<'a> {
    events: Vec<Event<'a>>,
    diagnostics: Vec<Diagnostic>,
}

#[cfg(any(feature = "std", feature = "alloc"))]
impl<'a> Events<'a> {
    /// Instantiates an empty collection.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            events: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// The collected events in input order.
    #[inline]
    #[must_use]
    pub fn events(&self) -> &[Event<'a>] {
        &self.events
    }

    /// The collected diagnostics in input order.
    #[inline]
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Iterates over the collected events.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, Event<'a>> {
        self.events.iter()
    }

    /// Returns the collected events and diagnostics.
    #[inline]
    #[must_use]
    pub fn into_parts(self) -> (Vec<Event<'a>>, Vec<Diagnostic>) {
        (self.events, self.diagnostics)
    }
}

#[cfg(any(feature = "std", feature = "alloc"))]
impl<'a> Visitor<'a> for Events<'a> {
    #[inline]
    fn event(&mut self, event: Event<'a>) -> ControlFlow<()> {
        self.events.push(event);
        ControlFlow::Continue(())
    }

    #[inline]
    fn malformed(&mut self, diagnostic: Diagnostic) -> ControlFlow<()> {
        self.diagnostics.push(diagnostic);
        ControlFlow::Continue(())
    }
}

#[cfg(any(feature = "std", feature = "alloc"))]
impl<'a> IntoIterator for Events<'a> {
    type Item = Event<'a>;

    type IntoIter = <Vec<Event<'a>> as IntoIterator>::IntoIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

#[cfg(any(feature = "std", feature = "alloc"))]
impl<'a, 'b> IntoIterator for &'b Events<'a> {
    type Item = &'b Event<'a>;

    type IntoIter = core::slice::Iter<'b, Event<'a>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
