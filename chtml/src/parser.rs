// Copyright 2024 Bryant Luk
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tag and attribute state machine.

use core::ops::ControlFlow;

use crate::{
    class::Class,
    cursor::Cursor,
    diagnostic::{Diagnostic, DiagnosticKind},
    event::{Context, Event, Kind, Span},
    visit::Visitor,
    ParseOptions,
};

const LOG_TARGET: &str = "chtml.parser";

/// How a parse ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The entire input was scanned.
    Finished,
    /// The visitor stopped the parse.
    Cancelled {
        /// The index after the last byte of the event or abandoned tag which
        /// the visitor stopped at.
        offset: usize,
    },
}

impl Outcome {
    /// If the entire input was scanned.
    #[inline]
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self, Outcome::Finished)
    }

    /// If the visitor stopped the parse.
    #[inline]
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled { .. })
    }
}

/// Scans markup input and emits [`Event`]s to a [`Visitor`].
///
/// The parser does not allocate and does not keep any state between calls to
/// [`Parser::parse()`]. Every byte of the input is reported in exactly one
/// event, in input order.
///
/// # Examples
///
/// ```
/// use core::ops::ControlFlow;
/// use chtml::{event::{Event, Kind}, Parser};
///
/// let parser = Parser::new(r#"<p class="x">hi</p>"#);
///
/// let mut seen = Vec::new();
/// parser.parse(&mut |event: Event<'_>| {
///     seen.push((event.kind(), event.to_str().unwrap().to_string()));
///     ControlFlow::Continue(())
/// });
///
/// assert_eq!(
///     vec![
///         (Kind::TagEnter, "<p".to_string()),
///         (Kind::Attribute, r#" class="x""#.to_string()),
///         (Kind::TagExit, ">".to_string()),
///         (Kind::Other, "hi".to_string()),
///         (Kind::TagEnter, "</p".to_string()),
///         (Kind::TagExit, ">".to_string()),
///     ],
///     seen
/// );
/// ```
///
/// ## Stopping early
///
/// ```
/// use core::ops::ControlFlow;
/// use chtml::{event::Kind, Outcome, Parser};
///
/// let parser = Parser::new("<title>Example</title><body>...</body>");
///
/// let mut title = None;
/// let outcome = parser.parse(&mut chtml::visit::from_fn(|event| {
///     if event.kind() == Kind::Other {
///         title = Some(event.as_bytes());
///         return ControlFlow::Break(());
///     }
///     ControlFlow::Continue(())
/// }));
///
/// assert_eq!(Some(&b"Example"[..]), title);
/// assert_eq!(Outcome::Cancelled { offset: 14 }, outcome);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Parser<'a> {
    input: &'a [u8],
    opts: ParseOptions,
}

impl<'a> Parser<'a> {
    /// Creates a new instance with the given UTF-8 string input.
    #[inline]
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self::from_slice(input.as_bytes())
    }

    /// Creates a new instance with the given UTF-8 string input.
    #[inline]
    #[must_use]
    pub const fn from_str(input: &'a str) -> Self {
        Self::from_slice(input.as_bytes())
    }

    /// Creates a new instance from a byte slice.
    ///
    /// The bytes do not need to be UTF-8. Only ASCII bytes have a meaning to
    /// the parser; every other byte is text.
    #[inline]
    #[must_use]
    pub const fn from_slice(input: &'a [u8]) -> Self {
        Self {
            input,
            opts: ParseOptions::new(),
        }
    }

    /// Replaces the parse options.
    #[inline]
    #[must_use]
    pub const fn with_options(mut self, opts: ParseOptions) -> Self {
        self.opts = opts;
        self
    }

    /// The input to parse.
    #[inline]
    #[must_use]
    pub const fn input(&self) -> &'a [u8] {
        self.input
    }

    /// The parse options.
    #[inline]
    #[must_use]
    pub const fn options(&self) -> ParseOptions {
        self.opts
    }

    /// Scans the input and calls the visitor for every event.
    pub fn parse<V>(&self, visitor: &mut V) -> Outcome
    where
        V: Visitor<'a> + ?Sized,
    {
        let mut machine = Machine {
            cursor: Cursor::new(self.input, self.opts),
            visitor,
            cx: Context::default(),
            events: 0,
            stopped_at: 0,
        };

        let outcome = match machine.run() {
            ControlFlow::Continue(()) => Outcome::Finished,
            ControlFlow::Break(()) => {
                log::trace!(
                    target: LOG_TARGET,
                    "visitor cancelled parse at offset {}",
                    machine.stopped_at
                );
                Outcome::Cancelled {
                    offset: machine.stopped_at,
                }
            }
        };

        log::debug!(
            target: LOG_TARGET,
            "scanned {} of {} bytes into {} events: {:?}",
            machine.cursor.pos(),
            machine.cursor.end(),
            machine.events,
            outcome
        );

        outcome
    }
}

/// Why a tag was left before its `>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    Abandon(DiagnosticKind),
    Cancel,
}

struct Machine<'a, 'v, V: ?Sized> {
    cursor: Cursor<'a>,
    visitor: &'v mut V,
    cx: Context,
    events: usize,
    stopped_at: usize,
}

impl<'a, V> Machine<'a, '_, V>
where
    V: Visitor<'a> + ?Sized,
{
    /// Top-level scan.
    fn run(&mut self) -> ControlFlow<()> {
        loop {
            match self.cursor.peek() {
                // Pending `Other` bytes are flushed once a tag name is found
                Class::OpenBracket => self.tag()?,
                Class::Terminator => return self.flush_top(Kind::Other),
                Class::Whitespace
                | Class::CloseBracket
                | Class::Equals
                | Class::Apostrophe
                | Class::Quote
                | Class::Text => {
                    let _ = self.cursor.advance_token();
                }
            }
        }
    }

    /// Scans a tag and recovers from abandonment.
    fn tag(&mut self) -> ControlFlow<()> {
        let start = self.cursor.pos();
        let result = self.scan_tag(start);
        self.cx = Context::default();

        match result {
            Ok(()) => ControlFlow::Continue(()),
            Err(Exit::Cancel) => ControlFlow::Break(()),
            Err(Exit::Abandon(kind)) => {
                let span = Span::new(start, self.cursor.pos() - start);
                log::trace!(
                    target: LOG_TARGET,
                    "abandoned tag at {}..{}: {}",
                    span.offset(),
                    span.end(),
                    kind
                );
                let flow = self.visitor.malformed(Diagnostic::new(kind, span));
                if flow.is_break() {
                    self.stopped_at = self.cursor.pos();
                }
                flow
            }
        }
    }

    fn scan_tag(&mut self, start: usize) -> Result<(), Exit> {
        debug_assert_eq!(Class::OpenBracket, self.cursor.peek());
        self.cursor.bump();

        let name = self
            .cursor
            .eat(Class::Text)
            .ok_or(Exit::Abandon(DiagnosticKind::MissingTagName))?;
        if self.is_lone_slash(name) {
            return Err(Exit::Abandon(DiagnosticKind::DetachedClosingSlash));
        }

        self.flush_until(Kind::Other, start)?;
        self.cx.tag = Some(name);
        self.flush(Kind::TagEnter)?;

        loop {
            let _ = self.cursor.eat(Class::Whitespace);

            match self.cursor.peek() {
                Class::CloseBracket => {
                    self.cursor.bump();
                    return self.flush(Kind::TagExit);
                }
                Class::Text => {
                    let (_, name) = self.cursor.advance_token();
                    // Self-close marker
                    if self.is_lone_slash(name) {
                        continue;
                    }
                    self.scan_attribute(name)?;
                }
                Class::Terminator => return Err(Exit::Abandon(DiagnosticKind::UnterminatedTag)),
                class @ (Class::OpenBracket
                | Class::Equals
                | Class::Apostrophe
                | Class::Quote
                | Class::Whitespace) => {
                    return Err(Exit::Abandon(DiagnosticKind::UnexpectedInTag(class)));
                }
            }
        }
    }

    fn scan_attribute(&mut self, name: Span) -> Result<(), Exit> {
        let value = match self.cursor.peek() {
            // A name only stops at text when the text is a `/`
            Class::Whitespace | Class::CloseBracket | Class::Text => None,
            Class::Equals => {
                self.cursor.bump();
                Some(self.scan_value()?)
            }
            Class::Terminator => return Err(Exit::Abandon(DiagnosticKind::UnterminatedTag)),
            class @ (Class::OpenBracket | Class::Apostrophe | Class::Quote) => {
                return Err(Exit::Abandon(
                    DiagnosticKind::UnexpectedAfterAttributeName(class),
                ));
            }
        };

        self.cx.attribute = Some(name);
        self.cx.value = value;
        let result = self.flush(Kind::Attribute);
        self.cx.attribute = None;
        self.cx.value = None;
        result
    }

    /// Scans the value after an `=`.
    ///
    /// Quoted values are scanned byte by byte and the returned span excludes
    /// the quotes.
    fn scan_value(&mut self) -> Result<Span, Exit> {
        match self.cursor.peek() {
            Class::Text => Ok(self.cursor.advance_value_run()),
            delimiter @ (Class::Apostrophe | Class::Quote) => {
                self.cursor.bump();
                let start = self.cursor.pos();
                let brackets_allowed = self.cursor.opts().allows_brackets_in_quoted_values();

                loop {
                    match self.cursor.peek() {
                        class if class == delimiter => {
                            let value = Span::new(start, self.cursor.pos() - start);
                            self.cursor.bump();
                            return Ok(value);
                        }
                        Class::Terminator => {
                            return Err(Exit::Abandon(DiagnosticKind::UnterminatedQuotedValue));
                        }
                        Class::OpenBracket | Class::CloseBracket if !brackets_allowed => {
                            return Err(Exit::Abandon(DiagnosticKind::BracketInQuotedValue));
                        }
                        _ => self.cursor.bump(),
                    }
                }
            }
            class @ (Class::Whitespace
            | Class::OpenBracket
            | Class::CloseBracket
            | Class::Equals
            | Class::Terminator) => Err(Exit::Abandon(DiagnosticKind::MissingAttributeValue(
                class,
            ))),
        }
    }

    #[inline]
    fn is_lone_slash(&self, span: Span) -> bool {
        span.slice(self.cursor.input()) == b"/"
    }

    /// Emits the bytes scanned since the last event.
    ///
    /// Nothing is emitted if no bytes were scanned.
    #[inline]
    fn flush(&mut self, kind: Kind) -> Result<(), Exit> {
        self.flush_until(kind, self.cursor.pos())
    }

    /// Emits the unreported bytes before `end`.
    fn flush_until(&mut self, kind: Kind, end: usize) -> Result<(), Exit> {
        debug_assert!(end <= self.cursor.pos());
        let Some(span) = self.cursor.take_pending_until(end) else {
            return Ok(());
        };

        let cx = match kind {
            Kind::Other => Context::default(),
            Kind::TagEnter | Kind::TagExit | Kind::Attribute => self.cx,
        };
        let event = Event::new(kind, self.cursor.input(), span, cx);
        self.events += 1;

        match self.visitor.event(event) {
            ControlFlow::Continue(()) => Ok(()),
            ControlFlow::Break(()) => {
                self.stopped_at = span.end();
                Err(Exit::Cancel)
            }
        }
    }

    #[inline]
    fn flush_top(&mut self, kind: Kind) -> ControlFlow<()> {
        match self.flush(kind) {
            Ok(()) => ControlFlow::Continue(()),
            Err(_) => ControlFlow::Break(()),
        }
    }
}
