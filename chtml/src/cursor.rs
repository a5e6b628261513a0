// Copyright 2024 Bryant Luk
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! An internal forward-only cursor over the input.

use crate::{
    class::{classify_at, Class},
    event::Span,
    ParseOptions,
};

/// Position in the input plus the start of the bytes not yet reported.
///
/// `pending <= pos <= end` always holds. The bytes in `pending..pos` have been
/// scanned but not flushed to an event.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cursor<'a> {
    input: &'a [u8],
    end: usize,
    pos: usize,
    pending: usize,
    opts: ParseOptions,
}

impl<'a> Cursor<'a> {
    #[must_use]
    pub(crate) fn new(input: &'a [u8], opts: ParseOptions) -> Self {
        let end = if opts.is_nul_terminated() {
            input.iter().position(|b| *b == 0).unwrap_or(input.len())
        } else {
            input.len()
        };

        Self {
            input,
            end,
            pos: 0,
            pending: 0,
            opts,
        }
    }

    #[inline]
    #[must_use]
    pub(crate) const fn input(&self) -> &'a [u8] {
        self.input
    }

    #[inline]
    #[must_use]
    pub(crate) const fn pos(&self) -> usize {
        self.pos
    }

    /// The position where scanning stops.
    #[inline]
    #[must_use]
    pub(crate) const fn end(&self) -> usize {
        self.end
    }

    #[inline]
    #[must_use]
    pub(crate) const fn opts(&self) -> ParseOptions {
        self.opts
    }

    #[inline]
    #[must_use]
    pub(crate) const fn peek(&self) -> Class {
        classify_at(self.input, self.pos, self.opts)
    }

    /// Consumes a single byte regardless of its class.
    #[inline]
    pub(crate) fn bump(&mut self) {
        if self.pos < self.end {
            self.pos += 1;
        }
    }

    #[inline]
    #[must_use]
    fn at_slash(&self) -> bool {
        self.pos < self.end && self.input[self.pos] == b'/'
    }

    /// Consumes the next token.
    ///
    /// Runs of whitespace or text are coalesced into one span. A `/` may
    /// begin a text run but does not continue one, so `br/` scans as `br`
    /// followed by `/`. Every other class is a single byte. At the end of
    /// input the span is empty and the cursor does not move.
    pub(crate) fn advance_token(&mut self) -> (Class, Span) {
        let start = self.pos;
        let class = self.peek();
        match class {
            Class::Terminator => {}
            Class::Whitespace => {
                self.pos += 1;
                while self.peek() == Class::Whitespace {
                    self.pos += 1;
                }
            }
            Class::Text => {
                self.pos += 1;
                while self.peek() == Class::Text && !self.at_slash() {
                    self.pos += 1;
                }
            }
            Class::OpenBracket
            | Class::CloseBracket
            | Class::Equals
            | Class::Apostrophe
            | Class::Quote => {
                self.pos += 1;
            }
        }

        (class, Span::new(start, self.pos - start))
    }

    /// Consumes a run of text including any `/` bytes.
    ///
    /// Returns an empty span if the cursor is not at text.
    pub(crate) fn advance_text_run(&mut self) -> Span {
        let start = self.pos;
        while self.peek() == Class::Text {
            self.pos += 1;
        }
        Span::new(start, self.pos - start)
    }

    /// Consumes a bare attribute value.
    ///
    /// Same as [`Cursor::advance_text_run()`] except that a final `/` directly
    /// before a `>` is left unconsumed as the self-close marker, unless the
    /// `/` is the whole value.
    pub(crate) fn advance_value_run(&mut self) -> Span {
        let span = self.advance_text_run();
        if span.len() > 1
            && self.input[span.end() - 1] == b'/'
            && self.peek() == Class::CloseBracket
        {
            self.pos -= 1;
            return Span::new(span.offset(), span.len() - 1);
        }
        span
    }

    /// Consumes a token only if it has the given class.
    pub(crate) fn eat(&mut self, class: Class) -> Option<Span> {
        if self.peek() == class {
            Some(self.advance_token().1)
        } else {
            None
        }
    }

    /// Start of the unreported bytes.
    #[inline]
    #[must_use]
    pub(crate) const fn pending_start(&self) -> usize {
        self.pending
    }

    /// Returns the unreported bytes and marks them as reported.
    ///
    /// Returns `None` if nothing was scanned since the last call.
    pub(crate) fn take_pending(&mut self) -> Option<Span> {
        self.take_pending_until(self.pos)
    }

    /// Returns the unreported bytes before `end` and marks them as reported.
    ///
    /// Bytes from `end` up to the cursor stay pending.
    pub(crate) fn take_pending_until(&mut self, end: usize) -> Option<Span> {
        debug_assert!(self.pending <= end && end <= self.pos);
        if self.pending >= end {
            return None;
        }

        let span = Span::new(self.pending, end - self.pending);
        self.pending = end;
        Some(span)
    }
}
