// Copyright 2024 Bryant Luk
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Parse options.

/// Options which change how input is scanned.
///
/// The default options scan the entire input slice and abandon a tag when a
/// quoted attribute value contains a `<` or `>`.
///
/// ```
/// use chtml::ParseOptions;
///
/// let opts = ParseOptions::new()
///     .nul_terminated(true)
///     .brackets_in_quoted_values(true);
/// assert!(opts.is_nul_terminated());
/// assert!(opts.allows_brackets_in_quoted_values());
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParseOptions {
    nul_terminated: bool,
    brackets_in_quoted_values: bool,
}

impl ParseOptions {
    /// The default options.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nul_terminated: false,
            brackets_in_quoted_values: false,
        }
    }

    /// Stop scanning at the first NUL byte as if it were the end of the input.
    ///
    /// Useful when the buffer comes from C-style storage with a trailing NUL
    /// and possibly garbage after it.
    #[inline]
    #[must_use]
    pub const fn nul_terminated(mut self, value: bool) -> Self {
        self.nul_terminated = value;
        self
    }

    /// Accept `<` and `>` inside quoted attribute values.
    #[inline]
    #[must_use]
    pub const fn brackets_in_quoted_values(mut self, value: bool) -> Self {
        self.brackets_in_quoted_values = value;
        self
    }

    /// If a NUL byte ends the input.
    #[inline]
    #[must_use]
    pub const fn is_nul_terminated(&self) -> bool {
        self.nul_terminated
    }

    /// If `<` and `>` are accepted inside quoted attribute values.
    #[inline]
    #[must_use]
    pub const fn allows_brackets_in_quoted_values(&self) -> bool {
        self.brackets_in_quoted_values
    }
}
