// Copyright 2024 Bryant Luk
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Owned events have a copy of the scanned bytes.
//!
//! While there is a cost for each owned event having its own buffers, owned
//! events can be retained after the input buffer is dropped or reused.

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use core::str;

use super::{Event, Kind, Span};

/// A copy of an [`Event`] which does not borrow the input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwnedEvent {
    kind: Kind,
    span: Span,
    bytes: Vec<u8>,
    tag: Option<Vec<u8>>,
    attribute_name: Option<Vec<u8>>,
    attribute_value: Option<Vec<u8>>,
}

impl OwnedEvent {
    /// The type of event.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// The location of the event's bytes in the original input.
    #[inline]
    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    /// All of the bytes covered by the event.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The event's bytes as a str.
    ///
    /// # Errors
    ///
    /// If the bytes are not a UTF-8 string.
    #[inline]
    pub fn to_str(&self) -> Result<&str, str::Utf8Error> {
        str::from_utf8(&self.bytes)
    }

    /// The name of the current tag.
    #[inline]
    #[must_use]
    pub fn tag(&self) -> Option<&[u8]> {
        self.tag.as_deref()
    }

    /// The attribute name.
    #[inline]
    #[must_use]
    pub fn attribute_name(&self) -> Option<&[u8]> {
        self.attribute_name.as_deref()
    }

    /// The attribute value without surrounding quotes.
    #[inline]
    #[must_use]
    pub fn attribute_value(&self) -> Option<&[u8]> {
        self.attribute_value.as_deref()
    }

    /// Returns the event bytes.
    #[inline]
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl From<Event<'_>> for OwnedEvent {
    fn from(value: Event<'_>) -> Self {
        Self {
            kind: value.kind(),
            span: value.span(),
            bytes: value.as_bytes().to_vec(),
            tag: value.tag().map(<[u8]>::to_vec),
            attribute_name: value.attribute_name().map(<[u8]>::to_vec),
            attribute_value: value.attribute_value().map(<[u8]>::to_vec),
        }
    }
}

impl AsRef<[u8]> for OwnedEvent {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl Event<'_> {
    /// Copies the event so it can outlive the input.
    #[inline]
    #[must_use]
    pub fn to_owned_event(&self) -> OwnedEvent {
        OwnedEvent::from(*self)
    }
}
