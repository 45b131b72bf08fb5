// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the emitter: handler tokens, dispatch reports, and handler failures.
//!
//! ## Overview
//!
//! These types describe what [`Emitter`](crate::emitter::Emitter) hands back to callers.
//! They carry no behavior of their own beyond formatting and comparison.

use core::fmt;
use std::rc::Rc;

/// Opaque token identifying one handler registration.
///
/// Returned by [`Emitter::on`](crate::emitter::Emitter::on) and accepted by
/// [`Emitter::off`](crate::emitter::Emitter::off) and
/// [`Emitter::off_in`](crate::emitter::Emitter::off_in).
///
/// ## Semantics
///
/// - Each call to `on` mints a fresh token from a counter owned by the emitter.
/// - A token is never reused for the lifetime of its emitter, including across
///   [`clear`](crate::emitter::Emitter::clear).
/// - Tokens are tagged with the emitter that minted them; every other emitter ignores them.
///
/// The `Display` form is `channel#serial`, for example `end#3`; it is meant for logs,
/// not for parsing.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HandlerId {
    pub(crate) emitter: u64,
    pub(crate) channel: Rc<str>,
    pub(crate) serial: u64,
}

impl HandlerId {
    pub(crate) fn new(emitter: u64, channel: Rc<str>, serial: u64) -> Self {
        Self {
            emitter,
            channel,
            serial,
        }
    }

    /// The channel this handler was registered on.
    pub fn channel(&self) -> &str {
        &self.channel
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.channel, self.serial)
    }
}

/// A handler panicked while being dispatched.
///
/// Produced by [`Emitter::trigger`](crate::emitter::Emitter::trigger) and collected in
/// [`Delivery::failures`]. The dispatch that produced it still ran every other handler.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("handler {handler} panicked: {message}")]
pub struct HandlerError {
    /// Token of the handler that failed.
    pub handler: HandlerId,
    /// Panic message, when the panic payload was a string.
    pub message: String,
}

/// Summary of one [`trigger`](crate::emitter::Emitter::trigger) call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[must_use]
pub struct Delivery {
    /// Number of handlers that were invoked, including those that failed.
    pub invoked: usize,
    /// Handlers that panicked, in dispatch order.
    pub failures: Vec<HandlerError>,
}

impl Delivery {
    /// Returns `true` if every invoked handler returned normally.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
