// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Emitter implementation.
//!
//! ## Overview
//!
//! Keeps one ordered registry per channel and walks it on [`Emitter::trigger`].
//! Registries are created lazily on the first [`Emitter::on`] for a channel.
//!
//! ## Ordering
//!
//! - Handlers on a channel run in registration order.
//! - Removing a handler deletes exactly its entry; the others keep their relative order.
//! - Channels are independent; nothing orders handlers across channels.
//!
//! ## See Also
//!
//! [`types`](crate::types) for tokens and dispatch reports.

use core::cell::{Cell, RefCell};
use core::fmt;
use std::any::Any;
use std::collections::BTreeMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::types::{Delivery, HandlerError, HandlerId};

type Handler<P> = Rc<dyn Fn(&P)>;

/// Source of emitter instance tags stamped into every [`HandlerId`].
static NEXT_EMITTER: AtomicU64 = AtomicU64::new(0);

/// Ordered registry for a single channel.
struct Queue<P> {
    entries: Vec<(HandlerId, Handler<P>)>,
}

impl<P> Queue<P> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn position(&self, id: &HandlerId) -> Option<usize> {
        self.entries.iter().position(|(h, _)| h == id)
    }

    /// Removes the single entry matching `id`.
    fn remove(&mut self, id: &HandlerId) -> bool {
        match self.position(id) {
            Some(i) => {
                self.entries.remove(i);
                true
            }
            None => false,
        }
    }
}

/// Named-channel publish/subscribe with ordered, isolated dispatch.
///
/// ## Usage
///
/// - Construct with [`Emitter::new`]; each emitter owns its own registry.
/// - Subscribe with [`Emitter::on`] and keep the returned [`HandlerId`] if you
///   intend to remove that handler later.
/// - Publish with [`Emitter::trigger`]; inspect the returned [`Delivery`] if you
///   care about handler failures.
/// - Tear down with [`Emitter::clear`] (or its alias [`Emitter::destroy`]).
///
/// `P` is the payload type handed to every handler by reference.
pub struct Emitter<P> {
    name: String,
    id: u64,
    queues: RefCell<BTreeMap<Rc<str>, Queue<P>>>,
    next_serial: Cell<u64>,
}

impl<P> fmt::Debug for Emitter<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let queues = self.queues.borrow();
        let channels: Vec<(&str, usize)> = queues
            .iter()
            .map(|(name, q)| (&**name, q.entries.len()))
            .collect();
        f.debug_struct("Emitter")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("channels", &channels)
            .field("next_serial", &self.next_serial.get())
            .finish()
    }
}

impl<P> Default for Emitter<P> {
    fn default() -> Self {
        Self::new("untitled")
    }
}

impl<P> Emitter<P> {
    /// Create an empty emitter. `name` is only used in logs.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: NEXT_EMITTER.fetch_add(1, Ordering::Relaxed),
            queues: RefCell::new(BTreeMap::new()),
            next_serial: Cell::new(0),
        }
    }

    /// The name given at construction.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register `handler` on `channel` and return its token.
    ///
    /// The channel's registry is created on first use.
    pub fn on<F>(&self, channel: impl AsRef<str>, handler: F) -> HandlerId
    where
        F: Fn(&P) + 'static,
    {
        let channel = channel.as_ref();
        let serial = self.next_serial.get();
        self.next_serial.set(serial + 1);

        let mut queues = self.queues.borrow_mut();
        let key = match queues.get_key_value(channel) {
            Some((key, _)) => Rc::clone(key),
            None => {
                let key: Rc<str> = Rc::from(channel);
                queues.insert(Rc::clone(&key), Queue::new());
                key
            }
        };
        let id = HandlerId::new(self.id, Rc::clone(&key), serial);
        if let Some(queue) = queues.get_mut(&*key) {
            queue.entries.push((id.clone(), Rc::new(handler)));
        }
        tracing::trace!(emitter = %self.name, handler = %id, "registered handler");
        id
    }

    /// Remove every handler on every channel.
    pub fn clear(&self) {
        self.queues.borrow_mut().clear();
        tracing::trace!(emitter = %self.name, "cleared all channels");
    }

    /// Alias for [`Emitter::clear`].
    pub fn destroy(&self) {
        self.clear();
    }

    /// Remove and forget every handler on `channel`, returning how many were removed.
    ///
    /// Other channels are untouched.
    pub fn off_channel(&self, channel: impl AsRef<str>) -> usize {
        let removed = self
            .queues
            .borrow_mut()
            .remove(channel.as_ref())
            .map_or(0, |q| q.entries.len());
        tracing::trace!(emitter = %self.name, channel = channel.as_ref(), removed, "cleared channel");
        removed
    }

    /// Remove exactly the handler identified by `id`.
    ///
    /// Returns `false` if no such handler is registered (already removed, or from
    /// another emitter).
    pub fn off(&self, id: &HandlerId) -> bool {
        let removed = self
            .queues
            .borrow_mut()
            .values_mut()
            .any(|q| q.remove(id));
        tracing::trace!(emitter = %self.name, handler = %id, removed, "removed handler");
        removed
    }

    /// Remove the handler identified by `id`, searching only `channel`.
    pub fn off_in(&self, channel: impl AsRef<str>, id: &HandlerId) -> bool {
        let removed = self
            .queues
            .borrow_mut()
            .get_mut(channel.as_ref())
            .is_some_and(|q| q.remove(id));
        tracing::trace!(
            emitter = %self.name,
            channel = channel.as_ref(),
            handler = %id,
            removed,
            "removed handler from channel"
        );
        removed
    }

    /// Returns `true` if `id` is currently registered.
    pub fn is_registered(&self, id: &HandlerId) -> bool {
        self.queues
            .borrow()
            .get(id.channel())
            .is_some_and(|q| q.position(id).is_some())
    }

    /// Number of handlers registered on `channel`.
    pub fn handler_count(&self, channel: impl AsRef<str>) -> usize {
        self.queues
            .borrow()
            .get(channel.as_ref())
            .map_or(0, |q| q.entries.len())
    }

    /// Names of every channel that currently has a registry, in sorted order.
    pub fn channels(&self) -> Vec<String> {
        self.queues.borrow().keys().map(|k| k.to_string()).collect()
    }

    /// Returns `true` if no channel has a registry.
    pub fn is_empty(&self) -> bool {
        self.queues.borrow().is_empty()
    }

    /// Invoke every handler on `channel`, in registration order, with `payload`.
    ///
    /// No-op if the channel has no registry. A panicking handler is reported in the
    /// returned [`Delivery`] and does not stop the remaining handlers.
    pub fn trigger(&self, channel: impl AsRef<str>, payload: &P) -> Delivery {
        let channel = channel.as_ref();
        // Snapshot so handlers may call on/off on this emitter.
        let snapshot: Vec<(HandlerId, Handler<P>)> = match self.queues.borrow().get(channel) {
            Some(q) => q
                .entries
                .iter()
                .map(|(id, h)| (id.clone(), Rc::clone(h)))
                .collect(),
            None => return Delivery::default(),
        };

        let mut delivery = Delivery::default();
        for (id, handler) in snapshot {
            // Skip handlers removed earlier in this dispatch.
            if !self.is_registered(&id) {
                continue;
            }
            tracing::trace!(emitter = %self.name, handler = %id, "invoking handler");
            delivery.invoked += 1;
            if let Err(panic) = catch_unwind(AssertUnwindSafe(|| handler(payload))) {
                let message = panic_message(panic.as_ref());
                tracing::error!(
                    emitter = %self.name,
                    handler = %id,
                    %message,
                    "handler panicked; continuing dispatch"
                );
                delivery.failures.push(HandlerError {
                    handler: id,
                    message,
                });
            }
        }
        delivery
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
