// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_emitter --heading-base-level=0

//! Understory Emitter: ordered, named-channel publish/subscribe.
//!
//! ## Overview
//!
//! An [`Emitter`](crate::emitter::Emitter) keeps one registry of handlers per named channel.
//! [`on`](crate::emitter::Emitter::on) registers a handler and returns a [`HandlerId`](crate::types::HandlerId)
//! that identifies exactly that registration. [`trigger`](crate::emitter::Emitter::trigger) runs every
//! handler currently registered on a channel, synchronously and in registration order.
//!
//! The emitter knows nothing about the component that owns it.
//! Components such as a product tour own one emitter and re-expose its surface.
//!
//! ## Removal
//!
//! There are four ways to remove handlers:
//!
//! - [`clear`](crate::emitter::Emitter::clear): every channel (also available as `destroy`).
//! - [`off_channel`](crate::emitter::Emitter::off_channel): every handler on one channel.
//! - [`off`](crate::emitter::Emitter::off): exactly the one handler matching a token.
//! - [`off_in`](crate::emitter::Emitter::off_in): the handler matching a token, only if it lives on the given channel.
//!
//! Removing a token never disturbs the presence or relative order of any other handler.
//! Tokens are minted from a counter owned by the emitter and are never reused, even after
//! a full [`clear`](crate::emitter::Emitter::clear).
//! Each token also records which emitter minted it, so other emitters ignore it.
//!
//! ## Failure isolation
//!
//! A handler that panics does not stop the dispatch. The panic is caught, logged with
//! `tracing`, and reported as a [`HandlerError`](crate::types::HandlerError) in the returned
//! [`Delivery`](crate::types::Delivery); the remaining handlers still run.
//!
//! ## Reentrancy
//!
//! All methods take `&self`. The registry is snapshotted before a dispatch, so a handler may
//! call `on`/`off` on the emitter that is dispatching it:
//!
//! - a handler removed during a dispatch is not invoked later in that dispatch;
//! - a handler added during a dispatch first runs on the next `trigger`.
//!
//! ## Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use understory_emitter::emitter::Emitter;
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let bus: Emitter<u32> = Emitter::new("demo");
//!
//! let a = {
//!     let seen = Rc::clone(&seen);
//!     bus.on("tick", move |n: &u32| seen.borrow_mut().push(("a", *n)))
//! };
//! {
//!     let seen = Rc::clone(&seen);
//!     bus.on("tick", move |n: &u32| seen.borrow_mut().push(("b", *n)));
//! }
//!
//! let _ = bus.trigger("tick", &1);
//! assert!(bus.off(&a));
//! let _ = bus.trigger("tick", &2);
//!
//! assert_eq!(*seen.borrow(), vec![("a", 1), ("b", 1), ("b", 2)]);
//! ```
//!
//! This crate is single-threaded by construction: handlers are `Rc`-shared closures.

pub mod emitter;
pub mod types;

pub use emitter::Emitter;
pub use types::{Delivery, HandlerError, HandlerId};
