// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_tour --heading-base-level=0

//! Understory Tour: sequencing for product tours.
//!
//! ## Overview
//!
//! A tour walks a user through a sequence of anchored callouts ("steps"), one at a time.
//! This crate owns the parts with real invariants:
//!
//! - building steps from host-discovered [`AnchorDescriptor`](crate::types::AnchorDescriptor)s and a
//!   [`TourConfig`](crate::config::TourConfig), ordered by declared index;
//! - the navigation state machine in [`TourController`](crate::tour::TourController)
//!   (`start`, `next`, `prev`, `end`, `destroy`);
//! - lifecycle notifications through an owned [`understory_emitter::Emitter`].
//!
//! It does not measure elements, produce markup, or animate. Those are delegated to a
//! [`Renderer`](crate::render::Renderer) the host implements. Placement of a step next to its
//! anchor is computed here, as a pure function in [`placement`](crate::placement).
//!
//! ## Workflow
//!
//! 1) Describe content per declared index in a [`TourConfig`](crate::config::TourConfig)
//!    (by hand or from JSON).
//! 2) Discover anchors and build [`AnchorDescriptor`](crate::types::AnchorDescriptor)s.
//! 3) Build a [`TourController`](crate::tour::TourController) with your renderer.
//! 4) Subscribe to [`Lifecycle`](crate::types::Lifecycle) channels and call `start`.
//! 5) Route clicks on a step's controls through
//!    [`TourController::activate`](crate::tour::TourController::activate).
//!
//! ## Minimal example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use kurbo::{Point, Rect, Size};
//! use understory_tour::config::{StepContent, TourConfig};
//! use understory_tour::render::{RenderRequest, Rendered, Renderer};
//! use understory_tour::tour::TourController;
//! use understory_tour::types::{AnchorDescriptor, Direction, Lifecycle, StepPayload};
//!
//! // A renderer that lays anchors out in a column and draws nothing.
//! struct Headless;
//!
//! impl Renderer for Headless {
//!     type Anchor = f64;
//!     type Surface = ();
//!     fn measure(&mut self, y: &f64) -> Rect { Rect::new(0.0, *y, 100.0, *y + 20.0) }
//!     fn render_step(&mut self, _: &RenderRequest<'_>) -> Rendered<()> {
//!         Rendered { surface: (), size: Size::new(200.0, 80.0) }
//!     }
//!     fn set_advance_label(&mut self, _: &(), _: &str) {}
//!     fn position(&mut self, _: &(), _: Point) {}
//!     fn show(&mut self, _: &()) {}
//!     fn hide(&mut self, _: &()) {}
//!     fn remove(&mut self, _: &()) {}
//! }
//!
//! let config = TourConfig::new()
//!     .step(1, StepContent::new("Import", "Add the library").direction(Direction::Right))
//!     .step(2, StepContent::new("Mark up", "Tag your anchors").direction(Direction::Bottom));
//!
//! let anchors = [AnchorDescriptor::new(2, 300.0), AnchorDescriptor::new(1, 100.0)];
//! let mut tour = TourController::new("docs", config, Headless, anchors).unwrap();
//!
//! let last = Rc::new(Cell::new(None));
//! let seen = Rc::clone(&last);
//! tour.on(Lifecycle::End, move |p: &StepPayload| seen.set(*p));
//!
//! tour.start().unwrap();
//! tour.next().unwrap();
//! tour.next().unwrap();
//! assert!(!tour.is_running());
//! assert_eq!(last.get(), Some(1));
//! ```
//!
//! This crate is single-threaded; it uses `std` for the emitter's panic isolation.

pub mod config;
pub mod error;
pub mod placement;
pub mod render;
pub mod step;
pub mod tour;
pub mod types;

#[cfg(test)]
mod testing;

pub use error::{ConfigError, TourError};
pub use tour::{TourBuilder, TourController, TourState};
