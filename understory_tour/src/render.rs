// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering collaborator a tour drives.
//!
//! ## Overview
//!
//! A tour never measures elements or produces markup itself. It asks a [`Renderer`] to:
//!
//! - measure an anchor ([`Renderer::measure`]),
//! - build a step's surface from a [`RenderRequest`] ([`Renderer::render_step`]),
//! - move, show, hide, relabel and remove that surface,
//! - optionally scroll the page ([`Renderer::scroll_to`]).
//!
//! Implementations may animate `show`/`hide`; the tour does not wait for them.

use kurbo::{Point, Rect, Size};

use crate::config::StepContent;
use crate::types::{DeclaredIndex, Direction};

/// Everything the renderer needs to build one step's surface.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderRequest<'a> {
    /// Declared index of the step.
    pub index: DeclaredIndex,
    /// Element id to give the surface, `guide-tip-<index>`.
    pub element_id: String,
    /// Content to interpolate.
    pub content: &'a StepContent,
    /// Side of the anchor the step sits on; selects the arrow style.
    pub direction: Direction,
    /// Stacking order.
    pub z_index: i32,
    /// Label for the advance control.
    pub advance_label: &'a str,
}

impl RenderRequest<'_> {
    /// Element id for the step with declared index `index`.
    pub fn element_id_for(index: DeclaredIndex) -> String {
        format!("guide-tip-{index}")
    }
}

/// A freshly rendered step surface and its measured size.
#[derive(Clone, Debug, PartialEq)]
pub struct Rendered<S> {
    /// Handle to the surface.
    pub surface: S,
    /// Outer size of the surface.
    pub size: Size,
}

/// Measurement, markup, and visibility for tour steps.
///
/// The tour owns its renderer and calls it synchronously.
pub trait Renderer {
    /// Handle identifying an anchor element.
    type Anchor;
    /// Handle identifying a rendered step.
    type Surface;

    /// Bounds of `anchor` in page coordinates: origin is its offset, size its outer size.
    fn measure(&mut self, anchor: &Self::Anchor) -> Rect;

    /// Build a hidden surface for one step.
    fn render_step(&mut self, request: &RenderRequest<'_>) -> Rendered<Self::Surface>;

    /// Replace the label of the surface's advance control.
    fn set_advance_label(&mut self, surface: &Self::Surface, label: &str);

    /// Move the surface's top-left corner to `origin`.
    fn position(&mut self, surface: &Self::Surface, origin: Point);

    /// Make the surface visible.
    fn show(&mut self, surface: &Self::Surface);

    /// Hide the surface.
    fn hide(&mut self, surface: &Self::Surface);

    /// Detach the surface and its controls for good.
    fn remove(&mut self, surface: &Self::Surface);

    /// Height of the visible page area. Used for centered scrolling.
    fn viewport_height(&self) -> f64 {
        0.0
    }

    /// Scroll the page so that `y` is at the top of the viewport.
    fn scroll_to(&mut self, y: f64) {
        let _ = y;
    }
}
