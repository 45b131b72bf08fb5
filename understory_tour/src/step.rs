// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single stop in a tour.
//!
//! A [`Step`] pairs one anchor with its content and rendered surface. It keeps the
//! geometry the renderer reported and a small set of [`StepFlags`], and holds no
//! navigation state: its controls resolve to [`Command`]s that the owning
//! [`TourController`](crate::tour::TourController) executes.

use core::fmt;

use kurbo::{Point, Rect, Size};

use crate::config::{StepContent, TourOptions};
use crate::placement::{Metrics, place};
use crate::render::{RenderRequest, Renderer};
use crate::types::{Affordance, Command, DeclaredIndex, Direction};

bitflags::bitflags! {
    /// Step state flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct StepFlags: u8 {
        /// The surface is currently shown.
        const VISIBLE  = 0b0000_0001;
        /// The surface exists and its controls are live.
        const ATTACHED = 0b0000_0010;
    }
}

impl Default for StepFlags {
    fn default() -> Self {
        Self::ATTACHED
    }
}

/// One stop in a tour, bound to one anchor and one placement direction.
pub struct Step<R: Renderer> {
    index: DeclaredIndex,
    direction: Direction,
    content: StepContent,
    anchor: R::Anchor,
    surface: R::Surface,
    size: Size,
    // Measured on first show.
    anchor_bounds: Option<Rect>,
    flags: StepFlags,
}

impl<R: Renderer> fmt::Debug for Step<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("index", &self.index)
            .field("direction", &self.direction)
            .field("title", &self.content.title)
            .field("size", &self.size)
            .field("anchor_bounds", &self.anchor_bounds)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

impl<R: Renderer> Step<R> {
    /// Render a hidden surface for this step.
    pub(crate) fn new(
        renderer: &mut R,
        index: DeclaredIndex,
        anchor: R::Anchor,
        content: StepContent,
        direction: Direction,
        options: &TourOptions,
    ) -> Self {
        let rendered = renderer.render_step(&RenderRequest {
            index,
            element_id: RenderRequest::element_id_for(index),
            content: &content,
            direction,
            z_index: options.z_index,
            advance_label: &options.next_label,
        });
        Self {
            index,
            direction,
            content,
            anchor,
            surface: rendered.surface,
            size: rendered.size,
            anchor_bounds: None,
            flags: StepFlags::default(),
        }
    }

    /// Declared index.
    pub fn index(&self) -> DeclaredIndex {
        self.index
    }

    /// Placement direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Content payload.
    pub fn content(&self) -> &StepContent {
        &self.content
    }

    /// Anchor handle.
    pub fn anchor(&self) -> &R::Anchor {
        &self.anchor
    }

    /// Rendered surface handle.
    pub fn surface(&self) -> &R::Surface {
        &self.surface
    }

    /// Rendered size of the surface.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Cached anchor bounds, if measured.
    pub fn anchor_bounds(&self) -> Option<Rect> {
        self.anchor_bounds
    }

    /// Current flags.
    pub fn flags(&self) -> StepFlags {
        self.flags
    }

    /// Returns `true` while the surface is shown.
    pub fn is_visible(&self) -> bool {
        self.flags.contains(StepFlags::VISIBLE)
    }

    /// Returns `false` once the step has been destroyed.
    pub fn is_attached(&self) -> bool {
        self.flags.contains(StepFlags::ATTACHED)
    }

    /// Command a click on `affordance` stands for, or `None` once destroyed.
    pub fn command_for(&self, affordance: Affordance) -> Option<Command> {
        if !self.is_attached() {
            return None;
        }
        Some(match affordance {
            Affordance::Advance => Command::Next,
            Affordance::Close => Command::End,
        })
    }

    /// Anchor bounds, measuring and caching them on first use.
    pub(crate) fn bounds(&mut self, renderer: &mut R) -> Rect {
        match self.anchor_bounds {
            Some(b) => b,
            None => {
                let b = renderer.measure(&self.anchor);
                self.anchor_bounds = Some(b);
                b
            }
        }
    }

    /// Forget the cached anchor bounds so the next show measures again.
    pub fn invalidate_geometry(&mut self) {
        self.anchor_bounds = None;
    }

    /// Where this step goes with the given metrics.
    pub(crate) fn origin(&mut self, renderer: &mut R, metrics: Metrics) -> Point {
        let bounds = self.bounds(renderer);
        place(bounds, self.size, self.direction, metrics)
    }

    /// Position and show the surface.
    ///
    /// Showing an already visible step repositions and re-shows it.
    pub(crate) fn show(&mut self, renderer: &mut R, metrics: Metrics) {
        if !self.is_attached() {
            return;
        }
        self.flags.insert(StepFlags::VISIBLE);
        let origin = self.origin(renderer, metrics);
        renderer.position(&self.surface, origin);
        renderer.show(&self.surface);
    }

    /// Hide the surface.
    pub(crate) fn hide(&mut self, renderer: &mut R) {
        if !self.is_attached() {
            return;
        }
        self.flags.remove(StepFlags::VISIBLE);
        renderer.hide(&self.surface);
    }

    pub(crate) fn set_advance_label(&mut self, renderer: &mut R, label: &str) {
        if self.is_attached() {
            renderer.set_advance_label(&self.surface, label);
        }
    }

    /// Remove the surface and disable its controls. Irreversible.
    pub(crate) fn destroy(&mut self, renderer: &mut R) {
        if !self.is_attached() {
            return;
        }
        self.flags = StepFlags::empty();
        renderer.remove(&self.surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, RecordingRenderer};

    fn step(r: &mut RecordingRenderer) -> Step<RecordingRenderer> {
        r.set_anchor(1, Rect::new(100.0, 200.0, 180.0, 240.0));
        Step::new(
            r,
            4,
            1,
            StepContent::new("t", "x"),
            Direction::Right,
            &TourOptions::default(),
        )
    }

    #[test]
    fn new_renders_hidden_surface() {
        let mut r = RecordingRenderer::new();
        let s = step(&mut r);
        assert!(!s.is_visible());
        assert!(s.is_attached());
        assert_eq!(s.anchor_bounds(), None);
        assert_eq!(
            r.calls,
            vec![Call::Render {
                surface: 0,
                element_id: "guide-tip-4".into(),
                label: "Next".into(),
                z_index: 100,
            }]
        );
    }

    #[test]
    fn show_measures_once_and_positions() {
        let mut r = RecordingRenderer::new();
        let mut s = step(&mut r);
        r.calls.clear();

        s.show(&mut r, Metrics::default());
        s.hide(&mut r);
        s.show(&mut r, Metrics::default());

        let origin = Point::new(190.0, 190.0);
        assert_eq!(
            r.calls,
            vec![
                Call::Measure(1),
                Call::Position(0, origin),
                Call::Show(0),
                Call::Hide(0),
                Call::Position(0, origin),
                Call::Show(0),
            ]
        );
        assert!(s.is_visible());
    }

    #[test]
    fn invalidate_geometry_remeasures() {
        let mut r = RecordingRenderer::new();
        let mut s = step(&mut r);
        s.show(&mut r, Metrics::default());
        r.set_anchor(1, Rect::new(0.0, 0.0, 10.0, 10.0));
        s.invalidate_geometry();
        r.calls.clear();
        s.show(&mut r, Metrics::default());
        assert_eq!(r.calls[0], Call::Measure(1));
        assert_eq!(s.anchor_bounds(), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn affordances_map_to_commands() {
        let mut r = RecordingRenderer::new();
        let s = step(&mut r);
        assert_eq!(s.command_for(Affordance::Advance), Some(Command::Next));
        assert_eq!(s.command_for(Affordance::Close), Some(Command::End));
    }

    #[test]
    fn destroy_detaches_everything() {
        let mut r = RecordingRenderer::new();
        let mut s = step(&mut r);
        s.show(&mut r, Metrics::default());
        r.calls.clear();

        s.destroy(&mut r);
        s.destroy(&mut r);
        s.show(&mut r, Metrics::default());

        assert_eq!(r.calls, vec![Call::Remove(0)]);
        assert!(!s.is_visible());
        assert!(!s.is_attached());
        assert_eq!(s.command_for(Affordance::Advance), None);
    }
}
