// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording renderer for unit tests.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use kurbo::{Point, Rect, Size};

use crate::render::{RenderRequest, Rendered, Renderer};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
    Measure(u32),
    Render {
        surface: u32,
        element_id: String,
        label: String,
        z_index: i32,
    },
    Label(u32, String),
    Position(u32, Point),
    Show(u32),
    Hide(u32),
    Remove(u32),
    Scroll(f64),
}

/// Anchors are `u32` ids; surfaces are numbered in render order from 0.
#[derive(Debug, Default)]
pub(crate) struct RecordingRenderer {
    pub(crate) calls: Vec<Call>,
    pub(crate) visible: BTreeSet<u32>,
    /// Surface id → declared index it was rendered for.
    pub(crate) rendered: BTreeMap<u32, i64>,
    anchors: BTreeMap<u32, Rect>,
    next_surface: u32,
}

pub(crate) const STEP_SIZE: Size = Size::new(120.0, 60.0);
pub(crate) const VIEWPORT_HEIGHT: f64 = 600.0;

impl RecordingRenderer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_anchor(&mut self, anchor: u32, bounds: Rect) {
        self.anchors.insert(anchor, bounds);
    }

    /// Surface rendered for the step with the given declared index.
    pub(crate) fn surface_of(&self, index: i64) -> Option<u32> {
        self.rendered
            .iter()
            .find(|(_, i)| **i == index)
            .map(|(s, _)| *s)
    }

    pub(crate) fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl Renderer for RecordingRenderer {
    type Anchor = u32;
    type Surface = u32;

    fn measure(&mut self, anchor: &u32) -> Rect {
        self.calls.push(Call::Measure(*anchor));
        self.anchors.get(anchor).copied().unwrap_or_else(|| {
            let y = f64::from(*anchor) * 100.0;
            Rect::new(0.0, y, 50.0, y + 20.0)
        })
    }

    fn render_step(&mut self, request: &RenderRequest<'_>) -> Rendered<u32> {
        let surface = self.next_surface;
        self.next_surface += 1;
        self.rendered.insert(surface, request.index);
        self.calls.push(Call::Render {
            surface,
            element_id: request.element_id.clone(),
            label: request.advance_label.to_string(),
            z_index: request.z_index,
        });
        Rendered {
            surface,
            size: STEP_SIZE,
        }
    }

    fn set_advance_label(&mut self, surface: &u32, label: &str) {
        self.calls.push(Call::Label(*surface, label.to_string()));
    }

    fn position(&mut self, surface: &u32, origin: Point) {
        self.calls.push(Call::Position(*surface, origin));
    }

    fn show(&mut self, surface: &u32) {
        self.visible.insert(*surface);
        self.calls.push(Call::Show(*surface));
    }

    fn hide(&mut self, surface: &u32) {
        self.visible.remove(surface);
        self.calls.push(Call::Hide(*surface));
    }

    fn remove(&mut self, surface: &u32) {
        self.visible.remove(surface);
        self.calls.push(Call::Remove(*surface));
    }

    fn viewport_height(&self) -> f64 {
        VIEWPORT_HEIGHT
    }

    fn scroll_to(&mut self, y: f64) {
        self.calls.push(Call::Scroll(y));
    }
}

/// A [`RecordingRenderer`] the test keeps a handle to after the tour takes ownership.
#[derive(Clone, Debug, Default)]
pub(crate) struct SharedRenderer(pub(crate) Rc<RefCell<RecordingRenderer>>);

impl Renderer for SharedRenderer {
    type Anchor = u32;
    type Surface = u32;

    fn measure(&mut self, anchor: &u32) -> Rect {
        self.0.borrow_mut().measure(anchor)
    }

    fn render_step(&mut self, request: &RenderRequest<'_>) -> Rendered<u32> {
        self.0.borrow_mut().render_step(request)
    }

    fn set_advance_label(&mut self, surface: &u32, label: &str) {
        self.0.borrow_mut().set_advance_label(surface, label);
    }

    fn position(&mut self, surface: &u32, origin: Point) {
        self.0.borrow_mut().position(surface, origin);
    }

    fn show(&mut self, surface: &u32) {
        self.0.borrow_mut().show(surface);
    }

    fn hide(&mut self, surface: &u32) {
        self.0.borrow_mut().hide(surface);
    }

    fn remove(&mut self, surface: &u32) {
        self.0.borrow_mut().remove(surface);
    }

    fn viewport_height(&self) -> f64 {
        self.0.borrow().viewport_height()
    }

    fn scroll_to(&mut self, y: f64) {
        self.0.borrow_mut().scroll_to(y);
    }
}
