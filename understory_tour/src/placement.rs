// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement math: where a step goes relative to its anchor, and where to scroll.
//!
//! Both functions are pure; the renderer supplies the geometry and applies the result.
//!
//! ## Placement
//!
//! Given the anchor's bounds, the rendered step's size, and a [`Direction`], [`place`]
//! returns the step's top-left corner. The step sits beside the anchor on the named side,
//! pushed outward by the arrow, and lined up with the anchor's center on the other axis so
//! that the arrow (drawn `arrow_offset + padding_offset` in from the step's edge) points at it.
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use understory_tour::placement::{Metrics, place};
//! use understory_tour::types::Direction;
//!
//! let anchor = Rect::new(100.0, 200.0, 180.0, 240.0);
//! let step = Size::new(120.0, 60.0);
//! let at = place(anchor, step, Direction::Right, Metrics::default());
//! assert_eq!(at, Point::new(190.0, 190.0));
//! ```

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

use crate::types::Direction;

/// Default length of the step's pointer arrow.
pub const DEFAULT_ARROW_OFFSET: f64 = 10.0;
/// Default inner padding of a rendered step.
pub const DEFAULT_PADDING_OFFSET: f64 = 20.0;

/// Constants that shape placement.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Metrics {
    /// Length of the arrow between step and anchor.
    pub arrow_offset: f64,
    /// Distance from the step's edge to the start of its arrow.
    pub padding_offset: f64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            arrow_offset: DEFAULT_ARROW_OFFSET,
            padding_offset: DEFAULT_PADDING_OFFSET,
        }
    }
}

/// Top-left corner for a step of size `step` placed on `direction` of `anchor`.
pub fn place(anchor: Rect, step: Size, direction: Direction, metrics: Metrics) -> Point {
    let Metrics {
        arrow_offset: arrow,
        padding_offset: pad,
    } = metrics;
    let (x, y) = (anchor.x0, anchor.y0);
    let (w, h) = (anchor.width(), anchor.height());
    match direction {
        Direction::Right => Point::new(x + w + arrow, y + h / 2.0 - arrow - pad),
        Direction::Left => Point::new(x - step.width - arrow, y + h / 2.0 - arrow - pad),
        Direction::Top => Point::new(x + w / 2.0 - step.width + arrow + pad, y - h - step.height),
        Direction::Bottom => Point::new(x + w / 2.0 - arrow - pad, y + h + arrow),
    }
}

/// How the page scrolls when a step is shown.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollAlign {
    /// Put the anchor's top edge in the middle of the viewport.
    #[default]
    Center,
    /// Leave room above the anchor for one step's height.
    Top,
    /// Do not scroll.
    #[serde(rename = "none")]
    Disabled,
}

/// Vertical scroll offset that brings `anchor` into view, or `None` when scrolling is disabled.
pub fn scroll_target(
    anchor: Rect,
    step: Size,
    viewport_height: f64,
    align: ScrollAlign,
) -> Option<f64> {
    match align {
        ScrollAlign::Center => Some(anchor.y0 - viewport_height / 2.0),
        ScrollAlign::Top => Some(anchor.y0 - step.height),
        ScrollAlign::Disabled => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor() -> Rect {
        // 80×40 at (100, 200)
        Rect::new(100.0, 200.0, 180.0, 240.0)
    }

    const STEP: Size = Size::new(120.0, 60.0);

    #[test]
    fn place_right() {
        let p = place(anchor(), STEP, Direction::Right, Metrics::default());
        assert_eq!(p, Point::new(190.0, 190.0));
    }

    #[test]
    fn place_left() {
        let p = place(anchor(), STEP, Direction::Left, Metrics::default());
        assert_eq!(p, Point::new(-30.0, 190.0));
    }

    #[test]
    fn place_top() {
        let p = place(anchor(), STEP, Direction::Top, Metrics::default());
        assert_eq!(p, Point::new(50.0, 100.0));
    }

    #[test]
    fn place_bottom() {
        let p = place(anchor(), STEP, Direction::Bottom, Metrics::default());
        assert_eq!(p, Point::new(110.0, 250.0));
    }

    #[test]
    fn place_honors_metrics() {
        let tight = Metrics {
            arrow_offset: 0.0,
            padding_offset: 0.0,
        };
        assert_eq!(
            place(anchor(), STEP, Direction::Right, tight),
            Point::new(180.0, 220.0)
        );
        assert_eq!(
            place(anchor(), STEP, Direction::Bottom, tight),
            Point::new(140.0, 240.0)
        );
    }

    #[test]
    fn horizontal_sides_share_vertical_alignment() {
        let m = Metrics::default();
        let l = place(anchor(), STEP, Direction::Left, m);
        let r = place(anchor(), STEP, Direction::Right, m);
        assert_eq!(l.y, r.y);
        assert!(l.x + STEP.width < anchor().x0);
        assert!(r.x > anchor().x1);
    }

    #[test]
    fn scroll_targets() {
        let a = anchor();
        assert_eq!(scroll_target(a, STEP, 600.0, ScrollAlign::Center), Some(-100.0));
        assert_eq!(scroll_target(a, STEP, 600.0, ScrollAlign::Top), Some(140.0));
        assert_eq!(scroll_target(a, STEP, 600.0, ScrollAlign::Disabled), None);
    }

    #[test]
    fn scroll_align_names() {
        let v: ScrollAlign = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(v, ScrollAlign::Disabled);
        let v: ScrollAlign = serde_json::from_str("\"top\"").unwrap();
        assert_eq!(v, ScrollAlign::Top);
    }
}
