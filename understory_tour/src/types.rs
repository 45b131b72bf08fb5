// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for tours: placement directions, lifecycle channels, anchors, and commands.
//!
//! ## Overview
//!
//! These types are shared by [`step`](crate::step) and [`tour`](crate::tour) and are what a
//! host constructs or matches on. Nothing here talks to the renderer.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Payload carried by every lifecycle event.
///
/// `Some(position)` for `start`, `showTip`, `hideTip` and `end`; `None` for `destroy`.
pub type StepPayload = Option<usize>;

/// Declared position of a step, as written on its anchor.
///
/// Declared indices are not required to be contiguous or to start at any particular
/// value; they only define the navigation order.
pub type DeclaredIndex = i64;

/// Side of the anchor a step is placed on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Direction {
    /// Above the anchor.
    Top,
    /// Below the anchor.
    Bottom,
    /// Left of the anchor.
    Left,
    /// Right of the anchor.
    Right,
}

impl Direction {
    /// Lowercase name, as used in markup and configuration.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(ConfigError::UnknownDirection(other.to_string())),
        }
    }
}

impl TryFrom<String> for Direction {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Direction> for &'static str {
    fn from(d: Direction) -> Self {
        d.as_str()
    }
}

/// Channels a tour emits on.
///
/// Implements `AsRef<str>` so it can be passed anywhere a channel name is expected.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// The tour started; payload `Some(0)`.
    Start,
    /// A step is about to be shown; payload is its position.
    ShowTip,
    /// A step is about to be hidden; payload is its position.
    HideTip,
    /// The tour ended; payload is the last position the user reached.
    End,
    /// The tour was destroyed; payload `None`.
    Destroy,
}

impl Lifecycle {
    /// Every lifecycle channel, in the order a full tour emits them first.
    pub const ALL: [Self; 5] = [
        Self::Start,
        Self::ShowTip,
        Self::HideTip,
        Self::End,
        Self::Destroy,
    ];

    /// Channel name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::ShowTip => "showTip",
            Self::HideTip => "hideTip",
            Self::End => "end",
            Self::Destroy => "destroy",
        }
    }
}

impl AsRef<str> for Lifecycle {
    fn as_ref(&self) -> &str {
        self.name()
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Clickable control rendered inside a step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Affordance {
    /// "Next" (or the finish label on the last step).
    Advance,
    /// Close button.
    Close,
}

/// Navigation command posted to a [`TourController`](crate::tour::TourController).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Advance to the next step, ending the tour after the last one.
    Next,
    /// Go back one step.
    Prev,
    /// End the tour at the current step.
    End,
}

/// A page element the tour points at, as discovered by the host.
///
/// Discovery (finding candidate elements and reading their attributes) is the host's job.
#[derive(Clone, Debug, PartialEq)]
pub struct AnchorDescriptor<A> {
    /// Declared index; selects the configuration entry and the navigation order.
    pub index: DeclaredIndex,
    /// Placement declared on the element. Overrides the configuration when present.
    pub direction: Option<Direction>,
    /// Opaque handle passed back to the renderer for measurement.
    pub handle: A,
}

impl<A> AnchorDescriptor<A> {
    /// Create a descriptor without a declared direction.
    pub fn new(index: DeclaredIndex, handle: A) -> Self {
        Self {
            index,
            direction: None,
            handle,
        }
    }

    /// Set the declared direction.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Build a descriptor from raw attribute values such as `tip-index="2"` and
    /// `tip-direction="right"`.
    pub fn from_attributes(
        index: &str,
        direction: Option<&str>,
        handle: A,
    ) -> Result<Self, ConfigError> {
        let index = parse_index(index)?;
        let direction = direction.map(str::parse).transpose()?;
        Ok(Self {
            index,
            direction,
            handle,
        })
    }
}

/// Parse a declared index written as text. Surrounding whitespace is ignored.
pub fn parse_index(raw: &str) -> Result<DeclaredIndex, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidIndex(raw.to_string()))
}
