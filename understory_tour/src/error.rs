// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for tour construction and navigation.

use crate::types::DeclaredIndex;

/// A tour cannot be built from the given configuration and anchors.
///
/// Raised at construction (or while parsing anchor attributes) so that a
/// misconfigured tour fails before anything is shown.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A direction string is not one of `top`, `bottom`, `left`, `right`.
    #[error("unknown direction `{0}`; expected top, bottom, left or right")]
    UnknownDirection(String),
    /// A declared index is not an integer.
    #[error("declared step index `{0}` is not an integer")]
    InvalidIndex(String),
    /// An anchor declares an index with no configuration entry.
    #[error("no configuration entry for step {0}")]
    MissingContent(DeclaredIndex),
    /// Two anchors declare the same index.
    #[error("step {0} is declared by more than one anchor")]
    DuplicateIndex(DeclaredIndex),
    /// Neither the anchor nor the configuration gives a direction.
    #[error("step {0} has no direction on its anchor or in its configuration")]
    MissingDirection(DeclaredIndex),
    /// No anchors were supplied.
    #[error("tour has no steps")]
    NoSteps,
    /// The JSON configuration is malformed.
    #[error("invalid tour configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// A navigation call was made in a state that does not allow it.
#[derive(Debug, thiserror::Error)]
pub enum TourError {
    /// Navigation was attempted while the tour is idle.
    #[error("tour `{tour}` is not running")]
    NotRunning {
        /// Tour name.
        tour: String,
    },
    /// The tour was destroyed and cannot be used again.
    #[error("tour `{tour}` has been destroyed")]
    Destroyed {
        /// Tour name.
        tour: String,
    },
    /// A step position outside `0..step_count` was addressed.
    #[error("tour `{tour}` has no step at position {position}")]
    UnknownStep {
        /// Tour name.
        tour: String,
        /// Requested position.
        position: usize,
    },
    /// Construction failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
