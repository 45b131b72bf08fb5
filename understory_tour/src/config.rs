// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tour configuration: per-step content and tour-wide options.
//!
//! ## JSON form
//!
//! [`TourConfig::from_json`] accepts the map hosts already write by hand. Keys are
//! declared step indices (as strings or numbers); the reserved key `options` holds
//! [`TourOptions`]:
//!
//! ```
//! use understory_tour::config::TourConfig;
//! use understory_tour::types::Direction;
//!
//! let config = TourConfig::from_json(r#"{
//!     "1": { "title": "Import", "text": "Pull in the library", "direction": "left" },
//!     "2": { "title": "Prepare", "text": "Mark up your anchors", "badge": "new" },
//!     "options": { "finish_label": "Got it", "scroll": "top" }
//! }"#).unwrap();
//!
//! assert_eq!(config.steps.len(), 2);
//! assert_eq!(config.steps[&1].direction, Some(Direction::Left));
//! assert_eq!(config.steps[&2].extra["badge"], "new");
//! assert_eq!(config.options.finish_label, "Got it");
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::placement::{DEFAULT_ARROW_OFFSET, DEFAULT_PADDING_OFFSET, Metrics, ScrollAlign};
use crate::types::{DeclaredIndex, Direction, parse_index};

/// Reserved key holding [`TourOptions`] in the JSON form.
pub const OPTIONS_KEY: &str = "options";

/// Content and placement for one step.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StepContent {
    /// Heading text.
    #[serde(default)]
    pub title: String,
    /// Body text.
    #[serde(default)]
    pub text: String,
    /// Placement used when the anchor does not declare one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    /// Any other fields, passed through to the renderer untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl StepContent {
    /// Create content with a title and body.
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    /// Set the fallback direction.
    #[must_use]
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Add a custom field.
    #[must_use]
    pub fn field(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Tour-wide presentation options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TourOptions {
    /// Label of the advance control on every step but the last.
    pub next_label: String,
    /// Label of the advance control on the last step.
    pub finish_label: String,
    /// Stacking order requested for rendered steps.
    pub z_index: i32,
    /// Length of the step's pointer arrow.
    pub arrow_offset: f64,
    /// Inner padding of a rendered step.
    pub padding_offset: f64,
    /// How to scroll when a step is shown.
    pub scroll: ScrollAlign,
}

impl Default for TourOptions {
    fn default() -> Self {
        Self {
            next_label: "Next".to_string(),
            finish_label: "Done".to_string(),
            z_index: 100,
            arrow_offset: DEFAULT_ARROW_OFFSET,
            padding_offset: DEFAULT_PADDING_OFFSET,
            scroll: ScrollAlign::Center,
        }
    }
}

impl TourOptions {
    /// Placement constants derived from these options.
    pub fn metrics(&self) -> Metrics {
        Metrics {
            arrow_offset: self.arrow_offset,
            padding_offset: self.padding_offset,
        }
    }
}

/// Everything a tour needs besides its anchors and renderer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TourConfig {
    /// Content keyed by declared index.
    pub steps: BTreeMap<DeclaredIndex, StepContent>,
    /// Tour-wide options.
    pub options: TourOptions,
}

impl TourConfig {
    /// Create an empty configuration with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the content for `index`.
    #[must_use]
    pub fn step(mut self, index: DeclaredIndex, content: StepContent) -> Self {
        self.steps.insert(index, content);
        self
    }

    /// Replace the options.
    #[must_use]
    pub fn options(mut self, options: TourOptions) -> Self {
        self.options = options;
        self
    }

    /// Parse the JSON map form described in the [module docs](self).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        Self::from_map(raw)
    }

    /// Build from an already-parsed JSON object.
    pub fn from_map(raw: serde_json::Map<String, serde_json::Value>) -> Result<Self, ConfigError> {
        let mut config = Self::new();
        for (key, value) in raw {
            if key == OPTIONS_KEY {
                config.options = serde_json::from_value(value)?;
                continue;
            }
            let index = parse_index(&key)?;
            let content: StepContent = serde_json::from_value(value)?;
            config.steps.insert(index, content);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_presentation() {
        let o = TourOptions::default();
        assert_eq!(o.next_label, "Next");
        assert_eq!(o.finish_label, "Done");
        assert_eq!(o.z_index, 100);
        assert_eq!(o.metrics(), Metrics::default());
        assert_eq!(o.scroll, ScrollAlign::Center);
    }

    #[test]
    fn from_json_parses_steps_and_options() {
        let c = TourConfig::from_json(
            r#"{
                "3": { "title": "c", "text": "three" },
                "1": { "title": "a", "text": "one", "direction": "bottom" },
                "options": { "z_index": 7, "arrow_offset": 4.0 }
            }"#,
        )
        .unwrap();
        assert_eq!(c.steps.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(c.steps[&1].direction, Some(Direction::Bottom));
        assert_eq!(c.steps[&3].direction, None);
        assert_eq!(c.options.z_index, 7);
        assert_eq!(c.options.arrow_offset, 4.0);
        // Unspecified options keep their defaults.
        assert_eq!(c.options.padding_offset, DEFAULT_PADDING_OFFSET);
        assert_eq!(c.options.finish_label, "Done");
    }

    #[test]
    fn from_json_keeps_custom_fields() {
        let c = TourConfig::from_json(r#"{ "1": { "title": "a", "text": "b", "image": "x.png" } }"#)
            .unwrap();
        assert_eq!(c.steps[&1].extra.get("image"), Some(&serde_json::json!("x.png")));
    }

    #[test]
    fn from_json_rejects_non_integer_keys() {
        let err = TourConfig::from_json(r#"{ "first": { "title": "a", "text": "b" } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidIndex(ref k) if k == "first"));
    }

    #[test]
    fn from_json_rejects_unknown_direction() {
        let err = TourConfig::from_json(r#"{ "1": { "title": "a", "text": "b", "direction": "up" } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        assert!(err.to_string().contains("unknown direction `up`"));
    }

    #[test]
    fn from_json_rejects_malformed_input() {
        assert!(matches!(
            TourConfig::from_json("[1, 2]"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn builder_methods_compose() {
        let c = TourConfig::new()
            .step(2, StepContent::new("b", "two").direction(Direction::Top))
            .step(1, StepContent::new("a", "one").field("badge", "new"));
        assert_eq!(c.steps.len(), 2);
        assert_eq!(c.steps[&1].extra["badge"], "new");
        assert_eq!(c.steps[&2].direction, Some(Direction::Top));
    }

    #[test]
    fn step_content_serializes_direction_as_name() {
        let s = serde_json::to_value(StepContent::new("a", "b").direction(Direction::Right)).unwrap();
        assert_eq!(s["direction"], "right");
        let none = serde_json::to_value(StepContent::new("a", "b")).unwrap();
        assert!(none.get("direction").is_none());
    }
}
