// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A three-step tour driven against a console "page".
//!
//! Anchors are discovered out of order from attribute strings, content comes from
//! JSON, and clicks on the step controls are simulated through `activate`.
//!
//! Run:
//! - `cargo run -p understory_demos --example tour_console`
//! - `RUST_LOG=understory_tour=debug cargo run -p understory_demos --example tour_console`

use kurbo::{Point, Rect, Size};
use understory_tour::TourController;
use understory_tour::config::TourConfig;
use understory_tour::render::{RenderRequest, Rendered, Renderer};
use understory_tour::types::{Affordance, AnchorDescriptor, Lifecycle, StepPayload};

const CONFIG: &str = r#"{
    "1": { "title": "1. Import", "text": "Require the tour library", "direction": "left" },
    "2": { "title": "2. Prepare", "text": "Mark up anchors and write the copy" },
    "3": { "title": "3. Use", "text": "Follow the interface docs below" },
    "options": { "finish_label": "Finish" }
}"#;

/// Elements on a pretend page, keyed by id.
struct ConsolePage {
    elements: Vec<(&'static str, Rect)>,
    surfaces: Vec<String>,
}

impl Renderer for ConsolePage {
    type Anchor = &'static str;
    type Surface = usize;

    fn measure(&mut self, anchor: &&'static str) -> Rect {
        self.elements
            .iter()
            .find(|(id, _)| id == anchor)
            .map_or(Rect::ZERO, |(_, r)| *r)
    }

    fn render_step(&mut self, request: &RenderRequest<'_>) -> Rendered<usize> {
        println!(
            "  render #{} [{}] \"{}\" ({})",
            request.element_id, request.direction, request.content.title, request.advance_label
        );
        self.surfaces.push(request.content.title.clone());
        Rendered {
            surface: self.surfaces.len() - 1,
            size: Size::new(240.0, 90.0),
        }
    }

    fn set_advance_label(&mut self, surface: &usize, label: &str) {
        println!("  relabel \"{}\" -> {label}", self.surfaces[*surface]);
    }

    fn position(&mut self, surface: &usize, origin: Point) {
        println!("  move \"{}\" to ({}, {})", self.surfaces[*surface], origin.x, origin.y);
    }

    fn show(&mut self, surface: &usize) {
        println!("  show \"{}\"", self.surfaces[*surface]);
    }

    fn hide(&mut self, surface: &usize) {
        println!("  hide \"{}\"", self.surfaces[*surface]);
    }

    fn remove(&mut self, surface: &usize) {
        println!("  remove \"{}\"", self.surfaces[*surface]);
    }

    fn viewport_height(&self) -> f64 {
        768.0
    }

    fn scroll_to(&mut self, y: f64) {
        println!("  scroll to {y}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let page = ConsolePage {
        elements: vec![
            ("usage", Rect::new(40.0, 900.0, 400.0, 940.0)),
            ("import", Rect::new(300.0, 120.0, 520.0, 150.0)),
            ("prepare", Rect::new(40.0, 480.0, 300.0, 520.0)),
        ],
        surfaces: Vec::new(),
    };

    // (tip-index, tip-direction, element) as a host would read them from markup.
    let discovered = [
        ("3", Some("top"), "usage"),
        ("1", None, "import"),
        ("2", Some("right"), "prepare"),
    ];
    let anchors = discovered
        .into_iter()
        .map(|(index, direction, id)| AnchorDescriptor::from_attributes(index, direction, id))
        .collect::<Result<Vec<_>, _>>()?;

    println!("== Build ==");
    let config = TourConfig::from_json(CONFIG)?;
    let mut tour = TourController::new("console-demo", config, page, anchors)?;

    for channel in Lifecycle::ALL {
        tour.on(channel, move |p: &StepPayload| println!("  <{channel}> {p:?}"));
    }

    println!("== Start ==");
    tour.start()?;
    println!("== Click next ==");
    tour.activate(0, Affordance::Advance)?;
    println!("== Back ==");
    tour.prev()?;
    println!("== Click next twice ==");
    tour.activate(0, Affordance::Advance)?;
    tour.activate(1, Affordance::Advance)?;
    println!("== Finish ==");
    tour.activate(2, Affordance::Advance)?;
    println!("== Destroy ==");
    tour.destroy();
    Ok(())
}
