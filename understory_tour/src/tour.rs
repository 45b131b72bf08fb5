// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tour controller: step ordering, the navigation state machine, and lifecycle events.
//!
//! ## States
//!
//! - **Idle**: not running, no cursor. Initial state, and the state after [`TourController::end`].
//! - **Running**: the cursor is in `0..step_count` and the step at the cursor is the one shown.
//!
//! [`TourController::destroy`] ends the tour, emits `destroy`, removes every step, and clears
//! the emitter. A destroyed tour refuses to start again.
//!
//! ## Events
//!
//! | Channel   | When                                   | Payload            |
//! |-----------|----------------------------------------|--------------------|
//! | `start`   | [`start`](TourController::start)       | `Some(0)`          |
//! | `showTip` | before a step is shown                 | `Some(cursor)`     |
//! | `hideTip` | before a visible step is hidden        | `Some(cursor)`     |
//! | `end`     | [`end`](TourController::end), or `next` past the last step | `Some(last reached)` |
//! | `destroy` | [`destroy`](TourController::destroy)   | `None`             |
//!
//! Handlers run synchronously, in registration order, before the call that emitted them returns.

use core::fmt;
use std::collections::BTreeSet;

use understory_emitter::{Delivery, Emitter, HandlerId};

use crate::config::{TourConfig, TourOptions};
use crate::error::{ConfigError, TourError};
use crate::placement::scroll_target;
use crate::render::Renderer;
use crate::step::Step;
use crate::types::{Affordance, AnchorDescriptor, Command, Lifecycle, StepPayload};

/// Name used when none is given.
pub const UNTITLED: &str = "untitled";

/// Navigation state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TourState {
    /// Not running.
    Idle,
    /// Running with the given step position shown.
    Running {
        /// Zero-based position into the ordered steps.
        cursor: usize,
    },
}

type InitHook<R> = Box<dyn FnOnce(&mut TourController<R>)>;

/// Configures and builds a [`TourController`].
pub struct TourBuilder<R: Renderer> {
    name: String,
    config: TourConfig,
    init: Option<InitHook<R>>,
}

impl<R: Renderer> fmt::Debug for TourBuilder<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TourBuilder")
            .field("name", &self.name)
            .field("steps", &self.config.steps.len())
            .field("init_hook", &self.init.is_some())
            .finish_non_exhaustive()
    }
}

impl<R: Renderer> TourBuilder<R> {
    /// Start from a configuration. The tour is named `"untitled"` unless renamed.
    pub fn new(config: TourConfig) -> Self {
        Self {
            name: UNTITLED.to_string(),
            config,
            init: None,
        }
    }

    /// Name the tour. The name appears in logs and errors.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Run `hook` once, after the steps and emitter exist, at the end of [`build`](Self::build).
    ///
    /// Useful for host-specific wiring such as subscribing to lifecycle channels.
    ///
    /// The hook only borrows the controller for the duration of the call. To act on the
    /// tour later from a host event (for example, destroying it when the page navigates),
    /// keep the built controller in an `Rc<RefCell<_>>` and have the host's own event
    /// source hold a `Weak` to it. Do not borrow the controller from inside one of its
    /// lifecycle handlers: it is already mutably borrowed while it emits.
    ///
    /// ```
    /// use std::cell::RefCell;
    /// use std::rc::Rc;
    ///
    /// use kurbo::{Point, Rect, Size};
    /// use understory_emitter::Emitter;
    /// use understory_tour::config::{StepContent, TourConfig};
    /// use understory_tour::render::{RenderRequest, Rendered, Renderer};
    /// use understory_tour::tour::{TourBuilder, TourController};
    /// use understory_tour::types::{AnchorDescriptor, Direction};
    ///
    /// struct Headless;
    ///
    /// impl Renderer for Headless {
    ///     type Anchor = ();
    ///     type Surface = ();
    ///     fn measure(&mut self, _: &()) -> Rect { Rect::ZERO }
    ///     fn render_step(&mut self, _: &RenderRequest<'_>) -> Rendered<()> {
    ///         Rendered { surface: (), size: Size::ZERO }
    ///     }
    ///     fn set_advance_label(&mut self, _: &(), _: &str) {}
    ///     fn position(&mut self, _: &(), _: Point) {}
    ///     fn show(&mut self, _: &()) {}
    ///     fn hide(&mut self, _: &()) {}
    ///     fn remove(&mut self, _: &()) {}
    /// }
    ///
    /// let config = TourConfig::new().step(1, StepContent::new("Hi", "").direction(Direction::Top));
    /// let tour = TourBuilder::new(config)
    ///     .init_hook(|t: &mut TourController<Headless>| { t.start().ok(); })
    ///     .build(Headless, [AnchorDescriptor::new(1, ())])
    ///     .unwrap();
    /// let tour = Rc::new(RefCell::new(tour));
    ///
    /// // The host's navigation events.
    /// let page: Emitter<()> = Emitter::new("page");
    /// let weak = Rc::downgrade(&tour);
    /// page.on("hashchange", move |_: &()| {
    ///     if let Some(tour) = weak.upgrade() {
    ///         tour.borrow_mut().destroy();
    ///     }
    /// });
    ///
    /// let _ = page.trigger("hashchange", &());
    /// assert!(tour.borrow().is_destroyed());
    /// ```
    #[must_use]
    pub fn init_hook(mut self, hook: impl FnOnce(&mut TourController<R>) + 'static) -> Self {
        self.init = Some(Box::new(hook));
        self
    }

    /// Build one step per anchor, sort them by declared index, and run the init hook.
    ///
    /// Fails if an anchor has no configuration entry or no resolvable direction, if two
    /// anchors declare the same index, or if there are no anchors at all.
    pub fn build(
        self,
        mut renderer: R,
        anchors: impl IntoIterator<Item = AnchorDescriptor<R::Anchor>>,
    ) -> Result<TourController<R>, TourError> {
        let Self { name, config, init } = self;
        let steps = build_steps(&name, &mut renderer, &config, anchors)?;
        let mut tour = TourController {
            emitter: Emitter::new(name.clone()),
            name,
            steps,
            state: TourState::Idle,
            destroyed: false,
            options: config.options,
            renderer,
        };
        tracing::debug!(tour = %tour.name, steps = tour.steps.len(), "tour built");
        if let Some(hook) = init {
            hook(&mut tour);
        }
        Ok(tour)
    }
}

fn build_steps<R: Renderer>(
    name: &str,
    renderer: &mut R,
    config: &TourConfig,
    anchors: impl IntoIterator<Item = AnchorDescriptor<R::Anchor>>,
) -> Result<Vec<Step<R>>, ConfigError> {
    // Nothing is rendered until every anchor resolves.
    let mut seen = BTreeSet::new();
    let mut resolved = Vec::new();
    for anchor in anchors {
        let index = anchor.index;
        if !seen.insert(index) {
            return Err(ConfigError::DuplicateIndex(index));
        }
        let content = config
            .steps
            .get(&index)
            .ok_or(ConfigError::MissingContent(index))?;
        let direction = anchor
            .direction
            .or(content.direction)
            .ok_or(ConfigError::MissingDirection(index))?;
        resolved.push((index, anchor.handle, content, direction));
    }
    if resolved.is_empty() {
        return Err(ConfigError::NoSteps);
    }

    let mut steps: Vec<Step<R>> = resolved
        .into_iter()
        .map(|(index, handle, content, direction)| {
            Step::new(
                renderer,
                index,
                handle,
                content.clone(),
                direction,
                &config.options,
            )
        })
        .collect();

    // Navigation order follows declared indices, not discovery order.
    steps.sort_by_key(Step::index);
    if let Some(last) = steps.last_mut() {
        last.set_advance_label(renderer, &config.options.finish_label);
    }

    for index in config.steps.keys().filter(|i| !seen.contains(*i)) {
        tracing::warn!(tour = name, index, "configured step has no anchor; ignoring");
    }
    Ok(steps)
}

/// Drives a product tour over an ordered list of [`Step`]s.
///
/// ## Usage
///
/// - Build with [`TourBuilder`] (or [`TourController::new`]) from a [`TourConfig`], a
///   [`Renderer`], and the anchors the host discovered.
/// - Subscribe with [`on`](Self::on) to the [`Lifecycle`] channels.
/// - Navigate with [`start`](Self::start), [`next`](Self::next), [`prev`](Self::prev),
///   [`end`](Self::end); route clicks on step controls through [`activate`](Self::activate).
/// - Tear down with [`destroy`](Self::destroy).
pub struct TourController<R: Renderer> {
    name: String,
    steps: Vec<Step<R>>,
    state: TourState,
    destroyed: bool,
    emitter: Emitter<StepPayload>,
    options: TourOptions,
    renderer: R,
}

impl<R: Renderer> fmt::Debug for TourController<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TourController")
            .field("name", &self.name)
            .field("state", &self.state)
            .field("destroyed", &self.destroyed)
            .field("steps", &self.steps)
            .field("emitter", &self.emitter)
            .finish_non_exhaustive()
    }
}

impl<R: Renderer> TourController<R> {
    /// Shorthand for `TourBuilder::new(config).name(name).build(renderer, anchors)`.
    pub fn new(
        name: impl Into<String>,
        config: TourConfig,
        renderer: R,
        anchors: impl IntoIterator<Item = AnchorDescriptor<R::Anchor>>,
    ) -> Result<Self, TourError> {
        TourBuilder::new(config).name(name).build(renderer, anchors)
    }

    /// Tour name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current navigation state.
    pub fn state(&self) -> TourState {
        self.state
    }

    /// Returns `true` while running.
    pub fn is_running(&self) -> bool {
        matches!(self.state, TourState::Running { .. })
    }

    /// Returns `true` after [`destroy`](Self::destroy).
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Position of the shown step, or `None` when idle.
    pub fn cursor(&self) -> Option<usize> {
        match self.state {
            TourState::Running { cursor } => Some(cursor),
            TourState::Idle => None,
        }
    }

    /// Number of steps. Zero after [`destroy`](Self::destroy).
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Steps in navigation order.
    pub fn steps(&self) -> &[Step<R>] {
        &self.steps
    }

    /// The step at the cursor, if running.
    pub fn current_step(&self) -> Option<&Step<R>> {
        self.cursor().and_then(|c| self.steps.get(c))
    }

    /// Tour-wide options.
    pub fn options(&self) -> &TourOptions {
        &self.options
    }

    /// The renderer this tour drives.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable access to the renderer.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// The lifecycle emitter.
    pub fn emitter(&self) -> &Emitter<StepPayload> {
        &self.emitter
    }

    /// Subscribe `handler` to `channel`. See [`Emitter::on`].
    pub fn on<F>(&self, channel: impl AsRef<str>, handler: F) -> HandlerId
    where
        F: Fn(&StepPayload) + 'static,
    {
        self.emitter.on(channel, handler)
    }

    /// Remove every handler on every channel. See [`Emitter::clear`].
    pub fn off_all(&self) {
        self.emitter.clear();
    }

    /// Remove every handler on `channel`. See [`Emitter::off_channel`].
    pub fn off_channel(&self, channel: impl AsRef<str>) -> usize {
        self.emitter.off_channel(channel)
    }

    /// Remove the handler identified by `id`. See [`Emitter::off`].
    pub fn off(&self, id: &HandlerId) -> bool {
        self.emitter.off(id)
    }

    /// Remove the handler identified by `id` from `channel` only. See [`Emitter::off_in`].
    pub fn off_in(&self, channel: impl AsRef<str>, id: &HandlerId) -> bool {
        self.emitter.off_in(channel, id)
    }

    /// Run every handler on `channel` with `payload`. See [`Emitter::trigger`].
    pub fn trigger(&self, channel: impl AsRef<str>, payload: StepPayload) -> Delivery {
        self.emitter.trigger(channel, &payload)
    }

    /// Start at the first step. No-op if already running.
    pub fn start(&mut self) -> Result<(), TourError> {
        if self.destroyed {
            return Err(self.destroyed_error());
        }
        if self.is_running() {
            return Ok(());
        }
        self.state = TourState::Running { cursor: 0 };
        tracing::debug!(tour = %self.name, steps = self.steps.len(), "tour started");
        self.emit(Lifecycle::Start, Some(0));
        self.show_tip()
    }

    /// Hide the current step and show the next one, or end the tour after the last step.
    pub fn next(&mut self) -> Result<(), TourError> {
        let cursor = self.running_cursor()?;
        self.hide_tip();
        let next = cursor + 1;
        tracing::debug!(tour = %self.name, from = cursor, to = next, "next");
        if next < self.steps.len() {
            self.state = TourState::Running { cursor: next };
            self.show_tip()
        } else {
            self.finish(next);
            Ok(())
        }
    }

    /// Hide the current step and show the previous one.
    ///
    /// At the first step this does nothing: the step stays shown, the tour keeps running,
    /// and no event is emitted.
    pub fn prev(&mut self) -> Result<(), TourError> {
        let cursor = self.running_cursor()?;
        let Some(prev) = cursor.checked_sub(1) else {
            tracing::debug!(tour = %self.name, "prev at first step ignored");
            return Ok(());
        };
        self.hide_tip();
        tracing::debug!(tour = %self.name, from = cursor, to = prev, "prev");
        self.state = TourState::Running { cursor: prev };
        self.show_tip()
    }

    /// Emit `showTip` for the step at the cursor, show it, and scroll it into view.
    ///
    /// Fails with [`TourError::NotRunning`] while idle.
    pub fn show_tip(&mut self) -> Result<(), TourError> {
        let cursor = self.running_cursor()?;
        if cursor >= self.steps.len() {
            return Err(TourError::UnknownStep {
                tour: self.name.clone(),
                position: cursor,
            });
        }
        self.emit(Lifecycle::ShowTip, Some(cursor));
        let metrics = self.options.metrics();
        let step = &mut self.steps[cursor];
        step.show(&mut self.renderer, metrics);
        let bounds = step.bounds(&mut self.renderer);
        let viewport = self.renderer.viewport_height();
        if let Some(y) = scroll_target(bounds, step.size(), viewport, self.options.scroll) {
            self.renderer.scroll_to(y);
        }
        Ok(())
    }

    /// Emit `hideTip` and hide the step at the cursor, if it is visible. No-op otherwise.
    pub fn hide_tip(&mut self) {
        if let Some(cursor) = self.cursor() {
            self.hide_step_at(cursor);
        }
    }

    /// End the tour at the current step. No-op if not running.
    pub fn end(&mut self) {
        if let TourState::Running { cursor } = self.state {
            self.finish(cursor);
        }
    }

    /// End the tour, emit `destroy`, remove every step, and clear the emitter.
    ///
    /// Calling it again does nothing.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.end();
        self.emit(Lifecycle::Destroy, None);
        for step in &mut self.steps {
            step.destroy(&mut self.renderer);
        }
        self.steps.clear();
        self.emitter.clear();
        self.destroyed = true;
        tracing::debug!(tour = %self.name, "tour destroyed");
    }

    /// Execute a navigation command.
    pub fn dispatch(&mut self, command: Command) -> Result<(), TourError> {
        match command {
            Command::Next => self.next(),
            Command::Prev => self.prev(),
            Command::End => {
                self.end();
                Ok(())
            }
        }
    }

    /// Handle a click on `affordance` of the step at `position`.
    ///
    /// Clicks on a destroyed step are ignored.
    pub fn activate(&mut self, position: usize, affordance: Affordance) -> Result<(), TourError> {
        let step = self.steps.get(position).ok_or_else(|| TourError::UnknownStep {
            tour: self.name.clone(),
            position,
        })?;
        match step.command_for(affordance) {
            Some(command) => self.dispatch(command),
            None => Ok(()),
        }
    }

    /// Forget every step's cached anchor bounds, e.g. after the page was resized.
    pub fn invalidate_geometry(&mut self) {
        for step in &mut self.steps {
            step.invalidate_geometry();
        }
    }

    /// `cursor` may be `step_count` when the tour ran past its last step.
    fn finish(&mut self, cursor: usize) {
        self.state = TourState::Idle;
        self.hide_step_at(cursor);
        let last = if cursor == self.steps.len() {
            cursor.saturating_sub(1)
        } else {
            cursor
        };
        tracing::debug!(tour = %self.name, last, "tour ended");
        self.emit(Lifecycle::End, Some(last));
    }

    fn hide_step_at(&mut self, cursor: usize) {
        if self.steps.get(cursor).is_some_and(Step::is_visible) {
            self.emit(Lifecycle::HideTip, Some(cursor));
            self.steps[cursor].hide(&mut self.renderer);
        }
    }

    fn running_cursor(&self) -> Result<usize, TourError> {
        if self.destroyed {
            return Err(self.destroyed_error());
        }
        self.cursor().ok_or_else(|| TourError::NotRunning {
            tour: self.name.clone(),
        })
    }

    fn destroyed_error(&self) -> TourError {
        TourError::Destroyed {
            tour: self.name.clone(),
        }
    }

    fn emit(&self, channel: Lifecycle, payload: StepPayload) {
        let delivery = self.emitter.trigger(channel, &payload);
        if !delivery.is_clean() {
            tracing::warn!(
                tour = %self.name,
                %channel,
                failed = delivery.failures.len(),
                "lifecycle handlers failed"
            );
        }
    }
}
