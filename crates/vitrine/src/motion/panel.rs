//! Two-phase expand/collapse panel choreography.
//!
//! Opening runs height-then-slide; closing runs slide-then-height. The
//! ordering is a hard requirement, not a styling preference: collapsing
//! height first would clip the slide-out before it finishes, and sliding
//! content in before height settles would show it jumping inside a
//! zero-height box.
//!
//! The panel is an explicit state machine ([`PanelMachine`]) producing
//! effect lists, wired to element handles by [`ExpandCollapsePanel`].
//! Within one panel, phase N+1 starts only from phase N's completion
//! edge. A toggle arriving mid-sequence is queued (latest wins, at most
//! one retained) and replayed when the sequence reaches a resting state.

use std::time::{Duration, Instant};

use vitrine_core::Signal;
use vitrine_core::logging::targets;

use crate::handle::ElementHandle;

use super::easing::Easing;
use super::timeline::{Timeline, TimelineStatus};
use super::tween::{StyleProp, Tween};

/// Externally observable panel state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    /// Resting, collapsed.
    Closed,
    /// Open sequence in flight (height, then slide).
    Opening,
    /// Resting, expanded.
    Open,
    /// Close sequence in flight (slide, then height).
    Closing,
}

/// Internal phase, one per animation segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Closed,
    OpeningHeight,
    OpeningSlide,
    Open,
    ClosingSlide,
    ClosingHeight,
}

impl Phase {
    fn observable(self) -> PanelState {
        match self {
            Phase::Closed => PanelState::Closed,
            Phase::OpeningHeight | Phase::OpeningSlide => PanelState::Opening,
            Phase::Open => PanelState::Open,
            Phase::ClosingSlide | Phase::ClosingHeight => PanelState::Closing,
        }
    }
}

/// Input to the panel machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelEvent {
    /// User toggle. Carries the height measured fresh at invocation:
    /// natural content height when opening, current rendered height when
    /// closing.
    Toggle { measured_height: f32 },
    /// The current animation segment's completion edge.
    PhaseComplete,
}

/// Side effects requested by a machine transition, applied by the
/// controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelEffect {
    /// Animate the outer box height between two values.
    AnimateHeight { from: f32, to: f32 },
    /// Slide the inner content in (offset to zero, fade to opaque, with
    /// overshoot).
    SlideIn,
    /// Request scrolling the panel header into the upper portion of the
    /// viewport.
    ScrollIntoView,
    /// Slide the inner content out (offset away, fade to transparent).
    SlideOut,
    /// Pin the box at the captured height, hide the inner content, and
    /// collapse height to zero.
    PinAndCollapse { height: f32 },
    /// A queued toggle became due; the controller re-invokes toggle with a
    /// fresh measurement.
    ReplayToggle,
}

/// Pure expand/collapse state machine.
///
/// Holds no handles and performs no effects; every transition returns the
/// effect list for the caller to apply.
#[derive(Debug)]
pub struct PanelMachine {
    phase: Phase,
    /// Height captured by the most recent toggle.
    captured_height: f32,
    /// Latest-wins queued toggle.
    queued_toggle: bool,
}

impl Default for PanelMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelMachine {
    /// A machine in the closed resting state.
    pub fn new() -> Self {
        Self {
            phase: Phase::Closed,
            captured_height: 0.0,
            queued_toggle: false,
        }
    }

    /// Externally observable state.
    pub fn state(&self) -> PanelState {
        self.phase.observable()
    }

    /// Whether the panel is at rest and open.
    pub fn is_open(&self) -> bool {
        self.phase == Phase::Open
    }

    /// Whether an open or close sequence is in flight.
    pub fn is_animating(&self) -> bool {
        !matches!(self.phase, Phase::Closed | Phase::Open)
    }

    /// Apply one event, returning the effects to perform.
    pub fn transition(&mut self, event: PanelEvent) -> Vec<PanelEffect> {
        match (self.phase, event) {
            (Phase::Closed, PanelEvent::Toggle { measured_height }) => {
                self.captured_height = measured_height;
                self.phase = Phase::OpeningHeight;
                vec![PanelEffect::AnimateHeight {
                    from: 0.0,
                    to: measured_height,
                }]
            }
            (Phase::OpeningHeight, PanelEvent::PhaseComplete) => {
                self.phase = Phase::OpeningSlide;
                vec![PanelEffect::SlideIn, PanelEffect::ScrollIntoView]
            }
            (Phase::OpeningSlide, PanelEvent::PhaseComplete) => {
                self.phase = Phase::Open;
                self.drain_queued()
            }
            (Phase::Open, PanelEvent::Toggle { measured_height }) => {
                self.captured_height = measured_height;
                self.phase = Phase::ClosingSlide;
                vec![PanelEffect::SlideOut]
            }
            (Phase::ClosingSlide, PanelEvent::PhaseComplete) => {
                self.phase = Phase::ClosingHeight;
                vec![PanelEffect::PinAndCollapse {
                    height: self.captured_height,
                }]
            }
            (Phase::ClosingHeight, PanelEvent::PhaseComplete) => {
                self.phase = Phase::Closed;
                self.drain_queued()
            }
            // A toggle mid-sequence queues, latest wins. Two queued
            // toggles collapse to one pending flip.
            (_, PanelEvent::Toggle { .. }) => {
                self.queued_toggle = true;
                tracing::debug!(target: targets::PANEL, "toggle queued during animation");
                Vec::new()
            }
            // Stray completion edges at rest are dropped.
            (Phase::Closed | Phase::Open, PanelEvent::PhaseComplete) => Vec::new(),
        }
    }

    fn drain_queued(&mut self) -> Vec<PanelEffect> {
        if self.queued_toggle {
            self.queued_toggle = false;
            vec![PanelEffect::ReplayToggle]
        } else {
            Vec::new()
        }
    }
}

/// Animation configuration for a panel.
#[derive(Debug, Clone, Copy)]
pub struct PanelConfig {
    /// Duration of each height segment.
    pub height_duration: Duration,
    /// Duration of each slide segment.
    pub slide_duration: Duration,
    /// Horizontal distance the inner content slides from/to.
    pub slide_offset: f32,
    /// Easing for height segments.
    pub height_easing: Easing,
    /// Easing for the slide-in (overshoot by default).
    pub slide_easing: Easing,
    /// Fraction of the viewport height the header should sit at after
    /// opening (upper third by default, so newly revealed content below
    /// stays visible).
    pub scroll_anchor: f32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            height_duration: Duration::from_millis(300),
            slide_duration: Duration::from_millis(450),
            slide_offset: 300.0,
            height_easing: Easing::EaseInOut,
            slide_easing: Easing::EaseOutBack,
            scroll_anchor: 1.0 / 3.0,
        }
    }
}

impl PanelConfig {
    /// Set the height segment duration. Builder style.
    pub fn with_height_duration(mut self, duration: Duration) -> Self {
        self.height_duration = duration;
        self
    }

    /// Set the slide segment duration. Builder style.
    pub fn with_slide_duration(mut self, duration: Duration) -> Self {
        self.slide_duration = duration;
        self
    }

    /// Set the slide offset distance. Builder style.
    pub fn with_slide_offset(mut self, offset: f32) -> Self {
        self.slide_offset = offset;
        self
    }

    /// Set the slide easing. Builder style.
    pub fn with_slide_easing(mut self, easing: Easing) -> Self {
        self.slide_easing = easing;
        self
    }
}

/// A scroll-into-view request emitted when a panel finishes its height
/// phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    /// Viewport-space top of the panel header at request time.
    pub header_top: f32,
    /// Fraction of the viewport height the header should land at.
    pub anchor: f32,
}

/// An accordion-style panel: outer box (height), inner content (slide),
/// header (scroll anchor).
pub struct ExpandCollapsePanel {
    box_handle: ElementHandle,
    content_handle: ElementHandle,
    header_handle: ElementHandle,
    config: PanelConfig,
    machine: PanelMachine,
    active: Option<Timeline>,
    /// Emitted on every observable state change.
    pub state_changed: Signal<PanelState>,
    /// Emitted when the open sequence wants the header scrolled into
    /// view.
    pub scroll_requested: Signal<ScrollRequest>,
}

impl ExpandCollapsePanel {
    /// Create a closed panel over its three element handles.
    pub fn new(
        box_handle: ElementHandle,
        content_handle: ElementHandle,
        header_handle: ElementHandle,
        config: PanelConfig,
    ) -> Self {
        // Closed initial state: box collapsed, content hidden off to the
        // side.
        box_handle.set_height(Some(0.0));
        content_handle.apply(|s| {
            s.opacity = 0.0;
            s.offset_x = -config.slide_offset;
            s.visible = false;
        });

        Self {
            box_handle,
            content_handle,
            header_handle,
            config,
            machine: PanelMachine::new(),
            active: None,
            state_changed: Signal::new(),
            scroll_requested: Signal::new(),
        }
    }

    /// Externally observable state.
    pub fn state(&self) -> PanelState {
        self.machine.state()
    }

    /// Whether the panel is at rest and open.
    pub fn is_open(&self) -> bool {
        self.machine.is_open()
    }

    /// Toggle the panel.
    ///
    /// Opening measures the inner content's natural height fresh at this
    /// moment; content may have changed since the last open, and a zero
    /// measurement still proceeds. A toggle during an in-flight sequence
    /// is queued (latest wins) and replayed when the sequence settles.
    pub fn toggle(&mut self, now: Instant) {
        let measured_height = match self.machine.state() {
            PanelState::Closed => self.content_handle.natural_height(),
            PanelState::Open => self
                .box_handle
                .style()
                .height
                .unwrap_or_else(|| self.box_handle.natural_height()),
            // Mid-sequence: the measurement is taken again at replay.
            PanelState::Opening | PanelState::Closing => 0.0,
        };
        self.dispatch(PanelEvent::Toggle { measured_height }, now);
    }

    /// Advance the in-flight animation segment, if any.
    pub fn tick(&mut self, now: Instant) {
        let Some(timeline) = &mut self.active else {
            return;
        };
        match timeline.tick(now) {
            TimelineStatus::Completed => {
                self.active = None;
                self.dispatch(PanelEvent::PhaseComplete, now);
            }
            TimelineStatus::Running => {}
            TimelineStatus::Idle | TimelineStatus::Settled => {
                self.active = None;
            }
        }
    }

    /// Whether an animation segment is in flight.
    pub fn is_animating(&self) -> bool {
        self.machine.is_animating()
    }

    /// Stop animating and disconnect signals. Idempotent.
    pub fn detach(&mut self) {
        if let Some(timeline) = &mut self.active {
            timeline.cancel();
        }
        self.active = None;
        self.state_changed.disconnect_all();
        self.scroll_requested.disconnect_all();
    }

    fn dispatch(&mut self, event: PanelEvent, now: Instant) {
        let before = self.machine.state();
        let effects = self.machine.transition(event);
        let mut replay = false;

        for effect in effects {
            match effect {
                PanelEffect::AnimateHeight { from, to } => {
                    self.content_handle.set_visible(true);
                    let mut timeline = Timeline::new().step(
                        self.box_handle.clone(),
                        Tween::new(
                            StyleProp::Height,
                            from,
                            to,
                            self.config.height_duration,
                            self.config.height_easing,
                        ),
                        Duration::ZERO,
                    );
                    timeline.start(now);
                    self.active = Some(timeline);
                }
                PanelEffect::SlideIn => {
                    self.content_handle.apply(|s| {
                        s.offset_x = -self.config.slide_offset;
                        s.opacity = 0.0;
                    });
                    let mut timeline = Timeline::new()
                        .step(
                            self.content_handle.clone(),
                            Tween::new(
                                StyleProp::OffsetX,
                                -self.config.slide_offset,
                                0.0,
                                self.config.slide_duration,
                                self.config.slide_easing,
                            ),
                            Duration::ZERO,
                        )
                        .step(
                            self.content_handle.clone(),
                            Tween::new(
                                StyleProp::Opacity,
                                0.0,
                                1.0,
                                self.config.slide_duration,
                                // Opacity never overshoots past fully
                                // opaque.
                                Easing::EaseOut,
                            ),
                            Duration::ZERO,
                        );
                    timeline.start(now);
                    self.active = Some(timeline);
                }
                PanelEffect::ScrollIntoView => {
                    // Header not laid out yet: skip the step, never fail.
                    if let Some(rect) = self.header_handle.rect() {
                        self.scroll_requested.emit(ScrollRequest {
                            header_top: rect.top(),
                            anchor: self.config.scroll_anchor,
                        });
                    }
                }
                PanelEffect::SlideOut => {
                    let mut timeline = Timeline::new()
                        .step(
                            self.content_handle.clone(),
                            Tween::new(
                                StyleProp::OffsetX,
                                0.0,
                                -self.config.slide_offset,
                                self.config.slide_duration,
                                Easing::EaseInOut,
                            ),
                            Duration::ZERO,
                        )
                        .step(
                            self.content_handle.clone(),
                            Tween::new(
                                StyleProp::Opacity,
                                1.0,
                                0.0,
                                self.config.slide_duration,
                                Easing::EaseOut,
                            ),
                            Duration::ZERO,
                        );
                    timeline.start(now);
                    self.active = Some(timeline);
                }
                PanelEffect::PinAndCollapse { height } => {
                    self.box_handle.set_height(Some(height));
                    self.content_handle.set_visible(false);
                    let mut timeline = Timeline::new().step(
                        self.box_handle.clone(),
                        Tween::new(
                            StyleProp::Height,
                            height,
                            0.0,
                            self.config.height_duration,
                            self.config.height_easing,
                        ),
                        Duration::ZERO,
                    );
                    timeline.start(now);
                    self.active = Some(timeline);
                }
                PanelEffect::ReplayToggle => {
                    replay = true;
                }
            }
        }

        let after = self.machine.state();
        if after != before {
            tracing::debug!(target: targets::PANEL, ?before, ?after, "panel state change");
            self.state_changed.emit(after);
        }

        if replay {
            self.toggle(now);
        }
    }
}

static_assertions::assert_impl_all!(ExpandCollapsePanel: Send, Sync);
