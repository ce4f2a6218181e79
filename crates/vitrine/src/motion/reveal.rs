//! Reveal-on-scroll animators.
//!
//! A [`RevealAnimator`] moves one element from an offset, transparent
//! initial state to a settled, opaque, zero-offset state exactly once per
//! visibility episode (see [`super::viewport`] for episode boundaries). A
//! [`StaggeredRevealAnimator`] applies the same contract to an ordered
//! group of sibling elements with a per-index delay so they animate in
//! sequence.
//!
//! Animators consume [`EnterEdge`](super::viewport::EnterEdge) /
//! exit events from a watcher; the host (or a wiring layer) forwards the
//! watcher's signals into [`RevealAnimator::handle_enter`] and
//! [`RevealAnimator::handle_exit`].

use std::time::{Duration, Instant};

use vitrine_core::BandMargin;

use crate::handle::ElementHandle;

use super::easing::Easing;
use super::timeline::{Timeline, TimelineStatus};
use super::tween::{StyleProp, Tween};
use super::viewport::{DEFAULT_BAND_MARGIN, DEFAULT_RECHECK_DELAY, EnterEdge, ViewportWatcherConfig};

/// Configuration shared by single and staggered reveal animators.
#[derive(Debug, Clone, Copy)]
pub struct RevealConfig {
    /// Duration of the settle animation.
    pub duration: Duration,
    /// Delay between successive items in a staggered group.
    pub stagger_interval: Duration,
    /// Initial vertical offset (pixels below the settled position).
    pub offset: f32,
    /// Easing curve for the settle.
    pub easing: Easing,
    /// Band margin used when deriving a watcher config.
    pub band_margin: BandMargin,
    /// In-band threshold used when deriving a watcher config.
    pub threshold: f32,
    /// Initial re-check delay used when deriving a watcher config.
    pub recheck_delay: Duration,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(600),
            stagger_interval: Duration::from_millis(150),
            offset: 40.0,
            easing: Easing::EaseOut,
            band_margin: BandMargin::symmetric(DEFAULT_BAND_MARGIN),
            threshold: 0.0,
            recheck_delay: DEFAULT_RECHECK_DELAY,
        }
    }
}

impl RevealConfig {
    /// Set the settle duration. Builder style.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the per-item stagger interval. Builder style.
    pub fn with_stagger_interval(mut self, interval: Duration) -> Self {
        self.stagger_interval = interval;
        self
    }

    /// Set the initial vertical offset. Builder style.
    pub fn with_offset(mut self, offset: f32) -> Self {
        self.offset = offset;
        self
    }

    /// Set the easing curve. Builder style.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set the band margin. Builder style.
    pub fn with_band_margin(mut self, margin: BandMargin) -> Self {
        self.band_margin = margin;
        self
    }

    /// Derive the watcher configuration for this reveal.
    pub fn watcher_config(&self) -> ViewportWatcherConfig {
        ViewportWatcherConfig::default()
            .with_band_margin(self.band_margin)
            .with_threshold(self.threshold)
            .with_recheck_delay(self.recheck_delay)
    }
}

/// Settle animation for a single element, once per visibility episode.
pub struct RevealAnimator {
    handle: ElementHandle,
    config: RevealConfig,
    timeline: Option<Timeline>,
}

impl RevealAnimator {
    /// Create an animator for one element.
    pub fn new(handle: ElementHandle, config: RevealConfig) -> Self {
        Self {
            handle,
            config,
            timeline: None,
        }
    }

    /// React to an enter edge from the watcher.
    ///
    /// [`EnterEdge::FirstReveal`] starts the settle animation from the
    /// hidden state. [`EnterEdge::AlreadyVisible`] and
    /// [`EnterEdge::Reassert`] apply the settled values directly, a cheap
    /// reassertion that never restarts a transition, guarding against
    /// redundant observer callbacks.
    pub fn handle_enter(&mut self, edge: EnterEdge, now: Instant) {
        match edge {
            EnterEdge::FirstReveal => {
                set_hidden(&self.handle, self.config.offset);
                let mut timeline = reveal_timeline(
                    &self.handle,
                    &self.config,
                    Duration::ZERO,
                );
                timeline.start(now);
                self.timeline = Some(timeline);
            }
            EnterEdge::AlreadyVisible | EnterEdge::Reassert => {
                if let Some(timeline) = &mut self.timeline {
                    timeline.cancel();
                }
                self.timeline = None;
                set_settled(&self.handle);
            }
        }
    }

    /// React to an exit (episode re-arm): reset to the hidden initial
    /// state so the next reveal starts from scratch. The element is fully
    /// out of view at this point, so the reset is invisible.
    pub fn handle_exit(&mut self) {
        if let Some(timeline) = &mut self.timeline {
            timeline.cancel();
        }
        self.timeline = None;
        set_hidden(&self.handle, self.config.offset);
    }

    /// Advance the running settle animation. Returns `true` while
    /// animating.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(timeline) = &mut self.timeline else {
            return false;
        };
        match timeline.tick(now) {
            TimelineStatus::Running => true,
            TimelineStatus::Completed | TimelineStatus::Settled | TimelineStatus::Idle => {
                self.timeline = None;
                false
            }
        }
    }

    /// Whether a settle animation is in flight.
    pub fn is_animating(&self) -> bool {
        self.timeline.as_ref().is_some_and(|t| t.is_running())
    }
}

/// Settle animation for an ordered group of siblings with per-index
/// delays.
///
/// Item order is the order handles were attached; the group (not each
/// child) decides when an episode fires. Children added while an episode's
/// animation is running are not retroactively included; they participate
/// from the next episode.
pub struct StaggeredRevealAnimator {
    children: Vec<ElementHandle>,
    config: RevealConfig,
    timeline: Option<Timeline>,
}

impl StaggeredRevealAnimator {
    /// Create a group animator over `children`, in reveal order.
    pub fn new(children: Vec<ElementHandle>, config: RevealConfig) -> Self {
        Self {
            children,
            config,
            timeline: None,
        }
    }

    /// Append a child. It keeps the group's settled/hidden contract from
    /// the next episode on.
    pub fn add_child(&mut self, handle: ElementHandle) {
        self.children.push(handle);
    }

    /// Number of children currently in the group.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// React to an enter edge for the whole group.
    pub fn handle_enter(&mut self, edge: EnterEdge, now: Instant) {
        match edge {
            EnterEdge::FirstReveal => {
                // Snapshot: the episode's stagger sequence is fixed here.
                let mut timeline = Timeline::new();
                for (index, child) in self.children.iter().enumerate() {
                    set_hidden(child, self.config.offset);
                    let delay = self.config.stagger_interval * index as u32;
                    append_reveal_steps(&mut timeline, child, &self.config, delay);
                }
                timeline.start(now);
                self.timeline = Some(timeline);
            }
            EnterEdge::AlreadyVisible | EnterEdge::Reassert => {
                if let Some(timeline) = &mut self.timeline {
                    timeline.cancel();
                }
                self.timeline = None;
                for child in &self.children {
                    set_settled(child);
                }
            }
        }
    }

    /// React to an exit (episode re-arm) for the whole group.
    pub fn handle_exit(&mut self) {
        if let Some(timeline) = &mut self.timeline {
            timeline.cancel();
        }
        self.timeline = None;
        for child in &self.children {
            set_hidden(child, self.config.offset);
        }
    }

    /// Advance the running group animation. Returns `true` while
    /// animating.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(timeline) = &mut self.timeline else {
            return false;
        };
        match timeline.tick(now) {
            TimelineStatus::Running => true,
            TimelineStatus::Completed | TimelineStatus::Settled | TimelineStatus::Idle => {
                self.timeline = None;
                false
            }
        }
    }

    /// Whether a group animation is in flight.
    pub fn is_animating(&self) -> bool {
        self.timeline.as_ref().is_some_and(|t| t.is_running())
    }
}

fn set_hidden(handle: &ElementHandle, offset: f32) {
    handle.apply(|s| {
        s.opacity = 0.0;
        s.offset_y = offset;
    });
}

fn set_settled(handle: &ElementHandle) {
    handle.apply(|s| {
        s.opacity = 1.0;
        s.offset_y = 0.0;
    });
}

fn reveal_timeline(handle: &ElementHandle, config: &RevealConfig, delay: Duration) -> Timeline {
    let mut timeline = Timeline::new();
    append_reveal_steps(&mut timeline, handle, config, delay);
    timeline
}

fn append_reveal_steps(
    timeline: &mut Timeline,
    handle: &ElementHandle,
    config: &RevealConfig,
    delay: Duration,
) {
    timeline.push_step(
        handle.clone(),
        Tween::new(StyleProp::Opacity, 0.0, 1.0, config.duration, config.easing),
        delay,
    );
    timeline.push_step(
        handle.clone(),
        Tween::new(
            StyleProp::OffsetY,
            config.offset,
            0.0,
            config.duration,
            config.easing,
        ),
        delay,
    );
}
