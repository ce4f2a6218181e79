//! Offset-scheduled tween timelines.
//!
//! A [`Timeline`] runs a set of tween steps against element handles, each
//! step starting at a fixed offset from the timeline start. Offsets express
//! both stagger (`index * interval`) and phase overlap (a later phase's
//! offset pulled forward by a lead time). The timeline's completion edge is
//! reported exactly once and is the only permitted trigger for a dependent
//! next phase.
//!
//! Steps do not touch their handle before their offset elapses; callers
//! that need a specific pre-animation state (hidden, scaled down) set it
//! explicitly before starting the timeline.

use std::time::{Duration, Instant};

use crate::handle::ElementHandle;

use super::tween::{StyleProp, Tween};

/// Result of ticking a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineStatus {
    /// Not started.
    Idle,
    /// Started; at least one step has not finished.
    Running,
    /// All steps finished during this tick. Reported exactly once.
    Completed,
    /// All steps finished on an earlier tick.
    Settled,
}

/// One scheduled step: a tween applied to a handle after an offset.
#[derive(Debug)]
struct Step {
    handle: ElementHandle,
    tween: Tween,
    offset: Duration,
    started: bool,
    finished: bool,
}

/// An ordered set of tween steps over element handles.
#[derive(Debug, Default)]
pub struct Timeline {
    steps: Vec<Step>,
    started_at: Option<Instant>,
    completion_emitted: bool,
}

impl Timeline {
    /// Create an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a step starting `offset` after the timeline start. Builder
    /// style.
    pub fn step(mut self, handle: ElementHandle, tween: Tween, offset: Duration) -> Self {
        self.push_step(handle, tween, offset);
        self
    }

    /// Add a step in place.
    pub fn push_step(&mut self, handle: ElementHandle, tween: Tween, offset: Duration) {
        self.steps.push(Step {
            handle,
            tween,
            offset,
            started: false,
            finished: false,
        });
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the timeline has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Begin the timeline at `now`.
    pub fn start(&mut self, now: Instant) {
        self.started_at = Some(now);
        self.completion_emitted = false;
        for step in &mut self.steps {
            step.started = false;
            step.finished = false;
        }
    }

    /// Whether the timeline has started and not yet completed.
    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && !self.all_finished()
    }

    fn all_finished(&self) -> bool {
        self.steps.iter().all(|s| s.finished)
    }

    /// Advance the timeline to `now`, applying values to handles.
    ///
    /// An empty timeline completes on its first tick.
    pub fn tick(&mut self, now: Instant) -> TimelineStatus {
        let Some(started_at) = self.started_at else {
            return TimelineStatus::Idle;
        };

        if self.completion_emitted {
            return TimelineStatus::Settled;
        }

        for step in &mut self.steps {
            if step.finished {
                continue;
            }

            let step_start = started_at + step.offset;
            if now < step_start {
                continue;
            }

            if !step.started {
                step.started = true;
                step.tween.start(step_start);
            }

            if let Some(sample) = step.tween.sample(now) {
                apply_prop(&step.handle, step.tween.prop(), sample.value);
                if sample.finished_edge {
                    step.finished = true;
                }
            }
        }

        if self.all_finished() {
            self.completion_emitted = true;
            TimelineStatus::Completed
        } else {
            TimelineStatus::Running
        }
    }

    /// Apply every step's end value immediately and mark the timeline
    /// settled, without reporting a completion edge.
    ///
    /// Used for no-animation reassertion and immediate (unanimated)
    /// closes.
    pub fn jump_to_end(&mut self) {
        for step in &mut self.steps {
            apply_prop(&step.handle, step.tween.prop(), step.tween.end_value());
            step.started = true;
            step.finished = true;
        }
        self.started_at.get_or_insert_with(Instant::now);
        self.completion_emitted = true;
    }

    /// Stop without applying further values. Remaining steps keep whatever
    /// value their handle last received.
    pub fn cancel(&mut self) {
        self.started_at = None;
        self.completion_emitted = false;
        for step in &mut self.steps {
            step.started = false;
            step.finished = false;
        }
    }
}

fn apply_prop(handle: &ElementHandle, prop: StyleProp, value: f32) {
    match prop {
        StyleProp::Opacity => handle.set_opacity(value),
        StyleProp::OffsetX => handle.apply(|s| s.offset_x = value),
        StyleProp::OffsetY => handle.apply(|s| s.offset_y = value),
        StyleProp::Height => handle.set_height(Some(value)),
        StyleProp::Scale => handle.set_scale(value),
    }
}
