//! Viewport visibility watching.
//!
//! A [`ViewportWatcher`] wraps one element and classifies it against two
//! rectangles each observation: the *trigger band* (the viewport expanded, or shrunk with negative
//! margins, by the configured band margin) and the
//! *raw viewport*. Entering the band fires the forward animation edge;
//! re-arming (resetting to hidden) happens only when the element is fully
//! outside the raw viewport on the top or bottom edge. That asymmetry is
//! what prevents animation flicker at the band boundary.
//!
//! On activation the watcher synchronously classifies the element against
//! the *unexpanded* viewport so content visible at initial paint settles
//! without an animation flash, and schedules one delayed re-check
//! (~100ms) to absorb late layout shifts such as font swaps and image
//! loads.
//!
//! # Host protocol
//!
//! 1. [`ViewportWatcher::new`] with the target handle and config,
//! 2. connect slots to [`entered`](ViewportWatcher::entered) /
//!    [`exited`](ViewportWatcher::exited),
//! 3. [`activate`](ViewportWatcher::activate) once layout is known,
//! 4. [`observe`](ViewportWatcher::observe) on every geometry change,
//! 5. route fired timer ids through [`on_timer`](ViewportWatcher::on_timer),
//! 6. [`disconnect`](ViewportWatcher::disconnect) on unmount (idempotent).

use std::time::Duration;
use std::time::Instant;

use vitrine_core::logging::targets;
use vitrine_core::{BandMargin, Rect, Signal, TimerId, TimerService};

use crate::handle::ElementHandle;

/// Default vertical band margin in pixels.
pub const DEFAULT_BAND_MARGIN: f32 = 200.0;

/// Default delay before the one-shot layout re-check.
pub const DEFAULT_RECHECK_DELAY: Duration = Duration::from_millis(100);

/// Configuration for a [`ViewportWatcher`].
#[derive(Debug, Clone, Copy)]
pub struct ViewportWatcherConfig {
    /// Vertical band margin. Positive values fire triggers before exact
    /// entry; negative values delay them until the element is inside the
    /// viewport by that much.
    pub band_margin: BandMargin,
    /// Minimum fraction of the element's height that must overlap the band
    /// to count as "in band" (0.0 = any overlap).
    pub threshold: f32,
    /// Delay before the one-shot initial re-classification.
    pub recheck_delay: Duration,
}

impl Default for ViewportWatcherConfig {
    fn default() -> Self {
        Self {
            band_margin: BandMargin::symmetric(DEFAULT_BAND_MARGIN),
            threshold: 0.0,
            recheck_delay: DEFAULT_RECHECK_DELAY,
        }
    }
}

impl ViewportWatcherConfig {
    /// Set the band margin. Builder style.
    pub fn with_band_margin(mut self, margin: BandMargin) -> Self {
        self.band_margin = margin;
        self
    }

    /// Set the in-band threshold. Builder style.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Set the re-check delay. Builder style.
    pub fn with_recheck_delay(mut self, delay: Duration) -> Self {
        self.recheck_delay = delay;
        self
    }
}

/// Visibility bookkeeping for one watched element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibilityState {
    /// Whether the current visibility episode has fired its forward
    /// animation. Transitions back to `false` only on a
    /// fully-out-of-raw-viewport observation.
    pub has_animated: bool,
    /// Whether the element currently overlaps the trigger band.
    pub is_in_band: bool,
}

/// The kind of enter edge delivered to animators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnterEdge {
    /// The element was already within the raw viewport when the watcher
    /// activated (or re-checked): settle without animating.
    AlreadyVisible,
    /// First band entry of this visibility episode: run the reveal.
    FirstReveal,
    /// Band re-entry within an episode that already animated: reassert
    /// settled values without animating.
    Reassert,
}

/// Watches one element's position against the trigger band and raw
/// viewport.
pub struct ViewportWatcher {
    target: ElementHandle,
    config: ViewportWatcherConfig,
    state: VisibilityState,
    recheck_timer: Option<TimerId>,
    connected: bool,
    /// Emitted on band entry and on initial-paint classification.
    pub entered: Signal<EnterEdge>,
    /// Emitted when the element is observed fully outside the raw
    /// viewport and the episode re-arms.
    pub exited: Signal<()>,
}

impl ViewportWatcher {
    /// Create a watcher for `target`. No classification happens until
    /// [`activate`](Self::activate).
    pub fn new(target: ElementHandle, config: ViewportWatcherConfig) -> Self {
        Self {
            target,
            config,
            state: VisibilityState::default(),
            recheck_timer: None,
            connected: true,
            entered: Signal::new(),
            exited: Signal::new(),
        }
    }

    /// Current visibility bookkeeping.
    pub fn state(&self) -> VisibilityState {
        self.state
    }

    /// Whether the element is currently within the trigger band.
    pub fn is_visible(&self) -> bool {
        self.state.is_in_band
    }

    /// Synchronously classify the element against the *unexpanded*
    /// viewport and schedule the delayed re-check.
    ///
    /// Call after connecting slots: an element already in view emits
    /// [`EnterEdge::AlreadyVisible`] from inside this call.
    pub fn activate(&mut self, viewport: Rect, timers: &mut TimerService, now: Instant) {
        if !self.connected {
            return;
        }
        self.classify_initial(viewport);
        self.recheck_timer = Some(timers.schedule(self.config.recheck_delay, now));
    }

    /// Feed one geometry observation.
    ///
    /// An element without layout (`rect() == None`) is skipped entirely:
    /// a no-op, not an error.
    pub fn observe(&mut self, viewport: Rect) {
        if !self.connected {
            return;
        }
        let Some(rect) = self.target.rect() else {
            return;
        };

        let band = viewport.expanded(self.config.band_margin);
        let in_band = self.in_band(&rect, &band);
        let was_in_band = self.state.is_in_band;
        self.state.is_in_band = in_band;

        if in_band && !was_in_band {
            if self.state.has_animated {
                self.entered.emit(EnterEdge::Reassert);
            } else {
                self.state.has_animated = true;
                tracing::debug!(target: targets::VIEWPORT, "band entry, episode begins");
                self.entered.emit(EnterEdge::FirstReveal);
            }
        }

        // Re-arm rule: only a rectangle fully outside the raw viewport
        // resets the episode. Leaving the band while still partially
        // visible keeps `has_animated` set.
        if !in_band && self.state.has_animated && rect.fully_outside_vertically(&viewport) {
            self.state.has_animated = false;
            tracing::debug!(target: targets::VIEWPORT, "fully out of view, episode re-armed");
            self.exited.emit(());
        }
    }

    /// Route a fired timer id. Returns `true` if the id belonged to this
    /// watcher's re-check timer.
    ///
    /// The re-check absorbs late layout shifts: if the element has not
    /// animated yet but now overlaps the raw viewport, it is settled
    /// without animation, exactly like the activation-time check.
    pub fn on_timer(&mut self, id: TimerId, viewport: Rect) -> bool {
        if self.recheck_timer != Some(id) {
            return false;
        }
        self.recheck_timer = None;
        if self.connected && !self.state.has_animated {
            self.classify_initial(viewport);
        }
        true
    }

    /// Stop observing. Idempotent; cancels the pending re-check timer.
    pub fn disconnect(&mut self, timers: &mut TimerService) {
        if !self.connected {
            return;
        }
        self.connected = false;
        if let Some(id) = self.recheck_timer.take() {
            let _ = timers.cancel(id);
        }
    }

    /// Whether the watcher is still observing.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    fn classify_initial(&mut self, viewport: Rect) {
        let Some(rect) = self.target.rect() else {
            return;
        };
        // Initial paint uses the raw viewport, not the widened band: only
        // content the visitor can actually see should skip its animation.
        if rect.intersects_vertically(&viewport) {
            self.state.has_animated = true;
            self.state.is_in_band = true;
            self.entered.emit(EnterEdge::AlreadyVisible);
        }
    }

    fn in_band(&self, rect: &Rect, band: &Rect) -> bool {
        if rect.height <= 0.0 {
            return rect.top() >= band.top() && rect.top() <= band.bottom();
        }
        let overlap = rect.vertical_overlap(band);
        if overlap <= 0.0 {
            return false;
        }
        overlap / rect.height >= self.config.threshold
    }
}

static_assertions::assert_impl_all!(ViewportWatcher: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn viewport() -> Rect {
        Rect::new(0.0, 0.0, 1280.0, 800.0)
    }

    fn watcher_for(rect: Option<Rect>) -> (ViewportWatcher, ElementHandle) {
        let handle = ElementHandle::new();
        handle.set_rect(rect);
        let watcher = ViewportWatcher::new(handle.clone(), ViewportWatcherConfig::default());
        (watcher, handle)
    }

    fn count_edges(watcher: &ViewportWatcher) -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let entered = Arc::new(AtomicUsize::new(0));
        let exited = Arc::new(AtomicUsize::new(0));
        let e = entered.clone();
        watcher.entered.connect(move |_| {
            e.fetch_add(1, Ordering::SeqCst);
        });
        let x = exited.clone();
        watcher.exited.connect(move |_| {
            x.fetch_add(1, Ordering::SeqCst);
        });
        (entered, exited)
    }

    #[test]
    fn test_initial_paint_classification_uses_raw_viewport() {
        // Element inside the band but below the raw viewport: must NOT be
        // classified as already visible.
        let (mut watcher, _handle) = watcher_for(Some(Rect::new(0.0, 850.0, 600.0, 100.0)));
        let mut kinds = Vec::new();
        let sink = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink2 = sink.clone();
        watcher.entered.connect(move |edge| sink2.lock().push(*edge));

        let mut timers = TimerService::new();
        watcher.activate(viewport(), &mut timers, Instant::now());
        kinds.extend(sink.lock().drain(..));
        assert!(kinds.is_empty());
        assert!(!watcher.state().has_animated);

        // Element inside the raw viewport: settled without animation.
        let (mut watcher, _handle) = watcher_for(Some(Rect::new(0.0, 300.0, 600.0, 100.0)));
        let sink = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink2 = sink.clone();
        watcher.entered.connect(move |edge| sink2.lock().push(*edge));
        watcher.activate(viewport(), &mut timers, Instant::now());
        assert_eq!(sink.lock().as_slice(), &[EnterEdge::AlreadyVisible]);
        assert!(watcher.state().has_animated);
    }

    #[test]
    fn test_band_entry_fires_first_reveal_once() {
        let (mut watcher, handle) = watcher_for(Some(Rect::new(0.0, 2000.0, 600.0, 100.0)));
        let (entered, _exited) = count_edges(&watcher);

        watcher.observe(viewport());
        assert_eq!(entered.load(Ordering::SeqCst), 0);

        // Scroll: element now just below the viewport, within the band.
        handle.set_rect(Some(Rect::new(0.0, 900.0, 600.0, 100.0)));
        watcher.observe(viewport());
        assert_eq!(entered.load(Ordering::SeqCst), 1);
        assert!(watcher.state().has_animated);

        // Redundant observations while in band: no further edges.
        watcher.observe(viewport());
        watcher.observe(viewport());
        assert_eq!(entered.load(Ordering::SeqCst), 1);
    }

    /// A band shrunk at the bottom lets an element leave the band while
    /// staying partially visible, which is the case the re-arm asymmetry
    /// exists for.
    fn shrunk_band_watcher(rect: Rect) -> (ViewportWatcher, ElementHandle) {
        let handle = ElementHandle::new();
        handle.set_rect(Some(rect));
        let config = ViewportWatcherConfig::default().with_band_margin(BandMargin {
            top: 0.0,
            bottom: -300.0,
        });
        let watcher = ViewportWatcher::new(handle.clone(), config);
        (watcher, handle)
    }

    #[test]
    fn test_rearm_only_when_fully_out_of_raw_viewport() {
        let (mut watcher, handle) = shrunk_band_watcher(Rect::new(0.0, 400.0, 600.0, 300.0));
        let (_entered, exited) = count_edges(&watcher);

        watcher.observe(viewport());
        assert!(watcher.state().has_animated);

        handle.set_rect(Some(Rect::new(0.0, 700.0, 600.0, 300.0)));
        watcher.observe(viewport());
        // Out of band, partially in viewport: episode must stay armed.
        assert!(!watcher.state().is_in_band);
        assert!(watcher.state().has_animated);
        assert_eq!(exited.load(Ordering::SeqCst), 0);

        // Fully below the viewport: re-arm.
        handle.set_rect(Some(Rect::new(0.0, 1300.0, 600.0, 300.0)));
        watcher.observe(viewport());
        assert!(!watcher.state().has_animated);
        assert_eq!(exited.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_reentry_after_rearm_animates_again() {
        let (mut watcher, handle) = watcher_for(Some(Rect::new(0.0, 2000.0, 600.0, 100.0)));
        let sink = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink2 = sink.clone();
        watcher.entered.connect(move |edge| sink2.lock().push(*edge));

        handle.set_rect(Some(Rect::new(0.0, 400.0, 600.0, 100.0)));
        watcher.observe(viewport());

        handle.set_rect(Some(Rect::new(0.0, 1200.0, 600.0, 100.0)));
        watcher.observe(viewport());

        handle.set_rect(Some(Rect::new(0.0, 400.0, 600.0, 100.0)));
        watcher.observe(viewport());

        assert_eq!(
            sink.lock().as_slice(),
            &[EnterEdge::FirstReveal, EnterEdge::FirstReveal]
        );
    }

    #[test]
    fn test_band_reentry_within_episode_reasserts() {
        let (mut watcher, handle) = shrunk_band_watcher(Rect::new(0.0, 100.0, 600.0, 300.0));
        let sink = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink2 = sink.clone();
        watcher.entered.connect(move |edge| sink2.lock().push(*edge));

        watcher.observe(viewport());

        // Leave band while partially visible, then re-enter.
        handle.set_rect(Some(Rect::new(0.0, 700.0, 600.0, 300.0)));
        watcher.observe(viewport());
        handle.set_rect(Some(Rect::new(0.0, 300.0, 600.0, 300.0)));
        watcher.observe(viewport());

        assert_eq!(
            sink.lock().as_slice(),
            &[EnterEdge::FirstReveal, EnterEdge::Reassert]
        );
    }

    #[test]
    fn test_recheck_timer_settles_late_layout() {
        let mut timers = TimerService::new();
        let now = Instant::now();

        // No layout yet at activation (image not loaded).
        let (mut watcher, handle) = watcher_for(None);
        let (entered, _) = count_edges(&watcher);
        watcher.activate(viewport(), &mut timers, now);
        assert_eq!(entered.load(Ordering::SeqCst), 0);

        // Layout lands inside the viewport before the re-check fires.
        handle.set_rect(Some(Rect::new(0.0, 100.0, 600.0, 200.0)));
        let fired = timers.fire_due(now + DEFAULT_RECHECK_DELAY);
        assert_eq!(fired.len(), 1);
        assert!(watcher.on_timer(fired[0], viewport()));
        assert_eq!(entered.load(Ordering::SeqCst), 1);
        assert!(watcher.state().has_animated);
    }

    #[test]
    fn test_foreign_timer_id_not_consumed() {
        let mut timers = TimerService::new();
        let now = Instant::now();
        let (mut watcher, _handle) = watcher_for(None);
        watcher.activate(viewport(), &mut timers, now);

        let foreign = timers.schedule(Duration::from_millis(5), now);
        assert!(!watcher.on_timer(foreign, viewport()));
    }

    #[test]
    fn test_disconnect_is_idempotent_and_stops_observation() {
        let mut timers = TimerService::new();
        let now = Instant::now();
        let (mut watcher, handle) = watcher_for(Some(Rect::new(0.0, 2000.0, 600.0, 100.0)));
        let (entered, _) = count_edges(&watcher);
        watcher.activate(viewport(), &mut timers, now);

        watcher.disconnect(&mut timers);
        watcher.disconnect(&mut timers);
        assert!(!watcher.is_connected());
        assert_eq!(timers.pending_count(), 0);

        handle.set_rect(Some(Rect::new(0.0, 400.0, 600.0, 100.0)));
        watcher.observe(viewport());
        assert_eq!(entered.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_missing_layout_is_a_noop() {
        let (mut watcher, _handle) = watcher_for(None);
        let (entered, exited) = count_edges(&watcher);
        watcher.observe(viewport());
        assert_eq!(entered.load(Ordering::SeqCst), 0);
        assert_eq!(exited.load(Ordering::SeqCst), 0);
    }
}
