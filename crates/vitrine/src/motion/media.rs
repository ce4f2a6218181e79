//! Play/pause control with debounced auto-hiding chrome.
//!
//! While media plays, the control chrome hides after an inactivity delay;
//! any pointer or touch activity shows it again and restarts the delay.
//! The debounce lives in [`TimerService::restart`]: the controller holds
//! at most one pending hide timer, so a burst of activity produces a
//! single deferred hide rather than a queue of them. While paused the
//! chrome stays visible and no timer is pending.

use std::time::{Duration, Instant};

use vitrine_core::logging::targets;
use vitrine_core::{Signal, TimerId, TimerService};

/// Auto-hide timing.
#[derive(Debug, Clone, Copy)]
pub struct MediaConfig {
    /// Inactivity delay before the chrome hides during playback.
    pub hide_delay: Duration,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            hide_delay: Duration::from_secs(2),
        }
    }
}

impl MediaConfig {
    /// Set the inactivity delay. Builder style.
    pub fn with_hide_delay(mut self, delay: Duration) -> Self {
        self.hide_delay = delay;
        self
    }
}

/// Orchestrates one media element's playback toggle and chrome
/// visibility.
///
/// The controller owns no decoder or sink; hosts connect
/// [`playback_changed`](Self::playback_changed) to their media element
/// and [`controls_changed`](Self::controls_changed) to the chrome's
/// show/hide transition.
pub struct MediaPlaybackController {
    config: MediaConfig,
    playing: bool,
    controls_visible: bool,
    hide_timer: Option<TimerId>,
    /// Emitted with the new playing flag on every toggle.
    pub playback_changed: Signal<bool>,
    /// Emitted with the new visibility on every chrome change.
    pub controls_changed: Signal<bool>,
}

impl Default for MediaPlaybackController {
    fn default() -> Self {
        Self::new(MediaConfig::default())
    }
}

impl MediaPlaybackController {
    /// Create a paused controller with visible chrome.
    pub fn new(config: MediaConfig) -> Self {
        Self {
            config,
            playing: false,
            controls_visible: true,
            hide_timer: None,
            playback_changed: Signal::new(),
            controls_changed: Signal::new(),
        }
    }

    /// Whether media is playing.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether the control chrome is shown.
    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    /// Flip between play and pause.
    ///
    /// Starting playback shows the chrome and arms the hide delay;
    /// pausing shows the chrome and cancels any pending hide.
    pub fn toggle_playback(&mut self, timers: &mut TimerService, now: Instant) {
        self.playing = !self.playing;
        tracing::debug!(target: targets::MEDIA, playing = self.playing, "playback toggled");
        self.playback_changed.emit(self.playing);

        self.show_controls();
        if self.playing {
            self.arm_hide(timers, now);
        } else {
            self.cancel_hide(timers);
        }
    }

    /// Pointer moved over the media element.
    pub fn pointer_moved(&mut self, timers: &mut TimerService, now: Instant) {
        self.activity(timers, now);
    }

    /// Touch began on the media element. Same debounce path as pointer
    /// movement.
    pub fn touch_started(&mut self, timers: &mut TimerService, now: Instant) {
        self.activity(timers, now);
    }

    /// Dispatch a fired timer id. Returns true if it was this
    /// controller's hide timer.
    pub fn on_timer(&mut self, id: TimerId) -> bool {
        if self.hide_timer != Some(id) {
            return false;
        }
        self.hide_timer = None;
        // Pausing between schedule and fire cancels the timer, so a fire
        // here always means active playback.
        if self.playing && self.controls_visible {
            self.controls_visible = false;
            tracing::debug!(target: targets::MEDIA, "controls hidden after inactivity");
            self.controls_changed.emit(false);
        }
        true
    }

    /// Cancel the pending hide and disconnect signals. Idempotent.
    pub fn detach(&mut self, timers: &mut TimerService) {
        self.cancel_hide(timers);
        self.playback_changed.disconnect_all();
        self.controls_changed.disconnect_all();
    }

    fn activity(&mut self, timers: &mut TimerService, now: Instant) {
        self.show_controls();
        if self.playing {
            self.arm_hide(timers, now);
        }
    }

    fn show_controls(&mut self) {
        if !self.controls_visible {
            self.controls_visible = true;
            self.controls_changed.emit(true);
        }
    }

    /// At most one pending hide: restart the existing timer when active,
    /// schedule otherwise.
    fn arm_hide(&mut self, timers: &mut TimerService, now: Instant) {
        match self.hide_timer {
            Some(id) if timers.is_active(id) => {
                // A live timer always restarts cleanly.
                let _ = timers.restart(id, self.config.hide_delay, now);
            }
            _ => {
                self.hide_timer = Some(timers.schedule(self.config.hide_delay, now));
            }
        }
    }

    fn cancel_hide(&mut self, timers: &mut TimerService) {
        if let Some(id) = self.hide_timer.take() {
            if timers.is_active(id) {
                let _ = timers.cancel(id);
            }
        }
    }
}

static_assertions::assert_impl_all!(MediaPlaybackController: Send, Sync);
