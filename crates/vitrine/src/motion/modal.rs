//! Modal overlay open/close choreography.
//!
//! A modal is four element slots: backdrop, content, and two close-button
//! variants. Opening fades the backdrop, then brings the content up with a
//! scale-and-rise entrance whose start overlaps the backdrop fade by a
//! lead time, then fades the buttons in. Closing runs the same phases in
//! reverse. `is_open` reflects intent from the moment open is requested
//! and stays true through the whole close animation, flipping only on the
//! close timeline's completion edge.
//!
//! Slots are resolved at open time. If any slot is missing the controller
//! performs an immediate unanimated close of whatever is present rather
//! than animating a partial overlay.

use std::time::{Duration, Instant};

use vitrine_core::Signal;
use vitrine_core::logging::targets;

use crate::handle::ElementHandle;

use super::easing::Easing;
use super::timeline::{Timeline, TimelineStatus};
use super::tween::{StyleProp, Tween};

/// Modal lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Opening,
    Open,
    Closing,
}

/// Timing and shape of the modal entrance/exit.
#[derive(Debug, Clone, Copy)]
pub struct ModalConfig {
    /// Backdrop fade duration.
    pub backdrop_duration: Duration,
    /// Content entrance/exit duration.
    pub content_duration: Duration,
    /// Close-button fade duration.
    pub button_duration: Duration,
    /// How far the content phase starts before the backdrop phase ends.
    pub overlap_lead: Duration,
    /// Content starting scale for the entrance.
    pub content_scale_from: f32,
    /// Content starting vertical offset for the entrance.
    pub content_rise: f32,
    /// Easing for the content entrance (overshoot by default).
    pub content_easing: Easing,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            backdrop_duration: Duration::from_millis(200),
            content_duration: Duration::from_millis(350),
            button_duration: Duration::from_millis(200),
            overlap_lead: Duration::from_millis(120),
            content_scale_from: 0.9,
            content_rise: 40.0,
            content_easing: Easing::EaseOutBack,
        }
    }
}

impl ModalConfig {
    /// Set the content entrance duration. Builder style.
    pub fn with_content_duration(mut self, duration: Duration) -> Self {
        self.content_duration = duration;
        self
    }

    /// Set the overlap lead. Builder style.
    pub fn with_overlap_lead(mut self, lead: Duration) -> Self {
        self.overlap_lead = lead;
        self
    }

    fn content_offset(&self) -> Duration {
        self.backdrop_duration.saturating_sub(self.overlap_lead)
    }

    fn button_offset(&self) -> Duration {
        self.content_offset() + self.content_duration.saturating_sub(self.overlap_lead)
    }
}

/// The four slot handles a modal animates, resolved by the host at open
/// time.
#[derive(Debug, Clone)]
pub struct ModalSlots {
    pub backdrop: Option<ElementHandle>,
    pub content: Option<ElementHandle>,
    pub close_primary: Option<ElementHandle>,
    pub close_compact: Option<ElementHandle>,
}

impl ModalSlots {
    fn complete(&self) -> Option<ResolvedSlots> {
        Some(ResolvedSlots {
            backdrop: self.backdrop.clone()?,
            content: self.content.clone()?,
            close_primary: self.close_primary.clone()?,
            close_compact: self.close_compact.clone()?,
        })
    }

    fn present(&self) -> Vec<ElementHandle> {
        [
            &self.backdrop,
            &self.content,
            &self.close_primary,
            &self.close_compact,
        ]
        .into_iter()
        .flatten()
        .cloned()
        .collect()
    }
}

#[derive(Debug, Clone)]
struct ResolvedSlots {
    backdrop: ElementHandle,
    content: ElementHandle,
    close_primary: ElementHandle,
    close_compact: ElementHandle,
}

/// Orchestrates one modal overlay.
pub struct ModalController {
    config: ModalConfig,
    state: ModalState,
    slots: Option<ResolvedSlots>,
    active: Option<Timeline>,
    /// Emitted on every state change.
    pub state_changed: Signal<ModalState>,
}

impl Default for ModalController {
    fn default() -> Self {
        Self::new(ModalConfig::default())
    }
}

impl ModalController {
    /// Create a closed controller.
    pub fn new(config: ModalConfig) -> Self {
        Self {
            config,
            state: ModalState::Closed,
            slots: None,
            active: None,
            state_changed: Signal::new(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ModalState {
        self.state
    }

    /// Whether the modal is conceptually open.
    ///
    /// True from the moment open is requested until the close animation's
    /// completion edge, so backdrop clicks during the close do not
    /// re-trigger anything.
    pub fn is_open(&self) -> bool {
        self.state != ModalState::Closed
    }

    /// Begin the open sequence. No-op unless fully closed.
    pub fn open(&mut self, slots: ModalSlots, now: Instant) {
        if self.state != ModalState::Closed {
            tracing::debug!(target: targets::MODAL, state = ?self.state, "open ignored");
            return;
        }

        let Some(resolved) = slots.complete() else {
            // Partial overlay: hide what exists and stay closed.
            tracing::warn!(target: targets::MODAL, "modal slot missing, closing unanimated");
            for handle in slots.present() {
                hide(&handle);
            }
            self.emit_state(ModalState::Closed);
            return;
        };

        // Pre-animation hidden states, set before the timeline starts.
        resolved.backdrop.apply(|s| {
            s.opacity = 0.0;
            s.visible = true;
        });
        resolved.content.apply(|s| {
            s.opacity = 0.0;
            s.scale = self.config.content_scale_from;
            s.offset_y = self.config.content_rise;
            s.visible = true;
        });
        for button in [&resolved.close_primary, &resolved.close_compact] {
            button.apply(|s| {
                s.opacity = 0.0;
                s.visible = true;
            });
        }

        let mut timeline = self.entrance_timeline(&resolved);
        timeline.start(now);
        self.active = Some(timeline);
        self.slots = Some(resolved);
        self.set_state(ModalState::Opening);
    }

    /// Begin the close sequence. No-op unless open or still opening.
    pub fn close(&mut self, now: Instant) {
        if !matches!(self.state, ModalState::Open | ModalState::Opening) {
            return;
        }
        let Some(slots) = self.slots.clone() else {
            // No resolved slots to animate: close immediately rather than
            // staying stuck open.
            tracing::warn!(target: targets::MODAL, "close without slots, closing unanimated");
            self.active = None;
            self.set_state(ModalState::Closed);
            return;
        };

        // Closing mid-open: snap the entrance to its end first so the exit
        // starts from fully shown values.
        if let Some(timeline) = &mut self.active {
            timeline.jump_to_end();
        }

        let mut timeline = self.exit_timeline(&slots);
        timeline.start(now);
        self.active = Some(timeline);
        self.set_state(ModalState::Closing);
    }

    /// Backdrop click: dismisses the modal.
    pub fn on_backdrop_click(&mut self, now: Instant) {
        self.close(now);
    }

    /// Content click: consumed so it never reaches the backdrop.
    pub fn on_content_click(&self) -> bool {
        true
    }

    /// Advance the in-flight timeline.
    pub fn tick(&mut self, now: Instant) {
        let Some(timeline) = &mut self.active else {
            return;
        };
        if timeline.tick(now) != TimelineStatus::Completed {
            return;
        }
        self.active = None;
        match self.state {
            ModalState::Opening => self.set_state(ModalState::Open),
            ModalState::Closing => {
                if let Some(slots) = &self.slots {
                    hide(&slots.backdrop);
                    hide(&slots.content);
                    hide(&slots.close_primary);
                    hide(&slots.close_compact);
                }
                self.slots = None;
                self.set_state(ModalState::Closed);
            }
            ModalState::Closed | ModalState::Open => {}
        }
    }

    /// Stop animating and disconnect signals. Idempotent.
    pub fn detach(&mut self) {
        if let Some(timeline) = &mut self.active {
            timeline.cancel();
        }
        self.active = None;
        self.slots = None;
        self.state = ModalState::Closed;
        self.state_changed.disconnect_all();
    }

    fn entrance_timeline(&self, slots: &ResolvedSlots) -> Timeline {
        let c = &self.config;
        let mut tl = Timeline::new().step(
            slots.backdrop.clone(),
            Tween::new(StyleProp::Opacity, 0.0, 1.0, c.backdrop_duration, Easing::EaseOut),
            Duration::ZERO,
        );

        let content_offset = c.content_offset();
        tl = tl
            .step(
                slots.content.clone(),
                Tween::new(StyleProp::Opacity, 0.0, 1.0, c.content_duration, Easing::EaseOut),
                content_offset,
            )
            .step(
                slots.content.clone(),
                Tween::new(
                    StyleProp::Scale,
                    c.content_scale_from,
                    1.0,
                    c.content_duration,
                    c.content_easing,
                ),
                content_offset,
            )
            .step(
                slots.content.clone(),
                Tween::new(
                    StyleProp::OffsetY,
                    c.content_rise,
                    0.0,
                    c.content_duration,
                    c.content_easing,
                ),
                content_offset,
            );

        let button_offset = c.button_offset();
        for button in [&slots.close_primary, &slots.close_compact] {
            tl = tl.step(
                button.clone(),
                Tween::new(StyleProp::Opacity, 0.0, 1.0, c.button_duration, Easing::EaseOut),
                button_offset,
            );
        }
        tl
    }

    fn exit_timeline(&self, slots: &ResolvedSlots) -> Timeline {
        let c = &self.config;
        let mut tl = Timeline::new();

        // Reverse order: buttons first, then content, then backdrop, with
        // the same overlap between phases.
        for button in [&slots.close_primary, &slots.close_compact] {
            tl = tl.step(
                button.clone(),
                Tween::new(StyleProp::Opacity, 1.0, 0.0, c.button_duration, Easing::EaseOut),
                Duration::ZERO,
            );
        }

        let content_offset = c.button_duration.saturating_sub(c.overlap_lead);
        tl = tl
            .step(
                slots.content.clone(),
                Tween::new(StyleProp::Opacity, 1.0, 0.0, c.content_duration, Easing::EaseIn),
                content_offset,
            )
            .step(
                slots.content.clone(),
                Tween::new(
                    StyleProp::Scale,
                    1.0,
                    c.content_scale_from,
                    c.content_duration,
                    Easing::EaseIn,
                ),
                content_offset,
            )
            .step(
                slots.content.clone(),
                Tween::new(
                    StyleProp::OffsetY,
                    0.0,
                    c.content_rise,
                    c.content_duration,
                    Easing::EaseIn,
                ),
                content_offset,
            );

        let backdrop_offset =
            content_offset + c.content_duration.saturating_sub(c.overlap_lead);
        tl.step(
            slots.backdrop.clone(),
            Tween::new(StyleProp::Opacity, 1.0, 0.0, c.backdrop_duration, Easing::EaseOut),
            backdrop_offset,
        )
    }

    fn set_state(&mut self, state: ModalState) {
        if self.state != state {
            tracing::debug!(target: targets::MODAL, from = ?self.state, to = ?state, "modal state change");
            self.state = state;
            self.state_changed.emit(state);
        }
    }

    fn emit_state(&mut self, state: ModalState) {
        // Missing-slot path: re-announce Closed even without a change so
        // hosts can settle their toggles.
        self.state = state;
        self.state_changed.emit(state);
    }
}

fn hide(handle: &ElementHandle) {
    handle.apply(|s| {
        s.opacity = 0.0;
        s.visible = false;
    });
}

static_assertions::assert_impl_all!(ModalController: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn full_slots() -> (ModalSlots, ElementHandle, ElementHandle) {
        let backdrop = ElementHandle::new();
        let content = ElementHandle::new();
        let slots = ModalSlots {
            backdrop: Some(backdrop.clone()),
            content: Some(content.clone()),
            close_primary: Some(ElementHandle::new()),
            close_compact: Some(ElementHandle::new()),
        };
        (slots, backdrop, content)
    }

    #[test]
    fn test_open_overlaps_content_with_backdrop() {
        let (slots, backdrop, content) = full_slots();
        let mut modal = ModalController::new(ModalConfig::default());
        let now = Instant::now();
        modal.open(slots, now);
        assert_eq!(modal.state(), ModalState::Opening);

        // Content phase starts 80ms in (200 backdrop - 120 lead), before
        // the backdrop finishes.
        modal.tick(now + ms(100));
        assert!(backdrop.style().opacity < 1.0);
        assert!(content.style().opacity > 0.0);
        assert!(content.style().scale < 1.0);

        modal.tick(now + ms(1000));
        assert_eq!(modal.state(), ModalState::Open);
        assert_eq!(content.style().scale, 1.0);
        assert_eq!(content.style().offset_y, 0.0);
    }

    #[test]
    fn test_is_open_holds_through_close_animation() {
        let (slots, _backdrop, _content) = full_slots();
        let mut modal = ModalController::new(ModalConfig::default());
        let mut now = Instant::now();
        modal.open(slots, now);
        now += ms(1000);
        modal.tick(now);
        assert!(modal.is_open());

        modal.close(now);
        assert_eq!(modal.state(), ModalState::Closing);
        assert!(modal.is_open());

        modal.tick(now + ms(100));
        assert!(modal.is_open());

        modal.tick(now + ms(1000));
        assert_eq!(modal.state(), ModalState::Closed);
        assert!(!modal.is_open());
    }

    #[test]
    fn test_open_while_open_is_noop() {
        let (slots, _backdrop, _content) = full_slots();
        let (slots2, backdrop2, _content2) = full_slots();
        let mut modal = ModalController::new(ModalConfig::default());
        let now = Instant::now();
        modal.open(slots, now);
        modal.open(slots2, now + ms(10));
        // Second set of handles untouched.
        assert_eq!(backdrop2.style().opacity, 1.0);
        assert!(backdrop2.style().visible);
    }

    #[test]
    fn test_missing_slot_closes_unanimated() {
        let backdrop = ElementHandle::new();
        let slots = ModalSlots {
            backdrop: Some(backdrop.clone()),
            content: None,
            close_primary: Some(ElementHandle::new()),
            close_compact: Some(ElementHandle::new()),
        };

        let mut modal = ModalController::new(ModalConfig::default());
        let states = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let s2 = states.clone();
        modal.state_changed.connect(move |s| s2.lock().push(*s));

        modal.open(slots, Instant::now());
        assert_eq!(modal.state(), ModalState::Closed);
        assert!(!backdrop.style().visible);
        assert_eq!(states.lock().as_slice(), &[ModalState::Closed]);
    }

    #[test]
    fn test_close_mid_open_snaps_then_reverses() {
        let (slots, _backdrop, content) = full_slots();
        let mut modal = ModalController::new(ModalConfig::default());
        let now = Instant::now();
        modal.open(slots, now);
        modal.tick(now + ms(50));

        modal.close(now + ms(60));
        // Exit starts from fully shown values.
        assert_eq!(content.style().scale, 1.0);
        assert_eq!(modal.state(), ModalState::Closing);

        modal.tick(now + ms(2000));
        assert_eq!(modal.state(), ModalState::Closed);
        assert!(!content.style().visible);
    }

    #[test]
    fn test_backdrop_click_dismisses_content_click_consumed() {
        let (slots, _backdrop, _content) = full_slots();
        let mut modal = ModalController::new(ModalConfig::default());
        let mut now = Instant::now();
        modal.open(slots, now);
        now += ms(1000);
        modal.tick(now);

        assert!(modal.on_content_click());
        assert_eq!(modal.state(), ModalState::Open);

        modal.on_backdrop_click(now);
        assert_eq!(modal.state(), ModalState::Closing);
    }

    #[test]
    fn test_slot_ordering_buttons_last_on_open() {
        let backdrop = ElementHandle::new();
        let content = ElementHandle::new();
        let primary = ElementHandle::new();
        let slots = ModalSlots {
            backdrop: Some(backdrop.clone()),
            content: Some(content.clone()),
            close_primary: Some(primary.clone()),
            close_compact: Some(ElementHandle::new()),
        };
        let mut modal = ModalController::new(ModalConfig::default());
        let now = Instant::now();
        modal.open(slots, now);

        // 250ms in: backdrop done, content mid-flight, buttons not yet
        // started (offset 80 + 230 = 310ms).
        modal.tick(now + ms(250));
        assert_eq!(backdrop.style().opacity, 1.0);
        assert!(content.style().opacity > 0.0 && content.style().opacity < 1.0);
        assert_eq!(primary.style().opacity, 0.0);
    }
}
