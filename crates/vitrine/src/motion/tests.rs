//! Cross-controller scenarios: watcher feeding animators, shared timer
//! dispatch, group exclusivity between live panels.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use vitrine_core::{Rect, TimerService};

use crate::handle::ElementHandle;
use crate::motion::easing::Easing;
use crate::motion::group::ToggleGroupRegistry;
use crate::motion::media::{MediaConfig, MediaPlaybackController};
use crate::motion::modal::{ModalConfig, ModalController, ModalSlots, ModalState};
use crate::motion::panel::{ExpandCollapsePanel, PanelConfig, PanelState};
use crate::motion::reveal::{RevealConfig, StaggeredRevealAnimator};
use crate::motion::viewport::{EnterEdge, ViewportWatcher, ViewportWatcherConfig};

fn setup() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn viewport() -> Rect {
    Rect::new(0.0, 0.0, 1280.0, 800.0)
}

fn edge_sink(watcher: &ViewportWatcher) -> Arc<Mutex<Vec<EnterEdge>>> {
    let sink = Arc::new(Mutex::new(Vec::new()));
    let s = sink.clone();
    watcher.entered.connect(move |edge| s.lock().push(*edge));
    sink
}

#[test]
fn test_scroll_reveals_staggered_cards_end_to_end() {
    setup();
    let mut timers = TimerService::new();
    let now = Instant::now();

    // A card grid well below the fold.
    let container = ElementHandle::with_rect(Rect::new(0.0, 2400.0, 1280.0, 400.0));
    let cards: Vec<ElementHandle> = (0..4).map(|_| ElementHandle::new()).collect();

    let mut watcher = ViewportWatcher::new(container.clone(), ViewportWatcherConfig::default());
    let edges = edge_sink(&watcher);
    let config = RevealConfig::default()
        .with_duration(ms(100))
        .with_stagger_interval(ms(50))
        .with_easing(Easing::Linear);
    let mut group = StaggeredRevealAnimator::new(cards.clone(), config);

    // Initial paint: below the fold, nothing fires, cards untouched.
    watcher.activate(viewport(), &mut timers, now);
    watcher.observe(viewport());
    assert!(edges.lock().is_empty());
    assert_eq!(cards[0].style().opacity, 1.0);

    // Visitor scrolls; the grid crosses into the trigger band.
    container.set_rect(Some(Rect::new(0.0, 950.0, 1280.0, 400.0)));
    watcher.observe(viewport());
    assert_eq!(edges.lock().as_slice(), &[EnterEdge::FirstReveal]);

    let animate_at = now + ms(200);
    for edge in edges.lock().drain(..) {
        group.handle_enter(edge, animate_at);
    }
    assert_eq!(cards[0].style().opacity, 0.0);

    group.tick(animate_at + ms(125));
    assert_eq!(cards[0].style().opacity, 1.0);
    assert_eq!(cards[1].style().opacity, 0.75);
    assert_eq!(cards[2].style().opacity, 0.25);
    assert_eq!(cards[3].style().opacity, 0.0);

    group.tick(animate_at + ms(250));
    for card in &cards {
        assert_eq!(card.style().opacity, 1.0);
        assert_eq!(card.style().offset_y, 0.0);
    }

    // Scroll far past, then back: a fresh episode animates again.
    container.set_rect(Some(Rect::new(0.0, -900.0, 1280.0, 400.0)));
    watcher.observe(viewport());
    group.handle_exit();
    assert_eq!(cards[2].style().opacity, 0.0);

    container.set_rect(Some(Rect::new(0.0, 300.0, 1280.0, 400.0)));
    watcher.observe(viewport());
    assert_eq!(edges.lock().as_slice(), &[EnterEdge::FirstReveal]);
}

#[test]
fn test_watcher_recheck_and_media_hide_share_one_timer_service() {
    setup();
    let mut timers = TimerService::new();
    let now = Instant::now();

    // Watcher with no layout yet plus a playing video, both on the same
    // service. Each controller must consume only its own id.
    let target = ElementHandle::new();
    let mut watcher = ViewportWatcher::new(target.clone(), ViewportWatcherConfig::default());
    let edges = edge_sink(&watcher);
    watcher.activate(viewport(), &mut timers, now);

    let mut media = MediaPlaybackController::new(MediaConfig::default().with_hide_delay(ms(500)));
    media.toggle_playback(&mut timers, now);
    assert_eq!(timers.pending_count(), 2);

    // Layout lands before the 100ms re-check.
    target.set_rect(Some(Rect::new(0.0, 200.0, 600.0, 100.0)));

    for id in timers.fire_due(now + ms(100)) {
        let consumed = watcher.on_timer(id, viewport()) || media.on_timer(id);
        assert!(consumed);
    }
    assert_eq!(edges.lock().as_slice(), &[EnterEdge::AlreadyVisible]);
    assert!(media.controls_visible());

    for id in timers.fire_due(now + ms(500)) {
        let consumed = watcher.on_timer(id, viewport()) || media.on_timer(id);
        assert!(consumed);
    }
    assert!(!media.controls_visible());
    assert_eq!(timers.pending_count(), 0);
}

#[test]
fn test_panel_group_exclusivity_closes_previous_panel() {
    setup();
    let registry = ToggleGroupRegistry::new();
    let config = PanelConfig::default()
        .with_height_duration(ms(50))
        .with_slide_duration(ms(50));

    let mut panels: Vec<ExpandCollapsePanel> = (0..2)
        .map(|_| {
            ExpandCollapsePanel::new(
                ElementHandle::new(),
                ElementHandle::with_rect(Rect::new(0.0, 0.0, 600.0, 240.0)),
                ElementHandle::with_rect(Rect::new(0.0, 100.0, 600.0, 40.0)),
                config,
            )
        })
        .collect();
    let members: Vec<_> = (0..2).map(|_| registry.register("faq")).collect();

    let mut now = Instant::now();
    let mut settle = |panels: &mut Vec<ExpandCollapsePanel>, now: &mut Instant| {
        for _ in 0..8 {
            *now += ms(50);
            for panel in panels.iter_mut() {
                panel.tick(*now);
            }
        }
    };

    // Open the first panel.
    assert_eq!(registry.open("faq", members[0]), None);
    panels[0].toggle(now);
    settle(&mut panels, &mut now);
    assert!(panels[0].is_open());

    // Opening the second displaces the first; the host closes it.
    let displaced = registry.open("faq", members[1]);
    assert_eq!(displaced, Some(members[0]));
    let index = members.iter().position(|&m| Some(m) == displaced);
    if let Some(i) = index {
        panels[i].toggle(now);
    }
    panels[1].toggle(now);
    settle(&mut panels, &mut now);

    assert_eq!(panels[0].state(), PanelState::Closed);
    assert!(panels[1].is_open());
    assert!(registry.is_open("faq", members[1]));
}

#[test]
fn test_modal_close_reentrancy_is_inert() {
    setup();
    let slots = ModalSlots {
        backdrop: Some(ElementHandle::new()),
        content: Some(ElementHandle::new()),
        close_primary: Some(ElementHandle::new()),
        close_compact: Some(ElementHandle::new()),
    };
    let mut modal = ModalController::new(ModalConfig::default());
    let states = Arc::new(Mutex::new(Vec::new()));
    let s = states.clone();
    modal.state_changed.connect(move |state| s.lock().push(*state));

    let mut now = Instant::now();
    modal.open(slots, now);
    now += ms(1000);
    modal.tick(now);

    modal.close(now);
    // Frantic clicking during the exit animation changes nothing.
    modal.on_backdrop_click(now + ms(50));
    modal.close(now + ms(80));
    assert!(modal.is_open());

    modal.tick(now + ms(2000));
    assert_eq!(
        states.lock().as_slice(),
        &[
            ModalState::Opening,
            ModalState::Open,
            ModalState::Closing,
            ModalState::Closed,
        ]
    );
}
