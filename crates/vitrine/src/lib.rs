//! Vitrine: a motion and interaction toolkit for slice-driven showcase UIs.
//!
//! Vitrine implements the client-side behavior layer of a content-managed
//! showcase page: scroll-triggered reveals, staggered group reveals,
//! two-phase expand/collapse panels, modal open/close choreography, and
//! transient media controls, plus the content-side contracts those
//! behaviors hang off (a content provider, a slice registry, and a page
//! renderer with static fallbacks).
//!
//! # Architecture
//!
//! Every controller is an explicit state machine over [`ElementHandle`]s:
//! shared handles to per-element visual state that the host maps onto its
//! actual elements. Controllers never query ambient state: they receive
//! their handles at construction and communicate outward only through
//! [`vitrine_core::Signal`]s.
//!
//! The toolkit is single-threaded and cooperative. The host drives it by:
//!
//! 1. feeding geometry observations into watchers ([`motion::ViewportWatcher::observe`]),
//! 2. forwarding user input to controllers (`toggle`, `open`, `close`, ...),
//! 3. ticking active animations with the current `Instant`,
//! 4. draining the [`vitrine_core::TimerService`] and routing fired timer
//!    ids back to their owners.
//!
//! Phase ordering within one controller is enforced by explicit chaining:
//! a later phase starts only from the completion edge of the previous one,
//! never by coincidental scheduling order.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use vitrine::handle::ElementHandle;
//! use vitrine::motion::{RevealAnimator, RevealConfig};
//! use vitrine::motion::viewport::EnterEdge;
//!
//! let card = ElementHandle::new();
//! let mut reveal = RevealAnimator::new(card.clone(), RevealConfig::default());
//!
//! let now = Instant::now();
//! reveal.handle_enter(EnterEdge::FirstReveal, now);
//! reveal.tick(now + Duration::from_secs(1));
//!
//! assert_eq!(card.style().opacity, 1.0);
//! assert_eq!(card.style().offset_y, 0.0);
//! ```

pub mod content;
pub mod handle;
pub mod motion;

pub use handle::{ElementHandle, ElementStyle};
