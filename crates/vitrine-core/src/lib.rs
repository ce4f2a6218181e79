//! Core systems for Vitrine.
//!
//! This crate provides the foundational components of the Vitrine
//! motion/interaction toolkit:
//!
//! - **Signal/Slot System**: Type-safe notification between controllers
//!   and their hosts
//! - **Timer Service**: One-shot deadline bookkeeping with debounce support,
//!   driven by an explicit clock
//! - **Geometry**: Rectangles, viewport bands, and the visibility predicates
//!   the viewport watcher is built on
//!
//! The toolkit is single-threaded and cooperative: nothing in this crate
//! spawns threads or blocks. The host owns the clock and drives every
//! time-dependent operation by passing `Instant` values explicitly, which
//! keeps all timing behavior deterministic under test.
//!
//! # Signal Example
//!
//! ```
//! use vitrine_core::Signal;
//!
//! let opened = Signal::<bool>::new();
//!
//! let conn_id = opened.connect(|&is_open| {
//!     println!("open state: {is_open}");
//! });
//!
//! opened.emit(true);
//! opened.disconnect(conn_id);
//! ```
//!
//! # Timer Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use vitrine_core::TimerService;
//!
//! let mut timers = TimerService::new();
//! let now = Instant::now();
//!
//! let id = timers.schedule(Duration::from_secs(2), now);
//! assert!(timers.fire_due(now).is_empty());
//!
//! let later = now + Duration::from_secs(2);
//! assert_eq!(timers.fire_due(later), vec![id]);
//! ```

mod error;
pub mod geometry;
pub mod logging;
pub mod signal;
mod timer;

pub use error::{CoreError, Result, SignalError, TimerError};
pub use geometry::{BandMargin, Rect};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use timer::{TimerId, TimerService};
