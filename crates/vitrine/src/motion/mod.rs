//! Motion and interaction controllers.
//!
//! This module contains the animation/interaction orchestration layer:
//!
//! - [`easing`]: easing functions, including the overshoot curve used by
//!   panel and modal entries
//! - [`tween`] / [`timeline`]: property interpolation sampled at explicit
//!   instants, with exactly-once completion edges
//! - [`viewport`]: the viewport watcher (trigger band entry, raw-viewport
//!   re-arm)
//! - [`reveal`]: fade-in-on-scroll for single elements and staggered
//!   groups
//! - [`panel`]: two-phase expand/collapse choreography
//! - [`modal`]: overlay dialog open/close sequencing
//! - [`media`]: play/pause with debounced auto-hiding controls
//! - [`group`]: the process-wide toggle-group registry

pub mod easing;
pub mod group;
pub mod media;
pub mod modal;
pub mod panel;
pub mod reveal;
pub mod timeline;
pub mod tween;
pub mod viewport;

pub use easing::{Easing, ease, lerp_eased};
pub use group::{GroupMemberId, ToggleGroupRegistry};
pub use media::{MediaConfig, MediaPlaybackController};
pub use modal::{ModalConfig, ModalController, ModalSlots, ModalState};
pub use panel::{ExpandCollapsePanel, PanelConfig, PanelMachine, PanelState, ScrollRequest};
pub use reveal::{RevealAnimator, RevealConfig, StaggeredRevealAnimator};
pub use timeline::{Timeline, TimelineStatus};
pub use tween::{StyleProp, Tween};
pub use viewport::{EnterEdge, ViewportWatcher, ViewportWatcherConfig, VisibilityState};

#[cfg(test)]
mod tests;
