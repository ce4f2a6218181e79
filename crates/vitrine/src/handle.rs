//! Explicit element handles.
//!
//! Controllers never reach into ambient element state; each one receives
//! [`ElementHandle`]s at construction and mutates only through them. A
//! handle owns the animatable visual state of one element (opacity,
//! offsets, box height, scale, visibility) plus the element's current
//! layout rectangle, which the host updates as layout changes.
//!
//! Handles are cheaply cloneable; clones share the same element state.

use std::sync::Arc;

use parking_lot::Mutex;
use vitrine_core::Rect;

/// Animatable visual state of one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementStyle {
    /// Opacity from 0.0 (transparent) to 1.0 (opaque).
    pub opacity: f32,
    /// Horizontal offset from the element's laid-out position.
    pub offset_x: f32,
    /// Vertical offset from the element's laid-out position.
    pub offset_y: f32,
    /// Animated box height override. `None` means natural height.
    pub height: Option<f32>,
    /// Uniform scale factor.
    pub scale: f32,
    /// Whether the element participates in rendering at all.
    pub visible: bool,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            height: None,
            scale: 1.0,
            visible: true,
        }
    }
}

/// Internal shared state for one element.
#[derive(Debug, Default)]
struct ElementState {
    style: ElementStyle,
    /// Current layout rectangle in viewport coordinates, if laid out.
    rect: Option<Rect>,
}

/// A shared handle to one element's visual state.
///
/// A handle whose element has not been laid out yet reports
/// [`rect()`](Self::rect) as `None`; controllers treat that as "skip the
/// animation step" rather than an error.
#[derive(Debug, Clone, Default)]
pub struct ElementHandle {
    state: Arc<Mutex<ElementState>>,
}

impl ElementHandle {
    /// Create a handle for an element with no layout yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handle with a known layout rectangle.
    pub fn with_rect(rect: Rect) -> Self {
        let handle = Self::new();
        handle.set_rect(Some(rect));
        handle
    }

    /// Update the layout rectangle. The host calls this whenever layout
    /// or scroll position changes the element's viewport-space geometry.
    pub fn set_rect(&self, rect: Option<Rect>) {
        self.state.lock().rect = rect;
    }

    /// Current layout rectangle, if the element is laid out.
    pub fn rect(&self) -> Option<Rect> {
        self.state.lock().rect
    }

    /// The element's natural content height: its laid-out height, or 0.0
    /// if not laid out yet. A zero measurement is accepted behavior, not
    /// a failure.
    pub fn natural_height(&self) -> f32 {
        self.state.lock().rect.map(|r| r.height).unwrap_or(0.0)
    }

    /// Snapshot the current visual style.
    pub fn style(&self) -> ElementStyle {
        self.state.lock().style
    }

    /// Mutate the visual style in place.
    pub fn apply(&self, f: impl FnOnce(&mut ElementStyle)) {
        f(&mut self.state.lock().style);
    }

    /// Set opacity.
    pub fn set_opacity(&self, opacity: f32) {
        self.apply(|s| s.opacity = opacity.clamp(0.0, 1.0));
    }

    /// Set both offsets.
    pub fn set_offset(&self, x: f32, y: f32) {
        self.apply(|s| {
            s.offset_x = x;
            s.offset_y = y;
        });
    }

    /// Set the animated height override.
    pub fn set_height(&self, height: Option<f32>) {
        self.apply(|s| s.height = height);
    }

    /// Set the scale factor.
    pub fn set_scale(&self, scale: f32) {
        self.apply(|s| s.scale = scale);
    }

    /// Set visibility.
    pub fn set_visible(&self, visible: bool) {
        self.apply(|s| s.visible = visible);
    }

    /// Whether two handles refer to the same element state.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

static_assertions::assert_impl_all!(ElementHandle: Send, Sync);
