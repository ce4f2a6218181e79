//! Slice type tag to renderer mapping.

use std::collections::HashMap;
use std::fmt;

use vitrine_core::logging::targets;

use super::provider::Slice;

/// A renderer: turns a slice's payload into host markup, or `None` to
/// omit the slice from the page (e.g. a variant this layout hides).
type Renderer = Box<dyn Fn(&serde_json::Value) -> Option<String> + Send + Sync>;

/// The outcome of rendering one slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedSlice {
    /// Markup from the matched renderer.
    Markup(String),
    /// No renderer registered for the slice's type tag. Carries the tag
    /// so fallback chrome can label it.
    Placeholder(String),
}

/// Maps slice type tags to renderers.
///
/// An unknown tag renders as a [`RenderedSlice::Placeholder`] rather than
/// failing the page: content editors ship new slice types ahead of front
/// end releases, and a page with one unknown block must still render the
/// rest.
#[derive(Default)]
pub struct SliceRegistry {
    renderers: HashMap<String, Renderer>,
}

impl SliceRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a renderer for a slice type tag, replacing any previous
    /// one. Builder style.
    pub fn with_renderer<F>(mut self, slice_type: impl Into<String>, renderer: F) -> Self
    where
        F: Fn(&serde_json::Value) -> Option<String> + Send + Sync + 'static,
    {
        self.renderers.insert(slice_type.into(), Box::new(renderer));
        self
    }

    /// Whether a renderer exists for the tag.
    pub fn knows(&self, slice_type: &str) -> bool {
        self.renderers.contains_key(slice_type)
    }

    /// Number of registered renderers.
    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    /// Render one slice. `None` means the renderer chose to omit it.
    pub fn render(&self, slice: &Slice) -> Option<RenderedSlice> {
        match self.renderers.get(&slice.slice_type) {
            Some(renderer) => renderer(&slice.fields).map(RenderedSlice::Markup),
            None => {
                tracing::warn!(
                    target: targets::CONTENT,
                    slice_type = %slice.slice_type,
                    "no renderer for slice type"
                );
                Some(RenderedSlice::Placeholder(slice.slice_type.clone()))
            }
        }
    }
}

impl fmt::Debug for SliceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<_> = self.renderers.keys().collect();
        tags.sort();
        f.debug_struct("SliceRegistry").field("tags", &tags).finish()
    }
}

static_assertions::assert_impl_all!(SliceRegistry: Send, Sync);
