//! Page assembly with graceful degradation.

use vitrine_core::logging::targets;

use super::provider::{ContentError, ContentProvider};
use super::registry::{RenderedSlice, SliceRegistry};

/// Why a fallback page was shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackKind {
    /// The document does not exist.
    NotFound,
    /// The provider failed.
    Error,
}

/// The outcome of assembling a page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageRender {
    /// The document rendered; slices in document order, omitted slices
    /// dropped.
    Document {
        id: String,
        slices: Vec<RenderedSlice>,
    },
    /// The document could not be fetched; the host shows its fallback
    /// page.
    Fallback { kind: FallbackKind },
}

impl PageRender {
    /// Whether this is a fallback render.
    pub fn is_fallback(&self) -> bool {
        matches!(self, PageRender::Fallback { .. })
    }
}

/// Fetch `id` from `provider` and render its slices through `registry`.
///
/// Content failures degrade to a [`PageRender::Fallback`] and are logged;
/// they never propagate as errors, so one broken document cannot take
/// down navigation.
pub fn render_page(
    provider: &dyn ContentProvider,
    registry: &SliceRegistry,
    id: &str,
) -> PageRender {
    let document = match provider.fetch(id) {
        Ok(document) => document,
        Err(ContentError::NotFound(id)) => {
            tracing::warn!(target: targets::CONTENT, %id, "document not found, showing fallback");
            return PageRender::Fallback {
                kind: FallbackKind::NotFound,
            };
        }
        Err(error @ ContentError::Transport(_)) => {
            tracing::warn!(target: targets::CONTENT, %id, %error, "content fetch failed, showing fallback");
            return PageRender::Fallback {
                kind: FallbackKind::Error,
            };
        }
    };

    let slices = document
        .slices
        .iter()
        .filter_map(|slice| registry.render(slice))
        .collect();

    PageRender::Document {
        id: document.id,
        slices,
    }
}
