//! CMS content access and slice-based page assembly.
//!
//! Pages are fetched from a [`ContentProvider`] as documents of typed
//! slices, then assembled through a [`SliceRegistry`] that maps slice
//! type tags to renderers. Unknown tags degrade to placeholders and
//! failed fetches to a fallback page; content problems never panic the
//! front end.

mod page;
mod provider;
mod registry;

pub use page::{FallbackKind, PageRender, render_page};
pub use provider::{ContentError, ContentProvider, InMemoryProvider, Slice, SliceDocument};
pub use registry::{RenderedSlice, SliceRegistry};
