//! Content documents and the provider abstraction.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Errors surfaced by a content provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    /// The requested document does not exist.
    #[error("document not found: {0}")]
    NotFound(String),
    /// The backing store could not be reached or answered malformed.
    #[error("content transport failed: {0}")]
    Transport(String),
}

/// One content block within a document.
///
/// The `slice_type` tag selects a renderer; `fields` carries the
/// renderer-specific payload untyped, so documents with slice types this
/// build does not know about still deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    pub slice_type: String,
    #[serde(default)]
    pub fields: serde_json::Value,
}

impl Slice {
    /// A slice with a type tag and payload.
    pub fn new(slice_type: impl Into<String>, fields: serde_json::Value) -> Self {
        Self {
            slice_type: slice_type.into(),
            fields,
        }
    }
}

/// A fetched document: an identifier plus its ordered slices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceDocument {
    pub id: String,
    #[serde(default)]
    pub slices: Vec<Slice>,
}

impl SliceDocument {
    /// An empty document with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            slices: Vec::new(),
        }
    }

    /// Append a slice. Builder style.
    pub fn with_slice(mut self, slice: Slice) -> Self {
        self.slices.push(slice);
        self
    }
}

/// Fetches documents by identifier.
///
/// Implementations wrap whatever the deployment uses: an HTTP CMS
/// client, a static export on disk, or the in-memory store tests use.
pub trait ContentProvider: Send + Sync {
    /// Fetch the document with the given id.
    fn fetch(&self, id: &str) -> Result<SliceDocument, ContentError>;
}

/// A provider backed by a map, for tests and static builds.
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    documents: HashMap<String, SliceDocument>,
    /// When set, every fetch fails with this transport message.
    outage: Option<String>,
}

impl InMemoryProvider {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document, keyed by its id. Builder style.
    pub fn with_document(mut self, document: SliceDocument) -> Self {
        self.documents.insert(document.id.clone(), document);
        self
    }

    /// Make every fetch fail, simulating an unreachable backend.
    pub fn with_outage(mut self, message: impl Into<String>) -> Self {
        self.outage = Some(message.into());
        self
    }
}

impl ContentProvider for InMemoryProvider {
    fn fetch(&self, id: &str) -> Result<SliceDocument, ContentError> {
        if let Some(message) = &self.outage {
            return Err(ContentError::Transport(message.clone()));
        }
        self.documents
            .get(id)
            .cloned()
            .ok_or_else(|| ContentError::NotFound(id.to_owned()))
    }
}
