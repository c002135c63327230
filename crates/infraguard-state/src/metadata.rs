use infraguard_types::Range;
use serde::{Deserialize, Serialize};

/// Provenance of a value in the source tree: where it was declared and what it belongs to.
///
/// Metadata is fixed at construction. There are no setters; nested attribution is expressed by
/// building a child with [`Metadata::with_parent`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    range: Range,
    #[serde(default)]
    reference: String,
    /// False for synthetic nodes the producer filled in without a source declaration.
    #[serde(default = "managed_default")]
    managed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent: Option<Box<Metadata>>,
}

fn managed_default() -> bool {
    true
}

impl Default for Metadata {
    fn default() -> Self {
        Metadata::unmanaged()
    }
}

impl Metadata {
    pub fn new(range: Range, reference: impl Into<String>) -> Self {
        Self {
            range,
            reference: reference.into(),
            managed: true,
            parent: None,
        }
    }

    /// Metadata for values that have no source declaration at all.
    pub fn unmanaged() -> Self {
        Self {
            range: Range::default(),
            reference: String::new(),
            managed: false,
            parent: None,
        }
    }

    /// Fixed metadata for hand-built test states.
    pub fn test() -> Self {
        Self::new(Range::new("test.tf", 123, 123), "test")
    }

    /// Attach `parent` as the enclosing node of this value.
    pub fn with_parent(mut self, parent: &Metadata) -> Self {
        self.parent = Some(Box::new(parent.clone()));
        self
    }

    pub fn range(&self) -> &Range {
        &self.range
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn parent(&self) -> Option<&Metadata> {
        self.parent.as_deref()
    }

    pub fn is_managed(&self) -> bool {
        self.managed
    }

    /// The outermost ancestor (the metadata itself when it has no parent).
    pub fn root(&self) -> &Metadata {
        let mut current = self;
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    /// This metadata followed by each ancestor, innermost first.
    pub fn breadcrumbs(&self) -> Vec<&Metadata> {
        let mut out = vec![self];
        let mut current = self;
        while let Some(parent) = current.parent() {
            out.push(parent);
            current = parent;
        }
        out
    }

    /// The nearest non-empty reference, walking up through parents.
    pub fn effective_reference(&self) -> &str {
        self.breadcrumbs()
            .into_iter()
            .map(Metadata::reference)
            .find(|r| !r.is_empty())
            .unwrap_or("")
    }
}

/// Anything in the state tree that owns a [`Metadata`].
pub trait HasMetadata {
    fn metadata(&self) -> &Metadata;
}

impl HasMetadata for Metadata {
    fn metadata(&self) -> &Metadata {
        self
    }
}
