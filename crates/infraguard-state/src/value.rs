use crate::metadata::{HasMetadata, Metadata};
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Whether a value was written in the source or filled in as an implicit default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Explicit,
    Default,
}

fn explicit() -> Provenance {
    Provenance::Explicit
}

/// A scalar from the state tree together with where it came from.
///
/// Comparison and hashing only look at the wrapped value; two values declared on different lines
/// are equal if they hold the same thing.
#[derive(Clone, Debug, Serialize)]
pub struct Managed<T> {
    value: T,
    metadata: Metadata,
    provenance: Provenance,
}

pub type BoolValue = Managed<bool>;
pub type StringValue = Managed<String>;
pub type IntValue = Managed<i64>;

impl<T> Managed<T> {
    pub fn explicit(value: T, metadata: Metadata) -> Self {
        Self {
            value,
            metadata,
            provenance: Provenance::Explicit,
        }
    }

    pub fn defaulted(value: T, metadata: Metadata) -> Self {
        Self {
            value,
            metadata,
            provenance: Provenance::Default,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    pub fn is_explicit(&self) -> bool {
        self.provenance == Provenance::Explicit
    }

    pub fn is_default(&self) -> bool {
        self.provenance == Provenance::Default
    }
}

impl<T: Default> Default for Managed<T> {
    fn default() -> Self {
        Managed::defaulted(T::default(), Metadata::unmanaged())
    }
}

impl<T> HasMetadata for Managed<T> {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

impl<T: PartialEq> PartialEq for Managed<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq> Eq for Managed<T> {}

impl<T: PartialOrd> PartialOrd for Managed<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<T: Ord> Ord for Managed<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T: Hash> Hash for Managed<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

/// Wire forms accepted from producers: the full record, or a bare scalar.
#[derive(Deserialize)]
#[serde(untagged)]
enum ManagedRepr<T> {
    Full {
        value: T,
        #[serde(default)]
        metadata: Metadata,
        #[serde(default = "explicit")]
        provenance: Provenance,
    },
    Bare(T),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Managed<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match ManagedRepr::<T>::deserialize(deserializer)? {
            ManagedRepr::Full {
                value,
                metadata,
                provenance,
            } => Managed {
                value,
                metadata,
                provenance,
            },
            ManagedRepr::Bare(value) => Managed::explicit(value, Metadata::unmanaged()),
        })
    }
}

/// A boolean as a rule sees it: explicitly set either way, or left to its default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TriState {
    True,
    False,
    Unset,
}

impl BoolValue {
    pub fn state(&self) -> TriState {
        match (self.provenance, self.value) {
            (Provenance::Default, _) => TriState::Unset,
            (Provenance::Explicit, true) => TriState::True,
            (Provenance::Explicit, false) => TriState::False,
        }
    }

    pub fn is_explicitly_true(&self) -> bool {
        self.state() == TriState::True
    }

    pub fn is_explicitly_false(&self) -> bool {
        self.state() == TriState::False
    }

    pub fn is_unset(&self) -> bool {
        self.state() == TriState::Unset
    }
}

impl PartialEq<bool> for BoolValue {
    fn eq(&self, other: &bool) -> bool {
        self.value == *other
    }
}

impl StringValue {
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn equals_ignore_case(&self, other: &str) -> bool {
        self.value.eq_ignore_ascii_case(other)
    }
}

impl PartialEq<str> for StringValue {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl PartialEq<&str> for StringValue {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}

impl PartialEq<i64> for IntValue {
    fn eq(&self, other: &i64) -> bool {
        self.value == *other
    }
}
