use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Who is responsible for compiling a companion file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Companion {
    /// A source file includes the companion explicitly.
    Claimed(String),
    /// Nobody includes it; the aggregator must.
    Unclaimed(String),
}

impl Companion {
    pub fn name(&self) -> &str {
        match self {
            Companion::Claimed(name) | Companion::Unclaimed(name) => name,
        }
    }

    pub fn is_claimed(&self) -> bool {
        matches!(self, Companion::Claimed(_))
    }
}

/// Companion requests keyed by the file the companion is generated from.
///
/// Each key holds exactly one variant, so a file can never be both claimed
/// and unclaimed. Iteration is ordered by key.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CompanionMap {
    entries: BTreeMap<PathBuf, Companion>,
}

impl CompanionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &Path) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &Path) -> Option<&Companion> {
        self.entries.get(key)
    }

    /// Records an explicit include. Overrides any earlier entry for `key`,
    /// including an unclaimed one; returns the replaced entry.
    pub fn claim(&mut self, key: PathBuf, name: impl Into<String>) -> Option<Companion> {
        self.entries.insert(key, Companion::Claimed(name.into()))
    }

    /// Records an inferred request unless `key` is already known.
    /// Returns whether the entry was added.
    pub fn propose(&mut self, key: PathBuf, name: impl Into<String>) -> bool {
        match self.entries.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(Companion::Unclaimed(name.into()));
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &Companion)> {
        self.entries.iter().map(|(key, companion)| (key.as_path(), companion))
    }

    pub fn claimed(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.iter()
            .filter(|(_, companion)| companion.is_claimed())
            .map(|(key, companion)| (key, companion.name()))
    }

    pub fn unclaimed(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.iter()
            .filter(|(_, companion)| !companion.is_claimed())
            .map(|(key, companion)| (key, companion.name()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
