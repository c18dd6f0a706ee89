use std::collections::hash_map::{self, Entry};
use std::collections::HashMap;

use serde::Serialize;

use crate::ChunkDescriptor;

/// Word to occurrence count. A word that was never recorded is absent, never zero.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Tally {
    counts: HashMap<String, u64>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            counts: HashMap::with_capacity(capacity),
        }
    }

    /// Counts one more occurrence of `word`.
    pub fn record(&mut self, word: &str) {
        // Avoid allocating a key for words already present.
        if let Some(count) = self.counts.get_mut(word) {
            *count += 1;
        } else {
            self.counts.insert(word.to_owned(), 1);
        }
    }

    pub fn add(&mut self, word: impl Into<String>, count: u64) {
        if count == 0 {
            return;
        }
        *self.counts.entry(word.into()).or_insert(0) += count;
    }

    /// Folds `other` into `self` by summing counts per word.
    pub fn merge(&mut self, other: Tally) {
        if self.counts.is_empty() {
            self.counts = other.counts;
            return;
        }
        self.counts.reserve(other.counts.len());
        for (word, count) in other.counts {
            match self.counts.entry(word) {
                Entry::Occupied(mut slot) => *slot.get_mut() += count,
                Entry::Vacant(slot) => {
                    slot.insert(count);
                }
            }
        }
    }

    pub fn get(&self, word: &str) -> Option<u64> {
        self.counts.get(word).copied()
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the number of tokens that were tallied.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, u64> {
        self.counts.iter()
    }

    /// The `n` most frequent words, highest count first, ties in alphabetical order.
    pub fn top(&self, n: usize) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self
            .counts
            .iter()
            .map(|(word, count)| (word.as_str(), *count))
            .collect();
        entries.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(n);
        entries
    }

    pub fn into_inner(self) -> HashMap<String, u64> {
        self.counts
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for Tally {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut tally = Tally::new();
        for (word, count) in iter {
            tally.add(word, count);
        }
        tally
    }
}

impl<'a> IntoIterator for &'a Tally {
    type Item = (&'a String, &'a u64);
    type IntoIter = hash_map::Iter<'a, String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}

/// Counts the words of `tokens` that fall inside `chunk`.
///
/// The descriptor must come from a splitter run over a buffer of at least
/// `chunk.end()` tokens; the slice is bounds-checked.
pub fn count_range<S: AsRef<str>>(tokens: &[S], chunk: ChunkDescriptor) -> Tally {
    let mut tally = Tally::new();
    for word in &tokens[chunk.range()] {
        tally.record(word.as_ref());
    }
    tally
}
