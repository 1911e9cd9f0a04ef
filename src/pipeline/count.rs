use std::collections::HashMap;

/// Word → occurrence count, remembering the order words were first seen.
///
/// Iteration yields entries in first-encounter order; ranking relies on that
/// order to break ties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of `word`.
    pub fn add(&mut self, word: &str) {
        match self.index.get(word) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(word.to_string(), self.entries.len());
                self.entries.push((word.to_string(), 1));
            }
        }
    }

    /// Append an entry with a known count. Keys must be unique.
    pub(crate) fn push(&mut self, word: String, count: u64) {
        debug_assert!(!self.index.contains_key(&word));
        self.index.insert(word.clone(), self.entries.len());
        self.entries.push((word, count));
    }

    pub fn get(&self, word: &str) -> Option<u64> {
        self.index.get(word).map(|&i| self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    pub fn max_count(&self) -> Option<u64> {
        self.entries.iter().map(|(_, c)| *c).max()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(w, c)| (w.as_str(), *c))
    }
}

/// Count exact-match occurrences of each token in a single pass.
///
/// No case folding or Unicode normalization: `"Word"` and `"word"` are
/// distinct keys.
pub fn count<'a, I>(tokens: I) -> FrequencyTable
where
    I: IntoIterator<Item = &'a str>,
{
    let mut table = FrequencyTable::new();
    for token in tokens {
        table.add(token);
    }
    table
}

// ── Tests ──
