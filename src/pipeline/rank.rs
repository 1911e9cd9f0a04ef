use serde::Serialize;

use super::count::FrequencyTable;

/// Number of entries handed to the chart and the ranking table.
pub const TOP_N: usize = 20;

/// A (word, count) pair in ranked output. Serializes as `[word, count]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry(pub String, pub u64);

impl RankedEntry {
    pub fn word(&self) -> &str {
        &self.0
    }

    pub fn count(&self) -> u64 {
        self.1
    }
}

/// Top `n` entries by descending count.
///
/// `sort_by` is stable, so equal counts keep the table's iteration order.
/// Fewer than `n` entries are returned as-is, without padding.
pub fn top(table: &FrequencyTable, n: usize) -> Vec<RankedEntry> {
    let mut ranked: Vec<RankedEntry> = table
        .iter()
        .map(|(w, c)| RankedEntry(w.to_string(), c))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);
    ranked
}
