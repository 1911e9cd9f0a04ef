use super::count::FrequencyTable;

/// Keep entries with `count >= min_count`, preserving their order.
///
/// Returns a new table; an empty result is valid.
pub fn filter(table: &FrequencyTable, min_count: u64) -> FrequencyTable {
    let mut kept = FrequencyTable::new();
    for (word, count) in table.iter().filter(|&(_, c)| c >= min_count) {
        kept.push(word.to_string(), count);
    }
    kept
}
