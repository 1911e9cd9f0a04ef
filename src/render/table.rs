use std::fmt::Write;

use crate::pipeline::rank::{RankedEntry, TOP_N};

const BAR_WIDTH: u64 = 40;
const WORD_WIDTH: usize = 16;

/// Ranked listing with a proportional `#` bar per word.
pub fn format_table(top: &[RankedEntry]) -> String {
    let mut out = format!("词频排名前{}的词汇:\n", TOP_N);

    let Some(max) = top.iter().map(RankedEntry::count).max() else {
        out.push_str("(暂无数据: no word meets the minimum frequency)\n");
        return out;
    };

    let _ = writeln!(out, "{:>3} | {:<width$} | {:>6} |", "#", "Word", "Count", width = WORD_WIDTH);
    let _ = writeln!(out, "{}", "-".repeat(WORD_WIDTH + 17));
    for (i, entry) in top.iter().enumerate() {
        let bar = (entry.count() * BAR_WIDTH).div_ceil(max) as usize;
        let _ = writeln!(
            out,
            "{:>3} | {:<width$} | {:>6} | {}",
            i + 1,
            display_word(entry.word()),
            entry.count(),
            "#".repeat(bar),
            width = WORD_WIDTH
        );
    }
    out
}

/// Make whitespace and control tokens visible and keep long ones short.
fn display_word(word: &str) -> String {
    let visible = if word.chars().any(|c| c.is_whitespace() || c.is_control()) {
        format!("{:?}", word)
    } else {
        word.to_string()
    };
    truncate(&visible, WORD_WIDTH)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max - 3).collect();
        format!("{}...", truncated)
    }
}
