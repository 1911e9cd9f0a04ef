pub mod count;
pub mod filter;
pub mod markup;
pub mod rank;
pub mod tokenize;

use tracing::{info, warn};

use count::FrequencyTable;
use rank::RankedEntry;
use tokenize::Tokenizer;

/// Explicit inputs for one pipeline run.
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    pub min_freq: u64,
    pub top_n: usize,
    pub strip_markup: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_freq: 10,
            top_n: rank::TOP_N,
            strip_markup: false,
        }
    }
}

pub struct PipelineOutput {
    pub token_count: usize,
    pub distinct: usize,
    /// Every entry that met the threshold; feeds the word cloud.
    pub filtered: FrequencyTable,
    /// Top entries of `filtered`; feeds the table and the chart.
    pub top: Vec<RankedEntry>,
}

/// tokenize → count → filter → rank over one document.
pub fn run(text: &str, tokenizer: &dyn Tokenizer, cfg: &PipelineConfig) -> PipelineOutput {
    let stripped;
    let text = if cfg.strip_markup {
        stripped = markup::strip(text);
        stripped.as_str()
    } else {
        text
    };

    let tokens = tokenizer.tokenize(text);
    info!(tokenizer = tokenizer.name(), tokens = tokens.len(), "Tokenized document");

    let token_count = tokens.len();
    let table = count::count(tokens);
    info!(distinct = table.len(), "Counted words");

    let filtered = filter::filter(&table, cfg.min_freq);
    if filtered.is_empty() {
        warn!(
            min_freq = cfg.min_freq,
            max_count = table.max_count().unwrap_or(0),
            "No word meets the minimum frequency"
        );
    } else {
        info!(kept = filtered.len(), min_freq = cfg.min_freq, "Filtered low-frequency words");
    }

    let top = rank::top(&filtered, cfg.top_n);

    PipelineOutput {
        token_count,
        distinct: table.len(),
        filtered,
        top,
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use tokenize::{JiebaTokenizer, WhitespaceTokenizer};

    fn cfg(min_freq: u64) -> PipelineConfig {
        PipelineConfig {
            min_freq,
            ..Default::default()
        }
    }

    #[test]
    fn whitespace_scenario() {
        let out = run("a a b c c c", &WhitespaceTokenizer, &cfg(2));
        assert_eq!(out.token_count, 6);
        assert_eq!(out.distinct, 3);
        assert_eq!(out.filtered.len(), 2);
        assert_eq!(
            out.top,
            vec![RankedEntry("c".into(), 3), RankedEntry("a".into(), 2)]
        );
    }

    #[test]
    fn threshold_above_max_gives_empty_output() {
        let text = "word ".repeat(50);
        let out = run(&text, &WhitespaceTokenizer, &cfg(100));
        assert_eq!(out.token_count, 50);
        assert!(out.filtered.is_empty());
        assert!(out.top.is_empty());
    }

    #[test]
    fn empty_document() {
        let out = run("", &WhitespaceTokenizer, &cfg(1));
        assert_eq!(out.token_count, 0);
        assert!(out.top.is_empty());
    }

    #[test]
    fn markup_kept_unless_stripped() {
        let html = "<b>x</b> <b>x</b>";
        let raw = run(html, &WhitespaceTokenizer, &cfg(1));
        assert_eq!(raw.filtered.get("<b>x</b>"), Some(2));

        let stripped = run(
            html,
            &WhitespaceTokenizer,
            &PipelineConfig {
                min_freq: 1,
                strip_markup: true,
                ..Default::default()
            },
        );
        assert_eq!(stripped.filtered.get("x"), Some(2));
        assert_eq!(stripped.filtered.get("<b>x</b>"), None);
    }

    #[test]
    fn chinese_fixture() {
        let text = std::fs::read_to_string("tests/fixtures/zh_article.txt").unwrap();
        let out = run(&text, &JiebaTokenizer::new(), &cfg(2));
        assert!(!out.top.is_empty());
        assert!(out.top.len() <= rank::TOP_N);
        assert!(out.top.windows(2).all(|w| w[0].count() >= w[1].count()));
        assert!(out.filtered.iter().all(|(_, c)| c >= 2));
        // a multi-character word survives segmentation
        assert!(out.filtered.iter().any(|(w, _)| w == "数据"));
    }
}
