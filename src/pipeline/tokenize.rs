use clap::ValueEnum;
use jieba_rs::Jieba;
use serde::Deserialize;
use unicode_segmentation::UnicodeSegmentation;

/// Splits raw text into word tokens.
///
/// Implementations pass segments through untouched: no case folding, no
/// stop-word removal, no punctuation stripping.
pub trait Tokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str>;

    fn name(&self) -> &'static str;
}

/// Dictionary + HMM segmentation. Handles scripts without spaces between
/// words (Chinese in particular). Every segment is kept, including
/// whitespace and punctuation runs.
pub struct JiebaTokenizer {
    jieba: Jieba,
}

impl JiebaTokenizer {
    pub fn new() -> Self {
        Self { jieba: Jieba::new() }
    }
}

impl Default for JiebaTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for JiebaTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.jieba.cut(text, true)
    }

    fn name(&self) -> &'static str {
        "jieba"
    }
}

/// UAX #29 word boundaries. Drops whitespace and punctuation; CJK text comes
/// out one ideograph per token.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeWordTokenizer;

impl Tokenizer for UnicodeWordTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.unicode_words().collect()
    }

    fn name(&self) -> &'static str {
        "unicode"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split_whitespace().collect()
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerKind {
    #[default]
    Jieba,
    Unicode,
    Whitespace,
}

impl TokenizerKind {
    pub fn build(self) -> Box<dyn Tokenizer> {
        match self {
            TokenizerKind::Jieba => Box::new(JiebaTokenizer::new()),
            TokenizerKind::Unicode => Box::new(UnicodeWordTokenizer),
            TokenizerKind::Whitespace => Box::new(WhitespaceTokenizer),
        }
    }
}
