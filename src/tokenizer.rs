// src/tokenizer.rs

use lazy_static::lazy_static;
use regex::bytes;
use regex::Regex;

use crate::pattern::{self, Category};

/// A substring of a line matched by one category's rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'t> {
    pub text: &'t str,
    pub category: Category,
    /// Byte offsets of the match within its line.
    pub start: usize,
    pub end: usize,
}

/// Han rules need Unicode scripts; English rules run over bytes with ASCII
/// word boundaries.
enum Matcher {
    Unicode(Regex),
    Ascii(bytes::Regex),
}

pub struct TokenizerRules {
    matchers: [Matcher; 4],
}

impl TokenizerRules {
    fn new() -> Self {
        let unicode = |s: &str| {
            Matcher::Unicode(
                Regex::new(s).unwrap_or_else(|e| panic!("Han pattern compile error for '{}': {}", s, e)),
            )
        };
        let ascii = |s: String| {
            Matcher::Ascii(
                bytes::Regex::new(&s)
                    .unwrap_or_else(|e| panic!("English pattern compile error for '{}': {}", s, e)),
            )
        };

        // Order matches Category::index.
        TokenizerRules {
            matchers: [
                unicode(pattern::get_chinese_character_pattern_str()),
                unicode(pattern::get_chinese_word_pattern_str()),
                ascii(pattern::get_english_word_pattern_str()),
                ascii(pattern::get_english_phrase_pattern_str()),
            ],
        }
    }

    /// Matches of `category` in `line`, left to right, non-overlapping.
    pub fn tokens<'r, 't>(&'r self, line: &'t str, category: Category) -> Tokens<'r, 't> {
        let inner = match &self.matchers[category.index()] {
            Matcher::Unicode(re) => TokensInner::Unicode(re.find_iter(line)),
            Matcher::Ascii(re) => TokensInner::Ascii(re.find_iter(line.as_bytes())),
        };
        Tokens { line, category, inner }
    }
}

lazy_static! {
    /// Rules compiled once per process and shared by every scan.
    pub static ref RULES: TokenizerRules = TokenizerRules::new();
}

/// Shorthand for `RULES.tokens(line, category)`.
pub fn tokenize(line: &str, category: Category) -> Tokens<'static, '_> {
    RULES.tokens(line, category)
}

enum TokensInner<'r, 't> {
    Unicode(regex::Matches<'r, 't>),
    Ascii(bytes::Matches<'r, 't>),
}

/// Lazy iterator over one category's tokens in one line.
pub struct Tokens<'r, 't> {
    line: &'t str,
    category: Category,
    inner: TokensInner<'r, 't>,
}

impl<'r, 't> Iterator for Tokens<'r, 't> {
    type Item = Token<'t>;

    fn next(&mut self) -> Option<Token<'t>> {
        let (start, end) = match &mut self.inner {
            TokensInner::Unicode(matches) => matches.next().map(|m| (m.start(), m.end()))?,
            // ASCII-only matches always start and end on char boundaries.
            TokensInner::Ascii(matches) => matches.next().map(|m| (m.start(), m.end()))?,
        };
        Some(Token {
            text: &self.line[start..end],
            category: self.category,
            start,
            end,
        })
    }
}
