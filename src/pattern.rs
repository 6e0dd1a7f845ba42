// src/pattern.rs

use std::fmt;

// ----- CATEGORIES -----

/// The four lexical categories a line is split into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    ChineseCharacter,
    ChineseWord,
    EnglishWord,
    EnglishPhrase,
}

impl Category {
    /// Every category, in the order they are scanned and reported.
    pub const ALL: [Category; 4] = [
        Category::ChineseCharacter,
        Category::ChineseWord,
        Category::EnglishWord,
        Category::EnglishPhrase,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_chinese(self) -> bool {
        matches!(self, Category::ChineseCharacter | Category::ChineseWord)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::ChineseCharacter => "chinese-character",
            Category::ChineseWord => "chinese-word",
            Category::EnglishWord => "english-word",
            Category::EnglishPhrase => "english-phrase",
        }
    }

    /// Stem used when naming this category's output files. Chinese characters
    /// and English words keep the short historic names.
    pub fn file_stem(self) -> &'static str {
        match self {
            Category::ChineseCharacter => "chinese",
            Category::ChineseWord => "chinese_words",
            Category::EnglishWord => "english",
            Category::EnglishPhrase => "english_phrases",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ----- REGEX PATTERN PARTS -----

// ASCII character classes. The English rules run with Unicode disabled so
// that a Han character next to a Latin run still counts as a word boundary.
const ALNUM_CLASS: &str = "a-zA-Z0-9";
const WORD_CLASS: &str = "0-9A-Za-z_";
// Space characters recognised inside a phrase. Vertical tab is excluded.
const SPACE_CLASS: &str = r"\t\n\f\r ";

/// A single Han code point.
pub fn get_chinese_character_pattern_str() -> &'static str {
    r"\p{Han}"
}

/// A maximal run of Han code points.
pub fn get_chinese_word_pattern_str() -> &'static str {
    r"\p{Han}+"
}

/// Alphanumerics and apostrophes, optionally joined to one more such run by a
/// single hyphen ("I'll", "micro-video").
pub fn get_english_word_pattern_str() -> String {
    format!(
        r"(?-u)\b[{alnum}']+(?:-[{alnum}']+)?\b",
        alnum = ALNUM_CLASS
    )
}

/// Starts and ends with an alphanumeric; word characters, spaces, apostrophes
/// and hyphens in between.
pub fn get_english_phrase_pattern_str() -> String {
    format!(
        r"(?-u)\b[{alnum}][{word}{space}'-]*[{alnum}]\b",
        alnum = ALNUM_CLASS,
        word = WORD_CLASS,
        space = SPACE_CLASS
    )
}
