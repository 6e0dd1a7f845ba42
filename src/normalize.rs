// src/normalize.rs

use crate::pattern::Category;

/// Aggregation key for a raw token.
///
/// Chinese tokens are used verbatim. English words are lowercased; English
/// phrases are trimmed and then lowercased. English tokens are ASCII by
/// construction, so only the Latin alphabet is folded.
pub fn normalize(raw: &str, category: Category) -> String {
    match category {
        Category::ChineseCharacter | Category::ChineseWord => raw.to_string(),
        Category::EnglishWord => raw.to_ascii_lowercase(),
        Category::EnglishPhrase => raw.trim().to_ascii_lowercase(),
    }
}
