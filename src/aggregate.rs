// src/aggregate.rs

use std::borrow::Cow;
use std::io::BufRead;

use indexmap::IndexMap;
use tracing::warn;

use crate::error::AnalyzeError;
use crate::normalize::normalize;
use crate::pattern::Category;
use crate::tokenizer::{TokenizerRules, RULES};

// ----- FREQUENCY TABLE -----

/// Normalized key -> occurrence count. Keys remember the order in which they
/// were first seen, which is what ranking falls back on for equal counts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: IndexMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: String) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    pub fn get(&self, key: &str) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of every count.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Key with the highest count; the earliest key wins a tie.
    pub fn most_frequent(&self) -> Option<(&str, usize)> {
        self.iter().fold(None, |best, (key, count)| match best {
            Some((_, top)) if top >= count => best,
            _ => Some((key, count)),
        })
    }

    /// Entries in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

// ----- PER-CATEGORY STATE -----

/// Frequencies plus the raw tokens in input order, repeats included.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryTally {
    pub frequencies: FrequencyTable,
    pub duplicated: Vec<String>,
}

impl CategoryTally {
    fn record(&mut self, raw: &str, category: Category) {
        self.frequencies.increment(normalize(raw, category));
        self.duplicated.push(raw.to_string());
    }
}

/// Finished state of a scan, one tally per category.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Analysis {
    tallies: [CategoryTally; 4],
    lines: usize,
}

impl Analysis {
    pub fn tally(&self, category: Category) -> &CategoryTally {
        &self.tallies[category.index()]
    }

    pub fn frequencies(&self, category: Category) -> &FrequencyTable {
        &self.tally(category).frequencies
    }

    pub fn duplicated(&self, category: Category) -> &[String] {
        &self.tally(category).duplicated
    }

    /// Number of input lines scanned.
    pub fn lines(&self) -> usize {
        self.lines
    }
}

// ----- AGGREGATOR -----

/// Accumulates tokens across every line of one input.
pub struct Aggregator<'r> {
    rules: &'r TokenizerRules,
    analysis: Analysis,
}

impl Default for Aggregator<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregator<'static> {
    /// Aggregator backed by the process-wide compiled rules.
    pub fn new() -> Self {
        Aggregator::with_rules(&RULES)
    }
}

impl<'r> Aggregator<'r> {
    pub fn with_rules(rules: &'r TokenizerRules) -> Self {
        Aggregator {
            rules,
            analysis: Analysis::default(),
        }
    }

    /// Runs every category's rule over `line` and records the matches.
    pub fn feed_line(&mut self, line: &str) {
        for category in Category::ALL {
            let tally = &mut self.analysis.tallies[category.index()];
            for token in self.rules.tokens(line, category) {
                tally.record(token.text, category);
            }
        }
        self.analysis.lines += 1;
    }

    pub fn finish(self) -> Analysis {
        self.analysis
    }
}

// ----- LINE SOURCE -----

/// Scans `reader` to the end. Lines split on `\n` with an optional trailing
/// `\r`; invalid UTF-8 is replaced rather than rejected.
pub fn analyze_reader<R: BufRead>(mut reader: R) -> Result<Analysis, AnalyzeError> {
    let mut aggregator = Aggregator::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| AnalyzeError::ReadFailure {
                line: aggregator.analysis.lines + 1,
                source,
            })?;
        if read == 0 {
            break;
        }
        let mut bytes = buf.as_slice();
        if let Some(rest) = bytes.strip_suffix(b"\n") {
            bytes = rest;
        }
        if let Some(rest) = bytes.strip_suffix(b"\r") {
            bytes = rest;
        }
        let line = String::from_utf8_lossy(bytes);
        if let Cow::Owned(_) = line {
            warn!(
                "line {} is not valid UTF-8, decoded lossily",
                aggregator.analysis.lines + 1
            );
        }
        aggregator.feed_line(&line);
    }
    Ok(aggregator.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor, Read};

    fn analyze(text: &str) -> Analysis {
        analyze_reader(Cursor::new(text.as_bytes().to_vec())).expect("in-memory read")
    }

    #[test]
    fn counts_repeated_words() {
        let analysis = analyze("cat cat dog");
        let table = analysis.frequencies(Category::EnglishWord);
        assert_eq!(table.get("cat"), 2);
        assert_eq!(table.get("dog"), 1);
        assert_eq!(table.len(), 2);
        assert_eq!(analysis.duplicated(Category::EnglishWord), ["cat", "cat", "dog"]);
    }

    #[test]
    fn keys_are_folded_but_raw_text_is_kept() {
        let analysis = analyze("Hello hello HELLO");
        assert_eq!(analysis.frequencies(Category::EnglishWord).get("hello"), 3);
        assert_eq!(
            analysis.duplicated(Category::EnglishWord),
            ["Hello", "hello", "HELLO"]
        );
        assert_eq!(
            analysis.frequencies(Category::EnglishPhrase).get("hello hello hello"),
            1
        );
        assert_eq!(analysis.duplicated(Category::EnglishPhrase), ["Hello hello HELLO"]);
    }

    #[test]
    fn state_accumulates_across_lines() {
        let analysis = analyze("中文 one\n中 two\r\n文");
        assert_eq!(analysis.lines(), 3);
        assert_eq!(
            analysis.duplicated(Category::ChineseCharacter),
            ["中", "文", "中", "文"]
        );
        assert_eq!(analysis.frequencies(Category::ChineseCharacter).get("中"), 2);
        assert_eq!(analysis.duplicated(Category::ChineseWord), ["中文", "中", "文"]);
        assert_eq!(analysis.duplicated(Category::EnglishWord), ["one", "two"]);
    }

    #[test]
    fn counts_sum_to_duplicated_length() {
        let analysis = analyze(
            "Hello world, I'll visit micro-video apps. 你好世界\n\
             the world is big; the world is round 世界很大\n\
             a-b-c x_y 'quoted' words",
        );
        for category in Category::ALL {
            let tally = analysis.tally(category);
            assert_eq!(tally.frequencies.total(), tally.duplicated.len(), "{category}");
            for raw in &tally.duplicated {
                assert!(tally.frequencies.get(&normalize(raw, category)) > 0);
            }
        }
    }

    #[test]
    fn most_frequent_prefers_earliest_key_on_ties() {
        let analysis = analyze("b a a c b");
        let table = analysis.frequencies(Category::EnglishWord);
        assert_eq!(table.most_frequent(), Some(("b", 2)));
        assert_eq!(FrequencyTable::new().most_frequent(), None);
    }

    #[test]
    fn empty_input_yields_empty_tallies() {
        let analysis = analyze("");
        assert_eq!(analysis.lines(), 0);
        for category in Category::ALL {
            assert!(analysis.frequencies(category).is_empty());
            assert!(analysis.duplicated(category).is_empty());
        }
    }

    #[test]
    fn invalid_utf8_is_replaced_not_fatal() {
        let mut bytes = b"ok ".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        bytes.extend_from_slice(" fine 好".as_bytes());
        let analysis = analyze_reader(Cursor::new(bytes)).expect("lossy decode");
        assert_eq!(analysis.duplicated(Category::EnglishWord), ["ok", "fine"]);
        assert_eq!(analysis.duplicated(Category::ChineseCharacter), ["好"]);
    }

    struct FailingReader {
        served: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.served {
                return Err(io::Error::new(io::ErrorKind::Other, "disk went away"));
            }
            self.served = true;
            let line = b"first line\n";
            buf[..line.len()].copy_from_slice(line);
            Ok(line.len())
        }
    }

    #[test]
    fn read_errors_abort_with_line_number() {
        let reader = io::BufReader::new(FailingReader { served: false });
        match analyze_reader(reader) {
            Err(AnalyzeError::ReadFailure { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected read failure, got {other:?}"),
        }
    }

    #[test]
    fn aggregators_are_independent() {
        let mut first = Aggregator::new();
        let mut second = Aggregator::new();
        first.feed_line("alpha");
        second.feed_line("beta beta");
        assert_eq!(first.finish().duplicated(Category::EnglishWord), ["alpha"]);
        assert_eq!(
            second.finish().frequencies(Category::EnglishWord).get("beta"),
            2
        );
    }
}
