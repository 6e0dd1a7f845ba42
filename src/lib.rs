// src/lib.rs
//! Splits text into Chinese characters, Chinese words, English words and
//! English phrases, counting each and writing frequency-ranked and
//! in-order lists.

pub mod aggregate;
pub mod error;
pub mod normalize;
pub mod pattern;
pub mod pipeline;
pub mod rank;
pub mod sink;
pub mod tokenizer;

pub use aggregate::{analyze_reader, Aggregator, Analysis, CategoryTally, FrequencyTable};
pub use error::{AnalyzeError, SinkError};
pub use normalize::normalize;
pub use pattern::Category;
pub use pipeline::{run, RunConfig, RunReport};
pub use rank::{rank, rank_with_counts};
pub use tokenizer::{tokenize, Token};
