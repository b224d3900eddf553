//! Group words into anagram classes.
//!
//! Each word is reduced to a 64-bit [`Fingerprint`] of its letter counts and length, and words
//! are bucketed by fingerprint. Only buckets with two or more words are reported.
//!
//! ```
//! let words = ["LISTEN", "SILENT", "ENLIST", "BANANA"].map(String::from).to_vec();
//! let groups = anagrams::group_anagrams(words);
//! assert_eq!(groups, vec![vec!["LISTEN", "SILENT", "ENLIST"]]);
//! ```

pub mod fingerprint;
pub mod group;
pub mod words;

pub use fingerprint::{encode, Fingerprint};
pub use group::{group_anagrams, Group, GroupStats, Grouper};
pub use words::{load_words, parse_words, Normalization, WordListError};
