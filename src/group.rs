//! Grouping words into anagram classes by fingerprint.

use crate::fingerprint::{Fingerprint, FingerprintBuildHasher};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use tracing::debug;

pub type Group = Vec<String>;

/// Default pre-size for the bucket map, enough for a large English word list.
pub const DEFAULT_CAPACITY: usize = 300_000;

pub const MIN_GROUP_SIZE: usize = 2;

/// Group `words` into anagram classes with the default [`Grouper`].
///
/// Only classes with at least two words are returned. Duplicate words are kept, so a word that
/// appears twice forms a group with itself.
pub fn group_anagrams(words: Vec<String>) -> Vec<Group> {
    Grouper::new().group(words)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GroupStats {
    pub words: usize,
    // Distinct fingerprints.
    pub buckets: usize,
    pub groups: usize,
    pub grouped_words: usize,
}

impl Display for GroupStats {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "{} words, {} fingerprints, {} groups covering {} words",
            self.words, self.buckets, self.groups, self.grouped_words
        )
    }
}

/// Configurable grouping pass.
///
/// ```
/// use anagrams::Grouper;
///
/// let words = ["STOP", "POTS", "TOPS", "SPOT", "STAR"].map(String::from).to_vec();
/// let groups = Grouper::new().parallel(true).group(words);
/// assert_eq!(groups.len(), 1);
/// assert_eq!(groups[0].len(), 4);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Grouper {
    capacity: usize,
    parallel: bool,
    min_size: usize,
}

impl Default for Grouper {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            parallel: false,
            min_size: MIN_GROUP_SIZE,
        }
    }
}

impl Grouper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expected number of distinct fingerprints. The bucket map is pre-sized to this (or to the
    /// number of input words, if smaller). In a parallel pass the hint is split evenly across
    /// the rayon workers.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Fingerprint and bucket words on the rayon thread pool.
    ///
    /// Each worker fills its own bucket map and the maps are merged afterwards, so the groups
    /// reported are the same as for a sequential pass.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Smallest group to report. Values below [`MIN_GROUP_SIZE`] are raised to it.
    pub fn min_size(mut self, min_size: usize) -> Self {
        self.min_size = min_size.max(MIN_GROUP_SIZE);
        self
    }

    pub fn group(&self, words: Vec<String>) -> Vec<Group> {
        self.group_with_stats(words).0
    }

    pub fn group_with_stats(&self, words: Vec<String>) -> (Vec<Group>, GroupStats) {
        let total = words.len();
        let buckets = if self.parallel {
            let per_worker = self.worker_capacity(total, rayon::current_num_threads());
            words
                .into_par_iter()
                .fold(|| Buckets::with_capacity(per_worker), |mut buckets, word| {
                    buckets.insert(word);
                    buckets
                })
                .reduce(Buckets::default, Buckets::merge)
        } else {
            let mut buckets = Buckets::with_capacity(self.worker_capacity(total, 1));
            for word in words {
                buckets.insert(word);
            }
            buckets
        };

        let distinct = buckets.len();
        let groups = buckets.into_groups(self.min_size);
        let stats = GroupStats {
            words: total,
            buckets: distinct,
            groups: groups.len(),
            grouped_words: groups.iter().map(Vec::len).sum(),
        };
        debug!(
            words = stats.words,
            buckets = stats.buckets,
            groups = stats.groups,
            grouped_words = stats.grouped_words,
            parallel = self.parallel,
            "grouped anagrams"
        );
        (groups, stats)
    }

    fn worker_capacity(&self, total: usize, workers: usize) -> usize {
        self.capacity.min(total) / workers.max(1)
    }
}

/// Multi-map from fingerprint to words, keeping buckets in first-seen order.
///
/// The map only stores an index into `buckets`, so each word has exactly one owner: the bucket it
/// was moved into.
#[derive(Default)]
struct Buckets {
    index: HashMap<Fingerprint, usize, FingerprintBuildHasher>,
    buckets: Vec<(Fingerprint, Group)>,
}

impl Buckets {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            index: HashMap::with_capacity_and_hasher(capacity, Default::default()),
            buckets: Vec::with_capacity(capacity),
        }
    }

    fn len(&self) -> usize {
        self.buckets.len()
    }

    fn insert(&mut self, word: String) {
        let fingerprint = Fingerprint::of(&word);
        self.bucket(fingerprint).push(word);
    }

    fn bucket(&mut self, fingerprint: Fingerprint) -> &mut Group {
        let buckets = &mut self.buckets;
        let i = *self.index.entry(fingerprint).or_insert_with(|| {
            buckets.push((fingerprint, Vec::with_capacity(1)));
            buckets.len() - 1
        });
        &mut buckets[i].1
    }

    fn merge(mut self, other: Buckets) -> Buckets {
        if self.buckets.is_empty() {
            return other;
        }
        for (fingerprint, mut words) in other.buckets {
            self.bucket(fingerprint).append(&mut words);
        }
        self
    }

    fn into_groups(self, min_size: usize) -> Vec<Group> {
        self.buckets
            .into_iter()
            .filter_map(|(_, words)| (words.len() >= min_size).then(|| words))
            .collect()
    }
}
