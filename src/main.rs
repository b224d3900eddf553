use anagrams::{group::DEFAULT_CAPACITY, load_words, Grouper, Normalization};
use anyhow::{Context, Result};
use clap::Parser;
use itertools::Itertools;
use rand::prelude::*;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Print every class of anagrams in a word list, one class per line.
#[derive(Parser)]
#[clap(version)]
struct Options {
    /// Word list, one word per line.
    #[clap(name = "WORDS")]
    words: PathBuf,

    /// How each line is turned into a word before grouping.
    #[clap(long, value_enum, default_value = "uppercase")]
    normalize: Normalization,

    /// Fingerprint and bucket words on all cores.
    #[clap(long)]
    parallel: bool,

    /// Expected number of distinct fingerprints (split across workers with --parallel).
    #[clap(long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,

    /// Smallest class to print (at least 2).
    #[clap(long, default_value_t = 2)]
    min_size: usize,

    /// Sort words within each class, and classes against each other.
    #[clap(long)]
    sorted: bool,

    /// Print only this many classes, chosen at random.
    #[clap(long)]
    sample: Option<usize>,

    /// Print a summary of the pass to stderr.
    #[clap(long)]
    stats: bool,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_writer(io::stderr).with_env_filter(filter).init();

    let opt = Options::parse();
    let words = load_words(&opt.words, opt.normalize)
        .with_context(|| format!("loading word list {}", opt.words.display()))?;
    info!(words = words.len(), "loaded word list");

    let (mut groups, stats) = Grouper::new()
        .capacity(opt.capacity)
        .parallel(opt.parallel)
        .min_size(opt.min_size)
        .group_with_stats(words);

    if let Some(n) = opt.sample {
        groups.shuffle(&mut thread_rng());
        groups.truncate(n);
    }
    if opt.sorted {
        groups = groups
            .into_iter()
            .map(|group| group.into_iter().sorted().collect_vec())
            .sorted()
            .collect();
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for group in &groups {
        writeln!(out, "{}", group.join(" "))?;
    }
    out.flush()?;

    if opt.stats {
        eprintln!("{}", stats);
    }
    Ok(())
}
