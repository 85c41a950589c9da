//! Construction strategies and the entry points that select between them.

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use crate::corpus::Corpus;
use crate::error::ConstructionError;
use crate::tree::{compact, incremental, CompactSuffixTree};
use crate::trie::SuffixTrie;

/// How the compacted tree is built. Both produce trees that answer every
/// query identically; they differ in memory profile and speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BuildStrategy {
    /// Insert suffixes straight into the compacted tree, splitting edges.
    #[default]
    DirectIncremental,
    /// Build the full character trie, then collapse unary chains.
    TrieThenCompact,
}

impl BuildStrategy {
    pub const ALL: [BuildStrategy; 2] = [Self::DirectIncremental, Self::TrieThenCompact];

    pub fn name(self) -> &'static str {
        match self {
            Self::DirectIncremental => "direct",
            Self::TrieThenCompact => "trie",
        }
    }
}

impl fmt::Display for BuildStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BuildStrategy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "direct" | "incremental" | "nlgn" => Ok(Self::DirectIncremental),
            "trie" | "n2" => Ok(Self::TrieThenCompact),
            other => Err(format!(
                "unknown strategy '{other}', expected one of: direct, incremental, nlgn, trie, n2"
            )),
        }
    }
}

/// Options that govern tree construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreeConfig {
    /// Builder to use.
    pub strategy: BuildStrategy,
    /// Upper bound on arena size (root included) for every structure the
    /// strategy allocates. `None` means limited only by the allocator.
    pub max_nodes: Option<usize>,
}

/// Build a tree over `strings` with `strategy` and no node limit.
pub fn construct<I, S>(strings: I, strategy: BuildStrategy) -> Result<CompactSuffixTree, ConstructionError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    construct_with_config(
        strings,
        TreeConfig {
            strategy,
            ..TreeConfig::default()
        },
    )
}

/// Build a tree over `strings` as described by `config`.
///
/// Source index `i` in query results is the `i`-th item of `strings`.
pub fn construct_with_config<I, S>(
    strings: I,
    config: TreeConfig,
) -> Result<CompactSuffixTree, ConstructionError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let corpus = Corpus::new(strings);
    log::info!(
        "Building suffix tree ({}) over {} source(s), {} symbols",
        config.strategy,
        corpus.len(),
        corpus.total_symbols()
    );

    let tree = match config.strategy {
        BuildStrategy::DirectIncremental => incremental::build(corpus, config.max_nodes),
        BuildStrategy::TrieThenCompact => {
            let mut trie = SuffixTrie::build(&corpus, config.max_nodes)?;
            for source in 1..corpus.len() {
                trie.extend(&corpus, source)?;
            }
            log::info!("Suffix trie built with {} nodes.", trie.node_count());
            compact::compact(&trie, corpus, config.max_nodes)
        }
    };

    match &tree {
        Ok(tree) => log::info!("Suffix tree built with {} nodes.", tree.node_count()),
        Err(error) => log::warn!("Suffix tree construction failed: {error}"),
    }
    tree
}

/// Outcome of building the same corpus once with one strategy.
#[derive(Debug, Clone)]
pub struct StrategyTiming {
    pub strategy: BuildStrategy,
    pub elapsed: Result<Duration, ConstructionError>,
}

/// Build `strings` once per strategy and report how long each took.
pub fn time_strategies<S: AsRef<str>>(strings: &[S], max_nodes: Option<usize>) -> Vec<StrategyTiming> {
    BuildStrategy::ALL
        .iter()
        .map(|&strategy| {
            let started = Instant::now();
            let elapsed = construct_with_config(strings, TreeConfig { strategy, max_nodes })
                .map(|_| started.elapsed());
            StrategyTiming { strategy, elapsed }
        })
        .collect()
}
