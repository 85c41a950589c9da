//! Generalized compacted suffix tree.
//!
//! Indexes an ordered list of strings and answers which of them contain a
//! pattern. For the first string the tree also reports the longest repeated
//! substring and its maximal repeats. Two builders are provided, selected via
//! [`BuildStrategy`]: direct incremental insertion, and an uncompacted trie
//! that is collapsed afterwards.

pub mod corpus;
pub mod error;
pub mod membership;
pub mod strategy;
pub mod text;
pub mod trie;
pub mod tree;

pub use corpus::{Corpus, Symbol, SENTINEL};
pub use error::ConstructionError;
pub use membership::Membership;
pub use strategy::{
    construct, construct_with_config, time_strategies, BuildStrategy, StrategyTiming, TreeConfig,
};
pub use text::{normalize, random_text, Alphabet};
pub use tree::{CompactNode, CompactSuffixTree, LeftDiversity, NodeId};
pub use trie::{SuffixTrie, TrieNode};
