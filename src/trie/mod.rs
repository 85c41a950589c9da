//! Character-level suffix trie, the reference construction strategy.

mod suffix_trie;

pub use self::suffix_trie::{SuffixTrie, TrieNode};
