use std::collections::BTreeSet;

use crate::corpus::{encode, Symbol, SENTINEL};

use super::{CompactSuffixTree, ROOT};

impl CompactSuffixTree {
    /// Indices of the source strings containing `pattern`.
    ///
    /// An empty result means the pattern does not occur. The empty pattern
    /// matches every source that contributed at least one suffix.
    pub fn search(&self, pattern: &str) -> BTreeSet<usize> {
        self.search_symbols(&encode(pattern))
    }

    /// True when `pattern` occurs in at least one source string.
    pub fn contains(&self, pattern: &str) -> bool {
        !self.search(pattern).is_empty()
    }

    /// Descend from the root, comparing `pattern` against edge labels.
    ///
    /// A pattern containing [`SENTINEL`] never matches: the delimiter is not
    /// part of any source text.
    pub fn search_symbols(&self, pattern: &[Symbol]) -> BTreeSet<usize> {
        if pattern.contains(&SENTINEL) {
            return BTreeSet::new();
        }
        if pattern.is_empty() {
            return self
                .root()
                .children
                .iter()
                .flat_map(|&child| self.nodes[child].membership.iter())
                .collect();
        }

        let mut current = ROOT;
        let mut pos = 0;
        loop {
            let next = self.nodes[current].children.iter().copied().find(|&child| {
                self.label_symbols(&self.nodes[child]).first() == Some(&pattern[pos])
            });
            let Some(child) = next else {
                return BTreeSet::new();
            };

            let node = &self.nodes[child];
            let label = self.label_symbols(node);
            let matched = label
                .iter()
                .zip(&pattern[pos..])
                .take_while(|(lhs, rhs)| lhs == rhs)
                .count();
            pos += matched;

            if pos == pattern.len() {
                return node.membership.to_set();
            }
            if matched < label.len() {
                return BTreeSet::new();
            }
            current = child;
        }
    }

    /// Longest substring occurring at least twice in source 0, or `""`.
    pub fn longest_repeated_substring(&self) -> String {
        self.repeats.longest.map_or_else(String::new, |(id, _)| {
            self.corpus.render(0, self.nodes[id].path_range())
        })
    }

    /// Maximal repeats of source 0, in the order they were discovered during
    /// construction.
    pub fn maximal_repeats(&self) -> Vec<String> {
        self.repeats
            .maximal
            .iter()
            .map(|&id| self.corpus.render(0, self.nodes[id].path_range()))
            .collect()
    }
}
