//! Uncompacted generalized suffix trie.
//!
//! One node per symbol of every inserted suffix path, so memory grows with
//! the square of the corpus length in the worst case. Source 0 is inserted
//! by [`SuffixTrie::build`], which also tracks left diversity; later sources
//! are added by [`SuffixTrie::extend`] and only contribute membership.

use crate::corpus::{Corpus, Symbol, SENTINEL};
use crate::error::ConstructionError;
use crate::membership::Membership;
use crate::strategy::BuildStrategy;
use crate::tree::{LeftDiversity, NodeId, ROOT};

/// One symbol position on a trie path.
#[derive(Debug, Clone)]
pub struct TrieNode {
    /// Offset of this node's symbol in its source buffer.
    pub(crate) position: usize,
    /// Cached `buffer[position]`, used for child dispatch.
    pub(crate) symbol: Symbol,
    /// Source whose buffer `position` and `start_path_index` refer to.
    pub(crate) source: usize,
    /// Start of the suffix that created this node.
    pub(crate) start_path_index: usize,
    pub(crate) diversity: LeftDiversity,
    pub(crate) membership: Membership,
    pub(crate) children: Vec<NodeId>,
}

impl TrieNode {
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn membership(&self) -> &Membership {
        &self.membership
    }
}

/// Arena-backed suffix trie.
#[derive(Debug, Clone)]
pub struct SuffixTrie {
    nodes: Vec<TrieNode>,
    max_nodes: Option<usize>,
}

impl SuffixTrie {
    /// Build the trie for source 0 of `corpus`.
    ///
    /// `max_nodes` bounds the arena (root included); exceeding it, or an
    /// allocation failure, yields [`ConstructionError::ResourceExhausted`].
    pub fn build(corpus: &Corpus, max_nodes: Option<usize>) -> Result<Self, ConstructionError> {
        let mut trie = Self {
            nodes: vec![TrieNode {
                position: 0,
                symbol: SENTINEL,
                source: 0,
                start_path_index: 0,
                diversity: LeftDiversity::Unknown,
                membership: Membership::Empty,
                children: Vec::new(),
            }],
            max_nodes,
        };
        if corpus.is_empty() {
            return Ok(trie);
        }

        let buffer = corpus.buffer(0);
        for start in corpus.suffix_starts(0) {
            let mut current = ROOT;
            let mut pos = start;

            while pos < buffer.len() {
                let Some(child) = trie.child_with(current, buffer[pos]) else {
                    break;
                };
                current = child;
                pos += 1;
                trie.observe_left_context(corpus, current, start);
            }

            for offset in pos..buffer.len() {
                current = trie.push_child(current, offset, 0, start, buffer[offset])?;
                trie.nodes[current].diversity = LeftDiversity::NotDiverse;
            }
        }

        log::debug!(
            "suffix trie for source 0: {} symbols, {} nodes",
            buffer.len(),
            trie.nodes.len()
        );
        Ok(trie)
    }

    /// Add every suffix of `source` to the trie.
    ///
    /// Descent is exact-match only; diversity is left untouched because
    /// repeat statistics are defined relative to source 0.
    pub fn extend(&mut self, corpus: &Corpus, source: usize) -> Result<(), ConstructionError> {
        let buffer = corpus.buffer(source);
        for start in corpus.suffix_starts(source) {
            let mut current = ROOT;
            let mut pos = start;

            while pos < buffer.len() {
                let Some(child) = self.child_with(current, buffer[pos]) else {
                    break;
                };
                self.nodes[child].membership.add(source);
                current = child;
                pos += 1;
            }

            for offset in pos..buffer.len() {
                current = self.push_child(current, offset, source, start, buffer[offset])?;
            }
        }

        log::debug!(
            "suffix trie extended with source {source}: {} nodes",
            self.nodes.len()
        );
        Ok(())
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn root(&self) -> &TrieNode {
        &self.nodes[ROOT]
    }

    pub fn node(&self, id: NodeId) -> &TrieNode {
        &self.nodes[id]
    }

    fn child_with(&self, node: NodeId, symbol: Symbol) -> Option<NodeId> {
        self.nodes[node]
            .children
            .iter()
            .copied()
            .find(|&child| self.nodes[child].symbol == symbol)
    }

    fn observe_left_context(&mut self, corpus: &Corpus, node: NodeId, start: usize) {
        let recorded = corpus.left_context(0, self.nodes[node].start_path_index);
        let incoming = corpus.left_context(0, start);
        self.nodes[node].diversity.observe(recorded != incoming);
    }

    fn push_child(
        &mut self,
        parent: NodeId,
        position: usize,
        source: usize,
        start_path_index: usize,
        symbol: Symbol,
    ) -> Result<NodeId, ConstructionError> {
        let nodes = self.nodes.len();
        let exhausted = ConstructionError::ResourceExhausted {
            strategy: BuildStrategy::TrieThenCompact,
            nodes,
        };
        if self.max_nodes.is_some_and(|limit| nodes >= limit) {
            return Err(exhausted);
        }
        self.nodes.try_reserve(1).map_err(|_| exhausted.clone())?;
        self.nodes[parent]
            .children
            .try_reserve(1)
            .map_err(|_| exhausted)?;
        self.nodes.push(TrieNode {
            position,
            symbol,
            source,
            start_path_index,
            diversity: LeftDiversity::Unknown,
            membership: Membership::single(source),
            children: Vec::new(),
        });
        let id = nodes;
        self.nodes[parent].children.push(id);
        Ok(id)
    }
}
