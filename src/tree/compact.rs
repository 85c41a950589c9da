//! Collapse an uncompacted [`SuffixTrie`] into a [`CompactSuffixTree`].

use crate::corpus::Corpus;
use crate::error::ConstructionError;
use crate::strategy::BuildStrategy;
use crate::trie::SuffixTrie;

use super::{CompactNode, CompactSuffixTree, NodeArena, NodeId, RepeatLog, ROOT};

/// Walk `trie` once and emit one compacted node per maximal single-child
/// chain.
///
/// A chain stops at a branching node or a leaf. The emitted node takes its
/// label range from the first and last chain positions and everything else
/// from the last chain node: each suffix through the top of a chain reaches
/// the bottom, so both ends see the same suffixes. Branching nodes that split
/// source-0 suffixes are offered to the repeat log.
pub(crate) fn compact(
    trie: &SuffixTrie,
    corpus: Corpus,
    max_nodes: Option<usize>,
) -> Result<CompactSuffixTree, ConstructionError> {
    let mut arena = NodeArena::new(BuildStrategy::TrieThenCompact, max_nodes);
    let mut repeats = RepeatLog::default();

    // (trie child to absorb, compacted parent)
    let mut stack: Vec<(NodeId, NodeId)> = trie
        .root()
        .children()
        .iter()
        .rev()
        .map(|&child| (child, ROOT))
        .collect();

    while let Some((first, parent)) = stack.pop() {
        let mut last = first;
        while let [only] = trie.node(last).children() {
            last = *only;
        }

        let head = trie.node(first);
        let tail = trie.node(last);
        let id = arena.alloc(CompactNode {
            source: head.source,
            begin: head.position,
            end: tail.position + 1,
            start_path_index: tail.start_path_index,
            diversity: tail.diversity,
            membership: tail.membership.clone(),
            children: Vec::new(),
        })?;
        arena.attach(parent, id)?;

        let primary_branches = tail
            .children()
            .iter()
            .filter(|&&child| trie.node(child).membership().contains(0))
            .count();
        if primary_branches >= 2 {
            let node = arena.get(id);
            if node.diversity.is_diverse() {
                repeats.record_maximal(id);
            }
            repeats.offer_longest(id, node.depth());
        }

        stack.extend(tail.children().iter().rev().map(|&child| (child, id)));
    }

    log::debug!(
        "compacted {} trie nodes into {} tree nodes",
        trie.node_count(),
        arena.len()
    );
    Ok(CompactSuffixTree::from_parts(corpus, arena, repeats))
}
