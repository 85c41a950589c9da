//! Direct construction of the compacted tree, one suffix at a time.
//!
//! Each suffix is matched against existing edge labels from the root. A
//! suffix that diverges inside a label splits that edge: a new internal node
//! takes the shared prefix and the old child keeps the remainder. Repeat
//! statistics are only maintained while source 0 is being inserted.

use crate::corpus::{Corpus, Symbol};
use crate::error::ConstructionError;
use crate::membership::Membership;
use crate::strategy::BuildStrategy;

use super::{CompactNode, CompactSuffixTree, LeftDiversity, NodeArena, NodeId, RepeatLog, ROOT};

/// Which suffix is being inserted, passed explicitly instead of kept as
/// builder state.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SuffixContext {
    pub(crate) source: usize,
    pub(crate) suffix_start: usize,
}

impl SuffixContext {
    fn is_primary(self) -> bool {
        self.source == 0
    }
}

pub(crate) struct IncrementalBuilder<'c> {
    corpus: &'c Corpus,
    arena: NodeArena,
    repeats: RepeatLog,
}

impl<'c> IncrementalBuilder<'c> {
    pub(crate) fn new(corpus: &'c Corpus, max_nodes: Option<usize>) -> Self {
        Self {
            corpus,
            arena: NodeArena::new(BuildStrategy::DirectIncremental, max_nodes),
            repeats: RepeatLog::default(),
        }
    }

    /// Insert every suffix of `source`, in increasing start order.
    pub(crate) fn insert_source(&mut self, source: usize) -> Result<(), ConstructionError> {
        for suffix_start in self.corpus.suffix_starts(source) {
            self.insert_suffix(SuffixContext {
                source,
                suffix_start,
            })?;
        }
        log::debug!(
            "inserted source {source}: {} nodes so far",
            self.arena.len()
        );
        Ok(())
    }

    pub(crate) fn insert_suffix(&mut self, ctx: SuffixContext) -> Result<(), ConstructionError> {
        let corpus = self.corpus;
        let buffer = corpus.buffer(ctx.source);
        let mut current = ROOT;
        let mut pos = ctx.suffix_start;

        loop {
            if current != ROOT && ctx.is_primary() {
                self.observe_left_context(current, ctx);
            }

            let Some((slot, child)) = self.child_starting_with(current, buffer[pos]) else {
                let leaf = self.arena.alloc(CompactNode {
                    source: ctx.source,
                    begin: pos,
                    end: buffer.len(),
                    start_path_index: ctx.suffix_start,
                    diversity: if ctx.is_primary() {
                        LeftDiversity::NotDiverse
                    } else {
                        LeftDiversity::Unknown
                    },
                    membership: Membership::single(ctx.source),
                    children: Vec::new(),
                })?;
                self.arena.attach(current, leaf)?;
                return Ok(());
            };

            let matched = {
                let node = self.arena.get(child);
                let label = &corpus.buffer(node.source)[node.label_range()];
                label
                    .iter()
                    .zip(&buffer[pos..])
                    .take_while(|(lhs, rhs)| lhs == rhs)
                    .count()
            };
            let label_len = self.arena.get(child).label_range().len();

            if matched == label_len || pos + matched == buffer.len() {
                self.arena.get_mut(child).membership.add(ctx.source);
                pos += matched;
                if pos == buffer.len() {
                    return Ok(());
                }
                current = child;
                continue;
            }

            current = self.split_edge(current, slot, child, matched, pos, ctx)?;
            pos += matched;
        }
    }

    /// Child of `node` whose label starts with `symbol`, with its slot in the
    /// parent's child list. Siblings never share a first symbol, so the first
    /// hit is the only one.
    fn child_starting_with(&self, node: NodeId, symbol: Symbol) -> Option<(usize, NodeId)> {
        self.arena
            .get(node)
            .children
            .iter()
            .copied()
            .enumerate()
            .find(|&(_, child)| {
                let child = self.arena.get(child);
                self.corpus.buffer(child.source)[child.begin] == symbol
            })
    }

    fn observe_left_context(&mut self, node: NodeId, ctx: SuffixContext) {
        let recorded = self.corpus.left_context(0, self.arena.get(node).start_path_index);
        let incoming = self.corpus.left_context(0, ctx.suffix_start);
        if self.arena.get_mut(node).diversity.observe(recorded != incoming) {
            self.repeats.record_maximal(node);
        }
    }

    /// Split the edge into `child` after `matched` symbols and return the new
    /// internal node, which replaces `child` at `slot` under `parent`.
    fn split_edge(
        &mut self,
        parent: NodeId,
        slot: usize,
        child: NodeId,
        matched: usize,
        pos: usize,
        ctx: SuffixContext,
    ) -> Result<NodeId, ConstructionError> {
        let (diversity, mut membership) = {
            let old = self.arena.get(child);
            let diversity = if ctx.is_primary() {
                let differs = self.corpus.left_context(0, old.start_path_index)
                    != self.corpus.left_context(0, ctx.suffix_start);
                if differs || old.diversity.is_diverse() {
                    LeftDiversity::Diverse
                } else {
                    LeftDiversity::NotDiverse
                }
            } else {
                LeftDiversity::Unknown
            };
            (diversity, old.membership.clone())
        };
        membership.add(ctx.source);

        let split = self.arena.alloc(CompactNode {
            source: ctx.source,
            begin: pos,
            end: pos + matched,
            start_path_index: ctx.suffix_start,
            diversity,
            membership,
            children: Vec::new(),
        })?;
        self.arena.attach(split, child)?;
        self.arena.get_mut(child).begin += matched;
        self.arena.get_mut(parent).children[slot] = split;

        if ctx.is_primary() {
            if diversity.is_diverse() {
                self.repeats.record_maximal(split);
            }
            let depth = self.arena.get(split).depth();
            self.repeats.offer_longest(split, depth);
        }

        log::trace!(
            "split edge above node {child} after {matched} symbols (source {}, suffix {})",
            ctx.source,
            ctx.suffix_start
        );
        Ok(split)
    }
}

/// Build the tree for every source of `corpus` with the incremental builder.
pub(crate) fn build(
    corpus: Corpus,
    max_nodes: Option<usize>,
) -> Result<CompactSuffixTree, ConstructionError> {
    let mut builder = IncrementalBuilder::new(&corpus, max_nodes);
    for source in 0..corpus.len() {
        builder.insert_source(source)?;
    }
    let arena = builder.arena;
    let repeats = builder.repeats;
    Ok(CompactSuffixTree::from_parts(corpus, arena, repeats))
}
