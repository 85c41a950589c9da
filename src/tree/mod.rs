//! Compacted generalized suffix tree.
//!
//! Nodes live in an arena addressed by [`NodeId`]; each node owns the ids of
//! its children and refers to text only through `(source, begin, end)`
//! offsets into the [`Corpus`]. The tree is produced by one of two builders
//! (see [`compact`] and [`incremental`]) and is immutable afterwards.

pub(crate) mod compact;
pub(crate) mod incremental;
mod query;

use std::ops::Range;

use crate::corpus::{Corpus, Symbol};
use crate::error::ConstructionError;
use crate::membership::Membership;
use crate::strategy::BuildStrategy;

/// Index of a node in a tree arena.
pub type NodeId = usize;

/// The root is always the first node of an arena.
pub const ROOT: NodeId = 0;

/// Left-diversity of a node, discovered while indexing source 0.
///
/// Transitions only move forward: `Unknown → NotDiverse → Diverse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeftDiversity {
    /// Node created by a later source; never evaluated.
    #[default]
    Unknown,
    /// Every source-0 suffix seen through this node shares one left context.
    NotDiverse,
    /// Two source-0 suffixes through this node differ in their left context.
    Diverse,
}

impl LeftDiversity {
    pub fn is_diverse(self) -> bool {
        self == Self::Diverse
    }

    /// Fold in one more suffix. Returns true only on the transition into
    /// `Diverse`.
    pub(crate) fn observe(&mut self, differs: bool) -> bool {
        match self {
            Self::Diverse => false,
            _ if differs => {
                *self = Self::Diverse;
                true
            }
            _ => {
                *self = Self::NotDiverse;
                false
            }
        }
    }
}

/// One edge of the compacted tree together with the node it leads to.
#[derive(Debug, Clone)]
pub struct CompactNode {
    /// Source whose buffer `begin`, `end` and `start_path_index` refer to.
    pub(crate) source: usize,
    pub(crate) begin: usize,
    pub(crate) end: usize,
    /// Start of the suffix that created this node.
    pub(crate) start_path_index: usize,
    pub(crate) diversity: LeftDiversity,
    pub(crate) membership: Membership,
    pub(crate) children: Vec<NodeId>,
}

impl CompactNode {
    fn root() -> Self {
        Self {
            source: 0,
            begin: 0,
            end: 0,
            start_path_index: 0,
            diversity: LeftDiversity::Unknown,
            membership: Membership::Empty,
            children: Vec::new(),
        }
    }

    /// Half-open range of the edge label within the source buffer.
    pub fn label_range(&self) -> Range<usize> {
        self.begin..self.end
    }

    /// Half-open range of the full root-to-node path within the source buffer.
    pub fn path_range(&self) -> Range<usize> {
        self.start_path_index..self.end
    }

    /// Number of symbols on the root-to-node path.
    pub fn depth(&self) -> usize {
        self.end - self.start_path_index
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn diversity(&self) -> LeftDiversity {
        self.diversity
    }

    pub fn membership(&self) -> &Membership {
        &self.membership
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Growable node storage with an optional hard limit.
///
/// Node slots and child lists grow through `try_reserve`. Membership sets are
/// not covered: their size is bounded by the number of sources, not by the
/// length of the corpus.
#[derive(Debug)]
pub(crate) struct NodeArena {
    nodes: Vec<CompactNode>,
    max_nodes: Option<usize>,
    strategy: BuildStrategy,
}

impl NodeArena {
    pub(crate) fn new(strategy: BuildStrategy, max_nodes: Option<usize>) -> Self {
        Self {
            nodes: vec![CompactNode::root()],
            max_nodes,
            strategy,
        }
    }

    pub(crate) fn alloc(&mut self, node: CompactNode) -> Result<NodeId, ConstructionError> {
        let (strategy, nodes) = (self.strategy, self.nodes.len());
        let exhausted = move || ConstructionError::ResourceExhausted { strategy, nodes };
        if self.max_nodes.is_some_and(|limit| nodes >= limit) {
            return Err(exhausted());
        }
        self.nodes.try_reserve(1).map_err(|_| exhausted())?;
        self.nodes.push(node);
        Ok(self.nodes.len() - 1)
    }

    /// Append `child` to the child list of `parent`.
    pub(crate) fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<(), ConstructionError> {
        let (strategy, nodes) = (self.strategy, self.nodes.len());
        let children = &mut self.nodes[parent].children;
        children
            .try_reserve(1)
            .map_err(|_| ConstructionError::ResourceExhausted { strategy, nodes })?;
        children.push(child);
        Ok(())
    }

    pub(crate) fn get(&self, id: NodeId) -> &CompactNode {
        &self.nodes[id]
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut CompactNode {
        &mut self.nodes[id]
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }
}

/// Maximal repeats and the longest repeat, relative to source 0.
#[derive(Debug, Default)]
pub(crate) struct RepeatLog {
    maximal: Vec<NodeId>,
    longest: Option<(NodeId, usize)>,
}

impl RepeatLog {
    pub(crate) fn record_maximal(&mut self, node: NodeId) {
        self.maximal.push(node);
    }

    /// Replace the longest marker only on a strictly greater depth.
    pub(crate) fn offer_longest(&mut self, node: NodeId, depth: usize) {
        if self.longest.map_or(true, |(_, best)| depth > best) {
            self.longest = Some((node, depth));
        }
    }
}

/// Generalized compacted suffix tree over an owned [`Corpus`].
#[derive(Debug)]
pub struct CompactSuffixTree {
    corpus: Corpus,
    nodes: Vec<CompactNode>,
    repeats: RepeatLog,
    strategy: BuildStrategy,
}

impl CompactSuffixTree {
    pub(crate) fn from_parts(
        corpus: Corpus,
        arena: NodeArena,
        repeats: RepeatLog,
    ) -> Self {
        Self {
            corpus,
            strategy: arena.strategy,
            nodes: arena.nodes,
            repeats,
        }
    }

    /// Number of indexed source strings.
    pub fn source_count(&self) -> usize {
        self.corpus.len()
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Strategy that built this tree.
    pub fn strategy(&self) -> BuildStrategy {
        self.strategy
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn root(&self) -> &CompactNode {
        &self.nodes[ROOT]
    }

    pub fn node(&self, id: NodeId) -> &CompactNode {
        &self.nodes[id]
    }

    /// Edge label leading into `id`, rendered as text.
    pub fn label(&self, id: NodeId) -> String {
        let node = &self.nodes[id];
        self.corpus.render(node.source, node.label_range())
    }

    fn label_symbols(&self, node: &CompactNode) -> &[Symbol] {
        &self.corpus.buffer(node.source)[node.label_range()]
    }
}
