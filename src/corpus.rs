//! Sentinel-wrapped text buffers shared by every builder and query.
//!
//! Each source string is stored as `[SENTINEL, text..., SENTINEL]`. Tree nodes
//! never copy text; they hold a source index plus offsets into that source's
//! buffer, and labels are rendered back to `String` only on request.

use std::ops::Range;

/// One indexed symbol: the Unicode scalar value of a `char`, or [`SENTINEL`].
pub type Symbol = u32;

/// Reserved delimiter. No `char` maps to this value, so it can never collide
/// with input or pattern text.
pub const SENTINEL: Symbol = Symbol::MAX;

/// Encode text as symbols.
pub fn encode(text: &str) -> Vec<Symbol> {
    text.chars().map(Symbol::from).collect()
}

/// Ordered collection of sentinel-wrapped source buffers.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    buffers: Vec<Vec<Symbol>>,
}

impl Corpus {
    /// Wrap every source string; position in the iterator is the source index.
    pub fn new<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let buffers = sources
            .into_iter()
            .map(|source| {
                let text = source.as_ref();
                let mut buffer = Vec::with_capacity(text.len() + 2);
                buffer.push(SENTINEL);
                buffer.extend(text.chars().map(Symbol::from));
                buffer.push(SENTINEL);
                buffer
            })
            .collect();

        Self { buffers }
    }

    /// Number of source strings.
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// True when no source strings were supplied.
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Full wrapped buffer of `source`, sentinels included.
    pub fn buffer(&self, source: usize) -> &[Symbol] {
        &self.buffers[source]
    }

    /// Start offsets of every suffix of `source`.
    ///
    /// The leading sentinel never starts a suffix and neither does the
    /// trailing one on its own; every suffix still runs through the trailing
    /// sentinel so that each one ends on a distinct leaf.
    pub fn suffix_starts(&self, source: usize) -> Range<usize> {
        1..self.buffers[source].len().saturating_sub(1).max(1)
    }

    /// Symbol immediately to the left of the suffix starting at `start`.
    pub fn left_context(&self, source: usize, start: usize) -> Symbol {
        start
            .checked_sub(1)
            .map_or(SENTINEL, |index| self.buffers[source][index])
    }

    /// Render `range` of `source` as text, skipping sentinels.
    pub fn render(&self, source: usize, range: Range<usize>) -> String {
        self.buffers[source][range]
            .iter()
            .copied()
            .filter_map(char::from_u32)
            .collect()
    }

    /// Total number of symbols across all buffers.
    pub fn total_symbols(&self) -> usize {
        self.buffers.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_each_source_with_sentinels() {
        let corpus = Corpus::new(["ab", "c"]);
        assert_eq!(corpus.len(), 2);
        assert_eq!(
            corpus.buffer(0),
            &[SENTINEL, 'a' as Symbol, 'b' as Symbol, SENTINEL]
        );
        assert_eq!(corpus.buffer(1), &[SENTINEL, 'c' as Symbol, SENTINEL]);
        assert_eq!(corpus.total_symbols(), 7);
    }

    #[test]
    fn suffix_starts_cover_every_text_position() {
        let corpus = Corpus::new(["banana", ""]);
        assert_eq!(corpus.suffix_starts(0), 1..7);
        assert!(corpus.suffix_starts(1).is_empty());
    }

    #[test]
    fn left_context_of_first_suffix_is_the_sentinel() {
        let corpus = Corpus::new(["xy"]);
        assert_eq!(corpus.left_context(0, 1), SENTINEL);
        assert_eq!(corpus.left_context(0, 2), 'x' as Symbol);
    }

    #[test]
    fn render_drops_sentinels_and_keeps_unicode() {
        let corpus = Corpus::new(["día"]);
        assert_eq!(corpus.render(0, 0..5), "día");
        assert_eq!(corpus.render(0, 2..4), "ía");
    }

    #[test]
    fn encode_matches_buffer_symbols() {
        let corpus = Corpus::new(["héllo"]);
        let buffer = corpus.buffer(0);
        assert_eq!(&buffer[1..buffer.len() - 1], encode("héllo").as_slice());
    }
}
