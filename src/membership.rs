//! Source membership attached to every trie and tree node.

use std::collections::BTreeSet;

/// Set of source indices whose suffixes pass through a node.
///
/// Most nodes belong to a single source, so that case stays inline; the
/// vector form is kept sorted and free of duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Membership {
    /// No source recorded yet (only the roots stay in this state).
    #[default]
    Empty,
    /// Exactly one source.
    Single(usize),
    /// Two or more sources, ascending.
    Multiple(Vec<usize>),
}

impl Membership {
    pub fn single(source: usize) -> Self {
        Self::Single(source)
    }

    /// Record `source`; returns false when it was already present.
    pub fn add(&mut self, source: usize) -> bool {
        match self {
            Self::Empty => {
                *self = Self::Single(source);
                true
            }
            Self::Single(existing) if *existing == source => false,
            Self::Single(existing) => {
                let existing = *existing;
                *self = Self::Multiple(if existing < source {
                    vec![existing, source]
                } else {
                    vec![source, existing]
                });
                true
            }
            Self::Multiple(sources) => match sources.binary_search(&source) {
                Ok(_) => false,
                Err(slot) => {
                    sources.insert(slot, source);
                    true
                }
            },
        }
    }

    pub fn contains(&self, source: usize) -> bool {
        match self {
            Self::Empty => false,
            Self::Single(existing) => *existing == source,
            Self::Multiple(sources) => sources.binary_search(&source).is_ok(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Single(_) => 1,
            Self::Multiple(sources) => sources.len(),
        }
    }

    /// Sources in ascending order.
    pub fn iter(&self) -> MembershipIter<'_> {
        MembershipIter {
            membership: self,
            index: 0,
        }
    }

    pub fn to_set(&self) -> BTreeSet<usize> {
        self.iter().collect()
    }
}

pub struct MembershipIter<'a> {
    membership: &'a Membership,
    index: usize,
}

impl<'a> Iterator for MembershipIter<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let item = match self.membership {
            Membership::Empty => None,
            Membership::Single(source) if self.index == 0 => Some(*source),
            Membership::Single(_) => None,
            Membership::Multiple(sources) => sources.get(self.index).copied(),
        };
        if item.is_some() {
            self.index += 1;
        }
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promotes_from_single_to_multiple() {
        let mut membership = Membership::default();
        assert!(membership.is_empty());
        assert!(membership.add(3));
        assert_eq!(membership, Membership::Single(3));
        assert!(!membership.add(3));
        assert!(membership.add(1));
        assert_eq!(membership, Membership::Multiple(vec![1, 3]));
    }

    #[test]
    fn keeps_multiple_sorted_without_duplicates() {
        let mut membership = Membership::single(5);
        for source in [2, 9, 5, 0, 2] {
            membership.add(source);
        }
        assert_eq!(membership.iter().collect::<Vec<_>>(), vec![0, 2, 5, 9]);
        assert_eq!(membership.len(), 4);
        assert!(membership.contains(9));
        assert!(!membership.contains(4));
    }

    #[test]
    fn empty_membership_yields_nothing() {
        let membership = Membership::Empty;
        assert_eq!(membership.iter().count(), 0);
        assert!(membership.to_set().is_empty());
        assert!(!membership.contains(0));
    }
}
