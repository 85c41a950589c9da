use crate::strategy::BuildStrategy;

/// Errors returned while constructing a tree. Queries never fail.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// Node storage or a child list could not grow: either the allocator
    /// refused or the configured node limit was reached. No partial tree is
    /// returned.
    #[error("{strategy} construction exhausted its node budget after {nodes} nodes; {}", hint(.strategy))]
    ResourceExhausted { strategy: BuildStrategy, nodes: usize },
}

fn hint(strategy: &BuildStrategy) -> &'static str {
    match strategy {
        BuildStrategy::TrieThenCompact => "try a shorter text or the direct strategy",
        BuildStrategy::DirectIncremental => "try a shorter text or a larger node limit",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_only_suggests_switching_away_from_the_trie() {
        let trie = ConstructionError::ResourceExhausted {
            strategy: BuildStrategy::TrieThenCompact,
            nodes: 10,
        };
        assert_eq!(
            trie.to_string(),
            "trie construction exhausted its node budget after 10 nodes; \
             try a shorter text or the direct strategy"
        );

        let direct = ConstructionError::ResourceExhausted {
            strategy: BuildStrategy::DirectIncremental,
            nodes: 4,
        }
        .to_string();
        assert!(direct.starts_with("direct construction"));
        assert!(!direct.contains("direct strategy"));
        assert!(direct.ends_with("a larger node limit"));
    }
}
