use std::collections::BTreeSet;

use compact_suffix_tree::{
    construct, construct_with_config, BuildStrategy, ConstructionError, TreeConfig,
};

fn set(items: &[usize]) -> BTreeSet<usize> {
    items.iter().copied().collect()
}

#[test]
fn banana_longest_repeat_is_ana() {
    for strategy in BuildStrategy::ALL {
        let tree = construct(["banana"], strategy).unwrap();
        assert_eq!(tree.longest_repeated_substring(), "ana", "{strategy}");
    }
}

#[test]
fn no_repeat_in_distinct_characters() {
    for strategy in BuildStrategy::ALL {
        let tree = construct(["abcdef"], strategy).unwrap();
        assert_eq!(tree.longest_repeated_substring(), "");
        assert!(tree.maximal_repeats().is_empty());
    }
}

#[test]
fn maximal_repeats_require_left_diversity() {
    for strategy in BuildStrategy::ALL {
        let tree = construct(["abab"], strategy).unwrap();
        let maximal = tree.maximal_repeats();
        assert!(maximal.iter().any(|repeat| repeat == "ab"), "{strategy}: {maximal:?}");
        // "b" always follows an 'a'
        assert!(!maximal.iter().any(|repeat| repeat == "b"), "{strategy}: {maximal:?}");
    }
}

#[test]
fn sources_are_attributed_by_position() {
    for strategy in BuildStrategy::ALL {
        let tree = construct(["alpha", "beta"], strategy).unwrap();
        assert_eq!(tree.search("eta"), set(&[1]));
        assert_eq!(tree.search("lph"), set(&[0]));
        assert_eq!(tree.search("a"), set(&[0, 1]));
        assert!(tree.search("gamma").is_empty());
    }
}

#[test]
fn repeated_construction_is_deterministic() {
    let corpus = ["abracadabra", "cadabra", "arbadacarba"];
    for strategy in BuildStrategy::ALL {
        let first = construct(corpus, strategy).unwrap();
        let second = construct(corpus, strategy).unwrap();
        assert_eq!(first.node_count(), second.node_count());
        for pattern in ["abra", "cad", "rba", "z", ""] {
            assert_eq!(first.search(pattern), second.search(pattern));
        }
        assert_eq!(first.maximal_repeats(), second.maximal_repeats());
        assert_eq!(
            first.longest_repeated_substring(),
            second.longest_repeated_substring()
        );
    }
}

#[test]
fn single_character_corpus() {
    for strategy in BuildStrategy::ALL {
        let tree = construct(["x"], strategy).unwrap();
        assert_eq!(tree.longest_repeated_substring(), "");
        assert!(tree.maximal_repeats().is_empty());
        assert_eq!(tree.search("x"), set(&[0]));
        assert_eq!(tree.search(""), set(&[0]));
    }
}

#[test]
fn empty_inputs_produce_a_bare_root() {
    for strategy in BuildStrategy::ALL {
        let tree = construct(Vec::<String>::new(), strategy).unwrap();
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.source_count(), 0);
        assert!(tree.search("").is_empty());

        let tree = construct([""], strategy).unwrap();
        assert_eq!(tree.source_count(), 1);
        assert!(tree.search("a").is_empty());
    }
}

#[test]
fn repeats_only_describe_the_first_source() {
    for strategy in BuildStrategy::ALL {
        let tree = construct(["abcd", "xyxy"], strategy).unwrap();
        assert_eq!(tree.longest_repeated_substring(), "");
        assert!(tree.maximal_repeats().is_empty());
        assert_eq!(tree.search("xy"), set(&[1]));
    }
}

#[test]
fn unicode_text_is_indexed_by_character() {
    for strategy in BuildStrategy::ALL {
        let tree = construct(["canción", "acción"], strategy).unwrap();
        assert_eq!(tree.search("ción"), set(&[0, 1]));
        assert_eq!(tree.search("ó"), set(&[0, 1]));
        assert_eq!(tree.search("canc"), set(&[0]));
    }
}

#[test]
fn trie_hits_node_limit_where_direct_fits() {
    let text = "thequickbrownfoxjumps";
    let config = |strategy| TreeConfig {
        strategy,
        max_nodes: Some(64),
    };

    let direct = construct_with_config([text], config(BuildStrategy::DirectIncremental)).unwrap();
    assert!(direct.node_count() <= 64);
    assert_eq!(direct.search("fox"), set(&[0]));

    let error = construct_with_config([text], config(BuildStrategy::TrieThenCompact)).unwrap_err();
    assert!(matches!(
        error,
        ConstructionError::ResourceExhausted {
            strategy: BuildStrategy::TrieThenCompact,
            nodes: 64,
        }
    ));
    assert!(error.to_string().contains("direct"));
}
