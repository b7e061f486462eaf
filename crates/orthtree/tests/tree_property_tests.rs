// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
//! Property tests: containment, no duplication, depth bound, and agreement
//! with the all-pairs baseline over random boxes.

use proptest::prelude::*;
use proptest::test_runner::{Config as PropConfig, RngAlgorithm, TestRng, TestRunner};

use orthtree::{
    BroadPhase, BruteForceBroadPhase, Dimensions, Item, Region, SpatialTree, TreeBroadPhase,
    TreeConfig,
};

fn box_strategy() -> impl Strategy<Value = Region> {
    // Origins may fall slightly outside the world to exercise out-of-bounds items.
    let origin = prop::array::uniform3(-10.0f32..110.0);
    let size = prop::array::uniform3(0.0f32..25.0);
    (origin, size).prop_map(|(o, s)| Region::from_origin_size(o, s).expect("finite box"))
}

fn config_strategy() -> impl Strategy<Value = TreeConfig> {
    (prop_oneof![Just(Dimensions::Two), Just(Dimensions::Three)], 1usize..6, 0u32..6).prop_map(
        |(dims, capacity, depth)| {
            TreeConfig::new(dims, capacity, depth).expect("strategy emits valid configs")
        },
    )
}

fn world() -> Region {
    Region::new([0.0; 3], [100.0; 3]).expect("world")
}

fn build(config: TreeConfig, boxes: &[Region]) -> SpatialTree<usize> {
    let mut tree = SpatialTree::with_config(world(), config).expect("tree");
    tree.extend(boxes.iter().enumerate().map(|(i, b)| Item::new(*b, i)));
    tree
}

fn max_node_depth<T>(tree: &SpatialTree<T>) -> u32 {
    tree.children()
        .iter()
        .map(max_node_depth)
        .max()
        .unwrap_or(tree.depth())
}

proptest! {
    #[test]
    fn every_item_is_its_own_candidate(
        config in config_strategy(),
        boxes in prop::collection::vec(box_strategy(), 0..80),
    ) {
        let tree = build(config, &boxes);
        prop_assert_eq!(tree.len(), boxes.len());
        for (i, b) in boxes.iter().enumerate() {
            let hits = tree.retrieve(b);
            prop_assert_eq!(hits.iter().filter(|item| *item.payload() == i).count(), 1);
        }
    }

    #[test]
    fn retrieve_never_duplicates_and_covers_overlaps(
        config in config_strategy(),
        boxes in prop::collection::vec(box_strategy(), 0..80),
        query in box_strategy(),
    ) {
        let tree = build(config, &boxes);
        let mut hits: Vec<usize> = tree.retrieve(&query).iter().map(|i| *i.payload()).collect();
        let total = hits.len();
        hits.sort_unstable();
        hits.dedup();
        prop_assert_eq!(hits.len(), total);

        // Candidates are a superset of the true overlaps in the active axes.
        let axes = config.dimensions().axes();
        for (i, b) in boxes.iter().enumerate() {
            let overlaps = (0..axes).all(|k| b.min()[k] <= query.max()[k] && query.min()[k] <= b.max()[k]);
            if overlaps {
                prop_assert!(hits.binary_search(&i).is_ok(), "missing overlap {}", i);
            }
        }
    }

    #[test]
    fn depth_stays_within_bound(
        config in config_strategy(),
        boxes in prop::collection::vec(box_strategy(), 0..120),
    ) {
        let tree = build(config, &boxes);
        prop_assert!(max_node_depth(&tree) <= config.max_depth());
        prop_assert_eq!(tree.stats().max_depth_reached, max_node_depth(&tree));
    }
}

#[test]
fn proptest_seed_pinned_broad_phase_matches_brute_force() {
    const SEED_BYTES: [u8; 32] = [
        0x0c, 0x7a, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0,
    ];

    let rng = TestRng::from_seed(RngAlgorithm::ChaCha, &SEED_BYTES);
    let mut runner = TestRunner::new_with_rng(PropConfig::default(), rng);
    let strategy = (
        config_strategy(),
        prop::collection::vec(box_strategy(), 0..60),
    );

    runner
        .run(&strategy, |(config, boxes)| {
            let mut tree_bp = TreeBroadPhase::with_config(world(), config).expect("config");
            let mut brute = BruteForceBroadPhase::with_dimensions(config.dimensions());
            for (id, b) in boxes.iter().enumerate() {
                tree_bp.upsert(id, *b);
                brute.upsert(id, *b);
            }
            prop_assert_eq!(tree_bp.pairs(), brute.pairs());

            let candidates = tree_bp.candidate_pairs();
            for pair in brute.pairs() {
                prop_assert!(candidates.binary_search(&pair).is_ok());
            }
            Ok(())
        })
        .expect("tree broad phase agrees with all-pairs baseline");
}
