//! Properties of the backwards cost optimizer: tie-breaking, cost-vector
//! shape, idempotence, and the block-end clamping rules.

use lz4opt::block::chain::ChainStore;
use lz4opt::block::finder::{find_longest_match, link_position};
use lz4opt::block::optimal::estimate_costs;
use lz4opt::block::types::{Match, BLOCK_END_LITERALS, BLOCK_END_NO_MATCH, NO_PREVIOUS};

fn literals(n: usize) -> Vec<Match> {
    vec![Match::literal(); n]
}

/// Build a realistic candidate vector by running the actual match finder
/// over `data` as one block starting at absolute position 0.
fn find_candidates(data: &[u8]) -> Vec<Match> {
    let mut store = ChainStore::new();
    let mut matches = literals(data.len());
    for pos in 0..data.len() {
        if pos + BLOCK_END_NO_MATCH > data.len() {
            continue;
        }
        if !link_position(&mut store, data, 0, pos) {
            continue;
        }
        matches[pos] = find_longest_match(
            &store,
            data,
            pos,
            0,
            data.len() - BLOCK_END_LITERALS,
            65_535,
        );
    }
    matches
}

#[test]
fn equal_cost_prefers_the_longer_match() {
    // Right of position 10 everything is literal except a 4-byte match at
    // 17.  That match makes cost[17] == cost[18], so lengths 7 and 8 of the
    // candidate at 10 tie — the optimizer must take 8.
    let mut matches = literals(30);
    matches[17] = Match { length: 4, distance: 1 };
    matches[10] = Match { length: 8, distance: 3 };
    estimate_costs(&mut matches);
    assert_eq!(matches[10].length, 8);
}

#[test]
fn cost_vector_is_monotone_nonincreasing() {
    let data: Vec<u8> = b"monotone cost property over mixed content 0123 "
        .iter()
        .copied()
        .cycle()
        .take(2_000)
        .collect();
    let mut matches = find_candidates(&data);
    let cost = estimate_costs(&mut matches);
    for i in 0..cost.len() - 1 {
        assert!(cost[i] >= cost[i + 1], "cost[{}] < cost[{}]", i, i + 1);
    }
}

#[test]
fn optimization_is_idempotent() {
    let data: Vec<u8> = b"idempotence: run the optimizer twice, nothing moves. "
        .iter()
        .copied()
        .cycle()
        .take(3_000)
        .collect();
    let mut once = find_candidates(&data);
    estimate_costs(&mut once);
    let mut twice = once.clone();
    let cost_again = estimate_costs(&mut twice);
    assert_eq!(once, twice);
    for i in 0..cost_again.len() - 1 {
        assert!(cost_again[i] >= cost_again[i + 1]);
    }
}

#[test]
fn no_optimized_match_crosses_the_trailing_literals() {
    let data: Vec<u8> = b"abcdefgh".iter().copied().cycle().take(400).collect();
    let mut matches = find_candidates(&data);
    estimate_costs(&mut matches);
    for (i, m) in matches.iter().enumerate() {
        if m.is_match() {
            assert!(i + m.length as usize + BLOCK_END_LITERALS <= matches.len());
            assert!(m.distance > 0);
        } else {
            assert_eq!(m.length, 1);
            assert_eq!(m.distance, NO_PREVIOUS);
        }
    }
}

#[test]
fn demoted_literals_clear_their_distance() {
    let mut matches = literals(40);
    // Length 3 is below the minimum; the optimizer must leave a literal with
    // the sentinel distance, never a short match.
    matches[5] = Match { length: 3, distance: 9 };
    estimate_costs(&mut matches);
    assert_eq!(matches[5].length, 1);
    assert_eq!(matches[5].distance, NO_PREVIOUS);
}
