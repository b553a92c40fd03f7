use hyperforest::pool::Pool;
use hyperforest::rfg::rng::{gen_minrng, RngRid};
use hyperforest::shadow;

#[derive(Default, Debug, PartialEq, Eq, Clone, Copy)]
struct Counter(u32);

#[test]
fn pool_reuses_freed_slots() {
    let mut pool: Pool<Counter> = Pool::new();
    let a = pool.malloc().unwrap();
    let b = pool.malloc().unwrap();
    assert_eq!(pool.len(), 2);

    pool.get_mut(a).0 = 1;
    pool.get_mut(b).0 = 2;

    pool.free(b);
    assert_eq!(pool.len(), 1);

    let c = pool.malloc().unwrap();
    assert_eq!(c, b, "freed slot should be reused before growing");
    assert_eq!(pool.len(), 2);

    let nodes = pool.gather(2);
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[a].0, 1);
}

#[test]
fn shadow_projection_tiles_the_box_including_gaps() {
    use hyperforest::rule::Rule;

    // two rules on a single dimension, spans [0,10] and [20,30], with a
    // genuine gap [11,19] that no rule covers
    let rules = [
        Rule::new(0, [0, 0, 0, 0, 0], [10, 0, 0, 0, 0]),
        Rule::new(1, [20, 0, 0, 0, 0], [30, 0, 0, 0, 0]),
    ];
    let ids = [0u32, 1u32];

    let shadow = shadow::project(&rules, &ids, 0, 0, 30);

    assert_eq!(shadow.intervals.len(), 3);
    assert_eq!(shadow.intervals[0].lo, 0);
    assert_eq!(shadow.intervals[0].hi, 10);
    assert_eq!(shadow.intervals[0].count, 1);

    assert_eq!(shadow.intervals[1].lo, 11);
    assert_eq!(shadow.intervals[1].hi, 19);
    assert_eq!(shadow.intervals[1].count, 0, "gap interval must carry a zero count");

    assert_eq!(shadow.intervals[2].lo, 20);
    assert_eq!(shadow.intervals[2].hi, 30);
    assert_eq!(shadow.intervals[2].count, 1);

    assert_eq!(shadow.total, 2);
}

#[test]
fn shadow_projection_has_no_gap_for_touching_rules() {
    use hyperforest::rule::Rule;

    // [0,10] and [11,20] are adjacent: there is no integer between them,
    // so no gap interval should appear.
    let rules = [
        Rule::new(0, [0, 0, 0, 0, 0], [10, 0, 0, 0, 0]),
        Rule::new(1, [11, 0, 0, 0, 0], [20, 0, 0, 0, 0]),
    ];
    let ids = [0u32, 1u32];

    let shadow = shadow::project(&rules, &ids, 0, 0, 20);
    assert_eq!(shadow.intervals.len(), 2);
    assert_eq!(shadow.intervals[0].hi, 10);
    assert_eq!(shadow.intervals[1].lo, 11);
}

#[test]
fn shadow_projection_counts_overlap_depth() {
    use hyperforest::rule::Rule;

    // fully overlapping rules: the middle interval should carry count 2
    let rules = [
        Rule::new(0, [0, 0, 0, 0, 0], [20, 0, 0, 0, 0]),
        Rule::new(1, [10, 0, 0, 0, 0], [30, 0, 0, 0, 0]),
    ];
    let ids = [0u32, 1u32];

    let shadow = shadow::project(&rules, &ids, 0, 0, 30);
    assert_eq!(shadow.intervals.len(), 3);
    assert_eq!(shadow.intervals[0].count, 1); // [0,9]
    assert_eq!(shadow.intervals[1].count, 2); // [10,20]
    assert_eq!(shadow.intervals[2].count, 1); // [21,30]
}

#[test]
fn gen_minrng_separates_disjoint_spans_into_one_subset() {
    let mut raw = [
        RngRid::new(0, 10, 0),
        RngRid::new(20, 30, 1),
        RngRid::new(40, 50, 2),
    ];
    raw.sort_unstable_by_key(|e| e.value);

    let (rej, ack, _measure) = gen_minrng(&raw);
    assert!(rej.is_empty(), "pairwise disjoint spans must all be accepted");
    assert_eq!(ack.len(), 3);
}

#[test]
fn gen_minrng_rejects_overlapping_spans() {
    let mut raw = [
        RngRid::new(0, 20, 0),
        RngRid::new(10, 30, 1), // overlaps the first
        RngRid::new(40, 50, 2), // disjoint from both
    ];
    raw.sort_unstable_by_key(|e| e.value);

    let (rej, ack, _measure) = gen_minrng(&raw);
    let rejected_ids: Vec<u32> = rej
        .iter()
        .flat_map(|r| (r.index[0]..=r.index[1]).map(|i| raw[i].rule_id))
        .collect();
    let accepted_ids: Vec<u32> = ack
        .iter()
        .flat_map(|a| (a.index[0]..=a.index[1]).map(|i| raw[i].rule_id))
        .collect();

    assert_eq!(rejected_ids.len() + accepted_ids.len(), 3);
    assert!(accepted_ids.contains(&2), "the disjoint span must be accepted");
    assert!(
        rejected_ids.contains(&0) || rejected_ids.contains(&1),
        "one of the overlapping spans must be rejected"
    );
}
