use crate::error::Error;
use crate::hypersplit::tree::{Forest, HsNode, HsTree};
use crate::packet::{Dimension, DIM_MAX};
use crate::pool::Pool;
use crate::rule::{Partition, Rule, RuleSet};
use crate::shadow::{self, ShadowRange};
use alloc::collections::VecDeque;
use alloc::vec::Vec;

/// Upper bound on partition subsets a forest can be built from; mirrors the
/// cap RFG enforces on its own output (see [`crate::rfg::DEFAULT_MAX_SUBSETS`]).
const MAX_SUBSETS: usize = 64;

const FULL_LO: [u32; DIM_MAX] = [0, 0, 0, 0, 0];

fn full_hi() -> [u32; DIM_MAX] {
    let mut hi = [0u32; DIM_MAX];
    for d in Dimension::ALL {
        hi[d.index()] = (1u64 << d.width()).wrapping_sub(1) as u32;
    }
    hi
}

struct HsWork {
    lo: [u32; DIM_MAX],
    hi: [u32; DIM_MAX],
    node_id: usize,
    rule_ids: Vec<u32>,
    depth: u32,
}

/// Build one tree per partition subset, returning a [`Forest`]. Each subset
/// is built independently; a failure partway through drops the partially
/// built tree along with every tree already completed in this call.
pub fn build(partition: &Partition) -> Result<Forest, Error> {
    let subset_count = partition.subsets.len();
    if subset_count == 0 || subset_count > MAX_SUBSETS {
        log::error!("hypersplit build: invalid subset count {subset_count}");
        return Err(Error::InvalidArgument);
    }
    for rs in &partition.subsets {
        if rs.rules.len() <= 1 {
            log::error!("hypersplit build: subset with {} rules is too small", rs.rules.len());
            return Err(Error::InvalidArgument);
        }
    }

    let default_rule = partition.subsets[0].default_rule();
    log::debug!(
        "hypersplit build: {subset_count} subsets, default_rule={default_rule}"
    );

    let mut trees = Vec::with_capacity(subset_count);
    for (i, rs) in partition.subsets.iter().enumerate() {
        let tree = build_tree(rs).map_err(|e| {
            log::error!("hypersplit build: subset {i} failed: {e}");
            e
        })?;
        log::trace!(
            "hypersplit build: subset {i} -> internal={} external={} depth_max={} depth_avg={:.2}",
            tree.internal_count,
            tree.external_count,
            tree.depth_max,
            tree.depth_avg
        );
        trees.push(tree);
    }

    Ok(Forest { trees, default_rule })
}

fn build_tree(rs: &RuleSet) -> Result<HsTree, Error> {
    let default_rule = rs.default_rule();
    let offset = default_rule + 1;
    let full_hi = full_hi();

    let mut pool: Pool<HsNode> = Pool::new();
    let root_id = pool.malloc()?;

    let top = &rs.rules[0];
    if top.covers(&FULL_LO, &full_hi) {
        let node = pool.get_mut(root_id);
        node.dim = 0;
        node.threshold = full_hi[0];
        node.lchild = top.priority;
        node.rchild = top.priority;

        let mut tree = HsTree {
            internal_count: 1,
            external_count: 1,
            depth_max: 1,
            depth_avg: 1.0,
            nodes: Vec::new(),
        };
        tree.nodes = pool.gather(1);
        return Ok(tree);
    }

    let mut tree = HsTree::default();
    tree.internal_count = 1;

    let mut queue: VecDeque<HsWork> = VecDeque::new();
    queue.push_back(HsWork {
        lo: FULL_LO,
        hi: full_hi,
        node_id: root_id,
        rule_ids: (0..rs.rules.len() as u32).collect(),
        depth: 1,
    });

    while let Some(entry) = queue.pop_front() {
        process_entry(&rs.rules, offset, &mut pool, &mut tree, &mut queue, entry)?;
    }

    tree.depth_avg /= tree.external_count as f64;
    debug_assert_eq!(tree.internal_count as usize, pool.len());
    debug_assert_eq!(tree.external_count, tree.internal_count + 1);

    let node_count = pool.len();
    tree.nodes = pool.gather(node_count);
    Ok(tree)
}

fn process_entry(
    rules: &[Rule],
    offset: u32,
    pool: &mut Pool<HsNode>,
    tree: &mut HsTree,
    queue: &mut VecDeque<HsWork>,
    entry: HsWork,
) -> Result<(), Error> {
    let HsWork {
        lo,
        hi,
        node_id,
        rule_ids,
        depth,
    } = entry;

    let (split_dim, shadow) = choose_dimension(rules, &lo, &hi, &rule_ids)?;
    let threshold = choose_threshold(&shadow);

    {
        let node = pool.get_mut(node_id);
        node.dim = split_dim as u8;
        node.threshold = threshold;
    }

    let mut left_hi = hi;
    left_hi[split_dim] = threshold;
    spawn(
        rules,
        offset,
        pool,
        tree,
        queue,
        node_id,
        false,
        lo,
        left_hi,
        depth,
        rule_ids.clone(),
        split_dim,
    )?;

    let mut right_lo = lo;
    right_lo[split_dim] = threshold + 1;
    spawn(
        rules, offset, pool, tree, queue, node_id, true, right_lo, hi, depth, rule_ids,
        split_dim,
    )?;

    Ok(())
}

fn intersects(rules: &[Rule], rid: u32, dim: usize, lo: u32, hi: u32) -> bool {
    let r = &rules[rid as usize];
    r.lo[dim] <= hi && r.hi[dim] >= lo
}

#[allow(clippy::too_many_arguments)]
fn spawn(
    rules: &[Rule],
    offset: u32,
    pool: &mut Pool<HsNode>,
    tree: &mut HsTree,
    queue: &mut VecDeque<HsWork>,
    parent_node_id: usize,
    is_right: bool,
    lo: [u32; DIM_MAX],
    hi: [u32; DIM_MAX],
    depth: u32,
    mut rule_ids: Vec<u32>,
    split_dim: usize,
) -> Result<(), Error> {
    rule_ids.retain(|&rid| intersects(rules, rid, split_dim, lo[split_dim], hi[split_dim]));

    let top_rid = rule_ids[0];
    let top = &rules[top_rid as usize];

    if top.covers(&lo, &hi) {
        tree.external_count += 1;
        tree.depth_avg += depth as f64;
        if depth > tree.depth_max {
            tree.depth_max = depth;
        }
        let node = pool.get_mut(parent_node_id);
        if is_right {
            node.rchild = top.priority;
        } else {
            node.lchild = top.priority;
        }
    } else {
        let child_id = pool.malloc()?;
        let child_ref = child_id as u32 + offset;
        let node = pool.get_mut(parent_node_id);
        if is_right {
            node.rchild = child_ref;
        } else {
            node.lchild = child_ref;
        }
        tree.internal_count += 1;
        queue.push_back(HsWork {
            lo,
            hi,
            node_id: child_id,
            rule_ids,
            depth: depth + 1,
        });
    }
    Ok(())
}

fn choose_dimension(
    rules: &[Rule],
    lo: &[u32; DIM_MAX],
    hi: &[u32; DIM_MAX],
    rule_ids: &[u32],
) -> Result<(usize, ShadowRange), Error> {
    let mut best: Option<(usize, ShadowRange, u64)> = None;
    for d in 0..DIM_MAX {
        let shadow = shadow::project(rules, rule_ids, d, lo[d], hi[d]);
        if shadow.interval_count() <= 1 {
            continue;
        }
        let measure = shadow.total - shadow.interval_count() as u64;
        if best.as_ref().map_or(true, |b| measure < b.2) {
            best = Some((d, shadow, measure));
        }
    }
    best.map(|(d, s, _)| (d, s)).ok_or(Error::Degenerate)
}

/// Pick the threshold that sends roughly half of `shadow.total` to each
/// child. `rng_num_max` deliberately excludes the last interval from
/// consideration: a naive "first interval where the running count reaches
/// half" can otherwise select the very last interval, leaving the right
/// child empty.
fn choose_threshold(shadow: &ShadowRange) -> u32 {
    let half = shadow.total / 2;
    let rng_num_max = shadow.intervals.len() - 1;
    let mut measure = shadow.intervals[0].count as u64;
    let mut i = 1usize;
    while i < rng_num_max && measure < half {
        measure += shadow.intervals[i].count as u64;
        i += 1;
    }
    shadow.intervals[i - 1].hi
}
