use crate::error::Error;
use crate::packet::DIM_MAX;
use crate::rfg::rng::{gen_minrng, RngIdx, RngRid};
use crate::rule::{Partition, Rule, RuleSet};
use alloc::collections::VecDeque;
use alloc::vec::Vec;

/// Default cap on the number of subsets a partition may be split into.
pub const DEFAULT_MAX_SUBSETS: usize = 64;

const ALL_DIMS_MASK: u8 = (1 << DIM_MAX) - 1;

/// Tunables for [`rf_group`].
#[derive(Debug, Clone, Copy)]
pub struct RfgOptions {
    /// Give up with [`Error::Unsupported`] rather than exceed this many
    /// output subsets.
    pub max_subsets: usize,
}

impl Default for RfgOptions {
    fn default() -> Self {
        Self {
            max_subsets: DEFAULT_MAX_SUBSETS,
        }
    }
}

struct RfgWork {
    rule_ids: Vec<u32>,
    mask: u8,
}

/// Partition a single rule subset into disjoint, non-replicated subsets.
///
/// The input partition must hold exactly one subset with more than two
/// rules (the last of which is the shared default). Each output subset
/// still carries a copy of that default rule.
pub fn rf_group(partition: &Partition, opts: RfgOptions) -> Result<Partition, Error> {
    if partition.subsets.len() != 1 {
        log::error!(
            "rf_group: expected exactly one input subset, got {}",
            partition.subsets.len()
        );
        return Err(Error::InvalidArgument);
    }
    let rs = &partition.subsets[0];
    if rs.rules.len() <= 2 {
        log::error!("rf_group: input subset has too few rules ({})", rs.rules.len());
        return Err(Error::InvalidArgument);
    }

    let real_rule_count = rs.rules.len() - 1;
    let default = rs.rules[real_rule_count].clone();
    log::debug!(
        "rf_group: {real_rule_count} rules, max_subsets={}",
        opts.max_subsets
    );

    let mut bufs: [Vec<u32>; 2] = [(0..real_rule_count as u32).collect(), Vec::new()];
    let mut subsets = Vec::new();
    let mut iter = 0usize;

    loop {
        let cur = iter & 1;
        let exc = cur ^ 1;
        if bufs[cur].is_empty() {
            break;
        }
        if iter >= opts.max_subsets {
            log::error!("rf_group: exceeded max_subsets={}", opts.max_subsets);
            return Err(Error::Unsupported);
        }

        let taken = core::mem::take(&mut bufs[cur]);
        let mut accepted = if taken.len() > 1 {
            let mut accepted = Vec::new();
            let mut queue: VecDeque<RfgWork> = VecDeque::new();
            queue.push_back(RfgWork {
                rule_ids: taken,
                mask: 0,
            });
            while let Some(entry) = queue.pop_front() {
                split_step(&rs.rules, entry, &mut accepted, &mut bufs[exc], &mut queue);
            }
            accepted
        } else {
            taken
        };

        accepted.sort_unstable();
        let mut subset_rules: Vec<Rule> = accepted
            .iter()
            .map(|&id| rs.rules[id as usize].clone())
            .collect();
        log::trace!("rf_group: subset {iter} has {} rules", subset_rules.len());
        subset_rules.push(default.clone());
        subsets.push(RuleSet::new(subset_rules));

        iter += 1;
    }

    log::debug!("rf_group: produced {} subsets", subsets.len());
    Ok(Partition::new(subsets))
}

/// Choose the dimension maximizing `(accepted_bucket_count << 32) |
/// accepted_rule_count` among the dimensions not yet used by this entry,
/// then apply the resulting accept/reject split.
fn split_step(
    rules: &[Rule],
    entry: RfgWork,
    accepted: &mut Vec<u32>,
    rejected: &mut Vec<u32>,
    queue: &mut VecDeque<RfgWork>,
) {
    let mut best: Option<(usize, Vec<RngIdx>, Vec<RngIdx>, Vec<RngRid>, u64)> = None;

    for d in 0..DIM_MAX {
        if entry.mask & (1 << d) != 0 {
            continue;
        }
        let mut raw: Vec<RngRid> = entry
            .rule_ids
            .iter()
            .map(|&rid| {
                let r = &rules[rid as usize];
                RngRid::new(r.lo[d], r.hi[d], rid)
            })
            .collect();
        raw.sort_unstable_by_key(|e| e.value);
        let (rej, ack, measure) = gen_minrng(&raw);
        if best.as_ref().map_or(true, |b| measure > b.4) {
            best = Some((d, ack, rej, raw, measure));
        }
    }

    // At least one unmasked dimension with >= 1 accepted rule always exists
    // for an entry with >= 2 rules and mask != all-dims, since every
    // dimension's accepted-bucket measure is strictly positive.
    let (dim, ack, rej, raw, _measure) =
        best.expect("rf_group: entry with an unmasked dimension always yields a candidate split");

    apply(dim, &rej, &ack, &raw, entry.mask, accepted, rejected, queue);
}

#[allow(clippy::too_many_arguments)]
fn apply(
    dim: usize,
    rej: &[RngIdx],
    ack: &[RngIdx],
    raw: &[RngRid],
    entry_mask: u8,
    accepted: &mut Vec<u32>,
    rejected: &mut Vec<u32>,
    queue: &mut VecDeque<RfgWork>,
) {
    for r in rej {
        for j in r.index[0]..=r.index[1] {
            rejected.push(raw[j].rule_id);
        }
    }

    let new_mask = entry_mask | (1 << dim);
    let all_dims_used = new_mask == ALL_DIMS_MASK;

    for a in ack {
        if a.index[0] == a.index[1] || all_dims_used {
            for j in a.index[0]..=a.index[1] {
                accepted.push(raw[j].rule_id);
            }
        } else {
            let ids: Vec<u32> = (a.index[0]..=a.index[1]).map(|j| raw[j].rule_id).collect();
            queue.push_back(RfgWork {
                rule_ids: ids,
                mask: new_mask,
            });
        }
    }
}
