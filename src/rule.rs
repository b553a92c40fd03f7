use crate::packet::{Dimension, Point, DIM_MAX};
use alloc::vec::Vec;
use core::fmt;

/// Classification rule: a closed box `[lo[d], hi[d]]` per dimension plus the
/// priority returned when a point falls inside the box.
///
/// Lower priority values win when several rules in the same tree match the
/// same point. A wildcard dimension is `lo[d] == 0 && hi[d] == <dimension
/// width max>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub priority: u32,
    pub lo: [u32; DIM_MAX],
    pub hi: [u32; DIM_MAX],
}

impl Rule {
    pub fn new(priority: u32, lo: [u32; DIM_MAX], hi: [u32; DIM_MAX]) -> Self {
        Self { priority, lo, hi }
    }

    /// Check if the rule matches a given point.
    pub fn matches(&self, point: &Point) -> bool {
        (0..DIM_MAX).all(|d| point.dims[d] >= self.lo[d] && point.dims[d] <= self.hi[d])
    }

    /// Whether this rule's box fully covers the given box (used by the
    /// HyperSplit builder to recognize a leaf without splitting further).
    pub fn covers(&self, lo: &[u32; DIM_MAX], hi: &[u32; DIM_MAX]) -> bool {
        (0..DIM_MAX).all(|d| self.lo[d] <= lo[d] && self.hi[d] >= hi[d])
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rule(pri={}, box=", self.priority)?;
        for d in Dimension::ALL {
            let i = d.index();
            write!(f, "[{},{}]", self.lo[i], self.hi[i])?;
        }
        write!(f, ")")
    }
}

/// An ordered set of rules sharing a single default (lowest-priority,
/// wildcard-everything) rule appended last.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The wildcard rule every subset carries, by convention the last entry.
    pub fn default_rule(&self) -> u32 {
        self.rules[self.rules.len() - 1].priority
    }
}

/// A partition of a rule set into disjoint, non-replicated subsets, each
/// still carrying a copy of the shared default rule.
#[derive(Debug, Clone)]
pub struct Partition {
    pub subsets: Vec<RuleSet>,
}

impl Partition {
    pub fn new(subsets: Vec<RuleSet>) -> Self {
        Self { subsets }
    }

    /// A partition with a single subset holding every rule, used as the
    /// input to [`crate::rfg::rf_group`] and as a degenerate input straight
    /// to the HyperSplit builder when grouping is skipped.
    pub fn unpartitioned(rules: Vec<Rule>) -> Self {
        Self {
            subsets: alloc::vec![RuleSet::new(rules)],
        }
    }
}
