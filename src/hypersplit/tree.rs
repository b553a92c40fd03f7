use alloc::vec::Vec;

/// One decision node. `lchild`/`rchild` hold either another node's pool
/// index (`>= offset`) or a leaf rule priority (`< offset`), so a single
/// integer comparison during search tells which.
#[derive(Debug, Clone, Copy, Default)]
pub struct HsNode {
    pub dim: u8,
    pub threshold: u32,
    pub lchild: u32,
    pub rchild: u32,
}

/// One HyperSplit decision tree, built from a single rule subset.
#[derive(Debug, Clone, Default)]
pub struct HsTree {
    pub nodes: Vec<HsNode>,
    pub internal_count: u32,
    pub external_count: u32,
    pub depth_max: u32,
    pub depth_avg: f64,
}

/// A forest of independently-built trees, one per partition subset, sharing
/// the same default rule.
#[derive(Debug, Clone)]
pub struct Forest {
    pub trees: Vec<HsTree>,
    pub default_rule: u32,
}

impl Forest {
    /// `lchild`/`rchild` values at or above this offset are pool indices;
    /// below it they are leaf rule priorities.
    pub fn offset(&self) -> u32 {
        self.default_rule + 1
    }
}
