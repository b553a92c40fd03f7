use crate::packet::Point;
use crate::rule::Rule;
use alloc::vec::Vec;

/// Priority-ordered linear scan, used as the correctness oracle that the
/// HyperSplit forest's `lookup` results are checked against.
pub struct LinearClassifier {
    rules: Vec<Rule>,
}

impl LinearClassifier {
    pub fn build(rules: &[Rule]) -> Self {
        let mut sorted_rules = rules.to_vec();
        sorted_rules.sort_by_key(|r| r.priority);
        Self {
            rules: sorted_rules,
        }
    }

    /// Return the matching rule's priority; falls back to the lowest-ranked
    /// rule (the default, by construction) if somehow nothing else matched.
    pub fn classify(&self, point: &Point) -> u32 {
        for rule in &self.rules {
            if rule.matches(point) {
                return rule.priority;
            }
        }
        self.rules.last().map(|r| r.priority).unwrap_or(0)
    }
}
