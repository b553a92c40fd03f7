use crate::error::Error;
use crate::hypersplit::tree::Forest;
use crate::packet::Point;

/// Walk every tree in the forest and return the lowest-priority (best)
/// matching rule, falling back to the forest's default rule if a tree's
/// walk lands on a leaf that still resolves to it.
pub fn lookup(forest: &Forest, point: &Point) -> u32 {
    let offset = forest.offset();
    let mut best = forest.default_rule;

    for tree in &forest.trees {
        let mut id = offset;
        loop {
            let node = &tree.nodes[(id - offset) as usize];
            id = if point.dims[node.dim as usize] <= node.threshold {
                node.lchild
            } else {
                node.rchild
            };
            if id < offset {
                break;
            }
        }
        if id < best {
            best = id;
        }
    }

    best
}

/// One recorded point/expected-priority pair, used by [`verify`] to replay a
/// trace against a built forest.
#[derive(Debug, Clone, Copy)]
pub struct TracePacket {
    pub point: Point,
    pub expected: u32,
}

/// Replay a trace of points against the forest, failing on the first
/// mismatch against a linear-scan oracle's expectation.
pub fn verify(forest: &Forest, trace: &[TracePacket]) -> Result<(), Error> {
    for (index, pkt) in trace.iter().enumerate() {
        let got = lookup(forest, &pkt.point);
        if got != pkt.expected {
            return Err(Error::Mismatch {
                index,
                got,
                expected: pkt.expected,
            });
        }
    }
    Ok(())
}

/// Synonym for `drop`, kept so callers mirror the explicit
/// build/lookup/verify/destroy life cycle.
pub fn destroy(forest: Forest) {
    drop(forest);
}
