pub mod builder;
pub mod search;
pub mod tree;

pub use builder::build;
pub use search::{destroy, lookup, verify, TracePacket};
pub use tree::{Forest, HsNode, HsTree};
