use core::fmt;

/// Failure modes shared by the RFG partitioner and the HyperSplit builder/searcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Malformed partition or rule set (wrong subset count, too few rules).
    InvalidArgument,
    /// Allocation failure along the worklist drive.
    OutOfMemory,
    /// RFG's subset cap was exceeded.
    Unsupported,
    /// HyperSplit could not find a splittable dimension (duplicate rules).
    Degenerate,
    /// `verify` found a different rule than the trace expected.
    Mismatch { index: usize, got: u32, expected: u32 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument => write!(f, "invalid argument"),
            Error::OutOfMemory => write!(f, "out of memory"),
            Error::Unsupported => write!(f, "unsupported (partition cap exceeded)"),
            Error::Degenerate => write!(f, "degenerate input: no splittable dimension"),
            Error::Mismatch { index, got, expected } => write!(
                f,
                "packet {index} matched {got}, but should match {expected}"
            ),
        }
    }
}

impl core::error::Error for Error {}
