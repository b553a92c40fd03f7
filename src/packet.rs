/// Number of dimensions a rule or point spans: source IP, destination IP,
/// source port, destination port, protocol.
pub const DIM_MAX: usize = 5;

/// One of the five classification dimensions, in the fixed order the builder
/// and searcher both index by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    SrcIp = 0,
    DstIp = 1,
    SrcPort = 2,
    DstPort = 3,
    Proto = 4,
}

impl Dimension {
    pub const ALL: [Dimension; DIM_MAX] = [
        Dimension::SrcIp,
        Dimension::DstIp,
        Dimension::SrcPort,
        Dimension::DstPort,
        Dimension::Proto,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Bit width of the field this dimension is drawn from (used only to
    /// clip the root space; values are carried as `u32` throughout).
    pub fn width(self) -> u32 {
        match self {
            Dimension::SrcIp | Dimension::DstIp => 32,
            Dimension::SrcPort | Dimension::DstPort => 16,
            Dimension::Proto => 8,
        }
    }
}

/// A single point in the 5-dimensional classification space, e.g. the
/// 5-tuple extracted from a packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub dims: [u32; DIM_MAX],
}

impl Point {
    pub fn new(src_ip: u32, dst_ip: u32, src_port: u16, dst_port: u16, proto: u8) -> Self {
        Self {
            dims: [src_ip, dst_ip, src_port as u32, dst_port as u32, proto as u32],
        }
    }

    pub fn src_ip(&self) -> u32 {
        self.dims[Dimension::SrcIp.index()]
    }

    pub fn dst_ip(&self) -> u32 {
        self.dims[Dimension::DstIp.index()]
    }

    pub fn src_port(&self) -> u16 {
        self.dims[Dimension::SrcPort.index()] as u16
    }

    pub fn dst_port(&self) -> u16 {
        self.dims[Dimension::DstPort.index()] as u16
    }

    pub fn proto(&self) -> u8 {
        self.dims[Dimension::Proto.index()] as u8
    }
}
