use crate::packet::{Dimension, Point};
use crate::rule::Rule;
use alloc::vec::Vec;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

const PROTO_TCP: u8 = 6;
const PROTO_UDP: u8 = 17;
const PROTO_IGMP: u8 = 2;

const SIP: usize = Dimension::SrcIp as usize;
const DIP: usize = Dimension::DstIp as usize;
const SPORT: usize = Dimension::SrcPort as usize;
const DPORT: usize = Dimension::DstPort as usize;
const PROTO: usize = Dimension::Proto as usize;

/// Deterministic generator of LAN/WAN/IGMP-flavored rule sets and packets,
/// built on a seeded PCG32 so a given seed always reproduces the same
/// partition and trace.
pub struct Simulation {
    rng: Pcg32,
}

impl Simulation {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Generate `n_rules` rules plus a synthetic wildcard default rule
    /// appended last, mimicking a small LAN firewall: LAN-to-WAN service
    /// allowances, WAN-to-LAN web server exposure, and IGMP multicast.
    pub fn generate_rules(&mut self, n_rules: usize) -> Vec<Rule> {
        let mut rules = Vec::with_capacity(n_rules + 1);

        for i in 0..n_rules {
            let priority = i as u32;
            let rule = match self.rng.gen_range(0..10) {
                0..=5 => self.gen_lan_to_wan_rule(priority),
                6..=8 => self.gen_wan_to_lan_rule(priority),
                _ => self.gen_igmp_rule(priority),
            };
            rules.push(rule);
        }

        let lo = [0u32; 5];
        let mut hi = [0u32; 5];
        hi[SIP] = u32::MAX;
        hi[DIP] = u32::MAX;
        hi[SPORT] = 65535;
        hi[DPORT] = 65535;
        hi[PROTO] = 255;
        rules.push(Rule::new(n_rules as u32, lo, hi));

        rules
    }

    fn gen_lan_to_wan_rule(&mut self, priority: u32) -> Rule {
        // Source: 192.168.x.x
        let src_ip_base = 0xC0A8_0000u32;
        let src_ip_mask = self.rng.gen_range(16..32);
        let src_ip_suffix = self.rng.gen::<u32>() & ((1u32 << (32 - src_ip_mask)) - 1);
        let src_start = src_ip_base | src_ip_suffix;
        let src_end = src_start + self.rng.gen_range(0..255);

        let dst_ip = self.rng.gen::<u32>();
        let dst_end = dst_ip.saturating_add(100);
        let dport = self.gen_service_port() as u32;
        let proto = if self.rng.gen() { PROTO_TCP } else { PROTO_UDP } as u32;

        let mut lo = [0u32; 5];
        let mut hi = [0u32; 5];
        lo[SIP] = src_start;
        hi[SIP] = src_end;
        lo[DIP] = dst_ip;
        hi[DIP] = dst_end;
        lo[SPORT] = 1024;
        hi[SPORT] = 65535;
        lo[DPORT] = dport;
        hi[DPORT] = dport;
        lo[PROTO] = proto;
        hi[PROTO] = proto;

        Rule::new(priority, lo, hi)
    }

    fn gen_wan_to_lan_rule(&mut self, priority: u32) -> Rule {
        let src_ip = self.rng.gen::<u32>();
        let dst_ip_base = 0xC0A8_0000u32;
        let dst_addr = dst_ip_base | (self.rng.gen::<u32>() & 0xFFFF);

        let mut lo = [0u32; 5];
        let mut hi = [0u32; 5];
        lo[SIP] = src_ip;
        hi[SIP] = src_ip.saturating_add(50);
        lo[DIP] = dst_addr;
        hi[DIP] = dst_addr;
        lo[SPORT] = 0;
        hi[SPORT] = 65535;
        lo[DPORT] = 80;
        hi[DPORT] = 80;
        lo[PROTO] = PROTO_TCP as u32;
        hi[PROTO] = PROTO_TCP as u32;

        Rule::new(priority, lo, hi)
    }

    fn gen_igmp_rule(&mut self, priority: u32) -> Rule {
        let mut lo = [0u32; 5];
        let mut hi = [0u32; 5];
        hi[SIP] = u32::MAX;
        lo[DIP] = 0xE000_0000;
        hi[DIP] = 0xEFFF_FFFF; // 224.0.0.0/4
        hi[SPORT] = 65535;
        hi[DPORT] = 65535;
        lo[PROTO] = PROTO_IGMP as u32;
        hi[PROTO] = PROTO_IGMP as u32;

        Rule::new(priority, lo, hi)
    }

    fn gen_service_port(&mut self) -> u16 {
        match self.rng.gen_range(0..4) {
            0 => 80,
            1 => 443,
            2 => 53,
            _ => 8080,
        }
    }

    /// Generate `n_packets` points, skewed towards matching the LAN/WAN
    /// ranges above so most traces exercise real rule hits rather than the
    /// default.
    pub fn generate_packets(&mut self, n_packets: usize) -> Vec<Point> {
        let mut packets = Vec::with_capacity(n_packets);
        for _ in 0..n_packets {
            let src_ip = if self.rng.gen_bool(0.5) {
                0xC0A8_0000 | (self.rng.gen::<u32>() & 0xFFFF)
            } else {
                self.rng.gen()
            };
            let dst_ip = if self.rng.gen_bool(0.5) {
                0xC0A8_0000 | (self.rng.gen::<u32>() & 0xFFFF)
            } else {
                self.rng.gen()
            };
            let proto = if self.rng.gen_bool(0.1) {
                PROTO_IGMP
            } else if self.rng.gen() {
                PROTO_TCP
            } else {
                PROTO_UDP
            };

            packets.push(Point::new(src_ip, dst_ip, self.rng.gen(), self.rng.gen(), proto));
        }
        packets
    }
}
