//! Packet classification for activation.
//!
//! A [`PacketTrigger`] looks at a raw IPv4 packet and decides whether it
//! is a TCP segment from the configured source port. Everything else,
//! including malformed or truncated input, is simply "no match".

/// Default trigger source port.
pub const DEFAULT_TRIGGER_PORT: u16 = 0xfe71;

const IPV4_MIN_HEADER: usize = 20;
const TCP_MIN_HEADER: usize = 20;
const PROTO_TCP: u8 = 6;

/// Matches IPv4/TCP packets by source port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PacketTrigger {
    source_port: u16,
}

impl Default for PacketTrigger {
    fn default() -> Self {
        Self::new(DEFAULT_TRIGGER_PORT)
    }
}

impl PacketTrigger {
    /// Match TCP segments whose source port is `source_port`.
    pub const fn new(source_port: u16) -> Self {
        Self { source_port }
    }

    /// The port this trigger matches.
    pub fn source_port(&self) -> u16 {
        self.source_port
    }

    /// Whether `packet` (starting at the IPv4 header) is a TCP segment from
    /// the trigger port.
    ///
    /// The TCP header is located with the IHL field, so IPv4 options are
    /// honoured. The whole minimum TCP header must be present.
    pub fn matches(&self, packet: &[u8]) -> bool {
        self.tcp_source_port(packet) == Some(self.source_port)
    }

    fn tcp_source_port(&self, packet: &[u8]) -> Option<u16> {
        if packet.len() < IPV4_MIN_HEADER {
            return None;
        }
        let version = packet[0] >> 4;
        let ihl = usize::from(packet[0] & 0x0f) * 4;
        if version != 4 || ihl < IPV4_MIN_HEADER || packet[9] != PROTO_TCP {
            return None;
        }
        let tcp = packet.get(ihl..ihl + TCP_MIN_HEADER)?;
        Some(u16::from_be_bytes([tcp[0], tcp[1]]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packet(ihl_words: u8, proto: u8, src_port: u16, tcp_len: usize) -> Vec<u8> {
        let ihl = usize::from(ihl_words) * 4;
        let mut p = vec![0u8; ihl + tcp_len];
        p[0] = 0x40 | ihl_words;
        p[9] = proto;
        if tcp_len >= 2 {
            p[ihl..ihl + 2].copy_from_slice(&src_port.to_be_bytes());
        }
        p
    }

    #[test]
    fn default_port_matches_default_trigger() {
        let t = PacketTrigger::default();
        assert_eq!(t.source_port(), 65137);
        assert!(t.matches(&packet(5, PROTO_TCP, 65137, 20)));
    }

    #[test]
    fn other_port_does_not_match() {
        let t = PacketTrigger::default();
        assert!(!t.matches(&packet(5, PROTO_TCP, 443, 20)));
        // Byte-swapped port.
        assert!(!t.matches(&packet(5, PROTO_TCP, 0x71fe, 20)));
    }

    #[test]
    fn udp_does_not_match() {
        let t = PacketTrigger::default();
        assert!(!t.matches(&packet(5, 17, 65137, 20)));
    }

    #[test]
    fn ip_options_shift_tcp_header() {
        let t = PacketTrigger::new(8080);
        assert!(t.matches(&packet(7, PROTO_TCP, 8080, 20)));
    }

    #[test]
    fn truncated_input_does_not_match() {
        let t = PacketTrigger::default();
        assert!(!t.matches(&[]));
        assert!(!t.matches(&[0x45; 19]));
        assert!(!t.matches(&packet(5, PROTO_TCP, 65137, 19)));
    }

    #[test]
    fn bad_header_fields_do_not_match() {
        let t = PacketTrigger::default();
        let mut v6 = packet(5, PROTO_TCP, 65137, 20);
        v6[0] = 0x65;
        assert!(!t.matches(&v6));

        let mut short_ihl = packet(5, PROTO_TCP, 65137, 20);
        short_ihl[0] = 0x44;
        assert!(!t.matches(&short_ihl));
    }
}
