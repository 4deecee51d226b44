use crate::core::address::Ipv4Address;
use crate::core::cidr::CidrBlock;
use lazy_static::lazy_static;

/*-------------------------------------------------------------------------------------------------
  Reserved Address Ranges
-------------------------------------------------------------------------------------------------*/

const RESERVED_CIDRS: [(u32, u8); 6] = [
    (0x0A00_0000, 8),  // 10.0.0.0/8       RFC 1918
    (0xAC10_0000, 12), // 172.16.0.0/12    RFC 1918
    (0xC0A8_0000, 16), // 192.168.0.0/16   RFC 1918
    (0x6440_0000, 10), // 100.64.0.0/10    RFC 6598 CGNAT
    (0x7F00_0000, 8),  // 127.0.0.0/8      loopback
    (0xA9FE_0000, 16), // 169.254.0.0/16   link-local
];

lazy_static! {
    /// Non-routable ranges that are never looked up in the provider datasets.
    pub static ref RESERVED_RANGES: Vec<CidrBlock> = RESERVED_CIDRS
        .iter()
        .filter_map(|&(network, prefix_len)| {
            CidrBlock::new(Ipv4Address::from_integer(network), prefix_len).ok()
        })
        .collect();
}

/// The reserved range containing `address`, if any. Ranges are tested in table order.
pub fn reserved_range(address: Ipv4Address) -> Option<&'static CidrBlock> {
    RESERVED_RANGES.iter().find(|range| range.contains(address))
}

pub fn is_reserved(address: Ipv4Address) -> bool {
    reserved_range(address).is_some()
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;

    fn address(text: &str) -> Ipv4Address {
        text.parse().unwrap()
    }

    #[test]
    fn test_reserved_table() {
        let table: Vec<String> = RESERVED_RANGES.iter().map(|r| r.to_string()).collect();
        assert_eq!(
            table,
            [
                "10.0.0.0/8",
                "172.16.0.0/12",
                "192.168.0.0/16",
                "100.64.0.0/10",
                "127.0.0.0/8",
                "169.254.0.0/16",
            ]
        );
    }

    #[test]
    fn test_reserved_addresses() {
        for text in [
            "10.1.2.3",
            "172.16.0.1",
            "172.31.255.255",
            "192.168.1.1",
            "100.64.0.1",
            "100.127.255.254",
            "127.0.0.1",
            "169.254.1.1",
        ] {
            assert!(is_reserved(address(text)), "{text}");
        }
    }

    #[test]
    fn test_public_addresses() {
        for text in [
            "8.8.8.8",
            "20.60.0.5",
            "172.32.0.1",
            "172.15.255.255",
            "100.128.0.1",
            "192.169.0.1",
            "11.0.0.1",
        ] {
            assert!(!is_reserved(address(text)), "{text}");
        }
    }

    #[test]
    fn test_reserved_range_identifies_the_block() {
        let range = reserved_range(address("100.64.0.1")).unwrap();
        assert_eq!(range.to_string(), "100.64.0.0/10");
        assert!(reserved_range(address("1.1.1.1")).is_none());
    }
}
