use crate::core::address::Ipv4Address;
use crate::core::errors::{Error, Result};
use ipnetwork::Ipv4Network;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/*-------------------------------------------------------------------------------------------------
  CIDR Block
-------------------------------------------------------------------------------------------------*/

/// An IPv4 network address and prefix length (`0..=32`).
///
/// The network address is kept as written; host bits are masked off when testing containment, so
/// `20.60.1.0/16` and `20.60.0.0/16` contain the same addresses.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CidrBlock {
    network: Ipv4Address,
    prefix_len: u8,
}

impl CidrBlock {
    pub fn new(network: Ipv4Address, prefix_len: u8) -> Result<Self> {
        if prefix_len > 32 {
            return Err(Error::InvalidFormat(format!("{network}/{prefix_len}")));
        }
        Ok(Self {
            network,
            prefix_len,
        })
    }

    pub fn network(&self) -> Ipv4Address {
        self.network
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Netmask with exactly `prefix_len` high bits set. A shift by the full bit width is not
    /// defined for `u32`, so `/0` yields an empty mask through `checked_shl`.
    pub fn mask(&self) -> u32 {
        u32::MAX
            .checked_shl(32 - u32::from(self.prefix_len))
            .unwrap_or(0)
    }

    /// `true` when `address` falls inside this block; `/0` contains everything and `/32` only the
    /// network address itself.
    pub fn contains(&self, address: Ipv4Address) -> bool {
        let mask = self.mask();
        (address.to_integer() & mask) == (self.network.to_integer() & mask)
    }

    /// Parse `a.b.c.d/n` text.
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || Error::InvalidFormat(text.to_string());

        let (address, prefix_len) = text.split_once('/').ok_or_else(invalid)?;
        let network = Ipv4Address::parse(address).map_err(|_| invalid())?;

        if prefix_len.is_empty()
            || prefix_len.len() > 2
            || !prefix_len.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let prefix_len: u8 = prefix_len.parse().map_err(|_| invalid())?;

        CidrBlock::new(network, prefix_len).map_err(|_| invalid())
    }
}

/*--------------------------------------------------------------------------------------
  Conversions
--------------------------------------------------------------------------------------*/

impl FromStr for CidrBlock {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CidrBlock::parse(s)
    }
}

impl fmt::Display for CidrBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix_len)
    }
}

impl From<CidrBlock> for Ipv4Network {
    fn from(value: CidrBlock) -> Self {
        // prefix_len is bounded to 0..=32 at construction
        Ipv4Network::new(value.network.into(), value.prefix_len)
            .unwrap_or_else(|_| Ipv4Network::from(std::net::Ipv4Addr::from(value.network)))
    }
}

impl Serialize for CidrBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CidrBlock {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
