use crate::core::errors::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/*-------------------------------------------------------------------------------------------------
  IPv4 Address
-------------------------------------------------------------------------------------------------*/

/// A validated IPv4 address held as its 32-bit big-endian integer value.
///
/// The only ways to build one are parsing dotted-decimal text ([Ipv4Address::from_str]) or
/// converting from an integer or [Ipv4Addr], so an `Ipv4Address` is never in an invalid state.
///
/// ```
/// use cloudiplookup::Ipv4Address;
///
/// let address: Ipv4Address = "20.60.0.5".parse().unwrap();
/// assert_eq!(address.to_integer(), 0x143C_0005);
/// assert_eq!(address.octets(), [20, 60, 0, 5]);
/// assert!("20.60.0.256".parse::<Ipv4Address>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Ipv4Address(u32);

impl Ipv4Address {
    pub fn from_integer(value: u32) -> Self {
        Self(value)
    }

    /// Big-endian packing of the four octets.
    pub fn to_integer(&self) -> u32 {
        self.0
    }

    pub fn octets(&self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Parse strict dotted-decimal text: exactly four groups of ASCII digits, each in `0..=255`,
    /// separated by single dots, with nothing before or after.
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || Error::InvalidFormat(text.to_string());

        let mut octets = [0u8; 4];
        let mut groups = text.split('.');
        for octet in octets.iter_mut() {
            let group = groups.next().ok_or_else(invalid)?;
            *octet = parse_octet(group).ok_or_else(invalid)?;
        }
        if groups.next().is_some() {
            return Err(invalid());
        }

        Ok(Self(u32::from_be_bytes(octets)))
    }
}

/// Parse one decimal group. `str::parse::<u8>` alone would accept a leading `+`.
fn parse_octet(group: &str) -> Option<u8> {
    if group.is_empty() || group.len() > 3 || !group.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    group.parse::<u16>().ok().and_then(|value| u8::try_from(value).ok())
}

/*--------------------------------------------------------------------------------------
  Conversions
--------------------------------------------------------------------------------------*/

impl FromStr for Ipv4Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ipv4Address::parse(s)
    }
}

impl fmt::Display for Ipv4Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.octets();
        write!(f, "{a}.{b}.{c}.{d}")
    }
}

impl From<Ipv4Addr> for Ipv4Address {
    fn from(value: Ipv4Addr) -> Self {
        Self(u32::from(value))
    }
}

impl From<Ipv4Address> for Ipv4Addr {
    fn from(value: Ipv4Address) -> Self {
        Ipv4Addr::from(value.0)
    }
}

impl Serialize for Ipv4Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Ipv4Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
