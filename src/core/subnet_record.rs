use crate::core::cidr::CidrBlock;
use crate::core::errors::Result;
use crate::core::json::JsonSubnet;
use serde::Serialize;

/*-------------------------------------------------------------------------------------------------
  Provider Subnet Record
-------------------------------------------------------------------------------------------------*/

/// One published IP range from a provider dataset, with the region and service it is assigned
/// to. Records are immutable once loaded.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd, Serialize)]
pub struct ProviderSubnetRecord {
    /// IPv4 CIDR block.
    #[serde(rename = "Subnet")]
    pub subnet: CidrBlock,

    /// Provider region the block is assigned to.
    #[serde(rename = "Region")]
    pub region: String,

    /// Provider service using the block.
    #[serde(rename = "Service")]
    pub service: String,

    /// Free-form size description copied from the dataset.
    #[serde(rename = "SubnetSize")]
    pub subnet_size: String,
}

impl TryFrom<JsonSubnet> for ProviderSubnetRecord {
    type Error = crate::core::errors::Error;

    fn try_from(value: JsonSubnet) -> Result<Self> {
        Ok(Self {
            subnet: value.subnet.parse()?,
            region: value.region,
            service: value.service,
            subnet_size: value.subnet_size,
        })
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
