use crate::core::address::Ipv4Address;
use crate::core::cidr::CidrBlock;
use crate::core::provider::Provider;
use crate::core::subnet_record::ProviderSubnetRecord;
use serde::Serialize;

/*-------------------------------------------------------------------------------------------------
  Search Result
-------------------------------------------------------------------------------------------------*/

/// A provider subnet record that contains the queried address. Built fresh for every query.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SearchResult {
    /// The queried address.
    #[serde(rename = "IPAddress")]
    pub ip_address: Ipv4Address,

    /// Provider whose dataset contains the matching subnet.
    #[serde(rename = "CloudProvider")]
    pub provider: Provider,

    /// Matching subnet, serialized in CIDR text form.
    #[serde(rename = "Subnet")]
    pub subnet: CidrBlock,

    #[serde(rename = "Region")]
    pub region: String,

    #[serde(rename = "Service")]
    pub service: String,

    #[serde(rename = "SubnetSize")]
    pub subnet_size: String,
}

impl SearchResult {
    pub fn new(ip_address: Ipv4Address, provider: Provider, record: &ProviderSubnetRecord) -> Self {
        Self {
            ip_address,
            provider,
            subnet: record.subnet,
            region: record.region.clone(),
            service: record.service.clone(),
            subnet_size: record.subnet_size.clone(),
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::subnet_record::tests::test_azure_record;

    #[test]
    fn test_search_result_copies_record_fields() {
        let address: Ipv4Address = "20.60.0.5".parse().unwrap();
        let result = SearchResult::new(address, Provider::Azure, &test_azure_record());

        assert_eq!(result.ip_address, address);
        assert_eq!(result.provider, Provider::Azure);
        assert_eq!(result.subnet.to_string(), "20.60.0.0/16");
        assert_eq!(result.region, "eastus");
        assert_eq!(result.service, "AzureCloud");
        assert_eq!(result.subnet_size, "65536");
    }

    #[test]
    fn test_search_result_json() {
        let address: Ipv4Address = "20.60.0.5".parse().unwrap();
        let result = SearchResult::new(address, Provider::Azure, &test_azure_record());
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["IPAddress"], "20.60.0.5");
        assert_eq!(value["CloudProvider"], "azure");
        assert_eq!(value["Subnet"], "20.60.0.0/16");
        assert_eq!(value["Region"], "eastus");
        assert_eq!(value["Service"], "AzureCloud");
        assert_eq!(value["SubnetSize"], "65536");
    }
}
