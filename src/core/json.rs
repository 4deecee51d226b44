use serde::{Deserialize, Serialize};

/*-------------------------------------------------------------------------------------------------
  Parse JSON
-------------------------------------------------------------------------------------------------*/

/// Parse a provider dataset: a JSON array of subnet records.
pub fn parse(json: &str) -> serde_json::Result<Vec<JsonSubnet>> {
    serde_json::from_str(json)
}

/*-------------------------------------------------------------------------------------------------
  JSON Data Structures
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  JSON Subnet
--------------------------------------------------------------------------------------*/

#[derive(Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct JsonSubnet {
    // Older dataset revisions used `ip_prefix`
    #[serde(rename = "Subnet", alias = "ip_prefix")]
    pub subnet: String,

    #[serde(rename = "Region")]
    pub region: String,

    #[serde(rename = "Service")]
    pub service: String,

    #[serde(rename = "SubnetSize", default)]
    pub subnet_size: String,
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
