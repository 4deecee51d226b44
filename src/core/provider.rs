use crate::core::errors::{Error, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/*-------------------------------------------------------------------------------------------------
  Cloud Provider
-------------------------------------------------------------------------------------------------*/

/// The fixed set of cloud and network providers with a published IP range dataset.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Provider {
    Azure,
    AzureGovernment,
    AzureChina,
    AzureGermany,
    Aws,
    Google,
    Oci,
    Cloudflare,
    Akamai,
    DigitalOcean,
}

impl Provider {
    /// Every known provider, in search order.
    pub const ALL: [Provider; 10] = [
        Provider::Azure,
        Provider::AzureGovernment,
        Provider::AzureChina,
        Provider::AzureGermany,
        Provider::Aws,
        Provider::Google,
        Provider::Oci,
        Provider::Cloudflare,
        Provider::Akamai,
        Provider::DigitalOcean,
    ];

    /// Lower-case name used on the command line and in search results.
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Azure => "azure",
            Provider::AzureGovernment => "azuregovernment",
            Provider::AzureChina => "azurechina",
            Provider::AzureGermany => "azuregermany",
            Provider::Aws => "aws",
            Provider::Google => "google",
            Provider::Oci => "oci",
            Provider::Cloudflare => "cloudflare",
            Provider::Akamai => "akamai",
            Provider::DigitalOcean => "digitalocean",
        }
    }

    /// Dataset file name within the data directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Provider::Azure => "Azure.json",
            Provider::AzureGovernment => "AzureGovernment.json",
            Provider::AzureChina => "AzureChina.json",
            Provider::AzureGermany => "AzureGermany.json",
            Provider::Aws => "AWS.json",
            Provider::Google => "GoogleCloud.json",
            Provider::Oci => "OCI.json",
            Provider::Cloudflare => "CloudFlare.json",
            Provider::Akamai => "Akamai.json",
            Provider::DigitalOcean => "DigitalOcean.json",
        }
    }
}

impl FromStr for Provider {
    type Err = Error;

    /// Case-insensitive match on the provider name; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_lowercase();
        Provider::ALL
            .into_iter()
            .find(|provider| provider.name() == name)
            .ok_or_else(|| Error::UnknownProvider(s.to_string()))
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Provider {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
