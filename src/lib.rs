//! Find the public cloud provider, region, and service that own an IPv4 address or hostname.
//!
//! Provider IP range datasets (Azure, AWS, Google Cloud, OCI, Cloudflare, Akamai, DigitalOcean,
//! and the sovereign Azure clouds) are read from JSON files in a data directory. A lookup resolves
//! hostnames to their A records, rejects private and reserved addresses, and returns every
//! published subnet that contains each address.
//!
//! ```no_run
//! let client = cloudiplookup::ClientBuilder::new()
//!     .data_dir("./cloudproviders")
//!     .build();
//!
//! match client.lookup("www.example.com") {
//!     Ok(results) => {
//!         for result in results {
//!             println!("{} {} {} {}", result.ip_address, result.provider, result.subnet, result.region);
//!         }
//!     }
//!     Err(error) => eprintln!("{error} ({})", error.kind()),
//! }
//! ```

/*-------------------------------------------------------------------------------------------------
  Modules
-------------------------------------------------------------------------------------------------*/

mod core;

/*-------------------------------------------------------------------------------------------------
  Library Interface
-------------------------------------------------------------------------------------------------*/

pub use crate::core::address::Ipv4Address;
pub use crate::core::cidr::CidrBlock;
pub use crate::core::client::{lookup, Client, ClientBuilder};
pub use crate::core::errors::{Error, OutcomeKind, Result};
pub use crate::core::lookup::{Input, Lookup, ReservedPolicy};
pub use crate::core::provider::Provider;
pub use crate::core::repository::{
    filter_by_prefix, CachedRepository, FileRepository, ProviderRepository, Snapshot,
};
pub use crate::core::reserved::{is_reserved, reserved_range, RESERVED_RANGES};
pub use crate::core::resolver::{validate_hostname, DnsResolver, SystemResolver};
pub use crate::core::search::Searcher;
pub use crate::core::search_results::SearchResult;
pub use crate::core::subnet_record::ProviderSubnetRecord;

/*-------------------------------------------------------------------------------------------------
  Re-exports
-------------------------------------------------------------------------------------------------*/

pub use ipnetwork;
