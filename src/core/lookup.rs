use crate::core::address::Ipv4Address;
use crate::core::errors::{Error, Result};
use crate::core::repository::ProviderRepository;
use crate::core::reserved;
use crate::core::resolver::{validate_hostname, DnsResolver};
use crate::core::search::Searcher;
use crate::core::search_results::SearchResult;
use log::{info, warn};
use std::str::FromStr;
use std::sync::Arc;

/*-------------------------------------------------------------------------------------------------
  Reserved Address Policy
-------------------------------------------------------------------------------------------------*/

/// What to do when an input resolves to an address in a reserved range.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ReservedPolicy {
    /// Reject the whole lookup at the first reserved address, even when a hostname also resolves
    /// to public addresses. Names that point at a single private endpoint are the expected case.
    #[default]
    Reject,

    /// Drop reserved addresses and search the rest. The lookup is rejected only when every
    /// address is reserved.
    Skip,
}

impl FromStr for ReservedPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(ReservedPolicy::Reject),
            "skip" => Ok(ReservedPolicy::Skip),
            other => Err(format!("unknown reserved address policy: {other:?}")),
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Input Classification
-------------------------------------------------------------------------------------------------*/

/// A lookup input: an IPv4 literal or a hostname to resolve.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Input {
    Address(Ipv4Address),
    Hostname(String),
}

impl Input {
    /// Classify `input`. Anything that is not a strict IPv4 literal must be a valid hostname;
    /// everything else is [Error::InvalidFormat].
    pub fn classify(input: &str) -> Result<Self> {
        if let Ok(address) = Ipv4Address::parse(input) {
            return Ok(Input::Address(address));
        }
        validate_hostname(input)?;
        Ok(Input::Hostname(input.to_string()))
    }
}

/*-------------------------------------------------------------------------------------------------
  Lookup
-------------------------------------------------------------------------------------------------*/

/// Resolves an IPv4 address or hostname and searches the provider datasets for it.
///
/// The pipeline for each input is:
/// 1. classify the input as an address or a hostname ([Input::classify]);
/// 2. resolve hostnames to their A records ([Error::DnsFailure] on error or an empty answer);
/// 3. apply the [ReservedPolicy] to the resolved addresses ([Error::ReservedAddressRejected]);
/// 4. search every provider for each remaining address, concatenating results in address order;
/// 5. fail with [Error::NoMatchFound] when nothing matched.
pub struct Lookup<R, D> {
    searcher: Searcher<R>,
    resolver: D,
    reserved_policy: ReservedPolicy,
}

impl<R: ProviderRepository, D: DnsResolver> Lookup<R, D> {
    pub fn new(searcher: Searcher<R>, resolver: D) -> Self {
        Self {
            searcher,
            resolver,
            reserved_policy: ReservedPolicy::default(),
        }
    }

    pub fn reserved_policy(mut self, reserved_policy: ReservedPolicy) -> Self {
        self.reserved_policy = reserved_policy;
        self
    }

    pub fn repository(&self) -> &Arc<R> {
        self.searcher.repository()
    }

    pub fn lookup(&self, input: &str) -> Result<Vec<SearchResult>> {
        let addresses = match Input::classify(input)? {
            Input::Address(address) => vec![address],
            Input::Hostname(hostname) => {
                let addresses = self.resolver.resolve4(&hostname)?;
                if addresses.is_empty() {
                    return Err(Error::DnsFailure {
                        hostname,
                        reason: "no A records".to_string(),
                    });
                }
                info!("{hostname} resolved to {} address(es)", addresses.len());
                addresses
            }
        };

        let addresses = self.apply_reserved_policy(addresses)?;

        let results: Vec<SearchResult> = addresses
            .iter()
            .flat_map(|&address| self.searcher.search_all_providers(address))
            .collect();

        if results.is_empty() {
            info!("No cloud provider subnet contains {input}");
            Err(Error::NoMatchFound(input.to_string()))
        } else {
            info!("Found {} subnet(s) containing {input}", results.len());
            Ok(results)
        }
    }

    fn apply_reserved_policy(&self, addresses: Vec<Ipv4Address>) -> Result<Vec<Ipv4Address>> {
        match self.reserved_policy {
            ReservedPolicy::Reject => {
                match addresses.iter().find(|&&address| reserved::is_reserved(address)) {
                    Some(&address) => {
                        warn!("Rejecting reserved address {address}");
                        Err(Error::ReservedAddressRejected(address))
                    }
                    None => Ok(addresses),
                }
            }
            ReservedPolicy::Skip => {
                let Some(&first) = addresses.first() else {
                    return Ok(addresses);
                };
                let public: Vec<Ipv4Address> = addresses
                    .into_iter()
                    .filter(|&address| {
                        let reserved = reserved::is_reserved(address);
                        if reserved {
                            warn!("Skipping reserved address {address}");
                        }
                        !reserved
                    })
                    .collect();

                if public.is_empty() {
                    Err(Error::ReservedAddressRejected(first))
                } else {
                    Ok(public)
                }
            }
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
