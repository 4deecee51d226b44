use crate::core::address::Ipv4Address;
use crate::core::errors::{Error, Result};
use hickory_resolver::config::{LookupIpStrategy, ResolverConfig, ResolverOpts};
use hickory_resolver::Resolver;
use log::{debug, info, warn};
use std::fmt;
use std::net::IpAddr;
use std::sync::{Arc, OnceLock};

/*-------------------------------------------------------------------------------------------------
  DNS Resolver
-------------------------------------------------------------------------------------------------*/

/// Resolves a hostname to its IPv4 (A record) addresses.
pub trait DnsResolver: Send + Sync {
    /// Addresses in the order the resolver returned them. An empty answer is reported as
    /// [Error::DnsFailure], never as an empty list.
    fn resolve4(&self, hostname: &str) -> Result<Vec<Ipv4Address>>;
}

impl<T: DnsResolver + ?Sized> DnsResolver for Arc<T> {
    fn resolve4(&self, hostname: &str) -> Result<Vec<Ipv4Address>> {
        (**self).resolve4(hostname)
    }
}

/*--------------------------------------------------------------------------------------
  System Resolver
--------------------------------------------------------------------------------------*/

/// [DnsResolver] using the system resolver configuration (`/etc/resolv.conf` or the platform
/// equivalent), falling back to the hickory default name servers when it cannot be read.
///
/// The underlying hickory resolver (with its runtime and answer cache) is built on first use and
/// shared by every clone. [DnsResolver::resolve4] blocks the calling thread and must not be called
/// from inside an async runtime; async callers should wrap it in `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct SystemResolver {
    config: ResolverConfig,
    options: ResolverOpts,
    resolver: Arc<OnceLock<std::result::Result<Resolver, String>>>,
}

impl Default for SystemResolver {
    fn default() -> Self {
        let (config, options) = hickory_resolver::system_conf::read_system_conf()
            .inspect_err(|error| {
                warn!("Unable to read system DNS configuration, using defaults: {error}")
            })
            .unwrap_or_default();

        Self::with_config(config, options)
    }
}

impl fmt::Debug for SystemResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemResolver")
            .field("config", &self.config)
            .field("options", &self.options)
            .field("initialized", &self.resolver.get().is_some())
            .finish()
    }
}

impl SystemResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ResolverConfig, mut options: ResolverOpts) -> Self {
        options.ip_strategy = LookupIpStrategy::Ipv4Only;
        Self {
            config,
            options,
            resolver: Arc::new(OnceLock::new()),
        }
    }

    /// The shared hickory resolver, built on the first call.
    fn resolver(&self) -> std::result::Result<&Resolver, &str> {
        self.resolver
            .get_or_init(|| {
                debug!("Building DNS resolver");
                Resolver::new(self.config.clone(), self.options.clone())
                    .map_err(|error| error.to_string())
            })
            .as_ref()
            .map_err(String::as_str)
    }
}

impl DnsResolver for SystemResolver {
    fn resolve4(&self, hostname: &str) -> Result<Vec<Ipv4Address>> {
        let dns_failure = |reason: String| Error::DnsFailure {
            hostname: hostname.to_string(),
            reason,
        };

        info!("Resolving {hostname}");
        let resolver = self.resolver().map_err(|error| dns_failure(error.to_string()))?;
        let lookup = resolver
            .lookup_ip(hostname)
            .map_err(|error| dns_failure(error.to_string()))?;

        let addresses: Vec<Ipv4Address> = lookup
            .iter()
            .filter_map(|address| match address {
                IpAddr::V4(address) => Some(Ipv4Address::from(address)),
                IpAddr::V6(_) => None,
            })
            .collect();
        debug!("{hostname} resolved to {addresses:?}");

        if addresses.is_empty() {
            Err(dns_failure("no A records".to_string()))
        } else {
            Ok(addresses)
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Hostname Validation
-------------------------------------------------------------------------------------------------*/

/// Check `hostname` is a syntactically valid DNS name: dot-separated labels of ASCII letters,
/// digits, and hyphens, 1-63 characters each, no label starting or ending with a hyphen, at most
/// 253 characters overall, and a final label that is not purely numeric. A single trailing dot
/// (fully qualified form) is allowed.
pub fn validate_hostname(hostname: &str) -> Result<()> {
    let invalid = || Error::InvalidFormat(hostname.to_string());

    let name = hostname.strip_suffix('.').unwrap_or(hostname);
    if name.is_empty() || name.len() > 253 {
        return Err(invalid());
    }

    let labels: Vec<&str> = name.split('.').collect();
    let valid_label = |label: &&str| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
    };
    if !labels.iter().all(valid_label) {
        return Err(invalid());
    }

    // `1.2.3.999` and friends are malformed addresses, not names
    match labels.last() {
        Some(last) if last.bytes().all(|b| b.is_ascii_digit()) => Err(invalid()),
        _ => Ok(()),
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_hostnames() {
        for hostname in [
            "localhost",
            "www.example.com",
            "www.example.com.",
            "xn--bcher-kva.example",
            "a-b.c-d.example",
            "1e100.net",
            "123.example.com",
        ] {
            assert_eq!(validate_hostname(hostname), Ok(()), "{hostname}");
        }
    }

    #[test]
    fn test_invalid_hostnames() {
        let long_label = "a".repeat(64);
        let long_name = ["abcdefghij"; 26].join(".");

        for hostname in [
            "",
            ".",
            "www..example.com",
            ".example.com",
            "-example.com",
            "example-.com",
            "exa mple.com",
            "example.com/path",
            "20.0.0.0/24",
            "user@example.com",
            "1.2.3.999",
            "1.2.3",
            "2001:db8::1",
            "bücher.example",
            long_label.as_str(),
            long_name.as_str(),
        ] {
            assert_eq!(
                validate_hostname(hostname),
                Err(Error::InvalidFormat(hostname.to_string())),
                "{hostname:?}"
            );
        }
    }

    #[test]
    fn test_system_resolver_is_ipv4_only() {
        let resolver = SystemResolver::with_config(ResolverConfig::default(), ResolverOpts::default());
        assert_eq!(resolver.options.ip_strategy, LookupIpStrategy::Ipv4Only);
    }

    #[test]
    fn test_system_resolver_is_built_once_and_shared() {
        let resolver = SystemResolver::with_config(ResolverConfig::default(), ResolverOpts::default());
        assert!(resolver.resolver.get().is_none());

        let first: *const Resolver = resolver.resolver().unwrap();
        let second: *const Resolver = resolver.resolver().unwrap();
        assert!(std::ptr::eq(first, second));

        let clone = resolver.clone();
        assert!(std::ptr::eq(first, clone.resolver().unwrap()));
    }
}
