use crate::core::errors::Result;
use crate::core::lookup::{Lookup, ReservedPolicy};
use crate::core::provider::Provider;
use crate::core::repository::{CachedRepository, FileRepository, ProviderRepository};
use crate::core::resolver::{DnsResolver, SystemResolver};
use crate::core::search::Searcher;
use crate::core::search_results::SearchResult;
use crate::core::subnet_record::ProviderSubnetRecord;
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/*-------------------------------------------------------------------------------------------------
  Simple Interface
-------------------------------------------------------------------------------------------------*/

/// _**Simple library interface**_ looks up an IPv4 address or hostname in every provider dataset
/// using the default client configuration.
///
/// ```no_run
/// let results = cloudiplookup::lookup("20.60.0.5").unwrap();
/// for result in results {
///     println!("{} {} {} {}", result.provider, result.subnet, result.region, result.service);
/// }
/// ```
pub fn lookup(input: &str) -> Result<Vec<SearchResult>> {
    Client::new().lookup(input)
}

/*-------------------------------------------------------------------------------------------------
  Client Builder
-------------------------------------------------------------------------------------------------*/

/// A builder for the [Client] struct that allows you to customize the client configuration.
///
/// ```no_run
/// let client = cloudiplookup::ClientBuilder::new()
///     .data_dir("/srv/cloudproviders")
///     .cache(true)
///     .prefilter(true)
///     .reserved_policy(cloudiplookup::ReservedPolicy::Reject)
///     .build();
/// ```
///
/// The [ClientBuilder::new] method attempts to source configuration values from environment
/// variables when set and uses default values when the environment variables are not set.
///
/// If you want to use the default configuration values, ignoring any environment variables, use
/// the [ClientBuilder::default] method to create a new [ClientBuilder] instance.
#[derive(Clone)]
pub struct ClientBuilder {
    data_dir: PathBuf,
    cache: bool,
    prefilter: bool,
    reserved_policy: ReservedPolicy,
    providers: Vec<Provider>,
    resolver: Option<Arc<dyn DnsResolver>>,
}

/*--------------------------------------------------------------------------------------
  Client Builder Implementation
--------------------------------------------------------------------------------------*/

impl Default for ClientBuilder {
    /// Create a new [ClientBuilder] with default configuration values.
    ///
    /// ```
    /// let client = cloudiplookup::ClientBuilder::default().build();
    ///
    /// assert!(client.data_dir().ends_with(".cloudiplookup/cloudproviders"));
    /// assert!(client.cache());
    /// assert!(client.prefilter());
    /// assert_eq!(client.reserved_policy(), cloudiplookup::ReservedPolicy::Reject);
    /// assert_eq!(client.providers().len(), 10);
    /// ```
    fn default() -> Self {
        Self {
            data_dir: dirs::home_dir()
                .unwrap_or_default()
                .join(".cloudiplookup")
                .join("cloudproviders"), // ${HOME}/.cloudiplookup/cloudproviders
            cache: true,
            prefilter: true,
            reserved_policy: ReservedPolicy::Reject,
            providers: Provider::ALL.to_vec(),
            resolver: None,
        }
    }
}

impl ClientBuilder {
    /// Create a new [ClientBuilder] reading initial configuration values from
    /// environment variables when set and default values when the environment
    /// variables are not set.
    ///
    /// The environment variables used to set the initial configuration values
    /// are:
    /// - `CLOUDIPLOOKUP_DATA_DIR`
    /// - `CLOUDIPLOOKUP_CACHE`
    /// - `CLOUDIPLOOKUP_PREFILTER`
    /// - `CLOUDIPLOOKUP_RESERVED_POLICY`
    pub fn new() -> Self {
        let default = ClientBuilder::default();

        Self {
            data_dir: get_env_var("CLOUDIPLOOKUP_DATA_DIR", default.data_dir),
            cache: get_env_var("CLOUDIPLOOKUP_CACHE", default.cache),
            prefilter: get_env_var("CLOUDIPLOOKUP_PREFILTER", default.prefilter),
            reserved_policy: get_env_var("CLOUDIPLOOKUP_RESERVED_POLICY", default.reserved_policy),
            ..default
        }
    }

    /*-------------------------------------------------------------------------
      Setters
    -------------------------------------------------------------------------*/

    /// Set the directory holding the provider JSON datasets; defaults to
    /// `${HOME}/.cloudiplookup/cloudproviders`.
    pub fn data_dir<P: AsRef<Path>>(&mut self, data_dir: P) -> &mut Self {
        self.data_dir = data_dir.as_ref().to_path_buf();
        self
    }

    /// Load every dataset once when the client is built (`true`, the default) or re-read the
    /// dataset files on every request (`false`).
    pub fn cache(&mut self, cache: bool) -> &mut Self {
        self.cache = cache;
        self
    }

    /// Only test subnets sharing the address's first octet (plus blocks shorter than `/8`);
    /// defaults to `true`. Results are identical either way.
    pub fn prefilter(&mut self, prefilter: bool) -> &mut Self {
        self.prefilter = prefilter;
        self
    }

    /// Set the handling of reserved addresses; defaults to [ReservedPolicy::Reject].
    pub fn reserved_policy(&mut self, reserved_policy: ReservedPolicy) -> &mut Self {
        self.reserved_policy = reserved_policy;
        self
    }

    /// Restrict the providers searched and listed; defaults to every known provider.
    pub fn providers<I: IntoIterator<Item = Provider>>(&mut self, providers: I) -> &mut Self {
        self.providers = providers.into_iter().collect();
        self
    }

    /// Use a custom DNS resolver instead of the system resolver.
    pub fn resolver<D: DnsResolver + 'static>(&mut self, resolver: D) -> &mut Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    /*-------------------------------------------------------------------------
      Build Method
    -------------------------------------------------------------------------*/

    pub fn build(&self) -> Client {
        let files = FileRepository::with_providers(&self.data_dir, self.providers.iter().copied());
        let repository = if self.cache {
            Datasets::Cached(CachedRepository::new(files))
        } else {
            Datasets::Files(files)
        };

        let resolver = self
            .resolver
            .clone()
            .unwrap_or_else(|| Arc::new(SystemResolver::new()));

        let searcher = Searcher::new(Arc::new(repository)).prefilter(self.prefilter);

        Client {
            data_dir: self.data_dir.clone(),
            cache: self.cache,
            prefilter: self.prefilter,
            reserved_policy: self.reserved_policy,
            lookup: Lookup::new(searcher, resolver).reserved_policy(self.reserved_policy),
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Datasets
-------------------------------------------------------------------------------------------------*/

/// Repository backing a [Client]: the dataset files themselves or an in-memory snapshot.
enum Datasets {
    Files(FileRepository),
    Cached(CachedRepository<FileRepository>),
}

impl ProviderRepository for Datasets {
    fn providers(&self) -> &[Provider] {
        match self {
            Datasets::Files(files) => files.providers(),
            Datasets::Cached(cached) => cached.providers(),
        }
    }

    fn load(&self, provider: Provider) -> Result<Arc<[ProviderSubnetRecord]>> {
        match self {
            Datasets::Files(files) => files.load(provider),
            Datasets::Cached(cached) => cached.load(provider),
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Client
-------------------------------------------------------------------------------------------------*/

/// A client for looking up addresses and hostnames in the cloud provider datasets and for listing
/// a single provider's dataset.
///
/// The [Client::new] method attempts to source configuration values from environment variables
/// when set and uses default values when the environment variables are not set.
///
/// If you want to use the default configuration values, ignoring any environment variables, use
/// the [Client::default] method to create a new [Client] instance.
///
/// ```no_run
/// let client = cloudiplookup::Client::new();
/// let results = client.lookup("www.example.com");
/// let azure = client.list_provider("azure");
/// ```
pub struct Client {
    data_dir: PathBuf,
    cache: bool,
    prefilter: bool,
    reserved_policy: ReservedPolicy,
    lookup: Lookup<Datasets, Arc<dyn DnsResolver>>,
}

/*--------------------------------------------------------------------------------------
  Client Implementation
--------------------------------------------------------------------------------------*/

impl Default for Client {
    fn default() -> Self {
        ClientBuilder::default().build()
    }
}

impl Client {
    pub fn new() -> Self {
        ClientBuilder::new().build()
    }

    /*-------------------------------------------------------------------------
      Getters
    -------------------------------------------------------------------------*/

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn cache(&self) -> bool {
        self.cache
    }

    pub fn prefilter(&self) -> bool {
        self.prefilter
    }

    pub fn reserved_policy(&self) -> ReservedPolicy {
        self.reserved_policy
    }

    /// Providers searched by [Client::lookup], in search order.
    pub fn providers(&self) -> &[Provider] {
        self.lookup.repository().providers()
    }

    /// UTC time the cached datasets were loaded; `None` when datasets are read per request.
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        match self.lookup.repository().as_ref() {
            Datasets::Cached(cached) => Some(*cached.snapshot().loaded_at()),
            Datasets::Files(_) => None,
        }
    }

    /// Number of records per provider whose dataset is available.
    pub fn record_counts(&self) -> BTreeMap<Provider, usize> {
        match self.lookup.repository().as_ref() {
            Datasets::Cached(cached) => cached.snapshot().record_counts(),
            Datasets::Files(files) => files
                .providers()
                .iter()
                .filter_map(|&provider| {
                    files.load(provider).ok().map(|records| (provider, records.len()))
                })
                .collect(),
        }
    }

    /*-------------------------------------------------------------------------
      Operations
    -------------------------------------------------------------------------*/

    /// Find every provider subnet containing the IPv4 address, or the addresses a hostname
    /// resolves to.
    pub fn lookup(&self, input: &str) -> Result<Vec<SearchResult>> {
        info!("Lookup: {input}");
        self.lookup
            .lookup(input)
            .inspect_err(|error| warn!("Lookup {input}: {error}"))
    }

    /// The complete, unfiltered dataset of one provider.
    pub fn list_provider(&self, name: &str) -> Result<Arc<[ProviderSubnetRecord]>> {
        info!("List provider: {name}");
        self.lookup.repository().load_by_name(name)
    }

    /// Re-read the dataset files and swap in the new data. Returns the new load time, or `None`
    /// when datasets are read per request anyway.
    pub fn reload(&self) -> Option<DateTime<Utc>> {
        match self.lookup.repository().as_ref() {
            Datasets::Cached(cached) => Some(*cached.reload().loaded_at()),
            Datasets::Files(_) => None,
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Helper Functions
-------------------------------------------------------------------------------------------------*/

/// Get and parse an environment variable value or return a default value.
fn get_env_var<T: std::str::FromStr>(env_var: &str, default: T) -> T {
    env::var(env_var)
        .ok()
        .and_then(|value| {
            value
                .parse::<T>()
                .inspect(|_| info!("Using {}: {}", env_var, value))
                .inspect_err(|_| warn!("Invalid {}: {}", env_var, value))
                .ok()
        })
        .unwrap_or(default)
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
