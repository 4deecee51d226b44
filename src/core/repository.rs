use crate::core::errors::{Error, Result};
use crate::core::json;
use crate::core::provider::Provider;
use crate::core::subnet_record::ProviderSubnetRecord;
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/*-------------------------------------------------------------------------------------------------
  Provider Repository
-------------------------------------------------------------------------------------------------*/

/// Read-only source of provider subnet datasets.
pub trait ProviderRepository: Send + Sync {
    /// Providers this repository serves, in search order.
    fn providers(&self) -> &[Provider];

    /// Load the subnet records for `provider`, in dataset order.
    fn load(&self, provider: Provider) -> Result<Arc<[ProviderSubnetRecord]>>;

    /// Load the subnet records for a provider given by name. Names outside the configured
    /// provider set fail with [Error::UnknownProvider]; read and parse failures with
    /// [Error::DatasetUnavailable].
    fn load_by_name(&self, name: &str) -> Result<Arc<[ProviderSubnetRecord]>> {
        let provider: Provider = name.parse()?;
        if !self.providers().contains(&provider) {
            return Err(Error::UnknownProvider(name.to_string()));
        }
        self.load(provider)
    }
}

/// Records whose CIDR text starts with `prefix` (for example `"20."`). Matching uses the
/// canonical rendering of each block, so a dataset entry written as `020.1.0.0/16` matches
/// `"20."`, not `"020."`.
pub fn filter_by_prefix<'r>(
    records: &'r [ProviderSubnetRecord],
    prefix: &str,
) -> Vec<&'r ProviderSubnetRecord> {
    records
        .iter()
        .filter(|record| record.subnet.to_string().starts_with(prefix))
        .collect()
}

/*-------------------------------------------------------------------------------------------------
  File Repository
-------------------------------------------------------------------------------------------------*/

/// Reads provider datasets from JSON files in a data directory on every call.
#[derive(Clone, Debug)]
pub struct FileRepository {
    data_dir: PathBuf,
    providers: Vec<Provider>,
}

impl FileRepository {
    /// Repository over every known provider.
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self::with_providers(data_dir, Provider::ALL)
    }

    /// Repository over an explicit provider set. Duplicates are dropped, keeping the first
    /// occurrence.
    pub fn with_providers<P, I>(data_dir: P, providers: I) -> Self
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = Provider>,
    {
        let mut unique: Vec<Provider> = Vec::new();
        for provider in providers {
            if !unique.contains(&provider) {
                unique.push(provider);
            }
        }

        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            providers: unique,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn dataset_path(&self, provider: Provider) -> PathBuf {
        self.data_dir.join(provider.file_name())
    }
}

impl ProviderRepository for FileRepository {
    fn providers(&self) -> &[Provider] {
        &self.providers
    }

    fn load(&self, provider: Provider) -> Result<Arc<[ProviderSubnetRecord]>> {
        if !self.providers.contains(&provider) {
            return Err(Error::UnknownProvider(provider.to_string()));
        }
        read_dataset(provider, &self.dataset_path(provider)).map(Arc::from)
    }
}

/// Read and parse one dataset file. IPv6 subnets mixed into a feed are skipped; any other
/// subnet that is not a valid IPv4 CIDR block makes the whole dataset unavailable.
fn read_dataset(provider: Provider, path: &Path) -> Result<Vec<ProviderSubnetRecord>> {
    let unavailable = |reason: String| {
        let error = Error::dataset_unavailable(provider, format!("{path:?}: {reason}"));
        warn!("{error}");
        error
    };

    let text = fs::read_to_string(path).map_err(|error| unavailable(error.to_string()))?;
    let subnets = json::parse(&text).map_err(|error| unavailable(error.to_string()))?;

    let mut records = Vec::with_capacity(subnets.len());
    let mut skipped = 0usize;
    for subnet in subnets {
        if subnet.subnet.contains(':') {
            skipped += 1;
            continue;
        }
        let cidr = subnet.subnet.clone();
        let record = ProviderSubnetRecord::try_from(subnet)
            .map_err(|_| unavailable(format!("invalid IPv4 CIDR subnet {cidr:?}")))?;
        records.push(record);
    }

    if skipped > 0 {
        warn!("Skipped {skipped} IPv6 {provider} subnets in: {path:?}");
    }
    info!("Read {} {provider} subnets from: {:?}", records.len(), path);

    Ok(records)
}

/*-------------------------------------------------------------------------------------------------
  Cached Repository
-------------------------------------------------------------------------------------------------*/

/// An immutable, fully loaded set of provider datasets.
#[derive(Debug)]
pub struct Snapshot {
    loaded_at: DateTime<Utc>,
    datasets: BTreeMap<Provider, Result<Arc<[ProviderSubnetRecord]>>>,
}

impl Snapshot {
    fn load<R: ProviderRepository>(source: &R) -> Self {
        let datasets = source
            .providers()
            .iter()
            .map(|&provider| (provider, source.load(provider)))
            .collect();

        Self {
            loaded_at: Utc::now(),
            datasets,
        }
    }

    /// UTC time the snapshot was loaded.
    pub fn loaded_at(&self) -> &DateTime<Utc> {
        &self.loaded_at
    }

    /// Number of records per provider; providers whose dataset failed to load are omitted.
    pub fn record_counts(&self) -> BTreeMap<Provider, usize> {
        self.datasets
            .iter()
            .filter_map(|(provider, dataset)| {
                dataset.as_ref().ok().map(|records| (*provider, records.len()))
            })
            .collect()
    }
}

/// Loads every dataset from a source repository once and serves them from memory.
///
/// [CachedRepository::reload] builds a complete new [Snapshot] before swapping it in, so readers
/// always see either the old or the new set of datasets, never a mix.
#[derive(Debug)]
pub struct CachedRepository<R> {
    source: R,
    snapshot: RwLock<Arc<Snapshot>>,
}

impl<R: ProviderRepository> CachedRepository<R> {
    pub fn new(source: R) -> Self {
        let snapshot = Snapshot::load(&source);
        info!(
            "Loaded {} provider datasets at {}",
            snapshot.record_counts().len(),
            snapshot.loaded_at()
        );

        Self {
            source,
            snapshot: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        let guard = self.snapshot.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Re-read every dataset from the source and swap in the new snapshot.
    pub fn reload(&self) -> Arc<Snapshot> {
        let snapshot = Arc::new(Snapshot::load(&self.source));
        info!("Reloaded provider datasets at {}", snapshot.loaded_at());

        let mut guard = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::clone(&snapshot);
        snapshot
    }
}

impl<R: ProviderRepository> ProviderRepository for CachedRepository<R> {
    fn providers(&self) -> &[Provider] {
        self.source.providers()
    }

    fn load(&self, provider: Provider) -> Result<Arc<[ProviderSubnetRecord]>> {
        self.snapshot()
            .datasets
            .get(&provider)
            .cloned()
            .unwrap_or_else(|| Err(Error::UnknownProvider(provider.to_string())))
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
