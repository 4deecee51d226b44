use crate::core::address::Ipv4Address;
use crate::core::repository::ProviderRepository;
use crate::core::search_results::SearchResult;
use crate::core::subnet_record::ProviderSubnetRecord;
use log::{debug, trace, warn};
use std::sync::Arc;

/*-------------------------------------------------------------------------------------------------
  Searcher
-------------------------------------------------------------------------------------------------*/

/// Searches every provider dataset in a repository for the subnets containing an address.
#[derive(Debug)]
pub struct Searcher<R> {
    repository: Arc<R>,
    prefilter: bool,
}

impl<R> Clone for Searcher<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            prefilter: self.prefilter,
        }
    }
}

impl<R: ProviderRepository> Searcher<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            prefilter: false,
        }
    }

    /// Narrow each dataset to candidate records by first octet before testing containment.
    /// Blocks shorter than `/8` are always kept as candidates, so the result set is the same
    /// with or without the prefilter.
    pub fn prefilter(mut self, prefilter: bool) -> Self {
        self.prefilter = prefilter;
        self
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Every subnet containing `address`, in provider order and then dataset order. Overlapping
    /// ranges all produce a result. A provider whose dataset cannot be loaded contributes no
    /// results.
    pub fn search_all_providers(&self, address: Ipv4Address) -> Vec<SearchResult> {
        let mut results = Vec::new();

        for &provider in self.repository.providers() {
            let records = match self.repository.load(provider) {
                Ok(records) => records,
                Err(error) => {
                    warn!("Skipping {provider}: {error}");
                    continue;
                }
            };

            let before = results.len();
            results.extend(
                self.candidates(&records, address)
                    .filter(|record| record.subnet.contains(address))
                    .inspect(|record| trace!("{address} is in {provider} {}", record.subnet))
                    .map(|record| SearchResult::new(address, provider, record)),
            );
            debug!(
                "{address}: {} match(es) in {} {provider} subnets",
                results.len() - before,
                records.len()
            );
        }

        results
    }

    fn candidates<'r>(
        &self,
        records: &'r [ProviderSubnetRecord],
        address: Ipv4Address,
    ) -> impl Iterator<Item = &'r ProviderSubnetRecord> {
        let prefilter = self.prefilter;
        let [first_octet, ..] = address.octets();

        records.iter().filter(move |record| {
            !prefilter
                || record.subnet.prefix_len() < 8
                || record.subnet.network().octets()[0] == first_octet
        })
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::provider::Provider;
    use crate::core::repository::tests::MemoryRepository;
    use crate::core::subnet_record::tests::{test_azure_record, test_record};
    use test_log::test;

    fn address(text: &str) -> Ipv4Address {
        text.parse().unwrap()
    }

    fn test_repository() -> Arc<MemoryRepository> {
        Arc::new(MemoryRepository::new([
            (
                Provider::Azure,
                Some(vec![
                    test_record("4.150.0.0/18", "", "AzureCloud"),
                    test_azure_record(),
                    test_record("20.60.0.0/24", "eastus", "AzureStorage"),
                ]),
            ),
            (Provider::Aws, None),
            (
                Provider::Cloudflare,
                Some(vec![
                    test_record("16.0.0.0/4", "", "Anycast"),
                    test_record("20.60.0.0/22", "global", "CDN"),
                ]),
            ),
        ]))
    }

    #[test]
    fn test_search_single_match() {
        let repository = Arc::new(MemoryRepository::new([(
            Provider::Azure,
            Some(vec![test_azure_record()]),
        )]));
        let searcher = Searcher::new(repository);

        let results = searcher.search_all_providers(address("20.60.0.5"));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].ip_address, address("20.60.0.5"));
        assert_eq!(results[0].provider, Provider::Azure);
        assert_eq!(results[0].subnet.to_string(), "20.60.0.0/16");
        assert_eq!(results[0].region, "eastus");
        assert_eq!(results[0].service, "AzureCloud");
        assert_eq!(results[0].subnet_size, "65536");
    }

    #[test]
    fn test_search_returns_every_overlapping_match_in_order() {
        let searcher = Searcher::new(test_repository());

        let results = searcher.search_all_providers(address("20.60.0.5"));
        let subnets: Vec<(Provider, String)> = results
            .iter()
            .map(|result| (result.provider, result.subnet.to_string()))
            .collect();

        assert_eq!(
            subnets,
            [
                (Provider::Azure, "20.60.0.0/16".to_string()),
                (Provider::Azure, "20.60.0.0/24".to_string()),
                (Provider::Cloudflare, "16.0.0.0/4".to_string()),
                (Provider::Cloudflare, "20.60.0.0/22".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_skips_unavailable_provider() {
        let searcher = Searcher::new(test_repository());
        let results = searcher.search_all_providers(address("4.150.1.1"));

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].provider, Provider::Azure);
    }

    #[test]
    fn test_search_no_match() {
        let searcher = Searcher::new(test_repository());
        assert!(searcher.search_all_providers(address("1.1.1.1")).is_empty());
    }

    #[test]
    fn test_prefilter_does_not_change_results() {
        let plain = Searcher::new(test_repository());
        let filtered = plain.clone().prefilter(true);

        for text in ["20.60.0.5", "20.60.3.1", "4.150.1.1", "17.0.0.1", "1.1.1.1", "200.60.0.5"] {
            assert_eq!(
                plain.search_all_providers(address(text)),
                filtered.search_all_providers(address(text)),
                "{text}"
            );
        }
    }

    #[test]
    fn test_search_is_repeatable() {
        let searcher = Searcher::new(test_repository()).prefilter(true);
        let first = searcher.search_all_providers(address("20.60.0.5"));
        for _ in 0..5 {
            assert_eq!(searcher.search_all_providers(address("20.60.0.5")), first);
        }
    }
}
