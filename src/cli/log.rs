use cloudiplookup::{Client, Error, SearchResult};
use log::{info, warn};
use std::collections::BTreeSet;

/*-------------------------------------------------------------------------------------------------
  Logging Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Loaded Datasets
--------------------------------------------------------------------------------------*/

pub fn datasets(client: &Client) {
    let Some(loaded_at) = client.loaded_at() else {
        info!("Reading datasets from {:?} on every lookup", client.data_dir());
        return;
    };

    let record_counts = client.record_counts();
    for (provider, count) in &record_counts {
        info!("{provider}: {count} subnets");
    }
    info!(
        "Loaded {} subnets from {} of {} cloud provider datasets at {}",
        record_counts.values().sum::<usize>(),
        record_counts.len(),
        client.providers().len(),
        loaded_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
}

/*--------------------------------------------------------------------------------------
  Lookup Results
--------------------------------------------------------------------------------------*/

pub fn lookup_results(inputs: &[String], results: &[SearchResult], failures: &[(String, Error)]) {
    info!("Looked up {} input(s) in the cloud provider datasets", inputs.len());

    if !results.is_empty() {
        let addresses: BTreeSet<_> = results.iter().map(|result| result.ip_address).collect();
        info!(
            "Found {} address(es) contained in {} cloud provider subnet(s)",
            addresses.len(),
            results.len()
        );
    }

    for (input, error) in failures {
        warn!("{input}: {}", error.kind());
    }
}
