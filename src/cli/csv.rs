use crate::cli::Result;
use cloudiplookup::{ProviderSubnetRecord, SearchResult};
use std::path::Path;

/*-------------------------------------------------------------------------------------------------
  Save Search Results to CSV File
-------------------------------------------------------------------------------------------------*/

pub fn save_results(results: &[SearchResult], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    // Write header
    writer.serialize([
        "IP Address",
        "Cloud Provider",
        "Subnet",
        "Region",
        "Service",
        "Subnet Size",
    ])?;

    // Write result records
    for result in results {
        let record = (
            result.ip_address.to_string(),
            result.provider.name(),
            &result.subnet,
            &result.region,
            &result.service,
            &result.subnet_size,
        );
        writer.serialize(record)?;
    }

    writer.flush()?;

    Ok(())
}

/*-------------------------------------------------------------------------------------------------
  Save Provider Subnets to CSV File
-------------------------------------------------------------------------------------------------*/

pub fn save_records(records: &[&ProviderSubnetRecord], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.serialize(["Subnet", "Region", "Service", "Subnet Size"])?;

    for record in records {
        writer.serialize((
            record.subnet.to_string(),
            &record.region,
            &record.service,
            &record.subnet_size,
        ))?;
    }

    writer.flush()?;

    Ok(())
}
