use crate::cli::Result;
use cloudiplookup::ipnetwork::Ipv4Network;
use cloudiplookup::{CidrBlock, Provider, ProviderSubnetRecord, SearchResult};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{NOTHING, UTF8_FULL};
use comfy_table::*;
use std::collections::BTreeSet;

/*-------------------------------------------------------------------------------------------------
  Output Functions
-------------------------------------------------------------------------------------------------*/

fn header_cell(name: &str) -> Cell {
    Cell::new(name)
        .add_attribute(Attribute::Bold)
        .fg(Color::Green)
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn print_summary(rows: &[(usize, &str)]) {
    let mut summary_table = Table::new();
    summary_table
        .load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic);

    for (count, label) in rows {
        summary_table.add_row(vec![Cell::new(count), Cell::new(label)]);
    }

    let summary_numbers_column = summary_table
        .column_mut(0)
        .expect("The first column exists");
    summary_numbers_column.set_cell_alignment(CellAlignment::Right);

    println!("{summary_table}");
}

/*--------------------------------------------------------------------------------------
  Search Results Table
--------------------------------------------------------------------------------------*/

pub fn results_table(results: &[SearchResult]) {
    let mut table = new_table();

    table.set_header(vec![
        header_cell("IP Address"),
        header_cell("Cloud Provider"),
        header_cell("Subnet"),
        header_cell("Region"),
        header_cell("Service"),
        header_cell("Subnet Size"),
    ]);

    for result in results {
        table.add_row(vec![
            Cell::new(result.ip_address).add_attribute(Attribute::Bold),
            Cell::new(result.provider),
            Cell::new(&result.subnet),
            Cell::new(&result.region),
            Cell::new(&result.service),
            Cell::new(&result.subnet_size),
        ]);
    }

    // Right-align the address and subnet columns
    for index in [0, 2] {
        let column = table.column_mut(index).expect("The column exists");
        column.set_cell_alignment(CellAlignment::Right);
    }

    println!("{table}");

    let addresses: BTreeSet<_> = results.iter().map(|result| result.ip_address).collect();
    let providers: BTreeSet<_> = results.iter().map(|result| result.provider).collect();
    print_summary(&[
        (results.len(), "Matching Subnets"),
        (addresses.len(), "IP Addresses"),
        (providers.len(), "Cloud Providers"),
    ]);
}

/*--------------------------------------------------------------------------------------
  Provider Subnets Table
--------------------------------------------------------------------------------------*/

pub fn records_table(records: &[&ProviderSubnetRecord]) {
    let mut table = new_table();

    table.set_header(vec![
        header_cell("Subnet"),
        header_cell("Region"),
        header_cell("Service"),
        header_cell("Subnet Size"),
    ]);

    for record in records {
        table.add_row(vec![
            Cell::new(record.subnet).add_attribute(Attribute::Bold),
            Cell::new(&record.region),
            Cell::new(&record.service),
            Cell::new(&record.subnet_size),
        ]);
    }

    let column = table.column_mut(0).expect("The first column exists");
    column.set_cell_alignment(CellAlignment::Right);

    println!("{table}");

    let regions: BTreeSet<&str> = records.iter().map(|record| record.region.as_str()).collect();
    print_summary(&[(records.len(), "Subnets"), (regions.len(), "Regions")]);
}

/*--------------------------------------------------------------------------------------
  JSON
--------------------------------------------------------------------------------------*/

pub fn results_json(results: &[SearchResult]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(results)?);
    Ok(())
}

pub fn records_json(records: &[&ProviderSubnetRecord]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(records)?);
    Ok(())
}

/*--------------------------------------------------------------------------------------
  Subnets In CIDR Format
--------------------------------------------------------------------------------------*/

pub fn subnets_in_cidr_format<'s, I: IntoIterator<Item = &'s CidrBlock>>(subnets: I) {
    for subnet in unique(subnets) {
        println!("{subnet}");
    }
}

/*--------------------------------------------------------------------------------------
  Subnets In Netmask Format
--------------------------------------------------------------------------------------*/

pub fn subnets_in_netmask_format<'s, I: IntoIterator<Item = &'s CidrBlock>>(subnets: I) {
    for subnet in unique(subnets) {
        let network = Ipv4Network::from(subnet);
        println!("{} {}", network.network(), network.mask());
    }
}

/// Subnets in first-seen order without repeats.
fn unique<'s, I: IntoIterator<Item = &'s CidrBlock>>(subnets: I) -> Vec<CidrBlock> {
    let mut seen = BTreeSet::new();
    subnets
        .into_iter()
        .filter(|subnet| seen.insert(**subnet))
        .copied()
        .collect()
}

/*--------------------------------------------------------------------------------------
  Providers
--------------------------------------------------------------------------------------*/

pub fn providers(providers: &[Provider]) {
    for provider in providers {
        println!("{provider}");
    }
}
