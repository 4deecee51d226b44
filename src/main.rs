use clap::Parser;
use cloudiplookup::{filter_by_prefix, Client, ProviderSubnetRecord, SearchResult};
use log::error;
use std::process::ExitCode;

mod cli;

use cli::OutputFormat;

/*-------------------------------------------------------------------------------------------------
  Main CLI Function
-------------------------------------------------------------------------------------------------*/

fn main() -> ExitCode {
    let args = cli::Args::parse();

    // Initialize logging
    if let Err(error) = stderrlog::new()
        .module(module_path!())
        .verbosity(args.verbose.log_level_filter())
        .init()
    {
        eprintln!("Unable to initialize logging: {error}");
    }

    let client = cli::build_client(&args);

    let outcome = if args.providers {
        cli::output::providers(client.providers());
        Ok(true)
    } else if let Some(provider) = &args.provider {
        list_provider(&client, &args, provider)
    } else {
        lookup(&client, &args)
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            error!("{error}");
            ExitCode::FAILURE
        }
    }
}

/*--------------------------------------------------------------------------------------
  List a Provider's Subnets
--------------------------------------------------------------------------------------*/

fn list_provider(client: &Client, args: &cli::Args, provider: &str) -> cli::Result<bool> {
    let dataset = client.list_provider(provider)?;
    let records: Vec<&ProviderSubnetRecord> = match &args.prefix {
        Some(prefix) => filter_by_prefix(&dataset, prefix),
        None => dataset.iter().collect(),
    };

    match args.output {
        OutputFormat::Table => cli::output::records_table(&records),
        OutputFormat::Json => cli::output::records_json(&records)?,
        OutputFormat::Cidr => {
            cli::output::subnets_in_cidr_format(records.iter().map(|record| &record.subnet))
        }
        OutputFormat::Netmask => {
            cli::output::subnets_in_netmask_format(records.iter().map(|record| &record.subnet))
        }
    }

    if let Some(csv_file) = &args.csv_file {
        cli::csv::save_records(&records, csv_file)?;
    }

    Ok(true)
}

/*--------------------------------------------------------------------------------------
  Look Up Addresses and Hostnames
--------------------------------------------------------------------------------------*/

fn lookup(client: &Client, args: &cli::Args) -> cli::Result<bool> {
    cli::log::datasets(client);

    let (results, failures) = cli::lookup_inputs(client, &args.inputs);
    cli::log::lookup_results(&args.inputs, &results, &failures);

    output_results(&results, args.output)?;

    if let Some(csv_file) = &args.csv_file {
        cli::csv::save_results(&results, csv_file)?;
    }

    Ok(failures.is_empty())
}

fn output_results(results: &[SearchResult], format: OutputFormat) -> cli::Result<()> {
    match format {
        OutputFormat::Table => {
            if !results.is_empty() {
                cli::output::results_table(results)
            }
        }
        OutputFormat::Json => cli::output::results_json(results)?,
        OutputFormat::Cidr => {
            cli::output::subnets_in_cidr_format(results.iter().map(|result| &result.subnet))
        }
        OutputFormat::Netmask => {
            cli::output::subnets_in_netmask_format(results.iter().map(|result| &result.subnet))
        }
    }
    Ok(())
}
