use crate::cli;
use cloudiplookup::{Client, ClientBuilder, Error, ReservedPolicy, SearchResult};
use log::error;

/*-------------------------------------------------------------------------------------------------
  Core functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Build the client from CLI arguments
--------------------------------------------------------------------------------------*/

pub fn build_client(args: &cli::Args) -> Client {
    let mut builder = ClientBuilder::new();

    if let Some(data_dir) = &args.data_dir {
        builder.data_dir(data_dir);
    }
    if args.skip_reserved {
        builder.reserved_policy(ReservedPolicy::Skip);
    }
    if args.no_prefilter {
        builder.prefilter(false);
    }
    // Listing reads a single dataset
    if args.provider.is_some() {
        builder.cache(false);
    }

    builder.build()
}

/*--------------------------------------------------------------------------------------
  Look up every input
--------------------------------------------------------------------------------------*/

/// Look up each input in order. Returns the concatenated results and the failed inputs.
pub fn lookup_inputs(client: &Client, inputs: &[String]) -> (Vec<SearchResult>, Vec<(String, Error)>) {
    let mut results = Vec::new();
    let mut failures = Vec::new();

    for input in inputs {
        match client.lookup(input) {
            Ok(found) => results.extend(found),
            Err(error) => {
                error!("{input}: {error}");
                failures.push((input.clone(), error));
            }
        }
    }

    (results, failures)
}
