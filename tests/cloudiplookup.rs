use assert_cmd::Command;
use predicates::prelude::*;

const DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/cloudproviders");

/// The binary pointed at the test datasets, ignoring any data directory in the environment.
fn cloudiplookup() -> Command {
    let mut command = Command::cargo_bin("cloudiplookup").unwrap();
    command
        .env_remove("CLOUDIPLOOKUP_RESERVED_POLICY")
        .arg("--data-dir")
        .arg(DATA_DIR);
    command
}

/*-------------------------------------------------------------------------------------------------
  cloudiplookup Binary Tests
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  No Arguments - Display Help
--------------------------------------------------------------------------------------*/

#[test]
fn command_no_args() {
    Command::cargo_bin("cloudiplookup")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

/*--------------------------------------------------------------------------------------
  Version
--------------------------------------------------------------------------------------*/

#[test]
fn command_version() {
    Command::cargo_bin("cloudiplookup")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

/*--------------------------------------------------------------------------------------
  Providers
--------------------------------------------------------------------------------------*/

#[test]
fn command_providers() {
    cloudiplookup()
        .arg("--providers")
        .assert()
        .success()
        .stdout(predicate::str::contains("azure\n"))
        .stdout(predicate::str::contains("azuregovernment\n"))
        .stdout(predicate::str::contains("cloudflare\n"))
        .stdout(predicate::str::contains("digitalocean\n"));
}

/*--------------------------------------------------------------------------------------
  Address Lookups
--------------------------------------------------------------------------------------*/

#[test]
fn command_lookup_address() {
    cloudiplookup()
        .arg("20.60.0.5")
        .assert()
        .success()
        .stdout(predicate::str::contains("20.60.0.0/16"))
        .stdout(predicate::str::contains("eastus"))
        .stdout(predicate::str::contains("AzureCloud"));
}

#[test]
fn command_lookup_multiple_addresses() {
    cloudiplookup()
        .arg("--output")
        .arg("cidr")
        .arg("20.60.0.5")
        .arg("3.5.140.7")
        .arg("104.17.1.1")
        .assert()
        .success()
        .stdout("20.60.0.0/16\n3.5.140.0/22\n104.16.0.0/13\n");
}

#[test]
fn command_lookup_without_prefilter() {
    cloudiplookup()
        .arg("--no-prefilter")
        .arg("--output")
        .arg("cidr")
        .arg("34.81.2.3")
        .assert()
        .success()
        .stdout("34.80.0.0/15\n");
}

#[test]
fn command_lookup_data_dir_from_environment() {
    Command::cargo_bin("cloudiplookup")
        .unwrap()
        .env("CLOUDIPLOOKUP_DATA_DIR", DATA_DIR)
        .arg("--output")
        .arg("cidr")
        .arg("52.94.77.1")
        .assert()
        .success()
        .stdout("52.94.76.0/22\n");
}

/*-----------------------------------------------------------------------------
  Failed Lookups
-----------------------------------------------------------------------------*/

#[test]
fn command_lookup_no_match() {
    cloudiplookup()
        .arg("--output")
        .arg("cidr")
        .arg("1.1.1.1")
        .assert()
        .failure()
        .code(1)
        .stdout("");
}

#[test]
fn command_lookup_reserved_address() {
    cloudiplookup()
        .arg("-v")
        .arg("10.0.0.5")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("reserved"));
}

#[test]
fn command_lookup_reserved_address_skipped() {
    cloudiplookup()
        .arg("--skip-reserved")
        .arg("192.168.1.1")
        .assert()
        .failure()
        .code(1);
}

#[test]
fn command_lookup_invalid_format() {
    for input in ["1.2.3.999", "20.60.0.0/16", "not a hostname"] {
        cloudiplookup()
            .arg(input)
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains(input));
    }
}

#[test]
fn command_lookup_partial_failure() {
    cloudiplookup()
        .arg("--output")
        .arg("cidr")
        .arg("20.60.0.5")
        .arg("1.1.1.1")
        .assert()
        .failure()
        .code(1)
        .stdout("20.60.0.0/16\n");
}

/*--------------------------------------------------------------------------------------
  Output Formats
--------------------------------------------------------------------------------------*/

/*-----------------------------------------------------------------------------
  Output: Table
-----------------------------------------------------------------------------*/

#[test]
fn command_output_table() {
    cloudiplookup()
        .arg("--output")
        .arg("table")
        .arg("20.60.0.5")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cloud Provider"))
        .stdout(predicate::str::contains("Matching Subnets"));
}

/*-----------------------------------------------------------------------------
  Output: JSON
-----------------------------------------------------------------------------*/

#[test]
fn command_output_json() {
    let output = cloudiplookup()
        .arg("--output")
        .arg("json")
        .arg("20.60.0.5")
        .output()
        .unwrap();
    assert!(output.status.success());

    let results: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        results,
        serde_json::json!([{
            "IPAddress": "20.60.0.5",
            "CloudProvider": "azure",
            "Subnet": "20.60.0.0/16",
            "Region": "eastus",
            "Service": "AzureCloud",
            "SubnetSize": "65536"
        }])
    );
}

/*-----------------------------------------------------------------------------
  Output: CIDR
-----------------------------------------------------------------------------*/

#[test]
fn command_output_cidr() {
    cloudiplookup()
        .arg("--output")
        .arg("cidr")
        .arg("20.60.0.5")
        .arg("20.60.200.1")
        .assert()
        .success()
        .stdout("20.60.0.0/16\n");
}

/*-----------------------------------------------------------------------------
  Output: Netmask
-----------------------------------------------------------------------------*/

#[test]
fn command_output_netmask() {
    cloudiplookup()
        .arg("--output")
        .arg("netmask")
        .arg("4.150.1.1")
        .assert()
        .success()
        .stdout("4.150.0.0 255.255.192.0\n");
}

/*--------------------------------------------------------------------------------------
  Provider Listing
--------------------------------------------------------------------------------------*/

#[test]
fn command_list_provider() {
    // The IPv6 entry in Azure.json is skipped
    cloudiplookup()
        .arg("--provider")
        .arg(" Azure ")
        .arg("--output")
        .arg("cidr")
        .assert()
        .success()
        .stdout("20.60.0.0/16\n4.150.0.0/18\n20.33.0.0/16\n");
}

#[test]
fn command_list_provider_with_prefix() {
    cloudiplookup()
        .arg("--provider")
        .arg("azure")
        .arg("--prefix")
        .arg("20.")
        .arg("--output")
        .arg("netmask")
        .assert()
        .success()
        .stdout("20.60.0.0 255.255.0.0\n20.33.0.0 255.255.0.0\n");
}

#[test]
fn command_list_provider_json() {
    cloudiplookup()
        .arg("--provider")
        .arg("cloudflare")
        .arg("--output")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""Subnet": "104.16.0.0/13""#));
}

#[test]
fn command_list_unknown_provider() {
    cloudiplookup()
        .arg("--provider")
        .arg("nosuchcloud")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("nosuchcloud"));
}

#[test]
fn command_list_unavailable_provider() {
    // OCI.json is malformed and Akamai.json is missing
    for provider in ["oci", "akamai"] {
        cloudiplookup()
            .arg("--provider")
            .arg(provider)
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains(provider));
    }
}

/*--------------------------------------------------------------------------------------
  Save to CSV
--------------------------------------------------------------------------------------*/

#[test]
fn command_save_results_csv() {
    let temp_dir = tempfile::tempdir().unwrap();
    let csv_file = temp_dir.path().join("results.csv");

    cloudiplookup()
        .arg("--output")
        .arg("cidr")
        .arg("--csv")
        .arg(&csv_file)
        .arg("20.60.0.5")
        .assert()
        .success();

    let contents = std::fs::read_to_string(&csv_file).unwrap();
    assert_eq!(
        contents,
        "IP Address,Cloud Provider,Subnet,Region,Service,Subnet Size\n\
         20.60.0.5,azure,20.60.0.0/16,eastus,AzureCloud,65536\n"
    );
}

#[test]
fn command_save_provider_csv() {
    let temp_dir = tempfile::tempdir().unwrap();
    let csv_file = temp_dir.path().join("aws.csv");

    cloudiplookup()
        .arg("--provider")
        .arg("aws")
        .arg("--output")
        .arg("cidr")
        .arg("--csv")
        .arg(&csv_file)
        .assert()
        .success();

    let contents = std::fs::read_to_string(&csv_file).unwrap();
    assert_eq!(
        contents,
        "Subnet,Region,Service,Subnet Size\n\
         3.5.140.0/22,ap-northeast-2,AMAZON,1024\n\
         52.94.76.0/22,us-west-2,AMAZON,1024\n"
    );
}
