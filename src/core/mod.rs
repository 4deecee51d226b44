/*-------------------------------------------------------------------------------------------------
  Core Modules
-------------------------------------------------------------------------------------------------*/

pub mod address;
pub mod cidr;
pub mod client;
pub mod errors;
pub mod json;
pub mod lookup;
pub mod provider;
pub mod repository;
pub mod reserved;
pub mod resolver;
pub mod search;
pub mod search_results;
pub mod subnet_record;
