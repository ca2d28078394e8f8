pub mod data_loader;
pub mod enrich;
pub mod error;
pub mod fetcher;
pub mod snapshot_store;
