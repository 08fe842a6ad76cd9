pub mod combined;
pub mod combiner;
pub mod data_loader;
pub mod dataset_cache;
pub mod error;
