pub mod config;
pub mod logging;

pub mod checksum;
pub mod fetch;
pub mod hash_store;
pub mod naming;
pub mod outcome;
pub mod persister;
pub mod staging;
pub mod validate;

pub use checksum::Fingerprint;
pub use fetch::{Fetcher, ResponseMetadata};
pub use hash_store::HashStore;
pub use outcome::Outcome;
pub use persister::ImagePersister;
pub use validate::ContentValidator;
