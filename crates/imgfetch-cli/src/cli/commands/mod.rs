//! CLI command handlers. Each command is in its own file.

mod checksum;
mod fetch;

pub use checksum::run_checksum;
pub use fetch::run_fetch;
pub(crate) use fetch::split_urls;
