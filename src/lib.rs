pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod markdown;
pub mod sync;

#[cfg(test)]
mod test_utils;

pub use config::Config;
pub use sync::{run, SyncReport};
