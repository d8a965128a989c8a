//! kendra-sync: provision a Kendra index with a document connector and
//! trigger data source sync jobs.
//!
//! The Lambda itself lives in `kendra-sync-lambda`; this crate holds the
//! command line surface around it.

pub mod deploy;
pub mod sync;

pub use kendra_sync_config::{StackParameters, SyncConfig};
