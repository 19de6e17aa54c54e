//! # keel-core
//!
//! Core library for keel, providing the repository state prober,
//! the sync decision engine and the remote operation executor.
//!
//! The engine talks to git through [`keel_git::GitOps`] and to the user
//! through [`Prompter`], so both can be replaced in tests.

pub mod config;
pub mod error;
pub mod executor;
pub mod plan;
pub mod state;
pub mod sync;
pub mod traits;

#[cfg(test)]
mod test_mocks;

pub use config::Config;
pub use error::{Error, Result};
pub use executor::Executor;
pub use plan::{DivergenceChoice, FollowUp, RemoteOperation, Route, SyncPlan};
pub use state::{Prober, RepositoryState};
pub use sync::{CancelReason, SyncEngine, SyncOptions, SyncOutcome, SyncReport};
pub use traits::Prompter;
