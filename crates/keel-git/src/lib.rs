//! # keel-git
//!
//! Git backend for keel. Repository state is read through git2-rs; anything
//! that touches a remote or the working tree runs the `git` binary so the
//! user sees git's own output.

mod divergence;
mod error;
mod repository;
mod traits;

pub use divergence::RemoteDivergence;
pub use error::{Error, Result};
pub use repository::Repository;
pub use traits::GitOps;
