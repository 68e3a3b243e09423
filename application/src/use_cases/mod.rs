//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod coalesce;
pub mod debate;
pub mod review;
pub mod run_pipeline;
pub(crate) mod shared;

pub use shared::TaskFailure;
