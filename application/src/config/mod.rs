//! Application-level configuration.
//!
//! Configuration types that control how the protocols behave:
//!
//! - [`Roster`] — which agent speaks with which model
//! - [`ReviewParams`] — critique/revision loop control
//! - [`DebateParams`] — debate rounds and grouping
//! - [`BatchParams`] — pacing and row limits across tasks

pub mod params;
pub mod roster;

pub use params::{BatchParams, DebateParams, ReviewParams};
pub use roster::{AgentSpec, Roster};
