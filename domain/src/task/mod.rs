//! Evaluation tasks — one per verse segment.
//!
//! A [`Task`] joins the ground-truth annotation for a verse with the
//! translated text being evaluated. Its [`TaskKey`] is the join key shared
//! by every review and debate artifact produced for it.

mod entities;

pub use entities::{GroundTruthRow, Task, TaskKey, UNCATEGORIZED};
