//! Progress notification port
//!
//! Defines the interface for reporting progress while the pipeline runs.

use std::fmt;

/// Pipeline stage being reported on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Review,
    Debate,
    Coalesce,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Review => "review",
            Stage::Debate => "debate",
            Stage::Coalesce => "coalesce",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Callback for progress updates during a pipeline run
///
/// Implementations live in the presentation layer.
pub trait ProgressNotifier: Send + Sync {
    /// Called when a stage starts
    fn on_stage_start(&self, stage: Stage, total_tasks: usize);

    /// Called when a task completes within a stage
    fn on_task_complete(&self, stage: Stage, label: &str, success: bool);

    /// Called when a stage completes
    fn on_stage_complete(&self, stage: Stage);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_stage_start(&self, _stage: Stage, _total_tasks: usize) {}
    fn on_task_complete(&self, _stage: Stage, _label: &str, _success: bool) {}
    fn on_stage_complete(&self, _stage: Stage) {}
}
