//! Shared utilities for use cases.

use face_quorum_domain::TaskKey;
use std::time::Duration;
use tracing::debug;

/// A (task, agent) pair that failed and was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFailure {
    pub key: TaskKey,
    pub agent: String,
    pub message: String,
}

impl TaskFailure {
    pub fn new(key: TaskKey, agent: impl Into<String>, message: impl ToString) -> Self {
        Self {
            key,
            agent: agent.into(),
            message: message.to_string(),
        }
    }
}

/// Await the pacing delay before every task but the first.
pub(crate) async fn pace(pacing: Duration, index: usize) {
    if index > 0 && !pacing.is_zero() {
        debug!("Pacing for {:?}", pacing);
        tokio::time::sleep(pacing).await;
    }
}
