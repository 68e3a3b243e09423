//! Coalesce use case
//!
//! Reads both persisted tables back and writes the nested report.

use crate::ports::artifact_store::{ArtifactStore, StoreError};
use crate::ports::progress::{NoProgress, ProgressNotifier, Stage};
use face_quorum_domain::{BookReport, ReportMeta, coalesce};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone)]
pub struct CoalesceOutput {
    pub report: BookReport,
    pub path: PathBuf,
}

pub struct CoalesceUseCase {
    store: Arc<dyn ArtifactStore>,
}

impl CoalesceUseCase {
    pub fn new(store: Arc<dyn ArtifactStore>) -> Self {
        Self { store }
    }

    pub fn execute(&self, meta: &ReportMeta) -> Result<CoalesceOutput, StoreError> {
        self.execute_with_progress(meta, &NoProgress)
    }

    pub fn execute_with_progress(
        &self,
        meta: &ReportMeta,
        progress: &dyn ProgressNotifier,
    ) -> Result<CoalesceOutput, StoreError> {
        progress.on_stage_start(Stage::Coalesce, 1);

        let reviews = self.store.read_reviews()?;
        let debates = self.store.read_debates()?;
        info!(
            "Coalescing {} review rows and {} debate rows",
            reviews.len(),
            debates.len()
        );

        let report = coalesce(&reviews, &debates, meta);
        let path = self.store.write_report(&report)?;

        progress.on_task_complete(Stage::Coalesce, &meta.book, true);
        progress.on_stage_complete(Stage::Coalesce);
        Ok(CoalesceOutput { report, path })
    }
}
