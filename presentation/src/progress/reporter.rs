//! Progress reporting for pipeline runs

use colored::Colorize;
use face_quorum_application::ports::progress::{ProgressNotifier, Stage};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress with one bar per stage
pub struct ProgressReporter {
    multi: MultiProgress,
    stage_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            stage_bar: Mutex::new(None),
        }
    }

    fn stage_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    pub(crate) fn stage_display_name(stage: Stage) -> &'static str {
        match stage {
            Stage::Review => "Stage 1: Independent Review",
            Stage::Debate => "Stage 2: Debate",
            Stage::Coalesce => "Stage 3: Coalesce",
        }
    }

    fn stage_short_name(stage: Stage) -> &'static str {
        match stage {
            Stage::Review => "Review",
            Stage::Debate => "Debate",
            Stage::Coalesce => "Coalesce",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_stage_start(&self, stage: Stage, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::stage_style());
        pb.set_prefix(Self::stage_display_name(stage));
        pb.set_message("Starting...");

        if let Ok(mut slot) = self.stage_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_task_complete(&self, _stage: Stage, label: &str, success: bool) {
        let Ok(slot) = self.stage_bar.lock() else {
            return;
        };
        if let Some(pb) = slot.as_ref() {
            let status = if success {
                format!("{} {}", "v".green(), label)
            } else {
                format!("{} {}", "x".red(), label)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_stage_complete(&self, stage: Stage) {
        let Ok(mut slot) = self.stage_bar.lock() else {
            return;
        };
        if let Some(pb) = slot.take() {
            pb.finish_with_message(format!("{} complete!", Self::stage_short_name(stage).green()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_lifecycle() {
        let reporter = ProgressReporter::new();
        reporter.on_stage_start(Stage::Review, 2);
        reporter.on_task_complete(Stage::Review, "1:1 GPT5_LINGUIST", true);
        reporter.on_task_complete(Stage::Review, "1:1 GEMINI_LINGUIST", false);
        assert_eq!(
            reporter.stage_bar.lock().unwrap().as_ref().map(|pb| pb.position()),
            Some(2)
        );
        reporter.on_stage_complete(Stage::Review);
        assert!(reporter.stage_bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_task_without_stage_is_ignored() {
        let reporter = ProgressReporter::new();
        reporter.on_task_complete(Stage::Debate, "1:4", true);
        reporter.on_stage_complete(Stage::Debate);
    }
}
