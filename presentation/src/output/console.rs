//! Console summaries of pipeline stages

use colored::Colorize;
use face_quorum_application::{
    CoalesceOutput, DebateBatchOutput, PipelineOutput, ReviewBatchOutput, TaskFailure,
};
use face_quorum_domain::BookReport;
use std::path::Path;

/// Formats stage outputs for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Summary of the independent review stage
    pub fn format_review(output: &ReviewBatchOutput, table: Option<&Path>) -> String {
        let mut out = Self::section_header("Independent Review");

        for result in &output.results {
            out.push_str(&format!(
                "  {:<8} {:<20} {}\n",
                format!("{}:{}", result.chapter, result.verse),
                result.agent_name,
                Self::score(result.score)
            ));
        }
        if !output.missing.is_empty() {
            let keys: Vec<String> = output.missing.iter().map(ToString::to_string).collect();
            out.push_str(&format!(
                "\n{} {}\n",
                "Not in corpus:".yellow().bold(),
                keys.join(", ")
            ));
        }
        out.push_str(&Self::failures(&output.failures));
        out.push_str(&Self::written(table));
        out
    }

    /// Summary of the debate stage
    pub fn format_debate(output: &DebateBatchOutput, table: Option<&Path>) -> String {
        let mut out = Self::section_header("Debate");

        out.push_str(&format!(
            "  {} verses debated\n",
            output.results.len().to_string().bold()
        ));
        for skipped in &output.skipped {
            out.push_str(&format!(
                "  {} {}: expected {} analyses, found {}\n",
                "skipped".yellow(),
                skipped.key,
                skipped.expected,
                skipped.found
            ));
        }
        out.push_str(&Self::failures(&output.failures));
        out.push_str(&Self::written(table));
        out
    }

    /// Per-verse scores of the coalesced report
    pub fn format_report(output: &CoalesceOutput) -> String {
        let mut out = Self::header(&Self::title(&output.report));
        out.push('\n');

        for verse in &output.report.analysis {
            let individual: Vec<String> = verse
                .individual_scores()
                .into_iter()
                .map(|(model, score)| format!("{}={}", model, score))
                .collect();
            let consensus = match verse.debate_score() {
                Some(score) => Self::score(score),
                None => "-".dimmed().to_string(),
            };
            out.push_str(&format!(
                "  {:<4} {:<28} consensus {:<3} {}\n",
                verse.verse,
                Self::truncate(&verse.annotation, 28),
                consensus,
                individual.join(" ").dimmed()
            ));
        }

        out.push_str(&Self::written(Some(&output.path)));
        out.push_str(&Self::footer());
        out
    }

    /// Everything a full run produced
    pub fn format_pipeline(output: &PipelineOutput) -> String {
        let mut out = Self::format_review(&output.review, None);
        out.push_str(&Self::format_debate(&output.debate, None));
        out.push_str(&Self::format_report(&output.coalesced));
        out
    }

    fn title(report: &BookReport) -> String {
        format!("{} {} ({})", report.book, report.chapter, report.category)
    }

    fn score(score: i64) -> String {
        let text = score.to_string();
        match score {
            s if s >= 8 => text.green().bold().to_string(),
            s if s >= 5 => text.yellow().to_string(),
            _ => text.red().to_string(),
        }
    }

    fn failures(failures: &[TaskFailure]) -> String {
        if failures.is_empty() {
            return String::new();
        }
        let mut out = format!("\n{}\n", "Failures:".red().bold());
        for failure in failures {
            out.push_str(&format!(
                "  {} {} {}\n",
                failure.key,
                failure.agent,
                failure.message.dimmed()
            ));
        }
        out
    }

    fn written(path: Option<&Path>) -> String {
        match path {
            Some(path) => format!("\n{} {}\n", "Written:".cyan().bold(), path.display()),
            None => String::new(),
        }
    }

    fn truncate(text: &str, width: usize) -> String {
        if text.chars().count() <= width {
            text.to_string()
        } else {
            let cut: String = text.chars().take(width.saturating_sub(3)).collect();
            format!("{}...", cut)
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
