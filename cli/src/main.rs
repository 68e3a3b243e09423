//! CLI entrypoint for face-quorum
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use face_quorum_application::{
    ArtifactStore, CoalesceUseCase, ConversationLogger, NoConversationLogger, NoProgress,
    ProgressNotifier, RunDebateUseCase, RunPipelineInput, RunPipelineUseCase, RunReviewInput,
    RunReviewUseCase, load_review_results,
};
use face_quorum_infrastructure::{
    ConfigLoader, CsvArtifactStore, CsvGroundTruth, FileConfig, JsonlConversationLogger,
    OpenAiCompatProvider, ProviderAdapter, ProviderKind, RoutingGateway, UsfmCorpus,
};
use face_quorum_presentation::{Cli, Command, ConsoleFormatter, ProgressReporter, StageArgs};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // API keys may live in .env
    let _ = dotenvy::dotenv();

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };
    apply_overrides(&mut config, cli.command.args());

    if cli.show_config {
        for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
        println!();
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let output_dir = config.output.dir.clone();
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Cannot create output directory {}", output_dir.display()))?;

    let _log_guard = init_logging(cli.verbose, &config);
    info!(command = cli.command.name(), output = %output_dir.display(), "Starting face-quorum");

    for issue in config.validate() {
        warn!("Config: {}", issue);
    }

    // === Dependency Injection ===
    let store: Arc<dyn ArtifactStore> = Arc::new(CsvArtifactStore::in_dir(&output_dir));
    let logger: Arc<dyn ConversationLogger> = match config
        .output
        .conversation_log_path()
        .and_then(JsonlConversationLogger::open)
    {
        Some(logger) => {
            info!("Conversation log: {}", logger.path().display());
            Arc::new(logger)
        }
        None => Arc::new(NoConversationLogger),
    };
    let progress: Box<dyn ProgressNotifier> = if cli.quiet {
        Box::new(NoProgress)
    } else {
        Box::new(ProgressReporter::new())
    };
    let (roster, _) = config.roster.to_roster();

    match &cli.command {
        Command::Run(_) => {
            let gateway = build_gateway(&config)?;
            let corpus = Arc::new(UsfmCorpus::load(&config.corpus.path)?);
            let ground_truth = Arc::new(CsvGroundTruth::new(&config.ground_truth.path));

            let input = RunPipelineInput {
                review: RunReviewInput {
                    roster,
                    params: config.review_params(),
                    batch: config.batch_params(),
                },
                debate: config.debate_params(),
                report: config.report_meta(),
            };
            let output = RunPipelineUseCase::new(gateway, corpus, ground_truth, store)
                .with_logger(logger)
                .execute_with_progress(&input, progress.as_ref())
                .await?;
            println!("{}", ConsoleFormatter::format_pipeline(&output));
        }
        Command::Review(_) => {
            let gateway = build_gateway(&config)?;
            let corpus = Arc::new(UsfmCorpus::load(&config.corpus.path)?);
            let ground_truth = Arc::new(CsvGroundTruth::new(&config.ground_truth.path));

            let input = RunReviewInput {
                roster,
                params: config.review_params(),
                batch: config.batch_params(),
            };
            let output = RunReviewUseCase::new(gateway, corpus, ground_truth)
                .with_logger(logger)
                .execute_with_progress(&input, progress.as_ref())
                .await?;
            let path = store.write_reviews(&output.results)?;
            println!("{}", ConsoleFormatter::format_review(&output, Some(&path)));
        }
        Command::Debate(_) => {
            let gateway = build_gateway(&config)?;
            let reviews = load_review_results(store.as_ref())
                .context("Run `face-quorum review` first to produce the review table")?;

            let output = RunDebateUseCase::new(gateway, roster, config.debate_params())
                .with_logger(logger)
                .process_interleaved_results(&reviews, &config.batch_params(), progress.as_ref())
                .await;
            let path = store.write_debates(&output.results)?;
            println!("{}", ConsoleFormatter::format_debate(&output, Some(&path)));
        }
        Command::Coalesce(_) => {
            let output = CoalesceUseCase::new(store)
                .execute_with_progress(&config.report_meta(), progress.as_ref())?;
            println!("{}", ConsoleFormatter::format_report(&output));
        }
    }

    Ok(())
}

/// Command-line values win over every configuration source.
fn apply_overrides(config: &mut FileConfig, args: &StageArgs) {
    if let Some(dir) = &args.output {
        config.output.dir = dir.clone();
    }
    if let Some(limit) = args.limit {
        config.batch.limit = Some(limit);
    }
    if let Some(pacing) = args.pacing_ms {
        config.batch.pacing_ms = pacing;
    }
    if let Some(corpus) = &args.corpus {
        config.corpus.path = corpus.clone();
    }
    if let Some(ground_truth) = &args.ground_truth {
        config.ground_truth.path = ground_truth.clone();
    }
}

/// Console logging by verbosity, plus a daily-rolling file in the output
/// directory when configured.
fn init_logging(verbose: u8, config: &FileConfig) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::new(level));

    let (file, guard) = match &config.output.log_file {
        Some(prefix) => {
            let appender = tracing_appender::rolling::daily(&config.output.dir, prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(EnvFilter::new("info"));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry().with(console).with(file).init();
    guard
}

/// Register every provider whose API key is available.
fn build_gateway(config: &FileConfig) -> Result<Arc<RoutingGateway>> {
    let providers: Vec<Arc<dyn ProviderAdapter>> = [ProviderKind::OpenAi, ProviderKind::Gemini]
        .into_iter()
        .filter_map(|kind| OpenAiCompatProvider::try_new(kind, &config.providers.settings(kind)))
        .map(|provider| Arc::new(provider) as Arc<dyn ProviderAdapter>)
        .collect();

    if providers.is_empty() {
        bail!("No provider available: set OPENAI_API_KEY and/or GEMINI_API_KEY");
    }

    let gateway = RoutingGateway::new(providers, &config.providers.routing_config());
    info!(providers = ?gateway.provider_kinds(), "Gateway ready");
    Ok(Arc::new(gateway))
}
