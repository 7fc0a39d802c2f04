// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion2blog::config::{
    store_dir_or_default, Cli, Command, DeleteArgs, ExportArgs, ExportConfig, ListArgs, ShowArgs,
};
use notion2blog::constants::MAX_FETCH_DEPTH;
use notion2blog::enrichment::{ChatCompletionsEnricher, DisabledEnricher, SeoEnricher};
use notion2blog::export::{
    CompletedExport, ExportOrchestrator, ExportRequest, ExportStore, FileExportStore,
    StaticAuthenticator,
};
use notion2blog::output::{deliver_all, plan_delivery, DeliveryReport, DeliveryTarget};
use notion2blog::types::UserId;
use notion2blog::{AppError, NotionHttpClient, NotionRepository};
use std::fs;
use std::sync::Arc;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion2blog.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    // Console logs go to stderr so `--pipe` output stays clean.
    let console_appender = ConsoleAppender::builder()
        .target(log4rs::append::console::Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)
        .with_context(|| format!("opening log file {}", log_file_path.display()))?;

    let config = Config::builder()
        .appender(Appender::builder().build("console", Box::new(console_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("console")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Fetches, converts, stores and delivers one Notion page.
async fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let config = ExportConfig::resolve(args)?;

    let repository: Arc<dyn NotionRepository> = Arc::new(NotionHttpClient::new(&config.api_key)?);

    let mut authenticator = StaticAuthenticator::new(config.user_id.clone(), config.plan);
    if let Some(token) = &config.required_token {
        authenticator = authenticator.with_required_token(token.clone());
    }

    let enricher: Arc<dyn SeoEnricher> = match &config.enrichment {
        Some(settings) => Arc::new(ChatCompletionsEnricher::with_endpoint(
            settings.key.clone(),
            settings.endpoint.clone(),
            &settings.model,
        )?),
        None => Arc::new(DisabledEnricher),
    };

    let store = Arc::new(FileExportStore::open(&config.store_dir).await?);

    let mut orchestrator =
        ExportOrchestrator::new(repository, Arc::new(authenticator), enricher, store);
    if let Some(concurrency) = config.concurrency {
        orchestrator = orchestrator.with_fetch_concurrency(concurrency);
    }

    let mut request = ExportRequest::new(config.notion_url.clone());
    if let Some(credentials) = &config.credentials {
        request = request.with_credentials(credentials.clone());
    }

    let completed = orchestrator.export(request).await?;
    let plan = plan_delivery(&completed.export, &config.delivery)?;
    let report = deliver_all(plan)?;

    if !config.delivery.pipe {
        report_completion(&completed, &report);
    }
    Ok(())
}

/// Tells the user what was exported and where it went.
fn report_completion(completed: &CompletedExport, report: &DeliveryReport) {
    let receipt = completed.receipt();

    if completed.fetch.was_truncated() {
        eprintln!(
            "⚠️  Maximum nesting depth ({}) reached. Some deeply nested content may be missing.",
            MAX_FETCH_DEPTH
        );
    }
    if !completed.fetch.warnings.is_empty() {
        eprintln!(
            "⚠️  {} fetch warning(s); run with -v for details.",
            completed.fetch.warnings.len()
        );
    }
    if !completed.enriched {
        eprintln!("ℹ️  SEO metadata derived from the page title.");
    }

    println!("📄 Exported \"{}\" ({})", receipt.title, completed.tree);
    println!("   id:   {}", receipt.id);
    println!("   slug: {}", receipt.slug);

    for delivery in &report.completed {
        match &delivery.target {
            DeliveryTarget::WriteFile { path, .. } => println!("✓ Saved to {}", path.display()),
            DeliveryTarget::CopyToClipboard { .. } => println!("✓ Copied to clipboard"),
            DeliveryTarget::PrintToStdout { .. } => {}
        }
    }
}

async fn run_list(args: ListArgs) -> Result<(), AppError> {
    let user_id = UserId::new(args.user)?;
    let store = FileExportStore::open(store_dir_or_default(args.store_dir)).await?;
    let exports = store.list_for_user(&user_id).await?;

    if exports.is_empty() {
        println!("No exports for {}.", user_id);
        return Ok(());
    }
    for export in exports {
        println!(
            "{}  {}  {}  {}",
            export.id,
            export.created_at.format("%Y-%m-%d %H:%M"),
            export.frontmatter.slug,
            export.title
        );
    }
    Ok(())
}

async fn run_show(args: ShowArgs) -> Result<(), AppError> {
    let user_id = UserId::new(args.user.clone())?;
    let store = FileExportStore::open(store_dir_or_default(args.store_dir.clone())).await?;
    let export = store.get_for_user(&user_id, &args.id).await?;
    let plan = plan_delivery(&export, &args.delivery_options())?;
    deliver_all(plan)?;
    Ok(())
}

async fn run_delete(args: DeleteArgs) -> Result<(), AppError> {
    let user_id = UserId::new(args.user)?;
    let store = FileExportStore::open(store_dir_or_default(args.store_dir)).await?;
    store.delete(&user_id, &args.id).await?;
    println!("✓ Deleted export {}", args.id);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("failed to initialize logging")?;

    match cli.command {
        Command::Export(args) => run_export(args).await?,
        Command::List(args) => run_list(args).await?,
        Command::Show(args) => run_show(args).await?,
        Command::Delete(args) => run_delete(args).await?,
    }

    Ok(())
}
