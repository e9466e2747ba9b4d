mod config;

use anyhow::Context;
use clap::{Parser, Subcommand};
use config::{load_global_config, GlobalConfig};
use rpp_core::assembler::{AssemblyContext, Assembler};
use rpp_core::logging::{
    BufferedEventLogger, FanoutEventLogger, LogEvent, LogLevel, SharedEventLogger,
    StderrEventLogger,
};
use rpp_core::metrics::{InMemoryMetrics, Metrics, SharedMetrics};
use rpp_core::providers::create_generator;
use rpp_core::validators::{InputValidator, OutputValidator, Validator};
use rpp_core::{InputRecord, OutputDocument, ValidationResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "rpp", about = "Lesson plan generator and quality checker")]
pub struct Cli {
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build a lesson plan from an input record (JSON).
    Generate {
        #[arg(long)]
        input: PathBuf,
        /// Skip the text generator even when one is configured.
        #[arg(long)]
        no_augment: bool,
        /// Also validate the input and the generated document.
        #[arg(long)]
        validate: bool,
    },
    /// Check an input record without generating anything.
    ValidateInput {
        #[arg(long)]
        input: PathBuf,
    },
    /// Check a previously generated document (JSON).
    ValidateOutput {
        #[arg(long)]
        document: PathBuf,
    },
}

const BUFFERED_EVENTS: usize = 1000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let gc = load_global_config(cli.config.as_deref())?;
    let logger = build_logger(&gc);
    let metrics = Arc::new(InMemoryMetrics::new());

    let report = match cli.command {
        Command::Generate {
            input,
            no_augment,
            validate,
        } => {
            let record: InputRecord = read_json(&input)?;
            let ctx = build_context(&gc, logger.clone(), metrics.clone(), no_augment).await;
            let document = Assembler::new(ctx).assemble(&record).await;
            if validate {
                let input_result = run_validator(&InputValidator::new(), &record, &logger, &metrics);
                let output_result =
                    run_validator(&OutputValidator::new(), &document, &logger, &metrics);
                serde_json::json!({
                    "document": document,
                    "input_validation": input_result,
                    "output_validation": output_result,
                })
            } else {
                serde_json::to_value(&document)?
            }
        }
        Command::ValidateInput { input } => {
            let record: InputRecord = read_json(&input)?;
            serde_json::to_value(run_validator(&InputValidator::new(), &record, &logger, &metrics))?
        }
        Command::ValidateOutput { document } => {
            let doc: OutputDocument = read_json(&document)?;
            serde_json::to_value(run_validator(&OutputValidator::new(), &doc, &logger, &metrics))?
        }
    };

    println!("{}", serde_json::to_string_pretty(&report)?);

    let snapshot = metrics.snapshot();
    logger.log(
        LogEvent::new(LogLevel::Debug, "cli.metrics")
            .with_field("documents_assembled", snapshot.documents_assembled.to_string())
            .with_field("augmentation_fallback", snapshot.augmentation_fallback.to_string())
            .with_field("validations_failed", snapshot.validations_failed.to_string()),
    );
    Ok(())
}

/// Stderr at the configured level; with a `log_dir`, every event is also
/// buffered and appended to the per-plan JSONL file.
fn build_logger(gc: &GlobalConfig) -> SharedEventLogger {
    let stderr: SharedEventLogger = Arc::new(StderrEventLogger::new(parse_level(gc.log_level())));
    if gc.log_dir().is_none() {
        return stderr;
    }
    let buffered: SharedEventLogger =
        Arc::new(BufferedEventLogger::new(BUFFERED_EVENTS, BUFFERED_EVENTS));
    Arc::new(FanoutEventLogger::new(vec![stderr, buffered]))
}

async fn build_context(
    gc: &GlobalConfig,
    logger: SharedEventLogger,
    metrics: SharedMetrics,
    no_augment: bool,
) -> AssemblyContext {
    let mut ctx = AssemblyContext::new()
        .with_logger(logger.clone())
        .with_metrics(metrics);
    if let Some(timeout) = gc.augment_timeout() {
        ctx = ctx.with_timeout(timeout);
    }
    if let Some(dir) = gc.log_dir() {
        ctx = ctx.with_log_dir(dir);
    }
    if no_augment {
        return ctx;
    }
    let Some(pc) = gc.provider_config(|k| std::env::var(k).ok()) else {
        return ctx;
    };

    let provider_id = pc.id().clone();
    let generator = create_generator(pc, logger.clone());
    match tokio::time::timeout(ctx.timeout, generator.health_check()).await {
        Ok(Ok(())) => {
            logger.log(
                LogEvent::new(LogLevel::Info, "cli.generator")
                    .with_field("provider_id", provider_id),
            );
            ctx.with_generator(generator)
        }
        outcome => {
            let reason = match outcome {
                Ok(Err(e)) => e.to_string(),
                _ => "timed out".to_string(),
            };
            logger.log(
                LogEvent::new(LogLevel::Warn, "cli.generator_unhealthy")
                    .with_field("provider_id", provider_id)
                    .with_field("reason", reason),
            );
            ctx
        }
    }
}

fn run_validator<T: ?Sized>(
    validator: &dyn Validator<T>,
    target: &T,
    logger: &SharedEventLogger,
    metrics: &Arc<InMemoryMetrics>,
) -> ValidationResult {
    let result = validator.validate(target);
    metrics.record_validation(result.is_valid);
    logger.log(
        LogEvent::new(LogLevel::Info, "cli.validation")
            .with_field("validator", validator.id())
            .with_field("valid", result.is_valid.to_string())
            .with_field("score", result.score.to_string()),
    );
    result
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

fn parse_level(level: Option<&str>) -> LogLevel {
    match level.map(str::to_ascii_lowercase).as_deref() {
        Some("trace") => LogLevel::Trace,
        Some("debug") => LogLevel::Debug,
        Some("warn") => LogLevel::Warn,
        Some("error") => LogLevel::Error,
        _ => LogLevel::Info,
    }
}
