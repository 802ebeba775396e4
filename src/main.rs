use anyhow::Context;
use books_etl::core::ConfigProvider;
use books_etl::utils::{logger, validation::Validate};
use books_etl::{CliConfig, EtlEngine, LocalStorage, ScrapePipeline, TomlConfig};
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let file_config = match &cli.config {
        Some(path) => Some(
            TomlConfig::from_file(path)
                .with_context(|| format!("failed to load config file '{}'", path))?,
        ),
        None => None,
    };

    let logging = file_config.as_ref().map(|c| c.logging.clone()).unwrap_or_default();
    let verbose = cli.verbose || logging.verbose;
    if cli.json_logs || logging.json {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    match file_config {
        Some(config) => {
            tracing::info!("Using configuration from {}", cli.config.as_deref().unwrap_or_default());
            execute(config).await
        }
        None => {
            if verbose {
                tracing::debug!("CLI config: {:?}", cli);
            }
            execute(cli).await
        }
    }

    Ok(())
}

/// Runs one scrape. Only invalid configuration ends the process with a
/// non-zero status; run failures are logged and the process exits normally.
async fn execute<C: ConfigProvider + Validate>(config: C) {
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(1);
    }

    let storage = LocalStorage::new(config.output_dir());
    let pipeline = match ScrapePipeline::new(storage, config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            tracing::error!("Could not set up the pipeline: {}", e);
            return;
        }
    };
    let engine = EtlEngine::new(pipeline);

    tokio::select! {
        result = engine.run() => match result {
            Ok(summary) => {
                if let Some(path) = summary.output {
                    println!("Saved {} books to {}", summary.extracted, path);
                }
            }
            Err(e) => {
                // The engine already logged the failure itself.
                tracing::info!("Recovery suggestion: {}", e.recovery_suggestion());
            }
        },
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Interrupted; stopping without writing output");
        }
    }
}
