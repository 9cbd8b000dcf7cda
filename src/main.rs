use clap::Parser;
use std::sync::Arc;
use user_tagger::utils::{logger, validation::Validate};
use user_tagger::{CliConfig, LocalStorage, StdoutSink, TaggingEngine, TaggerError, UserPipeline};

fn report_and_exit(e: &TaggerError) -> ! {
    tracing::error!(
        "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(env!("CARGO_CRATE_NAME"), config.verbose);

    tracing::info!("Starting user-tagger");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        report_and_exit(&e);
    }

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let monitor_enabled = config.monitor;
    let pipeline = UserPipeline::new(LocalStorage::default(), config, Arc::new(StdoutSink));
    let engine = TaggingEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Run completed, records saved to: {}", output_path);
        }
        Err(e) => report_and_exit(&e),
    }
}
