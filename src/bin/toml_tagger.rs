use clap::Parser;
use std::sync::Arc;
use user_tagger::core::builder::{check_schema, read_columns};
use user_tagger::core::classifier::worker_count;
use user_tagger::core::ConfigProvider;
use user_tagger::utils::{logger, validation::Validate};
use user_tagger::{
    LocalStorage, StdoutSink, Strategy, TaggingEngine, TaggerError, Template, TomlConfig,
    UserPipeline,
};

#[derive(Parser)]
#[command(name = "toml-tagger")]
#[command(about = "User tagging driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "tagger.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override classification strategy
    #[arg(long, value_enum)]
    strategy: Option<Strategy>,

    /// Check inputs and schema without writing output or tagging
    #[arg(long)]
    dry_run: bool,
}

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
    let args = Args::parse();

    // 載入 TOML 配置；日誌格式由配置決定，所以在初始化日誌前讀取
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if config.json_logs() {
        logger::init_json_logger(env!("CARGO_CRATE_NAME"));
    } else {
        logger::init_cli_logger(env!("CARGO_CRATE_NAME"), args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based user tagger");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 套用命令列覆蓋設定
    if let Some(strategy) = args.strategy {
        config.classify.strategy = strategy;
        tracing::info!("🔧 Strategy overridden to: {}", strategy);
    }

    if let Err(e) = config.validate() {
        report_and_exit(&e);
    }

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No output will be written");
        if let Err(e) = perform_dry_run(&config) {
            report_and_exit(&e);
        }
        return;
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let pipeline = UserPipeline::new(LocalStorage::default(), config, Arc::new(StdoutSink));
    let engine = TaggingEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Run completed, records saved to: {}", output_path);
        }
        Err(e) => report_and_exit(&e),
    }
}

// 摘要寫到 stderr，stdout 只放分類結果
fn display_config_summary(config: &TomlConfig, args: &Args) {
    eprintln!("📋 Configuration Summary:");
    eprintln!("  Data: {}", config.data_path().display());
    eprintln!("  Template: {}", config.template_path().display());
    eprintln!("  Output: {}", config.output_path().display());
    eprintln!("  Strategy: {}", config.strategy());
    if config.strategy() == Strategy::Parallel {
        eprintln!("  Workers: {}", worker_count());
    }

    if args.dry_run {
        eprintln!("  🔍 DRY RUN MODE ENABLED");
    }

    eprintln!();
}

fn perform_dry_run(config: &TomlConfig) -> user_tagger::Result<()> {
    let template = Template::from_file(config.template_path())?;
    let placeholders = template.placeholders();

    let data = std::fs::File::open(config.data_path()).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => TaggerError::InputNotFound {
            path: config.data_path().display().to_string(),
        },
        _ => TaggerError::IoError(e),
    })?;
    let columns = read_columns(data)?;

    eprintln!("🔍 Dry Run Analysis:");
    eprintln!("  Template placeholders: {:?}", placeholders);
    eprintln!("  CSV columns: {:?}", columns);

    check_schema(&columns, &placeholders)?;

    eprintln!("✅ Columns match the template placeholders");
    Ok(())
}
