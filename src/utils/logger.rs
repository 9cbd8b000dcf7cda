use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LIBRARY_TARGET: &str = "user_tagger";

/// 函式庫與呼叫端執行檔（以 `env!("CARGO_CRATE_NAME")` 傳入）共用同一個等級
fn default_directives(bin_target: &str, verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    if bin_target == LIBRARY_TARGET {
        format!("{}={},warn", LIBRARY_TARGET, level)
    } else {
        format!("{}={},{}={},warn", LIBRARY_TARGET, level, bin_target, level)
    }
}

fn env_filter(bin_target: &str, verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(bin_target, verbose)))
}

// 報告行寫到 stdout，日誌一律走 stderr
pub fn init_cli_logger(bin_target: &str, verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(bin_target, verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .compact(),
        )
        .init();
}

/// JSON 格式，給需要機器解析日誌的批次環境使用
pub fn init_json_logger(bin_target: &str) {
    tracing_subscriber::registry()
        .with(env_filter(bin_target, false))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .json()
                .with_current_span(false),
        )
        .init();
}
