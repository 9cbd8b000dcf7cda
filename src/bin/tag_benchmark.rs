use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use user_tagger::utils::logger;
use user_tagger::utils::validation::validate_positive_number;
use user_tagger::{build_from_path, tag_all_concurrent, tag_all_sequential, MemorySink, Record, Template};

#[derive(Parser)]
#[command(name = "tag-benchmark")]
#[command(about = "Compare sequential and worker-pool tagging wall-clock time")]
struct Args {
    #[arg(long, default_value = "data.csv")]
    data_path: PathBuf,

    #[arg(long, default_value = "template.json")]
    template_path: PathBuf,

    /// Number of copies of the first record to tag
    #[arg(long, default_value_t = 100)]
    size_multiplier: usize,

    /// Number of timed runs per strategy
    #[arg(long, default_value_t = 3)]
    iterations: usize,

    #[arg(short, long)]
    verbose: bool,
}

/// 多次執行取平均時間
fn benchmark<F>(iterations: usize, mut run: F) -> Result<Duration>
where
    F: FnMut() -> Result<()>,
{
    let mut total = Duration::ZERO;
    for i in 0..iterations {
        let start = Instant::now();
        run()?;
        let elapsed = start.elapsed();
        tracing::debug!("iteration {}: {:?}", i + 1, elapsed);
        total += elapsed;
    }
    Ok(total / iterations as u32)
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(env!("CARGO_CRATE_NAME"), args.verbose);

    validate_positive_number("size_multiplier", args.size_multiplier, 1)?;
    validate_positive_number("iterations", args.iterations, 1)?;

    let template = Template::from_file(&args.template_path)
        .with_context(|| format!("reading template {}", args.template_path.display()))?;
    let records = build_from_path(&args.data_path, &template)
        .with_context(|| format!("building records from {}", args.data_path.display()))?;

    // 只複製第一筆，讓兩種策略處理完全相同的工作量
    let Some(first) = records.into_iter().next() else {
        bail!("{} contains no data rows", args.data_path.display());
    };
    let replicated: Vec<Record> = vec![first; args.size_multiplier];

    tracing::info!(
        "⏱️ Benchmarking {} records over {} iterations",
        replicated.len(),
        args.iterations
    );

    let sink = MemorySink::new();

    let sequential = benchmark(args.iterations, || {
        sink.clear();
        tag_all_sequential(&replicated, &sink);
        Ok(())
    })?;

    let concurrent = benchmark(args.iterations, || {
        sink.clear();
        tag_all_concurrent(&replicated, &sink)?;
        Ok(())
    })?;

    println!(
        "Average (over {} iterations) time taken to tag users iteratively: {:.3} seconds",
        args.iterations,
        sequential.as_secs_f64()
    );
    println!(
        "Average (over {} iterations) time taken to tag users in parallel: {:.3} seconds",
        args.iterations,
        concurrent.as_secs_f64()
    );

    Ok(())
}
