use anyhow::{Context, Result};
use censoclean::clean::{clean_all, CleanJob, OutputPolicy, ReadOptions};
use clap::Parser;
use glob::glob;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(about = "Clean every censo CSV under the input root into a separate output root")]
struct Args {
    /// Directory holding the original exports
    #[arg(long, default_value = "data/ibge/censo2022/original")]
    input: String,

    /// Directory the cleaned files are written to
    #[arg(long, default_value = "data/ibge/censo2022/clean")]
    output: String,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args = Args::parse();
    let cwd = std::env::current_dir().context("resolving working directory")?;
    info!("input root:  {}", cwd.join(&args.input).display());
    info!("output root: {}", cwd.join(&args.output).display());

    // ─── 2) discover input files ─────────────────────────────────────
    let pattern = format!("{}/*.csv", args.input);
    let mut files: Vec<PathBuf> = glob(&pattern)
        .context("building csv glob pattern")?
        .filter_map(|entry| entry.ok())
        .collect();
    files.sort();
    info!("{} csv files to clean", files.len());

    // ─── 3) clean each file, in order ────────────────────────────────
    let output_root = PathBuf::from(&args.output);
    let jobs: Vec<CleanJob> = files
        .into_iter()
        .map(|input| CleanJob {
            input,
            options: ReadOptions::censo(Vec::new()),
            policy: OutputPolicy::Directory(output_root.clone()),
        })
        .collect();
    let outcomes = clean_all(jobs);

    // ─── 4) summarize ────────────────────────────────────────────────
    let processed = outcomes.iter().filter(|o| o.result.is_ok()).count();
    let failed = outcomes.len() - processed;
    info!("done: {} cleaned, {} failed", processed, failed);
    Ok(())
}
