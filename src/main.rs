use clap::Parser;
use colored::Colorize;
use mp3_frames::report::{self, FileReport, Summary};
use mp3_frames::{AnalyzerConfig, FrameAnalyzer};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Count MPEG-1 Layer III frames in MP3 files
#[derive(Parser, Debug)]
#[command(name = "mp3-frames", version, about)]
struct Cli {
    /// Files to analyze
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read size in bytes (overrides config)
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Sliding window size in bytes (overrides config)
    #[arg(long)]
    window: Option<usize>,

    /// Write a report; format by extension (.json, otherwise CSV)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the JSON report to stdout instead of the table
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "mp3_frames=debug"
    } else {
        "mp3_frames=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = run(&cli);
    if let Err(e) = &result {
        eprintln!("{} {}", "error:".red().bold(), e);
    }
    ExitCode::from(exit_status(&result))
}

/// 0 when every file was analyzed, 1 when any file failed or the run aborted
fn exit_status(result: &mp3_frames::Result<Summary>) -> u8 {
    match result {
        Ok(summary) if summary.failed == 0 => 0,
        _ => 1,
    }
}

fn run(cli: &Cli) -> mp3_frames::Result<Summary> {
    let config = load_config(cli)?;
    debug!(?config, "effective config");

    let results: Vec<FileReport> = cli
        .paths
        .iter()
        .map(|path| analyze_file(path, &config))
        .collect();

    if cli.json {
        let stdout = std::io::stdout();
        report::json::write(&mut stdout.lock(), &results)?;
    } else {
        print_table(&results);
    }

    if let Some(output) = &cli.output {
        report::generate(output, &results)?;
        eprintln!("Report written to {}", output.display());
    }

    Ok(Summary::from_results(&results))
}

fn load_config(cli: &Cli) -> mp3_frames::Result<AnalyzerConfig> {
    let mut config = match &cli.config {
        Some(path) => AnalyzerConfig::load(path)?,
        None => AnalyzerConfig::default(),
    };
    if let Some(chunk_size) = cli.chunk_size {
        config.chunk_size = chunk_size;
    }
    if let Some(window) = cli.window {
        config.window_capacity = window;
    }
    config.validate()?;
    Ok(config)
}

fn analyze_file(path: &Path, config: &AnalyzerConfig) -> FileReport {
    let outcome = std::fs::File::open(path).and_then(|mut file| {
        FrameAnalyzer::from_config(config).consume_reader(&mut file, config.chunk_size)
    });

    match outcome {
        Ok(analysis) => FileReport::from_analysis(path, analysis),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "analysis failed");
            FileReport::failed(path, e)
        }
    }
}

fn print_table(results: &[FileReport]) {
    for r in results {
        match &r.error {
            Some(error) => println!(
                "{:>10}  {}  {}",
                "ERROR".red().bold(),
                r.file_path,
                error.as_str().dimmed()
            ),
            None => {
                let frames = r.frame_count.to_string();
                let frames = if r.frame_count == 0 {
                    frames.yellow()
                } else {
                    frames.green()
                };
                println!("{:>10}  {}", frames, r.file_path);
            }
        }
    }

    let summary = Summary::from_results(results);
    println!();
    println!(
        "{} files, {} analyzed, {} failed, {} frames total",
        summary.total.to_string().bold(),
        summary.analyzed,
        if summary.failed > 0 {
            summary.failed.to_string().red()
        } else {
            summary.failed.to_string().normal()
        },
        summary.frames.to_string().bold()
    );
}
