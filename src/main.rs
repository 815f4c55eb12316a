//! Biosignal Analyzer CLI
//!
//! Heart-rate and signal analysis for wearable sensor recordings.

use biosignal_analyzer::{
    config::Config,
    core::{AnalysisSession, Channel, ReportBuilder},
    VERSION,
};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "biosignal")]
#[command(version = VERSION)]
#[command(about = "Heart-rate and signal analysis for wearable sensor recordings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show sampling details and statistics for one channel
    Summary {
        /// Recording file (.avro)
        file: PathBuf,

        /// Channel to summarise (pulse, temperature or eda)
        #[arg(long, short, default_value = "pulse")]
        channel: Channel,
    },

    /// Estimate heart rate from the pulse channel
    HeartRate {
        /// Recording file (.avro)
        file: PathBuf,

        /// Print the instantaneous rate for every beat instead of the mean
        #[arg(long)]
        series: bool,
    },

    /// Analyse every channel and export a JSON report
    Report {
        /// Recording file (.avro)
        file: PathBuf,

        /// Output file (defaults to the configured export directory)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Include the instantaneous heart-rate series
        #[arg(long)]
        series: bool,
    },

    /// Show configuration
    Config {
        /// Write the default configuration to the config file
        #[arg(long)]
        reset: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summary { file, channel } => {
            cmd_summary(&file, channel);
        }
        Commands::HeartRate { file, series } => {
            cmd_heart_rate(&file, series);
        }
        Commands::Report {
            file,
            output,
            series,
        } => {
            cmd_report(&file, output, series);
        }
        Commands::Config { reset } => {
            cmd_config(reset);
        }
    }
}

fn load_config() -> Config {
    match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load configuration, using defaults: {e}");
            Config::default()
        }
    }
}

fn open_session(file: &Path, config: &Config) -> AnalysisSession {
    match AnalysisSession::open(file, config.analysis.clone()) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: Could not read {file:?}: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_summary(file: &Path, channel: Channel) {
    let config = load_config();
    let session = open_session(file, &config);

    let data = match session.channel(channel) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    println!("{} Summary", channel.label());
    println!("============");
    println!();
    println!("  Samples: {}", data.len());
    println!("  Sampling frequency: {} Hz", data.sampling_frequency);
    println!("  Duration: {:.1}s", data.duration_secs());

    if channel == Channel::Pulse {
        if let Ok(classes) = session.pulse_classification() {
            println!(
                "  Signal: {} valid, {} lost ({:.1}% valid, threshold ±{})",
                classes.valid.len(),
                classes.lost.len(),
                classes.valid_fraction() * 100.0,
                config.analysis.lost_signal_threshold
            );
        }
    }

    match session.summary(channel) {
        Ok(stats) => {
            println!();
            println!("  Mean: {:.4}", stats.mean);
            println!("  Median: {:.4}", stats.median);
            println!("  Std dev: {:.4}", stats.std_dev);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_heart_rate(file: &Path, series: bool) {
    let config = load_config();
    let session = open_session(file, &config);

    if series {
        match session.heart_rate_series() {
            Ok(series) => {
                println!("{:>10}  {:>8}", "minutes", "bpm");
                for point in &series.points {
                    println!("{:>10.3}  {:>8.2}", point.minutes, point.bpm);
                }
                println!();
                if let Some(mean) = series.mean_bpm() {
                    println!("{} beats, average BPM: {mean:.2}", series.peaks.len());
                }
            }
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    } else {
        match session.heart_rate() {
            Ok(bpm) => println!("Average BPM: {bpm:.2}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }
}

fn cmd_report(file: &Path, output: Option<PathBuf>, series: bool) {
    let config = load_config();
    let session = open_session(file, &config);

    let report = ReportBuilder::new().with_series(series).build(&session);
    println!("{}", report.headline());

    let output_path = match output {
        Some(path) => path,
        None => {
            if let Err(e) = config.ensure_directories() {
                eprintln!("Warning: Could not create directories: {e}");
            }
            let stem = file
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "recording".to_string());
            config.export_path.join(format!(
                "report_{}_{}.json",
                stem,
                Utc::now().format("%Y%m%d_%H%M%S")
            ))
        }
    };

    let json = match serde_json::to_string_pretty(&report) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error serializing report: {e}");
            std::process::exit(1);
        }
    };

    match std::fs::write(&output_path, json) {
        Ok(_) => println!("Exported report to {output_path:?}"),
        Err(e) => {
            eprintln!("Error writing report: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_config(reset: bool) {
    let config = if reset {
        let config = Config::default();
        match config.save() {
            Ok(_) => println!("Configuration reset to defaults"),
            Err(e) => {
                eprintln!("Error saving configuration: {e}");
                std::process::exit(1);
            }
        }
        println!();
        config
    } else {
        load_config()
    };

    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", Config::config_path());
    println!();
    println!(
        "{}",
        serde_json::to_string_pretty(&config).unwrap_or_else(|_| "Error".to_string())
    );
}
