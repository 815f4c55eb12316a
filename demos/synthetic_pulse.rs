//! Demonstration of the analysis pipeline on a synthetic recording.
//!
//! This example shows how to:
//! 1. Build a recording with pulse, temperature and EDA channels
//! 2. Open an analysis session over it
//! 3. Classify pulse samples and summarise each channel
//! 4. Estimate heart rate, as a mean and as a series
//! 5. Generate a JSON report
//!
//! Run with: cargo run --example synthetic_pulse

use std::f64::consts::PI;

use biosignal_analyzer::{
    config::AnalysisConfig,
    container::{Datum, Recording},
    core::{AnalysisSession, Channel, ReportBuilder},
};

const PULSE_HZ: f64 = 64.0;
const BEATS_PER_MINUTE: f64 = 72.0;
const DURATION_SECS: f64 = 60.0;

fn channel(sampling_frequency: f64, values: &[f64]) -> Datum {
    Datum::group([
        ("samplingFrequency", Datum::Number(sampling_frequency)),
        ("values", Datum::numbers(values)),
    ])
}

fn synthetic_recording() -> Recording {
    let beat_hz = BEATS_PER_MINUTE / 60.0;
    let n = (PULSE_HZ * DURATION_SECS) as usize;

    // A slow baseline drift under the beat, and a dropout in the middle
    let pulse: Vec<f64> = (0..n)
        .map(|i| {
            let t = i as f64 / PULSE_HZ;
            if (30.0..31.0).contains(&t) {
                0.0
            } else {
                (2.0 * PI * beat_hz * t).sin() + 0.3 * (2.0 * PI * 0.05 * t).sin()
            }
        })
        .collect();

    let temperature: Vec<f64> = (0..DURATION_SECS as usize)
        .map(|i| 33.0 + 0.01 * i as f64)
        .collect();

    let eda: Vec<f64> = (0..(4.0 * DURATION_SECS) as usize)
        .map(|i| 0.4 + 0.05 * (i as f64 / 40.0).sin())
        .collect();

    let record = Datum::group([(
        "rawData",
        Datum::group([
            ("bvp", channel(PULSE_HZ, &pulse)),
            ("temperature", channel(1.0, &temperature)),
            ("eda", channel(4.0, &eda)),
        ]),
    )]);

    Recording::new(vec![record])
}

fn main() {
    println!("Biosignal Analyzer - Synthetic Pulse Demo");
    println!("=========================================");
    println!();
    println!(
        "Generating {DURATION_SECS}s of pulse at {PULSE_HZ} Hz, {BEATS_PER_MINUTE} beats per minute"
    );
    println!();

    let session = AnalysisSession::from_recording(synthetic_recording(), AnalysisConfig::default());

    match session.pulse_classification() {
        Ok(classes) => println!(
            "Pulse signal: {} valid, {} lost ({:.1}% valid)",
            classes.valid.len(),
            classes.lost.len(),
            classes.valid_fraction() * 100.0
        ),
        Err(e) => println!("Pulse signal: {e}"),
    }
    println!();

    for channel in Channel::ALL {
        match session.summary(channel) {
            Ok(stats) => println!(
                "  {:<12} mean {:>8.4}  median {:>8.4}  std dev {:>8.4}  (n = {})",
                channel.label(),
                stats.mean,
                stats.median,
                stats.std_dev,
                stats.count
            ),
            Err(e) => println!("  {:<12} {e}", channel.label()),
        }
    }
    println!();

    match session.heart_rate() {
        Ok(bpm) => println!("Average BPM: {bpm:.2}"),
        Err(e) => println!("Heart rate unavailable: {e}"),
    }

    if let Ok(series) = session.heart_rate_series() {
        println!("First beats:");
        for point in series.points.iter().take(5) {
            println!("  {:>6.3} min  {:>6.2} bpm", point.minutes, point.bpm);
        }
    }
    println!();

    println!("Report:");
    match ReportBuilder::new()
        .with_source_name("synthetic")
        .build_json(&session)
    {
        Ok(json) => println!("{json}"),
        Err(e) => println!("Could not serialize report: {e}"),
    }
}
