//! Raysense CLI
//!
//! Command-line demo of the sensing pipeline. Runs against the synthetic
//! mock window source and renders each observation as labelled ASCII
//! distance bars.

use clap::Parser;
use raysense::{
    capture::{FileConfig, MockWindowSource},
    sensing::Observation,
    sensor::{DistanceSensor, SensorError},
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Command-line options.
#[derive(Debug, Parser)]
#[command(name = "raysense", version, about = "Screen raycasting distance sensor demo")]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Window title to capture (overrides the config file).
    #[arg(long)]
    window: Option<String>,
    /// Number of rays in the observation (overrides the config file).
    #[arg(long)]
    rays: Option<usize>,
    /// Number of frames to process (overrides the config file).
    #[arg(long)]
    frames: Option<u32>,
    /// Run until interrupted with Ctrl-C.
    #[arg(long)]
    continuous: bool,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match FileConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Invalid configuration: {}", e);
                std::process::exit(1);
            }
        },
        None => FileConfig::default(),
    };
    if let Some(window) = args.window {
        config.capture.window_title = window;
    }
    if let Some(rays) = args.rays {
        config.sensing.n_rays = rays;
    }
    if let Some(frames) = args.frames {
        config.output.frame_count = frames;
    }
    if args.continuous {
        config.output.continuous = true;
    }
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    info!("raysense v{}", raysense::VERSION);
    info!(
        "Capturing window '{}' with {} rays (mock backend)",
        config.capture.window_title, config.sensing.n_rays
    );

    let source = MockWindowSource::new(config.capture.window_title.clone());
    let mut sensor = DistanceSensor::with_config(source, &config);

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = Arc::clone(&running);
        if let Err(e) = ctrlc::set_handler(move || running.store(false, Ordering::SeqCst)) {
            warn!("Failed to install Ctrl-C handler: {}", e);
        }
    }

    let mut frame = 0u32;
    while running.load(Ordering::SeqCst)
        && (config.output.continuous || frame < config.output.frame_count)
    {
        frame += 1;
        match sensor.observe() {
            Ok(observation) => print_distance_bars(frame, &observation),
            Err(SensorError::Capture(e)) => {
                eprintln!("Capture failed: {}", e);
                std::process::exit(1);
            }
            Err(SensorError::Frame(e)) => {
                eprintln!("Bad frame: {}", e);
                std::process::exit(1);
            }
        }

        if config.output.continuous {
            std::thread::sleep(Duration::from_millis(100));
        }
    }

    info!("Processed {} frames", frame);
}

/// Renders one observation as labelled ASCII bars, near obstacles first
/// flagged as danger, then close, then ok.
fn print_distance_bars(frame: u32, observation: &Observation) {
    const WIDTH: usize = 40;

    println!("frame {}", frame);
    let n = observation.len();
    for (i, value) in observation.values().iter().enumerate() {
        let filled = (value.clamp(0.0, 1.0) * WIDTH as f32) as usize;
        let bar = format!("{}{}", "#".repeat(filled), "-".repeat(WIDTH - filled));

        let label = if i == 0 {
            "LEFT".to_string()
        } else if i == n - 1 {
            "RIGHT".to_string()
        } else if i == n / 2 {
            "CENTER".to_string()
        } else {
            format!("ray {:02}", i)
        };
        let status = if *value < 0.1 {
            "DANGER"
        } else if *value < 0.3 {
            "close"
        } else {
            "ok"
        };
        println!("{:>6} | {} | {:.3} {}", label, bar, value, status);
    }
    println!(
        "   min {:.3}  max {:.3}  mean {:.3}",
        observation.min(),
        observation.max(),
        observation.mean()
    );
}
