use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::bounded;
use rakaat_tracker::replay;
use rakaat_tracker::{RakaatTracker, TrackerConfig, TrackerEvent};

#[derive(Parser, Debug)]
#[command(name = "rakaat-tracker", about = "Count prayer cycles from a landmark stream")]
struct Args {
    /// JSON-lines landmark recording; reads stdin when omitted
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// TOML file with classifier thresholds and stability tuning
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the default config to PATH and exit
    #[arg(long, value_name = "PATH")]
    write_default_config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(path) = args.write_default_config {
        TrackerConfig::default()
            .save(&path)
            .with_context(|| format!("cannot write config to {}", path.display()))?;
        println!("default config written to {}", path.display());
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => TrackerConfig::load(path)
            .with_context(|| format!("cannot load config from {}", path.display()))?,
        None => TrackerConfig::default(),
    };
    let mut tracker = RakaatTracker::new(config)?;

    let reader = replay::open_source(args.input.as_deref())?;
    let (frame_tx, frame_rx) = bounded(1);
    let source = replay::start_replay(reader, frame_tx);

    let mut frames = 0u64;
    let mut transitions = 0u64;
    for frame in frame_rx {
        frames += 1;
        for event in tracker.process_frame(&frame) {
            match event {
                TrackerEvent::PostureChanged { previous, current } => {
                    transitions += 1;
                    log::info!(
                        "posture: {} -> {} ({})",
                        previous.as_str(),
                        current.as_str(),
                        current.display_name(),
                    );
                }
                TrackerEvent::RakaatCompleted { count } => {
                    log::info!("rakaat {count} complete");
                }
            }
        }
    }

    if source.join().is_err() {
        log::warn!("frame source worker panicked");
    }

    println!(
        "{frames} frames, {transitions} confirmed transitions, {} rakaat",
        tracker.completed_cycles()
    );
    Ok(())
}
