//! Kagami - Landmark to rig-parameter solver
//!
//! CLI entry point: reads landmark frames as JSON Lines, solves them, and
//! writes the resulting face/pose parameters as JSON Lines.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kagami::{config::Config, face, pose, Face, KagamiError, LandmarkSet, Pose};

/// Kagami - MediaPipe landmark to rig-parameter solver
#[derive(Parser, Debug)]
#[command(name = "kagami", version, about, long_about = None)]
struct Args {
    /// Input file with one JSON frame per line ("-" for stdin)
    #[arg(default_value = "-")]
    input: String,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretty-print each output record
    #[arg(long)]
    pretty: bool,
}

/// One input frame: either or both landmark sets may be present.
#[derive(Debug, Deserialize)]
struct Frame {
    #[serde(default)]
    face: Option<LandmarkSet>,
    #[serde(default)]
    pose: Option<LandmarkSet>,
}

/// Solved parameters for one frame.
#[derive(Debug, Serialize)]
struct Solved {
    #[serde(skip_serializing_if = "Option::is_none")]
    face: Option<Face>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pose: Option<Pose>,
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), KagamiError> {
    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };

    let reader: Box<dyn BufRead> = if args.input == "-" {
        Box::new(BufReader::new(std::io::stdin()))
    } else {
        Box::new(BufReader::new(std::fs::File::open(&args.input)?))
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let frame: Frame = match serde_json::from_str(&line) {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Skipping line {}: invalid frame: {}", line_no + 1, e);
                continue;
            }
        };

        let solved = solve_frame(&frame, &config, line_no + 1);

        let json = if args.pretty {
            serde_json::to_string_pretty(&solved)?
        } else {
            serde_json::to_string(&solved)?
        };
        writeln!(out, "{}", json)?;
    }

    Ok(())
}

fn solve_frame(frame: &Frame, config: &Config, line_no: usize) -> Solved {
    let face = frame.face.as_ref().and_then(|landmarks| {
        match face::solve(landmarks, &config.face) {
            Ok(face) => Some(face),
            Err(e) => {
                warn!("Line {}: face solve failed: {}", line_no, e);
                None
            }
        }
    });

    let pose = frame
        .pose
        .as_ref()
        .and_then(|landmarks| match pose::solve(landmarks) {
            Ok(pose) => Some(pose),
            Err(e) => {
                warn!("Line {}: pose solve failed: {}", line_no, e);
                None
            }
        });

    debug!(
        "Line {}: face={} pose={}",
        line_no,
        face.is_some(),
        pose.is_some()
    );

    Solved { face, pose }
}
