use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser};
use fieldpath_core::trajectory::defaults::{default_lines, default_shapes, default_start_point};
use fieldpath_core::{PathError, PlaybackController, Settings, TrajectoryDocument, NAME, VERSION};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Check a field trajectory for collisions and optionally optimize it
#[derive(Debug, Parser)]
#[command(name = "path_check", version)]
struct Args {
    /// Trajectory JSON file; the built-in default trajectory is used if omitted
    trajectory: Option<PathBuf>,

    /// Smooth control points after a successful collision check
    #[arg(long)]
    optimize: bool,

    /// Write the (optimized) trajectory to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override a setting, e.g. `--set robot_width=12`
    #[arg(long = "set", value_name = "KEY=VALUE")]
    overrides: Vec<String>,

    /// Number of playback frames to print
    #[arg(long, default_value_t = 0)]
    frames: usize,

    /// Playback position to start from, 0 to 100
    #[arg(long, default_value_t = 0.0)]
    start_percent: f64,

    /// Frame period in milliseconds
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

fn parse_overrides(raw: &[String]) -> Result<HashMap<String, f64>> {
    let mut params = HashMap::new();
    for entry in raw {
        let (key, value) = entry
            .split_once('=')
            .ok_or_else(|| anyhow!("expected KEY=VALUE, got '{}'", entry))?;
        let value: f64 = value
            .trim()
            .parse()
            .with_context(|| format!("invalid number for '{}'", key))?;
        params.insert(key.trim().to_string(), value);
    }
    Ok(params)
}

fn load_document(path: Option<&PathBuf>) -> Result<TrajectoryDocument> {
    let Some(path) = path else {
        info!("No trajectory given, using the default field layout");
        return Ok(TrajectoryDocument {
            start_point: default_start_point(),
            lines: default_lines(),
            shapes: default_shapes(),
            settings: Settings::default(),
        });
    };

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let document = TrajectoryDocument::from_json(&json)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    info!(
        "Loaded {} segments and {} obstacles from {}",
        document.lines.len(),
        document.shapes.len(),
        path.display()
    );
    Ok(document)
}

async fn play(
    document: &TrajectoryDocument,
    start_percent: f64,
    frames: usize,
    period: Duration,
) -> Result<()> {
    let mut controller = PlaybackController::new(document.lines.len());
    controller.set_percent(start_percent);
    controller.play();

    let mut ticker = tokio::time::interval(period);
    ticker.tick().await;
    for frame in 0..frames {
        let pose = controller.sample(&document.lines, &document.start_point)?;
        println!(
            "frame {:>4}  {:>6.2}%  x={:>7.2}  y={:>7.2}  heading={:>7.2}",
            frame,
            controller.percent(),
            pose.x,
            pose.y,
            pose.heading
        );
        ticker.tick().await;
        controller.tick(period);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    info!("{} {}", NAME, VERSION);

    let mut document = load_document(args.trajectory.as_ref())?;
    let params = parse_overrides(&args.overrides)?;
    if !params.is_empty() {
        document
            .settings
            .configure(&params)
            .context("Invalid setting override")?;
    }

    let checked = if args.optimize {
        document.optimize()
    } else {
        document.validate().map(|_| document.clone())
    };

    let document = match checked {
        Ok(document) => {
            info!("Trajectory is clear of obstacles and field walls");
            document
        }
        Err(err) => {
            if let Some((x, y)) = err.location() {
                error!(segment = ?err.segment(), x, y, "{}", err);
            } else {
                error!("{}", err);
            }
            return Err(match err {
                PathError::CollisionDetected { .. } | PathError::BoundsViolation { .. } => {
                    anyhow!("trajectory check failed")
                }
                other => other.into(),
            });
        }
    };

    if let Some(output) = &args.output {
        std::fs::write(output, document.to_json()?)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        info!("Wrote {}", output.display());
    }

    if args.frames > 0 {
        let period = Duration::from_millis(args.frame_ms.max(1));
        play(&document, args.start_percent, args.frames, period).await?;
    }

    Ok(())
}
