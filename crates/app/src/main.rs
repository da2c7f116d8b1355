mod mic;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use hero_motion_core::{
    AppConfig, Director, HostBindings, MotionGate, PixelCanvas, SmoothScroll, Stage,
    StageDescriptor, Timeline, Viewport,
};
use mic::CpalMicrophonePort;
use tracing_subscriber::EnvFilter;

/// Document height of the demo stage, one comfortable page below the last
/// stats row.
const DEMO_CONTENT_HEIGHT: f32 = 3400.0;

fn main() -> hero_motion_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Live {
            mic,
            seconds,
            scroll_to,
            reduced_motion,
        } => run_live(cli.config.as_deref(), mic, seconds, scroll_to, reduced_motion),
        Commands::Headless {
            frames,
            width,
            height,
            reduced_motion,
            output,
        } => run_headless(cli.config.as_deref(), frames, width, height, reduced_motion, output),
    }
}

fn run_live(
    config: Option<&std::path::Path>,
    mic: bool,
    seconds: f32,
    scroll_to: Option<f32>,
    reduced_motion: bool,
) -> hero_motion_core::Result<()> {
    tracing::info!(mic, seconds, "starting live mode");

    let mut director = build_director(config, 1280.0, 800.0, reduced_motion)?;
    let mut port = CpalMicrophonePort::new();
    if mic {
        director.toggle_audio(&mut port);
    }
    if let Some(target) = scroll_to {
        director.scrolled(target);
    }

    let start = Instant::now();
    let mut last = 0.0f64;
    let mut frames = 0u64;
    while start.elapsed().as_secs_f32() < seconds {
        let now = start.elapsed().as_secs_f64();
        director.frame(now, (now - last) as f32);
        last = now;
        frames += 1;
        std::thread::sleep(Duration::from_millis(16));
    }

    tracing::info!(frames, "live mode finished");
    Ok(())
}

fn run_headless(
    config: Option<&std::path::Path>,
    frames: u32,
    width: f32,
    height: f32,
    reduced_motion: bool,
    output: Option<PathBuf>,
) -> hero_motion_core::Result<()> {
    tracing::info!(frames, width, height, "running headless mode");

    let mut director = build_director(config, width, height, reduced_motion)?;
    let dt = 1.0 / 60.0;
    for frame in 0..frames {
        // Sweep the page top to bottom so scroll-bound rules get exercised.
        let progress = frame as f32 / frames.max(1) as f32;
        director.scrolled(progress * DEMO_CONTENT_HEIGHT);
        director.frame(frame as f64 * dt as f64, dt);
    }

    let snapshot = director.stage().to_json()?;
    match output {
        Some(path) => std::fs::write(path, snapshot)?,
        None => println!("{snapshot}"),
    }
    Ok(())
}

fn build_director(
    config: Option<&std::path::Path>,
    width: f32,
    height: f32,
    reduced_motion: bool,
) -> hero_motion_core::Result<Director> {
    let config = match config {
        Some(path) => AppConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => AppConfig::live_defaults(),
    };

    let gate = if reduced_motion {
        MotionGate::new(true)
    } else {
        MotionGate::from_probe(probe_reduced_motion)
    };

    let bindings = HostBindings {
        canvas: Some(Box::new(PixelCanvas::new(width as u32, height as u32))),
        timeline: Some(Box::new(Timeline::new())),
        scroll: Some(Box::new(SmoothScroll::new())),
    };

    Ok(Director::new(
        config,
        Stage::new(&StageDescriptor::portfolio_demo()),
        gate,
        Viewport::new(width, height, DEMO_CONTENT_HEIGHT),
        bindings,
    ))
}

/// Desktop stand-in for the OS reduced-motion query: an environment switch.
/// Absence of the variable means the capability is unavailable, which the
/// gate treats as full motion.
fn probe_reduced_motion() -> Option<bool> {
    std::env::var("HERO_MOTION_REDUCED")
        .ok()
        .map(|value| value != "0" && !value.is_empty())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Audio-reactive animated page backdrop", long_about = None)]
struct Cli {
    /// Optional JSON config overriding the built-in tuning.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the engine against real time at roughly 60 fps.
    Live {
        /// Opt into microphone-reactive particles at startup.
        #[arg(long)]
        mic: bool,
        /// How long to run before exiting.
        #[arg(long, default_value_t = 10.0)]
        seconds: f32,
        /// Scroll target to ease toward while running.
        #[arg(long)]
        scroll_to: Option<f32>,
        /// Force the reduced-motion path regardless of environment.
        #[arg(long)]
        reduced_motion: bool,
    },
    /// Step a fixed number of synthetic frames and emit a stage snapshot.
    Headless {
        #[arg(long, default_value_t = 600)]
        frames: u32,
        #[arg(long, default_value_t = 1280.0)]
        width: f32,
        #[arg(long, default_value_t = 800.0)]
        height: f32,
        /// Force the reduced-motion path regardless of environment.
        #[arg(long)]
        reduced_motion: bool,
        /// Write the JSON snapshot here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}
