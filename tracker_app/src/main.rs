//! Multi-object tracker on a live video stream
//!
//! Usage:
//!   cargo run --release --features opencv -- [--source 0|<video>] [--algorithm CSRT]
//!
//! Draw one or more boxes in the selection window (ENTER/SPACE confirms a
//! box, ESC finishes the selection), then watch them being tracked.
//! Keys while tracking: ESC quits, `p` pauses/resumes.
use clap::Parser;
use opencv::core::Mat;
use tracker_app::cv::{CvCapture, CvTrackerFactory, CvWindow};
use tracker_app::{AppConfig, Cli, Result, Session, SessionOutcome};

fn run(cli: &Cli) -> Result<SessionOutcome> {
    let config = AppConfig::load(cli)?;
    log::info!(
        "multi-tracker {} using {} on {}",
        tracker_app::version(),
        config.algorithm,
        config.source
    );

    let mut capture = CvCapture::open(&config.source)?;
    let mut window = CvWindow::new(&config);
    let factory = CvTrackerFactory::new();

    let outcome = Session::<Mat>::new(config.session_settings(), &factory)
        .run(&mut capture, &mut window);
    log::info!(
        "Read {} frames from {}",
        capture.frames_read(),
        config.source
    );
    let closed = window.close();
    let outcome = outcome?;
    closed?;
    Ok(outcome)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if cli.list_algorithms {
        for name in tracker_app::algorithm_names() {
            println!("{}", name);
        }
        return;
    }

    match run(&cli) {
        Ok(outcome) => {
            if let Some(stats) = outcome.stats() {
                log::info!(
                    "Tracked {} frames | average {:.1} FPS ({:.1} ms/frame) | failures on {} frames",
                    stats.total_frames,
                    stats.average_fps(),
                    stats.average_frame_time_ms(),
                    stats.failure_frames
                );
            }
        }
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(e.exit_code());
        }
    }
}
