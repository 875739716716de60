use tracing_subscriber::EnvFilter;

use spinball_core::SpinballConfig;
use spinball_sim::{HeadlessRunner, RunError, RunOptions};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = run() {
        eprintln!("spinball-sim: {e}");
        std::process::exit(2);
    }
}

fn run() -> Result<(), RunError> {
    let options = RunOptions::parse(std::env::args().skip(1))?;
    let config = SpinballConfig::load();
    let json = options.json;

    tracing::info!(
        frames = options.frames,
        fps = options.fps,
        seed = ?options.seed,
        "spinball headless run starting"
    );

    let mut runner = HeadlessRunner::new(&config, options)?;
    let summary = runner.run()?;

    if json {
        let line = serde_json::to_string(&summary)
            .map_err(|e| RunError::Output(e.to_string()))?;
        println!("{line}");
    } else {
        println!(
            "{} frames, {} bounces, {} respawns",
            summary.frames, summary.bounces, summary.respawns
        );
        println!("{}", summary.stats);
    }
    Ok(())
}
