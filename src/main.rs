use std::io::{self, Write};

use anyhow::Context;

use rigsim::rig;
use rigsim::settings::PlaybackSettings;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Optional settings file as the first argument
    let args: Vec<String> = std::env::args().collect();
    let settings = match args.get(1) {
        Some(path) => PlaybackSettings::load_from(path)
            .with_context(|| format!("failed to load settings from '{}'", path))?,
        None => PlaybackSettings::load(),
    };

    let mut playback = rig::build(&settings).context("failed to build rig")?;
    playback.start()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for _ in 0..settings.tick_count {
        playback
            .tick(settings.tick_delta)
            .with_context(|| format!("tick failed at t={}", playback.clock()))?;

        if settings.emit_snapshots {
            serde_json::to_writer(&mut out, &playback.snapshot())?;
            writeln!(out)?;
        }
    }

    playback.stop()?;
    log::info!("played {} ticks, clock at {}", settings.tick_count, playback.clock());

    Ok(())
}
