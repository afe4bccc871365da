//! Plays the Showreel intro in a terminal. Ctrl-C skips to the end.

use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use showreel_content::catalog::load_scenes_file;
use showreel_content::intro::default_intro;
use showreel_core::clock::SystemClock;
use showreel_sequencer::application::driver::SequencerDriver;
use showreel_sequencer::application::render::render_on_change;
use tracing_subscriber::EnvFilter;

mod terminal;

use terminal::{LogNavigator, TerminalRenderer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .compact()
        .init();

    let catalog = match std::env::var("SHOWREEL_SCENES") {
        Ok(path) if !path.trim().is_empty() => load_scenes_file(Path::new(&path))?,
        _ => default_intro(),
    };
    let scenes = catalog.into_scenes();
    tracing::info!(
        scenes = scenes.len(),
        total_ms = scenes.total_duration().as_millis(),
        "playing intro"
    );

    let (mut driver, mut handle) = SequencerDriver::new(
        scenes,
        Box::new(LogNavigator::new("/")),
        Arc::new(SystemClock),
    );
    driver.subscribe(render_on_change(TerminalRenderer::new(std::io::stdout())));
    let driver_task = driver.spawn();

    let skipper = handle.clone();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("skip requested");
            skipper.skip();
        }
    });

    let final_state = handle.wait_until_finished().await;
    tracing::debug!(?final_state, "intro finished");

    ctrl_c.abort();
    drop(handle);
    driver_task.await?;

    Ok(())
}
