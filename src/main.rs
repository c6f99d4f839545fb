use anyhow::{Context, Result};
use background_services::iss_updater::track_iss;
use canvas::SvgCanvas;
use config::Config;
use map::{IssTracker, create_home_marker, create_map};
use open_notify::OpenNotifyClient;
use report::{print_location, print_roster};
use std::io::{Write, stdout};
use tokio::{select, signal};
use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

mod background_services;
mod canvas;
mod config;
mod map;
mod model;
mod open_notify;
mod report;
mod utils;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let appender = tracing_appender::rolling::daily(&config.log_dir, "iss_tracker.log");
    let (non_blocking_appender, _guard) = tracing_appender::non_blocking(appender);

    // A layer that logs events to rolling files.
    let file_log = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_appender)
        .with_ansi(false)
        .pretty();

    Registry::default().with(file_log).with(env_filter).init();

    info!("API: {}", config.api_base_url);

    if let Err(e) = run(&config, &mut stdout().lock()).await {
        error!("{e:?}");
        return Err(e);
    }

    Ok(())
}

/// Prints the report, draws the map and keeps the ISS moving until Ctrl-C or a failure
async fn run(config: &Config, out: &mut impl Write) -> Result<()> {
    let client = OpenNotifyClient::new(&config.api_base_url);

    let people = client
        .get_astronauts()
        .await
        .context("Error fetching people in space")?;
    print_roster(out, &people)?;

    let location = client
        .get_iss_location()
        .await
        .context("Error fetching the ISS location")?;
    print_location(out, location)?;

    let mut canvas = SvgCanvas::new(&config.map_output);
    let iss_shape = create_map(&mut canvas, &config.world_map, &config.iss_icon)?;
    create_home_marker(&mut canvas, &client, config.home).await?;

    let mut tracker = IssTracker::create(&client, canvas, iss_shape).await?;

    writeln!(
        out,
        "\nDrawing the map to {}\npress Ctrl-C to exit ...",
        tracker.canvas().output().display()
    )?;
    out.flush()?;

    select! {
        res = track_iss(&mut tracker, config.update_interval) => {
            res.context("Error updating the ISS location")?;
        }
        res = signal::ctrl_c() => {
            res.context("Error waiting for Ctrl-C")?;
        }
    }

    info!("exiting, ISS last seen at {}", tracker.location());

    Ok(())
}
