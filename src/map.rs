//! Draws the world map, the home location and the ISS
use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::{
    canvas::{Align, Canvas, MarkerId, ShapeId, WorldBounds},
    model::Coordinate,
    open_notify::OpenNotifyClient,
};

pub const SCREEN_WIDTH: u32 = 720;
pub const SCREEN_HEIGHT: u32 = 360;

/// Pointing north
const ISS_HEADING: f64 = 90.0;
const HOME_DOT_SIZE: f64 = 5.0;
const HOME_DOT_COLOR: &str = "red";
const HOME_LABEL_COLOR: &str = "yellow";

/// Sets up the screen for longitude/latitude drawing over `world_map`.
/// Returns the shape to draw the ISS with.
pub fn create_map(
    canvas: &mut impl Canvas,
    world_map: &Path,
    iss_icon: &Path,
) -> anyhow::Result<ShapeId> {
    canvas.setup(SCREEN_WIDTH, SCREEN_HEIGHT);
    canvas
        .set_background(world_map)
        .context("Error loading the world map")?;
    canvas.set_world_coordinates(WorldBounds::GLOBE);

    let iss_shape = canvas
        .register_shape(iss_icon)
        .context("Error loading the ISS icon")?;

    Ok(iss_shape)
}

/// Marks `home` with a dot labelled with the next time the ISS rises over it
#[tracing::instrument(err, skip(canvas, client))]
pub async fn create_home_marker(
    canvas: &mut impl Canvas,
    client: &OpenNotifyClient,
    home: Coordinate,
) -> anyhow::Result<MarkerId> {
    let location = canvas.create_marker(None)?;
    canvas.goto(location, home.longitude, home.latitude)?;
    canvas.dot(home.longitude, home.latitude, HOME_DOT_SIZE, HOME_DOT_COLOR);
    canvas.hide(location)?;

    let next_pass = client
        .compute_rise_time(home)
        .await
        .context("Error computing the next rise time")?;

    info!("next pass over home: {next_pass}");

    canvas.write(
        home.longitude,
        home.latitude,
        &next_pass,
        HOME_LABEL_COLOR,
        Align::Center,
    );

    Ok(location)
}

/// Owns the canvas and the one ISS marker on it
pub struct IssTracker<'a, C: Canvas> {
    client: &'a OpenNotifyClient,
    canvas: C,
    iss: MarkerId,
    location: Coordinate,
}

impl<'a, C: Canvas> IssTracker<'a, C> {
    /// Places the ISS at its current position and renders the first frame
    #[tracing::instrument(err, skip(client, canvas))]
    pub async fn create(
        client: &'a OpenNotifyClient,
        mut canvas: C,
        iss_shape: ShapeId,
    ) -> anyhow::Result<Self> {
        let iss = canvas.create_marker(Some(iss_shape))?;
        canvas.set_heading(iss, ISS_HEADING)?;

        let location = client.get_iss_location().await?;

        let mut tracker = IssTracker {
            client,
            canvas,
            iss,
            location,
        };
        tracker.move_iss(location)?;

        Ok(tracker)
    }

    /// Fetches the current position and moves the ISS there
    #[tracing::instrument(err, skip(self))]
    pub async fn update(&mut self) -> anyhow::Result<Coordinate> {
        let location = self.client.get_iss_location().await?;
        self.move_iss(location)?;

        Ok(location)
    }

    pub fn location(&self) -> Coordinate {
        self.location
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    fn move_iss(&mut self, location: Coordinate) -> anyhow::Result<()> {
        self.canvas
            .goto(self.iss, location.longitude, location.latitude)?;
        self.canvas.render()?;
        self.location = location;

        info!(%location, "moved ISS");

        Ok(())
    }
}
