//! Turtle style drawing surface the map is rendered on
use std::path::{Path, PathBuf};

pub mod svg_canvas;

pub use svg_canvas::SvgCanvas;

/// Logical coordinate system of the screen, lower left to upper right
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub llx: f64,
    pub lly: f64,
    pub urx: f64,
    pub ury: f64,
}

impl WorldBounds {
    /// Longitude on x, latitude on y
    pub const GLOBE: WorldBounds = WorldBounds {
        llx: -180.0,
        lly: -90.0,
        urx: 180.0,
        ury: 90.0,
    };

    /// Maps a logical point to pixels on a `width` x `height` screen. Pixel y grows downwards.
    pub fn to_screen(&self, width: u32, height: u32, x: f64, y: f64) -> (f64, f64) {
        let px = (x - self.llx) / (self.urx - self.llx) * f64::from(width);
        let py = (self.ury - y) / (self.ury - self.lly) * f64::from(height);

        (px, py)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(pub(crate) usize);

pub trait Canvas {
    /// Sets the screen size in pixels
    fn setup(&mut self, width: u32, height: u32);

    fn set_background(&mut self, image: &Path) -> Result<(), CanvasError>;

    fn set_world_coordinates(&mut self, bounds: WorldBounds);

    /// Makes an image usable as a marker shape
    fn register_shape(&mut self, image: &Path) -> Result<ShapeId, CanvasError>;

    /// Creates a marker at the world origin. `None` draws the default arrow.
    fn create_marker(&mut self, shape: Option<ShapeId>) -> Result<MarkerId, CanvasError>;

    /// Heading in degrees, 0 is east and 90 is north
    fn set_heading(&mut self, marker: MarkerId, degrees: f64) -> Result<(), CanvasError>;

    fn goto(&mut self, marker: MarkerId, x: f64, y: f64) -> Result<(), CanvasError>;

    fn hide(&mut self, marker: MarkerId) -> Result<(), CanvasError>;

    /// Stamps a filled circle with a diameter of `size` pixels
    fn dot(&mut self, x: f64, y: f64, size: f64, color: &str);

    fn write(&mut self, x: f64, y: f64, text: &str, color: &str, align: Align);

    /// Flushes the current frame
    fn render(&mut self) -> Result<(), CanvasError>;
}

#[derive(thiserror::Error, Debug)]
pub enum CanvasError {
    #[error("couldn't load image {}", path.display())]
    Asset {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("unknown shape {0:?}")]
    UnknownShape(ShapeId),

    #[error("unknown marker {0:?}")]
    UnknownMarker(MarkerId),

    #[error("error writing frame")]
    Io(#[from] std::io::Error),
}
