use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use super::{Align, Canvas, CanvasError, MarkerId, ShapeId, WorldBounds};

const DEFAULT_WIDTH: u32 = 400;
const DEFAULT_HEIGHT: u32 = 300;
const FONT_SIZE: u32 = 8;

/// Arrow drawn for markers without a registered shape, pointing east
const ARROW: &str = "-5,-4 5,0 -5,4 -2,0";

#[derive(Debug, Clone)]
struct Shape {
    image: PathBuf,
    width: u32,
    height: u32,
}

#[derive(Debug, Clone)]
struct Marker {
    shape: Option<ShapeId>,
    x: f64,
    y: f64,
    heading: f64,
    visible: bool,
}

/// Things left behind on the screen by `dot` and `write`
#[derive(Debug, Clone)]
enum Stamp {
    Dot {
        x: f64,
        y: f64,
        size: f64,
        color: String,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        color: String,
        align: Align,
    },
}

/// Canvas that writes every rendered frame to an SVG file.
///
/// Images are referenced by path, not embedded. Image shapes keep their orientation, only the
/// default arrow turns with the heading.
#[derive(Debug)]
pub struct SvgCanvas {
    output: PathBuf,
    width: u32,
    height: u32,
    bounds: WorldBounds,
    background: Option<PathBuf>,
    shapes: Vec<Shape>,
    markers: Vec<Marker>,
    stamps: Vec<Stamp>,
}

impl SvgCanvas {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        SvgCanvas {
            output: output.into(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            bounds: WorldBounds {
                llx: -f64::from(DEFAULT_WIDTH) / 2.0,
                lly: -f64::from(DEFAULT_HEIGHT) / 2.0,
                urx: f64::from(DEFAULT_WIDTH) / 2.0,
                ury: f64::from(DEFAULT_HEIGHT) / 2.0,
            },
            background: None,
            shapes: vec![],
            markers: vec![],
            stamps: vec![],
        }
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// The SVG document for the current state
    pub fn frame(&self) -> String {
        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
            w = self.width,
            h = self.height
        );

        if let Some(background) = &self.background {
            svg.push_str(&format!(
                "  <image href=\"{}\" x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"none\"/>\n",
                escape(&background.display().to_string()),
                self.width,
                self.height
            ));
        }

        for stamp in &self.stamps {
            match stamp {
                Stamp::Dot { x, y, size, color } => {
                    let (cx, cy) = self.to_screen(*x, *y);
                    svg.push_str(&format!(
                        "  <circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{:.2}\" fill=\"{}\"/>\n",
                        size / 2.0,
                        escape(color)
                    ));
                }
                Stamp::Text {
                    x,
                    y,
                    text,
                    color,
                    align,
                } => {
                    let (tx, ty) = self.to_screen(*x, *y);
                    let anchor = match align {
                        Align::Left => "start",
                        Align::Center => "middle",
                        Align::Right => "end",
                    };
                    svg.push_str(&format!(
                        "  <text x=\"{tx:.2}\" y=\"{ty:.2}\" fill=\"{}\" text-anchor=\"{anchor}\" font-family=\"Arial\" font-size=\"{FONT_SIZE}\">{}</text>\n",
                        escape(color),
                        escape(text)
                    ));
                }
            }
        }

        for marker in self.markers.iter().filter(|m| m.visible) {
            let (mx, my) = self.to_screen(marker.x, marker.y);
            match marker.shape.and_then(|s| self.shapes.get(s.0)) {
                Some(shape) => svg.push_str(&format!(
                    "  <image href=\"{}\" x=\"{:.2}\" y=\"{:.2}\" width=\"{}\" height=\"{}\"/>\n",
                    escape(&shape.image.display().to_string()),
                    mx - f64::from(shape.width) / 2.0,
                    my - f64::from(shape.height) / 2.0,
                    shape.width,
                    shape.height
                )),
                None => svg.push_str(&format!(
                    "  <polygon points=\"{ARROW}\" fill=\"black\" transform=\"translate({mx:.2} {my:.2}) rotate({:.2})\"/>\n",
                    -marker.heading
                )),
            }
        }

        svg.push_str("</svg>\n");
        svg
    }

    fn to_screen(&self, x: f64, y: f64) -> (f64, f64) {
        self.bounds.to_screen(self.width, self.height, x, y)
    }

    fn marker_mut(&mut self, marker: MarkerId) -> Result<&mut Marker, CanvasError> {
        self.markers
            .get_mut(marker.0)
            .ok_or(CanvasError::UnknownMarker(marker))
    }
}

impl Canvas for SvgCanvas {
    fn setup(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn set_background(&mut self, image: &Path) -> Result<(), CanvasError> {
        let (width, height) = dimensions(image)?;
        debug!("background {} is {width}x{height}", image.display());

        self.background = Some(image.to_path_buf());
        Ok(())
    }

    fn set_world_coordinates(&mut self, bounds: WorldBounds) {
        self.bounds = bounds;
    }

    fn register_shape(&mut self, image: &Path) -> Result<ShapeId, CanvasError> {
        let (width, height) = dimensions(image)?;

        self.shapes.push(Shape {
            image: image.to_path_buf(),
            width,
            height,
        });

        Ok(ShapeId(self.shapes.len() - 1))
    }

    fn create_marker(&mut self, shape: Option<ShapeId>) -> Result<MarkerId, CanvasError> {
        if let Some(shape) = shape {
            if shape.0 >= self.shapes.len() {
                return Err(CanvasError::UnknownShape(shape));
            }
        }

        self.markers.push(Marker {
            shape,
            x: 0.0,
            y: 0.0,
            heading: 0.0,
            visible: true,
        });

        Ok(MarkerId(self.markers.len() - 1))
    }

    fn set_heading(&mut self, marker: MarkerId, degrees: f64) -> Result<(), CanvasError> {
        self.marker_mut(marker)?.heading = degrees.rem_euclid(360.0);
        Ok(())
    }

    fn goto(&mut self, marker: MarkerId, x: f64, y: f64) -> Result<(), CanvasError> {
        let marker = self.marker_mut(marker)?;
        marker.x = x;
        marker.y = y;
        Ok(())
    }

    fn hide(&mut self, marker: MarkerId) -> Result<(), CanvasError> {
        self.marker_mut(marker)?.visible = false;
        Ok(())
    }

    fn dot(&mut self, x: f64, y: f64, size: f64, color: &str) {
        self.stamps.push(Stamp::Dot {
            x,
            y,
            size,
            color: color.to_string(),
        });
    }

    fn write(&mut self, x: f64, y: f64, text: &str, color: &str, align: Align) {
        self.stamps.push(Stamp::Text {
            x,
            y,
            text: text.to_string(),
            color: color.to_string(),
            align,
        });
    }

    #[tracing::instrument(err, skip(self), fields(output = %self.output.display()))]
    fn render(&mut self) -> Result<(), CanvasError> {
        let frame = self.frame();

        // Write then rename so viewers never pick up half a frame
        let tmp = self.output.with_extension("svg.tmp");
        fs::write(&tmp, frame)?;
        fs::rename(&tmp, &self.output)?;

        info!("rendered frame");
        Ok(())
    }
}

fn dimensions(image: &Path) -> Result<(u32, u32), CanvasError> {
    image::image_dimensions(image).map_err(|source| CanvasError::Asset {
        path: image.to_path_buf(),
        source,
    })
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
