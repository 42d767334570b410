use kurbo::{BezPath, Point};

use crate::compose::layers::{Layer, LayerSelection};
use crate::foundation::color::Color;
use crate::foundation::geo::{GeoBounds, LatLng};
use crate::geodata::classify::classify_edges;
use crate::geodata::model::{Feature, FeatureCollection, FeatureKind};
use crate::geodata::provider::LayerData;
use crate::theme::model::Theme;

/// Stroke width in points for transit lines.
const SUBWAY_STROKE_WIDTH_PT: f64 = 0.6;

/// Linear map from a geographic extent onto the pixel canvas.
///
/// North is up: latitude decreases with increasing pixel `y`.
#[derive(Clone, Copy, Debug)]
pub struct Projector {
    extent: GeoBounds,
    width_px: f64,
    height_px: f64,
}

impl Projector {
    /// Projector for `extent` onto a canvas of `(width, height)` pixels.
    pub fn new(extent: GeoBounds, canvas_px: (u32, u32)) -> Self {
        Self {
            extent,
            width_px: f64::from(canvas_px.0),
            height_px: f64::from(canvas_px.1),
        }
    }

    /// Canvas position of a geographic point.
    pub fn project(&self, p: LatLng) -> Point {
        let x = (p.lng - self.extent.west) / self.extent.width() * self.width_px;
        let y = (self.extent.north - p.lat) / self.extent.height() * self.height_px;
        Point::new(x, y)
    }
}

/// A filled shape in canvas space.
#[derive(Clone, Debug)]
pub struct FillShape {
    /// Closed outline.
    pub path: BezPath,
    /// Fill color.
    pub color: Color,
}

/// A stroked shape in canvas space.
#[derive(Clone, Debug)]
pub struct StrokeShape {
    /// Open or closed path.
    pub path: BezPath,
    /// Stroke color.
    pub color: Color,
    /// Stroke width in points (scaled to pixels by the rasterizer).
    pub width_pt: f64,
}

/// The z-ordered drawable content of one poster, before overlay and
/// post-processing.
///
/// Draw order is fixed: background, then `fills` in order (water below
/// parks), then `strokes` in order (transit below roads).
#[derive(Clone, Debug)]
pub struct PosterScene {
    /// Canvas width in pixels.
    pub width_px: u32,
    /// Canvas height in pixels.
    pub height_px: u32,
    /// Full-frame background color.
    pub background: Color,
    /// Filled polygon layers, bottom first.
    pub fills: Vec<FillShape>,
    /// Stroked line layers, bottom first.
    pub strokes: Vec<StrokeShape>,
}

/// Compose the selected layers into a z-ordered scene.
///
/// Layers whose data is absent or empty are skipped without error; missing
/// data for an unavailable layer is not a failure condition.
pub fn build_scene(
    data: &LayerData,
    selection: &LayerSelection,
    theme: &Theme,
    extent: GeoBounds,
    canvas_px: (u32, u32),
) -> PosterScene {
    let projector = Projector::new(extent, canvas_px);
    let mut fills = Vec::new();
    let mut strokes = Vec::new();

    if selection.contains(Layer::Water) {
        push_polygon_fills(&mut fills, data.water.as_ref(), theme.water, &projector);
    }
    if selection.contains(Layer::Parks) {
        push_polygon_fills(&mut fills, data.parks.as_ref(), theme.parks, &projector);
    }

    if selection.contains(Layer::Subway)
        && let Some(subway) = data.subway.as_ref()
    {
        for feature in &subway.features {
            let Some(path) = feature_path(feature, &projector) else {
                continue;
            };
            strokes.push(StrokeShape {
                path,
                color: theme.subway_color(),
                width_pt: SUBWAY_STROKE_WIDTH_PT,
            });
        }
    }

    if selection.contains(Layer::Roads)
        && let Some(roads) = data.roads.as_ref()
    {
        let (colors, widths) = classify_edges(roads, theme);
        for (i, edge) in roads.edges.iter().enumerate() {
            let Some(path) = polyline_path(&edge.points, &projector, false) else {
                continue;
            };
            strokes.push(StrokeShape {
                path,
                color: colors[i],
                width_pt: widths[i],
            });
        }
    }

    PosterScene {
        width_px: canvas_px.0,
        height_px: canvas_px.1,
        background: theme.bg,
        fills,
        strokes,
    }
}

fn push_polygon_fills(
    fills: &mut Vec<FillShape>,
    collection: Option<&FeatureCollection>,
    color: Color,
    projector: &Projector,
) {
    let Some(collection) = collection else {
        return;
    };
    for feature in &collection.features {
        // Area layers draw polygons only; stray line features carry no area.
        if feature.kind != FeatureKind::Polygon {
            continue;
        }
        let Some(path) = polyline_path(&feature.points, projector, true) else {
            continue;
        };
        fills.push(FillShape { path, color });
    }
}

fn feature_path(feature: &Feature, projector: &Projector) -> Option<BezPath> {
    polyline_path(
        &feature.points,
        projector,
        feature.kind == FeatureKind::Polygon,
    )
}

fn polyline_path(points: &[LatLng], projector: &Projector, close: bool) -> Option<BezPath> {
    if points.len() < 2 {
        return None;
    }
    let mut path = BezPath::new();
    let mut iter = points.iter();
    path.move_to(projector.project(*iter.next()?));
    for p in iter {
        path.line_to(projector.project(*p));
    }
    if close {
        path.close_path();
    }
    Some(path)
}
