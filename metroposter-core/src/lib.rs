//! Metroposter turns a city's street, water, park, and transit geometry into
//! a stylized, print-ready poster raster.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: theme identifier -> [`Theme`] (embedded fallback, never fatal)
//! 2. **Fetch**: [`GeodataProvider`] -> per-layer road/feature data, sequential
//!    and courtesy-paced; feature-layer failures recover as "layer absent"
//! 3. **Compose**: classified road hierarchy plus feature layers -> z-ordered
//!    [`PosterScene`] over a cropped, paper-ratio extent
//! 4. **Overlay**: gradient fades and the typography block
//! 5. **Rasterize**: `vello_cpu` -> opaque RGBA8 [`FrameRgba`]
//! 6. **Post-process**: top blur-fade (lockscreen format) and film grain
//! 7. **Save**: lossless PNG with a collision-free artifact name
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: a given request, dataset, and artifact name
//!   reproduce the same pixels (grain is seeded from the artifact name).
//! - **Explicit styling**: the active [`Theme`] is a plain value passed into
//!   every stage that styles output; there is no shared mutable theme state.
//! - **Single-threaded**: one generation is one synchronous pipeline run.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod compose;
mod foundation;
mod geodata;
mod overlay;
mod pipeline;
mod post;
mod render;
mod theme;

pub use compose::crop::{CropPolicy, PRESERVE_RATIO_TOLERANCE, crop_extent};
pub use compose::layers::{Layer, LayerSelection};
pub use compose::scene::{FillShape, PosterScene, Projector, StrokeShape, build_scene};
pub use foundation::color::Color;
pub use foundation::error::{PosterError, PosterResult};
pub use foundation::geo::{GeoBounds, GeoQuery, LatLng, format_coord, parse_bounds};
pub use geodata::classify::{RoadClass, classify_edges, classify_tag};
pub use geodata::model::{
    Feature, FeatureCollection, FeatureKind, HighwayTag, RoadEdge, RoadNetwork, UNCLASSIFIED_TAG,
};
pub use geodata::provider::{
    DirGeodataProvider, FetchPacing, GeodataProvider, LayerData, TagQuery, fetch_layers,
};
pub use overlay::gradient::{
    DEFAULT_FADE_FRACTION, FadeEdge, GradientFade, LOCKSCREEN_TOP_FADE_FRACTION, gradient_fades,
};
pub use overlay::spec::{Anchor, HAlign, OverlaySpec, RuleSpec, TextSpec, typography_overlay};
pub use overlay::text::{
    ATTRIBUTION, FontLibrary, FontRole, PosterLabels, TextBrush, TypeEngine, letter_space,
    poster_labels,
};
pub use pipeline::{PosterArtifact, PosterGenerator, PosterRequest};
pub use post::blur::{
    BLUR_FADE_FRACTION, BLUR_FADE_MAX_RADIUS, blur_fade_top, gaussian_blur_rgba8,
};
pub use post::grain::{DEFAULT_GRAIN_INTENSITY, add_grain};
pub use render::cpu::{FrameRgba, Rasterizer};
pub use render::paper::{Dpi, PaperSize, pixel_dims};
pub use theme::model::Theme;
pub use theme::store::{ThemeEntry, ThemeStore};
