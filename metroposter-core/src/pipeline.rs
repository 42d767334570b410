use std::path::PathBuf;

use anyhow::Context;
use tracing::info;

use crate::compose::crop::{CropPolicy, crop_extent};
use crate::compose::layers::LayerSelection;
use crate::compose::scene::build_scene;
use crate::foundation::error::PosterResult;
use crate::foundation::geo::{GeoBounds, GeoQuery};
use crate::foundation::math::Fnv1a64;
use crate::geodata::provider::{FetchPacing, GeodataProvider, fetch_layers};
use crate::overlay::gradient::gradient_fades;
use crate::overlay::spec::typography_overlay;
use crate::overlay::text::{FontLibrary, poster_labels};
use crate::post::blur::{BLUR_FADE_FRACTION, BLUR_FADE_MAX_RADIUS, blur_fade_top};
use crate::post::grain::{DEFAULT_GRAIN_INTENSITY, add_grain};
use crate::render::cpu::Rasterizer;
use crate::render::paper::{Dpi, PaperSize, pixel_dims};
use crate::theme::store::ThemeStore;

/// One poster generation request.
#[derive(Clone, Debug)]
pub struct PosterRequest {
    /// City name for the headline and the artifact name.
    pub city: String,
    /// Country name for the subtitle.
    pub country: String,
    /// Geographic query; the mode also selects the crop policy.
    pub query: GeoQuery,
    /// Theme identifier resolved against the theme store.
    pub theme: String,
    /// Requested layers.
    pub layers: LayerSelection,
    /// Paper aspect-ratio key.
    pub paper: PaperSize,
    /// Output resolution.
    pub dpi: Dpi,
    /// Whether to add film grain.
    pub grain: bool,
}

/// The saved poster plus its structural metadata.
#[derive(Clone, Debug)]
pub struct PosterArtifact {
    /// Absolute or relative path of the written file.
    pub path: PathBuf,
    /// File name within the output directory.
    pub file_name: String,
    /// Raster width in pixels.
    pub width: u32,
    /// Raster height in pixels.
    pub height: u32,
}

/// Synchronous poster pipeline: one call to [`PosterGenerator::generate`]
/// runs theme resolution, geodata fetching, composition, cropping, overlay,
/// rasterization, post-processing, and the artifact write.
///
/// Each generator owns its canvas state exclusively; concurrent runs need
/// separate instances.
pub struct PosterGenerator {
    provider: Box<dyn GeodataProvider>,
    themes: ThemeStore,
    fonts: FontLibrary,
    out_dir: PathBuf,
    pacing: FetchPacing,
    rasterizer: Rasterizer,
}

impl PosterGenerator {
    /// Generator writing artifacts into `out_dir`.
    pub fn new(
        provider: Box<dyn GeodataProvider>,
        themes: ThemeStore,
        fonts: FontLibrary,
        out_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            provider,
            themes,
            fonts,
            out_dir: out_dir.into(),
            pacing: FetchPacing::default(),
            rasterizer: Rasterizer::new(),
        }
    }

    /// Override the courtesy pacing between geodata requests.
    pub fn with_pacing(mut self, pacing: FetchPacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Run the full pipeline for one request.
    #[tracing::instrument(
        skip(self, req),
        fields(city = %req.city, theme = %req.theme, paper = req.paper.key())
    )]
    pub fn generate(&mut self, req: &PosterRequest) -> PosterResult<PosterArtifact> {
        let theme = self.themes.resolve(&req.theme);
        info!(layers = ?req.layers.tokens(), "fetching map data");
        let data = fetch_layers(self.provider.as_ref(), &req.query, &req.layers, self.pacing)?;

        let base_extent = base_extent(&req.query, data.bounds());
        let extent = crop_extent(
            base_extent,
            req.paper.ratio(),
            CropPolicy::for_query(&req.query),
        );

        let canvas_px = pixel_dims(req.paper, req.dpi);
        info!(width = canvas_px.0, height = canvas_px.1, "rendering map");
        let scene = build_scene(&data, &req.layers, &theme, extent, canvas_px);

        let labels = poster_labels(&req.city, &req.country, req.query.display_point());
        let overlay = typography_overlay(
            &labels,
            &theme,
            gradient_fades(&theme, req.paper).to_vec(),
        );

        let mut frame = self
            .rasterizer
            .render(&scene, &overlay, &self.fonts, req.dpi)?;

        if req.paper == PaperSize::Lockscreen {
            info!("applying top blur fade");
            blur_fade_top(&mut frame, BLUR_FADE_FRACTION, BLUR_FADE_MAX_RADIUS)?;
        }

        let (path, file_name) = self.reserve_output_path(&req.city, &req.theme)?;

        if req.grain {
            info!("adding grain");
            add_grain(
                &mut frame,
                DEFAULT_GRAIN_INTENSITY,
                grain_seed(&file_name),
            )?;
        }

        image::save_buffer_with_format(
            &path,
            &frame.data,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;

        info!(path = %path.display(), "poster saved");
        Ok(PosterArtifact {
            path,
            file_name,
            width: frame.width,
            height: frame.height,
        })
    }

    /// Pick a collision-free output path named from city, theme, and the
    /// generation timestamp.
    ///
    /// When a same-second run already claimed the name, a numeric suffix is
    /// appended instead of overwriting.
    fn reserve_output_path(&self, city: &str, theme: &str) -> PosterResult<(PathBuf, String)> {
        std::fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("create output dir '{}'", self.out_dir.display()))?;

        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let stem = format!("{}_{theme}_{timestamp}", slugify(city));

        let mut file_name = format!("{stem}.png");
        let mut suffix = 0u32;
        loop {
            let candidate = self.out_dir.join(&file_name);
            if !candidate.exists() {
                return Ok((candidate, file_name));
            }
            suffix += 1;
            file_name = format!("{stem}_{suffix}.png");
        }
    }
}

fn base_extent(query: &GeoQuery, data_bounds: Option<GeoBounds>) -> GeoBounds {
    match query {
        // Explicit bounds are the extent the caller asked to see.
        GeoQuery::Bounds(b) => *b,
        // Radius queries frame whatever geometry actually came back.
        GeoQuery::Center { .. } => data_bounds.unwrap_or_else(|| query.extent_hint()),
    }
}

fn slugify(city: &str) -> String {
    city.to_lowercase().replace(' ', "_")
}

fn grain_seed(file_name: &str) -> u64 {
    let mut hasher = Fnv1a64::new();
    hasher.update(file_name.as_bytes());
    hasher.finish()
}
