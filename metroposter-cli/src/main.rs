use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tracing::warn;

use metroposter::{
    DirGeodataProvider, Dpi, FontLibrary, GeoQuery, LatLng, LayerSelection, PaperSize,
    PosterError, PosterGenerator, PosterRequest, ThemeStore, parse_bounds,
};

/// Generate print-ready city map posters from pre-fetched geodata.
#[derive(Parser, Debug)]
#[command(name = "metroposter", version)]
struct Args {
    /// City name.
    #[arg(short = 'c', long)]
    city: Option<String>,

    /// Country name.
    #[arg(short = 'C', long)]
    country: Option<String>,

    /// Theme name.
    #[arg(short = 't', long, default_value = "feature_based")]
    theme: String,

    /// Map radius in meters around the center point.
    #[arg(short = 'd', long, default_value_t = 29_000.0)]
    distance: f64,

    /// Paper size / aspect ratio (1:1, 2:3, 3:4, 4:5, DIN, 9:16, 9:19.5).
    #[arg(short = 's', long = "paper-size", default_value = "3:4")]
    paper_size: String,

    /// Comma-separated layers (roads,water,parks,subway).
    #[arg(long)]
    layers: Option<String>,

    /// Latitude of the map center.
    #[arg(long)]
    lat: Option<f64>,

    /// Longitude of the map center.
    #[arg(long)]
    lng: Option<f64>,

    /// Exact map bounds as north,south,east,west.
    #[arg(long)]
    bounds: Option<String>,

    /// Add a film grain effect to the output.
    #[arg(long, default_value_t = false)]
    grain: bool,

    /// Output resolution in DPI (72, 150, 300).
    #[arg(long, default_value_t = 300)]
    dpi: u32,

    /// List available themes and exit.
    #[arg(long = "list-themes", default_value_t = false)]
    list_themes: bool,

    /// Directory of pre-fetched geodata files (roads.json, water.json, ...).
    #[arg(long = "data-dir", default_value = "data")]
    data_dir: PathBuf,

    /// Directory of theme JSON files.
    #[arg(long = "themes-dir", default_value = "themes")]
    themes_dir: PathBuf,

    /// Directory of poster font files.
    #[arg(long = "fonts-dir", default_value = "fonts")]
    fonts_dir: PathBuf,

    /// Directory generated posters are written to.
    #[arg(long = "out-dir", default_value = "posters")]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();
    let args = Args::parse();

    let themes = ThemeStore::new(&args.themes_dir);
    if args.list_themes {
        print_theme_listing(&themes);
        return Ok(());
    }

    let (city, country) = match (&args.city, &args.country) {
        (Some(city), Some(country)) => (city.clone(), country.clone()),
        _ => anyhow::bail!("--city and --country are required (or use --list-themes)"),
    };

    let query = resolve_query(&args)?;
    let request = PosterRequest {
        city,
        country,
        query,
        theme: args.theme.clone(),
        layers: LayerSelection::parse(args.layers.as_deref()),
        paper: PaperSize::from_key(&args.paper_size),
        dpi: Dpi::from_value(args.dpi)?,
        grain: args.grain,
    };

    let mut generator = PosterGenerator::new(
        Box::new(DirGeodataProvider::new(&args.data_dir)),
        themes,
        FontLibrary::load(&args.fonts_dir),
        &args.out_dir,
    );

    let artifact = generator
        .generate(&request)
        .with_context(|| format!("generate poster for {}", request.city))?;

    println!("wrote {}", artifact.path.display());
    Ok(())
}

/// Location resolution seam: explicit bounds win, then explicit coordinates.
///
/// An unparseable bounds argument is discarded with a warning and the run
/// falls back to center+radius mode. With no usable location at all the run
/// aborts before any rendering work.
fn resolve_query(args: &Args) -> Result<GeoQuery, PosterError> {
    if let Some(raw) = args.bounds.as_deref() {
        match parse_bounds(raw) {
            Ok(bounds) => return Ok(GeoQuery::Bounds(bounds)),
            Err(err) => {
                warn!(%err, "ignoring invalid --bounds, falling back to center+radius");
            }
        }
    }

    match (args.lat, args.lng) {
        (Some(lat), Some(lng)) => Ok(GeoQuery::Center {
            point: LatLng::new(lat, lng)?,
            radius_m: args.distance,
        }),
        _ => Err(PosterError::location_not_found(
            "no geocoder is configured; pass --lat/--lng or --bounds",
        )),
    }
}

fn print_theme_listing(themes: &ThemeStore) {
    let entries = themes.list();
    if entries.is_empty() {
        println!("No themes found in '{}'.", themes.dir().display());
        return;
    }

    println!("Available themes:");
    for entry in entries {
        println!("  {}", entry.id);
        println!("    {}", entry.display_name);
        if let Some(description) = entry.description {
            println!("    {description}");
        }
    }
}
