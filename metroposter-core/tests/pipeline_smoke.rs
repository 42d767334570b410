use metroposter::{
    Dpi, FetchPacing, FontLibrary, GeoQuery, GeodataProvider, LatLng, LayerSelection, PaperSize,
    PosterGenerator, PosterRequest, PosterResult, RoadEdge, RoadNetwork, TagQuery, ThemeStore,
    pixel_dims,
};

fn temp_dir(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "metroposter_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

struct GridProvider;

impl GeodataProvider for GridProvider {
    fn road_network(&self, query: &GeoQuery) -> PosterResult<RoadNetwork> {
        let b = query.extent_hint();
        let edge = |tag: &str, points: Vec<LatLng>| RoadEdge {
            highway: Some(metroposter::HighwayTag::One(tag.to_owned())),
            points,
        };
        let lat = |f: f64| b.south + b.height() * f;
        let lng = |f: f64| b.west + b.width() * f;
        let p = |la: f64, ln: f64| LatLng {
            lat: lat(la),
            lng: lng(ln),
        };
        Ok(RoadNetwork {
            edges: vec![
                edge("motorway", vec![p(0.2, 0.0), p(0.2, 1.0)]),
                edge("residential", vec![p(0.0, 0.5), p(1.0, 0.5)]),
                edge("footway", vec![p(0.6, 0.1), p(0.9, 0.9)]),
            ],
        })
    }

    fn features(
        &self,
        query: &GeoQuery,
        tags: &TagQuery,
    ) -> PosterResult<metroposter::FeatureCollection> {
        let b = query.extent_hint();
        if tags.name == "parks" {
            // Simulate an upstream outage: the layer must be skipped, not fatal.
            return Err(metroposter::PosterError::geodata("parks outage"));
        }
        Ok(metroposter::FeatureCollection {
            features: vec![metroposter::Feature {
                kind: metroposter::FeatureKind::Polygon,
                points: vec![
                    LatLng {
                        lat: b.south,
                        lng: b.west,
                    },
                    LatLng {
                        lat: b.south,
                        lng: b.center().lng,
                    },
                    LatLng {
                        lat: b.center().lat,
                        lng: b.center().lng,
                    },
                ],
            }],
        })
    }
}

fn generator(out_dir: &std::path::Path) -> PosterGenerator {
    PosterGenerator::new(
        Box::new(GridProvider),
        ThemeStore::new("/no/theme/dir"),
        FontLibrary::fallback(),
        out_dir,
    )
    .with_pacing(FetchPacing::none())
}

fn request(city: &str, paper: PaperSize, grain: bool) -> PosterRequest {
    PosterRequest {
        city: city.to_owned(),
        country: "Testland".to_owned(),
        query: GeoQuery::Center {
            point: LatLng {
                lat: 48.2082,
                lng: 16.3738,
            },
            radius_m: 4000.0,
        },
        theme: "does_not_exist".to_owned(),
        layers: LayerSelection::parse(Some("roads,water,parks,subway")),
        paper,
        dpi: Dpi::Dpi72,
        grain,
    }
}

#[test]
fn generates_a_poster_end_to_end() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let out = temp_dir("pipeline_square");
    let artifact = generator(&out)
        .generate(&request("Vienna", PaperSize::Square, false))
        .unwrap();

    assert_eq!(
        (artifact.width, artifact.height),
        pixel_dims(PaperSize::Square, Dpi::Dpi72)
    );
    assert!(artifact.file_name.starts_with("vienna_does_not_exist_"));
    assert!(artifact.file_name.ends_with(".png"));
    let meta = std::fs::metadata(&artifact.path).unwrap();
    assert!(meta.len() > 0);

    std::fs::remove_dir_all(&out).ok();
}

#[test]
fn lockscreen_format_with_grain_still_produces_the_requested_dims() {
    let out = temp_dir("pipeline_lockscreen");
    let artifact = generator(&out)
        .generate(&request("Vienna", PaperSize::Lockscreen, true))
        .unwrap();

    assert_eq!(
        (artifact.width, artifact.height),
        pixel_dims(PaperSize::Lockscreen, Dpi::Dpi72)
    );
    std::fs::remove_dir_all(&out).ok();
}

#[test]
fn same_second_runs_get_distinct_artifact_names() {
    let out = temp_dir("pipeline_collisions");
    let mut generator = generator(&out);
    let a = generator
        .generate(&request("Vienna", PaperSize::Square, false))
        .unwrap();
    let b = generator
        .generate(&request("Vienna", PaperSize::Square, false))
        .unwrap();
    let c = generator
        .generate(&request("Vienna", PaperSize::Square, false))
        .unwrap();

    assert_ne!(a.file_name, b.file_name);
    assert_ne!(b.file_name, c.file_name);
    assert!(a.path.exists() && b.path.exists() && c.path.exists());

    std::fs::remove_dir_all(&out).ok();
}

#[test]
fn empty_layer_selection_is_a_valid_run() {
    let out = temp_dir("pipeline_empty_layers");
    let mut req = request("Vienna", PaperSize::Square, false);
    req.layers = LayerSelection::parse(Some("bogus"));
    let artifact = generator(&out).generate(&req).unwrap();
    assert!(artifact.path.exists());
    std::fs::remove_dir_all(&out).ok();
}

#[test]
fn road_network_outage_fails_the_whole_run() {
    struct DeadProvider;
    impl GeodataProvider for DeadProvider {
        fn road_network(&self, _q: &GeoQuery) -> PosterResult<RoadNetwork> {
            Err(metroposter::PosterError::geodata("overpass down"))
        }
        fn features(
            &self,
            _q: &GeoQuery,
            _t: &TagQuery,
        ) -> PosterResult<metroposter::FeatureCollection> {
            Ok(metroposter::FeatureCollection::default())
        }
    }

    let out = temp_dir("pipeline_fatal");
    let mut generator = PosterGenerator::new(
        Box::new(DeadProvider),
        ThemeStore::new("/no/theme/dir"),
        FontLibrary::fallback(),
        &out,
    )
    .with_pacing(FetchPacing::none());

    let err = generator
        .generate(&request("Vienna", PaperSize::Square, false))
        .unwrap_err();
    assert!(err.to_string().contains("overpass down"));
    // No artifact may exist after a failed run.
    assert!(
        std::fs::read_dir(&out)
            .map(|mut d| d.next().is_none())
            .unwrap_or(true)
    );
    std::fs::remove_dir_all(&out).ok();
}
