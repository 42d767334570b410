use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use tracing::{debug, info, warn};

use crate::compose::layers::{Layer, LayerSelection};
use crate::foundation::error::{PosterError, PosterResult};
use crate::foundation::geo::{GeoBounds, GeoQuery};
use crate::geodata::model::{FeatureCollection, RoadNetwork};

/// Semantic tag filter for one feature layer, e.g. `natural=water`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagQuery {
    /// Layer name used for provider addressing and log lines.
    pub name: &'static str,
    /// Tag key to accepted values.
    pub tags: Vec<(&'static str, Vec<&'static str>)>,
}

impl TagQuery {
    /// Water bodies and riverbanks.
    pub fn water() -> Self {
        Self {
            name: "water",
            tags: vec![("natural", vec!["water"]), ("waterway", vec!["riverbank"])],
        }
    }

    /// Parks and grass areas.
    pub fn parks() -> Self {
        Self {
            name: "parks",
            tags: vec![("leisure", vec!["park"]), ("landuse", vec!["grass"])],
        }
    }

    /// Subway, light rail, and tram lines.
    pub fn transit() -> Self {
        Self {
            name: "subway",
            tags: vec![("railway", vec!["subway", "light_rail", "tram"])],
        }
    }
}

/// Source of pre-fetched geodata, addressed by query and tag filter.
///
/// Implementations hold already-downloaded data; the pipeline performs no
/// network fetching or format parsing of its own.
pub trait GeodataProvider {
    /// The road-network graph for the queried area.
    fn road_network(&self, query: &GeoQuery) -> PosterResult<RoadNetwork>;

    /// Features for the queried area matching the tag filter.
    fn features(&self, query: &GeoQuery, tags: &TagQuery) -> PosterResult<FeatureCollection>;
}

/// Courtesy delays inserted between consecutive provider requests.
///
/// A politeness measure toward the upstream data source, not a performance
/// control; tests run with [`FetchPacing::none`].
#[derive(Clone, Copy, Debug)]
pub struct FetchPacing {
    /// Pause after the road-network request.
    pub after_roads: Duration,
    /// Pause after each feature-collection request.
    pub after_features: Duration,
}

impl Default for FetchPacing {
    fn default() -> Self {
        Self {
            after_roads: Duration::from_millis(500),
            after_features: Duration::from_millis(300),
        }
    }
}

impl FetchPacing {
    /// No delays at all.
    pub fn none() -> Self {
        Self {
            after_roads: Duration::ZERO,
            after_features: Duration::ZERO,
        }
    }
}

/// Fetched per-layer data; `None` marks a layer that is unselected or whose
/// fetch failed and was recovered as absent.
#[derive(Clone, Debug, Default)]
pub struct LayerData {
    /// Road-network graph.
    pub roads: Option<RoadNetwork>,
    /// Water features.
    pub water: Option<FeatureCollection>,
    /// Park features.
    pub parks: Option<FeatureCollection>,
    /// Transit features.
    pub subway: Option<FeatureCollection>,
}

impl LayerData {
    /// Geographic extent of everything fetched.
    pub fn bounds(&self) -> Option<GeoBounds> {
        let mut acc: Option<GeoBounds> = None;
        let mut fold = |b: Option<GeoBounds>| {
            if let Some(b) = b {
                acc = Some(match acc {
                    Some(prev) => prev.union(b),
                    None => b,
                });
            }
        };
        fold(self.roads.as_ref().and_then(RoadNetwork::bounds));
        fold(self.water.as_ref().and_then(FeatureCollection::bounds));
        fold(self.parks.as_ref().and_then(FeatureCollection::bounds));
        fold(self.subway.as_ref().and_then(FeatureCollection::bounds));
        acc
    }
}

/// Fetch all selected layers sequentially with courtesy pacing.
///
/// A road-network failure aborts the run; a feature-layer failure is
/// recovered as "layer absent" and logged.
pub fn fetch_layers(
    provider: &dyn GeodataProvider,
    query: &GeoQuery,
    selection: &LayerSelection,
    pacing: FetchPacing,
) -> PosterResult<LayerData> {
    let mut data = LayerData::default();

    if selection.contains(Layer::Roads) {
        info!("fetching street network");
        data.roads = Some(provider.road_network(query).map_err(|e| {
            PosterError::geodata(format!("road network fetch failed: {e}"))
        })?);
        pause(pacing.after_roads);
    }

    for (layer, tags) in [
        (Layer::Water, TagQuery::water()),
        (Layer::Parks, TagQuery::parks()),
        (Layer::Subway, TagQuery::transit()),
    ] {
        if !selection.contains(layer) {
            continue;
        }
        info!(layer = tags.name, "fetching features");
        let fetched = match provider.features(query, &tags) {
            Ok(fc) => Some(fc),
            Err(err) => {
                warn!(layer = tags.name, %err, "feature fetch failed, layer treated as absent");
                None
            }
        };
        match layer {
            Layer::Water => data.water = fetched,
            Layer::Parks => data.parks = fetched,
            Layer::Subway => data.subway = fetched,
            Layer::Roads => unreachable!("roads handled above"),
        }
        // No pause needed once the last planned request has been issued.
        if layer != Layer::Subway {
            pause(pacing.after_features);
        }
    }

    Ok(data)
}

fn pause(d: Duration) {
    if !d.is_zero() {
        debug!(millis = d.as_millis() as u64, "courtesy delay");
        std::thread::sleep(d);
    }
}

/// Provider over a directory of pre-fetched JSON files.
///
/// Layout: `roads.json` (a [`RoadNetwork`]) plus `<layer>.json` (a
/// [`FeatureCollection`]) per feature layer, already scoped to the queried
/// area and filtered by the layer's tag set.
#[derive(Clone, Debug)]
pub struct DirGeodataProvider {
    dir: PathBuf,
}

impl DirGeodataProvider {
    /// Provider reading from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory backing this provider.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, file_name: &str) -> PosterResult<T> {
        let path = self.dir.join(file_name);
        let bytes = std::fs::read(&path)
            .with_context(|| format!("read geodata file '{}'", path.display()))?;
        let value = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse geodata file '{}'", path.display()))?;
        Ok(value)
    }
}

impl GeodataProvider for DirGeodataProvider {
    fn road_network(&self, _query: &GeoQuery) -> PosterResult<RoadNetwork> {
        self.read_json("roads.json")
    }

    fn features(&self, _query: &GeoQuery, tags: &TagQuery) -> PosterResult<FeatureCollection> {
        self.read_json(&format!("{}.json", tags.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::geo::LatLng;
    use crate::geodata::model::{Feature, FeatureKind, RoadEdge};

    struct StubProvider {
        roads_fail: bool,
        water_fail: bool,
    }

    impl GeodataProvider for StubProvider {
        fn road_network(&self, _query: &GeoQuery) -> PosterResult<RoadNetwork> {
            if self.roads_fail {
                return Err(PosterError::geodata("upstream unavailable"));
            }
            Ok(RoadNetwork {
                edges: vec![RoadEdge {
                    highway: None,
                    points: vec![
                        LatLng { lat: 0.0, lng: 0.0 },
                        LatLng { lat: 1.0, lng: 1.0 },
                    ],
                }],
            })
        }

        fn features(&self, _query: &GeoQuery, tags: &TagQuery) -> PosterResult<FeatureCollection> {
            if self.water_fail && tags.name == "water" {
                return Err(PosterError::geodata("timeout"));
            }
            Ok(FeatureCollection {
                features: vec![Feature {
                    kind: FeatureKind::Polygon,
                    points: vec![
                        LatLng { lat: 0.0, lng: 0.0 },
                        LatLng { lat: 0.5, lng: 0.5 },
                    ],
                }],
            })
        }
    }

    fn center_query() -> GeoQuery {
        GeoQuery::Center {
            point: LatLng { lat: 0.5, lng: 0.5 },
            radius_m: 1000.0,
        }
    }

    #[test]
    fn road_failure_is_fatal() {
        let provider = StubProvider {
            roads_fail: true,
            water_fail: false,
        };
        let err = fetch_layers(
            &provider,
            &center_query(),
            &LayerSelection::default_set(),
            FetchPacing::none(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("road network fetch failed"));
    }

    #[test]
    fn feature_failure_recovers_as_absent_layer() {
        let provider = StubProvider {
            roads_fail: false,
            water_fail: true,
        };
        let data = fetch_layers(
            &provider,
            &center_query(),
            &LayerSelection::parse(Some("roads,water,parks,subway")),
            FetchPacing::none(),
        )
        .unwrap();
        assert!(data.roads.is_some());
        assert!(data.water.is_none());
        assert!(data.parks.is_some());
        assert!(data.subway.is_some());
    }

    #[test]
    fn unselected_layers_are_never_fetched() {
        let provider = StubProvider {
            roads_fail: true, // would be fatal if roads were requested
            water_fail: false,
        };
        let data = fetch_layers(
            &provider,
            &center_query(),
            &LayerSelection::parse(Some("parks")),
            FetchPacing::none(),
        )
        .unwrap();
        assert!(data.roads.is_none());
        assert!(data.parks.is_some());
        assert!(data.water.is_none());
    }

    #[test]
    fn dir_provider_reads_prefetched_files() {
        let dir = std::env::temp_dir().join(format!(
            "metroposter_dir_provider_{}_{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("roads.json"),
            r#"{ "edges": [ { "highway": "primary", "points": [[0.0, 0.0], [0.1, 0.1]] } ] }"#,
        )
        .unwrap();
        std::fs::write(
            dir.join("subway.json"),
            r#"{ "features": [ { "kind": "line", "points": [[0.0, 0.0], [0.2, 0.2]] } ] }"#,
        )
        .unwrap();

        let provider = DirGeodataProvider::new(&dir);
        let roads = provider.road_network(&center_query()).unwrap();
        assert_eq!(roads.edges.len(), 1);
        assert_eq!(roads.edges[0].highway_tag(), "primary");

        let subway = provider
            .features(&center_query(), &TagQuery::transit())
            .unwrap();
        assert_eq!(subway.features.len(), 1);
        assert_eq!(subway.features[0].kind, FeatureKind::Line);

        // Missing file surfaces as an error (recovered upstream as absent).
        assert!(provider
            .features(&center_query(), &TagQuery::water())
            .is_err());

        std::fs::remove_dir_all(&dir).ok();
    }
}
