use crate::foundation::geo::{GeoBounds, LatLng};

/// Tag value used when a road edge carries no highway classification.
pub const UNCLASSIFIED_TAG: &str = "unclassified";

/// Raw highway-type tag as delivered by the geodata provider.
///
/// Providers emit either a scalar tag or a list of tags for merged ways; the
/// list form is normalized to its first element before classification.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum HighwayTag {
    /// Single tag value.
    One(String),
    /// Multiple tag values; the first one wins.
    Many(Vec<String>),
}

impl HighwayTag {
    /// The canonical single tag value used for classification.
    pub fn canonical(&self) -> &str {
        match self {
            HighwayTag::One(s) => s.as_str(),
            HighwayTag::Many(v) => v.first().map(String::as_str).unwrap_or(UNCLASSIFIED_TAG),
        }
    }
}

/// One edge of the road-network graph: a tagged polyline.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RoadEdge {
    /// Raw highway tag; absent tags classify as unclassified residential.
    #[serde(default)]
    pub highway: Option<HighwayTag>,
    /// Polyline geometry in geographic coordinates.
    pub points: Vec<LatLng>,
}

impl RoadEdge {
    /// Normalized highway tag for this edge.
    pub fn highway_tag(&self) -> &str {
        self.highway
            .as_ref()
            .map(HighwayTag::canonical)
            .unwrap_or(UNCLASSIFIED_TAG)
    }
}

/// A road-network graph reduced to its drawable edge set.
///
/// Edge order is meaningful: the classifier emits per-edge style sequences
/// that the compositor consumes positionally.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct RoadNetwork {
    /// Graph edges in provider iteration order.
    pub edges: Vec<RoadEdge>,
}

impl RoadNetwork {
    /// Whether the network has no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Geographic extent of all edge geometry.
    pub fn bounds(&self) -> Option<GeoBounds> {
        GeoBounds::from_points(self.edges.iter().flat_map(|e| e.points.iter()))
    }
}

/// Shape kind of a fetched feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    /// Closed area (water body, park); drawn filled.
    Polygon,
    /// Open path (river centerline, rail track); drawn stroked.
    Line,
}

/// One geometric feature with no further attributes.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Feature {
    /// Shape kind.
    pub kind: FeatureKind,
    /// Outline or path points in geographic coordinates.
    pub points: Vec<LatLng>,
}

/// A set of shapes for one semantic layer (water, parks, transit).
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct FeatureCollection {
    /// Features in provider order.
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Whether the collection has no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Geographic extent of all feature geometry.
    pub fn bounds(&self) -> Option<GeoBounds> {
        GeoBounds::from_points(self.features.iter().flat_map(|f| f.points.iter()))
    }
}
