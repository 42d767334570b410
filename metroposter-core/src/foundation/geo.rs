use crate::foundation::error::{PosterError, PosterResult};

/// Approximate meters per degree of latitude (WGS84 mean).
const METERS_PER_DEGREE_LAT: f64 = 111_320.0;

/// A geographic coordinate in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLng {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lng: f64,
}

impl LatLng {
    /// Construct a validated coordinate.
    pub fn new(lat: f64, lng: f64) -> PosterResult<Self> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(PosterError::validation(format!(
                "latitude {lat} out of range [-90, 90]"
            )));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(PosterError::validation(format!(
                "longitude {lng} out of range [-180, 180]"
            )));
        }
        Ok(Self { lat, lng })
    }
}

// Data files carry coordinates as compact `[lat, lng]` pairs.
impl serde::Serialize for LatLng {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.lat, self.lng].serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for LatLng {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [lat, lng] = <[f64; 2]>::deserialize(deserializer)?;
        LatLng::new(lat, lng).map_err(serde::de::Error::custom)
    }
}

/// A geographic bounding box with strictly positive extent on both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoBounds {
    /// Northern latitude limit in degrees.
    pub north: f64,
    /// Southern latitude limit in degrees.
    pub south: f64,
    /// Eastern longitude limit in degrees.
    pub east: f64,
    /// Western longitude limit in degrees.
    pub west: f64,
}

impl GeoBounds {
    /// Construct validated bounds (`north > south`, `east > west`).
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> PosterResult<Self> {
        for (name, v) in [
            ("north", north),
            ("south", south),
            ("east", east),
            ("west", west),
        ] {
            if !v.is_finite() {
                return Err(PosterError::validation(format!(
                    "bounds {name} must be finite"
                )));
            }
        }
        if north <= south {
            return Err(PosterError::validation(
                "bounds north must be greater than south",
            ));
        }
        if east <= west {
            return Err(PosterError::validation(
                "bounds east must be greater than west",
            ));
        }
        Ok(Self {
            north,
            south,
            east,
            west,
        })
    }

    /// Longitudinal span in degrees.
    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    /// Latitudinal span in degrees.
    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    /// Width over height in degree space.
    pub fn ratio(&self) -> f64 {
        self.width() / self.height()
    }

    /// Geometric centroid.
    pub fn center(&self) -> LatLng {
        LatLng {
            lat: (self.north + self.south) / 2.0,
            lng: (self.east + self.west) / 2.0,
        }
    }

    /// Smallest bounds enclosing both inputs.
    pub fn union(self, other: Self) -> Self {
        Self {
            north: self.north.max(other.north),
            south: self.south.min(other.south),
            east: self.east.max(other.east),
            west: self.west.min(other.west),
        }
    }

    /// Bounding extent of a point set, `None` when the set spans no area.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a LatLng>) -> Option<Self> {
        let mut acc: Option<(f64, f64, f64, f64)> = None;
        for p in points {
            acc = Some(match acc {
                None => (p.lat, p.lat, p.lng, p.lng),
                Some((n, s, e, w)) => (n.max(p.lat), s.min(p.lat), e.max(p.lng), w.min(p.lng)),
            });
        }
        let (north, south, east, west) = acc?;
        GeoBounds::new(north, south, east, west).ok()
    }
}

/// Geographic query for one generation run: exactly one mode is active.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GeoQuery {
    /// Center point plus radius in meters; the crop fills the frame.
    Center {
        /// Map center.
        point: LatLng,
        /// Radius in meters around the center.
        radius_m: f64,
    },
    /// Exact bounding box; the crop preserves the requested extent.
    Bounds(GeoBounds),
}

impl GeoQuery {
    /// The point shown in the poster's coordinate line.
    pub fn display_point(&self) -> LatLng {
        match self {
            GeoQuery::Center { point, .. } => *point,
            GeoQuery::Bounds(b) => b.center(),
        }
    }

    /// Degree-space extent implied by the query.
    ///
    /// For bounds mode this is the box itself; for center+radius it is the
    /// radius converted to degrees on each axis, which also serves as the
    /// fallback extent when a run fetched no geometry at all.
    pub fn extent_hint(&self) -> GeoBounds {
        match self {
            GeoQuery::Bounds(b) => *b,
            GeoQuery::Center { point, radius_m } => {
                let dlat = radius_m / METERS_PER_DEGREE_LAT;
                let cos_lat = point.lat.to_radians().cos().abs().max(1e-6);
                let dlng = radius_m / (METERS_PER_DEGREE_LAT * cos_lat);
                GeoBounds {
                    north: point.lat + dlat,
                    south: point.lat - dlat,
                    east: point.lng + dlng,
                    west: point.lng - dlng,
                }
            }
        }
    }
}

/// Parse an exact-bounds argument of the form `north,south,east,west`.
///
/// Failure here is recoverable by design: callers discard the bounds with a
/// warning and fall back to center+radius mode.
pub fn parse_bounds(s: &str) -> PosterResult<GeoBounds> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return Err(PosterError::validation(
            "bounds must be four comma-separated values: north,south,east,west",
        ));
    }
    let mut vals = [0.0f64; 4];
    for (i, part) in parts.iter().enumerate() {
        vals[i] = part.parse::<f64>().map_err(|_| {
            PosterError::validation(format!("bounds component '{part}' is not a number"))
        })?;
    }
    GeoBounds::new(vals[0], vals[1], vals[2], vals[3])
}

/// Format a coordinate line for the typography block.
///
/// Hemisphere letters are chosen independently per axis from the sign:
/// `40.7128° N / 74.0060° W`.
pub fn format_coord(point: LatLng) -> String {
    let ns = if point.lat >= 0.0 { 'N' } else { 'S' };
    let ew = if point.lng >= 0.0 { 'E' } else { 'W' };
    format!(
        "{:.4}° {} / {:.4}° {}",
        point.lat.abs(),
        ns,
        point.lng.abs(),
        ew
    )
}
