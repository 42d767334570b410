use crate::foundation::color::Color;
use crate::geodata::model::RoadNetwork;
use crate::theme::model::Theme;

/// Road hierarchy tier derived from a normalized highway tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoadClass {
    /// Motorways and their link ramps.
    Motorway,
    /// Trunk and primary roads (including links).
    Primary,
    /// Secondary roads (including links).
    Secondary,
    /// Tertiary roads (including links).
    Tertiary,
    /// Residential, living streets, and unclassified roads.
    Residential,
    /// Everything outside the named tiers (footways, service roads, ...).
    Other,
}

/// Classify a normalized highway tag into its hierarchy tier.
pub fn classify_tag(tag: &str) -> RoadClass {
    match tag {
        "motorway" | "motorway_link" => RoadClass::Motorway,
        "trunk" | "trunk_link" | "primary" | "primary_link" => RoadClass::Primary,
        "secondary" | "secondary_link" => RoadClass::Secondary,
        "tertiary" | "tertiary_link" => RoadClass::Tertiary,
        "residential" | "living_street" | "unclassified" => RoadClass::Residential,
        _ => RoadClass::Other,
    }
}

impl RoadClass {
    /// Stroke width in points; major roads draw thicker.
    pub fn stroke_width_pt(self) -> f64 {
        match self {
            RoadClass::Motorway => 1.2,
            RoadClass::Primary => 1.0,
            RoadClass::Secondary => 0.8,
            RoadClass::Tertiary => 0.6,
            RoadClass::Residential | RoadClass::Other => 0.4,
        }
    }

    /// Theme color slot for this tier.
    pub fn color(self, theme: &Theme) -> Color {
        match self {
            RoadClass::Motorway => theme.road_motorway,
            RoadClass::Primary => theme.road_primary,
            RoadClass::Secondary => theme.road_secondary,
            RoadClass::Tertiary => theme.road_tertiary,
            RoadClass::Residential => theme.road_residential,
            RoadClass::Other => theme.road_default,
        }
    }
}

/// Per-edge styling as two parallel sequences in edge iteration order.
///
/// The compositor consumes these positionally, so the order must match the
/// input edge set exactly.
pub fn classify_edges(network: &RoadNetwork, theme: &Theme) -> (Vec<Color>, Vec<f64>) {
    let mut colors = Vec::with_capacity(network.edges.len());
    let mut widths = Vec::with_capacity(network.edges.len());
    for edge in &network.edges {
        let class = classify_tag(edge.highway_tag());
        colors.push(class.color(theme));
        widths.push(class.stroke_width_pt());
    }
    (colors, widths)
}

#[cfg(test)]
#[path = "../../tests/unit/geodata/classify.rs"]
mod tests;
