use super::*;
use crate::geodata::model::{HighwayTag, RoadEdge};

#[test]
fn classification_table_is_exhaustive_per_tier() {
    for tag in ["motorway", "motorway_link"] {
        assert_eq!(classify_tag(tag), RoadClass::Motorway);
    }
    for tag in ["trunk", "trunk_link", "primary", "primary_link"] {
        assert_eq!(classify_tag(tag), RoadClass::Primary);
    }
    for tag in ["secondary", "secondary_link"] {
        assert_eq!(classify_tag(tag), RoadClass::Secondary);
    }
    for tag in ["tertiary", "tertiary_link"] {
        assert_eq!(classify_tag(tag), RoadClass::Tertiary);
    }
    for tag in ["residential", "living_street", "unclassified"] {
        assert_eq!(classify_tag(tag), RoadClass::Residential);
    }
    for tag in ["footway", "service", "cycleway", "made_up_tag", ""] {
        assert_eq!(classify_tag(tag), RoadClass::Other);
    }
}

#[test]
fn tier_widths_follow_the_hierarchy() {
    assert_eq!(RoadClass::Motorway.stroke_width_pt(), 1.2);
    assert_eq!(RoadClass::Primary.stroke_width_pt(), 1.0);
    assert_eq!(RoadClass::Secondary.stroke_width_pt(), 0.8);
    assert_eq!(RoadClass::Tertiary.stroke_width_pt(), 0.6);
    assert_eq!(RoadClass::Residential.stroke_width_pt(), 0.4);
    assert_eq!(RoadClass::Other.stroke_width_pt(), 0.4);
}

#[test]
fn edge_sequences_stay_parallel_and_ordered() {
    let theme = Theme::fallback();
    let edge = |tag: &str| RoadEdge {
        highway: Some(HighwayTag::One(tag.to_owned())),
        points: vec![],
    };
    let network = RoadNetwork {
        edges: vec![edge("motorway"), edge("residential"), edge("footway")],
    };

    let (colors, widths) = classify_edges(&network, &theme);
    assert_eq!(widths, vec![1.2, 0.4, 0.4]);
    assert_eq!(
        colors,
        vec![
            theme.road_motorway,
            theme.road_residential,
            theme.road_default
        ]
    );
}

#[test]
fn list_tags_and_missing_tags_classify_via_normalization() {
    let theme = Theme::fallback();
    let network = RoadNetwork {
        edges: vec![
            RoadEdge {
                highway: Some(HighwayTag::Many(vec![
                    "secondary".to_owned(),
                    "motorway".to_owned(),
                ])),
                points: vec![],
            },
            RoadEdge {
                highway: None,
                points: vec![],
            },
        ],
    };
    let (colors, widths) = classify_edges(&network, &theme);
    // First of the list wins; a missing tag is residential-by-default.
    assert_eq!(colors[0], theme.road_secondary);
    assert_eq!(widths[0], 0.8);
    assert_eq!(colors[1], theme.road_residential);
    assert_eq!(widths[1], 0.4);
}
