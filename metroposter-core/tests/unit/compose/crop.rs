use super::*;
use crate::foundation::geo::LatLng;

fn bounds(north: f64, south: f64, east: f64, west: f64) -> GeoBounds {
    GeoBounds::new(north, south, east, west).unwrap()
}

#[test]
fn policy_follows_query_mode() {
    let b = bounds(1.0, 0.0, 1.0, 0.0);
    assert_eq!(
        CropPolicy::for_query(&GeoQuery::Bounds(b)),
        CropPolicy::PreserveBounds
    );
    assert_eq!(
        CropPolicy::for_query(&GeoQuery::Center {
            point: LatLng { lat: 0.0, lng: 0.0 },
            radius_m: 1000.0,
        }),
        CropPolicy::FillFrame
    );
}

#[test]
fn preserve_mode_keeps_extent_within_tolerance() {
    // ratio 0.77 vs target 0.75: deviation ≈ 2.7%, under the 5% tolerance.
    let extent = bounds(1.0, 0.0, 0.77, 0.0);
    let out = crop_extent(extent, 0.75, CropPolicy::PreserveBounds);
    assert_eq!(out, extent);
}

#[test]
fn preserve_mode_shrinks_one_axis_outside_tolerance() {
    // Twice as wide as the target ratio allows.
    let extent = bounds(1.0, 0.0, 1.5, 0.0);
    let out = crop_extent(extent, 0.75, CropPolicy::PreserveBounds);
    // Height untouched, width shrunk to hit the ratio, centered.
    assert_eq!((out.north, out.south), (1.0, 0.0));
    assert!((out.ratio() - 0.75).abs() < 1e-12);
    assert!((out.center().lng - extent.center().lng).abs() < 1e-12);

    // Too tall instead: height shrinks, width untouched.
    let extent = bounds(2.0, 0.0, 0.75, 0.0);
    let out = crop_extent(extent, 0.75, CropPolicy::PreserveBounds);
    assert_eq!((out.east, out.west), (0.75, 0.0));
    assert!((out.ratio() - 0.75).abs() < 1e-12);
    assert!((out.center().lat - extent.center().lat).abs() < 1e-12);
}

#[test]
fn fill_mode_always_matches_target_ratio() {
    for (n, e) in [(1.0, 2.0), (3.0, 1.0), (1.0, 0.8)] {
        let extent = bounds(n, 0.0, e, 0.0);
        let out = crop_extent(extent, 0.8, CropPolicy::FillFrame);
        assert!((out.ratio() - 0.8).abs() < 1e-12);
        assert!((out.center().lat - extent.center().lat).abs() < 1e-12);
        assert!((out.center().lng - extent.center().lng).abs() < 1e-12);
        // Cropping never grows either axis.
        assert!(out.width() <= extent.width() + 1e-12);
        assert!(out.height() <= extent.height() + 1e-12);
    }
}

#[test]
fn cropping_is_idempotent() {
    let extent = bounds(1.0, 0.0, 2.0, 0.0);
    for policy in [CropPolicy::PreserveBounds, CropPolicy::FillFrame] {
        let once = crop_extent(extent, 0.75, policy);
        let twice = crop_extent(once, 0.75, policy);
        assert_eq!(once, twice);
    }
}

#[test]
fn on_ratio_extent_is_untouched_in_both_modes() {
    let extent = bounds(1.0, 0.0, 0.75, 0.0);
    for policy in [CropPolicy::PreserveBounds, CropPolicy::FillFrame] {
        let out = crop_extent(extent, 0.75, policy);
        assert!((out.north - extent.north).abs() < 1e-12);
        assert!((out.south - extent.south).abs() < 1e-12);
        assert!((out.east - extent.east).abs() < 1e-12);
        assert!((out.west - extent.west).abs() < 1e-12);
    }
}
