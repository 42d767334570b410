use crate::foundation::geo::{GeoBounds, GeoQuery};

/// Relative ratio deviation below which exact-bounds extents are left alone.
pub const PRESERVE_RATIO_TOLERANCE: f64 = 0.05;

/// How aggressively the crop window chases the paper aspect ratio.
///
/// The asymmetry is intentional: an explicit bounds request expresses intent
/// to preserve a specific extent, while a center+radius request means "fill
/// the frame".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CropPolicy {
    /// Crop only when the extent deviates more than
    /// [`PRESERVE_RATIO_TOLERANCE`] from the target ratio, and then only
    /// minimally.
    PreserveBounds,
    /// Always crop to exactly the target ratio.
    FillFrame,
}

impl CropPolicy {
    /// Policy implied by the query mode.
    pub fn for_query(query: &GeoQuery) -> Self {
        match query {
            GeoQuery::Bounds(_) => CropPolicy::PreserveBounds,
            GeoQuery::Center { .. } => CropPolicy::FillFrame,
        }
    }
}

/// Crop `extent` toward `target_ratio` (paper width over height).
///
/// Cropping shrinks exactly one axis — whichever is oversized relative to the
/// target — centered on the extent centroid; the other axis is untouched.
/// Applying the same crop twice is a no-op.
pub fn crop_extent(extent: GeoBounds, target_ratio: f64, policy: CropPolicy) -> GeoBounds {
    match policy {
        CropPolicy::PreserveBounds => {
            let deviation = (extent.ratio() - target_ratio).abs() / target_ratio;
            if deviation <= PRESERVE_RATIO_TOLERANCE {
                extent
            } else {
                shrink_to_ratio(extent, target_ratio)
            }
        }
        CropPolicy::FillFrame => shrink_to_ratio(extent, target_ratio),
    }
}

fn shrink_to_ratio(extent: GeoBounds, target_ratio: f64) -> GeoBounds {
    let center = extent.center();
    if extent.ratio() > target_ratio {
        let new_width = extent.height() * target_ratio;
        GeoBounds {
            east: center.lng + new_width / 2.0,
            west: center.lng - new_width / 2.0,
            ..extent
        }
    } else {
        let new_height = extent.width() / target_ratio;
        GeoBounds {
            north: center.lat + new_height / 2.0,
            south: center.lat - new_height / 2.0,
            ..extent
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/crop.rs"]
mod tests;
