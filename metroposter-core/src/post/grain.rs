use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::foundation::error::{PosterError, PosterResult};
use crate::render::cpu::FrameRgba;

/// Grain intensity used when the effect is enabled without an override.
pub const DEFAULT_GRAIN_INTENSITY: f64 = 0.12;

/// Add zero-mean Gaussian film-grain noise to the frame in place.
///
/// Noise is sampled per color channel with standard deviation
/// `intensity * 255`, added, and clipped to the valid pixel range; alpha is
/// untouched so the frame stays opaque. The buffer shape never changes.
///
/// A fixed `seed` makes the effect reproducible for a given artifact.
pub fn add_grain(frame: &mut FrameRgba, intensity: f64, seed: u64) -> PosterResult<()> {
    if !(0.0..=1.0).contains(&intensity) || !intensity.is_finite() {
        return Err(PosterError::validation(
            "grain intensity must be within [0, 1]",
        ));
    }
    if intensity == 0.0 {
        return Ok(());
    }

    let sigma = intensity * 255.0;
    let mut rng = StdRng::seed_from_u64(seed);
    for px in frame.data.chunks_exact_mut(4) {
        for channel in px.iter_mut().take(3) {
            let noisy = f64::from(*channel) + standard_normal(&mut rng) * sigma;
            *channel = noisy.round().clamp(0.0, 255.0) as u8;
        }
    }
    Ok(())
}

// Box-Muller transform over uniform samples; one draw per call keeps the
// stream order independent of how callers batch pixels.
fn standard_normal(rng: &mut StdRng) -> f64 {
    let u1: f64 = 1.0 - rng.random::<f64>(); // (0, 1], keeps ln finite
    let u2: f64 = rng.random();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}
