use crate::foundation::error::{PosterError, PosterResult};
use crate::foundation::math::mul_div255;
use crate::render::cpu::FrameRgba;

/// Fraction of image height covered by the lockscreen blur-fade.
pub const BLUR_FADE_FRACTION: f64 = 0.35;

/// Gaussian radius at the very top of the blur-fade zone.
pub const BLUR_FADE_MAX_RADIUS: u32 = 12;

/// Upper bound on blend bands, keeping the fade cost tractable.
const BLUR_FADE_MAX_BANDS: usize = 50;

/// Separable Gaussian blur over straight RGBA8 pixels.
///
/// The kernel is normalized in Q16 fixed point so results are deterministic
/// across platforms. `radius == 0` returns the input unchanged.
pub fn gaussian_blur_rgba8(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> PosterResult<Vec<u8>> {
    let expected_len = FrameRgba::expected_len(width, height)?;
    if src.len() != expected_len {
        return Err(PosterError::render(
            "gaussian_blur_rgba8 expects src matching width*height*4",
        ));
    }
    if radius == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    horizontal_pass(src, &mut tmp, width, height, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);
    Ok(out)
}

/// Blend a blurred copy of the frame into its top zone, strongest at the
/// very top and fading to nothing at the bottom of the zone.
///
/// The blend runs in at most [`BLUR_FADE_MAX_BANDS`] horizontal bands with a
/// stepped linear factor from 1.0 down to 0.0. Pixels below the zone are
/// untouched.
pub fn blur_fade_top(frame: &mut FrameRgba, fade_fraction: f64, max_radius: u32) -> PosterResult<()> {
    if !(0.0..=1.0).contains(&fade_fraction) || !fade_fraction.is_finite() {
        return Err(PosterError::validation(
            "blur fade fraction must be within [0, 1]",
        ));
    }
    let width = frame.width as usize;
    let fade_height = ((f64::from(frame.height) * fade_fraction) as usize).min(frame.height as usize);
    if fade_height == 0 || max_radius == 0 || width == 0 {
        return Ok(());
    }

    // Rows at the bottom of the zone only sample `max_radius` rows past it,
    // so blurring the zone plus that margin matches a full-image blur there.
    let blur_rows = (fade_height + max_radius as usize).min(frame.height as usize);
    let sub = &frame.data[..blur_rows * width * 4];
    let sigma = max_radius as f32 / 2.0;
    let blurred = gaussian_blur_rgba8(sub, frame.width, blur_rows as u32, max_radius, sigma)?;

    let num_bands = fade_height.min(BLUR_FADE_MAX_BANDS);
    let band_height = fade_height / num_bands;
    for band in 0..num_bands {
        let y_start = band * band_height;
        let y_end = if band == num_bands - 1 {
            fade_height
        } else {
            (band + 1) * band_height
        };
        // 1.0 at the top band (full blur) stepping down to 0 past the zone.
        let blend = 1.0 - (band as f64) / (num_bands as f64);
        let blend_q = (blend * 255.0).round() as u16;
        let inv_q = 255 - blend_q;

        let start = y_start * width * 4;
        let end = y_end * width * 4;
        for (dst, src) in frame.data[start..end]
            .iter_mut()
            .zip(blurred[start..end].iter())
        {
            *dst = mul_div255(u16::from(*dst), inv_q)
                .saturating_add(mul_div255(u16::from(*src), blend_q));
        }
    }
    Ok(())
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> PosterResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(PosterError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return Err(PosterError::render("gaussian kernel sum is zero"));
    }

    // Quantize to Q16 and push any rounding remainder into the center tap so
    // the kernel sums to exactly 1.0.
    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let mid_val = i64::from(weights[mid]) + delta;
        weights[mid] = mid_val.clamp(0, 65536) as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let dx = ki as i32 - radius;
                let sx = (x + dx).clamp(0, w - 1);
                let idx = ((y * w + sx) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let dy = ki as i32 - radius;
                let sy = (y + dy).clamp(0, h - 1);
                let idx = ((sy * w + x) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    v.min(255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_from(width: u32, height: u32, data: Vec<u8>) -> FrameRgba {
        FrameRgba {
            width,
            height,
            data,
        }
    }

    #[test]
    fn blur_radius_0_is_identity() {
        let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
        let out = gaussian_blur_rgba8(&src, 1, 2, 0, 1.0).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn blur_constant_image_is_identity() {
        let (w, h) = (4u32, 3u32);
        let px = [10u8, 20, 30, 255];
        let src = px.repeat((w * h) as usize);
        let out = gaussian_blur_rgba8(&src, w, h, 3, 2.0).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn blur_rejects_mismatched_buffer() {
        assert!(gaussian_blur_rgba8(&[0u8; 7], 1, 2, 1, 1.0).is_err());
    }

    #[test]
    fn fade_preserves_shape_and_leaves_the_bottom_untouched() {
        let (w, h) = (6u32, 20u32);
        // Vertical stripes so the horizontal blur has something to smear.
        let mut data = Vec::with_capacity((w * h * 4) as usize);
        for _y in 0..h {
            for x in 0..w {
                let v = if x % 2 == 0 { 255 } else { 0 };
                data.extend_from_slice(&[v, v, v, 255]);
            }
        }
        let mut frame = frame_from(w, h, data.clone());
        blur_fade_top(&mut frame, 0.35, 4).unwrap();

        assert_eq!(frame.data.len(), data.len());
        // Top rows changed (blur blended at factor 1.0).
        assert_ne!(&frame.data[..(w * 4) as usize], &data[..(w * 4) as usize]);
        // Rows below the fade zone are byte-identical.
        let fade_rows = (f64::from(h) * 0.35) as usize;
        let cut = fade_rows * (w as usize) * 4;
        assert_eq!(&frame.data[cut..], &data[cut..]);
    }

    #[test]
    fn fade_with_zero_fraction_or_radius_is_a_no_op() {
        let data = vec![7u8; 4 * 4 * 4];
        let mut frame = frame_from(4, 4, data.clone());
        blur_fade_top(&mut frame, 0.0, 8).unwrap();
        assert_eq!(frame.data, data);
        blur_fade_top(&mut frame, 0.5, 0).unwrap();
        assert_eq!(frame.data, data);
        assert!(blur_fade_top(&mut frame, 1.5, 8).is_err());
    }
}
