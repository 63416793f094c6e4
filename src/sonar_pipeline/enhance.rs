//! Grayscale enhancement
//!
//! Stateless point operations on a [`Raster`]. Every function returns a new
//! raster and leaves its input untouched.

use tracing::debug;

use crate::sonar_pipeline::common::error::{Result, SonarError};
use crate::sonar_pipeline::raster::Raster;

/// Enhancement a caller can request by value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Enhancement {
    Gamma(f64),
    HistogramEqualize,
    Normalize,
    StretchIntensity,
    Negative,
}

impl Enhancement {
    pub fn apply(&self, src: &Raster) -> Result<Raster> {
        debug!(enhancement = ?self, "Applying enhancement");
        match *self {
            Enhancement::Gamma(g) => gamma(src, g),
            Enhancement::HistogramEqualize => Ok(histogram_equalize(src)),
            Enhancement::Normalize => Ok(normalize(src)),
            Enhancement::StretchIntensity => Ok(stretch_intensity(src)),
            Enhancement::Negative => Ok(negative(src)),
        }
    }
}

/// Gamma correction through a 256-entry table: `(i / 255)^(1 / g) * 255`,
/// capped at 255 and truncated.
pub fn gamma(src: &Raster, g: f64) -> Result<Raster> {
    if !(g.is_finite() && g > 0.0) {
        return Err(SonarError::Data(format!("gamma must be positive, got {g}")));
    }

    let inv_gamma = 1.0 / g;
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = (255.0f64).min((i as f64 / 255.0).powf(inv_gamma) * 255.0) as u8;
    }
    Ok(src.map_lut(&lut))
}

/// Histogram equalization.
///
/// `lut[i] = round((cdf[i] - cdf_min) * 255 / (total - cdf_min))` where
/// `cdf_min` is the first nonzero cumulative count. A raster with a single
/// gray level has no spread to redistribute and is returned unchanged.
pub fn histogram_equalize(src: &Raster) -> Raster {
    let total = src.pixels().len() as i64;
    let hist = src.histogram();

    let mut cdf = [0i64; 256];
    let mut running = 0i64;
    for (c, &h) in cdf.iter_mut().zip(hist.iter()) {
        running += h as i64;
        *c = running;
    }

    let Some(&cdf_min) = cdf.iter().find(|&&c| c > 0) else {
        return src.clone();
    };
    if total == cdf_min {
        return src.clone();
    }

    let mut lut = [0u8; 256];
    for (entry, &c) in lut.iter_mut().zip(cdf.iter()) {
        let v = ((c - cdf_min) as f64 * 255.0 / (total - cdf_min) as f64).round();
        *entry = v.clamp(0.0, 255.0) as u8;
    }
    src.map_lut(&lut)
}

fn linear_stretch_lut(min: u8, max: u8) -> [u8; 256] {
    let span = max as f64 - min as f64;
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        let v = (i as f64 - min as f64) * 255.0 / span;
        // 0/0 for a flat raster is NaN, which casts to 0
        *entry = v.clamp(0.0, 255.0) as u8;
    }
    lut
}

/// Linear stretch of the global min/max to 0..=255. A flat raster is
/// returned unchanged.
pub fn normalize(src: &Raster) -> Raster {
    let Some((min, max)) = src.min_max() else {
        return src.clone();
    };
    if min == max {
        return src.clone();
    }
    src.map_lut(&linear_stretch_lut(min, max))
}

/// Same stretch as [`normalize`] with the output clamped, but without the
/// flat-raster guard: a single gray level divides zero by zero and every
/// pixel becomes 0.
pub fn stretch_intensity(src: &Raster) -> Raster {
    let Some((min, max)) = src.min_max() else {
        return src.clone();
    };
    src.map_lut(&linear_stretch_lut(min, max))
}

pub fn negative(src: &Raster) -> Raster {
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = 255 - i as u8;
    }
    src.map_lut(&lut)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient() -> Raster {
        let pixels: Vec<u8> = (0..64u32).map(|i| (40 + i * 2) as u8).collect();
        Raster::from_pixels(8, 8, pixels).unwrap()
    }

    #[test]
    fn test_gamma_one_is_identity() {
        let src = Raster::from_pixels(256, 1, (0..=255u8).collect()).unwrap();
        let out = gamma(&src, 1.0).unwrap();
        for (&a, &b) in src.pixels().iter().zip(out.pixels()) {
            assert!(a.abs_diff(b) <= 1, "{a} -> {b}");
        }
        assert_eq!(out.get(255, 0), Some(255));
        assert_eq!(out.get(0, 0), Some(0));
    }

    #[test]
    fn test_gamma_brightens_midtones() {
        let src = Raster::from_pixels(1, 1, vec![64]).unwrap();
        let out = gamma(&src, 2.0).unwrap();
        // sqrt(64 / 255) * 255 = 127.75
        assert_eq!(out.pixels(), &[127]);
    }

    #[test]
    fn test_gamma_rejects_non_positive() {
        assert!(matches!(gamma(&gradient(), 0.0), Err(SonarError::Data(_))));
        assert!(matches!(gamma(&gradient(), f64::NAN), Err(SonarError::Data(_))));
    }

    #[test]
    fn test_histogram_equalize_is_monotonic() {
        let src = Raster::from_pixels(4, 2, vec![10, 10, 10, 20, 20, 90, 200, 200]).unwrap();
        let out = histogram_equalize(&src);
        assert_eq!(out.get(0, 0), Some(0));
        assert_eq!(out.get(3, 1), Some(255));

        let hist = out.histogram();
        let mut cumulative = 0;
        for &h in hist.iter() {
            let next = cumulative + h;
            assert!(next >= cumulative);
            cumulative = next;
        }
        assert_eq!(cumulative, 8);

        // order of gray levels is preserved
        assert!(out.get(3, 0) < out.get(1, 1));
        assert!(out.get(1, 1) < out.get(2, 1));
    }

    #[test]
    fn test_histogram_equalize_flat_raster_unchanged() {
        let src = Raster::new(3, 3, 77);
        assert_eq!(histogram_equalize(&src), src);
    }

    #[test]
    fn test_normalize_spans_full_range() {
        let out = normalize(&gradient());
        assert_eq!(out.min_max(), Some((0, 255)));
    }

    #[test]
    fn test_normalize_flat_raster_unchanged() {
        let src = Raster::new(2, 2, 42);
        assert_eq!(normalize(&src), src);
    }

    #[test]
    fn test_stretch_matches_normalize_on_spread_input() {
        assert_eq!(stretch_intensity(&gradient()), normalize(&gradient()));
    }

    #[test]
    fn test_stretch_flat_raster_has_no_guard() {
        let out = stretch_intensity(&Raster::new(2, 2, 42));
        assert!(out.pixels().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_negative() {
        let src = Raster::from_pixels(3, 1, vec![0, 100, 255]).unwrap();
        assert_eq!(negative(&src).pixels(), &[255, 155, 0]);
    }

    #[test]
    fn test_input_not_modified() {
        let src = gradient();
        let before = src.clone();
        let _ = Enhancement::Negative.apply(&src).unwrap();
        let _ = Enhancement::Gamma(0.5).apply(&src).unwrap();
        assert_eq!(src, before);
    }
}
