//! Wiener deconvolution of linear motion blur.
//!
//! The restoration builds the motion PSF for the image size, derives the Wiener transfer function
//! from the spectrum of the origin-anchored PSF and applies it in the frequency domain.

use crate::error::DeblurError;
use crate::filters::filter::{Filter, FilterConfig};
use crate::filters::psf::motion_psf;
use crate::math_tools::{fft2, fftshift, filter_2d_freq};
use ndarray::Array2;
use std::time::Instant;

/// Computes the Wiener filter transfer function of a center-anchored PSF.
///
/// The PSF is shifted so that its center lands on the origin and transformed without scaling.
/// With `re` the real part of that spectrum, the transfer function is `re / (re^2 + nsr)`.
/// Only the real part enters the denominator; for the point-symmetric kernels produced by
/// [`motion_psf`] the imaginary part vanishes up to rounding.
///
/// # Arguments
/// - `psf` (*&Array2<f32>*): The PSF, centered at `[rows / 2, cols / 2]`, with even dimensions.
/// - `nsr` (*f32*): Noise-to-signal ratio, the regularization term of the denominator.
///
/// # Returns
/// - (*Array2<f32>*): The transfer function, same dimensions as `psf`, DC at `[0, 0]`.
///
/// # Errors
/// - `DeblurError::InvalidNoiseRatio` if `nsr` is not finite or not positive.
/// - `DeblurError::OddDimensions` if the PSF cannot be shifted.
pub fn wiener_filter(psf: &Array2<f32>, nsr: f32) -> Result<Array2<f32>, DeblurError> {
    if !nsr.is_finite() || nsr <= 0.0 {
        return Err(DeblurError::InvalidNoiseRatio(nsr));
    }
    let shifted = fftshift(psf)?;
    let spectrum = fft2(&shifted);
    Ok(spectrum.mapv(|h| {
        let re = h.re;
        re / (re.abs().powi(2) + nsr)
    }))
}

/// Restores an image degraded by linear motion blur.
///
/// # Fields
/// - `length`: Half-length of the motion in pixels.
/// - `angle`: Direction of the motion in degrees.
/// - `nsr`: Noise-to-signal ratio, the reciprocal of the assumed SNR.
#[derive(Clone, Debug)]
pub struct WienerDeconvolution {
    pub length: u32,
    pub angle: f32,
    pub nsr: f32,
}

impl WienerDeconvolution {
    pub fn new(length: u32, angle: f32, nsr: f32) -> Self {
        WienerDeconvolution { length, angle, nsr }
    }
}

impl Filter for WienerDeconvolution {
    fn config(&self) -> FilterConfig {
        FilterConfig {
            name: "Wiener Deconvolution".to_string(),
            description: "Removes linear motion blur with a Wiener filter built from the motion PSF."
                .to_string(),
            hyperlink: Some((
                Some("Wiener deconvolution".to_string()),
                "https://en.wikipedia.org/wiki/Wiener_deconvolution".to_string(),
            )),
        }
    }

    fn filter(&self, input: &Array2<f32>) -> Result<Array2<f32>, DeblurError> {
        let start = Instant::now();
        let psf = motion_psf(input.dim(), self.length, self.angle)?;
        let transfer = wiener_filter(&psf, self.nsr)?;
        log::debug!("Wiener filter calculated. This took {:?}", start.elapsed());

        let start = Instant::now();
        let output = filter_2d_freq(input, &transfer)?;
        log::debug!("image filtered. This took {:?}", start.elapsed());
        Ok(output)
    }
}
