//! Image filters for motion blur restoration.
//!
//! Each filter implements the `Filter` trait defined in the `filter` module, providing a
//! consistent interface for configuration and application.

/// Core filter interfaces and shared components.
pub mod filter;

/// Forward model of linear motion blur.
/// Used to synthesize degraded images with a known PSF.
#[cfg(test)]
pub mod motion_blur;

/// Point Spread Function of linear motion.
pub mod psf;

/// Wiener deconvolution filter for removing motion blur.
/// Builds the frequency-domain transfer function from the motion PSF and a noise-to-signal ratio.
pub mod wiener;
