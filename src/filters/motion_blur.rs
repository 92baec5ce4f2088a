use crate::error::DeblurError;
use crate::filters::filter::{Filter, FilterConfig};
use crate::filters::psf::motion_psf;
use crate::math_tools::{convolve_2d_freq, fftshift};
use ndarray::Array2;

/// Degrades an image with linear motion blur.
///
/// This is the forward model the Wiener deconvolution inverts: a circular convolution of the
/// image with the PSF returned by [`motion_psf`] for the same length and angle.
#[derive(Clone, Debug)]
pub struct MotionBlur {
    /// Half-length of the motion in pixels
    pub length: u32,
    /// Direction of the motion in degrees
    pub angle: f32,
}

impl MotionBlur {
    pub fn new(length: u32, angle: f32) -> Self {
        MotionBlur { length, angle }
    }
}

impl Filter for MotionBlur {
    fn config(&self) -> FilterConfig {
        FilterConfig {
            name: "Motion Blur".to_string(),
            description: "Smears the image along a straight line of the given length and angle."
                .to_string(),
            hyperlink: None,
        }
    }

    fn filter(&self, input: &Array2<f32>) -> Result<Array2<f32>, DeblurError> {
        let psf = motion_psf(input.dim(), self.length, self.angle)?;
        let kernel = fftshift(&psf)?;
        convolve_2d_freq(input, &kernel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_motion_blur_preserves_mean_brightness() {
        let image = Array2::from_shape_fn((32, 40), |(r, c)| ((r * c) % 17) as f32 * 10.0);
        let blurred = MotionBlur::new(6, 45.0).filter(&image).unwrap();
        assert_eq!(blurred.dim(), image.dim());
        assert_abs_diff_eq!(
            blurred.mean().unwrap(),
            image.mean().unwrap(),
            epsilon = 1e-2
        );
    }

    #[test]
    fn test_horizontal_blur_smears_a_point_along_the_row() {
        let mut image = Array2::<f32>::zeros((16, 16));
        image[(8, 8)] = 100.0;
        let blurred = MotionBlur::new(2, 0.0).filter(&image).unwrap();
        for c in 6..=10 {
            assert_abs_diff_eq!(blurred[(8, c)], 20.0, epsilon = 1e-3);
        }
        assert_abs_diff_eq!(blurred[(7, 8)], 0.0, epsilon = 1e-3);
        assert_abs_diff_eq!(blurred[(8, 11)], 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_odd_image_is_rejected() {
        let image = Array2::<f32>::zeros((7, 8));
        assert!(matches!(
            MotionBlur::new(2, 0.0).filter(&image),
            Err(DeblurError::OddDimensions { .. })
        ));
    }

    #[test]
    fn test_config_names_the_filter() {
        assert_eq!(MotionBlur::new(1, 0.0).config().name, "Motion Blur");
    }
}
