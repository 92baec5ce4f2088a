use std::path::PathBuf;

/// Parameters of a single deblurring run.
///
/// # Fields
/// - `image`: Path of the blurred input image.
/// - `length`: Length of the motion in pixels.
/// - `angle`: Angle of the motion in degrees.
/// - `snr`: Assumed signal-to-noise ratio. The Wiener filter uses its reciprocal.
/// - `output`: Path the restored image is written to.
#[derive(Clone, Debug, PartialEq)]
pub struct DeblurConfig {
    pub image: PathBuf,
    pub length: u32,
    pub angle: i32,
    pub snr: i32,
    pub output: PathBuf,
}

impl Default for DeblurConfig {
    fn default() -> Self {
        DeblurConfig {
            image: PathBuf::from("P1030513.JPG"),
            length: 78,
            angle: 12,
            snr: 100,
            output: PathBuf::from("result.jpg"),
        }
    }
}

impl DeblurConfig {
    /// Noise-to-signal ratio handed to the Wiener filter.
    ///
    /// A zero SNR yields an infinite ratio, which the filter rejects.
    pub fn nsr(&self) -> f32 {
        1.0 / self.snr as f32
    }
}
