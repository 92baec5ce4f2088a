//! Error type shared by the deblurring pipeline and its I/O layer.

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum DeblurError {
    #[error("image {path:?} cannot be loaded")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("image {path:?} contains no pixels")]
    EmptyImage { path: PathBuf },
    #[error("a {rows}x{cols} region has no area left to process")]
    EmptyRegion { rows: usize, cols: usize },
    #[error("quadrant shift needs even dimensions, got {rows}x{cols}")]
    OddDimensions { rows: usize, cols: usize },
    #[error("array dimensions differ: expected {expected:?}, found {found:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    #[error("point-spread function has no mass")]
    DegeneratePsf,
    #[error("noise-to-signal ratio must be finite and positive, got {0}")]
    InvalidNoiseRatio(f32),
    #[error("image {path:?} cannot be saved")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl DeblurError {
    /// True for failures caused by the input file rather than by the pipeline.
    pub fn is_input_failure(&self) -> bool {
        matches!(
            self,
            DeblurError::ImageLoad { .. } | DeblurError::EmptyImage { .. }
        )
    }
}
