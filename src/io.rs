use crate::error::DeblurError;
use image::{GrayImage, Luma};
use ndarray::{s, Array2};
use std::path::Path;

/// Loads an image file as a single-channel `f32` array in `(rows, cols)` layout.
///
/// Color images are converted to 8-bit luma before promotion, so values lie in `[0, 255]`.
pub fn load_grayscale(path: &Path) -> Result<Array2<f32>, DeblurError> {
    let img = image::open(path)
        .map_err(|source| DeblurError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?
        .into_luma8();
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(DeblurError::EmptyImage {
            path: path.to_path_buf(),
        });
    }
    Ok(Array2::from_shape_fn(
        (height as usize, width as usize),
        |(r, c)| img.get_pixel(c as u32, r as u32)[0] as f32,
    ))
}

/// Crops an image to its largest top-left region with even dimensions.
pub fn crop_even(image: &Array2<f32>) -> Result<Array2<f32>, DeblurError> {
    let (rows, cols) = image.dim();
    let (even_rows, even_cols) = (rows & !1, cols & !1);
    if even_rows == 0 || even_cols == 0 {
        return Err(DeblurError::EmptyRegion { rows, cols });
    }
    Ok(image.slice(s![..even_rows, ..even_cols]).to_owned())
}

/// Converts filtered values to 8 bit and stretches them to the full `[0, 255]` range.
///
/// Values are first rounded (halves to even) and saturated to `u8`, then mapped linearly so that
/// the smallest value becomes 0 and the largest 255. A constant image maps to all zeros.
pub fn to_u8_normalized(array: &Array2<f32>) -> Array2<u8> {
    let saturated = array.mapv(|v| v.round_ties_even().clamp(0.0, 255.0) as u8);
    let min = saturated.iter().copied().min().unwrap_or(0);
    let max = saturated.iter().copied().max().unwrap_or(0);
    if max == min {
        return Array2::zeros(saturated.dim());
    }
    let scale = 255.0 / (max - min) as f32;
    saturated.mapv(|v| ((v - min) as f32 * scale).round_ties_even() as u8)
}

/// Writes an 8-bit array as a grayscale image, the format is chosen from the file extension.
pub fn save_grayscale(path: &Path, array: &Array2<u8>) -> Result<(), DeblurError> {
    let (rows, cols) = array.dim();
    let img = GrayImage::from_fn(cols as u32, rows as u32, |x, y| {
        Luma([array[(y as usize, x as usize)]])
    });
    img.save(path).map_err(|source| DeblurError::ImageSave {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_even_drops_last_row_and_column() {
        let image = Array2::from_shape_fn((5, 7), |(r, c)| (r * 7 + c) as f32);
        let cropped = crop_even(&image).unwrap();
        assert_eq!(cropped.dim(), (4, 6));
        assert_eq!(cropped[(3, 5)], image[(3, 5)]);

        let even = Array2::<f32>::zeros((4, 6));
        assert_eq!(crop_even(&even).unwrap().dim(), (4, 6));
    }

    #[test]
    fn test_crop_even_rejects_single_row() {
        let image = Array2::<f32>::zeros((1, 8));
        assert!(matches!(
            crop_even(&image),
            Err(DeblurError::EmptyRegion { rows: 1, cols: 8 })
        ));
    }

    #[test]
    fn test_normalization_saturates_then_stretches() {
        let array = Array2::from_shape_vec((1, 4), vec![-40.0, 50.0, 100.0, 900.0]).unwrap();
        let normalized = to_u8_normalized(&array);
        assert_eq!(normalized.into_raw_vec_and_offset().0, vec![0, 50, 100, 255]);

        let narrow = Array2::from_shape_vec((1, 3), vec![10.0, 20.0, 30.0]).unwrap();
        let normalized = to_u8_normalized(&narrow);
        assert_eq!(normalized.into_raw_vec_and_offset().0, vec![0, 128, 255]);
    }

    #[test]
    fn test_normalization_rounds_halves_to_even() {
        let array = Array2::from_shape_vec((1, 5), vec![0.0, 2.5, 3.5, 254.5, 255.0]).unwrap();
        let normalized = to_u8_normalized(&array);
        assert_eq!(normalized.into_raw_vec_and_offset().0, vec![0, 2, 4, 254, 255]);
    }

    #[test]
    fn test_normalization_of_constant_image_is_zero() {
        let array = Array2::from_elem((3, 3), 42.0_f32);
        assert!(to_u8_normalized(&array).iter().all(|&v| v == 0));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("round_trip.png");
        let array = Array2::from_shape_fn((6, 10), |(r, c)| (r * 40 + c * 3) as u8);

        save_grayscale(&path, &array).unwrap();
        let loaded = load_grayscale(&path).unwrap();
        assert_eq!(loaded.dim(), (6, 10));
        for (l, a) in loaded.iter().zip(array.iter()) {
            assert_eq!(*l, *a as f32);
        }
    }

    #[test]
    fn test_missing_file_is_an_input_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_grayscale(&dir.path().join("missing.jpg")).unwrap_err();
        assert!(matches!(err, DeblurError::ImageLoad { .. }));
        assert!(err.is_input_failure());
    }
}
